use cooling_tower_cycles::cooling::{
    compute_water_balance, simulate_cycles, water_balance::UNLIMITED_RETENTION_H, ConstraintSet,
    DesignParameters,
};
use cooling_tower_cycles::water::WaterComposition;

#[test]
fn balance_at_simulated_max_cycle() {
    let design = DesignParameters::default();
    let res = simulate_cycles(&WaterComposition::default(), &design, &ConstraintSet::default());
    let wb = compute_water_balance(&design, res.max_cycle());
    // 22.95 / 7.1
    assert!((wb.total_blowdown_m3_h - 22.95 / 7.1).abs() < 1e-6);
    assert!((wb.makeup_m3_h - (22.95 + 22.95 / 7.1)).abs() < 1e-6);
    assert!((wb.windage_m3_h - 0.3).abs() < 1e-12);
    assert!((wb.liquid_loss_m3_h - wb.total_blowdown_m3_h).abs() < 1e-9);
    assert!(wb.warnings.is_empty());
}

#[test]
fn single_cycle_means_no_blowdown() {
    let design = DesignParameters::default();
    let wb = compute_water_balance(&design, 1.0);
    assert_eq!(wb.total_blowdown_m3_h, 0.0);
    assert_eq!(wb.controlled_blowdown_m3_h, 0.0);
    assert!((wb.makeup_m3_h - wb.evaporation_m3_h).abs() < 1e-12);
    // 비산 손실만 남는다
    assert!((wb.retention_time_h - 850.0 / 0.3).abs() < 1e-6);
    assert_eq!(wb.warnings.len(), 1);
}

#[test]
fn uncontrolled_losses_exceeding_need_clamp_blowdown() {
    let design = DesignParameters {
        process_loss_m3_h: 10.0,
        ..DesignParameters::default()
    };
    let wb = compute_water_balance(&design, 10.0);
    assert_eq!(wb.controlled_blowdown_m3_h, 0.0);
    assert!((wb.liquid_loss_m3_h - 10.3).abs() < 1e-9);
    assert!((wb.makeup_m3_h - (22.95 + 2.55)).abs() < 1e-9);
    assert_eq!(wb.warnings.len(), 1);
}

#[test]
fn zero_flow_gives_sentinel_retention() {
    let design = DesignParameters {
        circulation_rate_m3_h: 0.0,
        ..DesignParameters::default()
    };
    let wb = compute_water_balance(&design, 5.0);
    assert_eq!(wb.retention_time_h, UNLIMITED_RETENTION_H);
    assert_eq!(wb.evaporation_m3_h, 0.0);
}
