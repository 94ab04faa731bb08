//! 농축/지수/물수지의 성질 기반 테스트 (proptest).
use cooling_tower_cycles::cooling::{
    compute_water_balance, simulate_cycles, ConstraintSet, DesignParameters, StopReason,
};
use cooling_tower_cycles::water::{compute_indices, WaterComposition};
use proptest::prelude::*;

fn makeup_strategy() -> impl Strategy<Value = WaterComposition> {
    (
        (6.0f64..9.5, 50.0f64..3000.0, 0.0f64..400.0, 0.0f64..200.0),
        (0.0f64..400.0, 0.0f64..400.0, 0.0f64..400.0, 0.0f64..80.0),
        (0.0f64..5.0, 0.0f64..5.0, 0.0f64..100.0, prop::option::of(30.0f64..2000.0)),
        (0.0f64..2.0, 0.0f64..1.0, 0.0f64..3.0, 0.0f64..0.5, 0.0f64..0.5),
    )
        .prop_map(|(major, anions, minor, metals)| {
            let (ph, cond, ca, mg) = major;
            let (alk, cl, so4, sio2) = anions;
            let (po4, poly, na, tds) = minor;
            let (fe, al, zn, mn, cu) = metals;
            WaterComposition {
                ph,
                conductivity_us_cm: cond,
                tds_mg_l: tds,
                calcium_hardness: ca,
                magnesium_hardness: mg,
                total_alkalinity: alk,
                chloride: cl,
                sulfate: so4,
                silica: sio2,
                orthophosphate: po4,
                polyphosphate: poly,
                sodium: na,
                iron: fe,
                aluminium: al,
                zinc: zn,
                manganese: mn,
                copper: cu,
            }
        })
}

fn design_strategy() -> impl Strategy<Value = DesignParameters> {
    (
        0.0f64..5000.0,
        1.0f64..15.0,
        15.0f64..45.0,
        0.1f64..1.0,
        10.0f64..3000.0,
        0.0f64..10.0,
    )
        .prop_map(|(q, dt, basin, load, volume, loss)| DesignParameters {
            circulation_rate_m3_h: q,
            delta_t_c: dt,
            basin_temp_c: basin,
            heat_load_fraction: load,
            system_volume_m3: volume,
            process_loss_m3_h: loss,
            ..DesignParameters::default()
        })
}

proptest! {
    /// pH를 제외한 모든 성분은 배수에 정확히 비례한다.
    #[test]
    fn ions_scale_linearly(raw in makeup_strategy(), design in design_strategy()) {
        let res = simulate_cycles(&raw, &design, &ConstraintSet::default());
        for step in &res.history {
            let expected = WaterComposition {
                ph: step.water.ph,
                ..raw.concentrated(step.cycle)
            };
            prop_assert_eq!(&step.water, &expected);
            prop_assert_eq!(step.water.magnesium_hardness, raw.magnesium_hardness * step.cycle);
            prop_assert_eq!(step.water.copper, raw.copper * step.cycle);
        }
    }

    /// 자연 농축 pH는 배수에 대해 감소하지 않으며 9.3을 넘지 않는다.
    #[test]
    fn natural_ph_is_monotone_and_capped(raw in makeup_strategy(), design in design_strategy()) {
        let res = simulate_cycles(&raw, &design, &ConstraintSet::unbounded());
        for pair in res.history.windows(2) {
            prop_assert!(pair[1].water.ph >= pair[0].water.ph);
        }
        for step in &res.history {
            prop_assert!(step.water.ph <= 9.3);
        }
    }

    /// 입력이 같으면 결과도 비트 단위로 같다.
    #[test]
    fn indices_are_deterministic(raw in makeup_strategy(), temp in 10.0f64..80.0) {
        let a = compute_indices(&raw, temp);
        let b = compute_indices(&raw, temp);
        prop_assert_eq!(a.lsi.to_bits(), b.lsi.to_bits());
        prop_assert_eq!(a.rsi.to_bits(), b.rsi.to_bits());
        prop_assert_eq!(a.psi.to_bits(), b.psi.to_bits());
        prop_assert_eq!(a.larson_skold.to_bits(), b.larson_skold.to_bits());
    }

    /// 어떤 입력이든 291 단계 이내에 끝나고, 정지 단계 외에는 모두 안전하다.
    #[test]
    fn simulation_is_bounded(raw in makeup_strategy(), design in design_strategy()) {
        let res = simulate_cycles(&raw, &design, &ConstraintSet::default());
        prop_assert!(!res.history.is_empty());
        prop_assert!(res.history.len() <= 291);
        prop_assert!(res.max_cycle() <= 30.0 + 1e-9);
        prop_assert!(res.max_cycle() >= 1.0);
        if res.stop_reason == StopReason::MaxCycleCeiling {
            prop_assert!(res.history.iter().all(|s| s.stop_reason.is_none()));
        } else {
            let (last, rest) = res.history.split_last().unwrap();
            prop_assert_eq!(last.stop_reason, Some(res.stop_reason));
            prop_assert!(rest.iter().all(|s| s.stop_reason.is_none()));
        }
    }

    /// 센티널 지수 상태에서는 LSI 한계를 보고하지 않는다.
    #[test]
    fn sentinel_never_limits_on_lsi(raw in makeup_strategy(), design in design_strategy()) {
        let raw = WaterComposition { calcium_hardness: 0.0, ..raw };
        let constraints = ConstraintSet { max_lsi: -1000.0, ..ConstraintSet::default() };
        let res = simulate_cycles(&raw, &design, &constraints);
        prop_assert_ne!(res.stop_reason, StopReason::LsiLimit);
    }

    /// 보충수 = 증발 + 전체 블로다운 (물질수지 폐합)
    #[test]
    fn water_balance_closes(design in design_strategy(), cycles in 1.01f64..30.0) {
        let wb = compute_water_balance(&design, cycles);
        let closure = wb.makeup_m3_h - (wb.evaporation_m3_h + wb.total_blowdown_m3_h);
        prop_assert!(closure.abs() < 1e-6);
        prop_assert!(wb.controlled_blowdown_m3_h >= 0.0);
        let tol = 1e-9 * wb.retention_time_h.max(1.0);
        prop_assert!((wb.half_life_h - 0.693 * wb.retention_time_h).abs() < tol);
    }
}
