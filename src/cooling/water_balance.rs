use super::design::DesignParameters;

/// 액상 손실이 없을 때의 체류시간 대체값(h). 사실상 무제한.
pub const UNLIMITED_RETENTION_H: f64 = 999.0;
/// ln 2. 1차 희석 반감기 계수.
const HALF_LIFE_FACTOR: f64 = 0.693;

/// 냉각탑 물수지 계산 결과. 유량은 m³/h, 시간은 h.
#[derive(Debug, Clone, PartialEq)]
pub struct WaterBalance {
    /// 농축배수
    pub cycles: f64,
    /// 증발량
    pub evaporation_m3_h: f64,
    /// 비산 손실
    pub windage_m3_h: f64,
    /// 농도 유지에 필요한 전체 블로다운 (비산·공정손실 포함)
    pub total_blowdown_m3_h: f64,
    /// 블로다운 밸브로 빼야 할 양
    pub controlled_blowdown_m3_h: f64,
    /// 공정 손실
    pub process_loss_m3_h: f64,
    /// 전체 액상 손실
    pub liquid_loss_m3_h: f64,
    /// 보충수량
    pub makeup_m3_h: f64,
    /// 체류시간
    pub retention_time_h: f64,
    /// 약품 농도 반감기(HTI)
    pub half_life_h: f64,
    /// 경고/주의 메시지
    pub warnings: Vec<String>,
}

/// 주어진 농축배수에서 증발·블로다운·보충수 및 체류시간을 계산한다.
///
/// 배수가 1 이하이면 농도 제어가 없는 것으로 보고 블로다운을 0으로 둔다.
pub fn compute_water_balance(design: &DesignParameters, cycles: f64) -> WaterBalance {
    let evaporation = design.evaporation_m3_h();
    let windage = design.windage_m3_h();
    let process_loss = design.process_loss_m3_h;

    let total_blowdown = if cycles > 1.0 {
        evaporation / (cycles - 1.0)
    } else {
        0.0
    };
    let controlled_blowdown = (total_blowdown - windage - process_loss).max(0.0);
    let makeup = evaporation + total_blowdown;
    let liquid_loss = controlled_blowdown + windage + process_loss;

    let retention_time = if liquid_loss > 0.0 {
        design.system_volume_m3 / liquid_loss
    } else {
        UNLIMITED_RETENTION_H
    };

    let mut warnings = Vec::new();
    if cycles <= 1.0 {
        warnings.push(format!(
            "농축배수 {:.2}가 1 이하이므로 블로다운을 0으로 계산했습니다.",
            cycles
        ));
    } else if controlled_blowdown == 0.0 {
        warnings.push(
            "비산·공정 손실만으로 필요한 블로다운을 초과합니다. 실제 농축배수는 더 낮습니다."
                .into(),
        );
    }

    WaterBalance {
        cycles,
        evaporation_m3_h: evaporation,
        windage_m3_h: windage,
        total_blowdown_m3_h: total_blowdown,
        controlled_blowdown_m3_h: controlled_blowdown,
        process_loss_m3_h: process_loss,
        liquid_loss_m3_h: liquid_loss,
        makeup_m3_h: makeup,
        retention_time_h: retention_time,
        half_life_h: HALF_LIFE_FACTOR * retention_time,
        warnings,
    }
}
