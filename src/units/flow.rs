use serde::{Deserialize, Serialize};

/// 체적 유량 단위. 내부 기준은 m³/h이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowUnit {
    CubicMeterPerHour,
    LiterPerSecond,
    UsGallonPerMinute,
}

fn to_m3_per_h(value: f64, unit: FlowUnit) -> f64 {
    match unit {
        FlowUnit::CubicMeterPerHour => value,
        FlowUnit::LiterPerSecond => value * 3.6,
        // 1 gpm = 3.785411784 L/min
        FlowUnit::UsGallonPerMinute => value * 0.227_124_707_04,
    }
}

fn from_m3_per_h(value: f64, unit: FlowUnit) -> f64 {
    match unit {
        FlowUnit::CubicMeterPerHour => value,
        FlowUnit::LiterPerSecond => value / 3.6,
        FlowUnit::UsGallonPerMinute => value / 0.227_124_707_04,
    }
}

/// 유량을 변환한다.
pub fn convert_flow(value: f64, from: FlowUnit, to: FlowUnit) -> f64 {
    let base = to_m3_per_h(value, from);
    from_m3_per_h(base, to)
}
