use serde::{Deserialize, Serialize};

/// 보유수량(시스템 체적) 단위. 내부 기준은 입방미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeUnit {
    CubicMeter,
    Liter,
    UsGallon,
}

fn to_cubic_meter(value: f64, unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::CubicMeter => value,
        VolumeUnit::Liter => value / 1000.0,
        VolumeUnit::UsGallon => value * 0.003_785_411_784,
    }
}

fn from_cubic_meter(value: f64, unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::CubicMeter => value,
        VolumeUnit::Liter => value * 1000.0,
        VolumeUnit::UsGallon => value / 0.003_785_411_784,
    }
}

/// 체적을 변환한다.
pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    let m3 = to_cubic_meter(value, from);
    from_cubic_meter(m3, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gallon_to_cubic_meter() {
        let m3 = convert_volume(1000.0, VolumeUnit::UsGallon, VolumeUnit::CubicMeter);
        assert!((m3 - 3.785_411_784).abs() < 1e-9);
    }
}
