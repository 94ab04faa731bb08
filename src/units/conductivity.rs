use serde::{Deserialize, Serialize};

/// 전기전도도 단위. 내부 기준은 µS/cm이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConductivityUnit {
    MicroSiemensPerCm,
    MilliSiemensPerCm,
}

fn to_base(value: f64, unit: ConductivityUnit) -> f64 {
    match unit {
        ConductivityUnit::MicroSiemensPerCm => value,
        ConductivityUnit::MilliSiemensPerCm => value * 1000.0,
    }
}

fn from_base(value: f64, unit: ConductivityUnit) -> f64 {
    match unit {
        ConductivityUnit::MicroSiemensPerCm => value,
        ConductivityUnit::MilliSiemensPerCm => value / 1000.0,
    }
}

/// 전기전도도를 변환한다.
pub fn convert_conductivity(value: f64, from: ConductivityUnit, to: ConductivityUnit) -> f64 {
    let base = to_base(value, from);
    from_base(base, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millisiemens_to_microsiemens() {
        let v = convert_conductivity(
            1.34,
            ConductivityUnit::MilliSiemensPerCm,
            ConductivityUnit::MicroSiemensPerCm,
        );
        assert!((v - 1340.0).abs() < 1e-9);
    }
}
