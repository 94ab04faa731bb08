use serde::{Deserialize, Serialize};

/// 증발량 경험식 계수: E = Q · ΔT · 0.00153 · 부하율 (m³/h, °C)
pub const EVAPORATION_COEFFICIENT: f64 = 0.00153;
/// 비산(windage/drift) 손실 비율. 순환수량 대비 0.02%.
pub const WINDAGE_FRACTION: f64 = 0.0002;

fn default_evaporation_factor() -> f64 {
    1.0
}

/// 냉각탑 설계/운전 조건. 유량은 m³/h, 온도는 °C, 체적은 m³ 기준이다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignParameters {
    /// 순환수량(m³/h)
    pub circulation_rate_m3_h: f64,
    /// 냉각 범위 ΔT(°C)
    pub delta_t_c: f64,
    /// 수조(basin) 수온(°C)
    pub basin_temp_c: f64,
    /// 열부하율 (0~1, 1.0 = 100%)
    pub heat_load_fraction: f64,
    /// 시스템 보유수량(m³)
    pub system_volume_m3: f64,
    /// 미계측 공정 손실(누수, 스프레이 등, m³/h)
    #[serde(default)]
    pub process_loss_m3_h: f64,
    /// 산 주입 목표 pH. 설정하면 pH를 이 값으로 고정한다.
    #[serde(default)]
    pub acid_feed_target_ph: Option<f64>,
    /// 열교환기 표면(skin) 온도(°C). 없으면 수조 온도 + 오프셋을 쓴다.
    #[serde(default)]
    pub skin_temp_c: Option<f64>,
    /// 증발 계수 f (기본 1.0)
    #[serde(default = "default_evaporation_factor")]
    pub evaporation_factor: f64,
}

impl DesignParameters {
    /// 증발량(m³/h)
    pub fn evaporation_m3_h(&self) -> f64 {
        self.circulation_rate_m3_h
            * self.delta_t_c
            * EVAPORATION_COEFFICIENT
            * self.heat_load_fraction
            * self.evaporation_factor
    }

    /// 비산 손실(m³/h)
    pub fn windage_m3_h(&self) -> f64 {
        self.circulation_rate_m3_h * WINDAGE_FRACTION
    }

    /// 제어되지 않는 액상 손실(공정 손실 + 비산, m³/h)
    pub fn uncontrolled_loss_m3_h(&self) -> f64 {
        self.process_loss_m3_h + self.windage_m3_h()
    }

    /// 블로다운 밸브를 완전히 닫았을 때 도달하는 농축배수.
    /// 제어되지 않는 손실이 없으면 `no_loss_ceiling`을 돌려준다.
    pub fn hydraulic_ceiling(&self, no_loss_ceiling: f64) -> f64 {
        let uncontrolled = self.uncontrolled_loss_m3_h();
        if uncontrolled > 0.0 {
            (self.evaporation_m3_h() + uncontrolled) / uncontrolled
        } else {
            no_loss_ceiling
        }
    }

    /// 지수 평가에 쓸 표면 온도(°C)
    pub fn skin_temp_c(&self, offset_c: f64) -> f64 {
        self.skin_temp_c.unwrap_or(self.basin_temp_c + offset_c)
    }

    /// 설계 조건에 대한 권고성 경고.
    pub fn advisories(&self, raw_ph: f64) -> Vec<String> {
        let mut warnings = Vec::new();
        if !(0.0..=1.0).contains(&self.heat_load_fraction) {
            warnings.push(format!(
                "열부하율 {:.2}가 0~1 범위를 벗어났습니다.",
                self.heat_load_fraction
            ));
        }
        if self.circulation_rate_m3_h <= 0.0 {
            warnings.push("순환수량이 0 이하입니다. 증발량이 0으로 계산됩니다.".into());
        }
        if self.system_volume_m3 <= 0.0 {
            warnings.push("보유수량이 0 이하입니다. 체류시간이 의미가 없습니다.".into());
        }
        if let Some(target) = self.acid_feed_target_ph {
            if target >= raw_ph {
                warnings.push(format!(
                    "산 주입 목표 pH {:.2}가 보충수 pH {:.2} 이상입니다.",
                    target, raw_ph
                ));
            }
        }
        warnings
    }
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self {
            circulation_rate_m3_h: 1500.0,
            delta_t_c: 10.0,
            basin_temp_c: 32.0,
            heat_load_fraction: 1.0,
            system_volume_m3: 850.0,
            process_loss_m3_h: 0.0,
            acid_feed_target_ph: None,
            skin_temp_c: None,
            evaporation_factor: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hydraulic_ceiling_from_windage_only() {
        let d = DesignParameters::default();
        assert!((d.evaporation_m3_h() - 22.95).abs() < 1e-9);
        assert!((d.uncontrolled_loss_m3_h() - 0.3).abs() < 1e-12);
        assert!((d.hydraulic_ceiling(50.0) - 77.5).abs() < 1e-9);
    }

    #[test]
    fn no_uncontrolled_loss_uses_fallback() {
        let d = DesignParameters {
            circulation_rate_m3_h: 0.0,
            ..DesignParameters::default()
        };
        assert_eq!(d.hydraulic_ceiling(50.0), 50.0);
    }

    #[test]
    fn explicit_skin_temperature_wins() {
        let d = DesignParameters {
            skin_temp_c: Some(60.0),
            ..DesignParameters::default()
        };
        assert_eq!(d.skin_temp_c(15.0), 60.0);
        assert_eq!(DesignParameters::default().skin_temp_c(15.0), 47.0);
    }
}
