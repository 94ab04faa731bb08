use serde::{Deserialize, Serialize};

/// 전도도(µS/cm)로부터 TDS(mg/L)를 추정하는 환산 계수.
pub const TDS_PER_CONDUCTIVITY: f64 = 0.65;

/// 보충수 pH로 그럴듯한 하한/상한.
pub const PLAUSIBLE_PH_RANGE: (f64, f64) = (5.0, 10.0);

/// 수질 분석값 스냅샷.
///
/// 경도와 알칼리도는 CaCO₃ 환산 ppm, 나머지 이온은 이온 자체 ppm이다.
/// 보충수 한 건, 또는 특정 농축배수로 농축된 순환수 한 건을 나타낸다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterComposition {
    /// pH
    pub ph: f64,
    /// 전기전도도(µS/cm)
    #[serde(alias = "conductivity")]
    pub conductivity_us_cm: f64,
    /// 총용존고형물(mg/L). `None`이면 전도도에서 추정한다.
    #[serde(default)]
    pub tds_mg_l: Option<f64>,
    /// 칼슘 경도(ppm as CaCO₃)
    pub calcium_hardness: f64,
    /// 마그네슘 경도(ppm as CaCO₃)
    pub magnesium_hardness: f64,
    /// M-알칼리도(ppm as CaCO₃)
    pub total_alkalinity: f64,
    /// 염화물 Cl⁻
    #[serde(default)]
    pub chloride: f64,
    /// 황산염 SO₄²⁻
    #[serde(default)]
    pub sulfate: f64,
    /// 실리카 SiO₂
    #[serde(default)]
    pub silica: f64,
    /// 정인산염 o-PO₄
    #[serde(default)]
    pub orthophosphate: f64,
    /// 폴리인산염(PO₄ 환산)
    #[serde(default)]
    pub polyphosphate: f64,
    /// 나트륨 Na⁺
    #[serde(default)]
    pub sodium: f64,
    /// 철 Fe
    #[serde(default)]
    pub iron: f64,
    /// 알루미늄 Al
    #[serde(default)]
    pub aluminium: f64,
    /// 아연 Zn
    #[serde(default)]
    pub zinc: f64,
    /// 망간 Mn
    #[serde(default)]
    pub manganese: f64,
    /// 구리 Cu
    #[serde(default)]
    pub copper: f64,
}

impl WaterComposition {
    /// 지수 계산에 쓸 TDS(mg/L). 직접 입력값이 없으면 전도도×0.65로 추정한다.
    pub fn tds(&self) -> f64 {
        self.tds_mg_l
            .unwrap_or(self.conductivity_us_cm * TDS_PER_CONDUCTIVITY)
    }

    /// pH를 제외한 모든 성분을 `cycle`배 농축한 스냅샷을 만든다.
    pub fn concentrated(&self, cycle: f64) -> WaterComposition {
        WaterComposition {
            ph: self.ph,
            conductivity_us_cm: self.conductivity_us_cm * cycle,
            tds_mg_l: self.tds_mg_l.map(|v| v * cycle),
            calcium_hardness: self.calcium_hardness * cycle,
            magnesium_hardness: self.magnesium_hardness * cycle,
            total_alkalinity: self.total_alkalinity * cycle,
            chloride: self.chloride * cycle,
            sulfate: self.sulfate * cycle,
            silica: self.silica * cycle,
            orthophosphate: self.orthophosphate * cycle,
            polyphosphate: self.polyphosphate * cycle,
            sodium: self.sodium * cycle,
            iron: self.iron * cycle,
            aluminium: self.aluminium * cycle,
            zinc: self.zinc * cycle,
            manganese: self.manganese * cycle,
            copper: self.copper * cycle,
        }
    }

    /// 총경도(Ca + Mg, ppm as CaCO₃)
    pub fn total_hardness(&self) -> f64 {
        self.calcium_hardness + self.magnesium_hardness
    }

    /// 입력값에 대한 권고성 경고를 모은다. 계산은 막지 않는다.
    pub fn advisories(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if let Some(tds) = self.tds_mg_l {
            let estimate = self.conductivity_us_cm * TDS_PER_CONDUCTIVITY;
            if tds > estimate {
                warnings.push(format!(
                    "TDS {:.0} mg/L가 전도도 기반 추정치 {:.0} mg/L보다 큽니다. 분석값을 확인하세요.",
                    tds, estimate
                ));
            }
        }
        let (ph_min, ph_max) = PLAUSIBLE_PH_RANGE;
        if !(ph_min..=ph_max).contains(&self.ph) {
            warnings.push(format!(
                "pH {:.2}가 일반적인 범위({:.1}~{:.1})를 벗어났습니다.",
                self.ph, ph_min, ph_max
            ));
        }
        let negatives: Vec<&str> = self
            .labelled_ions()
            .into_iter()
            .filter(|(_, v)| *v < 0.0)
            .map(|(name, _)| name)
            .collect();
        if !negatives.is_empty() {
            warnings.push(format!("음수 분석값이 있습니다: {}", negatives.join(", ")));
        }
        warnings
    }

    /// 보고서/검증용 (이름, 값) 목록. pH는 포함하지 않는다.
    pub fn labelled_ions(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("Conductivity", self.conductivity_us_cm),
            ("TDS", self.tds()),
            ("Ca-H", self.calcium_hardness),
            ("Mg-H", self.magnesium_hardness),
            ("M-Alk", self.total_alkalinity),
            ("Cl", self.chloride),
            ("SO4", self.sulfate),
            ("SiO2", self.silica),
            ("o-PO4", self.orthophosphate),
            ("poly-PO4", self.polyphosphate),
            ("Na", self.sodium),
            ("Fe", self.iron),
            ("Al", self.aluminium),
            ("Zn", self.zinc),
            ("Mn", self.manganese),
            ("Cu", self.copper),
        ]
    }
}

impl Default for WaterComposition {
    /// 기본 보충수 분석값(참조 시나리오).
    fn default() -> Self {
        Self {
            ph: 7.8,
            conductivity_us_cm: 600.0,
            tds_mg_l: None,
            calcium_hardness: 80.0,
            magnesium_hardness: 40.0,
            total_alkalinity: 100.0,
            chloride: 50.0,
            sulfate: 40.0,
            silica: 15.0,
            orthophosphate: 0.0,
            polyphosphate: 0.0,
            sodium: 0.0,
            iron: 0.0,
            aluminium: 0.0,
            zinc: 0.0,
            manganese: 0.0,
            copper: 0.0,
        }
    }
}
