use serde::{Deserialize, Serialize};

use super::composition::WaterComposition;

/// Ca 경도 또는 알칼리도가 0 이하일 때 돌려주는 LSI 값.
pub const SENTINEL_LSI: f64 = -99.0;
/// 위와 같은 경우의 RSI/PSI 값.
pub const SENTINEL_STABILITY: f64 = 99.0;

/// o-PO₄가 이 값 이하이면 Ca×PO₄를 0으로 본다.
const ORTHO_PO4_THRESHOLD: f64 = 0.1;

/// Ca×PO₄ 위험 지표 계산 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaPo4Model {
    /// CaH · o-PO₄ 단순 곱
    #[default]
    PlainProduct,
    /// CaH · o-PO₄ · 0.1 / max(1, 10^(8.5 − pH)), 단순 곱을 넘지 않도록 제한
    PhScaled,
}

impl CaPo4Model {
    fn product(self, calcium_hardness: f64, orthophosphate: f64, ph: f64) -> f64 {
        if orthophosphate <= ORTHO_PO4_THRESHOLD {
            return 0.0;
        }
        let plain = calcium_hardness * orthophosphate;
        match self {
            CaPo4Model::PlainProduct => plain,
            CaPo4Model::PhScaled => {
                let divisor = 10_f64.powf(8.5 - ph).max(1.0);
                (plain * 0.1 / divisor).min(plain)
            }
        }
    }
}

/// 스케일/부식 지수 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indices {
    /// Langelier 포화지수
    pub lsi: f64,
    /// Ryznar 안정도지수
    pub rsi: f64,
    /// Puckorius 스케일지수
    pub psi: f64,
    /// Larson-Skold 지수
    pub larson_skold: f64,
    /// CaH × SO₄ (석고 위험)
    pub ca_so4: f64,
    /// MgH × SiO₂ (규산마그네슘 위험)
    pub mg_sio2: f64,
    /// Ca × PO₄ (인산칼슘 위험)
    pub ca_po4: f64,
    /// 포화 pH. 센티널일 때 `None`.
    pub ph_s: Option<f64>,
    /// 계산에 사용한 TDS(mg/L)
    pub tds_mg_l: f64,
}

impl Indices {
    /// 스케일 형성 능력이 없는 상태(Ca 경도나 알칼리도가 0 이하).
    pub fn sentinel(tds_mg_l: f64) -> Self {
        Self {
            lsi: SENTINEL_LSI,
            rsi: SENTINEL_STABILITY,
            psi: SENTINEL_STABILITY,
            larson_skold: 0.0,
            ca_so4: 0.0,
            mg_sio2: 0.0,
            ca_po4: 0.0,
            ph_s: None,
            tds_mg_l,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.ph_s.is_none()
    }

    pub fn lsi_tendency(&self) -> LsiTendency {
        LsiTendency::classify(self.lsi)
    }

    pub fn rsi_tendency(&self) -> RsiTendency {
        RsiTendency::classify(self.rsi)
    }
}

/// 기본(단순 곱) Ca×PO₄ 방식으로 지수를 계산한다.
pub fn compute_indices(water: &WaterComposition, temp_c: f64) -> Indices {
    compute_indices_with(water, temp_c, CaPo4Model::PlainProduct)
}

/// 주어진 수온(°C)에서 LSI/RSI/PSI/Larson-Skold 및 스케일 곱 지표를 계산한다.
///
/// 경험식 기반이며 활동도 보정은 하지 않는다. `+0.1`, `+0.001` 항은 경계값에서
/// log(0), 0 나눗셈을 피하기 위한 것이다.
pub fn compute_indices_with(
    water: &WaterComposition,
    temp_c: f64,
    ca_po4_model: CaPo4Model,
) -> Indices {
    let tds = water.tds();
    let ca = water.calcium_hardness;
    let alk = water.total_alkalinity;
    if ca <= 0.0 || alk <= 0.0 {
        return Indices::sentinel(tds);
    }

    let a = ((tds + 1.0).log10() - 1.0) / 10.0;
    let b = -13.12 * (temp_c + 273.0).log10() + 34.55;
    let c = (ca + 0.1).log10() - 0.4;
    let d = (alk + 0.1).log10();
    let ph_s = 9.3 + a + b - c - d;

    let lsi = water.ph - ph_s;
    let rsi = 2.0 * ph_s - water.ph;
    let ph_eq = 1.465 * (alk + 0.1).log10() + 4.54;
    let psi = 2.0 * ph_s - ph_eq;

    let larson_skold = (water.chloride / 35.5 + water.sulfate / 48.0) / (alk / 50.0 + 0.001);

    Indices {
        lsi,
        rsi,
        psi,
        larson_skold,
        ca_so4: ca * water.sulfate,
        mg_sio2: water.magnesium_hardness * water.silica,
        ca_po4: ca_po4_model.product(ca, water.orthophosphate, water.ph),
        ph_s: Some(ph_s),
        tds_mg_l: tds,
    }
}

/// LSI 해석 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsiTendency {
    Corrosive,
    Balanced,
    MildScaling,
    Scaling,
}

impl LsiTendency {
    pub fn classify(lsi: f64) -> Self {
        if lsi < -0.5 {
            LsiTendency::Corrosive
        } else if lsi <= 0.5 {
            LsiTendency::Balanced
        } else if lsi <= 1.5 {
            LsiTendency::MildScaling
        } else {
            LsiTendency::Scaling
        }
    }
}

/// RSI 해석 구간.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RsiTendency {
    HeavyScale,
    LightScale,
    Stable,
    Corrosive,
}

impl RsiTendency {
    pub fn classify(rsi: f64) -> Self {
        if rsi < 5.5 {
            RsiTendency::HeavyScale
        } else if rsi < 6.2 {
            RsiTendency::LightScale
        } else if rsi <= 6.8 {
            RsiTendency::Stable
        } else {
            RsiTendency::Corrosive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_when_alkalinity_missing() {
        let w = WaterComposition {
            total_alkalinity: 0.0,
            ..WaterComposition::default()
        };
        let idx = compute_indices(&w, 47.0);
        assert_eq!(idx.lsi, SENTINEL_LSI);
        assert_eq!(idx.rsi, SENTINEL_STABILITY);
        assert_eq!(idx.psi, SENTINEL_STABILITY);
        assert_eq!(idx.larson_skold, 0.0);
        assert!(idx.is_sentinel());
    }

    #[test]
    fn phosphate_below_threshold_is_ignored() {
        let w = WaterComposition {
            orthophosphate: 0.1,
            ..WaterComposition::default()
        };
        assert_eq!(compute_indices(&w, 30.0).ca_po4, 0.0);
    }

    #[test]
    fn ph_scaled_phosphate_never_exceeds_plain() {
        let w = WaterComposition {
            orthophosphate: 5.0,
            ph: 9.0,
            ..WaterComposition::default()
        };
        let plain = compute_indices_with(&w, 30.0, CaPo4Model::PlainProduct).ca_po4;
        let scaled = compute_indices_with(&w, 30.0, CaPo4Model::PhScaled).ca_po4;
        assert_eq!(plain, 400.0);
        assert!((scaled - 40.0).abs() < 1e-9);
    }

    #[test]
    fn tendency_bands() {
        assert_eq!(LsiTendency::classify(-1.0), LsiTendency::Corrosive);
        assert_eq!(LsiTendency::classify(0.2), LsiTendency::Balanced);
        assert_eq!(LsiTendency::classify(2.0), LsiTendency::Scaling);
        assert_eq!(RsiTendency::classify(6.5), RsiTendency::Stable);
        assert_eq!(RsiTendency::classify(7.5), RsiTendency::Corrosive);
    }
}
