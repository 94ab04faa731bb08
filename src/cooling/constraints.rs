use serde::{Deserialize, Serialize};

use crate::water::{Indices, WaterComposition};

fn default_max_mg_sio2() -> Option<f64> {
    Some(40_000.0)
}

fn default_mg_silicate_min_ph() -> f64 {
    8.8
}

/// 농축 한계 기준값 모음. 호출 시점에 주입되며 계산 중에는 바뀌지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintSet {
    /// 순환수 실리카 상한(ppm SiO₂)
    pub max_silica: f64,
    /// LSI 상한
    pub max_lsi: f64,
    /// CaH × SO₄ 곱 상한
    pub max_ca_so4: f64,
    /// Ca × PO₄ 곱 상한. `None`이면 검사하지 않는다.
    #[serde(default)]
    pub max_ca_po4: Option<f64>,
    /// MgH × SiO₂ 곱 상한. `None`이면 검사하지 않는다.
    #[serde(default = "default_max_mg_sio2")]
    pub max_mg_sio2: Option<f64>,
    /// 규산마그네슘 검사를 시작하는 pH (이 값 초과 시)
    #[serde(default = "default_mg_silicate_min_ph")]
    pub mg_silicate_min_ph: f64,
}

impl ConstraintSet {
    /// 어떤 화학적 한계도 걸리지 않는 기준값.
    pub fn unbounded() -> Self {
        Self {
            max_silica: f64::INFINITY,
            max_lsi: f64::INFINITY,
            max_ca_so4: f64::INFINITY,
            max_ca_po4: None,
            max_mg_sio2: None,
            mg_silicate_min_ph: default_mg_silicate_min_ph(),
        }
    }

    /// 우선순위 순서대로 한계를 검사해 처음 위반한 항목을 돌려준다.
    ///
    /// 순서: 수리 한계 → 실리카 → LSI → 석고 → 인산칼슘 → 규산마그네슘.
    /// 센티널 지수(스케일 능력 없음)에서는 LSI 한계를 보지 않는다.
    pub fn first_violation(
        &self,
        cycle: f64,
        hydraulic_ceiling: f64,
        water: &WaterComposition,
        indices: &Indices,
    ) -> Option<StopReason> {
        if cycle >= hydraulic_ceiling {
            return Some(StopReason::HydraulicLimit);
        }
        if water.silica > self.max_silica {
            return Some(StopReason::SilicaLimit);
        }
        if !indices.is_sentinel() && indices.lsi > self.max_lsi {
            return Some(StopReason::LsiLimit);
        }
        if indices.ca_so4 > self.max_ca_so4 {
            return Some(StopReason::GypsumRisk);
        }
        if let Some(limit) = self.max_ca_po4 {
            if indices.ca_po4 > limit {
                return Some(StopReason::CalciumPhosphateRisk);
            }
        }
        if let Some(limit) = self.max_mg_sio2 {
            if water.ph > self.mg_silicate_min_ph && indices.mg_sio2 > limit {
                return Some(StopReason::MagnesiumSilicateRisk);
            }
        }
        None
    }
}

impl Default for ConstraintSet {
    fn default() -> Self {
        Self {
            max_silica: 180.0,
            max_lsi: 2.8,
            max_ca_so4: 2_500_000.0,
            max_ca_po4: None,
            max_mg_sio2: default_max_mg_sio2(),
            mg_silicate_min_ph: default_mg_silicate_min_ph(),
        }
    }
}

/// 농축 계산이 멈춘 이유.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    HydraulicLimit,
    SilicaLimit,
    LsiLimit,
    GypsumRisk,
    CalciumPhosphateRisk,
    MagnesiumSilicateRisk,
    /// 화학적 한계 없이 최대 농축배수에 도달
    MaxCycleCeiling,
}

impl StopReason {
    pub fn label(&self) -> &'static str {
        match self {
            StopReason::HydraulicLimit => "Hydraulic Limit",
            StopReason::SilicaLimit => "Silica Limit",
            StopReason::LsiLimit => "LSI Limit",
            StopReason::GypsumRisk => "Gypsum Risk",
            StopReason::CalciumPhosphateRisk => "Calcium-Phosphate Risk",
            StopReason::MagnesiumSilicateRisk => "Magnesium Silicate Risk",
            StopReason::MaxCycleCeiling => "Maximum Cycle Ceiling Reached",
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
