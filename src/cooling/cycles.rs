//! 농축배수(Cycles of Concentration) 전진 탐색.
//!
//! 1.0배에서 시작해 고정 간격으로 배수를 올리며 매 단계 수질 지수를 다시 계산하고,
//! 우선순위 순서로 처음 위반한 한계를 찾는다. 최대 배수에 상한이 있으므로 화학적
//! 한계가 전혀 걸리지 않아도 반복 횟수는 유한하다.

use serde::{Deserialize, Serialize};

use super::constraints::{ConstraintSet, StopReason};
use super::design::DesignParameters;
use crate::water::{compute_indices_with, CaPo4Model, Indices, WaterComposition};

/// 배수 비교 시 부동소수점 누적 오차 허용치.
const CYCLE_EPSILON: f64 = 1e-9;

/// 한 번의 탐색에서 허용하는 최대 증가 단계 수.
pub const MAX_STEPS: usize = 10_000;

/// 농축 시뮬레이션 상수. 한 번 만들어 호출 시 주입한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// 시작 농축배수
    pub start_cycle: f64,
    /// 배수 증가 간격
    pub cycle_step: f64,
    /// 최대 농축배수 (사실상 제한 없음)
    pub max_cycle: f64,
    /// 제어되지 않는 손실이 0일 때의 수리 한계 대체값
    pub no_loss_hydraulic_ceiling: f64,
    /// 자연 농축 시 pH 상한 (완충 포화)
    pub ph_ceiling: f64,
    /// 산 주입 시 알칼리도 중화 계수 (농축 후 곱함)
    pub acid_alkalinity_factor: f64,
    /// 수조 온도 대비 열교환기 표면 온도 상승분(°C)
    pub skin_temp_offset_c: f64,
    /// Ca×PO₄ 계산 방식
    pub ca_po4_model: CaPo4Model,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            start_cycle: 1.0,
            cycle_step: 0.1,
            max_cycle: 30.0,
            no_loss_hydraulic_ceiling: 50.0,
            ph_ceiling: 9.3,
            acid_alkalinity_factor: 0.65,
            skin_temp_offset_c: 15.0,
            ca_po4_model: CaPo4Model::PlainProduct,
        }
    }
}

impl SimulationSettings {
    /// 설정값이 반복을 유한하게 끝낼 수 있는지 검사한다.
    pub fn validate(&self) -> Result<(), SimulationError> {
        let finite = [
            self.start_cycle,
            self.cycle_step,
            self.max_cycle,
            self.no_loss_hydraulic_ceiling,
            self.ph_ceiling,
            self.acid_alkalinity_factor,
            self.skin_temp_offset_c,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(SimulationError::InvalidSettings(
                "시뮬레이션 설정값은 유한한 수여야 합니다.",
            ));
        }
        if self.start_cycle < 1.0 {
            return Err(SimulationError::InvalidSettings(
                "시작 농축배수는 1.0 이상이어야 합니다.",
            ));
        }
        if self.cycle_step <= 0.0 {
            return Err(SimulationError::InvalidSettings(
                "배수 증가 간격은 0보다 커야 합니다.",
            ));
        }
        if self.max_cycle < self.start_cycle {
            return Err(SimulationError::InvalidSettings(
                "최대 농축배수는 시작 배수 이상이어야 합니다.",
            ));
        }
        if self.acid_alkalinity_factor <= 0.0 || self.acid_alkalinity_factor > 1.0 {
            return Err(SimulationError::InvalidSettings(
                "알칼리도 중화 계수는 0 초과 1 이하여야 합니다.",
            ));
        }
        if (self.max_cycle - self.start_cycle) / self.cycle_step > MAX_STEPS as f64 {
            return Err(SimulationError::InvalidSettings(
                "배수 증가 간격이 너무 작아 단계 수가 상한을 넘습니다.",
            ));
        }
        Ok(())
    }

    /// 시작 배수 이후 추가로 밟을 수 있는 최대 단계 수.
    fn max_increments(&self) -> usize {
        ((self.max_cycle - self.start_cycle) / self.cycle_step + CYCLE_EPSILON).floor() as usize
    }
}

/// 시뮬레이션 설정 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// 반복을 시작할 수 없는 설정
    InvalidSettings(&'static str),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidSettings(msg) => write!(f, "설정 오류: {msg}"),
        }
    }
}

impl std::error::Error for SimulationError {}

/// 농축 시 pH 모델.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhModel {
    /// pH = min(보충수 pH + log10(배수), 상한)
    Natural { ceiling: f64 },
    /// pH를 목표값에 고정하고 알칼리도를 중화 계수만큼 낮춘다.
    AcidFeed { target_ph: f64, alkalinity_factor: f64 },
}

impl PhModel {
    pub fn select(design: &DesignParameters, settings: &SimulationSettings) -> Self {
        match design.acid_feed_target_ph {
            Some(target_ph) => PhModel::AcidFeed {
                target_ph,
                alkalinity_factor: settings.acid_alkalinity_factor,
            },
            None => PhModel::Natural {
                ceiling: settings.ph_ceiling,
            },
        }
    }

    /// 보충수를 `cycle`배 농축한 순환수 스냅샷을 만든다.
    pub fn concentrate(&self, raw: &WaterComposition, cycle: f64) -> WaterComposition {
        let mut water = raw.concentrated(cycle);
        match *self {
            PhModel::Natural { ceiling } => {
                water.ph = (raw.ph + cycle.log10()).min(ceiling);
            }
            PhModel::AcidFeed {
                target_ph,
                alkalinity_factor,
            } => {
                water.ph = target_ph;
                water.total_alkalinity *= alkalinity_factor;
            }
        }
        water
    }
}

/// 한 농축배수에서의 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationStep {
    pub cycle: f64,
    /// 농축된 순환수 수질
    pub water: WaterComposition,
    /// 표면 온도 기준 지수
    pub indices: Indices,
    /// 이 단계에서 위반한 한계. 안전하면 `None`.
    pub stop_reason: Option<StopReason>,
}

/// 농축 시뮬레이션 결과.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// 모든 한계를 만족한 마지막 단계
    pub last_safe: SimulationStep,
    /// 정지 사유
    pub stop_reason: StopReason,
    /// 수리 한계 농축배수
    pub hydraulic_ceiling: f64,
    /// 지수 평가 온도(°C)
    pub skin_temp_c: f64,
    /// 사용한 pH 모델
    pub ph_model: PhModel,
    /// 1.0배부터 정지 단계까지 모든 단계
    pub history: Vec<SimulationStep>,
    /// 입력값 관련 권고성 경고
    pub warnings: Vec<String>,
}

impl SimulationResult {
    /// 권장 최대 농축배수
    pub fn max_cycle(&self) -> f64 {
        self.last_safe.cycle
    }

    /// 한계를 위반한 단계(최대 배수 도달로 끝났으면 `None`)
    pub fn limiting_step(&self) -> Option<&SimulationStep> {
        self.history.last().filter(|s| s.stop_reason.is_some())
    }
}

/// 기본 설정으로 최대 허용 농축배수를 찾는다.
pub fn simulate_cycles(
    raw: &WaterComposition,
    design: &DesignParameters,
    constraints: &ConstraintSet,
) -> SimulationResult {
    run(raw, design, constraints, &SimulationSettings::default())
}

/// 주어진 설정으로 최대 허용 농축배수를 찾는다.
pub fn simulate_cycles_with(
    raw: &WaterComposition,
    design: &DesignParameters,
    constraints: &ConstraintSet,
    settings: &SimulationSettings,
) -> Result<SimulationResult, SimulationError> {
    settings.validate()?;
    Ok(run(raw, design, constraints, settings))
}

fn run(
    raw: &WaterComposition,
    design: &DesignParameters,
    constraints: &ConstraintSet,
    settings: &SimulationSettings,
) -> SimulationResult {
    let hydraulic_ceiling = design.hydraulic_ceiling(settings.no_loss_hydraulic_ceiling);
    let skin_temp_c = design.skin_temp_c(settings.skin_temp_offset_c);
    let ph_model = PhModel::select(design, settings);

    let mut warnings = raw.advisories();
    warnings.extend(design.advisories(raw.ph));

    let evaluate = |cycle: f64| -> SimulationStep {
        let water = ph_model.concentrate(raw, cycle);
        let indices = compute_indices_with(&water, skin_temp_c, settings.ca_po4_model);
        let stop_reason = constraints.first_violation(cycle, hydraulic_ceiling, &water, &indices);
        SimulationStep {
            cycle,
            water,
            indices,
            stop_reason,
        }
    };

    let increments = settings.max_increments();
    let mut history = Vec::new();

    let first = evaluate(settings.start_cycle);
    history.push(first.clone());
    let mut last_safe = first;
    let mut violation = last_safe.stop_reason;

    // 위반 시 이전 단계가 마지막 안전 단계가 된다. 첫 단계에서 위반하면 그 단계를 그대로 쓴다.
    if violation.is_none() {
        for k in 1..=increments {
            let cycle = settings.start_cycle + k as f64 * settings.cycle_step;
            let step = evaluate(cycle);
            history.push(step.clone());
            if step.stop_reason.is_some() {
                violation = step.stop_reason;
                break;
            }
            last_safe = step;
        }
    }

    SimulationResult {
        last_safe,
        stop_reason: violation.unwrap_or(StopReason::MaxCycleCeiling),
        hydraulic_ceiling,
        skin_temp_c,
        ph_model,
        history,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_violation_keeps_only_entry() {
        let raw = WaterComposition {
            silica: 250.0,
            ..WaterComposition::default()
        };
        let res = simulate_cycles(&raw, &DesignParameters::default(), &ConstraintSet::default());
        assert_eq!(res.stop_reason, StopReason::SilicaLimit);
        assert_eq!(res.history.len(), 1);
        assert_eq!(res.last_safe.cycle, 1.0);
    }

    #[test]
    fn rejects_non_positive_step() {
        let settings = SimulationSettings {
            cycle_step: 0.0,
            ..SimulationSettings::default()
        };
        let err = simulate_cycles_with(
            &WaterComposition::default(),
            &DesignParameters::default(),
            &ConstraintSet::default(),
            &settings,
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidSettings(_)));
    }

    #[test]
    fn rejects_step_count_above_limit() {
        let settings = SimulationSettings {
            cycle_step: 1e-7,
            ..SimulationSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(SimulationError::InvalidSettings(_))
        ));
        let err = simulate_cycles_with(
            &WaterComposition::default(),
            &DesignParameters::default(),
            &ConstraintSet::unbounded(),
            &settings,
        )
        .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidSettings(_)));
    }

    #[test]
    fn fine_step_within_limit_is_accepted() {
        let settings = SimulationSettings {
            max_cycle: 11.0,
            cycle_step: 0.002,
            ..SimulationSettings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn default_settings_allow_291_steps() {
        assert_eq!(SimulationSettings::default().max_increments(), 290);
    }

    #[test]
    fn acid_feed_pins_ph() {
        let design = DesignParameters {
            acid_feed_target_ph: Some(7.2),
            ..DesignParameters::default()
        };
        let model = PhModel::select(&design, &SimulationSettings::default());
        let water = model.concentrate(&WaterComposition::default(), 4.0);
        assert_eq!(water.ph, 7.2);
        assert!((water.total_alkalinity - 260.0).abs() < 1e-9);
    }
}
