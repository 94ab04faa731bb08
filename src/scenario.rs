//! TOML 시나리오 파일(프로젝트 정보, 단위, 보충수 분석, 설계 조건, 한계 기준)을
//! 읽어 엔진 입력(내부 기준 단위)으로 바꾼다.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::cooling::{ConstraintSet, DesignParameters};
use crate::units::*;
use crate::water::WaterComposition;

/// 보고서 머리말에 쓰는 프로젝트 정보.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub client: String,
    pub location: String,
    pub system_id: String,
    /// 분석/작성 일자 (자유 형식)
    pub date: String,
}

/// 시나리오 입력값의 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioUnits {
    pub flow: FlowUnit,
    pub volume: VolumeUnit,
    pub temperature: TemperatureUnit,
    pub temperature_diff: TemperatureDiffUnit,
    pub conductivity: ConductivityUnit,
}

impl Default for ScenarioUnits {
    fn default() -> Self {
        Self {
            flow: FlowUnit::CubicMeterPerHour,
            volume: VolumeUnit::CubicMeter,
            temperature: TemperatureUnit::Celsius,
            temperature_diff: TemperatureDiffUnit::Celsius,
            conductivity: ConductivityUnit::MicroSiemensPerCm,
        }
    }
}

/// `[design]` 표. 값은 `[units]`에 지정한 단위로 읽는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignInput {
    pub circulation_rate: f64,
    pub delta_t: f64,
    pub basin_temp: f64,
    /// 열부하율(%)
    #[serde(default = "default_service_load")]
    pub service_load_pct: f64,
    pub system_volume: f64,
    #[serde(default)]
    pub process_loss: f64,
    #[serde(default)]
    pub acid_feed_target_ph: Option<f64>,
    #[serde(default)]
    pub skin_temp: Option<f64>,
    #[serde(default)]
    pub evaporation_factor: Option<f64>,
}

fn default_service_load() -> f64 {
    100.0
}

/// 시나리오 파일 전체.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub project: ProjectInfo,
    #[serde(default)]
    pub units: ScenarioUnits,
    /// 보충수 분석값. 전도도는 `units.conductivity` 단위.
    pub makeup: WaterComposition,
    pub design: DesignInput,
    #[serde(default)]
    pub constraints: ConstraintSet,
}

/// 엔진에 넘길 내부 단위 입력 묶음.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioInputs {
    pub makeup: WaterComposition,
    pub design: DesignParameters,
    pub constraints: ConstraintSet,
}

/// 시나리오 로드/변환 시 발생 가능한 오류.
#[derive(Debug)]
pub enum ScenarioError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 파싱 오류
    Parse(toml::de::Error),
    /// 값이 유효하지 않음
    InvalidValue(String),
}

impl std::fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioError::Io(e) => write!(f, "시나리오 파일 입출력 오류: {e}"),
            ScenarioError::Parse(e) => write!(f, "시나리오 파싱 오류: {e}"),
            ScenarioError::InvalidValue(msg) => write!(f, "잘못된 입력값: {msg}"),
        }
    }
}

impl std::error::Error for ScenarioError {}

impl From<std::io::Error> for ScenarioError {
    fn from(value: std::io::Error) -> Self {
        ScenarioError::Io(value)
    }
}

impl From<toml::de::Error> for ScenarioError {
    fn from(value: toml::de::Error) -> Self {
        ScenarioError::Parse(value)
    }
}

impl Scenario {
    /// 시나리오 파일을 읽는다.
    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(src: &str) -> Result<Self, ScenarioError> {
        Ok(toml::from_str(src)?)
    }

    /// 파일 없이 실행할 때 쓰는 참조 시나리오.
    pub fn reference() -> Self {
        let design = DesignParameters::default();
        Self {
            project: ProjectInfo {
                client: "Reference Plant".into(),
                location: "-".into(),
                system_id: "CT-01".into(),
                date: String::new(),
            },
            units: ScenarioUnits::default(),
            makeup: WaterComposition::default(),
            design: DesignInput {
                circulation_rate: design.circulation_rate_m3_h,
                delta_t: design.delta_t_c,
                basin_temp: design.basin_temp_c,
                service_load_pct: design.heat_load_fraction * 100.0,
                system_volume: design.system_volume_m3,
                process_loss: design.process_loss_m3_h,
                acid_feed_target_ph: None,
                skin_temp: None,
                evaporation_factor: None,
            },
            constraints: ConstraintSet::default(),
        }
    }

    /// 단위를 내부 기준(m³/h, m³, °C, µS/cm)으로 환산하고 값의 유효성을 검사한다.
    pub fn to_inputs(&self) -> Result<ScenarioInputs, ScenarioError> {
        let u = &self.units;
        let d = &self.design;

        let mut makeup = self.makeup.clone();
        makeup.conductivity_us_cm = convert_conductivity(
            makeup.conductivity_us_cm,
            u.conductivity,
            ConductivityUnit::MicroSiemensPerCm,
        );

        let flow = |v: f64| convert_flow(v, u.flow, FlowUnit::CubicMeterPerHour);
        let temp = |v: f64| convert_temperature(v, u.temperature, TemperatureUnit::Celsius);

        let design = DesignParameters {
            circulation_rate_m3_h: flow(d.circulation_rate),
            delta_t_c: convert_temperature_diff(
                d.delta_t,
                u.temperature_diff,
                TemperatureDiffUnit::Celsius,
            ),
            basin_temp_c: temp(d.basin_temp),
            heat_load_fraction: d.service_load_pct / 100.0,
            system_volume_m3: convert_volume(d.system_volume, u.volume, VolumeUnit::CubicMeter),
            process_loss_m3_h: flow(d.process_loss),
            acid_feed_target_ph: d.acid_feed_target_ph,
            skin_temp_c: d.skin_temp.map(temp),
            evaporation_factor: d.evaporation_factor.unwrap_or(1.0),
        };

        ensure_finite("makeup", &makeup.labelled_ions())?;
        ensure_finite("makeup", &[("pH", makeup.ph)])?;
        ensure_finite(
            "design",
            &[
                ("circulation_rate", design.circulation_rate_m3_h),
                ("delta_t", design.delta_t_c),
                ("basin_temp", design.basin_temp_c),
                ("service_load_pct", design.heat_load_fraction),
                ("system_volume", design.system_volume_m3),
                ("process_loss", design.process_loss_m3_h),
                ("evaporation_factor", design.evaporation_factor),
            ],
        )?;
        ensure_non_negative(
            "design",
            &[
                ("circulation_rate", design.circulation_rate_m3_h),
                ("delta_t", design.delta_t_c),
                ("system_volume", design.system_volume_m3),
                ("process_loss", design.process_loss_m3_h),
            ],
        )?;
        let c = &self.constraints;
        ensure_finite(
            "constraints",
            &[
                ("max_silica", c.max_silica),
                ("max_lsi", c.max_lsi),
                ("max_ca_so4", c.max_ca_so4),
                ("max_ca_po4", c.max_ca_po4.unwrap_or(0.0)),
                ("max_mg_sio2", c.max_mg_sio2.unwrap_or(0.0)),
                ("mg_silicate_min_ph", c.mg_silicate_min_ph),
            ],
        )?;
        if let Some(ph) = design.acid_feed_target_ph {
            if !(0.0..=14.0).contains(&ph) {
                return Err(ScenarioError::InvalidValue(format!(
                    "design.acid_feed_target_ph {ph}는 0~14 범위여야 합니다."
                )));
            }
        }

        Ok(ScenarioInputs {
            makeup,
            design,
            constraints: self.constraints.clone(),
        })
    }
}

fn ensure_finite(section: &str, values: &[(&str, f64)]) -> Result<(), ScenarioError> {
    match values.iter().find(|(_, v)| !v.is_finite()) {
        Some((name, v)) => Err(ScenarioError::InvalidValue(format!(
            "{section}.{name} = {v} (유한한 수가 아님)"
        ))),
        None => Ok(()),
    }
}

fn ensure_non_negative(section: &str, values: &[(&str, f64)]) -> Result<(), ScenarioError> {
    match values.iter().find(|(_, v)| *v < 0.0) {
        Some((name, v)) => Err(ScenarioError::InvalidValue(format!(
            "{section}.{name} = {v} (음수 불가)"
        ))),
        None => Ok(()),
    }
}
