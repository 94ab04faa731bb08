use std::path::PathBuf;

use crate::config::{self, ConfigError};
use crate::cooling::{self, SimulationError, SimulationResult, SimulationSettings, WaterBalance};
use crate::i18n::{self, Translator};
use crate::scenario::{Scenario, ScenarioError, ScenarioInputs};
use crate::ui_cli::{self, Report};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 시나리오 로드/검증 오류
    Scenario(ScenarioError),
    /// 시뮬레이션 설정 오류
    Simulation(SimulationError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Scenario(e) => write!(f, "시나리오 오류: {e}"),
            AppError::Simulation(e) => write!(f, "시뮬레이션 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<ScenarioError> for AppError {
    fn from(value: ScenarioError) -> Self {
        AppError::Scenario(value)
    }
}

impl From<SimulationError> for AppError {
    fn from(value: SimulationError) -> Self {
        AppError::Simulation(value)
    }
}

/// CLI에서 넘어온 실행 옵션.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// 시나리오 파일. 없으면 참조 시나리오를 쓴다.
    pub scenario: Option<PathBuf>,
    /// 설정 파일 경로
    pub config: PathBuf,
    /// 언어 코드 (auto/ko/en)
    pub lang: String,
    /// 단계별 이력 출력 강제
    pub history: bool,
}

/// 시나리오 한 건의 계산 결과.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub inputs: ScenarioInputs,
    pub result: SimulationResult,
    pub balance: WaterBalance,
}

/// 시나리오를 엔진 입력으로 바꿔 농축배수 탐색과 물수지를 한 번에 계산한다.
pub fn analyze(scenario: &Scenario, settings: &SimulationSettings) -> Result<Analysis, AppError> {
    let inputs = scenario.to_inputs()?;
    let result = cooling::simulate_cycles_with(
        &inputs.makeup,
        &inputs.design,
        &inputs.constraints,
        settings,
    )?;
    let balance = cooling::compute_water_balance(&inputs.design, result.max_cycle());
    Ok(Analysis {
        inputs,
        result,
        balance,
    })
}

/// 설정과 시나리오를 읽어 계산하고 보고서를 출력한다.
pub fn run(options: &RunOptions) -> Result<(), AppError> {
    let cfg = config::load_or_create(&options.config)?;
    let lang = i18n::resolve_language(&options.lang, Some(cfg.language.as_str()));
    let tr = Translator::new_with_pack(&lang, None);

    let scenario = match &options.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::reference(),
    };
    let analysis = analyze(&scenario, &cfg.simulation)?;

    let mut report_settings = cfg.report.clone();
    report_settings.show_history |= options.history;
    let report = Report {
        project: &scenario.project,
        makeup: &analysis.inputs.makeup,
        design: &analysis.inputs.design,
        result: &analysis.result,
        balance: &analysis.balance,
    };
    ui_cli::print_report(&tr, &report, &report_settings);
    Ok(())
}
