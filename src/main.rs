use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use cooling_tower_cycles::{app, config::DEFAULT_CONFIG_PATH, i18n};

/// 냉각탑 최대 농축배수와 물수지를 계산한다.
#[derive(Debug, Parser)]
#[command(name = "cooling_tower_cycles", version, about)]
struct Cli {
    /// 시나리오 TOML 파일 (생략 시 참조 시나리오)
    #[arg(short, long)]
    scenario: Option<PathBuf>,
    /// 설정 파일 경로 (없으면 기본값으로 생성)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// 보고서 언어: auto, ko, en
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    /// 단계별 이력 표 출력
    #[arg(long)]
    history: bool,
}

/// 프로그램의 엔트리 포인트. 옵션을 해석한 뒤 계산 파이프라인을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    let options = app::RunOptions {
        scenario: cli.scenario,
        config: cli.config,
        lang: cli.lang,
        history: cli.history,
    };
    match app::run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let lang = i18n::resolve_language(&options.lang, None);
            let tr = i18n::Translator::new(&lang);
            eprintln!("{}: {err}", tr.t(i18n::keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}
