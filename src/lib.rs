//! 냉각탑 농축배수 계산 로직을 라이브러리로 분리하여 CLI 외 다른 화면에서도 재사용한다.

pub mod app;
pub mod config;
pub mod cooling;
pub mod i18n;
pub mod scenario;
pub mod ui_cli;
pub mod units;
pub mod water;
