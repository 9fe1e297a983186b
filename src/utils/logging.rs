//! 로깅 유틸리티
//!
//! 로그 초기화 및 유틸리티 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::error::AnalysisError;

/// 로깅 시스템 초기화
pub fn init() -> Result<(), AnalysisError> {
    let mut builder = Builder::from_default_env();

    // RUST_LOG 환경변수 확인
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

    // 로그 레벨 파싱
    let level_filter = match log_level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Info,
    };

    builder
      .filter_level(level_filter)
      .format_timestamp_millis()
      .init();

    log::debug!("logging initialized at level {}", log_level);

    Ok(())
}

/// 종목 분석 시작 로그
pub fn log_analysis_start(ticker: &str, observations: usize) {
    log::info!("analyzing {} ({} observations)", ticker, observations);
}

/// 오류 로그
pub fn log_error(context: &str, error: &AnalysisError) {
    log::error!("{}: {}", context, error);
}
