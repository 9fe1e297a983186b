//! 주식 기술적 분석 및 추천 엔진
//!
//! 일봉 OHLCV 시계열에서 SMA/RSI/MACD/볼린저 밴드를 계산하고,
//! 규칙 기반 분류기로 매수/중립/회피 추천과 투자 기간 평가를 생성합니다.

pub mod config;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod market_data;
pub mod models;
pub mod signals;
pub mod utils;

// 핵심 타입 재노출
pub use crate::error::AnalysisError;
pub use crate::models::observation::{Observation, PriceSeries};
pub use crate::indicators::frame::{IndicatorFrame, Snapshot};
pub use crate::signals::signal_types::{Direction, Horizon, Recommendation, Verdict};
pub use crate::signals::classifier::SignalClassifier;
pub use crate::signals::screening::ScreeningPolicy;
pub use crate::engine::{AnalysisEngine, AnalysisReport};

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, AnalysisError>;
