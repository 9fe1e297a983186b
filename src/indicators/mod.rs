/**
* filename : mod
* author : HAMA
* date: 2025. 6. 3.
* description:
**/
pub mod frame;
pub mod moving_averages;
pub mod oscillators;
pub mod trend;
pub mod volatility;
pub mod volume;

pub use frame::*;
pub use moving_averages::*;
pub use oscillators::*;
pub use trend::*;
pub use volatility::*;
pub use volume::*;

use std::fmt::Debug;

use crate::error::AnalysisError;

pub trait Indicator: Debug + Send + Sync {
  fn name(&self) -> &str;

  // 새로운 봉으로 지표 업데이트
  fn update(&mut self, price: f64, volume: Option<f64>) -> Result<(), AnalysisError>;

  // 현재 지표 값 반환 (데이터 부족 시 InsufficientHistory)
  fn value(&self) -> Result<f64, AnalysisError>;

  // 지표가 계산 가능한지 (충분한 데이터가 있는지) 확인
  fn is_ready(&self) -> bool;

  // 지표 상태 리셋
  fn reset(&mut self);
}
