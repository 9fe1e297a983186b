/**
* filename : trend
* author : HAMA
* date: 2025. 6. 3.
* description:
**/

use crate::error::AnalysisError;
use super::{Indicator, moving_averages::ExponentialMovingAverage};

/// MACD = EMA(fast) − EMA(slow), 시그널 라인은 MACD 시계열의 EMA(signal).
/// 모든 EMA가 첫 값으로 시드되므로 MACD/시그널은 첫 봉부터 정의된다.
#[derive(Debug)]
pub struct Macd {
  name: String,
  fast_ema: ExponentialMovingAverage,
  slow_ema: ExponentialMovingAverage,
  signal_ema: ExponentialMovingAverage,
}

impl Macd {
  pub fn new(fast_span: usize, slow_span: usize, signal_span: usize) -> Self {
    Macd {
      name: format!("MACD-{}-{}-{}", fast_span, slow_span, signal_span),
      fast_ema: ExponentialMovingAverage::new(fast_span),
      slow_ema: ExponentialMovingAverage::new(slow_span),
      signal_ema: ExponentialMovingAverage::new(signal_span),
    }
  }

  /// (MACD 라인, 시그널 라인)
  pub fn components(&self) -> Result<(f64, f64), AnalysisError> {
    let macd_line = self.fast_ema.value()? - self.slow_ema.value()?;
    let signal_line = self.signal_ema.value()?;
    Ok((macd_line, signal_line))
  }
}

impl Indicator for Macd {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, price: f64, volume: Option<f64>) -> Result<(), AnalysisError> {
    self.fast_ema.update(price, volume)?;
    self.slow_ema.update(price, volume)?;

    // MACD 라인을 계산해 시그널 EMA에 공급
    let macd_line = self.fast_ema.value()? - self.slow_ema.value()?;
    self.signal_ema.update(macd_line, None)?;

    Ok(())
  }

  fn value(&self) -> Result<f64, AnalysisError> {
    let (macd_line, _) = self.components()?;
    Ok(macd_line)
  }

  fn is_ready(&self) -> bool {
    self.fast_ema.is_ready() && self.slow_ema.is_ready() && self.signal_ema.is_ready()
  }

  fn reset(&mut self) {
    self.fast_ema.reset();
    self.slow_ema.reset();
    self.signal_ema.reset();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defined_from_first_bar() {
    let mut macd = Macd::new(12, 26, 9);
    macd.update(100.0, None).unwrap();

    let (macd_line, signal_line) = macd.components().unwrap();
    // 두 EMA 모두 첫 가격으로 시드 → MACD = 0, 시그널도 0으로 시드
    assert!(macd_line.abs() < 1e-10);
    assert!(signal_line.abs() < 1e-10);
  }

  #[test]
  fn test_rising_series_macd_above_signal() {
    let mut macd = Macd::new(12, 26, 9);
    for i in 0..70 {
      macd.update(100.0 + i as f64, None).unwrap();
    }

    let (macd_line, signal_line) = macd.components().unwrap();
    // 상승 추세: 빠른 EMA가 느린 EMA 위, MACD는 증가 중이므로 시그널 위
    assert!(macd_line > 0.0);
    assert!(macd_line > signal_line);
  }

  #[test]
  fn test_falling_series_macd_below_signal() {
    let mut macd = Macd::new(12, 26, 9);
    for i in 0..70 {
      macd.update(200.0 - i as f64, None).unwrap();
    }

    let (macd_line, signal_line) = macd.components().unwrap();
    assert!(macd_line < 0.0);
    assert!(macd_line < signal_line);
  }

  #[test]
  fn test_flat_series_macd_zero() {
    let mut macd = Macd::new(12, 26, 9);
    for _ in 0..40 {
      macd.update(75.0, None).unwrap();
    }

    let (macd_line, signal_line) = macd.components().unwrap();
    assert!(macd_line.abs() < 1e-10);
    assert!(signal_line.abs() < 1e-10);
  }
}
