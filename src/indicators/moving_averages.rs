/**
* filename : moving_averages
* author : HAMA
* date: 2025. 6. 3.
* description:
**/

use std::collections::VecDeque;
use crate::error::AnalysisError;
use super::Indicator;

#[derive(Debug)]
pub struct SimpleMovingAverage {
  name: String,
  period: usize,
  values: VecDeque<f64>,
  sum: f64,
}

impl SimpleMovingAverage {
  pub fn new(period: usize) -> Self {
    SimpleMovingAverage {
      name: format!("SMA-{}", period),
      period,
      values: VecDeque::with_capacity(period),
      sum: 0.0,
    }
  }

  pub fn period(&self) -> usize {
    self.period
  }
}

impl Indicator for SimpleMovingAverage {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, price: f64, _volume: Option<f64>) -> Result<(), AnalysisError> {
    self.values.push_back(price);
    self.sum += price;

    // 윈도우를 벗어난 오래된 가격 제거
    if self.values.len() > self.period {
      if let Some(old_value) = self.values.pop_front() {
        self.sum -= old_value;
      }
    }

    Ok(())
  }

  fn value(&self) -> Result<f64, AnalysisError> {
    if !self.is_ready() {
      return Err(AnalysisError::insufficient(
        &self.name,
        self.period,
        self.values.len(),
      ));
    }

    Ok(self.sum / self.values.len() as f64)
  }

  fn is_ready(&self) -> bool {
    self.values.len() >= self.period
  }

  fn reset(&mut self) {
    self.values.clear();
    self.sum = 0.0;
  }
}

/// 지수 이동 평균. 첫 가격으로 시드하는 관례를 사용한다
/// (`ewm(adjust=False)`와 동일) — SMA 시드와 달리 첫 봉부터 값이 정의된다.
#[derive(Debug)]
pub struct ExponentialMovingAverage {
  name: String,
  span: usize,
  current_ema: Option<f64>,
  alpha: f64,
}

impl ExponentialMovingAverage {
  pub fn new(span: usize) -> Self {
    let alpha = 2.0 / (span as f64 + 1.0);

    ExponentialMovingAverage {
      name: format!("EMA-{}", span),
      span,
      current_ema: None,
      alpha,
    }
  }

  pub fn span(&self) -> usize {
    self.span
  }
}

impl Indicator for ExponentialMovingAverage {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, price: f64, _volume: Option<f64>) -> Result<(), AnalysisError> {
    self.current_ema = Some(match self.current_ema {
      // 첫 번째 가격이 시드
      None => price,
      Some(prev_ema) => price * self.alpha + prev_ema * (1.0 - self.alpha),
    });

    Ok(())
  }

  fn value(&self) -> Result<f64, AnalysisError> {
    self
      .current_ema
      .ok_or_else(|| AnalysisError::insufficient(&self.name, 1, 0))
  }

  fn is_ready(&self) -> bool {
    self.current_ema.is_some()
  }

  fn reset(&mut self) {
    self.current_ema = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sma_window_mean() {
    let mut sma = SimpleMovingAverage::new(3);
    for price in [10.0, 20.0, 30.0, 40.0] {
      sma.update(price, None).unwrap();
    }
    // 마지막 3개: 20, 30, 40
    assert!((sma.value().unwrap() - 30.0).abs() < 1e-10);
  }

  #[test]
  fn test_sma_not_ready_before_window_filled() {
    let mut sma = SimpleMovingAverage::new(20);
    for i in 0..19 {
      sma.update(100.0 + i as f64, None).unwrap();
    }
    assert!(!sma.is_ready());
    assert!(matches!(
      sma.value(),
      Err(AnalysisError::InsufficientHistory { required: 20, available: 19, .. })
    ));

    sma.update(119.0, None).unwrap();
    assert!(sma.is_ready());
  }

  #[test]
  fn test_ema_seeded_by_first_price() {
    let mut ema = ExponentialMovingAverage::new(12);
    ema.update(100.0, None).unwrap();
    // 첫 봉부터 값이 정의되고, 그 값은 첫 가격
    assert!((ema.value().unwrap() - 100.0).abs() < 1e-10);
  }

  #[test]
  fn test_ema_recurrence() {
    // span=3 → alpha=0.5
    let mut ema = ExponentialMovingAverage::new(3);
    ema.update(10.0, None).unwrap();
    ema.update(20.0, None).unwrap();
    assert!((ema.value().unwrap() - 15.0).abs() < 1e-10);
    ema.update(30.0, None).unwrap();
    assert!((ema.value().unwrap() - 22.5).abs() < 1e-10);
  }

  #[test]
  fn test_reset() {
    let mut ema = ExponentialMovingAverage::new(12);
    ema.update(100.0, None).unwrap();
    ema.reset();
    assert!(!ema.is_ready());
  }
}
