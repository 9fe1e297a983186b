/**
* filename : volatility
* author : HAMA
* date: 2025. 6. 3.
* description:
**/

use std::collections::VecDeque;
use crate::error::AnalysisError;
use crate::utils::math::{mean, sample_std};
use super::Indicator;

/// 볼린저 밴드: 중심선 = SMA(period), 상/하단 = 중심선 ± k·표준편차.
/// 표준편차는 표본 표준편차 (ddof=1, `rolling(window).std()`와 일치).
#[derive(Debug)]
pub struct BollingerBands {
  name: String,
  period: usize,
  width: f64,
  values: VecDeque<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandValues {
  pub upper: f64,
  pub middle: f64,
  pub lower: f64,
  pub std_dev: f64,
}

impl BollingerBands {
  pub fn new(period: usize, width: f64) -> Self {
    BollingerBands {
      name: format!("BB-{}-{}", period, width),
      period,
      width,
      values: VecDeque::with_capacity(period),
    }
  }

  pub fn bands(&self) -> Result<BandValues, AnalysisError> {
    if !self.is_ready() {
      return Err(AnalysisError::insufficient(
        &self.name,
        self.period,
        self.values.len(),
      ));
    }

    let window: Vec<f64> = self.values.iter().copied().collect();
    let middle = mean(&window);
    let std_dev = sample_std(&window);

    Ok(BandValues {
      upper: middle + self.width * std_dev,
      middle,
      lower: middle - self.width * std_dev,
      std_dev,
    })
  }
}

impl Indicator for BollingerBands {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, price: f64, _volume: Option<f64>) -> Result<(), AnalysisError> {
    self.values.push_back(price);

    if self.values.len() > self.period {
      self.values.pop_front();
    }

    Ok(())
  }

  fn value(&self) -> Result<f64, AnalysisError> {
    Ok(self.bands()?.middle)
  }

  fn is_ready(&self) -> bool {
    self.values.len() >= self.period
  }

  fn reset(&mut self) {
    self.values.clear();
  }
}
