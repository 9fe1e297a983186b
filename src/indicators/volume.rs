/**
* filename : volume
* author : HAMA
* date: 2025. 6. 3.
* description:
**/

use std::collections::VecDeque;
use crate::error::AnalysisError;
use crate::utils::math::mean;
use super::Indicator;

/// 최근 period개 봉의 평균 거래량. 윈도우가 다 차기 전에는
/// 지금까지 쌓인 봉만으로 평균을 낸다 (`tail(n).mean()`과 동일).
#[derive(Debug)]
pub struct TrailingVolumeAverage {
  name: String,
  period: usize,
  volumes: VecDeque<f64>,
}

impl TrailingVolumeAverage {
  pub fn new(period: usize) -> Self {
    TrailingVolumeAverage {
      name: format!("AvgVolume-{}", period),
      period,
      volumes: VecDeque::with_capacity(period),
    }
  }
}

impl Indicator for TrailingVolumeAverage {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, _price: f64, volume: Option<f64>) -> Result<(), AnalysisError> {
    let volume = volume.ok_or_else(|| {
      AnalysisError::MissingData("volume required for trailing volume average".to_string())
    })?;

    self.volumes.push_back(volume);

    if self.volumes.len() > self.period {
      self.volumes.pop_front();
    }

    Ok(())
  }

  fn value(&self) -> Result<f64, AnalysisError> {
    if self.volumes.is_empty() {
      return Err(AnalysisError::insufficient(&self.name, 1, 0));
    }

    let window: Vec<f64> = self.volumes.iter().copied().collect();
    Ok(mean(&window))
  }

  fn is_ready(&self) -> bool {
    !self.volumes.is_empty()
  }

  fn reset(&mut self) {
    self.volumes.clear();
  }
}
