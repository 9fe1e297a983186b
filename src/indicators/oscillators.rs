/**
* filename : oscillators
* author : HAMA
* date: 2025. 6. 3.
* description:
**/

use std::collections::VecDeque;
use crate::error::AnalysisError;
use super::Indicator;

/// RSI. 평균 상승폭/하락폭은 최근 period개 종가 변화량의 단순 이동 평균
/// (Wilder 스무딩이 아님 — `rolling(window).mean()` 방식과 일치).
#[derive(Debug)]
pub struct RelativeStrengthIndex {
  name: String,
  period: usize,
  gains: VecDeque<f64>,
  losses: VecDeque<f64>,
  prev_price: Option<f64>,
}

impl RelativeStrengthIndex {
  pub fn new(period: usize) -> Self {
    RelativeStrengthIndex {
      name: format!("RSI-{}", period),
      period,
      gains: VecDeque::with_capacity(period),
      losses: VecDeque::with_capacity(period),
      prev_price: None,
    }
  }

  pub fn period(&self) -> usize {
    self.period
  }
}

impl Indicator for RelativeStrengthIndex {
  fn name(&self) -> &str {
    &self.name
  }

  fn update(&mut self, price: f64, _volume: Option<f64>) -> Result<(), AnalysisError> {
    // 이전 가격과 비교하여 gain/loss 계산
    if let Some(prev_price) = self.prev_price {
      let change = price - prev_price;

      self.gains.push_back(if change > 0.0 { change } else { 0.0 });
      self.losses.push_back(if change < 0.0 { -change } else { 0.0 });

      if self.gains.len() > self.period {
        self.gains.pop_front();
        self.losses.pop_front();
      }
    }

    self.prev_price = Some(price);

    Ok(())
  }

  fn value(&self) -> Result<f64, AnalysisError> {
    if !self.is_ready() {
      return Err(AnalysisError::insufficient(
        &self.name,
        self.period + 1,
        self.gains.len() + 1,
      ));
    }

    let avg_gain: f64 = self.gains.iter().sum::<f64>() / self.period as f64;
    let avg_loss: f64 = self.losses.iter().sum::<f64>() / self.period as f64;

    // 하락폭이 전혀 없으면 RSI는 수학적으로 무한대로 발산한다.
    // 0/0이 되는 완전 횡보 구간 포함, 계약상 정확히 100으로 고정.
    if avg_loss == 0.0 {
      return Ok(100.0);
    }

    let rs = avg_gain / avg_loss;
    Ok(100.0 - (100.0 / (1.0 + rs)))
  }

  fn is_ready(&self) -> bool {
    self.gains.len() >= self.period
  }

  fn reset(&mut self) {
    self.gains.clear();
    self.losses.clear();
    self.prev_price = None;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rsi_of(prices: &[f64], period: usize) -> Result<f64, AnalysisError> {
    let mut rsi = RelativeStrengthIndex::new(period);
    for p in prices {
      rsi.update(*p, None).unwrap();
    }
    rsi.value()
  }

  #[test]
  fn test_needs_period_plus_one_prices() {
    // 14개 변화량 = 15개 가격
    let prices: Vec<f64> = (0..14).map(|i| 100.0 + i as f64).collect();
    assert!(rsi_of(&prices, 14).is_err());

    let prices: Vec<f64> = (0..15).map(|i| 100.0 + i as f64).collect();
    assert!(rsi_of(&prices, 14).is_ok());
  }

  #[test]
  fn test_all_gains_pins_to_100() {
    let prices: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    assert_eq!(rsi_of(&prices, 14).unwrap(), 100.0);
  }

  #[test]
  fn test_flat_series_pins_to_100() {
    // avg_gain = avg_loss = 0 → 0/0이지만 NaN이 아니라 100
    let prices = vec![50.0; 20];
    let rsi = rsi_of(&prices, 14).unwrap();
    assert_eq!(rsi, 100.0);
    assert!(rsi.is_finite());
  }

  #[test]
  fn test_alternating_gains_and_losses() {
    // +2/-1 교대, 14개 변화량 중 7개는 +2, 7개는 -1
    // avg_gain = 1, avg_loss = 0.5, RS = 2, RSI = 100 - 100/3
    let mut prices = vec![100.0];
    for i in 0..14 {
      let last = *prices.last().unwrap();
      prices.push(if i % 2 == 0 { last + 2.0 } else { last - 1.0 });
    }
    let rsi = rsi_of(&prices, 14).unwrap();
    assert!((rsi - (100.0 - 100.0 / 3.0)).abs() < 1e-9);
  }

  #[test]
  fn test_range_bounds() {
    // 전부 하락이면 RSI = 0
    let prices: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
    let rsi = rsi_of(&prices, 14).unwrap();
    assert!((0.0..=100.0).contains(&rsi));
    assert!(rsi.abs() < 1e-9);
  }
}
