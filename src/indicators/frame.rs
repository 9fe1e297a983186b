/**
* filename : frame
* author : HAMA
* date: 2025. 6. 4.
* description:
**/

use serde::Serialize;
use chrono::NaiveDate;

use crate::error::AnalysisError;
use crate::models::observation::PriceSeries;
use super::{
  BollingerBands, Indicator, Macd, RelativeStrengthIndex, SimpleMovingAverage,
  TrailingVolumeAverage,
};

pub const SMA_SHORT_PERIOD: usize = 20;
pub const SMA_LONG_PERIOD: usize = 50;
pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST_SPAN: usize = 12;
pub const MACD_SLOW_SPAN: usize = 26;
pub const MACD_SIGNAL_SPAN: usize = 9;
pub const BOLLINGER_PERIOD: usize = 20;
pub const BOLLINGER_WIDTH: f64 = 2.0;
pub const VOLUME_AVG_PERIOD: usize = 5;

/// PriceSeries에 지표 파생 열을 인덱스 정렬로 붙인 프레임.
///
/// 각 열의 `None`은 "해당 인덱스에서 윈도우 미충족"을 뜻한다.
/// 소비자는 이를 0으로 취급해서는 안 된다.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
  series: PriceSeries,
  pub sma20: Vec<Option<f64>>,
  pub sma50: Vec<Option<f64>>,
  pub rsi14: Vec<Option<f64>>,
  pub ema12: Vec<Option<f64>>,
  pub ema26: Vec<Option<f64>>,
  pub macd: Vec<Option<f64>>,
  pub signal9: Vec<Option<f64>>,
  pub std20: Vec<Option<f64>>,
  pub upper_band: Vec<Option<f64>>,
  pub lower_band: Vec<Option<f64>>,
}

/// 가장 최근 관측치의 지표 스냅샷. 분석 호출마다 새로 만들어지고
/// Recommendation 생성 후 버려진다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
  pub date: NaiveDate,
  pub close: f64,
  pub volume: u64,
  pub sma20: Option<f64>,
  pub sma50: Option<f64>,
  pub rsi14: Option<f64>,
  pub ema12: Option<f64>,
  pub ema26: Option<f64>,
  pub macd: Option<f64>,
  pub signal9: Option<f64>,
  pub std20: Option<f64>,
  pub upper_band: Option<f64>,
  pub lower_band: Option<f64>,
  /// 밴드 내 가격 위치(0~100%). 밴드 폭이 0이거나 밴드 미정의면 None.
  pub bb_percent: Option<f64>,
  /// 최근 5봉(미만이면 가용 봉) 평균 거래량
  pub avg_volume5: f64,
}

impl IndicatorFrame {
  /// 시계열 전체를 한 번 훑으며 모든 지표 열을 계산한다.
  /// 순수 함수: 원본 시계열은 변경하지 않는다.
  pub fn compute(series: &PriceSeries) -> Result<Self, AnalysisError> {
    let len = series.len();

    let mut sma20_ind = SimpleMovingAverage::new(SMA_SHORT_PERIOD);
    let mut sma50_ind = SimpleMovingAverage::new(SMA_LONG_PERIOD);
    let mut rsi_ind = RelativeStrengthIndex::new(RSI_PERIOD);
    let mut ema12_ind = super::ExponentialMovingAverage::new(MACD_FAST_SPAN);
    let mut ema26_ind = super::ExponentialMovingAverage::new(MACD_SLOW_SPAN);
    let mut macd_ind = Macd::new(MACD_FAST_SPAN, MACD_SLOW_SPAN, MACD_SIGNAL_SPAN);
    let mut bb_ind = BollingerBands::new(BOLLINGER_PERIOD, BOLLINGER_WIDTH);

    let mut frame = IndicatorFrame {
      series: series.clone(),
      sma20: Vec::with_capacity(len),
      sma50: Vec::with_capacity(len),
      rsi14: Vec::with_capacity(len),
      ema12: Vec::with_capacity(len),
      ema26: Vec::with_capacity(len),
      macd: Vec::with_capacity(len),
      signal9: Vec::with_capacity(len),
      std20: Vec::with_capacity(len),
      upper_band: Vec::with_capacity(len),
      lower_band: Vec::with_capacity(len),
    };

    for obs in series.observations() {
      let close = obs.close;

      sma20_ind.update(close, None)?;
      sma50_ind.update(close, None)?;
      rsi_ind.update(close, None)?;
      ema12_ind.update(close, None)?;
      ema26_ind.update(close, None)?;
      macd_ind.update(close, None)?;
      bb_ind.update(close, None)?;

      frame.sma20.push(sma20_ind.value().ok());
      frame.sma50.push(sma50_ind.value().ok());
      frame.rsi14.push(rsi_ind.value().ok());
      frame.ema12.push(ema12_ind.value().ok());
      frame.ema26.push(ema26_ind.value().ok());

      match macd_ind.components() {
        Ok((macd_line, signal_line)) => {
          frame.macd.push(Some(macd_line));
          frame.signal9.push(Some(signal_line));
        }
        Err(_) => {
          frame.macd.push(None);
          frame.signal9.push(None);
        }
      }

      match bb_ind.bands() {
        Ok(bands) => {
          frame.std20.push(Some(bands.std_dev));
          frame.upper_band.push(Some(bands.upper));
          frame.lower_band.push(Some(bands.lower));
        }
        Err(_) => {
          frame.std20.push(None);
          frame.upper_band.push(None);
          frame.lower_band.push(None);
        }
      }
    }

    Ok(frame)
  }

  pub fn series(&self) -> &PriceSeries {
    &self.series
  }

  pub fn len(&self) -> usize {
    self.series.len()
  }

  pub fn is_empty(&self) -> bool {
    self.series.is_empty()
  }

  /// `iloc[-offset]` 스타일 역방향 조회. 범위를 벗어나거나
  /// 해당 인덱스에서 지표가 미정의면 None.
  fn column_back(column: &[Option<f64>], offset: usize) -> Option<f64> {
    if offset == 0 || offset > column.len() {
      return None;
    }
    column[column.len() - offset]
  }

  pub fn sma20_back(&self, offset: usize) -> Option<f64> {
    Self::column_back(&self.sma20, offset)
  }

  pub fn sma50_back(&self, offset: usize) -> Option<f64> {
    Self::column_back(&self.sma50, offset)
  }

  /// 마지막 관측치의 스냅샷을 만든다. BB_Percent와 평균 거래량은
  /// 여기서만 계산된다.
  pub fn snapshot(&self) -> Result<Snapshot, AnalysisError> {
    let latest = self.series.latest();
    let last = self.len() - 1;

    let upper = self.upper_band[last];
    let lower = self.lower_band[last];

    let bb_percent = match (upper, lower) {
      (Some(upper), Some(lower)) => {
        match bollinger_percent(latest.close, upper, lower) {
          Ok(pct) => Some(pct),
          Err(err) => {
            // 변동성 0 구간: NaN을 전파하는 대신 미정의로 보고
            log::warn!("{}: {}", self.series.ticker(), err);
            None
          }
        }
      }
      _ => None,
    };

    let mut vol_ind = TrailingVolumeAverage::new(VOLUME_AVG_PERIOD);
    let tail_start = self.len().saturating_sub(VOLUME_AVG_PERIOD);
    for obs in &self.series.observations()[tail_start..] {
      vol_ind.update(obs.close, Some(obs.volume as f64))?;
    }
    let avg_volume5 = vol_ind.value()?;

    Ok(Snapshot {
      date: latest.date,
      close: latest.close,
      volume: latest.volume,
      sma20: self.sma20[last],
      sma50: self.sma50[last],
      rsi14: self.rsi14[last],
      ema12: self.ema12[last],
      ema26: self.ema26[last],
      macd: self.macd[last],
      signal9: self.signal9[last],
      std20: self.std20[last],
      upper_band: upper,
      lower_band: lower,
      bb_percent,
      avg_volume5,
    })
  }
}

/// (close − lower) / (upper − lower) × 100. 밴드 폭이 0이면
/// DegenerateComputation — 호출자가 0 나눗셈을 넘겨받는 일은 없다.
pub fn bollinger_percent(close: f64, upper: f64, lower: f64) -> Result<f64, AnalysisError> {
  let width = upper - lower;
  if width == 0.0 {
    return Err(AnalysisError::DegenerateComputation(
      "zero-width Bollinger range".to_string(),
    ));
  }
  Ok((close - lower) / width * 100.0)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::observation::Observation;
  use chrono::NaiveDate;

  fn series_of(closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let observations = closes
      .iter()
      .enumerate()
      .map(|(i, c)| {
        let date = start + chrono::Duration::days(i as i64);
        Observation::new(date, *c, *c, *c, *c, 1_000)
      })
      .collect();
    PriceSeries::new("TEST", observations).unwrap()
  }

  #[test]
  fn test_undefined_prefix_lengths() {
    let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
    let frame = IndicatorFrame::compute(&series_of(&closes)).unwrap();

    assert!(frame.sma20[18].is_none());
    assert!(frame.sma20[19].is_some());
    assert!(frame.sma50[48].is_none());
    assert!(frame.sma50[49].is_some());
    assert!(frame.rsi14[13].is_none());
    assert!(frame.rsi14[14].is_some());
    assert!(frame.std20[18].is_none());
    assert!(frame.std20[19].is_some());
    // EMA 계열은 첫 값 시드라 0번 인덱스부터 정의
    assert!(frame.ema12[0].is_some());
    assert!(frame.macd[0].is_some());
    assert!(frame.signal9[0].is_some());
  }

  #[test]
  fn test_sma_columns_match_window_means() {
    let closes: Vec<f64> = (1..=60).map(|i| i as f64).collect();
    let frame = IndicatorFrame::compute(&series_of(&closes)).unwrap();

    // closes[40..60]의 평균 = (41 + 60) / 2
    assert!((frame.sma20[59].unwrap() - 50.5).abs() < 1e-10);
    // closes[10..60]의 평균 = (11 + 60) / 2
    assert!((frame.sma50[59].unwrap() - 35.5).abs() < 1e-10);
  }

  #[test]
  fn test_back_offset_lookup() {
    let closes: Vec<f64> = (1..=60).map(|i| i as f64).collect();
    let frame = IndicatorFrame::compute(&series_of(&closes)).unwrap();

    // iloc[-1] = 마지막 인덱스
    assert_eq!(frame.sma20_back(1), frame.sma20[59]);
    assert_eq!(frame.sma20_back(10), frame.sma20[50]);
    // 범위 밖
    assert_eq!(frame.sma50_back(61), None);
    assert_eq!(frame.sma50_back(0), None);
    // 인덱스는 유효하지만 지표 미정의
    assert_eq!(frame.sma50_back(60), None);
  }

  #[test]
  fn test_snapshot_flat_series_has_no_bb_percent() {
    let closes = vec![50.0; 30];
    let frame = IndicatorFrame::compute(&series_of(&closes)).unwrap();
    let snapshot = frame.snapshot().unwrap();

    assert_eq!(snapshot.upper_band, snapshot.lower_band);
    assert_eq!(snapshot.bb_percent, None);
  }

  #[test]
  fn test_snapshot_avg_volume_of_short_series() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let observations: Vec<Observation> = [100_u64, 200, 300]
      .iter()
      .enumerate()
      .map(|(i, v)| {
        Observation::new(start + chrono::Duration::days(i as i64), 10.0, 10.0, 10.0, 10.0, *v)
      })
      .collect();
    let series = PriceSeries::new("TEST", observations).unwrap();

    let snapshot = IndicatorFrame::compute(&series).unwrap().snapshot().unwrap();
    assert!((snapshot.avg_volume5 - 200.0).abs() < 1e-10);
  }

  #[test]
  fn test_bollinger_percent_degenerate() {
    assert!(matches!(
      bollinger_percent(50.0, 50.0, 50.0),
      Err(AnalysisError::DegenerateComputation(_))
    ));

    let pct = bollinger_percent(15.0, 20.0, 10.0).unwrap();
    assert!((pct - 50.0).abs() < 1e-10);
  }

  #[test]
  fn test_idempotent_computation() {
    let closes: Vec<f64> = (0..70).map(|i| 100.0 + (i as f64) * 0.7).collect();
    let series = series_of(&closes);

    let first = IndicatorFrame::compute(&series).unwrap().snapshot().unwrap();
    let second = IndicatorFrame::compute(&series).unwrap().snapshot().unwrap();
    assert_eq!(first, second);
  }
}
