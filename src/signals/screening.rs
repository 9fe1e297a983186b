/**
* filename : screening
* author : HAMA
* date: 2025. 6. 5.
* description:
**/

use serde::Serialize;

use crate::config::ScreeningConfig;
use crate::error::AnalysisError;
use crate::indicators::frame::Snapshot;
use super::signal_types::{Horizon, Reason, Recommendation, SignalKind};

/// 제안 매매 가격
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TradeLevels {
  pub entry_price: f64,
  pub target_price: f64,
}

/// 배치 스캔 결과 한 건
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortlistEntry {
  pub ticker: String,
  pub price: f64,
  pub levels: TradeLevels,
  pub reasons: Vec<String>,
}

/// 매수 + 단기 성립 종목만 골라 진입/목표 가격을 붙이는 순수 필터.
/// 종목별 호출 사이에 상태가 없으므로 순서와 무관하다.
#[derive(Debug, Clone)]
pub struct ScreeningPolicy {
  entry_band_threshold: f64,
  max_reasons: usize,
}

impl ScreeningPolicy {
  pub fn new(config: &ScreeningConfig) -> Self {
    ScreeningPolicy {
      entry_band_threshold: config.entry_band_threshold,
      max_reasons: config.max_reasons,
    }
  }

  /// 포함 조건: COMPRAR 판정이고 "corto plazo"가 성립
  pub fn includes(&self, recommendation: &Recommendation) -> bool {
    recommendation.verdict.is_buy() && recommendation.has_horizon(Horizon::ShortTerm)
  }

  /// 진입가: 하단 밴드 근처(BB% < 임계)면 하단 밴드, 아니면 SMA20.
  /// 목표가: 상단 밴드. 밴드/SMA20 미정의면 InsufficientHistory.
  pub fn levels(&self, snapshot: &Snapshot) -> Result<TradeLevels, AnalysisError> {
    let sma20 = snapshot
      .sma20
      .ok_or_else(|| AnalysisError::insufficient("SMA20", 20, 0))?;
    let lower = snapshot
      .lower_band
      .ok_or_else(|| AnalysisError::insufficient("LowerBand", 20, 0))?;
    let upper = snapshot
      .upper_band
      .ok_or_else(|| AnalysisError::insufficient("UpperBand", 20, 0))?;

    let entry_price = match snapshot.bb_percent {
      Some(pct) if pct < self.entry_band_threshold => lower,
      // 퇴화 밴드(None)도 SMA20으로 폴백
      _ => sma20,
    };

    Ok(TradeLevels {
      entry_price,
      target_price: upper,
    })
  }

  /// 허용 목록 종류의 이유만 앞에서부터 최대 max_reasons개.
  /// 모든 종류가 허용 목록에 있으므로 사실상 "앞의 3개"다.
  pub fn filter_reasons<'a>(&self, reasons: &'a [Reason]) -> Vec<&'a Reason> {
    const ALLOWED: [SignalKind; 5] = [
      SignalKind::Trend,
      SignalKind::Rsi,
      SignalKind::Macd,
      SignalKind::Bollinger,
      SignalKind::Volume,
    ];

    reasons
      .iter()
      .filter(|r| ALLOWED.contains(&r.kind))
      .take(self.max_reasons)
      .collect()
  }

  /// 한 종목에 정책 전체 적용. 포함되지 않으면 None.
  pub fn apply(
    &self,
    ticker: &str,
    recommendation: &Recommendation,
    snapshot: &Snapshot,
  ) -> Result<Option<ShortlistEntry>, AnalysisError> {
    if !self.includes(recommendation) {
      return Ok(None);
    }

    let levels = self.levels(snapshot)?;
    let reasons = self
      .filter_reasons(&recommendation.reasons)
      .into_iter()
      .map(|r| r.text.clone())
      .collect();

    Ok(Some(ShortlistEntry {
      ticker: ticker.to_string(),
      price: snapshot.close,
      levels,
      reasons,
    }))
  }
}

impl Default for ScreeningPolicy {
  fn default() -> Self {
    ScreeningPolicy::new(&ScreeningConfig::default())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::signals::signal_types::{Direction, Verdict, NO_HORIZON_MESSAGE};
  use chrono::NaiveDate;

  fn snapshot(bb_percent: Option<f64>) -> Snapshot {
    Snapshot {
      date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
      close: 105.0,
      volume: 1_000,
      sma20: Some(103.0),
      sma50: Some(100.0),
      rsi14: Some(55.0),
      ema12: Some(104.0),
      ema26: Some(102.0),
      macd: Some(2.0),
      signal9: Some(1.0),
      std20: Some(2.0),
      upper_band: Some(107.0),
      lower_band: Some(99.0),
      bb_percent,
      avg_volume5: 1_000.0,
    }
  }

  fn recommendation(verdict: Verdict, horizons: Vec<Horizon>) -> Recommendation {
    let reason = |kind, text: &str| Reason {
      kind,
      direction: Direction::Neutral,
      scored: false,
      text: text.to_string(),
    };

    Recommendation {
      verdict,
      reasons: vec![
        reason(SignalKind::Trend, "tendencia"),
        reason(SignalKind::Rsi, "rsi"),
        reason(SignalKind::Macd, "macd"),
        reason(SignalKind::Bollinger, "bollinger"),
        reason(SignalKind::Volume, "volumen"),
      ],
      horizons,
      horizon_narrative: NO_HORIZON_MESSAGE.to_string(),
    }
  }

  #[test]
  fn test_includes_requires_buy_and_short_term() {
    let policy = ScreeningPolicy::default();

    assert!(policy.includes(&recommendation(Verdict::Buy, vec![Horizon::ShortTerm])));
    assert!(!policy.includes(&recommendation(Verdict::Buy, vec![Horizon::MediumTerm])));
    assert!(!policy.includes(&recommendation(Verdict::Neutral, vec![Horizon::ShortTerm])));
    assert!(!policy.includes(&recommendation(Verdict::Avoid, vec![Horizon::ShortTerm])));
  }

  #[test]
  fn test_entry_near_lower_band() {
    let policy = ScreeningPolicy::default();

    let levels = policy.levels(&snapshot(Some(25.0))).unwrap();
    assert_eq!(levels.entry_price, 99.0);
    assert_eq!(levels.target_price, 107.0);
  }

  #[test]
  fn test_entry_falls_back_to_sma20() {
    let policy = ScreeningPolicy::default();

    // 중간 이상 구간
    assert_eq!(policy.levels(&snapshot(Some(60.0))).unwrap().entry_price, 103.0);
    // 경계값 30은 하단 밴드가 아님 (미만이어야 함)
    assert_eq!(policy.levels(&snapshot(Some(30.0))).unwrap().entry_price, 103.0);
    // 퇴화 밴드도 SMA20
    assert_eq!(policy.levels(&snapshot(None)).unwrap().entry_price, 103.0);
  }

  #[test]
  fn test_levels_require_bands() {
    let policy = ScreeningPolicy::default();
    let mut snap = snapshot(Some(50.0));
    snap.upper_band = None;

    assert!(matches!(
      policy.levels(&snap),
      Err(AnalysisError::InsufficientHistory { .. })
    ));
  }

  #[test]
  fn test_reasons_truncated_to_three() {
    let policy = ScreeningPolicy::default();
    let rec = recommendation(Verdict::Buy, vec![Horizon::ShortTerm]);

    let filtered = policy.filter_reasons(&rec.reasons);
    assert_eq!(filtered.len(), 3);
    assert_eq!(filtered[0].text, "tendencia");
    assert_eq!(filtered[2].text, "macd");
  }

  #[test]
  fn test_apply_excluded_is_none() {
    let policy = ScreeningPolicy::default();
    let rec = recommendation(Verdict::Neutral, vec![Horizon::ShortTerm]);

    let entry = policy.apply("AAPL", &rec, &snapshot(Some(50.0))).unwrap();
    assert!(entry.is_none());
  }

  #[test]
  fn test_apply_builds_entry() {
    let policy = ScreeningPolicy::default();
    let rec = recommendation(Verdict::Buy, vec![Horizon::ShortTerm]);

    let entry = policy
      .apply("AAPL", &rec, &snapshot(Some(25.0)))
      .unwrap()
      .unwrap();
    assert_eq!(entry.ticker, "AAPL");
    assert_eq!(entry.price, 105.0);
    assert_eq!(entry.levels.entry_price, 99.0);
    assert_eq!(entry.reasons.len(), 3);
  }
}
