/**
* filename : classifier
* author : HAMA
* date: 2025. 6. 5.
* description:
**/

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::indicators::frame::{IndicatorFrame, Snapshot, SMA_LONG_PERIOD, SMA_SHORT_PERIOD, RSI_PERIOD};
use super::signal_types::{
  Direction, Horizon, Reason, Recommendation, SignalKind, Verdict, NO_HORIZON_MESSAGE,
};

/// 중기 기간 체크가 참조하는 SMA20 과거 오프셋 (iloc[-10])
const MEDIUM_SMA20_LOOKBACK: usize = 10;
/// 중기 기간 체크가 참조하는 SMA50 과거 오프셋 (iloc[-20])
const MEDIUM_SMA50_LOOKBACK: usize = 20;
/// 장기 기간 체크가 참조하는 SMA50 과거 오프셋 (iloc[-60])
const LONG_SMA50_LOOKBACK: usize = 60;

/// 스냅샷과 프레임 이력에서 추천을 만들어내는 규칙 기반 분류기.
/// 결정적이고 순수하며 I/O가 없다.
#[derive(Debug, Clone)]
pub struct SignalClassifier {
  rsi_oversold: f64,
  rsi_overbought: f64,
  bb_lower_pct: f64,
  bb_upper_pct: f64,
  volume_surge_ratio: f64,
}

impl SignalClassifier {
  pub fn new(config: &AnalysisConfig) -> Self {
    SignalClassifier {
      rsi_oversold: config.rsi_oversold,
      rsi_overbought: config.rsi_overbought,
      bb_lower_pct: config.bb_lower_pct,
      bb_upper_pct: config.bb_upper_pct,
      volume_surge_ratio: config.volume_surge_ratio,
    }
  }

  pub fn classify(&self, frame: &IndicatorFrame) -> Result<Recommendation, AnalysisError> {
    let snapshot = frame.snapshot()?;
    self.classify_snapshot(frame, &snapshot)
  }

  pub fn classify_snapshot(
    &self,
    frame: &IndicatorFrame,
    snapshot: &Snapshot,
  ) -> Result<Recommendation, AnalysisError> {
    let reasons = self.evaluate_reasons(snapshot, frame.len())?;

    // 명시적 투표 합산: scored 플래그가 선 신호(추세, MACD)만 기여
    let score: i32 = reasons.iter().map(|r| r.scored_vote()).sum();
    let verdict = Verdict::from_score(score);

    let horizons = self.evaluate_horizons(frame, snapshot);
    let horizon_narrative = narrative_for(&horizons);

    Ok(Recommendation {
      verdict,
      reasons,
      horizons,
      horizon_narrative,
    })
  }

  /// 고정 순서로 신호를 평가한다: 추세, RSI, MACD, 볼린저, 거래량.
  /// 판정에 필수인 지표가 미정의면 InsufficientHistory.
  pub fn evaluate_reasons(
    &self,
    snapshot: &Snapshot,
    available: usize,
  ) -> Result<Vec<Reason>, AnalysisError> {
    let sma20 = require(snapshot.sma20, "SMA20", SMA_SHORT_PERIOD, available)?;
    let sma50 = require(snapshot.sma50, "SMA50", SMA_LONG_PERIOD, available)?;
    let rsi = require(snapshot.rsi14, "RSI14", RSI_PERIOD + 1, available)?;
    let macd = require(snapshot.macd, "MACD", 1, available)?;
    let signal = require(snapshot.signal9, "Signal9", 1, available)?;

    let mut reasons = Vec::with_capacity(5);

    // 1. 추세: SMA20 대 SMA50
    let trend_dir = if sma20 > sma50 {
      Direction::Bullish
    } else {
      Direction::Bearish
    };
    let (cmp, trend_word) = if trend_dir.is_bullish() {
      (">", "alcista")
    } else {
      ("<", "bajista")
    };
    reasons.push(Reason {
      kind: SignalKind::Trend,
      direction: trend_dir,
      scored: true,
      text: format!(
        "SMA20 (${:.2}) {} SMA50 (${:.2}) → Tendencia {}",
        sma20, cmp, sma50, trend_word
      ),
    });

    // 2. RSI: 구간 표시만, 점수 기여 없음
    let rsi_text = if rsi < self.rsi_oversold {
      format!("RSI: {:.2} (Sobreventa, <{:.0})", rsi, self.rsi_oversold)
    } else if rsi > self.rsi_overbought {
      format!("RSI: {:.2} (Sobrecompra, >{:.0})", rsi, self.rsi_overbought)
    } else {
      format!("RSI: {:.2} (Neutral)", rsi)
    };
    reasons.push(Reason {
      kind: SignalKind::Rsi,
      direction: Direction::Neutral,
      scored: false,
      text: rsi_text,
    });

    // 3. MACD 대 시그널
    let macd_dir = if macd > signal {
      Direction::Bullish
    } else {
      Direction::Bearish
    };
    let (cmp, macd_word) = if macd_dir.is_bullish() {
      (">", "alcista")
    } else {
      ("<", "bajista")
    };
    reasons.push(Reason {
      kind: SignalKind::Macd,
      direction: macd_dir,
      scored: true,
      text: format!(
        "MACD ({:.2}) {} Señal ({:.2}) → Momentum {}",
        macd, cmp, signal, macd_word
      ),
    });

    // 4. 볼린저 밴드 위치
    let bb_text = match snapshot.bb_percent {
      Some(pct) if pct > self.bb_upper_pct => {
        format!("Bollinger Bands: Precio cerca de banda superior ({:.2}%)", pct)
      }
      Some(pct) if pct < self.bb_lower_pct => {
        format!("Bollinger Bands: Precio cerca de banda inferior ({:.2}%)", pct)
      }
      Some(pct) => format!("Bollinger Bands: Precio en zona media ({:.2}%)", pct),
      // 변동성 0으로 밴드 폭이 무너진 경우
      None => "Bollinger Bands: Rango degenerado (volatilidad nula)".to_string(),
    };
    reasons.push(Reason {
      kind: SignalKind::Bollinger,
      direction: Direction::Neutral,
      scored: false,
      text: bb_text,
    });

    // 5. 거래량: 급증일 때만 추가
    let volume = snapshot.volume as f64;
    if volume > snapshot.avg_volume5 * self.volume_surge_ratio {
      reasons.push(Reason {
        kind: SignalKind::Volume,
        direction: Direction::Neutral,
        scored: false,
        text: format!(
          "Volumen actual ({}) > Promedio ({:.0}) → Alta actividad",
          snapshot.volume, snapshot.avg_volume5
        ),
      });
    }

    Ok(reasons)
  }

  /// 각 기간 조건을 독립적으로 평가한다. 과거 오프셋이 범위를 벗어나거나
  /// 그 시점 지표가 미정의면 해당 기간은 조용히 제외한다.
  pub fn evaluate_horizons(&self, frame: &IndicatorFrame, snapshot: &Snapshot) -> Vec<Horizon> {
    let mut horizons = Vec::new();

    // 단기 (1~4주): MACD 상방 + RSI 중립대 + 가격이 SMA20 위
    if let (Some(macd), Some(signal), Some(rsi), Some(sma20)) =
      (snapshot.macd, snapshot.signal9, snapshot.rsi14, snapshot.sma20)
    {
      if macd > signal
        && rsi > self.rsi_oversold
        && rsi < self.rsi_overbought
        && snapshot.close > sma20
      {
        horizons.push(Horizon::ShortTerm);
      }
    }

    // 중기 (1~6개월): 두 이동평균이 각자의 과거 시점보다 상승
    if let (Some(sma20), Some(sma50), Some(sma20_past), Some(sma50_past)) = (
      snapshot.sma20,
      snapshot.sma50,
      frame.sma20_back(MEDIUM_SMA20_LOOKBACK),
      frame.sma50_back(MEDIUM_SMA50_LOOKBACK),
    ) {
      if sma20 > sma50 && sma20_past < sma20 && sma50_past < sma50 {
        horizons.push(Horizon::MediumTerm);
      }
    }

    // 장기 (6개월 초과): SMA50이 60봉 전보다 위, 가격이 SMA50 위
    if let (Some(sma50), Some(sma50_past)) =
      (snapshot.sma50, frame.sma50_back(LONG_SMA50_LOOKBACK))
    {
      if sma50 > sma50_past && snapshot.close > sma50 {
        horizons.push(Horizon::LongTerm);
      }
    }

    horizons
  }
}

impl Default for SignalClassifier {
  fn default() -> Self {
    SignalClassifier::new(&AnalysisConfig::default())
  }
}

fn require(
  value: Option<f64>,
  context: &str,
  required: usize,
  available: usize,
) -> Result<f64, AnalysisError> {
  value.ok_or_else(|| AnalysisError::insufficient(context, required, available))
}

fn narrative_for(horizons: &[Horizon]) -> String {
  if horizons.is_empty() {
    return NO_HORIZON_MESSAGE.to_string();
  }

  let labels: Vec<&str> = horizons.iter().map(|h| h.label()).collect();
  let justifications: Vec<&str> = horizons.iter().map(|h| h.justification()).collect();

  format!(
    "Recomendado para: {}\n{}",
    labels.join(", "),
    justifications.join("\n")
  )
}
