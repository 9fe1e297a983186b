/**
* filename : signal_types
* author : HAMA
* date: 2025. 6. 5.
* description:
**/

use std::fmt;
use serde::Serialize;

/// 개별 신호의 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
  Bullish,
  Bearish,
  Neutral,
}

impl Direction {
  pub fn vote(&self) -> i32 {
    match self {
      Direction::Bullish => 1,
      Direction::Bearish => -1,
      Direction::Neutral => 0,
    }
  }

  pub fn is_bullish(&self) -> bool {
    matches!(self, Direction::Bullish)
  }

  pub fn is_bearish(&self) -> bool {
    matches!(self, Direction::Bearish)
  }
}

/// 신호의 출처. 평가 순서와 reasons 순서가 이 순서로 고정된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SignalKind {
  Trend,
  Rsi,
  Macd,
  Bollinger,
  Volume,
}

impl SignalKind {
  /// 표시용 키워드 (스크리닝 허용 목록과 동일)
  pub fn keyword(&self) -> &'static str {
    match self {
      SignalKind::Trend => "SMA20",
      SignalKind::Rsi => "RSI",
      SignalKind::Macd => "MACD",
      SignalKind::Bollinger => "Bollinger",
      SignalKind::Volume => "Volumen",
    }
  }
}

/// 한 신호의 평가 결과. 점수 기여 여부는 문자열 검색이 아니라
/// `scored` 플래그로 명시한다. 추세와 MACD만 점수에 기여하고
/// RSI/볼린저/거래량은 표시 전용 — 원본 로직의 관측 동작 그대로.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reason {
  pub kind: SignalKind,
  pub direction: Direction,
  pub scored: bool,
  pub text: String,
}

impl Reason {
  pub fn scored_vote(&self) -> i32 {
    if self.scored {
      self.direction.vote()
    } else {
      0
    }
  }
}

/// 최종 추천
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
  Buy,
  Avoid,
  Neutral,
}

impl Verdict {
  /// 점수에서 판정 결정. 점수는 실제로 {-2, 0, +2}만 나온다 —
  /// 매수는 추세와 MACD가 모두 강세일 때만 가능하다.
  pub fn from_score(score: i32) -> Self {
    if score > 1 {
      Verdict::Buy
    } else if score < -1 {
      Verdict::Avoid
    } else {
      Verdict::Neutral
    }
  }

  pub fn is_buy(&self) -> bool {
    matches!(self, Verdict::Buy)
  }
}

impl fmt::Display for Verdict {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let label = match self {
      Verdict::Buy => "COMPRAR",
      Verdict::Avoid => "NO COMPRAR",
      Verdict::Neutral => "NEUTRAL",
    };
    write!(f, "{}", label)
  }
}

/// 투자 기간 구간. 서로 독립적으로 성립한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Horizon {
  ShortTerm,
  MediumTerm,
  LongTerm,
}

impl Horizon {
  pub fn label(&self) -> &'static str {
    match self {
      Horizon::ShortTerm => "corto plazo",
      Horizon::MediumTerm => "mediano plazo",
      Horizon::LongTerm => "largo plazo",
    }
  }

  pub fn justification(&self) -> &'static str {
    match self {
      Horizon::ShortTerm => {
        "Momentum positivo con indicadores técnicos favorables para movimientos recientes"
      }
      Horizon::MediumTerm => {
        "Tendencia intermedia positiva con cruce alcista de medias móviles"
      }
      Horizon::LongTerm => {
        "Tendencia secular alcista y fundamentos sólidos para crecimiento sostenido"
      }
    }
  }
}

pub const NO_HORIZON_MESSAGE: &str =
  "No se recomienda para ningún horizonte temporal específico";

/// 분류기의 최종 산출물. 반환 후 불변.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
  pub verdict: Verdict,
  /// 평가 순서 그대로: 추세, RSI, MACD, 볼린저, 거래량
  pub reasons: Vec<Reason>,
  /// 성립한 기간, 짧은 것부터
  pub horizons: Vec<Horizon>,
  pub horizon_narrative: String,
}

impl Recommendation {
  /// 점수 재계산: scored 플래그가 선 신호의 투표 합
  pub fn score(&self) -> i32 {
    self.reasons.iter().map(|r| r.scored_vote()).sum()
  }

  pub fn has_horizon(&self, horizon: Horizon) -> bool {
    self.horizons.contains(&horizon)
  }
}
