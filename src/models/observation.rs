use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// 하루치 OHLCV 관측값
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Observation {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: u64) -> Self {
        Observation {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// 한 종목의 일봉 시계열. 날짜 오름차순, 중복 없음이 불변 조건.
///
/// 생성 이후 원본 OHLCV는 변경되지 않는다. 지표 계산은 항상
/// 별도의 파생 열을 만들고 이 시계열 자체는 건드리지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    ticker: String,
    observations: Vec<Observation>,
}

impl PriceSeries {
    /// Validates the ordering invariant: strictly ascending dates, no duplicates,
    /// positive finite prices, at least one observation.
    pub fn new(ticker: impl Into<String>, observations: Vec<Observation>) -> Result<Self, AnalysisError> {
        let ticker = ticker.into();

        if observations.is_empty() {
            return Err(AnalysisError::NoData(format!(
                "empty price series for {}",
                ticker
            )));
        }

        for obs in &observations {
            let prices = [obs.open, obs.high, obs.low, obs.close];
            if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
                return Err(AnalysisError::InvalidParameter(format!(
                    "non-positive or non-finite price at {}",
                    obs.date
                )));
            }
        }

        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(AnalysisError::InvalidParameter(format!(
                    "dates must be strictly ascending: {} then {}",
                    pair[0].date, pair[1].date
                )));
            }
        }

        Ok(PriceSeries {
            ticker,
            observations,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn latest(&self) -> &Observation {
        // Non-empty is guaranteed by the constructor.
        self.observations.last().unwrap()
    }

    /// Trailing close prices, oldest first.
    pub fn closes(&self) -> impl Iterator<Item = f64> + '_ {
        self.observations.iter().map(|o| o.close)
    }
}
