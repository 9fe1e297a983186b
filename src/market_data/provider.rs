use std::path::PathBuf;
use chrono::{Duration, NaiveDate};
use serde::Deserialize;

use crate::error::AnalysisError;
use crate::models::observation::{Observation, PriceSeries};

/// 가격 이력 제공자 인터페이스. 엔진의 유일한 입력 경계이며
/// 재시도 정책은 제공자 쪽 책임이다.
pub trait PriceHistoryProvider {
    /// 최근 lookback_days 범위의 일봉 시계열.
    /// 종목이 없거나 비어 있으면 NoData.
    fn history(&self, ticker: &str, lookback_days: u32) -> Result<PriceSeries, AnalysisError>;
}

/// `<data_dir>/<TICKER>.csv` 형식의 일봉 파일 제공자
pub struct CsvBarProvider {
    data_dir: PathBuf,
    delimiter: u8,
}

#[derive(Debug, Deserialize)]
struct CsvBar {
    date: NaiveDate,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl CsvBarProvider {
    pub fn new(data_dir: PathBuf) -> Self {
        CsvBarProvider {
            data_dir,
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter as u8;
        self
    }

    fn ticker_path(&self, ticker: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", ticker.to_uppercase()))
    }
}

impl PriceHistoryProvider for CsvBarProvider {
    fn history(&self, ticker: &str, lookback_days: u32) -> Result<PriceSeries, AnalysisError> {
        let path = self.ticker_path(ticker);

        if !path.exists() {
            return Err(AnalysisError::NoData(format!(
                "no price history file for {}",
                ticker
            )));
        }

        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .from_path(&path)
            .map_err(|e| AnalysisError::UpstreamUnavailable(e.to_string()))?;

        let mut bars: Vec<CsvBar> = Vec::new();
        for rec in rdr.deserialize() {
            let bar: CsvBar = rec.map_err(|e| AnalysisError::ParseError(e.to_string()))?;
            bars.push(bar);
        }

        let last_date = match bars.last() {
            Some(bar) => bar.date,
            None => {
                return Err(AnalysisError::NoData(format!("empty price history for {}", ticker)))
            }
        };

        // 마지막 봉 기준으로 과거 구간만 남긴다
        let cutoff = last_date - Duration::days(lookback_days as i64);
        let observations: Vec<Observation> = bars
            .into_iter()
            .filter(|b| b.date >= cutoff)
            .map(|b| Observation::new(b.date, b.open, b.high, b.low, b.close, b.volume))
            .collect();

        PriceSeries::new(ticker.to_uppercase(), observations)
    }
}
