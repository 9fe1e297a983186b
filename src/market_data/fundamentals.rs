use std::fs::File;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// 기본적 분석 지표 모음. `None`이 명시적 "N/A" 센티널이다 —
/// 빠진 항목은 예외가 아니라 값으로 표현된다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fundamentals {
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub roe: Option<f64>,
    pub eps: Option<f64>,
    pub market_cap: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub debt_to_equity: Option<f64>,
}

impl Fundamentals {
    /// 콘솔/메시지용 표시 블록. 수치 해석은 하지 않는다.
    pub fn report(&self) -> String {
        let fmt = |v: Option<f64>| match v {
            Some(x) => format!("{:.2}", x),
            None => "N/A".to_string(),
        };
        let market_cap = match self.market_cap {
            Some(x) => format!("${:.2}B", x / 1e9),
            None => "N/A".to_string(),
        };
        let dividend = match self.dividend_yield {
            Some(x) => format!("{:.2}", x),
            None => "0".to_string(),
        };

        [
            "Análisis Fundamental:".to_string(),
            format!("- Ratio P/E (Valoración): {}", fmt(self.pe_ratio)),
            format!("- Ratio P/B (Valoración): {}", fmt(self.pb_ratio)),
            format!("- ROE (Rentabilidad): {}", fmt(self.roe)),
            format!("- EPS (Beneficios): {}", fmt(self.eps)),
            format!("- Capitalización: {}", market_cap),
            format!("- Deuda/Patrimonio: {}", fmt(self.debt_to_equity)),
            format!("- Dividendo: {}%", dividend),
        ]
        .join("\n")
    }
}

/// 기본적 지표 제공자 인터페이스
pub trait FundamentalsProvider {
    fn fundamentals(&self, ticker: &str) -> Result<Fundamentals, AnalysisError>;
}

/// `<data_dir>/<TICKER>.fundamentals.json` 파일 제공자
pub struct JsonFundamentalsProvider {
    data_dir: PathBuf,
}

impl JsonFundamentalsProvider {
    pub fn new(data_dir: PathBuf) -> Self {
        JsonFundamentalsProvider { data_dir }
    }
}

impl FundamentalsProvider for JsonFundamentalsProvider {
    fn fundamentals(&self, ticker: &str) -> Result<Fundamentals, AnalysisError> {
        let path = self
            .data_dir
            .join(format!("{}.fundamentals.json", ticker.to_uppercase()));

        if !path.exists() {
            return Err(AnalysisError::NoData(format!(
                "no fundamentals file for {}",
                ticker
            )));
        }

        let file = File::open(&path)
            .map_err(|e| AnalysisError::UpstreamUnavailable(e.to_string()))?;
        let fundamentals = serde_json::from_reader(file)?;

        Ok(fundamentals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_render_as_na() {
        let fundamentals = Fundamentals {
            pe_ratio: Some(24.5),
            market_cap: Some(2.5e12),
            ..Default::default()
        };

        let report = fundamentals.report();
        assert!(report.contains("Ratio P/E (Valoración): 24.50"));
        assert!(report.contains("Capitalización: $2500.00B"));
        assert!(report.contains("Ratio P/B (Valoración): N/A"));
        // 배당만은 N/A 대신 0으로 표시
        assert!(report.contains("Dividendo: 0%"));
    }

    #[test]
    fn test_json_parse() {
        let json = r#"{"pe_ratio": 31.2, "roe": 0.45}"#;
        let fundamentals: Fundamentals = serde_json::from_str(json).unwrap();
        assert_eq!(fundamentals.pe_ratio, Some(31.2));
        assert_eq!(fundamentals.roe, Some(0.45));
        assert_eq!(fundamentals.eps, None);
    }
}
