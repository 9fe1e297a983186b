/**
* filename : engine
* author : HAMA
* date: 2025. 6. 5.
* description:
**/

use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::indicators::frame::{IndicatorFrame, Snapshot};
use crate::models::observation::PriceSeries;
use crate::signals::classifier::SignalClassifier;
use crate::signals::signal_types::Recommendation;
use crate::utils::logging;

/// 한 종목 분석의 전체 산출물. 표현 계층은 이 값만 포맷하고
/// 지표를 다시 계산하지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
  pub ticker: String,
  pub snapshot: Snapshot,
  pub recommendation: Recommendation,
}

/// 프레임 계산 → 스냅샷 → 분류를 묶는 엔진. 호출 간 상태가 없고
/// 항상 동기적으로 완료된다. 종목별 병렬 실행에 조율이 필요 없다.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
  classifier: SignalClassifier,
}

impl AnalysisEngine {
  pub fn new(config: &AnalysisConfig) -> Self {
    AnalysisEngine {
      classifier: SignalClassifier::new(config),
    }
  }

  pub fn analyze(&self, series: &PriceSeries) -> Result<AnalysisReport, AnalysisError> {
    logging::log_analysis_start(series.ticker(), series.len());

    let frame = IndicatorFrame::compute(series)?;
    let snapshot = frame.snapshot()?;
    let recommendation = self.classifier.classify_snapshot(&frame, &snapshot)?;

    log::debug!(
      "{}: verdict={} horizons={:?}",
      series.ticker(),
      recommendation.verdict,
      recommendation.horizons
    );

    Ok(AnalysisReport {
      ticker: series.ticker().to_string(),
      snapshot,
      recommendation,
    })
  }
}
