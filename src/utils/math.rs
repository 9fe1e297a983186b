//! 수학 관련 유틸리티
//!
//! 이동 윈도우 지표에서 쓰는 통계 함수 제공

/// 산술 평균. 빈 슬라이스는 0.0.
pub fn mean(values: &[f64]) -> f64 {
  if values.is_empty() {
    return 0.0;
  }
  values.iter().sum::<f64>() / values.len() as f64
}

/// 표본 표준편차 (ddof=1). 원소가 2개 미만이면 0.0.
pub fn sample_std(values: &[f64]) -> f64 {
  if values.len() < 2 {
    return 0.0;
  }

  let m = mean(values);
  let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
  variance.sqrt()
}
