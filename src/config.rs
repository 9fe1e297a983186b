/**
* filename : config
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::AnalysisError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub analysis: AnalysisConfig,
    pub screening: ScreeningConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// 종목별 일봉 CSV가 있는 디렉터리 (<TICKER>.csv)
    pub data_dir: PathBuf,
    /// 분석에 쓰는 과거 구간 (대략 6개월)
    pub lookback_days: u32,
}

/// 분류기 임계값. 지표 기간(20/50/14/12/26/9)은 기법의 정의라
/// 설정이 아니라 상수다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub rsi_oversold: f64,
    pub rsi_overbought: f64,
    pub bb_lower_pct: f64,
    pub bb_upper_pct: f64,
    pub volume_surge_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningConfig {
    /// BB%가 이 값 미만이면 진입가로 하단 밴드를 제안
    pub entry_band_threshold: f64,
    pub max_reasons: usize,
    pub max_results: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
}

impl Config {
    /// Load configuration from a file
    pub fn load() -> Result<Self, AnalysisError> {
        // Try to load from config.json
        let config_path = Path::new("config.json");

        if config_path.exists() {
            let mut file = File::open(config_path)
                .map_err(|e| AnalysisError::ConfigError(format!("Failed to open config file: {}", e)))?;

            let mut contents = String::new();
            file.read_to_string(&mut contents)
                .map_err(|e| AnalysisError::ConfigError(format!("Failed to read config file: {}", e)))?;

            let mut cfg: Config = serde_json::from_str(&contents)
                .map_err(|e| AnalysisError::ConfigError(format!("Failed to parse config file: {}", e)))?;
            // environment overrides
            cfg.apply_env_overrides();
            Ok(cfg)
        } else {
            // Return default configuration
            let mut cfg = Config::default();
            cfg.apply_env_overrides();
            Ok(cfg)
        }
    }

    /// Apply environment variable overrides for runtime fields
    fn apply_env_overrides(&mut self) {
        use std::env;
        if let Ok(v) = env::var("FINBOT_DATA_DIR") { if !v.is_empty() { self.data.data_dir = PathBuf::from(v); } }
        if let Ok(v) = env::var("FINBOT_LOOKBACK_DAYS") {
            if let Ok(days) = v.parse::<u32>() { self.data.lookback_days = days; }
        }
        if let Ok(v) = env::var("RUST_LOG") { if !v.is_empty() { self.logging.level = v; } }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data: DataConfig {
                data_dir: PathBuf::from("./data"),
                lookback_days: 180,
            },
            analysis: AnalysisConfig::default(),
            screening: ScreeningConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            bb_lower_pct: 20.0,
            bb_upper_pct: 80.0,
            volume_surge_ratio: 1.5,
        }
    }
}

impl Default for ScreeningConfig {
    fn default() -> Self {
        ScreeningConfig {
            entry_band_threshold: 30.0,
            max_reasons: 3,
            max_results: 5,
        }
    }
}
