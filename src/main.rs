/**
* filename : main
* author : HAMA
* date: 2025. 6. 5.
* description:
**/

use finbot::config::Config;
use finbot::engine::AnalysisEngine;
use finbot::error::AnalysisError;
use finbot::market_data::fundamentals::{FundamentalsProvider, JsonFundamentalsProvider};
use finbot::market_data::provider::{CsvBarProvider, PriceHistoryProvider};
use finbot::signals::screening::{ScreeningPolicy, ShortlistEntry};
use finbot::utils::logging;

fn main() -> Result<(), anyhow::Error> {
    // 로깅 초기화
    logging::init()?;

    // 설정 로드
    let config = Config::load()?;
    log::info!("finbot v{} 시작", finbot::VERSION);

    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("screen") => run_screening(&config)?,
        Some(ticker) => run_analysis(&config, ticker)?,
        None => {
            eprintln!("Uso: finbot <TICKER> | finbot screen");
            std::process::exit(2);
        }
    }

    Ok(())
}

fn run_analysis(config: &Config, ticker: &str) -> Result<(), anyhow::Error> {
    let provider = CsvBarProvider::new(config.data.data_dir.clone());
    let engine = AnalysisEngine::new(&config.analysis);
    let policy = ScreeningPolicy::new(&config.screening);

    let series = match provider.history(ticker, config.data.lookback_days) {
        Ok(series) => series,
        Err(AnalysisError::NoData(_)) => {
            println!("No hay datos suficientes para este ticker.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let report = engine.analyze(&series)?;
    let verdict = report.recommendation.verdict;

    println!(
        "\n📊 Análisis para {} (Precio: ${:.2})",
        report.ticker, report.snapshot.close
    );
    println!("🚨 Recomendación: {}", verdict);

    // 매수 판정일 때만 진입/목표 가격 제시
    if verdict.is_buy() {
        let levels = policy.levels(&report.snapshot)?;
        println!("💡 Precio de entrada ideal: ${:.2}", levels.entry_price);
        println!("🎯 Objetivo técnico: ${:.2}", levels.target_price);
    }

    println!("\n🔍 Detalles Técnicos:");
    for reason in &report.recommendation.reasons {
        println!("- {}", reason.text);
    }

    println!("\n⏳ Horizonte Temporal:");
    println!("{}", report.recommendation.horizon_narrative);

    // 기본적 분석 파일이 있으면 함께 출력
    let fundamentals_provider = JsonFundamentalsProvider::new(config.data.data_dir.clone());
    match fundamentals_provider.fundamentals(ticker) {
        Ok(fundamentals) => {
            println!("\n📈 {}", fundamentals.report());
        }
        Err(AnalysisError::NoData(_)) => {
            log::debug!("no fundamentals for {}", ticker);
        }
        Err(err) => logging::log_error("fundamentals", &err),
    }

    Ok(())
}

fn run_screening(config: &Config) -> Result<(), anyhow::Error> {
    println!("\n🔎 Analizando oportunidades de mercado...");

    let provider = CsvBarProvider::new(config.data.data_dir.clone());
    let engine = AnalysisEngine::new(&config.analysis);
    let policy = ScreeningPolicy::new(&config.screening);

    let mut tickers: Vec<String> = std::fs::read_dir(&config.data.data_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|e| e == "csv").unwrap_or(false))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().to_string()))
        .collect();
    tickers.sort();

    let mut shortlist: Vec<ShortlistEntry> = Vec::new();

    for ticker in &tickers {
        // 종목별 실패는 독립적: 기록하고 다음 종목으로
        let entry = provider
            .history(ticker, config.data.lookback_days)
            .and_then(|series| engine.analyze(&series))
            .and_then(|report| policy.apply(ticker, &report.recommendation, &report.snapshot));

        match entry {
            Ok(Some(entry)) => {
                shortlist.push(entry);
                if shortlist.len() >= config.screening.max_results {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => log::warn!("{}: {}", ticker, err),
        }
    }

    if shortlist.is_empty() {
        println!("\n⚠️ No se encontraron oportunidades fuertes para corto plazo");
        return Ok(());
    }

    println!("\n🚀 Top {} Recomendaciones Corto Plazo:", shortlist.len());
    for (i, asset) in shortlist.iter().enumerate() {
        println!("\n{}. {}", i + 1, asset.ticker);
        println!("   Precio Actual: ${:.2}", asset.price);
        println!("   Precio Entrada Ideal: ${:.2}", asset.levels.entry_price);
        println!("   Objetivo Técnico: ${:.2}", asset.levels.target_price);
        println!("   Señales Técnicas:");
        for reason in &asset.reasons {
            println!("   - {}", reason);
        }
    }

    Ok(())
}
