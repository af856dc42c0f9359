mod common;

use std::time::{Duration, Instant};

use histfetch::{DateRange, HistFetch, Records};
use tracing_subscriber::EnvFilter;

const SYMBOLS: &[&str] = &[
    "AAPL", "AMZN", "GS", "JPM", "GOOGL", "ABNB", "BARK", "APRN", "CHWY", "CAG", "LLY", "FND",
    "EDU", "PYPL", "PEBO", "RBLX", "SHAK", "SHOP", "TDOC", "VRTX", "VICI",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let connector = common::get_connector()?;
    let hf = HistFetch::builder()
        .with_connector(connector)
        .deadline(Duration::from_secs(600))
        .build()?;

    let range = DateRange::parse("2021-02-10T16:30:00Z", "2021-02-10T16:45:00Z")?;

    let started = Instant::now();
    let report = hf.quotes(SYMBOLS, range).await?;
    println!("took {:.2} sec", started.elapsed().as_secs_f64());
    println!("{}", report.summary);

    for (symbol, records) in report.successes() {
        println!("\n{symbol}: {} quotes", records.len());
        print_stats(records);
    }

    for (symbol, err) in report.failures() {
        eprintln!("- {symbol} -> {err}");
    }
    for symbol in &report.unresolved {
        eprintln!("- {symbol} -> unresolved at deadline");
    }

    Ok(())
}

#[cfg(feature = "dataframe")]
fn print_stats(records: &Records) {
    match histfetch::describe_records(records) {
        Ok(df) => println!("{df}"),
        Err(e) => eprintln!("  describe failed: {e}"),
    }
}

#[cfg(not(feature = "dataframe"))]
fn print_stats(records: &Records) {
    match histfetch::SeriesStats::describe(records) {
        Some(s) => {
            let std = s.std.map_or_else(|| "n/a".to_string(), |v| format!("{v:.4}"));
            println!(
                "  mid  count={} mean={:.4} std={std} min={:.4} 25%={:.4} 50%={:.4} 75%={:.4} max={:.4}",
                s.count, s.mean, s.min, s.p25, s.p50, s.p75, s.max
            );
        }
        None => println!("  (no finite values)"),
    }
}
