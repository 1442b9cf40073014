use std::sync::Arc;

use crate::constants::DEFAULT_SYMBOLS;
use crate::models::{DisplayMode, DisplayRange};
use crate::services::range_projector;

pub fn run(symbols: Vec<String>, range: String, mode: String) {
    let range: DisplayRange = match range.parse() {
        Ok(range) => range,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    let mode: DisplayMode = match mode.parse() {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let symbols: Vec<String> = if symbols.is_empty() {
        DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
    } else {
        symbols
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Failed to create runtime: {}", e);
            std::process::exit(1);
        }
    };

    runtime.block_on(async move {
        let store = match super::build_store() {
            Ok(store) => Arc::new(store),
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        };

        println!(
            "📈 Loading {} symbols ({} / {})...",
            symbols.len(),
            range,
            mode
        );

        // Distinct symbols load concurrently; failures degrade per symbol
        let mut handles = Vec::new();
        for symbol in symbols {
            let symbol = symbol.trim().to_uppercase();
            let store = store.clone();
            let task_symbol = symbol.clone();
            handles.push((
                symbol,
                tokio::spawn(async move { store.get_series(&task_symbol).await }),
            ));
        }

        for (symbol, handle) in handles {
            match handle.await {
                Ok(Ok(series)) => print_symbol(&symbol, &series, range, mode),
                Ok(Err(e)) => println!("❌ {:<6} {}", symbol, e),
                Err(e) => println!("❌ {:<6} task failed: {}", symbol, e),
            }
        }
    });
}

fn print_symbol(
    symbol: &str,
    series: &[crate::models::PricePoint],
    range: DisplayRange,
    mode: DisplayMode,
) {
    let filtered = range_projector::filter_by_range(series, range);
    if filtered.is_empty() {
        println!("⚠️  {:<6} no data in range {}", symbol, range);
        return;
    }

    // No visible window at the console: basis defaults to the first point
    // of the filtered range
    let basis = filtered[0].price;
    let points = range_projector::project(&filtered, mode, basis);
    let first = &points[0];
    let last = &points[points.len() - 1];

    match mode {
        DisplayMode::Percent => println!(
            "✅ {:<6} {:>5} points  {} → {}  {:+.2}%",
            symbol,
            points.len(),
            first.x,
            last.x,
            last.y
        ),
        DisplayMode::Dollar => println!(
            "✅ {:<6} {:>5} points  {} → {}  ${:.2} → ${:.2}",
            symbol,
            points.len(),
            first.x,
            last.x,
            first.y,
            last.y
        ),
    }
}
