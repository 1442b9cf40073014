use crate::utils::{get_bulk_source, get_chart_data_dir, get_quote_url_template};

pub fn run() {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Failed to create runtime: {}", e);
            std::process::exit(1);
        }
    };

    runtime.block_on(async {
        let store = match super::build_store() {
            Ok(store) => store,
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        };

        println!("📊 franchart status");
        println!("   📁 Data directory: {}", get_chart_data_dir().display());
        println!("   📦 Bulk source:    {}", get_bulk_source());
        println!("   🌐 Quote source:   {}", get_quote_url_template());

        let status = store.status().await;
        if status.bulk_loaded {
            println!("   📚 Bulk tier:      {} symbols", status.bulk_symbols);
        } else {
            println!("   📚 Bulk tier:      not loaded (loads on first symbol request)");
        }

        if status.cached_symbols.is_empty() {
            println!("   💾 Cached symbols: none");
        } else {
            println!("   💾 Cached symbols: {}", status.cached_symbols.len());
            for entry in &status.cached_symbols {
                let last = entry
                    .last_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("      {:<8} {:>6} points, last {}", entry.symbol, entry.points, last);
            }
        }
    });
}
