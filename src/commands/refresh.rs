pub fn run(symbol: String) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Failed to create runtime: {}", e);
            std::process::exit(1);
        }
    };

    runtime.block_on(async move {
        let store = match super::build_store() {
            Ok(store) => store,
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        };

        println!("🔄 Refreshing {}...", symbol.trim().to_uppercase());

        match store.refresh_symbol(&symbol).await {
            Ok(series) => {
                let last = series.last().map(|p| format!("{} (${:.2})", p.date, p.price));
                println!(
                    "✅ {} points cached{}",
                    series.len(),
                    last.map(|l| format!(", latest {}", l)).unwrap_or_default()
                );
            }
            Err(e) => {
                eprintln!("❌ Refresh failed: {}", e);
                std::process::exit(1);
            }
        }
    });
}
