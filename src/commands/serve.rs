use std::sync::Arc;

pub fn run(port: u16) {
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Failed to create runtime: {}", e);
            std::process::exit(1);
        }
    };

    runtime.block_on(async move {
        println!("🚀 Starting franchart server on port {}", port);

        let store = match super::build_store() {
            Ok(store) => Arc::new(store),
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        };

        if let Err(e) = crate::server::serve(store, port).await {
            eprintln!("❌ Server error: {}", e);
            std::process::exit(1);
        }
    });
}
