use clap::{Parser, Subcommand};

use crate::commands;

#[derive(Parser)]
#[command(name = "franchart")]
#[command(about = "Franchise stock chart data service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load symbols and print their chart projection
    Chart {
        /// Ticker symbols (defaults to the franchise watchlist)
        symbols: Vec<String>,

        /// Display range: 1d, 5d, 1mo, 3mo, 6mo, ytd, 1y, 2y, 5y, 10y, max
        #[arg(short, long, default_value = "ytd")]
        range: String,

        /// Display mode: percent or dollar
        #[arg(short, long, default_value = "percent")]
        mode: String,
    },
    /// Force a remote re-fetch for a symbol
    Refresh {
        /// Ticker symbol to refresh
        symbol: String,
    },
    /// Show cache status
    Status,
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 8686)]
        port: u16,
    },
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chart { symbols, range, mode } => {
            commands::chart::run(symbols, range, mode);
        }
        Commands::Refresh { symbol } => {
            commands::refresh::run(symbol);
        }
        Commands::Status => {
            commands::status::run();
        }
        Commands::Serve { port } => {
            commands::serve::run(port);
        }
    }
}
