//! CardPress CLI — Operator tooling for custom deck production.
//!
//! Usage:
//!   cardpress export <ORDER.json>     Rasterize an order into a print archive
//!   cardpress deck <GAME> <STYLE>     Show the generated deck manifest
//!   cardpress dimensions              Show the game catalog and print sizes
//!   cardpress orders list             List known orders
//!   cardpress orders status <ID> <S>  Update an order's production status

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "cardpress",
    about = "Print-ready raster production for custom playing-card decks",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rasterize an order's deck into a production ZIP archive
    Export {
        /// Path to the order JSON file
        order: PathBuf,

        /// Output directory for the archive
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Settle delay per card in milliseconds
        #[arg(long, default_value = "600")]
        settle_ms: u64,
    },

    /// Generate and print the deck manifest for a (game, style) selection
    Deck {
        /// Game variant (marias-single, marias-double, poker-standard, poker-big, canasta)
        game: String,

        /// Card style (back-only, back-face, back-face-faces, custom-game)
        style: String,
    },

    /// Show the game catalog with physical and print pixel dimensions
    Dimensions,

    /// Inspect and manage stored orders
    Orders {
        #[command(subcommand)]
        action: OrdersAction,
    },
}

#[derive(Subcommand)]
enum OrdersAction {
    /// List all known orders
    List,

    /// Update an order's production status
    Status {
        /// Order id (e.g. ORD-1042)
        id: String,

        /// New status (new, processing, issue, done, cancelled, deleted)
        status: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    cardpress_common::logging::init_logging(&cardpress_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Export {
            order,
            output,
            settle_ms,
        } => commands::export::run(order, output, settle_ms).await,
        Commands::Deck { game, style } => commands::deck::run(&game, &style),
        Commands::Dimensions => commands::dimensions::run(),
        Commands::Orders { action } => match action {
            OrdersAction::List => commands::orders::list().await,
            OrdersAction::Status { id, status } => commands::orders::update_status(&id, &status),
        },
    }
}
