//! Export an order to a production archive.

use std::path::PathBuf;
use std::time::Duration;

use cardpress_common::config::AppConfig;
use cardpress_deck_model::{print_dimensions, Order};
use cardpress_render_engine::export::{export_deck, ExportJob, ExportProgress, ExportStage};
use cardpress_render_engine::fetcher::AssetFetcher;
use cardpress_render_engine::surface::RasterSurface;

pub async fn run(order_path: PathBuf, output: Option<PathBuf>, settle_ms: u64) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&order_path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", order_path.display()))?;
    let order: Order = serde_json::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Failed to parse order: {e}"))?;

    let config = AppConfig::load();
    let output_dir = output.unwrap_or(config.exports_dir);
    let dims = print_dimensions(order.game);

    println!("Exporting order: {}", order.id);
    println!("  Game: {:?} ({})", order.game, order.game.spec().dimensions.label);
    println!("  Cards: {}", order.deck.len());
    println!("  Print size: {}x{} px @ 300 DPI", dims.width, dims.height);
    println!("  Output: {}", output_dir.display());

    let total = order.deck.len() + 1;
    let job = ExportJob { order, output_dir };
    let mut surface =
        RasterSurface::with_settle_delay(AssetFetcher::new(), Duration::from_millis(settle_ms));

    let progress_cb: Box<dyn Fn(ExportProgress) + Send> = Box::new(|p| {
        if p.stage == ExportStage::Rendering {
            print!("\r  Rendering card {}/{}  ", p.current, p.total);
        }
    });

    match export_deck(job, &mut surface, Some(progress_cb)).await {
        Ok(path) => {
            println!("\nArchive ready: {} ({} entries expected)", path.display(), total);
        }
        Err(e) => {
            println!("\nExport failed: {e}");
        }
    }

    Ok(())
}
