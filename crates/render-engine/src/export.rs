//! Print export: rasterize a full deck and package the production archive.
//!
//! Cards are processed strictly sequentially against one shared surface;
//! the next card is never presented before the previous card's bytes have
//! been captured. A single card failing to rasterize is logged and skipped;
//! failing to produce the archive itself aborts the export and leaves no
//! partial file behind.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use cardpress_common::error::{CardpressError, CardpressResult};
use cardpress_deck_model::{print_dimensions, Card, Order};

use crate::compositor::{RenderMode, SceneSpec};
use crate::surface::CardSurface;

/// An export job ready to be rendered.
#[derive(Debug, Clone)]
pub struct ExportJob {
    /// The fully-populated order driving this export.
    pub order: Order,

    /// Directory the finished archive is written into.
    pub output_dir: PathBuf,
}

/// Progress callback for export rendering.
pub type ProgressCallback = Box<dyn Fn(ExportProgress) + Send>;

/// Export progress report.
#[derive(Debug, Clone)]
pub struct ExportProgress {
    /// Entries finished so far (faces plus the back).
    pub current: usize,

    /// Total entries to produce.
    pub total: usize,

    /// Current stage.
    pub stage: ExportStage,
}

/// Stages of the export process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Preparing,
    Rendering,
    Packaging,
    Complete,
    Failed,
}

/// Fixed archive entry name for the shared back design.
pub const BACK_ENTRY_NAME: &str = "000_Back.png";

/// Archive entry name for the face at deck position `index` (0-based).
pub fn face_entry_name(index: usize, card: &Card) -> String {
    format!(
        "{:03}_{}_{}.png",
        index + 1,
        card.suit.label(),
        card.rank.label(card.game)
    )
}

/// Rasterize every card face plus the shared back and package them into
/// `MC{id}_{surname}_{game}_1ks.zip` under the job's output directory.
///
/// Returns the path of the finished archive.
pub async fn export_deck<S: CardSurface>(
    job: ExportJob,
    surface: &mut S,
    progress: Option<ProgressCallback>,
) -> CardpressResult<PathBuf> {
    match run_export(&job, surface, &progress).await {
        Ok(path) => {
            report(&progress, job.order.deck.len() + 1, job.order.deck.len() + 1, ExportStage::Complete);
            Ok(path)
        }
        Err(e) => {
            report(&progress, 0, job.order.deck.len() + 1, ExportStage::Failed);
            Err(e)
        }
    }
}

async fn run_export<S: CardSurface>(
    job: &ExportJob,
    surface: &mut S,
    progress: &Option<ProgressCallback>,
) -> CardpressResult<PathBuf> {
    let order = &job.order;
    if order.deck.is_empty() {
        return Err(CardpressError::export("order has an empty deck"));
    }

    let dims = print_dimensions(order.game);
    let total = order.deck.len() + 1;
    tracing::info!(
        order = %order.id,
        game = ?order.game,
        cards = order.deck.len(),
        width = dims.width,
        height = dims.height,
        "Starting deck export"
    );
    report(progress, 0, total, ExportStage::Preparing);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let mut skipped = 0usize;

    // Faces, in canonical deck order. One card at a time: the surface is
    // the single shared writer target.
    for (index, card) in order.deck.iter().enumerate() {
        let entry_name = face_entry_name(index, card);
        report(progress, index + 1, total, ExportStage::Rendering);

        let scene = SceneSpec::face(card.clone(), dims.width, dims.height, RenderMode::Print);
        match render_scene(surface, scene).await {
            Ok(bytes) => {
                zip.start_file(entry_name.as_str(), options)
                    .map_err(|e| CardpressError::export(format!("archive entry {entry_name}: {e}")))?;
                zip.write_all(&bytes)?;
                tracing::debug!(entry = %entry_name, size = bytes.len(), "Face captured");
            }
            Err(e) => {
                skipped += 1;
                tracing::error!(
                    card = %card.id,
                    entry = %entry_name,
                    error = %e,
                    "Card rasterization failed, skipping"
                );
            }
        }
    }

    // The shared back, rendered once. Any deck card works as context; only
    // its game kind matters.
    report(progress, total, total, ExportStage::Rendering);
    let back_scene = SceneSpec::back(
        order.back.clone(),
        order.deck[0].clone(),
        dims.width,
        dims.height,
        RenderMode::Print,
    );
    match render_scene(surface, back_scene).await {
        Ok(bytes) => {
            zip.start_file(BACK_ENTRY_NAME, options)
                .map_err(|e| CardpressError::export(format!("archive entry back: {e}")))?;
            zip.write_all(&bytes)?;
        }
        Err(e) => {
            skipped += 1;
            tracing::error!(error = %e, "Back rasterization failed, skipping");
        }
    }

    report(progress, total, total, ExportStage::Packaging);
    let archive = zip
        .finish()
        .map_err(|e| CardpressError::export(format!("finalizing archive: {e}")))?
        .into_inner();

    // Stage to a temp name, then rename: an aborted export must never
    // leave a partial archive at the final path.
    std::fs::create_dir_all(&job.output_dir)?;
    let final_path = job.output_dir.join(format!("{}.zip", order.archive_stem()));
    let temp_path = job.output_dir.join(format!("{}.zip.tmp", order.archive_stem()));
    std::fs::write(&temp_path, &archive)?;
    std::fs::rename(&temp_path, &final_path)?;

    write_export_report(job, total - skipped, skipped, &final_path);

    tracing::info!(
        archive = %final_path.display(),
        entries = total - skipped,
        skipped,
        size = archive.len(),
        "Export finished"
    );
    Ok(final_path)
}

/// Operator-facing summary next to the archive; a write failure only warns.
fn write_export_report(job: &ExportJob, entries: usize, skipped: usize, archive: &PathBuf) {
    let dims = print_dimensions(job.order.game);
    let report = serde_json::json!({
        "order": job.order.id,
        "archive": archive,
        "entries": entries,
        "skipped": skipped,
        "width_px": dims.width,
        "height_px": dims.height,
        "status": if skipped == 0 { "ok" } else { "warn" }
    });
    let report_path = archive.with_extension("report.json");
    match serde_json::to_string_pretty(&report) {
        Ok(body) => {
            if let Err(err) = std::fs::write(&report_path, body) {
                tracing::warn!(error = %err, path = %report_path.display(), "Failed to write export report");
            } else {
                tracing::info!(report = %report_path.display(), "Wrote export report");
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "Failed to serialize export report");
        }
    }
}

/// Render one scene to PNG bytes: present, wait for the surface to settle
/// (render pass done, every raster source loaded-or-errored), capture.
async fn render_scene<S: CardSurface>(
    surface: &mut S,
    scene: SceneSpec,
) -> CardpressResult<Vec<u8>> {
    surface.present(scene)?;
    surface.settled().await?;
    surface.capture()
}

fn report(progress: &Option<ProgressCallback>, current: usize, total: usize, stage: ExportStage) {
    if let Some(cb) = progress {
        cb(ExportProgress {
            current,
            total,
            stage,
        });
    }
}
