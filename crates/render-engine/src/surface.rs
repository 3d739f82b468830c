//! The off-screen render surface the export pipeline drives.
//!
//! A surface holds exactly one scene at a time: presenting a new scene
//! replaces the previous one, so two cards can never render concurrently
//! into the same surface. The contract is present -> settled -> capture;
//! `settled` resolves only after the settle delay has elapsed *and* every
//! raster source the scene embeds reports loaded-or-errored. Capturing
//! before that point is a state error, which is what structurally prevents
//! rasterizing half-loaded scenes.

use std::io::Cursor;
use std::time::{Duration, Instant};

use image::RgbaImage;
use tokio::task::JoinHandle;

use cardpress_common::error::{CardpressError, CardpressResult};

use crate::compositor::{compose, SceneSources, SceneSpec};
use crate::fetcher::{AssetFetcher, FetchOutcome};

/// Fixed delay after presenting a scene before it may settle, giving the
/// render pass time to complete.
pub const SETTLE_DELAY: Duration = Duration::from_millis(600);

/// Render target abstraction; the export pipeline is generic over it so
/// tests can substitute an instrumented double.
#[allow(async_fn_in_trait)]
pub trait CardSurface {
    /// Begin rendering a scene. Kicks off the scene's raster-source loads;
    /// replaces whatever scene was presented before.
    fn present(&mut self, scene: SceneSpec) -> CardpressResult<()>;

    /// Resolve once the presented scene has finished a render pass and all
    /// of its raster sources are loaded-or-errored.
    async fn settled(&mut self) -> CardpressResult<()>;

    /// Rasterize the settled scene to PNG bytes.
    fn capture(&mut self) -> CardpressResult<Vec<u8>>;
}

enum SurfaceState {
    Idle,
    Presented {
        spec: SceneSpec,
        presented_at: Instant,
        template: Option<JoinHandle<FetchOutcome>>,
        user: Option<JoinHandle<FetchOutcome>>,
    },
    Settled {
        spec: SceneSpec,
        sources: SceneSources,
    },
}

/// Production surface: fetches raster sources concurrently, composites
/// with the card compositor, and encodes PNG at the scene dimensions.
///
/// Must run inside a tokio runtime (source loads are spawned tasks).
pub struct RasterSurface {
    fetcher: AssetFetcher,
    settle_delay: Duration,
    state: SurfaceState,
}

impl RasterSurface {
    pub fn new() -> Self {
        Self::with_settle_delay(AssetFetcher::new(), SETTLE_DELAY)
    }

    pub fn with_settle_delay(fetcher: AssetFetcher, settle_delay: Duration) -> Self {
        Self {
            fetcher,
            settle_delay,
            state: SurfaceState::Idle,
        }
    }
}

impl Default for RasterSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CardSurface for RasterSurface {
    fn present(&mut self, scene: SceneSpec) -> CardpressResult<()> {
        let refs = scene.source_refs();
        let template = refs.template.map(|src| spawn_load(&self.fetcher, src));
        let user = refs.user.map(|src| spawn_load(&self.fetcher, src));

        self.state = SurfaceState::Presented {
            spec: scene,
            presented_at: Instant::now(),
            template,
            user,
        };
        Ok(())
    }

    async fn settled(&mut self) -> CardpressResult<()> {
        match std::mem::replace(&mut self.state, SurfaceState::Idle) {
            SurfaceState::Presented {
                spec,
                presented_at,
                template,
                user,
            } => {
                let elapsed = presented_at.elapsed();
                if elapsed < self.settle_delay {
                    tokio::time::sleep(self.settle_delay - elapsed).await;
                }

                let sources = SceneSources {
                    template: resolve_load(template).await,
                    user: resolve_load(user).await,
                };
                self.state = SurfaceState::Settled { spec, sources };
                Ok(())
            }
            other => {
                self.state = other;
                Err(CardpressError::render(
                    "settled() called without a presented scene",
                ))
            }
        }
    }

    fn capture(&mut self) -> CardpressResult<Vec<u8>> {
        let SurfaceState::Settled { spec, sources } = &self.state else {
            return Err(CardpressError::render(
                "capture() called before the scene settled",
            ));
        };

        let raster = compose(spec, sources);
        encode_png(&raster)
    }
}

fn spawn_load(fetcher: &AssetFetcher, source: String) -> JoinHandle<FetchOutcome> {
    let fetcher = fetcher.clone();
    tokio::spawn(async move { fetcher.load(&source).await })
}

async fn resolve_load(handle: Option<JoinHandle<FetchOutcome>>) -> Option<RgbaImage> {
    let handle = handle?;
    match handle.await {
        Ok(outcome) => outcome.into_image(),
        Err(e) => {
            tracing::warn!(error = %e, "Raster-source load task failed");
            None
        }
    }
}

fn encode_png(raster: &RgbaImage) -> CardpressResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    raster
        .write_to(&mut buf, image::ImageFormat::Png)
        .map_err(|e| CardpressError::render(format!("PNG encoding failed: {e}")))?;
    Ok(buf.into_inner())
}
