//! Raster-source loading: template CDN fetches and data-URI decoding.
//!
//! Every load resolves to loaded-or-errored; nothing is left in flight.
//! A failed CDN fetch is retried once with the path lowercased and a retry
//! marker appended (the production asset server is case-normalized), then
//! degrades to [`FetchOutcome::Failed`] so the compositor can fall back to
//! a placeholder instead of aborting the render.

use std::time::Duration;

use base64::Engine;
use image::RgbaImage;

use cardpress_common::error::{CardpressError, CardpressResult};

/// Result of resolving one raster source.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Loaded(RgbaImage),
    Failed,
}

impl FetchOutcome {
    pub fn into_image(self) -> Option<RgbaImage> {
        match self {
            FetchOutcome::Loaded(img) => Some(img),
            FetchOutcome::Failed => None,
        }
    }
}

/// HTTP timeout for a single asset request.
const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// Loads template images from the asset server and decodes user photos.
#[derive(Debug, Clone)]
pub struct AssetFetcher {
    client: reqwest::Client,
}

impl AssetFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Resolve a raster source to pixels. Never returns an error: failures
    /// are reported as [`FetchOutcome::Failed`] after the retry is spent.
    pub async fn load(&self, source: &str) -> FetchOutcome {
        if source.starts_with("data:") {
            return match decode_data_uri(source) {
                Ok(img) => FetchOutcome::Loaded(img),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to decode data URI");
                    FetchOutcome::Failed
                }
            };
        }

        match self.fetch_remote(source).await {
            Ok(img) => FetchOutcome::Loaded(img),
            Err(first) => {
                let retry_url = retry_url(source);
                tracing::warn!(
                    url = source,
                    error = %first,
                    "Asset fetch failed, retrying lowercased"
                );
                match self.fetch_remote(&retry_url).await {
                    Ok(img) => FetchOutcome::Loaded(img),
                    Err(second) => {
                        tracing::warn!(
                            url = %retry_url,
                            error = %second,
                            "Asset fetch failed after retry, using placeholder"
                        );
                        FetchOutcome::Failed
                    }
                }
            }
        }
    }

    async fn fetch_remote(&self, url: &str) -> CardpressResult<RgbaImage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CardpressError::assets(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CardpressError::assets(format!("GET {url}: HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| CardpressError::assets(format!("reading {url}: {e}")))?;

        let img = image::load_from_memory(&bytes)
            .map_err(|e| CardpressError::assets(format!("decoding {url}: {e}")))?;
        Ok(img.to_rgba8())
    }
}

impl Default for AssetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Lowercased retry address with a marker so the CDN can distinguish
/// first attempts from retries in its logs.
fn retry_url(url: &str) -> String {
    format!("{}?retry=1", url.to_ascii_lowercase())
}

/// Decode a `data:image/...;base64,` URI into pixels.
fn decode_data_uri(uri: &str) -> CardpressResult<RgbaImage> {
    let payload = uri
        .split_once(";base64,")
        .map(|(_, data)| data)
        .ok_or_else(|| CardpressError::assets("data URI is not base64-encoded"))?;

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| CardpressError::assets(format!("invalid base64 payload: {e}")))?;

    let img = image::load_from_memory(&bytes)
        .map_err(|e| CardpressError::assets(format!("decoding data URI: {e}")))?;
    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn tiny_png_data_uri() -> String {
        let img = RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        let encoded = base64::engine::general_purpose::STANDARD.encode(buf.into_inner());
        format!("data:image/png;base64,{encoded}")
    }

    #[test]
    fn test_decode_data_uri_round_trip() {
        let uri = tiny_png_data_uri();
        let img = decode_data_uri(&uri).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(0, 0).0, [10, 20, 30, 255]);
    }

    #[test]
    fn test_decode_data_uri_rejects_non_base64() {
        assert!(decode_data_uri("data:image/svg+xml,<svg/>").is_err());
    }

    #[test]
    fn test_retry_url_lowercases_and_marks() {
        assert_eq!(
            retry_url("https://cdn.example.com/karty/M1H/RUB/m1h_v1_00_kule_7.png"),
            "https://cdn.example.com/karty/m1h/rub/m1h_v1_00_kule_7.png?retry=1"
        );
    }

    #[tokio::test]
    async fn test_load_reports_failure_for_unreachable_host() {
        let fetcher = AssetFetcher::new();
        let outcome = fetcher
            .load("http://127.0.0.1:9/karty/M1H/RUB/m1h_v1_00_kule_7.png")
            .await;
        assert!(matches!(outcome, FetchOutcome::Failed));
    }
}
