//! Image download for the URL analysis path.

use std::time::Duration;

use image::RgbImage;
use reqwest::Client;
use tracing::debug;

use deepguard_core::ResourceError;

/// Fixed timeout for the whole fetch; a timed-out download retains nothing.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Browser-like User-Agent; some hosts refuse obviously non-browser clients.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Downloads and decodes images referenced by URL.
#[derive(Debug, Clone, Default)]
pub struct ImageFetcher {
    client: Client,
}

impl ImageFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Fetch `url` and decode the body to RGB8.
    ///
    /// The declared Content-Type is checked before any decode attempt; a
    /// non-image response is rejected outright.
    pub async fn fetch_image(&self, url: &str) -> Result<RgbImage, ResourceError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .timeout(FETCH_TIMEOUT)
            .send()
            .await
            .map_err(|e| ResourceError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResourceError::DownloadFailed {
                url: url.to_string(),
                reason: format!("HTTP status {status}"),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("image") {
            return Err(ResourceError::NotAnImage { content_type });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ResourceError::DownloadFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        debug!(url, bytes = bytes.len(), %content_type, "downloaded image");

        decode_rgb(&bytes)
    }
}

/// Decode arbitrary image bytes to RGB8.
pub fn decode_rgb(bytes: &[u8]) -> Result<RgbImage, ResourceError> {
    image::load_from_memory(bytes)
        .map(|img| img.to_rgb8())
        .map_err(|e| ResourceError::DecodeFailed {
            reason: e.to_string(),
        })
}

/// Re-encode a decoded image as JPEG for spooling.
pub fn encode_jpeg(image: &RgbImage) -> Result<Vec<u8>, ResourceError> {
    let mut buf = std::io::Cursor::new(Vec::new());
    image
        .write_to(&mut buf, image::ImageFormat::Jpeg)
        .map_err(|e| ResourceError::EncodeFailed {
            reason: e.to_string(),
        })?;
    Ok(buf.into_inner())
}
