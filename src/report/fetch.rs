//! Photo fetching and decoding.
//!
//! The renderer awaits one fetch at a time; implementations only need
//! to turn a photo URL into a decoded bitmap. Failures are returned to
//! the renderer, which degrades that cell to a placeholder.

use crate::error::{Result, VisitReportError};
use crate::storage::ObjectStorage;
use visit_report_common::RgbBitmap;

#[allow(async_fn_in_trait)]
pub trait PhotoFetcher {
    async fn fetch(&self, url: &str) -> Result<RgbBitmap>;
}

/// Decode raw bytes into the canvas bitmap format.
pub fn decode_bitmap(bytes: &[u8]) -> Result<RgbBitmap> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| VisitReportError::ImageLoad(e.to_string()))?;
    let rgb = img.to_rgb8();
    Ok(RgbBitmap {
        width: rgb.width(),
        height: rgb.height(),
        data: rgb.into_raw(),
    })
}

/// Downloads photos over http(s).
pub struct HttpPhotoFetcher {
    client: reqwest::Client,
}

impl HttpPhotoFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpPhotoFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoFetcher for HttpPhotoFetcher {
    async fn fetch(&self, url: &str) -> Result<RgbBitmap> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| VisitReportError::PhotoFetch(format!("{}: {}", url, e)))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| VisitReportError::PhotoFetch(format!("{}: {}", url, e)))?;
        decode_bitmap(&bytes)
    }
}

/// Reads photos from an `ObjectStorage`, mapping the URL path to a key
/// (bucket-hosted photos keep their key as the URL path).
pub struct StoragePhotoFetcher<'a, S: ObjectStorage> {
    storage: &'a S,
}

impl<'a, S: ObjectStorage> StoragePhotoFetcher<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }
}

/// `https://host/a/b.jpg` -> `a/b.jpg`; URLs without a scheme pass
/// through as keys.
pub fn storage_key_for_url(url: &str) -> &str {
    let after_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => return url.trim_start_matches('/'),
    };
    match after_scheme.find('/') {
        Some(idx) => &after_scheme[idx + 1..],
        None => "",
    }
}

impl<'a, S: ObjectStorage> PhotoFetcher for StoragePhotoFetcher<'a, S> {
    async fn fetch(&self, url: &str) -> Result<RgbBitmap> {
        let key = storage_key_for_url(url);
        if key.is_empty() {
            return Err(VisitReportError::PhotoFetch(format!(
                "no storage key in URL: {}",
                url
            )));
        }
        let bytes = self.storage.get(key).await?;
        decode_bitmap(&bytes)
    }
}
