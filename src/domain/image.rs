//! Image search result model.
//!
//! This module defines [`ImageHit`], one item of a result page, and
//! [`SearchResponse`], the envelope the image API returns for a search request.
//! Field names follow the API's JSON (`previewURL`, `imageWidth`, ...), mapped onto
//! snake_case Rust fields with explicit serde renames.

use serde::{Deserialize, Serialize};

/// One image returned by the search API.
///
/// Only the URLs and the original pixel dimensions are required; everything else
/// is informational and defaults when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageHit {
    #[serde(default)]
    pub id: u64,

    /// Small thumbnail, also the source of the local file name on download.
    #[serde(rename = "previewURL")]
    pub preview_url: String,

    /// Medium size image shown in the grid and the detail view.
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,

    /// Full resolution image.
    #[serde(rename = "largeImageURL", default)]
    pub large_image_url: String,

    #[serde(rename = "imageWidth")]
    pub image_width: u32,

    #[serde(rename = "imageHeight")]
    pub image_height: u32,

    /// Comma-separated tag list.
    #[serde(default)]
    pub tags: String,

    /// Uploader's display name.
    #[serde(default)]
    pub user: String,
}

impl ImageHit {
    /// Width divided by height, or `1.0` for degenerate dimensions.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        if self.image_width == 0 || self.image_height == 0 {
            return 1.0;
        }
        f64::from(self.image_width) / f64::from(self.image_height)
    }

    /// Whether the image is taller than it is wide.
    #[must_use]
    pub fn is_portrait(&self) -> bool {
        self.aspect_ratio() < 1.0
    }
}

/// Response envelope of a search request.
///
/// A response without a `hits` array is treated as a failed fetch by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,

    #[serde(rename = "totalHits", default)]
    pub total_hits: u64,

    pub hits: Option<Vec<ImageHit>>,
}
