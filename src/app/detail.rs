//! Single-image detail view state.

use super::modes::DetailStatus;
use crate::domain::ImageHit;
use crate::infrastructure::paths::file_name_from_url;
use crate::platform::{TransferIntent, TransferRequest};

/// An image opened from the result grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDetail {
    pub hit: ImageHit,
    pub status: DetailStatus,
    /// Local file name, taken from the last segment of the preview URL.
    pub file_name: String,
    /// Id of the transfer started from this view, while it runs.
    pub transfer: Option<u64>,
}

impl ImageDetail {
    #[must_use]
    pub fn open(hit: ImageHit) -> Self {
        let file_name = file_name_from_url(&hit.preview_url).unwrap_or_default();
        Self {
            hit,
            status: DetailStatus::Loading,
            file_name,
            transfer: None,
        }
    }

    /// Fits the image into `max_width`.
    ///
    /// Landscape and square images take the full width. Portrait images are
    /// capped at `max_width` tall and their width shrinks by the aspect ratio.
    #[must_use]
    pub fn display_size(&self, max_width: f64) -> (f64, f64) {
        let aspect = self.hit.aspect_ratio();
        if self.hit.is_portrait() {
            (max_width * aspect, max_width)
        } else {
            (max_width, max_width / aspect)
        }
    }

    /// Starts transfer `id` for `intent` unless one is already running.
    pub fn begin_transfer(&mut self, intent: TransferIntent, id: u64) -> Option<TransferRequest> {
        if self.status.is_busy() {
            tracing::debug!(status = ?self.status, "transfer already in progress");
            return None;
        }

        self.status = match intent {
            TransferIntent::Save => DetailStatus::Downloading,
            TransferIntent::Share => DetailStatus::Sharing,
        };

        self.transfer = Some(id);
        Some(TransferRequest {
            id,
            url: self.hit.webformat_url.clone(),
            file_name: self.file_name.clone(),
            intent,
        })
    }

    /// Returns to idle if `id` is the transfer this view started.
    pub fn finish_transfer(&mut self, id: u64) -> bool {
        if self.transfer != Some(id) {
            return false;
        }
        self.transfer = None;
        self.status = DetailStatus::Idle;
        true
    }

    pub fn loaded(&mut self) {
        if self.status == DetailStatus::Loading {
            self.status = DetailStatus::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(width: u32, height: u32) -> ImageHit {
        ImageHit {
            id: 7,
            preview_url: "https://cdn.example/photo/2024/01/02/cat-123_150.jpg".to_string(),
            webformat_url: "https://cdn.example/get/cat-123_640.jpg".to_string(),
            large_image_url: String::new(),
            image_width: width,
            image_height: height,
            tags: String::new(),
            user: String::new(),
        }
    }

    #[test]
    fn file_name_comes_from_preview_url() {
        let detail = ImageDetail::open(hit(100, 100));
        assert_eq!(detail.file_name, "cat-123_150.jpg");
        assert_eq!(detail.status, DetailStatus::Loading);
    }

    #[test]
    fn landscape_fills_width() {
        let detail = ImageDetail::open(hit(1600, 800));
        assert_eq!(detail.display_size(400.0), (400.0, 200.0));
    }

    #[test]
    fn portrait_shrinks_width() {
        let detail = ImageDetail::open(hit(800, 1600));
        assert_eq!(detail.display_size(400.0), (200.0, 400.0));
    }

    #[test]
    fn transfer_uses_web_format_url_and_blocks_second_request() {
        let mut detail = ImageDetail::open(hit(10, 10));
        detail.loaded();

        let request = detail.begin_transfer(TransferIntent::Save, 1).unwrap();
        assert_eq!(request.id, 1);
        assert_eq!(request.url, "https://cdn.example/get/cat-123_640.jpg");
        assert_eq!(request.file_name, "cat-123_150.jpg");
        assert_eq!(detail.status, DetailStatus::Downloading);

        assert!(detail.begin_transfer(TransferIntent::Share, 2).is_none());

        assert!(!detail.finish_transfer(7));
        assert_eq!(detail.status, DetailStatus::Downloading);
        assert!(detail.finish_transfer(1));
        assert_eq!(detail.status, DetailStatus::Idle);
        assert!(detail.begin_transfer(TransferIntent::Share, 2).is_some());
        assert_eq!(detail.status, DetailStatus::Sharing);
    }
}
