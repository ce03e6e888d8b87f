//! Platform services facade for downloading, saving, and sharing images.
//!
//! The image detail view never touches the filesystem or network itself. It
//! emits a [`TransferRequest`]; the runtime hands that to [`run_transfer`] with
//! whatever [`PlatformServices`] implementation it was built with, and the
//! resulting [`Notice`] comes back as an event.
//!
//! # Modules
//!
//! - [`local`]: Filesystem-backed implementation used by the terminal binary

pub mod local;

pub use local::LocalPlatform;

use crate::domain::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// What to do with an image once it has been downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferIntent {
    /// Save into the media library.
    Save,
    /// Hand the local file to the share target.
    Share,
}

/// A download followed by a save or share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Echoed back with the completion so a finished transfer can be matched
    /// to the one the controller is waiting on.
    pub id: u64,
    pub url: String,
    pub file_name: String,
    pub intent: TransferIntent,
}

/// User-visible feedback from a platform operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Short transient confirmation.
    Toast(String),

    /// Blocking message the user must dismiss.
    Alert {
        title: String,
        message: String,
    },
}

impl Notice {
    #[must_use]
    pub fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Alert {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Host capabilities for file download, media library, and sharing.
///
/// Each operation fails independently. Nothing retries automatically; the user
/// repeats the command.
#[async_trait]
pub trait PlatformServices: Send + Sync {
    /// Downloads `url` to a local file named `file_name` and returns its path.
    async fn download(&self, url: &str, file_name: &str) -> Result<PathBuf>;

    /// Saves a downloaded file into the media library.
    async fn save(&self, path: &Path) -> Result<()>;

    /// Shares a downloaded file.
    async fn share(&self, path: &Path) -> Result<()>;
}

pub const DOWNLOADED_TOAST: &str = "Image Downloaded";
pub const DOWNLOAD_ALERT_TITLE: &str = "Image";
pub const SAVE_ALERT_TITLE: &str = "Error";
pub const SAVE_ALERT_MESSAGE: &str = "Failed to save image to gallery";
pub const SHARE_ALERT_TITLE: &str = "Share";

/// Runs one download followed by a save or share and returns the notice to show.
///
/// A successful share produces no notice; every failure produces an alert.
pub async fn run_transfer(platform: &dyn PlatformServices, request: &TransferRequest) -> Option<Notice> {
    let path = match platform.download(&request.url, &request.file_name).await {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!(url = %request.url, error = %e, "image download failed");
            return Some(Notice::alert(DOWNLOAD_ALERT_TITLE, e.to_string()));
        }
    };

    tracing::debug!(path = %path.display(), intent = ?request.intent, "image downloaded");

    match request.intent {
        TransferIntent::Save => match platform.save(&path).await {
            Ok(()) => Some(Notice::Toast(DOWNLOADED_TOAST.to_string())),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "saving image to library failed");
                Some(Notice::alert(SAVE_ALERT_TITLE, SAVE_ALERT_MESSAGE))
            }
        },
        TransferIntent::Share => match platform.share(&path).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "sharing image failed");
                Some(Notice::alert(SHARE_ALERT_TITLE, e.to_string()))
            }
        },
    }
}
