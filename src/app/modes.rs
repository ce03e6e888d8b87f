//! Presentation state enums for the filter panel and the image detail view.
//!
//! These types do not influence which requests are sent; they tell the
//! rendering surface what to show.

/// Visibility of the filter editor panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterPanel {
    /// Panel hidden; filter edits are not accepted.
    #[default]
    Closed,

    /// Panel shown; edits go to the draft until applied.
    Open,
}

/// Activity of the image detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailStatus {
    /// Image opened, waiting for the surface to report it loaded.
    #[default]
    Loading,

    /// Nothing in progress.
    Idle,

    /// Download then save to the library in progress.
    Downloading,

    /// Download then share in progress.
    Sharing,
}

impl DetailStatus {
    /// Whether a download or share is currently running.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        matches!(self, Self::Downloading | Self::Sharing)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Idle => "",
            Self::Downloading => "downloading",
            Self::Sharing => "sharing",
        }
    }
}
