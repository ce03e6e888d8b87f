//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold no
//! business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use pixgrid::app::AppState;
//! use pixgrid::app::debounce::SEARCH_DEBOUNCE;
//!
//! let state = AppState::new(SEARCH_DEBOUNCE);
//! let vm = state.compute_viewmodel(80);
//! assert_eq!(vm.grid.columns.len(), 2);
//! assert!(vm.empty_state.is_some());
//! ```

use crate::domain::{FilterKey, ImageHit};
use crate::platform::Notice;

/// Surface width (in columns) from which the grid uses three columns.
pub const THREE_COLUMN_WIDTH: usize = 100;
/// Surface width (in columns) from which the grid uses four columns.
pub const FOUR_COLUMN_WIDTH: usize = 160;

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub categories: Vec<CategoryChip>,

    /// Committed filters, one chip each, in the order they were set.
    pub filter_chips: Vec<FilterChip>,

    pub grid: GridInfo,

    /// Shown instead of the grid when there are no results.
    pub empty_state: Option<EmptyState>,

    /// Present while the filter editor is open.
    pub filter_panel: Option<FilterPanelInfo>,

    /// Present while an image is open.
    pub detail: Option<DetailInfo>,

    pub notice: Option<Notice>,
    pub footer: FooterInfo,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Command help text for the current view.
    pub keybindings: String,
}

/// Empty state message display information.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search input display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Text as typed, including input still waiting on the debounce.
    pub query: String,

    /// Whether the clear button is shown.
    pub show_clear: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChip {
    pub name: &'static str,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub key: FilterKey,
    pub value: String,
}

/// Filter editor with every selectable option per key.
#[derive(Debug, Clone)]
pub struct FilterPanelInfo {
    pub sections: Vec<FilterSection>,
}

#[derive(Debug, Clone)]
pub struct FilterSection {
    pub key: FilterKey,
    pub options: Vec<FilterOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: &'static str,
    /// Selected in the draft being edited.
    pub is_selected: bool,
}

/// Open image display information.
#[derive(Debug, Clone)]
pub struct DetailInfo {
    pub file_name: String,
    pub url: String,
    /// Fitted display width, in surface columns.
    pub width: usize,
    /// Fitted display height, in surface columns.
    pub height: usize,
    /// Empty when idle.
    pub status: &'static str,
    pub tags: String,
    pub user: String,
}

/// Masonry grid of result cells.
#[derive(Debug, Clone, Default)]
pub struct GridInfo {
    /// One list of cells per column, top to bottom.
    pub columns: Vec<Vec<GridCell>>,
}

/// One result in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// 1-based position in the result collection, as used by `open`.
    pub position: usize,
    pub label: String,
    /// Relative cell height derived from the image aspect ratio.
    pub height: usize,
}

/// Number of grid columns for a surface `width` columns wide.
///
/// # Example
///
/// ```rust
/// use pixgrid::ui::viewmodel::column_count;
///
/// assert_eq!(column_count(80), 2);
/// assert_eq!(column_count(120), 3);
/// assert_eq!(column_count(200), 4);
/// ```
#[must_use]
pub const fn column_count(width: usize) -> usize {
    if width >= FOUR_COLUMN_WIDTH {
        4
    } else if width >= THREE_COLUMN_WIDTH {
        3
    } else {
        2
    }
}

impl GridInfo {
    /// Lays out `hits` in `columns` columns of `column_width` cells.
    ///
    /// Each hit goes to the currently shortest column, so tall images do not
    /// leave one column far longer than the others. Ties go to the leftmost.
    #[must_use]
    pub fn masonry(hits: &[ImageHit], columns: usize, column_width: usize) -> Self {
        let columns = columns.max(1);
        let mut grid: Vec<Vec<GridCell>> = vec![Vec::new(); columns];
        let mut heights = vec![0usize; columns];

        for (index, hit) in hits.iter().enumerate() {
            let height = cell_height(hit, column_width);
            let target = heights
                .iter()
                .enumerate()
                .min_by_key(|(_, h)| **h)
                .map_or(0, |(i, _)| i);

            heights[target] += height;
            grid[target].push(GridCell {
                position: index + 1,
                label: cell_label(hit),
                height,
            });
        }

        Self { columns: grid }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Terminal cells are about twice as tall as they are wide.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn cell_height(hit: &ImageHit, column_width: usize) -> usize {
    let rows = (column_width as f64 / hit.aspect_ratio() / 2.0).round();
    (rows as usize).max(1)
}

fn cell_label(hit: &ImageHit) -> String {
    hit.tags
        .split(',')
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map_or_else(|| format!("#{}", hit.id), str::to_string)
}
