//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point through which every input reaches
//! the controller: user commands, debounce ticks, fetch completions, and
//! transfer completions. Events are processed one at a time and run to
//! completion; nothing here awaits.
//!
//! # Event Types
//!
//! - **Search**: `SearchInput`, `Tick`, `ClearSearch`, `SelectCategory`
//! - **Filters**: `OpenFilters`, `EditFilter`, `ApplyFilters`, `ResetFilters`,
//!   `ClearFilter`, `CloseFilters`
//! - **Pagination**: `Scrolled`, `LoadMore`
//! - **Detail**: `OpenImage`, `ImageLoaded`, `DownloadImage`, `ShareImage`,
//!   `CloseImage`, `DismissNotice`
//! - **Completions**: `FetchCompleted`, `TransferCompleted`
//!
//! # Example
//!
//! ```rust
//! use pixgrid::app::{handle_event, Action, AppState, Event};
//! use pixgrid::app::debounce::SEARCH_DEBOUNCE;
//!
//! let mut state = AppState::new(SEARCH_DEBOUNCE);
//! let (changed, actions) = handle_event(&mut state, &Event::Initialize)?;
//! assert!(changed);
//! assert!(matches!(actions[0], Action::Fetch(_)));
//! # Ok::<(), pixgrid::PixgridError>(())
//! ```

use crate::api::{FetchOutcome, FetchRequest, FetchTicket};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::FilterKey;
use crate::platform::{Notice, TransferIntent};
use std::time::Instant;

/// Events triggered by user input, timers, or completed background work.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Loads the first page.
    Initialize,

    /// Picks a category from the picker; the active one toggles off.
    SelectCategory(Option<String>),

    /// Text typed into the search input at `at`.
    ///
    /// Debounced: the search runs once input has been quiet for the window.
    SearchInput {
        text: String,
        at: Instant,
    },

    /// Timer wake-up; fires the debounced search if it is due.
    Tick {
        now: Instant,
    },

    /// The input's clear button: searches for empty text right away.
    ClearSearch,

    OpenFilters,

    /// Selects a value in the filter editor draft.
    EditFilter {
        key: FilterKey,
        value: String,
    },

    /// Closes the filter editor without applying.
    CloseFilters,

    ApplyFilters,
    ResetFilters,

    /// Removes one active filter chip.
    ClearFilter(FilterKey),

    /// Requests the next page directly.
    LoadMore,

    /// Scroll position report from the result grid.
    Scrolled {
        offset: f64,
        content_height: f64,
        viewport_height: f64,
    },

    /// A dispatched fetch finished.
    FetchCompleted {
        ticket: FetchTicket,
        outcome: FetchOutcome,
    },

    /// Opens the result at this 0-based position.
    OpenImage(usize),

    /// The detail image finished loading on the surface.
    ImageLoaded,

    CloseImage,
    DownloadImage,
    ShareImage,

    /// A download plus save or share finished.
    ///
    /// Carries the id of the request it completes.
    TransferCompleted {
        id: u64,
        intent: TransferIntent,
        notice: Option<Notice>,
    },

    DismissNotice,
    Quit,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns whether the view changed together with the actions, in order.
///
/// # Errors
///
/// Returns an error for commands that cannot apply to the current state, such
/// as an unknown filter value or opening an image that is not loaded. State is
/// left unchanged in that case.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Initialize => {
            let request = state.initialize();
            Ok((true, replace_actions(request)))
        }
        Event::SelectCategory(category) => {
            let request = state.set_category(category.as_deref());
            let mut actions = vec![Action::ClearSearchInput];
            actions.extend(replace_actions(request));
            Ok((true, actions))
        }
        Event::SearchInput { text, at } => {
            state.input_search(text, *at);
            Ok((true, vec![]))
        }
        Event::Tick { now } => {
            let Some(text) = state.search_debounce.poll(*now) else {
                return Ok((false, vec![]));
            };
            tracing::debug!(chars = text.chars().count(), "debounced search fired");
            Ok(run_search(state, &text, false))
        }
        Event::ClearSearch => {
            state.search_debounce.cancel();
            Ok(run_search(state, "", true))
        }
        Event::OpenFilters => {
            state.open_filters();
            Ok((true, vec![]))
        }
        Event::EditFilter { key, value } => {
            state.edit_filter(*key, value)?;
            Ok((true, vec![]))
        }
        Event::CloseFilters => {
            state.close_filters();
            Ok((true, vec![Action::CloseFilterPanel]))
        }
        Event::ApplyFilters => {
            let request = state.apply_filters();
            Ok((true, with_close_panel(request)))
        }
        Event::ResetFilters => {
            let request = state.reset_filters();
            Ok((true, with_close_panel(request)))
        }
        Event::ClearFilter(key) => {
            let request = state.clear_filter(*key);
            Ok((true, replace_actions(request)))
        }
        Event::LoadMore => {
            let request = state.load_more();
            Ok((true, vec![Action::Fetch(request)]))
        }
        Event::Scrolled {
            offset,
            content_height,
            viewport_height,
        } => {
            let request = state.on_scroll(*offset, *content_height, *viewport_height);
            Ok((request.is_some(), request.map(Action::Fetch).into_iter().collect()))
        }
        Event::FetchCompleted { ticket, outcome } => {
            let changed = state.complete_fetch(*ticket, outcome.clone());
            Ok((changed, vec![]))
        }
        Event::OpenImage(index) => {
            state.open_image(*index)?;
            Ok((true, vec![]))
        }
        Event::ImageLoaded => {
            state.image_loaded();
            Ok((true, vec![]))
        }
        Event::CloseImage => {
            state.close_image();
            Ok((true, vec![]))
        }
        Event::DownloadImage => Ok(start_transfer(state, TransferIntent::Save)),
        Event::ShareImage => Ok(start_transfer(state, TransferIntent::Share)),
        Event::TransferCompleted { id, intent, notice } => {
            tracing::debug!(id, intent = ?intent, has_notice = notice.is_some(), "transfer completed");
            let changed = state.transfer_completed(*id, notice.clone());
            Ok((changed, vec![]))
        }
        Event::DismissNotice => {
            state.dismiss_notice();
            Ok((true, vec![]))
        }
        Event::Quit => Ok((false, vec![Action::Quit])),
    }
}

/// Runs a text search. Empty text, explicit or debounced, also clears the input.
fn run_search(state: &mut AppState, text: &str, explicit: bool) -> (bool, Vec<Action>) {
    let request = if explicit { state.clear_search() } else { state.search(text) };

    let Some(request) = request else {
        return (true, vec![]);
    };

    let mut actions = Vec::new();
    if text.is_empty() {
        actions.push(Action::ClearSearchInput);
    }
    actions.extend(replace_actions(request));
    (true, actions)
}

fn start_transfer(state: &mut AppState, intent: TransferIntent) -> (bool, Vec<Action>) {
    state.request_transfer(intent).map_or_else(
        || (false, vec![]),
        |request| (true, vec![Action::Transfer(request)]),
    )
}

fn replace_actions(request: FetchRequest) -> Vec<Action> {
    vec![Action::Fetch(request), Action::ScrollToTop]
}

fn with_close_panel(request: Option<FetchRequest>) -> Vec<Action> {
    let mut actions = request.map(replace_actions).unwrap_or_default();
    actions.push(Action::CloseFilterPanel);
    actions
}

/// Short event label for spans; completions carry whole result pages.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Initialize => "Initialize",
        Event::SelectCategory(_) => "SelectCategory",
        Event::SearchInput { .. } => "SearchInput",
        Event::Tick { .. } => "Tick",
        Event::ClearSearch => "ClearSearch",
        Event::OpenFilters => "OpenFilters",
        Event::EditFilter { .. } => "EditFilter",
        Event::CloseFilters => "CloseFilters",
        Event::ApplyFilters => "ApplyFilters",
        Event::ResetFilters => "ResetFilters",
        Event::ClearFilter(_) => "ClearFilter",
        Event::LoadMore => "LoadMore",
        Event::Scrolled { .. } => "Scrolled",
        Event::FetchCompleted { .. } => "FetchCompleted",
        Event::OpenImage(_) => "OpenImage",
        Event::ImageLoaded => "ImageLoaded",
        Event::CloseImage => "CloseImage",
        Event::DownloadImage => "DownloadImage",
        Event::ShareImage => "ShareImage",
        Event::TransferCompleted { .. } => "TransferCompleted",
        Event::DismissNotice => "DismissNotice",
        Event::Quit => "Quit",
    }
}
