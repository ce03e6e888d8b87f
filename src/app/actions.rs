//! Actions representing side effects to be executed by the runtime.
//!
//! The event handler returns a `Vec<Action>` after processing each event. The
//! runtime driver executes fetches and transfers itself and passes the
//! remaining surface actions on to the rendering layer.
//!
//! # Example
//!
//! ```rust
//! use pixgrid::app::{Action, AppState};
//! use pixgrid::app::debounce::SEARCH_DEBOUNCE;
//!
//! let mut state = AppState::new(SEARCH_DEBOUNCE);
//! let request = state.initialize();
//! let actions = vec![Action::Fetch(request), Action::ScrollToTop];
//! assert!(actions[0].is_fetch());
//! ```

use crate::api::FetchRequest;
use crate::platform::TransferRequest;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Sends a search request to the fetcher.
    ///
    /// The completion comes back as `Event::FetchCompleted` carrying the same
    /// ticket.
    Fetch(FetchRequest),

    /// Empties the text input control on the rendering surface.
    ClearSearchInput,

    /// Scrolls the result grid back to the first row.
    ///
    /// Emitted after every transition that replaces the result collection.
    ScrollToTop,

    /// Hides the filter editor.
    CloseFilterPanel,

    /// Downloads the open image, then saves or shares it.
    Transfer(TransferRequest),

    /// Stops the runtime.
    Quit,
}

impl Action {
    #[must_use]
    pub const fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }
}
