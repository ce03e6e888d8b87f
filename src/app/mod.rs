//! Application layer coordinating state, events, and actions.
//!
//! The application layer follows a unidirectional data flow:
//!
//! ```text
//! Surface Input → Events → Event Handler → State Mutations → Actions → Runtime
//!                               ↑                                        ↓
//!                               └──── Fetch / Transfer Completions ──────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`debounce`]: Rearming debounce timer for search input
//! - [`detail`]: Single-image detail view state
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modes`]: Filter panel and detail status enums
//! - [`state`]: Query state controller and view model computation
//!
//! # Example
//!
//! ```rust
//! use pixgrid::app::{handle_event, AppState, Event};
//! use pixgrid::app::debounce::SEARCH_DEBOUNCE;
//!
//! let mut state = AppState::new(SEARCH_DEBOUNCE);
//! let (_, actions) = handle_event(&mut state, &Event::Initialize)?;
//! assert_eq!(state.page, 1);
//! assert!(actions[0].is_fetch());
//! # Ok::<(), pixgrid::PixgridError>(())
//! ```

pub mod actions;
pub mod debounce;
pub mod detail;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use debounce::Debouncer;
pub use detail::ImageDetail;
pub use handler::{handle_event, Event};
pub use modes::{DetailStatus, FilterPanel};
pub use state::AppState;
