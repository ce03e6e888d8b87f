//! Terminal presentation layer.
//!
//! The surface is line based: commands come in on stdin, and after every
//! change the whole view is printed again as plain text.
//!
//! ```text
//! stdin line → parse_command → Event ─┐
//!                                     ▼
//! AppState → compute_viewmodel → UIViewModel → render → stdout
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready data computed from application state
//! - [`renderer`]: Plain-text layout of the view model
//! - [`input`]: Command parsing

pub mod input;
pub mod renderer;
pub mod viewmodel;

pub use input::{parse_command, Command, HELP};
pub use renderer::{render, render_viewmodel};
pub use viewmodel::{
    column_count, CategoryChip, DetailInfo, EmptyState, FilterChip, FilterPanelInfo, FooterInfo, GridInfo,
    HeaderInfo, SearchBarInfo, UIViewModel,
};
