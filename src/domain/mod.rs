//! Domain layer for pixgrid.
//!
//! This module contains the core domain types, independent of the HTTP client,
//! the terminal surface, or the platform services. It keeps the search vocabulary
//! (images, filters, categories) isolated from I/O concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Search result items and the response envelope
//! - [`filters`]: Filter keys and the single-select filter set
//! - [`catalog`]: Selectable categories and filter values

pub mod catalog;
pub mod error;
pub mod filters;
pub mod image;

pub use error::{PixgridError, Result};
pub use filters::{FilterKey, FilterSet};
pub use image::{ImageHit, SearchResponse};
