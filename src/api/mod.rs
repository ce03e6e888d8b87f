//! Image search API access.
//!
//! # Modules
//!
//! - [`params`]: Ordered request parameters and the URL formatter
//! - [`messages`]: Fetch tickets, requests, and outcomes
//! - [`fetcher`]: The [`SearchFetcher`] trait the runtime dispatches to
//! - [`client`]: `reqwest` implementation against the image API

pub mod client;
pub mod fetcher;
pub mod messages;
pub mod params;

pub use client::PixabayClient;
pub use fetcher::SearchFetcher;
pub use messages::{FetchOutcome, FetchRequest, FetchTicket, Merge};
pub use params::{Endpoint, QueryParams};
