//! The search fetcher seam.
//!
//! The controller never talks HTTP directly. The runtime hands each
//! [`FetchRequest`](super::FetchRequest) to a [`SearchFetcher`], which is the
//! reqwest-backed [`PixabayClient`](super::PixabayClient) in the binary and a
//! scripted fake in tests.

use super::messages::FetchOutcome;
use super::params::QueryParams;
use async_trait::async_trait;

/// Given request parameters, returns a page of results or a failure message.
///
/// Implementations must not panic and must not return errors through any other
/// channel; a failure is a value.
#[async_trait]
pub trait SearchFetcher: Send + Sync {
    async fn fetch(&self, params: &QueryParams) -> FetchOutcome;
}
