//! Fetch request and completion types exchanged with the search fetcher.
//!
//! Every dispatched fetch carries a [`FetchTicket`] naming the session and page
//! it was issued for. The completion comes back with the same ticket so the
//! controller can discard results that belong to a session it has already left.

use super::params::QueryParams;
use crate::domain::ImageHit;

/// How a fetched page is merged into the current results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// Install the page as the entire result set.
    Replace,
    /// Add the page to the end of the result set.
    Append,
}

/// Identity of one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// Session the fetch was issued in; bumped on every replace transition.
    pub session: u64,
    /// Page number requested.
    pub page: u32,
    pub merge: Merge,
}

/// A fetch the controller wants dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub ticket: FetchTicket,
    pub params: QueryParams,
}

/// Result of one fetch. Failures carry a message and never panic or propagate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(Vec<ImageHit>),
    Failure(String),
}

impl FetchOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
