//! Query state controller and view model computation.
//!
//! [`AppState`] owns every piece of search state: the free text, the active
//! category, the committed filters, the page counter, and the result collection.
//! Each operation mutates that state and returns the [`FetchRequest`] to
//! dispatch, if any. The event handler turns those into actions.
//!
//! # Sessions
//!
//! A session runs from one replace transition (category change, text search,
//! filter apply/reset/clear, initial load) to the next. Starting a session bumps
//! the session id, resets `page` to 1, and empties the results. Every fetch is
//! tagged with the session id and page it was issued for, and
//! [`complete_fetch`](AppState::complete_fetch) discards completions from a
//! session that has already ended.
//!
//! Within a session pages are applied strictly in order. A page that arrives
//! early waits in a buffer until the pages before it have been applied or have
//! failed. A failed page releases its slot without touching the results, and
//! the page counter is never rolled back.
//!
//! # Example
//!
//! ```rust
//! use pixgrid::api::FetchOutcome;
//! use pixgrid::app::AppState;
//! use pixgrid::app::debounce::SEARCH_DEBOUNCE;
//!
//! let mut state = AppState::new(SEARCH_DEBOUNCE);
//! let first = state.initialize();
//! assert_eq!(first.params.page(), Some(1));
//!
//! state.complete_fetch(first.ticket, FetchOutcome::Success(vec![]));
//! let nature = state.set_category(Some("nature"));
//! assert_eq!(nature.params.get("category"), Some("nature"));
//! ```

use super::debounce::Debouncer;
use super::detail::ImageDetail;
use super::modes::FilterPanel;
use crate::api::{FetchOutcome, FetchRequest, FetchTicket, Merge, QueryParams};
use crate::domain::error::{PixgridError, Result};
use crate::domain::{catalog, FilterKey, FilterSet, ImageHit};
use crate::platform::{Notice, TransferIntent, TransferRequest};
use crate::ui::viewmodel::{
    column_count, CategoryChip, DetailInfo, EmptyState, FilterChip, FilterOption, FilterPanelInfo,
    FilterSection, FooterInfo, GridInfo, HeaderInfo, SearchBarInfo, UIViewModel,
};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Shortest search text, in characters, that is sent to the API.
pub const MIN_QUERY_CHARS: usize = 3;

/// Distance from the bottom, in scroll units, that still counts as the bottom.
pub const BOTTOM_TOLERANCE: f64 = 1.0;

/// A completed page waiting for the pages before it.
type Completion = (Merge, Option<Vec<ImageHit>>);

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// 1-based page of the most recently dispatched fetch in this session.
    pub page: u32,

    /// Search text the current query was built from.
    ///
    /// Set by the debounced search, including 1 and 2 character values that are
    /// never sent on their own but do ride along with later filter or
    /// pagination requests.
    pub search_text: String,

    /// Text as typed into the input, ahead of the debounce.
    pub search_input: String,

    pub active_category: Option<String>,

    /// Committed filters. `None` means no filter criterion is active.
    pub filters: Option<FilterSet>,

    /// The result collection, in display order.
    pub results: Vec<ImageHit>,

    /// Id of the current session; bumped on every replace transition.
    pub session: u64,

    /// Set once the bottom has triggered a load, cleared when the user scrolls
    /// away from the bottom or a page is applied.
    pub end_reached: bool,

    pub filter_panel: FilterPanel,

    /// Filter edits not yet applied.
    pub filter_draft: Option<FilterSet>,

    pub search_debounce: Debouncer<String>,

    pub detail: Option<ImageDetail>,

    pub notice: Option<Notice>,

    /// Id of the download/share currently running. Outlives the detail view
    /// it was started from.
    pub active_transfer: Option<u64>,

    pending: BTreeMap<u32, Completion>,
    applied_through: u32,
    transfer_seq: u64,
}

impl AppState {
    /// Creates an empty controller whose text search waits `debounce` for quiet input.
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            page: 1,
            search_text: String::new(),
            search_input: String::new(),
            active_category: None,
            filters: None,
            results: Vec::new(),
            session: 0,
            end_reached: false,
            filter_panel: FilterPanel::Closed,
            filter_draft: None,
            search_debounce: Debouncer::new(debounce),
            detail: None,
            notice: None,
            active_transfer: None,
            pending: BTreeMap::new(),
            applied_through: 0,
            transfer_seq: 0,
        }
    }

    /// Starts the first session and fetches page 1 with no criteria.
    pub fn initialize(&mut self) -> FetchRequest {
        self.begin_session();
        self.dispatch(Merge::Replace, QueryParams::build(1, None, None, None))
    }

    /// Selects a category, or deselects it when it is already active.
    ///
    /// Clears the search text and any pending debounced input, then replaces
    /// the results with page 1 of the new criteria.
    pub fn set_category(&mut self, category: Option<&str>) -> FetchRequest {
        let category = category.filter(|c| self.active_category.as_deref() != Some(*c));

        tracing::debug!(
            previous = ?self.active_category,
            next = ?category,
            "changing category"
        );

        self.active_category = category.map(str::to_string);
        self.search_text.clear();
        self.search_input.clear();
        self.search_debounce.cancel();

        self.begin_session();
        self.dispatch_current(Merge::Replace)
    }

    /// Records typed text and rearms the search debounce.
    pub fn input_search(&mut self, text: &str, now: Instant) {
        self.search_input = text.to_string();
        self.search_debounce.push(text.to_string(), now);
    }

    /// Runs a text search.
    ///
    /// - More than two characters: clears the category and replaces the results
    ///   with page 1 for the text.
    /// - Empty: clears the category and the input, and replaces the results with
    ///   page 1 without text.
    /// - One or two characters: records the text and fetches nothing.
    pub fn search(&mut self, text: &str) -> Option<FetchRequest> {
        let chars = text.chars().count();

        if chars > 0 && chars < MIN_QUERY_CHARS {
            tracing::debug!(chars, "search text too short, not fetching");
            self.search_text = text.to_string();
            return None;
        }

        if chars == 0 {
            self.search_input.clear();
        }
        self.search_text = text.to_string();
        self.active_category = None;

        self.begin_session();
        Some(self.dispatch_current(Merge::Replace))
    }

    /// Runs the search immediately with empty text, dropping pending input.
    pub fn clear_search(&mut self) -> Option<FetchRequest> {
        self.search_debounce.cancel();
        self.search("")
    }

    /// Opens the filter editor with a draft seeded from the committed filters.
    pub fn open_filters(&mut self) {
        self.filter_panel = FilterPanel::Open;
        self.filter_draft = self.filters.clone();
    }

    /// Closes the filter editor and discards unapplied edits.
    pub fn close_filters(&mut self) {
        self.filter_panel = FilterPanel::Closed;
        self.filter_draft = None;
    }

    /// Selects `value` for `key` in the draft.
    ///
    /// Edits never fetch; they take effect on [`apply_filters`](Self::apply_filters).
    ///
    /// # Errors
    ///
    /// Returns an error if the filter editor is closed or `value` is not a
    /// selectable option for `key`.
    pub fn edit_filter(&mut self, key: FilterKey, value: &str) -> Result<()> {
        if self.filter_panel == FilterPanel::Closed {
            return Err(PixgridError::Command("filter editor is not open".to_string()));
        }

        let value = catalog::find_option(key, value).ok_or_else(|| {
            PixgridError::Command(format!(
                "'{value}' is not a {key} option (expected one of: {})",
                catalog::options(key).join(", ")
            ))
        })?;

        self.filter_draft.get_or_insert_with(FilterSet::new).set(key, value);
        Ok(())
    }

    /// Commits the draft (or the committed filters when nothing was edited).
    ///
    /// No fetch when there is nothing to apply. Always closes the filter editor.
    pub fn apply_filters(&mut self) -> Option<FetchRequest> {
        self.filter_panel = FilterPanel::Closed;

        let candidate = self.filter_draft.take().or_else(|| self.filters.clone());
        let filters = candidate.filter(|f| !f.is_empty())?;

        tracing::debug!(filter_count = filters.len(), "applying filters");
        self.filters = Some(filters);
        self.begin_session();
        Some(self.dispatch_current(Merge::Replace))
    }

    /// Drops every filter.
    ///
    /// No fetch when no filters are committed. Always closes the filter editor.
    pub fn reset_filters(&mut self) -> Option<FetchRequest> {
        self.filter_panel = FilterPanel::Closed;
        self.filter_draft = None;

        self.filters.take()?;

        tracing::debug!("filters reset");
        self.begin_session();
        Some(self.dispatch_current(Merge::Replace))
    }

    /// Deactivates one filter; the others survive.
    pub fn clear_filter(&mut self, key: FilterKey) -> FetchRequest {
        if let Some(draft) = self.filter_draft.as_mut() {
            draft.remove(key);
        }
        if let Some(filters) = self.filters.as_mut() {
            filters.remove(key);
        }
        if self.filters.as_ref().is_some_and(FilterSet::is_empty) {
            self.filters = None;
        }

        tracing::debug!(key = %key, "filter cleared");
        self.begin_session();
        self.dispatch_current(Merge::Replace)
    }

    /// Requests the next page of the current session.
    ///
    /// The page counter moves on dispatch and is not rolled back if the fetch
    /// fails.
    pub fn load_more(&mut self) -> FetchRequest {
        self.page += 1;
        tracing::debug!(page = self.page, session = self.session, "loading next page");
        self.dispatch_current(Merge::Append)
    }

    /// Handles a scroll position report from the surface.
    ///
    /// Reaching the bottom loads the next page once; scrolling away re-arms it.
    /// Nothing loads while the collection is empty.
    pub fn on_scroll(&mut self, offset: f64, content_height: f64, viewport_height: f64) -> Option<FetchRequest> {
        let bottom = content_height - viewport_height;

        if offset >= bottom - BOTTOM_TOLERANCE {
            if self.end_reached || self.results.is_empty() {
                return None;
            }
            self.end_reached = true;
            return Some(self.load_more());
        }

        if self.end_reached {
            self.end_reached = false;
        }
        None
    }

    /// Applies a fetch completion. Returns whether the results changed.
    ///
    /// Completions from an earlier session, or for a page already applied, are
    /// dropped.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, outcome: FetchOutcome) -> bool {
        let _span = tracing::debug_span!(
            "complete_fetch",
            session = ticket.session,
            page = ticket.page,
            current_session = self.session
        )
        .entered();

        if ticket.session != self.session {
            tracing::debug!("discarding completion from a previous session");
            return false;
        }
        if ticket.page <= self.applied_through || self.pending.contains_key(&ticket.page) {
            tracing::debug!("discarding duplicate completion");
            return false;
        }

        let items = match outcome {
            FetchOutcome::Success(items) => Some(items),
            FetchOutcome::Failure(message) => {
                tracing::warn!(%message, "fetch failed, keeping current results");
                None
            }
        };
        self.pending.insert(ticket.page, (ticket.merge, items));

        let mut changed = false;
        while let Some((merge, items)) = self.pending.remove(&(self.applied_through + 1)) {
            self.applied_through += 1;
            let Some(items) = items else { continue };

            match merge {
                Merge::Replace => self.results = items,
                Merge::Append => self.results.extend(items),
            }
            changed = true;
        }

        if changed {
            self.end_reached = false;
            tracing::debug!(result_count = self.results.len(), "results updated");
        }
        changed
    }

    /// Opens the result at 0-based `index` in the detail view.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no result at `index`.
    pub fn open_image(&mut self, index: usize) -> Result<()> {
        let hit = self.results.get(index).cloned().ok_or_else(|| {
            PixgridError::Command(format!(
                "no image at position {} ({} loaded)",
                index + 1,
                self.results.len()
            ))
        })?;

        self.detail = Some(ImageDetail::open(hit));
        self.notice = None;
        Ok(())
    }

    pub fn close_image(&mut self) {
        self.detail = None;
    }

    pub fn image_loaded(&mut self) {
        if let Some(detail) = self.detail.as_mut() {
            detail.loaded();
        }
    }

    /// Starts a download of the open image for `intent`.
    ///
    /// Only one transfer runs at a time, whichever image it was started from.
    pub fn request_transfer(&mut self, intent: TransferIntent) -> Option<TransferRequest> {
        if let Some(active) = self.active_transfer {
            tracing::debug!(active, "transfer already in progress");
            return None;
        }

        let id = self.transfer_seq + 1;
        let request = self.detail.as_mut()?.begin_transfer(intent, id)?;
        self.transfer_seq = id;
        self.active_transfer = Some(id);
        Some(request)
    }

    /// Applies the completion of transfer `id`. Returns whether anything changed.
    ///
    /// Completions for any other id are dropped. The detail view only returns
    /// to idle if it is the one the transfer was started from.
    pub fn transfer_completed(&mut self, id: u64, notice: Option<Notice>) -> bool {
        if self.active_transfer != Some(id) {
            tracing::debug!(id, active = ?self.active_transfer, "discarding unknown transfer completion");
            return false;
        }
        self.active_transfer = None;

        if let Some(detail) = self.detail.as_mut() {
            detail.finish_transfer(id);
        }
        if notice.is_some() {
            self.notice = notice;
        }
        true
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    fn begin_session(&mut self) {
        self.session += 1;
        self.page = 1;
        self.results.clear();
        self.pending.clear();
        self.applied_through = 0;
        self.end_reached = false;
    }

    fn current_params(&self) -> QueryParams {
        QueryParams::build(
            self.page,
            self.filters.as_ref(),
            self.active_category.as_deref(),
            Some(self.search_text.as_str()),
        )
    }

    fn dispatch_current(&self, merge: Merge) -> FetchRequest {
        self.dispatch(merge, self.current_params())
    }

    fn dispatch(&self, merge: Merge, params: QueryParams) -> FetchRequest {
        FetchRequest {
            ticket: FetchTicket {
                session: self.session,
                page: self.page,
                merge,
            },
            params,
        }
    }

    /// Computes a renderable view model for a surface `cols` columns wide.
    #[must_use]
    pub fn compute_viewmodel(&self, cols: usize) -> UIViewModel {
        let columns = column_count(cols);
        let column_width = (cols / columns).saturating_sub(1).max(1);

        UIViewModel {
            header: self.compute_header(),
            search_bar: SearchBarInfo {
                query: self.search_input.clone(),
                show_clear: !self.search_input.is_empty(),
            },
            categories: catalog::CATEGORIES
                .iter()
                .map(|&name| CategoryChip {
                    name,
                    is_active: self.active_category.as_deref() == Some(name),
                })
                .collect(),
            filter_chips: self
                .filters
                .iter()
                .flat_map(FilterSet::iter)
                .map(|(key, value)| FilterChip {
                    key,
                    value: value.to_string(),
                })
                .collect(),
            grid: GridInfo::masonry(&self.results, columns, column_width),
            empty_state: self.compute_empty_state(),
            filter_panel: self.compute_filter_panel(),
            detail: self.compute_detail(cols),
            notice: self.notice.clone(),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let count = self.results.len();
        HeaderInfo {
            title: format!(" Pixels ({count} images, page {}) ", self.page),
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if !self.results.is_empty() {
            return None;
        }

        let subtitle = match (&self.active_category, self.search_text.is_empty()) {
            (Some(category), _) => format!("Nothing loaded for category '{category}' yet"),
            (None, false) => format!("Nothing loaded for '{}' yet", self.search_text),
            (None, true) => "Results appear here once the search completes".to_string(),
        };

        Some(EmptyState {
            message: "No images".to_string(),
            subtitle,
        })
    }

    fn compute_filter_panel(&self) -> Option<FilterPanelInfo> {
        if self.filter_panel == FilterPanel::Closed {
            return None;
        }

        let selected = |key: FilterKey| self.filter_draft.as_ref().and_then(|d| d.get(key));

        let sections = FilterKey::ALL
            .iter()
            .map(|&key| FilterSection {
                key,
                options: catalog::options(key)
                    .iter()
                    .map(|&value| FilterOption {
                        value,
                        is_selected: selected(key) == Some(value),
                    })
                    .collect(),
            })
            .collect();

        Some(FilterPanelInfo { sections })
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn compute_detail(&self, cols: usize) -> Option<DetailInfo> {
        let detail = self.detail.as_ref()?;
        let max_width = (cols.saturating_sub(4).max(1)) as f64;
        let (width, height) = detail.display_size(max_width);

        Some(DetailInfo {
            file_name: detail.file_name.clone(),
            url: detail.hit.webformat_url.clone(),
            width: width.round() as usize,
            height: height.round() as usize,
            status: detail.status.label(),
            tags: detail.hit.tags.clone(),
            user: detail.hit.user.clone(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.detail.is_some() {
            "download  share  back  ok: dismiss  q: quit"
        } else if self.filter_panel == FilterPanel::Open {
            "set <key> <value>  apply  reset  close  q: quit"
        } else {
            "s <text>  x: clear  c <category>  f: filters  unset <key>  more  open <n>  help  q: quit"
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::debounce::SEARCH_DEBOUNCE;
    use crate::app::modes::DetailStatus;

    fn hit(id: u64) -> ImageHit {
        ImageHit {
            id,
            preview_url: format!("https://cdn.example/photo/{id}_150.jpg"),
            webformat_url: format!("https://cdn.example/get/{id}_640.jpg"),
            large_image_url: String::new(),
            image_width: 640,
            image_height: 480,
            tags: format!("tag{id}"),
            user: String::new(),
        }
    }

    fn hits(ids: std::ops::RangeInclusive<u64>) -> Vec<ImageHit> {
        ids.map(hit).collect()
    }

    fn ids(state: &AppState) -> Vec<u64> {
        state.results.iter().map(|h| h.id).collect()
    }

    fn pairs(request: &FetchRequest) -> Vec<(String, String)> {
        request
            .params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn p(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
    }

    fn loaded() -> AppState {
        let mut state = AppState::new(SEARCH_DEBOUNCE);
        let first = state.initialize();
        state.complete_fetch(first.ticket, FetchOutcome::Success(hits(1..=3)));
        state
    }

    #[test]
    fn initialize_fetches_first_page_without_criteria() {
        let mut state = AppState::new(SEARCH_DEBOUNCE);
        let request = state.initialize();

        assert_eq!(pairs(&request), p(&[("page", "1")]));
        assert_eq!(request.ticket.merge, Merge::Replace);
        assert!(state.complete_fetch(request.ticket, FetchOutcome::Success(hits(1..=2))));
        assert_eq!(ids(&state), vec![1, 2]);
    }

    #[test]
    fn same_category_twice_deselects() {
        let mut state = loaded();
        let first = state.set_category(Some("nature"));
        assert_eq!(first.params.get("category"), Some("nature"));

        let second = state.set_category(Some("nature"));
        assert_eq!(state.active_category, None);
        assert_eq!(pairs(&second), p(&[("page", "1")]));
    }

    #[test]
    fn category_change_clears_text_and_pending_input() {
        let mut state = loaded();
        let now = Instant::now();
        state.search("mountain");
        state.input_search("mountains", now);

        let request = state.set_category(Some("travel"));

        assert!(state.search_text.is_empty());
        assert!(state.search_input.is_empty());
        assert!(!state.search_debounce.is_pending());
        assert!(!request.params.contains_key("q"));
    }

    #[test]
    fn short_search_is_inert() {
        let mut state = loaded();
        state.load_more();
        let session = state.session;

        assert!(state.search("a").is_none());
        assert!(state.search("ab").is_none());
        assert!(state.search("é🙂").is_none());

        assert_eq!(state.page, 2);
        assert_eq!(state.session, session);
        assert_eq!(ids(&state), vec![1, 2, 3]);
        assert_eq!(state.search_text, "é🙂");
    }

    #[test]
    fn search_clears_category_and_replaces() {
        let mut state = loaded();
        state.set_category(Some("animals"));

        let request = state.search("cats").unwrap();

        assert_eq!(state.active_category, None);
        assert_eq!(pairs(&request), p(&[("page", "1"), ("q", "cats")]));
        assert!(state.results.is_empty());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn empty_search_clears_input_and_keeps_filters() {
        let mut state = loaded();
        state.open_filters();
        state.edit_filter(FilterKey::Order, "latest").unwrap();
        state.apply_filters();
        state.input_search("", Instant::now());
        state.search_input = "leftover".to_string();

        let request = state.search("").unwrap();

        assert!(state.search_input.is_empty());
        assert_eq!(pairs(&request), p(&[("page", "1"), ("order", "latest")]));
    }

    #[test]
    fn filter_edits_do_not_apply_until_apply() {
        let mut state = loaded();
        state.open_filters();
        state.edit_filter(FilterKey::Type, "photo").unwrap();

        assert_eq!(state.filters, None);
        let more = state.load_more();
        assert!(!more.params.contains_key("type"));

        let applied = state.apply_filters().unwrap();
        assert_eq!(pairs(&applied), p(&[("page", "1"), ("type", "photo")]));
        assert_eq!(state.filter_panel, FilterPanel::Closed);
    }

    #[test]
    fn edit_filter_validates_against_catalog() {
        let mut state = loaded();
        assert!(state.edit_filter(FilterKey::Order, "latest").is_err());

        state.open_filters();
        assert!(state.edit_filter(FilterKey::Colors, "plaid").is_err());
        assert!(state.edit_filter(FilterKey::Colors, "Red").is_ok());
        assert_eq!(state.filter_draft.as_ref().and_then(|d| d.get(FilterKey::Colors)), Some("red"));
    }

    #[test]
    fn apply_without_filters_only_closes_panel() {
        let mut state = loaded();
        state.open_filters();
        let session = state.session;

        assert!(state.apply_filters().is_none());
        assert_eq!(state.filter_panel, FilterPanel::Closed);
        assert_eq!(state.session, session);
        assert_eq!(ids(&state), vec![1, 2, 3]);
    }

    #[test]
    fn apply_and_reset_include_category_and_text() {
        let mut state = loaded();
        state.set_category(Some("nature"));
        state.search_text = "ab".to_string();
        state.open_filters();
        state.edit_filter(FilterKey::Orientation, "vertical").unwrap();

        let applied = state.apply_filters().unwrap();
        assert_eq!(
            pairs(&applied),
            p(&[("page", "1"), ("orientation", "vertical"), ("category", "nature"), ("q", "ab")])
        );

        let reset = state.reset_filters().unwrap();
        assert_eq!(state.filters, None);
        assert_eq!(pairs(&reset), p(&[("page", "1"), ("category", "nature"), ("q", "ab")]));
    }

    #[test]
    fn reset_without_filters_is_noop() {
        let mut state = loaded();
        state.open_filters();
        state.edit_filter(FilterKey::Order, "popular").unwrap();

        assert!(state.reset_filters().is_none());
        assert_eq!(state.filter_panel, FilterPanel::Closed);
        assert_eq!(state.filter_draft, None);
        assert_eq!(ids(&state), vec![1, 2, 3]);
    }

    #[test]
    fn clear_filter_keeps_remaining_keys() {
        let mut state = loaded();
        state.open_filters();
        state.edit_filter(FilterKey::Order, "latest").unwrap();
        state.edit_filter(FilterKey::Type, "photo").unwrap();
        state.apply_filters();
        state.load_more();

        let request = state.clear_filter(FilterKey::Order);

        assert_eq!(pairs(&request), p(&[("page", "1"), ("type", "photo")]));
        assert_eq!(state.page, 1);

        state.clear_filter(FilterKey::Type);
        assert_eq!(state.filters, None);
    }

    #[test]
    fn load_more_appends_in_order() {
        let mut state = loaded();
        let request = state.load_more();

        assert_eq!(request.ticket.merge, Merge::Append);
        assert_eq!(state.page, 2);
        state.complete_fetch(request.ticket, FetchOutcome::Success(hits(4..=5)));
        assert_eq!(ids(&state), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn failed_load_more_keeps_page_and_results() {
        let mut state = loaded();
        let request = state.load_more();

        assert!(!state.complete_fetch(request.ticket, FetchOutcome::Failure("timeout".to_string())));
        assert_eq!(state.page, 2);
        assert_eq!(ids(&state), vec![1, 2, 3]);

        let next = state.load_more();
        assert_eq!(next.params.page(), Some(3));
        state.complete_fetch(next.ticket, FetchOutcome::Success(hits(7..=7)));
        assert_eq!(ids(&state), vec![1, 2, 3, 7]);
    }

    #[test]
    fn stale_session_completion_is_discarded() {
        let mut state = AppState::new(SEARCH_DEBOUNCE);
        let first = state.initialize();
        let nature = state.set_category(Some("nature"));

        assert!(state.complete_fetch(nature.ticket, FetchOutcome::Success(hits(10..=11))));
        assert!(!state.complete_fetch(first.ticket, FetchOutcome::Success(hits(1..=5))));
        assert_eq!(ids(&state), vec![10, 11]);
    }

    #[test]
    fn out_of_order_pages_apply_in_page_order() {
        let mut state = loaded();
        let page2 = state.load_more();
        let page3 = state.load_more();

        assert!(!state.complete_fetch(page3.ticket, FetchOutcome::Success(hits(30..=30))));
        assert_eq!(ids(&state), vec![1, 2, 3]);

        assert!(state.complete_fetch(page2.ticket, FetchOutcome::Success(hits(20..=20))));
        assert_eq!(ids(&state), vec![1, 2, 3, 20, 30]);
    }

    #[test]
    fn failed_page_releases_later_pages() {
        let mut state = loaded();
        let page2 = state.load_more();
        let page3 = state.load_more();

        state.complete_fetch(page3.ticket, FetchOutcome::Success(hits(30..=30)));
        assert!(state.complete_fetch(page2.ticket, FetchOutcome::Failure("boom".to_string())));
        assert_eq!(ids(&state), vec![1, 2, 3, 30]);
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let mut state = loaded();
        let request = state.load_more();
        state.complete_fetch(request.ticket, FetchOutcome::Success(hits(4..=4)));
        assert!(!state.complete_fetch(request.ticket, FetchOutcome::Success(hits(4..=4))));
        assert_eq!(ids(&state), vec![1, 2, 3, 4]);
    }

    #[test]
    fn scroll_triggers_once_and_rearms() {
        let mut state = loaded();

        assert!(state.on_scroll(100.0, 1000.0, 800.0).is_none());
        let at_bottom = state.on_scroll(199.5, 1000.0, 800.0);
        assert_eq!(at_bottom.map(|r| r.ticket.page), Some(2));
        assert!(state.end_reached);

        assert!(state.on_scroll(200.0, 1000.0, 800.0).is_none());
        assert!(state.on_scroll(50.0, 1000.0, 800.0).is_none());
        assert!(!state.end_reached);

        assert_eq!(state.on_scroll(200.0, 1000.0, 800.0).map(|r| r.ticket.page), Some(3));
    }

    #[test]
    fn scroll_on_empty_results_does_not_load() {
        let mut state = AppState::new(SEARCH_DEBOUNCE);
        state.initialize();
        assert!(state.on_scroll(0.0, 0.0, 800.0).is_none());
        assert_eq!(state.page, 1);
    }

    #[test]
    fn detail_flow_and_notices() {
        let mut state = loaded();
        assert!(state.open_image(5).is_err());

        state.open_image(1).unwrap();
        state.image_loaded();
        let request = state.request_transfer(TransferIntent::Save).unwrap();
        assert_eq!(request.url, "https://cdn.example/get/2_640.jpg");
        assert_eq!(request.file_name, "2_150.jpg");

        assert!(state.transfer_completed(request.id, Some(Notice::Toast("Image Downloaded".to_string()))));
        assert_eq!(state.detail.as_ref().map(|d| d.status), Some(DetailStatus::Idle));
        assert_eq!(state.active_transfer, None);
        assert!(state.notice.is_some());

        state.dismiss_notice();
        state.close_image();
        assert!(state.notice.is_none());
        assert!(state.detail.is_none());
        assert!(state.request_transfer(TransferIntent::Share).is_none());
    }

    #[test]
    fn transfer_survives_closing_and_reopening_the_detail() {
        let mut state = loaded();

        state.open_image(0).unwrap();
        state.image_loaded();
        let first = state.request_transfer(TransferIntent::Save).unwrap();
        state.close_image();

        state.open_image(1).unwrap();
        state.image_loaded();
        assert!(state.request_transfer(TransferIntent::Share).is_none());
        assert_eq!(state.detail.as_ref().map(|d| d.status), Some(DetailStatus::Idle));

        assert!(!state.transfer_completed(first.id + 1, None));
        assert_eq!(state.active_transfer, Some(first.id));

        assert!(state.transfer_completed(first.id, Some(Notice::Toast("Image Downloaded".to_string()))));
        assert_eq!(state.detail.as_ref().map(|d| d.status), Some(DetailStatus::Idle));

        let second = state.request_transfer(TransferIntent::Share).unwrap();
        assert_ne!(second.id, first.id);
        assert_eq!(state.detail.as_ref().map(|d| d.status), Some(DetailStatus::Sharing));

        assert!(!state.transfer_completed(first.id, None));
        assert_eq!(state.detail.as_ref().map(|d| d.status), Some(DetailStatus::Sharing));
        assert!(state.request_transfer(TransferIntent::Save).is_none());

        assert!(state.transfer_completed(second.id, None));
        assert_eq!(state.detail.as_ref().map(|d| d.status), Some(DetailStatus::Idle));
    }

    #[test]
    fn viewmodel_reflects_state() {
        let mut state = loaded();
        state.set_category(Some("science"));
        state.open_filters();
        state.edit_filter(FilterKey::Type, "vector").unwrap();

        let vm = state.compute_viewmodel(120);

        assert_eq!(vm.grid.columns.len(), 3);
        assert!(vm.empty_state.is_some());
        assert!(vm.categories.iter().any(|c| c.name == "science" && c.is_active));
        let panel = vm.filter_panel.unwrap();
        let types = panel.sections.iter().find(|s| s.key == FilterKey::Type).unwrap();
        assert!(types.options.iter().any(|o| o.value == "vector" && o.is_selected));
        assert!(vm.filter_chips.is_empty());
    }
}
