//! Request parameters and the search URL formatter.
//!
//! [`QueryParams`] is the ordered parameter object the controller builds for each
//! fetch. [`Endpoint`] holds the fixed request defaults and turns a parameter
//! object into the final request URL.

use crate::domain::FilterSet;
use crate::Config;

/// Query-string key of the 1-based page number.
pub const PAGE: &str = "page";
/// Query-string key of the free-text search term.
pub const QUERY: &str = "q";
/// Query-string key of the selected category.
pub const CATEGORY: &str = "category";

/// Ordered key/value parameter object sent to the search fetcher.
///
/// Pairs are kept in insertion order; that order is the order they are appended
/// to the request URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Builds the parameter object for one fetch.
    ///
    /// Order is always `page`, then the active filters in their insertion order,
    /// then `category`, then `q`. Empty category or text values are omitted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixgrid::api::QueryParams;
    /// use pixgrid::domain::{FilterKey, FilterSet};
    ///
    /// let mut filters = FilterSet::new();
    /// filters.set(FilterKey::Order, "latest");
    ///
    /// let params = QueryParams::build(2, Some(&filters), Some("nature"), None);
    /// let keys: Vec<_> = params.iter().map(|(k, _)| k).collect();
    /// assert_eq!(keys, vec!["page", "order", "category"]);
    /// ```
    #[must_use]
    pub fn build(
        page: u32,
        filters: Option<&FilterSet>,
        category: Option<&str>,
        text: Option<&str>,
    ) -> Self {
        let mut params = Self::new();
        params.push(PAGE, page.to_string());

        if let Some(filters) = filters {
            for (key, value) in filters.iter() {
                params.push(key.as_str(), value);
            }
        }

        if let Some(category) = category.filter(|c| !c.is_empty()) {
            params.push(CATEGORY, category);
        }

        if let Some(text) = text.filter(|t| !t.is_empty()) {
            params.push(QUERY, text);
        }

        params
    }

    /// Appends a pair, replacing the value in place if the key already exists.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(pair) = self.pairs.iter_mut().find(|(k, _)| *k == key) {
            pair.1 = value;
        } else {
            self.pairs.push((key, value));
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// The page number, if present and numeric.
    #[must_use]
    pub fn page(&self) -> Option<u32> {
        self.get(PAGE).and_then(|p| p.parse().ok())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Fixed request settings shared by every search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub api_key: String,
    pub per_page: u32,
    pub safe_search: bool,
    pub editors_choice: bool,
}

impl Endpoint {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
            per_page: config.per_page,
            safe_search: config.safe_search,
            editors_choice: config.editors_choice,
        }
    }

    /// Formats the request URL for `params`.
    ///
    /// The credential and the fixed defaults (`per_page`, `safesearch`,
    /// `editors_choice`) always come first. Each parameter is then appended as
    /// `&key=value` in order. Only the free-text `q` value is percent-encoded;
    /// every other value is inserted as-is. With no parameter object only the
    /// defaults are included.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pixgrid::api::{Endpoint, QueryParams};
    ///
    /// let endpoint = Endpoint {
    ///     base_url: "https://pixabay.com/api/".to_string(),
    ///     api_key: "KEY".to_string(),
    ///     per_page: 20,
    ///     safe_search: false,
    ///     editors_choice: false,
    /// };
    ///
    /// let mut params = QueryParams::new();
    /// params.push("page", "1");
    /// params.push("q", "red fox");
    ///
    /// assert_eq!(
    ///     endpoint.format_url(Some(&params)),
    ///     "https://pixabay.com/api/?key=KEY&per_page=20&safesearch=false&editors_choice=false&page=1&q=red%20fox"
    /// );
    /// ```
    #[must_use]
    pub fn format_url(&self, params: Option<&QueryParams>) -> String {
        let separator = if self.base_url.contains('?') { '&' } else { '?' };
        let mut url = format!(
            "{}{separator}key={}&per_page={}&safesearch={}&editors_choice={}",
            self.base_url, self.api_key, self.per_page, self.safe_search, self.editors_choice
        );

        let Some(params) = params else {
            return url;
        };

        for (key, value) in params.iter() {
            url.push('&');
            url.push_str(key);
            url.push('=');
            if key == QUERY {
                url.push_str(&encode_component(value));
            } else {
                url.push_str(value);
            }
        }

        url
    }
}

/// Marks that form encoding escapes but URI components leave as-is.
const COMPONENT_SAFE: [(&str, &str); 5] = [("%21", "!"), ("%27", "'"), ("%28", "("), ("%29", ")"), ("%7E", "~")];

/// Percent-encodes a free-text value the way a URI component is encoded.
///
/// Spaces become `%20` rather than the form-encoding `+`; a literal `+` in the
/// input is already encoded as `%2B`, so the substitution is unambiguous.
/// Every `%` in the serialized form starts an escape, so restoring
/// `! ' ( ) ~` cannot touch an escaped `%`.
fn encode_component(value: &str) -> String {
    let mut encoded = url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    for (escape, mark) in COMPONENT_SAFE {
        encoded = encoded.replace(escape, mark);
    }
    encoded
}
