//! Search filter keys and the single-select filter set.
//!
//! A [`FilterSet`] maps each [`FilterKey`] to at most one selected value. A key
//! present in the set means the criterion is active; removing the key deactivates
//! it. Keys keep their insertion order because that order is the order in which
//! they are appended to the request query string.

use crate::domain::error::PixgridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A filter criterion understood by the search API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKey {
    /// Result ordering (`popular`, `latest`).
    Order,
    /// Image orientation (`horizontal`, `vertical`).
    Orientation,
    /// Image type (`photo`, `illustration`, `vector`).
    Type,
    /// Dominant color.
    Colors,
}

impl FilterKey {
    /// All keys, in the order the filter editor presents them.
    pub const ALL: [Self; 4] = [Self::Order, Self::Orientation, Self::Type, Self::Colors];

    /// Query-string name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Order => "order",
            Self::Orientation => "orientation",
            Self::Type => "type",
            Self::Colors => "colors",
        }
    }
}

impl fmt::Display for FilterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKey {
    type Err = PixgridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PixgridError::Command(format!("unknown filter: {s}")))
    }
}

/// Single-select mapping of filter key to value, in insertion order.
///
/// # Examples
///
/// ```
/// use pixgrid::domain::{FilterKey, FilterSet};
///
/// let mut filters = FilterSet::new();
/// filters.set(FilterKey::Order, "latest");
/// filters.set(FilterKey::Type, "photo");
/// filters.set(FilterKey::Order, "popular");
///
/// let keys: Vec<_> = filters.iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, vec![FilterKey::Order, FilterKey::Type]);
/// assert_eq!(filters.get(FilterKey::Order), Some("popular"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    entries: Vec<(FilterKey, String)>,
}

impl FilterSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Selects `value` for `key`, replacing any previous value in place.
    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) {
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Deactivates `key`, returning the value it had.
    pub fn remove(&mut self, key: FilterKey) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }

    #[must_use]
    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn contains(&self, key: FilterKey) -> bool {
        self.get(key).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keys_case_insensitively() {
        assert_eq!("order".parse::<FilterKey>().unwrap(), FilterKey::Order);
        assert_eq!(" Colors ".parse::<FilterKey>().unwrap(), FilterKey::Colors);
        assert!("size".parse::<FilterKey>().is_err());
    }

    #[test]
    fn remove_keeps_remaining_order() {
        let mut filters = FilterSet::new();
        filters.set(FilterKey::Colors, "red");
        filters.set(FilterKey::Order, "latest");
        filters.set(FilterKey::Type, "photo");

        assert_eq!(filters.remove(FilterKey::Order), Some("latest".to_string()));
        assert_eq!(filters.remove(FilterKey::Order), None);

        let remaining: Vec<_> = filters.iter().collect();
        assert_eq!(remaining, vec![(FilterKey::Colors, "red"), (FilterKey::Type, "photo")]);
    }

    #[test]
    fn set_is_single_select() {
        let mut filters = FilterSet::new();
        filters.set(FilterKey::Orientation, "horizontal");
        filters.set(FilterKey::Orientation, "vertical");
        assert_eq!(filters.len(), 1);
        assert_eq!(filters.get(FilterKey::Orientation), Some("vertical"));
    }
}
