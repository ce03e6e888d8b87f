//! Selectable categories and filter values.
//!
//! The category picker and the filter editor only offer values from these lists.
//! They mirror the values the image API accepts for each parameter.

use super::filters::FilterKey;

/// Categories offered by the category picker.
pub const CATEGORIES: &[&str] = &[
    "backgrounds",
    "fashion",
    "nature",
    "science",
    "education",
    "feelings",
    "health",
    "people",
    "religion",
    "places",
    "animals",
    "industry",
    "computer",
    "food",
    "sports",
    "transportation",
    "travel",
    "buildings",
    "business",
    "music",
];

const ORDER: &[&str] = &["popular", "latest"];
const ORIENTATION: &[&str] = &["horizontal", "vertical"];
const TYPE: &[&str] = &["photo", "illustration", "vector"];
const COLORS: &[&str] = &[
    "red",
    "orange",
    "yellow",
    "green",
    "turquoise",
    "blue",
    "pink",
    "gray",
    "black",
    "brown",
    "white",
];

/// Values selectable for a filter key.
#[must_use]
pub const fn options(key: FilterKey) -> &'static [&'static str] {
    match key {
        FilterKey::Order => ORDER,
        FilterKey::Orientation => ORIENTATION,
        FilterKey::Type => TYPE,
        FilterKey::Colors => COLORS,
    }
}

/// Returns the canonical spelling of `value` if it is selectable for `key`.
#[must_use]
pub fn find_option(key: FilterKey, value: &str) -> Option<&'static str> {
    options(key)
        .iter()
        .copied()
        .find(|option| option.eq_ignore_ascii_case(value.trim()))
}

/// Returns the canonical spelling of `name` if it is a known category.
#[must_use]
pub fn find_category(name: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .copied()
        .find(|category| category.eq_ignore_ascii_case(name.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_has_options() {
        for key in FilterKey::ALL {
            assert!(!options(key).is_empty(), "{key} has no options");
        }
    }

    #[test]
    fn lookups_normalize_case() {
        assert_eq!(find_option(FilterKey::Type, "Photo"), Some("photo"));
        assert_eq!(find_option(FilterKey::Type, "gif"), None);
        assert_eq!(find_category("NATURE"), Some("nature"));
        assert_eq!(find_category("cars"), None);
    }
}
