//! Pixgrid: an image catalog search client with incremental search and infinite scroll.
//!
//! Pixgrid provides:
//! - Debounced free-text search, a category picker, and filter editing
//! - Page-by-page result loading as the grid is scrolled to its end
//! - Session-tagged fetches so a slow stale response never overwrites newer results
//! - Image detail view with download, save, and share

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal Surface (main.rs, ui/)                    │  ← Commands in, text out
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime Driver (runtime/)                          │  ← tokio tasks, channel
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Query state controller
//! │  - Event handling                                   │
//! │  - Session / page bookkeeping                       │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                                     │
//! ┌───────────────────────┐      ┌────────────────────────┐
//! │ Search API (api/)     │      │ Platform (platform/)   │
//! │ - Parameter building  │      │ - Download             │
//! │ - URL formatting      │      │ - Save / share         │
//! │ - reqwest client      │      │ - Notices              │
//! └───────────────────────┘      └────────────────────────┘
//!         │                                     │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Image hits, filters, catalog, errors (domain/)   │
//! │  - Default directories (infrastructure/)            │
//! │  - Rotating file logging (observability/)           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: Request parameters, URL formatter, and the search fetcher
//! - [`app`]: Query state controller with event/action model
//! - [`domain`]: Image hits, filters, catalog, and errors
//! - [`infrastructure`]: Default filesystem locations
//! - [`observability`]: `tracing` setup writing to a rotating log file
//! - [`platform`]: Download, save, and share services
//! - [`runtime`]: Async driver executing fetches and transfers
//! - [`ui`]: View model, text renderer, and command parser
//!
//! # Configuration
//!
//! Read from `~/.config/pixgrid/config.toml` (or `$PIXGRID_CONFIG`):
//!
//! ```toml
//! api_key = "your-api-key"
//! per_page = 20
//! safe_search = false
//! editors_choice = false
//! debounce_ms = 400
//! download_dir = "~/Downloads/pixgrid"
//! trace_level = "debug"
//! ```
//!
//! `PIXGRID_API_KEY` overrides the key from the file.
//!
//! # Example
//!
//! ```rust
//! use pixgrid::{handle_event, initialize, Action, Config, Event};
//!
//! let mut state = initialize(&Config::default());
//! let (_, actions) = handle_event(&mut state, &Event::Initialize)?;
//!
//! let Action::Fetch(request) = &actions[0] else { unreachable!() };
//! assert_eq!(request.params.page(), Some(1));
//! # Ok::<(), pixgrid::PixgridError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod platform;
pub mod runtime;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{PixgridError, Result};
pub use runtime::Driver;

use infrastructure::paths;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the API key.
pub const API_KEY_ENV: &str = "PIXGRID_API_KEY";

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "PIXGRID_CONFIG";

pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";
pub const DEFAULT_PER_PAGE: u32 = 20;
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

/// Page sizes the search API accepts.
pub const PER_PAGE_RANGE: std::ops::RangeInclusive<u32> = 3..=200;

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Credential sent as `key` with every search. Required to search.
    pub api_key: Option<String>,

    /// Search endpoint. Default: `https://pixabay.com/api/`
    pub base_url: String,

    /// Results per page. Default: 20
    pub per_page: u32,

    /// Sent as `safesearch`. Default: `false`
    pub safe_search: bool,

    /// Sent as `editors_choice`. Default: `false`
    pub editors_choice: bool,

    /// Quiet period before typed text is searched. Default: 400
    pub debounce_ms: u64,

    /// Per-request timeout for searches and downloads. Default: 15
    pub request_timeout_secs: u64,

    /// Where downloaded images are written.
    pub download_dir: PathBuf,

    /// Stand-in for the media library that saved images are copied to.
    pub library_dir: PathBuf,

    /// Stand-in for the share target that shared images are copied to.
    pub share_dir: PathBuf,

    /// Tracing level. Options: `trace`, `debug`, `info`, `warn`, `error`.
    /// Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            safe_search: false,
            editors_choice: false,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            download_dir: paths::default_download_dir(),
            library_dir: paths::default_library_dir(),
            share_dir: paths::default_share_dir(),
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string map with fallback defaults.
    ///
    /// # Parsing Rules
    ///
    /// - Numbers and booleans that fail to parse keep their defaults
    /// - Empty strings count as unset
    /// - Directory values expand a leading `~`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use pixgrid::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc123".to_string());
    /// map.insert("per_page".to_string(), "50".to_string());
    /// map.insert("debounce_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.api_key.as_deref(), Some("abc123"));
    /// assert_eq!(config.per_page, 50);
    /// assert_eq!(config.debounce_ms, 400);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| map.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        Self {
            api_key: get("api_key").map(String::from),
            base_url: get("base_url").map_or(defaults.base_url, String::from),
            per_page: get("per_page").and_then(|v| v.parse().ok()).unwrap_or(defaults.per_page),
            safe_search: get("safe_search")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.safe_search),
            editors_choice: get("editors_choice")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.editors_choice),
            debounce_ms: get("debounce_ms")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.debounce_ms),
            request_timeout_secs: get("request_timeout_secs")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
            download_dir: get("download_dir").map_or(defaults.download_dir, paths::expand_tilde),
            library_dir: get("library_dir").map_or(defaults.library_dir, paths::expand_tilde),
            share_dir: get("share_dir").map_or(defaults.share_dir, paths::expand_tilde),
            trace_level: get("trace_level").map(String::from),
        }
    }

    /// Parses a TOML document of top-level keys.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or a value is a table or array.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table =
            toml::from_str(text).map_err(|e| PixgridError::Config(format!("invalid config file: {e}")))?;

        let mut map = BTreeMap::new();
        for (key, value) in table {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                other => {
                    return Err(PixgridError::Config(format!(
                        "'{key}' must be a string, number, or boolean, found {}",
                        other.type_str()
                    )))
                }
            };
            map.insert(key, value);
        }

        Ok(Self::from_map(&map))
    }

    /// Reads a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Loads configuration from `path`, `$PIXGRID_CONFIG`, or the default location.
    ///
    /// A missing file at the default location yields defaults; an explicitly named
    /// file must exist. `$PIXGRID_API_KEY` overrides the file's key.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be read, or any file
    /// cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let explicit = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None => {
                let path = paths::default_config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(key) = std::env::var(API_KEY_ENV).ok().filter(|k| !k.trim().is_empty()) {
            config.api_key = Some(key.trim().to_string());
        }

        Ok(config)
    }

    /// Checks that the configuration can be used to search.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing, the base URL is not an
    /// absolute URL, or the page size is outside what the API accepts.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.as_deref().map_or(true, |k| k.trim().is_empty()) {
            return Err(PixgridError::Config(format!(
                "api_key is required (set it in the config file or {API_KEY_ENV})"
            )));
        }

        url::Url::parse(&self.base_url)
            .map_err(|e| PixgridError::Config(format!("invalid base_url '{}': {e}", self.base_url)))?;

        if !PER_PAGE_RANGE.contains(&self.per_page) {
            return Err(PixgridError::Config(format!(
                "per_page must be between {} and {}, got {}",
                PER_PAGE_RANGE.start(),
                PER_PAGE_RANGE.end(),
                self.per_page
            )));
        }

        Ok(())
    }

    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Creates the controller state for `config`.
///
/// No request is issued until [`Event::Initialize`] is handled.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(debounce_ms = config.debounce_ms, per_page = config.per_page, "initializing pixgrid");
    AppState::new(config.debounce())
}
