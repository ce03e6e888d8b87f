//! Filesystem locations and path helpers.
//!
//! All default locations live under the platform data directory reported by
//! `dirs` (for example `~/.local/share/pixgrid` on Linux). When no data
//! directory can be determined the current directory is used instead.

use std::path::PathBuf;

const APP_DIR: &str = "pixgrid";

/// Returns the data directory for pixgrid files (log, downloads, library, outbox).
///
/// # Examples
///
/// ```
/// use pixgrid::infrastructure::get_data_dir;
///
/// let data_dir = get_data_dir();
/// assert!(data_dir.ends_with("pixgrid"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default location of the configuration file.
#[must_use]
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

#[must_use]
pub fn default_download_dir() -> PathBuf {
    get_data_dir().join("downloads")
}

/// Stand-in for the host media library.
#[must_use]
pub fn default_library_dir() -> PathBuf {
    dirs::picture_dir().map_or_else(|| get_data_dir().join("library"), |dir| dir.join(APP_DIR))
}

/// Stand-in for the host share target.
#[must_use]
pub fn default_share_dir() -> PathBuf {
    get_data_dir().join("outbox")
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, and tilde paths when no home directory is known, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use pixgrid::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/absolute/path"), PathBuf::from("/absolute/path"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = dirs::home_dir();
    match (path, home) {
        ("~", Some(home)) => home,
        (p, Some(home)) if p.starts_with("~/") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}

/// Last non-empty path segment of `url`, ignoring any query string or fragment.
///
/// # Examples
///
/// ```
/// use pixgrid::infrastructure::file_name_from_url;
///
/// assert_eq!(
///     file_name_from_url("https://cdn.example/photo/2024/cat_150.jpg?x=1").as_deref(),
///     Some("cat_150.jpg"),
/// );
/// assert_eq!(file_name_from_url(""), None);
/// ```
#[must_use]
pub fn file_name_from_url(url: &str) -> Option<String> {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    let path = path.split_once("://").map_or(path, |(_, rest)| rest.split_once('/').map_or("", |(_, p)| p));

    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .filter(|segment| !matches!(*segment, "." | ".."))
        .map(str::to_string)
}
