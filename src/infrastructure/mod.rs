//! Infrastructure layer for filesystem locations.
//!
//! Default directories for downloads, the library stand-in, the share outbox,
//! the log file, and the configuration file.

pub mod paths;

pub use paths::{
    default_config_path, default_download_dir, default_library_dir, default_share_dir, expand_tilde,
    file_name_from_url, get_data_dir,
};
