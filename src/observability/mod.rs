//! File-based structured logging.
//!
//! The terminal surface owns stdout, so log output goes to a size-rotated file
//! in the data directory instead:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → RotatingFile → pixgrid.log (+ 3 backups)
//! ```
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the configuration file
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

pub mod file_writer;
mod init;

pub use file_writer::RotatingFile;
pub use init::{init_tracing, LOG_FILE_NAME};
