//! Async runtime glue.
//!
//! - [`driver`]: event loop that executes fetches and transfers on tokio

pub mod driver;

pub use driver::Driver;
