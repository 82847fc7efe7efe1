//! API clients for external services
//!
//! - Radio Browser: station directory search

pub mod radio_browser;

pub use radio_browser::{DirectoryError, RadioBrowserClient, DEFAULT_PAGE_SIZE};
