//! Project scan: list, filter, extract, write.
//!
//! - [`types`] - `ScanOptions`, `ScanResult`, `ScanError`, `RepositorySink`, `MAX_PAGES`
//! - [`progress`] - `ScanProgress`, `ProgressCallback`, `emit()`
//! - [`engine`] - `scan_projects()`
//!
//! # Example
//!
//! ```ignore
//! use satis_gitlab::scan::{ScanOptions, scan_projects};
//!
//! let mut builder = SatisConfigBuilder::new()?;
//! let options = ScanOptions::for_client(&client_options);
//! let result = scan_projects(&client, &filters, &mut builder, &options, None).await?;
//! println!("Number of project found : {}", result.accepted);
//! ```

pub mod engine;
mod progress;
mod types;

pub use engine::scan_projects;
pub use progress::{ProgressCallback, ScanProgress, emit};
pub use types::{MAX_PAGES, RepositorySink, ScanError, ScanOptions, ScanResult};
