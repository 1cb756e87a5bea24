//! SATIS configuration output.
//!
//! [`SatisConfigBuilder`] is the sink the scan writes accepted packages into.

mod builder;
mod error;

pub use builder::{DEFAULT_TEMPLATE, SatisConfigBuilder};
pub use error::SatisConfigError;
