//! # casewatch common
//!
//! Shared error type, logging setup and date helpers used by every crate in
//! the casewatch workspace.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{CaseWatchError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use utils::*;
