//! # casewatch data
//!
//! Downloads the confirmed-case time series, validates its shape and reduces
//! it to one national [`AggregatedSeries`].

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregate;
pub mod dataset;
pub mod source;

pub use aggregate::*;
pub use dataset::*;
pub use source::*;
