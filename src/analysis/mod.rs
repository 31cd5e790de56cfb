//! Per-band averaging, correlation and classification for one station.
//!
//! [`analyzer::analyze_station`] drives the full pipeline over loaded
//! [`Datasets`](crate::loader::Datasets) and returns a
//! [`types::CorrelationReport`].

pub mod analyzer;
pub mod averages;
pub mod correlation;
pub mod relationship;
pub mod types;
pub mod utility;
