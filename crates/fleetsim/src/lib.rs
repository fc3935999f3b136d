#![forbid(unsafe_code)]

//! # fleetsim
//!
//! Deterministic 24-hour telemetry simulator for a fixed demo fleet.
//!
//! A 15-server roster and a validated catalog of time-boxed fault scenarios
//! produce one synthetic day of metrics on a ten-minute grid (144 samples
//! per server), with log lines that match what the numbers show. Everything
//! is reproducible: the same seed yields the same dataset, sample by sample.
//!
//! ```rust
//! use fleetsim::{FleetDataset, FleetRoster, ScenarioCatalog};
//!
//! # fn main() -> Result<(), fleetsim::CatalogError> {
//! let roster = FleetRoster::embedded()?;
//! let catalog = ScenarioCatalog::embedded(&roster)?;
//! let dataset = FleetDataset::build(&roster, &catalog, 42);
//!
//! let db = dataset.get("db-mysql-icn-primary").unwrap();
//! let sample = db.at_minute(180);
//! assert_eq!(sample.disk, 71.0);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod dataset;
pub mod error;
pub mod fleet;
pub mod generator;
pub mod logsynth;
pub mod overlay;
pub mod snapshot;

pub use catalog::{ScenarioCatalog, ScenarioDefinition, Severity, WavePattern};
pub use dataset::{FleetDataset, Fixed10MinMetric, Server24hDataset};
pub use error::CatalogError;
pub use fleet::{FleetRoster, MetricKind, MetricSet, ServerProfile, ServerType};
pub use snapshot::{FleetSnapshot, ServerStatus, ThresholdAlert, Trend};
