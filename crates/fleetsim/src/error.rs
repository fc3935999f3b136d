//! Configuration errors reported while building the roster and catalog.

use crate::catalog::Severity;
use crate::fleet::MetricKind;

/// Error raised while parsing or validating fleet/scenario configuration.
///
/// All variants are fatal: a dataset is never built from a catalog that
/// failed validation.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The roster contains no servers.
    #[error("fleet roster is empty")]
    EmptyRoster,

    /// Two roster entries share the same server id.
    #[error("duplicate server id in roster: {0}")]
    DuplicateServer(String),

    /// Two catalog entries share the same scenario id.
    #[error("duplicate scenario id: {0}")]
    DuplicateScenario(String),

    /// A scenario references a server that is not in the roster.
    #[error("scenario {scenario} references unknown server {server_id}")]
    UnknownServer { scenario: String, server_id: String },

    /// A scenario window does not fit within the day.
    #[error("scenario {scenario} window [{start}, {end}] exceeds the day (0..=1439)")]
    WindowOutOfRange {
        scenario: String,
        start: u16,
        end: u16,
    },

    /// A scenario window has no positive duration.
    #[error("scenario {scenario} window [{start}, {end}] has no positive duration")]
    EmptyWindow {
        scenario: String,
        start: u16,
        end: u16,
    },

    /// A base or peak value falls outside the percentage range.
    #[error("scenario {scenario} value {value} is outside 0..=100")]
    ValueOutOfRange { scenario: String, value: f64 },

    /// Two scenarios drive the same metric on the same server at the same time.
    #[error("scenarios {first} and {second} overlap on {server_id}/{metric}")]
    OverlappingScenarios {
        first: String,
        second: String,
        server_id: String,
        metric: MetricKind,
    },

    /// A six-hour slot does not carry its required scenario census.
    #[error("time slot {slot} has {found} {severity} scenarios, expected {expected}")]
    SlotCensus {
        slot: usize,
        severity: Severity,
        expected: usize,
        found: usize,
    },
}
