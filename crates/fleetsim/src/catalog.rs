//! Scenario catalog: validated, time-boxed fault definitions.
//!
//! The catalog is explicit configuration built by [`ScenarioCatalog::build`];
//! nothing is constructed at import time. A catalog that fails validation
//! never reaches the generator.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::fleet::{FleetRoster, MetricKind};

/// Minutes in the simulated day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Width of one scenario slot (six hours).
pub const SLOT_MINUTES: u16 = 360;

/// Number of slots in the day.
pub const SLOT_COUNT: usize = 4;

/// Required scenario census per slot.
const CRITICALS_PER_SLOT: usize = 1;
const WARNINGS_PER_SLOT: usize = 2;

/// Severity a scenario presents at.
///
/// Ordered from least to most severe so the log tie-break can compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape a scenario's metric takes across its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WavePattern {
    /// Ramp to peak over the first fifth of the window, then hold.
    Spike,
    /// Linear interpolation from base to peak over the whole window.
    Gradual,
    /// Sine wave between base and peak, six cycles per window.
    Oscillate,
    /// Peak for the entire window.
    Sustained,
}

/// One time-boxed fault definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Inclusive `[start, end]` window in minutes of day.
    pub time_range: [u16; 2],
    pub server_id: String,
    pub affected_metric: MetricKind,
    pub severity: Severity,
    pub pattern: WavePattern,
    pub base_value: f64,
    pub peak_value: f64,
}

impl ScenarioDefinition {
    #[must_use]
    pub const fn start(&self) -> u16 {
        self.time_range[0]
    }

    #[must_use]
    pub const fn end(&self) -> u16 {
        self.time_range[1]
    }

    /// Whether the window contains the given minute (inclusive on both ends).
    #[must_use]
    pub const fn contains(&self, minute: u16) -> bool {
        self.start() <= minute && minute <= self.end()
    }

    /// Slot this scenario is counted in: the slot its window starts in.
    #[must_use]
    pub const fn slot(&self) -> usize {
        (self.start() / SLOT_MINUTES) as usize
    }
}

/// Validated, immutable scenario catalog.
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    scenarios: Vec<ScenarioDefinition>,
}

impl ScenarioCatalog {
    /// Validate scenario definitions against the roster and build the catalog.
    ///
    /// # Errors
    /// Returns the first [`CatalogError`] found. Checks, in order: window
    /// bounds and duration, value ranges, duplicate ids, unknown servers,
    /// per-(server, metric) overlap, and the per-slot severity census.
    pub fn build(
        scenarios: Vec<ScenarioDefinition>,
        roster: &FleetRoster,
    ) -> Result<Self, CatalogError> {
        let mut ids = std::collections::HashSet::new();
        for s in &scenarios {
            if s.end() >= MINUTES_PER_DAY {
                return Err(CatalogError::WindowOutOfRange {
                    scenario: s.id.clone(),
                    start: s.start(),
                    end: s.end(),
                });
            }
            if s.start() >= s.end() {
                return Err(CatalogError::EmptyWindow {
                    scenario: s.id.clone(),
                    start: s.start(),
                    end: s.end(),
                });
            }
            for value in [s.base_value, s.peak_value] {
                if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                    return Err(CatalogError::ValueOutOfRange {
                        scenario: s.id.clone(),
                        value,
                    });
                }
            }
            if !ids.insert(s.id.as_str()) {
                return Err(CatalogError::DuplicateScenario(s.id.clone()));
            }
            if !roster.contains(&s.server_id) {
                return Err(CatalogError::UnknownServer {
                    scenario: s.id.clone(),
                    server_id: s.server_id.clone(),
                });
            }
        }

        // Pairwise overlap on the same (server, metric). Windows are
        // inclusive, so touching endpoints count as overlap.
        for (i, a) in scenarios.iter().enumerate() {
            for b in &scenarios[i + 1..] {
                if a.server_id == b.server_id
                    && a.affected_metric == b.affected_metric
                    && a.start() <= b.end()
                    && b.start() <= a.end()
                {
                    return Err(CatalogError::OverlappingScenarios {
                        first: a.id.clone(),
                        second: b.id.clone(),
                        server_id: a.server_id.clone(),
                        metric: a.affected_metric,
                    });
                }
            }
        }

        for slot in 0..SLOT_COUNT {
            for (severity, expected) in [
                (Severity::Critical, CRITICALS_PER_SLOT),
                (Severity::Warning, WARNINGS_PER_SLOT),
            ] {
                let found = scenarios
                    .iter()
                    .filter(|s| s.slot() == slot && s.severity == severity)
                    .count();
                if found != expected {
                    return Err(CatalogError::SlotCensus {
                        slot,
                        severity,
                        expected,
                        found,
                    });
                }
            }
        }

        Ok(Self { scenarios })
    }

    /// Parse and validate a catalog from YAML text.
    ///
    /// # Errors
    /// Returns [`CatalogError`] on parse or validation failure.
    pub fn from_yaml(text: &str, roster: &FleetRoster) -> Result<Self, CatalogError> {
        let scenarios: Vec<ScenarioDefinition> = serde_yaml::from_str(text)?;
        Self::build(scenarios, roster)
    }

    /// The default 12-scenario catalog shipped with the crate.
    ///
    /// # Errors
    /// Returns [`CatalogError`] if the embedded configuration is invalid.
    pub fn embedded(roster: &FleetRoster) -> Result<Self, CatalogError> {
        Self::from_yaml(include_str!("../config/scenarios.yaml"), roster)
    }

    #[must_use]
    pub fn scenarios(&self) -> &[ScenarioDefinition] {
        &self.scenarios
    }

    /// The scenario driving `metric` on `server_id` at `minute`, if any.
    ///
    /// Validation guarantees at most one match.
    #[must_use]
    pub fn entry_for(
        &self,
        server_id: &str,
        metric: MetricKind,
        minute: u16,
    ) -> Option<&ScenarioDefinition> {
        self.scenarios
            .iter()
            .find(|s| s.server_id == server_id && s.affected_metric == metric && s.contains(minute))
    }

    /// The single scenario that drives log synthesis for a server at `minute`.
    ///
    /// When several scenarios are active on one server the winner is the
    /// highest severity, ties broken by metric declaration order, then by
    /// earliest window start. Catalog array order is never significant.
    #[must_use]
    pub fn active_for_server(&self, server_id: &str, minute: u16) -> Option<&ScenarioDefinition> {
        self.scenarios
            .iter()
            .filter(|s| s.server_id == server_id && s.contains(minute))
            .min_by_key(|s| (Reverse(s.severity), s.affected_metric, s.start()))
    }
}
