//! Threshold health classification and per-slot fleet summaries.

use serde::{Deserialize, Serialize};

use crate::catalog::Severity;
use crate::dataset::Server24hDataset;
use crate::fleet::{MetricKind, MetricSet};
use crate::generator::SAMPLE_INTERVAL_MIN;

/// Warning/critical limits for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricThresholds {
    pub warning: f64,
    pub critical: f64,
}

/// Classification limits. Network runs hot by design, so its limits sit lower.
#[must_use]
pub const fn thresholds(metric: MetricKind) -> MetricThresholds {
    match metric {
        MetricKind::Cpu | MetricKind::Memory | MetricKind::Disk => MetricThresholds {
            warning: 80.0,
            critical: 90.0,
        },
        MetricKind::Network => MetricThresholds {
            warning: 70.0,
            critical: 85.0,
        },
    }
}

/// Health state of one server at one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Online,
    Warning,
    Critical,
}

/// Classify a sample: the worst metric wins.
#[must_use]
pub fn classify(values: &MetricSet) -> ServerStatus {
    let mut status = ServerStatus::Online;
    for metric in MetricKind::ALL {
        let value = values.get(metric);
        let limits = thresholds(metric);
        let this = if value >= limits.critical {
            ServerStatus::Critical
        } else if value >= limits.warning {
            ServerStatus::Warning
        } else {
            ServerStatus::Online
        };
        status = status.max(this);
    }
    status
}

/// Direction a metric moved since the previous sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Movement larger than this many points counts as a trend.
const TREND_DELTA: f64 = 5.0;

const fn trend_of(current: f64, previous: f64) -> Trend {
    let diff = current - previous;
    if diff > TREND_DELTA {
        Trend::Up
    } else if diff < -TREND_DELTA {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// One metric over its threshold at a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThresholdAlert {
    pub server_id: String,
    pub metric: MetricKind,
    pub value: f64,
    pub threshold: f64,
    pub severity: Severity,
    pub trend: Trend,
}

/// Fleet-wide summary for one grid slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetSnapshot {
    pub minute_of_day: u16,
    pub total: usize,
    pub healthy: usize,
    pub warning: usize,
    pub critical: usize,
    pub alerts: Vec<ThresholdAlert>,
}

impl FleetSnapshot {
    /// Summarize the fleet at the slot containing `minute`.
    ///
    /// Trends compare against the previous slot, wrapping across midnight.
    #[must_use]
    pub fn at_minute(servers: &[Server24hDataset], minute: u16) -> Self {
        let slot_minute = (minute % crate::catalog::MINUTES_PER_DAY)
            / SAMPLE_INTERVAL_MIN
            * SAMPLE_INTERVAL_MIN;
        let prev_minute = if slot_minute == 0 {
            crate::catalog::MINUTES_PER_DAY - SAMPLE_INTERVAL_MIN
        } else {
            slot_minute - SAMPLE_INTERVAL_MIN
        };

        let mut healthy = 0;
        let mut warning = 0;
        let mut critical = 0;
        let mut alerts = Vec::new();

        for server in servers {
            let sample = server.at_minute(slot_minute);
            let previous = server.at_minute(prev_minute);
            match classify(&sample.values()) {
                ServerStatus::Online => healthy += 1,
                ServerStatus::Warning => warning += 1,
                ServerStatus::Critical => critical += 1,
            }

            for metric in MetricKind::ALL {
                let value = sample.values().get(metric);
                let limits = thresholds(metric);
                let severity = if value >= limits.critical {
                    Severity::Critical
                } else if value >= limits.warning {
                    Severity::Warning
                } else {
                    continue;
                };
                let threshold = if severity == Severity::Critical {
                    limits.critical
                } else {
                    limits.warning
                };
                alerts.push(ThresholdAlert {
                    server_id: server.server_id.clone(),
                    metric,
                    value,
                    threshold,
                    severity,
                    trend: trend_of(value, previous.values().get(metric)),
                });
            }
        }

        Self {
            minute_of_day: slot_minute,
            total: servers.len(),
            healthy,
            warning,
            critical,
            alerts,
        }
    }
}
