//! The assembled dataset: one simulated day for the whole fleet.
//!
//! Built once from a validated roster and catalog, immutable after that.
//! Serializes to camelCase JSON for hand-off to dashboards and tooling.

use serde::{Deserialize, Serialize};

use crate::catalog::{MINUTES_PER_DAY, ScenarioCatalog};
use crate::fleet::{FleetRoster, MetricSet, ServerType};
use crate::generator::{self, SAMPLE_INTERVAL_MIN};

/// One sample on the ten-minute grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixed10MinMetric {
    pub minute_of_day: u16,
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
    pub logs: Vec<String>,
}

impl Fixed10MinMetric {
    /// The four metric values as a set.
    #[must_use]
    pub const fn values(&self) -> MetricSet {
        MetricSet {
            cpu: self.cpu,
            memory: self.memory,
            disk: self.disk,
            network: self.network,
        }
    }
}

/// One server's full simulated day.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server24hDataset {
    pub server_id: String,
    pub server_type: ServerType,
    pub location: String,
    pub baseline: MetricSet,
    /// Exactly 144 samples, minute 0 through 1430, step 10.
    pub data: Vec<Fixed10MinMetric>,
}

impl Server24hDataset {
    /// Index of the grid slot containing `minute` (any minute of day).
    fn slot_index(minute: u16) -> usize {
        usize::from((minute % MINUTES_PER_DAY) / SAMPLE_INTERVAL_MIN)
    }

    /// The sample covering `minute`, floored to the ten-minute grid.
    #[must_use]
    pub fn at_minute(&self, minute: u16) -> &Fixed10MinMetric {
        &self.data[Self::slot_index(minute)]
    }

    /// The last `count` samples ending at the slot containing `minute`,
    /// in chronological order, wrapping across midnight.
    #[must_use]
    pub fn recent_window(&self, minute: u16, count: usize) -> Vec<&Fixed10MinMetric> {
        let count = count.min(self.data.len()).max(1);
        let end = Self::slot_index(minute);
        (0..count)
            .map(|k| {
                let idx = (end + self.data.len() - (count - 1 - k)) % self.data.len();
                &self.data[idx]
            })
            .collect()
    }
}

/// The whole fleet's day, plus the seed that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetDataset {
    pub seed: u64,
    pub servers: Vec<Server24hDataset>,
}

impl FleetDataset {
    /// Eagerly generate the day for every server in the roster.
    #[must_use]
    pub fn build(roster: &FleetRoster, catalog: &ScenarioCatalog, seed: u64) -> Self {
        let servers = roster
            .servers()
            .iter()
            .map(|profile| Server24hDataset {
                server_id: profile.server_id.clone(),
                server_type: profile.server_type,
                location: profile.location.clone(),
                baseline: profile.baseline,
                data: generator::generate_server_day(seed, profile, catalog),
            })
            .collect();
        Self { seed, servers }
    }

    #[must_use]
    pub fn get(&self, server_id: &str) -> Option<&Server24hDataset> {
        self.servers.iter().find(|s| s.server_id == server_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::MetricKind;
    use crate::generator::SAMPLES_PER_DAY;

    fn dataset() -> FleetDataset {
        let roster = FleetRoster::embedded().unwrap();
        let catalog = ScenarioCatalog::embedded(&roster).unwrap();
        FleetDataset::build(&roster, &catalog, 42)
    }

    #[test]
    fn full_fleet_coverage() {
        let ds = dataset();
        assert_eq!(ds.servers.len(), 15);
        for server in &ds.servers {
            assert_eq!(server.data.len(), SAMPLES_PER_DAY);
        }
    }

    #[test]
    fn build_is_deterministic() {
        let a = dataset();
        let b = dataset();
        for (x, y) in a.servers.iter().zip(&b.servers) {
            assert_eq!(x.server_id, y.server_id);
            assert_eq!(x.data, y.data);
        }
    }

    #[test]
    fn at_minute_floors_to_grid() {
        let ds = dataset();
        let server = ds.get("web-nginx-icn-01").unwrap();
        assert_eq!(server.at_minute(0).minute_of_day, 0);
        assert_eq!(server.at_minute(9).minute_of_day, 0);
        assert_eq!(server.at_minute(10).minute_of_day, 10);
        assert_eq!(server.at_minute(1439).minute_of_day, 1430);
    }

    #[test]
    fn recent_window_is_chronological() {
        let ds = dataset();
        let server = ds.get("api-was-icn-01").unwrap();
        let window = server.recent_window(300, 6);
        assert_eq!(window.len(), 6);
        let minutes: Vec<u16> = window.iter().map(|s| s.minute_of_day).collect();
        assert_eq!(minutes, vec![250, 260, 270, 280, 290, 300]);
    }

    #[test]
    fn recent_window_wraps_midnight() {
        let ds = dataset();
        let server = ds.get("api-was-icn-01").unwrap();
        let window = server.recent_window(10, 4);
        let minutes: Vec<u16> = window.iter().map(|s| s.minute_of_day).collect();
        assert_eq!(minutes, vec![1420, 1430, 0, 10]);
    }

    #[test]
    fn recent_window_caps_at_day_length() {
        let ds = dataset();
        let server = ds.get("api-was-icn-01").unwrap();
        assert_eq!(server.recent_window(0, 500).len(), SAMPLES_PER_DAY);
    }

    #[test]
    fn json_wire_format_is_camel_case() {
        let ds = dataset();
        let json = serde_json::to_string(&ds.servers[0]).unwrap();
        assert!(json.contains("\"serverId\""));
        assert!(json.contains("\"serverType\""));
        assert!(json.contains("\"minuteOfDay\""));
        assert!(json.contains("\"baseline\""));
        assert!(!json.contains("\"server_id\""));
    }

    #[test]
    fn json_round_trip() {
        let ds = dataset();
        let json = serde_json::to_string(&ds).unwrap();
        let back: FleetDataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, ds.seed);
        assert_eq!(back.servers.len(), ds.servers.len());
        assert_eq!(back.servers[3].data, ds.servers[3].data);
    }

    #[test]
    fn scenario_shape_visible_in_dataset() {
        // nfs-disk-growth: gradual 65 -> 86 over [780, 1080]; disk values
        // should be non-decreasing across the window (monotone ramp).
        let ds = dataset();
        let server = ds.get("storage-nfs-icn-01").unwrap();
        let mut prev = 0.0_f64;
        for minute in (780..=1080).step_by(10) {
            let v = server.at_minute(minute).disk;
            assert!(v >= prev, "disk dipped to {v} at minute {minute}");
            prev = v;
        }
        assert!((server.at_minute(1080).disk - 86.0).abs() < 0.101);
    }

    #[test]
    fn baseline_matches_roster() {
        let roster = FleetRoster::embedded().unwrap();
        let ds = dataset();
        for server in &ds.servers {
            let profile = roster.get(&server.server_id).unwrap();
            for metric in MetricKind::ALL {
                assert_eq!(server.baseline.get(metric), profile.baseline.get(metric));
            }
        }
    }
}
