//! Fleet roster: the fixed set of servers the simulator models.
//!
//! The roster is plain YAML configuration. A default 15-server fleet ships
//! embedded in the crate; callers may load their own roster instead.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Role of a server in the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerType {
    Web,
    Application,
    Database,
    Cache,
    Storage,
    Loadbalancer,
}

impl ServerType {
    /// Wire/display name of the server type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::Application => "application",
            Self::Database => "database",
            Self::Cache => "cache",
            Self::Storage => "storage",
            Self::Loadbalancer => "loadbalancer",
        }
    }
}

/// One of the four tracked metrics, in declaration order.
///
/// The derived ordering (cpu, memory, disk, network) is significant: it is
/// the tie-break order when several scenarios are active on one server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Cpu,
    Memory,
    Disk,
    Network,
}

impl MetricKind {
    /// All metrics in declaration order.
    pub const ALL: [Self; 4] = [Self::Cpu, Self::Memory, Self::Disk, Self::Network];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Disk => "disk",
            Self::Network => "network",
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per tracked metric, in percent.
///
/// Used both for roster baselines and for the four values of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    pub network: f64,
}

impl MetricSet {
    #[must_use]
    pub const fn get(&self, metric: MetricKind) -> f64 {
        match metric {
            MetricKind::Cpu => self.cpu,
            MetricKind::Memory => self.memory,
            MetricKind::Disk => self.disk,
            MetricKind::Network => self.network,
        }
    }
}

/// A single server in the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerProfile {
    pub server_id: String,
    pub server_type: ServerType,
    pub location: String,
    pub hostname: String,
    /// Healthy-state metric levels the generator jitters around.
    pub baseline: MetricSet,
}

/// Validated, immutable fleet roster.
#[derive(Debug, Clone)]
pub struct FleetRoster {
    servers: Vec<ServerProfile>,
}

impl FleetRoster {
    /// Build a roster from profiles, rejecting empty rosters and duplicate ids.
    ///
    /// # Errors
    /// Returns [`CatalogError`] if validation fails.
    pub fn build(servers: Vec<ServerProfile>) -> Result<Self, CatalogError> {
        if servers.is_empty() {
            return Err(CatalogError::EmptyRoster);
        }
        let mut seen = std::collections::HashSet::new();
        for server in &servers {
            if !seen.insert(server.server_id.as_str()) {
                return Err(CatalogError::DuplicateServer(server.server_id.clone()));
            }
        }
        Ok(Self { servers })
    }

    /// Parse and validate a roster from YAML text.
    ///
    /// # Errors
    /// Returns [`CatalogError`] on parse or validation failure.
    pub fn from_yaml(text: &str) -> Result<Self, CatalogError> {
        let servers: Vec<ServerProfile> = serde_yaml::from_str(text)?;
        Self::build(servers)
    }

    /// The default 15-server demo fleet shipped with the crate.
    ///
    /// # Errors
    /// Returns [`CatalogError`] if the embedded configuration is invalid.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_yaml(include_str!("../config/servers.yaml"))
    }

    #[must_use]
    pub fn servers(&self) -> &[ServerProfile] {
        &self.servers
    }

    #[must_use]
    pub fn get(&self, server_id: &str) -> Option<&ServerProfile> {
        self.servers.iter().find(|s| s.server_id == server_id)
    }

    #[must_use]
    pub fn contains(&self, server_id: &str) -> bool {
        self.get(server_id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.servers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str) -> ServerProfile {
        ServerProfile {
            server_id: id.to_string(),
            server_type: ServerType::Web,
            location: "Seoul-ICN-AZ1".to_string(),
            hostname: format!("{id}.demo.internal"),
            baseline: MetricSet {
                cpu: 35.0,
                memory: 45.0,
                disk: 30.0,
                network: 60.0,
            },
        }
    }

    #[test]
    fn embedded_roster_has_fifteen_servers() {
        let roster = FleetRoster::embedded().unwrap();
        assert_eq!(roster.len(), 15);
    }

    #[test]
    fn embedded_roster_covers_all_server_types() {
        let roster = FleetRoster::embedded().unwrap();
        for ty in [
            ServerType::Web,
            ServerType::Application,
            ServerType::Database,
            ServerType::Cache,
            ServerType::Storage,
            ServerType::Loadbalancer,
        ] {
            assert!(
                roster.servers().iter().any(|s| s.server_type == ty),
                "missing server type {}",
                ty.name()
            );
        }
    }

    #[test]
    fn embedded_roster_baselines_in_range() {
        let roster = FleetRoster::embedded().unwrap();
        for server in roster.servers() {
            for metric in MetricKind::ALL {
                let value = server.baseline.get(metric);
                assert!(
                    (0.0..=100.0).contains(&value),
                    "{} {metric} baseline {value} out of range",
                    server.server_id
                );
            }
        }
    }

    #[test]
    fn duplicate_server_id_rejected() {
        let result = FleetRoster::build(vec![profile("web-01"), profile("web-01")]);
        assert!(matches!(result, Err(CatalogError::DuplicateServer(_))));
    }

    #[test]
    fn empty_roster_rejected() {
        assert!(matches!(
            FleetRoster::build(Vec::new()),
            Err(CatalogError::EmptyRoster)
        ));
    }

    #[test]
    fn lookup_by_id() {
        let roster = FleetRoster::embedded().unwrap();
        assert!(roster.contains("db-mysql-icn-primary"));
        assert!(!roster.contains("no-such-server"));
        let db = roster.get("db-mysql-icn-primary").unwrap();
        assert_eq!(db.server_type, ServerType::Database);
    }

    #[test]
    fn metric_set_get_matches_fields() {
        let set = MetricSet {
            cpu: 1.0,
            memory: 2.0,
            disk: 3.0,
            network: 4.0,
        };
        assert_eq!(set.get(MetricKind::Cpu), 1.0);
        assert_eq!(set.get(MetricKind::Memory), 2.0);
        assert_eq!(set.get(MetricKind::Disk), 3.0);
        assert_eq!(set.get(MetricKind::Network), 4.0);
    }

    #[test]
    fn metric_order_is_declaration_order() {
        assert!(MetricKind::Cpu < MetricKind::Memory);
        assert!(MetricKind::Memory < MetricKind::Disk);
        assert!(MetricKind::Disk < MetricKind::Network);
    }

    #[test]
    fn server_profile_serializes_camel_case() {
        let json = serde_json::to_string(&profile("web-01")).unwrap();
        assert!(json.contains("\"serverId\""));
        assert!(json.contains("\"serverType\""));
        assert!(json.contains("\"web\""));
    }
}
