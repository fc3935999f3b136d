//! Synthetic log lines, causally tied to the metrics they accompany.
//!
//! Three tiers: scenario-driven templates, threshold fallbacks, healthy
//! noise. The bank is indexed by enums so a missing (type, metric, severity)
//! cell is a compile error, not a runtime surprise.

// Template strings use {placeholder} syntax, not format! syntax
#![allow(clippy::literal_string_with_formatting_args)]

use rand::prelude::IndexedRandom;
use rand::seq::index::sample;
use rand_pcg::Pcg64;

use crate::catalog::{ScenarioDefinition, Severity};
use crate::fleet::{MetricKind, MetricSet, ServerType};

/// Fallback thresholds: a metric above its limit earns a log line even
/// without an active scenario.
const CPU_LIMIT: f64 = 80.0;
const MEMORY_LIMIT: f64 = 85.0;
const DISK_LIMIT: f64 = 90.0;
const NETWORK_LIMIT: f64 = 80.0;

/// Lines drawn for a critical scenario.
const CRITICAL_LINES: usize = 3;
/// Lines drawn for a warning scenario.
const WARNING_LINES: usize = 2;

/// Scenario-driven templates for one (server type, metric, severity) cell.
///
/// `{value}` is replaced with the affected metric's current value.
#[must_use]
const fn scenario_templates(
    ty: ServerType,
    metric: MetricKind,
    severity: Severity,
) -> &'static [&'static str] {
    use MetricKind::{Cpu, Disk, Memory, Network};
    use ServerType::{Application, Cache, Database, Loadbalancer, Storage, Web};
    use Severity::{Critical, Normal, Warning};

    match (ty, metric, severity) {
        (_, _, Normal) => &[],

        (Web, Cpu, Critical) => &[
            "[ERROR] nginx: worker process stuck at {value}% CPU",
            "[ERROR] nginx: 499 responses climbing - workers saturated",
            "[ERROR] kernel: watchdog: soft lockup on CPU#2",
        ],
        (Web, Cpu, Warning) => &[
            "[WARN] nginx: CPU at {value}% - request queue building",
            "[WARN] nginx: upstream response time degraded",
            "[WARN] php-fpm: slow request log growing",
        ],
        (Web, Memory, Critical) => &[
            "[ERROR] nginx: worker killed - out of memory ({value}% used)",
            "[ERROR] kernel: oom-killer invoked for nginx worker",
            "[ERROR] php-fpm: pool exhausted - cannot fork worker",
        ],
        (Web, Memory, Warning) => &[
            "[WARN] nginx: memory usage {value}% and rising",
            "[WARN] php-fpm: worker resident set growing steadily",
            "[WARN] nginx: proxy buffer allocation retried",
        ],
        (Web, Disk, Critical) => &[
            "[ERROR] nginx: access log write failed - disk {value}% full",
            "[ERROR] kernel: No space left on device /var/log",
            "[ERROR] nginx: client body temp file write failed",
        ],
        (Web, Disk, Warning) => &[
            "[WARN] logrotate: /var/log/nginx at {value}% of volume",
            "[WARN] nginx: access log rotation overdue",
            "[WARN] monitor: inode usage climbing on /var",
        ],
        (Web, Network, Critical) => &[
            "[ERROR] nginx: upstream timed out (110: Connection timed out)",
            "[ERROR] nginx: NIC saturation {value}% - packets dropped",
            "[ERROR] kernel: net_ratelimit: suppressing messages",
        ],
        (Web, Network, Warning) => &[
            "[WARN] nginx: bandwidth at {value}% of interface capacity",
            "[WARN] nginx: keepalive connections near limit",
            "[WARN] kernel: TCP retransmissions increasing on eth0",
        ],

        (Application, Cpu, Critical) => &[
            "[ERROR] JVM: CPU pegged at {value}% - GC thrashing suspected",
            "[ERROR] catalina: request threads exhausted - pool at maximum",
            "[ERROR] JVM: compilation threads starved - safepoint stalls",
        ],
        (Application, Cpu, Warning) => &[
            "[WARN] JVM: CPU {value}% - GC pause times increasing",
            "[WARN] catalina: thread pool utilization above comfort level",
            "[WARN] app: p99 latency degraded on /api endpoints",
        ],
        (Application, Memory, Critical) => &[
            "[ERROR] JVM: OutOfMemoryError - Java heap space",
            "[ERROR] JVM: heap at {value}% after full GC - no reclaim",
            "[ERROR] catalina: session store allocation failed",
        ],
        (Application, Memory, Warning) => &[
            "[WARN] JVM: old gen at {value}% - full GC frequency rising",
            "[WARN] JVM: metaspace usage approaching limit",
            "[WARN] app: response cache evicting under memory pressure",
        ],
        (Application, Disk, Critical) => &[
            "[ERROR] catalina: log write failed - disk {value}% full",
            "[ERROR] app: temp file creation failed - no space left",
            "[ERROR] JVM: heap dump aborted - insufficient disk space",
        ],
        (Application, Disk, Warning) => &[
            "[WARN] app: work directory at {value}% of volume",
            "[WARN] catalina: access log growth above baseline",
            "[WARN] monitor: disk usage trending up on /opt/app",
        ],
        (Application, Network, Critical) => &[
            "[ERROR] app: downstream connection pool exhausted",
            "[ERROR] app: socket backlog overflow - connections refused",
            "[ERROR] JVM: network I/O saturation {value}% - requests timing out",
        ],
        (Application, Network, Warning) => &[
            "[WARN] app: network utilization {value}% - latency sensitive",
            "[WARN] app: connection pool wait time increasing",
            "[WARN] app: retry rate on outbound calls elevated",
        ],

        (Database, Cpu, Critical) => &[
            "[ERROR] mysqld: CPU {value}% - query pileup, threads_running high",
            "[ERROR] mysqld: long running query killed after 300s",
            "[ERROR] mysqld: InnoDB purge lag growing - CPU saturated",
        ],
        (Database, Cpu, Warning) => &[
            "[WARN] mysqld: CPU at {value}% - slow query log growing",
            "[WARN] mysqld: thread contention on buffer pool mutex",
            "[WARN] mysqld: query response time degraded",
        ],
        (Database, Memory, Critical) => &[
            "[ERROR] mysqld: Out of memory - buffer pool allocation failed",
            "[ERROR] kernel: oom-killer invoked for mysqld",
            "[ERROR] mysqld: memory {value}% - new connections refused",
        ],
        (Database, Memory, Warning) => &[
            "[WARN] mysqld: buffer pool at {value}% of available memory",
            "[WARN] mysqld: temporary tables spilling to disk",
            "[WARN] mysqld: key cache hit rate dropping under pressure",
        ],
        (Database, Disk, Critical) => &[
            "[ERROR] mysqld: Disk full /var/lib/mysql (errcode: 28)",
            "[ERROR] mysqld: binary log write failed - disk {value}% used",
            "[ERROR] mysqld: InnoDB: Unable to extend tablespace",
        ],
        (Database, Disk, Warning) => &[
            "[WARN] mysqld: disk usage {value}% on /var/lib/mysql",
            "[WARN] mysqld: binlog retention may exceed free space",
            "[WARN] smartd: reallocated sector count increasing on sda",
        ],
        (Database, Network, Critical) => &[
            "[ERROR] mysqld: replication connection lost - retrying",
            "[ERROR] mysqld: semi-sync ack timeout - degrading to async",
            "[ERROR] mysqld: network {value}% saturated - replica lag critical",
        ],
        (Database, Network, Warning) => &[
            "[WARN] mysqld: replica lag increasing - network at {value}%",
            "[WARN] mysqld: aborted connects due to slow handshake",
            "[WARN] mysqld: dump thread throughput below replication rate",
        ],

        (Cache, Cpu, Critical) => &[
            "[ERROR] redis: event loop saturated - CPU {value}%",
            "[ERROR] redis: slow command blocking event loop (KEYS)",
            "[ERROR] redis: latency spikes exceed 1s - clients timing out",
        ],
        (Cache, Cpu, Warning) => &[
            "[WARN] redis: CPU {value}% - command latency rising",
            "[WARN] redis: rdb fork time increasing",
            "[WARN] redis: expired key sweep taking longer than cycle",
        ],
        (Cache, Memory, Critical) => &[
            "[ERROR] redis: OOM command not allowed - used_memory > maxmemory",
            "[ERROR] redis: memory {value}% - evicting keys aggressively",
            "[ERROR] redis: background save failed - cannot allocate memory",
        ],
        (Cache, Memory, Warning) => &[
            "[WARN] redis: used_memory at {value}% of maxmemory",
            "[WARN] redis: eviction rate climbing under memory pressure",
            "[WARN] redis: fragmentation ratio above 1.5",
        ],
        (Cache, Disk, Critical) => &[
            "[ERROR] redis: AOF write error - disk {value}% full",
            "[ERROR] redis: rdb snapshot failed - No space left on device",
            "[ERROR] redis: appendonly rewrite aborted",
        ],
        (Cache, Disk, Warning) => &[
            "[WARN] redis: AOF file at {value}% of volume",
            "[WARN] redis: rdb file growth above baseline",
            "[WARN] monitor: persistence volume usage trending up",
        ],
        (Cache, Network, Critical) => &[
            "[ERROR] redis: output buffer overflow - client disconnected",
            "[ERROR] redis: network {value}% saturated - replies delayed",
            "[ERROR] redis: replication link broken with replica",
        ],
        (Cache, Network, Warning) => &[
            "[WARN] redis: network utilization {value}% - pipeline latency up",
            "[WARN] redis: client output buffers growing",
            "[WARN] redis: partial resync requested by replica",
        ],

        (Storage, Cpu, Critical) => &[
            "[ERROR] nfsd: CPU {value}% - request backlog growing",
            "[ERROR] nfsd: all server threads busy - clients stalled",
            "[ERROR] kernel: nfsd soft lockup detected",
        ],
        (Storage, Cpu, Warning) => &[
            "[WARN] nfsd: CPU {value}% - op latency rising",
            "[WARN] nfsd: thread pool utilization elevated",
            "[WARN] monitor: storage host load above baseline",
        ],
        (Storage, Memory, Critical) => &[
            "[ERROR] nfsd: page cache thrashing - memory {value}%",
            "[ERROR] kernel: oom-killer invoked on storage host",
            "[ERROR] nfsd: export table allocation failed",
        ],
        (Storage, Memory, Warning) => &[
            "[WARN] nfsd: memory {value}% - cache hit rate dropping",
            "[WARN] monitor: dirty page ratio elevated",
            "[WARN] nfsd: readahead window shrinking under pressure",
        ],
        (Storage, Disk, Critical) => &[
            "[ERROR] nfsd: Filesystem full - write operations blocked",
            "[ERROR] nfsd: export volume {value}% full - quota exceeded",
            "[ERROR] kernel: XFS: metadata allocation failed on /export",
        ],
        (Storage, Disk, Warning) => &[
            "[WARN] nfsd: export volume at {value}% capacity",
            "[WARN] monitor: volume growth rate exceeds cleanup rate",
            "[WARN] smartd: pending sector count rising on sdb",
        ],
        (Storage, Network, Critical) => &[
            "[ERROR] nfsd: network {value}% saturated - RPC timeouts",
            "[ERROR] nfsd: TCP connection to client reset",
            "[ERROR] kernel: bonding: link failure on bond0",
        ],
        (Storage, Network, Warning) => &[
            "[WARN] nfsd: network utilization {value}% - throughput capped",
            "[WARN] nfsd: retransmitted RPC calls increasing",
            "[WARN] monitor: NIC rx drops climbing",
        ],

        (Loadbalancer, Cpu, Critical) => &[
            "[ERROR] haproxy: CPU {value}% - connection processing delayed",
            "[ERROR] haproxy: Backend api-servers DOWN - all checks failed",
            "[ERROR] haproxy: SSL handshake queue overflow",
        ],
        (Loadbalancer, Cpu, Warning) => &[
            "[WARN] haproxy: CPU {value}% - session rate near limit",
            "[WARN] haproxy: health check latency increasing",
            "[WARN] haproxy: SSL renegotiation rate elevated",
        ],
        (Loadbalancer, Memory, Critical) => &[
            "[ERROR] haproxy: session table full - connections rejected",
            "[ERROR] haproxy: memory {value}% - buffer allocation failed",
            "[ERROR] kernel: oom-killer considering haproxy",
        ],
        (Loadbalancer, Memory, Warning) => &[
            "[WARN] haproxy: memory {value}% - stick table churn high",
            "[WARN] haproxy: connection buffers under pressure",
            "[WARN] monitor: proxy resident memory trending up",
        ],
        (Loadbalancer, Disk, Critical) => &[
            "[ERROR] haproxy: log socket write failed - disk {value}% full",
            "[ERROR] rsyslogd: disk queue full - dropping proxy logs",
            "[ERROR] kernel: No space left on device /var/log",
        ],
        (Loadbalancer, Disk, Warning) => &[
            "[WARN] rsyslogd: proxy log volume at {value}% capacity",
            "[WARN] logrotate: haproxy log rotation overdue",
            "[WARN] monitor: /var/log growth above baseline",
        ],
        (Loadbalancer, Network, Critical) => &[
            "[ERROR] haproxy: frontend saturated {value}% - SYN backlog drops",
            "[ERROR] haproxy: connection limit reached - refusing clients",
            "[ERROR] kernel: conntrack table full - packets dropped",
        ],
        (Loadbalancer, Network, Warning) => &[
            "[WARN] haproxy: throughput {value}% of interface capacity",
            "[WARN] haproxy: session rate approaching configured max",
            "[WARN] kernel: TCP SYN retransmissions on frontend",
        ],
    }
}

/// Healthy noise for servers with nothing to report.
#[must_use]
const fn healthy_templates(ty: ServerType) -> &'static [&'static str] {
    match ty {
        ServerType::Web => &[
            "[INFO] nginx: access log rotated successfully",
            "[INFO] nginx: configuration reload completed",
            "[INFO] nginx: upstream health checks passing",
            "[INFO] certbot: certificate renewal check - no action needed",
        ],
        ServerType::Application => &[
            "[INFO] app: scheduled cache refresh completed",
            "[INFO] JVM: minor GC completed in 12ms",
            "[INFO] app: health endpoint responding normally",
            "[INFO] catalina: session cleanup task finished",
        ],
        ServerType::Database => &[
            "[INFO] mysqld: binary log rotated",
            "[INFO] mysqld: replication in sync - lag 0s",
            "[INFO] mysqld: slow query log empty this interval",
            "[INFO] mysqld: backup snapshot verified",
        ],
        ServerType::Cache => &[
            "[INFO] redis: rdb snapshot saved successfully",
            "[INFO] redis: keyspace hit rate nominal",
            "[INFO] redis: replication link healthy",
            "[INFO] redis: AOF rewrite completed",
        ],
        ServerType::Storage => &[
            "[INFO] nfsd: all exports responding normally",
            "[INFO] nfsd: scheduled scrub completed - no errors",
            "[INFO] smartd: all drives report healthy",
            "[INFO] nfsd: client mount table stable",
        ],
        ServerType::Loadbalancer => &[
            "[INFO] haproxy: all backends reporting UP",
            "[INFO] haproxy: configuration check passed",
            "[INFO] haproxy: stats socket responding",
            "[INFO] haproxy: SSL certificate chain valid",
        ],
    }
}

/// Format a percentage the way the templates expect it.
fn fmt_value(value: f64) -> String {
    format!("{value:.1}")
}

fn threshold_line(metric: MetricKind, value: f64) -> String {
    let value = fmt_value(value);
    match metric {
        MetricKind::Cpu => format!("[WARN] monitor: CPU usage {value}% exceeds threshold"),
        MetricKind::Memory => format!("[WARN] monitor: memory usage {value}% exceeds threshold"),
        MetricKind::Disk => format!("[WARN] monitor: disk usage {value}% exceeds threshold"),
        MetricKind::Network => {
            format!("[WARN] monitor: network utilization {value}% exceeds threshold")
        }
    }
}

const fn over_limit(metric: MetricKind, value: f64) -> bool {
    match metric {
        MetricKind::Cpu => value > CPU_LIMIT,
        MetricKind::Memory => value > MEMORY_LIMIT,
        MetricKind::Disk => value > DISK_LIMIT,
        MetricKind::Network => value > NETWORK_LIMIT,
    }
}

/// Synthesize the log lines for one server at one sample.
///
/// Never returns an empty vec: scenario templates first, then threshold
/// fallbacks, then healthy noise.
#[must_use]
pub fn synthesize(
    rng: &mut Pcg64,
    ty: ServerType,
    values: &MetricSet,
    scenario: Option<&ScenarioDefinition>,
) -> Vec<String> {
    if let Some(s) = scenario {
        let templates = scenario_templates(ty, s.affected_metric, s.severity);
        if !templates.is_empty() {
            let count = if s.severity == Severity::Critical {
                CRITICAL_LINES
            } else {
                WARNING_LINES
            };
            let value = fmt_value(values.get(s.affected_metric));
            // Draw without replacement so one sample never repeats a line.
            let picks = sample(rng, templates.len(), count.min(templates.len()));
            return picks
                .iter()
                .map(|i| templates[i].replace("{value}", &value))
                .collect();
        }
    }

    let breaches: Vec<String> = MetricKind::ALL
        .into_iter()
        .filter(|&m| over_limit(m, values.get(m)))
        .map(|m| threshold_line(m, values.get(m)))
        .collect();
    if !breaches.is_empty() {
        return breaches;
    }

    let healthy = healthy_templates(ty);
    let line = healthy
        .choose(rng)
        .copied()
        .unwrap_or("[INFO] monitor: no events this interval");
    vec![line.to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WavePattern;

    fn rng() -> Pcg64 {
        Pcg64::new(7, 0x0a02_bdbf_7bb3_c0a7)
    }

    fn quiet_values() -> MetricSet {
        MetricSet {
            cpu: 35.0,
            memory: 45.0,
            disk: 30.0,
            network: 60.0,
        }
    }

    fn scenario(metric: MetricKind, severity: Severity) -> ScenarioDefinition {
        ScenarioDefinition {
            id: "test".to_string(),
            name: "test".to_string(),
            description: String::new(),
            time_range: [0, 100],
            server_id: "web-nginx-icn-01".to_string(),
            affected_metric: metric,
            severity,
            pattern: WavePattern::Gradual,
            base_value: 30.0,
            peak_value: 90.0,
        }
    }

    #[test]
    fn bank_is_fully_populated() {
        let types = [
            ServerType::Web,
            ServerType::Application,
            ServerType::Database,
            ServerType::Cache,
            ServerType::Storage,
            ServerType::Loadbalancer,
        ];
        for ty in types {
            assert!(
                healthy_templates(ty).len() >= 3,
                "thin healthy pool for {}",
                ty.name()
            );
            for metric in MetricKind::ALL {
                assert!(
                    scenario_templates(ty, metric, Severity::Critical).len() >= CRITICAL_LINES,
                    "thin critical pool for {}/{metric}",
                    ty.name()
                );
                assert!(
                    scenario_templates(ty, metric, Severity::Warning).len() >= WARNING_LINES,
                    "thin warning pool for {}/{metric}",
                    ty.name()
                );
                assert!(scenario_templates(ty, metric, Severity::Normal).is_empty());
            }
        }
    }

    #[test]
    fn critical_scenario_yields_three_distinct_lines() {
        let s = scenario(MetricKind::Memory, Severity::Critical);
        let values = MetricSet {
            memory: 94.2,
            ..quiet_values()
        };
        let lines = synthesize(&mut rng(), ServerType::Application, &values, Some(&s));
        assert_eq!(lines.len(), 3);
        let mut unique = lines.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3, "lines must be drawn without replacement");
    }

    #[test]
    fn warning_scenario_yields_two_lines() {
        let s = scenario(MetricKind::Cpu, Severity::Warning);
        let lines = synthesize(&mut rng(), ServerType::Web, &quiet_values(), Some(&s));
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn value_placeholder_substituted() {
        let s = scenario(MetricKind::Disk, Severity::Critical);
        let values = MetricSet {
            disk: 91.7,
            ..quiet_values()
        };
        let lines = synthesize(&mut rng(), ServerType::Database, &values, Some(&s));
        assert!(lines.iter().all(|l| !l.contains("{value}")));
        assert!(
            lines.iter().any(|l| l.contains("91.7")),
            "at least one template carries the value: {lines:?}"
        );
    }

    #[test]
    fn threshold_fallback_without_scenario() {
        let values = MetricSet {
            cpu: 85.0,
            memory: 88.0,
            disk: 50.0,
            network: 60.0,
        };
        let lines = synthesize(&mut rng(), ServerType::Web, &values, None);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("CPU usage 85.0%"));
        assert!(lines[1].contains("memory usage 88.0%"));
    }

    #[test]
    fn threshold_boundaries_are_exclusive() {
        let values = MetricSet {
            cpu: 80.0,
            memory: 85.0,
            disk: 90.0,
            network: 80.0,
        };
        let lines = synthesize(&mut rng(), ServerType::Web, &values, None);
        assert_eq!(lines.len(), 1, "values at the limit do not breach");
        assert!(lines[0].starts_with("[INFO]"));
    }

    #[test]
    fn healthy_server_gets_one_info_line() {
        let lines = synthesize(&mut rng(), ServerType::Cache, &quiet_values(), None);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[INFO]"));
    }

    #[test]
    fn normal_severity_scenario_falls_through() {
        let s = scenario(MetricKind::Cpu, Severity::Normal);
        let lines = synthesize(&mut rng(), ServerType::Web, &quiet_values(), Some(&s));
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[INFO]"));
    }

    #[test]
    fn output_never_empty() {
        let mut r = rng();
        for ty in [ServerType::Web, ServerType::Storage, ServerType::Database] {
            for scenario_opt in [None, Some(scenario(MetricKind::Network, Severity::Warning))] {
                let lines = synthesize(&mut r, ty, &quiet_values(), scenario_opt.as_ref());
                assert!(!lines.is_empty());
            }
        }
    }

    #[test]
    fn same_seed_same_lines() {
        let s = scenario(MetricKind::Cpu, Severity::Critical);
        let a = synthesize(&mut rng(), ServerType::Web, &quiet_values(), Some(&s));
        let b = synthesize(&mut rng(), ServerType::Web, &quiet_values(), Some(&s));
        assert_eq!(a, b);
    }
}
