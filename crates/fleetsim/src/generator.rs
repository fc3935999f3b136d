//! Sample generation: jittered baselines, scenario overlays, log synthesis.
//!
//! Each (server, minute) step gets its own PRNG seeded from the dataset seed,
//! the server id, and the minute. Any slot can be regenerated independently
//! and two runs with the same seed are byte-identical.

use rand::Rng;
use rand_pcg::Pcg64;

use crate::catalog::{MINUTES_PER_DAY, ScenarioCatalog};
use crate::dataset::Fixed10MinMetric;
use crate::fleet::{MetricKind, MetricSet, ServerProfile};
use crate::{logsynth, overlay};

/// Minutes between samples.
pub const SAMPLE_INTERVAL_MIN: u16 = 10;

/// Samples per server per day.
pub const SAMPLES_PER_DAY: usize = (MINUTES_PER_DAY / SAMPLE_INTERVAL_MIN) as usize;

/// Pcg64 stream constant shared by every step RNG.
const RNG_STREAM: u128 = 0x0a02_bdbf_7bb3_c0a7;

/// Jitter half-width as a fraction of the baseline (plus/minus 5%).
const JITTER_SPAN: f64 = 0.1;

/// Fold the dataset seed, server id, and minute into one step seed (FNV-1a).
fn step_seed(seed: u64, server_id: &str, minute: u16) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = FNV_OFFSET ^ seed;
    for byte in server_id.bytes().chain(minute.to_le_bytes()) {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// The PRNG for one (server, minute) step.
#[must_use]
pub(crate) fn step_rng(seed: u64, server_id: &str, minute: u16) -> Pcg64 {
    Pcg64::new(step_seed(seed, server_id, minute).into(), RNG_STREAM)
}

/// Baseline with plus/minus 5% multiplicative jitter.
fn jittered(rng: &mut Pcg64, baseline: f64) -> f64 {
    baseline + baseline * (rng.random::<f64>() - 0.5) * JITTER_SPAN
}

/// Round to one decimal place, matching the stored precision.
#[must_use]
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Generate the sample for one server at one minute of day.
///
/// Per metric: jitter the baseline, then let a matching scenario replace the
/// jittered value entirely. Log lines are synthesized from the post-overlay
/// values and the single active scenario for the server.
#[must_use]
pub fn generate_sample(
    seed: u64,
    profile: &ServerProfile,
    catalog: &ScenarioCatalog,
    minute: u16,
) -> Fixed10MinMetric {
    let mut rng = step_rng(seed, &profile.server_id, minute);

    let mut values = MetricSet {
        cpu: 0.0,
        memory: 0.0,
        disk: 0.0,
        network: 0.0,
    };
    // Jitter draws happen for every metric so the RNG stream is stable
    // whether or not a scenario matches.
    for metric in MetricKind::ALL {
        let base = jittered(&mut rng, profile.baseline.get(metric));
        let value = overlay::apply(catalog, &profile.server_id, metric, minute, base);
        let value = round1(value.clamp(0.0, 100.0));
        match metric {
            MetricKind::Cpu => values.cpu = value,
            MetricKind::Memory => values.memory = value,
            MetricKind::Disk => values.disk = value,
            MetricKind::Network => values.network = value,
        }
    }

    let active = catalog.active_for_server(&profile.server_id, minute);
    let logs = logsynth::synthesize(&mut rng, profile.server_type, &values, active);

    Fixed10MinMetric {
        minute_of_day: minute,
        cpu: values.cpu,
        memory: values.memory,
        disk: values.disk,
        network: values.network,
        logs,
    }
}

/// Generate all 144 samples for one server, minute 0 through 1430.
#[must_use]
pub fn generate_server_day(
    seed: u64,
    profile: &ServerProfile,
    catalog: &ScenarioCatalog,
) -> Vec<Fixed10MinMetric> {
    (0..SAMPLES_PER_DAY)
        .map(|i| {
            #[allow(clippy::cast_possible_truncation)]
            let minute = (i as u16) * SAMPLE_INTERVAL_MIN;
            generate_sample(seed, profile, catalog, minute)
        })
        .collect()
}
