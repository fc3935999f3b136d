//! Waveform shaping for scenario overlays.
//!
//! Pure math: given a scenario and a minute inside its window, produce the
//! metric value the scenario dictates. The generator substitutes this value
//! for the jittered baseline whenever a scenario matches.

use crate::catalog::{ScenarioCatalog, ScenarioDefinition, WavePattern};
use crate::fleet::MetricKind;

/// Fraction of the window a spike spends ramping before holding peak.
const SPIKE_RAMP: f64 = 0.2;

/// Full sine cycles an oscillating scenario completes per window.
const OSCILLATE_CYCLES: f64 = 6.0;

/// Shape a value for `progress` in `[0, 1]` across the window.
#[must_use]
pub fn shaped_value(pattern: WavePattern, progress: f64, base: f64, peak: f64) -> f64 {
    match pattern {
        WavePattern::Spike => {
            if progress < SPIKE_RAMP {
                base + (peak - base) * (progress / SPIKE_RAMP)
            } else {
                peak
            }
        }
        WavePattern::Gradual => base + (peak - base) * progress,
        WavePattern::Oscillate => {
            let amplitude = (peak - base) / 2.0;
            let midpoint = base + amplitude;
            let raw = midpoint + amplitude * (progress * OSCILLATE_CYCLES * std::f64::consts::TAU).sin();
            raw.clamp(base.min(peak), base.max(peak))
        }
        WavePattern::Sustained => peak,
    }
}

/// The value a scenario dictates at `minute`, clamped to `0..=100`.
///
/// Callers must only pass minutes inside the scenario window; catalog
/// validation guarantees the window has positive duration.
#[must_use]
pub fn overlay_value(scenario: &ScenarioDefinition, minute: u16) -> f64 {
    let span = f64::from(scenario.end() - scenario.start());
    let progress = f64::from(minute.saturating_sub(scenario.start())) / span;
    shaped_value(
        scenario.pattern,
        progress.clamp(0.0, 1.0),
        scenario.base_value,
        scenario.peak_value,
    )
    .clamp(0.0, 100.0)
}

/// Overlay lookup: the scenario value when one matches, else `fallback`.
#[must_use]
pub fn apply(
    catalog: &ScenarioCatalog,
    server_id: &str,
    metric: MetricKind,
    minute: u16,
    fallback: f64,
) -> f64 {
    catalog
        .entry_for(server_id, metric, minute)
        .map_or(fallback, |scenario| overlay_value(scenario, minute))
}
