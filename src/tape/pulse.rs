/// PAL C64 CPU clock in Hz.
pub const PAL_CPU_FREQ: f64 = 985_248.0;
/// NTSC C64 CPU clock in Hz.
pub const NTSC_CPU_FREQ: f64 = 1_022_727.0;

/// TAP pulse lengths are stored in units of 8 CPU cycles.
const CYCLES_PER_UNIT: f64 = 8.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PulseStats {
    pub pulses: usize,
    /// Pulses too long for one byte, written as 0.
    pub overflows: usize,
    /// Pulses with a negative duration (crossings out of order), written as 0.
    pub negatives: usize,
}

/// Quantize crossing timestamps (microseconds) into TAP pulse bytes.
///
/// The first pulse has no predecessor and is always 0. Durations that scale
/// outside 0..=255 units become 0; everything else is truncated to a byte.
pub fn quantize(crossings: &[f64], cpu_freq: f64) -> (Vec<u8>, PulseStats) {
    let scale = (1e-6 * cpu_freq) / CYCLES_PER_UNIT;
    let mut stats = PulseStats::default();

    let pulses: Vec<u8> = crossings
        .iter()
        .enumerate()
        .map(|(k, &t)| {
            let diff = if k == 0 { 0.0 } else { t - crossings[k - 1] };
            let scaled = diff * scale;
            if scaled > 255.0 {
                stats.overflows += 1;
                0
            } else if scaled < 0.0 {
                stats.negatives += 1;
                0
            } else {
                scaled as u8
            }
        })
        .collect();

    stats.pulses = pulses.len();
    if stats.overflows > 0 {
        log::warn!(
            "{} of {} pulses too long for a byte, written as 0",
            stats.overflows,
            stats.pulses
        );
    }
    if stats.negatives > 0 {
        log::warn!(
            "{} of {} pulses have a negative duration, written as 0",
            stats.negatives,
            stats.pulses
        );
    }

    (pulses, stats)
}
