pub mod crossing;
pub mod path;
pub mod pulse;

use crate::audio::decode::SampleMatrix;
use crate::audio::reduce;
use pulse::PulseStats;

/// Run reducer, crossing extractor and quantizer over decoded samples.
pub fn pulses_from_samples(matrix: &SampleMatrix, cpu_freq: f64) -> (Vec<u8>, PulseStats) {
    let crossings = {
        let trace = reduce::reduce(matrix);
        crossing::extract_crossings(&trace)
    };
    log::info!("Zero crossings: {}", crossings.len());
    pulse::quantize(&crossings, cpu_freq)
}
