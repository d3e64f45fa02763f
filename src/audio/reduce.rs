use super::decode::SampleMatrix;

/// One mono sample with its capture time in whole microseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TracePoint {
    pub timestamp_us: u64,
    pub amplitude: f64,
}

/// Timestamp of sample `index`, truncated after the float multiply.
pub fn sample_timestamp_us(index: usize, sample_rate: u32) -> u64 {
    (index as f64 / sample_rate as f64 * 1e6) as u64
}

/// Downmix a sample matrix to a mono trace.
///
/// Multi-channel frames are averaged; a trailing partial frame is dropped.
pub fn reduce(matrix: &SampleMatrix) -> Vec<TracePoint> {
    let channels = matrix.channels;
    if channels == 0 || matrix.sample_rate == 0 {
        return Vec::new();
    }

    let trace: Vec<TracePoint> = matrix
        .samples
        .chunks_exact(channels)
        .enumerate()
        .map(|(i, frame)| {
            let amplitude = if channels == 1 {
                frame[0] as f64
            } else {
                frame.iter().map(|&s| s as f64).sum::<f64>() / channels as f64
            };
            TracePoint {
                timestamp_us: sample_timestamp_us(i, matrix.sample_rate),
                amplitude,
            }
        })
        .collect();

    log::debug!("Reduced {} channel(s) to {} trace points", channels, trace.len());
    trace
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(samples: Vec<f32>, channels: usize, sample_rate: u32) -> SampleMatrix {
        SampleMatrix {
            samples,
            channels,
            sample_rate,
        }
    }

    #[test]
    fn mono_passes_amplitudes_through() {
        let trace = reduce(&matrix(vec![-1.0, 1.0, -1.0, 1.0], 1, 4));
        let amps: Vec<f64> = trace.iter().map(|p| p.amplitude).collect();
        let times: Vec<u64> = trace.iter().map(|p| p.timestamp_us).collect();
        assert_eq!(amps, vec![-1.0, 1.0, -1.0, 1.0]);
        assert_eq!(times, vec![0, 250_000, 500_000, 750_000]);
    }

    #[test]
    fn stereo_is_averaged() {
        // Two frames: (2, 0) and (-2, 0)
        let trace = reduce(&matrix(vec![2.0, 0.0, -2.0, 0.0], 2, 44100));
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].amplitude, 1.0);
        assert_eq!(trace[1].amplitude, -1.0);
    }

    #[test]
    fn empty_input_gives_empty_trace() {
        assert!(reduce(&matrix(vec![], 1, 44100)).is_empty());
        assert!(reduce(&matrix(vec![], 2, 44100)).is_empty());
    }

    #[test]
    fn partial_frame_is_dropped() {
        let trace = reduce(&matrix(vec![1.0, 1.0, 0.5], 2, 8000));
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn timestamps_truncate() {
        // 1 / 44100 * 1e6 = 22.675..., 2 / 44100 * 1e6 = 45.351...
        assert_eq!(sample_timestamp_us(1, 44100), 22);
        assert_eq!(sample_timestamp_us(2, 44100), 45);
        assert_eq!(sample_timestamp_us(3, 3), 1_000_000);
    }

    #[test]
    fn timestamps_are_monotonic() {
        let samples: Vec<f32> = (0..5000).map(|i| (i as f32 * 0.1).sin()).collect();
        let trace = reduce(&matrix(samples, 1, 48000));
        assert!(trace
            .windows(2)
            .all(|w| w[1].timestamp_us >= w[0].timestamp_us));
        // 48kHz samples are ~20.8us apart, so every step crosses a microsecond boundary
        assert!(trace.windows(2).all(|w| w[1].timestamp_us > w[0].timestamp_us));
    }
}
