use crate::audio::reduce::TracePoint;

/// Find rising (negative to non-negative) zero crossings in a mono trace.
///
/// Each crossing is placed at `cur.timestamp + zo - lastzo`, where `zo` is the
/// linearly interpolated crossing offset of the pair as a fraction of one
/// sample step and `lastzo` is the offset of the most recent earlier pair that
/// had one, whether or not that pair was a rising crossing. Pairs with equal
/// amplitudes (or non-finite samples) have no offset and leave `lastzo`
/// untouched.
///
/// The first sample is compared against an implicit zero-amplitude
/// predecessor. That pair can never be a rising crossing but it seeds
/// `lastzo`, so a crossing right at the start of the trace is kept.
pub fn extract_crossings(trace: &[TracePoint]) -> Vec<f64> {
    let mut crossings = Vec::new();
    let mut lastzo: Option<f64> = None;
    let mut prev = 0.0f64;

    for point in trace {
        let cur = point.amplitude;

        let zo = prev / (prev - cur);
        if prev != cur && zo.is_finite() {
            if prev < 0.0 && cur >= 0.0 {
                if let Some(last) = lastzo {
                    crossings.push(point.timestamp_us as f64 + zo - last);
                }
            }
            lastzo = Some(zo);
        }

        prev = cur;
    }

    log::debug!(
        "Found {} zero crossings in {} trace points",
        crossings.len(),
        trace.len()
    );
    crossings
}
