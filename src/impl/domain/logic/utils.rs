/// Round to 2 decimal places (standard monetary rounding, half away from
/// zero). Applied at every percentage-to-amount conversion so recomputing the
/// same (total, percentage) pair is deterministic.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
