use std::cmp::Ordering;

/// Percentage `part` makes of `total`. Callers guard against `total == 0`.
pub fn percentage(part: f64, total: f64) -> f64 {
    100.0 * part / total
}

/// Median of a non-empty collection: the middle element for odd lengths, the
/// mean of the two middle elements for even lengths. The input order does
/// not matter. Panics on empty input; every caller holds at least one value.
pub fn median(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let len = sorted.len();
    if len % 2 == 0 {
        (sorted[len / 2 - 1] + sorted[len / 2]) / 2.0
    } else {
        sorted[len / 2]
    }
}
