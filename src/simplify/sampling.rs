/// Evenly spaced indices into `len` points, always including the first and
/// last, yielding exactly `count` indices when `3 <= count < len`.
pub(crate) fn uniform_indices(len: usize, count: usize) -> Vec<usize> {
    if count >= len { return (0..len).collect() }
    if count < 2 { return vec![0] }

    let step = (len - 1) as f64 / (count - 1) as f64;
    (0..count).map(|i| ((i as f64 * step).round() as usize).min(len - 1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_endpoints_and_exact_count() {
        let idx = uniform_indices(1000, 500);
        assert_eq!(idx.len(), 500);
        assert_eq!(idx[0], 0);
        assert_eq!(idx[499], 999);
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn small_requests() {
        assert_eq!(uniform_indices(10, 3), vec![0, 5, 9]);
        assert_eq!(uniform_indices(4, 10), vec![0, 1, 2, 3]);
    }
}
