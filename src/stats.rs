//! The closed-form shustring length distribution of Haubold et al. (2009),
//! used to derive the default minimum anchor length from the probability
//! that a match of that length occurs in random sequences.

/// Exact binomial coefficient. The inputs stay far below the overflow range
/// of u64 for every anchor length the distribution is evaluated at.
pub fn binomial_coefficient(n: u64, k: u64) -> u64 {
    if k > n {
        return 0;
    }

    if k == 0 || k == n {
        return 1;
    }

    let k = k.min(n - k);

    let mut result = 1;
    for i in 1..=k {
        result = result * (n - k + i) / i;
    }

    result
}

/// P{X <= x}, where X is the length of the longest shortest unique
/// substring (shustring) at any position of a random sequence of length `l`
/// under a Bernoulli model with GC half-frequency `p`.
///
/// The partial sums are monotone, so the summation saturates at 1.
pub fn shuprop(x: u64, p: f64, l: usize) -> f64 {
    let mut sum = 0.0;

    for k in 0..=x {
        let t = p.powi(k as i32) * (0.5 - p).powi((x - k) as i32);

        sum += 2f64.powi(x as i32) * t * (1.0 - t).powf(l as f64) * binomial_coefficient(x, k) as f64;

        if sum >= 1.0 {
            return 1.0;
        }
    }

    sum
}

/// The minimum anchor length for which a random match is sufficiently
/// unlikely.
///
/// `p` is the allowed probability of a random anchor, `gc` the GC content
/// of the subject and `l` its length. Returns one more than the smallest
/// length satisfying the probability bound.
pub fn min_anchor_length(p: f64, gc: f64, l: usize) -> usize {
    let mut x: u64 = 1;

    let mut prop = 0.0;
    while prop < 1.0 - p {
        prop = shuprop(x, gc / 2.0, l);
        x += 1;
    }

    x as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomial_agrees_with_pascals_triangle() {
        let mut triangle = vec![vec![1u64]];
        for n in 1..=30 {
            let previous = &triangle[n - 1];
            let mut row = vec![1u64];
            for k in 1..n {
                row.push(previous[k - 1] + previous[k]);
            }
            row.push(1);
            triangle.push(row);
        }

        for (n, row) in triangle.iter().enumerate() {
            for (k, &expected) in row.iter().enumerate() {
                assert_eq!(
                    binomial_coefficient(n as u64, k as u64),
                    expected,
                    "C({n}, {k})"
                );
            }
        }

        assert_eq!(binomial_coefficient(5, 7), 0);
    }

    #[test]
    fn shuprop_is_a_monotone_distribution() {
        for &(gc, l) in &[(0.5, 10_000), (0.3, 1_000_000), (0.8, 500)] {
            let mut previous = 0.0;
            for x in 1..40 {
                let value = shuprop(x, gc / 2.0, l);
                assert!((0.0..=1.0).contains(&value));
                assert!(value >= previous);
                previous = value;
            }
        }
    }

    #[test]
    fn anchor_length_regression() {
        assert_eq!(min_anchor_length(0.05, 0.5, 10_000), 10);
        assert_eq!(min_anchor_length(0.05, 0.5, 10_000_000), 15);
        assert_eq!(min_anchor_length(0.05, 0.3, 10_000_000), 17);

        // longer subjects and skewed GC both require longer anchors
        assert!(
            min_anchor_length(0.05, 0.5, 10_000_000) >= min_anchor_length(0.05, 0.5, 10_000)
        );
        assert!(
            min_anchor_length(0.05, 0.3, 10_000_000) >= min_anchor_length(0.05, 0.5, 10_000_000)
        );
    }

    #[test]
    fn degenerate_probabilities() {
        // p = 1 allows everything, the loop never runs
        assert_eq!(min_anchor_length(1.0, 0.5, 10_000), 1);

        // p = 0 requires the saturated tail of the distribution
        assert!(min_anchor_length(0.0, 0.5, 1_000) > 1);
    }
}
