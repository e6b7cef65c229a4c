/// Advances a pool index by one position, wrapping at the pool size.
///
/// Returns 0 when the pool is empty; callers guard against using the result
/// in that case.
#[inline(always)]
pub fn next(current: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (current + 1) % total
}

/// Resolves two preferred indices into a valid, distinct pair over a pool
/// of size `total`.
///
/// Out-of-range values fall back to 0 for the first slot and 1 for the
/// second. For `total > 1` the result is guaranteed distinct; for
/// `total == 1` both are 0 and the caller suppresses the second slot.
pub fn distinct_pair(preferred_a: usize, preferred_b: usize, total: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }

    let a = if preferred_a < total { preferred_a } else { 0 };
    let mut b = if preferred_b < total {
        preferred_b
    } else if total > 1 {
        1
    } else {
        0
    };

    if a == b && total > 1 {
        b = next(b, total);
    }

    (a, b)
}

#[cfg(test)]
mod indexer_tests {
    use super::*;

    #[test]
    fn test_next_wraps() {
        assert_eq!(next(0, 3), 1);
        assert_eq!(next(2, 3), 0);
        // N - 1 wraps to 0 for every N >= 1
        for n in 1..20 {
            assert_eq!(next(n - 1, n), 0);
        }
    }

    #[test]
    fn test_next_empty_pool() {
        assert_eq!(next(5, 0), 0);
    }

    #[test]
    fn test_distinct_pair_distinctness() {
        for n in 2..20 {
            for a in 0..n + 2 {
                for b in 0..n + 2 {
                    let (x, y) = distinct_pair(a, b, n);
                    assert_ne!(x, y, "collision for ({}, {}) over {}", a, b, n);
                    assert!(x < n && y < n);
                }
            }
        }
    }

    #[test]
    fn test_distinct_pair_single_element_collapses() {
        assert_eq!(distinct_pair(0, 0, 1), (0, 0));
        assert_eq!(distinct_pair(7, 3, 1), (0, 0));
    }

    #[test]
    fn test_distinct_pair_out_of_range_defaults() {
        assert_eq!(distinct_pair(9, 9, 5), (0, 1));
        assert_eq!(distinct_pair(2, 9, 5), (2, 1));
        assert_eq!(distinct_pair(9, 2, 5), (0, 2));
    }

    #[test]
    fn test_distinct_pair_collision_advances_second() {
        assert_eq!(distinct_pair(2, 2, 4), (2, 3));
        assert_eq!(distinct_pair(3, 3, 4), (3, 0));
    }
}
