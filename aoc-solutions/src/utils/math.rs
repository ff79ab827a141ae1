//! Number theory and geometry helpers

use crate::utils::point::Point2D;
use num::{Integer, PrimInt};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("need at least two values, got {0}")]
    TooFewValues(usize),
}

pub fn gcd<T: Integer>(a: T, b: T) -> T {
    a.gcd(&b)
}

pub fn lcm<T: Integer>(a: T, b: T) -> T {
    a.lcm(&b)
}

fn fold_pairwise<T>(values: Vec<T>, f: impl Fn(T, T) -> T) -> Result<T, MathError> {
    let len = values.len();
    let mut values = values.into_iter();
    match (values.next(), values.next()) {
        (Some(first), Some(second)) => Ok(values.fold(f(first, second), f)),
        _ => Err(MathError::TooFewValues(len)),
    }
}

/// Greatest common divisor of every value
pub fn gcd_of<T: Integer>(values: impl IntoIterator<Item = T>) -> Result<T, MathError> {
    fold_pairwise(values.into_iter().collect(), gcd)
}

/// Least common multiple of every value
///
/// ```
/// use aoc_solutions::utils::math::lcm_of;
///
/// assert_eq!(lcm_of([4u64, 6, 10]), Ok(60));
/// assert!(lcm_of([7u64]).is_err());
/// ```
pub fn lcm_of<T: Integer>(values: impl IntoIterator<Item = T>) -> Result<T, MathError> {
    fold_pairwise(values.into_iter().collect(), lcm)
}

/// Sorts inclusive `(start, end)` intervals and merges the ones that overlap
/// or touch.
///
/// Touching is merged too, unlike plain overlap merging: `(1, 3)` and
/// `(4, 6)` become `(1, 6)` because no integer lies between them. The result
/// covers exactly the same integers as the input, so summing
/// `end - start + 1` over it counts every covered integer once. Callers that
/// need the gap between adjacent intervals preserved should not use this.
pub fn merge_intervals<T: PrimInt>(intervals: impl IntoIterator<Item = (T, T)>) -> Vec<(T, T)> {
    let mut intervals: Vec<(T, T)> = intervals.into_iter().collect();
    intervals.sort_unstable();

    let mut merged: Vec<(T, T)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        match merged.last_mut() {
            Some(last) if last.1.checked_add(&T::one()).is_none_or(|next| start <= next) => {
                last.1 = last.1.max(end);
            }
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Real roots of `a*x^2 + b*x + c = 0`, smaller first; `None` without real
/// roots or when `a` is zero
pub fn quadratic_roots(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
    let discriminant = b * b - 4.0 * a * c;
    if a == 0.0 || discriminant < 0.0 {
        return None;
    }
    let root = discriminant.sqrt();
    let first = (-b - root) / (2.0 * a);
    let second = (-b + root) / (2.0 * a);
    Some((first.min(second), first.max(second)))
}

/// Area of a simple polygon given its vertices in order
pub fn shoelace_area(vertices: &[Point2D<i64>]) -> i64 {
    let twice_area: i64 = vertices
        .iter()
        .zip(vertices.iter().cycle().skip(1))
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice_area.abs() / 2
}

/// Lattice points strictly inside a polygon with the given area and number
/// of boundary lattice points (Pick's theorem)
pub fn interior_points(area: i64, boundary: i64) -> i64 {
    area - boundary / 2 + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(lcm(4i64, 6), 12);
        assert_eq!(gcd_of([12u32, 18, 27]), Ok(3));
        assert_eq!(gcd_of(Vec::<u32>::new()), Err(MathError::TooFewValues(0)));
        assert_eq!(lcm_of([5u32]), Err(MathError::TooFewValues(1)));
    }

    #[test]
    fn test_merge_intervals() {
        assert_eq!(
            merge_intervals([(5, 8), (1, 3), (2, 4), (10, 12), (13, 13)]),
            vec![(1, 8), (10, 13)]
        );
        assert_eq!(merge_intervals([(1i32, 10), (2, 3)]), vec![(1, 10)]);
        assert_eq!(merge_intervals([(i8::MAX, i8::MAX), (0, 1)]), vec![(0, 1), (127, 127)]);
        assert!(merge_intervals(Vec::<(i32, i32)>::new()).is_empty());
    }

    #[test]
    fn test_merge_intervals_joins_touching_only() {
        // Adjacent integers merge, a one-wide gap does not
        assert_eq!(merge_intervals([(1, 3), (4, 6)]), vec![(1, 6)]);
        assert_eq!(merge_intervals([(1, 3), (5, 6)]), vec![(1, 3), (5, 6)]);
        let covered: i32 = merge_intervals([(10, 12), (13, 13), (12, 12)])
            .iter()
            .map(|(start, end)| end - start + 1)
            .sum();
        assert_eq!(covered, 4);
    }

    #[test]
    fn test_quadratic_roots() {
        // x^2 - 7x + 9 = 0
        let (low, high) = quadratic_roots(1.0, -7.0, 9.0).unwrap();
        assert!((low - 1.697).abs() < 1e-3);
        assert!((high - 5.303).abs() < 1e-3);
        assert_eq!(quadratic_roots(1.0, 0.0, 1.0), None);
        assert_eq!(quadratic_roots(0.0, 1.0, 1.0), None);
    }

    #[test]
    fn test_shoelace_and_pick() {
        let square = [
            Point2D::new(0, 0),
            Point2D::new(4, 0),
            Point2D::new(4, 4),
            Point2D::new(0, 4),
        ];
        assert_eq!(shoelace_area(&square), 16);
        // 16 boundary points, 9 inside
        assert_eq!(interior_points(16, 16), 9);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// **Feature: math, Property 1: Merged intervals are disjoint and cover the same integers**
        #[test]
        fn prop_merge_intervals(raw in prop::collection::vec((-50i32..50, 0i32..10), 0..20)) {
            let intervals: Vec<(i32, i32)> = raw.iter().map(|&(start, len)| (start, start + len)).collect();
            let merged = merge_intervals(intervals.iter().copied());

            for pair in merged.windows(2) {
                prop_assert!(pair[0].1 + 1 < pair[1].0);
            }
            for x in -60..70 {
                let in_original = intervals.iter().any(|&(s, e)| (s..=e).contains(&x));
                let in_merged = merged.iter().any(|&(s, e)| (s..=e).contains(&x));
                prop_assert_eq!(in_original, in_merged);
            }
        }

        /// **Feature: math, Property 2: lcm_of is divisible by every input**
        #[test]
        fn prop_lcm_divisible(values in prop::collection::vec(1u64..50, 2..6)) {
            let lcm = lcm_of(values.iter().copied()).unwrap();
            for v in &values {
                prop_assert_eq!(lcm % v, 0);
            }
            let gcd = gcd_of(values.iter().copied()).unwrap();
            for v in &values {
                prop_assert_eq!(v % gcd, 0);
            }
        }
    }
}
