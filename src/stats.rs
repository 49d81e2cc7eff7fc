//! Percentiles with linear interpolation between ranked samples.
//!
//! # Algorithm
//!
//! R-7 (Hyndman & Fan type 7), the default in R and the `"linear"` method
//! of NumPy's `percentile`. For sorted data `x[0..n]` and `p ∈ [0, 1]`:
//!
//! 1. `h = (n − 1) × p`
//! 2. `j = ⌊h⌋`, `g = h − j`
//! 3. interpolate between `x[j]` and `x[j+1]` with weight `g`
//!
//! The interpolation is evaluated from whichever end is closer
//! (`a + (b − a)·g` below the midpoint, `b − (b − a)·(1 − g)` above it),
//! which keeps the result bit-identical to NumPy and monotone in `g`.
//!
//! Reference: Hyndman & Fan (1996), "Sample Quantiles in Statistical
//! Packages", *The American Statistician* 50(4), pp. 361–365.
//!
//! # NaN handling
//!
//! NaN is not masked. If any sample is NaN, every requested level is NaN,
//! matching NumPy.

use crate::error::{Error, Result};

/// Computes the `p`-th quantile on **pre-sorted** data (R-7 method).
///
/// The caller must guarantee that `sorted_data` is sorted in
/// non-decreasing order.
///
/// # Returns
/// - `None` if `sorted_data` is empty or `p` is outside `[0, 1]`.
///
/// # Examples
/// ```
/// use smitty::stats::quantile_sorted;
/// let data = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile_sorted(&data, 0.0), Some(1.0));
/// assert_eq!(quantile_sorted(&data, 0.25), Some(1.75));
/// assert_eq!(quantile_sorted(&data, 1.0), Some(4.0));
/// ```
pub fn quantile_sorted(sorted_data: &[f64], p: f64) -> Option<f64> {
    let n = sorted_data.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted_data[0]);
    }

    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();

    if j + 1 >= n {
        return Some(sorted_data[n - 1]);
    }
    Some(lerp(sorted_data[j], sorted_data[j + 1], g))
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Computes several percentiles of `data` with a single sort.
///
/// `levels` are on the 0–100 scale (`[16.0, 50.0, 84.0]` for a one-sigma
/// summary). Levels outside `[0, 100]` evaluate to NaN.
///
/// # Complexity
/// Time: O(n log n + k), Space: O(n)
///
/// # Errors
/// [`Error::EmptySamples`] if `data` is empty.
///
/// # Examples
/// ```
/// use smitty::stats::percentiles;
/// let p = percentiles(&[5.0, 1.0, 3.0, 2.0, 4.0], &[0.0, 50.0, 100.0]).unwrap();
/// assert_eq!(p, vec![1.0, 3.0, 5.0]);
/// ```
pub fn percentiles(data: &[f64], levels: &[f64]) -> Result<Vec<f64>> {
    if data.is_empty() {
        return Err(Error::EmptySamples);
    }
    if data.iter().any(|x| x.is_nan()) {
        return Ok(vec![f64::NAN; levels.len()]);
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    Ok(levels
        .iter()
        .map(|&level| quantile_sorted(&sorted, level / 100.0).unwrap_or(f64::NAN))
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
