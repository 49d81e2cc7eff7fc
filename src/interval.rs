//! Reduction of posterior samples to a one-sigma interval.
//!
//! A sample set is mapped through a [`Transform`] and summarised by its
//! 16th, 50th and 84th percentiles: the median and the one-sigma interval
//! of a Gaussian-like posterior.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::trace;

use crate::error::{Error, Result};
use crate::stats;

/// Percentile levels (0–100 scale) of the `(low, mid, high)` summary.
pub const ONE_SIGMA_PERCENTILES: [f64; 3] = [16.0, 50.0, 84.0];

/// Element-wise `f64 → f64` map applied to samples before reduction.
///
/// Named variants cover the usual unit and scale changes; anything else
/// goes through [`Transform::custom`].
///
/// # Examples
/// ```
/// use smitty::interval::Transform;
/// let t: Transform = "degrees".parse().unwrap();
/// assert!((t.apply(std::f64::consts::PI) - 180.0).abs() < 1e-12);
/// assert_eq!(Transform::custom(|x| 2.0 * x).apply(3.0), 6.0);
/// ```
#[derive(Clone, Default)]
pub enum Transform {
    #[default]
    Identity,
    /// Radians to degrees.
    Degrees,
    /// Degrees to radians.
    Radians,
    Log10,
    Ln,
    Exp,
    /// `x.powf(k)`.
    Pow(f64),
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl Transform {
    /// Wraps an arbitrary function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        Transform::Custom(Arc::new(f))
    }

    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        match self {
            Transform::Identity => x,
            Transform::Degrees => x.to_degrees(),
            Transform::Radians => x.to_radians(),
            Transform::Log10 => x.log10(),
            Transform::Ln => x.ln(),
            Transform::Exp => x.exp(),
            Transform::Pow(k) => x.powf(*k),
            Transform::Custom(f) => f(x),
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, Transform::Identity)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Custom(_) => f.write_str("Custom(..)"),
            other => write!(f, "{other}"),
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Identity => f.write_str("identity"),
            Transform::Degrees => f.write_str("degrees"),
            Transform::Radians => f.write_str("radians"),
            Transform::Log10 => f.write_str("log10"),
            Transform::Ln => f.write_str("ln"),
            Transform::Exp => f.write_str("exp"),
            Transform::Pow(k) => write!(f, "pow:{k}"),
            Transform::Custom(_) => f.write_str("custom"),
        }
    }
}

impl FromStr for Transform {
    type Err = Error;

    /// Parses `identity` (or `none`), `degrees`, `radians`, `log10`, `ln`,
    /// `exp` and `pow:<k>`. Matching is case-insensitive.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        match name.as_str() {
            "" | "identity" | "none" => Ok(Transform::Identity),
            "degrees" => Ok(Transform::Degrees),
            "radians" => Ok(Transform::Radians),
            "log10" => Ok(Transform::Log10),
            "ln" => Ok(Transform::Ln),
            "exp" => Ok(Transform::Exp),
            _ => name
                .strip_prefix("pow:")
                .and_then(|k| k.parse::<f64>().ok())
                .map(Transform::Pow)
                .ok_or_else(|| Error::InvalidTransform(s.to_string())),
        }
    }
}

/// `(low, mid, high)` summary of a sample set.
///
/// Produced by [`one_sigma`] with `low ≤ mid ≤ high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalTriple {
    pub low: f64,
    pub mid: f64,
    pub high: f64,
}

impl IntervalTriple {
    pub fn new(low: f64, mid: f64, high: f64) -> Self {
        Self { low, mid, high }
    }

    /// `mid − low`.
    pub fn lower_gap(&self) -> f64 {
        self.mid - self.low
    }

    /// `high − mid`.
    pub fn upper_gap(&self) -> f64 {
        self.high - self.mid
    }
}

/// Reduces `samples` to their 16th, 50th and 84th percentiles after
/// applying `transform` element-wise.
///
/// # Errors
/// [`Error::EmptySamples`] if `samples` is empty. NaN samples are not an
/// error: they propagate into every field of the triple.
///
/// # Examples
/// ```
/// use smitty::interval::{one_sigma, Transform};
/// let samples: Vec<f64> = (0..=100).map(f64::from).collect();
/// let t = one_sigma(&samples, &Transform::Identity).unwrap();
/// assert_eq!((t.low, t.mid, t.high), (16.0, 50.0, 84.0));
/// ```
pub fn one_sigma(samples: &[f64], transform: &Transform) -> Result<IntervalTriple> {
    let levels = if transform.is_identity() {
        stats::percentiles(samples, &ONE_SIGMA_PERCENTILES)?
    } else {
        let transformed: Vec<f64> = samples.iter().map(|&x| transform.apply(x)).collect();
        stats::percentiles(&transformed, &ONE_SIGMA_PERCENTILES)?
    };
    let triple = IntervalTriple::new(levels[0], levels[1], levels[2]);
    trace!(n = samples.len(), %transform, ?triple, "reduced samples");
    Ok(triple)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    #[test]
    fn test_one_sigma_uniform_grid() {
        let samples: Vec<f64> = (0..=100).map(f64::from).collect();
        let t = one_sigma(&samples, &Transform::Identity).unwrap();
        assert_eq!(t, IntervalTriple::new(16.0, 50.0, 84.0));
        assert_eq!(t.lower_gap(), 34.0);
        assert_eq!(t.upper_gap(), 34.0);
    }

    #[test]
    fn test_one_sigma_applies_transform() {
        let samples: Vec<f64> = (0..=100).map(f64::from).collect();
        let t = one_sigma(&samples, &Transform::custom(|x| -x)).unwrap();
        assert_eq!(t, IntervalTriple::new(-84.0, -50.0, -16.0));
    }

    #[test]
    fn test_one_sigma_gaussian_recovers_sigma() {
        let mut rng = StdRng::seed_from_u64(42);
        let normal = Normal::new(3.0, 0.5).unwrap();
        let samples: Vec<f64> = (0..20_000).map(|_| normal.sample(&mut rng)).collect();
        let t = one_sigma(&samples, &Transform::Identity).unwrap();
        assert!((t.mid - 3.0).abs() < 0.02, "mid = {}", t.mid);
        assert!((t.lower_gap() - 0.5).abs() < 0.03, "lower = {}", t.lower_gap());
        assert!((t.upper_gap() - 0.5).abs() < 0.03, "upper = {}", t.upper_gap());
    }

    #[test]
    fn test_one_sigma_empty() {
        assert!(matches!(
            one_sigma(&[], &Transform::Identity),
            Err(Error::EmptySamples)
        ));
    }

    #[test]
    fn test_one_sigma_nan_propagates() {
        let t = one_sigma(&[1.0, 2.0, f64::NAN], &Transform::Identity).unwrap();
        assert!(t.low.is_nan() && t.mid.is_nan() && t.high.is_nan());
        // log of a negative sample is NaN, not an error
        let t = one_sigma(&[-1.0, 2.0], &Transform::Ln).unwrap();
        assert!(t.mid.is_nan());
    }

    #[test]
    fn test_transform_parse() {
        assert!("none".parse::<Transform>().unwrap().is_identity());
        assert!("Identity".parse::<Transform>().unwrap().is_identity());
        assert!(matches!("degrees".parse(), Ok(Transform::Degrees)));
        assert!(matches!("pow:3.5".parse(), Ok(Transform::Pow(k)) if k == 3.5));
        assert!(matches!(
            "pow:x".parse::<Transform>(),
            Err(Error::InvalidTransform(_))
        ));
        assert!(matches!(
            "sqrt".parse::<Transform>(),
            Err(Error::InvalidTransform(_))
        ));
    }

    #[test]
    fn test_transform_display_round_trips_named() {
        for name in ["identity", "degrees", "radians", "log10", "ln", "exp", "pow:2"] {
            let t: Transform = name.parse().unwrap();
            assert_eq!(t.to_string(), name);
        }
        assert_eq!(format!("{:?}", Transform::custom(|x| x)), "Custom(..)");
    }

    #[test]
    fn test_transform_apply() {
        assert!((Transform::Log10.apply(1000.0) - 3.0).abs() < 1e-15);
        assert_eq!(Transform::Pow(2.0).apply(3.0), 9.0);
        assert_eq!(Transform::Exp.apply(0.0), 1.0);
        assert!((Transform::Radians.apply(180.0) - std::f64::consts::PI).abs() < 1e-15);
    }
}
