//! Formatting of a one-sigma interval as a typeset measurement.
//!
//! An [`IntervalTriple`] `(low, mid, high)` becomes
//!
//! ```text
//! WRAP{MID}_{-LOWER}^{+UPPER}WRAP
//! ```
//!
//! with `LOWER = mid − low` and `UPPER = high − mid`, e.g.
//! `${1.00}_{-0.52}^{+0.81}$` for inline math mode.
//!
//! # Adaptive precision
//!
//! Unless decimal places are given explicitly, they are derived from the
//! smaller half-width so that it keeps roughly two significant digits:
//!
//! ```text
//! |min(⌊log10(upper)⌋, ⌊log10(lower)⌋) − 1|
//! ```
//!
//! The absolute value folds large exponents back into positive counts, so
//! half-widths of 100 and above get one decimal place again. Both
//! half-widths must be strictly positive for the logarithm to exist.
//!
//! # Field spec
//!
//! `zero_pad` is a `[0][width]` string. Every number is centre-justified
//! within `width`. The leading `0` switches the fill of the two error
//! fields to `'0'`; the central value is always space-filled.

use serde::Deserialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::interval::IntervalTriple;

/// Default wrap delimiter: inline math mode.
pub const DEFAULT_WRAP: &str = "$";

/// Largest precision the formatter accepts.
pub const MAX_DECIMAL_PLACES: usize = u16::MAX as usize;

/// Formatting options shared by every measurement in a call.
///
/// Deserializes from a `[format]` config table; missing keys take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatOptions {
    /// Explicit precision; `None` derives it from the interval.
    pub decimal_places: Option<usize>,
    /// `[0][width]` field spec, empty for no padding.
    pub zero_pad: String,
    /// Delimiter placed before and after the measurement.
    pub wrap: String,
    /// Prefix the lower error with `-` and the upper with `+`.
    pub show_sign: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            decimal_places: None,
            zero_pad: String::new(),
            wrap: DEFAULT_WRAP.to_string(),
            show_sign: true,
        }
    }
}

impl FormatOptions {
    pub fn with_decimal_places(mut self, decimal_places: usize) -> Self {
        self.decimal_places = Some(decimal_places);
        self
    }

    pub fn with_zero_pad(mut self, zero_pad: impl Into<String>) -> Self {
        self.zero_pad = zero_pad.into();
        self
    }

    pub fn with_wrap(mut self, wrap: impl Into<String>) -> Self {
        self.wrap = wrap.into();
        self
    }

    pub fn with_show_sign(mut self, show_sign: bool) -> Self {
        self.show_sign = show_sign;
        self
    }
}

/// Parsed `[0][width]` field spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldSpec {
    width: usize,
    zero_fill: bool,
}

impl FieldSpec {
    fn parse(spec: &str) -> Result<Self> {
        let (zero_fill, digits) = match spec.strip_prefix('0') {
            Some(rest) => (true, rest),
            None => (false, spec),
        };
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidFieldSpec(spec.to_string()));
        }
        let width = if digits.is_empty() {
            0
        } else {
            digits
                .parse()
                .map_err(|_| Error::InvalidFieldSpec(spec.to_string()))?
        };
        Ok(Self { width, zero_fill })
    }

    /// Fixed-point `value`, centred in the field with `fill`.
    fn render(&self, value: f64, decimal_places: usize, fill: char) -> String {
        let digits = format!("{value:.decimal_places$}");
        let len = digits.chars().count();
        if len >= self.width {
            return digits;
        }
        let pad = self.width - len;
        let left = pad / 2;
        let mut out = String::with_capacity(self.width);
        out.extend(std::iter::repeat(fill).take(left));
        out.push_str(&digits);
        out.extend(std::iter::repeat(fill).take(pad - left));
        out
    }

    fn error_fill(&self) -> char {
        if self.zero_fill {
            '0'
        } else {
            ' '
        }
    }
}

/// Derives the number of decimal places from the interval half-widths.
///
/// # Errors
/// [`Error::DegenerateInterval`] if either half-width is zero, negative or
/// NaN, or both are infinite.
///
/// # Examples
/// ```
/// use smitty::format::default_decimal_places;
/// use smitty::interval::IntervalTriple;
/// // smaller half-width 0.25 -> floor(log10) = -1 -> |-1 - 1| = 2
/// let t = IntervalTriple::new(0.5, 2.0, 2.25);
/// assert_eq!(default_decimal_places(&t).unwrap(), 2);
/// ```
pub fn default_decimal_places(triple: &IntervalTriple) -> Result<usize> {
    let lower_gap = triple.lower_gap();
    let upper_gap = triple.upper_gap();
    // NaN fails both comparisons
    if !(lower_gap > 0.0 && upper_gap > 0.0) {
        return Err(Error::DegenerateInterval {
            lower_gap,
            upper_gap,
        });
    }
    let exponent = upper_gap.log10().floor().min(lower_gap.log10().floor()) - 1.0;
    if !exponent.is_finite() {
        return Err(Error::DegenerateInterval {
            lower_gap,
            upper_gap,
        });
    }
    Ok((exponent as i64).unsigned_abs() as usize)
}

/// Formats `triple` as `WRAP{MID}_{-LOWER}^{+UPPER}WRAP`.
///
/// # Errors
/// - [`Error::InvalidFieldSpec`] if `options.zero_pad` is not `[0][width]`.
/// - [`Error::DegenerateInterval`] if precision must be derived from a
///   degenerate interval.
/// - [`Error::TooManyDecimalPlaces`] above [`MAX_DECIMAL_PLACES`].
///
/// # Examples
/// ```
/// use smitty::format::{format_upper_lower, FormatOptions};
/// use smitty::interval::IntervalTriple;
/// let t = IntervalTriple::new(0.5, 2.0, 2.25);
/// let s = format_upper_lower(&t, &FormatOptions::default()).unwrap();
/// assert_eq!(s, "${2.00}_{-1.50}^{+0.25}$");
/// ```
pub fn format_upper_lower(triple: &IntervalTriple, options: &FormatOptions) -> Result<String> {
    let field = FieldSpec::parse(&options.zero_pad)?;
    let decimal_places = match options.decimal_places {
        Some(dp) => dp,
        None => {
            let dp = default_decimal_places(triple)?;
            trace!(dp, ?triple, "derived decimal places");
            dp
        }
    };
    if decimal_places > MAX_DECIMAL_PLACES {
        return Err(Error::TooManyDecimalPlaces(decimal_places));
    }
    let (sign_lower, sign_upper) = if options.show_sign { ("-", "+") } else { ("", "") };
    let error_fill = field.error_fill();

    Ok(format!(
        "{wrap}{{{mid}}}_{{{sign_lower}{lower}}}^{{{sign_upper}{upper}}}{wrap}",
        wrap = options.wrap,
        mid = field.render(triple.mid, decimal_places, ' '),
        lower = field.render(triple.lower_gap(), decimal_places, error_fill),
        upper = field.render(triple.upper_gap(), decimal_places, error_fill),
    ))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn ordered_triple() -> impl Strategy<Value = IntervalTriple> {
        (-1e4_f64..1e4, 1e-6_f64..1e4, 1e-6_f64..1e4)
            .prop_map(|(mid, lo, hi)| IntervalTriple::new(mid - lo, mid, mid + hi))
            .prop_filter("positive gaps", |t| t.lower_gap() > 0.0 && t.upper_gap() > 0.0)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn output_contains_formatted_mid(t in ordered_triple()) {
            let s = format_upper_lower(&t, &FormatOptions::default()).unwrap();
            let dp = default_decimal_places(&t).unwrap();
            let mid = format!("{{{:.*}}}", dp, t.mid);
            prop_assert!(s.contains(&mid), "{} does not contain {}", s, mid);
        }

        #[test]
        fn formatting_is_idempotent(t in ordered_triple(), show_sign in any::<bool>()) {
            let opts = FormatOptions::default().with_show_sign(show_sign);
            prop_assert_eq!(
                format_upper_lower(&t, &opts).unwrap(),
                format_upper_lower(&t, &opts).unwrap()
            );
        }

        #[test]
        fn widening_lower_gap_never_adds_decimals(
            mid in -100.0_f64..100.0,
            upper in 1e-4_f64..9.0,
            lower in 1e-4_f64..9.0,
            widen in 0.0_f64..0.9,
        ) {
            // below 10 the |.| fold never applies
            let narrow = IntervalTriple::new(mid - lower, mid, mid + upper);
            let wide = IntervalTriple::new(mid - lower - widen, mid, mid + upper);
            prop_assume!(narrow.lower_gap() > 0.0 && narrow.upper_gap() > 0.0);
            prop_assume!(wide.lower_gap() >= narrow.lower_gap());
            let dp_narrow = default_decimal_places(&narrow).unwrap();
            let dp_wide = default_decimal_places(&wide).unwrap();
            prop_assert!(dp_wide <= dp_narrow, "{} > {}", dp_wide, dp_narrow);
        }

        #[test]
        fn hiding_signs_only_drops_prefixes(t in ordered_triple()) {
            let signed = format_upper_lower(&t, &FormatOptions::default()).unwrap();
            let plain = format_upper_lower(
                &t,
                &FormatOptions::default().with_show_sign(false),
            ).unwrap();
            prop_assert!(
                signed.contains("}_{-") && signed.contains("}^{+"),
                "signs missing from {}", signed
            );
            prop_assert!(
                !plain.contains("}_{-") && !plain.contains("}^{+"),
                "signs left in {}", plain
            );
            prop_assert_eq!(
                signed.replacen("}_{-", "}_{", 1).replacen("}^{+", "}^{", 1),
                plain
            );
        }
    }
}
