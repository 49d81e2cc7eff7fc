//! # smitty
//!
//! Publication-ready summaries of posterior samples.
//!
//! Samples from an MCMC run (or any other sampler) are reduced to their
//! median and one-sigma interval and written as
//! `${1.00}_{-0.52}^{+0.81}$`, either one at a time or as a typeset table
//! with one row per parameter.
//!
//! ## Modules
//!
//! - [`stats`]: Linear-interpolated percentiles (R-7 / NumPy `"linear"`)
//! - [`interval`]: Samples → `(low, mid, high)` at the 16/50/84 percentiles
//! - [`format`]: `(low, mid, high)` → measurement string with adaptive precision
//! - [`table`]: Flat chain → table of formatted measurements
//! - [`render`]: Table → LaTeX / AASTeX through a pluggable renderer
//! - [`display`]: Single measurement → inline display sink
//! - [`config`]: TOML configuration for the command line
//!
//! ## Design Philosophy
//!
//! - **Pure core**: reduction and formatting are side-effect free
//! - **Injected collaborators**: typesetting and display are traits
//! - **Errors propagate**: empty inputs, degenerate intervals and shape
//!   mismatches surface as [`Error`] instead of NaN strings or silent truncation
//!
//! ## Example
//!
//! ```
//! use smitty::{samples_to_latex, Chain, TableOptions};
//!
//! let rows: Vec<Vec<f64>> = (0..=100).map(|i| vec![f64::from(i)]).collect();
//! let chain = Chain::from_rows(rows).unwrap();
//! let latex = samples_to_latex(&chain, &TableOptions::default().with_labels(["x"])).unwrap();
//! assert!(latex.starts_with("\\begin{table}\n"));
//! ```

pub mod config;
pub mod display;
pub mod error;
pub mod format;
pub mod interval;
pub mod render;
pub mod stats;
pub mod table;

pub use config::Config;
pub use display::{display_one_sigma, LatexDisplay, WriterDisplay};
pub use error::{Error, Result};
pub use format::{default_decimal_places, format_upper_lower, FormatOptions};
pub use interval::{one_sigma, IntervalTriple, Transform};
pub use render::{samples_to_latex, samples_to_latex_with, TableFormat, TableRenderer, TypesetRenderer};
pub use table::{samples_to_table, Annotation, Chain, ParameterRow, Table, TableOptions, TransformSpec};
