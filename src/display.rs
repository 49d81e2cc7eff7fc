//! Inline display of a single measurement.
//!
//! The front end (a notebook kernel, a terminal, a test buffer) is a
//! [`LatexDisplay`] sink that receives raw, pre-rendered LaTeX fragments.

use std::io::Write;

use crate::error::Result;
use crate::format::{format_upper_lower, FormatOptions};
use crate::interval::{one_sigma, Transform};

/// Receives raw LaTeX fragments for inline presentation.
pub trait LatexDisplay {
    fn display_latex(&mut self, fragment: &str) -> Result<()>;
}

/// Sink writing each fragment as one line to an [`std::io::Write`].
#[derive(Debug)]
pub struct WriterDisplay<W> {
    writer: W,
}

impl<W: Write> WriterDisplay<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LatexDisplay for WriterDisplay<W> {
    fn display_latex(&mut self, fragment: &str) -> Result<()> {
        writeln!(self.writer, "{fragment}")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects fragments in memory.
impl LatexDisplay for Vec<String> {
    fn display_latex(&mut self, fragment: &str) -> Result<()> {
        self.push(fragment.to_string());
        Ok(())
    }
}

/// Reduces `samples` to a one-sigma measurement with default formatting
/// and hands it to `display`.
///
/// # Examples
/// ```
/// use smitty::display::display_one_sigma;
/// let samples: Vec<f64> = (0..=100).map(f64::from).collect();
/// let mut shown: Vec<String> = Vec::new();
/// display_one_sigma(&samples, &mut shown).unwrap();
/// assert_eq!(shown, ["${50}_{-34}^{+34}$"]);
/// ```
pub fn display_one_sigma<D>(samples: &[f64], display: &mut D) -> Result<()>
where
    D: LatexDisplay + ?Sized,
{
    let triple = one_sigma(samples, &Transform::Identity)?;
    let fragment = format_upper_lower(&triple, &FormatOptions::default())?;
    display.display_latex(&fragment)
}
