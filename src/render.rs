//! Serialization of a [`Table`] to typeset markup.
//!
//! Rendering goes through the [`TableRenderer`] trait so callers can plug
//! in their own typesetting backend. [`TypesetRenderer`] is the bundled
//! implementation and writes plain LaTeX `tabular` or AASTeX
//! `deluxetable` environments. Cells are written verbatim; measurements
//! are already math-mode fragments and are not escaped.

use std::fmt::Write;

use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::table::{samples_to_table, Chain, Table, TableOptions};

/// Target markup of a rendered table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// `table` + `tabular` environments.
    #[default]
    Latex,
    /// AASTeX `deluxetable`.
    AasTex,
}

/// Turns a table into a markup document.
pub trait TableRenderer {
    fn render(&self, table: &Table, format: TableFormat) -> Result<String>;
}

/// Built-in LaTeX / AASTeX writer, one centred column per schema entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypesetRenderer;

impl TypesetRenderer {
    fn column_spec(table: &Table) -> String {
        "c".repeat(table.column_names().len())
    }

    fn latex(table: &Table) -> String {
        let mut out = String::new();
        out.push_str("\\begin{table}\n");
        let _ = writeln!(out, "\\begin{{tabular}}{{{}}}", Self::column_spec(table));
        let _ = writeln!(out, "{} \\\\", table.column_names().join(" & "));
        for row in table.rows() {
            let _ = writeln!(out, "{} \\\\", row.cells().join(" & "));
        }
        out.push_str("\\end{tabular}\n");
        out.push_str("\\end{table}\n");
        out
    }

    fn aastex(table: &Table) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\\begin{{deluxetable}}{{{}}}", Self::column_spec(table));
        let head: Vec<String> = table
            .column_names()
            .iter()
            .map(|name| format!("\\colhead{{{name}}}"))
            .collect();
        let _ = writeln!(out, "\\tablehead{{{}}}", head.join(" & "));
        out.push_str("\\startdata\n");
        let last = table.len().saturating_sub(1);
        for (i, row) in table.rows().iter().enumerate() {
            let line = row.cells().join(" & ");
            if i == last {
                let _ = writeln!(out, "{line}");
            } else {
                let _ = writeln!(out, "{line} \\\\");
            }
        }
        out.push_str("\\enddata\n");
        out.push_str("\\end{deluxetable}\n");
        out
    }
}

impl TableRenderer for TypesetRenderer {
    fn render(&self, table: &Table, format: TableFormat) -> Result<String> {
        debug!(rows = table.len(), ?format, "rendering table");
        Ok(match format {
            TableFormat::Latex => Self::latex(table),
            TableFormat::AasTex => Self::aastex(table),
        })
    }
}

/// Builds a table from `chain` and renders it as LaTeX with
/// [`TypesetRenderer`].
///
/// # Examples
/// ```
/// use smitty::render::samples_to_latex;
/// use smitty::table::{Chain, TableOptions};
/// let rows: Vec<Vec<f64>> = (0..=100).map(|i| vec![f64::from(i)]).collect();
/// let chain = Chain::from_rows(rows).unwrap();
/// let latex = samples_to_latex(&chain, &TableOptions::default().with_labels(["x"])).unwrap();
/// assert!(latex.contains("x & ${50}_{-34}^{+34}$ \\\\\n"));
/// ```
pub fn samples_to_latex(chain: &Chain, options: &TableOptions) -> Result<String> {
    samples_to_latex_with(&TypesetRenderer, TableFormat::Latex, chain, options)
}

/// Builds a table from `chain` and renders it with `renderer`.
pub fn samples_to_latex_with<R>(
    renderer: &R,
    format: TableFormat,
    chain: &Chain,
    options: &TableOptions,
) -> Result<String>
where
    R: TableRenderer + ?Sized,
{
    let table = samples_to_table(chain, options)?;
    renderer.render(&table, format)
}
