//! Tables of formatted measurements built from a flat chain.
//!
//! A [`Chain`] holds `N` posterior draws of `M` parameters, one draw per
//! row. [`samples_to_table`] reduces every column to a one-sigma interval,
//! formats it, and collects one [`ParameterRow`] per parameter.

use tracing::debug;

use crate::error::{Error, Result};
use crate::format::{format_upper_lower, FormatOptions};
use crate::interval::{one_sigma, Transform};

/// Row-major `N × M` matrix of posterior samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    data: Vec<f64>,
    n_params: usize,
}

impl Chain {
    /// Builds a chain from draws, one inner vector per draw.
    ///
    /// # Errors
    /// [`Error::RaggedChain`] if the rows differ in width.
    ///
    /// # Examples
    /// ```
    /// use smitty::table::Chain;
    /// let chain = Chain::from_rows(vec![vec![1.0, 10.0], vec![2.0, 20.0]]).unwrap();
    /// assert_eq!(chain.n_samples(), 2);
    /// assert_eq!(chain.column(1), vec![10.0, 20.0]);
    /// ```
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_params = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(rows.len() * n_params);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n_params {
                return Err(Error::RaggedChain {
                    row,
                    expected: n_params,
                    actual: values.len(),
                });
            }
            data.extend(values);
        }
        Ok(Self { data, n_params })
    }

    /// Builds a chain from per-parameter sample columns.
    ///
    /// # Errors
    /// [`Error::RaggedChain`] if the columns differ in length; `row` then
    /// names the offending column.
    pub fn from_columns(columns: &[Vec<f64>]) -> Result<Self> {
        let n_params = columns.len();
        let n_samples = columns.first().map_or(0, Vec::len);
        if let Some((i, col)) = columns
            .iter()
            .enumerate()
            .find(|(_, c)| c.len() != n_samples)
        {
            return Err(Error::RaggedChain {
                row: i,
                expected: n_samples,
                actual: col.len(),
            });
        }
        let mut data = Vec::with_capacity(n_samples * n_params);
        for s in 0..n_samples {
            data.extend(columns.iter().map(|c| c[s]));
        }
        Ok(Self { data, n_params })
    }

    pub fn n_samples(&self) -> usize {
        if self.n_params == 0 {
            0
        } else {
            self.data.len() / self.n_params
        }
    }

    pub fn n_params(&self) -> usize {
        self.n_params
    }

    /// Copies out the samples of parameter `index`.
    ///
    /// # Panics
    /// If `index >= self.n_params()`.
    pub fn column(&self, index: usize) -> Vec<f64> {
        assert!(index < self.n_params, "column {index} out of range");
        self.data
            .iter()
            .skip(index)
            .step_by(self.n_params)
            .copied()
            .collect()
    }
}

/// Transformations for the columns of a table.
#[derive(Debug, Clone)]
pub enum TransformSpec {
    /// One transformation broadcast to every column.
    Single(Transform),
    /// One entry per column; `None` is the identity.
    PerColumn(Vec<Option<Transform>>),
}

impl TransformSpec {
    /// Resolves to exactly one transformation per column.
    pub fn resolve(&self, n_params: usize) -> Result<Vec<Transform>> {
        match self {
            TransformSpec::Single(t) => Ok(vec![t.clone(); n_params]),
            TransformSpec::PerColumn(ts) => {
                if ts.len() != n_params {
                    return Err(Error::LengthMismatch {
                        what: "transformations",
                        expected: n_params,
                        actual: ts.len(),
                    });
                }
                Ok(ts.iter().map(|t| t.clone().unwrap_or_default()).collect())
            }
        }
    }
}

/// The optional Comment column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Annotation {
    /// No Comment column.
    #[default]
    None,
    /// A Comment column of empty strings, to be filled in by hand.
    Empty,
    /// One comment per column.
    Explicit(Vec<String>),
}

impl Annotation {
    fn resolve(&self, n_params: usize) -> Result<Option<Vec<String>>> {
        match self {
            Annotation::None => Ok(None),
            Annotation::Empty => Ok(Some(vec![String::new(); n_params])),
            Annotation::Explicit(comments) => {
                if comments.len() != n_params {
                    return Err(Error::LengthMismatch {
                        what: "comments",
                        expected: n_params,
                        actual: comments.len(),
                    });
                }
                Ok(Some(comments.clone()))
            }
        }
    }
}

/// Column layout of a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schema {
    ParameterMeasurement,
    ParameterCommentMeasurement,
}

impl Schema {
    pub fn names(self) -> &'static [&'static str] {
        match self {
            Schema::ParameterMeasurement => &["Parameter", "Measurement"],
            Schema::ParameterCommentMeasurement => &["Parameter", "Comment", "Measurement"],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterRow {
    pub label: String,
    pub annotation: Option<String>,
    pub measurement: String,
}

impl ParameterRow {
    /// Cells in schema order.
    pub fn cells(&self) -> Vec<&str> {
        let mut cells = vec![self.label.as_str()];
        if let Some(annotation) = &self.annotation {
            cells.push(annotation);
        }
        cells.push(&self.measurement);
        cells
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    schema: Schema,
    rows: Vec<ParameterRow>,
}

impl Table {
    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn column_names(&self) -> &'static [&'static str] {
        self.schema.names()
    }

    pub fn rows(&self) -> &[ParameterRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The Measurement column, top to bottom.
    pub fn measurements(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.measurement.as_str())
    }
}

/// Everything [`samples_to_table`] needs besides the chain.
#[derive(Debug, Clone, Default)]
pub struct TableOptions {
    /// One label per column; `None` gives `"Parameter {i}"`.
    pub labels: Option<Vec<String>>,
    /// `None` reduces every column untransformed.
    pub transformation: Option<TransformSpec>,
    pub extra_column: Annotation,
    /// Forwarded to [`format_upper_lower`] for every row.
    pub format: FormatOptions,
}

impl TableOptions {
    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = Some(labels.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_transformation(mut self, transformation: TransformSpec) -> Self {
        self.transformation = Some(transformation);
        self
    }

    pub fn with_extra_column(mut self, extra_column: Annotation) -> Self {
        self.extra_column = extra_column;
        self
    }

    pub fn with_format(mut self, format: FormatOptions) -> Self {
        self.format = format;
        self
    }
}

/// Reduces and formats every column of `chain` into a [`Table`].
///
/// # Errors
/// - [`Error::LengthMismatch`] if labels, per-column transformations or
///   explicit comments do not have one entry per column.
/// - Anything [`one_sigma`] or [`format_upper_lower`] reports for a column.
///
/// # Examples
/// ```
/// use smitty::table::{samples_to_table, Chain, TableOptions};
/// let rows: Vec<Vec<f64>> = (0..=100).map(|i| vec![f64::from(i)]).collect();
/// let chain = Chain::from_rows(rows).unwrap();
/// let table = samples_to_table(&chain, &TableOptions::default()).unwrap();
/// assert_eq!(table.rows()[0].label, "Parameter 0");
/// assert_eq!(table.rows()[0].measurement, "${50}_{-34}^{+34}$");
/// ```
pub fn samples_to_table(chain: &Chain, options: &TableOptions) -> Result<Table> {
    let n_params = chain.n_params();

    let labels = match &options.labels {
        Some(labels) if labels.len() != n_params => {
            return Err(Error::LengthMismatch {
                what: "labels",
                expected: n_params,
                actual: labels.len(),
            });
        }
        Some(labels) => labels.clone(),
        None => (0..n_params).map(|i| format!("Parameter {i}")).collect(),
    };
    let transforms = match &options.transformation {
        Some(spec) => spec.resolve(n_params)?,
        None => vec![Transform::Identity; n_params],
    };
    let annotations = options.extra_column.resolve(n_params)?;
    let schema = if annotations.is_some() {
        Schema::ParameterCommentMeasurement
    } else {
        Schema::ParameterMeasurement
    };

    let mut rows = Vec::with_capacity(n_params);
    for (i, (label, transform)) in labels.into_iter().zip(&transforms).enumerate() {
        let triple = one_sigma(&chain.column(i), transform)?;
        let measurement = format_upper_lower(&triple, &options.format)?;
        debug!(column = i, %label, %transform, %measurement, "formatted column");
        rows.push(ParameterRow {
            label,
            annotation: annotations.as_ref().map(|a| a[i].clone()),
            measurement,
        });
    }

    Ok(Table { schema, rows })
}
