//! TOML configuration for the `smitty` command line.
//!
//! ```toml
//! [format]
//! decimal_places = 2
//! zero_pad = ""
//! wrap = "$"
//! show_sign = true
//!
//! [table]
//! labels = ["a", "b", "c"]
//! transforms = ["identity", "degrees", "identity"]
//! extra_column = true          # or ["comment a", "comment b", "comment c"]
//! output = "latex"             # or "aastex"
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::format::FormatOptions;
use crate::interval::Transform;
use crate::render::TableFormat;
use crate::table::{Annotation, TableOptions, TransformSpec};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub format: FormatOptions,
    pub table: TableConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TableConfig {
    pub labels: Option<Vec<String>>,
    /// One name broadcasts to every column; several apply per column.
    pub transforms: Vec<String>,
    pub extra_column: Option<ExtraColumn>,
    pub output: TableFormat,
}

/// `extra_column = true` or `extra_column = ["..", ..]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ExtraColumn {
    Flag(bool),
    Comments(Vec<String>),
}

impl From<ExtraColumn> for Annotation {
    fn from(extra: ExtraColumn) -> Self {
        match extra {
            ExtraColumn::Flag(false) => Annotation::None,
            ExtraColumn::Flag(true) => Annotation::Empty,
            ExtraColumn::Comments(comments) => Annotation::Explicit(comments),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_owned(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_owned(),
            source: e,
        })
    }

    /// Table options described by this config.
    ///
    /// # Errors
    /// [`Error::InvalidTransform`] for an unknown transformation name.
    pub fn table_options(&self) -> Result<TableOptions> {
        Ok(TableOptions {
            labels: self.table.labels.clone(),
            transformation: parse_transforms(&self.table.transforms)?,
            extra_column: self
                .table
                .extra_column
                .clone()
                .map(Annotation::from)
                .unwrap_or_default(),
            format: self.format.clone(),
        })
    }
}

/// Maps transformation names to a [`TransformSpec`].
///
/// No names means no transformation, one name is broadcast to every
/// column, more than one is taken per column.
pub fn parse_transforms<S: AsRef<str>>(names: &[S]) -> Result<Option<TransformSpec>> {
    match names {
        [] => Ok(None),
        [single] => Ok(Some(TransformSpec::Single(single.as_ref().parse()?))),
        many => {
            let per_column = many
                .iter()
                .map(|name| -> Result<Option<Transform>> {
                    let t: Transform = name.as_ref().parse()?;
                    Ok((!t.is_identity()).then_some(t))
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Some(TransformSpec::PerColumn(per_column)))
        }
    }
}

/// Commented example configuration.
pub const EXAMPLE_CONFIG: &str = r#"# smitty configuration file

[format]
# decimal_places = 2       # derived from the interval when unset
zero_pad = ""              # "[0][width]", e.g. "08"
wrap = "$"                 # inline math mode
show_sign = true

[table]
# labels = ["a", "b", "c"]
# transforms = ["identity", "degrees", "identity"]   # or a single name for all columns
# extra_column = true      # or ["comment a", "comment b", "comment c"]
output = "latex"           # or "aastex"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_example_config_parses() {
        let config: Config = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_full_config() {
        let config: Config = toml::from_str(
            r#"
            [format]
            decimal_places = 3
            show_sign = false

            [table]
            labels = ["a", "b"]
            transforms = ["none", "degrees"]
            extra_column = ["x", "y"]
            output = "aastex"
            "#,
        )
        .unwrap();
        assert_eq!(config.format.decimal_places, Some(3));
        assert!(!config.format.show_sign);
        assert_eq!(config.table.output, TableFormat::AasTex);

        let opts = config.table_options().unwrap();
        assert_eq!(opts.labels, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(
            opts.extra_column,
            Annotation::Explicit(vec!["x".into(), "y".into()])
        );
        match opts.transformation {
            Some(TransformSpec::PerColumn(ts)) => {
                assert!(ts[0].is_none());
                assert!(matches!(ts[1], Some(Transform::Degrees)));
            }
            other => panic!("expected per-column transforms, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_column_flag() {
        let config: Config = toml::from_str("[table]\nextra_column = true").unwrap();
        assert_eq!(config.table_options().unwrap().extra_column, Annotation::Empty);
        let config: Config = toml::from_str("[table]\nextra_column = false").unwrap();
        assert_eq!(config.table_options().unwrap().extra_column, Annotation::None);
    }

    #[test]
    fn test_parse_transforms() {
        assert!(parse_transforms::<&str>(&[]).unwrap().is_none());
        assert!(matches!(
            parse_transforms(&["degrees"]).unwrap(),
            Some(TransformSpec::Single(Transform::Degrees))
        ));
        assert!(matches!(
            parse_transforms(&["degrees", "cube"]),
            Err(Error::InvalidTransform(name)) if name == "cube"
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<Config>("[table]\ncolumns = 3").is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.child("smitty.toml");
        file.write_str("[format]\nwrap = \"$$\"\n").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.format.wrap, "$$");

        let missing = dir.child("missing.toml");
        assert!(matches!(
            Config::from_file(missing.path()),
            Err(Error::ConfigRead { .. })
        ));

        let broken = dir.child("broken.toml");
        broken.write_str("[format\n").unwrap();
        assert!(matches!(
            Config::from_file(broken.path()),
            Err(Error::ConfigParse { .. })
        ));
    }
}
