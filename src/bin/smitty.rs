// src/bin/smitty.rs
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use smitty::config::{parse_transforms, Config, EXAMPLE_CONFIG};
use smitty::{
    format_upper_lower, one_sigma, samples_to_latex_with, Annotation, Chain, Error, FormatOptions,
    LatexDisplay, TableFormat, Transform, TypesetRenderer, WriterDisplay,
};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    Latex,
    Aastex,
}
impl From<Output> for TableFormat {
    fn from(o: Output) -> Self {
        match o {
            Output::Latex => TableFormat::Latex,
            Output::Aastex => TableFormat::AasTex,
        }
    }
}

#[derive(Parser)]
#[command(name = "smitty", version)]
#[command(about = "Format posterior samples as one-sigma measurements and LaTeX tables")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Overrides for the `[format]` config section.
#[derive(Args, Debug)]
struct FormatArgs {
    /// Fixed number of decimal places (derived from the interval if omitted)
    #[arg(short, long)]
    decimal_places: Option<usize>,

    /// Field spec "[0][width]" used to centre every number
    #[arg(long)]
    zero_pad: Option<String>,

    /// Delimiter around each measurement
    #[arg(long)]
    wrap: Option<String>,

    /// Drop the -/+ in front of the errors
    #[arg(long)]
    no_sign: bool,
}

impl FormatArgs {
    fn apply(self, mut opts: FormatOptions) -> FormatOptions {
        if let Some(dp) = self.decimal_places {
            opts.decimal_places = Some(dp);
        }
        if let Some(zero_pad) = self.zero_pad {
            opts.zero_pad = zero_pad;
        }
        if let Some(wrap) = self.wrap {
            opts.wrap = wrap;
        }
        if self.no_sign {
            opts.show_sign = false;
        }
        opts
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Read samples (space/comma/newline separated) and print one measurement
    OneSigma {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Transformation applied before reduction (identity|degrees|radians|log10|ln|exp|pow:K)
        #[arg(short, long)]
        transform: Option<String>,

        #[command(flatten)]
        format: FormatArgs,
    },
    /// Read a flat chain (one draw per line, one column per parameter) and print a table
    Table {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Comma-separated parameter labels
        #[arg(short, long, value_delimiter = ',')]
        labels: Option<Vec<String>>,

        /// One transformation for all columns, or a comma-separated list with one per column
        #[arg(short, long, value_delimiter = ',')]
        transform: Vec<String>,

        /// Comma-separated comments, one per column
        #[arg(long, value_delimiter = ',', conflicts_with = "empty_comments")]
        comments: Option<Vec<String>>,

        /// Add an empty Comment column
        #[arg(long)]
        empty_comments: bool,

        /// Table markup
        #[arg(short, long, value_enum)]
        output: Option<Output>,

        #[command(flatten)]
        format: FormatArgs,
    },
    /// Print an example configuration file
    ExampleConfig,
}

fn setup_logging(verbose: bool) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install logger")
}

fn parse_numbers(s: &str) -> Result<Vec<f64>> {
    let mut out = Vec::new();
    for tok in s
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|t| !t.is_empty())
    {
        out.push(
            tok.parse::<f64>()
                .with_context(|| format!("not a number: {tok:?}"))?,
        );
    }
    Ok(out)
}

fn data_lines(s: &str) -> impl Iterator<Item = (usize, &str)> {
    s.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Every number on the data lines of `s`.
fn parse_samples(s: &str) -> Result<Vec<f64>> {
    let mut out = Vec::new();
    for (lineno, line) in data_lines(s) {
        out.extend(parse_numbers(line).with_context(|| format!("line {lineno}"))?);
    }
    Ok(out)
}

/// One chain row per data line, paired with its line number in `s`.
fn parse_rows(s: &str) -> Result<(Vec<usize>, Vec<Vec<f64>>)> {
    let mut linenos = Vec::new();
    let mut rows = Vec::new();
    for (lineno, line) in data_lines(s) {
        rows.push(parse_numbers(line).with_context(|| format!("line {lineno}"))?);
        linenos.push(lineno);
    }
    Ok((linenos, rows))
}

fn build_chain(linenos: &[usize], rows: Vec<Vec<f64>>) -> Result<Chain> {
    Chain::from_rows(rows).map_err(|e| match e {
        Error::RaggedChain { row, .. } => {
            let lineno = linenos.get(row).copied().unwrap_or(row + 1);
            anyhow::Error::new(e).context(format!("line {lineno}"))
        }
        other => other.into(),
    })
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .context("failed to read stdin")?;
            Ok(s)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    match cli.command {
        Commands::ExampleConfig => print!("{EXAMPLE_CONFIG}"),

        Commands::OneSigma {
            input,
            transform,
            format,
        } => {
            let samples = parse_samples(&read_input(input.as_deref())?)
                .context("failed to parse samples")?;
            let transform: Transform = match transform {
                Some(name) => name.parse()?,
                None => Transform::Identity,
            };
            debug!(n = samples.len(), %transform, "read samples");
            let triple = one_sigma(&samples, &transform)?;
            let measurement = format_upper_lower(&triple, &format.apply(config.format))?;
            WriterDisplay::new(io::stdout().lock()).display_latex(&measurement)?;
        }

        Commands::Table {
            input,
            labels,
            transform,
            comments,
            empty_comments,
            output,
            format,
        } => {
            let mut opts = config.table_options()?;
            opts.format = format.apply(opts.format);
            if labels.is_some() {
                opts.labels = labels;
            }
            if !transform.is_empty() {
                opts.transformation = parse_transforms(&transform)?;
            }
            if let Some(comments) = comments {
                opts.extra_column = Annotation::Explicit(comments);
            } else if empty_comments {
                opts.extra_column = Annotation::Empty;
            }
            let table_format = output.map_or(config.table.output, TableFormat::from);

            let (linenos, rows) =
                parse_rows(&read_input(input.as_deref())?).context("failed to parse chain")?;
            let chain = build_chain(&linenos, rows)?;
            debug!(
                samples = chain.n_samples(),
                params = chain.n_params(),
                "read chain"
            );
            let rendered = samples_to_latex_with(&TypesetRenderer, table_format, &chain, &opts)?;
            print!("{rendered}");
        }
    }
    Ok(())
}
