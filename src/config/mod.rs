pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, OutputTarget, ReaderOptions};
use crate::utils::error::{CsvJsonError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use toml_config::FileConfig;

pub const DEFAULT_MAX_TABLE_ROWS: usize = 10;

#[cfg(feature = "cli")]
#[derive(Debug, clap::Parser)]
#[command(name = "csvjson")]
#[command(about = "Convert CSV files to JSON", version)]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Parse a CSV file to JSON output
    Parse(ParseArgs),
}

/// Arguments of the `parse` command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::Args))]
pub struct ParseArgs {
    /// Input CSV file path
    #[cfg_attr(feature = "cli", arg(long, short = 'i'))]
    pub input_file: String,

    /// Output JSON file path
    #[cfg_attr(feature = "cli", arg(long, short = 'o'))]
    pub output_file: Option<String>,

    /// Whether to output as a table (small datasets)
    #[cfg_attr(feature = "cli", arg(long))]
    pub output_table: bool,

    /// Columns to include (with aliases/types), e.g. "hashtag,count@number,is active:active@boolean"
    #[cfg_attr(feature = "cli", arg(long, short = 'c'))]
    pub columns: Option<String>,

    /// Whether empty lines should be ignored [default: true]
    #[cfg_attr(feature = "cli", arg(long))]
    pub ignore_empty: Option<bool>,

    /// Field delimiter [default: ,]
    #[cfg_attr(feature = "cli", arg(long))]
    pub delimiter: Option<char>,

    /// Quote character [default: "]
    #[cfg_attr(feature = "cli", arg(long))]
    pub quote: Option<char>,

    /// Output empty fields as null instead of ""
    #[cfg_attr(feature = "cli", arg(long))]
    pub empty_as_null: bool,

    /// Trim whitespace around headers and fields
    #[cfg_attr(feature = "cli", arg(long))]
    pub trim: bool,

    /// Maximum rows printed with --output-table [default: 10]
    #[cfg_attr(feature = "cli", arg(long))]
    pub max_table_rows: Option<usize>,

    /// Write JSON on a single line
    #[cfg_attr(feature = "cli", arg(long))]
    pub compact: bool,

    /// TOML file with defaults for the options above
    #[cfg_attr(feature = "cli", arg(long))]
    pub config: Option<String>,

    /// Enable verbose output
    #[cfg_attr(feature = "cli", arg(long, short = 'v'))]
    pub verbose: bool,

    /// Log CPU and memory usage per phase
    #[cfg_attr(feature = "cli", arg(long))]
    pub monitor: bool,
}

/// Fully resolved settings for one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSettings {
    pub input_file: String,
    pub output: OutputTarget,
    pub columns: Option<String>,
    pub reader: ReaderOptions,
    pub max_table_rows: usize,
    pub pretty: bool,
}

impl ConversionSettings {
    /// Loads the `--config` file, if any, and merges it under the command line arguments.
    pub fn from_args(args: &ParseArgs) -> Result<Self> {
        let file = args
            .config
            .as_deref()
            .map(FileConfig::from_file)
            .transpose()?
            .unwrap_or_default();
        Self::resolve(args, &file)
    }

    pub fn resolve(args: &ParseArgs, file: &FileConfig) -> Result<Self> {
        // Table output wins when both targets are requested.
        let output = match (&args.output_file, args.output_table) {
            (_, true) => OutputTarget::Table,
            (Some(path), false) => OutputTarget::File(path.clone()),
            (None, false) => return Err(CsvJsonError::MissingOutputTarget),
        };

        let defaults = ReaderOptions::default();
        let delimiter = match args.delimiter.or(file.delimiter()?) {
            Some(c) => validation::validate_single_byte("delimiter", c)?,
            None => defaults.delimiter,
        };
        let quote = match args.quote.or(file.quote()?) {
            Some(c) => validation::validate_single_byte("quote", c)?,
            None => defaults.quote,
        };

        let reader = ReaderOptions {
            delimiter,
            quote,
            ignore_empty: args
                .ignore_empty
                .or(file.csv.ignore_empty)
                .unwrap_or(defaults.ignore_empty),
            empty_as_null: args.empty_as_null || file.csv.empty_as_null.unwrap_or(false),
            trim: args.trim || file.csv.trim.unwrap_or(false),
        };

        let settings = Self {
            input_file: args.input_file.clone(),
            output,
            columns: args
                .columns
                .clone()
                .or_else(|| file.columns.definition.clone()),
            reader,
            max_table_rows: args
                .max_table_rows
                .or(file.output.max_table_rows)
                .unwrap_or(DEFAULT_MAX_TABLE_ROWS),
            pretty: !args.compact && file.output.pretty.unwrap_or(true),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for ConversionSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input-file", &self.input_file)?;
        validation::validate_file_extension(&self.input_file, "csv")?;

        if let OutputTarget::File(path) = &self.output {
            validation::validate_path("output-file", path)?;
            validation::validate_file_extension(path, "json")?;
        }

        validation::validate_positive_number("max-table-rows", self.max_table_rows, 1)?;

        if self.reader.delimiter == self.reader.quote {
            return Err(CsvJsonError::ConfigValidationError {
                field: "delimiter".to_string(),
                message: "Delimiter and quote character must differ".to_string(),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for ConversionSettings {
    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn output_target(&self) -> OutputTarget {
        self.output.clone()
    }

    fn column_definitions(&self) -> Option<&str> {
        self.columns.as_deref()
    }

    fn reader_options(&self) -> ReaderOptions {
        self.reader.clone()
    }

    fn max_table_rows(&self) -> usize {
        self.max_table_rows
    }

    fn pretty(&self) -> bool {
        self.pretty
    }
}
