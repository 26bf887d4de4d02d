use crate::utils::error::{CsvJsonError, Result};
use crate::utils::validation::{self, Validate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Defaults read from a `csvjson.toml` file. Command line flags take precedence.
///
/// ```toml
/// [csv]
/// delimiter = ";"
/// ignore_empty = false
///
/// [output]
/// max_table_rows = 25
///
/// [columns]
/// definition = "hashtag,count@number,is active:active@boolean"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub csv: CsvSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub columns: ColumnsSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CsvSection {
    pub delimiter: Option<String>,
    pub quote: Option<String>,
    pub ignore_empty: Option<bool>,
    pub empty_as_null: Option<bool>,
    pub trim: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub max_table_rows: Option<usize>,
    pub pretty: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnsSection {
    pub definition: Option<String>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path).map_err(CsvJsonError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content)?;

        let config: Self =
            toml::from_str(&processed).map_err(|e| CsvJsonError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn delimiter(&self) -> Result<Option<char>> {
        self.csv
            .delimiter
            .as_deref()
            .map(|d| validation::parse_single_char("csv.delimiter", d))
            .transpose()
    }

    pub fn quote(&self) -> Result<Option<char>> {
        self.csv
            .quote
            .as_deref()
            .map(|q| validation::parse_single_char("csv.quote", q))
            .transpose()
    }
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(delimiter) = self.delimiter()? {
            validation::validate_single_byte("csv.delimiter", delimiter)?;
        }
        if let Some(quote) = self.quote()? {
            validation::validate_single_byte("csv.quote", quote)?;
        }
        if let Some(rows) = self.output.max_table_rows {
            validation::validate_positive_number("output.max_table_rows", rows, 1)?;
        }
        Ok(())
    }
}

/// Replaces `${VAR}` with the environment variable's value. Unset variables are left as is.
fn substitute_env_vars(content: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([^}]+)\}")
        .map_err(|e| CsvJsonError::config(format!("Invalid substitution pattern: {}", e)))?;

    let result = re.replace_all(content, |caps: &Captures| {
        let name = &caps[1];
        std::env::var(name).unwrap_or_else(|_| format!("${{{}}}", name))
    });

    Ok(result.into_owned())
}
