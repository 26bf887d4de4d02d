use crate::utils::error::{CsvJsonError, Result};
use std::path::Path;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(CsvJsonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CsvJsonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Checks the extension of `path` (case-insensitive).
pub fn validate_file_extension(path: &str, extension: &str) -> Result<()> {
    let matches = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

    if matches {
        Ok(())
    } else {
        Err(CsvJsonError::InvalidFileType {
            path: path.to_string(),
            expected: extension.to_string(),
        })
    }
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CsvJsonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

/// Converts a delimiter or quote character to the single byte the CSV reader expects.
pub fn validate_single_byte(field_name: &str, value: char) -> Result<u8> {
    if !value.is_ascii() || matches!(value, '\n' | '\r') {
        return Err(CsvJsonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Must be a single ASCII character other than a line break".to_string(),
        });
    }
    Ok(value as u8)
}

/// Parses a single character setting given as text (e.g. from a TOML file).
pub fn parse_single_char(field_name: &str, value: &str) -> Result<char> {
    let value = if value == "\\t" { "\t" } else { value };
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CsvJsonError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Expected exactly one character".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input_file", "data.csv").is_ok());
        assert!(validate_path("input_file", "").is_err());
        assert!(validate_path("input_file", "  ").is_err());
        assert!(validate_path("input_file", "bad\0.csv").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("data.csv", "csv").is_ok());
        assert!(validate_file_extension("dir/DATA.CSV", "csv").is_ok());
        assert!(validate_file_extension("out.json", "json").is_ok());

        assert!(matches!(
            validate_file_extension("data.txt", "csv"),
            Err(CsvJsonError::InvalidFileType { .. })
        ));
        assert!(validate_file_extension("csv", "csv").is_err());
        assert!(validate_file_extension("data.csv.bak", "csv").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("max_table_rows", 10, 1).is_ok());
        assert!(validate_positive_number("max_table_rows", 0, 1).is_err());
    }

    #[test]
    fn test_validate_single_byte() {
        assert_eq!(validate_single_byte("delimiter", ';').unwrap(), b';');
        assert_eq!(validate_single_byte("delimiter", '\t').unwrap(), b'\t');
        assert!(validate_single_byte("delimiter", 'é').is_err());
        assert!(validate_single_byte("delimiter", '\n').is_err());
    }

    #[test]
    fn test_parse_single_char() {
        assert_eq!(parse_single_char("delimiter", ";").unwrap(), ';');
        assert_eq!(parse_single_char("delimiter", "\\t").unwrap(), '\t');
        assert!(parse_single_char("delimiter", "").is_err());
        assert!(parse_single_char("delimiter", ";;").is_err());
    }
}
