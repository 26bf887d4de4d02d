//! Column definition strings.
//!
//! A definition is a comma separated list of parts, each `key[:alias][@type]`:
//!
//! ```text
//! hashtag,count@number,is active:active@boolean
//! ```
//!
//! Parsing is permissive. Unknown types become `string`, a missing or blank alias keeps
//! the key, and parts without a key are skipped.

use crate::domain::model::{ColumnSpec, ColumnSpecSet, ColumnType};

const SEGMENT_SEPARATORS: [char; 2] = [':', '@'];

/// Parses a column definition string.
///
/// Returns `None` when no definition was given, meaning records pass through untouched.
/// A later part for the same key replaces an earlier one.
pub fn parse_column_definitions(definition: Option<&str>) -> Option<ColumnSpecSet> {
    let definition = definition.filter(|d| !d.trim().is_empty())?;

    let mut specs = ColumnSpecSet::new();
    for part in definition.split(',') {
        match parse_definition_part(part) {
            Some(spec) => {
                if specs.contains_key(&spec.source_key) {
                    tracing::debug!(
                        "Column '{}' defined more than once, using the last definition",
                        spec.source_key
                    );
                }
                specs.insert(spec.source_key.clone(), spec);
            }
            None => tracing::debug!("Skipping column definition without a key: {:?}", part),
        }
    }

    Some(specs)
}

/// Parses one `key[:alias][@type]` part. `None` when the key is empty.
pub fn parse_definition_part(part: &str) -> Option<ColumnSpec> {
    let key = part
        .split(SEGMENT_SEPARATORS)
        .next()
        .unwrap_or_default()
        .trim();
    if key.is_empty() {
        return None;
    }

    let alias = part.split_once(':').map(|(_, rest)| {
        rest.split(SEGMENT_SEPARATORS)
            .next()
            .unwrap_or_default()
            .trim()
    });

    let value_type = part
        .rsplit_once('@')
        .map(|(_, token)| ColumnType::from_token(token.trim()))
        .unwrap_or_default();

    Some(ColumnSpec::new(key, alias, value_type))
}
