use crate::domain::model::{
    ColumnSpecSet, ColumnType, FieldValue, OutputRecord, OutputRecordBuilder, RawRecord,
};

/// Keeps, renames and coerces the columns of `record` that have a spec.
///
/// Fields are visited in record order, so specs for keys the record lacks have no effect.
/// Coercion never fails: values that do not convert are kept as strings.
pub fn transform_record(record: &RawRecord, specs: &ColumnSpecSet) -> OutputRecord {
    let mut builder = OutputRecordBuilder::with_capacity(specs.len().min(record.len()));

    for (key, value) in record.iter() {
        let Some(spec) = specs.get(key) else {
            continue;
        };

        let value = match value {
            Some(raw) => coerce(raw, spec.value_type),
            None => FieldValue::Null,
        };
        builder.insert(spec.target_name.as_str(), value);
    }

    builder.build()
}

/// Transforms `record`, or copies it unchanged when there are no specs.
pub fn apply_definitions(record: &RawRecord, specs: Option<&ColumnSpecSet>) -> OutputRecord {
    match specs {
        Some(specs) => transform_record(record, specs),
        None => pass_through(record),
    }
}

/// Order preserving [`apply_definitions`] over a batch.
pub fn transform_records(
    records: &[RawRecord],
    specs: Option<&ColumnSpecSet>,
) -> Vec<OutputRecord> {
    records
        .iter()
        .map(|record| apply_definitions(record, specs))
        .collect()
}

fn pass_through(record: &RawRecord) -> OutputRecord {
    let mut builder = OutputRecordBuilder::with_capacity(record.len());
    for (key, value) in record.iter() {
        builder.insert(key, FieldValue::from(value));
    }
    builder.build()
}

pub fn coerce(raw: &str, value_type: ColumnType) -> FieldValue {
    let coerced = match value_type {
        ColumnType::String => None,
        ColumnType::Number => parse_number(raw).map(FieldValue::Number),
        ColumnType::Boolean => parse_boolean(raw).map(FieldValue::Boolean),
    };

    coerced.unwrap_or_else(|| FieldValue::String(raw.to_string()))
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_boolean(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "t" | "1" => Some(true),
        "false" | "f" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::definition::parse_column_definitions;

    fn record(fields: &[(&str, &str)]) -> RawRecord {
        fields.iter().copied().collect()
    }

    fn specs(definition: &str) -> ColumnSpecSet {
        parse_column_definitions(Some(definition)).unwrap()
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(coerce("42.5", ColumnType::Number), FieldValue::Number(42.5));
        assert_eq!(coerce(" 7 ", ColumnType::Number), FieldValue::Number(7.0));
        assert_eq!(coerce("-1e3", ColumnType::Number), FieldValue::Number(-1000.0));
    }

    #[test]
    fn test_number_coercion_fallback() {
        for raw in ["abc", "", "12abc", "NaN", "inf", "-infinity", "1e400"] {
            assert_eq!(
                coerce(raw, ColumnType::Number),
                FieldValue::String(raw.to_string()),
                "value {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_boolean_coercion() {
        for raw in ["true", "T", "1", "TRUE", "True"] {
            assert_eq!(coerce(raw, ColumnType::Boolean), FieldValue::Boolean(true));
        }
        for raw in ["false", "f", "0", "FALSE", "F"] {
            assert_eq!(coerce(raw, ColumnType::Boolean), FieldValue::Boolean(false));
        }
        for raw in ["maybe", "yes", "", " true"] {
            assert_eq!(
                coerce(raw, ColumnType::Boolean),
                FieldValue::String(raw.to_string())
            );
        }
    }

    #[test]
    fn test_string_coercion_is_identity() {
        assert_eq!(
            coerce("42", ColumnType::String),
            FieldValue::String("42".to_string())
        );
    }

    #[test]
    fn test_filters_columns_without_spec() {
        let raw = record(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let output = transform_record(&raw, &specs("a,c:see"));

        assert_eq!(output.keys().collect::<Vec<_>>(), vec!["a", "see"]);
        assert!(output.get("b").is_none());
        assert_eq!(output.get("see").and_then(FieldValue::as_str), Some("3"));
    }

    #[test]
    fn test_rename_with_boolean() {
        let raw = record(&[("is active", "true")]);
        let output = transform_record(&raw, &specs("is active:active@boolean"));

        assert_eq!(output.len(), 1);
        assert_eq!(output.get("active"), Some(&FieldValue::Boolean(true)));
    }

    #[test]
    fn test_spec_for_missing_key_has_no_effect() {
        let raw = record(&[("a", "1")]);
        let output = transform_record(&raw, &specs("a@number,zzz@boolean"));

        assert_eq!(output.len(), 1);
        assert_eq!(output.get("a"), Some(&FieldValue::Number(1.0)));
    }

    #[test]
    fn test_end_to_end_record() {
        let raw = record(&[("hashtag", "#foo"), ("count", "7"), ("is active", "false")]);
        let specs = specs("hashtag,count@number,is active:active@boolean");
        let output = transform_record(&raw, &specs);

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({"hashtag": "#foo", "count": 7, "active": false})
        );
        assert_eq!(
            serde_json::to_string(&output).unwrap(),
            r##"{"hashtag":"#foo","count":7,"active":false}"##
        );
    }

    #[test]
    fn test_output_follows_record_order() {
        let raw = record(&[("c", "3"), ("a", "1"), ("b", "2")]);
        let output = transform_record(&raw, &specs("a,b,c"));

        assert_eq!(output.keys().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_shared_target_name_keeps_last_value() {
        let raw = record(&[("first", "1"), ("second", "2")]);
        let output = transform_record(&raw, &specs("first:value@number,second:value@number"));

        assert_eq!(output.len(), 1);
        assert_eq!(output.get("value"), Some(&FieldValue::Number(2.0)));
    }

    #[test]
    fn test_null_values_stay_null() {
        let mut raw = RawRecord::new();
        raw.insert("count", None);
        raw.insert("flag", None);
        let output = transform_record(&raw, &specs("count@number,flag@boolean"));

        assert!(output.get("count").unwrap().is_null());
        assert!(output.get("flag").unwrap().is_null());
    }

    #[test]
    fn test_pass_through_without_specs() {
        let mut raw = record(&[("b", "2"), ("a", "x")]);
        raw.insert("empty", None);
        let output = apply_definitions(&raw, None);

        assert_eq!(output.keys().collect::<Vec<_>>(), vec!["b", "a", "empty"]);
        assert_eq!(output.get("b"), Some(&FieldValue::String("2".to_string())));
        assert_eq!(output.get("a"), Some(&FieldValue::String("x".to_string())));
        assert!(output.get("empty").unwrap().is_null());
    }

    #[test]
    fn test_empty_key_spec_set_is_inert() {
        let specs = parse_column_definitions(Some(",")).unwrap();
        let output = apply_definitions(&record(&[("", "x"), ("a", "1")]), Some(&specs));

        assert!(output.is_empty());
    }

    #[test]
    fn test_transform_records_preserves_order() {
        let records: Vec<RawRecord> = (0..5)
            .map(|i| record(&[("n", i.to_string().as_str())]))
            .collect();
        let specs = specs("n@number");

        let output = transform_records(&records, Some(&specs));

        let values: Vec<f64> = output
            .iter()
            .filter_map(|r| r.get("n").and_then(FieldValue::as_f64))
            .collect();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    }
}
