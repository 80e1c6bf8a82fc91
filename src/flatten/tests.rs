//! Tests for tabular flattening

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn test_header_row_first_in_spec_order() {
    let spec = ColumnSpec::new()
        .field("Name", "name")
        .field("Budget", "budget")
        .field("Status", "status");

    let rows = flatten(&spec, &[]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], vec![json!("Name"), json!("Budget"), json!("Status")]);
}

#[test]
fn test_field_columns_pull_record_values() {
    let spec = ColumnSpec::new().field("Name", "name").field("Budget", "budget");
    let records = vec![
        json!({"name": "Website", "budget": 1200}),
        json!({"name": "Rebrand", "budget": 8000}),
    ];

    let rows = flatten(&spec, &records);

    assert_eq!(rows[1], vec![json!("Website"), json!(1200)]);
    assert_eq!(rows[2], vec![json!("Rebrand"), json!(8000)]);
}

#[test]
fn test_missing_field_yields_null_cell() {
    let spec = ColumnSpec::new().field("Name", "name").field("Owner", "owner");
    let records = vec![json!({"name": "Website"})];

    let rows = flatten(&spec, &records);
    assert_eq!(rows[1], vec![json!("Website"), json!(null)]);
}

#[test]
fn test_extractor_receives_header_and_record() {
    let spec = ColumnSpec::new().with("Label", |header, record| {
        json!(format!("{header}:{}", record["id"]))
    });
    let records = vec![json!({"id": 7})];

    let rows = flatten(&spec, &records);
    assert_eq!(rows[1], vec![json!("Label:7")]);
}

#[test]
fn test_cells_are_independent() {
    // A derived column combining source fields never sees another
    // column's computed cell, only the raw record.
    let spec = ColumnSpec::new()
        .with("First", |_, record| json!(record["n"].as_i64().unwrap() * 2))
        .with("Second", |_, record| record["n"].clone());
    let records = vec![json!({"n": 5})];

    let rows = flatten(&spec, &records);
    assert_eq!(rows[1], vec![json!(10), json!(5)]);
}

#[test]
fn test_rows_are_rectangular() {
    let spec = ColumnSpec::new().field("A", "a").field("B", "b");
    let records = vec![json!({"a": 1}), json!({"b": 2}), json!({})];

    let rows = flatten(&spec, &records);
    assert!(rows.iter().all(|row| row.len() == spec.len()));
}
