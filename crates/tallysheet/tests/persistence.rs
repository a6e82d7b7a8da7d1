//! Tests for saving and loading sheets

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tallysheet::prelude::*;
use tempfile::TempDir;

fn sample_sheet() -> Spreadsheet {
    let mut sheet = Spreadsheet::with_options(SpreadsheetOptions::default().with_version("ps6"));
    sheet.set_contents_of_cell("A1", "10").unwrap();
    sheet.set_contents_of_cell("B1", "=A1*2+5").unwrap();
    sheet.set_contents_of_cell("C1", "label").unwrap();
    sheet.set_contents_of_cell("D1", "=B1/0").unwrap();
    sheet
}

/// Test that a saved sheet loads back with the same contents and values
#[test]
fn test_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sheet.json");

    let mut sheet = sample_sheet();
    assert!(sheet.is_changed());
    sheet.save(&path).unwrap();
    assert!(!sheet.is_changed());

    let loaded = Spreadsheet::load(&path, SpreadsheetOptions::default().with_version("ps6")).unwrap();
    assert!(!loaded.is_changed());
    assert_eq!(loaded.version(), "ps6");
    assert_eq!(loaded.nonempty_cells(), sheet.nonempty_cells());
    for name in sheet.nonempty_cells() {
        assert_eq!(loaded.cell_contents(&name).unwrap(), sheet.cell_contents(&name).unwrap());
        assert_eq!(loaded.cell_value(&name).unwrap(), sheet.cell_value(&name).unwrap());
    }
}

/// Test that loading with another version fails
#[test]
fn test_load_version_mismatch() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sheet.json");
    sample_sheet().save(&path).unwrap();

    let err = Spreadsheet::load(&path, SpreadsheetOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        Error::ReadWrite(ReadWriteError::VersionMismatch { .. })
    ));
}

/// Test that a missing file is an I/O error
#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Spreadsheet::load(dir.path().join("nope.json"), SpreadsheetOptions::default())
        .unwrap_err();
    assert!(matches!(err, Error::ReadWrite(ReadWriteError::Io(_))));
}

/// Test that a failed save leaves the changed flag set
#[test]
fn test_failed_save() {
    let dir = TempDir::new().unwrap();
    let mut sheet = sample_sheet();

    // A directory cannot be opened as a file
    assert!(sheet.save(dir.path()).is_err());
    assert!(sheet.is_changed());
    assert_eq!(sheet.cell_content_string("B1").unwrap(), "=A1*2+5");
}

/// Test that a document with a cycle does not load
#[test]
fn test_load_cycle() {
    let json = r#"{
        "version": "default",
        "cells": {
            "A1": { "stringForm": "=C1" },
            "B1": { "stringForm": "=A1" },
            "C1": { "stringForm": "=B1" }
        }
    }"#;

    match Spreadsheet::from_json(json, SpreadsheetOptions::default()) {
        Err(Error::ReadWrite(ReadWriteError::InvalidCell { name, source })) => {
            assert_eq!(name, "C1");
            assert!(matches!(*source, Error::CircularReference(_)));
        }
        other => panic!("unexpected result: {:?}", other.map(|s| s.nonempty_cells())),
    }
}

fn arb_content() -> impl Strategy<Value = String> {
    let cell = prop::sample::select(vec!["A1", "A2", "B1", "B2"]);
    prop_oneof![
        (0u32..100).prop_map(|n| n.to_string()),
        Just(String::new()),
        Just("text".to_string()),
        (cell.clone(), "[-+*/]", cell).prop_map(|(a, op, b)| format!("={a}{op}{b}")),
        (0u32..5).prop_map(|n| format!("=A1/{n}")),
    ]
}

fn arb_edits() -> impl Strategy<Value = Vec<(&'static str, String)>> {
    let cell = prop::sample::select(vec!["A1", "A2", "B1", "B2"]);
    prop::collection::vec((cell, arb_content()), 0..20)
}

proptest! {
    /// Replaying a saved sheet reproduces every value, whatever edits led to it
    #[test]
    fn saved_sheet_reloads_identically(edits in arb_edits()) {
        let mut sheet = Spreadsheet::new();
        for (name, content) in &edits {
            // Rejected edits leave the sheet unchanged
            let _ = sheet.set_contents_of_cell(name, content);
        }

        let json = sheet.to_json().unwrap();
        let loaded = Spreadsheet::from_json(&json, SpreadsheetOptions::default()).unwrap();

        prop_assert_eq!(loaded.nonempty_cells(), sheet.nonempty_cells());
        for name in ["A1", "A2", "B1", "B2"] {
            prop_assert_eq!(loaded.cell_value(name).unwrap(), sheet.cell_value(name).unwrap());
        }
    }
}
