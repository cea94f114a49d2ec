//! Loading tables from files on disk.
//!
//! Covers the three failure kinds the pipeline must tell apart (not found,
//! empty, unexpected) and a realistic sprint backlog file.

use audit_core::{CellValue, ColumnType};
use audit_loader::{DEFAULT_DELIMITER, LoadError, LoadErrorKind, load_table};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const BACKLOG: &str = "\
Sprint,Sprint_Name,Phase,Story_ID,Story_Name,Type,Description,Tasks,Est_Hours,Resources,Acceptance_Criteria
Sprint 1,Python Basics,Foundation,S1-01,Setup env,Setup,Install tools,Install Python,2,Docs,Python runs
Sprint 1,Python Basics,Foundation,S1-02,Generators,Study,\"Learn yield, next\",Read chapter,4.5,Book,Quiz passed
Sprint 2,SQL,Core Tools,S2-01,Joins,Practice,Practice joins,,6,,Queries pass
";

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_backlog_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "backlog.csv", BACKLOG);

    let table = load_table(&path, DEFAULT_DELIMITER).unwrap();

    assert_eq!(table.row_count(), 3);
    assert_eq!(table.column_count(), 11);
    assert_eq!(table.column_type("Est_Hours"), Some(ColumnType::Float));
    assert_eq!(table.column_type("Story_ID"), Some(ColumnType::Text));
    assert_eq!(
        table.value(1, "Description"),
        Some(&CellValue::from("Learn yield, next"))
    );
    assert_eq!(table.value(2, "Tasks"), Some(&CellValue::Null));
    assert_eq!(table.value(2, "Resources"), Some(&CellValue::Null));
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.csv");

    let err = load_table(&path, DEFAULT_DELIMITER).unwrap_err();

    assert_eq!(err.kind(), LoadErrorKind::NotFound);
    assert_eq!(err.path(), path.as_path());
}

#[test]
fn test_zero_byte_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "empty.csv", "");

    let err = load_table(&path, DEFAULT_DELIMITER).unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Empty);
}

#[test]
fn test_header_only_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "header.csv", "Story_ID,Est_Hours\n");

    let err = load_table(&path, DEFAULT_DELIMITER).unwrap_err();
    assert!(matches!(err, LoadError::Empty { .. }));
}

#[test]
fn test_directory_is_unexpected() {
    let dir = TempDir::new().unwrap();

    let err = load_table(dir.path(), DEFAULT_DELIMITER).unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Unexpected);
}

#[test]
fn test_invalid_utf8_is_unexpected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("latin1.csv");
    fs::write(&path, b"name\n\xff\xfe\xfa\n").unwrap();

    let err = load_table(&path, DEFAULT_DELIMITER).unwrap_err();
    assert_eq!(err.kind(), LoadErrorKind::Unexpected);
}

#[test]
fn test_semicolon_delimited_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "semi.csv", "Story_ID;Est_Hours\nS1;3\n");

    let table = load_table(&path, b';').unwrap();
    assert_eq!(table.value(0, "Est_Hours"), Some(&CellValue::Float(3.0)));
}
