//! CSV table loading.
//!
//! The first record is the header. Cells matching a missing-value marker become
//! nulls, and a column is numeric when every non-null cell parses as `f64`.

use crate::error::{LoadError, Result};
use audit_core::{CellValue, Row, Table};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

/// Default field delimiter.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Cell contents treated as missing values.
pub const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const UTF8_BOM: char = '\u{feff}';

/// Loads a table from a delimited text file.
///
/// # Errors
///
/// - [`LoadError::NotFound`] if the file does not exist
/// - [`LoadError::Empty`] if it has no header or no data rows
/// - any other variant for read or parse failures
///
/// # Example
///
/// ```no_run
/// use audit_loader::{load_table, DEFAULT_DELIMITER};
/// use std::path::Path;
///
/// let table = load_table(Path::new("test_data.csv"), DEFAULT_DELIMITER).unwrap();
/// println!("{} rows x {} columns", table.row_count(), table.column_count());
/// ```
pub fn load_table(path: &Path, delimiter: u8) -> Result<Table> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    parse_table(file, delimiter, path)
}

/// Reads a table from any reader. Errors report the path as `<memory>`.
pub fn read_table<R: Read>(input: R, delimiter: u8) -> Result<Table> {
    parse_table(input, delimiter, Path::new("<memory>"))
}

fn parse_table<R: Read>(input: R, delimiter: u8, path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let header = reader
        .headers()
        .map_err(|e| LoadError::csv(path, e))?
        .clone();
    if header.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }
    let columns = column_names(header.iter());
    let width = columns.len();

    let mut raw: Vec<Vec<Option<String>>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::csv(path, e))?;
        if record.len() > width {
            return Err(LoadError::Malformed {
                path: path.to_path_buf(),
                line: record.position().map_or(0, |p| p.line()),
                expected: width,
                found: record.len(),
            });
        }

        let mut cells: Vec<Option<String>> = record.iter().map(parse_cell).collect();
        cells.resize(width, None);
        raw.push(cells);
    }

    if raw.is_empty() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    let numeric: Vec<bool> = (0..width)
        .map(|col| {
            raw.iter()
                .filter_map(|row| row[col].as_deref())
                .all(|cell| parse_float(cell).is_some())
        })
        .collect();

    let rows: Vec<Row> = raw
        .into_iter()
        .map(|cells| {
            cells
                .into_iter()
                .zip(&numeric)
                .map(|(cell, &is_numeric)| typed_cell(cell, is_numeric))
                .collect()
        })
        .collect();

    debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = width,
        "Loaded table"
    );

    Table::from_rows(columns, rows).map_err(|source| LoadError::Table {
        path: path.to_path_buf(),
        source,
    })
}

/// Normalizes header names: strips a UTF-8 BOM, names blank headers by
/// position and suffixes repeated names with `.1`, `.2`, ...
fn column_names<'a>(header: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::new();

    for (position, name) in header.enumerate() {
        let name = name.trim_start_matches(UTF8_BOM);
        let base = if name.is_empty() {
            format!("Unnamed: {position}")
        } else {
            name.to_string()
        };

        let seen = counts.entry(base.clone()).or_insert(0);
        let unique = if *seen == 0 {
            base
        } else {
            let renamed = format!("{base}.{seen}");
            warn!(column = %base, renamed = %renamed, "Duplicate column name in header");
            renamed
        };
        *seen += 1;
        names.push(unique);
    }

    names
}

fn parse_cell(cell: &str) -> Option<String> {
    if MISSING_MARKERS.contains(&cell) {
        None
    } else {
        Some(cell.to_string())
    }
}

fn parse_float(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

fn typed_cell(cell: Option<String>, numeric: bool) -> CellValue {
    match cell {
        None => CellValue::Null,
        Some(text) if numeric => parse_float(&text).map_or(CellValue::Text(text), CellValue::Float),
        Some(text) => CellValue::Text(text),
    }
}
