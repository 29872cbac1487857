use std::io::Read;
use std::path::Path;

use thiserror::Error;

use super::model::{CellValue, Column, Table};

/// Cell spellings read as a missing value, matching common spreadsheet / Pandas exports.
const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Why a file could not be turned into a [`Table`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("the file is empty")]
    Empty,
    #[error("line {line}: {reason}")]
    Malformed { line: u64, reason: String },
    #[error("line {line}: text is not valid UTF-8")]
    Encoding { line: u64 },
    #[error("could not read the file: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a table from a CSV file on disk.
pub fn load_file(path: &Path) -> Result<Table, LoadError> {
    let file = std::fs::File::open(path)?;
    load_reader(file)
}

/// Load a table from an in-memory CSV buffer.
pub fn load_bytes(bytes: &[u8]) -> Result<Table, LoadError> {
    load_reader(bytes)
}

/// Load a table from any byte stream holding comma-separated text.
///
/// Layout: one header row naming the columns, then one record per row.
/// Records shorter than the header are padded with [`CellValue::Missing`];
/// records longer than the header are rejected.
pub fn load_reader<R: Read>(input: R) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let raw_headers: Vec<String> = reader
        .headers()
        .map_err(map_csv_error)?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if raw_headers.is_empty() || (raw_headers.len() == 1 && raw_headers[0].trim().is_empty()) {
        return Err(LoadError::Empty);
    }

    let headers = unique_headers(&raw_headers);
    let mut columns: Vec<Vec<CellValue>> = vec![Vec::new(); headers.len()];

    for result in reader.records() {
        let record = result.map_err(map_csv_error)?;

        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(LoadError::Malformed {
                line,
                reason: format!(
                    "expected {} fields, saw {}",
                    headers.len(),
                    record.len()
                ),
            });
        }

        for (col_idx, cells) in columns.iter_mut().enumerate() {
            let value = record
                .get(col_idx)
                .map_or(CellValue::Missing, guess_cell_type);
            cells.push(value);
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(columns)
        .map(|(name, values)| Column::new(name, values))
        .collect();

    let table = Table::from_columns(columns).ok_or_else(|| LoadError::Malformed {
        line: 1,
        reason: "header names could not be made unique".to_string(),
    })?;

    log::debug!(
        "Parsed CSV with {} rows and columns {:?}",
        table.len(),
        table.column_names().collect::<Vec<_>>()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn map_csv_error(err: csv::Error) -> LoadError {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => LoadError::Io(e),
        csv::ErrorKind::Utf8 { pos, .. } => LoadError::Encoding {
            line: pos.map_or(0, |p| p.line()),
        },
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => LoadError::Malformed {
            line: pos.map_or(0, |p| p.line()),
            reason: format!("expected {expected_len} fields, saw {len}"),
        },
        other => LoadError::Malformed {
            line: 0,
            reason: format!("{other:?}"),
        },
    }
}

/// Give blank headers a positional name and suffix repeats with `.1`, `.2`, ….
fn unique_headers(raw: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(raw.len());
    for (idx, header) in raw.iter().enumerate() {
        let header = header.trim_start_matches('\u{feff}');
        let base = if header.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            header.to_string()
        };

        let mut candidate = base.clone();
        let mut suffix = 1;
        while names.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}

fn guess_cell_type(raw: &str) -> CellValue {
    let s = raw.trim();
    if NA_MARKERS.contains(&s) {
        return CellValue::Missing;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => CellValue::Float(f),
        _ => CellValue::Text(raw.to_string()),
    }
}
