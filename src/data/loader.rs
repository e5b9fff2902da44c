use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::{debug, info};

use super::model::Table;
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a comma-separated file with a header row.
///
/// Rows must all have as many fields as the header. A missing file is
/// `NotFound`; an absent header or ragged row is `Format`.
pub fn load_table(path: &Path) -> Result<Table> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
        },
        _ => Error::io(path, e),
    })?;

    let table = read_table(file, path)?;
    info!(
        "loaded {} rows x {} columns from {}",
        table.len(),
        table.headers.len(),
        path.display()
    );
    Ok(table)
}

/// Parse CSV from any reader. `source` is only used for error messages.
pub fn read_table<R: Read>(input: R, source: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(e, source))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(Error::format(source, "missing header row"));
    }
    debug!("header: {headers:?}");

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(e, source))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(source, headers, rows))
}

// -- csv error mapping --

fn csv_error(err: csv::Error, source: &Path) -> Error {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => Error::io(source, e),
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos.map(|p| p.line()).unwrap_or(0);
            Error::format(
                source,
                format!("line {line} has {len} fields, expected {expected_len}"),
            )
        }
        csv::ErrorKind::Utf8 { pos, err } => {
            let line = pos.map(|p| p.line()).unwrap_or(0);
            Error::format(source, format!("line {line} is not valid UTF-8: {err}"))
        }
        _ => Error::format(source, message),
    }
}
