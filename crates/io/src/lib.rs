//! `phisherman-io` — tabular input source and export sink.
//!
//! Decodes uploaded CSV/Excel bytes into the engine's `Table`, and writes
//! report tables as a multi-sheet XLSX workbook.

use std::fmt;
use std::path::Path;

use phisherman_recon::model::Table;

pub mod csv;
pub mod xlsx;

#[derive(Debug)]
pub enum ImportError {
    /// The declared filename is neither delimited text nor a spreadsheet.
    UnsupportedFormat(String),
    /// The bytes could not be decoded as the declared format.
    Decode { source: String, message: String },
}

impl fmt::Display for ImportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedFormat(name) => write!(f, "unsupported file format: {name}"),
            Self::Decode { source, message } => write!(f, "cannot decode {source}: {message}"),
        }
    }
}

impl std::error::Error for ImportError {}

/// Decode an uploaded file into rows of cells, dispatching on the declared
/// filename's extension. The bytes are fully consumed; nothing is retained
/// after the returned table is built.
pub fn import_table(bytes: &[u8], filename: &str) -> Result<Table, ImportError> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    let decode = |result: Result<Table, String>| {
        result.map_err(|message| ImportError::Decode {
            source: filename.to_string(),
            message,
        })
    };

    match ext.as_str() {
        "csv" | "tsv" | "txt" => decode(csv::import_bytes(bytes)),
        "xlsx" | "xlsm" | "xls" | "ods" => decode(xlsx::import_bytes(bytes)),
        _ => Err(ImportError::UnsupportedFormat(filename.to_string())),
    }
}
