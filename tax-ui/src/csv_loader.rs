//! CSV loader for batches of estimate-form submissions.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter. Header
//! names are case-sensitive.
//!
//! | Column          | Required | Notes                                   |
//! |-----------------|----------|-----------------------------------------|
//! | `gross_annual`  | yes      | e.g. `85000` or `85,000.00` (quoted)    |
//! | `filing_status` | yes      | One of: `single`, `mfj`, `hoh`          |
//! | `state`         | yes      | Two-letter code, e.g. `CA`              |
//!
//! Cells are kept as text. Each row becomes one estimate-form submission
//! and goes through the same constraint check as a typed-in form, so a bad
//! value fails that row's submission rather than the whole file.
//!
//! ### Example
//!
//! ```csv
//! gross_annual,filing_status,state
//! 50000,single,CA
//! 120000,mfj,NY
//! ```
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::models::{FormId, FormSubmission};

#[derive(Debug, Deserialize)]
struct CsvRow {
    gross_annual: String,
    filing_status: String,
    state: String,
}

impl From<CsvRow> for FormSubmission {
    fn from(row: CsvRow) -> Self {
        FormSubmission::new(FormId::Estimate)
            .with_field("gross_annual", row.gross_annual)
            .with_field("filing_status", row.filing_status)
            .with_field("state", row.state)
    }
}

/// Errors that can occur while loading a batch file.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// Bad structure, a missing column, or a ragged row.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Parse CSV text and return one submission per data row, in file order.
///
/// # Errors
///
/// [CsvLoadError::Parse] if the CSV is structurally invalid or a required
/// column is missing.
pub fn load_from_str(input: &str) -> Result<Vec<FormSubmission>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .map(|result| Ok(result?.into()))
        .collect()
}

/// Read a file from disk and delegate to [load_from_str].
pub fn load_from_file(path: &Path) -> Result<Vec<FormSubmission>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}
