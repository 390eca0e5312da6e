use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use thiserror::Error;

use super::model::{Dataset, Field, Record};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why no dataset could be produced. `Clone` so a cached failure can be
/// handed out on every lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("'{}' not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("could not read '{}': {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("malformed data: {0}")]
    Malformed(String),

    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the curriculum table from a CSV file.
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    })?;
    from_reader(file)
}

/// Parse CSV text into a [`Dataset`].
///
/// * first row is the header; names are trimmed
/// * empty cells become missing values
/// * short rows are padded with missing values, long rows are rejected
/// * `YearOfStudy` is normalized with [`normalize_year`]
pub fn from_reader<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let year_idx = headers
        .iter()
        .position(|h| h == Field::YearOfStudy.column_name());

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let row = result.map_err(|e| LoadError::Malformed(e.to_string()))?;
        if row.len() > headers.len() {
            return Err(LoadError::Malformed(format!(
                "row {} has {} fields but the header has {}",
                row_no + 1,
                row.len(),
                headers.len()
            )));
        }

        let mut cells: Vec<Option<String>> = row
            .iter()
            .enumerate()
            .map(|(col_idx, value)| {
                if Some(col_idx) == year_idx {
                    normalize_year(value)
                } else if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            })
            .collect();
        cells.resize(headers.len(), None);

        records.push(Record::new(cells));
    }

    Dataset::from_records(headers, records).map_err(|missing| {
        LoadError::MissingColumns(
            missing
                .iter()
                .map(|f| f.column_name().to_string())
                .collect(),
        )
    })
}

/// Render a year cell as uniform text so `1`, `1.0` and `"1"` compare equal.
pub fn normalize_year(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Some(i.to_string());
    }
    if let Ok(f) = s.parse::<f64>() {
        if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
            return Some((f as i64).to_string());
        }
    }
    Some(s.to_string())
}

// ---------------------------------------------------------------------------
// Load-once cache
// ---------------------------------------------------------------------------

/// Holds the outcome of the first load for the lifetime of its owner.
///
/// The file is read at most once; later calls return the same dataset (or
/// the same failure) even if the file has changed on disk.
#[derive(Debug, Default)]
pub struct DatasetCache {
    cell: OnceLock<Result<Arc<Dataset>, LoadError>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceLock::new(),
        }
    }

    /// Return the cached result, loading `path` on first use.
    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Dataset>, LoadError> {
        self.cell
            .get_or_init(|| {
                let result = load_file(path).map(Arc::new);
                match &result {
                    Ok(ds) => log::info!(
                        "Loaded {} curriculum records from {} ({} columns)",
                        ds.len(),
                        path.display(),
                        ds.headers.len()
                    ),
                    Err(e) => log::error!("Failed to load {}: {e}", path.display()),
                }
                result
            })
            .clone()
    }
}

static DATASET: DatasetCache = DatasetCache::new();

/// Process-wide cached load. The first caller's `path` wins.
pub fn load_cached(path: &Path) -> Result<Arc<Dataset>, LoadError> {
    DATASET.get_or_load(path)
}

#[cfg(test)]
impl DatasetCache {
    fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}
