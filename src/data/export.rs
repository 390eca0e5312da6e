use thiserror::Error;

use super::filter::FilteredView;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("flushing CSV buffer failed: {0}")]
    Flush(#[from] std::io::Error),
}

/// Serialize a filtered view as UTF-8 CSV: header row, then the view's
/// records in order. Missing values become empty cells.
pub fn to_csv_bytes(view: &FilteredView<'_>) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(&view.dataset().headers)?;
    for record in view.records() {
        writer.write_record(record.cells.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }

    writer.into_inner().map_err(|e| ExportError::Flush(e.into_error()))
}
