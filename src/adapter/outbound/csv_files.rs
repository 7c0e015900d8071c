//! CSV readers for outgoing records, the item catalog and prediction history.
//!
//! Expected columns:
//!
//! - records: `item_name, date, customer, quantity` (`customer` and
//!   `quantity` optional, dates as `YYYY-MM-DD`)
//! - catalog: `name, code, image` (`code` and `image` may be empty)
//! - predictions: `item_id, period, predicted, actual` (`actual` may be empty)

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::accuracy::PredictionRecord;
use crate::domain::{ItemCatalog, ItemInfo, OutgoingRecord};
use crate::error::Result;
use crate::port::outbound::source::RecordSource;

fn read_rows<T: DeserializeOwned, R: Read>(reader: R) -> Result<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// Parse outgoing records from CSV.
///
/// # Errors
///
/// Returns [`crate::error::Error::Csv`] with the offending line when a row
/// cannot be parsed, and [`crate::error::Error::Domain`] when a quantity is
/// negative.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<OutgoingRecord>> {
    let records: Vec<OutgoingRecord> = read_rows(reader)?;
    for record in &records {
        record.validate()?;
    }
    Ok(records)
}

/// Parse item display metadata from CSV.
///
/// # Errors
///
/// Returns an error if a row cannot be parsed.
pub fn read_catalog<R: Read>(reader: R) -> Result<ItemCatalog> {
    let items: Vec<ItemInfo> = read_rows(reader)?;
    Ok(items.into_iter().collect())
}

/// Load the item catalog from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn load_catalog(path: &Path) -> Result<ItemCatalog> {
    let catalog = read_catalog(File::open(path)?)?;
    debug!(path = %path.display(), items = catalog.len(), "Loaded item catalog");
    Ok(catalog)
}

/// Load stored predictions from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn load_prediction_history(path: &Path) -> Result<Vec<PredictionRecord>> {
    let history: Vec<PredictionRecord> = read_rows(File::open(path)?)?;
    debug!(path = %path.display(), predictions = history.len(), "Loaded prediction history");
    Ok(history)
}

/// Outgoing records read from a CSV file on every load.
#[derive(Debug, Clone)]
pub struct CsvRecordSource {
    path: PathBuf,
}

impl CsvRecordSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSource for CsvRecordSource {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn load(&self) -> Result<Vec<OutgoingRecord>> {
        let records = read_records(File::open(&self.path)?)?;
        debug!(
            path = %self.path.display(),
            records = records.len(),
            "Loaded outgoing records"
        );
        Ok(records)
    }
}
