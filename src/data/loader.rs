//! CSV Data Loader Module
//! Handles loading the grow-locations CSV using Polars.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Input file not found: {0}")]
    FileNotFound(String),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file and drop every row with a missing value in any
    /// column. The coordinate columns must be present in the header;
    /// their values are still raw (possibly text) at this stage.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        if !file_path.exists() {
            return Err(LoaderError::FileNotFound(file_path.display().to_string()));
        }

        // Lazy scan, then collect; malformed rows abort the load rather
        // than turning into nulls.
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .drop_nulls(None)
            .collect()?;

        for required in ["Latitude", "Longitude"] {
            if df.column(required).is_err() {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }

        Ok(df)
    }
}
