//! Loading a restaurant table from raw bytes.
//!
//! Each candidate encoding is tried in turn: decode, parse as CSV, clean.
//! The first candidate that gets through all three wins; every failure is
//! recorded so an exhausted load can say what went wrong for each one.

mod encoding;

pub use encoding::CandidateDecoder;

use crate::cleaner::DataCleaner;
use crate::config::LoaderConfig;
use crate::error::{EncodingAttempt, LoadError, Result};
use crate::table::RestaurantTable;
use polars::io::csv::read::{CsvReadOptions, NullValues};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Loads and cleans restaurant datasets.
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    config: LoaderConfig,
}

impl DataLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Read `path` and load it.
    pub fn load_path(
        &self,
        path: impl AsRef<Path>,
    ) -> std::result::Result<RestaurantTable, LoadError> {
        let path = path.as_ref();
        info!("Loading dataset from: {}", path.display());

        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.load_bytes(&bytes)
    }

    /// Load from an in-memory source; the first encoding that decodes,
    /// parses and cleans wins.
    pub fn load_bytes(&self, bytes: &[u8]) -> std::result::Result<RestaurantTable, LoadError> {
        let mut attempts = Vec::with_capacity(self.config.encodings.len());

        for label in &self.config.encodings {
            match self.try_encoding(label, bytes) {
                Ok(table) => {
                    info!(
                        "Dataset loaded with {} encoding: {} restaurants",
                        label,
                        table.len()
                    );
                    return Ok(table);
                }
                Err(e) => {
                    debug!("Loading with {} failed: {}", label, e);
                    attempts.push(EncodingAttempt {
                        encoding: label.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        Err(LoadError::EncodingsExhausted { attempts })
    }

    fn try_encoding(&self, label: &str, bytes: &[u8]) -> Result<RestaurantTable> {
        let decoder = CandidateDecoder::for_label(label)?;
        let text = decoder.decode(bytes)?;
        let df = parse_csv(text.into_owned(), &self.config.null_values)?;
        debug!(
            "Parsed {} rows x {} columns as {}",
            df.height(),
            df.width(),
            decoder.canonical_name()
        );

        let (cleaned, report) = DataCleaner::new(&self.config).clean(df)?;
        RestaurantTable::from_cleaned(cleaned, &self.config.columns, report)
    }
}

/// Parse CSV text with a header row, keeping every column as text.
///
/// Empty fields and any of `null_values` are read as missing.
pub fn parse_csv(text: String, null_values: &[String]) -> Result<DataFrame> {
    let markers: Vec<PlSmallStr> = null_values
        .iter()
        .map(|s| PlSmallStr::from(s.as_str()))
        .collect();
    let null_values = (!markers.is_empty()).then(|| NullValues::AllColumns(markers));

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_null_values(null_values.clone()))
        .into_reader_with_file_handle(Cursor::new(text))
        .finish()?;
    Ok(df)
}
