//! Configuration types for loading and cleaning a restaurant dataset.
//!
//! The defaults describe the Zomato CSV export; every column name and the
//! encoding fallback order can be overridden through the builder.

use serde::{Deserialize, Serialize};

/// Encodings tried, in order, when decoding a source.
pub const DEFAULT_ENCODINGS: [&str; 4] = ["utf-8", "ISO-8859-1", "Windows-1252", "latin1"];

/// Columns that carry nothing useful for recommendation.
pub const DEFAULT_DROP_COLUMNS: [&str; 4] = ["Address", "Locality", "Switch to order menu", "URL"];

/// Cell values read as missing, in addition to empty fields.
pub const DEFAULT_NULL_VALUES: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Header names of the columns the loader reads and the cleaner derives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnNames {
    pub name: String,
    pub city: String,
    pub cuisines: String,
    pub rating: String,
    pub cost: String,
    /// Optional in the source.
    pub votes: String,
    /// Optional in the source.
    pub latitude: String,
    /// Optional in the source.
    pub longitude: String,
    /// Derived by the cleaner.
    pub price_tier: String,
    /// Derived by the cleaner.
    pub primary_cuisine: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            name: "Restaurant Name".to_string(),
            city: "City".to_string(),
            cuisines: "Cuisines".to_string(),
            rating: "Aggregate rating".to_string(),
            cost: "Average Cost for two".to_string(),
            votes: "Votes".to_string(),
            latitude: "Latitude".to_string(),
            longitude: "Longitude".to_string(),
            price_tier: "Price Range".to_string(),
            primary_cuisine: "Primary Cuisine".to_string(),
        }
    }
}

impl ColumnNames {
    /// Columns that must exist for a load attempt to succeed.
    pub fn required(&self) -> [&str; 5] {
        [
            self.name.as_str(),
            self.city.as_str(),
            self.cuisines.as_str(),
            self.rating.as_str(),
            self.cost.as_str(),
        ]
    }
}

/// Configuration for [`DataLoader`](crate::DataLoader).
///
/// # Example
///
/// ```rust,ignore
/// use dine_finder::LoaderConfig;
///
/// let config = LoaderConfig::builder()
///     .encodings(["utf-8", "latin1"])
///     .drop_column("Rating text")
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoaderConfig {
    /// Encoding labels tried in order; the first that decodes, parses and
    /// cleans wins.
    /// Default: utf-8, ISO-8859-1, Windows-1252, latin1
    pub encodings: Vec<String>,

    /// Columns removed (when present) right after duplicate removal.
    /// Default: Address, Locality, Switch to order menu, URL
    pub drop_columns: Vec<String>,

    /// Cell values parsed as missing, so the cleaner can impute them.
    /// Default: the usual spreadsheet and dataframe NA markers
    pub null_values: Vec<String>,

    /// Source and derived column names.
    pub columns: ColumnNames,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            encodings: DEFAULT_ENCODINGS.iter().map(|s| s.to_string()).collect(),
            drop_columns: DEFAULT_DROP_COLUMNS.iter().map(|s| s.to_string()).collect(),
            null_values: DEFAULT_NULL_VALUES.iter().map(|s| s.to_string()).collect(),
            columns: ColumnNames::default(),
        }
    }
}

impl LoaderConfig {
    /// Create a new configuration builder.
    pub fn builder() -> LoaderConfigBuilder {
        LoaderConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.encodings.is_empty() {
            return Err(ConfigValidationError::NoEncodings);
        }

        if let Some(label) = self
            .encodings
            .iter()
            .find(|label| encoding_rs::Encoding::for_label(label.as_bytes()).is_none())
        {
            return Err(ConfigValidationError::UnknownEncoding(label.clone()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration or preference validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("At least one candidate encoding is required")]
    NoEncodings,

    #[error("Unknown encoding label '{0}'")]
    UnknownEncoding(String),

    #[error("Invalid rating threshold: {0} (must be between 0.0 and 5.0)")]
    InvalidRatingThreshold(f64),

    #[error("Invalid result count: {0} (must be at least 1)")]
    InvalidTopN(usize),
}

/// Builder for [`LoaderConfig`].
#[derive(Debug, Default)]
pub struct LoaderConfigBuilder {
    config: LoaderConfig,
}

impl LoaderConfigBuilder {
    /// Replace the candidate encodings.
    pub fn encodings<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.encodings = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the list of columns to drop.
    pub fn drop_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.drop_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add one column to the drop list.
    pub fn drop_column(mut self, column: impl Into<String>) -> Self {
        self.config.drop_columns.push(column.into());
        self
    }

    /// Replace the missing-value markers.
    pub fn null_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.null_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Override the column names.
    pub fn columns(mut self, columns: ColumnNames) -> Self {
        self.config.columns = columns;
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<LoaderConfig, ConfigValidationError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
