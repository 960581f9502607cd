//! One user session over a dataset.
//!
//! A session never fails to open: a load failure is kept for display and
//! the session continues with an empty table, so every later action is a
//! harmless no-op.

use crate::cache::TableCache;
use crate::config::LoaderConfig;
use crate::error::LoadError;
use crate::recommender::{Preferences, Recommender};
use crate::table::RestaurantTable;
use crate::types::Recommendation;
use polars::prelude::DataFrame;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Default number of rows shown by [`Session::sample`].
pub const DEFAULT_SAMPLE_ROWS: usize = 5;

/// Result of a recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "results", rename_all = "snake_case")]
pub enum Outcome {
    /// The table has no rows: either the source could not be loaded or
    /// cleaning dropped every row. [`Session::load_error`] tells the two
    /// apart.
    NoData,
    /// The table is loaded but nothing passed the filters.
    NoMatches,
    Matches(Vec<Recommendation>),
}

/// A dataset opened for recommendations.
#[derive(Debug, Clone)]
pub struct Session {
    table: Arc<RestaurantTable>,
    load_error: Option<Arc<LoadError>>,
}

impl Session {
    /// Open `path` through the global table cache.
    pub fn open(path: impl AsRef<Path>, config: &LoaderConfig) -> Self {
        Self::open_with_cache(TableCache::global(), path, config)
    }

    pub fn open_with_cache(
        cache: &TableCache,
        path: impl AsRef<Path>,
        config: &LoaderConfig,
    ) -> Self {
        match cache.get_or_load(path, config) {
            Ok(table) => Self::from_table(table),
            Err(e) => {
                warn!("Continuing with an empty table: {}", e);
                Self {
                    table: Arc::new(RestaurantTable::empty()),
                    load_error: Some(Arc::new(e)),
                }
            }
        }
    }

    pub fn from_table(table: Arc<RestaurantTable>) -> Self {
        Self {
            table,
            load_error: None,
        }
    }

    pub fn table(&self) -> &RestaurantTable {
        &self.table
    }

    /// Why the dataset could not be loaded, if it could not.
    pub fn load_error(&self) -> Option<&LoadError> {
        self.load_error.as_deref()
    }

    /// Recommend from the session's table.
    ///
    /// Returns [`Outcome::NoData`] for any empty table, whether or not the
    /// load itself succeeded.
    pub fn recommend(&self, prefs: &Preferences) -> Outcome {
        if self.table.is_empty() {
            return Outcome::NoData;
        }
        let results = Recommender::recommend(&self.table, prefs);
        if results.is_empty() {
            Outcome::NoMatches
        } else {
            Outcome::Matches(results)
        }
    }

    /// Raw sample of the cleaned table.
    pub fn sample(&self, rows: usize) -> DataFrame {
        self.table.sample(rows)
    }

    /// Choices for the cuisine selector.
    pub fn cuisine_options(&self) -> Vec<String> {
        self.table.primary_cuisines()
    }

    /// Choices for the city selector.
    pub fn city_options(&self) -> Vec<String> {
        self.table.cities()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_from(csv: &str) -> Session {
        let table = crate::loader::DataLoader::default()
            .load_bytes(csv.as_bytes())
            .unwrap();
        Session::from_table(Arc::new(table))
    }

    #[test]
    fn test_missing_source_gives_empty_session() {
        let cache = TableCache::new();
        let session =
            Session::open_with_cache(&cache, "/no/such/zomato.csv", &LoaderConfig::default());

        assert!(session.load_error().is_some());
        assert!(session.table().is_empty());
        assert_eq!(session.recommend(&Preferences::default()), Outcome::NoData);
        assert!(session.cuisine_options().is_empty());
    }

    #[test]
    fn test_outcomes() {
        let session = session_from(
            "Restaurant Name,City,Cuisines,Aggregate rating,Average Cost for two\n\
             Wok,Pune,Chinese,4.0,600\n",
        );

        assert!(session.load_error().is_none());
        assert!(matches!(
            session.recommend(&Preferences::default()),
            Outcome::Matches(ref r) if r.len() == 1
        ));

        let strict = Preferences::builder().min_rating(4.5).build().unwrap();
        assert_eq!(session.recommend(&strict), Outcome::NoMatches);
    }

    #[test]
    fn test_loaded_but_emptied_table_is_no_data() {
        // Every row lacks a city, so cleaning keeps none of them
        let session = session_from(
            "Restaurant Name,City,Cuisines,Aggregate rating,Average Cost for two\n\
             Wok,,Chinese,4.0,600\n\
             Olive,,Italian,4.5,1800\n",
        );

        assert!(session.load_error().is_none());
        assert!(session.table().is_empty());
        assert_eq!(session.table().report().rows_missing_required, 2);
        assert_eq!(session.recommend(&Preferences::default()), Outcome::NoData);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&Outcome::NoMatches).unwrap();
        assert_eq!(json, r#"{"status":"no_matches"}"#);
    }
}
