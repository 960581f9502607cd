//! The cleaned, immutable restaurant table.

use crate::cleaner::CleaningReport;
use crate::config::ColumnNames;
use crate::error::Result;
use crate::types::{PriceTier, Restaurant};
use crate::utils::{float_values, has_column, parse_count, parse_number, string_values};
use polars::prelude::*;
use std::collections::BTreeSet;

/// Cleaned restaurant data.
///
/// Holds the cleaned DataFrame for raw display and the typed records the
/// recommender works on. Nothing mutates a table after construction.
#[derive(Debug, Clone)]
pub struct RestaurantTable {
    frame: DataFrame,
    records: Vec<Restaurant>,
    has_votes: bool,
    report: CleaningReport,
}

impl RestaurantTable {
    /// Table with no rows, used when a source cannot be loaded.
    pub fn empty() -> Self {
        Self {
            frame: DataFrame::default(),
            records: Vec::new(),
            has_votes: false,
            report: CleaningReport::default(),
        }
    }

    /// Build typed records from a cleaned frame.
    pub fn from_cleaned(
        frame: DataFrame,
        columns: &ColumnNames,
        report: CleaningReport,
    ) -> Result<Self> {
        let names = string_values(&frame, &columns.name)?;
        let cities = string_values(&frame, &columns.city)?;
        let cuisines = string_values(&frame, &columns.cuisines)?;
        let primaries = string_values(&frame, &columns.primary_cuisine)?;
        let tiers = string_values(&frame, &columns.price_tier)?;
        let ratings = float_values(&frame, &columns.rating)?;
        let costs = float_values(&frame, &columns.cost)?;

        let has_votes = has_column(&frame, &columns.votes);
        let votes = optional_column(&frame, &columns.votes, parse_count)?;
        let latitudes = optional_column(&frame, &columns.latitude, parse_number)?;
        let longitudes = optional_column(&frame, &columns.longitude, parse_number)?;

        let records = (0..frame.height())
            .filter_map(|i| {
                Some(Restaurant {
                    name: names[i].clone().unwrap_or_default(),
                    city: cities[i].clone()?,
                    cuisines: cuisines[i].clone()?,
                    primary_cuisine: primaries[i].clone()?,
                    rating: ratings[i],
                    cost: costs[i],
                    price_tier: tiers[i]
                        .as_deref()
                        .and_then(|t| t.parse().ok())
                        .unwrap_or_else(|| PriceTier::from_cost(costs[i])),
                    votes: votes[i],
                    latitude: latitudes[i],
                    longitude: longitudes[i],
                })
            })
            .collect();

        Ok(Self {
            frame,
            records,
            has_votes,
            report,
        })
    }

    pub fn records(&self) -> &[Restaurant] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the source carried a votes column.
    pub fn has_votes(&self) -> bool {
        self.has_votes
    }

    pub fn report(&self) -> &CleaningReport {
        &self.report
    }

    /// The cleaned frame, including any columns the recommender ignores.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// First `n` rows of the cleaned frame.
    pub fn sample(&self, n: usize) -> DataFrame {
        self.frame.head(Some(n))
    }

    /// Distinct primary cuisines, sorted.
    pub fn primary_cuisines(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.primary_cuisine.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct cities, sorted.
    pub fn cities(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.city.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

impl Default for RestaurantTable {
    fn default() -> Self {
        Self::empty()
    }
}

/// Parse an optional text column; an absent column yields all-missing.
fn optional_column<T>(
    frame: &DataFrame,
    name: &str,
    parse: fn(&str) -> Option<T>,
) -> Result<Vec<Option<T>>> {
    if !has_column(frame, name) {
        return Ok((0..frame.height()).map(|_| None).collect());
    }
    Ok(string_values(frame, name)?
        .iter()
        .map(|opt| opt.as_deref().and_then(parse))
        .collect())
}
