//! Data cleaning for a freshly parsed restaurant table.
//!
//! The pipeline runs in a fixed order:
//! 1. Remove exact-duplicate rows
//! 2. Drop irrelevant columns
//! 3. Impute missing ratings with the mean
//! 4. Impute missing costs with the median
//! 5. Drop rows without city or cuisines
//! 6. Coerce ratings to numbers
//! 7. Strip and coerce costs to numbers
//! 8. Derive the price tier
//! 9. Derive the primary cuisine

mod converters;

use crate::config::LoaderConfig;
use crate::error::{DineError, Result};
use crate::imputers::StatisticalImputer;
use crate::utils::{has_column, parse_cost, parse_number, string_values};
use converters::{coerce_numeric, price_tier_series, primary_cuisine_series};
use polars::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

/// What the cleaner did to a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningReport {
    pub rows_before: usize,
    pub rows_after: usize,
    pub duplicates_removed: usize,
    pub columns_dropped: Vec<String>,
    pub rating_fill: Option<f64>,
    pub cost_fill: Option<f64>,
    pub rows_missing_required: usize,
    pub unparseable_ratings: usize,
    pub unparseable_costs: usize,
    /// Human-readable log of each step.
    pub actions: Vec<String>,
}

/// Data cleaner for the restaurant dataset.
pub struct DataCleaner<'a> {
    config: &'a LoaderConfig,
}

impl<'a> DataCleaner<'a> {
    pub fn new(config: &'a LoaderConfig) -> Self {
        Self { config }
    }

    /// Run the full cleaning pipeline.
    ///
    /// Fails with [`DineError::ColumnNotFound`] when a required column is
    /// absent; never fails because of an individual bad cell.
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, CleaningReport)> {
        let cols = &self.config.columns;
        if let Some(missing) = cols.required().into_iter().find(|c| !has_column(&df, c)) {
            return Err(DineError::ColumnNotFound(missing.to_string()));
        }

        info!("Cleaning restaurant table ({} rows)", df.height());
        let mut report = CleaningReport {
            rows_before: df.height(),
            ..Default::default()
        };

        // 1. Remove duplicate rows
        let mut df = self.remove_duplicates(df, &mut report)?;

        // 2. Drop columns that carry no value for recommendation
        df = self.drop_irrelevant_columns(df, &mut report);

        // 3-4. Statistics are taken after dedup and before any fill
        report.rating_fill =
            StatisticalImputer::apply_mean(&mut df, &cols.rating, parse_number, &mut report.actions)?;
        report.cost_fill =
            StatisticalImputer::apply_median(&mut df, &cols.cost, parse_cost, &mut report.actions)?;

        // 5. City and cuisines cannot be imputed
        df = self.drop_rows_missing_required(df, &mut report)?;

        // 6-7. Coercion; unparseable cells become missing
        report.unparseable_ratings = coerce_numeric(&mut df, &cols.rating, parse_number)?;
        report.unparseable_costs = coerce_numeric(&mut df, &cols.cost, parse_cost)?;
        if report.unparseable_ratings > 0 || report.unparseable_costs > 0 {
            report.actions.push(format!(
                "Coerced {} ratings and {} costs that were not numeric to missing",
                report.unparseable_ratings, report.unparseable_costs
            ));
        }

        // 8-9. Derived columns
        let tiers = price_tier_series(&df, &cols.cost, &cols.price_tier)?;
        df.with_column(tiers)?;
        let primaries = primary_cuisine_series(&df, &cols.cuisines, &cols.primary_cuisine)?;
        df.with_column(primaries)?;
        report.actions.push(format!(
            "Derived '{}' and '{}'",
            cols.price_tier, cols.primary_cuisine
        ));

        report.rows_after = df.height();
        info!(
            "Cleaning complete: {} -> {} rows",
            report.rows_before, report.rows_after
        );

        Ok((df, report))
    }

    fn remove_duplicates(&self, df: DataFrame, report: &mut CleaningReport) -> Result<DataFrame> {
        let deduped = df.unique_stable(None, UniqueKeepStrategy::First, None)?;

        report.duplicates_removed = df.height() - deduped.height();
        if report.duplicates_removed > 0 {
            report.actions.push(format!(
                "Removed {} duplicate rows",
                report.duplicates_removed
            ));
            debug!("Removed {} duplicate rows", report.duplicates_removed);
        } else {
            debug!("No duplicate rows found");
        }

        Ok(deduped)
    }

    fn drop_irrelevant_columns(&self, df: DataFrame, report: &mut CleaningReport) -> DataFrame {
        let present: Vec<String> = self
            .config
            .drop_columns
            .iter()
            .filter(|c| has_column(&df, c))
            .cloned()
            .collect();

        if present.is_empty() {
            return df;
        }

        let cols_ref: Vec<PlSmallStr> = present.iter().map(|s| s.as_str().into()).collect();
        let df = df.drop_many(cols_ref);

        report
            .actions
            .push(format!("Dropped columns: {:?}", present));
        debug!("Dropped {} irrelevant columns", present.len());
        report.columns_dropped = present;

        df
    }

    fn drop_rows_missing_required(
        &self,
        df: DataFrame,
        report: &mut CleaningReport,
    ) -> Result<DataFrame> {
        let cols = &self.config.columns;
        let cities = string_values(&df, &cols.city)?;
        let cuisines = string_values(&df, &cols.cuisines)?;

        let keep: Vec<bool> = cities
            .iter()
            .zip(&cuisines)
            .map(|(city, cuisine)| city.is_some() && cuisine.is_some())
            .collect();

        let mask = Series::new("keep".into(), keep);
        let kept = df.filter(mask.bool()?)?;

        report.rows_missing_required = df.height() - kept.height();
        if report.rows_missing_required > 0 {
            report.actions.push(format!(
                "Dropped {} rows missing '{}' or '{}'",
                report.rows_missing_required, cols.city, cols.cuisines
            ));
        }

        Ok(kept)
    }
}
