//! Statistical imputation for text-typed numeric columns.
//!
//! The loader reads every column as text, so statistics are computed over
//! the cells that parse as numbers and missing cells are filled with the
//! statistic's text form. Later coercion turns them back into numbers.

use crate::error::Result;
use crate::utils::series;
use polars::prelude::*;
use tracing::debug;

/// Statistic used to fill a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Mean,
    Median,
}

impl Statistic {
    fn label(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Median => "median",
        }
    }
}

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill missing cells of `col_name` with the column mean.
    pub fn apply_mean(
        df: &mut DataFrame,
        col_name: &str,
        parse: fn(&str) -> Option<f64>,
        actions: &mut Vec<String>,
    ) -> Result<Option<f64>> {
        Self::apply(df, col_name, Statistic::Mean, parse, actions)
    }

    /// Fill missing cells of `col_name` with the column median.
    pub fn apply_median(
        df: &mut DataFrame,
        col_name: &str,
        parse: fn(&str) -> Option<f64>,
        actions: &mut Vec<String>,
    ) -> Result<Option<f64>> {
        Self::apply(df, col_name, Statistic::Median, parse, actions)
    }

    /// Compute `statistic` over the parseable cells of a text column.
    ///
    /// Returns `None` when no cell parses.
    pub fn compute(
        df: &DataFrame,
        col_name: &str,
        statistic: Statistic,
        parse: fn(&str) -> Option<f64>,
    ) -> Result<Option<f64>> {
        let text = series(df, col_name)?.cast(&DataType::String)?;
        let values: Vec<f64> = text.str()?.into_iter().flatten().filter_map(parse).collect();

        if values.is_empty() {
            return Ok(None);
        }

        let numeric = Series::new(col_name.into(), values);
        Ok(match statistic {
            Statistic::Mean => numeric.mean(),
            Statistic::Median => numeric.median(),
        })
    }

    fn apply(
        df: &mut DataFrame,
        col_name: &str,
        statistic: Statistic,
        parse: fn(&str) -> Option<f64>,
        actions: &mut Vec<String>,
    ) -> Result<Option<f64>> {
        let missing = series(df, col_name)?.null_count();
        if missing == 0 {
            debug!("No missing values in '{}'", col_name);
            return Ok(None);
        }

        let Some(fill_value) = Self::compute(df, col_name, statistic, parse)? else {
            debug!(
                "'{}' has no numeric values, {} cannot be computed",
                col_name,
                statistic.label()
            );
            return Ok(None);
        };

        let text = series(df, col_name)?.cast(&DataType::String)?;
        let fill_text = fill_value.to_string();
        let filled: Vec<Option<String>> = text
            .str()?
            .into_iter()
            .map(|opt| Some(opt.map_or_else(|| fill_text.clone(), str::to_string)))
            .collect();

        df.replace(col_name, Series::new(col_name.into(), filled))?;

        actions.push(format!(
            "Filled {} missing '{}' values with {}: {:.2}",
            missing,
            col_name,
            statistic.label(),
            fill_value
        ));
        debug!("Imputed '{}' with {} {}", col_name, statistic.label(), fill_value);

        Ok(Some(fill_value))
    }
}
