//! Text-to-number coercion and derived column builders.

use crate::error::Result;
use crate::types::PriceTier;
use crate::utils::{float_values, primary_cuisine, string_values};
use polars::prelude::*;

/// Replace a text column with a Float64 column; cells `parse` rejects
/// become null. Returns how many non-null cells were lost.
pub(crate) fn coerce_numeric(
    df: &mut DataFrame,
    col_name: &str,
    parse: fn(&str) -> Option<f64>,
) -> Result<usize> {
    let values = string_values(df, col_name)?;
    let before = values.iter().filter(|v| v.is_some()).count();

    let coerced: Vec<Option<f64>> = values
        .iter()
        .map(|opt| opt.as_deref().and_then(parse))
        .collect();
    let after = coerced.iter().filter(|v| v.is_some()).count();

    df.replace(col_name, Series::new(col_name.into(), coerced))?;
    Ok(before - after)
}

/// Build the price tier column from a numeric cost column.
pub(crate) fn price_tier_series(df: &DataFrame, cost_col: &str, tier_col: &str) -> Result<Series> {
    let tiers: Vec<&str> = float_values(df, cost_col)?
        .into_iter()
        .map(|cost| PriceTier::from_cost(cost).as_str())
        .collect();
    Ok(Series::new(tier_col.into(), tiers))
}

/// Build the primary cuisine column from the cuisine list column.
pub(crate) fn primary_cuisine_series(
    df: &DataFrame,
    cuisines_col: &str,
    primary_col: &str,
) -> Result<Series> {
    let primaries: Vec<Option<String>> = string_values(df, cuisines_col)?
        .into_iter()
        .map(|opt| opt.map(|c| primary_cuisine(&c)))
        .collect();
    Ok(Series::new(primary_col.into(), primaries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{parse_cost, parse_number};

    #[test]
    fn test_coerce_numeric_marks_bad_cells_missing() {
        let mut df = df!["rating" => [Some("4.2"), Some("NEW"), None]].unwrap();

        let lost = coerce_numeric(&mut df, "rating", parse_number).unwrap();

        assert_eq!(lost, 1);
        assert_eq!(df.column("rating").unwrap().dtype(), &DataType::Float64);
        assert_eq!(
            float_values(&df, "rating").unwrap(),
            vec![Some(4.2), None, None]
        );
    }

    #[test]
    fn test_coerce_cost_strips_symbols() {
        let mut df = df!["cost" => ["₹1,500", "450", "--"]].unwrap();

        coerce_numeric(&mut df, "cost", parse_cost).unwrap();

        assert_eq!(
            float_values(&df, "cost").unwrap(),
            vec![Some(1500.0), Some(450.0), None]
        );
    }

    #[test]
    fn test_price_tier_series() {
        let df = df!["cost" => [Some(499.99), Some(500.0), Some(1499.99), Some(1500.0), None]]
            .unwrap();

        let tiers = price_tier_series(&df, "cost", "tier").unwrap();
        let tiers: Vec<Option<&str>> = tiers.str().unwrap().into_iter().collect();

        assert_eq!(
            tiers,
            vec![
                Some("Budget"),
                Some("Moderate"),
                Some("Moderate"),
                Some("Premium"),
                Some("Premium")
            ]
        );
    }

    #[test]
    fn test_primary_cuisine_series() {
        let df = df!["cuisines" => ["Chinese, Thai", " Cafe ", "North Indian,Mughlai"]].unwrap();

        let primary = primary_cuisine_series(&df, "cuisines", "primary").unwrap();
        let primary: Vec<Option<&str>> = primary.str().unwrap().into_iter().collect();

        assert_eq!(
            primary,
            vec![Some("chinese"), Some("cafe"), Some("north indian")]
        );
    }
}
