//! Missing value imputation.
//!
//! Provides mean and median imputation for numeric columns stored as text.

mod statistical;

pub use statistical::{Statistic, StatisticalImputer};
