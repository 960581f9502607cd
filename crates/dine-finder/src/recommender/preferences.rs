//! User preferences for a recommendation request.

use crate::config::ConfigValidationError;
use crate::types::PriceTier;
use serde::{Deserialize, Serialize};

/// Default minimum rating.
pub const DEFAULT_RATING_THRESHOLD: f64 = 3.5;
/// Default number of results.
pub const DEFAULT_TOP_N: usize = 5;

/// Filters and limits applied by [`Recommender`](super::Recommender).
///
/// # Example
///
/// ```rust,ignore
/// let prefs = Preferences::builder()
///     .cuisine("Italian")
///     .budget(PriceTier::Moderate)
///     .city("delhi")
///     .min_rating(4.0)
///     .top_n(3)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Cuisines of interest. Empty means any cuisine.
    pub cuisines: Vec<String>,
    pub budget: Option<PriceTier>,
    /// Case-insensitive substring of the city.
    pub city: Option<String>,
    pub min_rating: f64,
    pub top_n: usize,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            cuisines: Vec::new(),
            budget: None,
            city: None,
            min_rating: DEFAULT_RATING_THRESHOLD,
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl Preferences {
    pub fn builder() -> PreferencesBuilder {
        PreferencesBuilder::default()
    }

    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=5.0).contains(&self.min_rating) {
            return Err(ConfigValidationError::InvalidRatingThreshold(self.min_rating));
        }
        if self.top_n == 0 {
            return Err(ConfigValidationError::InvalidTopN(self.top_n));
        }
        Ok(())
    }
}

/// Builder for [`Preferences`].
#[derive(Debug, Default)]
pub struct PreferencesBuilder {
    prefs: Preferences,
}

impl PreferencesBuilder {
    pub fn cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.prefs.cuisines.push(cuisine.into());
        self
    }

    pub fn cuisines<I, S>(mut self, cuisines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefs.cuisines = cuisines.into_iter().map(Into::into).collect();
        self
    }

    pub fn budget(mut self, budget: PriceTier) -> Self {
        self.prefs.budget = Some(budget);
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.prefs.city = Some(city.into());
        self
    }

    pub fn min_rating(mut self, min_rating: f64) -> Self {
        self.prefs.min_rating = min_rating;
        self
    }

    pub fn top_n(mut self, top_n: usize) -> Self {
        self.prefs.top_n = top_n;
        self
    }

    pub fn build(self) -> Result<Preferences, ConfigValidationError> {
        self.prefs.validate()?;
        Ok(self.prefs)
    }
}
