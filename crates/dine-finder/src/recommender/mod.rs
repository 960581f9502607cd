//! Filter, score and rank restaurants against user preferences.
//!
//! Filters apply in order: cuisine, budget, city, minimum rating. A row
//! passes the cuisine filter when its primary cuisine is one of the
//! preferences or any preference appears inside its full cuisine list, so
//! "thai" also matches "Thainese Fusion".

mod preferences;
mod scoring;

pub use preferences::{DEFAULT_RATING_THRESHOLD, DEFAULT_TOP_N, Preferences, PreferencesBuilder};
pub use scoring::{RATING_WEIGHT, VOTE_WEIGHT, score};

use crate::table::RestaurantTable;
use crate::types::{Recommendation, Restaurant};
use crate::utils::normalize;
use tracing::debug;

/// A restaurant that passed every filter, with its score.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<'t> {
    pub restaurant: &'t Restaurant,
    pub score: f64,
}

/// Stateless recommendation engine.
pub struct Recommender;

impl Recommender {
    /// Top matches for `prefs`, projected to the recommendation fields.
    ///
    /// An empty vector means nothing matched; it is not an error.
    pub fn recommend(table: &RestaurantTable, prefs: &Preferences) -> Vec<Recommendation> {
        Self::rank(table, prefs)
            .into_iter()
            .map(|ranked| Recommendation::from(ranked.restaurant))
            .collect()
    }

    /// Top matches with their scores, best first.
    pub fn rank<'t>(table: &'t RestaurantTable, prefs: &Preferences) -> Vec<Ranked<'t>> {
        let matches = Self::filter(table, prefs);
        if matches.is_empty() {
            debug!("No restaurants match the preferences");
            return Vec::new();
        }

        let mut ranked: Vec<Ranked<'t>> = matches
            .into_iter()
            .filter_map(|restaurant| {
                restaurant.rating.map(|rating| Ranked {
                    restaurant,
                    score: score(rating, restaurant.votes, table.has_votes()),
                })
            })
            .collect();

        // Stable: equal scores keep table order
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked.truncate(prefs.top_n);
        ranked
    }

    /// Rows passing every filter, in table order.
    pub fn filter<'t>(table: &'t RestaurantTable, prefs: &Preferences) -> Vec<&'t Restaurant> {
        let cuisines: Vec<String> = prefs
            .cuisines
            .iter()
            .map(|c| normalize(c))
            .collect();
        let city = prefs.city.as_deref().map(normalize);

        let matches: Vec<&Restaurant> = table
            .records()
            .iter()
            .filter(|r| matches_cuisine(r, &cuisines))
            .filter(|r| prefs.budget.is_none_or(|tier| r.price_tier == tier))
            .filter(|r| {
                city.as_deref()
                    .is_none_or(|c| r.city.to_lowercase().contains(c))
            })
            .filter(|r| r.rating.is_some_and(|rating| rating >= prefs.min_rating))
            .collect();

        debug!(
            "{} of {} restaurants pass the filters",
            matches.len(),
            table.len()
        );
        matches
    }
}

fn matches_cuisine(restaurant: &Restaurant, cuisines: &[String]) -> bool {
    if cuisines.is_empty() {
        return true;
    }
    if cuisines.contains(&restaurant.primary_cuisine) {
        return true;
    }
    let listed = restaurant.cuisines.to_lowercase();
    cuisines.iter().any(|c| listed.contains(c.as_str()))
}
