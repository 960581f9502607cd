//! Composite ranking score.

/// Weight of the aggregate rating when votes are available.
pub const RATING_WEIGHT: f64 = 0.7;
/// Weight of each vote. Small enough to only separate similar ratings.
pub const VOTE_WEIGHT: f64 = 0.0001;

/// Score a row. With a votes column the score blends rating and votes
/// (a blank vote cell counts as zero); without one it is the rating.
pub fn score(rating: f64, votes: Option<i64>, table_has_votes: bool) -> f64 {
    if table_has_votes {
        rating * RATING_WEIGHT + votes.unwrap_or(0) as f64 * VOTE_WEIGHT
    } else {
        rating
    }
}
