use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound (exclusive) of the `Budget` tier.
pub const BUDGET_CEILING: f64 = 500.0;
/// Upper bound (exclusive) of the `Moderate` tier.
pub const MODERATE_CEILING: f64 = 1500.0;

/// Zoom level used for generated map links.
const MAP_ZOOM: u8 = 14;

/// Three-level price bucket derived from the average cost for two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriceTier {
    Budget,
    Moderate,
    Premium,
}

impl PriceTier {
    pub const ALL: [PriceTier; 3] = [PriceTier::Budget, PriceTier::Moderate, PriceTier::Premium];

    /// Bucket a cost. A missing cost fails both comparisons and lands in
    /// `Premium`.
    pub fn from_cost(cost: Option<f64>) -> Self {
        match cost {
            Some(c) if c < BUDGET_CEILING => PriceTier::Budget,
            Some(c) if c < MODERATE_CEILING => PriceTier::Moderate,
            _ => PriceTier::Premium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceTier::Budget => "Budget",
            PriceTier::Moderate => "Moderate",
            PriceTier::Premium => "Premium",
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "budget" => Ok(PriceTier::Budget),
            "moderate" => Ok(PriceTier::Moderate),
            "premium" => Ok(PriceTier::Premium),
            other => Err(format!("unknown price tier '{}'", other)),
        }
    }
}

/// Geographic position of a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl MapLocation {
    /// Both coordinates are needed for a location.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        Some(Self {
            latitude: latitude?,
            longitude: longitude?,
        })
    }

    /// OpenStreetMap link with a marker at the location.
    pub fn map_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat}&mlon={lon}#map={zoom}/{lat}/{lon}",
            lat = self.latitude,
            lon = self.longitude,
            zoom = MAP_ZOOM
        )
    }
}

/// One row of the cleaned table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub city: String,
    /// Comma-joined cuisine list as it appears in the source.
    pub cuisines: String,
    /// First cuisine, trimmed and lowercased.
    pub primary_cuisine: String,
    /// `None` only when the cell could not be coerced to a number.
    pub rating: Option<f64>,
    /// `None` only when the cell could not be coerced to a number.
    pub cost: Option<f64>,
    pub price_tier: PriceTier,
    pub votes: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Restaurant {
    pub fn location(&self) -> Option<MapLocation> {
        MapLocation::from_parts(self.latitude, self.longitude)
    }
}

/// Projected recommendation row. These are the only fields a
/// recommendation ever exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub name: String,
    pub city: String,
    pub cuisines: String,
    pub rating: Option<f64>,
    pub cost: Option<f64>,
    pub price_tier: PriceTier,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Recommendation {
    pub fn location(&self) -> Option<MapLocation> {
        MapLocation::from_parts(self.latitude, self.longitude)
    }
}

impl From<&Restaurant> for Recommendation {
    fn from(r: &Restaurant) -> Self {
        Self {
            name: r.name.clone(),
            city: r.city.clone(),
            cuisines: r.cuisines.clone(),
            rating: r.rating,
            cost: r.cost,
            price_tier: r.price_tier,
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

/// Answer to "was this helpful?".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    Yes,
    No,
    Somewhat,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Yes => "Yes",
            Feedback::No => "No",
            Feedback::Somewhat => "Somewhat",
        }
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
