//! Restaurant Recommendation Library
//!
//! Loads a restaurant dataset (the Zomato CSV export), cleans it with
//! Polars and ranks restaurants against user preferences.
//!
//! # Overview
//!
//! - **Loading**: ordered encoding fallback (UTF-8, then Latin-1 family),
//!   first candidate that decodes, parses and cleans wins
//! - **Cleaning**: duplicate removal, column dropping, mean/median
//!   imputation, numeric coercion, derived price tier and primary cuisine
//! - **Recommending**: cuisine, budget, city and rating filters, a
//!   rating/votes score and a fixed output projection
//! - **Feedback**: append-only log of user feedback
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use dine_finder::{LoaderConfig, Outcome, Preferences, PriceTier, Session};
//!
//! let session = Session::open("zomato.csv", &LoaderConfig::default());
//! if let Some(err) = session.load_error() {
//!     eprintln!("{err}");
//! }
//!
//! let prefs = Preferences::builder()
//!     .cuisine("italian")
//!     .budget(PriceTier::Moderate)
//!     .city("delhi")
//!     .build()?;
//!
//! match session.recommend(&prefs) {
//!     Outcome::Matches(results) => {
//!         for r in results {
//!             println!("{} ({:?})", r.name, r.rating);
//!         }
//!     }
//!     Outcome::NoMatches => println!("No matches found."),
//!     Outcome::NoData => {}
//! }
//! ```

pub mod cache;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod feedback;
pub mod imputers;
pub mod loader;
pub mod recommender;
pub mod session;
pub mod table;
pub mod types;
pub mod utils;

pub use cache::TableCache;
pub use cleaner::{CleaningReport, DataCleaner};
pub use config::{ColumnNames, ConfigValidationError, LoaderConfig, LoaderConfigBuilder};
pub use error::{DineError, EncodingAttempt, LoadError, Result};
pub use feedback::{FeedbackEntry, FeedbackLog};
pub use loader::DataLoader;
pub use recommender::{Preferences, PreferencesBuilder, Ranked, Recommender};
pub use session::{Outcome, Session};
pub use table::RestaurantTable;
pub use types::{Feedback, MapLocation, PriceTier, Recommendation, Restaurant};
