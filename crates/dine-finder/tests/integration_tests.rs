//! Integration tests for loading, cleaning and recommending.
//!
//! These tests run the whole flow against CSV fixtures on disk.

use dine_finder::{
    DataLoader, Feedback, FeedbackEntry, FeedbackLog, LoadError, LoaderConfig, Outcome,
    Preferences, PriceTier, Recommender, RestaurantTable, Session, TableCache,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::Arc;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load(filename: &str) -> RestaurantTable {
    DataLoader::default()
        .load_path(fixtures_path().join(filename))
        .expect("Failed to load fixture")
}

fn names(outcome: &Outcome) -> Vec<String> {
    match outcome {
        Outcome::Matches(results) => results.iter().map(|r| r.name.clone()).collect(),
        other => panic!("Expected matches, got {:?}", other),
    }
}

// ============================================================================
// Loading & Cleaning
// ============================================================================

#[test]
fn test_sample_dataset_cleaning() {
    let table = load("zomato_sample.csv");
    let report = table.report();

    assert_eq!(report.rows_before, 10);
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(
        report.columns_dropped,
        vec![
            "Address".to_string(),
            "Locality".to_string(),
            "Switch to order menu".to_string()
        ]
    );
    assert_eq!(report.rows_missing_required, 2);
    assert_eq!(report.cost_fill, Some(800.0));
    assert!((report.rating_fill.unwrap() - 27.7 / 7.0).abs() < 1e-9);
    assert_eq!(report.unparseable_ratings, 1);
    assert_eq!(table.len(), 7);
}

#[test]
fn test_cleaned_rows_hold_invariants() {
    let table = load("zomato_sample.csv");

    for r in table.records() {
        assert!(!r.city.is_empty());
        assert!(!r.cuisines.is_empty());
        assert!(PriceTier::ALL.contains(&r.price_tier));
        assert_eq!(r.primary_cuisine, r.primary_cuisine.trim().to_lowercase());
    }
}

#[test]
fn test_imputed_values_land_on_rows() {
    let table = load("zomato_sample.csv");

    let spice = table
        .records()
        .iter()
        .find(|r| r.name == "Spice Route")
        .unwrap();
    assert!((spice.rating.unwrap() - 27.7 / 7.0).abs() < 1e-9);

    let chai = table
        .records()
        .iter()
        .find(|r| r.name == "Chai Corner")
        .unwrap();
    assert_eq!(chai.cost, Some(800.0));
    assert_eq!(chai.price_tier, PriceTier::Moderate);
    // "Not rated" is not imputed: it was present, just not numeric
    assert_eq!(chai.rating, None);
}

#[test]
fn test_latin1_dataset_loads_via_fallback() {
    let table = load("zomato_latin1.csv");

    assert_eq!(table.len(), 3);
    assert_eq!(table.records()[0].name, "Café Mondegar");
    assert_eq!(table.records()[1].name, "Brasserie Française");
    assert_eq!(table.records()[0].primary_cuisine, "continental");
}

#[test]
fn test_missing_columns_exhausts_encodings() {
    let err = DataLoader::default()
        .load_path(fixtures_path().join("missing_columns.csv"))
        .unwrap_err();

    match err {
        LoadError::EncodingsExhausted { attempts } => {
            let labels: Vec<&str> = attempts.iter().map(|a| a.encoding.as_str()).collect();
            assert_eq!(labels, vec!["utf-8", "ISO-8859-1", "Windows-1252", "latin1"]);
        }
        other => panic!("Expected exhausted encodings, got {:?}", other),
    }
}

// ============================================================================
// Recommending
// ============================================================================

#[test]
fn test_default_recommendations() {
    let session = Session::from_table(Arc::new(load("zomato_sample.csv")));

    let outcome = session.recommend(&Preferences::default());

    assert_eq!(
        names(&outcome),
        vec![
            "Olive Bar & Kitchen",
            "Spice Route",
            "Fusion Den",
            "Pasta Point",
            "Thai Garden"
        ]
    );
}

#[test]
fn test_italian_in_delhi() {
    let session = Session::from_table(Arc::new(load("zomato_sample.csv")));
    let prefs = Preferences::builder()
        .cuisine("Italian")
        .city("new delhi")
        .build()
        .unwrap();

    assert_eq!(
        names(&session.recommend(&prefs)),
        vec!["Olive Bar & Kitchen", "Pasta Point"]
    );
}

#[test]
fn test_budget_tier_filter() {
    let session = Session::from_table(Arc::new(load("zomato_sample.csv")));

    let premium = Preferences::builder()
        .budget(PriceTier::Premium)
        .build()
        .unwrap();
    assert_eq!(
        names(&session.recommend(&premium)),
        vec!["Olive Bar & Kitchen", "Spice Route"]
    );

    let budget = Preferences::builder()
        .budget(PriceTier::Budget)
        .min_rating(3.0)
        .build()
        .unwrap();
    assert_eq!(names(&session.recommend(&budget)), vec!["Dosa Hut"]);
}

#[test]
fn test_no_matches_is_not_no_data() {
    let session = Session::from_table(Arc::new(load("zomato_sample.csv")));
    let prefs = Preferences::builder().city("Kolkata").build().unwrap();

    assert_eq!(session.recommend(&prefs), Outcome::NoMatches);
}

#[test]
fn test_projection_excludes_source_columns() {
    let table = load("zomato_sample.csv");
    let results = Recommender::recommend(&table, &Preferences::default());

    let json = serde_json::to_value(&results[0]).unwrap();
    let mut keys: Vec<String> = json.as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(
        keys,
        vec![
            "city",
            "cost",
            "cuisines",
            "latitude",
            "longitude",
            "name",
            "price_tier",
            "rating"
        ]
    );

    // Map location only where both coordinates exist
    assert!(results[0].location().is_some());
    let pasta = results.iter().find(|r| r.name == "Pasta Point").unwrap();
    assert!(pasta.location().is_none());
}

#[test]
fn test_options_and_sample() {
    let session = Session::from_table(Arc::new(load("zomato_sample.csv")));

    assert_eq!(
        session.city_options(),
        vec!["Chennai", "Mumbai", "New Delhi", "Pune"]
    );
    assert_eq!(
        session.cuisine_options(),
        vec![
            "cafe",
            "continental",
            "italian",
            "north indian",
            "south indian",
            "thai",
            "thainese fusion"
        ]
    );

    let sample = session.sample(5);
    assert_eq!(sample.height(), 5);
    let columns: Vec<String> = sample
        .get_column_names()
        .iter()
        .map(|c| c.to_string())
        .collect();
    assert!(columns.contains(&"Price Range".to_string()));
    assert!(columns.contains(&"Primary Cuisine".to_string()));
    assert!(!columns.contains(&"Address".to_string()));
}

// ============================================================================
// Session, Cache & Feedback
// ============================================================================

#[test]
fn test_unreadable_source_gives_no_data() {
    let cache = TableCache::new();
    let session = Session::open_with_cache(
        &cache,
        fixtures_path().join("does_not_exist.csv"),
        &LoaderConfig::default(),
    );

    assert!(matches!(session.load_error(), Some(LoadError::Io { .. })));
    assert_eq!(session.recommend(&Preferences::default()), Outcome::NoData);
}

#[test]
fn test_cache_shares_table_between_sessions() {
    let cache = TableCache::new();
    let path = fixtures_path().join("zomato_sample.csv");
    let config = LoaderConfig::default();

    let first = Session::open_with_cache(&cache, &path, &config);
    let second = Session::open_with_cache(&cache, &path, &config);

    assert!(std::ptr::eq(first.table(), second.table()));
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_feedback_round_trip_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let log = FeedbackLog::new(dir.path().join("feedback_log.csv"));

    log.append(&FeedbackEntry {
        city: Some("Mumbai".to_string()),
        budget: Some(PriceTier::Budget),
        cuisines: vec!["thai".to_string()],
        feedback: Feedback::Yes,
    })
    .unwrap();

    let contents = std::fs::read_to_string(log.path()).unwrap();
    assert_eq!(contents, "Mumbai,Budget,['thai'],Yes\n");
}
