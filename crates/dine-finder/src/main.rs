//! CLI entry point for the restaurant recommender.

use anyhow::{Result, anyhow};
use clap::{Args, Parser, Subcommand, ValueEnum};
use dine_finder::feedback::DEFAULT_FEEDBACK_LOG;
use dine_finder::recommender::{DEFAULT_RATING_THRESHOLD, DEFAULT_TOP_N};
use dine_finder::session::DEFAULT_SAMPLE_ROWS;
use dine_finder::{
    Feedback, FeedbackEntry, FeedbackLog, LoaderConfig, Outcome, Preferences, PriceTier,
    Recommendation, Session,
};
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::{debug, info};

/// CLI-compatible budget tier
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliBudget {
    /// Under 500 for two
    Budget,
    /// 500 to under 1500 for two
    Moderate,
    /// 1500 and up for two
    Premium,
}

impl From<CliBudget> for PriceTier {
    fn from(cli: CliBudget) -> Self {
        match cli {
            CliBudget::Budget => PriceTier::Budget,
            CliBudget::Moderate => PriceTier::Moderate,
            CliBudget::Premium => PriceTier::Premium,
        }
    }
}

/// CLI-compatible feedback value
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliFeedback {
    Yes,
    No,
    Somewhat,
}

impl From<CliFeedback> for Feedback {
    fn from(cli: CliFeedback) -> Self {
        match cli {
            CliFeedback::Yes => Feedback::Yes,
            CliFeedback::No => Feedback::No,
            CliFeedback::Somewhat => Feedback::Somewhat,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Restaurant recommender over a Zomato dataset",
    long_about = "Cleans a Zomato restaurant CSV and recommends restaurants by cuisine, budget, city and rating.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  DINE_FINDER_DATA    Dataset path used when --data is not given\n\n\
                  EXAMPLES:\n  \
                  dine-finder recommend --cuisine italian --budget moderate --city delhi\n  \
                  dine-finder options --data zomato.csv\n  \
                  dine-finder feedback --city \"New Delhi\" --budget moderate --cuisine italian --value yes"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn", global = true)]
    log_level: String,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Path to the restaurant CSV
    #[arg(short, long, env = "DINE_FINDER_DATA", default_value = "zomato.csv")]
    data: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recommend restaurants matching your preferences
    Recommend {
        #[command(flatten)]
        data: DataArgs,

        /// Cuisine preference (repeatable)
        #[arg(short, long = "cuisine")]
        cuisines: Vec<String>,

        /// Budget tier
        #[arg(short, long, value_enum)]
        budget: Option<CliBudget>,

        /// City (case-insensitive substring)
        #[arg(long)]
        city: Option<String>,

        /// Minimum rating (0.0 - 5.0)
        #[arg(short = 'r', long, default_value_t = DEFAULT_RATING_THRESHOLD, value_parser = parse_rating)]
        min_rating: f64,

        /// Number of results (1 - 10)
        #[arg(short = 'n', long = "top", default_value_t = DEFAULT_TOP_N as u8, value_parser = clap::value_parser!(u8).range(1..=10))]
        top: u8,

        /// Print results as JSON (disables logging)
        #[arg(long)]
        json: bool,
    },

    /// List the cuisines and cities available for filtering
    Options {
        #[command(flatten)]
        data: DataArgs,

        /// Print options as JSON (disables logging)
        #[arg(long)]
        json: bool,
    },

    /// Show a raw sample of the cleaned table
    Sample {
        #[command(flatten)]
        data: DataArgs,

        /// Number of rows to show
        #[arg(long, default_value_t = DEFAULT_SAMPLE_ROWS)]
        rows: usize,
    },

    /// Record whether the recommendations were helpful
    Feedback {
        /// Feedback log file
        #[arg(long, default_value = DEFAULT_FEEDBACK_LOG)]
        log: PathBuf,

        /// City that was searched
        #[arg(long)]
        city: Option<String>,

        /// Budget that was searched
        #[arg(short, long, value_enum)]
        budget: Option<CliBudget>,

        /// Cuisines that were searched (repeatable)
        #[arg(short, long = "cuisine")]
        cuisines: Vec<String>,

        /// Was this helpful?
        #[arg(long, value_enum)]
        value: CliFeedback,
    },
}

fn parse_rating(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if (0.0..=5.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is not between 0.0 and 5.0", value))
    }
}

/// Initialize the tracing subscriber for logging.
///
/// JSON output disables logging so stdout only carries the JSON document.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "error" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Load .env before parsing so DINE_FINDER_DATA can come from it
    dotenv().ok();

    let cli = Cli::parse();

    let json = matches!(
        cli.command,
        Command::Recommend { json: true, .. } | Command::Options { json: true, .. }
    );
    init_logging(&cli.log_level, cli.quiet, json);

    match cli.command {
        Command::Recommend {
            data,
            cuisines,
            budget,
            city,
            min_rating,
            top,
            json,
        } => {
            let mut builder = Preferences::builder()
                .cuisines(cuisines)
                .min_rating(min_rating)
                .top_n(usize::from(top));
            if let Some(budget) = budget {
                builder = builder.budget(budget.into());
            }
            if let Some(city) = city {
                builder = builder.city(city);
            }
            let prefs = builder.build()?;
            debug!("Preferences: {:?}", prefs);

            let session = open_session(&data);
            let outcome = session.recommend(&prefs);

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome);
            }
        }
        Command::Options { data, json } => {
            let session = open_session(&data);
            let cuisines = session.cuisine_options();
            let cities = session.city_options();

            if json {
                let doc = serde_json::json!({
                    "cuisines": cuisines,
                    "budgets": PriceTier::ALL,
                    "cities": cities,
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("Cuisines: {}", cuisines.join(", "));
                println!(
                    "Budgets: {}",
                    PriceTier::ALL.map(|t| t.as_str()).join(", ")
                );
                println!("Cities: {}", cities.join(", "));
            }
        }
        Command::Sample { data, rows } => {
            let session = open_session(&data);
            if !session.table().is_empty() {
                println!("{}", session.sample(rows));
            }
        }
        Command::Feedback {
            log,
            city,
            budget,
            cuisines,
            value,
        } => {
            let entry = FeedbackEntry {
                city,
                budget: budget.map(Into::into),
                cuisines,
                feedback: value.into(),
            };
            FeedbackLog::new(&log)
                .append(&entry)
                .map_err(|e| anyhow!("Could not record feedback in {}: {}", log.display(), e))?;
            println!("Feedback recorded!");
        }
    }

    Ok(())
}

/// Open the dataset, reporting a load failure without aborting.
fn open_session(data: &DataArgs) -> Session {
    let session = Session::open(&data.data, &LoaderConfig::default());
    match session.load_error() {
        Some(e) => eprintln!("Could not read the file: {}", e),
        None => info!(
            "Loaded {} restaurants from {}",
            session.table().len(),
            data.data.display()
        ),
    }
    session
}

/// Print recommendations for a terminal.
///
/// Uses `println!` on purpose: this is the command's output, not a log.
fn print_outcome(outcome: &Outcome) {
    match outcome {
        Outcome::NoData => {}
        Outcome::NoMatches => println!("No matches found."),
        Outcome::Matches(results) => {
            println!("Found {} match(es).", results.len());
            for r in results {
                print_recommendation(r);
            }
        }
    }
}

fn print_recommendation(r: &Recommendation) {
    println!();
    match r.rating {
        Some(rating) => println!("{} ({:.1} stars)", r.name, rating),
        None => println!("{}", r.name),
    }
    println!("  Cuisine: {}", r.cuisines);
    match r.cost {
        Some(cost) => println!("  Price: {} ({})", cost, r.price_tier),
        None => println!("  Price: unknown ({})", r.price_tier),
    }
    println!("  City: {}", r.city);
    if let Some(location) = r.location() {
        println!("  Map: {}", location.map_url());
    }
}
