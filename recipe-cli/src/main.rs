mod session;

use clap::Parser;
use recipe_core::{Console, RecipeStore, StoreSettings, DEFAULT_CALORIE_THRESHOLD};
use serde::{Deserialize, Serialize};
use session::Session;
use std::{fs, io, path::PathBuf};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "recipe-cli",
    about = "Interactive recipe book: ingredients, steps, scaling and calorie warnings.",
    version
)]
struct Args {
    /// Warn when a recipe's total calories go above this value
    #[arg(long, default_value_t = DEFAULT_CALORIE_THRESHOLD)]
    calorie_threshold: f64,

    /// Show "List all recipes" as a table
    #[arg(long)]
    table: bool,

    /// Log debug events to stderr (RUST_LOG takes precedence)
    #[arg(long, short)]
    verbose: bool,

    /// Load a settings profile JSON before applying CLI overrides
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Save the current effective settings to a profile JSON
    #[arg(long)]
    save_profile: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct Profile {
    calorie_threshold: f64,
    table: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Profile {
            calorie_threshold: DEFAULT_CALORIE_THRESHOLD,
            table: false,
        }
    }
}

impl From<&Args> for Profile {
    fn from(a: &Args) -> Self {
        Profile {
            calorie_threshold: a.calorie_threshold,
            table: a.table,
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let mut args = Args::parse();
    init_logging(args.verbose);

    // Load profile if present, then apply CLI overrides (CLI wins).
    if let Some(path) = &args.profile {
        let Ok(txt) = fs::read_to_string(path) else {
            eprintln!("Failed to read profile: {}", path.display());
            std::process::exit(1);
        };
        let Ok(p): Result<Profile, _> = serde_json::from_str(&txt) else {
            eprintln!("Invalid profile JSON: {}", path.display());
            std::process::exit(1);
        };

        // Defaults snapshot to detect "unset" fields
        let def = Args::parse_from(["recipe-cli"]);

        macro_rules! take {
            ($field:ident) => {
                if args.$field == def.$field { p.$field } else { args.$field }
            };
        }

        args.calorie_threshold = take!(calorie_threshold);
        args.table = take!(table);
        debug!(path = %path.display(), "loaded profile");
    }

    // Validations
    if !args.calorie_threshold.is_finite() || args.calorie_threshold < 0.0 {
        eprintln!("calorie-threshold must be a finite number >= 0");
        std::process::exit(1);
    }

    if let Some(path) = &args.save_profile {
        let prof = Profile::from(&args);
        let saved = serde_json::to_string_pretty(&prof)
            .map_err(io::Error::other)
            .and_then(|json| fs::write(path, json));
        if let Err(e) = saved {
            eprintln!("Failed to save profile: {e}");
            std::process::exit(1);
        }
        println!("Profile saved to {}", path.display());
    }

    // The session routes calorie warnings to its own console.
    let store = RecipeStore::silent(StoreSettings {
        calorie_threshold: args.calorie_threshold,
    });
    let console = Console::new(io::stdin().lock(), io::stdout());
    let mut session = Session::new(console, store, args.table);

    if let Err(e) = session.run() {
        error!("session aborted: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
    debug!(recipes = session.store().len(), "session ended");
}
