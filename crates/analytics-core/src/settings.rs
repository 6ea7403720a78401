use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::time_utils::{hour_windows, parse_day, HourWindow};

pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "project";
pub const DEFAULT_COLLECTION: &str = "tweets";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Load exported social-media posts into MongoDB and report on them
#[derive(Parser, Debug, Clone)]
#[command(
    name = "post-analytics",
    about = "Load exported social-media posts into MongoDB and report on them",
    version
)]
pub struct Settings {
    /// MongoDB connection string
    #[arg(long, global = true, env = "POST_ANALYTICS_MONGO_URI", default_value = DEFAULT_MONGO_URI)]
    pub mongo_uri: String,

    /// Database holding the posts collection
    #[arg(long, global = true, env = "POST_ANALYTICS_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Collection holding one document per post
    #[arg(long, global = true, env = "POST_ANALYTICS_COLLECTION", default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Logging level
    #[arg(long, global = true, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Read JSON exports and insert one document per post
    Load(LoadArgs),
    /// Print the most active author, top hashtags and hourly volume
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct LoadArgs {
    /// Export files, or directories to scan for `*.json` files
    #[arg(value_name = "PATH", default_values = ["prague-2015-02-14.json", "prague-2015-02-15.json"])]
    pub paths: Vec<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Report day (YYYY-MM-DD); repeat for several days
    #[arg(long = "day", value_name = "DAY", default_values = ["2015-02-14", "2015-02-15"])]
    pub days: Vec<String>,

    /// First local hour of the hourly report
    #[arg(long, default_value = "9", value_parser = clap::value_parser!(u32).range(0..=23))]
    pub first_hour: u32,

    /// Last local hour of the hourly report (inclusive)
    #[arg(long, default_value = "15", value_parser = clap::value_parser!(u32).range(0..=23))]
    pub last_hour: u32,

    /// Hours added to each local hour to reach stored UTC timestamps
    #[arg(long, default_value = "1", allow_negative_numbers = true, value_parser = clap::value_parser!(i64).range(-23..=23))]
    pub hour_shift: i64,

    /// Number of hashtags to list
    #[arg(long, default_value = "10", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub top: usize,
}

// ── AnalyzeArgs impl ───────────────────────────────────────────────────────────

impl AnalyzeArgs {
    /// Parse the `--day` values.
    pub fn report_days(&self) -> crate::Result<Vec<NaiveDate>> {
        self.days.iter().map(|d| parse_day(d)).collect()
    }

    /// Every (day, hour) window the hourly report covers.
    pub fn windows(&self) -> crate::Result<Vec<HourWindow>> {
        hour_windows(
            &self.report_days()?,
            self.first_hour,
            self.last_hour,
            self.hour_shift,
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
