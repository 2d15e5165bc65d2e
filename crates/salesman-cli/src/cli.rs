use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use salesman_brute_force::{SearchOptions, MAX_POINTS};
use salesman_core::TourMetric;

/// salesman - a traveling salesman solver
#[derive(Parser, Debug)]
#[command(name = "salesman", version, about, long_about = None)]
pub struct Cli {
    /// Log verbosity; RUST_LOG takes precedence when set
    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Make a new dataset named NAME, width of W, height of H, and N points
    #[command(long_flag = "makeset", allow_negative_numbers = true)]
    Makeset(MakesetArgs),
    /// Print the header and stored solution of a dataset
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct MakesetArgs {
    /// Output file
    #[arg(value_name = "NAME")]
    pub name: PathBuf,
    /// Width of the sampling rectangle, centred on the origin
    #[arg(value_name = "W", value_parser = parse_extent)]
    pub width: f32,
    /// Height of the sampling rectangle, centred on the origin
    #[arg(value_name = "H", value_parser = parse_extent)]
    pub height: f32,
    /// Number of points
    #[arg(value_name = "N", value_parser = clap::value_parser!(u32).range(1..=MAX_POINTS as i64))]
    pub count: u32,

    /// Seed for point generation; defaults to the wall clock
    #[arg(long)]
    pub seed: Option<u64>,
    /// Search threads
    #[arg(long, env = "SALESMAN_THREADS", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: u32,
    /// Stop after this many seconds and keep the best tour seen
    #[arg(long, env = "SALESMAN_TIME_LIMIT", value_name = "SECS", value_parser = parse_seconds)]
    pub time_limit: Option<Duration>,
    /// Tour objective: closed or legacy
    #[arg(long, default_value = "closed", value_parser = parse_metric)]
    pub metric: TourMetric,
}

impl MakesetArgs {
    pub fn search_options(&self) -> SearchOptions {
        let mut options = SearchOptions::default()
            .with_metric(self.metric)
            .with_threads(self.threads as usize);
        if let Some(limit) = self.time_limit {
            options = options.with_time_limit(limit);
        }
        options
    }
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Dataset file
    pub path: PathBuf,
    /// Print a JSON summary instead of text
    #[arg(long)]
    pub json: bool,
    /// Objective used to score the stored solution
    #[arg(long, default_value = "closed", value_parser = parse_metric)]
    pub metric: TourMetric,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn parse_extent(value: &str) -> Result<f32, String> {
    let extent: f32 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    // Halving must stay positive or the sampling range is empty.
    if extent.is_finite() && extent * 0.5 > 0.0 {
        Ok(extent)
    } else {
        Err(format!("must be a positive number, got {value}"))
    }
}

fn parse_seconds(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|_| format!("'{value}' is not a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|_| format!("invalid time limit {value}"))
}

fn parse_metric(value: &str) -> Result<TourMetric, String> {
    TourMetric::parse(value).map_err(|e| e.to_string())
}
