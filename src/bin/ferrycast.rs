//! Command line front end.
//!
//! ```bash
//! FERRYCAST_VISUAL_CROSSING_API_KEY=... ferrycast --dock "Portugal Cove" --day 1
//! ```

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, Utc};
use clap::Parser;
use itertools::Itertools;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use ferrycast::board::{day_label, selectable_dates, DepartureBoard, SELECTABLE_DAYS};
use ferrycast::client::ForecastClient;
use ferrycast::config::Config;
use ferrycast::schedule::{Dock, ScheduleTable};

#[derive(Parser, Debug)]
#[command(
    name = "ferrycast",
    about = "Bell Island ferry departures with the matching hourly weather and wave forecast"
)]
struct Args {
    /// TOML configuration file, defaults to ./ferrycast.toml when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Schedule variant name from the configuration
    #[arg(long)]
    schedule: Option<String>,

    #[arg(long, default_value = "Bell Island", value_parser = parse_dock, help = dock_help())]
    dock: Dock,

    /// Days from today, 0 through 6
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u64).range(0..SELECTABLE_DAYS))]
    day: u64,

    #[arg(short, long)]
    verbose: bool,
}

fn dock_names() -> String {
    Dock::ALL.iter().map(|dock| format!("\"{}\"", dock)).join(" or ")
}

fn dock_help() -> String {
    format!("Departure dock: {}", dock_names())
}

fn parse_dock(s: &str) -> Result<Dock, String> {
    s.parse::<Dock>().map_err(|e| format!("{}, expected {}", e, dock_names()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    SimpleLogger::new()
        .with_level(if args.verbose { LevelFilter::Info } else { LevelFilter::Warn })
        .init()?;

    let config = Config::load(args.config.as_deref())?;
    config.api_key()?;
    let timezone = config.timezone()?;

    let variant = config.schedule_variant(args.schedule.as_deref())?;
    let schedule = ScheduleTable::from_path(&variant.path)?;

    let now = Utc::now().with_timezone(&timezone);
    println!("Current Date and Time: {}", now.format("%A, %b %d, %Y %I:%M %p"));

    let date = selectable_dates(&now)
        .get(args.day as usize)
        .copied()
        .context("selected day is out of range")?;

    let entries = schedule.entries_for(args.dock, date.weekday());
    if entries.is_empty() {
        println!("No ferry schedules found for the selected location and day.");
        return Ok(());
    }

    log::info!(
        "{} schedule: {} departures from {} on {}",
        variant.name,
        entries.len(),
        args.dock,
        day_label(&date)
    );

    let client = ForecastClient::new(&config)?;
    let (weather, marine) = client.fetch_forecasts(&args.dock.location(), &date).await;

    match DepartureBoard::compose(&entries, args.dock, date, &now, weather, marine) {
        Ok(board) => {
            for banner in board.banners().iter().filter(|b| b.is_warning) {
                log::warn!("{}", banner.message);
            }
            println!("{}", board);
        }
        Err(e) => eprintln!("Failed to fetch weather data: {}", e),
    }

    Ok(())
}
