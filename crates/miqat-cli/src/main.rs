//! `miqat` - prayer times on the command line.
//!
//! ```sh
//! miqat today --lat 43.65 --lng -79.38 --offset=-04:00 --date 2024-06-21
//! miqat timetable --locate --month 3 --lang ar
//! RUST_LOG=debug miqat today --lat 21.42 --lng 39.83
//! ```

mod render;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use miqat_core::network::{Fallback, FixedLocation, GeolocationProvider, IpApiProvider, LocationInfo};
use miqat_core::{calculate_prayer_times, monthly_timetable, CalculationParams, FormatConfig};

#[derive(Parser)]
#[command(name = "miqat")]
#[command(about = "Daily prayer times from solar geometry", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CommonArgs {
    /// Latitude in degrees; looked up from your IP address when omitted
    #[arg(long, global = true, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude in degrees; looked up from your IP address when omitted
    #[arg(long, global = true, allow_hyphen_values = true)]
    lng: Option<f64>,

    /// Prefer the IP lookup; --lat/--lng become the fallback
    #[arg(long, global = true)]
    locate: bool,

    /// Day to show (YYYY-MM-DD); `timetable` shows its month. Default today
    #[arg(long, global = true)]
    date: Option<NaiveDate>,

    /// UTC offset of the displayed clock, e.g. +03:00 (default: system offset)
    #[arg(long, global = true, allow_hyphen_values = true)]
    offset: Option<FixedOffset>,

    /// Language tag selecting numerals for 12-hour times, e.g. ar-EG
    #[arg(long, global = true, default_value = "en")]
    lang: String,

    /// Sun elevation for Fajr in degrees
    #[arg(long, global = true, allow_hyphen_values = true)]
    fajr_angle: Option<f64>,

    /// Sun elevation for Isha in degrees
    #[arg(long, global = true, allow_hyphen_values = true)]
    isha_angle: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the five prayer times and a countdown to the next one
    Today {
        /// Clock time used for passed/ongoing (HH:MM), default now
        #[arg(long)]
        time: Option<NaiveTime>,
    },
    /// Show a month of prayer times
    Timetable {
        /// Year, overrides --date
        #[arg(long)]
        year: Option<i32>,
        /// Month (1-12), overrides --date
        #[arg(long)]
        month: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let common = &cli.common;

    let offset = common
        .offset
        .unwrap_or_else(|| *chrono::Local::now().fixed_offset().offset());
    let params = build_params(common)?;
    let format = FormatConfig::from_language_tag(&common.lang);
    let location = resolve_location(common).await?;
    log::info!("using location {}", location.display_name());

    match cli.command {
        Commands::Today { time } => {
            let at = evaluation_instant(offset, common.date, time)?;
            let set = calculate_prayer_times(at, location.coords, &params, &format);
            print!("{}", render::today(&location, &set, at.with_timezone(&Utc)));
        }
        Commands::Timetable { year, month } => {
            let day = common
                .date
                .unwrap_or_else(|| Utc::now().with_timezone(&offset).date_naive());
            let year = year.unwrap_or(day.year());
            let month = month.unwrap_or(day.month());
            let rows = monthly_timetable(location.coords, year, month, offset, &params, &format)
                .with_context(|| format!("Failed to build timetable for {}-{:02}", year, month))?;
            print!("{}", render::timetable(&location, &rows));
        }
    }

    Ok(())
}

fn build_params(common: &CommonArgs) -> Result<CalculationParams> {
    let mut builder = CalculationParams::builder();
    if let Some(angle) = common.fajr_angle {
        builder = builder.fajr_angle(angle);
    }
    if let Some(angle) = common.isha_angle {
        builder = builder.isha_angle(angle);
    }
    Ok(builder.build()?)
}

/// Coordinates from the flags, falling back to an IP lookup.
///
/// With `--locate` the IP lookup goes first and the flags are the fallback.
async fn resolve_location(common: &CommonArgs) -> Result<LocationInfo> {
    let fixed = match (common.lat, common.lng) {
        (Some(lat), Some(lng)) => Some(FixedLocation::from_lat_lng(lat, lng)?),
        (None, None) => None,
        _ => bail!("--lat and --lng must be given together"),
    };
    let ip = IpApiProvider::new()?;

    let located = if common.locate {
        Fallback::new(ip, fixed).locate().await
    } else {
        Fallback::new(fixed, ip).locate().await
    };
    located.context("Could not determine your location; pass --lat and --lng")
}

fn evaluation_instant(
    offset: FixedOffset,
    date: Option<NaiveDate>,
    time: Option<NaiveTime>,
) -> Result<DateTime<FixedOffset>> {
    let now = Utc::now().with_timezone(&offset);
    if date.is_none() && time.is_none() {
        return Ok(now);
    }

    let local = date
        .unwrap_or(now.date_naive())
        .and_time(time.unwrap_or(now.time()));
    match local.and_local_timezone(offset).single() {
        Some(at) => Ok(at),
        None => bail!("{} does not exist at offset {}", local, offset),
    }
}
