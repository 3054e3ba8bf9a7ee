//! `planner` CLI — expand recurring events and check place opening hours from
//! the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Occurrences of every event in a window (stdin → stdout, JSON)
//! planner occurrences --from 2026-01-01 --to 2026-02-01 < events.json
//!
//! # Open/closed status of every place right now
//! planner status -i places.json
//!
//! # Upcoming events in the next 48h, with distances from a point
//! planner soon events -i events.json --places places.json --lat 44.43 --lon 26.10
//!
//! # Places overview at a fixed instant, in German
//! planner --lang de soon places -i places.json --at 2026-01-05T23:30
//!
//! # Great-circle distance in km
//! planner distance 44.4268 26.1025 46.7712 23.6236
//! ```

mod config;
mod labels;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Args, Parser, Subcommand};
use planner_engine::local::{parse_local, truncate_to_minute};
use planner_engine::{
    generate_occurrences, place_state, places_overview, upcoming_events, EventRecord, GeoPoint,
    Occurrence, OvernightPolicy, PlaceRecord, PlaceState,
};
use serde::Serialize;
use tracing::debug;

use crate::config::Settings;

#[derive(Parser)]
#[command(
    name = "planner",
    version,
    about = "Recurring events and opening hours for a local places/events planner"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (TOML); defaults apply when omitted or missing
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Display language, overriding the settings file
    #[arg(long, global = true)]
    lang: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand events into occurrences within [from, to) and print them as JSON
    Occurrences {
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Window start, YYYY-MM-DD or YYYY-MM-DDTHH:MM (inclusive)
        #[arg(long)]
        from: String,
        /// Window end, YYYY-MM-DD or YYYY-MM-DDTHH:MM (exclusive)
        #[arg(long)]
        to: String,
    },
    /// Print the open/closed status line of every place
    Status {
        /// Places JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        when: When,
        #[command(flatten)]
        overnight: Overnight,
    },
    /// Show what is coming up soon
    Soon {
        #[command(subcommand)]
        view: SoonView,
    },
    /// Great-circle distance between two points, in km
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lon1: f64,
        lat2: f64,
        lon2: f64,
    },
}

#[derive(Subcommand)]
enum SoonView {
    /// Event occurrences starting within the look-ahead window
    Events {
        /// Events JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Places JSON file used to resolve linked places
        #[arg(long)]
        places: Option<String>,
        #[command(flatten)]
        when: When,
        #[command(flatten)]
        origin: Origin,
    },
    /// Places, open ones first, with their next opening when closed
    Places {
        /// Places JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        when: When,
        #[command(flatten)]
        origin: Origin,
        #[command(flatten)]
        overnight: Overnight,
    },
}

#[derive(Args)]
struct When {
    /// Reference instant (YYYY-MM-DDTHH:MM); defaults to the local clock
    #[arg(long)]
    at: Option<String>,
    /// Look-ahead in hours, overriding the settings file
    #[arg(long)]
    hours: Option<f64>,
}

#[derive(Args)]
struct Origin {
    /// Latitude to measure distances from
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude to measure distances from
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
}

#[derive(Args)]
struct Overnight {
    /// Treat the previous day's overnight hours as covering early this morning
    #[arg(long)]
    include_previous_day: bool,
}

#[derive(Serialize)]
struct EventOccurrencesDto<'a> {
    id: &'a str,
    title: &'a str,
    truncated: bool,
    occurrences: Vec<Occurrence>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.settings.as_deref()).context("failed to load settings")?;
    if let Some(lang) = cli.lang {
        settings.language = lang;
    }
    debug!(?settings, "Resolved settings");

    match cli.command {
        Commands::Occurrences { input, from, to } => {
            let events = EventRecord::list_from_json(&read_input(input.as_deref())?)
                .context("Failed to parse events JSON")?;
            let window_start = parse_local(&from).context("Invalid --from")?;
            let window_end = parse_local(&to).context("Invalid --to")?;

            let mut out = Vec::with_capacity(events.len());
            for event in &events {
                let definition = event
                    .definition()
                    .with_context(|| format!("Invalid event '{}'", event.id))?;
                let expansion = generate_occurrences(&definition, window_start, window_end);
                out.push(EventOccurrencesDto {
                    id: &event.id,
                    title: &event.title,
                    truncated: expansion.truncated,
                    occurrences: expansion.occurrences,
                });
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Status {
            input,
            when,
            overnight,
        } => {
            let places = read_places(input.as_deref())?;
            let now = resolve_now(when.at.as_deref())?;
            let hours = when.hours.unwrap_or(settings.soon_places_hours);
            let policy = overnight.resolve(&settings);

            // Input order, unlike the sorted `soon places` view.
            for place in &places {
                let state = place_state(place, now, hours, policy);
                println!(
                    "{}: {}",
                    place.name,
                    labels::place_status(&settings.language, &state)
                );
            }
        }
        Commands::Soon { view } => run_soon(view, &settings)?,
        Commands::Distance {
            lat1,
            lon1,
            lat2,
            lon2,
        } => {
            println!("{:.1}", planner_engine::distance_km(lat1, lon1, lat2, lon2));
        }
    }

    Ok(())
}

fn run_soon(view: SoonView, settings: &Settings) -> Result<()> {
    let lang = settings.language.as_str();
    match view {
        SoonView::Events {
            input,
            places,
            when,
            origin,
        } => {
            let events = EventRecord::list_from_json(&read_input(input.as_deref())?)
                .context("Failed to parse events JSON")?;
            let places = match places.as_deref() {
                Some(path) => read_places(Some(path))?,
                None => Vec::new(),
            };
            let now = resolve_now(when.at.as_deref())?;
            let hours = when.hours.unwrap_or(settings.soon_events_hours);

            let rows = upcoming_events(&events, &places, now, hours, origin.resolve(settings));
            if rows.is_empty() {
                println!("{}", labels::no_events(lang, hours));
                return Ok(());
            }
            for row in &rows {
                let mut line = row.occurrence.start.format("%Y-%m-%d %H:%M").to_string();
                if let Some(end) = row.occurrence.end {
                    line.push_str(&format!(" – {}", end.format("%H:%M")));
                }
                line.push_str(&format!("  {}", row.event.title));
                if let Some(place) = row.place_name {
                    line.push_str(&format!(" @ {}", place));
                }
                if let Some(km) = row.distance_km {
                    line.push_str(&format!(" · {:.1} km", km));
                }
                println!("{}", line);
            }
            if rows.iter().any(|r| r.truncated) {
                println!("{}", labels::t(lang, "truncated"));
            }
        }
        SoonView::Places {
            input,
            when,
            origin,
            overnight,
        } => {
            let places = read_places(input.as_deref())?;
            if places.is_empty() {
                println!("{}", labels::t(lang, "no_places"));
                return Ok(());
            }
            let now = resolve_now(when.at.as_deref())?;
            let hours = when.hours.unwrap_or(settings.soon_places_hours);

            let rows = places_overview(
                &places,
                now,
                hours,
                origin.resolve(settings),
                overnight.resolve(settings),
            );
            for row in &rows {
                let mut line = format!(
                    "{}  {}",
                    row.place.name,
                    labels::place_status(lang, &row.state)
                );
                if let Some(km) = row.distance_km {
                    line.push_str(&format!(" · {:.1} km", km));
                }
                if matches!(row.state, PlaceState::HoursNotSet) {
                    debug!(place_id = %row.place.id, "Place has no opening hours");
                }
                println!("{}", line);
            }
        }
    }
    Ok(())
}

impl Origin {
    /// Command-line coordinates win over the settings file.
    fn resolve(&self, settings: &Settings) -> Option<GeoPoint> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            _ => settings.origin(),
        }
    }
}

impl Overnight {
    fn resolve(&self, settings: &Settings) -> OvernightPolicy {
        if self.include_previous_day {
            OvernightPolicy::IncludePreviousDay
        } else {
            settings.overnight_policy
        }
    }
}

fn resolve_now(at: Option<&str>) -> Result<NaiveDateTime> {
    match at {
        Some(raw) => parse_local(raw).context("Invalid --at"),
        None => Ok(truncate_to_minute(chrono::Local::now().naive_local())),
    }
}

fn read_places(path: Option<&str>) -> Result<Vec<PlaceRecord>> {
    PlaceRecord::list_from_json(&read_input(path)?).context("Failed to parse places JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
