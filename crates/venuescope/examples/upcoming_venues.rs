//! Search for venues with upcoming events around a point.
//!
//! This example performs live Graph API requests:
//! - Reads the access token from `VENUESCOPE_ACCESS_TOKEN`
//! - Discovers venues around the given coordinates
//! - Prints the venues whose next event has not started yet
//!
//! Usage:
//!   cargo run --example upcoming_venues -- --lat 52.5206 --lng 13.4098 --distance 2500 --keyword music

use clap::Parser;
use venuescope::{EventSearcher, SearchConfig, Venue, rank};

#[derive(Debug, Parser)]
struct Args {
    /// Latitude of the search centre
    #[arg(long)]
    lat: f64,
    /// Longitude of the search centre
    #[arg(long)]
    lng: f64,
    /// Search radius in metres
    #[arg(long)]
    distance: u32,
    /// Free-text keyword for the discovery stage
    #[arg(long, default_value = "")]
    keyword: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    venuescope::init_logging(tracing::Level::INFO)?;
    let args = Args::parse();

    let config = SearchConfig::builder()
        .near(args.lat, args.lng)
        .distance(args.distance)
        .query(args.keyword)
        .build();

    let response = EventSearcher::new(config).search().await?;
    let now = chrono::Utc::now().timestamp();

    for venue in response
        .venues
        .iter()
        .filter(|venue| first_event_is_upcoming(venue, now))
    {
        println!("{}\t{}", venue.id, venue.name);
    }

    Ok(())
}

/// True when the venue's first listed event starts at or after
/// `reference_secs`.
fn first_event_is_upcoming(venue: &Venue, reference_secs: i64) -> bool {
    venue
        .events
        .as_ref()
        .and_then(|events| events.data.first())
        .and_then(|event| event.start_time.as_deref())
        .and_then(|start| rank::time_from_now(start, reference_secs))
        .is_some_and(|seconds| seconds >= 0)
}
