//! Rank venue events without touching the network.
//!
//! This example demonstrates the ranking helpers:
//! - Computing distance labels from coordinates
//! - Deriving seconds-until-start for each event
//! - Sorting one table by every supported criterion

use venuescope::{
    geo::{self, Coordinates, DistanceUnit},
    rank::{self, AttendanceStats, SortBy, VenueEvent},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A fixed reference instant keeps the output stable: 2025-09-01T00:00:00Z.
    let reference_secs = 1_756_684_800;
    let centre = Coordinates::new(52.5206, 13.4098);

    let rows = vec![
        row(
            "Astra Kulturhaus",
            Coordinates::new(52.5129, 13.4530),
            "2025-09-01T20:00:00+0200",
            (210, 95),
            centre,
            reference_secs,
        ),
        row(
            "Kesselhaus",
            Coordinates::new(52.5453, 13.4127),
            "2025-09-01T19:30:00+0200",
            (340, 40),
            centre,
            reference_secs,
        ),
        row(
            "Lido",
            Coordinates::new(52.4993, 13.4440),
            "2025-09-02T21:00:00+0200",
            (120, 260),
            centre,
            reference_secs,
        ),
    ];

    for sort in [
        SortBy::Time,
        SortBy::Distance,
        SortBy::Venue,
        SortBy::Popularity,
    ] {
        let mut sorted = rows.clone();
        sorted.sort_by(sort.comparator());

        println!("\nSorted by {sort:?}:");
        for event in &sorted {
            println!(
                "  {:<20} starts in {:>6} s  {:>7}  score {:.1}",
                event.venue_name,
                event.time_from_now,
                event.distance,
                event.stats.score(),
            );
        }
    }

    Ok(())
}

fn row(
    venue_name: &str,
    venue: Coordinates,
    start_time: &str,
    (attending, maybe): (u64, u64),
    centre: Coordinates,
    reference_secs: i64,
) -> VenueEvent {
    let km = geo::distance(centre, venue, DistanceUnit::Kilometers);
    VenueEvent {
        venue_name: venue_name.to_string(),
        time_from_now: rank::time_from_now(start_time, reference_secs).unwrap_or(i64::MAX),
        distance: format!("{:.0} m", km * 1000.0),
        stats: AttendanceStats { attending, maybe },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_env() {
        let _ = venuescope::init_logging(tracing::Level::WARN);
    }

    #[test]
    fn test_rank_venues_example() {
        setup_test_env();
        assert!(main().is_ok(), "Ranking example should run successfully");
    }
}
