//! Opt-in orderings for venue/event records.
//!
//! Search results are returned unsorted; callers that want an order derive
//! a [`VenueEvent`] row per record and sort with one of the comparators
//! here, usually picked through [`SortBy`].

use std::cmp::Ordering;

use chrono::DateTime;

/// The sort modes a search consumer can ask for by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Time,
    Distance,
    Venue,
    Popularity,
}

impl SortBy {
    /// Parse a sort mode by name, case-insensitively.
    ///
    /// Unknown names yield `None`, which callers treat as "no sorting"
    /// rather than an error.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "time" => Some(Self::Time),
            "distance" => Some(Self::Distance),
            "venue" => Some(Self::Venue),
            "popularity" => Some(Self::Popularity),
            _ => None,
        }
    }

    /// The comparator implementing this sort mode.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use venuescope::{AttendanceStats, SortBy, VenueEvent};
    ///
    /// let mut rows = vec![
    ///     VenueEvent {
    ///         venue_name: "Komet".into(),
    ///         time_from_now: 3600,
    ///         distance: "150.9".into(),
    ///         stats: AttendanceStats { attending: 5, maybe: 2 },
    ///     },
    ///     VenueEvent {
    ///         venue_name: "Astra".into(),
    ///         time_from_now: 7200,
    ///         distance: "150.1".into(),
    ///         stats: AttendanceStats { attending: 10, maybe: 4 },
    ///     },
    /// ];
    ///
    /// rows.sort_by(SortBy::Popularity.comparator());
    /// assert_eq!(rows[0].venue_name, "Astra");
    /// ```
    #[must_use]
    pub fn comparator(self) -> fn(&VenueEvent, &VenueEvent) -> Ordering {
        match self {
            Self::Time => by_time_from_now,
            Self::Distance => by_distance,
            Self::Venue => by_venue_name,
            Self::Popularity => by_popularity,
        }
    }
}

/// One sortable row derived from a venue and one of its events.
#[derive(Debug, Clone, PartialEq)]
pub struct VenueEvent {
    pub venue_name: String,
    /// Signed seconds between the event start and a caller-chosen
    /// reference instant, as produced by [`time_from_now`].
    pub time_from_now: i64,
    /// Distance rendered as a decimal string, e.g. `"150.9"`.
    pub distance: String,
    pub stats: AttendanceStats,
}

/// Attendance counters feeding the popularity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceStats {
    pub attending: u64,
    pub maybe: u64,
}

impl AttendanceStats {
    /// Popularity score: attending plus half the maybes.
    #[must_use]
    pub fn score(self) -> f64 {
        self.attending as f64 + self.maybe as f64 / 2.0
    }
}

/// Lexicographic venue-name order, ascending.
pub fn by_venue_name(a: &VenueEvent, b: &VenueEvent) -> Ordering {
    a.venue_name.cmp(&b.venue_name)
}

/// Soonest-first order on the precomputed start-time offset.
///
/// Rows with a negative offset (already started) sort before upcoming
/// ones purely numerically.
pub fn by_time_from_now(a: &VenueEvent, b: &VenueEvent) -> Ordering {
    a.time_from_now.cmp(&b.time_from_now)
}

/// Nearest-first order on the integer prefix of the distance string.
///
/// Fractions are truncated, not rounded, so `"150.9"` and `"150.1"` are
/// equal. Rows whose distance has no integer prefix compare equal to each
/// other and order after every parsable row.
pub fn by_distance(a: &VenueEvent, b: &VenueEvent) -> Ordering {
    match (int_prefix(&a.distance), int_prefix(&b.distance)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Most-popular-first order on [`AttendanceStats::score`].
pub fn by_popularity(a: &VenueEvent, b: &VenueEvent) -> Ordering {
    b.stats.score().total_cmp(&a.stats.score())
}

/// Signed seconds between an event start time and a reference instant.
///
/// Accepts RFC 3339 timestamps as well as the upstream `+0000`-style
/// offset form. Returns `None` when the timestamp does not parse. The
/// reference is supplied by the caller; nothing here reads a clock.
#[must_use]
pub fn time_from_now(start_time: &str, reference_secs: i64) -> Option<i64> {
    let start = DateTime::parse_from_rfc3339(start_time)
        .or_else(|_| DateTime::parse_from_str(start_time, "%Y-%m-%dT%H:%M:%S%z"))
        .ok()?;
    Some((start.timestamp_millis() - reference_secs * 1000) / 1000)
}

/// Leading base-10 integer of `s`: optional sign, then digits, ignoring
/// leading whitespace and any trailing garbage. `None` when no digits
/// lead the string.
fn int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}
