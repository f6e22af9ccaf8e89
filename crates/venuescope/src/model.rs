//! Wire-shaped venue and event records.
//!
//! These mirror the bulk-lookup payload one to one. Everything the
//! upstream may omit is optional; unknown fields are ignored so upstream
//! additions never break deserialization. Records are plain data and are
//! not mutated after parsing.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// Opaque upstream identifier of a place/venue node.
pub type PlaceId = String;

/// A place record enriched with contact, popularity, and event data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: PlaceId,
    #[serde(default)]
    pub name: String,
    pub about: Option<String>,
    pub emails: Option<Vec<String>>,
    pub picture: Option<Picture>,
    pub location: Option<VenueLocation>,
    pub fan_count: Option<u64>,
    pub category: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub cover: Option<CoverPhoto>,
    pub events: Option<EventCollection>,
}

/// Profile-picture envelope as served by the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Picture {
    pub data: PictureData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PictureData {
    #[serde(default)]
    pub url: String,
    pub is_silhouette: Option<bool>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Street address and point location of a venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueLocation {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl VenueLocation {
    /// The point location, when the upstream supplied both halves.
    #[must_use]
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinates::new(latitude, longitude)),
            _ => None,
        }
    }
}

/// Cover photo reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverPhoto {
    pub id: Option<String>,
    pub source: Option<String>,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
}

/// The `events` sub-query result attached to a venue.
///
/// Paging cursors the upstream appends are ignored; only the windowed
/// first page is carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventCollection {
    #[serde(default)]
    pub data: Vec<Event>,
}

/// One event hosted at a venue.
///
/// Start and end times are kept as the upstream strings; see
/// [`crate::rank::time_from_now`] for turning a start time into a
/// sortable offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub attending_count: Option<u64>,
    pub declined_count: Option<u64>,
    pub maybe_count: Option<u64>,
    pub noreply_count: Option<u64>,
}
