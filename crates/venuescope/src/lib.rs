//! Venuescope - Venue & Event Discovery Library
//!
//! Venuescope finds places around a geographic point through the Facebook
//! Graph API and returns each venue enriched with contact details,
//! popularity counters, and its events inside a configurable time window.
//! Discovery, batched bulk lookups, and aggregation happen in one
//! asynchronous call; ranking is opt-in and stays in the caller's hands.
//!
//! # Quick Start
//!
//! ```rust
//! use venuescope::{EventSearcher, SearchConfig};
//!
//! let config = SearchConfig::builder()
//!     .near(52.5206, 13.4098)
//!     .distance(2500)
//!     .query("live music")
//!     .build();
//!
//! // Construction is offline; `searcher.search().await` talks to the graph.
//! let searcher = EventSearcher::new(config);
//! assert_eq!(searcher.config().version, "v2.7");
//! ```
//!
//! # Features
//!
//! - **Radius discovery**: a single place search bounded by center,
//!   radius, and free-text query
//! - **Batched enrichment**: bulk lookups of at most 50 ids each, issued
//!   concurrently with fail-fast semantics
//! - **Windowed events**: every venue carries its events between `since`
//!   and an optional `until`
//! - **Opt-in ranking**: comparators for start time, distance, venue
//!   name, and popularity
//! - **Deterministic testing**: the HTTP transport and the credential
//!   source are both injectable
//!
//! # Credentials
//!
//! The access token comes from the config when set, otherwise from the
//! searcher's credential source; the default source reads the
//! `VENUESCOPE_ACCESS_TOKEN` environment variable.

use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

pub mod batch;
mod config;
mod core;
pub mod error;
pub mod geo;
mod model;
mod pipeline;
pub mod rank;

pub use core::{EventSearcher, SearchResponse};

pub use config::{
    CredentialSource, DEFAULT_DISTANCE, DEFAULT_GRAPH_VERSION, EnvCredentials, NullCredentials,
    SearchConfig, SearchConfigBuilder, StaticCredentials,
};
pub use error::SearchError;
pub use geo::{Coordinates, DistanceUnit};
pub use model::{
    CoverPhoto, Event, EventCollection, Picture, PictureData, PlaceId, Venue, VenueLocation,
};
pub use pipeline::{GraphTransport, HttpTransport, PipelineError, TransportError};
pub use rank::{AttendanceStats, SortBy, VenueEvent};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the Venuescope library.
///
/// Sets up the structured subscriber once per process; later calls are
/// no-ops. The `RUST_LOG` environment filter wins over `level` when set.
///
/// # Arguments
///
/// * `level` - The minimum log level to display
///
/// # Examples
///
/// ```rust
/// use tracing::Level;
/// use venuescope::init_logging;
///
/// let _ = init_logging(Level::INFO);
/// ```
pub fn init_logging(
    level: impl Into<LevelFilter>,
) -> Result<&'static (), tracing_subscriber::filter::ParseError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?
            .add_directive("hyper_util=warn".parse().unwrap());

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}
