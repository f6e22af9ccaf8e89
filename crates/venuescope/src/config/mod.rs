//! Search configuration.
//!
//! A [`SearchConfig`] is assembled once, through [`SearchConfigBuilder`],
//! and never mutated afterwards. Construction stays pure: the `since`
//! window default ("now") is resolved when a search runs, not here, so
//! two configs built the same way always compare equal.

pub use credentials::{CredentialSource, EnvCredentials, NullCredentials, StaticCredentials};
mod credentials;

use crate::rank::SortBy;

/// Default search radius handed to the place lookup, in the upstream's
/// distance units.
pub const DEFAULT_DISTANCE: u32 = 100;

/// Graph API version used when none is configured.
pub const DEFAULT_GRAPH_VERSION: &str = "v2.7";

/// Immutable inputs for one venue/event search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Latitude of the search center, decimal degrees.
    pub latitude: Option<f64>,
    /// Longitude of the search center, decimal degrees.
    pub longitude: Option<f64>,
    /// Search radius passed to the place lookup.
    pub distance: u32,
    /// Free-text place filter; `None` searches unfiltered.
    pub query: Option<String>,
    /// Sort mode a consumer intends to apply to the results. The search
    /// itself never sorts; this is carried for callers of
    /// [`crate::rank`].
    pub sort: Option<SortBy>,
    /// Graph API version segment of every request URL.
    pub version: String,
    /// Lower bound (Unix seconds) of the event window. `None` means "now
    /// at search time".
    pub since: Option<i64>,
    /// Optional upper bound (Unix seconds) of the event window.
    pub until: Option<i64>,
    /// Explicit access token. When unset or empty the searcher falls back
    /// to its [`CredentialSource`].
    pub access_token: Option<String>,
}

impl SearchConfig {
    pub fn builder() -> SearchConfigBuilder {
        SearchConfigBuilder::default()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            distance: DEFAULT_DISTANCE,
            query: None,
            sort: None,
            version: DEFAULT_GRAPH_VERSION.to_string(),
            since: None,
            until: None,
            access_token: None,
        }
    }
}

/// Builder for [`SearchConfig`] with chainable setters.
///
/// # Examples
///
/// ```rust
/// use venuescope::SearchConfig;
///
/// let config = SearchConfig::builder()
///     .near(52.5206, 13.4098)
///     .distance(250)
///     .query("open air")
///     .build();
///
/// assert_eq!(config.latitude, Some(52.5206));
/// assert_eq!(config.version, "v2.7");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both center coordinates at once.
    pub fn near(mut self, latitude: f64, longitude: f64) -> Self {
        self.config.latitude = Some(latitude);
        self.config.longitude = Some(longitude);
        self
    }

    pub fn latitude(mut self, latitude: f64) -> Self {
        self.config.latitude = Some(latitude);
        self
    }

    pub fn longitude(mut self, longitude: f64) -> Self {
        self.config.longitude = Some(longitude);
        self
    }

    /// Set the search radius.
    pub fn distance(mut self, distance: u32) -> Self {
        self.config.distance = distance;
        self
    }

    /// Set the free-text place filter.
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.config.query = Some(query.into());
        self
    }

    /// Set the sort mode consumers should apply.
    pub fn sort(mut self, sort: SortBy) -> Self {
        self.config.sort = Some(sort);
        self
    }

    /// Set the sort mode by name, case-insensitively.
    ///
    /// An unrecognized name silently leaves the results unsorted; it is
    /// not an error.
    pub fn sort_by_name(mut self, name: impl AsRef<str>) -> Self {
        self.config.sort = SortBy::parse(name.as_ref());
        self
    }

    /// Override the Graph API version segment.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.config.version = version.into();
        self
    }

    /// Lower bound of the event window, Unix seconds.
    pub fn since(mut self, since: i64) -> Self {
        self.config.since = Some(since);
        self
    }

    /// Upper bound of the event window, Unix seconds.
    pub fn until(mut self, until: i64) -> Self {
        self.config.until = Some(until);
        self
    }

    /// Supply the access token explicitly instead of through a
    /// [`CredentialSource`].
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config.access_token = Some(token.into());
        self
    }

    /// Build the final configuration.
    pub fn build(self) -> SearchConfig {
        self.config
    }
}
