//! The venue/event searcher.
//!
//! [`EventSearcher`] ties a [`SearchConfig`] to a transport and a
//! credential source, validates the config, and hands a fully-resolved
//! plan to the fetch pipeline. Results come back unsorted; ordering is
//! the caller's choice via [`crate::rank`].

use std::sync::Arc;

use chrono::Utc;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, instrument};

use crate::{
    config::{CredentialSource, EnvCredentials, SearchConfig},
    error::{Result, SearchError},
    model::Venue,
    pipeline::{self, GraphTransport, HttpTransport, SearchPlan},
};

static RESPONSE_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../schema/events-response.schema.json"))
        .expect("embedded response schema is valid JSON")
});

/// Aggregated search payload: every fetched venue, in request order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub venues: Vec<Venue>,
}

/// Searches the graph for venues and their events around a point.
///
/// # Examples
///
/// ```rust
/// use venuescope::{EventSearcher, SearchConfig};
///
/// let config = SearchConfig::builder()
///     .near(52.5206, 13.4098)
///     .query("club")
///     .access_token("EAAC-example")
///     .build();
///
/// let searcher = EventSearcher::new(config);
/// assert_eq!(searcher.config().distance, 100);
/// ```
#[derive(Clone)]
pub struct EventSearcher {
    config: SearchConfig,
    transport: Arc<dyn GraphTransport>,
    credentials: Arc<dyn CredentialSource>,
}

impl EventSearcher {
    /// Create a searcher with the production HTTP transport and the
    /// default environment credential source.
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self::with_components(
            config,
            Arc::new(HttpTransport::new()),
            Arc::new(EnvCredentials::default()),
        )
    }

    /// Create a searcher with a custom transport, keeping the default
    /// environment credential source.
    #[must_use]
    pub fn with_transport(config: SearchConfig, transport: Arc<dyn GraphTransport>) -> Self {
        Self::with_components(config, transport, Arc::new(EnvCredentials::default()))
    }

    /// Create a searcher from fully custom components.
    ///
    /// This is the constructor tests use to inject a mock transport and
    /// deterministic credentials.
    #[must_use]
    pub fn with_components(
        config: SearchConfig,
        transport: Arc<dyn GraphTransport>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Self {
        Self {
            config,
            transport,
            credentials,
        }
    }

    /// The configuration this searcher was built with.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run the search: validate, discover places, bulk-fetch venues with
    /// their windowed events, and aggregate.
    ///
    /// Validation is ordered: missing coordinates (code 1) is reported
    /// before a missing access token (code 2), and both are checked
    /// before any network traffic. Any pipeline failure surfaces as code
    /// -1 with the cause attached. Every error is also written to the
    /// error log before being returned.
    ///
    /// ```no_run
    /// use venuescope::{EventSearcher, SearchConfig};
    ///
    /// # async fn demo() -> venuescope::error::Result<()> {
    /// let config = SearchConfig::builder().near(52.5206, 13.4098).build();
    ///
    /// let response = EventSearcher::new(config).search().await?;
    /// for venue in &response.venues {
    ///     println!("{} ({})", venue.name, venue.id);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "Venue Search", skip_all, level = "info")]
    pub async fn search(&self) -> Result<SearchResponse> {
        match self.try_search().await {
            Ok(response) => {
                info!(venue_count = response.venues.len(), "venue search complete");
                Ok(response)
            }
            Err(err) => {
                error!(code = err.code(), error = %err, "venue search failed");
                Err(err)
            }
        }
    }

    async fn try_search(&self) -> Result<SearchResponse> {
        let plan = self.plan()?;
        let venues = pipeline::run(self.transport.as_ref(), &plan).await?;
        Ok(SearchResponse { venues })
    }

    /// Resolve the config into definite pipeline inputs.
    ///
    /// Coordinates are checked first, then the token; an empty explicit
    /// token falls through to the credential source. A missing `since`
    /// becomes the current Unix time, fixed here so the whole run shares
    /// one window.
    fn plan(&self) -> Result<SearchPlan> {
        let (Some(latitude), Some(longitude)) = (self.config.latitude, self.config.longitude)
        else {
            return Err(SearchError::MissingCoordinates);
        };

        let access_token = self
            .config
            .access_token
            .clone()
            .filter(|token| !token.is_empty())
            .or_else(|| self.credentials.access_token())
            .ok_or(SearchError::MissingAccessToken)?;

        Ok(SearchPlan {
            latitude,
            longitude,
            distance: self.config.distance,
            query: self.config.query.clone().unwrap_or_default(),
            version: self.config.version.clone(),
            since: self.config.since.unwrap_or_else(|| Utc::now().timestamp()),
            until: self.config.until,
            access_token,
        })
    }

    /// The static response-shape schema document.
    ///
    /// Embedded at compile time and parsed once; handed out verbatim for
    /// external validators. The search itself never consults it.
    #[must_use]
    pub fn schema() -> &'static Value {
        &RESPONSE_SCHEMA
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::{NullCredentials, StaticCredentials},
        pipeline::MockGraphTransport,
    };

    fn searcher(config: SearchConfig, credentials: impl CredentialSource + 'static) -> EventSearcher {
        // No transport expectations: any network attempt fails the test.
        EventSearcher::with_components(
            config,
            Arc::new(MockGraphTransport::new()),
            Arc::new(credentials),
        )
    }

    #[test]
    fn coordinates_are_checked_before_the_token() {
        let config = SearchConfig::builder().access_token("token").build();

        let err = searcher(config, NullCredentials).plan().unwrap_err();
        assert!(matches!(err, SearchError::MissingCoordinates));
    }

    #[test]
    fn one_missing_coordinate_is_still_missing() {
        let config = SearchConfig::builder()
            .latitude(52.5206)
            .access_token("token")
            .build();

        let err = searcher(config, NullCredentials).plan().unwrap_err();
        assert!(matches!(err, SearchError::MissingCoordinates));
    }

    #[test]
    fn token_resolution_prefers_the_explicit_config_value() {
        let config = SearchConfig::builder()
            .near(1.0, 2.0)
            .access_token("from-config")
            .build();

        let plan = searcher(config, StaticCredentials::new("from-provider"))
            .plan()
            .unwrap();
        assert_eq!(plan.access_token, "from-config");
    }

    #[test]
    fn empty_config_token_falls_through_to_the_provider() {
        let config = SearchConfig::builder()
            .near(1.0, 2.0)
            .access_token("")
            .build();

        let plan = searcher(config, StaticCredentials::new("from-provider"))
            .plan()
            .unwrap();
        assert_eq!(plan.access_token, "from-provider");
    }

    #[test]
    fn no_resolvable_token_is_an_authentication_error() {
        let config = SearchConfig::builder().near(1.0, 2.0).build();

        let err = searcher(config, NullCredentials).plan().unwrap_err();
        assert!(matches!(err, SearchError::MissingAccessToken));
    }

    #[test]
    fn zero_coordinates_pass_validation() {
        let config = SearchConfig::builder()
            .near(0.0, 0.0)
            .access_token("token")
            .build();

        let plan = searcher(config, NullCredentials).plan().unwrap();
        assert_eq!(plan.latitude, 0.0);
        assert_eq!(plan.longitude, 0.0);
    }

    #[test]
    fn a_configured_window_is_passed_through() {
        let config = SearchConfig::builder()
            .near(1.0, 2.0)
            .access_token("token")
            .since(1_700_000_000)
            .until(1_700_086_400)
            .build();

        let plan = searcher(config, NullCredentials).plan().unwrap();
        assert_eq!(plan.since, 1_700_000_000);
        assert_eq!(plan.until, Some(1_700_086_400));
    }

    #[test]
    fn a_missing_window_start_resolves_to_now() {
        let config = SearchConfig::builder()
            .near(1.0, 2.0)
            .access_token("token")
            .build();

        let before = Utc::now().timestamp();
        let plan = searcher(config, NullCredentials).plan().unwrap();
        let after = Utc::now().timestamp();

        assert!((before..=after).contains(&plan.since));
        assert_eq!(plan.until, None);
    }

    #[test]
    fn a_missing_query_becomes_the_empty_filter() {
        let config = SearchConfig::builder()
            .near(1.0, 2.0)
            .access_token("token")
            .build();

        let plan = searcher(config, NullCredentials).plan().unwrap();
        assert_eq!(plan.query, "");
    }

    #[tokio::test]
    async fn search_rejects_with_the_matching_codes() {
        let unlocated = searcher(SearchConfig::default(), NullCredentials);
        assert_eq!(unlocated.search().await.unwrap_err().code(), 1);

        let unauthenticated = searcher(
            SearchConfig::builder().near(1.0, 2.0).build(),
            NullCredentials,
        );
        assert_eq!(unauthenticated.search().await.unwrap_err().code(), 2);
    }

    #[test]
    fn the_embedded_schema_describes_the_venues_list() {
        let schema = EventSearcher::schema();

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["venues"]["type"], "array");
    }

    #[test]
    fn responses_round_trip_through_serde() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"venues":[{"id":"1","name":"A"}]}"#).unwrap();
        assert_eq!(response.venues.len(), 1);

        let encoded = serde_json::to_string(&response).unwrap();
        let decoded: SearchResponse = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, response);
    }
}
