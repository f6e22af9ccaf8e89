//! Integration tests for the venuescope search API.
//!
//! These tests run against the full public surface with a mocked
//! transport: no expectation is ever set for a request the code under
//! test must not make, so stray network attempts fail loudly.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use mockall::mock;
use url::Url;
use venuescope::{
    EventSearcher, GraphTransport, NullCredentials, SearchConfig, SearchError, StaticCredentials,
    TransportError,
};

mock! {
    pub Transport {}

    #[async_trait]
    impl GraphTransport for Transport {
        async fn get(&self, url: Url) -> Result<String, TransportError>;
    }
}

fn setup_test_env() {
    let _ = venuescope::init_logging(tracing::Level::WARN);
}

fn query_map(url: &Url) -> HashMap<String, String> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn requested_ids(url: &Url) -> Vec<String> {
    query_map(url)
        .get("ids")
        .map(|ids| ids.split(',').map(str::to_string).collect())
        .unwrap_or_default()
}

fn is_discovery(url: &Url) -> bool {
    url.path().ends_with("/search")
}

fn is_lookup(url: &Url) -> bool {
    query_map(url).contains_key("ids")
}

/// One venue object per requested id, keyed by id.
fn venue_body_for(ids: &[String]) -> String {
    let mut body = serde_json::Map::new();
    for id in ids {
        body.insert(
            id.clone(),
            serde_json::json!({"id": id, "name": format!("Venue {id}")}),
        );
    }
    serde_json::Value::Object(body).to_string()
}

fn searcher_with(transport: MockTransport, config: SearchConfig) -> EventSearcher {
    EventSearcher::with_components(config, Arc::new(transport), Arc::new(NullCredentials))
}

#[tokio::test]
async fn missing_coordinates_reject_without_any_request() {
    setup_test_env();

    let config = SearchConfig::builder().access_token("token").build();
    // Zero expectations: any transport call panics the test.
    let searcher = searcher_with(MockTransport::new(), config);

    let err = searcher.search().await.unwrap_err();
    assert_eq!(err.code(), 1);
    assert!(matches!(err, SearchError::MissingCoordinates));
}

#[tokio::test]
async fn missing_credential_rejects_without_any_request() {
    setup_test_env();

    let config = SearchConfig::builder().near(52.5206, 13.4098).build();
    let searcher = searcher_with(MockTransport::new(), config);

    let err = searcher.search().await.unwrap_err();
    assert_eq!(err.code(), 2);
}

#[tokio::test]
async fn injected_credentials_reach_the_request_urls() {
    setup_test_env();

    let mut transport = MockTransport::new();
    transport
        .expect_get()
        .withf(|url| {
            is_discovery(url) && query_map(url)["access_token"] == "from-provider"
        })
        .times(1)
        .returning(|_| Ok(r#"{"data":[]}"#.to_string()));

    let config = SearchConfig::builder().near(52.5206, 13.4098).build();
    let searcher = EventSearcher::with_components(
        config,
        Arc::new(transport),
        Arc::new(StaticCredentials::new("from-provider")),
    );

    let response = searcher.search().await.unwrap();
    assert!(response.venues.is_empty());
}

#[tokio::test]
async fn two_discovered_venues_aggregate_in_order() {
    setup_test_env();

    let mut transport = MockTransport::new();
    transport
        .expect_get()
        .withf(is_discovery)
        .times(1)
        .returning(|_| Ok(r#"{"data":[{"id":"1"},{"id":"2"}]}"#.to_string()));
    transport
        .expect_get()
        .withf(is_lookup)
        .times(1)
        .returning(|url| {
            assert_eq!(requested_ids(&url), vec!["1", "2"]);
            Ok(r#"{"1":{"id":"1","name":"A"},"2":{"id":"2","name":"B"}}"#.to_string())
        });

    let config = SearchConfig::builder()
        .near(52.5206, 13.4098)
        .access_token("token")
        .build();
    let response = searcher_with(transport, config).search().await.unwrap();

    let names: Vec<&str> = response.venues.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[tokio::test]
async fn a_hundred_twenty_places_fan_out_into_three_lookups() {
    setup_test_env();

    let discovered: Vec<String> = (0..120).map(|i| format!("p{i}")).collect();
    let discovery_body = serde_json::json!({
        "data": discovered
            .iter()
            .map(|id| serde_json::json!({"id": id}))
            .collect::<Vec<_>>(),
    })
    .to_string();

    let batch_sizes = Arc::new(Mutex::new(Vec::new()));
    let recorded_sizes = Arc::clone(&batch_sizes);

    let mut transport = MockTransport::new();
    transport
        .expect_get()
        .withf(is_discovery)
        .times(1)
        .returning(move |_| Ok(discovery_body.clone()));
    transport
        .expect_get()
        .withf(is_lookup)
        .times(3)
        .returning(move |url| {
            let ids = requested_ids(&url);
            recorded_sizes.lock().unwrap().push(ids.len());
            Ok(venue_body_for(&ids))
        });

    let config = SearchConfig::builder()
        .near(52.5206, 13.4098)
        .access_token("token")
        .build();
    let response = searcher_with(transport, config).search().await.unwrap();

    assert_eq!(*batch_sizes.lock().unwrap(), vec![50, 50, 20]);

    let returned: Vec<&str> = response.venues.iter().map(|v| v.id.as_str()).collect();
    let expected: Vec<&str> = discovered.iter().map(String::as_str).collect();
    assert_eq!(returned, expected, "aggregation keeps discovery order");
}

#[tokio::test]
async fn the_event_window_is_forwarded_to_the_lookup() {
    setup_test_env();

    let mut transport = MockTransport::new();
    transport
        .expect_get()
        .withf(is_discovery)
        .times(1)
        .returning(|_| Ok(r#"{"data":[{"id":"1"}]}"#.to_string()));
    transport
        .expect_get()
        .withf(|url| {
            is_lookup(url)
                && query_map(url)["fields"].ends_with(".since(1700000000).until(1700086400)")
        })
        .times(1)
        .returning(|url| Ok(venue_body_for(&requested_ids(&url))));

    let config = SearchConfig::builder()
        .near(52.5206, 13.4098)
        .access_token("token")
        .since(1_700_000_000)
        .until(1_700_086_400)
        .build();

    let response = searcher_with(transport, config).search().await.unwrap();
    assert_eq!(response.venues.len(), 1);
}

#[tokio::test]
async fn nested_events_come_back_with_their_venue() {
    setup_test_env();

    let mut transport = MockTransport::new();
    transport
        .expect_get()
        .withf(is_discovery)
        .times(1)
        .returning(|_| Ok(r#"{"data":[{"id":"42"}]}"#.to_string()));
    transport
        .expect_get()
        .withf(is_lookup)
        .times(1)
        .returning(|_| {
            Ok(r#"{
                "42": {
                    "id": "42",
                    "name": "Kesselhaus",
                    "events": {
                        "data": [
                            {
                                "id": "ev-7",
                                "name": "Open Air",
                                "start_time": "2026-09-01T20:00:00+0200",
                                "attending_count": 250,
                                "maybe_count": 80
                            }
                        ]
                    }
                }
            }"#
            .to_string())
        });

    let config = SearchConfig::builder()
        .near(52.5206, 13.4098)
        .access_token("token")
        .build();
    let response = searcher_with(transport, config).search().await.unwrap();

    let events = response.venues[0].events.as_ref().unwrap();
    assert_eq!(events.data[0].name.as_deref(), Some("Open Air"));
    assert_eq!(events.data[0].attending_count, Some(250));
}

#[tokio::test]
async fn a_failed_discovery_rejects_with_code_minus_one_and_no_lookups() {
    setup_test_env();

    let mut transport = MockTransport::new();
    // Only discovery is expected; a lookup would panic as unexpected.
    transport
        .expect_get()
        .withf(is_discovery)
        .times(1)
        .returning(|_| Ok("<!DOCTYPE html>".to_string()));

    let config = SearchConfig::builder()
        .near(52.5206, 13.4098)
        .access_token("token")
        .build();

    let err = searcher_with(transport, config).search().await.unwrap_err();
    assert_eq!(err.code(), -1);
    assert!(matches!(err, SearchError::Pipeline(_)));
}

#[tokio::test]
async fn a_failed_lookup_rejects_the_whole_search() {
    setup_test_env();

    let mut transport = MockTransport::new();
    transport
        .expect_get()
        .withf(is_discovery)
        .times(1)
        .returning(|_| Ok(r#"{"data":[{"id":"1"},{"id":"2"}]}"#.to_string()));
    transport
        .expect_get()
        .withf(is_lookup)
        .times(1)
        .returning(|_| Ok("not json at all".to_string()));

    let config = SearchConfig::builder()
        .near(52.5206, 13.4098)
        .access_token("token")
        .build();

    let err = searcher_with(transport, config).search().await.unwrap_err();
    assert_eq!(err.code(), -1);
}
