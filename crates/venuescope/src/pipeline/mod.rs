//! Three-stage venue fetch: discover place ids around a point, bulk-look
//! up their details in parallel batches, flatten into one ordered list.
//!
//! The pipeline is single-shot. Stage 2 starts only after stage 1's
//! request resolves; within stage 2 every batch request is in flight at
//! once and the first failure aborts the whole group. There are no
//! retries, timeouts, or partial results.

pub use error::PipelineError;
mod transport;

use ahash::AHashMap;
use futures::future::try_join_all;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

pub use transport::{GraphTransport, HttpTransport, TransportError};
#[cfg(test)]
pub use transport::MockGraphTransport;

use crate::{
    batch,
    model::{PlaceId, Venue},
};
use error::Result;

const GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// Result cap on the place-discovery request.
const PLACE_RESULT_LIMIT: u32 = 1000;

/// Field set requested for every venue in a bulk lookup.
const VENUE_FIELDS: [&str; 11] = [
    "id",
    "name",
    "about",
    "emails",
    "picture.type(large)",
    "location",
    "fan_count",
    "category",
    "phone",
    "website",
    "cover",
];

/// Field set of the nested events sub-query.
const EVENT_FIELDS: [&str; 9] = [
    "id",
    "name",
    "description",
    "start_time",
    "end_time",
    "attending_count",
    "declined_count",
    "maybe_count",
    "noreply_count",
];

/// Fully-resolved inputs for one pipeline run.
///
/// Built by the searcher after validation; every field is definite here,
/// unlike the optional-heavy [`crate::SearchConfig`].
#[derive(Debug, Clone)]
pub struct SearchPlan {
    pub latitude: f64,
    pub longitude: f64,
    pub distance: u32,
    pub query: String,
    pub version: String,
    pub since: i64,
    pub until: Option<i64>,
    pub access_token: String,
}

/// Run the full discover/lookup/flatten sequence.
#[instrument(name = "Venue Fetch", skip_all, level = "debug")]
pub async fn run(transport: &dyn GraphTransport, plan: &SearchPlan) -> Result<Vec<Venue>> {
    let ids = discover_places(transport, plan).await?;
    let batches = batch::plan(&ids);
    debug!(
        place_count = ids.len(),
        batch_count = batches.len(),
        "place discovery complete"
    );

    let lookups = batches
        .iter()
        .map(|batch_ids| lookup_url(plan, batch_ids))
        .collect::<Result<Vec<_>>>()?;
    let bodies = try_join_all(lookups.into_iter().map(|url| transport.get(url))).await?;

    flatten_batches(&batches, &bodies)
}

/// Stage 1: one place-search request, keeping only the returned ids in
/// response order.
async fn discover_places(
    transport: &dyn GraphTransport,
    plan: &SearchPlan,
) -> Result<Vec<PlaceId>> {
    let body = transport.get(discovery_url(plan)?).await?;
    let response: DiscoveryResponse = serde_json::from_str(&body)?;
    Ok(response.data.into_iter().map(|place| place.id).collect())
}

fn discovery_url(plan: &SearchPlan) -> Result<Url> {
    let mut url = Url::parse(GRAPH_BASE_URL)?.join(&format!("{}/search", plan.version))?;
    url.query_pairs_mut()
        .append_pair("type", "place")
        .append_pair("q", &plan.query)
        .append_pair("center", &format!("{},{}", plan.latitude, plan.longitude))
        .append_pair("distance", &plan.distance.to_string())
        .append_pair("limit", &PLACE_RESULT_LIMIT.to_string())
        .append_pair("fields", "id")
        .append_pair("access_token", &plan.access_token);
    Ok(url)
}

fn lookup_url(plan: &SearchPlan, ids: &[PlaceId]) -> Result<Url> {
    let mut url = Url::parse(GRAPH_BASE_URL)?.join(&format!("{}/", plan.version))?;
    url.query_pairs_mut()
        .append_pair("ids", &ids.join(","))
        .append_pair("access_token", &plan.access_token)
        .append_pair("fields", &lookup_fields(plan));
    Ok(url)
}

/// The venue field list plus the windowed events sub-selector.
fn lookup_fields(plan: &SearchPlan) -> String {
    let mut events = format!(
        "events.fields({}).since({})",
        EVENT_FIELDS.join(","),
        plan.since
    );
    if let Some(until) = plan.until {
        events.push_str(&format!(".until({until})"));
    }
    format!("{},{}", VENUE_FIELDS.join(","), events)
}

/// Stage 3: parse each body as an id-keyed object and emit the values in
/// the order their ids were requested, not in whatever order the object
/// enumerates. Ids the upstream dropped are skipped; keys that were never
/// requested are discarded.
fn flatten_batches(batches: &[Vec<PlaceId>], bodies: &[String]) -> Result<Vec<Venue>> {
    let mut venues = Vec::new();
    for (ids, body) in batches.iter().zip(bodies) {
        let mut keyed: AHashMap<PlaceId, Venue> = serde_json::from_str(body)?;
        venues.extend(ids.iter().filter_map(|id| keyed.remove(id)));
    }
    Ok(venues)
}

#[derive(Debug, Deserialize)]
struct DiscoveryResponse {
    data: Vec<DiscoveredPlace>,
}

#[derive(Debug, Deserialize)]
struct DiscoveredPlace {
    id: PlaceId,
}

mod error {
    use thiserror::Error;

    use super::transport::TransportError;

    #[derive(Error, Debug)]
    pub enum PipelineError {
        #[error("transport error: {0}")]
        Transport(#[from] TransportError),
        #[error("malformed response payload: {0}")]
        Json(#[from] serde_json::Error),
        #[error("invalid request url: {0}")]
        Url(#[from] url::ParseError),
    }
    pub type Result<T> = std::result::Result<T, PipelineError>;
}
