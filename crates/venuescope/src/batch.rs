//! Partitioning of discovered identifiers into bulk-lookup batches.

use crate::model::PlaceId;

/// Upstream cap on the number of ids accepted by a single bulk lookup.
pub const BULK_LOOKUP_LIMIT: usize = 50;

/// Split `ids` into request-sized batches, preserving order.
///
/// Produces `ceil(n / 50)` batches; every batch except possibly the last
/// holds exactly [`BULK_LOOKUP_LIMIT`] ids. Empty input yields no batches.
#[must_use]
pub fn plan(ids: &[PlaceId]) -> Vec<Vec<PlaceId>> {
    plan_with_limit(ids, BULK_LOOKUP_LIMIT)
}

/// Split `ids` into batches of at most `max_batch` ids each.
///
/// A `max_batch` of zero is clamped to one so the call can never loop or
/// emit empty batches.
#[must_use]
pub fn plan_with_limit(ids: &[PlaceId], max_batch: usize) -> Vec<Vec<PlaceId>> {
    let size = max_batch.max(1);
    ids.chunks(size).map(<[PlaceId]>::to_vec).collect()
}
