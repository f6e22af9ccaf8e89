use thiserror::Error;

use crate::pipeline::PipelineError;

/// Error surfaced by [`EventSearcher::search`](crate::EventSearcher::search).
///
/// Each variant carries a stable numeric code alongside its message so
/// callers that route on codes keep working across message changes.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("latitude and longitude are both required")]
    MissingCoordinates,
    #[error("an access token is required, either in the search config or from a credential source")]
    MissingAccessToken,
    #[error("venue fetch failed: {0}")]
    Pipeline(#[from] PipelineError),
}

impl SearchError {
    /// Numeric code for this error: `1` missing coordinates, `2` missing
    /// access token, `-1` any pipeline failure.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::MissingCoordinates => 1,
            Self::MissingAccessToken => 2,
            Self::Pipeline(_) => -1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SearchError>;
