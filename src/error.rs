use thiserror::Error;

/// Engine error taxonomy
///
/// Normalization problems are recovered internally (the controller
/// degrades to an empty page); persistence failures are surfaced to the
/// caller after optimistic rollback so the host can offer a retry.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Payload shape not recognized by any normalizer variant
    #[error("malformed listing response: {detail}")]
    MalformedResponse { detail: String },

    /// Transport-level failure on fetch, reorder commit, or featured toggle
    #[error("network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("backend returned status {status}")]
    BackendStatus { status: u16 },

    /// Curation call named an id that is not in the collection
    #[error("unknown item id: {id}")]
    UnknownItem { id: String },
}

impl EngineError {
    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            detail: detail.into(),
        }
    }
}
