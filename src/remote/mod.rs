//! Optional remote collaborators (ML risk scorer, advanced LLM assessor).
//!
//! All I/O in the crate lives here, behind trait seams with mock
//! implementations. Every failure is absorbed at the call boundary and
//! converted into a local-engine fallback; callers never see a remote error
//! as a user-facing failure.

pub mod advanced;
pub mod ml;

use thiserror::Error;

pub use advanced::{
    advanced_assess_with_fallback, AdvancedAssessor, AdvancedReport, HttpAdvancedAssessor,
    MockAdvancedAssessor,
};
pub use ml::{assess_with_fallback, HttpMlScorer, MlFeatures, MlPrediction, MlScorer, MockMlScorer};

/// Errors from a remote scoring service. Always caught and masked by
/// fallback; surfaced only in logs.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Cannot reach remote service at {0}")]
    Connection(String),
    #[error("Remote request timed out after {0}s")]
    Timeout(u64),
    #[error("Remote service returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Failed to parse remote response: {0}")]
    ResponseParsing(String),
}

/// Map a reqwest transport error onto the remote error taxonomy.
pub(crate) fn map_transport_error(
    err: reqwest::Error,
    base_url: &str,
    timeout_secs: u64,
) -> RemoteError {
    if err.is_connect() {
        RemoteError::Connection(base_url.to_string())
    } else if err.is_timeout() {
        RemoteError::Timeout(timeout_secs)
    } else {
        RemoteError::Http {
            status: err.status().map(|s| s.as_u16()).unwrap_or(0),
            body: err.to_string(),
        }
    }
}
