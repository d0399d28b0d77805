//! Error types for the reservation backend client
//!
//! Only failures *below* the status-code level live here. Every status the
//! server actually delivers — expected or not — is reduced into the
//! operation's outcome enum instead (see [`crate::outcome`]); that
//! convention is what the feature reducers' dispatch is built on.

use thiserror::Error;

/// Errors that can occur when talking to the reservation backend
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Network-level failure: the request produced no response at all
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a success status but an unreadable body
    #[error("Response parsing failed: {0}")]
    ResponseParse(String),
}
