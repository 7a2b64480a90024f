//! Usage: Crate error model for the interactive OAuth flows.

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Flow input that cannot produce a valid request (empty client id, …).
    #[error("invalid flow input: {0}")]
    InvalidInput(String),

    /// The interactive surface failed before reaching a terminal redirect,
    /// or the redirect it reported is not a parseable URL.
    #[error("redirect capture failed: {0}")]
    Capture(String),

    /// Network or protocol failure talking to the token endpoint. Fatal for
    /// the invocation; no retry is attempted.
    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The token endpoint answered with a non-success status. Carries the
    /// provider's `error`/`error_description` when the body had them, plus a
    /// sanitized snippet of the body for diagnostics.
    #[error(
        "token endpoint returned status={status} code={} message={}",
        .code.as_deref().unwrap_or("-"),
        .description.as_deref().unwrap_or("-")
    )]
    TokenEndpoint {
        status: u16,
        code: Option<String>,
        description: Option<String>,
        body_snippet: String,
    },

    /// The token endpoint answered 2xx with a body that is not JSON. A JSON
    /// body missing token fields is NOT this error; it yields an empty bundle.
    #[error("token response body invalid: {0}")]
    MalformedResponse(String),
}
