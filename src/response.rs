//! Usage: Redirected-response parsing and anti-forgery state validation.

use crate::shared::error::{AuthError, AuthResult};
use crate::shared::security::constant_time_eq;

/// Authorization response parsed from the final redirect's query string. Only
/// keys actually present are populated; absence is distinct from empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AuthorizationOutcome {
    pub error: Option<String>,
    pub error_description: Option<String>,
    pub authorization_code: Option<String>,
    pub admin_consent: Option<String>,
    pub session_state: Option<String>,
    pub tenant: Option<String>,
    pub state: Option<String>,
}

impl AuthorizationOutcome {
    /// The provider reported a failure; success fields are unreliable.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    fn is_vacant(&self) -> bool {
        self.error.is_none()
            && self.error_description.is_none()
            && self.authorization_code.is_none()
            && self.admin_consent.is_none()
            && self.session_state.is_none()
            && self.tenant.is_none()
            && self.state.is_none()
    }
}

/// Parse the captured redirect and enforce the trust rule.
///
/// The outcome is returned when the echoed `state` matches `expected_state`,
/// or when the provider reported an `error` (a state check on an error
/// redirect may be impossible, so errors always surface). A state mismatch
/// without an error logs a warning and suppresses the outcome. A redirect
/// carrying none of the recognized keys yields no outcome at all.
pub(crate) fn parse_authorization_response(
    final_url: &str,
    expected_state: &str,
) -> AuthResult<Option<AuthorizationOutcome>> {
    let url = reqwest::Url::parse(final_url)
        .map_err(|e| AuthError::Capture(format!("final redirect is not a parseable url: {e}")))?;

    let mut outcome = AuthorizationOutcome::default();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "error" => outcome.error = Some(value.into_owned()),
            "error_description" => outcome.error_description = Some(value.into_owned()),
            "code" => outcome.authorization_code = Some(value.into_owned()),
            "admin_consent" => outcome.admin_consent = Some(value.into_owned()),
            "session_state" => outcome.session_state = Some(value.into_owned()),
            "tenant" => outcome.tenant = Some(value.into_owned()),
            "state" => outcome.state = Some(value.into_owned()),
            _ => {}
        }
    }

    if outcome.is_vacant() {
        return Ok(None);
    }
    if outcome.is_error() {
        return Ok(Some(outcome));
    }

    let returned_state = outcome.state.as_deref().unwrap_or_default();
    if constant_time_eq(returned_state.as_bytes(), expected_state.as_bytes()) {
        return Ok(Some(outcome));
    }

    tracing::warn!(
        returned_state,
        expected_state,
        "authorization response state does not match the request state; discarding response"
    );
    Ok(None)
}
