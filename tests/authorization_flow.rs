//! End-to-end interactive flows over a canned browser surface.

use entra_oauth::{
    AdminConsentRequest, ApiVersion, AuthClient, AuthResult, AuthorizationRequest, Prompt,
    RedirectCapture,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;

/// Surface stub: records the URL it was asked to open and replies with a
/// canned redirect, substituting the flow's real state for `{state}`.
struct CannedSurface {
    template: String,
    opened: Mutex<Option<String>>,
}

impl CannedSurface {
    fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            opened: Mutex::new(None),
        }
    }

    fn opened_url(&self) -> String {
        self.opened
            .lock()
            .expect("opened url lock")
            .clone()
            .expect("surface was never opened")
    }
}

impl RedirectCapture for CannedSurface {
    fn capture(
        &self,
        url: &str,
    ) -> Pin<Box<dyn Future<Output = AuthResult<String>> + Send + '_>> {
        *self.opened.lock().expect("opened url lock") = Some(url.to_string());
        let state = query_param(url, "state").unwrap_or_default();
        let final_url = self.template.replace("{state}", &state);
        Box::pin(async move { Ok(final_url) })
    }
}

fn query_param(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

#[tokio::test]
async fn authorization_code_round_trip() {
    let surface = CannedSurface::new("urn:ietf:wg:oauth:2.0:oob?code=ABC123&session_state=sess-1&state={state}");
    let client = AuthClient::new().expect("client");

    let outcome = client
        .get_authorization_code(&surface, &AuthorizationRequest::new("cid"))
        .await
        .expect("flow")
        .expect("outcome");

    assert_eq!(outcome.authorization_code.as_deref(), Some("ABC123"));
    assert_eq!(outcome.session_state.as_deref(), Some("sess-1"));
    // The echoed state is exactly the one embedded in the opened URL.
    let opened = surface.opened_url();
    assert_eq!(outcome.state, query_param(&opened, "state"));
}

#[tokio::test]
async fn default_authorization_url_matches_v1_shape_exactly() {
    let surface = CannedSurface::new("urn:ietf:wg:oauth:2.0:oob?code=X&state={state}");
    let client = AuthClient::new().expect("client");
    client
        .get_authorization_code(&surface, &AuthorizationRequest::new("cid"))
        .await
        .expect("flow");

    let opened = surface.opened_url();
    let state = query_param(&opened, "state").expect("state");
    assert_eq!(
        opened,
        format!(
            "https://login.microsoftonline.com/common/oauth2/authorize?response_type=code&client_id=cid&redirect_uri=urn:ietf:wg:oauth:2.0:oob&state={state}&prompt=login"
        )
    );
    assert_eq!(state.len(), 64);
}

#[tokio::test]
async fn v2_request_carries_versioned_path_scopes_and_response_mode() {
    let surface =
        CannedSurface::new("http://localhost:8400/callback?code=X&state={state}");
    let client = AuthClient::new().expect("client");
    let mut request = AuthorizationRequest::new("cid");
    request.api_version = ApiVersion::V2;
    request.prompt = Prompt::Consent;
    request.redirect_uri = "http://localhost:8400/callback".to_string();
    request.scopes = vec!["User.Read".to_string(), "offline_access".to_string()];

    let outcome = client
        .get_authorization_code(&surface, &request)
        .await
        .expect("flow")
        .expect("outcome");
    assert_eq!(outcome.authorization_code.as_deref(), Some("X"));

    let opened = surface.opened_url();
    assert!(opened.contains("/common/oauth2/v2.0/authorize?"));
    assert!(opened.contains("&prompt=consent"));
    assert!(opened.contains("&response_mode=query"));
    assert!(opened.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8400%2Fcallback"));
    assert!(opened.ends_with("&scope=User.Read%20offline_access"));
}

#[tokio::test]
async fn provider_error_surfaces_despite_state_mismatch() {
    let surface = CannedSurface::new(
        "urn:ietf:wg:oauth:2.0:oob?error=access_denied&error_description=User+declined&state=tampered",
    );
    let client = AuthClient::new().expect("client");

    let outcome = client
        .get_authorization_code(&surface, &AuthorizationRequest::new("cid"))
        .await
        .expect("flow")
        .expect("outcome");

    assert_eq!(outcome.error.as_deref(), Some("access_denied"));
    assert_eq!(outcome.error_description.as_deref(), Some("User declined"));
}

#[tokio::test]
async fn tampered_state_suppresses_the_response() {
    let surface =
        CannedSurface::new("urn:ietf:wg:oauth:2.0:oob?code=ABC123&state=tampered");
    let client = AuthClient::new().expect("client");

    let outcome = client
        .get_authorization_code(&surface, &AuthorizationRequest::new("cid"))
        .await
        .expect("flow");

    assert_eq!(outcome, None);
}

#[tokio::test]
async fn admin_consent_v1_uses_admin_consent_prompt() {
    let surface = CannedSurface::new(
        "urn:ietf:wg:oauth:2.0:oob?admin_consent=True&tenant=contoso.example&state={state}",
    );
    let client = AuthClient::new().expect("client");

    let outcome = client
        .grant_admin_consent(&surface, &AdminConsentRequest::new("cid"))
        .await
        .expect("flow")
        .expect("outcome");

    assert_eq!(outcome.admin_consent.as_deref(), Some("True"));
    assert_eq!(outcome.tenant.as_deref(), Some("contoso.example"));
    let opened = surface.opened_url();
    assert!(opened.contains("/common/oauth2/authorize?"));
    assert!(opened.ends_with("&prompt=admin_consent"));
}

#[tokio::test]
async fn admin_consent_v2_uses_dedicated_endpoint() {
    let surface = CannedSurface::new(
        "urn:ietf:wg:oauth:2.0:oob?admin_consent=True&tenant=contoso.example&state={state}",
    );
    let client = AuthClient::new().expect("client");
    let mut request = AdminConsentRequest::new("cid");
    request.tenant_id = "contoso.example".to_string();
    request.api_version = ApiVersion::V2;

    let outcome = client
        .grant_admin_consent(&surface, &request)
        .await
        .expect("flow")
        .expect("outcome");

    assert_eq!(outcome.admin_consent.as_deref(), Some("True"));
    let opened = surface.opened_url();
    assert!(opened.contains("/contoso.example/adminconsent?client_id=cid"));
    assert!(opened.ends_with("&prompt=login"));
}

#[tokio::test]
async fn empty_client_id_fails_before_opening_the_surface() {
    let surface = CannedSurface::new("urn:ietf:wg:oauth:2.0:oob?code=X&state={state}");
    let client = AuthClient::new().expect("client");

    let result = client
        .get_authorization_code(&surface, &AuthorizationRequest::new(""))
        .await;

    assert!(result.is_err());
    assert!(surface.opened.lock().expect("opened url lock").is_none());
}
