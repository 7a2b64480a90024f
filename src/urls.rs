//! Usage: Authorization, admin-consent, and token endpoint URL/body builders.
//!
//! Built by explicit string assembly rather than a query-pair API: the
//! out-of-band redirect sentinel must reach the provider verbatim, and the
//! token body's parameter presence is part of the wire contract.

use crate::authority::{ApiVersion, Authority, Prompt, DEFAULT_TENANT, OOB_REDIRECT_URI};
use std::borrow::Cow;

/// Parameters for an interactive authorization-code request. The anti-forgery
/// `state` token is generated per invocation by the flow, not carried here.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub client_id: String,
    pub tenant_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub prompt: Prompt,
    pub api_version: ApiVersion,
}

impl AuthorizationRequest {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            tenant_id: DEFAULT_TENANT.to_string(),
            redirect_uri: OOB_REDIRECT_URI.to_string(),
            scopes: Vec::new(),
            prompt: Prompt::default(),
            api_version: ApiVersion::default(),
        }
    }
}

/// Parameters for a tenant-admin consent grant.
#[derive(Debug, Clone)]
pub struct AdminConsentRequest {
    pub client_id: String,
    pub tenant_id: String,
    pub redirect_uri: String,
    pub api_version: ApiVersion,
}

impl AdminConsentRequest {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            tenant_id: DEFAULT_TENANT.to_string(),
            redirect_uri: OOB_REDIRECT_URI.to_string(),
            api_version: ApiVersion::default(),
        }
    }
}

/// Parameters for a token-endpoint request. `authorization_code` absent means
/// the client-credentials grant, regardless of API version.
#[derive(Debug, Clone)]
pub struct TokenRequest {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub tenant_id: String,
    pub redirect_uri: String,
    pub resource_uri: Option<String>,
    pub scopes: Vec<String>,
    pub authorization_code: Option<String>,
    pub api_version: ApiVersion,
}

impl TokenRequest {
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            tenant_id: DEFAULT_TENANT.to_string(),
            redirect_uri: OOB_REDIRECT_URI.to_string(),
            resource_uri: None,
            scopes: Vec::new(),
            authorization_code: None,
            api_version: ApiVersion::default(),
        }
    }
}

/// Build the interactive authorization endpoint URL.
pub fn build_authorization_url(
    authority: &Authority,
    state: &str,
    request: &AuthorizationRequest,
) -> String {
    let endpoint = if request.api_version.is_v2() {
        "oauth2/v2.0/authorize"
    } else {
        "oauth2/authorize"
    };
    let mut url = format!(
        "{}/{}/{endpoint}?response_type=code&client_id={}&redirect_uri={}&state={}&prompt={}",
        authority.base_url(),
        request.tenant_id,
        urlencoding::encode(&request.client_id),
        encode_redirect_uri(&request.redirect_uri),
        urlencoding::encode(state),
        request.prompt.as_str(),
    );
    if request.api_version.is_v2() {
        url.push_str("&response_mode=query");
    }
    if let Some(scope) = encode_scopes(&request.scopes) {
        url.push_str("&scope=");
        url.push_str(&scope);
    }
    url
}

/// Build the admin-consent URL. V1 reuses the authorization endpoint with
/// `prompt=admin_consent`; v2 has a dedicated `/adminconsent` endpoint.
pub fn build_admin_consent_url(
    authority: &Authority,
    state: &str,
    request: &AdminConsentRequest,
) -> String {
    if request.api_version.is_v2() {
        format!(
            "{}/{}/adminconsent?client_id={}&redirect_uri={}&state={}&prompt=login",
            authority.base_url(),
            request.tenant_id,
            urlencoding::encode(&request.client_id),
            encode_redirect_uri(&request.redirect_uri),
            urlencoding::encode(state),
        )
    } else {
        format!(
            "{}/{}/oauth2/authorize?response_type=code&client_id={}&redirect_uri={}&state={}&prompt=admin_consent",
            authority.base_url(),
            request.tenant_id,
            urlencoding::encode(&request.client_id),
            encode_redirect_uri(&request.redirect_uri),
            urlencoding::encode(state),
        )
    }
}

/// Build the token endpoint URL and its form-encoded body.
///
/// `client_secret` is always present in the body, as an empty string when the
/// request has none. `grant_type` follows `authorization_code` presence alone.
pub fn build_token_request(authority: &Authority, request: &TokenRequest) -> (String, String) {
    let endpoint = if request.api_version.is_v2() {
        "oauth2/v2.0/token"
    } else {
        "oauth2/token"
    };
    let url = format!("{}/{}/{endpoint}", authority.base_url(), request.tenant_id);

    let mut body = format!(
        "client_id={}&client_secret={}&redirect_uri={}",
        urlencoding::encode(&request.client_id),
        urlencoding::encode(request.client_secret.as_deref().unwrap_or_default()),
        encode_redirect_uri(&request.redirect_uri),
    );
    match request.authorization_code.as_deref() {
        Some(code) => {
            body.push_str("&grant_type=authorization_code&code=");
            body.push_str(&urlencoding::encode(code));
        }
        None => body.push_str("&grant_type=client_credentials"),
    }
    if let Some(resource) = request.resource_uri.as_deref() {
        body.push_str("&resource=");
        body.push_str(&urlencoding::encode(resource));
    }
    if let Some(scope) = encode_scopes(&request.scopes) {
        body.push_str("&scope=");
        body.push_str(&scope);
    }

    (url, body)
}

fn encode_redirect_uri(raw: &str) -> Cow<'_, str> {
    if raw == OOB_REDIRECT_URI {
        Cow::Borrowed(raw)
    } else {
        urlencoding::encode(raw)
    }
}

/// Space-join then percent-encode; `None` when no scopes were supplied so the
/// `scope` parameter can be omitted entirely.
fn encode_scopes(scopes: &[String]) -> Option<String> {
    if scopes.is_empty() {
        return None;
    }
    Some(urlencoding::encode(&scopes.join(" ")).into_owned())
}
