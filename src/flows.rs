//! Usage: Flow orchestrators composing URL building, redirect capture,
//! response validation, and token exchange.

use crate::authority::Authority;
use crate::capture::RedirectCapture;
use crate::response::{parse_authorization_response, AuthorizationOutcome};
use crate::shared::error::{AuthError, AuthResult};
use crate::shared::security::mask_token;
use crate::token_exchange::{exchange_token, TokenBundle};
use crate::urls::{
    build_admin_consent_url, build_authorization_url, build_token_request, AdminConsentRequest,
    AuthorizationRequest, TokenRequest,
};
use rand::RngCore;
use std::time::Duration;

/// Entry point for the three public operations. Holds the (read-only)
/// authority and the HTTP client; safe to share across tasks.
pub struct AuthClient {
    authority: Authority,
    http: reqwest::Client,
}

impl AuthClient {
    /// Client against the public login host.
    pub fn new() -> AuthResult<Self> {
        Self::with_authority(Authority::default())
    }

    /// Client against an injected authority (tests point this at a local
    /// stand-in for the token endpoint).
    pub fn with_authority(authority: Authority) -> AuthResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("entra-oauth/{}", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { authority, http })
    }

    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Interactive authorization-code request: generate a fresh state, open
    /// the authorization URL in the surface, then validate the redirect.
    /// `Ok(None)` means the response was suppressed (state mismatch, warning
    /// already logged) or carried nothing recognizable.
    pub async fn get_authorization_code(
        &self,
        surface: &dyn RedirectCapture,
        request: &AuthorizationRequest,
    ) -> AuthResult<Option<AuthorizationOutcome>> {
        require_client_id(&request.client_id)?;
        let state = generate_state();
        let url = build_authorization_url(&self.authority, &state, request);
        tracing::debug!(
            tenant = %request.tenant_id,
            state = %mask_token(&state),
            "opening interactive authorization request"
        );
        let final_url = surface.capture(&url).await?;
        parse_authorization_response(&final_url, &state)
    }

    /// Interactive tenant-admin consent grant; same shape as the code flow
    /// over the admin-consent URL.
    pub async fn grant_admin_consent(
        &self,
        surface: &dyn RedirectCapture,
        request: &AdminConsentRequest,
    ) -> AuthResult<Option<AuthorizationOutcome>> {
        require_client_id(&request.client_id)?;
        let state = generate_state();
        let url = build_admin_consent_url(&self.authority, &state, request);
        tracing::debug!(tenant = %request.tenant_id, "opening admin consent request");
        let final_url = surface.capture(&url).await?;
        parse_authorization_response(&final_url, &state)
    }

    /// Token exchange; no browser interaction. The grant is chosen by the
    /// presence of `authorization_code` on the request.
    pub async fn get_token(&self, request: &TokenRequest) -> AuthResult<TokenBundle> {
        require_client_id(&request.client_id)?;
        let (url, body) = build_token_request(&self.authority, request);
        let grant = if request.authorization_code.is_some() {
            "authorization_code"
        } else {
            "client_credentials"
        };
        tracing::debug!(tenant = %request.tenant_id, grant, "requesting tokens");
        exchange_token(&self.http, &url, body).await
    }
}

fn require_client_id(client_id: &str) -> AuthResult<()> {
    if client_id.trim().is_empty() {
        return Err(AuthError::InvalidInput(
            "client_id must not be empty".to_string(),
        ));
    }
    Ok(())
}

/// Fresh anti-forgery correlation token: 32 OS-random bytes, hex encoded.
pub(crate) fn generate_state() -> String {
    use rand::rngs::OsRng;
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
