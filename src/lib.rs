//! Interactive OAuth2 flows for the Microsoft identity platform:
//! authorization code, client credentials, and tenant-admin consent, across
//! the v1 and v2 endpoint shapes.
//!
//! The interactive browser surface is injected via [`RedirectCapture`]; the
//! base login host is injected via [`Authority`]. Nothing is persisted and
//! nothing is refreshed automatically — each operation is one request-scoped
//! call chain.

mod authority;
mod capture;
mod flows;
mod response;
mod shared;
mod token_exchange;
mod urls;

pub use authority::{
    ApiVersion, Authority, Prompt, DEFAULT_AUTHORITY_BASE, DEFAULT_TENANT, OOB_REDIRECT_URI,
};
pub use capture::{is_terminal_redirect, RedirectCapture};
pub use flows::AuthClient;
pub use response::AuthorizationOutcome;
pub use shared::error::{AuthError, AuthResult};
pub use token_exchange::TokenBundle;
pub use urls::{
    build_admin_consent_url, build_authorization_url, build_token_request, AdminConsentRequest,
    AuthorizationRequest, TokenRequest,
};
