//! Usage: Base authentication endpoint configuration and protocol enums.

/// Default Microsoft identity platform login host.
pub const DEFAULT_AUTHORITY_BASE: &str = "https://login.microsoftonline.com";

/// Out-of-band redirect sentinel for clients with no redirect listener. Passed
/// through URLs verbatim, never percent-encoded.
pub const OOB_REDIRECT_URI: &str = "urn:ietf:wg:oauth:2.0:oob";

/// Tenant used when the caller does not target a specific directory.
pub const DEFAULT_TENANT: &str = "common";

/// Base authentication URL. Read-only for the lifetime of an `AuthClient`;
/// injectable so tests can point the flows at a local stand-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authority {
    base_url: String,
}

impl Authority {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into().trim().to_string();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for Authority {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHORITY_BASE)
    }
}

/// Endpoint generation: v1 (`/oauth2/...`) or v2 (`/oauth2/v2.0/...`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApiVersion {
    #[default]
    V1,
    V2,
}

impl ApiVersion {
    pub(crate) fn is_v2(self) -> bool {
        matches!(self, Self::V2)
    }
}

/// Login experience requested from the authorization endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Prompt {
    #[default]
    Login,
    Consent,
    None,
}

impl Prompt {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Consent => "consent",
            Self::None => "none",
        }
    }
}
