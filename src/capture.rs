//! Usage: Interactive browser surface contract for redirect capture.

use crate::shared::error::AuthResult;
use std::future::Future;
use std::pin::Pin;

/// Markers whose presence in a redirect's query or fragment ends the
/// interactive session.
const TERMINAL_MARKERS: [&str; 3] = ["error=", "code=", "admin_consent="];

/// The interactive surface that renders the provider's login pages.
///
/// The trait is object-safe to allow `&dyn RedirectCapture` injection; a test
/// stub returning a canned URL substitutes for a real browser window.
pub trait RedirectCapture: Send + Sync {
    /// Open `url` and resolve with the final navigated-to URL once
    /// [`is_terminal_redirect`] matches it. Pends until the user completes or
    /// abandons the login; no timeout is applied by this crate.
    fn capture(&self, url: &str)
        -> Pin<Box<dyn Future<Output = AuthResult<String>> + Send + '_>>;
}

/// True once a navigated-to URL carries an authorization response, i.e. its
/// query or fragment contains one of `error=`, `code=`, `admin_consent=`.
/// Surface implementations use this to decide when to stop navigating.
pub fn is_terminal_redirect(url: &str) -> bool {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        return false;
    };
    let query = parsed.query().unwrap_or_default();
    let fragment = parsed.fragment().unwrap_or_default();
    TERMINAL_MARKERS
        .iter()
        .any(|marker| query.contains(marker) || fragment.contains(marker))
}
