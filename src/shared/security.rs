//! Usage: Security-sensitive helpers (secret masking and constant-time equality).

use subtle::ConstantTimeEq;

const MASK_PREFIX_LEN: usize = 4;
const MASK_SUFFIX_LEN: usize = 4;

/// Mask a token-like value for log output, keeping only a short prefix and
/// suffix. Values too short to mask meaningfully are redacted outright.
pub(crate) fn mask_token(token: &str) -> String {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let len = trimmed.len();
    if len <= MASK_PREFIX_LEN + MASK_SUFFIX_LEN {
        return "*".repeat(len.min(8));
    }

    format!(
        "{}...{}",
        &trimmed[..MASK_PREFIX_LEN],
        &trimmed[len - MASK_SUFFIX_LEN..]
    )
}

pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
