//! Usage: OAuth token endpoint client (authorization_code + client_credentials grants).

use crate::shared::error::{AuthError, AuthResult};
use crate::shared::security::mask_token;
use serde_json::Value;

const BODY_SNIPPET_MAX_CHARS: usize = 500;

/// Tokens returned by the exchange. Fields absent from the response stay
/// `None`; an entirely empty bundle means the endpoint answered 2xx with no
/// recognized token fields, which is passed through rather than raised.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TokenBundle {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: Option<i64>,
}

impl TokenBundle {
    pub fn is_empty(&self) -> bool {
        self.access_token.is_none()
            && self.refresh_token.is_none()
            && self.id_token.is_none()
            && self.token_type.is_none()
            && self.expires_in.is_none()
    }
}

/// Single POST to the token endpoint, no retry. The body comes prebuilt from
/// the URL builder so the wire bytes are exactly what was specified.
pub(crate) async fn exchange_token(
    client: &reqwest::Client,
    url: &str,
    body: String,
) -> AuthResult<TokenBundle> {
    let response = client
        .post(url)
        .header(
            reqwest::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(body)
        .send()
        .await?;

    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let (code, description) = parse_provider_error(&text);
        return Err(AuthError::TokenEndpoint {
            status: status.as_u16(),
            code,
            description,
            body_snippet: sanitize_body_snippet(&text),
        });
    }

    let value: Value = serde_json::from_str(&text)
        .map_err(|e| AuthError::MalformedResponse(format!("token response is not json: {e}")))?;

    let bundle = TokenBundle {
        access_token: string_field(&value, "access_token"),
        refresh_token: string_field(&value, "refresh_token"),
        id_token: string_field(&value, "id_token"),
        token_type: string_field(&value, "token_type"),
        expires_in: value.get("expires_in").and_then(parse_i64_lossy),
    };
    if bundle.is_empty() {
        tracing::debug!("token endpoint answered success with no recognized token fields");
    } else if let Some(token) = bundle.access_token.as_deref() {
        tracing::debug!(access_token = %mask_token(token), "token exchange completed");
    }
    Ok(bundle)
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_i64_lossy(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Pull `error`/`error_description` out of a rejection body. The identity
/// platform uses the flat OAuth shape; nested `error` objects (Graph-style)
/// are accepted as a fallback.
fn parse_provider_error(body: &str) -> (Option<String>, Option<String>) {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return (None, None),
    };

    let description = string_field(&value, "error_description");
    match value.get("error") {
        Some(Value::String(code)) => {
            let code = Some(code.trim()).filter(|v| !v.is_empty()).map(str::to_string);
            (code, description)
        }
        Some(Value::Object(_)) => {
            let nested = &value["error"];
            let code = string_field(nested, "code");
            let message = description.or_else(|| string_field(nested, "message"));
            (code, message)
        }
        _ => (None, description),
    }
}

fn is_sensitive_key(key: &str) -> bool {
    let key = key.trim().to_ascii_lowercase();
    key.contains("token") || key.contains("secret") || key.contains("assertion")
}

fn redact_sensitive_json_fields(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                if is_sensitive_key(key) {
                    if let Some(raw) = nested.as_str() {
                        *nested = Value::String(mask_token(raw));
                        continue;
                    }
                }
                redact_sensitive_json_fields(nested);
            }
        }
        Value::Array(items) => {
            for nested in items {
                redact_sensitive_json_fields(nested);
            }
        }
        _ => {}
    }
}

fn sanitize_body_snippet(body: &str) -> String {
    if let Ok(mut value) = serde_json::from_str::<Value>(body) {
        redact_sensitive_json_fields(&mut value);
        if let Ok(encoded) = serde_json::to_string(&value) {
            return encoded.chars().take(BODY_SNIPPET_MAX_CHARS).collect();
        }
    }
    body.chars().take(BODY_SNIPPET_MAX_CHARS).collect()
}
