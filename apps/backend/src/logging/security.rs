use serde_json::Value;
use tracing::warn;

use crate::logging::pii::Redacted;
use crate::logging::redaction::mask_value;
use crate::trace_ctx;

/// Log a request turned away by the authorization gate.
///
/// `detail` is the internal verification failure; it stays in the log and
/// never reaches the client.
pub fn auth_rejected(reason: &str, detail: &str) {
    let correlation_id = trace_ctx::correlation_id();

    warn!(
        event = "SECURITY_AUTH_REJECTED",
        %correlation_id,
        reason,
        detail = %Redacted(detail),
        "Request rejected by authorization gate"
    );
}

/// Log a failed login attempt. The submitted email is masked as a
/// sensitive field whatever it contains.
pub fn login_failed(reason: &str, email: Option<&str>) {
    let correlation_id = trace_ctx::correlation_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %correlation_id,
        email = %masked_email(email),
        reason,
        "Authentication failure"
    );
}

fn masked_email(email: Option<&str>) -> String {
    let raw = email.map_or(Value::Null, |e| Value::String(e.to_string()));
    match mask_value(&raw) {
        Value::String(masked) => masked,
        other => other.to_string(),
    }
}
