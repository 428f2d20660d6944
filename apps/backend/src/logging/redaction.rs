//! Structured redaction for observability sinks.
//!
//! Values are first turned into a `serde_json::Value` tree by their own
//! `Serialize` impl, then walked. Any object key in [`SENSITIVE_FIELDS`]
//! has its value masked; everything else is copied through unchanged.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

/// Field names whose values never reach a log sink. Matched case-sensitively.
pub const SENSITIVE_FIELDS: &[&str] = &["password", "Password", "email", "Email"];

/// Replacement for any sensitive value that is not an email address.
pub const MASK: &str = "********";

/// Replacement for the local part of an email after its first character.
pub const EMAIL_LOCAL_MASK: &str = "****";

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    // `*` is accepted in the local part so masked addresses still parse as emails
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z0-9._%+*-]+@[A-Za-z0-9-]+(\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$").unwrap()
});

pub fn is_sensitive(field: &str) -> bool {
    SENSITIVE_FIELDS.contains(&field)
}

pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// `alice@example.com` becomes `a****@example.com`. Non-emails are returned as-is.
pub fn mask_email(value: &str) -> String {
    let Some((local, domain)) = value.split_once('@') else {
        return value.to_string();
    };
    let Some(first) = local.chars().next() else {
        return value.to_string();
    };
    format!("{first}{EMAIL_LOCAL_MASK}@{domain}")
}

/// Mask a single value that sits under a sensitive key. `null` is masked
/// like any other non-email value.
pub fn mask_value(value: &Value) -> Value {
    match value {
        Value::String(s) if is_email(s) => Value::String(mask_email(s)),
        _ => Value::String(MASK.to_string()),
    }
}

/// Sanitized copy of `value`. The input is left untouched.
pub fn redact(value: &Value) -> Value {
    match value {
        Value::Object(fields) => {
            let mut out = Map::with_capacity(fields.len());
            for (key, field) in fields {
                let redacted = if is_sensitive(key) {
                    mask_value(field)
                } else {
                    redact(field)
                };
                out.insert(key.clone(), redacted);
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(redact).collect()),
        scalar => scalar.clone(),
    }
}

/// Serialize `value` and redact the result. Types that refuse to serialize
/// are logged as `null`.
pub fn redact_serialize<T: Serialize + ?Sized>(value: &T) -> Value {
    match serde_json::to_value(value) {
        Ok(tree) => redact(&tree),
        Err(_) => Value::Null,
    }
}

/// Display adapter that renders a value as redacted JSON, for use as a
/// `tracing` field: `info!(body = %RedactedJson(&req))`.
pub struct RedactedJson<'a, T: ?Sized>(pub &'a T);

impl<T: Serialize + ?Sized> fmt::Display for RedactedJson<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact_serialize(self.0))
    }
}

impl<T: Serialize + ?Sized> fmt::Debug for RedactedJson<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_login_payload() {
        let input = json!({"password": "hunter2", "email": "a@b.com", "name": "x"});
        assert_eq!(
            redact(&input),
            json!({"password": "********", "email": "a****@b.com", "name": "x"})
        );
    }

    #[test]
    fn test_original_is_not_mutated() {
        let input = json!({"password": "hunter2"});
        let snapshot = input.clone();
        let _ = redact(&input);
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_field_names_are_case_sensitive() {
        let input = json!({"PASSWORD": "kept", "Password": "masked", "eMail": "x@y.io"});
        assert_eq!(
            redact(&input),
            json!({"PASSWORD": "kept", "Password": "********", "eMail": "x@y.io"})
        );
    }

    #[test]
    fn test_nested_objects_and_arrays() {
        let input = json!({
            "user": {"email": "alice@example.com", "nickname": "al"},
            "history": [{"password": "old"}, {"password": "older"}],
            "count": 2
        });
        assert_eq!(
            redact(&input),
            json!({
                "user": {"email": "a****@example.com", "nickname": "al"},
                "history": [{"password": "********"}, {"password": "********"}],
                "count": 2
            })
        );
    }

    #[test]
    fn test_non_string_and_non_email_values() {
        let input = json!({
            "email": "not-an-email",
            "password": 1234,
            "Email": null,
            "Password": {"nested": "secret"}
        });
        assert_eq!(
            redact(&input),
            json!({
                "email": "********",
                "password": "********",
                "Email": "********",
                "Password": "********"
            })
        );
    }

    #[test]
    fn test_mask_value_for_single_field() {
        assert_eq!(mask_value(&json!("hunter2secret")), json!(MASK));
        assert_eq!(mask_value(&json!("bob@example.org")), json!("b****@example.org"));
        assert_eq!(mask_value(&Value::Null), json!(MASK));
    }

    #[test]
    fn test_scalars_pass_through() {
        assert_eq!(redact(&json!("hunter2")), json!("hunter2"));
        assert_eq!(redact(&json!(42)), json!(42));
        assert_eq!(redact(&Value::Null), Value::Null);
    }

    #[derive(Serialize)]
    struct Credentials<'a> {
        email: &'a str,
        password: &'a str,
        remember: bool,
    }

    #[derive(Serialize)]
    struct Envelope<'a> {
        request: &'a Credentials<'a>,
        boxed: Box<Credentials<'a>>,
    }

    #[test]
    fn test_typed_values_through_references() {
        let creds = Credentials {
            email: "bob@corp.io",
            password: "pw",
            remember: true,
        };
        let envelope = Envelope {
            request: &creds,
            boxed: Box::new(Credentials {
                email: "c@d.org",
                password: "pw2",
                remember: false,
            }),
        };

        assert_eq!(
            redact_serialize(&envelope),
            json!({
                "request": {"email": "b****@corp.io", "password": "********", "remember": true},
                "boxed": {"email": "c****@d.org", "password": "********", "remember": false}
            })
        );
    }

    #[test]
    fn test_redacted_json_display() {
        let creds = Credentials {
            email: "bob@corp.io",
            password: "pw",
            remember: false,
        };
        let rendered = RedactedJson(&creds).to_string();
        assert!(rendered.contains("b****@corp.io"));
        assert!(!rendered.contains("\"pw\""));
    }

    #[test]
    fn test_mask_email_shapes() {
        assert_eq!(mask_email("alice@example.com"), "a****@example.com");
        assert_eq!(mask_email("a@b.com"), "a****@b.com");
        assert_eq!(mask_email("no-at-sign"), "no-at-sign");
        assert_eq!(mask_email("@b.com"), "@b.com");
        assert!(is_email(&mask_email("alice@example.com")));
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z]{1,8}@[a-z]{1,8}\\.(com|org|io)".prop_map(Value::String),
            "[ -~]{0,16}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 32, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map(
                    prop_oneof![
                        Just("password".to_string()),
                        Just("email".to_string()),
                        Just("Email".to_string()),
                        "[a-z]{1,6}",
                    ],
                    inner,
                    0..4
                )
                .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_redact_is_idempotent(value in arb_json()) {
            let once = redact(&value);
            prop_assert_eq!(redact(&once), once);
        }
    }
}
