use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::logging::redaction::mask_email;

/// Regex patterns used to find PII inside free text.
pub struct PiiRegexRegistry;

impl PiiRegexRegistry {
    pub fn email() -> &'static Regex {
        static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap()
        });
        &EMAIL_REGEX
    }

    /// Base64-like runs of 16 or more characters (JWT segments, digests)
    pub fn base64_token() -> &'static Regex {
        static BASE64_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Za-z0-9+/_-]{16,}={0,2}").unwrap()
        });
        &BASE64_TOKEN_REGEX
    }

    pub fn hex_token() -> &'static Regex {
        static HEX_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
            #[allow(clippy::unwrap_used)]
            Regex::new(r"\b[A-Fa-f0-9]{16,}\b").unwrap()
        });
        &HEX_TOKEN_REGEX
    }
}

/// Redacts sensitive information from free text such as error messages.
///
/// Emails keep their first character and domain. Opaque token-like runs
/// are replaced with `[REDACTED_TOKEN]`. Emails are handled first so a long
/// local part is not reported as a token.
pub fn redact_text(input: &str) -> String {
    let email_redacted = PiiRegexRegistry::email()
        .replace_all(input, |caps: &regex::Captures| mask_email(&caps[0]));

    let base64_redacted =
        PiiRegexRegistry::base64_token().replace_all(&email_redacted, "[REDACTED_TOKEN]");

    PiiRegexRegistry::hex_token()
        .replace_all(&base64_redacted, "[REDACTED_TOKEN]")
        .to_string()
}

/// Formats the wrapped string through [`redact_text`].
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact_text(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact_text(self.0))
    }
}
