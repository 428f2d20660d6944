pub mod pii;
pub mod redaction;
pub mod security;

pub use pii::{redact_text, Redacted};
pub use redaction::{redact, redact_serialize, RedactedJson};
