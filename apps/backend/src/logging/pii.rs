//! PII redaction for log output.
//!
//! Emails are the principal name in this system, so they show up in
//! most log lines; redact the local part before anything is emitted.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}").expect("valid email regex")
});

/// Redact email addresses in a string: keep the first character of the
/// local part and the full domain.
pub fn redact(input: &str) -> String {
    EMAIL
        .replace_all(input, |caps: &regex::Captures| {
            let full = &caps[0];
            match full.find('@') {
                Some(at) if at > 0 => format!("{}***{}", &full[..1], &full[at..]),
                _ => full.to_string(),
            }
        })
        .to_string()
}

/// Wrapper that redacts on Display/Debug, for ergonomic logging of
/// sensitive values.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact(self.0))
    }
}
