//! Scrubbing of caller addresses from upstream error text
//!
//! GitHub's anonymous rate-limit message reads
//! `API rate limit exceeded for 203.0.113.7. (But here's the good news: ...)`.
//! The address is the caller's own and is dropped before the message is shown.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

const OCTET: &str = r"(25[0-5]|2[0-4][0-9]|1[0-9][0-9]|[1-9]?[0-9])";

static FOR_IPV4: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(r"for \b{OCTET}\.{OCTET}\.{OCTET}\.{OCTET}\b");
    Regex::new(&pattern).expect("IPv4 pattern is valid")
});

/// Remove every `for <dotted quad>` occurrence from `message`
pub fn scrub_ip(message: &str) -> Cow<'_, str> {
    FOR_IPV4.replace_all(message, "")
}
