//! Single-host extraction from inventory entries
//!
//! Best-effort string transform that turns the first usable entry of an
//! inventory section into a bare hostname. Ports and wrapping brackets are
//! stripped, range patterns are left unexpanded, and nothing is validated as
//! a legal hostname or address.

use tracing::{debug, instrument};

/// Return the hostname of the first entry that yields a non-empty one
#[instrument(skip(entries))]
pub fn extract_hostname<I, S>(entries: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for entry in entries {
        let entry = entry.as_ref().trim();
        if entry.is_empty() {
            continue;
        }

        let Some(token) = entry.split_whitespace().next() else {
            continue;
        };

        let hostname = canonical_hostname(token);
        debug!("Entry '{}' resolved to hostname '{}'", entry, hostname);

        if !hostname.is_empty() {
            return Some(hostname.to_string());
        }
    }

    None
}

/// Reduce a host token to its canonical hostname
///
/// The token is unwrapped from `(...)` or `[...]`, re-split on whitespace,
/// then its port suffix is removed according to the colon/bracket layout.
#[must_use]
pub fn canonical_hostname(token: &str) -> &str {
    let unwrapped = unwrap_token(token);
    let hostname = unwrapped.split_whitespace().next().unwrap_or("");
    strip_port(hostname)
}

fn unwrap_token(token: &str) -> &str {
    if let Some(inner) = token
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return inner;
    }

    if let Some(inner) = token
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return inner;
    }

    // [addr]:port
    if let Some(rest) = token.strip_prefix('[') {
        if let Some((inner, port)) = rest.rsplit_once("]:") {
            if !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) {
                return inner;
            }
        }
    }

    token
}

fn strip_port(hostname: &str) -> &str {
    let colons = hostname.matches(':').count();
    let last_colon = hostname.rfind(':');
    let last_close = hostname.rfind(']');

    if colons > 1 {
        // IPv6 literal or several ranges; a single dot marks a trailing suffix
        if hostname.matches('.').count() == 1 {
            if let Some(dot) = hostname.rfind('.') {
                return &hostname[..dot];
            }
        }
        return hostname;
    }

    let bracket_before_port = hostname.contains('[')
        && matches!((last_close, last_colon), (Some(close), Some(colon)) if close < colon);
    let bare_port = last_close.is_none() && last_colon.is_some();

    match last_colon {
        Some(colon) if bracket_before_port || bare_port => &hostname[..colon],
        _ => hostname,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_hostname_unchanged() {
        assert_eq!(canonical_hostname("web01.example.com"), "web01.example.com");
        assert_eq!(canonical_hostname("10.0.0.5"), "10.0.0.5");
    }

    #[test]
    fn test_host_with_port() {
        assert_eq!(canonical_hostname("host1:22"), "host1");
        assert_eq!(canonical_hostname("10.0.0.5:2222"), "10.0.0.5");
    }

    #[test]
    fn test_bracketed_ipv6_with_port() {
        assert_eq!(canonical_hostname("[2001:db8::1]:22"), "2001:db8::1");
    }

    #[test]
    fn test_bracketed_ipv6_without_port() {
        assert_eq!(canonical_hostname("[2001:db8::1]"), "2001:db8::1");
    }

    #[test]
    fn test_bare_ipv6_unchanged() {
        assert_eq!(canonical_hostname("2001:db8::1"), "2001:db8::1");
    }

    #[test]
    fn test_ipv6_with_single_dot_suffix_truncated() {
        assert_eq!(canonical_hostname("2001:db8::1.example"), "2001:db8::1");
    }

    #[test]
    fn test_ipv6_with_several_dots_unchanged() {
        assert_eq!(
            canonical_hostname("2001:db8::1.example.com"),
            "2001:db8::1.example.com"
        );
    }

    #[test]
    fn test_parenthesised_range_takes_first_host() {
        assert_eq!(canonical_hostname("(web01 web02 web03)"), "web01");
    }

    #[test]
    fn test_range_pattern_not_expanded() {
        assert_eq!(canonical_hostname("web[01:10].example.com"), "web[01:10].example.com");
    }

    #[test]
    fn test_multi_colon_range_with_port_unchanged() {
        assert_eq!(canonical_hostname("web[01:10]:2222"), "web[01:10]:2222");
    }

    #[test]
    fn test_single_colon_range_with_port() {
        assert_eq!(canonical_hostname("web[01-10]:2222"), "web[01-10]");
    }

    #[test]
    fn test_extract_first_entry_ignores_variables() {
        let entries = ["web01 ansible_host=10.0.0.1 ansible_port=22", "web02"];
        assert_eq!(extract_hostname(entries), Some("web01".to_string()));
    }

    #[test]
    fn test_extract_skips_blank_entries() {
        let entries = ["", "   ", "\t", "db01:5432 role=primary"];
        assert_eq!(extract_hostname(entries), Some("db01".to_string()));
    }

    #[test]
    fn test_extract_splits_entry_before_unwrapping() {
        let entries = ["(web01 web02 web03)"];
        assert_eq!(extract_hostname(entries), Some("(web01".to_string()));
    }

    #[test]
    fn test_extract_from_blank_section() {
        let entries = ["", "   ", "\t"];
        assert_eq!(extract_hostname(entries), None);
    }

    #[test]
    fn test_extract_from_empty_section() {
        let entries: Vec<String> = Vec::new();
        assert_eq!(extract_hostname(&entries), None);
    }

    #[test]
    fn test_extract_skips_entries_reducing_to_nothing() {
        let entries = ["()", ":22", "app01"];
        assert_eq!(extract_hostname(entries), Some("app01".to_string()));
    }
}
