// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie value lookup over a `name=value; name2=value2` string

/// Look up the value of cookie `name` in a cookie string.
///
/// Segments are split on `;` and trimmed; the first segment starting with
/// `name=` wins and its remainder is percent-decoded. Returns `None` when the
/// source is absent, empty, or has no matching segment.
///
/// If the value holds a `%` not followed by two hex digits, or the decoded
/// bytes are not valid UTF-8, the raw value is returned as-is.
///
/// ```
/// use csrf_relay::cookie::lookup;
///
/// let cookies = "sessionid=abc; csrftoken=tok%2B1";
/// assert_eq!(lookup("csrftoken", Some(cookies)).as_deref(), Some("tok+1"));
/// assert_eq!(lookup("csrf", Some(cookies)), None);
/// ```
pub fn lookup(name: &str, source: Option<&str>) -> Option<String> {
    let source = source.filter(|s| !s.is_empty())?;

    source
        .split(';')
        .map(str::trim)
        .find_map(|segment| segment.strip_prefix(name)?.strip_prefix('='))
        .map(decode_value)
}

/// Percent-decode a cookie value, falling back to the raw text
fn decode_value(raw: &str) -> String {
    if !is_well_formed(raw) {
        tracing::debug!(value = raw, "Cookie value has a malformed escape, keeping raw");
        return raw.to_string();
    }

    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::debug!(value = raw, error = %e, "Cookie value is not valid UTF-8 once decoded, keeping raw");
            raw.to_string()
        }
    }
}

/// Every `%` starts a two-digit hex escape
fn is_well_formed(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            match bytes.get(i + 1..i + 3) {
                Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => i += 3,
                _ => return false,
            }
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_and_empty_source() {
        assert_eq!(lookup("csrftoken", None), None);
        assert_eq!(lookup("csrftoken", Some("")), None);
        assert_eq!(lookup("csrftoken", Some("   ")), None);
    }

    #[test]
    fn test_exact_segment() {
        assert_eq!(
            lookup("csrftoken", Some("csrftoken=abc123")).as_deref(),
            Some("abc123")
        );
        assert_eq!(
            lookup("csrftoken", Some("  a=1 ;   csrftoken=xyz  ; b=2")).as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn test_prefix_collision() {
        assert_eq!(
            lookup("csrftoken", Some("csrftokenX=abc; csrftoken=real")).as_deref(),
            Some("real")
        );
        assert_eq!(lookup("csrftoken", Some("csrftokenX=abc")), None);
        assert_eq!(lookup("token", Some("csrftoken=abc")), None);
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            lookup("csrftoken", Some("csrftoken=first; csrftoken=second")).as_deref(),
            Some("first")
        );
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(
            lookup("csrftoken", Some("csrftoken=abc%20def")).as_deref(),
            Some("abc def")
        );
        assert_eq!(
            lookup("name", Some("name=J%C3%BCrgen")).as_deref(),
            Some("Jürgen")
        );
        // '+' is not a space in cookie values
        assert_eq!(lookup("v", Some("v=a+b")).as_deref(), Some("a+b"));
    }

    #[test]
    fn test_malformed_encoding_keeps_raw() {
        assert_eq!(lookup("t", Some("t=%ff")).as_deref(), Some("%ff"));
        assert_eq!(lookup("t", Some("t=%E0%A4%A")).as_deref(), Some("%E0%A4%A"));
        assert_eq!(lookup("t", Some("t=100%zz")).as_deref(), Some("100%zz"));
        assert_eq!(lookup("t", Some("t=50%")).as_deref(), Some("50%"));
    }

    #[test]
    fn test_partly_valid_encoding_keeps_whole_raw() {
        assert_eq!(lookup("t", Some("t=a%20b%zz")).as_deref(), Some("a%20b%zz"));
        assert_eq!(lookup("t", Some("t=%41%4")).as_deref(), Some("%41%4"));
        assert_eq!(lookup("t", Some("t=%41%42")).as_deref(), Some("AB"));
    }

    #[test]
    fn test_value_containing_equals() {
        assert_eq!(lookup("jwt", Some("jwt=a=b==")).as_deref(), Some("a=b=="));
    }

    #[test]
    fn test_empty_value_is_present() {
        assert_eq!(lookup("csrftoken", Some("csrftoken=")).as_deref(), Some(""));
    }

    #[test]
    fn test_segment_without_equals() {
        assert_eq!(lookup("csrftoken", Some("csrftoken; other=1")), None);
    }
}
