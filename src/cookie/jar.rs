// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Cookie jar holding the cookies a page has received

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// A single HTTP cookie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value, as sent by the server (still percent-encoded)
    pub value: String,
    /// Domain the cookie belongs to
    pub domain: String,
    /// Path the cookie is valid for
    pub path: String,
    /// Expiration time (None = session cookie)
    pub expires: Option<DateTime<Utc>>,
    /// Secure flag (HTTPS only)
    pub secure: bool,
    /// HttpOnly flag (hidden from page scripts)
    pub http_only: bool,
    /// SameSite attribute
    pub same_site: SameSite,
}

/// SameSite cookie attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SameSite {
    /// Cookie sent with all requests
    #[default]
    None,
    /// Cookie sent with same-site and top-level navigations
    Lax,
    /// Cookie only sent with same-site requests
    Strict,
}

impl Cookie {
    /// Create a new cookie
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: String::new(),
            path: "/".to_string(),
            expires: None,
            secure: false,
            http_only: false,
            same_site: SameSite::default(),
        }
    }

    /// Set the domain
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Set the path
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Set secure flag
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set http_only flag
    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    /// Set same_site attribute
    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = same_site;
        self
    }

    /// Set expiration time
    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    /// Check if the cookie is expired
    pub fn is_expired(&self) -> bool {
        self.expires.map_or(false, |exp| exp <= Utc::now())
    }

    /// Check if the cookie applies to the given URL
    pub fn matches(&self, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        if !self.domain.is_empty() && !domain_match(host, &self.domain) {
            return false;
        }

        if !path_match(url.path(), &self.path) {
            return false;
        }

        if self.secure && url.scheme() != "https" {
            return false;
        }

        !self.is_expired()
    }

    /// Parse a Set-Cookie header value received from `url`.
    ///
    /// Returns `None` for a nameless cookie or one whose `Domain` does not
    /// cover the host that sent it.
    pub fn parse(header: &str, url: &Url) -> Option<Self> {
        let mut parts = header.split(';');
        let first = parts.next()?.trim();

        let (name, value) = first.split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let mut cookie = Cookie::new(name, value.trim());

        // Default domain to request host
        let host = url.host_str().unwrap_or("");
        cookie.domain = host.to_lowercase();

        for part in parts {
            let part = part.trim();
            if let Some((attr, val)) = part.split_once('=') {
                let attr = attr.trim().to_lowercase();
                let val = val.trim();
                match attr.as_str() {
                    "domain" => {
                        let domain = val.trim_start_matches('.').to_lowercase();
                        if domain.is_empty() {
                            continue;
                        }
                        if !domain_match(host, &domain) {
                            tracing::debug!(%host, %domain, "Set-Cookie domain does not cover sender");
                            return None;
                        }
                        cookie.domain = domain;
                    }
                    "path" if val.starts_with('/') => cookie.path = val.to_string(),
                    "expires" => {
                        if let Ok(dt) = DateTime::parse_from_rfc2822(val) {
                            cookie.expires = Some(dt.with_timezone(&Utc));
                        }
                    }
                    "max-age" => {
                        if let Ok(secs) = val.parse::<i64>() {
                            cookie.expires = max_age_expiry(secs);
                        }
                    }
                    "samesite" => {
                        cookie.same_site = match val.to_lowercase().as_str() {
                            "strict" => SameSite::Strict,
                            "lax" => SameSite::Lax,
                            _ => SameSite::None,
                        };
                    }
                    _ => {}
                }
            } else {
                match part.to_lowercase().as_str() {
                    "secure" => cookie.secure = true,
                    "httponly" => cookie.http_only = true,
                    _ => {}
                }
            }
        }

        Some(cookie)
    }

    /// Convert to `name=value` pair format
    pub fn to_pair(&self) -> String {
        format!("{}={}", self.name, self.value)
    }
}

/// `host` equals `domain` or is a subdomain of it
fn domain_match(host: &str, domain: &str) -> bool {
    let domain = domain.trim_start_matches('.');
    if host.eq_ignore_ascii_case(domain) {
        return true;
    }
    host.len() > domain.len()
        && host[host.len() - domain.len()..].eq_ignore_ascii_case(domain)
        && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
}

/// Cookie path `cookie_path` covers `request_path` on a segment boundary
fn path_match(request_path: &str, cookie_path: &str) -> bool {
    match request_path.strip_prefix(cookie_path) {
        Some(rest) => rest.is_empty() || cookie_path.ends_with('/') || rest.starts_with('/'),
        None => false,
    }
}

/// Expiry for a `Max-Age` in seconds.
///
/// Zero or negative expires immediately; a value past chrono's range never
/// expires.
fn max_age_expiry(secs: i64) -> Option<DateTime<Utc>> {
    if secs <= 0 {
        return Some(DateTime::<Utc>::MIN_UTC);
    }
    chrono::Duration::try_seconds(secs).and_then(|age| Utc::now().checked_add_signed(age))
}

/// Thread-safe cookie storage
#[derive(Debug, Clone)]
pub struct CookieJar {
    /// Cookies stored by domain
    cookies: Arc<DashMap<String, Vec<Cookie>>>,
}

impl Default for CookieJar {
    fn default() -> Self {
        Self::new()
    }
}

impl CookieJar {
    /// Create a new empty cookie jar
    pub fn new() -> Self {
        Self {
            cookies: Arc::new(DashMap::new()),
        }
    }

    /// Add a cookie, replacing any with the same name and path.
    ///
    /// An already-expired cookie only removes its predecessor.
    pub fn add(&self, cookie: Cookie) {
        let mut entry = self.cookies.entry(cookie.domain.clone()).or_default();
        entry.retain(|c| c.name != cookie.name || c.path != cookie.path);
        if !cookie.is_expired() {
            entry.push(cookie);
        }
    }

    /// Add a cookie from a Set-Cookie header
    pub fn add_from_header(&self, header: &str, url: &Url) {
        match Cookie::parse(header, url) {
            Some(cookie) => {
                tracing::debug!(name = %cookie.name, domain = %cookie.domain, "Stored cookie");
                self.add(cookie);
            }
            None => tracing::debug!(header, "Ignoring malformed or foreign Set-Cookie"),
        }
    }

    /// Seed the jar from a `name=value; name2=value2` string for `url`'s host
    pub fn add_pairs(&self, pairs: &str, url: &Url) {
        let host = url.host_str().unwrap_or("");
        for segment in pairs.split(';') {
            if let Some((name, value)) = segment.trim().split_once('=') {
                if !name.is_empty() {
                    self.add(Cookie::new(name, value).domain(host));
                }
            }
        }
    }

    /// Get all cookies for a URL, longest path first
    pub fn get_cookies(&self, url: &Url) -> Vec<Cookie> {
        self.remove_expired();

        let mut result: Vec<Cookie> = self
            .cookies
            .iter()
            .flat_map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter(|c| c.matches(url))
                    .cloned()
                    .collect::<Vec<_>>()
            })
            .collect();

        result.sort_by(|a, b| b.path.len().cmp(&a.path.len()));
        result
    }

    /// Get Cookie header value for a URL
    pub fn get_cookie_header(&self, url: &Url) -> Option<String> {
        join_pairs(&self.get_cookies(url))
    }

    /// The cookie string a script on `url` would see.
    ///
    /// HttpOnly cookies are left out. Returns `None` when nothing is visible,
    /// the same as a page with cookies disabled.
    pub fn document_cookie(&self, url: &Url) -> Option<String> {
        let visible: Vec<Cookie> = self
            .get_cookies(url)
            .into_iter()
            .filter(|c| !c.http_only)
            .collect();
        join_pairs(&visible)
    }

    /// Remove a specific cookie
    pub fn remove(&self, name: &str, domain: &str, path: &str) {
        if let Some(mut cookies) = self.cookies.get_mut(domain) {
            cookies.retain(|c| c.name != name || c.path != path);
        }
    }

    /// Clear all cookies
    pub fn clear(&self) {
        self.cookies.clear();
    }

    fn remove_expired(&self) {
        for mut entry in self.cookies.iter_mut() {
            entry.value_mut().retain(|c| !c.is_expired());
        }
    }

    /// Get total cookie count
    pub fn len(&self) -> usize {
        self.cookies.iter().map(|e| e.value().len()).sum()
    }

    /// Check if jar is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Export all cookies as JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        let all_cookies: Vec<Cookie> = self
            .cookies
            .iter()
            .flat_map(|e| e.value().clone())
            .collect();
        serde_json::to_string(&all_cookies)
    }

    /// Import cookies from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let cookies: Vec<Cookie> = serde_json::from_str(json)?;
        let jar = CookieJar::new();
        for cookie in cookies {
            jar.add(cookie);
        }
        Ok(jar)
    }
}

fn join_pairs(cookies: &[Cookie]) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }

    Some(
        cookies
            .iter()
            .map(Cookie::to_pair)
            .collect::<Vec<_>>()
            .join("; "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_cookie_parsing() {
        let header = "csrftoken=abc123; Domain=example.com; Path=/; Secure; SameSite=Lax";
        let cookie = Cookie::parse(header, &url("https://example.com/path")).unwrap();

        assert_eq!(cookie.name, "csrftoken");
        assert_eq!(cookie.value, "abc123");
        assert_eq!(cookie.domain, "example.com");
        assert_eq!(cookie.path, "/");
        assert_eq!(cookie.same_site, SameSite::Lax);
        assert!(cookie.secure);
        assert!(!cookie.http_only);
    }

    #[test]
    fn test_parse_rejects_nameless() {
        assert!(Cookie::parse("=value", &url("https://example.com")).is_none());
        assert!(Cookie::parse("novalue", &url("https://example.com")).is_none());
    }

    #[test]
    fn test_document_cookie_hides_http_only() {
        let jar = CookieJar::new();
        let page = url("https://example.com/");
        jar.add_from_header("sessionid=s3cr3t; Path=/; HttpOnly", &page);
        jar.add_from_header("csrftoken=tok; Path=/", &page);

        assert_eq!(jar.len(), 2);
        assert_eq!(jar.document_cookie(&page).as_deref(), Some("csrftoken=tok"));

        let header = jar.get_cookie_header(&page).unwrap();
        assert!(header.contains("sessionid=s3cr3t"));
        assert!(header.contains("csrftoken=tok"));
    }

    #[test]
    fn test_document_cookie_empty_jar() {
        let jar = CookieJar::new();
        assert_eq!(jar.document_cookie(&url("https://example.com/")), None);
    }

    #[test]
    fn test_add_pairs() {
        let jar = CookieJar::new();
        let page = url("https://example.com/");
        jar.add_pairs("csrftoken=abc%20def; theme=dark; broken", &page);

        assert_eq!(jar.len(), 2);
        let cookies = jar.get_cookies(&page);
        assert!(cookies
            .iter()
            .any(|c| c.name == "csrftoken" && c.value == "abc%20def"));
    }

    #[test]
    fn test_max_age_zero_deletes() {
        let jar = CookieJar::new();
        let page = url("https://example.com/");
        jar.add_from_header("csrftoken=tok; Path=/", &page);
        jar.add_from_header("csrftoken=; Path=/; Max-Age=0", &page);

        assert!(jar.is_empty());
        assert_eq!(jar.document_cookie(&page), None);
    }

    #[test]
    fn test_domain_and_secure_matching() {
        let jar = CookieJar::new();
        jar.add(Cookie::new("a", "1").domain("example.com"));
        jar.add(Cookie::new("b", "2").domain("example.com").secure(true));
        jar.add(Cookie::new("c", "3").domain("other.org"));

        let cookies = jar.get_cookies(&url("http://www.example.com/"));
        let names: Vec<_> = cookies.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn test_longest_path_first() {
        let jar = CookieJar::new();
        jar.add(Cookie::new("csrftoken", "root").domain("example.com"));
        jar.add(
            Cookie::new("csrftoken", "app")
                .domain("example.com")
                .path("/app"),
        );

        assert_eq!(
            jar.document_cookie(&url("https://example.com/app/page")).as_deref(),
            Some("csrftoken=app; csrftoken=root")
        );
    }

    #[test]
    fn test_json_roundtrip_keeps_flags() {
        let jar = CookieJar::new();
        jar.add(Cookie::new("sessionid", "x").domain("example.com").http_only(true));

        let restored = CookieJar::from_json(&jar.to_json().unwrap()).unwrap();
        let cookies = restored.get_cookies(&url("https://example.com/"));
        assert_eq!(cookies.len(), 1);
        assert!(cookies[0].http_only);
    }

    #[test]
    fn test_huge_max_age_never_expires() {
        let jar = CookieJar::new();
        let page = url("https://example.com/");
        jar.add_from_header("csrftoken=x; Max-Age=9223372036854775807", &page);
        jar.add_from_header("other=y; Max-Age=-9223372036854775808", &page);

        let cookies = jar.get_cookies(&page);
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name, "csrftoken");
        assert_eq!(cookies[0].expires, None);
    }

    #[test]
    fn test_foreign_domain_rejected() {
        let jar = CookieJar::new();
        jar.add_from_header(
            "csrftoken=attacker; Domain=example.com; Path=/",
            &url("https://evil.test/"),
        );
        jar.add_from_header(
            "csrftoken=sibling; Domain=example.com",
            &url("https://notexample.com/"),
        );

        assert!(jar.is_empty());
        assert_eq!(jar.document_cookie(&url("https://example.com/")), None);
    }

    #[test]
    fn test_parent_domain_accepted() {
        let cookie = Cookie::parse(
            "csrftoken=tok; Domain=.Example.com",
            &url("https://app.example.com/"),
        )
        .unwrap();
        assert_eq!(cookie.domain, "example.com");
        assert!(cookie.matches(&url("https://example.com/")));
        assert!(cookie.matches(&url("https://other.example.com/")));
        assert!(!cookie.matches(&url("https://badexample.com/")));
    }

    #[test]
    fn test_path_boundary() {
        let app = Cookie::new("csrftoken", "app").domain("example.com").path("/app");
        assert!(app.matches(&url("https://example.com/app")));
        assert!(app.matches(&url("https://example.com/app/items")));
        assert!(!app.matches(&url("https://example.com/application")));
        assert!(!app.matches(&url("https://example.com/")));

        let slash = Cookie::new("csrftoken", "dir").domain("example.com").path("/app/");
        assert!(slash.matches(&url("https://example.com/app/items")));
        assert!(!slash.matches(&url("https://example.com/app")));
    }

    #[test]
    fn test_relative_path_attribute_ignored() {
        let cookie = Cookie::parse("a=1; Path=app", &url("https://example.com/x/y")).unwrap();
        assert_eq!(cookie.path, "/");
    }
}
