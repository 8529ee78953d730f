//! Cookie Management Infrastructure
//!
//! Building `Set-Cookie` strings, reading cookies back out of request
//! headers, and a cookie jar abstraction for the client tier.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Duration, Utc};

/// `Expires` value that is always in the past
pub const EXPIRED_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Browsers clamp cookie lifetimes to 400 days
pub const MAX_COOKIE_AGE_DAYS: i64 = 400;

/// SameSite policy for cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SameSite {
    Strict,
    #[default]
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }

    /// Case-insensitive parse of `strict` / `lax` / `none`
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "strict" => Some(SameSite::Strict),
            "lax" => Some(SameSite::Lax),
            "none" => Some(SameSite::None),
            _ => None,
        }
    }
}

/// Cookie configuration
///
/// The session cookie is written from page script, so it is never
/// `HttpOnly`.
#[derive(Debug, Clone)]
pub struct CookieConfig {
    pub name: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
    pub max_age: Duration,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            name: "authentications".to_string(),
            secure: false,
            same_site: SameSite::Lax,
            path: "/".to_string(),
            max_age: Duration::days(7),
        }
    }
}

impl CookieConfig {
    /// Build a `Set-Cookie` value expiring `max_age` after `now`.
    ///
    /// `value` is URL-encoded here; callers pass the plain JSON. Lifetimes
    /// above [`MAX_COOKIE_AGE_DAYS`] are clamped.
    pub fn build_set_cookie(&self, value: &str, now: DateTime<Utc>) -> String {
        let max_age = self.max_age.min(Duration::days(MAX_COOKIE_AGE_DAYS));
        let expires = now
            .checked_add_signed(max_age)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut cookie = format!("{}={}", self.name, encode_cookie_value(value));

        cookie.push_str(&format!("; Path={}", self.path));
        cookie.push_str(&format!("; Expires={}", http_date(expires)));
        cookie.push_str(&format!("; Max-Age={}", max_age.num_seconds()));
        cookie.push_str(&format!("; SameSite={}", self.same_site.as_str()));
        if self.secure {
            cookie.push_str("; Secure");
        }

        cookie
    }

    /// Build `Set-Cookie` for deletion (already expired)
    pub fn build_delete_cookie(&self) -> String {
        format!(
            "{}=; Path={}; Expires={}; Max-Age=0",
            self.name, self.path, EXPIRED_HTTP_DATE
        )
    }
}

/// RFC 7231 IMF-fixdate
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

pub fn encode_cookie_value(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Undo [`encode_cookie_value`]. `None` when the escapes are not UTF-8.
pub fn decode_cookie_value(raw: &str) -> Option<String> {
    urlencoding::decode(raw).ok().map(|value| value.into_owned())
}

/// Extract a raw (still encoded) cookie value from headers
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

// ============================================================================
// Client-side cookie jar
// ============================================================================

/// The page's cookie store, as script sees it through `document.cookie`.
///
/// Writes take a full `Set-Cookie` style string; a write whose expiry is
/// already in the past removes the cookie.
pub trait CookieJar: Send + Sync {
    fn write(&self, set_cookie: &str);

    /// Raw (encoded) value of a live cookie
    fn read(&self, name: &str) -> Option<String>;

    /// `Cookie` request header the browser would send, if any cookie is set
    fn cookie_header(&self) -> Option<String>;
}

/// In-memory [`CookieJar`] used off-browser and in tests
#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    cookies: Mutex<BTreeMap<String, String>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CookieJar for MemoryCookieJar {
    fn write(&self, set_cookie: &str) {
        let Some(parsed) = ParsedSetCookie::parse(set_cookie) else {
            tracing::debug!("Ignoring unparseable cookie write");
            return;
        };

        let mut cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        if parsed.is_expired(Utc::now()) {
            cookies.remove(&parsed.name);
        } else {
            cookies.insert(parsed.name, parsed.value);
        }
    }

    fn read(&self, name: &str) -> Option<String> {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn cookie_header(&self) -> Option<String> {
        let cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        if cookies.is_empty() {
            return None;
        }
        let pairs: Vec<String> = cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect();
        Some(pairs.join("; "))
    }
}

/// The parts of a `Set-Cookie` string a jar cares about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSetCookie {
    pub name: String,
    pub value: String,
    pub expires: Option<DateTime<Utc>>,
    pub max_age: Option<i64>,
}

impl ParsedSetCookie {
    pub fn parse(set_cookie: &str) -> Option<Self> {
        let mut parts = set_cookie.split(';');
        let (name, value) = parts.next()?.trim().split_once('=')?;
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let mut expires = None;
        let mut max_age = None;
        for attribute in parts {
            let Some((key, attr_value)) = attribute.trim().split_once('=') else {
                continue;
            };
            match key.trim().to_ascii_lowercase().as_str() {
                "expires" => {
                    expires = DateTime::parse_from_rfc2822(attr_value.trim())
                        .ok()
                        .map(|at| at.with_timezone(&Utc));
                }
                "max-age" => max_age = attr_value.trim().parse().ok(),
                _ => {}
            }
        }

        Some(Self {
            name: name.to_string(),
            value: value.trim().to_string(),
            expires,
            max_age,
        })
    }

    /// `Max-Age` wins over `Expires` (RFC 6265 §5.3)
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        if let Some(max_age) = self.max_age {
            return max_age <= 0;
        }
        self.expires.is_some_and(|at| at <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_cookie_config_build() {
        let config = CookieConfig::default();

        let cookie = config.build_set_cookie(r#"{"access_token":"abc"}"#, fixed_now());
        assert!(cookie.starts_with("authentications=%7B%22access_token%22%3A%22abc%22%7D"));
        assert!(cookie.contains("; Path=/"));
        assert!(cookie.contains("; Expires=Mon, 09 Mar 2026 08:30:00 GMT"));
        assert!(cookie.contains("; Max-Age=604800"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("HttpOnly"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_secure_cookie() {
        let config = CookieConfig {
            secure: true,
            same_site: SameSite::Strict,
            ..CookieConfig::default()
        };
        let cookie = config.build_set_cookie("v", fixed_now());
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.ends_with("; Secure"));
    }

    #[test]
    fn test_oversized_max_age_is_clamped() {
        let config = CookieConfig {
            max_age: Duration::days(100_000_000),
            ..CookieConfig::default()
        };
        let cookie = config.build_set_cookie("v", fixed_now());
        assert!(cookie.contains("; Max-Age=34560000"));
        assert!(cookie.contains("; Expires=Tue, 06 Apr 2027 08:30:00 GMT"));
    }

    #[test]
    fn test_delete_cookie_is_expired() {
        let config = CookieConfig::default();
        let parsed = ParsedSetCookie::parse(&config.build_delete_cookie()).unwrap();
        assert_eq!(parsed.name, "authentications");
        assert_eq!(parsed.value, "");
        assert!(parsed.is_expired(fixed_now()));
    }

    #[test]
    fn test_extract_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("foo=bar; authentications=abc123; other=xyz"),
        );

        assert_eq!(
            extract_cookie(&headers, "authentications"),
            Some("abc123".to_string())
        );
        assert_eq!(extract_cookie(&headers, "foo"), Some("bar".to_string()));
        assert_eq!(extract_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_extract_cookie_keeps_json_intact() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static(r#"authentications={"access_token":"a=b"}"#),
        );
        assert_eq!(
            extract_cookie(&headers, "authentications").as_deref(),
            Some(r#"{"access_token":"a=b"}"#)
        );
    }

    #[test]
    fn test_encode_decode() {
        let json = r#"{"access_token":"abc; def","first_name":"Zoë"}"#;
        let encoded = encode_cookie_value(json);
        assert!(!encoded.contains(';'));
        assert_eq!(decode_cookie_value(&encoded).as_deref(), Some(json));
        assert_eq!(decode_cookie_value("not-json").as_deref(), Some("not-json"));
        assert_eq!(decode_cookie_value("%FF"), None);
    }

    #[test]
    fn test_memory_jar_write_and_expire() {
        let jar = MemoryCookieJar::new();
        let config = CookieConfig::default();

        jar.write(&config.build_set_cookie("hello", Utc::now()));
        assert_eq!(jar.read("authentications").as_deref(), Some("hello"));
        assert_eq!(
            jar.cookie_header().as_deref(),
            Some("authentications=hello")
        );

        jar.write(&config.build_delete_cookie());
        assert_eq!(jar.read("authentications"), None);
        assert!(jar.is_empty());
        assert_eq!(jar.cookie_header(), None);
    }

    #[test]
    fn test_memory_jar_past_expires_without_max_age() {
        let jar = MemoryCookieJar::new();
        jar.write("theme=dark; Path=/");
        jar.write(&format!("theme=; Path=/; Expires={EXPIRED_HTTP_DATE}"));
        assert_eq!(jar.read("theme"), None);
    }

    #[test]
    fn test_memory_jar_ignores_garbage() {
        let jar = MemoryCookieJar::new();
        jar.write("no-equals-sign");
        jar.write("=value-without-name");
        assert!(jar.is_empty());
    }

    #[test]
    fn test_same_site_parse() {
        assert_eq!(SameSite::parse("STRICT"), Some(SameSite::Strict));
        assert_eq!(SameSite::parse("lax"), Some(SameSite::Lax));
        assert_eq!(SameSite::parse("bogus"), None);
    }
}
