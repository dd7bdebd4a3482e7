// ABOUTME: Signed-cookie session guard deciding access to protected views.
// ABOUTME: Verifies the Express cookie-signature format `s:<value>.<base64 HMAC-SHA256>`; never decodes the payload.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use base64::Engine;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use cookie::Cookie;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::config::CookieProps;

type HmacSha256 = Hmac<Sha256>;

const SIGNED_PREFIX: &str = "s:";

/// Outcome of checking a request for the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Cookie present with a good signature; carries the opaque token.
    Valid(String),
    /// No session cookie (or an empty token).
    Missing,
    /// Cookie present but unsigned or with a signature that does not match.
    Invalid,
}

impl SessionStatus {
    pub fn is_valid(&self) -> bool {
        matches!(self, SessionStatus::Valid(_))
    }
}

/// Checks the named signed cookie against the server-held secret.
#[derive(Clone)]
pub struct SessionGuard {
    cookie_name: String,
    mac: HmacSha256,
}

impl SessionGuard {
    pub fn new(cookie_name: impl Into<String>, secret: &str) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            mac: HmacSha256::new_from_slice(secret.as_bytes())
                .expect("HMAC can take a key of any size"),
        }
    }

    pub fn from_props(props: &CookieProps) -> Self {
        Self::new(props.name.clone(), &props.secret)
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Look for the session cookie in every `Cookie` header and verify it.
    /// The first occurrence of the name wins.
    pub fn verify(&self, headers: &HeaderMap) -> SessionStatus {
        let raw = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| Cookie::split_parse_encoded(value))
            .filter_map(Result::ok)
            .find(|c| c.name() == self.cookie_name)
            .map(|c| c.value().to_string());

        match raw {
            None => SessionStatus::Missing,
            Some(value) => match value.strip_prefix(SIGNED_PREFIX) {
                None => SessionStatus::Invalid,
                Some(signed) => match self.unsign(signed) {
                    None => SessionStatus::Invalid,
                    Some(token) if token.is_empty() => SessionStatus::Missing,
                    Some(token) => SessionStatus::Valid(token),
                },
            },
        }
    }

    /// Produce the cookie value a co-hosted issuer would set for `value`.
    pub fn sign(&self, value: &str) -> String {
        format!(
            "{}{}.{}",
            SIGNED_PREFIX,
            value,
            STANDARD_NO_PAD.encode(self.signature(value))
        )
    }

    fn signature(&self, value: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(value.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    fn unsign(&self, signed: &str) -> Option<String> {
        let (value, signature) = signed.rsplit_once('.')?;
        let signature = STANDARD_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(value.as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn guard() -> SessionGuard {
        SessionGuard::new("ExpressGeneratorTs", "cookie-secret")
    }

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn missing_when_no_cookie_header() {
        assert_eq!(guard().verify(&HeaderMap::new()), SessionStatus::Missing);
    }

    #[test]
    fn missing_when_other_cookies_only() {
        assert_eq!(guard().verify(&headers("theme=dark; lang=en")), SessionStatus::Missing);
    }

    #[test]
    fn valid_signed_cookie_yields_token() {
        let g = guard();
        let cookie = format!("theme=dark; ExpressGeneratorTs={}", g.sign("jwt-token"));

        let status = g.verify(&headers(&cookie));
        assert_eq!(status, SessionStatus::Valid("jwt-token".to_string()));
        assert!(status.is_valid());
    }

    #[test]
    fn percent_encoded_cookie_is_decoded() {
        let g = guard();
        let encoded = g
            .sign("a.b.c")
            .replace(':', "%3A")
            .replace('+', "%2B")
            .replace('/', "%2F");
        let cookie = format!("ExpressGeneratorTs={}", encoded);

        assert_eq!(
            g.verify(&headers(&cookie)),
            SessionStatus::Valid("a.b.c".to_string())
        );
    }

    #[test]
    fn unsigned_cookie_is_invalid() {
        assert_eq!(
            guard().verify(&headers("ExpressGeneratorTs=plain-token")),
            SessionStatus::Invalid
        );
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let other = SessionGuard::new("ExpressGeneratorTs", "another-secret");
        let cookie = format!("ExpressGeneratorTs={}", other.sign("jwt-token"));

        assert_eq!(guard().verify(&headers(&cookie)), SessionStatus::Invalid);
    }

    #[test]
    fn tampered_value_is_invalid() {
        let g = guard();
        let signed = g.sign("user-1");
        let tampered = signed.replacen("user-1", "user-2", 1);
        let cookie = format!("ExpressGeneratorTs={}", tampered);

        assert_eq!(g.verify(&headers(&cookie)), SessionStatus::Invalid);
    }

    #[test]
    fn signature_without_separator_is_invalid() {
        assert_eq!(
            guard().verify(&headers("ExpressGeneratorTs=s:nosignature")),
            SessionStatus::Invalid
        );
    }

    #[test]
    fn empty_signed_token_counts_as_missing() {
        let g = guard();
        let cookie = format!("ExpressGeneratorTs={}", g.sign(""));
        assert_eq!(g.verify(&headers(&cookie)), SessionStatus::Missing);
    }

    #[test]
    fn signature_matches_cookie_signature_format() {
        // Reference value produced by the `cookie-signature` npm package:
        // sign("hello", "tobiiscool")
        let g = SessionGuard::new("sid", "tobiiscool");
        assert_eq!(
            g.sign("hello"),
            "s:hello.DGDUkGlIkCzPz+C0B064FNgHdEjox7ch8tOBGslZ5QI"
        );
    }

    #[test]
    fn cookie_in_second_header_is_found() {
        let g = guard();
        let mut map = HeaderMap::new();
        map.append(COOKIE, HeaderValue::from_static("theme=dark"));
        map.append(
            COOKIE,
            HeaderValue::from_str(&format!("ExpressGeneratorTs={}", g.sign("t"))).unwrap(),
        );

        assert_eq!(g.verify(&map), SessionStatus::Valid("t".to_string()));
    }
}
