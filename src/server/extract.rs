//! Request principal extraction
//!
//! Reads credentials from the request headers, resolves them into
//! [`Principals`] and enforces CSRF protection for session callers on
//! state-changing methods.

use crate::access_control::Principals;
use crate::auth::RequestContext;
use crate::error::AccessError;
use crate::error::http_mapper::ApiError;
use crate::server::state::AppState;
use crate::util::SecretString;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, header};
use tracing::debug;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "session";
/// Header alternative to the session cookie
pub const SESSION_HEADER: &str = "x-session-id";
/// Header carrying the session's CSRF token
pub const CSRF_HEADER: &str = "x-csrf-token";

/// The principals behind a request
#[derive(Debug, Clone)]
pub struct Caller(pub Principals);

impl FromRequestParts<AppState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let ctx = request_context(&parts.headers);
        let principals = state.resolver.resolve(&ctx);

        if principals.session.is_some()
            && !is_safe_method(&parts.method)
            && !state.resolver.verify_csrf(&ctx)
        {
            debug!(method = %parts.method, "Rejecting session request without valid CSRF token");
            return Err(AccessError::InvalidCsrfToken.into());
        }

        Ok(Caller(principals))
    }
}

/// Collect the raw credentials presented in `headers`
pub fn request_context(headers: &HeaderMap) -> RequestContext {
    RequestContext {
        session_id: session_id(headers).map(SecretString::new),
        bearer_token: bearer_token(headers).map(SecretString::new),
        csrf_token: header_str(headers, CSRF_HEADER).map(str::to_string),
    }
}

fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = header_str(headers, header::AUTHORIZATION.as_str())?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn session_id(headers: &HeaderMap) -> Option<&str> {
    let from_cookie = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value);

    from_cookie.or_else(|| header_str(headers, SESSION_HEADER))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers(&[("authorization", "Bearer abc")])), Some("abc"));
        assert_eq!(bearer_token(&headers(&[("authorization", "bearer abc")])), Some("abc"));
        assert_eq!(bearer_token(&headers(&[("authorization", "Basic abc")])), None);
        assert_eq!(bearer_token(&headers(&[("authorization", "Bearer ")])), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_session_from_cookie() {
        let h = headers(&[("cookie", "theme=dark; session=s-123; lang=en")]);
        assert_eq!(session_id(&h), Some("s-123"));
    }

    #[test]
    fn test_session_from_multiple_cookie_headers() {
        let h = headers(&[("cookie", "theme=dark"), ("cookie", "session=s-9")]);
        assert_eq!(session_id(&h), Some("s-9"));
    }

    #[test]
    fn test_session_from_header() {
        let h = headers(&[("x-session-id", "s-456")]);
        assert_eq!(session_id(&h), Some("s-456"));
    }

    #[test]
    fn test_cookie_wins_over_header() {
        let h = headers(&[("cookie", "session=from-cookie"), ("x-session-id", "from-header")]);
        assert_eq!(session_id(&h), Some("from-cookie"));
    }

    #[test]
    fn test_request_context() {
        let ctx = request_context(&headers(&[
            ("authorization", "Bearer tok"),
            ("x-csrf-token", "csrf"),
        ]));
        assert_eq!(ctx.bearer_token.unwrap().expose_secret(), "tok");
        assert_eq!(ctx.csrf_token.as_deref(), Some("csrf"));
        assert!(ctx.session_id.is_none());
    }

    #[test]
    fn test_safe_methods() {
        assert!(is_safe_method(&Method::GET));
        assert!(is_safe_method(&Method::HEAD));
        assert!(!is_safe_method(&Method::PUT));
        assert!(!is_safe_method(&Method::POST));
    }
}
