//! Cookie-based session identification

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::api::state::AppState;
use crate::api::types::ApiError;

/// Session id attached to the request by `session_middleware`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId(pub Uuid);

/// Resolve the session cookie, minting a new id when it is absent or
/// malformed. New ids are returned to the browser via `Set-Cookie`.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let existing = session_from_cookies(request.headers(), &state.cookie_name);

    let (id, is_new) = match existing {
        Some(id) => (id, false),
        None => (Uuid::new_v4(), true),
    };

    request.extensions_mut().insert(SessionId(id));

    let mut response = next.run(request).await;

    if is_new {
        debug!(session_id = %id, "Issuing session cookie");

        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            state.cookie_name, id
        );

        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

fn session_from_cookies(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

impl<S> FromRequestParts<S> for SessionId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionId>()
            .copied()
            .ok_or_else(|| ApiError::internal("Session middleware is not installed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_named_cookie() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("theme=dark; diamond_session={}; other=1", id)
                .parse()
                .unwrap(),
        );

        assert_eq!(session_from_cookies(&headers, "diamond_session"), Some(id));
    }

    #[test]
    fn test_ignores_other_cookies_and_bad_ids() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "diamond_session=not-a-uuid".parse().unwrap());
        assert_eq!(session_from_cookies(&headers, "diamond_session"), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "session=abc".parse().unwrap());
        assert_eq!(session_from_cookies(&headers, "diamond_session"), None);

        assert_eq!(session_from_cookies(&HeaderMap::new(), "diamond_session"), None);
    }

    #[test]
    fn test_multiple_cookie_headers() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, "a=1".parse().unwrap());
        headers.append(
            header::COOKIE,
            format!("diamond_session={}", id).parse().unwrap(),
        );

        assert_eq!(session_from_cookies(&headers, "diamond_session"), Some(id));
    }
}
