//! Actor extraction from the trusted identity header

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, HeaderName},
};
use tracing::debug;

use crate::api::state::AppState;

/// External actor id forwarded by the upstream identity provider
///
/// Never rejects: a missing, empty or non-UTF-8 header yields `Actor(None)`,
/// which the guard answers with `Unauthenticated`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor(pub Option<String>);

impl Actor {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let actor = extract_actor(&parts.headers, &state.actor_header);

        if actor.is_none() {
            debug!(header = %state.actor_header, "Request carries no actor");
        }

        Ok(Actor(actor))
    }
}

/// Read the actor id from `header` verbatim; an all-blank value counts as absent
pub fn extract_actor(headers: &HeaderMap, header: &HeaderName) -> Option<String> {
    headers
        .get(header)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn header() -> HeaderName {
        HeaderName::from_static("x-actor-id")
    }

    #[test]
    fn test_extract_actor() {
        let mut headers = HeaderMap::new();
        headers.insert(header(), HeaderValue::from_static("user_2NNEqL2nrIRdJ194ndJqAHwEfxC"));

        assert_eq!(
            extract_actor(&headers, &header()),
            Some("user_2NNEqL2nrIRdJ194ndJqAHwEfxC".to_string())
        );
    }

    #[test]
    fn test_missing_header() {
        assert_eq!(extract_actor(&HeaderMap::new(), &header()), None);
    }

    #[test]
    fn test_blank_header_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header(), HeaderValue::from_static("   "));

        assert_eq!(extract_actor(&headers, &header()), None);
    }

    #[test]
    fn test_actor_id_is_not_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert(header(), HeaderValue::from_static(" u1 "));

        assert_eq!(extract_actor(&headers, &header()), Some(" u1 ".to_string()));
    }

    #[test]
    fn test_non_utf8_header_is_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header(), HeaderValue::from_bytes(&[0xff, 0xfe]).unwrap());

        assert_eq!(extract_actor(&headers, &header()), None);
    }
}
