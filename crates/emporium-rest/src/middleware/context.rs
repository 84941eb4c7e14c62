//! Builds the per-request [`RequestContext`].
//!
//! The caller's locale is negotiated from `Accept-Language` and falls back
//! to the configured default. A valid bearer token adds the user id and
//! role. An invalid or expired token leaves the request anonymous; handlers
//! whose operation needs a user reject it with `401`.

use emporium_core::{Locale, RequestContext};
use emporium_security::TokenProvider;
use axum::{
    body::Body,
    extract::State,
    http::{
        header::{ACCEPT_LANGUAGE, AUTHORIZATION},
        HeaderMap, Request,
    },
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// State for [`request_context_middleware`].
#[derive(Clone)]
pub struct ContextMiddlewareState {
    pub token_provider: Arc<TokenProvider>,
    pub default_locale: Locale,
}

impl ContextMiddlewareState {
    /// Creates the middleware state.
    pub fn new(token_provider: Arc<TokenProvider>, default_locale: Locale) -> Self {
        Self {
            token_provider,
            default_locale,
        }
    }

    /// Resolves the caller from request headers.
    #[must_use]
    pub fn resolve(&self, headers: &HeaderMap) -> RequestContext {
        let locale = headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|h| h.to_str().ok())
            .and_then(Locale::negotiate)
            .unwrap_or(self.default_locale);

        let token = headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "));

        match token.map(|t| self.token_provider.validate(t)) {
            Some(Ok(claims)) => {
                debug!("Authenticated user: {}", claims.user_id);
                claims.context(locale)
            }
            Some(Err(e)) => {
                debug!("Token validation failed: {}", e);
                RequestContext::anonymous(locale)
            }
            None => RequestContext::anonymous(locale),
        }
    }
}

/// Inserts the resolved [`RequestContext`] into the request extensions.
pub async fn request_context_middleware(
    State(state): State<ContextMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let ctx = state.resolve(request.headers());
    request.extensions_mut().insert(ctx);
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use emporium_config::SecurityConfig;
    use emporium_core::{User, UserId, UserRole};

    fn state() -> ContextMiddlewareState {
        let config = SecurityConfig {
            jwt_secret: "test-secret-key-for-testing-only".to_string(),
            ..SecurityConfig::default()
        };
        ContextMiddlewareState::new(Arc::new(TokenProvider::new(Arc::new(config))), Locale::En)
    }

    fn user() -> User {
        let now = chrono::Utc::now();
        User {
            id: UserId(3),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password_hash: String::new(),
            role: UserRole::Customer,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_no_headers_is_anonymous_default_locale() {
        let ctx = state().resolve(&HeaderMap::new());
        assert_eq!(ctx, RequestContext::anonymous(Locale::En));
    }

    #[test]
    fn test_bearer_token_and_language() {
        let state = state();
        let token = state.token_provider.issue(&user()).unwrap().token;

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("pt-BR,en;q=0.5"));

        let ctx = state.resolve(&headers);
        assert_eq!(ctx.user_id, Some(UserId(3)));
        assert_eq!(ctx.locale, Locale::PtBr);
    }

    #[test]
    fn test_invalid_token_is_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("fr, pt"));

        let ctx = state().resolve(&headers);
        assert!(!ctx.is_authenticated());
        assert_eq!(ctx.locale, Locale::PtBr);
    }
}
