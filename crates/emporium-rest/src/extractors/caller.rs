//! Caller extractor.

use emporium_core::RequestContext;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

/// The [`RequestContext`] placed by the request context middleware.
///
/// Never rejects: without the middleware the caller is anonymous in the
/// default locale.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub RequestContext);

impl std::ops::Deref for Caller {
    type Target = RequestContext;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts
            .extensions
            .get::<RequestContext>()
            .copied()
            .unwrap_or_default();
        Ok(Caller(ctx))
    }
}
