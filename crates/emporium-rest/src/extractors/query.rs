//! Query-string extractor with localized rejections.

use crate::responses::AppError;
use emporium_core::{MessageKey, RequestContext};
use emporium_service::{MessageProviderExt, StaticMessages};
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Like [`Query`], but a malformed query string is answered with the
/// standard error body (`400`, `request.invalid_query`) in the caller's
/// locale instead of axum's plain-text rejection.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParams<T>(pub T);

impl<T> std::ops::Deref for QueryParams<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => {
                debug!("Rejected query string: {}", rejection.body_text());
                let locale = parts
                    .extensions
                    .get::<RequestContext>()
                    .map(|ctx| ctx.locale)
                    .unwrap_or_default();
                Err(AppError(
                    StaticMessages.bad_request(MessageKey::InvalidQueryParameters, locale),
                ))
            }
        }
    }
}
