//! Review service: cached per-product listing plus author-gated CRUD.

use crate::cache::{cache_keys, CacheExt, CacheInterface, CacheTtl};
use crate::dto::{CreateReviewRequest, ReviewResponse, UpdateReviewRequest};
use crate::i18n::{MessageProvider, MessageProviderExt};
use async_trait::async_trait;
use emporium_core::{
    EmporiumResult, Interface, ListingParams, MessageKey, NewReview, Page, ProductId,
    RequestContext, Review, ReviewChanges, ReviewId, ValidateExt,
};
use emporium_repository::{ProductRepository, ReviewRepository};
use emporium_security::{require_authenticated, require_owner, OwnedResource};
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, info};

/// Review service trait.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ReviewService: Interface + Send + Sync {
    /// Reviews a product as the calling user.
    async fn create(
        &self,
        ctx: &RequestContext,
        request: CreateReviewRequest,
    ) -> EmporiumResult<ReviewResponse>;

    /// Gets a review by ID.
    async fn find_by_id(&self, ctx: &RequestContext, id: ReviewId)
        -> EmporiumResult<ReviewResponse>;

    /// Changes a review written by the caller.
    async fn update(
        &self,
        ctx: &RequestContext,
        id: ReviewId,
        request: UpdateReviewRequest,
    ) -> EmporiumResult<ReviewResponse>;

    /// Deletes a review written by the caller.
    async fn delete(&self, ctx: &RequestContext, id: ReviewId) -> EmporiumResult<()>;

    /// Lists a product's reviews, newest first, served through the cache.
    async fn find_by_product(
        &self,
        ctx: &RequestContext,
        product_id: ProductId,
        params: ListingParams,
    ) -> EmporiumResult<Page<ReviewResponse>>;
}

/// Review service implementation.
pub struct ReviewServiceImpl {
    reviews: Arc<dyn ReviewRepository>,
    products: Arc<dyn ProductRepository>,
    cache: Arc<dyn CacheInterface>,
    messages: Arc<dyn MessageProvider>,
    ttl: CacheTtl,
}

impl ReviewServiceImpl {
    /// Creates a new review service.
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        products: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
        messages: Arc<dyn MessageProvider>,
        ttl: CacheTtl,
    ) -> Self {
        Self {
            reviews,
            products,
            cache,
            messages,
            ttl,
        }
    }

    async fn authored_review(&self, ctx: &RequestContext, id: ReviewId) -> EmporiumResult<Review> {
        let review = self
            .reviews
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.messages.bad_request(MessageKey::ReviewNotFound, ctx.locale))?;

        require_owner(ctx, review.author(), OwnedResource::Review)
            .map_err(|denied| self.messages.denied(denied, ctx.locale))?;
        Ok(review)
    }

    async fn require_product(&self, ctx: &RequestContext, id: ProductId) -> EmporiumResult<()> {
        if self.products.exists(id).await? {
            Ok(())
        } else {
            Err(self.messages.bad_request(MessageKey::ProductNotFound, ctx.locale))
        }
    }
}

#[async_trait]
impl ReviewService for ReviewServiceImpl {
    async fn create(
        &self,
        ctx: &RequestContext,
        request: CreateReviewRequest,
    ) -> EmporiumResult<ReviewResponse> {
        debug!("Creating review for product: {}", request.product_id);

        let author = require_authenticated(ctx)
            .map_err(|denied| self.messages.denied(denied, ctx.locale))?;
        request.validate_request()?;
        self.require_product(ctx, request.product_id).await?;

        let review = self
            .reviews
            .save(&NewReview {
                product_id: request.product_id,
                user_id: author,
                rating: request.rating,
                comment: request.comment,
            })
            .await?;

        info!("Review created: {}", review.id);
        Ok(ReviewResponse::from(review))
    }

    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: ReviewId,
    ) -> EmporiumResult<ReviewResponse> {
        debug!("Getting review: {}", id);

        self.reviews
            .find_by_id(id)
            .await?
            .map(ReviewResponse::from)
            .ok_or_else(|| self.messages.not_found(MessageKey::ReviewNotFound, ctx.locale))
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: ReviewId,
        request: UpdateReviewRequest,
    ) -> EmporiumResult<ReviewResponse> {
        debug!("Updating review: {}", id);

        request.validate_request()?;
        self.authored_review(ctx, id).await?;

        let changes = ReviewChanges::from(request);
        if !self.reviews.update(id, &changes).await? {
            return Err(self.messages.no_rows_affected(ctx.locale));
        }

        info!("Review updated: {}", id);
        self.reviews
            .find_by_id(id)
            .await?
            .map(ReviewResponse::from)
            .ok_or_else(|| self.messages.no_rows_affected(ctx.locale))
    }

    async fn delete(&self, ctx: &RequestContext, id: ReviewId) -> EmporiumResult<()> {
        debug!("Deleting review: {}", id);

        self.authored_review(ctx, id).await?;
        if !self.reviews.delete(id).await? {
            return Err(self.messages.no_rows_affected(ctx.locale));
        }

        info!("Review deleted: {}", id);
        Ok(())
    }

    async fn find_by_product(
        &self,
        ctx: &RequestContext,
        product_id: ProductId,
        params: ListingParams,
    ) -> EmporiumResult<Page<ReviewResponse>> {
        let query = params
            .into_review_query(product_id)
            .map_err(|key| self.messages.bad_request(key, ctx.locale))?;
        debug!("Listing reviews: {:?}", query);

        let key = cache_keys::review_listing(&query);
        if let Some(cached) = self.cache.fetch::<Page<ReviewResponse>>(&key).await {
            return Ok(cached);
        }

        self.require_product(ctx, product_id).await?;

        counter!("emporium_listing_queries_total", "entity" => "review").increment(1);
        let page = self
            .reviews
            .find_page(&query)
            .await?
            .map(ReviewResponse::from);

        self.cache.store(&key, &page, self.ttl.listing).await;
        Ok(page)
    }
}

impl std::fmt::Debug for ReviewServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewServiceImpl")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
