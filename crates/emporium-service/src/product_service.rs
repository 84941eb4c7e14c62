//! Product service: the cached listing engine plus owner-gated CRUD.

use crate::cache::{cache_keys, CacheExt, CacheInterface, CacheTtl};
use crate::dto::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::i18n::{MessageProvider, MessageProviderExt};
use async_trait::async_trait;
use emporium_core::{
    CategoryId, CompanyId, EmporiumResult, Interface, ListingParams, MessageKey, Page, Product,
    ProductId, RequestContext, ValidateExt,
};
use emporium_repository::{CategoryRepository, CompanyRepository, ProductRepository};
use emporium_security::{require_owner, OwnedResource};
use metrics::counter;
use std::sync::Arc;
use tracing::{debug, info};

/// Product service trait.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ProductService: Interface + Send + Sync {
    /// Lists a product under a company the caller owns.
    async fn create(
        &self,
        ctx: &RequestContext,
        request: CreateProductRequest,
    ) -> EmporiumResult<ProductResponse>;

    /// Gets a product by ID.
    async fn find_by_id(&self, ctx: &RequestContext, id: ProductId)
        -> EmporiumResult<ProductResponse>;

    /// Replaces a product's details.
    async fn update(
        &self,
        ctx: &RequestContext,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> EmporiumResult<ProductResponse>;

    /// Deletes a product.
    async fn delete(&self, ctx: &RequestContext, id: ProductId) -> EmporiumResult<()>;

    /// Filtered, ordered, paginated listing served through the cache.
    async fn find_all(
        &self,
        ctx: &RequestContext,
        params: ListingParams,
    ) -> EmporiumResult<Page<ProductResponse>>;
}

/// Product service implementation.
pub struct ProductServiceImpl {
    products: Arc<dyn ProductRepository>,
    categories: Arc<dyn CategoryRepository>,
    companies: Arc<dyn CompanyRepository>,
    cache: Arc<dyn CacheInterface>,
    messages: Arc<dyn MessageProvider>,
    ttl: CacheTtl,
}

impl ProductServiceImpl {
    /// Creates a new product service.
    pub fn new(
        products: Arc<dyn ProductRepository>,
        categories: Arc<dyn CategoryRepository>,
        companies: Arc<dyn CompanyRepository>,
        cache: Arc<dyn CacheInterface>,
        messages: Arc<dyn MessageProvider>,
        ttl: CacheTtl,
    ) -> Self {
        Self {
            products,
            categories,
            companies,
            cache,
            messages,
            ttl,
        }
    }

    /// Loads the target of an update or delete and checks the caller owns
    /// its company.
    async fn owned_product(&self, ctx: &RequestContext, id: ProductId) -> EmporiumResult<Product> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.messages.bad_request(MessageKey::ProductNotFound, ctx.locale))?;

        self.require_company_owner(ctx, product.company_id).await?;
        Ok(product)
    }

    async fn require_company_owner(
        &self,
        ctx: &RequestContext,
        company_id: CompanyId,
    ) -> EmporiumResult<()> {
        let company = self
            .companies
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| self.messages.bad_request(MessageKey::CompanyNotFound, ctx.locale))?;

        require_owner(ctx, company.owner(), OwnedResource::Product)
            .map_err(|denied| self.messages.denied(denied, ctx.locale))?;
        Ok(())
    }

    async fn require_category(&self, ctx: &RequestContext, id: CategoryId) -> EmporiumResult<()> {
        if self.categories.exists(id).await? {
            Ok(())
        } else {
            Err(self.messages.bad_request(MessageKey::CategoryNotFound, ctx.locale))
        }
    }

    async fn reload(&self, ctx: &RequestContext, id: ProductId) -> EmporiumResult<ProductResponse> {
        self.products
            .find_by_id(id)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(|| self.messages.no_rows_affected(ctx.locale))
    }
}

#[async_trait]
impl ProductService for ProductServiceImpl {
    async fn create(
        &self,
        ctx: &RequestContext,
        request: CreateProductRequest,
    ) -> EmporiumResult<ProductResponse> {
        debug!("Creating product: {}", request.name);

        request.validate_request()?;
        self.require_category(ctx, request.category_id).await?;
        self.require_company_owner(ctx, request.company_id).await?;

        let product = self.products.save(&request.into_new_product()).await?;

        info!("Product created: {}", product.id);
        Ok(ProductResponse::from(product))
    }

    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: ProductId,
    ) -> EmporiumResult<ProductResponse> {
        debug!("Getting product: {}", id);

        let key = cache_keys::product_by_id(id);
        if let Some(cached) = self.cache.fetch::<ProductResponse>(&key).await {
            return Ok(cached);
        }

        let product = self
            .products
            .find_by_id(id)
            .await?
            .map(ProductResponse::from)
            .ok_or_else(|| self.messages.not_found(MessageKey::ProductNotFound, ctx.locale))?;

        self.cache.store(&key, &product, self.ttl.entity).await;
        Ok(product)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: ProductId,
        request: UpdateProductRequest,
    ) -> EmporiumResult<ProductResponse> {
        debug!("Updating product: {}", id);

        request.validate_request()?;
        let existing = self.owned_product(ctx, id).await?;
        if request.category_id != existing.category_id {
            self.require_category(ctx, request.category_id).await?;
        }

        let changes = request.into_new_product(existing.company_id);
        if !self.products.update(id, &changes).await? {
            return Err(self.messages.no_rows_affected(ctx.locale));
        }
        self.cache.evict(&cache_keys::product_by_id(id)).await;

        info!("Product updated: {}", id);
        self.reload(ctx, id).await
    }

    async fn delete(&self, ctx: &RequestContext, id: ProductId) -> EmporiumResult<()> {
        debug!("Deleting product: {}", id);

        self.owned_product(ctx, id).await?;
        if !self.products.delete(id).await? {
            return Err(self.messages.no_rows_affected(ctx.locale));
        }
        self.cache.evict(&cache_keys::product_by_id(id)).await;

        info!("Product deleted: {}", id);
        Ok(())
    }

    async fn find_all(
        &self,
        ctx: &RequestContext,
        params: ListingParams,
    ) -> EmporiumResult<Page<ProductResponse>> {
        let query = params
            .into_product_query()
            .map_err(|key| self.messages.bad_request(key, ctx.locale))?;
        debug!("Listing products: {:?}", query);

        let key = cache_keys::product_listing(&query);
        if let Some(cached) = self.cache.fetch::<Page<ProductResponse>>(&key).await {
            return Ok(cached);
        }

        if let Some(category_id) = query.category_id {
            self.require_category(ctx, category_id).await?;
        }

        counter!("emporium_listing_queries_total", "entity" => "product").increment(1);
        let page = self
            .products
            .find_page(&query)
            .await?
            .map(ProductResponse::from);

        self.cache.store(&key, &page, self.ttl.listing).await;
        Ok(page)
    }
}

impl std::fmt::Debug for ProductServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductServiceImpl")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{DisabledCache, MemoryCache};
    use crate::i18n::StaticMessages;
    use crate::testing::{ctx, FakeDb};
    use emporium_core::{EmporiumError, Locale, UserId, UserRole};

    struct Fixture {
        db: Arc<FakeDb>,
        service: ProductServiceImpl,
        owner: UserId,
        stranger: UserId,
        company: CompanyId,
        books: CategoryId,
        games: CategoryId,
    }

    fn fixture_with(cache: Arc<dyn CacheInterface>) -> Fixture {
        let db = Arc::new(FakeDb::new());
        let owner = db.add_user("Owner", UserRole::Customer).id;
        let stranger = db.add_user("Stranger", UserRole::Customer).id;
        let company = db.add_company("Acme", owner).id;
        let books = db.add_category("Books").id;
        let games = db.add_category("Games").id;
        let service = ProductServiceImpl::new(
            db.clone(),
            db.clone(),
            db.clone(),
            cache,
            Arc::new(StaticMessages),
            CacheTtl::default(),
        );
        Fixture {
            db,
            service,
            owner,
            stranger,
            company,
            books,
            games,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(Arc::new(DisabledCache))
    }

    fn create_request(f: &Fixture, category: CategoryId) -> CreateProductRequest {
        CreateProductRequest {
            name: "Novel".to_string(),
            description: Some("paperback".to_string()),
            price: 12.5,
            stock: 4,
            category_id: category,
            company_id: f.company,
        }
    }

    fn update_request(category: CategoryId) -> UpdateProductRequest {
        UpdateProductRequest {
            name: "Renamed".to_string(),
            description: None,
            price: 99.0,
            stock: 0,
            category_id: category,
        }
    }

    #[tokio::test]
    async fn test_create_product() {
        let f = fixture();
        let created = f
            .service
            .create(&ctx(f.owner), create_request(&f, f.books))
            .await
            .unwrap();

        assert_eq!(created.name, "Novel");
        assert_eq!(created.company_id, f.company);
        assert!(f.db.product(created.id).is_some());
    }

    #[tokio::test]
    async fn test_create_with_missing_category_inserts_nothing() {
        let f = fixture();
        let err = f
            .service
            .create(&ctx(f.owner), create_request(&f, CategoryId(999)))
            .await
            .unwrap_err();

        match err {
            EmporiumError::BadRequest { key, message } => {
                assert_eq!(key, MessageKey::CategoryNotFound);
                assert_eq!(message, "Category not found");
            }
            other => panic!("Expected BadRequest, got {:?}", other),
        }
        assert_eq!(f.db.product_count(), 0);
    }

    #[tokio::test]
    async fn test_create_under_someone_elses_company_is_unauthorized() {
        let f = fixture();
        let err = f
            .service
            .create(&ctx(f.stranger), create_request(&f, f.books))
            .await
            .unwrap_err();

        assert!(matches!(err, EmporiumError::Unauthorized { key: MessageKey::NotProductOwner, .. }));
        assert_eq!(f.db.product_count(), 0);
    }

    #[tokio::test]
    async fn test_update_by_non_owner_is_unauthorized_and_row_unchanged() {
        let f = fixture();
        let product = f.db.add_product("Novel", 10.0, f.books, f.company);

        let err = f
            .service
            .update(&ctx(f.stranger), product.id, update_request(f.books))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 401);
        assert_eq!(err.error_code(), "UNAUTHORIZED");
        assert_eq!(f.db.product(product.id), Some(product));
    }

    #[tokio::test]
    async fn test_update_by_owner() {
        let f = fixture();
        let product = f.db.add_product("Novel", 10.0, f.books, f.company);

        let updated = f
            .service
            .update(&ctx(f.owner), product.id, update_request(f.games))
            .await
            .unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.category_id, f.games);
        assert_eq!(updated.company_id, f.company);
    }

    #[tokio::test]
    async fn test_update_to_missing_category_is_bad_request() {
        let f = fixture();
        let product = f.db.add_product("Novel", 10.0, f.books, f.company);

        let err = f
            .service
            .update(&ctx(f.owner), product.id, update_request(CategoryId(999)))
            .await
            .unwrap_err();
        assert_eq!(err.message_key(), Some(MessageKey::CategoryNotFound));
        assert_eq!(f.db.product(product.id), Some(product));
    }

    #[tokio::test]
    async fn test_update_missing_product_is_bad_request() {
        let f = fixture();
        let err = f
            .service
            .update(&ctx(f.owner), ProductId(999), update_request(f.books))
            .await
            .unwrap_err();
        assert!(matches!(err, EmporiumError::BadRequest { key: MessageKey::ProductNotFound, .. }));
    }

    #[tokio::test]
    async fn test_vanished_row_reports_no_rows_affected() {
        let f = fixture();
        let product = f.db.add_product("Novel", 10.0, f.books, f.company);
        f.db.vanish_on_write();

        let err = f
            .service
            .update(&ctx(f.owner), product.id, update_request(f.books))
            .await
            .unwrap_err();
        assert!(matches!(err, EmporiumError::Internal { key: MessageKey::NoRowsAffected, .. }));

        let err = f.service.delete(&ctx(f.owner), product.id).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[tokio::test]
    async fn test_delete_by_non_owner_is_unauthorized() {
        let f = fixture();
        let product = f.db.add_product("Novel", 10.0, f.books, f.company);

        let err = f.service.delete(&ctx(f.stranger), product.id).await.unwrap_err();
        assert_eq!(err.status_code(), 401);
        assert!(f.db.product(product.id).is_some());

        f.service.delete(&ctx(f.owner), product.id).await.unwrap();
        assert!(f.db.product(product.id).is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_not_found_in_callers_locale() {
        let f = fixture();
        let pt = RequestContext::anonymous(Locale::PtBr);
        match f.service.find_by_id(&pt, ProductId(404)).await.unwrap_err() {
            EmporiumError::NotFound { message, .. } => assert_eq!(message, "Produto não encontrado"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_by_id_cache_is_evicted_on_update() {
        let f = fixture_with(Arc::new(MemoryCache::new(100)));
        let product = f.db.add_product("Novel", 10.0, f.books, f.company);
        let anonymous = RequestContext::anonymous(Locale::En);

        assert_eq!(f.service.find_by_id(&anonymous, product.id).await.unwrap().name, "Novel");
        f.service
            .update(&ctx(f.owner), product.id, update_request(f.books))
            .await
            .unwrap();
        assert_eq!(f.service.find_by_id(&anonymous, product.id).await.unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn test_listing_price_range_is_inclusive() {
        let f = fixture();
        for price in [5.0, 10.0, 20.0, 50.0, 50.01] {
            f.db.add_product("p", price, f.books, f.company);
        }

        let params = ListingParams {
            min_price: Some(10.0),
            max_price: Some(50.0),
            ..ListingParams::default()
        };
        let page = f
            .service
            .find_all(&RequestContext::anonymous(Locale::En), params)
            .await
            .unwrap();

        let prices: Vec<f64> = page.content.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10.0, 20.0, 50.0]);
        assert!(page.content.iter().all(|p| (10.0..=50.0).contains(&p.price)));
    }

    #[tokio::test]
    async fn test_listing_explicit_sort_is_monotonic() {
        let f = fixture();
        for price in [30.0, 10.0, 20.0, 10.0] {
            f.db.add_product("p", price, f.books, f.company);
        }

        let params = ListingParams {
            order_by: Some("price".to_string()),
            order_by_type: Some("DESC".to_string()),
            last_categories: Some(f.games.to_string()),
            ..ListingParams::default()
        };
        let page = f
            .service
            .find_all(&RequestContext::anonymous(Locale::En), params)
            .await
            .unwrap();

        let prices: Vec<f64> = page.content.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![30.0, 20.0, 10.0, 10.0]);
    }

    #[tokio::test]
    async fn test_listing_pins_last_viewed_categories() {
        let f = fixture();
        let cheap_game = f.db.add_product("cheap game", 15.0, f.games, f.company);
        let book = f.db.add_product("book", 20.0, f.books, f.company);
        let other_game = f.db.add_product("game", 30.0, f.games, f.company);

        let params = ListingParams {
            min_price: Some(10.0),
            max_price: Some(50.0),
            last_categories: Some(f.books.to_string()),
            ..ListingParams::default()
        };
        let page = f
            .service
            .find_all(&RequestContext::anonymous(Locale::En), params)
            .await
            .unwrap();

        let ids: Vec<ProductId> = page.content.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![book.id, cheap_game.id, other_game.id]);
    }

    #[tokio::test]
    async fn test_listing_rejects_invalid_parameters() {
        let f = fixture();
        let anonymous = RequestContext::anonymous(Locale::En);

        let bad_direction = ListingParams {
            order_by: Some("price".to_string()),
            order_by_type: Some("upwards".to_string()),
            ..ListingParams::default()
        };
        let err = f.service.find_all(&anonymous, bad_direction).await.unwrap_err();
        assert!(matches!(err, EmporiumError::BadRequest { key: MessageKey::InvalidSortDirection, .. }));

        let bad_column = ListingParams {
            order_by: Some("password".to_string()),
            ..ListingParams::default()
        };
        let err = f.service.find_all(&anonymous, bad_column).await.unwrap_err();
        assert_eq!(err.message_key(), Some(MessageKey::InvalidSortColumn));

        let inverted = ListingParams {
            min_price: Some(50.0),
            max_price: Some(10.0),
            ..ListingParams::default()
        };
        let err = f.service.find_all(&anonymous, inverted).await.unwrap_err();
        assert_eq!(err.message_key(), Some(MessageKey::InvalidPriceRange));

        let missing_category = ListingParams {
            category_id: Some(999),
            ..ListingParams::default()
        };
        let err = f.service.find_all(&anonymous, missing_category).await.unwrap_err();
        assert_eq!(err.message_key(), Some(MessageKey::CategoryNotFound));
        assert_eq!(f.db.product_page_queries(), 0);
    }

    #[tokio::test]
    async fn test_cached_listing_is_served_until_ttl_expires() {
        let f = fixture_with(Arc::new(MemoryCache::new(100)));
        f.db.add_product("first", 10.0, f.books, f.company);
        let anonymous = RequestContext::anonymous(Locale::En);

        let first = f.service.find_all(&anonymous, ListingParams::default()).await.unwrap();
        f.db.add_product("second", 10.0, f.books, f.company);
        let second = f.service.find_all(&anonymous, ListingParams::default()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(second.len(), 1);
        assert_eq!(f.db.product_page_queries(), 1);

        let different = ListingParams {
            limit: Some(10),
            ..ListingParams::default()
        };
        let fresh = f.service.find_all(&anonymous, different).await.unwrap();
        assert_eq!(fresh.len(), 2);
    }
}
