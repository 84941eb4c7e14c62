//! Company service.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{CompanyRequest, CompanyResponse, ProductResponse};
use crate::i18n::{MessageProvider, MessageProviderExt};
use async_trait::async_trait;
use emporium_core::{
    Company, CompanyId, EmporiumResult, Interface, MessageKey, NewCompany, Page, PageRequest,
    ProductId, RequestContext, ValidateExt,
};
use emporium_repository::{CompanyRepository, ProductRepository};
use emporium_security::{require_authenticated, require_owner, OwnedResource};
use std::sync::Arc;
use tracing::{debug, info};

/// Company service trait.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait CompanyService: Interface + Send + Sync {
    /// Lists companies.
    async fn find_all(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> EmporiumResult<Page<CompanyResponse>>;

    /// Gets a company by ID.
    async fn find_by_id(&self, ctx: &RequestContext, id: CompanyId)
        -> EmporiumResult<CompanyResponse>;

    /// Creates a company owned by the caller.
    async fn create(
        &self,
        ctx: &RequestContext,
        request: CompanyRequest,
    ) -> EmporiumResult<CompanyResponse>;

    /// Renames a company the caller owns.
    async fn update(
        &self,
        ctx: &RequestContext,
        id: CompanyId,
        request: CompanyRequest,
    ) -> EmporiumResult<CompanyResponse>;

    /// Deletes a company the caller owns, together with its products.
    async fn delete(&self, ctx: &RequestContext, id: CompanyId) -> EmporiumResult<()>;

    /// Lists the products a company sells.
    async fn find_products(
        &self,
        ctx: &RequestContext,
        id: CompanyId,
        page: PageRequest,
    ) -> EmporiumResult<Page<ProductResponse>>;
}

/// Company service implementation.
pub struct CompanyServiceImpl {
    companies: Arc<dyn CompanyRepository>,
    products: Arc<dyn ProductRepository>,
    cache: Arc<dyn CacheInterface>,
    messages: Arc<dyn MessageProvider>,
}

impl CompanyServiceImpl {
    /// Creates a new company service.
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        products: Arc<dyn ProductRepository>,
        cache: Arc<dyn CacheInterface>,
        messages: Arc<dyn MessageProvider>,
    ) -> Self {
        Self {
            companies,
            products,
            cache,
            messages,
        }
    }

    /// Ids of every product the company sells.
    async fn product_ids(&self, id: CompanyId) -> EmporiumResult<Vec<ProductId>> {
        let mut ids = Vec::new();
        let mut request = PageRequest::new(0, PageRequest::MAX_SIZE);
        loop {
            let page = self.products.find_by_company(id, request).await?;
            ids.extend(page.content.iter().map(|product| product.id));
            if page.is_empty() || !page.has_next() {
                return Ok(ids);
            }
            request = PageRequest::new(request.page + 1, request.size);
        }
    }

    /// Loads a company and checks that the caller owns it.
    async fn owned_company(&self, ctx: &RequestContext, id: CompanyId) -> EmporiumResult<Company> {
        let company = self
            .companies
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.messages.bad_request(MessageKey::CompanyNotFound, ctx.locale))?;

        require_owner(ctx, company.owner(), OwnedResource::Company)
            .map_err(|denied| self.messages.denied(denied, ctx.locale))?;
        Ok(company)
    }
}

#[async_trait]
impl CompanyService for CompanyServiceImpl {
    async fn find_all(
        &self,
        _ctx: &RequestContext,
        page: PageRequest,
    ) -> EmporiumResult<Page<CompanyResponse>> {
        let companies = self.companies.find_all(page).await?;
        Ok(companies.map(CompanyResponse::from))
    }

    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: CompanyId,
    ) -> EmporiumResult<CompanyResponse> {
        self.companies
            .find_by_id(id)
            .await?
            .map(CompanyResponse::from)
            .ok_or_else(|| self.messages.not_found(MessageKey::CompanyNotFound, ctx.locale))
    }

    async fn create(
        &self,
        ctx: &RequestContext,
        request: CompanyRequest,
    ) -> EmporiumResult<CompanyResponse> {
        let owner = require_authenticated(ctx)
            .map_err(|denied| self.messages.denied(denied, ctx.locale))?;
        request.validate_request()?;

        debug!("Creating company '{}' for user {}", request.name, owner);
        let company = self
            .companies
            .save(&NewCompany {
                name: request.name,
                user_id: owner,
            })
            .await?;

        info!("Company created: {}", company.id);
        Ok(CompanyResponse::from(company))
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: CompanyId,
        request: CompanyRequest,
    ) -> EmporiumResult<CompanyResponse> {
        debug!("Updating company: {}", id);

        request.validate_request()?;
        let company = self.owned_company(ctx, id).await?;

        if !self.companies.update(id, &request.name).await? {
            return Err(self.messages.no_rows_affected(ctx.locale));
        }

        info!("Company updated: {}", id);
        Ok(CompanyResponse {
            name: request.name,
            ..CompanyResponse::from(company)
        })
    }

    async fn delete(&self, ctx: &RequestContext, id: CompanyId) -> EmporiumResult<()> {
        debug!("Deleting company: {}", id);

        self.owned_company(ctx, id).await?;
        let products = self.product_ids(id).await?;
        if !self.companies.delete(id).await? {
            return Err(self.messages.no_rows_affected(ctx.locale));
        }
        // The schema cascades the delete to the company's products.
        for product_id in products {
            self.cache.evict(&cache_keys::product_by_id(product_id)).await;
        }

        info!("Company deleted: {}", id);
        Ok(())
    }

    async fn find_products(
        &self,
        ctx: &RequestContext,
        id: CompanyId,
        page: PageRequest,
    ) -> EmporiumResult<Page<ProductResponse>> {
        if self.companies.find_by_id(id).await?.is_none() {
            return Err(self.messages.not_found(MessageKey::CompanyNotFound, ctx.locale));
        }

        let products = self.products.find_by_company(id, page).await?;
        Ok(products.map(ProductResponse::from))
    }
}

impl std::fmt::Debug for CompanyServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompanyServiceImpl").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheTtl, DisabledCache, MemoryCache};
    use crate::i18n::StaticMessages;
    use crate::testing::{admin, ctx, FakeDb};
    use crate::{ProductService, ProductServiceImpl};
    use emporium_core::{EmporiumError, Locale, UserRole};

    fn service_with(db: &Arc<FakeDb>, cache: Arc<dyn CacheInterface>) -> CompanyServiceImpl {
        CompanyServiceImpl::new(db.clone(), db.clone(), cache, Arc::new(StaticMessages))
    }

    fn service(db: &Arc<FakeDb>) -> CompanyServiceImpl {
        service_with(db, Arc::new(DisabledCache))
    }

    fn request(name: &str) -> CompanyRequest {
        CompanyRequest {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_caller_as_owner() {
        let db = Arc::new(FakeDb::new());
        let owner = db.add_user("Olga", UserRole::Customer);

        let company = service(&db)
            .create(&ctx(owner.id), request("Acme"))
            .await
            .unwrap();

        assert_eq!(company.user_id, owner.id);
        assert_eq!(db.company(company.id).unwrap().name, "Acme");
    }

    #[tokio::test]
    async fn test_anonymous_create_is_unauthorized() {
        let db = Arc::new(FakeDb::new());
        let err = service(&db)
            .create(&RequestContext::anonymous(Locale::En), request("Acme"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EmporiumError::Unauthorized { key: MessageKey::AuthenticationRequired, .. }
        ));
    }

    #[tokio::test]
    async fn test_non_owner_update_is_unauthorized_even_for_admin() {
        let db = Arc::new(FakeDb::new());
        let owner = db.add_user("Olga", UserRole::Customer);
        let other = db.add_user("Root", UserRole::Admin);
        let company = db.add_company("Acme", owner.id);

        let err = service(&db)
            .update(&admin(other.id), company.id, request("Evil Corp"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EmporiumError::Unauthorized { key: MessageKey::NotCompanyOwner, .. }
        ));
        assert_eq!(db.company(company.id).unwrap().name, "Acme");
    }

    #[tokio::test]
    async fn test_owner_renames_company() {
        let db = Arc::new(FakeDb::new());
        let owner = db.add_user("Olga", UserRole::Customer);
        let company = db.add_company("Acme", owner.id);

        let updated = service(&db)
            .update(&ctx(owner.id), company.id, request("Acme Ltd"))
            .await
            .unwrap();

        assert_eq!(updated.name, "Acme Ltd");
        assert_eq!(updated.user_id, owner.id);
    }

    #[tokio::test]
    async fn test_delete_removes_company_products() {
        let db = Arc::new(FakeDb::new());
        let owner = db.add_user("Olga", UserRole::Customer);
        let category = db.add_category("Tools");
        let company = db.add_company("Acme", owner.id);
        db.add_product("Hammer", 10.0, category.id, company.id);

        service(&db).delete(&ctx(owner.id), company.id).await.unwrap();

        assert!(db.company(company.id).is_none());
        assert_eq!(db.product_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_evicts_cached_products_of_company() {
        let db = Arc::new(FakeDb::new());
        let cache: Arc<dyn CacheInterface> = Arc::new(MemoryCache::new(100));
        let products = ProductServiceImpl::new(
            db.clone(),
            db.clone(),
            db.clone(),
            cache.clone(),
            Arc::new(StaticMessages),
            CacheTtl::default(),
        );
        let owner = db.add_user("Olga", UserRole::Customer);
        let category = db.add_category("Books");
        let acme = db.add_company("Acme", owner.id);
        let globex = db.add_company("Globex", owner.id);
        let novel = db.add_product("Novel", 12.0, category.id, acme.id);
        let atlas = db.add_product("Atlas", 30.0, category.id, globex.id);

        let caller = ctx(owner.id);
        products.find_by_id(&caller, novel.id).await.unwrap();
        products.find_by_id(&caller, atlas.id).await.unwrap();

        service_with(&db, cache.clone())
            .delete(&caller, acme.id)
            .await
            .unwrap();

        let err = products.find_by_id(&caller, novel.id).await.unwrap_err();
        assert!(matches!(
            err,
            EmporiumError::NotFound { key: MessageKey::ProductNotFound, .. }
        ));
        assert!(cache
            .get_raw(&cache_keys::product_by_id(atlas.id))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_product_ids_pages_through_large_catalogues() {
        let db = Arc::new(FakeDb::new());
        let owner = db.add_user("Olga", UserRole::Customer);
        let category = db.add_category("Tools");
        let acme = db.add_company("Acme", owner.id);
        let count = PageRequest::MAX_SIZE as usize + 5;
        for i in 0..count {
            db.add_product(&format!("Item {}", i), 1.0, category.id, acme.id);
        }

        let ids = service(&db).product_ids(acme.id).await.unwrap();
        assert_eq!(ids.len(), count);
    }

    #[tokio::test]
    async fn test_missing_company_on_delete_is_bad_request() {
        let db = Arc::new(FakeDb::new());
        let err = service(&db)
            .delete(&ctx(emporium_core::UserId(1)), CompanyId(404))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            EmporiumError::BadRequest { key: MessageKey::CompanyNotFound, .. }
        ));
    }

    #[tokio::test]
    async fn test_vanished_row_on_update_is_internal() {
        let db = Arc::new(FakeDb::new());
        let owner = db.add_user("Olga", UserRole::Customer);
        let company = db.add_company("Acme", owner.id);
        db.vanish_on_write();

        let err = service(&db)
            .update(&ctx(owner.id), company.id, request("Acme Ltd"))
            .await
            .unwrap_err();
        assert_eq!(err.message_key(), Some(MessageKey::NoRowsAffected));
    }

    #[tokio::test]
    async fn test_find_products_lists_only_that_company() {
        let db = Arc::new(FakeDb::new());
        let owner = db.add_user("Olga", UserRole::Customer);
        let category = db.add_category("Tools");
        let acme = db.add_company("Acme", owner.id);
        let globex = db.add_company("Globex", owner.id);
        let hammer = db.add_product("Hammer", 10.0, category.id, acme.id);
        db.add_product("Drill", 80.0, category.id, globex.id);

        let page = service(&db)
            .find_products(&ctx(owner.id), acme.id, PageRequest::first())
            .await
            .unwrap();

        assert_eq!(page.total_elements(), 1);
        assert_eq!(page.content[0].id, hammer.id);

        let err = service(&db)
            .find_products(&ctx(owner.id), CompanyId(99), PageRequest::first())
            .await
            .unwrap_err();
        assert!(matches!(err, EmporiumError::NotFound { .. }));
    }
}
