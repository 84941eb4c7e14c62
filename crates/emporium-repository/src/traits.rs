//! Repository trait definitions.
//!
//! Writes that target an existing row return `bool`: `false` means no row
//! was affected, which callers surface as an internal error.

use async_trait::async_trait;
use emporium_core::{
    Category, CategoryId, Company, CompanyId, EmporiumResult, Interface, NewCompany, NewProduct,
    NewReview, NewUser, Page, PageRequest, Product, ProductId, ProductQuery, Review, ReviewChanges,
    ReviewId, ReviewQuery, ReviewWithProduct, User, UserChanges, UserId,
};

/// Category repository trait.
#[async_trait]
pub trait CategoryRepository: Interface + Send + Sync {
    /// Finds a category by ID.
    async fn find_by_id(&self, id: CategoryId) -> EmporiumResult<Option<Category>>;

    /// Checks if a category exists.
    async fn exists(&self, id: CategoryId) -> EmporiumResult<bool>;

    /// Lists every category ordered by id.
    async fn find_all(&self) -> EmporiumResult<Vec<Category>>;

    /// Inserts a category.
    async fn save(&self, title: &str) -> EmporiumResult<Category>;

    /// Renames a category.
    async fn update(&self, id: CategoryId, title: &str) -> EmporiumResult<bool>;

    /// Deletes a category.
    async fn delete(&self, id: CategoryId) -> EmporiumResult<bool>;
}

/// Company repository trait.
#[async_trait]
pub trait CompanyRepository: Interface + Send + Sync {
    /// Finds a company by ID.
    async fn find_by_id(&self, id: CompanyId) -> EmporiumResult<Option<Company>>;

    /// Lists companies ordered by id.
    async fn find_all(&self, page: PageRequest) -> EmporiumResult<Page<Company>>;

    /// Inserts a company.
    async fn save(&self, company: &NewCompany) -> EmporiumResult<Company>;

    /// Renames a company.
    async fn update(&self, id: CompanyId, name: &str) -> EmporiumResult<bool>;

    /// Deletes a company and, through the schema, its products.
    async fn delete(&self, id: CompanyId) -> EmporiumResult<bool>;
}

/// Product repository trait.
#[async_trait]
pub trait ProductRepository: Interface + Send + Sync {
    /// Finds a product by ID.
    async fn find_by_id(&self, id: ProductId) -> EmporiumResult<Option<Product>>;

    /// Checks if a product exists.
    async fn exists(&self, id: ProductId) -> EmporiumResult<bool>;

    /// Runs a filtered, ordered, paginated listing.
    async fn find_page(&self, query: &ProductQuery) -> EmporiumResult<Page<Product>>;

    /// Lists the products of one company ordered by id.
    async fn find_by_company(
        &self,
        company_id: CompanyId,
        page: PageRequest,
    ) -> EmporiumResult<Page<Product>>;

    /// Inserts a product.
    async fn save(&self, product: &NewProduct) -> EmporiumResult<Product>;

    /// Replaces every mutable column of a product.
    async fn update(&self, id: ProductId, product: &NewProduct) -> EmporiumResult<bool>;

    /// Deletes a product.
    async fn delete(&self, id: ProductId) -> EmporiumResult<bool>;
}

/// Review repository trait.
#[async_trait]
pub trait ReviewRepository: Interface + Send + Sync {
    /// Finds a review by ID.
    async fn find_by_id(&self, id: ReviewId) -> EmporiumResult<Option<Review>>;

    /// Lists the reviews of one product, joined with that product.
    async fn find_page(&self, query: &ReviewQuery) -> EmporiumResult<Page<ReviewWithProduct>>;

    /// Inserts a review.
    async fn save(&self, review: &NewReview) -> EmporiumResult<Review>;

    /// Changes rating and comment.
    async fn update(&self, id: ReviewId, changes: &ReviewChanges) -> EmporiumResult<bool>;

    /// Deletes a review.
    async fn delete(&self, id: ReviewId) -> EmporiumResult<bool>;
}

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> EmporiumResult<Option<User>>;

    /// Finds a user by email, case-insensitively.
    async fn find_by_email(&self, email: &str) -> EmporiumResult<Option<User>>;

    /// Checks if an email is registered.
    async fn exists_by_email(&self, email: &str) -> EmporiumResult<bool>;

    /// Inserts a user.
    async fn save(&self, user: &NewUser) -> EmporiumResult<User>;

    /// Applies the set fields of `changes`.
    async fn update(&self, id: UserId, changes: &UserChanges) -> EmporiumResult<bool>;

    /// Deletes a user.
    async fn delete(&self, id: UserId) -> EmporiumResult<bool>;
}
