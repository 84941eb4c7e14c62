//! In-memory repositories and fixtures for service tests.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use emporium_core::{
    Category, CategoryId, Company, CompanyId, EmporiumError, EmporiumResult, Locale, NewCompany,
    NewProduct, NewReview, NewUser, Page, PageRequest, Product, ProductId, ProductOrdering,
    ProductQuery, ProductSortColumn, ProductSummary, RequestContext, Review, ReviewChanges,
    ReviewId, ReviewQuery, ReviewWithProduct, SortDirection, User, UserChanges, UserId, UserRole,
};
use emporium_repository::{
    CategoryRepository, CompanyRepository, ProductRepository, ReviewRepository, UserRepository,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::Mutex;

#[derive(Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    categories: BTreeMap<CategoryId, Category>,
    companies: BTreeMap<CompanyId, Company>,
    products: BTreeMap<ProductId, Product>,
    reviews: BTreeMap<ReviewId, Review>,
}

/// One fake database implementing every repository trait.
#[derive(Default)]
pub struct FakeDb {
    tables: Mutex<Tables>,
    next_id: AtomicI64,
    clock: AtomicI64,
    vanish_on_write: AtomicBool,
    product_page_queries: AtomicUsize,
}

fn page_of<T>(rows: Vec<T>, page: PageRequest) -> Page<T> {
    let total = rows.len() as u64;
    let content = rows
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect();
    Page::new(content, page, total)
}

fn compare_products(a: &Product, b: &Product, column: ProductSortColumn) -> Ordering {
    match column {
        ProductSortColumn::Id => a.id.cmp(&b.id),
        ProductSortColumn::Name => a.name.cmp(&b.name),
        ProductSortColumn::Price => a.price.partial_cmp(&b.price).unwrap_or(Ordering::Equal),
        ProductSortColumn::Stock => a.stock.cmp(&b.stock),
        ProductSortColumn::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

impl FakeDb {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Self::default()
        }
    }

    fn id(&self) -> i64 {
        self.next_id.fetch_add(1, AtomicOrdering::SeqCst)
    }

    // Strictly increasing timestamps so creation order is observable.
    fn now(&self) -> chrono::DateTime<Utc> {
        let tick = self.clock.fetch_add(1, AtomicOrdering::SeqCst);
        Utc::now() + Duration::milliseconds(tick)
    }

    /// Makes every later update and delete report zero affected rows.
    pub fn vanish_on_write(&self) {
        self.vanish_on_write.store(true, AtomicOrdering::SeqCst);
    }

    fn vanishing(&self) -> bool {
        self.vanish_on_write.load(AtomicOrdering::SeqCst)
    }

    pub fn product_page_queries(&self) -> usize {
        self.product_page_queries.load(AtomicOrdering::SeqCst)
    }

    pub fn add_user(&self, name: &str, role: UserRole) -> User {
        let now = self.now();
        let user = User {
            id: UserId(self.id()),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: String::new(),
            role,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().unwrap().users.insert(user.id, user.clone());
        user
    }

    pub fn add_category(&self, title: &str) -> Category {
        let category = Category {
            id: CategoryId(self.id()),
            title: title.to_string(),
        };
        self.tables
            .lock()
            .unwrap()
            .categories
            .insert(category.id, category.clone());
        category
    }

    pub fn add_company(&self, name: &str, owner: UserId) -> Company {
        let company = Company {
            id: CompanyId(self.id()),
            name: name.to_string(),
            user_id: owner,
        };
        self.tables
            .lock()
            .unwrap()
            .companies
            .insert(company.id, company.clone());
        company
    }

    pub fn add_product(&self, name: &str, price: f64, category: CategoryId, company: CompanyId) -> Product {
        let now = self.now();
        let product = Product {
            id: ProductId(self.id()),
            name: name.to_string(),
            description: None,
            price,
            stock: 1,
            category_id: category,
            company_id: company,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .lock()
            .unwrap()
            .products
            .insert(product.id, product.clone());
        product
    }

    pub fn add_review(&self, product: ProductId, author: UserId, rating: u8) -> Review {
        let now = self.now();
        let review = Review {
            id: ReviewId(self.id()),
            product_id: product,
            user_id: author,
            rating,
            comment: "ok".to_string(),
            created_at: now,
            updated_at: now,
        };
        self.tables
            .lock()
            .unwrap()
            .reviews
            .insert(review.id, review.clone());
        review
    }

    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.tables.lock().unwrap().products.get(&id).cloned()
    }

    pub fn review(&self, id: ReviewId) -> Option<Review> {
        self.tables.lock().unwrap().reviews.get(&id).cloned()
    }

    pub fn company(&self, id: CompanyId) -> Option<Company> {
        self.tables.lock().unwrap().companies.get(&id).cloned()
    }

    pub fn category(&self, id: CategoryId) -> Option<Category> {
        self.tables.lock().unwrap().categories.get(&id).cloned()
    }

    pub fn user(&self, id: UserId) -> Option<User> {
        self.tables.lock().unwrap().users.get(&id).cloned()
    }

    pub fn product_count(&self) -> usize {
        self.tables.lock().unwrap().products.len()
    }
}

#[async_trait]
impl CategoryRepository for FakeDb {
    async fn find_by_id(&self, id: CategoryId) -> EmporiumResult<Option<Category>> {
        Ok(self.category(id))
    }

    async fn exists(&self, id: CategoryId) -> EmporiumResult<bool> {
        Ok(self.category(id).is_some())
    }

    async fn find_all(&self) -> EmporiumResult<Vec<Category>> {
        Ok(self.tables.lock().unwrap().categories.values().cloned().collect())
    }

    async fn save(&self, title: &str) -> EmporiumResult<Category> {
        let taken = self
            .tables
            .lock()
            .unwrap()
            .categories
            .values()
            .any(|c| c.title == title);
        if taken {
            return Err(EmporiumError::conflict("Duplicate entry for key 'title'"));
        }
        Ok(self.add_category(title))
    }

    async fn update(&self, id: CategoryId, title: &str) -> EmporiumResult<bool> {
        if self.vanishing() {
            return Ok(false);
        }
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.categories.get_mut(&id).map_or(false, |c| {
            c.title = title.to_string();
            true
        }))
    }

    async fn delete(&self, id: CategoryId) -> EmporiumResult<bool> {
        if self.vanishing() {
            return Ok(false);
        }
        Ok(self.tables.lock().unwrap().categories.remove(&id).is_some())
    }
}

#[async_trait]
impl CompanyRepository for FakeDb {
    async fn find_by_id(&self, id: CompanyId) -> EmporiumResult<Option<Company>> {
        Ok(self.company(id))
    }

    async fn find_all(&self, page: PageRequest) -> EmporiumResult<Page<Company>> {
        let rows = self.tables.lock().unwrap().companies.values().cloned().collect();
        Ok(page_of(rows, page))
    }

    async fn save(&self, company: &NewCompany) -> EmporiumResult<Company> {
        Ok(self.add_company(&company.name, company.user_id))
    }

    async fn update(&self, id: CompanyId, name: &str) -> EmporiumResult<bool> {
        if self.vanishing() {
            return Ok(false);
        }
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.companies.get_mut(&id).map_or(false, |c| {
            c.name = name.to_string();
            true
        }))
    }

    async fn delete(&self, id: CompanyId) -> EmporiumResult<bool> {
        if self.vanishing() {
            return Ok(false);
        }
        let mut tables = self.tables.lock().unwrap();
        tables.products.retain(|_, p| p.company_id != id);
        Ok(tables.companies.remove(&id).is_some())
    }
}

#[async_trait]
impl ProductRepository for FakeDb {
    async fn find_by_id(&self, id: ProductId) -> EmporiumResult<Option<Product>> {
        Ok(self.product(id))
    }

    async fn exists(&self, id: ProductId) -> EmporiumResult<bool> {
        Ok(self.product(id).is_some())
    }

    async fn find_page(&self, query: &ProductQuery) -> EmporiumResult<Page<Product>> {
        self.product_page_queries.fetch_add(1, AtomicOrdering::SeqCst);
        let mut rows: Vec<Product> = self
            .tables
            .lock()
            .unwrap()
            .products
            .values()
            .filter(|p| query.price.contains(p.price))
            .filter(|p| query.category_id.map_or(true, |c| p.category_id == c))
            .cloned()
            .collect();

        match query.ordering() {
            ProductOrdering::Explicit(spec) => rows.sort_by(|a, b| {
                directed(compare_products(a, b, spec.column), spec.direction)
                    .then(a.id.cmp(&b.id))
            }),
            ProductOrdering::PinnedCategories(pinned) => rows.sort_by_key(|p| {
                (!pinned.contains(&p.category_id), p.id)
            }),
            ProductOrdering::Default => rows.sort_by_key(|p| p.id),
        }

        Ok(page_of(rows, query.page))
    }

    async fn find_by_company(
        &self,
        company_id: CompanyId,
        page: PageRequest,
    ) -> EmporiumResult<Page<Product>> {
        let rows = self
            .tables
            .lock()
            .unwrap()
            .products
            .values()
            .filter(|p| p.company_id == company_id)
            .cloned()
            .collect();
        Ok(page_of(rows, page))
    }

    async fn save(&self, product: &NewProduct) -> EmporiumResult<Product> {
        let mut saved = self.add_product(
            &product.name,
            product.price,
            product.category_id,
            product.company_id,
        );
        saved.description.clone_from(&product.description);
        saved.stock = product.stock;
        self.tables
            .lock()
            .unwrap()
            .products
            .insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, id: ProductId, product: &NewProduct) -> EmporiumResult<bool> {
        if self.vanishing() {
            return Ok(false);
        }
        let now = self.now();
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.products.get_mut(&id).map_or(false, |p| {
            p.name.clone_from(&product.name);
            p.description.clone_from(&product.description);
            p.price = product.price;
            p.stock = product.stock;
            p.category_id = product.category_id;
            p.company_id = product.company_id;
            p.updated_at = now;
            true
        }))
    }

    async fn delete(&self, id: ProductId) -> EmporiumResult<bool> {
        if self.vanishing() {
            return Ok(false);
        }
        Ok(self.tables.lock().unwrap().products.remove(&id).is_some())
    }
}

#[async_trait]
impl ReviewRepository for FakeDb {
    async fn find_by_id(&self, id: ReviewId) -> EmporiumResult<Option<Review>> {
        Ok(self.review(id))
    }

    async fn find_page(&self, query: &ReviewQuery) -> EmporiumResult<Page<ReviewWithProduct>> {
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<ReviewWithProduct> = tables
            .reviews
            .values()
            .filter(|r| r.product_id == query.product_id)
            .filter_map(|r| {
                tables.products.get(&r.product_id).map(|p| ReviewWithProduct {
                    review: r.clone(),
                    product: ProductSummary::from(p),
                })
            })
            .collect();

        rows.sort_by(|a, b| {
            b.review
                .created_at
                .cmp(&a.review.created_at)
                .then(a.review.id.cmp(&b.review.id))
        });
        Ok(page_of(rows, query.page))
    }

    async fn save(&self, review: &NewReview) -> EmporiumResult<Review> {
        let mut saved = self.add_review(review.product_id, review.user_id, review.rating);
        saved.comment.clone_from(&review.comment);
        self.tables
            .lock()
            .unwrap()
            .reviews
            .insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, id: ReviewId, changes: &ReviewChanges) -> EmporiumResult<bool> {
        if self.vanishing() {
            return Ok(false);
        }
        let now = self.now();
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.reviews.get_mut(&id).map_or(false, |r| {
            r.rating = changes.rating;
            r.comment.clone_from(&changes.comment);
            r.updated_at = now;
            true
        }))
    }

    async fn delete(&self, id: ReviewId) -> EmporiumResult<bool> {
        if self.vanishing() {
            return Ok(false);
        }
        Ok(self.tables.lock().unwrap().reviews.remove(&id).is_some())
    }
}

#[async_trait]
impl UserRepository for FakeDb {
    async fn find_by_id(&self, id: UserId) -> EmporiumResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> EmporiumResult<Option<User>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn exists_by_email(&self, email: &str) -> EmporiumResult<bool> {
        Ok(UserRepository::find_by_email(self, email).await?.is_some())
    }

    async fn save(&self, user: &NewUser) -> EmporiumResult<User> {
        let now = self.now();
        let saved = User {
            id: UserId(self.id()),
            name: user.name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            role: user.role,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .lock()
            .unwrap()
            .users
            .insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, id: UserId, changes: &UserChanges) -> EmporiumResult<bool> {
        if self.vanishing() {
            return Ok(false);
        }
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.users.get_mut(&id).map_or(false, |u| {
            if let Some(name) = &changes.name {
                u.name.clone_from(name);
            }
            if let Some(email) = &changes.email {
                u.email.clone_from(email);
            }
            if let Some(hash) = &changes.password_hash {
                u.password_hash.clone_from(hash);
            }
            true
        }))
    }

    async fn delete(&self, id: UserId) -> EmporiumResult<bool> {
        if self.vanishing() {
            return Ok(false);
        }
        Ok(self.tables.lock().unwrap().users.remove(&id).is_some())
    }
}

pub fn ctx(user: UserId) -> RequestContext {
    RequestContext::authenticated(user, UserRole::Customer, Locale::En)
}

pub fn admin(user: UserId) -> RequestContext {
    RequestContext::authenticated(user, UserRole::Admin, Locale::En)
}
