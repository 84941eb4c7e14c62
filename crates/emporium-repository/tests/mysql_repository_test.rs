//! Integration tests for the MySQL repositories.
//!
//! These tests run against a real MySQL database using testcontainers and
//! require Docker: `cargo test -p emporium-repository -- --ignored`.

mod common;

use common::TestDatabase;
use emporium_core::{
    CategoryId, CompanyId, ListingParams, NewCompany, NewProduct, NewReview, NewUser, ProductId,
    ReviewChanges, UserRole,
};
use emporium_repository::{
    CategoryRepository, CompanyRepository, MySqlCategoryRepository, MySqlCompanyRepository,
    MySqlProductRepository, MySqlReviewRepository, MySqlUserRepository, ProductRepository,
    ReviewRepository, UserRepository,
};

struct Fixture {
    _db: TestDatabase,
    categories: MySqlCategoryRepository,
    products: MySqlProductRepository,
    reviews: MySqlReviewRepository,
    company_id: CompanyId,
    user_id: emporium_core::UserId,
}

async fn fixture() -> Fixture {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let companies = MySqlCompanyRepository::new(db.pool());

    let owner = users
        .save(&NewUser {
            name: "Owner".to_string(),
            email: "owner@example.com".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Customer,
        })
        .await
        .expect("Failed to save user");
    let company = companies
        .save(&NewCompany {
            name: "Acme".to_string(),
            user_id: owner.id,
        })
        .await
        .expect("Failed to save company");

    Fixture {
        categories: MySqlCategoryRepository::new(db.pool()),
        products: MySqlProductRepository::new(db.pool()),
        reviews: MySqlReviewRepository::new(db.pool()),
        company_id: company.id,
        user_id: owner.id,
        _db: db,
    }
}

fn product(name: &str, price: f64, category_id: CategoryId, company_id: CompanyId) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        description: None,
        price,
        stock: 1,
        category_id,
        company_id,
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_price_range_and_category_filters() {
    let f = fixture().await;
    let books = f.categories.save("Books").await.unwrap();
    let games = f.categories.save("Games").await.unwrap();

    for (name, price, category) in [
        ("cheap book", 5.0, books.id),
        ("book", 15.0, books.id),
        ("game", 15.0, games.id),
        ("pricey book", 50.0, books.id),
    ] {
        f.products
            .save(&product(name, price, category, f.company_id))
            .await
            .unwrap();
    }

    let query = ListingParams {
        min_price: Some(10.0),
        max_price: Some(20.0),
        category_id: Some(books.id.get()),
        ..ListingParams::default()
    }
    .into_product_query()
    .unwrap();

    let page = f.products.find_page(&query).await.unwrap();
    assert_eq!(page.total_elements(), 1);
    assert_eq!(page.content[0].name, "book");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_pinned_categories_rank_first_with_id_tiebreak() {
    let f = fixture().await;
    let a = f.categories.save("A").await.unwrap();
    let b = f.categories.save("B").await.unwrap();

    let mut ids = Vec::new();
    for category in [a.id, b.id, a.id, b.id] {
        let saved = f
            .products
            .save(&product("p", 1.0, category, f.company_id))
            .await
            .unwrap();
        ids.push(saved.id);
    }

    let query = ListingParams {
        last_categories: Some(b.id.to_string()),
        ..ListingParams::default()
    }
    .into_product_query()
    .unwrap();

    let page = f.products.find_page(&query).await.unwrap();
    let order: Vec<ProductId> = page.content.iter().map(|p| p.id).collect();
    assert_eq!(order, vec![ids[1], ids[3], ids[0], ids[2]]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_offset_is_page_times_size() {
    let f = fixture().await;
    let category = f.categories.save("Misc").await.unwrap();
    for i in 0..5 {
        f.products
            .save(&product(&format!("p{}", i), f64::from(i), category.id, f.company_id))
            .await
            .unwrap();
    }

    let query = ListingParams {
        page: Some(1),
        limit: Some(2),
        order_by: Some("price".to_string()),
        ..ListingParams::default()
    }
    .into_product_query()
    .unwrap();

    let page = f.products.find_page(&query).await.unwrap();
    let names: Vec<&str> = page.content.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["p2", "p3"]);
    assert_eq!(page.total_elements(), 5);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_review_listing_joins_product_and_orders_newest_first() {
    let f = fixture().await;
    let category = f.categories.save("Audio").await.unwrap();
    let speaker = f
        .products
        .save(&product("speaker", 99.0, category.id, f.company_id))
        .await
        .unwrap();

    let first = f
        .reviews
        .save(&NewReview {
            product_id: speaker.id,
            user_id: f.user_id,
            rating: 4,
            comment: "good".to_string(),
        })
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = f
        .reviews
        .save(&NewReview {
            product_id: speaker.id,
            user_id: f.user_id,
            rating: 2,
            comment: "broke".to_string(),
        })
        .await
        .unwrap();

    let query = ListingParams::default()
        .into_review_query(speaker.id)
        .unwrap();
    let page = f.reviews.find_page(&query).await.unwrap();

    assert_eq!(page.content.len(), 2);
    assert_eq!(page.content[0].review.id, second.id);
    assert_eq!(page.content[1].review.id, first.id);
    assert_eq!(page.content[0].product.name, "speaker");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_update_and_delete_report_affected_rows() {
    let f = fixture().await;
    let category = f.categories.save("Tools").await.unwrap();
    let hammer = f
        .products
        .save(&product("hammer", 10.0, category.id, f.company_id))
        .await
        .unwrap();
    let review = f
        .reviews
        .save(&NewReview {
            product_id: hammer.id,
            user_id: f.user_id,
            rating: 5,
            comment: "solid".to_string(),
        })
        .await
        .unwrap();

    let changes = ReviewChanges {
        rating: 5,
        comment: "solid".to_string(),
    };
    assert!(f.reviews.update(review.id, &changes).await.unwrap());
    assert!(f.reviews.delete(review.id).await.unwrap());
    assert!(!f.reviews.update(review.id, &changes).await.unwrap());

    assert!(f.products.delete(hammer.id).await.unwrap());
    assert!(!f.products.delete(hammer.id).await.unwrap());
    assert!(f.products.find_by_id(hammer.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_category_title_is_conflict() {
    let f = fixture().await;
    f.categories.save("Garden").await.unwrap();
    let err = f.categories.save("Garden").await.unwrap_err();
    assert_eq!(err.error_code(), "CONFLICT");
    assert_eq!(f.categories.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_deleting_referenced_category_is_bad_request() {
    let f = fixture().await;
    let tools = f.categories.save("Tools").await.unwrap();
    f.products
        .save(&product("hammer", 10.0, tools.id, f.company_id))
        .await
        .unwrap();

    let err = f.categories.delete(tools.id).await.unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(
        err.message_key(),
        Some(emporium_core::MessageKey::ReferenceViolation)
    );
    assert!(f.categories.exists(tools.id).await.unwrap());
}
