//! Cache key generators for consistent key naming.
//!
//! Listing keys are built from the normalized query, so two requests that
//! resolve to the same effective parameters share an entry and any
//! difference produces a different key. Absent values render as `*`.

use emporium_core::{ProductId, ProductQuery, ReviewQuery, SortSpec};
use std::fmt::Display;

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "emporium:cache";

const ABSENT: &str = "*";

fn opt<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| ABSENT.to_string(), |v| v.to_string())
}

fn sort(spec: Option<SortSpec>) -> String {
    spec.map_or_else(
        || ABSENT.to_string(),
        |s| format!("{}.{}", s.column.as_str(), s.direction.as_str()),
    )
}

/// Key for one page of a product listing.
#[must_use]
pub fn product_listing(query: &ProductQuery) -> String {
    let last = if query.last_categories().is_empty() {
        ABSENT.to_string()
    } else {
        query
            .last_categories()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    };

    format!(
        "{}:products:min={}:max={}:category={}:sort={}:last={}:offset={}:limit={}",
        CACHE_PREFIX,
        query.price.min(),
        opt(query.price.max()),
        opt(query.category_id),
        sort(query.sort),
        last,
        query.page.offset(),
        query.page.limit()
    )
}

/// Key for one page of a product's reviews.
#[must_use]
pub fn review_listing(query: &ReviewQuery) -> String {
    format!(
        "{}:reviews:product={}:sort={}:offset={}:limit={}",
        CACHE_PREFIX,
        query.product_id,
        sort(query.sort),
        query.page.offset(),
        query.page.limit()
    )
}

/// Key for a product by ID.
#[must_use]
pub fn product_by_id(id: ProductId) -> String {
    format!("{}:product:id:{}", CACHE_PREFIX, id)
}

/// Key for the full category list.
#[must_use]
pub fn all_categories() -> String {
    format!("{}:categories:all", CACHE_PREFIX)
}
