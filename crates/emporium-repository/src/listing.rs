//! Dynamic SQL for product and review listings.
//!
//! Filters and pagination values are always bound parameters. Sort columns
//! come from [`ProductSortColumn::sql_column`], a closed set of static
//! identifiers, so caller input never reaches the statement text.
//!
//! Every ordering ends with the row id ascending so that pages are stable
//! when the leading sort keys tie.

use emporium_core::{
    PageRequest, ProductOrdering, ProductQuery, ProductSortColumn, ReviewQuery, SortSpec,
};
use sqlx::{MySql, QueryBuilder};

/// Product columns selected by every product statement.
pub const PRODUCT_COLUMNS: &str = "p.id, p.name, p.description, p.price, p.stock, \
     p.category_id, p.company_id, p.created_at, p.updated_at";

const REVIEW_COLUMNS: &str = "r.id, r.product_id, r.user_id, r.rating, r.comment, \
     r.created_at, r.updated_at, \
     p.name AS product_name, p.price AS product_price, p.category_id AS product_category_id";

/// `SELECT ... FROM products p WHERE ... ORDER BY ... LIMIT ? OFFSET ?`
#[must_use]
pub fn product_page_query(query: &ProductQuery) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM products p", PRODUCT_COLUMNS));
    push_product_filters(&mut qb, query);
    push_product_ordering(&mut qb, query.ordering());
    push_pagination(&mut qb, query.page);
    qb
}

/// `SELECT COUNT(*) FROM products p WHERE ...`
#[must_use]
pub fn product_count_query(query: &ProductQuery) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products p");
    push_product_filters(&mut qb, query);
    qb
}

/// Reviews of one product joined with the product, newest first.
#[must_use]
pub fn review_page_query(query: &ReviewQuery) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {} FROM reviews r INNER JOIN products p ON p.id = r.product_id",
        REVIEW_COLUMNS
    ));
    qb.push(" WHERE r.product_id = ");
    qb.push_bind(query.product_id.get());

    qb.push(" ORDER BY r.created_at DESC");
    if let Some(SortSpec { column, direction }) = query.sort {
        qb.push(format!(", {} {}", column.sql_column(), direction.as_sql()));
    }
    qb.push(", r.id ASC");

    push_pagination(&mut qb, query.page);
    qb
}

/// `SELECT COUNT(*) FROM reviews r WHERE r.product_id = ?`
#[must_use]
pub fn review_count_query(query: &ReviewQuery) -> QueryBuilder<'static, MySql> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM reviews r WHERE r.product_id = ");
    qb.push_bind(query.product_id.get());
    qb
}

fn push_product_filters(qb: &mut QueryBuilder<'static, MySql>, query: &ProductQuery) {
    qb.push(" WHERE p.price >= ");
    qb.push_bind(query.price.min());

    if let Some(max) = query.price.max() {
        qb.push(" AND p.price <= ");
        qb.push_bind(max);
    }

    if let Some(category_id) = query.category_id {
        qb.push(" AND p.category_id = ");
        qb.push_bind(category_id.get());
    }
}

fn push_product_ordering(qb: &mut QueryBuilder<'static, MySql>, ordering: ProductOrdering<'_>) {
    match ordering {
        ProductOrdering::Explicit(SortSpec { column, direction }) => {
            qb.push(format!(
                " ORDER BY {} {}",
                column.sql_column(),
                direction.as_sql()
            ));
            if column != ProductSortColumn::Id {
                qb.push(", p.id ASC");
            }
        }
        ProductOrdering::PinnedCategories(categories) => {
            qb.push(" ORDER BY CASE WHEN p.category_id IN (");
            let mut separated = qb.separated(", ");
            for category_id in categories {
                separated.push_bind(category_id.get());
            }
            separated.push_unseparated(") THEN 1 ELSE 0 END DESC, p.id ASC");
        }
        ProductOrdering::Default => {
            qb.push(" ORDER BY p.id ASC");
        }
    }
}

fn push_pagination(qb: &mut QueryBuilder<'static, MySql>, page: PageRequest) {
    qb.push(" LIMIT ");
    qb.push_bind(page.limit() as i64);
    qb.push(" OFFSET ");
    qb.push_bind(page.offset() as i64);
}
