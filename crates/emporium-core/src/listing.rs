//! Listing query types for products and reviews.
//!
//! Raw query-string parameters are normalized into [`ProductQuery`] and
//! [`ReviewQuery`] before they reach the cache or the database. Parsing
//! failures are reported as the [`MessageKey`] to localize, so the caller
//! decides the locale.

use crate::{CategoryId, MessageKey, PageRequest, ProductId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort direction accepted by `orderByType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// SQL keyword for this direction.
    #[must_use]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Lowercase name used in cache keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = MessageKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(MessageKey::InvalidSortDirection),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Product columns a listing may be ordered by.
///
/// Each variant maps to a fixed, qualified SQL identifier so that no
/// caller-supplied text is ever spliced into a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductSortColumn {
    Id,
    Name,
    Price,
    Stock,
    CreatedAt,
}

impl ProductSortColumn {
    /// Qualified column identifier on the `products p` alias.
    #[must_use]
    pub const fn sql_column(&self) -> &'static str {
        match self {
            Self::Id => "p.id",
            Self::Name => "p.name",
            Self::Price => "p.price",
            Self::Stock => "p.stock",
            Self::CreatedAt => "p.created_at",
        }
    }

    /// Public parameter name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::CreatedAt => "createdAt",
        }
    }
}

impl FromStr for ProductSortColumn {
    type Err = MessageKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "stock" => Ok(Self::Stock),
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            _ => Err(MessageKey::InvalidSortColumn),
        }
    }
}

/// An explicit `ORDER BY` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: ProductSortColumn,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Parses `orderBy` / `orderByType`.
    ///
    /// The direction is validated even when no column is given; an absent
    /// direction defaults to ascending.
    pub fn parse(
        order_by: Option<&str>,
        order_by_type: Option<&str>,
    ) -> Result<Option<Self>, MessageKey> {
        let direction = match order_by_type.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw.parse::<SortDirection>()?,
            None => SortDirection::default(),
        };

        match order_by.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => Ok(Some(Self {
                column: raw.parse()?,
                direction,
            })),
            None => Ok(None),
        }
    }
}

/// Inclusive price bounds. `max == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    min: f64,
    max: Option<f64>,
}

impl PriceRange {
    /// Builds a range, defaulting the lower bound to zero.
    ///
    /// Rejects negative or non-finite bounds and `min > max`. Negative zero
    /// is stored as zero.
    pub fn new(min: Option<f64>, max: Option<f64>) -> Result<Self, MessageKey> {
        let min = positive_zero(min.unwrap_or(0.0));
        let max = max.map(positive_zero);
        if !min.is_finite() || min < 0.0 {
            return Err(MessageKey::InvalidPriceRange);
        }
        if let Some(max) = max {
            if !max.is_finite() || max < min {
                return Err(MessageKey::InvalidPriceRange);
            }
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Option<f64> {
        self.max
    }

    /// Returns true when `price` falls inside the range.
    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price <= max)
    }
}

fn positive_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self { min: 0.0, max: None }
    }
}

/// How a product listing is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOrdering<'a> {
    /// Caller-chosen column and direction.
    Explicit(SortSpec),
    /// Products in any of these categories rank first.
    PinnedCategories(&'a [CategoryId]),
    /// Insertion order.
    Default,
}

/// A normalized product listing request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub price: PriceRange,
    pub category_id: Option<CategoryId>,
    pub sort: Option<SortSpec>,
    /// Sorted and de-duplicated; only membership affects the result.
    last_categories: Vec<CategoryId>,
    pub page: PageRequest,
}

impl ProductQuery {
    #[must_use]
    pub fn new(
        price: PriceRange,
        category_id: Option<CategoryId>,
        sort: Option<SortSpec>,
        last_categories: impl IntoIterator<Item = CategoryId>,
        page: PageRequest,
    ) -> Self {
        let mut last_categories: Vec<CategoryId> = last_categories.into_iter().collect();
        last_categories.sort_unstable();
        last_categories.dedup();
        Self {
            price,
            category_id,
            sort,
            last_categories,
            page,
        }
    }

    #[must_use]
    pub fn last_categories(&self) -> &[CategoryId] {
        &self.last_categories
    }

    /// Resolves sort precedence: explicit column, then pinned categories,
    /// then default.
    #[must_use]
    pub fn ordering(&self) -> ProductOrdering<'_> {
        match (self.sort, self.last_categories.is_empty()) {
            (Some(spec), _) => ProductOrdering::Explicit(spec),
            (None, false) => ProductOrdering::PinnedCategories(&self.last_categories),
            (None, true) => ProductOrdering::Default,
        }
    }
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new(PriceRange::default(), None, None, Vec::new(), PageRequest::first())
    }
}

/// A normalized review listing request for a single product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewQuery {
    pub product_id: ProductId,
    /// Secondary sort on the joined product, after `created_at DESC`.
    pub sort: Option<SortSpec>,
    pub page: PageRequest,
}

/// Raw listing parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
#[serde(rename_all = "camelCase")]
pub struct ListingParams {
    pub order_by: Option<String>,
    pub order_by_type: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category_id: Option<i64>,
    /// Comma-separated category ids.
    pub last_categories: Option<String>,
}

impl ListingParams {
    fn page_request(&self) -> PageRequest {
        PageRequest::from_params(self.page, self.limit)
    }

    fn sort(&self) -> Result<Option<SortSpec>, MessageKey> {
        SortSpec::parse(self.order_by.as_deref(), self.order_by_type.as_deref())
    }

    /// Normalizes the parameters into a product query.
    pub fn into_product_query(self) -> Result<ProductQuery, MessageKey> {
        let sort = self.sort()?;
        let price = PriceRange::new(self.min_price, self.max_price)?;
        let last_categories = parse_id_list(self.last_categories.as_deref())?;
        Ok(ProductQuery::new(
            price,
            self.category_id.map(CategoryId),
            sort,
            last_categories,
            self.page_request(),
        ))
    }

    /// Normalizes the parameters into a review query. Price and category
    /// parameters do not apply to reviews and are ignored.
    pub fn into_review_query(self, product_id: ProductId) -> Result<ReviewQuery, MessageKey> {
        Ok(ReviewQuery {
            product_id,
            sort: self.sort()?,
            page: self.page_request(),
        })
    }
}

fn parse_id_list(raw: Option<&str>) -> Result<Vec<CategoryId>, MessageKey> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<CategoryId>()
                .map_err(|_| MessageKey::InvalidCategoryList)
        })
        .collect()
}
