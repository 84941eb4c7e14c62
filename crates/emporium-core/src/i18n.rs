//! Locale and message identifiers.
//!
//! Errors never carry hard-coded user-facing text. They carry a
//! [`MessageKey`] and the text resolved for the caller's [`Locale`]
//! by a message provider in the service layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported response locales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Locale {
    /// English.
    #[default]
    #[serde(rename = "en")]
    En,
    /// Brazilian Portuguese.
    #[serde(rename = "pt-BR")]
    PtBr,
}

impl Locale {
    /// Returns the BCP 47 tag for this locale.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::PtBr => "pt-BR",
        }
    }

    /// Picks the first supported locale from an `Accept-Language` header value.
    ///
    /// Quality weights are honoured; unsupported tags are skipped. Returns
    /// `None` when nothing in the header is supported.
    #[must_use]
    pub fn negotiate(accept_language: &str) -> Option<Self> {
        let mut candidates: Vec<(f32, Self)> = accept_language
            .split(',')
            .filter_map(|part| {
                let mut pieces = part.trim().split(';');
                let tag = pieces.next()?.trim();
                let quality = pieces
                    .find_map(|p| p.trim().strip_prefix("q="))
                    .and_then(|q| q.parse::<f32>().ok())
                    .unwrap_or(1.0);
                tag.parse::<Self>().ok().map(|locale| (quality, locale))
            })
            .collect();

        // Stable sort keeps header order among equal weights.
        candidates.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        candidates.first().map(|(_, locale)| *locale)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            "pt" | "pt-br" | "pt_br" => Ok(Self::PtBr),
            _ => Err(format!("Unsupported locale: {}", s)),
        }
    }
}

/// Identifiers for every user-facing message the backend can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum MessageKey {
    CategoryNotFound,
    CategoryTitleTaken,
    CategoryInUse,
    CompanyNotFound,
    ProductNotFound,
    ReviewNotFound,
    UserNotFound,
    EmailAlreadyInUse,
    InvalidCredentials,
    InvalidSortDirection,
    InvalidSortColumn,
    InvalidPriceRange,
    InvalidCategoryList,
    InvalidQueryParameters,
    AuthenticationRequired,
    AdminRequired,
    NotProductOwner,
    NotCompanyOwner,
    NotReviewAuthor,
    NotAccountOwner,
    NoRowsAffected,
    ReferenceViolation,
    InternalError,
}

impl MessageKey {
    /// Every key, in declaration order.
    pub const ALL: [Self; 23] = [
        Self::CategoryNotFound,
        Self::CategoryTitleTaken,
        Self::CategoryInUse,
        Self::CompanyNotFound,
        Self::ProductNotFound,
        Self::ReviewNotFound,
        Self::UserNotFound,
        Self::EmailAlreadyInUse,
        Self::InvalidCredentials,
        Self::InvalidSortDirection,
        Self::InvalidSortColumn,
        Self::InvalidPriceRange,
        Self::InvalidCategoryList,
        Self::InvalidQueryParameters,
        Self::AuthenticationRequired,
        Self::AdminRequired,
        Self::NotProductOwner,
        Self::NotCompanyOwner,
        Self::NotReviewAuthor,
        Self::NotAccountOwner,
        Self::NoRowsAffected,
        Self::ReferenceViolation,
        Self::InternalError,
    ];

    /// Returns the dotted identifier used in API responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CategoryNotFound => "category.not_found",
            Self::CategoryTitleTaken => "category.title_taken",
            Self::CategoryInUse => "category.in_use",
            Self::CompanyNotFound => "company.not_found",
            Self::ProductNotFound => "product.not_found",
            Self::ReviewNotFound => "review.not_found",
            Self::UserNotFound => "user.not_found",
            Self::EmailAlreadyInUse => "user.email_in_use",
            Self::InvalidCredentials => "auth.invalid_credentials",
            Self::InvalidSortDirection => "listing.invalid_sort_direction",
            Self::InvalidSortColumn => "listing.invalid_sort_column",
            Self::InvalidPriceRange => "listing.invalid_price_range",
            Self::InvalidCategoryList => "listing.invalid_category_list",
            Self::InvalidQueryParameters => "request.invalid_query",
            Self::AuthenticationRequired => "auth.required",
            Self::AdminRequired => "auth.admin_required",
            Self::NotProductOwner => "product.not_owner",
            Self::NotCompanyOwner => "company.not_owner",
            Self::NotReviewAuthor => "review.not_author",
            Self::NotAccountOwner => "user.not_owner",
            Self::NoRowsAffected => "db.no_rows_affected",
            Self::ReferenceViolation => "db.reference_violation",
            Self::InternalError => "internal.error",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<MessageKey> for String {
    fn from(key: MessageKey) -> Self {
        key.as_str().to_string()
    }
}

impl TryFrom<String> for MessageKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == value)
            .ok_or_else(|| format!("Unknown message key: {}", value))
    }
}
