//! Ownership gate.
//!
//! Mutations on owned rows are permitted only when the acting user is the
//! owner. A refusal is reported as [`AccessDenied`] carrying a message key;
//! the service layer localizes it into an error.
//!
//! Review and account refusals are `Forbidden`. Product and company refusals
//! are `Unauthorized`. Clients tell the two apart by status code.

use emporium_core::{MessageKey, RequestContext, UserId};
use std::fmt;

/// Kind of row an ownership check protects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnedResource {
    Product,
    Company,
    Review,
    Account,
}

impl OwnedResource {
    /// Outcome reported when the actor is not the owner.
    #[must_use]
    pub const fn denial(&self) -> AccessDenied {
        match self {
            Self::Product => AccessDenied::unauthorized(MessageKey::NotProductOwner),
            Self::Company => AccessDenied::unauthorized(MessageKey::NotCompanyOwner),
            Self::Review => AccessDenied::forbidden(MessageKey::NotReviewAuthor),
            Self::Account => AccessDenied::forbidden(MessageKey::NotAccountOwner),
        }
    }
}

impl fmt::Display for OwnedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Product => "product",
            Self::Company => "company",
            Self::Review => "review",
            Self::Account => "account",
        })
    }
}

/// How a refusal surfaces to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialKind {
    /// HTTP 401.
    Unauthorized,
    /// HTTP 403.
    Forbidden,
}

/// A refused access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessDenied {
    pub kind: DenialKind,
    pub key: MessageKey,
}

impl AccessDenied {
    #[must_use]
    pub const fn unauthorized(key: MessageKey) -> Self {
        Self {
            kind: DenialKind::Unauthorized,
            key,
        }
    }

    #[must_use]
    pub const fn forbidden(key: MessageKey) -> Self {
        Self {
            kind: DenialKind::Forbidden,
            key,
        }
    }
}

/// Returns the acting user, or refuses anonymous callers.
pub fn require_authenticated(ctx: &RequestContext) -> Result<UserId, AccessDenied> {
    ctx.user_id
        .ok_or(AccessDenied::unauthorized(MessageKey::AuthenticationRequired))
}

/// Permits administrators only.
pub fn require_admin(ctx: &RequestContext) -> Result<UserId, AccessDenied> {
    let actor = require_authenticated(ctx)?;
    if ctx.is_admin() {
        Ok(actor)
    } else {
        Err(AccessDenied::forbidden(MessageKey::AdminRequired))
    }
}

/// Permits the call iff the acting user owns the resource.
///
/// Administrators get no bypass here.
pub fn require_owner(
    ctx: &RequestContext,
    owner: UserId,
    resource: OwnedResource,
) -> Result<UserId, AccessDenied> {
    let actor = require_authenticated(ctx)?;
    if actor == owner {
        Ok(actor)
    } else {
        Err(resource.denial())
    }
}
