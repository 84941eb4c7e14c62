//! Per-request caller context.

use crate::{Locale, UserId, UserRole};

/// Who is calling and in which language they want messages.
///
/// Every service operation receives this explicitly; nothing about the
/// current request is kept in ambient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RequestContext {
    pub user_id: Option<UserId>,
    pub role: UserRole,
    pub locale: Locale,
}

impl RequestContext {
    /// An unauthenticated caller.
    #[must_use]
    pub const fn anonymous(locale: Locale) -> Self {
        Self {
            user_id: None,
            role: UserRole::Customer,
            locale,
        }
    }

    /// An authenticated caller.
    #[must_use]
    pub const fn authenticated(user_id: UserId, role: UserRole, locale: Locale) -> Self {
        Self {
            user_id: Some(user_id),
            role,
            locale,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
