//! Company entity.

use crate::{CompanyId, UserId};
use serde::{Deserialize, Serialize};

/// A seller. Its owner controls the company and every product it lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub user_id: UserId,
}

impl Company {
    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.user_id
    }
}

/// Data for inserting a company.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub user_id: UserId,
}
