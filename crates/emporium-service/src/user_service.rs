//! User account service.

use crate::dto::{UpdateUserRequest, UserResponse};
use crate::i18n::{MessageProvider, MessageProviderExt};
use async_trait::async_trait;
use emporium_core::{
    EmporiumError, EmporiumResult, Interface, MessageKey, RequestContext, User, UserChanges, UserId, ValidateExt,
};
use emporium_repository::UserRepository;
use emporium_security::{
    require_owner, validate_password_strength, OwnedResource, PasswordHasherInterface,
};
use std::sync::Arc;
use tracing::{debug, info};

/// User service trait.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Gets an account by ID.
    async fn find_by_id(&self, ctx: &RequestContext, id: UserId) -> EmporiumResult<UserResponse>;

    /// Updates the caller's own account.
    async fn update(
        &self,
        ctx: &RequestContext,
        id: UserId,
        request: UpdateUserRequest,
    ) -> EmporiumResult<UserResponse>;

    /// Deletes the caller's own account.
    async fn delete(&self, ctx: &RequestContext, id: UserId) -> EmporiumResult<()>;
}

/// User service implementation.
pub struct UserServiceImpl {
    users: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasherInterface>,
    messages: Arc<dyn MessageProvider>,
}

impl UserServiceImpl {
    /// Creates a new user service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        messages: Arc<dyn MessageProvider>,
    ) -> Self {
        Self {
            users,
            password_hasher,
            messages,
        }
    }

    async fn own_account(&self, ctx: &RequestContext, id: UserId) -> EmporiumResult<User> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| self.messages.bad_request(MessageKey::UserNotFound, ctx.locale))?;

        require_owner(ctx, user.id, OwnedResource::Account)
            .map_err(|denied| self.messages.denied(denied, ctx.locale))?;
        Ok(user)
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn find_by_id(&self, ctx: &RequestContext, id: UserId) -> EmporiumResult<UserResponse> {
        self.users
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| self.messages.not_found(MessageKey::UserNotFound, ctx.locale))
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: UserId,
        request: UpdateUserRequest,
    ) -> EmporiumResult<UserResponse> {
        debug!("Updating user: {}", id);

        request.validate_request()?;
        let mut user = self.own_account(ctx, id).await?;

        if let Some(email) = &request.email {
            if !email.eq_ignore_ascii_case(&user.email) && self.users.exists_by_email(email).await? {
                return Err(self
                    .messages
                    .bad_request(MessageKey::EmailAlreadyInUse, ctx.locale));
            }
        }

        let password_hash = match request.password.as_deref() {
            Some(password) => {
                validate_password_strength(password)
                    .map_err(|problems| EmporiumError::validation(problems.join("; ")))?;
                Some(self.password_hasher.hash(password)?)
            }
            None => None,
        };

        let changes = UserChanges {
            name: request.name,
            email: request.email,
            password_hash,
        };

        if !self.users.update(id, &changes).await? {
            return Err(self.messages.no_rows_affected(ctx.locale));
        }

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = changes.email {
            user.email = email;
        }

        info!("User updated: {}", id);
        Ok(UserResponse::from(user))
    }

    async fn delete(&self, ctx: &RequestContext, id: UserId) -> EmporiumResult<()> {
        debug!("Deleting user: {}", id);

        self.own_account(ctx, id).await?;
        if !self.users.delete(id).await? {
            return Err(self.messages.no_rows_affected(ctx.locale));
        }

        info!("User deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for UserServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceImpl").finish_non_exhaustive()
    }
}
