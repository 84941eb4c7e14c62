//! Authentication service implementation.

use crate::dto::{AuthResponse, LoginRequest, SignUpRequest, UserResponse};
use crate::i18n::{MessageProvider, MessageProviderExt};
use async_trait::async_trait;
use emporium_core::{
    EmporiumError, EmporiumResult, Interface, MessageKey, NewUser, RequestContext, User, UserRole,
    ValidateExt,
};
use emporium_repository::UserRepository;
use emporium_security::{
    require_authenticated, validate_password_strength, Claims, PasswordHasherInterface,
    TokenProvider,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Authentication service trait.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait AuthService: Interface + Send + Sync {
    /// Registers a customer account and signs it in.
    async fn sign_up(
        &self,
        ctx: &RequestContext,
        request: SignUpRequest,
    ) -> EmporiumResult<AuthResponse>;

    /// Exchanges credentials for an access token.
    async fn login(&self, ctx: &RequestContext, request: LoginRequest)
        -> EmporiumResult<AuthResponse>;

    /// Validates an access token and returns its claims.
    fn validate_token(&self, token: &str) -> EmporiumResult<Claims>;

    /// Returns the authenticated caller's account.
    async fn current_user(&self, ctx: &RequestContext) -> EmporiumResult<UserResponse>;
}

/// Authentication service implementation.
pub struct AuthServiceImpl {
    users: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasherInterface>,
    token_provider: Arc<TokenProvider>,
    messages: Arc<dyn MessageProvider>,
}

impl AuthServiceImpl {
    /// Creates a new authentication service.
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        token_provider: Arc<TokenProvider>,
        messages: Arc<dyn MessageProvider>,
    ) -> Self {
        Self {
            users,
            password_hasher,
            token_provider,
            messages,
        }
    }

    fn auth_response(&self, user: &User) -> EmporiumResult<AuthResponse> {
        let token = self.token_provider.issue(user)?;

        Ok(AuthResponse {
            access_token: token.token,
            token_type: token.token_type,
            expires_in: token.expires_at - chrono::Utc::now().timestamp(),
            user: UserResponse::from(user),
        })
    }

    fn invalid_credentials(&self, ctx: &RequestContext) -> EmporiumError {
        let key = MessageKey::InvalidCredentials;
        EmporiumError::unauthorized(key, self.messages.message(key, ctx.locale))
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn sign_up(
        &self,
        ctx: &RequestContext,
        request: SignUpRequest,
    ) -> EmporiumResult<AuthResponse> {
        debug!("Signing up: {}", request.email);

        request.validate_request()?;
        validate_password_strength(&request.password)
            .map_err(|problems| EmporiumError::validation(problems.join("; ")))?;

        if self.users.exists_by_email(&request.email).await? {
            return Err(self
                .messages
                .bad_request(MessageKey::EmailAlreadyInUse, ctx.locale));
        }

        let password_hash = self.password_hasher.hash(&request.password)?;
        let user = self
            .users
            .save(&NewUser {
                name: request.name,
                email: request.email,
                password_hash,
                role: UserRole::Customer,
            })
            .await?;

        info!("User signed up: {}", user.id);
        self.auth_response(&user)
    }

    async fn login(
        &self,
        ctx: &RequestContext,
        request: LoginRequest,
    ) -> EmporiumResult<AuthResponse> {
        debug!("Login attempt for: {}", request.email);

        request.validate_request()?;

        let Some(user) = self.users.find_by_email(&request.email).await? else {
            warn!("Login failed: unknown email");
            return Err(self.invalid_credentials(ctx));
        };

        if !self
            .password_hasher
            .verify(&request.password, &user.password_hash)?
        {
            warn!("Login failed: invalid password for user {}", user.id);
            return Err(self.invalid_credentials(ctx));
        }

        info!("User logged in: {}", user.id);
        self.auth_response(&user)
    }

    fn validate_token(&self, token: &str) -> EmporiumResult<Claims> {
        self.token_provider.validate(token)
    }

    async fn current_user(&self, ctx: &RequestContext) -> EmporiumResult<UserResponse> {
        let id = require_authenticated(ctx)
            .map_err(|denied| self.messages.denied(denied, ctx.locale))?;

        self.users
            .find_by_id(id)
            .await?
            .map(UserResponse::from)
            .ok_or_else(|| self.messages.not_found(MessageKey::UserNotFound, ctx.locale))
    }
}

impl std::fmt::Debug for AuthServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceImpl").finish_non_exhaustive()
    }
}
