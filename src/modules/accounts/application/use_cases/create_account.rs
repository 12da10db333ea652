use std::sync::Arc;

use async_trait::async_trait;
use email_address::EmailAddress;
use serde_json::{Map, Value};
use tracing::info;

use crate::modules::accounts::application::domain::entities::{
    attrs_size, Account, ATTRS_MAX_BYTES,
};
use crate::modules::accounts::application::domain::identity::LoginIdentity;
use crate::modules::accounts::application::ports::outgoing::{
    account_query::AccountQuery,
    account_repository::{AccountRepository, AccountRepositoryError},
    password_hasher::PasswordHasher,
    picture_store::PictureConfig,
};
use crate::shared::domain::record::RecordStamp;

/// Raw creation input. Optional fields fall back to the entry point's
/// defaults; `attrs` defaults to an empty map.
#[derive(Debug, Clone, Default)]
pub struct CreateAccountInput {
    pub email: String,
    pub password: Option<String>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
    pub picture: Option<String>,
    pub show_onboarding: Option<bool>,
    pub attrs: Option<Map<String, Value>>,
}

impl CreateAccountInput {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CreateAccountError {
    #[error("email must be set")]
    EmailMissing,

    #[error("Enter a valid email address")]
    EmailInvalid,

    #[error("A user with this email address already exists.")]
    EmailTaken,

    #[error("Superuser must have {0}=true.")]
    PrivilegeFlagRequired(&'static str),

    #[error("attrs exceeds {max} bytes (got {0})", max = ATTRS_MAX_BYTES)]
    AttrsTooLarge(usize),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

// Interface for account creation. Two entry points over one shared path,
// differing only in privilege-flag handling.
#[async_trait]
pub trait ICreateAccountUseCase: Send + Sync {
    /// Standard account: `is_staff`/`is_superuser` default to off.
    async fn create_user(&self, input: CreateAccountInput)
        -> Result<Account, CreateAccountError>;

    /// Privileged account: both flags must end up on; an explicit `false`
    /// for either is rejected.
    async fn create_superuser(
        &self,
        input: CreateAccountInput,
    ) -> Result<Account, CreateAccountError>;
}

#[derive(Clone)]
pub struct CreateAccountUseCase<Q, R>
where
    Q: AccountQuery + Send + Sync,
    R: AccountRepository + Send + Sync,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    identity: LoginIdentity,
    pictures: PictureConfig,
}

impl<Q, R> CreateAccountUseCase<Q, R>
where
    Q: AccountQuery + Send + Sync,
    R: AccountRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
        identity: LoginIdentity,
        pictures: PictureConfig,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            identity,
            pictures,
        }
    }

    async fn create(
        &self,
        input: CreateAccountInput,
        staff_default: bool,
        superuser_default: bool,
    ) -> Result<Account, CreateAccountError> {
        // 1. Validate the raw input.
        if input.email.trim().is_empty() {
            return Err(CreateAccountError::EmailMissing);
        }
        if !EmailAddress::is_valid(&input.email) {
            return Err(CreateAccountError::EmailInvalid);
        }
        if let Some(attrs) = &input.attrs {
            let size = attrs_size(attrs);
            if size > ATTRS_MAX_BYTES {
                return Err(CreateAccountError::AttrsTooLarge(size));
            }
        }

        // 2. Normalize the login key before any uniqueness check, so
        //    `A@X.com` and `a@x.com` collide.
        let email = self.identity.normalize(&input.email);

        // 3. Uniqueness is checked against active accounts only. A
        //    soft-deleted account does not block reuse of its email.
        let existing = self
            .query
            .find_active_by_email(&email)
            .await
            .map_err(|e| CreateAccountError::QueryError(e.to_string()))?;
        if existing.is_some() {
            return Err(CreateAccountError::EmailTaken);
        }

        // 4. Hash the password when one was supplied. Without one the
        //    account starts in the "no usable password" state.
        let password_hash = match &input.password {
            Some(raw) => Some(
                self.password_hasher
                    .hash_password(raw)
                    .await
                    .map_err(|e| CreateAccountError::HashingFailed(e.to_string()))?,
            ),
            None => None,
        };

        let account = Account {
            record: RecordStamp::new(),
            email,
            password_hash,
            is_staff: input.is_staff.unwrap_or(staff_default),
            is_superuser: input.is_superuser.unwrap_or(superuser_default),
            picture: input
                .picture
                .unwrap_or_else(|| self.pictures.default_picture()),
            show_onboarding: input.show_onboarding.unwrap_or(true),
            attrs: input.attrs.unwrap_or_default(),
        };

        // 5. Persist. A concurrent insert with the same email loses the
        //    race at the database and surfaces as the same error.
        match self.repository.insert(account).await {
            Ok(created) => {
                info!(
                    account_id = %created.record.external_id,
                    email = %created.email,
                    "Account created"
                );
                Ok(created)
            }
            Err(AccountRepositoryError::EmailTaken) => Err(CreateAccountError::EmailTaken),
            Err(e) => Err(CreateAccountError::RepositoryError(e.to_string())),
        }
    }
}

#[async_trait]
impl<Q, R> ICreateAccountUseCase for CreateAccountUseCase<Q, R>
where
    Q: AccountQuery + Send + Sync,
    R: AccountRepository + Send + Sync,
{
    async fn create_user(
        &self,
        input: CreateAccountInput,
    ) -> Result<Account, CreateAccountError> {
        self.create(input, false, false).await
    }

    async fn create_superuser(
        &self,
        input: CreateAccountInput,
    ) -> Result<Account, CreateAccountError> {
        if input.is_staff == Some(false) {
            return Err(CreateAccountError::PrivilegeFlagRequired("is_staff"));
        }
        if input.is_superuser == Some(false) {
            return Err(CreateAccountError::PrivilegeFlagRequired("is_superuser"));
        }

        self.create(input, true, true).await
    }
}
