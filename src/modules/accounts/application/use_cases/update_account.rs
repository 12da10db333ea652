use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::info;
use uuid::Uuid;

use crate::modules::accounts::application::domain::entities::{
    attrs_size, Account, ATTRS_MAX_BYTES,
};
use crate::modules::accounts::application::ports::outgoing::{
    account_repository::{AccountRepository, AccountRepositoryError, ProfileChanges},
    password_hasher::PasswordHasher,
};

#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    pub account_id: Uuid,
    pub picture: Option<String>,
    pub show_onboarding: Option<bool>,
    pub attrs: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UpdateAccountError {
    #[error("Account not found")]
    NotFound,

    #[error("attrs exceeds {max} bytes (got {0})", max = ATTRS_MAX_BYTES)]
    AttrsTooLarge(usize),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

#[async_trait]
pub trait IUpdateAccountUseCase: Send + Sync {
    /// Partial profile update. Every applied mutation refreshes the
    /// account's `updated_at`.
    async fn execute(&self, input: UpdateAccountInput) -> Result<Account, UpdateAccountError>;

    /// Hash and store a new password, restoring the "usable password"
    /// state for accounts created without one.
    async fn set_password(
        &self,
        account_id: Uuid,
        raw_password: &str,
    ) -> Result<(), UpdateAccountError>;
}

#[derive(Clone)]
pub struct UpdateAccountUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
}

impl<R> UpdateAccountUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    pub fn new(repository: R, password_hasher: Arc<dyn PasswordHasher + Send + Sync>) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    fn map_err(err: AccountRepositoryError) -> UpdateAccountError {
        match err {
            AccountRepositoryError::NotFound => UpdateAccountError::NotFound,
            other => UpdateAccountError::RepositoryError(other.to_string()),
        }
    }
}

#[async_trait]
impl<R> IUpdateAccountUseCase for UpdateAccountUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    async fn execute(&self, input: UpdateAccountInput) -> Result<Account, UpdateAccountError> {
        if let Some(attrs) = &input.attrs {
            let size = attrs_size(attrs);
            if size > ATTRS_MAX_BYTES {
                return Err(UpdateAccountError::AttrsTooLarge(size));
            }
        }

        let changes = ProfileChanges {
            picture: input.picture,
            show_onboarding: input.show_onboarding,
            attrs: input.attrs,
        };

        let updated = self
            .repository
            .update_profile(input.account_id, changes)
            .await
            .map_err(Self::map_err)?;

        info!(account_id = %updated.record.external_id, "Account profile updated");
        Ok(updated)
    }

    async fn set_password(
        &self,
        account_id: Uuid,
        raw_password: &str,
    ) -> Result<(), UpdateAccountError> {
        let hash = self
            .password_hasher
            .hash_password(raw_password)
            .await
            .map_err(|e| UpdateAccountError::HashingFailed(e.to_string()))?;

        self.repository
            .set_password(account_id, Some(hash))
            .await
            .map_err(Self::map_err)
    }
}
