use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::modules::accounts::application::domain::entities::Account;

/// Partial profile update. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub picture: Option<String>,
    pub show_onboarding: Option<bool>,
    pub attrs: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AccountRepositoryError {
    #[error("A user with this email address already exists.")]
    EmailTaken,

    #[error("Account not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn insert(&self, account: Account) -> Result<Account, AccountRepositoryError>;

    /// Soft delete: stamp `deleted_at`, keep the row for auditing.
    async fn soft_delete(&self, account_id: Uuid) -> Result<(), AccountRepositoryError>;

    /// Permanent removal, bypassing the soft-delete convention.
    async fn force_delete(&self, account_id: Uuid) -> Result<(), AccountRepositoryError>;

    async fn update_profile(
        &self,
        account_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Account, AccountRepositoryError>;

    async fn set_password(
        &self,
        account_id: Uuid,
        password_hash: Option<String>,
    ) -> Result<(), AccountRepositoryError>;
}
