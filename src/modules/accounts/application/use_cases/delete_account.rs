use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use crate::modules::accounts::application::ports::outgoing::account_repository::{
    AccountRepository, AccountRepositoryError,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum DeleteAccountError {
    #[error("Account not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait IDeleteAccountUseCase: Send + Sync {
    /// Default delete path: stamp `deleted_at`, keep the row. The account
    /// disappears from the active retrieval policy only.
    async fn soft_delete(&self, account_id: Uuid) -> Result<(), DeleteAccountError>;

    /// Permanent removal for administrative/compliance use. No recovery
    /// afterwards.
    async fn force_delete(&self, account_id: Uuid) -> Result<(), DeleteAccountError>;
}

#[derive(Clone)]
pub struct DeleteAccountUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    repository: R,
}

impl<R> DeleteAccountUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    fn map_err(err: AccountRepositoryError) -> DeleteAccountError {
        match err {
            AccountRepositoryError::NotFound => DeleteAccountError::NotFound,
            // Persistence failures pass through unchanged; no retries here.
            other => DeleteAccountError::DatabaseError(other.to_string()),
        }
    }
}

#[async_trait]
impl<R> IDeleteAccountUseCase for DeleteAccountUseCase<R>
where
    R: AccountRepository + Send + Sync,
{
    async fn soft_delete(&self, account_id: Uuid) -> Result<(), DeleteAccountError> {
        self.repository
            .soft_delete(account_id)
            .await
            .map_err(Self::map_err)?;

        info!(%account_id, "Account soft-deleted");
        Ok(())
    }

    async fn force_delete(&self, account_id: Uuid) -> Result<(), DeleteAccountError> {
        self.repository
            .force_delete(account_id)
            .await
            .map_err(Self::map_err)?;

        info!(%account_id, "Account permanently deleted");
        Ok(())
    }
}
