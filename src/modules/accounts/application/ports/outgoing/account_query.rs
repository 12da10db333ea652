// application/ports/outgoing/account_query.rs
use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::accounts::application::domain::entities::Account;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AccountQueryError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Read-side port for accounts.
///
/// There is deliberately no implicit "default manager" filter: callers pick
/// `list_active` or `list_all` at every call site, so it is always visible
/// whether soft-deleted records can appear in a result set.
#[async_trait]
pub trait AccountQuery: Send + Sync {
    /// Active records only (`deleted_at` unset), in insertion order.
    async fn list_active(&self) -> Result<Vec<Account>, AccountQueryError>;

    /// Every record, soft-deleted ones included, in insertion order.
    async fn list_all(&self) -> Result<Vec<Account>, AccountQueryError>;

    /// Point lookup by normalized email among active records. Soft-deleted
    /// accounts never match, which frees their email for reuse.
    async fn find_active_by_email(&self, email: &str)
        -> Result<Option<Account>, AccountQueryError>;

    /// Unfiltered id lookup; soft-deleted rows stay reachable for audits.
    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<Account>, AccountQueryError>;
}
