use async_trait::async_trait;

use crate::modules::accounts::application::domain::entities::Account;
use crate::modules::accounts::application::ports::outgoing::account_query::{
    AccountQuery, AccountQueryError,
};

#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchAccountsError {
    #[error("Query error: {0}")]
    QueryError(String),
}

// The two retrieval policies, kept as separate, explicit calls. There is no
// accessor that silently decides for the caller whether deleted records are
// visible.
#[async_trait]
pub trait IFetchAccountsUseCase: Send + Sync {
    async fn list_active(&self) -> Result<Vec<Account>, FetchAccountsError>;
    async fn list_all(&self) -> Result<Vec<Account>, FetchAccountsError>;
}

#[derive(Clone)]
pub struct FetchAccountsUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    query: Q,
}

impl<Q> FetchAccountsUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IFetchAccountsUseCase for FetchAccountsUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    async fn list_active(&self) -> Result<Vec<Account>, FetchAccountsError> {
        self.query
            .list_active()
            .await
            .map_err(|e| FetchAccountsError::QueryError(e.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Account>, FetchAccountsError> {
        self.query
            .list_all()
            .await
            .map_err(|e| FetchAccountsError::QueryError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::domain::record::{self, RecordStamp};
    use serde_json::Map;
    use uuid::Uuid;

    // In-memory store that applies the same filter the real read adapter
    // does, so the two policies are observable through the use case.
    struct MockAccountQuery {
        accounts: Vec<Account>,
        fail: bool,
    }

    #[async_trait]
    impl AccountQuery for MockAccountQuery {
        async fn list_active(&self) -> Result<Vec<Account>, AccountQueryError> {
            if self.fail {
                return Err(AccountQueryError::Database("connection lost".to_string()));
            }
            Ok(self
                .accounts
                .iter()
                .filter(|a| a.is_active())
                .cloned()
                .collect())
        }

        async fn list_all(&self) -> Result<Vec<Account>, AccountQueryError> {
            if self.fail {
                return Err(AccountQueryError::Database("connection lost".to_string()));
            }
            Ok(self.accounts.clone())
        }

        async fn find_active_by_email(
            &self,
            _email: &str,
        ) -> Result<Option<Account>, AccountQueryError> {
            Ok(None)
        }

        async fn find_by_id(
            &self,
            _account_id: Uuid,
        ) -> Result<Option<Account>, AccountQueryError> {
            Ok(None)
        }
    }

    fn account(email: &str) -> Account {
        Account {
            record: RecordStamp::new(),
            email: email.to_string(),
            password_hash: None,
            is_staff: false,
            is_superuser: false,
            picture: "acct-user-images/User.png".to_string(),
            show_onboarding: true,
            attrs: Map::new(),
        }
    }

    #[tokio::test]
    async fn test_soft_deleted_accounts_split_the_policies() {
        let kept = account("kept@example.com");
        let mut gone = account("gone@example.com");
        record::mark_deleted(&mut gone.record);

        let use_case = FetchAccountsUseCase::new(MockAccountQuery {
            accounts: vec![kept.clone(), gone.clone()],
            fail: false,
        });

        let active = use_case.list_active().await.unwrap();
        let all = use_case.list_all().await.unwrap();

        assert_eq!(active.len(), 1);
        assert_eq!(active[0].email, "kept@example.com");

        assert_eq!(all.len(), 2);
        assert!(all.iter().any(|a| a.email == "gone@example.com"));
    }

    #[tokio::test]
    async fn test_empty_store_is_not_an_error() {
        let use_case = FetchAccountsUseCase::new(MockAccountQuery {
            accounts: Vec::new(),
            fail: false,
        });

        assert!(use_case.list_active().await.unwrap().is_empty());
        assert!(use_case.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_query_failure_surfaces() {
        let use_case = FetchAccountsUseCase::new(MockAccountQuery {
            accounts: Vec::new(),
            fail: true,
        });

        let result = use_case.list_active().await;

        assert!(matches!(result, Err(FetchAccountsError::QueryError(_))));
    }
}
