use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::modules::accounts::application::domain::entities::Account;
use crate::modules::accounts::application::domain::identity::LoginIdentity;
use crate::modules::accounts::application::ports::outgoing::{
    account_query::AccountQuery, picture_store::PictureStore,
};

/// Lookup result: the account plus its picture path resolved to a URL a
/// client can fetch. Resolution is best-effort.
#[derive(Debug, Clone)]
pub struct AccountProfile {
    pub account: Account,
    pub picture_url: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LookupAccountError {
    #[error("No active account matches this login")]
    NotFound,

    #[error("Query error: {0}")]
    QueryError(String),
}

// Natural-key lookup: resolve a raw login string to an active account.
#[async_trait]
pub trait ILookupAccountUseCase: Send + Sync {
    async fn by_login(&self, login: &str) -> Result<AccountProfile, LookupAccountError>;
}

#[derive(Clone)]
pub struct LookupAccountUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    query: Q,
    identity: LoginIdentity,
    pictures: Arc<dyn PictureStore + Send + Sync>,
}

impl<Q> LookupAccountUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    pub fn new(
        query: Q,
        identity: LoginIdentity,
        pictures: Arc<dyn PictureStore + Send + Sync>,
    ) -> Self {
        Self {
            query,
            identity,
            pictures,
        }
    }
}

#[async_trait]
impl<Q> ILookupAccountUseCase for LookupAccountUseCase<Q>
where
    Q: AccountQuery + Send + Sync,
{
    async fn by_login(&self, login: &str) -> Result<AccountProfile, LookupAccountError> {
        // Same normalization as at creation time, so lookup is
        // case-insensitive against the stored lowercase value.
        let email = self.identity.normalize(login);

        let account = self
            .query
            .find_active_by_email(&email)
            .await
            .map_err(|e| LookupAccountError::QueryError(e.to_string()))?
            .ok_or(LookupAccountError::NotFound)?;

        // A broken storage backend should not make accounts unreadable.
        let picture_url = match self.pictures.resolve_url(&account.picture).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(
                    account_id = %account.record.external_id,
                    picture = %account.picture,
                    error = %e,
                    "Could not resolve picture URL"
                );
                None
            }
        };

        Ok(AccountProfile {
            account,
            picture_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::accounts::application::ports::outgoing::account_query::AccountQueryError;
    use crate::modules::accounts::application::ports::outgoing::picture_store::PictureStoreError;
    use crate::shared::domain::record::{self, RecordStamp};
    use serde_json::Map;
    use uuid::Uuid;

    struct MockAccountQuery {
        existing: Option<Account>,
    }

    #[async_trait]
    impl AccountQuery for MockAccountQuery {
        async fn list_active(&self) -> Result<Vec<Account>, AccountQueryError> {
            Ok(Vec::new())
        }

        async fn list_all(&self) -> Result<Vec<Account>, AccountQueryError> {
            Ok(Vec::new())
        }

        async fn find_active_by_email(
            &self,
            email: &str,
        ) -> Result<Option<Account>, AccountQueryError> {
            if let Some(account) = &self.existing {
                if account.email == email && account.is_active() {
                    return Ok(Some(account.clone()));
                }
            }
            Ok(None)
        }

        async fn find_by_id(
            &self,
            _account_id: Uuid,
        ) -> Result<Option<Account>, AccountQueryError> {
            Ok(None)
        }
    }

    struct MockPictureStore {
        fail: bool,
    }

    #[async_trait]
    impl PictureStore for MockPictureStore {
        async fn resolve_url(&self, picture_path: &str) -> Result<String, PictureStoreError> {
            if self.fail {
                return Err(PictureStoreError::Infrastructure);
            }
            Ok(format!("https://storage.example.com/{}", picture_path))
        }
    }

    fn account(email: &str) -> Account {
        Account {
            record: RecordStamp::new(),
            email: email.to_string(),
            password_hash: Some("hashed_password".to_string()),
            is_staff: false,
            is_superuser: false,
            picture: "acct-user-images/User.png".to_string(),
            show_onboarding: true,
            attrs: Map::new(),
        }
    }

    fn use_case(
        existing: Option<Account>,
        pictures_fail: bool,
    ) -> LookupAccountUseCase<MockAccountQuery> {
        LookupAccountUseCase::new(
            MockAccountQuery { existing },
            LoginIdentity::email(),
            Arc::new(MockPictureStore {
                fail: pictures_fail,
            }),
        )
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let use_case = use_case(Some(account("neo@example.com")), false);

        let profile = use_case.by_login("Neo@Example.COM").await.unwrap();

        assert_eq!(profile.account.email, "neo@example.com");
        assert_eq!(
            profile.picture_url.as_deref(),
            Some("https://storage.example.com/acct-user-images/User.png")
        );
    }

    #[tokio::test]
    async fn test_unknown_login_is_not_found() {
        let use_case = use_case(None, false);

        let result = use_case.by_login("ghost@example.com").await;

        assert!(matches!(result, Err(LookupAccountError::NotFound)));
    }

    #[tokio::test]
    async fn test_soft_deleted_account_is_invisible() {
        let mut deleted = account("gone@example.com");
        record::mark_deleted(&mut deleted.record);

        let use_case = use_case(Some(deleted), false);

        let result = use_case.by_login("gone@example.com").await;

        assert!(matches!(result, Err(LookupAccountError::NotFound)));
    }

    #[tokio::test]
    async fn test_picture_failure_degrades_to_none() {
        let use_case = use_case(Some(account("neo@example.com")), true);

        let profile = use_case.by_login("neo@example.com").await.unwrap();

        assert!(profile.picture_url.is_none());
    }
}
