use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::accounts::application::domain::entities::Account;
use crate::modules::accounts::application::ports::outgoing::account_query::{
    AccountQuery, AccountQueryError,
};
use crate::shared::domain::record::RecordStamp;

use super::sea_orm_entity::accounts::{
    Column as AccountColumn, Entity as AccountEntity, Model as AccountModel,
};

#[derive(Clone, Debug)]
pub struct AccountQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AccountQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Helper to map a SeaORM model to the domain entity
    fn map_to_account(model: AccountModel) -> Account {
        Account {
            record: RecordStamp {
                external_id: model.id,
                created_at: model.created_at.with_timezone(&chrono::Utc),
                updated_at: model.updated_at.with_timezone(&chrono::Utc),
                deleted_at: model.deleted_at.map(|t| t.with_timezone(&chrono::Utc)),
            },
            email: model.email,
            password_hash: model.password_hash,
            is_staff: model.is_staff,
            is_superuser: model.is_superuser,
            picture: model.picture,
            show_onboarding: model.show_onboarding,
            attrs: model.attrs.as_object().cloned().unwrap_or_default(),
        }
    }
}

#[async_trait]
impl AccountQuery for AccountQueryPostgres {
    async fn list_active(&self) -> Result<Vec<Account>, AccountQueryError> {
        let rows = AccountEntity::find()
            .filter(AccountColumn::DeletedAt.is_null())
            .order_by_asc(AccountColumn::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| AccountQueryError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::map_to_account).collect())
    }

    async fn list_all(&self) -> Result<Vec<Account>, AccountQueryError> {
        let rows = AccountEntity::find()
            .order_by_asc(AccountColumn::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(|e| AccountQueryError::Database(e.to_string()))?;

        Ok(rows.into_iter().map(Self::map_to_account).collect())
    }

    async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Account>, AccountQueryError> {
        let row = AccountEntity::find()
            .filter(AccountColumn::Email.eq(email))
            .filter(AccountColumn::DeletedAt.is_null())
            .one(&*self.db)
            .await
            .map_err(|e| AccountQueryError::Database(e.to_string()))?;

        Ok(row.map(Self::map_to_account))
    }

    async fn find_by_id(&self, account_id: Uuid) -> Result<Option<Account>, AccountQueryError> {
        let row = AccountEntity::find_by_id(account_id)
            .one(&*self.db)
            .await
            .map_err(|e| AccountQueryError::Database(e.to_string()))?;

        Ok(row.map(Self::map_to_account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn mock_account_model(id: Uuid, email: &str) -> AccountModel {
        let now = Utc::now();
        AccountModel {
            id,
            email: email.to_string(),
            password_hash: Some("hashed_password".to_string()),
            is_staff: false,
            is_superuser: false,
            picture: "acct-user-images/User.png".to_string(),
            show_onboarding: true,
            attrs: serde_json::json!({}),
            created_at: now.into(),
            updated_at: now.into(),
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn test_list_active_maps_rows() {
        let first = mock_account_model(Uuid::new_v4(), "first@example.com");
        let second = mock_account_model(Uuid::new_v4(), "second@example.com");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![first.clone(), second.clone()]])
            .into_connection();

        let query = AccountQueryPostgres::new(Arc::new(db));
        let accounts = query.list_active().await.unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].email, "first@example.com");
        assert_eq!(accounts[1].email, "second@example.com");
        assert!(accounts.iter().all(|a| a.is_active()));
    }

    #[tokio::test]
    async fn test_list_all_includes_deleted_rows() {
        let mut deleted = mock_account_model(Uuid::new_v4(), "gone@example.com");
        deleted.deleted_at = Some(Utc::now().into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![deleted]])
            .into_connection();

        let query = AccountQueryPostgres::new(Arc::new(db));
        let accounts = query.list_all().await.unwrap();

        assert_eq!(accounts.len(), 1);
        assert!(!accounts[0].is_active());
        assert!(accounts[0].record.deleted_at.is_some());
    }

    #[tokio::test]
    async fn test_empty_result_set_is_valid() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<AccountModel>::new()])
            .into_connection();

        let query = AccountQueryPostgres::new(Arc::new(db));
        let accounts = query.list_active().await.unwrap();

        assert!(accounts.is_empty());
    }

    #[tokio::test]
    async fn test_find_active_by_email_success() {
        let id = Uuid::new_v4();
        let model = mock_account_model(id, "neo@example.com");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let query = AccountQueryPostgres::new(Arc::new(db));
        let found = query.find_active_by_email("neo@example.com").await.unwrap();

        let account = found.expect("account should be found");
        assert_eq!(account.record.external_id, id);
        assert_eq!(account.email, "neo@example.com");
    }

    #[tokio::test]
    async fn test_find_active_by_email_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<AccountModel>::new()])
            .into_connection();

        let query = AccountQueryPostgres::new(Arc::new(db));
        let found = query.find_active_by_email("ghost@example.com").await.unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_find_by_id_returns_deleted_rows_too() {
        let id = Uuid::new_v4();
        let mut model = mock_account_model(id, "audit@example.com");
        model.deleted_at = Some(Utc::now().into());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let query = AccountQueryPostgres::new(Arc::new(db));
        let found = query.find_by_id(id).await.unwrap();

        assert!(found.is_some());
        assert!(!found.unwrap().is_active());
    }

    #[tokio::test]
    async fn test_database_error_is_mapped() {
        use sea_orm::DbErr;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors(vec![DbErr::Custom("connection timeout".to_string())])
            .into_connection();

        let query = AccountQueryPostgres::new(Arc::new(db));
        let result = query.list_all().await;

        assert!(result.is_err());
        match result.unwrap_err() {
            AccountQueryError::Database(msg) => assert!(msg.contains("connection timeout")),
        }
    }

    #[test]
    fn test_map_to_account_carries_attrs() {
        let mut model = mock_account_model(Uuid::new_v4(), "tagged@example.com");
        model.attrs = serde_json::json!({"locale": "id-ID"});

        let account = AccountQueryPostgres::map_to_account(model);

        assert_eq!(
            account.attrs.get("locale"),
            Some(&serde_json::json!("id-ID"))
        );
    }
}
