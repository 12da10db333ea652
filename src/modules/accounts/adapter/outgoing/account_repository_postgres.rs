use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::accounts::application::domain::entities::Account;
use crate::modules::accounts::application::ports::outgoing::account_repository::{
    AccountRepository, AccountRepositoryError, ProfileChanges,
};
use crate::shared::domain::record::RecordStamp;

use super::sea_orm_entity::accounts::{
    ActiveModel as AccountActiveModel, Entity as AccountEntity, Model as AccountModel,
};

#[derive(Clone, Debug)]
pub struct AccountRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AccountRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

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

    async fn find_or_not_found(
        &self,
        account_id: Uuid,
    ) -> Result<AccountModel, AccountRepositoryError> {
        AccountEntity::find_by_id(account_id)
            .one(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::Database(e.to_string()))?
            .ok_or(AccountRepositoryError::NotFound)
    }
}

#[async_trait]
impl AccountRepository for AccountRepositoryPostgres {
    async fn insert(&self, account: Account) -> Result<Account, AccountRepositoryError> {
        let active_account = AccountActiveModel {
            id: Set(account.record.external_id),
            email: Set(account.email),
            password_hash: Set(account.password_hash),
            is_staff: Set(account.is_staff),
            is_superuser: Set(account.is_superuser),
            picture: Set(account.picture),
            show_onboarding: Set(account.show_onboarding),
            attrs: Set(serde_json::Value::Object(account.attrs)),
            created_at: Set(account.record.created_at.into()),
            updated_at: Set(account.record.updated_at.into()),
            deleted_at: Set(account.record.deleted_at.map(Into::into)),
        };

        let inserted = active_account.insert(&*self.db).await.map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("23505")
                || err_str.contains("duplicate key")
                || err_str.contains("unique constraint")
            {
                return AccountRepositoryError::EmailTaken;
            }
            AccountRepositoryError::Database(e.to_string())
        })?;

        Ok(Self::map_to_account(inserted))
    }

    async fn soft_delete(&self, account_id: Uuid) -> Result<(), AccountRepositoryError> {
        let account = self.find_or_not_found(account_id).await?;

        let mut active_account: AccountActiveModel = account.into();
        active_account.deleted_at = Set(Some(chrono::Utc::now().into()));

        active_account
            .update(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn force_delete(&self, account_id: Uuid) -> Result<(), AccountRepositoryError> {
        let account = self.find_or_not_found(account_id).await?;

        let active_account: AccountActiveModel = account.into();
        active_account
            .delete(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::Database(e.to_string()))?;

        Ok(())
    }

    async fn update_profile(
        &self,
        account_id: Uuid,
        changes: ProfileChanges,
    ) -> Result<Account, AccountRepositoryError> {
        let account = self.find_or_not_found(account_id).await?;

        let mut active_account: AccountActiveModel = account.into();
        if let Some(picture) = changes.picture {
            active_account.picture = Set(picture);
        }
        if let Some(show_onboarding) = changes.show_onboarding {
            active_account.show_onboarding = Set(show_onboarding);
        }
        if let Some(attrs) = changes.attrs {
            active_account.attrs = Set(serde_json::Value::Object(attrs));
        }

        let updated = active_account
            .update(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::Database(e.to_string()))?;

        Ok(Self::map_to_account(updated))
    }

    async fn set_password(
        &self,
        account_id: Uuid,
        password_hash: Option<String>,
    ) -> Result<(), AccountRepositoryError> {
        let account = self.find_or_not_found(account_id).await?;

        let mut active_account: AccountActiveModel = account.into();
        active_account.password_hash = Set(password_hash);

        active_account
            .update(&*self.db)
            .await
            .map_err(|e| AccountRepositoryError::Database(e.to_string()))?;

        Ok(())
    }
}
