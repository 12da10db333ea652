pub mod create_account;
pub mod delete_account;
pub mod fetch_accounts;
pub mod lookup_account;
pub mod update_account;
