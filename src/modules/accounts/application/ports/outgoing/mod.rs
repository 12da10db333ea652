pub mod account_query;
pub mod account_repository;
pub mod password_hasher;
pub mod picture_store;

pub use account_query::{AccountQuery, AccountQueryError};
pub use account_repository::{AccountRepository, AccountRepositoryError, ProfileChanges};
pub use password_hasher::{HashError, PasswordHasher};
pub use picture_store::{PictureConfig, PictureStore, PictureStoreError};
