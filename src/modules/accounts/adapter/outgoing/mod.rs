pub mod account_query_postgres;
pub mod account_repository_postgres;
pub mod cloud_storage;
pub mod sea_orm_entity;
pub mod security;
