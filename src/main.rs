pub mod api;
pub mod health;
pub mod modules;
pub mod shared;
pub use modules::accounts;

use crate::accounts::adapter::outgoing::account_query_postgres::AccountQueryPostgres;
use crate::accounts::adapter::outgoing::account_repository_postgres::AccountRepositoryPostgres;
use crate::accounts::adapter::outgoing::cloud_storage::GcsPictureStore;
use crate::accounts::adapter::outgoing::security::Argon2Hasher;
use crate::accounts::application::domain::identity::LoginIdentity;
use crate::accounts::application::ports::outgoing::{
    password_hasher::PasswordHasher, picture_store::PictureConfig, picture_store::PictureStore,
};
use crate::accounts::application::use_cases::{
    create_account::{CreateAccountUseCase, ICreateAccountUseCase},
    delete_account::{DeleteAccountUseCase, IDeleteAccountUseCase},
    fetch_accounts::{FetchAccountsUseCase, IFetchAccountsUseCase},
    lookup_account::{ILookupAccountUseCase, LookupAccountUseCase},
    update_account::{IUpdateAccountUseCase, UpdateAccountUseCase},
};

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub create_account_use_case: Arc<dyn ICreateAccountUseCase + Send + Sync>,
    pub delete_account_use_case: Arc<dyn IDeleteAccountUseCase + Send + Sync>,
    pub fetch_accounts_use_case: Arc<dyn IFetchAccountsUseCase + Send + Sync>,
    pub lookup_account_use_case: Arc<dyn ILookupAccountUseCase + Send + Sync>,
    pub update_account_use_case: Arc<dyn IUpdateAccountUseCase + Send + Sync>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Environtment variable loading
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    // Load Env. variables
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");

    let server_url = format!("{host}:{port}");
    println!("Server run on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");

    let db_arc = Arc::new(conn);

    // Account conventions: email is the login key, lowercased whole;
    // pictures live in the configured user-images bucket.
    let identity = LoginIdentity::email();
    let pictures = PictureConfig::from_env();

    let argon2_password_hasher = Argon2Hasher::from_env();
    let hasher_arc: Arc<dyn PasswordHasher + Send + Sync> = Arc::new(argon2_password_hasher);

    // Create repositories and use cases
    let account_repo = AccountRepositoryPostgres::new(Arc::clone(&db_arc));
    let account_query = AccountQueryPostgres::new(Arc::clone(&db_arc));
    let picture_store: Arc<dyn PictureStore + Send + Sync> = Arc::new(GcsPictureStore::new());

    let create_account_use_case = CreateAccountUseCase::new(
        account_query.clone(),
        account_repo.clone(),
        Arc::clone(&hasher_arc),
        identity.clone(),
        pictures.clone(),
    );
    let delete_account_use_case = DeleteAccountUseCase::new(account_repo.clone());
    let fetch_accounts_use_case = FetchAccountsUseCase::new(account_query.clone());
    let lookup_account_use_case =
        LookupAccountUseCase::new(account_query, identity, Arc::clone(&picture_store));
    let update_account_use_case = UpdateAccountUseCase::new(account_repo, hasher_arc);

    let state = AppState {
        create_account_use_case: Arc::new(create_account_use_case),
        delete_account_use_case: Arc::new(delete_account_use_case),
        fetch_accounts_use_case: Arc::new(fetch_accounts_use_case),
        lookup_account_use_case: Arc::new(lookup_account_use_case),
        update_account_use_case: Arc::new(update_account_use_case),
    };

    // Clone db_arc for use in HttpServer closure
    let db_for_server = Arc::clone(&db_arc);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .configure(init_routes)
            .service(
                SwaggerUi::new("/docs/{_:.*}")
                    .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
            )
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Placeholder surface
    cfg.service(crate::api::test::test);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
