//! Member Portal API
//!
//! Serves member profile pages and the account flows around them:
//! - profile pages with published/unpublished games and account comments
//! - ownership-gated profile edits with picture upload to object storage
//! - account activation, password reset and password change

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;

use api::state::AppState;
use config::StorageBackend;
use domain::comment::CommentRepository;
use domain::game::GameRepository;
use domain::member::MemberRepository;
use domain::storage::ObjectStore;
use infrastructure::auth::{SessionTokenConfig, SessionTokenService};
use infrastructure::comment::{InMemoryCommentRepository, PostgresCommentRepository};
use infrastructure::game::{InMemoryGameRepository, PostgresGameRepository};
use infrastructure::member::{
    Argon2Hasher, InMemoryMemberRepository, MemberProfileService, PostgresMemberRepository,
};
use infrastructure::storage::{InMemoryObjectStore, S3Config, S3ObjectStore};

/// Wire up repositories, storage and services from configuration
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store: Arc<dyn ObjectStore> = match config.storage.backend {
        StorageBackend::S3 => {
            info!(
                endpoint = %config.storage.endpoint,
                bucket = %config.storage.bucket,
                "Using S3 object storage"
            );
            Arc::new(S3ObjectStore::new(&S3Config {
                endpoint: config.storage.endpoint.clone(),
                bucket: config.storage.bucket.clone(),
                region: config.storage.region.clone(),
                access_key: config.storage.access_key.clone(),
                secret_key: config.storage.secret_key.clone(),
            }))
        }
        StorageBackend::Memory => {
            info!("Using in-memory object storage");
            Arc::new(InMemoryObjectStore::new())
        }
    };

    let (members, games, comments) = create_repositories(config).await?;

    let profiles = Arc::new(MemberProfileService::new(
        members,
        games,
        comments,
        store,
        Arc::new(Argon2Hasher::new()),
        config.storage.public_base_url(),
    ));

    let sessions = Arc::new(SessionTokenService::new(SessionTokenConfig {
        secret: config.session.secret.clone(),
        expiration_hours: config.session.expiration_hours,
    }));

    Ok(AppState::new(profiles, sessions))
}

type Repositories = (
    Arc<dyn MemberRepository>,
    Arc<dyn GameRepository>,
    Arc<dyn CommentRepository>,
);

async fn create_repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    match &config.database.url {
        Some(url) => {
            info!("Connecting to Postgres");
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;

            sqlx::migrate!().run(&pool).await?;

            Ok((
                Arc::new(PostgresMemberRepository::new(pool.clone())),
                Arc::new(PostgresGameRepository::new(pool.clone())),
                Arc::new(PostgresCommentRepository::new(pool)),
            ))
        }
        None => {
            info!("No database configured; using in-memory repositories");
            Ok((
                Arc::new(InMemoryMemberRepository::new()),
                Arc::new(InMemoryGameRepository::new()),
                Arc::new(InMemoryCommentRepository::new()),
            ))
        }
    }
}
