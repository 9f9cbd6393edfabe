use std::time::Duration;

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config;
use crate::database::models::{Post, Profile, User};

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error(transparent)]
    Mongo(#[from] mongodb::error::Error),
}

static CLIENT: OnceCell<Client> = OnceCell::const_new();

/// Process-wide MongoDB client with typed collection accessors
pub struct DatabaseManager;

impl DatabaseManager {
    async fn client() -> Result<&'static Client, DatabaseError> {
        CLIENT.get_or_try_init(Self::connect).await
    }

    async fn connect() -> Result<Client, DatabaseError> {
        let db_config = &config::config().database;
        if db_config.uri.is_empty() {
            return Err(DatabaseError::ConfigMissing("MONGODB_URI"));
        }

        let mut options = ClientOptions::parse(&db_config.uri).await?;
        options.server_selection_timeout =
            Some(Duration::from_secs(db_config.connect_timeout_secs));
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)?;
        info!("Created MongoDB client for database: {}", db_config.db_name);
        Ok(client)
    }

    pub async fn database() -> Result<Database, DatabaseError> {
        let client = Self::client().await?;
        Ok(client.database(&config::config().database.db_name))
    }

    pub async fn users() -> Result<Collection<User>, DatabaseError> {
        Ok(Self::database().await?.collection("users"))
    }

    pub async fn profiles() -> Result<Collection<Profile>, DatabaseError> {
        Ok(Self::database().await?.collection("profiles"))
    }

    pub async fn posts() -> Result<Collection<Post>, DatabaseError> {
        Ok(Self::database().await?.collection("posts"))
    }

    /// Pings the database to ensure connectivity
    pub async fn health_check() -> Result<(), DatabaseError> {
        let db = Self::database().await?;
        db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Unique indexes the handlers rely on: one account per email, one
    /// profile per user. The atomic profile upsert assumes the latter.
    pub async fn ensure_indexes() -> Result<(), DatabaseError> {
        let unique = || IndexOptions::builder().unique(true).build();

        Self::users()
            .await?
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;

        Self::profiles()
            .await?
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "user": 1 })
                    .options(unique())
                    .build(),
            )
            .await?;

        info!("Ensured unique indexes on users.email and profiles.user");
        Ok(())
    }

    /// True when the error is a unique-index violation (duplicate key)
    pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
        use mongodb::error::{ErrorKind, WriteFailure};
        match err.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
            ErrorKind::Command(command_error) => command_error.code == 11000,
            _ => false,
        }
    }
}
