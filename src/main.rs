use std::sync::Arc;

use rocket::figment::Figment;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::*;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, ConfigError};
use crate::database::{requests, ErrorBody, PgScoreStore, SharedStore, StoreError};

mod config;
mod database;
mod leaderboard;

#[derive(thiserror::Error, Debug)]
enum BootError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to prepare the database: {0}")]
    Store(#[from] StoreError),
    #[error("server error: {0}")]
    Rocket(#[from] Box<rocket::Error>),
}

#[rocket::main]
async fn main() -> Result<(), BootError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("highscore_server=info,rocket=info")),
        )
        .init();

    if let Err(error) = run().await {
        tracing::error!(%error, "Shutting down");
        return Err(error);
    }
    Ok(())
}

async fn run() -> Result<(), BootError> {
    let config = AppConfig::from_env()?;

    // Connect to a database
    let store = PgScoreStore::connect(&config.database).await?;
    store.ensure_schema().await?;

    tracing::info!(address = %config.address, port = config.port, "Starting server");
    let result = rocket(config.figment(), Arc::new(store.clone()))
        .launch()
        .await;
    store.close().await;
    result.map(|_| ()).map_err(|error| BootError::Rocket(Box::new(error)))
}

/// Builds the server around an already connected store.
pub fn rocket(figment: Figment, store: SharedStore) -> Rocket<Build> {
    rocket::custom(figment)
        .mount(
            "/",
            routes![index, requests::add_score, requests::get_scores],
        )
        .register("/", catchers![not_found, internal_error, default_catcher])
        .manage::<SharedStore>(store)
}

#[get("/")]
fn index() -> RawHtml<&'static str> {
    RawHtml(include_str!("../static/index.html"))
}

#[catch(404)]
fn not_found() -> Json<ErrorBody> {
    Json(ErrorBody::new("Resource not found"))
}

#[catch(500)]
fn internal_error() -> Json<ErrorBody> {
    Json(ErrorBody::new("Internal server error"))
}

#[catch(default)]
fn default_catcher(status: Status, _request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    let message = if status.code >= 500 {
        "Internal server error"
    } else {
        status.reason().unwrap_or("Request failed")
    };
    (status, Json(ErrorBody::new(message)))
}
