use std::sync::Arc;

#[cfg(test)]
pub mod memory;
mod postgres;
mod request_error;
pub mod requests;
mod score;
mod store_error;

pub use postgres::PgScoreStore;
pub use request_error::*;
pub use score::*;
pub use store_error::*;

/// How many records the leaderboard endpoint returns.
pub const LEADERBOARD_SIZE: u32 = 10;

/// Durable storage and ranked retrieval of high scores.
#[rocket::async_trait]
pub trait ScoreStore: Send + Sync {
    /// Inserts a new record; the store assigns `id` and `created_at`.
    /// Nothing is written if this fails.
    async fn create(&self, new_score: NewHighScore) -> StoreResult<HighScore>;

    /// At most `limit` records, best score first. Equal scores are ordered
    /// by submission time, earliest first.
    async fn top_scores(&self, limit: u32) -> StoreResult<Vec<HighScore>>;
}

/// The store handle managed by rocket and shared by every request.
pub type SharedStore = Arc<dyn ScoreStore>;
