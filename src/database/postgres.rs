use chrono::Utc;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::*;
use crate::config::DatabaseConfig;

/// [`ScoreStore`] backed by the `high_score` table in Postgres.
#[derive(Clone, Debug)]
pub struct PgScoreStore {
    pool: PgPool,
}

impl PgScoreStore {
    /// Opens a connection pool. Connections are recycled once they reach
    /// `recycle_interval` and pinged before every checkout, so a pool that
    /// sat idle through a database restart heals itself.
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .max_lifetime(config.recycle_interval)
            .test_before_acquire(true)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            recycle_secs = config.recycle_interval.as_secs(),
            "Connected to the database"
        );
        Ok(Self::new(pool))
    }

    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the `high_score` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS high_score (
                id SERIAL PRIMARY KEY,
                player_name VARCHAR(50) NOT NULL,
                score INTEGER NOT NULL,
                created_at TIMESTAMP NOT NULL DEFAULT (NOW() AT TIME ZONE 'utc')
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        tracing::info!("high_score table is ready");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[rocket::async_trait]
impl ScoreStore for PgScoreStore {
    async fn create(&self, new_score: NewHighScore) -> StoreResult<HighScore> {
        // Dropping the transaction without committing rolls it back
        let mut transaction = self.pool.begin().await?;

        let row = sqlx::query_as::<_, HighScoreRow>(
            r#"
            INSERT INTO high_score (player_name, score, created_at)
            VALUES ($1, $2, $3)
            RETURNING id, player_name, score, created_at
            "#,
        )
        .bind(new_score.player_name.as_str())
        .bind(new_score.score)
        .bind(Utc::now().naive_utc())
        .fetch_one(&mut *transaction)
        .await?;
        let high_score = row.into_high_score()?;

        transaction.commit().await?;
        Ok(high_score)
    }

    async fn top_scores(&self, limit: u32) -> StoreResult<Vec<HighScore>> {
        let rows = sqlx::query_as::<_, HighScoreRow>(
            r#"
            SELECT id, player_name, score, created_at
            FROM high_score
            ORDER BY score DESC, created_at ASC, id ASC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| row.into_high_score().map_err(StoreError::from))
            .collect()
    }
}
