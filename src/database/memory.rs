use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use tokio::sync::Mutex;

use super::*;

/// In-process [`ScoreStore`] for driving the API without a database.
/// It can be switched offline to behave like an unreachable backend.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<HighScore>>,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    fn check_online(&self) -> StoreResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_owned()));
        }
        Ok(())
    }
}

#[rocket::async_trait]
impl ScoreStore for MemoryStore {
    async fn create(&self, new_score: NewHighScore) -> StoreResult<HighScore> {
        self.check_online()?;

        let mut records = self.records.lock().await;
        let high_score = HighScore {
            id: records.len() as ScoreId + 1,
            player_name: new_score.player_name,
            score: new_score.score,
            created_at: Utc::now(),
        };
        records.push(high_score.clone());
        Ok(high_score)
    }

    async fn top_scores(&self, limit: u32) -> StoreResult<Vec<HighScore>> {
        self.check_online()?;

        let mut records = self.records.lock().await.clone();
        records.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        records.truncate(limit as usize);
        Ok(records)
    }
}
