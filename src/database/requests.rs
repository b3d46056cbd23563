use rocket::serde::json::{self, Json};
use rocket::{get, post, State};

use super::*;
use crate::leaderboard::Leaderboard;

/// Stores a new high score.
/// Malformed bodies are rejected before the store is touched.
#[post("/api/scores", data = "<submission>")]
pub async fn add_score(
    submission: Result<Json<ScoreSubmission>, json::Error<'_>>,
    store: &State<SharedStore>,
) -> RequestResult<Json<SuccessBody>> {
    let submission = submission.map_err(|error| {
        tracing::debug!(?error, "Rejected score submission");
        RequestError::InvalidData
    })?;
    let new_score = NewHighScore::try_from(submission.into_inner()).map_err(|error| {
        tracing::debug!(%error, "Rejected score submission");
        RequestError::InvalidData
    })?;

    let high_score = store.create(new_score).await.map_err(|error| {
        tracing::error!(%error, "Failed to save score");
        RequestError::SaveFailed
    })?;

    tracing::info!(
        id = high_score.id,
        player = %high_score.player_name,
        score = high_score.score,
        "Saved score"
    );
    Ok(Json(SuccessBody::default()))
}

/// Fetches the best scores, highest first.
#[get("/api/scores")]
pub async fn get_scores(store: &State<SharedStore>) -> RequestResult<Json<Leaderboard>> {
    let scores = store.top_scores(LEADERBOARD_SIZE).await.map_err(|error| {
        tracing::error!(%error, "Failed to fetch scores");
        RequestError::FetchFailed
    })?;

    let leaderboard = Leaderboard::from_scores(&scores);
    tracing::debug!(entries = leaderboard.len(), "Fetched leaderboard");
    Ok(Json(leaderboard))
}
