use chrono::{DateTime, NaiveDateTime, Utc};
use rocket::serde::Deserialize;

pub type ScoreId = i32;
pub type GameScore = i32;

/// Longest player name the `high_score` table accepts.
pub const MAX_PLAYER_NAME_LEN: usize = 50;

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum ValidationError {
    #[error("player name is empty")]
    EmptyPlayerName,
    #[error("player name is {len} characters long, at most {max} are allowed", max = MAX_PLAYER_NAME_LEN)]
    PlayerNameTooLong { len: usize },
    #[error("player name contains a NUL character")]
    NulInPlayerName,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerName(String);

impl PlayerName {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let len = name.chars().count();
        if len == 0 {
            return Err(ValidationError::EmptyPlayerName);
        }
        if len > MAX_PLAYER_NAME_LEN {
            return Err(ValidationError::PlayerNameTooLong { len });
        }
        // Postgres text columns cannot hold NUL
        if name.contains('\0') {
            return Err(ValidationError::NulInPlayerName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PlayerName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted high score. Records are never updated once created.
#[derive(Clone, Debug, PartialEq)]
pub struct HighScore {
    pub id: ScoreId,
    pub player_name: PlayerName,
    pub score: GameScore,
    pub created_at: DateTime<Utc>,
}

/// A validated score waiting to be inserted.
#[derive(Clone, Debug, PartialEq)]
pub struct NewHighScore {
    pub player_name: PlayerName,
    pub score: GameScore,
}

impl NewHighScore {
    pub fn new(player_name: &str, score: GameScore) -> Result<Self, ValidationError> {
        Ok(Self {
            player_name: PlayerName::new(player_name)?,
            score,
        })
    }
}

/// Row layout of the `high_score` table.
#[derive(sqlx::FromRow, Debug)]
pub struct HighScoreRow {
    pub id: ScoreId,
    pub player_name: String,
    pub score: GameScore,
    pub created_at: NaiveDateTime,
}

impl HighScoreRow {
    /// `created_at` is stored without a zone and is always UTC.
    pub fn into_high_score(self) -> Result<HighScore, ValidationError> {
        Ok(HighScore {
            id: self.id,
            player_name: PlayerName::new(self.player_name)?,
            score: self.score,
            created_at: self.created_at.and_utc(),
        })
    }
}

/// Body of `POST /api/scores`.
#[derive(Clone, Deserialize, Debug)]
#[serde(crate = "rocket::serde")]
pub struct ScoreSubmission {
    pub name: String,
    pub score: GameScore,
}

impl TryFrom<ScoreSubmission> for NewHighScore {
    type Error = ValidationError;

    fn try_from(submission: ScoreSubmission) -> Result<Self, Self::Error> {
        Self::new(&submission.name, submission.score)
    }
}
