use rocket::serde::{self, Deserialize, Serialize};

use crate::database::{GameScore, HighScore};

/// One row of the public leaderboard.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(crate = "rocket::serde")]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: GameScore,
    /// Submission day, `YYYY-MM-DD` in UTC.
    pub date: String,
}

impl From<&HighScore> for LeaderboardEntry {
    fn from(high_score: &HighScore) -> Self {
        Self {
            name: high_score.player_name.to_string(),
            score: high_score.score,
            date: high_score.created_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Ranked entries, serialized as a bare JSON array.
#[derive(Clone, PartialEq, Debug)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    pub fn new(entries: Vec<LeaderboardEntry>) -> Self {
        Self { entries }
    }

    /// Keeps the order the scores come in; the store already ranks them.
    pub fn from_scores(scores: &[HighScore]) -> Self {
        Self::new(scores.iter().map(LeaderboardEntry::from).collect())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &LeaderboardEntry> {
        self.entries.iter()
    }
}

impl Serialize for Leaderboard {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Leaderboard {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::new(Vec::deserialize(deserializer)?))
    }
}
