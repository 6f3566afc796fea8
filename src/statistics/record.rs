use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub correct: u32,
    pub total: u32,
    #[serde(rename = "date")]
    pub played_at: DateTime<Utc>,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self {
            correct: 0,
            total: 0,
            played_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }
}

impl GameRecord {
    /// Whether `other` should replace this record. Ties keep the older one.
    pub fn is_beaten_by(&self, other: &GameRecord) -> bool {
        other.correct > self.correct
    }
}
