use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's review of a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Reviewed place (foreign key into `places`).
    pub place_id: String,
    /// Author (foreign key into `users`).
    pub user_id: String,
    pub text: String,
}

impl Review {
    /// Create a new review with a fresh UUID v4 id and current timestamps.
    pub fn new(
        place_id: impl Into<String>,
        user_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            place_id: place_id.into(),
            user_id: user_id.into(),
            text: text.into(),
        }
    }
}
