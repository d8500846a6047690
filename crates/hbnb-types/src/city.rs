use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A city within a state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owning state (foreign key into `states`).
    pub state_id: String,
    pub name: String,
}

impl City {
    /// Create a new city with a fresh UUID v4 id and current timestamps.
    pub fn new(state_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            state_id: state_id.into(),
            name: name.into(),
        }
    }
}
