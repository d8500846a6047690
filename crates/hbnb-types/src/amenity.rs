use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An amenity a place can offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
}

impl Amenity {
    /// Create a new amenity with a fresh UUID v4 id and current timestamps.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            name: name.into(),
        }
    }
}
