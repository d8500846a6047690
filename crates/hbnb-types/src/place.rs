use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A rental listing in a city, owned by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// City hosting the place (foreign key into `cities`).
    pub city_id: String,
    /// Owner (foreign key into `users`).
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub number_rooms: i64,
    pub number_bathrooms: i64,
    pub max_guest: i64,
    pub price_by_night: i64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Place {
    /// Create a new place with a fresh UUID v4 id, current timestamps, and
    /// zeroed capacity/pricing fields.
    pub fn new(
        city_id: impl Into<String>,
        user_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            city_id: city_id.into(),
            user_id: user_id.into(),
            name: name.into(),
            description: None,
            number_rooms: 0,
            number_bathrooms: 0,
            max_guest: 0,
            price_by_night: 0,
            latitude: None,
            longitude: None,
        }
    }
}
