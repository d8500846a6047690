//! Row-to-entity mapping for the `Any` driver.
//!
//! Timestamps are persisted as RFC 3339 text, the one representation both
//! backends round-trip without precision loss.

use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::any::AnyRow;

use hbnb_types::amenity::Amenity;
use hbnb_types::city::City;
use hbnb_types::entity::{Entity, EntityKind};
use hbnb_types::error::StorageError;
use hbnb_types::place::Place;
use hbnb_types::review::Review;
use hbnb_types::state::State;
use hbnb_types::user::User;

pub(crate) fn parse_datetime(s: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Query(format!("invalid datetime: {e}")))
}

pub(crate) fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn column<'r, T>(row: &'r AnyRow, name: &str) -> Result<T, StorageError>
where
    T: sqlx::Decode<'r, sqlx::Any> + sqlx::Type<sqlx::Any>,
{
    row.try_get(name)
        .map_err(|e| StorageError::Query(e.to_string()))
}

fn datetime_column(row: &AnyRow, name: &str) -> Result<DateTime<Utc>, StorageError> {
    parse_datetime(&column::<String>(row, name)?)
}

/// Map one row from the table backing `kind` into an [`Entity`].
pub(crate) fn entity_from_row(kind: EntityKind, row: &AnyRow) -> Result<Entity, StorageError> {
    match kind {
        EntityKind::Amenity => amenity_from_row(row).map(Entity::Amenity),
        EntityKind::City => city_from_row(row).map(Entity::City),
        EntityKind::Place => place_from_row(row).map(Entity::Place),
        EntityKind::Review => review_from_row(row).map(Entity::Review),
        EntityKind::State => state_from_row(row).map(Entity::State),
        EntityKind::User => user_from_row(row).map(Entity::User),
    }
}

fn amenity_from_row(row: &AnyRow) -> Result<Amenity, StorageError> {
    Ok(Amenity {
        id: column(row, "id")?,
        created_at: datetime_column(row, "created_at")?,
        updated_at: datetime_column(row, "updated_at")?,
        name: column(row, "name")?,
    })
}

fn city_from_row(row: &AnyRow) -> Result<City, StorageError> {
    Ok(City {
        id: column(row, "id")?,
        created_at: datetime_column(row, "created_at")?,
        updated_at: datetime_column(row, "updated_at")?,
        state_id: column(row, "state_id")?,
        name: column(row, "name")?,
    })
}

fn place_from_row(row: &AnyRow) -> Result<Place, StorageError> {
    Ok(Place {
        id: column(row, "id")?,
        created_at: datetime_column(row, "created_at")?,
        updated_at: datetime_column(row, "updated_at")?,
        city_id: column(row, "city_id")?,
        user_id: column(row, "user_id")?,
        name: column(row, "name")?,
        description: column(row, "description")?,
        number_rooms: column(row, "number_rooms")?,
        number_bathrooms: column(row, "number_bathrooms")?,
        max_guest: column(row, "max_guest")?,
        price_by_night: column(row, "price_by_night")?,
        latitude: column(row, "latitude")?,
        longitude: column(row, "longitude")?,
    })
}

fn review_from_row(row: &AnyRow) -> Result<Review, StorageError> {
    Ok(Review {
        id: column(row, "id")?,
        created_at: datetime_column(row, "created_at")?,
        updated_at: datetime_column(row, "updated_at")?,
        place_id: column(row, "place_id")?,
        user_id: column(row, "user_id")?,
        text: column(row, "text")?,
    })
}

fn state_from_row(row: &AnyRow) -> Result<State, StorageError> {
    Ok(State {
        id: column(row, "id")?,
        created_at: datetime_column(row, "created_at")?,
        updated_at: datetime_column(row, "updated_at")?,
        name: column(row, "name")?,
    })
}

fn user_from_row(row: &AnyRow) -> Result<User, StorageError> {
    Ok(User {
        id: column(row, "id")?,
        created_at: datetime_column(row, "created_at")?,
        updated_at: datetime_column(row, "updated_at")?,
        email: column(row, "email")?,
        password: column(row, "password")?,
        first_name: column(row, "first_name")?,
        last_name: column(row, "last_name")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datetime_round_trip() {
        let now = Utc::now();
        let parsed = parse_datetime(&format_datetime(&now)).unwrap();
        assert_eq!(parsed, now);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        let err = parse_datetime("yesterday at noon").unwrap_err();
        assert!(matches!(err, StorageError::Query(_)));
    }
}
