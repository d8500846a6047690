//! Entity dispatch types for the storage layer.
//!
//! `EntityKind` is a fieldless enum over the six catalog kinds, replacing
//! name-string class lookup with typed dispatch. `Entity` is the sum type
//! the storage layer stages, persists, and returns; its composite key
//! `"ClassName.id"` addresses every object in the store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::amenity::Amenity;
use crate::city::City;
use crate::place::Place;
use crate::review::Review;
use crate::state::State;
use crate::user::User;

/// The six catalog entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl EntityKind {
    /// Every kind, in class-name order.
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Amenity,
        EntityKind::City,
        EntityKind::Place,
        EntityKind::Review,
        EntityKind::State,
        EntityKind::User,
    ];

    /// Name of the table backing this kind.
    pub fn table(self) -> &'static str {
        match self {
            EntityKind::Amenity => "amenities",
            EntityKind::City => "cities",
            EntityKind::Place => "places",
            EntityKind::Review => "reviews",
            EntityKind::State => "states",
            EntityKind::User => "users",
        }
    }

    /// Class name used as the prefix of composite `"ClassName.id"` keys.
    pub fn class_name(self) -> &'static str {
        match self {
            EntityKind::Amenity => "Amenity",
            EntityKind::City => "City",
            EntityKind::Place => "Place",
            EntityKind::Review => "Review",
            EntityKind::State => "State",
            EntityKind::User => "User",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "amenity" => Ok(EntityKind::Amenity),
            "city" => Ok(EntityKind::City),
            "place" => Ok(EntityKind::Place),
            "review" => Ok(EntityKind::Review),
            "state" => Ok(EntityKind::State),
            "user" => Ok(EntityKind::User),
            other => Err(format!("unknown entity kind: '{other}'")),
        }
    }
}

/// A catalog object of any kind.
///
/// Serialized form is internally tagged with `__class__`, matching the shape
/// the original catalog exposed in its JSON dictionaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Entity {
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
    State(State),
    User(User),
}

impl Entity {
    /// Kind tag of this object.
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Amenity(_) => EntityKind::Amenity,
            Entity::City(_) => EntityKind::City,
            Entity::Place(_) => EntityKind::Place,
            Entity::Review(_) => EntityKind::Review,
            Entity::State(_) => EntityKind::State,
            Entity::User(_) => EntityKind::User,
        }
    }

    /// Primary key of this object.
    pub fn id(&self) -> &str {
        match self {
            Entity::Amenity(a) => &a.id,
            Entity::City(c) => &c.id,
            Entity::Place(p) => &p.id,
            Entity::Review(r) => &r.id,
            Entity::State(s) => &s.id,
            Entity::User(u) => &u.id,
        }
    }

    /// Composite `"ClassName.id"` key addressing this object in `all()`.
    pub fn key(&self) -> String {
        format!("{}.{}", self.kind(), self.id())
    }
}

impl From<Amenity> for Entity {
    fn from(a: Amenity) -> Self {
        Entity::Amenity(a)
    }
}

impl From<City> for Entity {
    fn from(c: City) -> Self {
        Entity::City(c)
    }
}

impl From<Place> for Entity {
    fn from(p: Place) -> Self {
        Entity::Place(p)
    }
}

impl From<Review> for Entity {
    fn from(r: Review) -> Self {
        Entity::Review(r)
    }
}

impl From<State> for Entity {
    fn from(s: State) -> Self {
        Entity::State(s)
    }
}

impl From<User> for Entity {
    fn from(u: User) -> Self {
        Entity::User(u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parses_class_names() {
        assert_eq!("User".parse::<EntityKind>().unwrap(), EntityKind::User);
        assert_eq!("state".parse::<EntityKind>().unwrap(), EntityKind::State);
        assert!("Booking".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_kind_table_names() {
        assert_eq!(EntityKind::Amenity.table(), "amenities");
        assert_eq!(EntityKind::City.table(), "cities");
        assert_eq!(EntityKind::User.table(), "users");
    }

    #[test]
    fn test_entity_key_shape() {
        let user = User::new("kit@example.com", "hunter2");
        let id = user.id.clone();
        let entity = Entity::from(user);
        assert_eq!(entity.kind(), EntityKind::User);
        assert_eq!(entity.key(), format!("User.{id}"));
    }

    #[test]
    fn test_entity_serializes_with_class_tag() {
        let state = State::new("California");
        let value = serde_json::to_value(Entity::from(state)).unwrap();
        assert_eq!(value["__class__"], "State");
        assert_eq!(value["name"], "California");
    }
}
