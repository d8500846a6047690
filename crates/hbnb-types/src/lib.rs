//! Shared domain types for the hbnb catalog.
//!
//! This crate contains the six catalog entities (User, State, City, Amenity,
//! Place, Review), the `Entity`/`EntityKind` sum types the storage layer
//! dispatches on, the storage error taxonomy, and environment-driven
//! configuration.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod amenity;
pub mod city;
pub mod config;
pub mod entity;
pub mod error;
pub mod place;
pub mod review;
pub mod state;
pub mod user;
