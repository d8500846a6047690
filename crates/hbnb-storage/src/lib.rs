//! Relational storage engine for the hbnb catalog.
//!
//! [`DbStorage`] is the single access point to the relational store. It owns
//! a connection pool (the engine) and an explicit session -- a unit-of-work
//! buffer of staged inserts -- and exposes the catalog operations: `all`,
//! `new`, `save`, `delete`, `reload`, `close`, `count`, `get`, and
//! `drop_all_tables`.
//!
//! The sqlx `Any` driver covers both backends: MySQL in production (URL
//! composed from the `HBNB_MYSQL_*` environment) and SQLite for tests and
//! local runs.

pub mod engine;
mod rows;
mod schema;
mod session;
mod storage;

pub use storage::DbStorage;
