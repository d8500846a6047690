//! DDL for the six catalog tables.
//!
//! `create_all` is idempotent (`CREATE TABLE IF NOT EXISTS`) and runs in
//! foreign-key dependency order. `drop_all` disables foreign-key checks for
//! the duration so drop order does not matter; the statements are
//! backend-specific (`SET FOREIGN_KEY_CHECKS` on MySQL, `PRAGMA
//! foreign_keys` on SQLite).

use sqlx::AnyConnection;

use hbnb_types::entity::EntityKind;
use hbnb_types::error::StorageError;

use crate::engine::Backend;

/// Creation order respecting foreign-key dependencies: cities reference
/// states, places reference cities and users, reviews reference places and
/// users.
const CREATE_ORDER: [EntityKind; 6] = [
    EntityKind::State,
    EntityKind::User,
    EntityKind::Amenity,
    EntityKind::City,
    EntityKind::Place,
    EntityKind::Review,
];

fn create_sql(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::State => {
            "CREATE TABLE IF NOT EXISTS states (
                id VARCHAR(60) PRIMARY KEY,
                created_at VARCHAR(40) NOT NULL,
                updated_at VARCHAR(40) NOT NULL,
                name VARCHAR(128) NOT NULL
            )"
        }
        EntityKind::User => {
            "CREATE TABLE IF NOT EXISTS users (
                id VARCHAR(60) PRIMARY KEY,
                created_at VARCHAR(40) NOT NULL,
                updated_at VARCHAR(40) NOT NULL,
                email VARCHAR(128) NOT NULL,
                password VARCHAR(128) NOT NULL,
                first_name VARCHAR(128),
                last_name VARCHAR(128)
            )"
        }
        EntityKind::Amenity => {
            "CREATE TABLE IF NOT EXISTS amenities (
                id VARCHAR(60) PRIMARY KEY,
                created_at VARCHAR(40) NOT NULL,
                updated_at VARCHAR(40) NOT NULL,
                name VARCHAR(128) NOT NULL
            )"
        }
        EntityKind::City => {
            "CREATE TABLE IF NOT EXISTS cities (
                id VARCHAR(60) PRIMARY KEY,
                created_at VARCHAR(40) NOT NULL,
                updated_at VARCHAR(40) NOT NULL,
                state_id VARCHAR(60) NOT NULL,
                name VARCHAR(128) NOT NULL,
                FOREIGN KEY (state_id) REFERENCES states (id)
            )"
        }
        EntityKind::Place => {
            "CREATE TABLE IF NOT EXISTS places (
                id VARCHAR(60) PRIMARY KEY,
                created_at VARCHAR(40) NOT NULL,
                updated_at VARCHAR(40) NOT NULL,
                city_id VARCHAR(60) NOT NULL,
                user_id VARCHAR(60) NOT NULL,
                name VARCHAR(128) NOT NULL,
                description VARCHAR(1024),
                number_rooms BIGINT NOT NULL,
                number_bathrooms BIGINT NOT NULL,
                max_guest BIGINT NOT NULL,
                price_by_night BIGINT NOT NULL,
                latitude DOUBLE PRECISION,
                longitude DOUBLE PRECISION,
                FOREIGN KEY (city_id) REFERENCES cities (id),
                FOREIGN KEY (user_id) REFERENCES users (id)
            )"
        }
        EntityKind::Review => {
            "CREATE TABLE IF NOT EXISTS reviews (
                id VARCHAR(60) PRIMARY KEY,
                created_at VARCHAR(40) NOT NULL,
                updated_at VARCHAR(40) NOT NULL,
                place_id VARCHAR(60) NOT NULL,
                user_id VARCHAR(60) NOT NULL,
                text VARCHAR(1024) NOT NULL,
                FOREIGN KEY (place_id) REFERENCES places (id),
                FOREIGN KEY (user_id) REFERENCES users (id)
            )"
        }
    }
}

/// Create every catalog table that does not yet exist.
pub(crate) async fn create_all(conn: &mut AnyConnection) -> Result<(), StorageError> {
    for kind in CREATE_ORDER {
        sqlx::query(create_sql(kind))
            .execute(&mut *conn)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;
    }
    Ok(())
}

/// Drop every catalog table, existing or not.
pub(crate) async fn drop_all(
    conn: &mut AnyConnection,
    backend: Backend,
) -> Result<(), StorageError> {
    set_foreign_key_checks(conn, backend, false).await?;
    for kind in CREATE_ORDER.iter().rev() {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", kind.table()))
            .execute(&mut *conn)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;
    }
    set_foreign_key_checks(conn, backend, true).await?;
    Ok(())
}

async fn set_foreign_key_checks(
    conn: &mut AnyConnection,
    backend: Backend,
    enabled: bool,
) -> Result<(), StorageError> {
    let sql = match (backend, enabled) {
        (Backend::MySql, true) => "SET FOREIGN_KEY_CHECKS = 1",
        (Backend::MySql, false) => "SET FOREIGN_KEY_CHECKS = 0",
        (Backend::Sqlite, true) => "PRAGMA foreign_keys = ON",
        (Backend::Sqlite, false) => "PRAGMA foreign_keys = OFF",
    };
    sqlx::query(sql)
        .execute(&mut *conn)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;

    async fn test_engine() -> Engine {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("schema.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        // Leak tempdir so the database file lives for the test
        std::mem::forget(dir);
        Engine::connect(&url).await.unwrap()
    }

    async fn table_names(engine: &Engine) -> Vec<String> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' \
             AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&engine.pool)
        .await
        .unwrap();
        rows.into_iter().map(|r| r.0).collect()
    }

    #[tokio::test]
    async fn test_create_all_makes_six_tables() {
        let engine = test_engine().await;
        let mut conn = engine.pool.acquire().await.unwrap();
        create_all(&mut conn).await.unwrap();
        drop(conn);

        let tables = table_names(&engine).await;
        assert_eq!(
            tables,
            vec!["amenities", "cities", "places", "reviews", "states", "users"]
        );
    }

    #[tokio::test]
    async fn test_create_all_is_idempotent() {
        let engine = test_engine().await;
        let mut conn = engine.pool.acquire().await.unwrap();
        create_all(&mut conn).await.unwrap();
        create_all(&mut conn).await.unwrap();
        drop(conn);

        assert_eq!(table_names(&engine).await.len(), 6);
    }

    #[tokio::test]
    async fn test_drop_all_removes_every_table() {
        let engine = test_engine().await;
        let mut conn = engine.pool.acquire().await.unwrap();
        create_all(&mut conn).await.unwrap();
        drop_all(&mut conn, engine.backend).await.unwrap();
        drop(conn);

        assert!(table_names(&engine).await.is_empty());
    }

    #[tokio::test]
    async fn test_drop_all_on_missing_tables_is_fine() {
        let engine = test_engine().await;
        let mut conn = engine.pool.acquire().await.unwrap();
        drop_all(&mut conn, engine.backend).await.unwrap();
    }
}
