//! `DbStorage`: the single access point to the relational store.

use std::collections::BTreeMap;

use sqlx::Any;
use sqlx::any::AnyArguments;
use sqlx::query::Query;

use hbnb_types::config::{RuntimeEnv, StorageConfig};
use hbnb_types::entity::{Entity, EntityKind};
use hbnb_types::error::StorageError;

use crate::engine::Engine;
use crate::rows::{entity_from_row, format_datetime};
use crate::schema;
use crate::session::Session;

/// Storage-access layer wrapping a connection pool and an explicit session.
///
/// Constructed once at process start and shared by reference; the session
/// moves it between two states: not ready (after construction or `close()`)
/// and ready (after `reload()`). Every operation other than `reload()` and
/// `close()` fails with [`StorageError::NotReady`] while no session exists.
pub struct DbStorage {
    engine: Engine,
    session: Option<Session>,
}

impl DbStorage {
    /// Connect to the database named by `config`.
    ///
    /// When the runtime environment is `test`, all known tables are dropped
    /// immediately -- destructive, and the flag is the only gate. No session
    /// is established; call [`reload`](Self::reload) before using the store.
    pub async fn connect(config: &StorageConfig) -> Result<Self, StorageError> {
        let engine = Engine::connect(&config.database_url()).await?;
        let storage = Self {
            engine,
            session: None,
        };

        if config.env == RuntimeEnv::Test {
            tracing::warn!("test environment: dropping all tables");
            let mut conn = storage.acquire().await?;
            schema::drop_all(&mut conn, storage.engine.backend).await?;
        }

        Ok(storage)
    }

    /// Every persisted object, keyed by `"ClassName.id"`, across all six
    /// kinds or restricted to one.
    pub async fn all(
        &self,
        kind: Option<EntityKind>,
    ) -> Result<BTreeMap<String, Entity>, StorageError> {
        self.ready()?;

        let kinds = match kind {
            Some(k) => vec![k],
            None => EntityKind::ALL.to_vec(),
        };

        let mut objects = BTreeMap::new();
        for k in kinds {
            let rows = sqlx::query(&format!("SELECT * FROM {}", k.table()))
                .fetch_all(&self.engine.pool)
                .await
                .map_err(|e| StorageError::Query(e.to_string()))?;
            for row in &rows {
                let entity = entity_from_row(k, row)?;
                objects.insert(entity.key(), entity);
            }
        }
        Ok(objects)
    }

    /// Stage `entity` for insertion. No duplicate check is performed here;
    /// the store's constraints decide at commit.
    pub fn new(&mut self, entity: impl Into<Entity>) -> Result<(), StorageError> {
        let session = self.session.as_mut().ok_or(StorageError::NotReady)?;
        session.staged.push(entity.into());
        Ok(())
    }

    /// Commit all staged insertions in one transaction.
    ///
    /// Constraint violations and connectivity failures propagate; there is
    /// no retry. On failure the staging buffer is left intact.
    pub async fn save(&mut self) -> Result<(), StorageError> {
        let session = self.session.as_mut().ok_or(StorageError::NotReady)?;

        let mut tx = self
            .engine
            .pool
            .begin()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        for entity in &session.staged {
            insert_query(entity)
                .execute(&mut *tx)
                .await
                .map_err(|e| StorageError::Query(e.to_string()))?;
        }
        tx.commit()
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;

        session.staged.clear();
        Ok(())
    }

    /// Delete `entity`, committing immediately. `None` is a deliberate
    /// no-op. A matching staged entity is discarded as well.
    pub async fn delete(&mut self, entity: Option<&Entity>) -> Result<(), StorageError> {
        let Some(entity) = entity else {
            return Ok(());
        };

        let session = self.session.as_mut().ok_or(StorageError::NotReady)?;
        let key = entity.key();
        session.staged.retain(|staged| staged.key() != key);

        sqlx::query(&format!(
            "DELETE FROM {} WHERE id = ?",
            entity.kind().table()
        ))
        .bind(entity.id())
        .execute(&self.engine.pool)
        .await
        .map_err(|e| StorageError::Query(e.to_string()))?;
        Ok(())
    }

    /// Create the schema if absent and establish a fresh session.
    ///
    /// Idempotent with respect to schema creation. Any previously staged
    /// work is discarded with the old session.
    pub async fn reload(&mut self) -> Result<(), StorageError> {
        let mut conn = self.acquire().await?;
        schema::create_all(&mut conn).await?;
        drop(conn);

        self.session = Some(Session::new());
        Ok(())
    }

    /// Release the current session. Operations fail with
    /// [`StorageError::NotReady`] until the next [`reload`](Self::reload).
    pub fn close(&mut self) {
        self.session = None;
    }

    /// Number of persisted objects, for one kind or all.
    ///
    /// Counts by materializing `all(kind)`; there is no dedicated COUNT
    /// query.
    pub async fn count(&self, kind: Option<EntityKind>) -> Result<usize, StorageError> {
        Ok(self.all(kind).await?.len())
    }

    /// The record of `kind` with primary key `id`, or `None`.
    pub async fn get(&self, kind: EntityKind, id: &str) -> Result<Option<Entity>, StorageError> {
        self.ready()?;

        let row = sqlx::query(&format!("SELECT * FROM {} WHERE id = ?", kind.table()))
            .bind(id)
            .fetch_optional(&self.engine.pool)
            .await
            .map_err(|e| StorageError::Query(e.to_string()))?;
        row.map(|row| entity_from_row(kind, &row)).transpose()
    }

    /// Drop all tables and recreate the schema with a fresh session.
    ///
    /// Foreign-key checks are disabled while dropping, and any open staged
    /// work is rolled back first. Test teardown only; not safe for
    /// concurrent use.
    pub async fn drop_all_tables(&mut self) -> Result<(), StorageError> {
        let session = self.session.as_mut().ok_or(StorageError::NotReady)?;
        session.rollback();

        let mut conn = self.acquire().await?;
        schema::drop_all(&mut conn, self.engine.backend).await?;
        drop(conn);

        self.reload().await
    }

    fn ready(&self) -> Result<(), StorageError> {
        if self.session.is_none() {
            return Err(StorageError::NotReady);
        }
        Ok(())
    }

    async fn acquire(&self) -> Result<sqlx::pool::PoolConnection<Any>, StorageError> {
        self.engine
            .pool
            .acquire()
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

fn insert_sql(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Amenity => {
            "INSERT INTO amenities (id, created_at, updated_at, name) VALUES (?, ?, ?, ?)"
        }
        EntityKind::City => {
            "INSERT INTO cities (id, created_at, updated_at, state_id, name) \
             VALUES (?, ?, ?, ?, ?)"
        }
        EntityKind::Place => {
            "INSERT INTO places (id, created_at, updated_at, city_id, user_id, name, \
             description, number_rooms, number_bathrooms, max_guest, price_by_night, \
             latitude, longitude) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
        }
        EntityKind::Review => {
            "INSERT INTO reviews (id, created_at, updated_at, place_id, user_id, text) \
             VALUES (?, ?, ?, ?, ?, ?)"
        }
        EntityKind::State => {
            "INSERT INTO states (id, created_at, updated_at, name) VALUES (?, ?, ?, ?)"
        }
        EntityKind::User => {
            "INSERT INTO users (id, created_at, updated_at, email, password, first_name, \
             last_name) VALUES (?, ?, ?, ?, ?, ?, ?)"
        }
    }
}

fn insert_query(entity: &Entity) -> Query<'_, Any, AnyArguments<'_>> {
    let query = sqlx::query(insert_sql(entity.kind()));
    match entity {
        Entity::Amenity(a) => query
            .bind(&a.id)
            .bind(format_datetime(&a.created_at))
            .bind(format_datetime(&a.updated_at))
            .bind(&a.name),
        Entity::City(c) => query
            .bind(&c.id)
            .bind(format_datetime(&c.created_at))
            .bind(format_datetime(&c.updated_at))
            .bind(&c.state_id)
            .bind(&c.name),
        Entity::Place(p) => query
            .bind(&p.id)
            .bind(format_datetime(&p.created_at))
            .bind(format_datetime(&p.updated_at))
            .bind(&p.city_id)
            .bind(&p.user_id)
            .bind(&p.name)
            .bind(&p.description)
            .bind(p.number_rooms)
            .bind(p.number_bathrooms)
            .bind(p.max_guest)
            .bind(p.price_by_night)
            .bind(p.latitude)
            .bind(p.longitude),
        Entity::Review(r) => query
            .bind(&r.id)
            .bind(format_datetime(&r.created_at))
            .bind(format_datetime(&r.updated_at))
            .bind(&r.place_id)
            .bind(&r.user_id)
            .bind(&r.text),
        Entity::State(s) => query
            .bind(&s.id)
            .bind(format_datetime(&s.created_at))
            .bind(format_datetime(&s.updated_at))
            .bind(&s.name),
        Entity::User(u) => query
            .bind(&u.id)
            .bind(format_datetime(&u.created_at))
            .bind(format_datetime(&u.updated_at))
            .bind(&u.email)
            .bind(&u.password)
            .bind(&u.first_name)
            .bind(&u.last_name),
    }
}
