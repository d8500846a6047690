//! Explicit unit-of-work session.
//!
//! The original store scoped sessions to threads behind the ORM's back;
//! here the session is a plain struct owned by `DbStorage`: created by
//! `reload()`, discarded by `close()`.

use hbnb_types::entity::Entity;

/// Staged, not-yet-durable work.
#[derive(Debug, Default)]
pub(crate) struct Session {
    /// Entities staged for insertion, committed by `save()` in order.
    pub staged: Vec<Entity>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard staged work without committing it.
    pub fn rollback(&mut self) {
        self.staged.clear();
    }
}
