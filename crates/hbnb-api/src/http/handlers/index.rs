//! Index endpoints of the route group: liveness and catalog stats.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use hbnb_types::entity::EntityKind;

use crate::http::error::AppError;
use crate::state::AppState;

/// GET /api/v1/status - liveness probe.
pub async fn status() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}

/// GET /api/v1/stats - number of persisted objects per kind, keyed by
/// table name.
pub async fn stats(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let storage = state.storage.lock().await;

    let mut counts = serde_json::Map::new();
    for kind in EntityKind::ALL {
        let count = storage.count(Some(kind)).await?;
        counts.insert(kind.table().to_string(), Value::from(count as u64));
    }

    Ok(Json(Value::Object(counts)))
}
