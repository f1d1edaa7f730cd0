//! Reference backend for the countdown event API.
//!
//! Serves `GET`/`POST /api/events` and `PUT`/`DELETE /api/events/{id}` over
//! an ordered `EventBook`. Error responses are short plain-text messages.

pub mod book;
pub mod config;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::error;

pub use book::{BookError, EventBook};
pub use config::ServerConfig;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
}

/// Body of both create and update requests. Any `id` in the body is ignored.
#[derive(Debug, Deserialize)]
pub struct EventInput {
    pub title: String,
    pub date: NaiveDate,
}

pub type Db = Arc<RwLock<EventBook>>;

type Failure = (StatusCode, &'static str);

/// Router over a fresh in-memory book.
pub fn app() -> Router {
    router(Arc::new(RwLock::new(EventBook::in_memory())))
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/api/events", get(list_events).post(create_event))
        .route("/api/events/", get(list_events).post(create_event))
        .route("/api/events/{id}", put(update_event).delete(delete_event))
        .with_state(db)
}

/// Router with CORS for the configured front-end origin, request tracing,
/// and panic recovery.
pub fn service(db: Db, config: &ServerConfig) -> anyhow::Result<Router> {
    with_layers(router(db), config)
}

/// Wrap `routes` in the middleware stack `service` uses. A handler panic
/// becomes a 500 response instead of dropping the connection.
pub fn with_layers(routes: Router, config: &ServerConfig) -> anyhow::Result<Router> {
    let origin: HeaderValue = config.allowed_origin.parse()?;
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::LINK])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(300));
    Ok(routes
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_events(State(db): State<Db>) -> Json<Vec<Event>> {
    Json(db.read().await.events().to_vec())
}

async fn create_event(
    State(db): State<Db>,
    Json(input): Json<EventInput>,
) -> Result<(StatusCode, Json<Event>), Failure> {
    let event = db.write().await.create(input).await.map_err(|err| {
        error!(error = %err, "failed to save event");
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save item")
    })?;
    Ok((StatusCode::CREATED, Json(event)))
}

async fn update_event(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<EventInput>,
) -> Result<Json<Event>, Failure> {
    let updated = db.write().await.update(id, input).await.map_err(|err| {
        error!(id, error = %err, "failed to update event");
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update item")
    })?;
    updated.map(Json).ok_or((StatusCode::NOT_FOUND, "Item not found"))
}

async fn delete_event(State(db): State<Db>, Path(id): Path<i64>) -> Result<StatusCode, Failure> {
    let removed = db.write().await.delete(id).await.map_err(|err| {
        error!(id, error = %err, "failed to delete event");
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete item")
    })?;
    if removed {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, "Item not found"))
    }
}
