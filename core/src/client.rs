//! Stateless HTTP request builder and response parser for the event API.
//!
//! # Design
//! `EventClient` holds only the backend origin and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Any 2xx status counts as success; error bodies are kept
//! for diagnostics but never parsed.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Event, EventId, NewEvent, UpdateEvent};

/// Origin the backend listens on when nothing else is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";

const EVENTS_PATH: &str = "/api/events";

/// Synchronous, stateless client for the event API.
#[derive(Debug, Clone)]
pub struct EventClient {
    base_url: String,
}

impl Default for EventClient {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl EventClient {
    pub fn new(origin: &str) -> Self {
        Self {
            base_url: format!("{}{EVENTS_PATH}", origin.trim_end_matches('/')),
        }
    }

    /// Collection URL, e.g. `http://localhost:8080/api/events`.
    pub fn collection_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_events(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.base_url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_event(&self, input: &NewEvent) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: self.base_url.clone(),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_update_event(&self, id: EventId, input: &UpdateEvent) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            path: format!("{}/{id}", self.base_url),
            headers: json_headers(),
            body: Some(to_json(input)?),
        })
    }

    pub fn build_delete_event(&self, id: EventId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: format!("{}/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_events(&self, response: HttpResponse) -> Result<Vec<Event>, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_create_event(&self, response: HttpResponse) -> Result<Event, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_update_event(&self, response: HttpResponse) -> Result<Event, ApiError> {
        check_status(&response)?;
        from_json(&response.body)
    }

    pub fn parse_delete_event(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn to_json<T: serde::Serialize>(input: &T) -> Result<String, ApiError> {
    serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn from_json<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::Server {
        status: response.status,
        body: response.body.clone(),
    })
}
