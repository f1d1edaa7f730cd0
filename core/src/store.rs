//! Async event store: the request/response client bound to a transport.
//!
//! # Design
//! `EventStore` is the seam the controller talks to, so tests can swap in a
//! scripted store. `HttpEventStore` runs each blocking round-trip on tokio's
//! blocking pool; the returned future resolves once the single request has
//! completed. Overlapping calls are not ordered relative to each other.

use std::sync::Arc;

use tracing::debug;

use crate::client::EventClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Event, EventId, NewEvent, UpdateEvent};

/// Backend operations the countdown view depends on.
#[allow(async_fn_in_trait)]
pub trait EventStore {
    async fn list_events(&self) -> Result<Vec<Event>, ApiError>;

    /// Returns the record as saved by the backend, including its new id.
    async fn create_event(&self, input: NewEvent) -> Result<Event, ApiError>;

    async fn update_event(&self, id: EventId, input: UpdateEvent) -> Result<Event, ApiError>;

    async fn delete_event(&self, id: EventId) -> Result<(), ApiError>;
}

/// `EventStore` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpEventStore<T = UreqTransport> {
    client: EventClient,
    transport: Arc<T>,
}

impl HttpEventStore<UreqTransport> {
    pub fn new(origin: &str) -> Self {
        Self::with_transport(EventClient::new(origin), UreqTransport::new())
    }
}

impl<T: Transport> HttpEventStore<T> {
    pub fn with_transport(client: EventClient, transport: T) -> Self {
        Self {
            client,
            transport: Arc::new(transport),
        }
    }

    pub fn client(&self) -> &EventClient {
        &self.client
    }

    async fn round_trip(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = request.method.as_str(), path = %request.path, "sending request");
        let transport = Arc::clone(&self.transport);
        let response = tokio::task::spawn_blocking(move || transport.execute(request))
            .await
            .map_err(|e| ApiError::Network(format!("request task failed: {e}")))??;
        debug!(status = response.status, "received response");
        Ok(response)
    }
}

impl<T: Transport> EventStore for HttpEventStore<T> {
    async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        let response = self.round_trip(self.client.build_list_events()).await?;
        self.client.parse_list_events(response)
    }

    async fn create_event(&self, input: NewEvent) -> Result<Event, ApiError> {
        let request = self.client.build_create_event(&input)?;
        let response = self.round_trip(request).await?;
        self.client.parse_create_event(response)
    }

    async fn update_event(&self, id: EventId, input: UpdateEvent) -> Result<Event, ApiError> {
        let request = self.client.build_update_event(id, &input)?;
        let response = self.round_trip(request).await?;
        self.client.parse_update_event(response)
    }

    async fn delete_event(&self, id: EventId) -> Result<(), ApiError> {
        let response = self.round_trip(self.client.build_delete_event(id)).await?;
        self.client.parse_delete_event(response)
    }
}
