//! Client core for the countdown event service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). A `Transport` performs the
//! round-trip, `HttpEventStore` wraps both behind the async `EventStore`
//! trait, and `CountdownController` keeps the in-memory event list in step
//! with the backend.
//!
//! # Design
//! - `EventClient` is stateless: it holds only the backend origin.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - The controller only ever holds records the backend returned; days left
//!   are derived on demand from a caller-supplied instant.
//! - DTOs are defined independently from the server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controller;
pub mod countdown;
pub mod error;
pub mod http;
pub mod store;
pub mod transport;
pub mod types;

pub use client::{EventClient, DEFAULT_ORIGIN};
pub use controller::{CountdownController, Outcome};
pub use countdown::{days_left, Clock, Countdown, FixedClock, SystemClock};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{EventStore, HttpEventStore};
pub use transport::{Transport, UreqTransport};
pub use types::{parse_date, Event, EventId, NewEvent, UpdateEvent};
