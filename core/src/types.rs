//! Domain DTOs for the event API.
//!
//! # Design
//! These types mirror the server's schema but are defined independently.
//! A persisted `Event` always carries its backend-assigned `EventId`; an
//! event that has not been saved yet is a `NewEvent`, which has no id field
//! at all. Integration tests catch any schema drift between the two crates.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Opaque identifier assigned by the backend when an event is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EventId)
    }
}

/// A countdown target as stored by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
}

/// Request payload for creating a new event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub date: NaiveDate,
}

impl NewEvent {
    /// Build a payload from raw form input. The date must be `YYYY-MM-DD`.
    pub fn parse(title: &str, date: &str) -> Result<Self, ApiError> {
        Ok(Self {
            title: title.to_string(),
            date: parse_date(date)?,
        })
    }
}

/// Request payload for replacing an existing event's fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateEvent {
    pub title: String,
    pub date: NaiveDate,
}

/// Parse an ISO-8601 calendar date as produced by a date input.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ApiError::InvalidDate(raw.to_string()))
}
