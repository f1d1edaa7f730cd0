//! Ordered event storage with optional JSON-file persistence.
//!
//! Events keep insertion order. A new id is one past the id of the last
//! event, or 1 for an empty book. When a data file is configured every
//! mutation rewrites it, and a failed write undoes the in-memory change.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::{Event, EventInput};

#[derive(Debug, Error)]
pub enum BookError {
    #[error("reading or writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a valid event list: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no event id left after {0}")]
    IdsExhausted(i64),
}

#[derive(Debug, Default)]
pub struct EventBook {
    events: Vec<Event>,
    data_file: Option<PathBuf>,
}

impl EventBook {
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load the book backed by `path`. A missing or empty file is an empty book.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, BookError> {
        let path = path.into();
        let events = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|source| BookError::Json {
                path: path.clone(),
                source,
            })?,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(source) => return Err(BookError::Io { path, source }),
        };
        info!(path = %path.display(), count = events.len(), "opened event book");
        Ok(Self {
            events,
            data_file: Some(path),
        })
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    fn next_id(&self) -> Result<i64, BookError> {
        match self.events.last() {
            None => Ok(1),
            Some(last) => last.id.checked_add(1).ok_or(BookError::IdsExhausted(last.id)),
        }
    }

    pub async fn create(&mut self, input: EventInput) -> Result<Event, BookError> {
        let event = Event {
            id: self.next_id()?,
            title: input.title,
            date: input.date,
        };
        self.events.push(event.clone());
        if let Err(err) = self.persist().await {
            self.events.pop();
            return Err(err);
        }
        Ok(event)
    }

    /// Replace the fields of event `id`. `Ok(None)` when there is no such event.
    pub async fn update(&mut self, id: i64, input: EventInput) -> Result<Option<Event>, BookError> {
        let Some(index) = self.events.iter().position(|event| event.id == id) else {
            return Ok(None);
        };
        let updated = Event {
            id,
            title: input.title,
            date: input.date,
        };
        let previous = std::mem::replace(&mut self.events[index], updated.clone());
        if let Err(err) = self.persist().await {
            self.events[index] = previous;
            return Err(err);
        }
        Ok(Some(updated))
    }

    /// Remove event `id`. `Ok(false)` when there is no such event.
    pub async fn delete(&mut self, id: i64) -> Result<bool, BookError> {
        let Some(index) = self.events.iter().position(|event| event.id == id) else {
            return Ok(false);
        };
        let removed = self.events.remove(index);
        if let Err(err) = self.persist().await {
            self.events.insert(index, removed);
            return Err(err);
        }
        Ok(true)
    }

    async fn persist(&self) -> Result<(), BookError> {
        let Some(path) = &self.data_file else {
            return Ok(());
        };
        let data = serde_json::to_vec_pretty(&self.events).map_err(|source| BookError::Json {
            path: path.clone(),
            source,
        })?;
        write(path, &data).await
    }
}

async fn write(path: &Path, data: &[u8]) -> Result<(), BookError> {
    tokio::fs::write(path, data).await.map_err(|source| BookError::Io {
        path: path.to_path_buf(),
        source,
    })
}
