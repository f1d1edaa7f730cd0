//! View controller that keeps the local event list in step with the backend.
//!
//! # Design
//! The controller owns its state outright and is mutated only through
//! `load`, `add` and `delete`. The list only ever holds records the backend
//! returned: `add` appends the server's copy, never the form input.
//!
//! Failures are logged and swallowed; the returned `Outcome` only lets a
//! front-end pick an exit code. Every operation takes `&mut self`, so one
//! owner runs them one at a time. Two controllers over the same backend are
//! not coordinated: a delete that lands after another view's list response
//! was captured leaves that view showing the deleted event until it reloads.

use chrono::{DateTime, TimeZone};
use tracing::{error, info};

use crate::countdown::{days_left, Countdown};
use crate::error::ApiError;
use crate::store::EventStore;
use crate::types::{Event, EventId, NewEvent};

/// Result of a controller operation, after failures have been logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The backend confirmed the operation and local state reflects it.
    Applied,
    /// A guard short-circuited the operation; no request was issued.
    Skipped,
    /// The operation failed; local state is unchanged.
    Failed,
}

#[derive(Debug)]
pub struct CountdownController<S> {
    store: S,
    events: Vec<Event>,
    pending_title: String,
    pending_date: String,
    loaded: bool,
}

impl<S: EventStore> CountdownController<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            events: Vec::new(),
            pending_title: String::new(),
            pending_date: String::new(),
            loaded: false,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn pending_title(&self) -> &str {
        &self.pending_title
    }

    pub fn pending_date(&self) -> &str {
        &self.pending_date
    }

    /// True once the initial load has finished, whether or not it succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn set_pending_title(&mut self, title: impl Into<String>) {
        self.pending_title = title.into();
    }

    /// Raw date input, expected as `YYYY-MM-DD`.
    pub fn set_pending_date(&mut self, date: impl Into<String>) {
        self.pending_date = date.into();
    }

    /// Replace the local list with whatever the backend holds.
    pub async fn load(&mut self) -> Outcome {
        let outcome = match self.store.list_events().await {
            Ok(events) => {
                info!(count = events.len(), "loaded events");
                self.events = events;
                Outcome::Applied
            }
            Err(err) => {
                log_failure("failed to fetch events", &err);
                Outcome::Failed
            }
        };
        self.loaded = true;
        outcome
    }

    /// Create an event from the pending fields.
    pub async fn add(&mut self) -> Outcome {
        if self.pending_title.is_empty() || self.pending_date.is_empty() {
            return Outcome::Skipped;
        }
        let input = match NewEvent::parse(&self.pending_title, &self.pending_date) {
            Ok(input) => input,
            Err(err) => {
                log_failure("failed to save event", &err);
                return Outcome::Failed;
            }
        };
        match self.store.create_event(input).await {
            Ok(saved) => {
                info!(id = %saved.id, title = %saved.title, "saved event");
                self.events.push(saved);
                self.pending_title.clear();
                self.pending_date.clear();
                Outcome::Applied
            }
            Err(err) => {
                log_failure("failed to save event", &err);
                Outcome::Failed
            }
        }
    }

    /// Delete an event on the backend, then drop every local copy of it.
    pub async fn delete(&mut self, id: EventId) -> Outcome {
        match self.store.delete_event(id).await {
            Ok(()) => {
                self.events.retain(|event| event.id != id);
                info!(%id, "deleted event");
                Outcome::Applied
            }
            Err(err) => {
                log_failure(&format!("failed to delete event {id}"), &err);
                Outcome::Failed
            }
        }
    }

    /// Days left for each event, computed against `now`.
    pub fn days_left<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<(&Event, i64)> {
        self.events.iter().map(|event| (event, days_left(event.date, now))).collect()
    }

    /// Display value for each event, computed against `now`.
    pub fn countdowns<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Vec<(&Event, Countdown)> {
        self.events
            .iter()
            .map(|event| (event, Countdown::for_date(event.date, now)))
            .collect()
    }
}

fn failure_kind(err: &ApiError) -> &'static str {
    if err.is_network() {
        "network"
    } else if err.is_server() {
        "server"
    } else {
        "local"
    }
}

fn log_failure(what: &str, err: &ApiError) {
    error!(kind = failure_kind(err), status = ?err.status(), error = %err, "{what}");
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use super::*;
    use crate::types::UpdateEvent;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List,
        Create(NewEvent),
        Delete(EventId),
    }

    /// Scripted store: each operation pops its next canned reply.
    #[derive(Default)]
    struct StubStore {
        calls: Mutex<Vec<Call>>,
        lists: Mutex<VecDeque<Result<Vec<Event>, ApiError>>>,
        creates: Mutex<VecDeque<Result<Event, ApiError>>>,
        deletes: Mutex<VecDeque<Result<(), ApiError>>>,
    }

    impl StubStore {
        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn reply_list(self, reply: Result<Vec<Event>, ApiError>) -> Self {
            self.lists.lock().unwrap().push_back(reply);
            self
        }

        fn reply_create(self, reply: Result<Event, ApiError>) -> Self {
            self.creates.lock().unwrap().push_back(reply);
            self
        }

        fn reply_delete(self, reply: Result<(), ApiError>) -> Self {
            self.deletes.lock().unwrap().push_back(reply);
            self
        }
    }

    impl EventStore for StubStore {
        async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
            self.calls.lock().unwrap().push(Call::List);
            self.lists.lock().unwrap().pop_front().expect("unscripted list")
        }

        async fn create_event(&self, input: NewEvent) -> Result<Event, ApiError> {
            self.calls.lock().unwrap().push(Call::Create(input));
            self.creates.lock().unwrap().pop_front().expect("unscripted create")
        }

        async fn update_event(&self, _id: EventId, _input: UpdateEvent) -> Result<Event, ApiError> {
            unreachable!("the controller never edits events")
        }

        async fn delete_event(&self, id: EventId) -> Result<(), ApiError> {
            self.calls.lock().unwrap().push(Call::Delete(id));
            self.deletes.lock().unwrap().pop_front().expect("unscripted delete")
        }
    }

    fn event(id: i64, title: &str, date: &str) -> Event {
        Event {
            id: EventId(id),
            title: title.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        }
    }

    fn server_error() -> ApiError {
        ApiError::Server {
            status: 500,
            body: "Failed to save item".to_string(),
        }
    }

    async fn seeded(events: Vec<Event>, store: StubStore) -> CountdownController<StubStore> {
        store.lists.lock().unwrap().push_front(Ok(events));
        let mut controller = CountdownController::new(store);
        assert_eq!(controller.load().await, Outcome::Applied);
        controller
    }

    #[test]
    fn failures_are_classified_for_logging() {
        assert_eq!(failure_kind(&ApiError::Network("refused".into())), "network");
        assert_eq!(failure_kind(&ApiError::NotFound), "server");
        assert_eq!(failure_kind(&server_error()), "server");
        assert_eq!(failure_kind(&ApiError::InvalidDate("soon".into())), "local");
    }

    #[tokio::test]
    async fn starts_empty_and_unloaded() {
        let controller = CountdownController::new(StubStore::default());
        assert!(controller.events().is_empty());
        assert!(!controller.is_loaded());
        assert_eq!(controller.pending_title(), "");
        assert_eq!(controller.pending_date(), "");
    }

    #[tokio::test]
    async fn load_replaces_events_wholesale() {
        let store = StubStore::default().reply_list(Ok(vec![event(9, "Fresh", "2024-03-01")]));
        let mut controller = seeded(vec![event(1, "Old", "2024-01-01"), event(2, "Older", "2024-02-01")], store).await;

        assert_eq!(controller.load().await, Outcome::Applied);

        assert_eq!(controller.events(), &[event(9, "Fresh", "2024-03-01")]);
    }

    #[tokio::test]
    async fn failed_load_leaves_events_empty_and_marks_loaded() {
        let store = StubStore::default().reply_list(Err(ApiError::Network("connection refused".into())));
        let mut controller = CountdownController::new(store);

        assert_eq!(controller.load().await, Outcome::Failed);

        assert!(controller.events().is_empty());
        assert!(controller.is_loaded());
        assert_eq!(controller.store().calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn add_with_empty_title_issues_no_request() {
        let mut controller = CountdownController::new(StubStore::default());
        controller.set_pending_date("2025-01-01");

        assert_eq!(controller.add().await, Outcome::Skipped);

        assert!(controller.store().calls().is_empty());
        assert!(controller.events().is_empty());
        assert_eq!(controller.pending_date(), "2025-01-01");
    }

    #[tokio::test]
    async fn add_with_empty_date_issues_no_request() {
        let mut controller = CountdownController::new(StubStore::default());
        controller.set_pending_title("Trip");

        assert_eq!(controller.add().await, Outcome::Skipped);

        assert!(controller.store().calls().is_empty());
        assert_eq!(controller.pending_title(), "Trip");
    }

    #[tokio::test]
    async fn add_with_malformed_date_issues_no_request() {
        let mut controller = CountdownController::new(StubStore::default());
        controller.set_pending_title("Trip");
        controller.set_pending_date("next tuesday");

        assert_eq!(controller.add().await, Outcome::Failed);

        assert!(controller.store().calls().is_empty());
        assert_eq!(controller.pending_date(), "next tuesday");
    }

    #[tokio::test]
    async fn successful_add_appends_server_record_and_clears_fields() {
        let store = StubStore::default().reply_create(Ok(event(3, "Trip (saved)", "2025-06-01")));
        let mut controller = seeded(vec![event(1, "A", "2024-01-01")], store).await;
        controller.set_pending_title("Trip");
        controller.set_pending_date("2025-06-01");

        assert_eq!(controller.add().await, Outcome::Applied);

        assert_eq!(
            controller.events(),
            &[event(1, "A", "2024-01-01"), event(3, "Trip (saved)", "2025-06-01")]
        );
        assert_eq!(controller.pending_title(), "");
        assert_eq!(controller.pending_date(), "");
        assert_eq!(
            controller.store().calls()[1],
            Call::Create(NewEvent::parse("Trip", "2025-06-01").unwrap())
        );
    }

    #[tokio::test]
    async fn failed_add_changes_nothing() {
        let store = StubStore::default().reply_create(Err(server_error()));
        let mut controller = seeded(vec![event(1, "A", "2024-01-01")], store).await;
        controller.set_pending_title("Trip");
        controller.set_pending_date("2025-06-01");

        assert_eq!(controller.add().await, Outcome::Failed);

        assert_eq!(controller.events(), &[event(1, "A", "2024-01-01")]);
        assert_eq!(controller.pending_title(), "Trip");
        assert_eq!(controller.pending_date(), "2025-06-01");
    }

    #[tokio::test]
    async fn delete_removes_only_the_matching_event() {
        let store = StubStore::default().reply_delete(Ok(()));
        let mut controller = seeded(vec![event(1, "A", "2024-01-01"), event(2, "B", "2024-02-01")], store).await;

        assert_eq!(controller.delete(EventId(1)).await, Outcome::Applied);

        assert_eq!(controller.events(), &[event(2, "B", "2024-02-01")]);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_still_calls_backend() {
        let store = StubStore::default().reply_delete(Ok(()));
        let mut controller = seeded(vec![event(1, "A", "2024-01-01")], store).await;

        assert_eq!(controller.delete(EventId(42)).await, Outcome::Applied);

        assert_eq!(controller.events(), &[event(1, "A", "2024-01-01")]);
        assert_eq!(controller.store().calls(), vec![Call::List, Call::Delete(EventId(42))]);
    }

    #[tokio::test]
    async fn failed_delete_keeps_the_event() {
        let store = StubStore::default().reply_delete(Err(ApiError::NotFound));
        let mut controller = seeded(vec![event(1, "A", "2024-01-01")], store).await;

        assert_eq!(controller.delete(EventId(1)).await, Outcome::Failed);

        assert_eq!(controller.events(), &[event(1, "A", "2024-01-01")]);
    }

    #[tokio::test]
    async fn countdowns_are_derived_from_now() {
        let controller = seeded(
            vec![event(1, "Soon", "2024-01-15"), event(2, "Today", "2024-01-10")],
            StubStore::default(),
        )
        .await;
        let now = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
            .and_utc();

        let shown: Vec<String> = controller
            .countdowns(&now)
            .into_iter()
            .map(|(_, countdown)| countdown.to_string())
            .collect();
        assert_eq!(shown, vec!["5 day(s) left", "Date has passed!"]);

        let later = now + chrono::Duration::days(1);
        assert_eq!(controller.days_left(&later)[0].1, 4);
        assert_eq!(controller.events().len(), 2);
    }
}
