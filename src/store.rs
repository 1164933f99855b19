// src/store.rs
use crate::errors::EventError;
use crate::event::{Event, EventDraft, EventId};
use crate::event_source::EventSource;
use chrono::{DateTime, Utc};
use log::{error, info};
use std::sync::Arc;
use tokio::sync::broadcast;

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load events. Please try again later.";
pub const ADD_FAILED_MESSAGE: &str = "Failed to add event. Please try again.";
pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load event details. Please try again later.";

const CHANNEL_CAPACITY: usize = 32;

/// Published on every state transition so views know when to re-render.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    LoadingStarted { timestamp: DateTime<Utc> },
    /// A refresh succeeded. Loading is over.
    EventsReplaced { count: usize, timestamp: DateTime<Utc> },
    /// An add succeeded and the event is now first. Loading is over.
    EventAdded { event: Event, timestamp: DateTime<Utc> },
    /// An operation failed and `message` is the current error. Loading is over.
    Failed { message: String, timestamp: DateTime<Utc> },
}

/// Session-wide list of events plus the loading and error flags views read.
///
/// Operations are not coordinated with each other; callers sequence them.
/// There is no timeout here, so a hung request leaves `loading` set.
pub struct EventStore {
    source: Arc<dyn EventSource>,
    events: Vec<Event>,
    loading: bool,
    error: Option<String>,
    event_tx: broadcast::Sender<StoreEvent>,
}

impl EventStore {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        let (event_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { source, events: Vec::new(), loading: false, error: None, event_tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.event_tx.subscribe()
    }

    // Accessor methods

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn find(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id() == id)
    }

    // ===================================== Operations ============================================

    /// Replaces the list with a fresh fetch. On failure the previous list is kept.
    pub async fn refresh(&mut self) {
        self.begin();
        match self.source.list().await {
            Ok(events) => {
                info!("EventStore: loaded {} events", events.len());
                let count = events.len();
                self.events = events;
                self.loading = false;
                self.notify(StoreEvent::EventsReplaced { count, timestamp: Utc::now() });
            }
            Err(e) => {
                error!("EventStore: refresh failed: {}", e);
                self.fail(LOAD_FAILED_MESSAGE);
            }
        }
    }

    /// Creates the event remotely and puts it at the front of the list. The
    /// failure is both recorded and returned so a form can react on its own.
    /// An incomplete draft is rejected before any state changes.
    pub async fn add(&mut self, draft: &EventDraft) -> Result<Event, EventError> {
        draft.validate()?;
        self.begin();
        match self.source.create(draft).await {
            Ok(event) => {
                info!("EventStore: added event {}", event.id());
                self.events.insert(0, event.clone());
                self.loading = false;
                self.notify(StoreEvent::EventAdded { event: event.clone(), timestamp: Utc::now() });
                Ok(event)
            }
            Err(e) => {
                error!("EventStore: add failed: {}", e);
                self.fail(ADD_FAILED_MESSAGE);
                Err(e)
            }
        }
    }

    /// Fetch for a single-event view. Leaves the shared list state alone.
    pub async fn load_detail(&self, id: &EventId) -> Result<Event, String> {
        self.source.get_by_id(id).await.map_err(|e| {
            error!("EventStore: fetching event {} failed: {}", id, e);
            detail_message(&e, id)
        })
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.notify(StoreEvent::LoadingStarted { timestamp: Utc::now() });
    }

    fn fail(&mut self, message: &str) {
        self.loading = false;
        self.error = Some(message.to_string());
        self.notify(StoreEvent::Failed { message: message.to_string(), timestamp: Utc::now() });
    }

    fn notify(&self, event: StoreEvent) {
        // Err only means nobody is subscribed.
        let _ = self.event_tx.send(event);
    }
}

pub fn detail_message(error: &EventError, id: &EventId) -> String {
    if error.is_not_found() {
        format!("Event with ID {} not found.", id)
    } else {
        DETAIL_FAILED_MESSAGE.to_string()
    }
}
