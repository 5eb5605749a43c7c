//! Activity events
//!
//! Noteworthy changes to the tree (a lab created, an object deleted) are
//! recorded as `Event` records and handed to an [`EventSink`], the
//! downstream collaborator that pushes notifications to connected clients.
//! The engine only notifies; delivery is the sink's business.

use parking_lot::Mutex;
use serde_json::Value;
use tracing::debug;
use warehaus_core::{DocId, Document, DocumentStore, Result};

use crate::auth::AuthContext;
use crate::record::{Field, Index, Model, Record};

/// Event record variant.
pub struct EventModel;

impl Model for EventModel {
    const NAME: &'static str = "Event";
    const TABLE: &'static str = "events";
    const FIELDS: &'static [Field] = &[
        Field::new("obj_id"),
        Field::new("user_id"),
        Field::new("interested_ids"),
        Field::new("title"),
        Field::new("content"),
    ];
    const INDEXES: &'static [Index] = &[Index {
        name: "obj_id",
        field: "obj_id",
    }];
}

/// A persisted activity event.
pub type Event = Record<EventModel>;

/// Receiver of recorded events.
pub trait EventSink: Send + Sync {
    /// Called once per recorded event with its stored field map.
    fn notify(&self, event: &Document);
}

/// Sink that drops every notification.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn notify(&self, _event: &Document) {}
}

/// Sink that keeps every notification in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Document>>,
}

impl RecordingSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of notifications received so far, oldest first
    pub fn events(&self) -> Vec<Document> {
        self.events.lock().clone()
    }

    /// Titles of notifications received so far
    pub fn titles(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| e.get("title").and_then(Value::as_str).map(str::to_string))
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn notify(&self, event: &Document) {
        self.events.lock().push(event.clone());
    }
}

/// What happened, to which object, and who should hear about it.
#[derive(Debug, Clone)]
pub struct NewEvent {
    /// Object the event is about
    pub obj_id: DocId,
    /// Objects whose watchers are interested
    pub interested_ids: Vec<DocId>,
    /// Short markdown title
    pub title: String,
    /// Optional longer markdown body
    pub content: Option<String>,
}

impl NewEvent {
    /// An event about `obj_id` that interests `obj_id` itself
    pub fn about(obj_id: DocId, title: impl Into<String>) -> Self {
        NewEvent {
            interested_ids: vec![obj_id.clone()],
            obj_id,
            title: title.into(),
            content: None,
        }
    }

    /// Add another interested object
    pub fn interesting_to(mut self, id: DocId) -> Self {
        if !self.interested_ids.contains(&id) {
            self.interested_ids.push(id);
        }
        self
    }
}

/// Persist `event` on behalf of `auth`'s user and notify `sink`.
pub fn create_event(
    store: &dyn DocumentStore,
    sink: &dyn EventSink,
    auth: &dyn AuthContext,
    event: NewEvent,
) -> Result<Event> {
    let mut record = Event::with_fields([
        ("obj_id", Value::from(event.obj_id)),
        (
            "user_id",
            auth.user_id().map_or(Value::Null, Value::from),
        ),
        (
            "interested_ids",
            Value::Array(event.interested_ids.into_iter().map(Value::from).collect()),
        ),
        ("title", Value::from(event.title)),
        ("content", event.content.map_or(Value::Null, Value::from)),
    ])?;
    record.save(store)?;
    debug!(target: "warehaus::events", id = ?record.id(), "Recorded event");
    sink.notify(&record.as_document());
    Ok(record)
}
