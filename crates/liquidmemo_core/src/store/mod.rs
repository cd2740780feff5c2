//! In-memory annotation graph store with synchronous durable flushes.
//!
//! # Responsibility
//! - Own the six entity collections plus per-doc content blobs.
//! - Enforce cascade and graph rules on every create/update/delete.
//! - Flush the full snapshot to the durable slot after every mutation.
//!
//! # Invariants
//! - Every child entity references a live parent (projects -> categories,
//!   docs -> projects, highlights/cards/links -> docs).
//! - A highlight's `linked_card_ids` is exactly the set of cards pointing
//!   back at it; a highlight left without linked cards is deleted.
//! - At most one link exists per unordered card pair.
//! - Invariants hold when each public operation returns, not eventually.

use crate::model::entity::{Card, Category, Doc, Highlight, Link, Project};
use crate::model::id::EntityKind;
use crate::repo::slot_repo::{SlotError, SlotRepository};
use log::error;
use serde_json::Value;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod annotation;
mod hierarchy;
mod lifecycle;
pub mod session;
pub mod snapshot;

pub use lifecycle::{DEFAULT_CATEGORY_NAME, DEFAULT_PROJECT_NAME};

use session::SessionState;

/// Slot key used by the application for its snapshot.
pub const DEFAULT_SLOT_KEY: &str = "liquid-memo-v3";

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by store operations.
#[derive(Debug)]
pub enum StoreError {
    /// An operation referenced an id that does not resolve.
    NotFound { kind: EntityKind, id: String },
    /// An operation was issued in a state it is not defined for.
    InvalidState(&'static str),
    /// The durable slot could not be read or written.
    Slot(SlotError),
    /// The snapshot payload could not be serialized for a flush.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::InvalidState(message) => write!(f, "{message}"),
            Self::Slot(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "snapshot serialization failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::InvalidState(_) => None,
            Self::Slot(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<SlotError> for StoreError {
    fn from(value: SlotError) -> Self {
        Self::Slot(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

pub(crate) fn not_found(kind: EntityKind, id: &str) -> StoreError {
    StoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}

/// Client-resident annotation store.
///
/// Explicitly constructed and passed by handle; no ambient global exists.
/// All operations are synchronous and run to completion, so there is no
/// internal concurrency to coordinate.
pub struct MemoStore<R: SlotRepository> {
    repo: R,
    slot_key: String,
    categories: Vec<Category>,
    projects: Vec<Project>,
    docs: Vec<Doc>,
    doc_contents: BTreeMap<String, Value>,
    highlights: Vec<Highlight>,
    cards: Vec<Card>,
    links: Vec<Link>,
    current_doc_id: Option<String>,
    session: SessionState,
}

impl<R: SlotRepository> MemoStore<R> {
    /// Constructs the store and runs the load/migrate lifecycle against the
    /// given slot (see `lifecycle`). Seeds default data on an absent or
    /// corrupt slot.
    pub fn open(repo: R, slot_key: impl Into<String>) -> StoreResult<Self> {
        let mut store = Self {
            repo,
            slot_key: slot_key.into(),
            categories: Vec::new(),
            projects: Vec::new(),
            docs: Vec::new(),
            doc_contents: BTreeMap::new(),
            highlights: Vec::new(),
            cards: Vec::new(),
            links: Vec::new(),
            current_doc_id: None,
            session: SessionState::default(),
        };
        store.load()?;
        Ok(store)
    }

    /// Serializes the full graph and overwrites the durable slot.
    ///
    /// Runs synchronously after every mutating operation; a failure surfaces
    /// to the caller so memory and durable state cannot silently diverge.
    pub(crate) fn flush(&self) -> StoreResult<()> {
        let payload = serde_json::to_string(&self.to_snapshot())?;
        if let Err(err) = self.repo.write_slot(&self.slot_key, &payload) {
            error!(
                "event=store_save module=store status=error slot={} error={err}",
                self.slot_key
            );
            return Err(err.into());
        }
        Ok(())
    }
}
