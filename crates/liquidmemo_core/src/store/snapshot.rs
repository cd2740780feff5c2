//! Serialized snapshot shape for the durable slot.
//!
//! # Responsibility
//! - Define the `version: 3` payload written after every mutation.
//! - Tolerate older payloads: every collection defaults to empty, project
//!   colors may be absent (backfilled by the load lifecycle).

use crate::model::entity::{Card, Category, Doc, Highlight, Link, Project};
use crate::repo::slot_repo::SlotRepository;
use crate::store::MemoStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Schema version written with every save.
pub const SNAPSHOT_VERSION: u32 = 3;

/// Full-graph payload stored in the durable slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPayload {
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub docs: Vec<Doc>,
    #[serde(default)]
    pub doc_contents: BTreeMap<String, Value>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl<R: SlotRepository> MemoStore<R> {
    /// Captures the current graph as a versioned snapshot payload.
    pub fn to_snapshot(&self) -> SnapshotPayload {
        SnapshotPayload {
            version: SNAPSHOT_VERSION,
            categories: self.categories.clone(),
            projects: self.projects.clone(),
            docs: self.docs.clone(),
            doc_contents: self.doc_contents.clone(),
            highlights: self.highlights.clone(),
            cards: self.cards.clone(),
            links: self.links.clone(),
        }
    }

    /// Replaces the in-memory collections with the snapshot's contents.
    pub(crate) fn apply_snapshot(&mut self, payload: SnapshotPayload) {
        self.categories = payload.categories;
        self.projects = payload.projects;
        self.docs = payload.docs;
        self.doc_contents = payload.doc_contents;
        self.highlights = payload.highlights;
        self.cards = payload.cards;
        self.links = payload.links;
    }
}
