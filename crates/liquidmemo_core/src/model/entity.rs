//! Entity records for the hierarchy and the annotation graph.
//!
//! # Responsibility
//! - Define the canonical shapes for categories, projects, docs, highlights,
//!   cards and links, plus the patch structs used by partial updates.
//!
//! # Invariants
//! - Serialized field names are camelCase (durable-slot compatibility).
//! - `Highlight::linked_card_ids` mirrors exactly the cards whose
//!   `highlight_id` points back at it; the store owns that consistency.
//! - A card with `highlight_id == None` is a free memo card.

use serde::{Deserialize, Serialize};

/// Document lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocStatus {
    /// Freshly created, not yet worked on.
    Draft,
    /// Actively being edited.
    Progress,
    /// Finished.
    Done,
}

/// Top-level grouping of projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
}

/// Mid-level grouping of documents within one category.
///
/// `color` deserializes to an empty string for schema version 1/2 payloads;
/// the load path backfills it before the store becomes visible to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    /// Owning category id (non-owning back-reference).
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub color: String,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
}

/// A single editable document with lifecycle status.
///
/// The content blob is not embedded here; it is keyed separately by doc id
/// and its structure is owned by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doc {
    pub id: String,
    /// Owning project id.
    pub project_id: String,
    pub title: String,
    pub status: DocStatus,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
    /// Epoch ms of the last content-affecting update. Status toggles do not
    /// count as content edits and leave this untouched.
    pub updated_at: i64,
}

/// A marked span within a document's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub id: String,
    pub doc_id: String,
    /// Span start offset into the document content. Callers are responsible
    /// for `from <= to`; the store does not reject malformed ranges.
    pub from: u32,
    /// Span end offset.
    pub to: u32,
    pub color: String,
    /// Ids of the cards derived from this highlight, in creation order.
    #[serde(default)]
    pub linked_card_ids: Vec<String>,
}

/// A positioned annotation note, optionally derived from a highlight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub doc_id: String,
    /// Backing highlight, or `None` for a free memo card. Serialized as an
    /// empty string on the wire.
    #[serde(with = "card_highlight_ref", default)]
    pub highlight_id: Option<String>,
    pub quote: String,
    pub note: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Epoch ms creation timestamp.
    pub created_at: i64,
}

/// An undirected connection between two cards of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub doc_id: String,
    pub from_card_id: String,
    pub to_card_id: String,
}

impl Link {
    /// Whether this link connects the given unordered card pair.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.from_card_id == a && self.to_card_id == b)
            || (self.from_card_id == b && self.to_card_id == a)
    }

    /// Whether either endpoint is the given card.
    pub fn touches(&self, card_id: &str) -> bool {
        self.from_card_id == card_id || self.to_card_id == card_id
    }
}

/// Field mask for `update_category`.
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Field mask for `update_project`.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub color: Option<String>,
}

/// Field mask for `update_doc`. An all-`None` patch is meaningful: it still
/// refreshes the doc's `updated_at`.
#[derive(Debug, Clone, Default)]
pub struct DocPatch {
    pub title: Option<String>,
    pub status: Option<DocStatus>,
}

/// Field mask for `update_card`.
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub quote: Option<String>,
    pub note: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Wire codec for `Card::highlight_id`: empty string means no highlight.
mod card_highlight_ref {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(if raw.is_empty() { None } else { Some(raw) })
    }
}
