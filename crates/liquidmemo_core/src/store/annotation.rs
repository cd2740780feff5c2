//! Highlight/card/link operations and the annotation graph rules.
//!
//! # Responsibility
//! - Provide CRUD entry points for the three annotation kinds.
//! - Enforce the graph rules at the mutation points themselves: undirected
//!   link dedup, highlight/card backlink consistency, orphan-highlight
//!   cleanup. No periodic consistency sweep exists.
//!
//! # Invariants
//! - Creating a card against a highlight appends its id to that highlight's
//!   `linked_card_ids`; deleting it removes the id again.
//! - A highlight whose last linked card was deleted is deleted itself.
//! - `create_link` never stores a second link for the same unordered pair.

use crate::model::entity::{Card, CardPatch, Highlight, Link};
use crate::model::id::{new_id, EntityKind};
use crate::model::now_epoch_ms;
use crate::repo::slot_repo::SlotRepository;
use crate::store::{not_found, MemoStore, StoreError, StoreResult};

/// Fixed card size used by the auto-layout grid.
const CARD_WIDTH: f64 = 260.0;
const CARD_HEIGHT: f64 = 150.0;
/// Grid geometry: three columns, 280x180 cell pitch, 20px origin offset.
const GRID_COLUMNS: usize = 3;
const GRID_ORIGIN: f64 = 20.0;
const GRID_PITCH_X: f64 = 280.0;
const GRID_PITCH_Y: f64 = 180.0;

impl<R: SlotRepository> MemoStore<R> {
    // === Highlights ===

    /// Creates a highlight over `[from, to]` in the given doc.
    ///
    /// The store intentionally does not reject `from > to`; ensuring a
    /// well-formed range is the caller's responsibility.
    pub fn create_highlight(
        &mut self,
        doc_id: &str,
        from: u32,
        to: u32,
        color: &str,
    ) -> StoreResult<Highlight> {
        if !self.docs.iter().any(|d| d.id == doc_id) {
            return Err(not_found(EntityKind::Doc, doc_id));
        }
        let highlight = Highlight {
            id: new_id(EntityKind::Highlight),
            doc_id: doc_id.to_string(),
            from,
            to,
            color: color.to_string(),
            linked_card_ids: Vec::new(),
        };
        self.highlights.push(highlight.clone());
        self.flush()?;
        Ok(highlight)
    }

    /// All highlights across docs, in creation order.
    pub fn highlights(&self) -> &[Highlight] {
        &self.highlights
    }

    /// Looks up one highlight by id.
    pub fn highlight(&self, id: &str) -> Option<&Highlight> {
        self.highlights.iter().find(|h| h.id == id)
    }

    /// Highlights of one doc, in creation order.
    pub fn highlights_by_doc(&self, doc_id: &str) -> Vec<&Highlight> {
        self.highlights
            .iter()
            .filter(|h| h.doc_id == doc_id)
            .collect()
    }

    // === Cards ===

    /// Creates a card in the given doc, optionally derived from a highlight
    /// of the same doc.
    ///
    /// Placement follows the auto-layout grid: card `k` (0-indexed among the
    /// doc's existing cards) lands at `(20 + (k % 3) * 280, 20 + (k / 3) *
    /// 180)` with a fixed 260x150 size.
    pub fn create_card(
        &mut self,
        doc_id: &str,
        highlight_id: Option<&str>,
        quote: &str,
    ) -> StoreResult<Card> {
        if !self.docs.iter().any(|d| d.id == doc_id) {
            return Err(not_found(EntityKind::Doc, doc_id));
        }
        if let Some(highlight_id) = highlight_id {
            let backing = self
                .highlights
                .iter()
                .find(|h| h.id == highlight_id && h.doc_id == doc_id);
            if backing.is_none() {
                return Err(not_found(EntityKind::Highlight, highlight_id));
            }
        }

        let slot = self.cards.iter().filter(|c| c.doc_id == doc_id).count();
        let card = Card {
            id: new_id(EntityKind::Card),
            doc_id: doc_id.to_string(),
            highlight_id: highlight_id.map(str::to_string),
            quote: quote.to_string(),
            note: String::new(),
            x: GRID_ORIGIN + (slot % GRID_COLUMNS) as f64 * GRID_PITCH_X,
            y: GRID_ORIGIN + (slot / GRID_COLUMNS) as f64 * GRID_PITCH_Y,
            width: CARD_WIDTH,
            height: CARD_HEIGHT,
            created_at: now_epoch_ms(),
        };
        self.cards.push(card.clone());

        if let Some(highlight_id) = highlight_id {
            if let Some(highlight) = self.highlights.iter_mut().find(|h| h.id == highlight_id) {
                highlight.linked_card_ids.push(card.id.clone());
            }
        }

        self.flush()?;
        Ok(card)
    }

    /// Creates a free memo card: no highlight, empty quote.
    pub fn create_memo_card(&mut self, doc_id: &str) -> StoreResult<Card> {
        self.create_card(doc_id, None, "")
    }

    /// Applies the given fields to an existing card.
    pub fn update_card(&mut self, id: &str, patch: CardPatch) -> StoreResult<Card> {
        let card = self
            .cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(EntityKind::Card, id))?;
        if let Some(quote) = patch.quote {
            card.quote = quote;
        }
        if let Some(note) = patch.note {
            card.note = note;
        }
        if let Some(x) = patch.x {
            card.x = x;
        }
        if let Some(y) = patch.y {
            card.y = y;
        }
        if let Some(width) = patch.width {
            card.width = width;
        }
        if let Some(height) = patch.height {
            card.height = height;
        }
        let updated = card.clone();
        self.flush()?;
        Ok(updated)
    }

    /// Deletes a card, detaching it from its highlight (deleting the
    /// highlight when it was the last linked card) and removing every link
    /// touching it.
    pub fn delete_card(&mut self, id: &str) -> StoreResult<()> {
        let index = self
            .cards
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| not_found(EntityKind::Card, id))?;

        if let Some(highlight_id) = self.cards[index].highlight_id.clone() {
            if let Some(highlight) = self.highlights.iter_mut().find(|h| h.id == highlight_id) {
                highlight.linked_card_ids.retain(|card_id| card_id != id);
                if highlight.linked_card_ids.is_empty() {
                    self.highlights.retain(|h| h.id != highlight_id);
                }
            }
        }
        self.links.retain(|l| !l.touches(id));
        self.cards.remove(index);
        self.flush()
    }

    /// All cards across docs, in creation order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Looks up one card by id.
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Cards of one doc, in creation order.
    pub fn cards_by_doc(&self, doc_id: &str) -> Vec<&Card> {
        self.cards.iter().filter(|c| c.doc_id == doc_id).collect()
    }

    // === Links ===

    /// Creates an undirected link between two cards of `doc_id`.
    ///
    /// Returns `Ok(None)` when a link for the same unordered pair already
    /// exists (in either direction); no duplicate is stored.
    pub fn create_link(
        &mut self,
        doc_id: &str,
        from_card_id: &str,
        to_card_id: &str,
    ) -> StoreResult<Option<Link>> {
        if !self.docs.iter().any(|d| d.id == doc_id) {
            return Err(not_found(EntityKind::Doc, doc_id));
        }
        if from_card_id == to_card_id {
            return Err(StoreError::InvalidState(
                "a link must connect two distinct cards",
            ));
        }
        for card_id in [from_card_id, to_card_id] {
            if !self.cards.iter().any(|c| c.id == card_id) {
                return Err(not_found(EntityKind::Card, card_id));
            }
        }
        if self
            .links
            .iter()
            .any(|l| l.connects(from_card_id, to_card_id))
        {
            return Ok(None);
        }

        let link = Link {
            id: new_id(EntityKind::Link),
            doc_id: doc_id.to_string(),
            from_card_id: from_card_id.to_string(),
            to_card_id: to_card_id.to_string(),
        };
        self.links.push(link.clone());
        self.flush()?;
        Ok(Some(link))
    }

    /// Deletes one link unconditionally.
    pub fn delete_link(&mut self, id: &str) -> StoreResult<()> {
        if !self.links.iter().any(|l| l.id == id) {
            return Err(not_found(EntityKind::Link, id));
        }
        self.links.retain(|l| l.id != id);
        self.flush()
    }

    /// All links across docs.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Links of one doc.
    pub fn links_by_doc(&self, doc_id: &str) -> Vec<&Link> {
        self.links.iter().filter(|l| l.doc_id == doc_id).collect()
    }
}
