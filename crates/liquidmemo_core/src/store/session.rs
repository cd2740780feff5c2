//! Transient interaction state: open doc, card selection, connect gesture.
//!
//! # Responsibility
//! - Track which doc is open, which card is selected, and whether a
//!   connecting gesture is in flight.
//! - Drive `create_link` when a connecting gesture completes.
//!
//! # Invariants
//! - Opening a doc resets selection and connecting state.
//! - Finishing a connection always clears the connecting state; the card
//!   selection is left untouched.
//! - Session transitions never flush the durable slot; only the link they
//!   may create does.

use crate::model::entity::{Category, Doc, Link, Project};
use crate::model::id::EntityKind;
use crate::repo::slot_repo::SlotRepository;
use crate::store::{not_found, MemoStore, StoreError, StoreResult};

/// Observable interaction mode derived from the session state.
///
/// A connecting gesture shadows the selection: both can be armed at once
/// internally, and clearing the gesture reveals the selection again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionMode {
    Idle,
    CardSelected(String),
    Connecting(String),
}

/// Internal selection/gesture bookkeeping.
#[derive(Debug, Clone, Default)]
pub(crate) struct SessionState {
    pub(crate) selected_card_id: Option<String>,
    pub(crate) connecting_from_card_id: Option<String>,
}

impl<R: SlotRepository> MemoStore<R> {
    /// Opens a doc, resetting selection and any in-flight connect gesture.
    pub fn open_doc(&mut self, doc_id: &str) -> StoreResult<()> {
        if !self.docs.iter().any(|d| d.id == doc_id) {
            return Err(not_found(EntityKind::Doc, doc_id));
        }
        self.current_doc_id = Some(doc_id.to_string());
        self.session = SessionState::default();
        Ok(())
    }

    /// Closes the current doc, if any, and clears the rest of the session.
    pub fn close_doc(&mut self) {
        self.current_doc_id = None;
        self.session = SessionState::default();
    }

    /// Id of the currently open doc.
    pub fn current_doc_id(&self) -> Option<&str> {
        self.current_doc_id.as_deref()
    }

    /// The currently open doc.
    pub fn current_doc(&self) -> Option<&Doc> {
        let doc_id = self.current_doc_id.as_deref()?;
        self.doc(doc_id)
    }

    /// The project owning the currently open doc.
    pub fn current_project(&self) -> Option<&Project> {
        let doc = self.current_doc()?;
        self.project(&doc.project_id)
    }

    /// The category owning the currently open doc's project.
    pub fn current_category(&self) -> Option<&Category> {
        let project = self.current_project()?;
        self.category(&project.category_id)
    }

    /// Selects a card, or clears the selection with `None`.
    pub fn select_card(&mut self, card_id: Option<&str>) {
        self.session.selected_card_id = card_id.map(str::to_string);
    }

    /// Currently selected card id.
    pub fn selected_card_id(&self) -> Option<&str> {
        self.session.selected_card_id.as_deref()
    }

    /// Arms the connect gesture from the given card. Valid from any state.
    pub fn start_connecting(&mut self, from_card_id: &str) {
        self.session.connecting_from_card_id = Some(from_card_id.to_string());
    }

    /// Completes the connect gesture.
    ///
    /// When a target card is supplied, differs from the source, and a doc is
    /// open, a link is created through the entity store (subject to its
    /// dedup rule). The connecting state is cleared in every case, including
    /// the error paths; the selection is not.
    pub fn finish_connecting(&mut self, to_card_id: Option<&str>) -> StoreResult<Option<Link>> {
        let armed = self.session.connecting_from_card_id.take();
        let (Some(to_card_id), Some(from_card_id)) = (to_card_id, armed) else {
            return Ok(None);
        };
        if to_card_id == from_card_id {
            return Ok(None);
        }
        let Some(doc_id) = self.current_doc_id.clone() else {
            return Err(StoreError::InvalidState(
                "cannot finish a connection without an open document",
            ));
        };
        self.create_link(&doc_id, &from_card_id, to_card_id)
    }

    /// Current interaction mode, derived from selection and gesture state.
    pub fn interaction_mode(&self) -> InteractionMode {
        if let Some(from) = &self.session.connecting_from_card_id {
            return InteractionMode::Connecting(from.clone());
        }
        if let Some(selected) = &self.session.selected_card_id {
            return InteractionMode::CardSelected(selected.clone());
        }
        InteractionMode::Idle
    }
}
