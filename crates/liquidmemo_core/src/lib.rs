//! Core annotation-graph store for LiquidMemo.
//! This crate is the single source of truth for graph invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod remote;
pub mod repo;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entity::{
    Card, CardPatch, Category, CategoryPatch, Doc, DocPatch, DocStatus, Highlight, Link, Project,
    ProjectPatch,
};
pub use model::id::{new_id, EntityKind};
pub use model::palette::{
    allocate_color, CATEGORY_COLORS, DEFAULT_HIGHLIGHT_COLOR, PROJECT_COLORS,
};
pub use remote::contract::{
    RemoteAuth, RemoteError, RemoteOperation, RemoteResult, RemoteSession, RemoteStore,
};
pub use remote::registry::{RemoteRegistry, RemoteRegistryError};
pub use repo::slot_repo::{SlotError, SlotRepository, SlotResult, SqliteSlotRepository};
pub use store::session::InteractionMode;
pub use store::snapshot::{SnapshotPayload, SNAPSHOT_VERSION};
pub use store::{
    MemoStore, StoreError, StoreResult, DEFAULT_CATEGORY_NAME, DEFAULT_PROJECT_NAME,
    DEFAULT_SLOT_KEY,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
