//! Prefixed short identifier generation.
//!
//! # Responsibility
//! - Produce kind-prefixed random ids for every entity collection.
//!
//! # Invariants
//! - Prefixes are stable wire-format values and never change.
//! - Tokens carry 40 bits of randomness; collision handling is out of scope.

use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ID_TOKEN_LEN: usize = 10;

/// Entity collections addressed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Category,
    Project,
    Doc,
    Highlight,
    Card,
    Link,
}

impl EntityKind {
    /// Stable id prefix used on the wire, e.g. `cat` in `cat_9f41d02be7`.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Category => "cat",
            Self::Project => "p",
            Self::Doc => "d",
            Self::Highlight => "h",
            Self::Card => "c",
            Self::Link => "l",
        }
    }

    /// Human-readable kind label for diagnostics and error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Project => "project",
            Self::Doc => "doc",
            Self::Highlight => "highlight",
            Self::Card => "card",
            Self::Link => "link",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Generates one prefixed random id, e.g. `c_9f41d02be7`.
///
/// The token is the leading 10 hex characters of a v4 UUID. No issued-id
/// bookkeeping exists; uniqueness is probabilistic by construction.
pub fn new_id(kind: EntityKind) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{}_{}", kind.prefix(), &token[..ID_TOKEN_LEN])
}
