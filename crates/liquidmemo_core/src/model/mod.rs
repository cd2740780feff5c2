//! Domain model for the LiquidMemo annotation graph.
//!
//! # Responsibility
//! - Define the entity records shared by the store and the durable slot.
//! - Provide id generation and palette-based color allocation.
//!
//! # Invariants
//! - Wire field names stay camelCase for `version: 3` payload compatibility.
//! - Entity ids are opaque strings, unique within their kind.

use std::time::{SystemTime, UNIX_EPOCH};

pub mod entity;
pub mod id;
pub mod palette;

/// Current wall-clock time in epoch milliseconds.
///
/// Clamps to `0` should the system clock report a pre-epoch time.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
