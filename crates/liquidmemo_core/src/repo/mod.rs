//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable-slot access contract used by the store lifecycle.
//! - Isolate SQLite details from store/business orchestration.
//!
//! # Invariants
//! - A slot write fully overwrites the previous payload.
//! - Repository APIs return semantic errors in addition to DB transport
//!   errors.

pub mod slot_repo;
