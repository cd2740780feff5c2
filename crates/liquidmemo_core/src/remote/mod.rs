//! Remote mirror contracts and backend registry.
//!
//! # Responsibility
//! - Define the CRUD + OTP-auth surface of the remote store collaborator.
//! - Provide an in-process registry for selecting one active backend.
//!
//! # Invariants
//! - The core never calls the remote store as part of any graph invariant;
//!   it is an uncoordinated mirror the surrounding application may keep in
//!   sync out-of-band.
//! - Remote failures surface to the caller of that remote operation only and
//!   never touch local-store state.

pub mod contract;
pub mod registry;
