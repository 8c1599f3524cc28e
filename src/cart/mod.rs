//! The cart root actor: owns the authoritative cart list, validates every
//! mutation against the shop services, and keeps the persisted snapshot in
//! step with the in-memory state.

pub mod service;
pub mod snapshot;

pub use service::*;
