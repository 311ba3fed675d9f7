//! Domain logic for AI-assisted catalog copy: response normalization,
//! dashboard reconciliation, the generation session state machine, and the
//! generate/publish/revert workflows.
//!
//! Nothing here performs I/O directly; external systems are reached through
//! the traits in [`ports`].

pub mod error;
pub mod normalize;
pub mod pagination;
pub mod ports;
pub mod preview;
pub mod reconcile;
pub mod session;
pub mod types;
pub mod workflow;
