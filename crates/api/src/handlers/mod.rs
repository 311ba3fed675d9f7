//! Request handlers.
//!
//! Handlers extract request data, delegate to the workflows in
//! `copydesk_core::workflow` through the service ports held in
//! [`AppState`](crate::state::AppState), and map errors via
//! [`AppError`](crate::error::AppError).

pub mod content;
pub mod dashboard;
pub mod items;
pub mod sessions;
