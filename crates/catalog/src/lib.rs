//! Catalog GraphQL client.
//!
//! Provides cursor-paginated product/collection listings, single-item
//! lookups and the update mutations, exposed to the workflows through
//! [`copydesk_core::ports::CatalogService`].

pub mod client;
pub mod models;
pub mod queries;

pub use client::{CatalogClient, CatalogError};
