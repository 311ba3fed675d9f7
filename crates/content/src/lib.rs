//! HTTP clients for the AI content-generation service and the
//! content-origin store.

pub mod error;
pub mod generator;
pub mod store;

pub use error::ContentServiceError;
pub use generator::AiContentClient;
pub use store::ContentStoreClient;
