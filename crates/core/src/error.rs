#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Usage limit reached. Please try again later.")]
    RateLimited,

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Partial publish: {0}")]
    PartialPublish(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Message suitable for showing to the merchant, without the variant prefix.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { entity, id } => format!("{entity} with id {id} not found"),
            Self::Validation(msg) | Self::Upstream(msg) | Self::PartialPublish(msg) => msg.clone(),
            Self::RateLimited => "Usage limit reached. Please try again later.".to_string(),
            Self::Unavailable(_) => {
                "The service could not be reached. Please try again.".to_string()
            }
            Self::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}
