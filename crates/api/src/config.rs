use copydesk_core::pagination::DEFAULT_PAGE_SIZE;

/// Endpoints and limits for the external services.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Catalog GraphQL endpoint.
    pub catalog_api_url: String,
    /// Access token sent with every catalog request.
    pub catalog_access_token: String,
    /// Nodes requested per catalog page.
    pub catalog_page_size: u32,
    /// Root URL of the AI generation service.
    pub ai_service_url: String,
    /// Root URL of the content-origin store.
    pub content_store_url: String,
    /// Timeout for content-store reads, after which the read counts as empty.
    pub content_store_timeout_secs: u64,
}

impl ServiceConfig {
    /// Load service endpoints from environment variables with defaults.
    ///
    /// | Env Var                      | Default                                  |
    /// |------------------------------|------------------------------------------|
    /// | `CATALOG_API_URL`            | `http://localhost:4000/admin/api/graphql`|
    /// | `CATALOG_ACCESS_TOKEN`       | (empty)                                  |
    /// | `CATALOG_PAGE_SIZE`          | `50`                                     |
    /// | `AI_SERVICE_URL`             | `http://localhost:8081`                  |
    /// | `CONTENT_STORE_URL`          | `http://localhost:8082`                  |
    /// | `CONTENT_STORE_TIMEOUT_SECS` | `10`                                     |
    pub fn from_env() -> Self {
        let catalog_api_url = std::env::var("CATALOG_API_URL")
            .unwrap_or_else(|_| "http://localhost:4000/admin/api/graphql".into());

        let catalog_access_token = std::env::var("CATALOG_ACCESS_TOKEN").unwrap_or_default();

        let catalog_page_size: u32 = std::env::var("CATALOG_PAGE_SIZE")
            .ok()
            .map(|v| v.parse().expect("CATALOG_PAGE_SIZE must be a valid u32"))
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let ai_service_url =
            std::env::var("AI_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8081".into());

        let content_store_url =
            std::env::var("CONTENT_STORE_URL").unwrap_or_else(|_| "http://localhost:8082".into());

        let content_store_timeout_secs: u64 = std::env::var("CONTENT_STORE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("CONTENT_STORE_TIMEOUT_SECS must be a valid u64");

        Self {
            catalog_api_url,
            catalog_access_token,
            catalog_page_size,
            ai_service_url,
            content_store_url,
            content_store_timeout_secs,
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `90`, generation is slow).
    pub request_timeout_secs: u64,
    /// Grace period for background tasks on shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Idle lifetime of a generation session (default: `3600`).
    pub session_ttl_secs: u64,
    pub services: ServiceConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `90`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `SESSION_TTL_SECS`     | `3600`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "90".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let session_ttl_secs: u64 = std::env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| "3600".into())
            .parse()
            .expect("SESSION_TTL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            session_ttl_secs,
            services: ServiceConfig::from_env(),
        }
    }
}
