// Re-export modules
pub mod config;
pub mod crawlers;
pub mod dump;
pub mod error;
pub mod parsers;
pub mod results;

// Re-export commonly used types for convenience
pub use config::WalkerConfig;
pub use crawlers::crawler::Session;
pub use crawlers::walker::{PageWalker, walk_session};
pub use crawlers::web::WebDriverSession;
pub use error::WalkError;
pub use results::{DumpRecord, StopReason, WalkSummary};

use std::future::Future;

/// Walks a listing with a WebDriver session built from configuration
pub struct Walk {
    config: WalkerConfig,
}

impl Walk {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Connect to WebDriver and walk until a stop condition or a fatal error.
    ///
    /// The session is closed on every exit path.
    pub async fn run<F>(self, shutdown: F) -> Result<WalkSummary, WalkError>
    where
        F: Future<Output = ()>,
    {
        // Bad configuration fails before a browser is started
        let (adapter, dump) = crawlers::walker::prepare(&self.config).await?;

        let session = WebDriverSession::connect(&self.config.webdriver_url)
            .await
            .map_err(|source| WalkError::Session {
                context: "connecting to WebDriver",
                source,
            })?;

        walk_session(session, adapter, dump, &self.config, shutdown).await
    }
}
