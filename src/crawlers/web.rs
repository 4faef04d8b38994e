use crate::crawlers::crawler::Session;
use crate::error::SessionError;
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use std::time::Duration;
use url::Url;

/// Common local WebDriver endpoints tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// A browser session driven over the WebDriver protocol
pub struct WebDriverSession {
    client: Client,
}

impl WebDriverSession {
    /// Connects to the WebDriver instance, falling back to common local endpoints
    pub async fn connect(webdriver_url: &str) -> Result<Self, SessionError> {
        match ClientBuilder::native().connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                return Ok(Self { client });
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    webdriver_url,
                    e
                );
            }
        }

        let mut tried = vec![webdriver_url.to_string()];

        for url in FALLBACK_WEBDRIVER_URLS.iter() {
            if *url == webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            tried.push(url.to_string());

            // Don't log fallback errors to avoid log spam
            if let Ok(client) = ClientBuilder::native().connect(url).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Ok(Self { client });
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(SessionError::Connect(tried.join(", ")))
    }
}

/// Separates a lost session from other command failures
fn classify(error: CmdError) -> SessionError {
    let message = error.to_string();
    if message.contains("Unable to find session") || message.contains("invalid session id") {
        SessionError::Disconnected(message)
    } else {
        SessionError::Command(error)
    }
}

impl Session for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<(), SessionError> {
        ::log::debug!("GOTO: {}", url);
        self.client.goto(url).await.map_err(classify)
    }

    async fn current_url(&mut self) -> Result<Url, SessionError> {
        self.client.current_url().await.map_err(classify)
    }

    async fn source(&mut self) -> Result<String, SessionError> {
        self.client.source().await.map_err(classify)
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<(), SessionError> {
        ::log::debug!("Waiting up to {:?} for {}", timeout, selector);
        self.client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
            .map(|_| ())
            .map_err(classify)
    }

    async fn delete_all_cookies(&mut self) -> Result<(), SessionError> {
        self.client.delete_all_cookies().await.map_err(classify)
    }

    async fn close(self) -> Result<(), SessionError> {
        self.client.close().await.map_err(classify)
    }
}
