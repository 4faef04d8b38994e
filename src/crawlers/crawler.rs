use crate::error::SessionError;
use std::future::Future;
use std::time::Duration;
use url::Url;

/// A controllable browser instance.
///
/// The walker owns exactly one session for the whole walk and drives it one
/// step at a time.
pub trait Session {
    /// Navigate to `url`
    fn goto(&mut self, url: &str) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// URL of the loaded document, after any redirects
    fn current_url(&mut self) -> impl Future<Output = Result<Url, SessionError>> + Send;

    /// Serialized markup of the loaded document
    fn source(&mut self) -> impl Future<Output = Result<String, SessionError>> + Send;

    /// Wait until an element matching the CSS `selector` is present
    fn wait_for(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// Drop every cookie the session holds
    fn delete_all_cookies(&mut self) -> impl Future<Output = Result<(), SessionError>> + Send;

    /// End the session
    fn close(self) -> impl Future<Output = Result<(), SessionError>> + Send;
}
