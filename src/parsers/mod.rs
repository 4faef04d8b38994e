pub mod html;


use crate::error::ExtractError;
use url::Url;

/// Where the walk goes after the current page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextLink {
    /// Follow this link on the next iteration
    Next(Url),
    /// The listing has no further page
    End,
}

/// A loaded document split into what the walker needs from it
#[derive(Debug, Clone)]
pub struct LoadedPage {
    /// Full document markup, verbatim
    pub body: String,
    /// Link to the following page
    pub next: NextLink,
}

/// Knowledge of a site's page structure.
///
/// Given the URL a document was loaded from and its markup, an adapter returns
/// the document body and the link to the following page. Markup changes on the
/// site are absorbed here and never reach the control loop.
pub trait PageAdapter {
    fn extract(&self, page_url: &Url, markup: String) -> Result<LoadedPage, ExtractError>;
}
