use crate::error::{ConfigError, ExtractError};
use crate::parsers::{LoadedPage, NextLink, PageAdapter};
use scraper::{Html, Selector};
use url::Url;

/// Locates the "next page" anchor with a structural CSS selector
#[derive(Debug)]
pub struct SelectorAdapter {
    source: String,
    selector: Selector,
    attribute: String,
    base: Selector,
}

impl SelectorAdapter {
    /// Compile the selector; `attribute` names the link-target attribute (usually `href`)
    pub fn new(selector: &str, attribute: &str) -> Result<Self, ConfigError> {
        let compiled =
            Selector::parse(selector).map_err(|_| ConfigError::Selector(selector.to_string()))?;

        let base =
            Selector::parse("base[href]").map_err(|_| ConfigError::Selector("base[href]".into()))?;

        Ok(Self {
            source: selector.to_string(),
            selector: compiled,
            attribute: attribute.to_string(),
            base,
        })
    }

    /// Base URL for relative links: the first `<base href>` resolved against
    /// the page URL, or the page URL itself
    fn document_base(&self, doc: &Html, page_url: &Url) -> Url {
        doc.select(&self.base)
            .next()
            .and_then(|base| base.value().attr("href"))
            .and_then(|href| page_url.join(href.trim()).ok())
            .unwrap_or_else(|| page_url.clone())
    }

    /// Find the raw attribute value on the anchor.
    ///
    /// `Ok(None)` means the anchor exists but carries no usable target.
    fn find_target(&self, page_url: &Url, doc: &Html) -> Result<Option<String>, ExtractError> {
        let anchor = doc
            .select(&self.selector)
            .next()
            .ok_or_else(|| ExtractError::NoMatch {
                selector: self.source.clone(),
                url: page_url.to_string(),
            })?;

        let target = anchor
            .value()
            .attr(&self.attribute)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        ::log::debug!("Next-link anchor on {} has target {:?}", page_url, target);
        Ok(target)
    }
}

impl PageAdapter for SelectorAdapter {
    fn extract(&self, page_url: &Url, markup: String) -> Result<LoadedPage, ExtractError> {
        let doc = Html::parse_document(&markup);

        let next = match self.find_target(page_url, &doc)? {
            // Resolve like a browser's `href` property so relative links become absolute
            Some(link) => {
                let resolved = self
                    .document_base(&doc, page_url)
                    .join(&link)
                    .map_err(|source| ExtractError::InvalidLink {
                        link,
                        url: page_url.to_string(),
                        source,
                    })?;
                NextLink::Next(resolved)
            }
            None => NextLink::End,
        };

        Ok(LoadedPage { body: markup, next })
    }
}
