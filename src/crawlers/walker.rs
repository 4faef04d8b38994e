use crate::config::WalkerConfig;
use crate::crawlers::crawler::Session;
use crate::dump::DumpWriter;
use crate::error::{ConfigError, WalkError};
use crate::parsers::html::SelectorAdapter;
use crate::parsers::{LoadedPage, NextLink, PageAdapter};
use crate::results::{DumpRecord, StopReason, WalkSummary};
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use url::Url;

/// Walks a paginated listing one page at a time.
///
/// Each iteration navigates to the cursor, pauses, extracts the next link,
/// saves the document, clears cookies and advances the cursor. The walk ends
/// when the listing is exhausted, the page limit is hit, the shutdown future
/// resolves, or a step fails.
pub struct PageWalker<S, A> {
    session: S,
    adapter: A,
    dump: DumpWriter,
    cursor: String,
    pause: Duration,
    ready: Option<(String, Duration)>,
    max_pages: Option<u64>,
    last: Option<DumpRecord>,
    link_out: Box<dyn Write + Send>,
}

/// Validate the start URL, compile the selector and open the dump directory
pub async fn prepare(config: &WalkerConfig) -> Result<(SelectorAdapter, DumpWriter), WalkError> {
    Url::parse(&config.start_url).map_err(|source| ConfigError::StartUrl {
        url: config.start_url.clone(),
        source,
    })?;

    let adapter = SelectorAdapter::new(&config.next_link_selector, &config.link_attribute)?;
    let dump = DumpWriter::open(&config.dump_dir, config.create_dump_dir).await?;
    Ok((adapter, dump))
}

/// Walk with an already connected session, then close it.
///
/// The session is closed whether the walk stops cleanly or fails; a failed
/// close is only logged.
pub async fn walk_session<S, A, F>(
    session: S,
    adapter: A,
    dump: DumpWriter,
    config: &WalkerConfig,
    shutdown: F,
) -> Result<WalkSummary, WalkError>
where
    S: Session,
    A: PageAdapter,
    F: Future<Output = ()>,
{
    let mut walker = PageWalker::new(session, adapter, dump, &config.start_url).configure(config);
    let result = walker.run(shutdown).await;

    if let Err(e) = walker.into_session().close().await {
        ::log::warn!("Failed to close browser session: {}", e);
    }

    result
}

impl<S: Session> PageWalker<S, SelectorAdapter> {
    /// Build a walker entirely from configuration
    pub async fn from_config(session: S, config: &WalkerConfig) -> Result<Self, WalkError> {
        let (adapter, dump) = prepare(config).await?;
        Ok(Self::new(session, adapter, dump, &config.start_url).configure(config))
    }
}

impl<S: Session, A: PageAdapter> PageWalker<S, A> {
    pub fn new(session: S, adapter: A, dump: DumpWriter, start_url: &str) -> Self {
        Self {
            session,
            adapter,
            dump,
            cursor: start_url.to_string(),
            pause: Duration::ZERO,
            ready: None,
            max_pages: None,
            last: None,
            link_out: Box::new(std::io::stdout()),
        }
    }

    /// Apply pause, readiness wait and page limit from configuration
    pub fn configure(self, config: &WalkerConfig) -> Self {
        let walker = self
            .with_pause(config.pause())
            .with_max_pages(config.max_pages);
        match &config.ready_selector {
            Some(selector) => walker.with_ready_selector(selector, config.ready_timeout()),
            None => walker,
        }
    }

    /// Fixed pause between navigation and extraction
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Wait for `selector` to appear after each navigation
    pub fn with_ready_selector(mut self, selector: &str, timeout: Duration) -> Self {
        self.ready = Some((selector.to_string(), timeout));
        self
    }

    /// Where each extracted next link is echoed, one per line (stdout by default)
    pub fn with_link_output(mut self, out: impl Write + Send + 'static) -> Self {
        self.link_out = Box::new(out);
        self
    }

    pub fn with_max_pages(mut self, max_pages: Option<u64>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// URL the next iteration will visit
    pub fn cursor(&self) -> &str {
        &self.cursor
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Run until the listing ends, the page limit is reached or `shutdown` resolves.
    ///
    /// Shutdown is observed before each iteration and while a page is loading;
    /// once a page is loaded its save and cookie clear always complete.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<WalkSummary, WalkError>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        ::log::info!(
            "Starting walk at {} (dumps in {})",
            self.cursor,
            self.dump.dir().display()
        );

        loop {
            if let Some(limit) = self.max_pages {
                if self.dump.next_index() >= limit {
                    ::log::info!("Reached page limit of {}", limit);
                    return Ok(self.summary(StopReason::PageLimit));
                }
            }

            let loaded = tokio::select! {
                biased;
                _ = &mut shutdown => None,
                loaded = self.load() => Some(loaded),
            };
            let Some(loaded) = loaded else {
                ::log::info!("Shutdown requested, stopping before {}", self.cursor);
                return Ok(self.summary(StopReason::Shutdown));
            };
            let (page_url, page) = loaded?;

            match self.persist(page_url, page).await? {
                NextLink::Next(next) => self.cursor = next.to_string(),
                NextLink::End => {
                    ::log::info!("No next link on {}, listing exhausted", self.cursor);
                    return Ok(self.summary(StopReason::Exhausted));
                }
            }
        }
    }

    /// Navigate to the cursor and pull the next link out of the loaded document
    async fn load(&mut self) -> Result<(Url, LoadedPage), WalkError> {
        let url = self.cursor.clone();

        self.session
            .goto(&url)
            .await
            .map_err(|source| WalkError::Navigation {
                url: url.clone(),
                source,
            })?;

        if let Some((selector, timeout)) = &self.ready {
            self.session
                .wait_for(selector, *timeout)
                .await
                .map_err(|source| WalkError::Navigation {
                    url: url.clone(),
                    source,
                })?;
        }

        if !self.pause.is_zero() {
            tokio::time::sleep(self.pause).await;
        }

        let page_url = self
            .session
            .current_url()
            .await
            .map_err(|source| WalkError::Session {
                context: "reading the current URL",
                source,
            })?;
        let markup = self
            .session
            .source()
            .await
            .map_err(|source| WalkError::Session {
                context: "reading the page source",
                source,
            })?;

        let page = self.adapter.extract(&page_url, markup)?;
        Ok((page_url, page))
    }

    /// Save the loaded page and clear cookies; returns where to go next
    async fn persist(&mut self, page_url: Url, page: LoadedPage) -> Result<NextLink, WalkError> {
        let next = match &page.next {
            NextLink::Next(link) => {
                if let Err(e) = writeln!(self.link_out, "{}", link) {
                    ::log::warn!("Failed to echo next link {}: {}", link, e);
                }
                Some(link.to_string())
            }
            NextLink::End => None,
        };

        let (index, path) = self.dump.save(&page.body).await?;
        ::log::info!("Saved page {} ({}) to {}", index, page_url, path.display());

        self.last = Some(DumpRecord {
            index,
            url: page_url.to_string(),
            path,
            next,
        });

        self.session
            .delete_all_cookies()
            .await
            .map_err(|source| WalkError::Session {
                context: "clearing cookies",
                source,
            })?;

        Ok(page.next)
    }

    fn summary(&self, reason: StopReason) -> WalkSummary {
        WalkSummary {
            reason,
            pages_saved: self.dump.next_index(),
            cursor: self.cursor.clone(),
            last: self.last.clone(),
        }
    }
}
