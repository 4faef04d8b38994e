use clap::Parser;
use page_dump::WalkerConfig;
use page_dump::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "page-dump")]
#[command(about = "Walks a paginated listing in a browser and dumps every page's markup")]
#[command(version)]
pub struct Args {
    /// Path to a JSON walker configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// First listing page to visit
    #[arg(short, long)]
    pub start_url: Option<String>,

    /// Directory that receives the `<n>.html` dumps
    #[arg(short, long)]
    pub dump_dir: Option<PathBuf>,

    /// CSS selector for the "next page" anchor
    #[arg(long)]
    pub selector: Option<String>,

    /// Pause after each navigation, in milliseconds
    #[arg(short, long)]
    pub pause_ms: Option<u64>,

    /// Wait for this CSS selector after each navigation
    #[arg(long)]
    pub ready_selector: Option<String>,

    /// Stop after saving this many pages
    #[arg(short, long)]
    pub max_pages: Option<u64>,

    /// WebDriver server URL (overrides WEBDRIVER_URL)
    #[arg(short, long)]
    pub webdriver_url: Option<String>,

    /// Stop cleanly after this many seconds
    #[arg(long)]
    pub total_timeout: Option<u64>,
}

impl Args {
    /// Defaults, then the config file, then `WEBDRIVER_URL`, then flags
    pub fn resolve_config(&self) -> Result<WalkerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => WalkerConfig::from_file(path)?,
            None => WalkerConfig::default(),
        };
        config.apply_env();
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut WalkerConfig) {
        if let Some(start_url) = &self.start_url {
            config.start_url = start_url.clone();
        }
        if let Some(dump_dir) = &self.dump_dir {
            config.dump_dir = dump_dir.clone();
        }
        if let Some(selector) = &self.selector {
            config.next_link_selector = selector.clone();
        }
        if let Some(pause_ms) = self.pause_ms {
            config.pause_ms = pause_ms;
        }
        if let Some(ready_selector) = &self.ready_selector {
            config.ready_selector = Some(ready_selector.clone());
        }
        if let Some(max_pages) = self.max_pages {
            config.max_pages = Some(max_pages);
        }
        if let Some(webdriver_url) = &self.webdriver_url {
            config.webdriver_url = webdriver_url.clone();
        }
    }

    pub fn total_timeout(&self) -> Option<Duration> {
        self.total_timeout.map(Duration::from_secs)
    }
}
