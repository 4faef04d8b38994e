use clap::Parser;
use page_dump::{Walk, WalkerConfig};
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to walker configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Override the page limit
    #[arg(short, long)]
    max_pages: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logger
    env_logger::init();

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from file
    let mut config = WalkerConfig::from_file(&args.config)?;
    config.apply_env();

    println!("Walker configuration:");
    println!("  Start URL: {}", config.start_url);
    println!("  Dump directory: {}", config.dump_dir.display());
    println!("  Pause: {}ms", config.pause_ms);
    println!("  WebDriver URL: {}", config.webdriver_url);

    if let Some(max_pages) = args.max_pages {
        println!("Overriding page limit: {}", max_pages);
        config.max_pages = Some(max_pages);
    }

    let start_time = std::time::Instant::now();
    let summary = Walk::new(config)
        .run(interrupted())
        .await?;

    println!(
        "Walk complete ({:?}). Saved {} pages in {:.2} seconds.",
        summary.reason,
        summary.pages_saved,
        start_time.elapsed().as_secs_f64()
    );
    if let Some(last) = summary.last {
        println!("Last page: {} -> {}", last.url, last.path.display());
    }

    Ok(())
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        ::log::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await
    }
}
