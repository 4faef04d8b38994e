use clap::Parser;
use page_dump::{StopReason, Walk};
use std::process::ExitCode;
use std::time::Duration;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match args.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!(
        "Walking from {} into {}",
        config.start_url,
        config.dump_dir.display()
    );
    println!("Note: page-dump requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default http://localhost:4444"
    );

    let start_time = std::time::Instant::now();
    let shutdown = shutdown_signal(args.total_timeout());

    match Walk::new(config).run(shutdown).await {
        Ok(summary) => {
            let reason = match summary.reason {
                StopReason::Exhausted => "listing exhausted",
                StopReason::PageLimit => "page limit reached",
                StopReason::Shutdown => "shutdown requested",
            };
            ::log::info!(
                "Walk stopped ({}) - saved {} pages in {:.2} seconds",
                reason,
                summary.pages_saved,
                start_time.elapsed().as_secs_f64()
            );
            match serde_json::to_string(&summary) {
                Ok(json) => ::log::debug!("Walk summary: {}", json),
                Err(e) => ::log::warn!("Failed to serialize walk summary: {}", e),
            }
            if summary.reason == StopReason::Shutdown {
                ::log::info!("Resume from: {}", summary.cursor);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Walk failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Resolves on Ctrl-C or when the optional total timeout elapses
async fn shutdown_signal(total_timeout: Option<Duration>) {
    let deadline = async {
        match total_timeout {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = interrupted() => ::log::info!("Interrupt received, stopping"),
        _ = deadline => ::log::info!("Total timeout reached, stopping"),
    }
}

async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        ::log::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await
    }
}
