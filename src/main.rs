// Loga - clothing storefront for the terminal
//
// A product catalog browsed through category and search filters, loaded one
// page at a time as the grid scrolls.
//
// Architecture:
// - Catalog: product source (built-in demo list or a JSON file)
// - Loader: paged load state per filter epoch, stale results discarded
// - Fetcher: tokio tasks resolving page requests with a simulated delay
// - Sentinel: requests the next page when the grid's end marker is visible
// - Storefront: intent reducer tying filters, loader and cart together
// - TUI (ratatui): header, category menu, product grid, logs, status bar

mod catalog;
mod cli;
mod config;
mod fetch;
mod filter;
mod loader;
mod logging;
mod sentinel;
mod startup;
mod storefront;
mod theme;
mod tui;
mod util;

use anyhow::Result;
use clap::Parser;
use config::{Config, LogRotation};
use logging::{LogBuffer, TuiLogLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Load configuration first to determine TUI vs headless mode
    let config = Config::from_env();

    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("loga={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Subcommands print to stdout; their logs go to stderr
    if cli.command.is_some() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
        cli::handle_cli(&cli, &config)?;
        return Ok(());
    }

    // Create log buffer for TUI mode
    let log_buffer = LogBuffer::new();

    // In TUI mode: capture logs to buffer (prevents garbling the display)
    // In headless mode: output logs to stderr
    // File logging: optionally write JSON to rotating log files as well
    //
    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            if let Err(e) = std::fs::create_dir_all(&config.logging.file_dir) {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                // Fall back to non-file logging
                if config.enable_tui {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                } else {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                        .init();
                }
                None
            } else {
                let file_appender = match config.logging.file_rotation {
                    LogRotation::Hourly => tracing_appender::rolling::hourly(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Daily => tracing_appender::rolling::daily(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                    LogRotation::Never => tracing_appender::rolling::never(
                        &config.logging.file_dir,
                        &config.logging.file_prefix,
                    ),
                };

                // Writes happen on a background thread
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

                if config.enable_tui {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();
                } else {
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .json()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();
                }

                Some(guard)
            }
        } else {
            if config.enable_tui {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(TuiLogLayer::new(log_buffer.clone()))
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                    .init();
            }

            None
        };

    let catalog = catalog::open(&config);

    startup::print_startup(&config, catalog.as_ref());
    startup::log_startup(&config, catalog.as_ref());

    if config.enable_tui {
        tracing::info!("Starting TUI");
        if let Err(e) = tui::run_tui(config, log_buffer, catalog).await {
            tracing::error!("TUI error: {:?}", e);
        }
    } else {
        tracing::info!("TUI disabled, running in headless mode");
        let stdout = std::io::stdout();
        cli::write_first_page(catalog.as_ref(), config.page_size, &mut stdout.lock())?;
        tokio::signal::ctrl_c().await?;
    }

    tracing::info!("Shutting down...");
    Ok(())
}
