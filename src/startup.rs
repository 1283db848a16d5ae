// Startup module - displays banner and storefront status
//
// Printed before the TUI takes over the screen (or in headless mode), and
// mirrored into the log panel so the boot sequence is visible inside the TUI.

use crate::catalog::CatalogSource;
use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
}

/// One line of the startup summary
struct StatusLine {
    label: &'static str,
    value: String,
}

fn status_lines(config: &Config, catalog: &dyn CatalogSource) -> Vec<StatusLine> {
    vec![
        StatusLine {
            label: "catalog",
            value: catalog.describe(),
        },
        StatusLine {
            label: "page size",
            value: config.page_size.to_string(),
        },
        StatusLine {
            label: "fetch delay",
            value: format!("{}ms", config.fetch_delay.as_millis()),
        },
        StatusLine {
            label: "theme",
            value: config.theme.clone(),
        },
        StatusLine {
            label: "file logs",
            value: if config.logging.file_enabled {
                config.logging.file_dir.display().to_string()
            } else {
                "off".to_string()
            },
        },
    ]
}

/// Print the startup banner to stdout
pub fn print_startup(config: &Config, catalog: &dyn CatalogSource) {
    use colors::*;

    println!();
    println!("  {BOLD}{YELLOW}Loga{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}Clothing storefront for the terminal{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    for line in status_lines(config, catalog) {
        println!("    {DIM}{:<12}{RESET} {}", line.label, line.value);
    }
    println!();
}

/// Print startup messages to the TUI log panel
pub fn log_startup(config: &Config, catalog: &dyn CatalogSource) {
    tracing::info!("Loga v{}", VERSION);
    for line in status_lines(config, catalog) {
        tracing::info!("  {} - {}", line.label, line.value);
    }
    tracing::info!("Ready. Tab moves focus, ? shows keys.");
}
