// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - list: Page through the filtered catalog without the TUI
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Show config file path

use crate::catalog::{self, CatalogSource, Product};
use crate::config::{Config, VERSION};
use crate::filter::FilterState;
use crate::loader::{Applied, ListLoader};
use crate::tui::components::formatters::price_label;
use crate::util::{pad_to_width, truncate_to_width};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};

/// Loga - clothing storefront for the terminal
#[derive(Parser)]
#[command(name = "loga")]
#[command(version = VERSION)]
#[command(about = "Clothing storefront with filtered infinite scroll", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the filtered catalog page by page
    List {
        /// Category to include (repeatable)
        #[arg(long = "category", short = 'c')]
        categories: Vec<String>,

        /// Case-insensitive search over name and category
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Products per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle CLI commands. Returns true if a command was handled (exit after).
pub fn handle_cli(cli: &Cli, config: &Config) -> Result<bool> {
    match &cli.command {
        Some(Commands::List {
            categories,
            search,
            page_size,
        }) => {
            handle_list(config, categories, search.as_deref(), *page_size)?;
            Ok(true)
        }
        Some(Commands::Config { show, reset, path }) => {
            if *path {
                handle_config_path()?;
            } else if *show {
                handle_config_show(config);
            } else if *reset {
                handle_config_reset()?;
            } else {
                // No flag provided, show help
                println!("Usage: loga config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            Ok(true)
        }
        None => Ok(false), // No subcommand, run the storefront
    }
}

fn handle_list(
    config: &Config,
    categories: &[String],
    search: Option<&str>,
    page_size: Option<usize>,
) -> Result<()> {
    let mut filter = FilterState::new();
    for label in categories {
        if !catalog::CATEGORIES.contains(&label.as_str()) {
            tracing::warn!(category = %label, "category is not in the menu");
        }
        filter.toggle_category(label);
    }
    if let Some(text) = search {
        filter.set_search(text);
    }

    let source = catalog::open(config);
    let page_size = page_size.unwrap_or(config.page_size);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_listing(source.as_ref(), filter, page_size, &mut out)?;
    out.flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Drive a loader to exhaustion and print every page it appends
pub fn write_listing<W: Write>(
    source: &dyn CatalogSource,
    filter: FilterState,
    page_size: usize,
    out: &mut W,
) -> Result<usize> {
    let mut loader = ListLoader::new(page_size);
    let mut next = Some(loader.reset(filter));
    let mut pages = 0;

    writeln!(out, "# {} | {}", source.describe(), loader.filter())?;

    while let Some(ticket) = next {
        let number = ticket.page;
        let before = loader.items().len();
        match loader.apply(ticket.resolve(source)) {
            Applied::Appended { count, .. } => {
                if count > 0 {
                    pages += 1;
                    writeln!(out, "Page {} ({} items)", number, count)?;
                    write_products(&loader.items()[before..], out)?;
                }
            }
            Applied::Failed => {
                let reason = loader
                    .last_error()
                    .map(|e| e.to_string())
                    .unwrap_or_default();
                bail!("page {} could not be loaded: {}", number, reason);
            }
            // Only one epoch exists here, so nothing can go stale
            Applied::Stale => {}
        }
        next = loader.load_next();
    }

    let total = loader.items().len();
    if total == 0 {
        writeln!(out, "No results")?;
    } else {
        writeln!(
            out,
            "{} products across {} page{}",
            total,
            pages,
            if pages == 1 { "" } else { "s" }
        )?;
    }
    Ok(total)
}

/// Print only the first page of the unfiltered catalog (headless startup)
pub fn write_first_page<W: Write>(
    source: &dyn CatalogSource,
    page_size: usize,
    out: &mut W,
) -> Result<usize> {
    let mut loader = ListLoader::new(page_size);
    let ticket = loader.reset(FilterState::new());
    match loader.apply(ticket.resolve(source)) {
        Applied::Failed => {
            let reason = loader
                .last_error()
                .map(|e| e.to_string())
                .unwrap_or_default();
            bail!("first page could not be loaded: {}", reason);
        }
        Applied::Appended { .. } | Applied::Stale => {}
    }

    writeln!(out, "# {}", source.describe())?;
    write_products(loader.items(), out)?;
    if loader.has_more() {
        writeln!(out, "  ... more with `loga list`")?;
    }
    Ok(loader.items().len())
}

fn write_products<W: Write>(products: &[Product], out: &mut W) -> Result<()> {
    for product in products {
        writeln!(
            out,
            "  {:>4}  {}  {}  {}",
            product.id.to_string(),
            pad_to_width(&truncate_to_width(&product.name, 28), 28),
            pad_to_width(&product.category, 17),
            price_label(product)
        )?;
    }
    Ok(())
}

fn handle_config_path() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;
    println!("{}", path.display());
    Ok(())
}

fn handle_config_show(config: &Config) {
    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<()> {
    let path = Config::config_path().context("Could not determine config path")?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    let written = Config::default().save()?;
    println!("Config reset to defaults: {}", written.display());
    Ok(())
}
