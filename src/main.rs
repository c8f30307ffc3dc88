//! Theme Picker - terminal page with a theme selection modal
//!
//! A toggle in the header opens an overlay listing theme cards; picking a card
//! re-themes the page and closes the overlay.

mod config;
mod core;
mod dom;
mod frontend;
mod page;
mod theme;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use frontend::{Frontend, FrontendEvent};
use std::path::PathBuf;
use std::time::Duration;

#[derive(ClapParser)]
#[command(name = "theme-picker")]
#[command(about = "Terminal page with a theme selection modal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.theme-picker)
    /// Can also be set via THEME_PICKER_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Theme applied at startup instead of the configured default
    #[arg(short, long, value_name = "ID")]
    theme: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the page, attach the selector and report what it found
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set custom data directory if specified, before anything resolves paths
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DATA_DIR_ENV, data_dir);
    }

    init_logging()?;
    if let Some(data_dir) = &cli.data_dir {
        tracing::info!("Using custom data directory: {:?}", data_dir);
    } else if let Ok(env_dir) = std::env::var(config::DATA_DIR_ENV) {
        tracing::info!("Using data directory from {}: {}", config::DATA_DIR_ENV, env_dir);
    }

    let mut config = match &cli.config {
        Some(path) => config::Config::load_from_path(path)?,
        None => config::Config::load()?,
    };
    // Palettes fall back to the configured default even when --theme names something unknown
    let palettes =
        theme::PaletteSet::load(&config::Config::themes_dir()?, &config.page.default_theme);
    if let Some(theme) = &cli.theme {
        tracing::info!("Overriding default theme with '{}'", theme);
        config.page.default_theme = theme.clone();
    }

    match cli.command {
        Some(Commands::Check) => run_check(config, palettes),
        None => run_tui(config, palettes),
    }
}

/// Initialize logging to file (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
/// TUI apps can't log to stdout, so we write to a file in the data directory
fn init_logging() -> Result<()> {
    let log_path = config::Config::log_path()?;
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create data directory {:?}", parent))?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context(format!("Failed to open log file {:?}", log_path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    Ok(())
}

/// `check` subcommand: validate the markup contract without opening the terminal
fn run_check(config: config::Config, palettes: theme::PaletteSet) -> Result<()> {
    use dom::DomHost;

    let app_core = match core::AppCore::new(config, palettes) {
        Ok(app_core) => app_core,
        Err(e) => {
            eprintln!("✗ {:#}", e);
            std::process::exit(1);
        }
    };

    let selector = &app_core.selector;
    let doc = &app_core.document;
    println!("✓ Page built with {} elements", doc.len());
    println!("  {} theme cards", selector.elements().cards.len());

    let mut warnings = 0;
    for &card in &selector.elements().cards {
        let id = selector
            .card_theme(doc, card)
            .map(|t| t.to_string())
            .unwrap_or_default();
        let marker = if doc.has_class(card, &selector.names().active_class) {
            "●"
        } else {
            " "
        };
        println!("  {} {}", marker, id);
        if !app_core.palettes.contains(&id) {
            println!("⚠ Warning: no palette for theme '{}', it will use the fallback", id);
            warnings += 1;
        }
    }

    println!("  Active theme: {}", selector.active_theme());
    if warnings > 0 {
        println!("⚠ Found {} warning(s)", warnings);
    }
    Ok(())
}

/// Run TUI frontend
fn run_tui(config: config::Config, palettes: theme::PaletteSet) -> Result<()> {
    use frontend::TuiFrontend;

    let poll_timeout = Duration::from_millis(config.ui.poll_timeout_ms);
    let mut app_core = core::AppCore::new(config, palettes)?;

    let mut frontend = TuiFrontend::new()?;
    frontend.set_poll_timeout(poll_timeout);
    let (width, height) = frontend.size();
    tracing::info!("Starting TUI at {}x{}", width, height);

    while app_core.running {
        if app_core.needs_render {
            frontend.render(&app_core)?;
            app_core.needs_render = false;
        }

        for event in frontend.poll_events()? {
            handle_event(&mut app_core, &mut frontend, event)?;
            if !app_core.running {
                break;
            }
        }
    }

    frontend.cleanup()?;
    tracing::info!("Exited with theme '{}'", app_core.selector.active_theme());
    Ok(())
}

/// Route one frontend event into the core
fn handle_event(
    app_core: &mut core::AppCore,
    frontend: &mut dyn Frontend,
    event: FrontendEvent,
) -> Result<()> {
    match event {
        FrontendEvent::Key { code, modifiers } => {
            app_core.handle_key(code, modifiers);
        }
        FrontendEvent::Mouse { .. } => {
            let Some((x, y)) = event.click_position() else {
                return Ok(());
            };
            // Hit-test against what is on screen now, not a frame from before the last click
            if app_core.needs_render {
                frontend.render(app_core)?;
                app_core.needs_render = false;
            }
            match frontend.element_at(x, y) {
                Some(target) => {
                    app_core.handle_click(target);
                }
                None => tracing::debug!("Click at ({}, {}) hit nothing", x, y),
            }
        }
        FrontendEvent::Resize { width, height } => {
            tracing::debug!("Resized to {}x{}", width, height);
            app_core.needs_render = true;
        }
    }
    Ok(())
}
