//! Configuration loader plus strongly typed settings structures.
//!
//! `config.toml` describes the page markup (element ids, class names,
//! attribute names), the theme cards to offer and a few UI knobs. Defaults are
//! embedded in the binary and extracted to the data directory on first run.

use anyhow::{Context, Result};
use include_dir::{include_dir, Dir};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Embed default configuration files at compile time
const DEFAULT_CONFIG: &str = include_str!("../defaults/config.toml");

// Embed the palette directory - every file becomes a built-in theme
pub static THEMES_DIR: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/defaults/themes");

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "THEME_PICKER_DIR";

/// Top-level configuration object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub page: PageConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default = "default_theme_cards")]
    pub themes: Vec<ThemeCardConfig>,
}

/// Markup contract between the page builder and the theme selector
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    /// Heading shown in the page header
    pub title: String,
    /// Theme applied at construction
    pub default_theme: String,
    /// Attribute on the root element holding the active theme
    pub root_attribute: String,
    /// Attribute on each card holding its theme id
    pub card_attribute: String,
    /// Class marking the card of the active theme
    pub active_class: String,
    /// Class marking the overlay as shown
    pub visible_class: String,
    pub toggle_id: String,
    pub overlay_id: String,
    pub close_class: String,
    pub card_class: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "Rede Acadêmica".to_string(),
            default_theme: "claro".to_string(),
            root_attribute: "data-tema".to_string(),
            card_attribute: "data-tema-card".to_string(),
            active_class: "ativo".to_string(),
            visible_class: "visivel".to_string(),
            toggle_id: "botao-tema".to_string(),
            overlay_id: "overlay-tema".to_string(),
            close_class: "modal-fechar".to_string(),
            card_class: "card-tema".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Event poll timeout - lower = higher FPS, higher CPU
    pub poll_timeout_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            poll_timeout_ms: 16,
        }
    }
}

/// One selectable card in the theme modal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ThemeCardConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl ThemeCardConfig {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

fn default_theme_cards() -> Vec<ThemeCardConfig> {
    vec![
        ThemeCardConfig::new("claro", "Claro", "Fundo claro e texto escuro"),
        ThemeCardConfig::new("escuro", "Escuro", "Fundo escuro para ambientes com pouca luz"),
        ThemeCardConfig::new("alto-contraste", "Alto contraste", "Cores fortes e bordas marcadas"),
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            page: PageConfig::default(),
            ui: UiConfig::default(),
            themes: default_theme_cards(),
        }
    }
}

impl Config {
    /// Load config from the data directory, extracting defaults on first run
    pub fn load() -> Result<Self> {
        let base = Self::config_dir()?;
        Self::load_from_dir(&base)
    }

    /// Load `config.toml` from `base`, creating it (and the palette files) if missing
    pub fn load_from_dir(base: &Path) -> Result<Self> {
        Self::extract_defaults(base)?;
        Self::load_from_path(&base.join("config.toml"))
    }

    /// Load config from a custom file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_toml(&contents)
            .context(format!("Failed to parse config file: {:?}", path))?;
        tracing::info!(
            "Loaded config from {:?} ({} theme cards)",
            path,
            config.themes.len()
        );
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        if config.themes.is_empty() {
            tracing::warn!("Config defines no themes; the modal will be empty");
        }
        if !config
            .themes
            .iter()
            .any(|t| t.id == config.page.default_theme)
        {
            tracing::warn!(
                "Default theme '{}' matches no configured card",
                config.page.default_theme
            );
        }
        Ok(config)
    }

    /// Write every embedded default that is not yet on disk (idempotent)
    fn extract_defaults(base: &Path) -> Result<()> {
        fs::create_dir_all(base)
            .context(format!("Failed to create data directory {:?}", base))?;

        let config_path = base.join("config.toml");
        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG).context("Failed to write config.toml")?;
            tracing::info!("Extracted config.toml to {:?}", config_path);
        }

        let themes_dir = base.join("themes");
        fs::create_dir_all(&themes_dir)?;

        for file in THEMES_DIR.files() {
            let filename = file
                .path()
                .file_name()
                .and_then(|n| n.to_str())
                .context("Invalid theme filename")?;
            let theme_path = themes_dir.join(filename);

            if !theme_path.exists() {
                let content = file
                    .contents_utf8()
                    .context(format!("Failed to read embedded theme {}", filename))?;
                fs::write(&theme_path, content)
                    .context(format!("Failed to write themes/{}", filename))?;
                tracing::info!("Extracted theme {} to {:?}", filename, theme_path);
            }
        }

        Ok(())
    }

    /// Get the base data directory (~/.theme-picker/)
    /// Can be overridden with THEME_PICKER_DIR environment variable
    pub fn config_dir() -> Result<PathBuf> {
        if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(custom_dir));
        }

        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".theme-picker"))
    }

    /// Returns: ~/.theme-picker/themes/
    pub fn themes_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("themes"))
    }

    /// Returns: ~/.theme-picker/theme-picker.log
    pub fn log_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("theme-picker.log"))
    }
}
