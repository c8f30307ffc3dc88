//! Colour palettes keyed by theme id.
//!
//! The selector only tracks a theme *id*; this module turns that id into the
//! colours the frontend paints with. Built-in palettes come from the embedded
//! `defaults/themes` directory, user palettes from `<data dir>/themes/*.toml`.

use anyhow::{Context, Result};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Colours used to paint the page for one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub muted: Color,
    pub card_background: Color,
    pub card_active: Color,
    pub overlay: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::Rgb(245, 245, 240),
            foreground: Color::Rgb(30, 30, 36),
            accent: Color::Rgb(47, 111, 219),
            muted: Color::Rgb(122, 122, 133),
            card_background: Color::Rgb(255, 255, 255),
            card_active: Color::Rgb(214, 228, 255),
            overlay: Color::Rgb(200, 200, 192),
        }
    }
}

/// On-disk palette file: hex colour strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaletteFile {
    pub id: String,
    pub background: String,
    pub foreground: String,
    pub accent: String,
    pub muted: String,
    pub card_background: String,
    pub card_active: String,
    pub overlay: String,
}

impl PaletteFile {
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .context(format!("Failed to read theme file: {:?}", path))?;
        Self::from_toml(&contents).context(format!("Failed to parse theme file: {:?}", path))
    }

    /// Convert hex strings to colours; `None` if any of them is malformed
    pub fn to_palette(&self) -> Option<Palette> {
        Some(Palette {
            background: hex_to_color(&self.background)?,
            foreground: hex_to_color(&self.foreground)?,
            accent: hex_to_color(&self.accent)?,
            muted: hex_to_color(&self.muted)?,
            card_background: hex_to_color(&self.card_background)?,
            card_active: hex_to_color(&self.card_active)?,
            overlay: hex_to_color(&self.overlay)?,
        })
    }
}

/// Convert hex string to ratatui Color
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color::Rgb(r, g, b))
}

/// All known palettes plus the id to fall back on
#[derive(Debug, Clone)]
pub struct PaletteSet {
    palettes: HashMap<String, Palette>,
    fallback_id: String,
}

impl PaletteSet {
    pub fn new(fallback_id: &str) -> Self {
        Self {
            palettes: HashMap::new(),
            fallback_id: fallback_id.to_string(),
        }
    }

    /// Palettes embedded in the binary
    pub fn builtin(fallback_id: &str) -> Self {
        let mut set = Self::new(fallback_id);
        for file in crate::config::THEMES_DIR.files() {
            let Some(contents) = file.contents_utf8() else {
                continue;
            };
            match PaletteFile::from_toml(contents) {
                Ok(data) => set.insert_file(&data, &file.path().display().to_string()),
                Err(e) => {
                    tracing::warn!("Embedded theme {:?} is invalid: {}", file.path(), e)
                }
            }
        }
        set
    }

    /// Built-in palettes overlaid with every readable `*.toml` in `dir`
    pub fn load(dir: &Path, fallback_id: &str) -> Self {
        let mut set = Self::builtin(fallback_id);

        if !dir.exists() {
            tracing::debug!("Themes directory does not exist: {:?}", dir);
            return set;
        }

        match fs::read_dir(dir) {
            Ok(entries) => {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                        continue;
                    }
                    match PaletteFile::load_from_file(&path) {
                        Ok(data) => set.insert_file(&data, &path.display().to_string()),
                        Err(e) => {
                            tracing::warn!("Failed to load theme from {:?}: {:#}", path, e);
                        }
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read themes directory {:?}: {}", dir, e);
            }
        }

        set
    }

    fn insert_file(&mut self, data: &PaletteFile, origin: &str) {
        match data.to_palette() {
            Some(palette) => {
                tracing::debug!("Loaded palette '{}' from {}", data.id, origin);
                self.palettes.insert(data.id.clone(), palette);
            }
            None => tracing::warn!("Palette '{}' in {} has a malformed colour", data.id, origin),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.palettes.contains_key(id)
    }

    /// Palette for `id`, else the fallback palette, else the hard-coded light palette
    pub fn resolve(&self, id: Option<&str>) -> Palette {
        id.and_then(|id| self.palettes.get(id))
            .or_else(|| self.palettes.get(&self.fallback_id))
            .copied()
            .unwrap_or_default()
    }
}
