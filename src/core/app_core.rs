use super::input_result::ClickOutcome;
use super::menu_actions::{action_for_key, PickerAction};
use super::theme_selector::ThemeSelector;
use crate::config::Config;
use crate::dom::{Document, DomHost, ElementId};
use crate::page;
use crate::theme::{Palette, PaletteSet};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyModifiers};

/// Core application state (frontend-agnostic)
///
/// Owns the page document and the theme selector wired to it. Frontends
/// resolve input to element clicks and hand them here; they read `document`
/// to paint.
pub struct AppCore {
    /// Application configuration
    pub config: Config,

    /// The page the selector operates on
    pub document: Document,

    /// Theme selector wired to `document`
    pub selector: ThemeSelector,

    /// Colours for every known theme id
    pub palettes: PaletteSet,

    /// Application running flag
    pub running: bool,

    /// Set whenever the document changed since the last frame
    pub needs_render: bool,
}

impl AppCore {
    /// Build the page from config and attach the selector to it
    pub fn new(config: Config, palettes: PaletteSet) -> Result<Self> {
        let mut document = page::build_page(&config);
        let selector = ThemeSelector::attach(&mut document, &config.page)
            .context("Page markup is missing a required element")?;

        tracing::info!(
            "Theme selector ready with {} cards, active theme '{}'",
            selector.elements().cards.len(),
            selector.active_theme()
        );

        Ok(Self {
            config,
            document,
            selector,
            palettes,
            running: true,
            needs_render: true,
        })
    }

    /// Deliver a click on `target` through the selector
    pub fn handle_click(&mut self, target: ElementId) -> ClickOutcome {
        let outcome = self.selector.dispatch_click(&mut self.document, target);
        let tag = self
            .document
            .get(target)
            .map(|el| el.tag.as_str())
            .unwrap_or("?");

        match &outcome {
            ClickOutcome::ThemeSelected(theme) => {
                if !self.palettes.contains(theme.as_str()) {
                    tracing::debug!("No palette for theme '{}', painting with fallback", theme);
                }
                tracing::info!("Switched to theme: {}", theme);
            }
            ClickOutcome::Ignored => tracing::trace!("Click on <{}> {:?} ignored", tag, target),
            other => tracing::debug!(
                "Click on <{}> {:?}: {:?}, overlay {}",
                tag,
                target,
                other,
                if other.is_closing() { "hidden" } else { "shown" }
            ),
        }

        if outcome.changed() {
            self.needs_render = true;
        }
        outcome
    }

    /// Translate a key press into a click on the element it names
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> ClickOutcome {
        let target = match action_for_key(code, modifiers, self.overlay_open()) {
            PickerAction::Quit => {
                self.running = false;
                return ClickOutcome::Ignored;
            }
            PickerAction::ClickToggle => Some(self.selector.elements().toggle),
            PickerAction::ClickClose => Some(self.selector.elements().close),
            PickerAction::ClickCard(index) => self.selector.elements().cards.get(index).copied(),
            PickerAction::None => None,
        };

        match target {
            Some(target) => self.handle_click(target),
            None => ClickOutcome::Ignored,
        }
    }

    pub fn overlay_open(&self) -> bool {
        self.selector.is_open(&self.document)
    }

    /// Palette for whatever theme the root element currently shows
    pub fn active_palette(&self) -> Palette {
        let root = self.document.body();
        let theme = self
            .document
            .get_attribute(root, &self.selector.names().root_attribute);
        self.palettes.resolve(theme)
    }
}
