//! Frontend abstraction layer
//!
//! This module defines the `Frontend` trait the terminal frontend implements.
//! It provides a unified interface for event polling, rendering, hit testing
//! and cleanup.

pub mod events;
pub mod tui;

use crate::core::AppCore;
use crate::dom::ElementId;
use anyhow::Result;
pub use events::FrontendEvent;
pub use tui::TuiFrontend;

/// Frontend trait
///
/// Separates rendering concerns from the selector logic. The frontend paints
/// `AppCore::document` and turns pointer positions back into elements.
pub trait Frontend {
    /// Poll for user input events
    ///
    /// Returns all pending events (keyboard, mouse, resize) converted to the
    /// frontend-agnostic `FrontendEvent` enum; empty if nothing happened.
    fn poll_events(&mut self) -> Result<Vec<FrontendEvent>>;

    /// Render the current page state
    fn render(&mut self, core: &AppCore) -> Result<()>;

    /// Element painted on top at `(x, y)` in the last frame, if any
    fn element_at(&self, x: u16, y: u16) -> Option<ElementId>;

    /// Restore the terminal before exit
    fn cleanup(&mut self) -> Result<()>;

    /// Current terminal size in cells
    fn size(&self) -> (u16, u16);
}
