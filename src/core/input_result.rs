//! What a click did to the theme selector.
//!
//! The run loop only needs to know whether something changed (to schedule a
//! redraw and log it); it matches on `ClickOutcome` instead of inspecting the
//! document.

use super::theme_selector::ThemeId;

/// Result of dispatching one click through the selector's handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No handler on the bubbling path reacted
    Ignored,

    /// Toggle activated, overlay shown
    Opened,

    /// Close control activated, overlay hidden
    ClosedByButton,

    /// Click landed on the backdrop itself, overlay hidden
    ClosedByBackdrop,

    /// Card activated: theme applied and overlay hidden
    ThemeSelected(ThemeId),
}

impl ClickOutcome {
    /// Check if this result hides the overlay
    pub fn is_closing(&self) -> bool {
        matches!(
            self,
            ClickOutcome::ClosedByButton
                | ClickOutcome::ClosedByBackdrop
                | ClickOutcome::ThemeSelected(_)
        )
    }

    /// Anything other than `Ignored` needs a redraw
    pub fn changed(&self) -> bool {
        !matches!(self, ClickOutcome::Ignored)
    }
}
