//! Click events delivered along the bubbling path.

use super::ElementId;

/// A click as seen by one handler on the bubbling path.
///
/// `target` is where the pointer actually landed and never changes while the
/// event bubbles; `current_target` is the element whose handler is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickEvent {
    target: ElementId,
    current_target: ElementId,
}

impl ClickEvent {
    /// Event as delivered to the element that was clicked
    pub fn new(target: ElementId) -> Self {
        Self {
            target,
            current_target: target,
        }
    }

    /// Same event, re-delivered to an ancestor
    pub fn bubbled_to(self, current_target: ElementId) -> Self {
        Self {
            target: self.target,
            current_target,
        }
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn current_target(&self) -> ElementId {
        self.current_target
    }

    /// True when the click originated on `element` itself rather than bubbling up from a child
    pub fn originated_on(&self, element: ElementId) -> bool {
        self.target == element
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, Element};

    #[test]
    fn test_bubbling_keeps_original_target() {
        let mut doc = Document::new();
        let overlay = doc.append_child(doc.body(), Element::new("div"));
        let card = doc.append_child(overlay, Element::new("div"));

        let event = ClickEvent::new(card).bubbled_to(overlay);
        assert_eq!(event.target(), card);
        assert_eq!(event.current_target(), overlay);
        assert!(!event.originated_on(overlay));
        assert!(event.originated_on(card));
    }
}
