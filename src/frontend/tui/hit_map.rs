//! Screen regions recorded while painting, used to turn a mouse position
//! back into the element under it.

use crate::dom::ElementId;
use ratatui::layout::{Position, Rect};

/// Painted regions in paint order; later entries sit on top
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    regions: Vec<(Rect, ElementId)>,
}

impl HitMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Record that `element` was painted over `rect`; empty rects are dropped
    pub fn record(&mut self, rect: Rect, element: ElementId) {
        if rect.area() > 0 {
            self.regions.push((rect, element));
        }
    }

    /// Topmost element whose region contains the cell
    pub fn element_at(&self, x: u16, y: u16) -> Option<ElementId> {
        self.regions
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(Position { x, y }))
            .map(|(_, element)| *element)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }
}

#[cfg(test)]
impl HitMap {
    /// Topmost region painted for `element`
    pub fn region_of(&self, element: ElementId) -> Option<Rect> {
        self.regions
            .iter()
            .rev()
            .find(|(_, e)| *e == element)
            .map(|(rect, _)| *rect)
    }
}
