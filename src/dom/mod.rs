//! In-memory element tree the theme picker operates on.
//!
//! The page is an arena of elements addressed by `ElementId`. Identity is the
//! arena index, so two handles compare equal only when they name the very same
//! element. Frontends read this tree to paint; the core mutates classes and
//! attributes on it.

pub mod event;

pub use event::ClickEvent;

use std::collections::{BTreeSet, HashMap};

/// Stable handle to an element inside a `Document`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

/// A single node in the page
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attributes: HashMap<String, String>,
    pub text: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }
}

/// Mutations the theme selector needs from its host page.
///
/// `Document` is the only production implementation; the trait keeps the
/// selector free of any particular tree representation.
pub trait DomHost {
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);
    fn get_attribute(&self, element: ElementId, name: &str) -> Option<&str>;
    fn add_class(&mut self, element: ElementId, class: &str);
    fn remove_class(&mut self, element: ElementId, class: &str);
    fn has_class(&self, element: ElementId, class: &str) -> bool;
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Bubbling path: `element` first, then each ancestor up to the root
    fn bubble_path(&self, element: ElementId) -> Vec<ElementId> {
        let mut path = Vec::new();
        let mut current = Some(element);
        while let Some(id) = current {
            path.push(id);
            current = self.parent(id);
        }
        path
    }

    /// Add or remove `class` depending on `force`
    fn toggle_class(&mut self, element: ElementId, class: &str, force: bool) {
        if force {
            self.add_class(element, class);
        } else {
            self.remove_class(element, class);
        }
    }
}

/// Element arena rooted at a `body` element
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    body: ElementId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            elements: vec![Element::new("body")],
            body: ElementId(0),
        }
    }

    /// Root element; the theme attribute lives here
    pub fn body(&self) -> ElementId {
        self.body
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Insert `element` as the last child of `parent`
    pub fn append_child(&mut self, parent: ElementId, mut element: Element) -> ElementId {
        let id = ElementId(self.elements.len());
        element.parent = Some(parent);
        element.children.clear();
        self.elements.push(element);
        self.elements[parent.0].children.push(id);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    /// Find the first element whose `id` attribute equals `id`
    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|el| el.id.as_deref() == Some(id))
            .map(ElementId)
    }

    /// First element (document order) carrying `class`
    pub fn query_class(&self, class: &str) -> Option<ElementId> {
        self.query_class_all(class).into_iter().next()
    }

    /// Every element carrying `class`, in document order
    pub fn query_class_all(&self, class: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        self.walk(self.body, &mut |doc, id| {
            if doc.elements[id.0].has_class(class) {
                found.push(id);
            }
        });
        found
    }

    /// Depth-first pre-order traversal starting at `from`
    pub fn walk(&self, from: ElementId, visit: &mut dyn FnMut(&Document, ElementId)) {
        visit(self, from);
        if let Some(element) = self.get(from) {
            for child in element.children.clone() {
                self.walk(child, visit);
            }
        }
    }

    pub fn text(&self, id: ElementId) -> &str {
        self.get(id)
            .and_then(|el| el.text.as_deref())
            .unwrap_or_default()
    }
}

impl DomHost for Document {
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(el) = self.get_mut(element) {
            el.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn get_attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.get(element)
            .and_then(|el| el.attributes.get(name))
            .map(|v| v.as_str())
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(el) = self.get_mut(element) {
            el.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(el) = self.get_mut(element) {
            el.classes.remove(class);
        }
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.get(element).is_some_and(|el| el.has_class(class))
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.get(element).and_then(|el| el.parent)
    }
}

#[cfg(test)]
impl Document {
    /// True when `ancestor` is `element` or one of its ancestors
    pub fn contains(&self, ancestor: ElementId, element: ElementId) -> bool {
        self.bubble_path(element).contains(&ancestor)
    }
}
