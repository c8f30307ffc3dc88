//! Theme selector: toggle opens the card modal, a card applies its theme.
//!
//! The selector owns the active theme id. The root element's theme attribute
//! and each card's active class are projections of that id and are rewritten
//! whenever it changes. Element references are injected at construction, so
//! any number of selectors can live side by side on different documents.

use super::input_result::ClickOutcome;
use crate::config::PageConfig;
use crate::dom::{ClickEvent, Document, DomHost, ElementId};
use std::fmt;
use thiserror::Error;

/// Opaque theme identifier; any string a card carries is accepted
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ThemeId(String);

impl ThemeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ThemeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which required element a lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    Toggle,
    Overlay,
    CloseControl,
}

impl fmt::Display for ElementRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ElementRole::Toggle => "toggle",
            ElementRole::Overlay => "overlay",
            ElementRole::CloseControl => "close control",
        };
        f.write_str(name)
    }
}

/// Construction-time configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    #[error("required {role} element not found (looked for `{selector}`)")]
    MissingElement { role: ElementRole, selector: String },
}

/// Element references the selector is wired to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorElements {
    pub root: ElementId,
    pub toggle: ElementId,
    pub overlay: ElementId,
    pub close: ElementId,
    pub cards: Vec<ElementId>,
}

impl SelectorElements {
    /// Look the elements up once using the page's markup names
    pub fn query(doc: &Document, page: &PageConfig) -> Result<Self, SelectorError> {
        let toggle = doc
            .get_element_by_id(&page.toggle_id)
            .ok_or_else(|| SelectorError::MissingElement {
                role: ElementRole::Toggle,
                selector: format!("#{}", page.toggle_id),
            })?;
        let overlay = doc
            .get_element_by_id(&page.overlay_id)
            .ok_or_else(|| SelectorError::MissingElement {
                role: ElementRole::Overlay,
                selector: format!("#{}", page.overlay_id),
            })?;
        let close = doc
            .query_class(&page.close_class)
            .ok_or_else(|| SelectorError::MissingElement {
                role: ElementRole::CloseControl,
                selector: format!(".{}", page.close_class),
            })?;

        Ok(Self {
            root: doc.body(),
            toggle,
            overlay,
            close,
            cards: doc.query_class_all(&page.card_class),
        })
    }
}

/// Attribute and class names the selector reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupNames {
    pub root_attribute: String,
    pub card_attribute: String,
    pub active_class: String,
    pub visible_class: String,
}

impl From<&PageConfig> for MarkupNames {
    fn from(page: &PageConfig) -> Self {
        Self {
            root_attribute: page.root_attribute.clone(),
            card_attribute: page.card_attribute.clone(),
            active_class: page.active_class.clone(),
            visible_class: page.visible_class.clone(),
        }
    }
}

/// Handler attached to an element on the bubbling path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    Toggle,
    Close,
    Backdrop,
    Card,
}

#[derive(Debug, Clone)]
pub struct ThemeSelector {
    elements: SelectorElements,
    names: MarkupNames,
    active: ThemeId,
}

impl ThemeSelector {
    /// Wire up injected elements and apply `initial` before any interaction
    pub fn new<H: DomHost>(
        host: &mut H,
        elements: SelectorElements,
        names: MarkupNames,
        initial: ThemeId,
    ) -> Self {
        let mut selector = Self {
            elements,
            names,
            active: initial.clone(),
        };
        selector.apply_theme(host, initial);
        selector
    }

    /// Query `doc` for the required elements and start at the page's default theme.
    ///
    /// Fails without touching `doc` if the toggle, overlay or close control is missing.
    pub fn attach(doc: &mut Document, page: &PageConfig) -> Result<Self, SelectorError> {
        let elements = SelectorElements::query(doc, page)?;
        tracing::debug!(
            "Theme selector attached: {} cards, default '{}'",
            elements.cards.len(),
            page.default_theme
        );
        Ok(Self::new(
            doc,
            elements,
            MarkupNames::from(page),
            ThemeId::from(page.default_theme.as_str()),
        ))
    }

    pub fn active_theme(&self) -> &ThemeId {
        &self.active
    }

    pub fn elements(&self) -> &SelectorElements {
        &self.elements
    }

    pub fn names(&self) -> &MarkupNames {
        &self.names
    }

    pub fn is_open<H: DomHost>(&self, host: &H) -> bool {
        host.has_class(self.elements.overlay, &self.names.visible_class)
    }

    /// Theme id carried by `card`, if it is one of ours and has the attribute
    pub fn card_theme<H: DomHost>(&self, host: &H, card: ElementId) -> Option<ThemeId> {
        host.get_attribute(card, &self.names.card_attribute)
            .map(ThemeId::from)
    }

    /// Show the overlay and resync card markers
    pub fn open_modal<H: DomHost>(&mut self, host: &mut H) {
        host.add_class(self.elements.overlay, &self.names.visible_class);
        self.sync_cards(host);
    }

    /// Hide the overlay (idempotent)
    pub fn close_modal<H: DomHost>(&self, host: &mut H) {
        host.remove_class(self.elements.overlay, &self.names.visible_class);
    }

    /// Close only when the click originated on the overlay itself.
    ///
    /// Returns true if the modal was closed by this call.
    pub fn handle_backdrop_click<H: DomHost>(&self, host: &mut H, event: ClickEvent) -> bool {
        if event.originated_on(self.elements.overlay) {
            self.close_modal(host);
            true
        } else {
            false
        }
    }

    /// Apply the theme carried by `card` and close the modal
    pub fn select_card<H: DomHost>(&mut self, host: &mut H, card: ElementId) -> ThemeId {
        // A card without the attribute applies the empty id, which never marks a card
        let theme = self.card_theme(host, card).unwrap_or_default();
        self.apply_theme(host, theme.clone());
        self.close_modal(host);
        theme
    }

    /// Set the active theme, project it onto the root and resync card markers
    pub fn apply_theme<H: DomHost>(&mut self, host: &mut H, theme: ThemeId) {
        host.set_attribute(self.elements.root, &self.names.root_attribute, theme.as_str());
        self.active = theme;
        self.sync_cards(host);
    }

    /// Mark exactly the cards whose id equals the active theme; the empty id marks none
    fn sync_cards<H: DomHost>(&self, host: &mut H) {
        let active = Some(self.active.as_str()).filter(|id| !id.is_empty());
        for &card in &self.elements.cards {
            let matches =
                active.is_some() && host.get_attribute(card, &self.names.card_attribute) == active;
            host.toggle_class(card, &self.names.active_class, matches);
        }
    }

    fn handler_for(&self, element: ElementId) -> Option<Handler> {
        if element == self.elements.toggle {
            Some(Handler::Toggle)
        } else if element == self.elements.close {
            Some(Handler::Close)
        } else if element == self.elements.overlay {
            Some(Handler::Backdrop)
        } else if self.elements.cards.contains(&element) {
            Some(Handler::Card)
        } else {
            None
        }
    }

    /// Deliver a click on `target` to every handler on its bubbling path.
    ///
    /// Handlers run target-first, then ancestors; none stops propagation.
    pub fn dispatch_click<H: DomHost>(&mut self, host: &mut H, target: ElementId) -> ClickOutcome {
        let event = ClickEvent::new(target);
        let mut outcome = ClickOutcome::Ignored;

        // The path is fixed at dispatch; handlers cannot reroute it
        for element in host.bubble_path(target) {
            let event = event.bubbled_to(element);

            let result = match self.handler_for(element) {
                Some(Handler::Toggle) => {
                    self.open_modal(host);
                    ClickOutcome::Opened
                }
                Some(Handler::Close) => {
                    self.close_modal(host);
                    ClickOutcome::ClosedByButton
                }
                Some(Handler::Backdrop) => {
                    if self.handle_backdrop_click(host, event) {
                        ClickOutcome::ClosedByBackdrop
                    } else {
                        ClickOutcome::Ignored
                    }
                }
                Some(Handler::Card) => ClickOutcome::ThemeSelected(self.select_card(host, element)),
                None => ClickOutcome::Ignored,
            };

            if result.changed() {
                tracing::debug!(
                    target_element = ?event.target(),
                    current = ?event.current_target(),
                    ?result,
                    "click handled"
                );
                if !outcome.changed() {
                    outcome = result;
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PageConfig, ThemeCardConfig};
    use crate::dom::Element;
    use crate::page::{self, build_page_with, CARD_NAME_CLASS, MODAL_CLASS, MODAL_TITLE_CLASS};

    fn themes() -> Vec<ThemeCardConfig> {
        vec![
            ThemeCardConfig::new("claro", "Claro", "Fundo claro"),
            ThemeCardConfig::new("escuro", "Escuro", "Fundo escuro"),
        ]
    }

    fn setup() -> (Document, ThemeSelector) {
        let page = PageConfig::default();
        let mut doc = build_page_with(&page, &themes());
        let selector = ThemeSelector::attach(&mut doc, &page).expect("page has all elements");
        (doc, selector)
    }

    fn card(doc: &Document, id: &str) -> ElementId {
        doc.query_class_all("card-tema")
            .into_iter()
            .find(|&c| doc.get_attribute(c, "data-tema-card") == Some(id))
            .expect("card exists")
    }

    fn active_cards(doc: &Document) -> Vec<String> {
        doc.query_class_all("card-tema")
            .into_iter()
            .filter(|&c| doc.has_class(c, "ativo"))
            .filter_map(|c| doc.get_attribute(c, "data-tema-card").map(str::to_string))
            .collect()
    }

    fn root_theme(doc: &Document) -> Option<&str> {
        doc.get_attribute(doc.body(), "data-tema")
    }

    #[test]
    fn test_construct_marks_default_card_and_overlay_hidden() {
        let (doc, selector) = setup();
        assert_eq!(selector.active_theme().as_str(), "claro");
        assert_eq!(root_theme(&doc), Some("claro"));
        assert_eq!(active_cards(&doc), vec!["claro"]);
        assert!(!selector.is_open(&doc));
    }

    #[test]
    fn test_toggle_opens_without_changing_theme() {
        let (mut doc, mut selector) = setup();
        let toggle = selector.elements().toggle;

        let outcome = selector.dispatch_click(&mut doc, toggle);

        assert_eq!(outcome, ClickOutcome::Opened);
        assert!(selector.is_open(&doc));
        assert_eq!(selector.active_theme().as_str(), "claro");
        assert_eq!(active_cards(&doc), vec!["claro"]);
    }

    #[test]
    fn test_open_twice_is_idempotent() {
        let (mut doc, mut selector) = setup();
        selector.open_modal(&mut doc);
        selector.open_modal(&mut doc);
        assert!(selector.is_open(&doc));
        assert_eq!(active_cards(&doc), vec!["claro"]);
    }

    #[test]
    fn test_select_card_applies_theme_and_closes() {
        let (mut doc, mut selector) = setup();
        let toggle = selector.elements().toggle;
        selector.dispatch_click(&mut doc, toggle);

        let escuro = card(&doc, "escuro");
        let outcome = selector.dispatch_click(&mut doc, escuro);

        assert_eq!(outcome, ClickOutcome::ThemeSelected(ThemeId::from("escuro")));
        assert_eq!(selector.active_theme().as_str(), "escuro");
        assert_eq!(root_theme(&doc), Some("escuro"));
        assert_eq!(active_cards(&doc), vec!["escuro"]);
        assert!(!selector.is_open(&doc));
    }

    #[test]
    fn test_select_closes_even_when_modal_was_closed() {
        let (mut doc, mut selector) = setup();
        assert!(!selector.is_open(&doc));

        let escuro = card(&doc, "escuro");
        selector.dispatch_click(&mut doc, escuro);

        assert!(!selector.is_open(&doc));
        assert_eq!(selector.active_theme().as_str(), "escuro");
    }

    #[test]
    fn test_backdrop_click_closes_and_keeps_theme() {
        let (mut doc, mut selector) = setup();
        selector.open_modal(&mut doc);
        let overlay = selector.elements().overlay;

        let outcome = selector.dispatch_click(&mut doc, overlay);

        assert_eq!(outcome, ClickOutcome::ClosedByBackdrop);
        assert!(!selector.is_open(&doc));
        assert_eq!(selector.active_theme().as_str(), "claro");
    }

    #[test]
    fn test_click_inside_modal_body_does_not_close() {
        let (mut doc, mut selector) = setup();
        selector.open_modal(&mut doc);

        // Lands inside the overlay, but neither on the backdrop nor within a card
        let title = doc.query_class(MODAL_TITLE_CLASS).unwrap();
        let outcome = selector.dispatch_click(&mut doc, title);
        assert_eq!(outcome, ClickOutcome::Ignored);
        assert!(selector.is_open(&doc));

        let modal = doc.query_class(MODAL_CLASS).unwrap();
        assert_eq!(selector.dispatch_click(&mut doc, modal), ClickOutcome::Ignored);
        assert!(selector.is_open(&doc));
        assert_eq!(selector.active_theme().as_str(), "claro");
    }

    #[test]
    fn test_backdrop_handler_ignores_bubbled_events() {
        let (mut doc, mut selector) = setup();
        selector.open_modal(&mut doc);
        let overlay = selector.elements().overlay;
        let title = doc.query_class(MODAL_TITLE_CLASS).unwrap();

        let bubbled = ClickEvent::new(title).bubbled_to(overlay);
        assert!(!selector.handle_backdrop_click(&mut doc, bubbled));
        assert!(selector.is_open(&doc));

        assert!(selector.handle_backdrop_click(&mut doc, ClickEvent::new(overlay)));
        assert!(!selector.is_open(&doc));
    }

    #[test]
    fn test_click_on_card_text_bubbles_to_card() {
        let (mut doc, mut selector) = setup();
        selector.open_modal(&mut doc);

        let escuro = card(&doc, "escuro");
        let name = doc
            .get(escuro)
            .unwrap()
            .children()
            .iter()
            .copied()
            .find(|&c| doc.has_class(c, CARD_NAME_CLASS))
            .unwrap();

        let outcome = selector.dispatch_click(&mut doc, name);
        assert_eq!(outcome, ClickOutcome::ThemeSelected(ThemeId::from("escuro")));
        assert!(!selector.is_open(&doc));
    }

    #[test]
    fn test_close_button_is_idempotent() {
        let (mut doc, mut selector) = setup();
        selector.open_modal(&mut doc);
        let close = selector.elements().close;

        assert_eq!(selector.dispatch_click(&mut doc, close), ClickOutcome::ClosedByButton);
        assert!(!selector.is_open(&doc));
        assert_eq!(selector.dispatch_click(&mut doc, close), ClickOutcome::ClosedByButton);
        assert!(!selector.is_open(&doc));
        assert_eq!(selector.active_theme().as_str(), "claro");
    }

    #[test]
    fn test_unrecognized_theme_marks_no_card() {
        let (mut doc, mut selector) = setup();
        selector.apply_theme(&mut doc, ThemeId::from("roxo"));

        assert_eq!(root_theme(&doc), Some("roxo"));
        assert!(active_cards(&doc).is_empty());

        // Opening resyncs but still finds nothing to mark
        selector.open_modal(&mut doc);
        assert!(active_cards(&doc).is_empty());
    }

    #[test]
    fn test_unrecognized_default_marks_no_card() {
        let page = PageConfig {
            default_theme: "sepia".to_string(),
            ..PageConfig::default()
        };
        let mut doc = build_page_with(&page, &themes());
        let selector = ThemeSelector::attach(&mut doc, &page).unwrap();

        assert_eq!(selector.active_theme().as_str(), "sepia");
        assert!(active_cards(&doc).is_empty());
    }

    #[test]
    fn test_open_resyncs_markers_after_outside_change() {
        let (mut doc, mut selector) = setup();
        let claro = card(&doc, "claro");
        // Something else scribbled on the markers
        doc.remove_class(claro, "ativo");
        let escuro = card(&doc, "escuro");
        doc.add_class(escuro, "ativo");

        selector.open_modal(&mut doc);
        assert_eq!(active_cards(&doc), vec!["claro"]);
    }

    #[test]
    fn test_selection_sequences_leave_one_marked_card() {
        let ids = ["claro", "escuro", "claro", "escuro", "escuro"];
        let (mut doc, mut selector) = setup();

        for len in 1..=ids.len() {
            for &id in &ids[..len] {
                let target = card(&doc, id);
                selector.dispatch_click(&mut doc, target);
            }
            let last = ids[len - 1];
            assert_eq!(active_cards(&doc), vec![last]);
            assert_eq!(selector.active_theme().as_str(), last);
            assert!(!selector.is_open(&doc));
        }
    }

    #[test]
    fn test_missing_elements_fail_construction() {
        let page = PageConfig::default();

        let mut empty = Document::new();
        assert_eq!(
            ThemeSelector::attach(&mut empty, &page).unwrap_err(),
            SelectorError::MissingElement {
                role: ElementRole::Toggle,
                selector: "#botao-tema".to_string(),
            }
        );

        let mut no_overlay = Document::new();
        let body = no_overlay.body();
        no_overlay.append_child(body, Element::new("button").with_id("botao-tema"));
        let err = ThemeSelector::attach(&mut no_overlay, &page).unwrap_err();
        assert!(matches!(
            err,
            SelectorError::MissingElement { role: ElementRole::Overlay, .. }
        ));

        no_overlay.append_child(body, Element::new("div").with_id("overlay-tema"));
        let err = ThemeSelector::attach(&mut no_overlay, &page).unwrap_err();
        assert_eq!(
            err.to_string(),
            "required close control element not found (looked for `.modal-fechar`)"
        );
        // Nothing was projected onto the root
        assert_eq!(no_overlay.get_attribute(body, "data-tema"), None);
    }

    #[test]
    fn test_page_without_cards_still_works() {
        let page = PageConfig::default();
        let mut doc = build_page_with(&page, &[]);
        let mut selector = ThemeSelector::attach(&mut doc, &page).unwrap();

        let toggle = selector.elements().toggle;
        assert_eq!(selector.dispatch_click(&mut doc, toggle), ClickOutcome::Opened);
        assert!(selector.elements().cards.is_empty());
    }

    #[test]
    fn test_independent_instances() {
        let page = PageConfig::default();
        let mut first_doc = page::build_page_with(&page, &themes());
        let mut second_doc = page::build_page_with(&page, &themes());
        let mut first = ThemeSelector::attach(&mut first_doc, &page).unwrap();
        let second = ThemeSelector::attach(&mut second_doc, &page).unwrap();

        let escuro = card(&first_doc, "escuro");
        first.dispatch_click(&mut first_doc, escuro);

        assert_eq!(first.active_theme().as_str(), "escuro");
        assert_eq!(second.active_theme().as_str(), "claro");
        assert_eq!(root_theme(&second_doc), Some("claro"));
    }

    #[test]
    fn test_card_without_theme_attribute_marks_nothing() {
        let page = PageConfig::default();
        let mut doc = build_page_with(&page, &themes());
        let list = doc.query_class(page::CARD_LIST_CLASS).unwrap();
        let bare = doc.append_child(list, Element::new("div").with_class("card-tema"));
        let blank = doc.append_child(
            list,
            Element::new("div")
                .with_class("card-tema")
                .with_attribute("data-tema-card", ""),
        );
        let mut selector = ThemeSelector::attach(&mut doc, &page).unwrap();

        selector.open_modal(&mut doc);
        assert_eq!(
            selector.dispatch_click(&mut doc, bare),
            ClickOutcome::ThemeSelected(ThemeId::default())
        );
        assert_eq!(root_theme(&doc), Some(""));
        assert!(!doc.has_class(bare, "ativo"));
        assert!(!doc.has_class(blank, "ativo"));
        assert!(active_cards(&doc).is_empty());
        assert!(!selector.is_open(&doc));

        // Picking a real card afterwards restores a single marker
        selector.open_modal(&mut doc);
        let escuro = card(&doc, "escuro");
        selector.dispatch_click(&mut doc, escuro);
        assert_eq!(active_cards(&doc), vec!["escuro".to_string()]);
    }

    #[test]
    fn test_cards_added_after_construction_are_not_handled() {
        let (mut doc, mut selector) = setup();
        let list = doc.query_class(page::CARD_LIST_CLASS).unwrap();
        let late = doc.append_child(
            list,
            Element::new("div")
                .with_class("card-tema")
                .with_attribute("data-tema-card", "sepia"),
        );

        selector.open_modal(&mut doc);
        assert_eq!(selector.dispatch_click(&mut doc, late), ClickOutcome::Ignored);
        assert!(selector.is_open(&doc));
        assert_eq!(selector.active_theme().as_str(), "claro");
    }

    #[test]
    fn test_end_to_end_scenarios() {
        // 1: construct
        let (mut doc, mut selector) = setup();
        assert_eq!(active_cards(&doc), vec!["claro"]);
        assert!(!selector.is_open(&doc));

        // 2: toggle
        let toggle = selector.elements().toggle;
        selector.dispatch_click(&mut doc, toggle);
        assert!(selector.is_open(&doc));
        assert_eq!(active_cards(&doc), vec!["claro"]);

        // 3: pick "escuro"
        let escuro = card(&doc, "escuro");
        selector.dispatch_click(&mut doc, escuro);
        assert_eq!(selector.active_theme().as_str(), "escuro");
        assert_eq!(active_cards(&doc), vec!["escuro"]);
        assert!(!selector.is_open(&doc));

        // 4: reopen, click the backdrop
        selector.dispatch_click(&mut doc, toggle);
        let overlay = selector.elements().overlay;
        selector.dispatch_click(&mut doc, overlay);
        assert!(!selector.is_open(&doc));
        assert_eq!(selector.active_theme().as_str(), "escuro");

        // 5: reopen, click inside the modal but off the cards
        selector.dispatch_click(&mut doc, toggle);
        let title = doc.query_class(MODAL_TITLE_CLASS).unwrap();
        selector.dispatch_click(&mut doc, title);
        assert!(selector.is_open(&doc));
        assert_eq!(selector.active_theme().as_str(), "escuro");
    }
}
