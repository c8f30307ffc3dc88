//! Builds the page markup the theme selector attaches to.
//!
//! Layout:
//!
//! ```text
//! body
//! ├── header.cabecalho
//! │   ├── h1.titulo
//! │   └── button#botao-tema
//! ├── main.conteudo
//! └── div#overlay-tema
//!     └── div.modal-tema
//!         ├── h2.modal-titulo
//!         ├── button.modal-fechar
//!         └── div.lista-temas
//!             └── div.card-tema[data-tema-card]   (one per theme)
//!                 ├── span.card-nome
//!                 └── span.card-descricao
//! ```

use crate::config::{Config, PageConfig, ThemeCardConfig};
use crate::dom::{Document, Element};

pub const HEADER_CLASS: &str = "cabecalho";
pub const TITLE_CLASS: &str = "titulo";
pub const CONTENT_CLASS: &str = "conteudo";
pub const MODAL_CLASS: &str = "modal-tema";
pub const MODAL_TITLE_CLASS: &str = "modal-titulo";
pub const CARD_LIST_CLASS: &str = "lista-temas";
pub const CARD_NAME_CLASS: &str = "card-nome";
pub const CARD_DESCRIPTION_CLASS: &str = "card-descricao";

pub fn build_page(config: &Config) -> Document {
    build_page_with(&config.page, &config.themes)
}

pub fn build_page_with(page: &PageConfig, themes: &[ThemeCardConfig]) -> Document {
    let mut doc = Document::new();
    let body = doc.body();

    let header = doc.append_child(body, Element::new("header").with_class(HEADER_CLASS));
    doc.append_child(
        header,
        Element::new("h1").with_class(TITLE_CLASS).with_text(&page.title),
    );
    doc.append_child(
        header,
        Element::new("button").with_id(&page.toggle_id).with_text("☀/☾"),
    );

    doc.append_child(
        body,
        Element::new("main")
            .with_class(CONTENT_CLASS)
            .with_text("Clique em ☀/☾ para escolher um tema."),
    );

    let overlay = doc.append_child(body, Element::new("div").with_id(&page.overlay_id));
    let modal = doc.append_child(overlay, Element::new("div").with_class(MODAL_CLASS));
    doc.append_child(
        modal,
        Element::new("h2")
            .with_class(MODAL_TITLE_CLASS)
            .with_text("Escolha um tema"),
    );
    doc.append_child(
        modal,
        Element::new("button").with_class(&page.close_class).with_text("✕"),
    );

    let list = doc.append_child(modal, Element::new("div").with_class(CARD_LIST_CLASS));
    for theme in themes {
        let card = doc.append_child(
            list,
            Element::new("div")
                .with_class(&page.card_class)
                .with_attribute(&page.card_attribute, &theme.id),
        );
        doc.append_child(
            card,
            Element::new("span").with_class(CARD_NAME_CLASS).with_text(&theme.name),
        );
        doc.append_child(
            card,
            Element::new("span")
                .with_class(CARD_DESCRIPTION_CLASS)
                .with_text(&theme.description),
        );
    }

    tracing::debug!(
        "Built page with {} elements and {} theme cards",
        doc.len(),
        themes.len()
    );
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::DomHost;

    #[test]
    fn test_page_has_required_elements() {
        let config = Config::default();
        let doc = build_page(&config);

        let toggle = doc.get_element_by_id("botao-tema").expect("toggle");
        let overlay = doc.get_element_by_id("overlay-tema").expect("overlay");
        let close = doc.query_class("modal-fechar").expect("close");

        assert!(doc.contains(overlay, close));
        assert!(!doc.contains(overlay, toggle));
        assert_eq!(doc.parent(overlay), Some(doc.body()));
    }

    #[test]
    fn test_one_card_per_theme_in_order() {
        let config = Config::default();
        let doc = build_page(&config);

        let ids: Vec<&str> = doc
            .query_class_all("card-tema")
            .into_iter()
            .filter_map(|card| doc.get_attribute(card, "data-tema-card"))
            .collect();
        assert_eq!(ids, vec!["claro", "escuro", "alto-contraste"]);
    }

    #[test]
    fn test_card_text_lives_in_children() {
        let config = Config::default();
        let doc = build_page(&config);

        let card = doc.query_class("card-tema").unwrap();
        let name = doc.query_class(CARD_NAME_CLASS).unwrap();
        assert_eq!(doc.parent(name), Some(card));
        assert_eq!(doc.text(name), "Claro");
    }

    #[test]
    fn test_custom_markup_names() {
        let page = PageConfig {
            toggle_id: "theme-button".to_string(),
            card_class: "theme-card".to_string(),
            ..PageConfig::default()
        };
        let doc = build_page_with(&page, &[ThemeCardConfig::new("dark", "Dark", "")]);

        assert!(doc.get_element_by_id("theme-button").is_some());
        assert!(doc.get_element_by_id("botao-tema").is_none());
        assert_eq!(doc.query_class_all("theme-card").len(), 1);
    }
}
