//! Paints the page document: header with the theme toggle, page content and,
//! while the overlay carries the visible class, the full-screen backdrop with
//! the centered card modal.
//!
//! Every painted element is recorded in the `HitMap` state so mouse clicks can
//! be resolved to the element on top.

use super::hit_map::HitMap;
use crate::config::PageConfig;
use crate::dom::{Document, DomHost, ElementId};
use crate::page::{
    CARD_DESCRIPTION_CLASS, CARD_LIST_CLASS, CARD_NAME_CLASS, CONTENT_CLASS, HEADER_CLASS,
    MODAL_CLASS, MODAL_TITLE_CLASS, TITLE_CLASS,
};
use crate::theme::Palette;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, StatefulWidget, Widget},
};

const HEADER_HEIGHT: u16 = 3;
const CARD_HEIGHT: u16 = 4;
const MODAL_MAX_WIDTH: u16 = 60;

/// Snapshot of the page to paint this frame
pub struct PageView<'a> {
    doc: &'a Document,
    page: &'a PageConfig,
    palette: Palette,
}

impl<'a> PageView<'a> {
    pub fn new(doc: &'a Document, page: &'a PageConfig, palette: Palette) -> Self {
        Self { doc, page, palette }
    }

    fn child_with_class(&self, parent: ElementId, class: &str) -> Option<ElementId> {
        self.doc
            .get(parent)?
            .children()
            .iter()
            .copied()
            .find(|&child| self.doc.has_class(child, class))
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
        let Some(header) = self.doc.query_class(HEADER_CLASS) else {
            return;
        };
        let rect = Rect {
            height: HEADER_HEIGHT.min(area.height),
            ..area
        };

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(self.palette.muted))
            .style(Style::default().bg(self.palette.background));
        let inner = block.inner(rect);
        block.render(rect, buf);
        hits.record(rect, header);

        if let Some(title) = self.child_with_class(header, TITLE_CLASS) {
            let title_rect = Rect {
                x: inner.x + 1,
                width: inner.width.saturating_sub(10),
                height: 1.min(inner.height),
                ..inner
            }
            .intersection(area);
            Paragraph::new(self.doc.text(title))
                .style(
                    Style::default()
                        .fg(self.palette.foreground)
                        .add_modifier(Modifier::BOLD),
                )
                .render(title_rect, buf);
            hits.record(title_rect, title);
        }

        if let Some(toggle) = self.doc.get_element_by_id(&self.page.toggle_id) {
            let label = format!(" {} ", self.doc.text(toggle));
            let width = (label.chars().count() as u16).min(inner.width);
            let toggle_rect = Rect {
                x: inner.right().saturating_sub(width + 1),
                width,
                height: 1.min(inner.height),
                ..inner
            }
            .intersection(area);
            Paragraph::new(label)
                .style(
                    Style::default()
                        .fg(self.palette.background)
                        .bg(self.palette.accent),
                )
                .render(toggle_rect, buf);
            hits.record(toggle_rect, toggle);
        }
    }

    fn render_content(&self, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
        let Some(content) = self.doc.query_class(CONTENT_CLASS) else {
            return;
        };
        let rect = Rect {
            y: area.y + HEADER_HEIGHT.min(area.height),
            height: area.height.saturating_sub(HEADER_HEIGHT),
            ..area
        };

        let active = self
            .doc
            .get_attribute(self.doc.body(), &self.page.root_attribute)
            .unwrap_or_default();
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.doc.text(content).to_string(),
                Style::default().fg(self.palette.foreground),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Tema atual: ", Style::default().fg(self.palette.muted)),
                Span::styled(
                    active.to_string(),
                    Style::default()
                        .fg(self.palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "t: temas  Esc: fechar  1-9: escolher  q: sair",
                Style::default().fg(self.palette.muted),
            )),
        ];

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::NONE))
            .style(Style::default().bg(self.palette.background))
            .render(
                Rect {
                    x: rect.x + 2,
                    width: rect.width.saturating_sub(2),
                    ..rect
                }
                .intersection(area),
                buf,
            );
        hits.record(rect, content);
    }

    fn render_overlay(&self, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
        let Some(overlay) = self.doc.get_element_by_id(&self.page.overlay_id) else {
            return;
        };
        if !self.doc.has_class(overlay, &self.page.visible_class) {
            return;
        }

        // Backdrop covers the whole page, so clicks outside the modal land on it
        Clear.render(area, buf);
        Block::default()
            .style(Style::default().bg(self.palette.overlay))
            .render(area, buf);
        hits.record(area, overlay);

        let Some(modal) = self.child_with_class(overlay, MODAL_CLASS) else {
            return;
        };
        let cards = self.doc.query_class_all(&self.page.card_class);

        let width = MODAL_MAX_WIDTH.min(area.width.saturating_sub(4));
        let card_count = u16::try_from(cards.len()).unwrap_or(u16::MAX);
        let wanted_height = CARD_HEIGHT.saturating_mul(card_count).saturating_add(4);
        let height = wanted_height.min(area.height.saturating_sub(2));
        let modal_rect = Rect {
            x: area.x + (area.width.saturating_sub(width)) / 2,
            y: area.y + (area.height.saturating_sub(height)) / 2,
            width,
            height,
        };

        Clear.render(modal_rect, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.palette.accent))
            .style(Style::default().bg(self.palette.background));
        let inner = block.inner(modal_rect);
        block.render(modal_rect, buf);
        hits.record(modal_rect, modal);

        if inner.height == 0 {
            return;
        }

        if let Some(title) = self.child_with_class(modal, MODAL_TITLE_CLASS) {
            let title_rect = Rect {
                x: inner.x + 1,
                width: inner.width.saturating_sub(6),
                height: 1,
                ..inner
            }
            .intersection(inner);
            Paragraph::new(self.doc.text(title))
                .style(
                    Style::default()
                        .fg(self.palette.foreground)
                        .add_modifier(Modifier::BOLD),
                )
                .render(title_rect, buf);
            hits.record(title_rect, title);
        }

        if let Some(close) = self.child_with_class(modal, &self.page.close_class) {
            let close_rect = Rect {
                x: inner.right().saturating_sub(4),
                width: 3.min(inner.width),
                height: 1,
                ..inner
            }
            .intersection(inner);
            Paragraph::new(format!(" {} ", self.doc.text(close)))
                .style(Style::default().fg(self.palette.accent))
                .render(close_rect, buf);
            hits.record(close_rect, close);
        }

        let Some(list) = self.child_with_class(modal, CARD_LIST_CLASS) else {
            return;
        };
        let list_rect = Rect {
            y: inner.y + 2,
            height: inner.height.saturating_sub(2),
            ..inner
        };
        if list_rect.y >= inner.bottom() {
            return;
        }
        hits.record(list_rect, list);

        for (index, card) in cards.into_iter().enumerate() {
            let offset = u16::try_from(index)
                .unwrap_or(u16::MAX)
                .saturating_mul(CARD_HEIGHT);
            let y = list_rect.y.saturating_add(offset);
            if y.saturating_add(CARD_HEIGHT) > list_rect.bottom() {
                break;
            }
            let card_rect = Rect {
                x: list_rect.x + 1,
                y,
                width: list_rect.width.saturating_sub(2),
                height: CARD_HEIGHT,
            };
            self.render_card(index, card, card_rect, buf, hits);
        }
    }

    fn render_card(
        &self,
        index: usize,
        card: ElementId,
        rect: Rect,
        buf: &mut Buffer,
        hits: &mut HitMap,
    ) {
        let is_active = self.doc.has_class(card, &self.page.active_class);
        let (bg, border) = if is_active {
            (self.palette.card_active, self.palette.accent)
        } else {
            (self.palette.card_background, self.palette.muted)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if is_active {
                BorderType::Double
            } else {
                BorderType::Plain
            })
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(bg));
        let inner = block.inner(rect);
        block.render(rect, buf);
        hits.record(rect, card);

        let marker = if is_active { "● " } else { "  " };
        let shortcut = if index < 9 {
            format!("{}. ", index + 1)
        } else {
            "   ".to_string()
        };

        if let Some(name) = self.child_with_class(card, CARD_NAME_CLASS) {
            let name_rect = Rect { height: 1, ..inner };
            let mut style = Style::default().fg(self.palette.foreground);
            if is_active {
                style = style.add_modifier(Modifier::BOLD);
            }
            Paragraph::new(Line::from(vec![
                Span::styled(shortcut, Style::default().fg(self.palette.muted)),
                Span::styled(marker, Style::default().fg(self.palette.accent)),
                Span::styled(self.doc.text(name).to_string(), style),
            ]))
            .render(name_rect, buf);
            hits.record(name_rect, name);
        }

        if let Some(description) = self.child_with_class(card, CARD_DESCRIPTION_CLASS) {
            if inner.height > 1 {
                let desc_rect = Rect {
                    x: inner.x + 5,
                    y: inner.y + 1,
                    width: inner.width.saturating_sub(5),
                    height: 1,
                }
                .intersection(inner);
                Paragraph::new(self.doc.text(description))
                    .style(Style::default().fg(self.palette.muted))
                    .render(desc_rect, buf);
                hits.record(desc_rect, description);
            }
        }
    }
}

impl StatefulWidget for PageView<'_> {
    type State = HitMap;

    fn render(self, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
        hits.clear();

        Block::default()
            .style(
                Style::default()
                    .bg(self.palette.background)
                    .fg(self.palette.foreground),
            )
            .render(area, buf);
        hits.record(area, self.doc.body());

        self.render_header(area, buf, hits);
        self.render_content(area, buf, hits);
        self.render_overlay(area, buf, hits);
    }
}
