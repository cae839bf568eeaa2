use crate::selectors;
use crate::store::EntityState;
use crate::ui::theme::{ACCENT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

/// Profile block in the header.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderView {
    /// Session unknown or signed out: no profile, no favorites link.
    Hidden,
    Profile {
        email: String,
        avatar_url: String,
        favorite_count: usize,
    },
}

impl HeaderView {
    pub fn reconcile(state: &EntityState) -> Self {
        match selectors::user(state) {
            Some(user) => HeaderView::Profile {
                email: user.email.clone(),
                avatar_url: user.avatar_url.clone(),
                favorite_count: selectors::live_favorite_count(state),
            },
            None => HeaderView::Hidden,
        }
    }

    pub fn widget(&self, show_sign_in: bool) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let mut spans = vec![
            Span::styled("  ", text_style),
            Span::styled("6 cities", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        ];
        match self {
            HeaderView::Profile {
                email,
                favorite_count,
                ..
            } => {
                spans.push(Span::styled("  │  ", separator_style));
                spans.push(Span::styled(email.clone(), text_style));
                spans.push(Span::styled("  │  ", separator_style));
                spans.push(Span::styled(format!("♥ {favorite_count}"), Style::default().fg(ACCENT)));
                spans.push(Span::styled("  │  ", separator_style));
                spans.push(Span::styled("Sign out", text_style));
            }
            HeaderView::Hidden if show_sign_in => {
                spans.push(Span::styled("  │  ", separator_style));
                spans.push(Span::styled("Sign in", text_style));
            }
            HeaderView::Hidden => {}
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
