use crate::routing::Route;
use crate::ui::theme::{GLOBAL_BORDER, HEADER_TEXT, STATUS_ERROR};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Footer;

impl Default for Footer {
    fn default() -> Self {
        Self::new()
    }
}

impl Footer {
    pub fn new() -> Self {
        Self
    }

    pub fn hints(route: &Route) -> &'static str {
        match route {
            Route::Main => " ←/→: City │ ↑/↓: Select │ Enter: Open │ s: Sort │ f: Favorite │ v: Favorites │ l: Sign in/out │ q: Quit",
            Route::Offer { .. } => " Esc: Back │ ↑/↓: Nearby │ Enter: Open │ f: Favorite │ r: Review │ R: Reload │ q: Quit",
            Route::Favorites => " Esc: Back │ ↑/↓: Select │ Enter: Open │ f: Remove │ q: Quit",
            Route::Login => " Tab: Next field │ Enter: Sign in │ Esc: Back",
            Route::NotFound { .. } => " Esc: Back │ q: Quit",
        }
    }

    /// Key hints, or the current notice when there is one.
    pub fn widget(&self, area: Rect, route: &Route, notice: Option<&str>) -> Paragraph<'static> {
        let version = format!("v{} ", VERSION);
        let (text, style) = match notice {
            Some(notice) => (format!(" {notice}"), Style::default().fg(STATUS_ERROR)),
            None => (
                Self::hints(route).to_string(),
                Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM),
            ),
        };

        // Char count, not bytes: hints contain arrows and box characters.
        let text_width = text.chars().count();
        let version_width = version.chars().count();
        let content_width = area.width.saturating_sub(2) as usize;
        let padding = content_width
            .saturating_sub(text_width)
            .saturating_sub(version_width);

        let dim = Style::default().fg(HEADER_TEXT).add_modifier(Modifier::DIM);
        let line = Line::from(vec![
            Span::styled(text, style),
            Span::styled(" ".repeat(padding), dim),
            Span::styled(version, dim),
        ]);

        Paragraph::new(line).alignment(Alignment::Left).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}
