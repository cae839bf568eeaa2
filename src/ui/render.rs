use crate::domain::AuthorizationStatus;
use crate::routing::Route;
use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::layout::{centered_rect_by_size, layout_regions, split_with_map};
use crate::ui::review_form::ReviewFormState;
use crate::ui::screens::favorites::FavoritesView;
use crate::ui::screens::main::{ListingBody, MainScreenView};
use crate::ui::screens::offer::{OfferContent, OfferScreenView};
use crate::ui::screens::{MapView, OfferCard, RatingBar};
use crate::ui::theme::{
    ACCENT, ACTIVE_HIGHLIGHT, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, POPUP_BORDER, PREMIUM,
    STAR, STATUS_ERROR,
};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const STAR_CELLS: u16 = 5;
/// Degrees shown around the map center.
const MAP_SPAN: f64 = 0.06;

pub fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let (header, body, footer) = layout_regions(frame.area());

    let authorization = app.state().authorization;
    let show_sign_in = authorization == AuthorizationStatus::Unauthenticated;
    frame.render_widget(app.header_view().widget(show_sign_in), header);
    frame.render_widget(Clear, body);

    match app.route().clone() {
        Route::Main => {
            if let Some(view) = app.main_view() {
                draw_main(frame, body, &view);
            }
        }
        Route::Offer { .. } => draw_offer(frame, body, &app.offer_view(), app.selection()),
        Route::Favorites if authorization == AuthorizationStatus::Unknown => {
            draw_message(frame, body, "Favorites", "Checking session…");
        }
        Route::Favorites => draw_favorites(frame, body, &app.favorites_view(), app.selection()),
        Route::Login => draw_login(frame, body, app),
        Route::NotFound { path } => draw_not_found(frame, body, &path),
    }

    let notice = app.state().notice.clone();
    frame.render_widget(
        Footer::new().widget(footer, app.route(), notice.as_deref()),
        footer,
    );

    if app.review_form().is_visible() {
        draw_review_form(frame, body, app.review_form(), app.ratings());
    }
}

fn bordered(title: &str) -> Block<'static> {
    Block::default()
        .title(Span::styled(format!(" {title} "), Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(GLOBAL_BORDER))
}

fn stars(bar: RatingBar) -> Span<'static> {
    let filled = bar.filled_cells(STAR_CELLS).min(STAR_CELLS) as usize;
    let empty = STAR_CELLS as usize - filled;
    Span::styled(
        format!("{}{}", "★".repeat(filled), "☆".repeat(empty)),
        Style::default().fg(STAR),
    )
}

fn card_line(card: &OfferCard, selected: bool) -> Line<'static> {
    let text = Style::default().fg(HEADER_TEXT);
    let mut spans = Vec::new();
    if card.is_premium {
        spans.push(Span::styled("Premium ", Style::default().fg(PREMIUM)));
    }
    spans.push(Span::styled(
        format!("€{} ", card.price),
        text.add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("/ night  ", Style::default().fg(HEADER_SEPARATOR)));
    spans.push(stars(card.rating));
    spans.push(Span::styled(format!("  {}", card.title), text));
    spans.push(Span::styled(
        format!("  {}", card.kind_label),
        Style::default().fg(HEADER_SEPARATOR),
    ));
    if card.is_favorite {
        spans.push(Span::styled("  ♥", Style::default().fg(ACCENT)));
    }
    let line = Line::from(spans);
    if selected {
        line.style(Style::default().bg(ACTIVE_HIGHLIGHT))
    } else {
        line
    }
}

fn draw_message(frame: &mut Frame<'_>, area: Rect, title: &str, message: &str) {
    let widget = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .block(bordered(title));
    frame.render_widget(widget, area);
}

fn draw_map(frame: &mut Frame<'_>, area: Rect, map: &MapView) {
    let center = map.center;
    let inactive: Vec<(f64, f64)> = map
        .pins
        .iter()
        .filter(|pin| !pin.active)
        .map(|pin| (pin.location.longitude, pin.location.latitude))
        .collect();
    let active: Vec<(f64, f64)> = map
        .active_pin()
        .map(|pin| vec![(pin.location.longitude, pin.location.latitude)])
        .unwrap_or_default();

    let canvas = Canvas::default()
        .block(bordered("Map"))
        .x_bounds([center.longitude - MAP_SPAN, center.longitude + MAP_SPAN])
        .y_bounds([center.latitude - MAP_SPAN / 2.0, center.latitude + MAP_SPAN / 2.0])
        .paint(move |ctx| {
            ctx.draw(&Points {
                coords: &inactive,
                color: Color::Gray,
            });
            ctx.draw(&Points {
                coords: &active,
                color: PREMIUM,
            });
        });
    frame.render_widget(canvas, area);
}

fn draw_main(frame: &mut Frame<'_>, body: Rect, view: &MainScreenView) {
    let (list_area, map_area) = split_with_map(body, 40);

    let mut lines = Vec::new();
    let active_index = view.active_city_index();
    let mut tabs = Vec::new();
    for (index, name) in view.cities.iter().enumerate() {
        let style = if Some(index) == active_index {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(HEADER_TEXT)
        };
        tabs.push(Span::styled(name.clone(), style));
        tabs.push(Span::raw("  "));
    }
    lines.push(Line::from(tabs));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        view.headline.clone(),
        Style::default().fg(HEADER_TEXT).add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(Span::styled(
        format!("Sort by: {}", view.sort.label()),
        Style::default().fg(HEADER_SEPARATOR),
    )));
    lines.push(Line::from(""));

    match &view.body {
        ListingBody::Loading => lines.push(Line::from("Loading offers…")),
        ListingBody::Failed(message) => lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(STATUS_ERROR),
        ))),
        ListingBody::Empty => lines.push(Line::from(
            "We could not find any property available at the moment.",
        )),
        ListingBody::Cards(cards) => {
            for (index, card) in cards.iter().enumerate() {
                lines.push(card_line(card, view.selected == Some(index)));
            }
        }
    }

    frame.render_widget(Paragraph::new(lines).block(bordered("Cities")), list_area);
    draw_map(frame, map_area, &view.map);
}

fn draw_offer(frame: &mut Frame<'_>, body: Rect, view: &OfferScreenView, selection: usize) {
    match view {
        OfferScreenView::Loading => draw_message(frame, body, "Offer", "Loading…"),
        OfferScreenView::NotFound => draw_not_found(frame, body, ""),
        OfferScreenView::Content(content) => {
            let (detail_area, side_area) = split_with_map(body, 40);
            frame.render_widget(
                Paragraph::new(offer_lines(content))
                    .wrap(Wrap { trim: false })
                    .block(bordered("Offer")),
                detail_area,
            );

            let half = side_area.height / 2;
            let map_area = Rect {
                height: half,
                ..side_area
            };
            let nearby_area = Rect {
                y: side_area.y + half,
                height: side_area.height - half,
                ..side_area
            };
            draw_map(frame, map_area, &content.map);

            let mut lines = Vec::new();
            if let Some(notice) = &content.nearby.notice {
                lines.push(Line::from(Span::styled(
                    notice.clone(),
                    Style::default().fg(STATUS_ERROR),
                )));
            } else if content.nearby.loading && content.nearby.cards.is_empty() {
                lines.push(Line::from("Loading…"));
            }
            for (index, card) in content.nearby.cards.iter().enumerate() {
                lines.push(card_line(card, index == selection));
            }
            frame.render_widget(
                Paragraph::new(lines)
                    .wrap(Wrap { trim: true })
                    .block(bordered("Other places in the neighbourhood")),
                nearby_area,
            );
        }
    }
}

fn offer_lines(content: &OfferContent) -> Vec<Line<'static>> {
    let text = Style::default().fg(HEADER_TEXT);
    let dim = Style::default().fg(HEADER_SEPARATOR);
    let heading = text.add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();

    if let Some(gallery) = &content.gallery {
        lines.push(Line::from(Span::styled(
            format!("Gallery: {} photo(s)", gallery.len()),
            dim,
        )));
    }
    if content.is_premium {
        lines.push(Line::from(Span::styled("Premium", Style::default().fg(PREMIUM))));
    }
    let favorite = if content.favorite.active { "♥ In bookmarks" } else { "♡ To bookmarks" };
    lines.push(Line::from(vec![
        Span::styled(content.title.clone(), heading),
        Span::raw("  "),
        Span::styled(favorite, Style::default().fg(ACCENT)),
    ]));
    lines.push(Line::from(vec![
        stars(content.rating),
        Span::styled(format!(" {:.1}", content.rating.value), text),
    ]));
    lines.push(Line::from(Span::styled(content.features().join("  ·  "), text)));
    lines.push(Line::from(vec![
        Span::styled(format!("€{}", content.price), heading),
        Span::styled(" night", dim),
    ]));

    if let Some(amenities) = &content.amenities {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("What's inside", heading)));
        lines.push(Line::from(Span::styled(amenities.join(", "), text)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Meet the host", heading)));
    if let Some(host) = &content.host {
        let mut spans = vec![Span::styled(host.name.clone(), text)];
        if host.is_pro {
            spans.push(Span::styled("  Pro", dim));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(Span::styled(content.description.clone(), text)));

    let reviews = &content.reviews;
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("Reviews · {}", reviews.total),
        heading,
    )));
    if let Some(notice) = &reviews.notice {
        lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(STATUS_ERROR),
        )));
    } else if reviews.loading && reviews.items.is_empty() {
        lines.push(Line::from(Span::styled("Loading…", dim)));
    }
    for review in &reviews.items {
        let mut spans = vec![
            stars(review.rating),
            Span::styled(format!("  {}", review.author), text),
        ];
        if review.is_pro {
            spans.push(Span::styled(" Pro", dim));
        }
        spans.push(Span::styled(format!("  {}", review.date_label), dim));
        lines.push(Line::from(spans));
        lines.push(Line::from(Span::styled(review.comment.clone(), text)));
    }
    if reviews.show_form {
        lines.push(Line::from(Span::styled("Press r to write a review", dim)));
    }
    lines
}

fn draw_favorites(frame: &mut Frame<'_>, body: Rect, view: &FavoritesView, selection: usize) {
    let mut lines = Vec::new();
    match view {
        FavoritesView::Loading => lines.push(Line::from("Loading…")),
        FavoritesView::Failed(message) => lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(STATUS_ERROR),
        ))),
        FavoritesView::Empty => {
            lines.push(Line::from("Nothing yet saved."));
            lines.push(Line::from(Span::styled(
                "Save properties to narrow down search or plan your future trips.",
                Style::default().fg(HEADER_SEPARATOR),
            )));
        }
        FavoritesView::Groups(groups) => {
            let mut index = 0;
            for group in groups {
                lines.push(Line::from(Span::styled(
                    group.city.clone(),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )));
                for card in &group.cards {
                    lines.push(card_line(card, index == selection));
                    index += 1;
                }
                lines.push(Line::from(""));
            }
        }
    }
    frame.render_widget(Paragraph::new(lines).block(bordered("Saved listing")), body);
}

fn draw_login(frame: &mut Frame<'_>, body: Rect, app: &App) {
    use crate::ui::login::LoginField;

    let form = app.login_form();
    let focused = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let normal = Style::default().fg(HEADER_TEXT);
    let label = |field: LoginField| if form.focus == field { focused } else { normal };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("E-mail    ", label(LoginField::Email)),
            Span::styled(form.email.clone(), normal),
        ]),
        Line::from(vec![
            Span::styled("Password  ", label(LoginField::Password)),
            Span::styled(form.masked_password(), normal),
        ]),
        Line::from(""),
    ];
    if form.submitting {
        lines.push(Line::from(Span::styled("Signing in…", Style::default().fg(HEADER_SEPARATOR))));
    } else if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(error.clone(), Style::default().fg(STATUS_ERROR))));
    }

    let area = centered_rect_by_size(body, 56, lines.len() as u16 + 2);
    frame.render_widget(Paragraph::new(lines).block(bordered("Sign in")), area);
}

fn draw_not_found(frame: &mut Frame<'_>, body: Rect, path: &str) {
    let message = if path.is_empty() {
        "404. Page not found".to_string()
    } else {
        format!("404. Page not found: {path}")
    };
    draw_message(frame, body, "Not found", &message);
}

fn draw_review_form(frame: &mut Frame<'_>, body: Rect, form: &ReviewFormState, ratings: &[String]) {
    let (rating, comment, error, submitting) = match form {
        ReviewFormState::Hidden => return,
        ReviewFormState::Editing {
            rating,
            comment,
            error,
        } => (*rating, comment.as_str(), error.as_deref(), false),
        ReviewFormState::Submitting { rating, comment } => (*rating, comment.as_str(), None, true),
    };

    // Labels run from the best rating down.
    let label = usize::from(rating)
        .checked_sub(1)
        .and_then(|index| ratings.iter().rev().nth(index))
        .map(String::as_str)
        .unwrap_or("not rated");
    let bar = RatingBar {
        value: f32::from(rating),
        width_percent: f32::from(rating) * 20.0,
    };

    let mut lines = vec![
        Line::from(vec![stars(bar), Span::raw(format!("  {label}"))]),
        Line::from(""),
        Line::from(comment.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} characters", comment.trim().chars().count()),
            Style::default().fg(HEADER_SEPARATOR),
        )),
    ];
    if submitting {
        lines.push(Line::from("Submitting…"));
    } else if let Some(error) = error {
        lines.push(Line::from(Span::styled(error.to_string(), Style::default().fg(STATUS_ERROR))));
    }

    let area = centered_rect_by_size(body, 64, 12);
    frame.render_widget(Clear, area);
    let popup = Block::default()
        .title(Span::styled(" Your review ", Style::default().fg(ACCENT)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(POPUP_BORDER));
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(popup), area);
}
