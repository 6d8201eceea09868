//! TUI rendering for Folio using ratatui.

mod effects;
mod form;
mod input;
mod page_view;
mod theme;

pub use effects::{blit, fade};
pub use input::{InputPump, apply_event, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, spinner_frame, styles};

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use folio_engine::folio_types::truncate_with_ellipsis;
use folio_engine::{App, Focus, SectionId};

/// Columns kept clear on each side of the page column.
const SIDE_MARGIN: u16 = 2;

/// Main draw function.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);

    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.text_primary)),
        area,
    );

    let [nav_area, progress_area, body_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    app.set_viewport(
        body_area.width.saturating_sub(SIDE_MARGIN * 2),
        body_area.height,
    );
    let page_area = page_column(body_area, app.page().width());

    page_view::draw_page(frame.buffer_mut(), page_area, app, &palette, &glyphs);
    draw_nav(frame, nav_area, app, &palette, &glyphs);
    draw_progress(frame.buffer_mut(), progress_area, app, &palette, &glyphs);
    draw_status(frame, status_area, app, &palette, &glyphs);
}

/// Centre a column of `width` cells inside `body`.
fn page_column(body: Rect, width: u16) -> Rect {
    let width = width.min(body.width);
    Rect {
        x: body.x + (body.width - width) / 2,
        width,
        ..body
    }
}

fn draw_nav(frame: &mut Frame, area: Rect, app: &App, palette: &Palette, glyphs: &Glyphs) {
    let active = app.active_section();
    let brand = app
        .portfolio()
        .profile
        .name
        .split_whitespace()
        .last()
        .unwrap_or("Folio")
        .to_string();

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(brand, styles::brand(palette)),
        Span::styled(".", styles::nav_active(palette)),
        Span::raw("  "),
    ];
    let home_style = if active == SectionId::Hero {
        styles::nav_active(palette)
    } else {
        styles::nav_link(palette)
    };
    spans.push(Span::styled("0 Home", home_style));
    for (digit, section) in SectionId::NAV {
        // Interests has no link of its own; it lights up Works.
        let lit = active == section || (section == SectionId::Works && active == SectionId::Interests);
        let style = if lit {
            styles::nav_active(palette)
        } else {
            styles::nav_link(palette)
        };
        spans.push(Span::styled(
            format!(" {} ", glyphs.separator),
            styles::key_hint(palette),
        ));
        spans.push(Span::styled(format!("{digit} {}", section.title()), style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_progress(buf: &mut Buffer, area: Rect, app: &App, palette: &Palette, glyphs: &Glyphs) {
    if area.width == 0 {
        return;
    }
    let filled = (f32::from(area.width) * app.scroll_progress()).round() as u16;
    let filled = filled.min(area.width);
    buf.set_string(
        area.x,
        area.y,
        glyphs.progress_fill.repeat(usize::from(filled)),
        Style::default().fg(palette.primary),
    );
    buf.set_string(
        area.x + filled,
        area.y,
        glyphs
            .progress_track
            .repeat(usize::from(area.width - filled)),
        Style::default().fg(palette.border),
    );
}

fn draw_status(frame: &mut Frame, area: Rect, app: &App, palette: &Palette, glyphs: &Glyphs) {
    let hints: &[(&str, &str)] = match app.focus() {
        Focus::Browse => &[
            ("j/k", "scroll"),
            ("1-5", "jump"),
            ("c", "contact"),
            ("t", "theme"),
            ("q", "quit"),
        ],
        Focus::Form(_) => &[
            ("Tab", "next"),
            ("S-Tab", "prev"),
            ("Ctrl+S", "send"),
            ("Esc", "back"),
        ],
    };

    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(
                format!(" {} ", glyphs.separator),
                styles::key_hint(palette),
            ));
        }
        spans.push(Span::styled(*key, styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {action}"), styles::key_hint(palette)));
    }

    let right = match app.notice() {
        Some(notice) => Span::styled(
            format!(
                "{} {} ",
                glyphs.error,
                truncate_with_ellipsis(notice, usize::from(area.width / 3))
            ),
            Style::default().fg(palette.error),
        ),
        None => Span::styled(
            format!("{} ", app.ui_options().theme.as_str()),
            styles::key_hint(palette),
        ),
    };

    let left_width: usize = spans.iter().map(|s| s.content.width()).sum();
    let right_width = right.content.width();
    let gap = usize::from(area.width).saturating_sub(left_width + right_width);
    spans.push(Span::raw(" ".repeat(gap)));
    spans.push(right);
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_column_is_centred_and_capped() {
        let body = Rect::new(0, 2, 100, 20);
        let column = page_column(body, 88);
        assert_eq!(column, Rect::new(6, 2, 88, 20));

        let narrow = page_column(Rect::new(0, 0, 10, 5), 16);
        assert_eq!(narrow, Rect::new(0, 0, 10, 5));
    }
}
