//! Contact form widget.
//!
//! Drawn into the page's fixed-height form block:
//!
//! ```text
//!  0      Name label
//!  1..=3  boxed input
//!  4      error
//!  5..=9  Email, same shape
//! 10      Message label
//! 11..=17 boxed input, five text rows
//! 18      error
//! 19      send button
//! 20..=21 status banner
//! ```

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use unicode_width::UnicodeWidthChar;

use folio_engine::folio_types::wrap_words;
use folio_engine::{App, Focus, FormField, FormFocus, SubmissionStatus};

use crate::theme::{Glyphs, Palette, spinner_frame, styles};

const MESSAGE_BOX_HEIGHT: u16 = 7;
const SEND_ROW: u16 = 19;
const STATUS_ROW: u16 = 20;
const STATUS_ROWS: usize = 2;
const SPINNER_STEP: Duration = Duration::from_millis(80);
const CURSOR_BLINK: Duration = Duration::from_millis(530);

/// Rows each field occupies: label, box, error.
fn field_rows(field: FormField) -> (u16, u16) {
    match field {
        FormField::Name => (0, 3),
        FormField::Email => (5, 3),
        FormField::Message => (10, MESSAGE_BOX_HEIGHT),
    }
}

pub(crate) fn render_contact_form(
    buf: &mut Buffer,
    area: Rect,
    app: &App,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let form = app.form();
    let focus = match app.focus() {
        Focus::Form(focus) => Some(focus),
        Focus::Browse => None,
    };
    let options = app.ui_options();
    let cursor_on = options.reduced_motion
        || (app.clock().as_millis() / CURSOR_BLINK.as_millis()).is_multiple_of(2);

    for field in FormField::ALL {
        let focused = focus == Some(FormFocus::Field(field));
        let error = form.errors().get(field);
        let (label_row, box_height) = field_rows(field);

        let mut label = field.label().to_string();
        label.push_str(" *");
        buf.set_stringn(
            area.x,
            area.y + label_row,
            &label,
            usize::from(area.width),
            styles::field_label(palette, focused),
        );

        let box_area = Rect::new(area.x, area.y + label_row + 1, area.width, box_height);
        draw_box(
            buf,
            box_area,
            styles::field_border(palette, focused, error.is_some()),
            glyphs,
        );
        let inner = Rect::new(
            box_area.x + 2,
            box_area.y + 1,
            box_area.width.saturating_sub(4),
            box_height.saturating_sub(2),
        );
        let value = form.input().get(field);
        let cursor = (focused && cursor_on).then_some(glyphs.cursor);
        render_value(buf, inner, field, value, cursor, palette);

        if let Some(error) = error {
            buf.set_stringn(
                area.x,
                box_area.y + box_height,
                format!("{} {error}", glyphs.error),
                usize::from(area.width),
                Style::default().fg(palette.error),
            );
        }
    }

    let send_focused = focus == Some(FormFocus::Send);
    let (label, style) = if form.is_sending() {
        let frame = (app.clock().as_millis() / SPINNER_STEP.as_millis()) as usize;
        (
            format!(" {} Sending... ", spinner_frame(frame, options)),
            styles::button_disabled(palette),
        )
    } else {
        (
            " Send Message ".to_string(),
            styles::button(palette, send_focused),
        )
    };
    buf.set_stringn(
        area.x,
        area.y + SEND_ROW,
        &label,
        usize::from(area.width),
        style,
    );
    if send_focused && !form.is_sending() {
        buf.set_stringn(
            area.x + label.chars().count() as u16 + 1,
            area.y + SEND_ROW,
            "Enter to send",
            usize::from(area.width.saturating_sub(label.chars().count() as u16 + 1)),
            styles::key_hint(palette),
        );
    }

    let banner = match form.status() {
        SubmissionStatus::Success(message) => Some((
            glyphs.success,
            message.as_str(),
            Style::default().fg(palette.success),
        )),
        SubmissionStatus::Error(message) => Some((
            glyphs.error,
            message.as_str(),
            Style::default().fg(palette.error),
        )),
        SubmissionStatus::Idle | SubmissionStatus::Loading => None,
    };
    if let Some((glyph, message, style)) = banner {
        let text = format!("{glyph} {message}");
        for (i, line) in wrap_words(&text, usize::from(area.width))
            .into_iter()
            .take(STATUS_ROWS)
            .enumerate()
        {
            buf.set_stringn(
                area.x,
                area.y + STATUS_ROW + i as u16,
                line,
                usize::from(area.width),
                style.add_modifier(Modifier::BOLD),
            );
        }
    }
}

fn render_value(
    buf: &mut Buffer,
    inner: Rect,
    field: FormField,
    value: &str,
    cursor: Option<&str>,
    palette: &Palette,
) {
    if inner.width == 0 || inner.height == 0 {
        return;
    }
    let text_style = Style::default().fg(palette.text_primary);
    if value.is_empty() {
        let mut x = inner.x;
        if let Some(cursor) = cursor {
            buf.set_string(x, inner.y, cursor, Style::default().fg(palette.primary_bright));
            x += 1;
        }
        buf.set_stringn(
            x,
            inner.y,
            field.placeholder(),
            usize::from(inner.right().saturating_sub(x)),
            Style::default().fg(palette.text_disabled),
        );
        return;
    }

    // Leave a cell for the cursor at the end of the last row.
    let width = usize::from(inner.width.saturating_sub(1).max(1));
    let rows = if field.is_multiline() {
        wrap_chars(value, width)
    } else {
        vec![tail_fitting(value, width)]
    };
    let visible = usize::from(inner.height);
    let start = rows.len().saturating_sub(visible);
    let shown = &rows[start..];
    for (i, row) in shown.iter().enumerate() {
        buf.set_stringn(
            inner.x,
            inner.y + i as u16,
            row,
            usize::from(inner.width),
            text_style,
        );
    }
    if let (Some(cursor), Some(last)) = (cursor, shown.last()) {
        let x = inner.x + display_width(last) as u16;
        let y = inner.y + shown.len().saturating_sub(1) as u16;
        if x < inner.right() {
            buf.set_string(x, y, cursor, Style::default().fg(palette.primary_bright));
        }
    }
}

fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Longest suffix of `text` that fits in `width` cells.
fn tail_fitting(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    text[start..].to_string()
}

/// Hard-wrap at `width` cells, keeping explicit newlines.
fn wrap_chars(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let mut current = String::new();
        let mut used = 0;
        for c in line.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > width && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                used = 0;
            }
            current.push(c);
            used += w;
        }
        rows.push(current);
    }
    rows
}

fn draw_box(buf: &mut Buffer, area: Rect, style: Style, glyphs: &Glyphs) {
    if area.width < 2 || area.height < 2 {
        return;
    }
    let [top_left, top_right, bottom_right, bottom_left] = glyphs.box_corners;
    let right = area.right() - 1;
    let bottom = area.bottom() - 1;
    for x in area.left() + 1..right {
        buf.set_string(x, area.top(), glyphs.box_horizontal, style);
        buf.set_string(x, bottom, glyphs.box_horizontal, style);
    }
    for y in area.top() + 1..bottom {
        buf.set_string(area.left(), y, glyphs.box_vertical, style);
        buf.set_string(right, y, glyphs.box_vertical, style);
    }
    buf.set_string(area.left(), area.top(), top_left, style);
    buf.set_string(right, area.top(), top_right, style);
    buf.set_string(right, bottom, bottom_right, style);
    buf.set_string(area.left(), bottom, bottom_left, style);
}
