//! Scrolled page rendering.
//!
//! Every visible block is drawn at rest into its own buffer and then copied
//! into the frame through [`crate::effects::blit`] with its reveal pose.

use std::time::Duration;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use folio_engine::{App, Block, BlockKind, Pose, Segment, TextLine, TextRole};

use crate::effects::blit;
use crate::form::render_contact_form;
use crate::theme::{Glyphs, Palette};

/// Rows beyond the viewport still drawn, so blocks easing in from below or
/// above are not cut off early.
const POSE_MARGIN: u16 = 8;

/// Cells covered by a section accent rule.
const ACCENT_RULE_WIDTH: u16 = 8;

const CURSOR_BLINK: Duration = Duration::from_millis(530);

pub(crate) fn draw_page(
    buf: &mut Buffer,
    area: Rect,
    app: &App,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let page = app.page();
    let offset = app.scroll().offset();
    let first = offset.saturating_sub(POSE_MARGIN);
    let rows = area.height.saturating_add(POSE_MARGIN * 2);

    for block in page.visible_blocks(first, rows) {
        if matches!(block.kind, BlockKind::Blank) {
            continue;
        }
        let pose = block.reveal.map_or(Pose::VISIBLE, |(key, index)| {
            app.reveals().pose(key, index)
        });
        let mut scratch = Buffer::empty(Rect::new(0, 0, area.width, block.height));
        render_block(&mut scratch, block, app, palette, glyphs);
        let y = i32::from(area.y) + i32::from(block.top) - i32::from(offset);
        blit(
            &scratch,
            buf,
            i32::from(area.x),
            y,
            area,
            pose,
            palette.bg,
        );
    }
}

fn render_block(buf: &mut Buffer, block: &Block, app: &App, palette: &Palette, glyphs: &Glyphs) {
    let area = buf.area;
    match &block.kind {
        BlockKind::Text(lines) => {
            for (row, line) in lines.iter().enumerate() {
                let line = styled_line(line, palette, glyphs);
                buf.set_line(0, row as u16, &line, area.width);
            }
        }
        BlockKind::Rule => {
            let (width, style) = if block.reveal.is_some() {
                (
                    ACCENT_RULE_WIDTH.min(area.width),
                    Style::default().fg(palette.primary),
                )
            } else {
                (area.width, Style::default().fg(palette.border))
            };
            buf.set_string(0, 0, glyphs.rule.repeat(usize::from(width)), style);
        }
        BlockKind::Typewriter => {
            let typed = app.typewriter().text();
            let style = Style::default()
                .fg(palette.primary_bright)
                .add_modifier(Modifier::BOLD);
            let mut spans = vec![
                Span::styled("> ", Style::default().fg(palette.text_muted)),
                Span::styled(typed.to_string(), style),
            ];
            let blink_on = app.ui_options().reduced_motion
                || (app.clock().as_millis() / CURSOR_BLINK.as_millis()).is_multiple_of(2);
            if blink_on {
                spans.push(Span::styled(glyphs.cursor, Style::default().fg(palette.primary)));
            }
            buf.set_line(0, 0, &Line::from(spans), area.width);
        }
        BlockKind::ContactForm => render_contact_form(buf, area, app, palette, glyphs),
        BlockKind::Blank => {}
    }
}

fn styled_line(line: &TextLine, palette: &Palette, glyphs: &Glyphs) -> Line<'static> {
    let ascii = glyphs.bullet.is_ascii();
    Line::from(
        line.segments
            .iter()
            .map(|segment| styled_segment(segment, palette, glyphs, ascii))
            .collect::<Vec<_>>(),
    )
}

fn styled_segment(
    segment: &Segment,
    palette: &Palette,
    glyphs: &Glyphs,
    ascii: bool,
) -> Span<'static> {
    let style = palette.role(segment.role);
    let text = match segment.role {
        TextRole::Bullet => glyphs.bullet.to_string(),
        _ if ascii => ascii_symbols(&segment.text),
        _ => segment.text.clone(),
    };
    Span::styled(text, style)
}

/// Swap the page's decorative symbols for ASCII stand-ins. Other characters
/// are content and pass through.
fn ascii_symbols(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '•' => '*',
            '·' => '-',
            '✉' => '@',
            '↗' => '>',
            '↑' => '^',
            '—' | '–' => '-',
            other => other,
        })
        .collect()
}
