//! Reveal effects for page blocks.
//!
//! Blocks are drawn into an off-screen buffer at rest, then copied to the
//! frame with the block's current [`Pose`]: shifted by `dx`/`dy`, narrowed
//! around the content centre by `scale`, and faded toward the background by
//! `opacity`.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

use folio_engine::Pose;

/// Cells are not drawn below this opacity.
const MIN_VISIBLE_OPACITY: f32 = 0.05;

/// Copy `src` onto `dst` with its top-left at (`x`, `y`), applying `pose`.
///
/// `x`/`y` may be negative for blocks scrolled partly off screen. Cells that
/// land outside `clip` are dropped. Blank cells without a background are
/// treated as transparent.
pub fn blit(src: &Buffer, dst: &mut Buffer, x: i32, y: i32, clip: Rect, pose: Pose, bg: Color) {
    if pose.opacity < MIN_VISIBLE_OPACITY {
        return;
    }
    let area = src.area;
    let clip = clip.intersection(dst.area);
    let origin_x = x + pose.dx.round() as i32;
    let origin_y = y + pose.dy.round() as i32;
    let (from, to) = scaled_columns(content_width(src), pose.scale);

    for row in 0..area.height {
        let ty = origin_y + i32::from(row);
        if ty < i32::from(clip.top()) || ty >= i32::from(clip.bottom()) {
            continue;
        }
        for col in from..to {
            let tx = origin_x + i32::from(col);
            if tx < i32::from(clip.left()) || tx >= i32::from(clip.right()) {
                continue;
            }
            let Some(cell) = src.cell((area.x + col, area.y + row)) else {
                continue;
            };
            if cell.symbol() == " " && cell.bg == Color::Reset {
                continue;
            }
            let mut cell = cell.clone();
            if pose.opacity < 1.0 {
                cell.fg = fade(cell.fg, bg, pose.opacity);
                if cell.bg != Color::Reset {
                    cell.bg = fade(cell.bg, bg, pose.opacity);
                }
            }
            if let Some(target) = dst.cell_mut((tx as u16, ty as u16)) {
                *target = cell;
            }
        }
    }
}

/// Blend `color` toward `bg`. `opacity` 1 keeps the colour, 0 yields `bg`.
#[must_use]
pub fn fade(color: Color, bg: Color, opacity: f32) -> Color {
    let t = opacity.clamp(0.0, 1.0);
    match (color, bg) {
        (Color::Reset, _) => color,
        (Color::Rgb(r, g, b), Color::Rgb(br, bg_, bb)) => {
            Color::Rgb(mix(br, r, t), mix(bg_, g, t), mix(bb, b, t))
        }
        // Named colours cannot blend; dim them halfway through.
        _ if t < 0.5 => Color::DarkGray,
        _ => color,
    }
}

fn mix(from: u8, to: u8, t: f32) -> u8 {
    let value = f32::from(from) + (f32::from(to) - f32::from(from)) * t;
    value.round().clamp(0.0, 255.0) as u8
}

/// Columns `[from, to)` kept when `width` columns shrink to `scale` around
/// their centre.
fn scaled_columns(width: u16, scale: f32) -> (u16, u16) {
    let scale = scale.clamp(0.0, 1.0);
    let kept = (f32::from(width) * scale).round() as u16;
    let from = (width - kept.min(width)) / 2;
    (from, from + kept.min(width))
}

/// Columns up to and including the rightmost drawn cell.
fn content_width(buf: &Buffer) -> u16 {
    let area = buf.area;
    let mut width = 0;
    for row in 0..area.height {
        for col in (0..area.width).rev() {
            let drawn = buf
                .cell((area.x + col, area.y + row))
                .is_some_and(|cell| cell.symbol() != " " || cell.bg != Color::Reset);
            if drawn {
                width = width.max(col + 1);
                break;
            }
        }
    }
    width
}
