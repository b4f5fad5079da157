use std::fmt::Write as _;

use delve_catalog::{Rgb, Rgba};
use delve_select::Highlight;
use delve_view::{DisplayDescriptor, ViewError};

use crate::session::EditorSession;

const SOLID: char = '█';

/// Window of the current layer to print, in cells.
#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    pub left: usize,
    pub top: usize,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn full(columns: usize, rows: usize) -> Self {
        Self {
            left: 0,
            top: 0,
            width: columns,
            height: rows,
        }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct RenderOptions {
    pub viewport: Viewport,
    pub ansi: bool,
    pub selection: Rgb,
    pub cursor: Rgb,
}

/// Character drawn for a resolved cell; a material without glyphs is a solid block.
pub fn cell_char(d: Option<&DisplayDescriptor>) -> char {
    match d {
        None => ' ',
        Some(d) => d.glyph.unwrap_or(SOLID),
    }
}

/// Peek alpha is folded into the color by darkening.
fn blend(c: Rgba) -> Rgb {
    let k = |v: u8| ((v as u16 * c.a as u16) / 255) as u8;
    Rgb::new(k(c.r), k(c.g), k(c.b))
}

/// Render the session's current layer, overlaying the gesture highlight.
pub fn render_layer(session: &EditorSession, opts: &RenderOptions) -> Result<String, ViewError> {
    let view = session.layer_view()?;
    let vp = opts.viewport;
    let right = (vp.left + vp.width).min(view.columns);
    let bottom = (vp.top + vp.height).min(view.rows);

    let mut out = String::with_capacity((right.saturating_sub(vp.left) + 1) * bottom.saturating_sub(vp.top));
    for row in vp.top..bottom {
        for column in vp.left..right {
            let d = view.get(column, row);
            let (ch, fg) = match session.highlight_at(column as i32, row as i32) {
                Highlight::Cursor => (SOLID, Some(opts.cursor)),
                Highlight::Selection => (SOLID, Some(opts.selection)),
                Highlight::None => (cell_char(d), d.map(|d| blend(d.color))),
            };
            match (opts.ansi, fg) {
                (true, Some(c)) => {
                    let _ = write!(out, "\x1b[38;2;{};{};{}m{}", c.r, c.g, c.b, ch);
                }
                _ => out.push(ch),
            }
        }
        if opts.ansi {
            out.push_str("\x1b[0m");
        }
        out.push('\n');
    }
    Ok(out)
}
