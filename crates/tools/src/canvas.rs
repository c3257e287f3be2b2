//! Terminal canvas fed by render requests.

use std::io::{self, Write};

use crossterm::QueueableCommand;
use crossterm::style::{
    Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor,
};
use delve::{Color, Level, RenderRequest, RenderTarget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Cell {
    glyph: char,
    foreground: Color,
    background: Color,
}

const BLANK: Cell = Cell { glyph: ' ', foreground: Color::BLACK, background: Color::BLACK };

pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![BLANK; width * height] }
    }

    pub fn for_level(level: &Level) -> Self {
        Self::new(level.width(), level.height())
    }

    /// Plain glyphs, one line per row.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|cell| cell.glyph));
            out.push('\n');
        }
        out
    }

    /// Queue every cell with its 24-bit colors, resetting at the end of each row.
    pub fn write_colored<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                out.queue(SetForegroundColor(term_color(cell.foreground)))?;
                out.queue(SetBackgroundColor(term_color(cell.background)))?;
                out.queue(Print(cell.glyph))?;
            }
            out.queue(ResetColor)?;
            out.queue(Print('\n'))?;
        }
        out.flush()
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb { r: color.r, g: color.g, b: color.b }
}

impl RenderTarget for Canvas {
    fn draw(&mut self, request: &RenderRequest) {
        let (x, y) = (request.pos.x, request.pos.y);
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            log::warn!("dropping render request outside the canvas at ({x}, {y})");
            return;
        }
        self.cells[y as usize * self.width + x as usize] = Cell {
            glyph: request.glyph,
            foreground: request.foreground,
            background: request.background,
        };
    }
}

#[cfg(test)]
mod tests {
    use delve::Pos;

    use super::*;

    #[test]
    fn requests_land_on_their_cells() {
        let mut canvas = Canvas::new(3, 2);
        canvas.draw_all(&[
            RenderRequest {
                pos: Pos::new(1, 0),
                glyph: '@',
                foreground: Color::YELLOW,
                background: Color::BLACK,
            },
            RenderRequest {
                pos: Pos::new(2, 1),
                glyph: '#',
                foreground: Color::SEPIA,
                background: Color::BLACK,
            },
        ]);
        assert_eq!(canvas.to_ascii(), " @ \n  #\n");
    }

    #[test]
    fn out_of_bounds_requests_are_dropped() {
        let mut canvas = Canvas::new(2, 1);
        canvas.draw(&RenderRequest {
            pos: Pos::new(5, 5),
            glyph: 'x',
            foreground: Color::WHITE,
            background: Color::BLACK,
        });
        assert_eq!(canvas.to_ascii(), "  \n");
    }

    #[test]
    fn ansi_output_carries_colors() {
        let mut canvas = Canvas::new(1, 1);
        canvas.draw(&RenderRequest {
            pos: Pos::new(0, 0),
            glyph: '@',
            foreground: Color::rgb(1, 2, 3),
            background: Color::BLACK,
        });
        let mut out = Vec::new();
        canvas.write_colored(&mut out).expect("writing to a buffer");
        assert_eq!(
            String::from_utf8(out).expect("utf-8 output"),
            "\x1b[38;2;1;2;3m\x1b[48;2;0;0;0m@\x1b[0m\n"
        );
    }
}
