//! Re-render requests handed to whatever draws the level.

use crate::color::Color;
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderRequest {
    pub pos: Pos,
    pub glyph: char,
    pub foreground: Color,
    pub background: Color,
}

pub trait RenderTarget {
    fn draw(&mut self, request: &RenderRequest);

    fn draw_all(&mut self, requests: &[RenderRequest]) {
        for request in requests {
            self.draw(request);
        }
    }
}

impl RenderTarget for Vec<RenderRequest> {
    fn draw(&mut self, request: &RenderRequest) {
        self.push(*request);
    }
}
