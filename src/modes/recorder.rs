use std::string::{String, ToString};
use std::vec::Vec;

use hal::display::{Canvas, Color, Point, Primitive};

/// Canvas that keeps what was drawn since the last `present`
#[derive(Default)]
pub struct Recorder {
    pub clears: Vec<Color>,
    pub lines: Vec<(Point, Point, Color)>,
    pub circles: Vec<(Point, u16, Color, bool)>,
    pub rects: Vec<(Point, u16, u16, Color)>,
    pub texts: Vec<String>,
    pub presented: usize,
}

impl Recorder {
    pub fn has_text(&self, text: &str) -> bool {
        self.texts.iter().any(|t| t.contains(text))
    }

    pub fn is_blank(&self) -> bool {
        self.clears.is_empty() && self.lines.is_empty() && self.circles.is_empty()
    }

    pub fn clear(&mut self) {
        let presented = self.presented;
        *self = Self { presented, ..Default::default() };
    }
}

impl Canvas for Recorder {
    fn draw(&mut self, primitive: Primitive) {
        match primitive {
            Primitive::Clear(color) => self.clears.push(color),
            Primitive::Line { from, to, color } => self.lines.push((from, to, color)),
            Primitive::Circle { center, radius, color, filled } => {
                self.circles.push((center, radius, color, filled))
            }
            Primitive::FillRect { origin, width, height, color } => {
                self.rects.push((origin, width, height, color))
            }
            Primitive::Text { text, .. } => self.texts.push(text.to_string()),
        }
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}
