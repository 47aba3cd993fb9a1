/// RGB565 color
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Color(pub u16);

impl Color {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);
    pub const RED: Self = Self(0xF800);
    pub const GREEN: Self = Self(0x07E0);
    pub const BLUE: Self = Self(0x001F);
    pub const YELLOW: Self = Self(0xFFE0);
    pub const DARK_GREY: Self = Self(0x7BEF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self((((r as u16) & 0xF8) << 8) | (((g as u16) & 0xFC) << 3) | ((b as u16) >> 3))
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Primitive<'a> {
    Clear(Color),
    Line { from: Point, to: Point, color: Color },
    Circle { center: Point, radius: u16, color: Color, filled: bool },
    FillRect { origin: Point, width: u16, height: u16, color: Color },
    Text { position: Point, text: &'a str, size: u8, color: Color, align: Align },
}

/// Receives one frame worth of primitives, then `present` pushes the frame out.
pub trait Canvas {
    fn draw(&mut self, primitive: Primitive);
    fn present(&mut self);
}
