pub mod cube;
pub mod game;
pub mod graph;
pub mod launch;
pub mod level;
pub mod menu;
pub mod raw;
pub mod splash;

#[cfg(test)]
pub(crate) mod recorder;

use core::fmt::{self, Write};
use core::time::Duration;

use derive_more::Display;
use hal::display::{Align, Canvas, Color, Point, Primitive};

use crate::config::Config;
use crate::datastructures::input::Keys;
use crate::types::SensorSample;

pub const SCREEN_WIDTH: i32 = 240;
pub const SCREEN_HEIGHT: i32 = 135;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum ModeKind {
    Splash,
    Menu,
    Cube,
    Level,
    Game,
    Launch,
    Graph,
    Raw,
}

impl ModeKind {
    /// Visualizations fall back to the menu on an exit key
    pub fn is_visualization(self) -> bool {
        !matches!(self, Self::Splash | Self::Menu)
    }
}

/// Everything a mode sees of the outside world during one tick
pub struct Tick<'a> {
    pub now: Duration,
    pub sample: &'a SensorSample,
    pub keys: &'a Keys,
}

/// Active mode with its volatile state, rebuilt on every entry
pub enum Mode {
    Splash(splash::Splash),
    Menu,
    Cube,
    Level,
    Game(game::TiltGame),
    Launch,
    Graph(graph::Graph),
    Raw,
}

impl Mode {
    pub fn enter(kind: ModeKind, now: Duration, config: &Config) -> Self {
        match kind {
            ModeKind::Splash => Self::Splash(splash::Splash::new(now)),
            ModeKind::Menu => Self::Menu,
            ModeKind::Cube => Self::Cube,
            ModeKind::Level => Self::Level,
            ModeKind::Game => Self::Game(game::TiltGame::new(&config.game, now)),
            ModeKind::Launch => Self::Launch,
            ModeKind::Graph => Self::Graph(graph::Graph::new(&config.graph)),
            ModeKind::Raw => Self::Raw,
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            Self::Splash(_) => ModeKind::Splash,
            Self::Menu => ModeKind::Menu,
            Self::Cube => ModeKind::Cube,
            Self::Level => ModeKind::Level,
            Self::Game(_) => ModeKind::Game,
            Self::Launch => ModeKind::Launch,
            Self::Graph(_) => ModeKind::Graph,
            Self::Raw => ModeKind::Raw,
        }
    }
}

pub(crate) type Line = heapless::String<48>;

/// Formats into a fixed-capacity line, overlong text is cut
pub(crate) fn format(args: fmt::Arguments) -> Line {
    let mut line = Line::new();
    line.write_fmt(args).ok();
    line
}

pub(crate) fn text(canvas: &mut impl Canvas, text: &str, x: i32, y: i32, size: u8, color: Color) {
    let position = Point::new(x, y);
    canvas.draw(Primitive::Text { position, text, size, color, align: Align::Left })
}

pub(crate) fn aligned_text(
    canvas: &mut impl Canvas,
    text: &str,
    position: Point,
    size: u8,
    color: Color,
    align: Align,
) {
    canvas.draw(Primitive::Text { position, text, size, color, align })
}

pub(crate) fn line(canvas: &mut impl Canvas, from: Point, to: Point, color: Color) {
    canvas.draw(Primitive::Line { from, to, color })
}

pub(crate) fn horizontal_line(canvas: &mut impl Canvas, y: i32, color: Color) {
    line(canvas, Point::new(0, y), Point::new(SCREEN_WIDTH, y), color)
}

/// Footer separator shared by the cube and G-force screens
pub(crate) const FOOTER_LINE: Color = Color::rgb(40, 40, 40);
