use hal::display::{Canvas, Color, Point, Primitive};

use super::{line, ModeKind, Tick};
use crate::types::SensorSample;

const CENTER: Point = Point::new(120, 67);
/// Pixels per G, also the radius of the ring
const RANGE: f32 = 60.0;
const BUBBLE_RADIUS: u16 = 12;
const GRID: Color = Color::rgb(0, 100, 200);

/// Bubble drifts the way the screen tilts, one ring radius per G
pub fn bubble(sample: &SensorSample) -> Point {
    let a = &sample.acceleration;
    Point::new(
        (CENTER.x as f32 + a.x * RANGE) as i32,
        (CENTER.y as f32 - a.y * RANGE) as i32,
    )
}

pub fn update(tick: &Tick, canvas: &mut impl Canvas) -> Option<ModeKind> {
    canvas.draw(Primitive::Clear(Color::BLACK));
    line(canvas, Point::new(CENTER.x, 0), Point::new(CENTER.x, 135), GRID);
    line(canvas, Point::new(0, CENTER.y), Point::new(240, CENTER.y), GRID);
    canvas.draw(Primitive::Circle { center: CENTER, radius: 60, color: GRID, filled: false });
    let center = bubble(tick.sample);
    canvas.draw(Primitive::Circle { center, radius: BUBBLE_RADIUS, color: Color::YELLOW, filled: true });
    None
}

mod test {
    #[test]
    fn test_bubble() {
        use hal::display::Point;

        use super::bubble;
        use crate::types::SensorSample;

        assert_eq!(bubble(&SensorSample::new([0.0, 0.0, 1.0], [0.0; 3])), Point::new(120, 67));
        assert_eq!(bubble(&SensorSample::new([0.5, 0.0, 0.8], [0.0; 3])), Point::new(150, 67));
        assert_eq!(bubble(&SensorSample::new([0.0, 0.25, 0.9], [0.0; 3])), Point::new(120, 52));
    }
}
