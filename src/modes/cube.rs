use hal::display::{Align, Canvas, Color, Point, Primitive};
use hal::input::Key;

use super::{aligned_text, format, horizontal_line, line, text, ModeKind, Tick, FOOTER_LINE};
use crate::algorithm::projection::{Projection, Zoom, CUBE};
use crate::config;
use crate::types::Orientation;

pub const ZOOM_IN: [Key; 2] = [Key::Char('+'), Key::Char('=')];
pub const ZOOM_OUT: [Key; 2] = [Key::Char('-'), Key::Char('_')];
pub const ZOOM_RESET: Key = Key::Char('0');

fn adjust_zoom(tick: &Tick, zoom: &mut Zoom, config: &config::Cube) {
    let before = *zoom;
    if tick.keys.any(&ZOOM_IN) {
        zoom.zoom_in(config.zoom_step);
    }
    if tick.keys.any(&ZOOM_OUT) {
        zoom.zoom_out(config.zoom_step);
    }
    if tick.keys.is_down(ZOOM_RESET) {
        zoom.set(config.reset_zoom);
    }
    if *zoom != before {
        debug!("Zoom {} -> {}", before.scale(), zoom.scale());
    }
}

pub fn update(
    tick: &Tick,
    zoom: &mut Zoom,
    config: &config::Cube,
    canvas: &mut impl Canvas,
) -> Option<ModeKind> {
    adjust_zoom(tick, zoom, config);

    let orientation = Orientation::from(tick.sample);
    let points = Projection::new(&orientation, *zoom).project_model(&CUBE);

    canvas.draw(Primitive::Clear(Color::BLACK));
    for &(from, to) in CUBE.edges.iter() {
        line(canvas, points[from], points[to], Color::GREEN);
    }

    horizontal_line(canvas, 115, FOOTER_LINE);
    text(canvas, "Zoom:+/- | Reset:0", 5, 122, 1, Color::DARK_GREY);
    let scale = format(format_args!("Scale: {}", zoom.scale() as i32));
    aligned_text(canvas, &scale, Point::new(235, 122), 1, Color::DARK_GREY, Align::Right);
    None
}

mod test {
    #[test]
    fn test_zoom_keys() {
        use core::time::Duration;

        use hal::input::Key;

        use super::update;
        use crate::algorithm::projection::Zoom;
        use crate::config;
        use crate::datastructures::input::Keys;
        use crate::modes::{recorder::Recorder, Tick};
        use crate::types::SensorSample;

        let config = config::Cube::default();
        let sample = SensorSample::new([0.0, 0.0, 1.0], [0.0; 3]);
        let mut zoom = Zoom::new(config.zoom);
        let mut canvas = Recorder::default();
        let mut press = |keys: &[Key], zoom: &mut Zoom| {
            let keys = Keys::from(keys);
            let tick = Tick { now: Duration::ZERO, sample: &sample, keys: &keys };
            update(&tick, zoom, &config, &mut canvas)
        };

        press(&[Key::Char('+')], &mut zoom);
        press(&[Key::Char('=')], &mut zoom);
        assert_eq!(zoom.scale(), 94.0);
        press(&[Key::Char('_')], &mut zoom);
        assert_eq!(zoom.scale(), 92.0);
        press(&[Key::Char('0')], &mut zoom);
        assert_eq!(zoom.scale(), 100.0);
        for _ in 0..100 {
            press(&[Key::Char('+')], &mut zoom);
        }
        assert_eq!(zoom.scale(), 200.0);
        assert_eq!(press(&[], &mut zoom), None);
        assert!(canvas.has_text("Scale: 200"));
    }

    #[test]
    fn test_wireframe() {
        use core::time::Duration;

        use hal::display::Point;

        use super::update;
        use crate::algorithm::projection::Zoom;
        use crate::config;
        use crate::datastructures::input::Keys;
        use crate::modes::{recorder::Recorder, Tick};
        use crate::types::SensorSample;

        let sample = SensorSample::new([0.0, 0.0, 1.0], [0.0; 3]);
        let keys = Keys::default();
        let tick = Tick { now: Duration::ZERO, sample: &sample, keys: &keys };
        let mut canvas = Recorder::default();
        let mut zoom = Zoom::new(90.0);
        update(&tick, &mut zoom, &config::Cube::default(), &mut canvas);

        // 12 edges plus the footer separator
        assert_eq!(canvas.lines.len(), 13);
        let (from, to, _) = canvas.lines[0];
        assert_eq!((from, to), (Point::new(90, 37), Point::new(150, 37)));
    }
}
