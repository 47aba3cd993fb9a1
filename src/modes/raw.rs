use hal::display::{Canvas, Color, Primitive};

use super::{format, horizontal_line, text, ModeKind, Tick};
use crate::types::Orientation;

pub fn update(tick: &Tick, canvas: &mut impl Canvas) -> Option<ModeKind> {
    let (a, g) = (&tick.sample.acceleration, &tick.sample.gyro);
    let (pitch, roll) = Orientation::from(tick.sample).degrees();

    canvas.draw(Primitive::Clear(Color::BLACK));
    text(canvas, "IMU SENSOR DATA", 5, 5, 2, Color::GREEN);
    horizontal_line(canvas, 25, Color::rgb(0, 100, 0));

    let top = 35;
    text(canvas, "ACCEL [G]", 5, top, 1, Color::RED);
    for (i, (axis, value)) in [('X', a.x), ('Y', a.y), ('Z', a.z)].iter().enumerate() {
        let line = format(format_args!("{}: {:+6.2}", axis, value));
        text(canvas, &line, 5, top + 10 * (i as i32 + 1), 1, Color::RED);
    }

    text(canvas, "GYRO [deg/s]", 120, top, 1, Color::BLUE);
    for (i, (axis, value)) in [('X', g.x), ('Y', g.y), ('Z', g.z)].iter().enumerate() {
        let line = format(format_args!("{}: {:+7.1}", axis, value));
        text(canvas, &line, 120, top + 10 * (i as i32 + 1), 1, Color::BLUE);
    }

    let line = format(format_args!("PITCH: {:6.1} deg  ROLL: {:6.1} deg", pitch, roll));
    text(canvas, &line, 5, 115, 1, Color::YELLOW);
    None
}

mod test {
    #[test]
    fn test_readout() {
        use core::time::Duration;

        use super::update;
        use crate::datastructures::input::Keys;
        use crate::modes::{recorder::Recorder, Tick};
        use crate::types::SensorSample;

        let sample = SensorSample::new([-1.0, 0.0, 0.0], [12.5, -3.0, 0.0]);
        let keys = Keys::default();
        let tick = Tick { now: Duration::ZERO, sample: &sample, keys: &keys };
        let mut canvas = Recorder::default();
        assert_eq!(update(&tick, &mut canvas), None);

        assert!(canvas.has_text("X:  -1.00"));
        assert!(canvas.has_text("X:   +12.5"));
        assert!(canvas.has_text("Y:    -3.0"));
        assert!(canvas.has_text("PITCH:    0.0 deg  ROLL:   90.0 deg"));
    }
}
