use hal::display::{Canvas, Color, Primitive};
use hal::input::Key;

use super::{text, ModeKind, Tick};

/// Checked top to bottom, a later held key overrides an earlier one
pub const ENTRIES: [(char, ModeKind, &str); 6] = [
    ('1', ModeKind::Cube, "1. 3D Cube"),
    ('2', ModeKind::Level, "2. Bubble Level"),
    ('3', ModeKind::Game, "3. Tilt Game"),
    ('4', ModeKind::Launch, "4. G-Force Mode"),
    ('5', ModeKind::Graph, "5. IMU Graph"),
    ('6', ModeKind::Raw, "6. Raw Viewer"),
];

pub fn update(tick: &Tick, canvas: &mut impl Canvas) -> Option<ModeKind> {
    canvas.draw(Primitive::Clear(Color::BLACK));
    text(canvas, "IMU Demo Menu", 10, 10, 2, Color::GREEN);
    for (i, (_, _, label)) in ENTRIES.iter().enumerate() {
        text(canvas, label, 10, 40 + 15 * i as i32, 1, Color::GREEN);
    }
    let held = ENTRIES.iter().rev().find(|(key, _, _)| tick.keys.is_down(Key::Char(*key)));
    held.map(|&(_, mode, _)| mode)
}

mod test {
    #[test]
    fn test_menu_selection() {
        use core::time::Duration;

        use hal::input::Key;

        use super::update;
        use crate::datastructures::input::Keys;
        use crate::modes::{recorder::Recorder, ModeKind, Tick};
        use crate::types::SensorSample;

        let sample = SensorSample::default();
        let mut canvas = Recorder::default();
        let mut select = |keys: &[Key]| {
            let keys = Keys::from(keys);
            let tick = Tick { now: Duration::ZERO, sample: &sample, keys: &keys };
            update(&tick, &mut canvas)
        };

        assert_eq!(select(&[]), None);
        assert_eq!(select(&[Key::Char('1')]), Some(ModeKind::Cube));
        assert_eq!(select(&[Key::Char('3')]), Some(ModeKind::Game));
        assert_eq!(select(&[Key::Char('4')]), Some(ModeKind::Launch));
        assert_eq!(select(&[Key::Char('6'), Key::Char('2')]), Some(ModeKind::Raw));
        assert_eq!(select(&[Key::Char('1'), Key::Char('6')]), Some(ModeKind::Raw));
        assert_eq!(select(&[Key::Char('2'), Key::Char('5'), Key::Char('3')]), Some(ModeKind::Graph));
        assert_eq!(select(&[Key::Backspace]), None);
        assert!(canvas.has_text("5. IMU Graph"));
    }
}
