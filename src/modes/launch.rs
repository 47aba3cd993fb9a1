use hal::display::{Align, Canvas, Color, Point, Primitive};
use hal::input::Key;
use hal::persist::KeyValueStore;

use super::{aligned_text, format, horizontal_line, text, ModeKind, Tick, FOOTER_LINE};
use crate::algorithm::peak::{PeakStatus, PeakTracker, PEAK_HOLD};

pub const RESET: Key = Key::Char('r');

/// Shrinks from full width to nothing over the hold window
fn hold_bar(elapsed_ms: u128) -> u16 {
    let hold = PEAK_HOLD.as_millis();
    (240 * hold.saturating_sub(elapsed_ms) / hold) as u16
}

pub fn update<S: KeyValueStore>(
    tick: &Tick,
    peak: &mut PeakTracker,
    store: &mut S,
    canvas: &mut impl Canvas,
) -> Option<ModeKind> {
    let force = tick.sample.force();
    peak.record(tick.now, force, store);
    if tick.keys.is_down(RESET) {
        info!("All-time record reset");
        peak.reset(store);
    }
    let status = peak.decay(tick.now);

    canvas.draw(Primitive::Clear(Color::BLACK));
    let record = format(format_args!("ALL-TIME RECORD: {:.2}G", peak.all_time_high()));
    text(canvas, &record, 5, 5, 1, Color::YELLOW);
    horizontal_line(canvas, 18, Color::DARK_GREY);

    match status {
        PeakStatus::Idle => {
            let position = Point::new(120, 55);
            aligned_text(canvas, "Ready for G-force", position, 2, Color::WHITE, Align::Center);
        }
        PeakStatus::Tracking { peak: current, elapsed } => {
            let color = if current >= peak.all_time_high() { Color::GREEN } else { Color::RED };
            aligned_text(canvas, "Peak Force", Point::new(120, 35), 2, color, Align::Center);
            text(canvas, &format(format_args!("{:.2}G", current)), 30, 65, 5, color);
            let width = hold_bar(elapsed.as_millis());
            let origin = Point::new(0, 130);
            canvas.draw(Primitive::FillRect { origin, width, height: 5, color: Color::GREEN });
        }
    }

    horizontal_line(canvas, 115, FOOTER_LINE);
    let live = format(format_args!("Live:{:.2}G (1.00 = Gravity)", force));
    text(canvas, &live, 5, 122, 1, Color::DARK_GREY);
    let position = Point::new(235, 122);
    aligned_text(canvas, "R = Reset", position, 1, Color::DARK_GREY, Align::Right);
    None
}

mod test {
    #[test]
    fn test_hold_bar() {
        use super::hold_bar;

        assert_eq!(hold_bar(0), 240);
        assert_eq!(hold_bar(1500), 120);
        assert_eq!(hold_bar(3000), 0);
        assert_eq!(hold_bar(4000), 0);
    }

    #[test]
    fn test_launch_screen() {
        use core::time::Duration;

        use hal::input::Key;
        use hal::persist::KeyValueStore;

        use super::update;
        use crate::algorithm::peak::{PeakTracker, HIGH_G_KEY};
        use crate::datastructures::{input::Keys, ram_store::RamStore};
        use crate::modes::{recorder::Recorder, Tick};
        use crate::types::SensorSample;

        let mut store = RamStore::default();
        let mut peak = PeakTracker::load(&store);
        let mut canvas = Recorder::default();
        let no_keys = Keys::default();

        let rest = SensorSample::new([0.0, 0.0, 1.0], [0.0; 3]);
        let tick = Tick { now: Duration::from_secs(1), sample: &rest, keys: &no_keys };
        update(&tick, &mut peak, &mut store, &mut canvas);
        assert!(canvas.has_text("Ready for G-force"));
        assert!(canvas.has_text("Live:1.00G"));

        canvas.clear();
        let punch = SensorSample::new([0.0, 3.0, 4.0], [0.0; 3]);
        let tick = Tick { now: Duration::from_secs(2), sample: &punch, keys: &no_keys };
        update(&tick, &mut peak, &mut store, &mut canvas);
        assert!(canvas.has_text("Peak Force"));
        assert!(canvas.has_text("5.00G"));
        assert!(canvas.has_text("ALL-TIME RECORD: 5.00G"));
        assert_eq!(canvas.rects.len(), 1);
        assert_eq!(store.get_float(HIGH_G_KEY, 0.0), 5.0);

        canvas.clear();
        let reset = Keys::from(&[Key::Char('r')][..]);
        let tick = Tick { now: Duration::from_secs(3), sample: &rest, keys: &reset };
        update(&tick, &mut peak, &mut store, &mut canvas);
        assert!(canvas.has_text("ALL-TIME RECORD: 0.00G"));
        assert!(canvas.has_text("Ready for G-force"));
        assert_eq!(store.get_float(HIGH_G_KEY, -1.0), 0.0);
    }
}
