use core::time::Duration;

use hal::display::{Align, Canvas, Color, Point, Primitive};

use super::{aligned_text, ModeKind, Tick};

pub const SPLASH_DURATION: Duration = Duration::from_secs(2);

pub struct Splash {
    entered: Duration,
}

impl Splash {
    pub fn new(now: Duration) -> Self {
        Self { entered: now }
    }

    pub fn update(&self, tick: &Tick, canvas: &mut impl Canvas) -> Option<ModeKind> {
        canvas.draw(Primitive::Clear(Color::BLACK));
        let (green, center) = (Color::GREEN, Align::Center);
        aligned_text(canvas, "Cardputer ADV", Point::new(120, 30), 2, green, center);
        aligned_text(canvas, "Motion Lab", Point::new(120, 60), 2, green, center);
        aligned_text(canvas, "v0.5 - shake it up", Point::new(120, 100), 1, green, center);
        if tick.now.saturating_sub(self.entered) > SPLASH_DURATION {
            return Some(ModeKind::Menu);
        }
        None
    }
}

mod test {
    #[test]
    fn test_splash_timeout() {
        use core::time::Duration;

        use super::Splash;
        use crate::datastructures::input::Keys;
        use crate::modes::{recorder::Recorder, ModeKind, Tick};
        use crate::types::SensorSample;

        let splash = Splash::new(Duration::from_millis(500));
        let (sample, keys) = (SensorSample::default(), Keys::default());
        let mut canvas = Recorder::default();

        let tick = Tick { now: Duration::from_millis(2500), sample: &sample, keys: &keys };
        assert_eq!(splash.update(&tick, &mut canvas), None);
        assert!(canvas.has_text("Motion Lab"));

        let tick = Tick { now: Duration::from_millis(2501), sample: &sample, keys: &keys };
        assert_eq!(splash.update(&tick, &mut canvas), Some(ModeKind::Menu));
    }
}
