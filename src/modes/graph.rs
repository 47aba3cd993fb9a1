use hal::display::{Canvas, Color, Point, Primitive};

use super::{horizontal_line, line, ModeKind, Tick};
use crate::config;
use crate::datastructures::ring_buffer::RingBuffer;

pub const CAPACITY: usize = 240;
const BASELINE: i32 = 67;
const COLORS: [Color; 3] = [Color::RED, Color::GREEN, Color::BLUE];

/// Scrolling trace of the last `CAPACITY` accelerometer samples, one pixel column each
pub struct Graph {
    history: RingBuffer<f32, 3, CAPACITY>,
    pixels_per_g: f32,
}

impl Graph {
    pub fn new(config: &config::Graph) -> Self {
        Self { history: RingBuffer::new(), pixels_per_g: config.pixels_per_g }
    }

    pub fn history(&self) -> &RingBuffer<f32, 3, CAPACITY> {
        &self.history
    }

    fn y(&self, g: f32) -> i32 {
        BASELINE.saturating_sub((g * self.pixels_per_g) as i32)
    }

    pub fn update(&mut self, tick: &Tick, canvas: &mut impl Canvas) -> Option<ModeKind> {
        let a = &tick.sample.acceleration;
        self.history.write([a.x, a.y, a.z]);

        canvas.draw(Primitive::Clear(Color::BLACK));
        horizontal_line(canvas, BASELINE, Color::rgb(40, 40, 40));
        for (channel, &color) in COLORS.iter().enumerate() {
            let mut samples = self.history.channel(channel).map(|g| self.y(g));
            let mut previous = match samples.next() {
                Some(y) => y,
                None => continue,
            };
            for (x, y) in samples.enumerate() {
                let x = x as i32;
                line(canvas, Point::new(x, previous), Point::new(x + 1, y), color);
                previous = y;
            }
        }
        None
    }
}

mod test {
    #[test]
    fn test_scrolling_trace() {
        use core::time::Duration;

        use hal::display::{Color, Point};

        use super::{Graph, CAPACITY};
        use crate::config;
        use crate::datastructures::input::Keys;
        use crate::modes::{recorder::Recorder, Tick};
        use crate::types::SensorSample;

        let mut graph = Graph::new(&config::Graph::default());
        let keys = Keys::default();
        let mut canvas = Recorder::default();
        for i in 0..=CAPACITY {
            canvas.clear();
            let sample = SensorSample::new([i as f32 / 240.0, -0.5, 1.0], [0.0; 3]);
            let tick = Tick { now: Duration::from_millis(i as u64 * 10), sample: &sample, keys: &keys };
            graph.update(&tick, &mut canvas);
        }

        assert_eq!(graph.history().cursor(), 1);
        let oldest = graph.history().channel(0).next().unwrap();
        assert_eq!(oldest, 1.0 / 240.0);

        // baseline plus 239 segments per axis
        assert_eq!(canvas.lines.len(), 1 + 3 * (CAPACITY - 1));
        let newest_x = canvas.lines.iter().filter(|l| l.2 == Color::RED).last().unwrap();
        assert_eq!(newest_x.1, Point::new(239, 27));
        let y = canvas.lines.iter().find(|l| l.2 == Color::GREEN).unwrap();
        assert_eq!((y.0, y.1), (Point::new(0, 87), Point::new(1, 87)));
    }

    #[test]
    fn test_extreme_samples_saturate() {
        use core::time::Duration;

        use super::Graph;
        use crate::config;
        use crate::datastructures::input::Keys;
        use crate::modes::{recorder::Recorder, Tick};
        use crate::types::SensorSample;

        let mut graph = Graph::new(&config::Graph::default());
        let keys = Keys::default();
        let mut canvas = Recorder::default();
        let sample = SensorSample::new([-1e30, 1e30, f32::NAN], [0.0; 3]);
        let tick = Tick { now: Duration::ZERO, sample: &sample, keys: &keys };
        graph.update(&tick, &mut canvas);

        assert_eq!(graph.y(-1e30), i32::MAX);
        assert_eq!(graph.y(1e30), 67 - i32::MAX);
        assert_eq!(graph.y(f32::NAN), 67);
    }
}
