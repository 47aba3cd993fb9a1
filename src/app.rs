use core::fmt::Debug;
use core::time::Duration;

use hal::display::Canvas;
use hal::imu::IMU;
use hal::input::Keypad;
use hal::persist::KeyValueStore;

use crate::algorithm::peak::PeakTracker;
use crate::algorithm::projection::Zoom;
use crate::config::Config;
use crate::datastructures::input::Keys;
use crate::modes::{cube, launch, level, menu, raw, Mode, ModeKind, Tick};
use crate::types::SensorSample;

/// Namespace a board should scope its key-value store with
pub const NAMESPACE: &str = "motion-lab";

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error<E: Debug> {
    ImuUnavailable(E),
}

/// State that outlives mode switches
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AppState {
    pub config: Config,
    pub zoom: Zoom,
    pub peak: PeakTracker,
}

pub struct App<I, K, S> {
    imu: I,
    keypad: K,
    store: S,
    state: AppState,
    mode: Mode,
    sample: SensorSample,
}

impl<I: IMU, K: Keypad, S: KeyValueStore> App<I, K, S> {
    pub fn new(
        mut imu: I,
        keypad: K,
        store: S,
        config: Config,
        now: Duration,
    ) -> Result<Self, Error<I::Error>> {
        if let Err(e) = imu.init() {
            error!("IMU init failed: {:?}", e);
            return Err(Error::ImuUnavailable(e));
        }
        let peak = PeakTracker::load(&store);
        info!("All-time record {:.2}G", peak.all_time_high());
        let state = AppState { config, zoom: Zoom::new(config.cube.zoom), peak };
        let mode = Mode::enter(ModeKind::Splash, now, &config);
        Ok(Self { imu, keypad, store, state, mode, sample: SensorSample::default() })
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sample(&self) -> &SensorSample {
        &self.sample
    }

    fn read_sample(&mut self) -> Result<SensorSample, I::Error> {
        let acceleration = self.imu.read_acceleration()?;
        let gyro = self.imu.read_gyro()?;
        Ok(SensorSample::new(acceleration, gyro))
    }

    fn switch(&mut self, kind: ModeKind, now: Duration) {
        info!("Mode {} -> {}", self.mode.kind(), kind);
        self.mode = Mode::enter(kind, now, &self.state.config);
    }

    /// Runs one iteration of the main loop: keys, sensor, mode update, present.
    pub fn tick(&mut self, now: Duration, canvas: &mut impl Canvas) {
        let keys = Keys::poll(&self.keypad);
        if self.mode.kind().is_visualization() && keys.exit_requested() {
            self.switch(ModeKind::Menu, now);
            return;
        }

        match self.read_sample() {
            Ok(sample) => self.sample = sample,
            Err(e) => warn!("IMU read failed: {:?}", e),
        }

        let tick = Tick { now, sample: &self.sample, keys: &keys };
        let state = &mut self.state;
        let next = match &mut self.mode {
            Mode::Splash(splash) => splash.update(&tick, canvas),
            Mode::Menu => menu::update(&tick, canvas),
            Mode::Cube => cube::update(&tick, &mut state.zoom, &state.config.cube, canvas),
            Mode::Level => level::update(&tick, canvas),
            Mode::Game(game) => game.update(&tick, canvas),
            Mode::Launch => launch::update(&tick, &mut state.peak, &mut self.store, canvas),
            Mode::Graph(graph) => graph.update(&tick, canvas),
            Mode::Raw => raw::update(&tick, canvas),
        };
        canvas.present();

        if let Some(kind) = next {
            self.switch(kind, now);
        }
    }
}

#[cfg(test)]
mod test {
    use core::cell::{Cell, RefCell};
    use core::time::Duration;
    use std::rc::Rc;
    use std::vec::Vec;

    use hal::imu::IMU;
    use hal::input::{Key, Keypad};

    use super::App;
    use crate::config::Config;
    use crate::datastructures::ram_store::RamStore;
    use crate::modes::recorder::Recorder;

    #[derive(Clone, Default)]
    struct MockImu {
        acceleration: Rc<Cell<[f32; 3]>>,
        failing: Rc<Cell<bool>>,
    }

    impl IMU for MockImu {
        type Error = &'static str;

        fn init(&mut self) -> Result<(), &'static str> {
            match self.failing.get() {
                true => Err("no response"),
                false => Ok(()),
            }
        }

        fn read_acceleration(&mut self) -> Result<[f32; 3], &'static str> {
            match self.failing.get() {
                true => Err("bus error"),
                false => Ok(self.acceleration.get()),
            }
        }

        fn read_gyro(&mut self) -> Result<[f32; 3], &'static str> {
            Ok([0.5, -0.5, 1.0])
        }
    }

    #[derive(Clone, Default)]
    struct MockKeypad(Rc<RefCell<Vec<Key>>>);

    impl MockKeypad {
        fn hold(&self, keys: &[Key]) {
            *self.0.borrow_mut() = keys.to_vec();
        }
    }

    impl Keypad for MockKeypad {
        fn is_key_down(&self, key: Key) -> bool {
            self.0.borrow().contains(&key)
        }
    }

    struct Bench {
        imu: MockImu,
        keypad: MockKeypad,
        app: App<MockImu, MockKeypad, RamStore>,
        canvas: Recorder,
        now: Duration,
    }

    impl Bench {
        fn new(store: RamStore) -> Self {
            let imu = MockImu::default();
            imu.acceleration.set([0.0, 0.0, 1.0]);
            let keypad = MockKeypad::default();
            let app = App::new(imu.clone(), keypad.clone(), store, Config::default(), Duration::ZERO)
                .unwrap();
            Self { imu, keypad, app, canvas: Recorder::default(), now: Duration::ZERO }
        }

        fn tick(&mut self, millis: u64, keys: &[Key]) {
            self.now += Duration::from_millis(millis);
            self.keypad.hold(keys);
            self.canvas.clear();
            self.app.tick(self.now, &mut self.canvas);
        }

        fn to_menu(&mut self) {
            self.tick(2001, &[]);
        }
    }

    #[test]
    fn test_imu_init_failure() {
        use super::Error;

        let imu = MockImu::default();
        imu.failing.set(true);
        let (keypad, store) = (MockKeypad::default(), RamStore::default());
        let result = App::new(imu, keypad, store, Config::default(), Duration::ZERO);
        assert_eq!(result.err(), Some(Error::ImuUnavailable("no response")));
    }

    #[test]
    fn test_splash_to_menu() {
        use crate::modes::ModeKind;

        let mut bench = Bench::new(RamStore::default());
        bench.tick(0, &[]);
        assert_eq!(bench.app.kind(), ModeKind::Splash);
        assert!(bench.canvas.has_text("Motion Lab"));
        bench.tick(2000, &[]);
        assert_eq!(bench.app.kind(), ModeKind::Splash);
        bench.tick(1, &[]);
        assert_eq!(bench.app.kind(), ModeKind::Menu);
        assert_eq!(bench.canvas.presented, 3);
    }

    #[test]
    fn test_menu_and_exit() {
        use crate::modes::ModeKind;

        let mut bench = Bench::new(RamStore::default());
        bench.to_menu();

        // Exit keys mean nothing in the menu
        bench.tick(10, &[Key::Backspace]);
        assert_eq!(bench.app.kind(), ModeKind::Menu);

        bench.tick(10, &[Key::Char('1')]);
        assert_eq!(bench.app.kind(), ModeKind::Cube);
        bench.tick(10, &[Key::Char('1')]);
        assert_eq!(bench.app.kind(), ModeKind::Cube);
        assert_eq!(bench.canvas.lines.len(), 13);

        let presented = bench.canvas.presented;
        bench.tick(10, &[Key::Delete, Key::Char('+')]);
        assert_eq!(bench.app.kind(), ModeKind::Menu);
        assert!(bench.canvas.is_blank());
        assert_eq!(bench.canvas.presented, presented);
        assert_eq!(bench.app.state().zoom.scale(), 90.0);

        for (key, kind) in [('2', ModeKind::Level), ('5', ModeKind::Graph), ('6', ModeKind::Raw)] {
            bench.tick(10, &[Key::Char(key)]);
            assert_eq!(bench.app.kind(), kind);
            bench.tick(10, &[Key::Backspace]);
            assert_eq!(bench.app.kind(), ModeKind::Menu);
        }
    }

    #[test]
    fn test_zoom_survives_mode_switch() {
        use crate::modes::ModeKind;

        let mut bench = Bench::new(RamStore::default());
        bench.to_menu();
        bench.tick(10, &[Key::Char('1')]);
        bench.tick(10, &[Key::Char('+')]);
        bench.tick(10, &[Key::Char('=')]);
        assert_eq!(bench.app.state().zoom.scale(), 94.0);
        bench.tick(10, &[Key::Backspace]);
        bench.tick(10, &[Key::Char('1')]);
        bench.tick(10, &[]);
        assert_eq!(bench.app.kind(), ModeKind::Cube);
        assert_eq!(bench.app.state().zoom.scale(), 94.0);
        assert!(bench.canvas.has_text("Scale: 94"));
    }

    #[test]
    fn test_peak_persisted() {
        use hal::persist::KeyValueStore;

        use crate::algorithm::peak::HIGH_G_KEY;

        let mut bench = Bench::new(RamStore::default());
        bench.to_menu();
        bench.tick(10, &[Key::Char('4')]);
        bench.imu.acceleration.set([0.0, 3.0, 4.0]);
        bench.tick(10, &[]);
        assert!(bench.canvas.has_text("5.00"));
        assert_eq!(bench.app.store().get_float(HIGH_G_KEY, 0.0), 5.0);

        let store = bench.app.store().clone();
        let mut bench = Bench::new(store);
        assert_eq!(bench.app.state().peak.all_time_high(), 5.0);

        bench.to_menu();
        bench.tick(10, &[Key::Char('4')]);
        bench.tick(10, &[Key::Char('r')]);
        assert_eq!(bench.app.state().peak.all_time_high(), 0.0);
        assert_eq!(bench.app.store().get_float(HIGH_G_KEY, 1.0), 0.0);
    }

    #[test]
    fn test_game_fresh_on_entry() {
        use nalgebra::Point2;

        use crate::modes::Mode;

        let mut bench = Bench::new(RamStore::default());
        bench.to_menu();
        bench.tick(10, &[Key::Char('3')]);
        bench.imu.acceleration.set([1.0, 0.0, 0.0]);
        bench.tick(10, &[]);
        bench.tick(10, &[]);
        match bench.app.mode() {
            Mode::Game(game) => assert_ne!(game.ball(), Point2::new(120.0, 67.0)),
            _ => panic!("expect game mode"),
        }

        bench.tick(10, &[Key::Backspace]);
        bench.tick(10, &[Key::Char('3')]);
        match bench.app.mode() {
            Mode::Game(game) => {
                assert_eq!(game.ball(), Point2::new(120.0, 67.0));
                assert_eq!(game.goal(), None);
            }
            _ => panic!("expect game mode"),
        }
    }

    #[test]
    fn test_read_failure_keeps_sample() {
        use crate::types::SensorSample;

        let mut bench = Bench::new(RamStore::default());
        bench.imu.acceleration.set([0.25, 0.0, 1.0]);
        bench.tick(10, &[]);
        let expected = SensorSample::new([0.25, 0.0, 1.0], [0.5, -0.5, 1.0]);
        assert_eq!(*bench.app.sample(), expected);

        bench.imu.failing.set(true);
        bench.imu.acceleration.set([2.0, 2.0, 2.0]);
        bench.tick(10, &[]);
        assert_eq!(*bench.app.sample(), expected);
    }
}
