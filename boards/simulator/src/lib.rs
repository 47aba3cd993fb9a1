#[macro_use]
extern crate log;

use std::cell::Cell;
use std::collections::BTreeMap;
use std::f32::consts::PI;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use hal::display::{Canvas, Primitive};
use hal::imu::IMU;
use hal::input::{Key, Keypad};
use hal::persist::KeyValueStore;

/// Simulated uptime shared between the main loop and the collaborators that need it
#[derive(Clone, Debug, Default)]
pub struct Clock(Rc<Cell<Duration>>);

impl Clock {
    pub fn now(&self) -> Duration {
        self.0.get()
    }

    pub fn set(&self, now: Duration) {
        self.0.set(now)
    }
}

/// Slow wobble around level with a sharp jolt every `jolt_period`
pub struct SimulatedImu {
    clock: Clock,
    jolt_period: Duration,
}

impl SimulatedImu {
    pub fn new(clock: Clock, jolt_period: Duration) -> Self {
        Self { clock, jolt_period }
    }

    fn phase(&self) -> f32 {
        self.clock.now().as_secs_f32() * 2.0 * PI / 8.0
    }
}

impl IMU for SimulatedImu {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        info!("Simulated IMU ready, jolt every {:?}", self.jolt_period);
        Ok(())
    }

    fn read_acceleration(&mut self) -> Result<[f32; 3], ()> {
        let phase = self.phase();
        let (x, y) = (0.4 * phase.sin(), 0.3 * (phase * 0.7).cos());
        let z = (1.0 - x * x - y * y).sqrt();
        let period = self.jolt_period.as_millis().max(1);
        let jolt = match self.clock.now().as_millis() % period < 50 {
            true => 2.5,
            false => 1.0,
        };
        Ok([x * jolt, y * jolt, z * jolt])
    }

    fn read_gyro(&mut self) -> Result<[f32; 3], ()> {
        let phase = self.phase();
        Ok([45.0 * phase.cos(), -30.0 * (phase * 0.7).sin(), 5.0])
    }
}

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Simulated time between ticks, never zero
pub fn tick_period(rate: u64) -> Result<Duration, String> {
    match rate {
        0 => Err("rate must be positive".to_owned()),
        rate if rate > NANOS_PER_SEC => Err(format!("rate {} above 1GHz", rate)),
        rate => Ok(Duration::from_nanos(NANOS_PER_SEC / rate)),
    }
}

fn parse_key(token: &str) -> Result<Key, String> {
    let mut chars = token.chars();
    match (token, chars.next(), chars.next()) {
        ("bs", _, _) | ("backspace", _, _) => Ok(Key::Backspace),
        ("del", _, _) | ("delete", _, _) => Ok(Key::Delete),
        (_, Some(c), None) => Ok(Key::Char(c)),
        _ => Err(format!("Unknown key {}", token)),
    }
}

/// Presses keys at fixed points of simulated time, e.g. `2500:1,6000:+,9000:bs`
pub struct ScriptedKeypad {
    clock: Clock,
    hold: Duration,
    script: Vec<(Duration, Key)>,
}

impl ScriptedKeypad {
    pub fn parse(script: &str, clock: Clock, hold: Duration) -> Result<Self, String> {
        let mut entries = Vec::new();
        for item in script.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let expect = || format!("Expect millis:key, got {}", item);
            let (at, key) = item.split_once(':').ok_or_else(expect)?;
            let millis = at.parse::<u64>().map_err(|_| format!("Time {} not a number", at))?;
            entries.push((Duration::from_millis(millis), parse_key(key)?));
        }
        Ok(Self { clock, hold, script: entries })
    }
}

impl Keypad for ScriptedKeypad {
    fn is_key_down(&self, key: Key) -> bool {
        let now = self.clock.now();
        self.script.iter().any(|&(at, k)| k == key && at <= now && now < at + self.hold)
    }
}

#[derive(Debug)]
pub enum Error {
    IO(std::io::Error),
    Json(serde_json::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::IO(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

type Namespaces = BTreeMap<String, BTreeMap<String, f32>>;

/// Key-value store kept in a JSON file, one object per namespace
pub struct JsonStore {
    path: PathBuf,
    namespace: String,
    namespaces: Namespaces,
}

impl JsonStore {
    pub fn open(path: impl Into<PathBuf>, namespace: &str) -> Result<Self, Error> {
        let path = path.into();
        let namespaces = match std::fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Namespaces::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, namespace: namespace.to_owned(), namespaces })
    }
}

impl KeyValueStore for JsonStore {
    type Error = Error;

    fn get_float(&self, key: &str, default: f32) -> f32 {
        let values = self.namespaces.get(&self.namespace);
        values.and_then(|values| values.get(key)).copied().unwrap_or(default)
    }

    fn put_float(&mut self, key: &str, value: f32) -> Result<(), Error> {
        let values = self.namespaces.entry(self.namespace.clone()).or_default();
        values.insert(key.to_owned(), value);
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.namespaces)?)?;
        Ok(())
    }
}

/// Headless canvas, counts what would have been drawn
#[derive(Default)]
pub struct CountingCanvas {
    pub frames: usize,
    pub primitives: usize,
    pending: usize,
}

impl Canvas for CountingCanvas {
    fn draw(&mut self, primitive: Primitive) {
        if let Primitive::Text { text, .. } = primitive {
            trace!("Text {}", text);
        }
        self.pending += 1;
    }

    fn present(&mut self) {
        trace!("Frame {} with {} primitives", self.frames, self.pending);
        self.frames += 1;
        self.primitives += self.pending;
        self.pending = 0;
    }
}

mod test {
    #[test]
    fn test_tick_period() {
        use std::time::Duration;

        use super::tick_period;

        assert_eq!(tick_period(1).unwrap(), Duration::from_secs(1));
        assert_eq!(tick_period(1000).unwrap(), Duration::from_millis(1));
        let fast = tick_period(2000).unwrap();
        assert!(fast > Duration::ZERO);
        assert!(fast * 3 > Duration::ZERO);
        assert_eq!(fast.as_micros(), 500);
        assert!(tick_period(0).is_err());
        assert!(tick_period(5_000_000_000).is_err());
    }

    #[test]
    fn test_scripted_keypad() {
        use std::time::Duration;

        use hal::input::{Key, Keypad};

        use super::{tick_period, Clock, ScriptedKeypad};

        let clock = Clock::default();
        let hold = tick_period(2000).unwrap() * 3;
        let keypad = ScriptedKeypad::parse("1:1, 2:bs", clock.clone(), hold).unwrap();
        clock.set(Duration::from_millis(1));
        assert!(keypad.is_key_down(Key::Char('1')));
        clock.set(Duration::from_micros(2600));
        assert!(keypad.is_key_down(Key::Backspace));
        assert!(!keypad.is_key_down(Key::Char('1')));
        assert!(ScriptedKeypad::parse("abc", clock, hold).is_err());
    }
}
