use core::time::Duration;

use hal::persist::KeyValueStore;

/// Forces at or below this are ordinary handling, gravity included
pub const PEAK_THRESHOLD: f32 = 1.5;
pub const PEAK_HOLD: Duration = Duration::from_millis(3000);
pub const HIGH_G_KEY: &str = "highG";

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PeakStatus {
    Idle,
    Tracking { peak: f32, elapsed: Duration },
}

/// Holds the latest force peak for `PEAK_HOLD` and keeps the all-time maximum in the store.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PeakTracker {
    current_max: f32,
    peak_at: Duration,
    all_time_high: f32,
}

fn persist<S: KeyValueStore>(store: &mut S, value: f32) {
    if let Err(e) = store.put_float(HIGH_G_KEY, value) {
        warn!("Persist {} = {:.2} failed: {:?}", HIGH_G_KEY, value, e);
    }
}

impl PeakTracker {
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        Self { all_time_high: store.get_float(HIGH_G_KEY, 0.0), ..Default::default() }
    }

    pub fn current_max(&self) -> f32 {
        self.current_max
    }

    pub fn all_time_high(&self) -> f32 {
        self.all_time_high
    }

    pub fn record<S: KeyValueStore>(&mut self, now: Duration, force: f32, store: &mut S) {
        if !(force > PEAK_THRESHOLD && force > self.current_max) {
            return;
        }
        self.current_max = force;
        self.peak_at = now;
        if self.current_max > self.all_time_high {
            self.all_time_high = self.current_max;
            info!("New all-time record {:.2}G", self.all_time_high);
            persist(store, self.all_time_high);
        }
    }

    pub fn reset<S: KeyValueStore>(&mut self, store: &mut S) {
        self.current_max = 0.0;
        self.all_time_high = 0.0;
        persist(store, 0.0);
    }

    pub fn decay(&mut self, now: Duration) -> PeakStatus {
        let elapsed = now.saturating_sub(self.peak_at);
        if self.current_max < PEAK_THRESHOLD || elapsed > PEAK_HOLD {
            self.current_max = 0.0;
            return PeakStatus::Idle;
        }
        PeakStatus::Tracking { peak: self.current_max, elapsed }
    }
}

mod test {
    #[test]
    fn test_peak_decay() {
        use core::time::Duration;

        use pretty_assertions::assert_eq;

        use super::{PeakStatus, PeakTracker};
        use crate::datastructures::ram_store::RamStore;

        let mut store = RamStore::default();
        let mut tracker = PeakTracker::default();
        let t0 = Duration::from_secs(10);
        tracker.record(t0, 3.0, &mut store);
        assert_eq!(tracker.current_max(), 3.0);

        let status = tracker.decay(t0 + Duration::from_millis(3000));
        assert_eq!(status, PeakStatus::Tracking { peak: 3.0, elapsed: Duration::from_millis(3000) });

        tracker.record(t0 + Duration::from_millis(2000), 1.2, &mut store);
        assert_eq!(tracker.decay(t0 + Duration::from_millis(3001)), PeakStatus::Idle);
        assert_eq!(tracker.current_max(), 0.0);
        assert_eq!(tracker.all_time_high(), 3.0);
    }

    #[test]
    fn test_below_threshold_ignored() {
        use core::time::Duration;

        use super::{PeakStatus, PeakTracker, HIGH_G_KEY};
        use crate::datastructures::ram_store::RamStore;
        use hal::persist::KeyValueStore;

        let mut store = RamStore::default();
        let mut tracker = PeakTracker::default();
        tracker.record(Duration::from_secs(1), 1.5, &mut store);
        assert_eq!(tracker.decay(Duration::from_secs(1)), PeakStatus::Idle);
        assert_eq!(store.get_float(HIGH_G_KEY, -1.0), -1.0);
    }

    #[test]
    fn test_nan_force_ignored() {
        use core::time::Duration;

        use super::{PeakStatus, PeakTracker, HIGH_G_KEY};
        use crate::datastructures::ram_store::RamStore;
        use hal::persist::KeyValueStore;

        let mut store = RamStore::default();
        let mut tracker = PeakTracker::default();
        tracker.record(Duration::from_secs(1), f32::NAN, &mut store);
        assert_eq!(tracker.current_max(), 0.0);
        assert_eq!(tracker.decay(Duration::from_secs(1)), PeakStatus::Idle);

        tracker.record(Duration::from_secs(2), 2.0, &mut store);
        tracker.record(Duration::from_secs(2), f32::NAN, &mut store);
        assert_eq!(tracker.current_max(), 2.0);
        assert_eq!(tracker.all_time_high(), 2.0);
        assert_eq!(store.get_float(HIGH_G_KEY, 0.0), 2.0);
    }

    #[test]
    fn test_all_time_high_monotonic() {
        use core::time::Duration;

        use super::{PeakTracker, HIGH_G_KEY};
        use crate::datastructures::ram_store::RamStore;
        use hal::persist::KeyValueStore;

        let mut store = RamStore::default();
        let mut tracker = PeakTracker::default();
        let forces = [1.0, 2.0, 1.7, 4.5, 0.2, 3.9, 1.6, 5.1, 2.2, 0.9, 1.51];
        let mut previous = tracker.all_time_high();
        for (i, force) in forces.iter().enumerate() {
            let now = Duration::from_millis(i as u64 * 1700);
            tracker.record(now, *force, &mut store);
            tracker.decay(now);
            assert!(tracker.all_time_high() >= previous);
            previous = tracker.all_time_high();
        }
        assert_eq!(tracker.all_time_high(), 5.1);
        assert_eq!(store.get_float(HIGH_G_KEY, 0.0), 5.1);
    }

    #[test]
    fn test_reset_and_reload() {
        use core::time::Duration;

        use super::{PeakTracker, HIGH_G_KEY};
        use crate::datastructures::ram_store::RamStore;
        use hal::persist::KeyValueStore;

        let mut store = RamStore::default();
        store.put_float(HIGH_G_KEY, 2.5).unwrap();
        let mut tracker = PeakTracker::load(&store);
        assert_eq!(tracker.all_time_high(), 2.5);

        tracker.record(Duration::from_secs(1), 2.0, &mut store);
        assert_eq!(tracker.current_max(), 2.0);
        assert_eq!(store.get_float(HIGH_G_KEY, 0.0), 2.5);

        tracker.reset(&mut store);
        assert_eq!(tracker.all_time_high(), 0.0);
        assert_eq!(tracker.current_max(), 0.0);
        assert_eq!(store.get_float(HIGH_G_KEY, -1.0), 0.0);
        assert_eq!(PeakTracker::load(&store).all_time_high(), 0.0);
    }
}
