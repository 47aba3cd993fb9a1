use core::f32::consts::PI;

#[cfg(not(any(test, feature = "std")))]
use micromath::F32Ext;

use super::sensor::SensorSample;

pub const DEGREE_PER_RAD: f32 = 180.0 / PI;

/// Pitch and roll in radians, both within (-π, π].
///
/// Derived from the gravity vector alone: no gyro fusion and no smoothing. The estimate is noisy
/// and only holds while gravity dominates the measured acceleration, so shaking or accelerating
/// the device tilts the result.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Orientation {
    pub pitch: f32,
    pub roll: f32,
}

// atan2 yields [-π, π]
fn fold(angle: f32) -> f32 {
    if angle <= -PI {
        PI
    } else {
        angle
    }
}

impl Orientation {
    pub fn new(pitch: f32, roll: f32) -> Self {
        Self { pitch: fold(pitch), roll: fold(roll) }
    }

    pub fn degrees(&self) -> (f32, f32) {
        (self.pitch * DEGREE_PER_RAD, self.roll * DEGREE_PER_RAD)
    }
}

impl From<&SensorSample> for Orientation {
    fn from(sample: &SensorSample) -> Self {
        let a = &sample.acceleration;
        let pitch = a.y.atan2(a.z);
        let roll = (-a.x).atan2((a.y * a.y + a.z * a.z).sqrt());
        Self::new(pitch, roll)
    }
}

mod test {
    #[test]
    fn test_flat() {
        use super::{Orientation, SensorSample};

        let orientation = Orientation::from(&SensorSample::new([0.0, 0.0, 1.0], [0.0; 3]));
        assert_eq!(orientation, Orientation::new(0.0, 0.0));
    }

    #[test]
    fn test_tilted() {
        use core::f32::consts::FRAC_PI_2;

        use super::{Orientation, SensorSample};

        let nose_up = Orientation::from(&SensorSample::new([0.0, 1.0, 0.0], [0.0; 3]));
        assert!((nose_up.pitch - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(nose_up.roll, 0.0);

        let rolled = Orientation::from(&SensorSample::new([-1.0, 0.0, 0.0], [0.0; 3]));
        assert!((rolled.roll - FRAC_PI_2).abs() < 1e-6);

        let (pitch, roll) = rolled.degrees();
        assert_eq!(pitch, 0.0);
        assert!((roll - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_upside_down_folds_to_positive_pi() {
        use core::f32::consts::PI;

        use super::{Orientation, SensorSample};

        let orientation = Orientation::from(&SensorSample::new([0.0, -0.0, -1.0], [0.0; 3]));
        assert_eq!(orientation.pitch, PI);
        assert!(orientation.pitch > -PI && orientation.pitch <= PI);
    }
}
