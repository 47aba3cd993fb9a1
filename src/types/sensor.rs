use nalgebra::Vector3;

/// One tick worth of IMU readout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SensorSample {
    /// G
    pub acceleration: Vector3<f32>,
    /// degree per second
    pub gyro: Vector3<f32>,
}

impl Default for SensorSample {
    fn default() -> Self {
        Self { acceleration: Vector3::zeros(), gyro: Vector3::zeros() }
    }
}

impl SensorSample {
    pub fn new(acceleration: [f32; 3], gyro: [f32; 3]) -> Self {
        Self { acceleration: acceleration.into(), gyro: gyro.into() }
    }

    /// Magnitude of the acceleration vector in G, 1.0 at rest
    pub fn force(&self) -> f32 {
        self.acceleration.norm()
    }
}

mod test {
    #[test]
    fn test_force() {
        use super::SensorSample;

        let sample = SensorSample::new([0.0, 0.0, 1.0], [0.0; 3]);
        assert_eq!(sample.force(), 1.0);

        let sample = SensorSample::new([3.0, 0.0, 4.0], [10.0, 20.0, 30.0]);
        assert!((sample.force() - 5.0).abs() < 1e-6);
    }
}
