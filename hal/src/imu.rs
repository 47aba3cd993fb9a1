use core::fmt::Debug;

/// Accelerometer plus gyroscope, read once per tick.
pub trait IMU {
    type Error: Debug;

    fn init(&mut self) -> Result<(), Self::Error>;
    /// x, y, z in G
    fn read_acceleration(&mut self) -> Result<[f32; 3], Self::Error>;
    /// x, y, z in degree per second
    fn read_gyro(&mut self) -> Result<[f32; 3], Self::Error>;
}
