pub mod orientation;
pub mod sensor;

pub use orientation::Orientation;
pub use sensor::SensorSample;
