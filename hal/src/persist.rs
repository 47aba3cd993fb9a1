use core::fmt::Debug;

/// Non-volatile float storage, namespaced by the implementation.
pub trait KeyValueStore {
    type Error: Debug;

    fn get_float(&self, key: &str, default: f32) -> f32;
    fn put_float(&mut self, key: &str, value: f32) -> Result<(), Self::Error>;
}
