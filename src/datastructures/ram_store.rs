use heapless::{LinearMap, String};

use hal::persist::KeyValueStore;

pub const MAX_KEY_LENGTH: usize = 16;
pub const MAX_ENTRIES: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Error {
    KeyTooLong,
    Full,
}

/// Volatile stand-in for boards without non-volatile storage. Values are lost on power cycle.
#[derive(Clone, Debug, Default)]
pub struct RamStore {
    entries: LinearMap<String<MAX_KEY_LENGTH>, f32, MAX_ENTRIES>,
}

impl KeyValueStore for RamStore {
    type Error = Error;

    fn get_float(&self, key: &str, default: f32) -> f32 {
        self.entries.iter().find(|(k, _)| k.as_str() == key).map(|(_, v)| *v).unwrap_or(default)
    }

    fn put_float(&mut self, key: &str, value: f32) -> Result<(), Error> {
        let mut k = String::new();
        k.push_str(key).map_err(|_| Error::KeyTooLong)?;
        self.entries.insert(k, value).map_err(|_| Error::Full)?;
        Ok(())
    }
}

mod test {
    #[test]
    fn test_ram_store() {
        use hal::persist::KeyValueStore;

        use super::{Error, RamStore};

        let mut store = RamStore::default();
        assert_eq!(store.get_float("highG", 1.25), 1.25);
        store.put_float("highG", 3.5).unwrap();
        store.put_float("highG", 4.0).unwrap();
        assert_eq!(store.get_float("highG", 0.0), 4.0);
        assert_eq!(store.put_float("a-very-long-key-name", 1.0), Err(Error::KeyTooLong));

        for i in 0..7 {
            let key = ["k0", "k1", "k2", "k3", "k4", "k5", "k6"][i];
            store.put_float(key, i as f32).unwrap();
        }
        assert_eq!(store.put_float("k7", 7.0), Err(Error::Full));
    }
}
