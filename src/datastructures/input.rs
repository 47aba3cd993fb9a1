use hal::input::{Key, Keypad};

pub const EXIT_KEYS: [Key; 2] = [Key::Backspace, Key::Delete];

/// Every key the application reacts to, polled once at the start of a tick
#[rustfmt::skip]
pub const POLLED_KEYS: [Key; 14] = [
    Key::Char('1'), Key::Char('2'), Key::Char('3'), Key::Char('4'), Key::Char('5'), Key::Char('6'),
    Key::Char('+'), Key::Char('='), Key::Char('-'), Key::Char('_'), Key::Char('0'), Key::Char('r'),
    Key::Backspace, Key::Delete,
];

/// Keys held down during the current tick. No debouncing, a held key shows up on every tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Keys(heapless::Vec<Key, 16>);

impl Keys {
    pub fn poll<K: Keypad>(keypad: &K) -> Self {
        POLLED_KEYS.iter().copied().filter(|&key| keypad.is_key_down(key)).collect()
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.0.contains(&key)
    }

    pub fn any(&self, keys: &[Key]) -> bool {
        keys.iter().any(|&key| self.is_down(key))
    }

    pub fn exit_requested(&self) -> bool {
        self.any(&EXIT_KEYS)
    }
}

impl FromIterator<Key> for Keys {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut keys = heapless::Vec::new();
        for key in iter {
            if keys.push(key).is_err() {
                break;
            }
        }
        Self(keys)
    }
}

impl From<&[Key]> for Keys {
    fn from(keys: &[Key]) -> Self {
        keys.iter().copied().collect()
    }
}

mod test {
    #[test]
    fn test_poll() {
        use hal::input::{Key, Keypad};

        use super::Keys;

        struct Held;

        impl Keypad for Held {
            fn is_key_down(&self, key: Key) -> bool {
                matches!(key, Key::Char('3') | Key::Delete | Key::Char('z'))
            }
        }

        let keys = Keys::poll(&Held);
        assert!(keys.is_down(Key::Char('3')));
        assert!(!keys.is_down(Key::Char('z')));
        assert!(keys.exit_requested());
        assert!(!Keys::from(&[Key::Char('r')][..]).exit_requested());
    }
}
