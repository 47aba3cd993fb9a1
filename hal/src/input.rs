#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
}

pub trait Keypad {
    fn is_key_down(&self, key: Key) -> bool;
}
