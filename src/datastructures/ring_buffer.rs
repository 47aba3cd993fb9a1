/// `C` channels of `N` samples each, written in lockstep through one shared cursor.
/// The oldest sample is overwritten once full.
pub struct RingBuffer<T, const C: usize, const N: usize> {
    channels: [[T; N]; C],
    cursor: usize,
}

impl<T: Copy + Default, const C: usize, const N: usize> Default for RingBuffer<T, C, N> {
    fn default() -> Self {
        Self { channels: [[T::default(); N]; C], cursor: 0 }
    }
}

impl<T: Copy + Default, const C: usize, const N: usize> RingBuffer<T, C, N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Index of the oldest sample, which is also the next slot to write
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn write(&mut self, values: [T; C]) {
        if N == 0 {
            return;
        }
        for (channel, value) in self.channels.iter_mut().zip(values) {
            channel[self.cursor] = value;
        }
        self.cursor = (self.cursor + 1) % N;
    }

    /// Oldest to newest
    pub fn channel(&self, index: usize) -> impl Iterator<Item = T> + '_ {
        let channel = &self.channels[index];
        let cursor = self.cursor;
        (0..N).map(move |i| channel[(cursor + i) % N])
    }
}

mod test {
    #[test]
    fn test_ring_buffer() {
        use std::vec::Vec;

        use pretty_assertions::assert_eq;

        use super::RingBuffer;

        let mut ring: RingBuffer<i32, 3, 240> = RingBuffer::new();
        assert_eq!(ring.capacity(), 240);
        assert!(ring.channel(0).all(|v| v == 0));

        for i in 0..241 {
            ring.write([i, -i, i * 2]);
        }
        assert_eq!(ring.cursor(), 1);

        let x: Vec<i32> = ring.channel(0).collect();
        assert_eq!(x, (1..241).collect::<Vec<_>>());
        let y: Vec<i32> = ring.channel(1).collect();
        assert_eq!(y, (1..241).map(|i| -i).collect::<Vec<_>>());
        let z: Vec<i32> = ring.channel(2).collect();
        assert_eq!(z.first(), Some(&2));
        assert_eq!(z.last(), Some(&480));
    }

    #[test]
    fn test_partially_filled() {
        use std::vec::Vec;

        use super::RingBuffer;

        let mut ring: RingBuffer<u8, 1, 4> = RingBuffer::new();
        ring.write([7]);
        ring.write([8]);
        let values: Vec<u8> = ring.channel(0).collect();
        assert_eq!(values, [0, 0, 7, 8]);
    }
}
