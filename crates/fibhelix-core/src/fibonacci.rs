//! Shared Fibonacci parameter table.
//!
//! The sequence starts `1, 1, 2, 3, 5, ...` and is used purely to modulate
//! helix geometry: a loop carries an index into the table and the cached value.

/// Largest table that fits in a `u64` without overflow.
pub const MAX_FIB_COUNT: usize = 92;

/// Precomputed Fibonacci numbers and their maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct FibonacciTable {
    values: Vec<u64>,
    max: f64,
}

impl FibonacciTable {
    /// Build a table of `count` entries.
    ///
    /// `count` is clamped to `1..=MAX_FIB_COUNT`; validated configs never
    /// hit the clamp.
    pub fn new(count: usize) -> Self {
        let count = count.clamp(1, MAX_FIB_COUNT);
        let mut values = Vec::with_capacity(count);
        let (mut a, mut b) = (1u64, 1u64);
        values.push(a);
        while values.len() < count {
            values.push(b);
            let next = a + b;
            a = b;
            b = next;
        }
        let max = values[count - 1] as f64;
        Self { values, max }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Never true; a table has at least one entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`, wrapping at the table end.
    #[inline]
    pub fn value(&self, index: usize) -> f64 {
        self.values[index % self.values.len()] as f64
    }

    /// Largest (last) value in the table.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The index after `index`, wrapping to zero.
    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.values.len()
    }

    /// Raw table entries.
    pub fn values(&self) -> &[u64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_one_one() {
        let table = FibonacciTable::new(8);
        assert_eq!(table.values(), &[1, 1, 2, 3, 5, 8, 13, 21]);
        assert_eq!(table.max(), 21.0);
    }

    #[test]
    fn default_table_max() {
        let table = FibonacciTable::new(30);
        assert_eq!(table.len(), 30);
        assert_eq!(table.max(), 832_040.0);
    }

    #[test]
    fn next_index_wraps() {
        let table = FibonacciTable::new(5);
        assert_eq!(table.next_index(3), 4);
        assert_eq!(table.next_index(4), 0);
    }

    #[test]
    fn largest_table_does_not_overflow() {
        let table = FibonacciTable::new(MAX_FIB_COUNT);
        assert_eq!(table.len(), MAX_FIB_COUNT);
        assert_eq!(table.values()[MAX_FIB_COUNT - 1], 7_540_113_804_746_346_429);
    }

    #[test]
    fn count_is_clamped() {
        assert_eq!(FibonacciTable::new(0).len(), 1);
        assert_eq!(FibonacciTable::new(500).len(), MAX_FIB_COUNT);
    }
}
