/// Fixed-capacity FIFO ring buffer. Pushing into a full window evicts the oldest sample.
#[derive(Debug, Clone)]
pub struct RollingWindow<T: Copy + Default, const N: usize> {
    /// Circular storage.
    data: [T; N],
    /// Slot the next push writes to.
    write_index: usize,
    /// Number of valid samples, saturates at `N`.
    len: usize,
}

impl<T: Copy + Default, const N: usize> RollingWindow<T, N> {
    pub fn new() -> Self { Self { data: [T::default(); N], write_index: 0, len: 0 } }

    pub fn push(&mut self, value: T) {
        self.data[self.write_index] = value;
        self.write_index = (self.write_index + 1) % N;
        self.len = (self.len + 1).min(N);
    }

    pub fn len(&self) -> usize { self.len }

    pub fn is_empty(&self) -> bool { self.len == 0 }

    pub const fn capacity(&self) -> usize { N }

    /// Samples in chronological order, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = T> + ExactSizeIterator + '_ {
        let start = (self.write_index + N - self.len) % N;
        (0..self.len).map(move |i| self.data[(start + i) % N])
    }

    /// The most recent sample.
    pub fn latest(&self) -> Option<T> { self.iter().next_back() }

    /// The `n`-th most recent sample, `0` being the latest.
    pub fn nth_latest(&self, n: usize) -> Option<T> { self.iter().rev().nth(n) }

    pub fn clear(&mut self) {
        self.write_index = 0;
        self.len = 0;
    }
}

impl<T: Copy + Default, const N: usize> Default for RollingWindow<T, N> {
    fn default() -> Self { Self::new() }
}

impl<const N: usize> RollingWindow<f32, N> {
    /// Weighted mean with weights spaced linearly from `0.5` (oldest) to `1.0`
    /// (newest), normalized to sum to one. A single sample gets full weight.
    ///
    /// Returns `None` on an empty window.
    #[allow(clippy::cast_precision_loss)]
    pub fn recency_weighted_mean(&self) -> Option<f32> {
        let n = self.len;
        if n == 0 {
            return None;
        }
        let weight = |i: usize| {
            if n == 1 { 1.0 } else { 0.5 + 0.5 * i as f32 / (n - 1) as f32 }
        };
        let total: f32 = (0..n).map(weight).sum();
        Some(self.iter().enumerate().map(|(i, v)| v * weight(i) / total).sum())
    }
}
