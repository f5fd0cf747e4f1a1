use std::collections::{BTreeMap, btree_map};

/// Frequency table mapping each observed value to its count.
///
/// Values that were never observed have an implicit count of 0. Counts are
/// never normalized; use [`Pmf::from_histogram`](crate::pmf::Pmf::from_histogram)
/// to obtain probabilities.
///
/// # Examples
///
/// ```
/// use probkit_dist::histogram::Histogram;
///
/// let hist = Histogram::from_values([1, 2, 2, 3, 5]);
/// assert_eq!(hist.frequency(&2), 2);
/// assert_eq!(hist.frequency(&4), 0);
/// assert_eq!(hist.total(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram<K> {
    counts: BTreeMap<K, i64>,
}

impl<K> Default for Histogram<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K> Histogram<K>
where
    K: Ord + Copy,
{
    /// Creates an empty histogram.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every occurrence of each value in `values`.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        values.into_iter().collect()
    }

    /// Adds 1 to the count of `value`.
    pub fn increment(&mut self, value: K) {
        self.increment_by(value, 1);
    }

    /// Adds `amount` to the count of `value`, creating the entry if absent.
    pub fn increment_by(&mut self, value: K, amount: i64) {
        *self.counts.entry(value).or_insert(0) += amount;
    }

    /// Sets the count of `value`.
    pub fn set(&mut self, value: K, count: i64) {
        self.counts.insert(value, count);
    }

    /// Removes `value` and returns its count, if it was present.
    pub fn remove(&mut self, value: &K) -> Option<i64> {
        self.counts.remove(value)
    }

    /// Returns the count of `value`, or 0 if it was never observed.
    #[must_use]
    pub fn frequency(&self, value: &K) -> i64 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns the counts of several values.
    #[must_use]
    pub fn frequencies<'a, I>(&self, values: I) -> Vec<i64>
    where
        I: IntoIterator<Item = &'a K>,
        K: 'a,
    {
        values.into_iter().map(|v| self.frequency(v)).collect()
    }

    /// Returns the sum of all counts.
    #[must_use]
    pub fn total(&self) -> i64 {
        self.counts.values().sum()
    }

    /// Returns `true` if every count in `self` is at most the count of the
    /// same value in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.counts
            .iter()
            .all(|(value, &count)| count <= other.frequency(value))
    }

    /// Decrements counts by the counts of `other`.
    ///
    /// Counts may become negative; callers are responsible for only
    /// subtracting histograms that are subsets of `self`.
    pub fn subtract(&mut self, other: &Self) {
        for (&value, &count) in &other.counts {
            self.increment_by(value, -count);
        }
    }

    /// Returns the number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no value has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the distinct values in ascending order.
    pub fn values(&self) -> impl Iterator<Item = K> + '_ {
        self.counts.keys().copied()
    }

    /// Returns `(value, count)` pairs in ascending value order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (K, i64)> + '_ {
        self.counts.iter().map(|(&v, &c)| (v, c))
    }

    /// Returns the value with the largest count.
    ///
    /// Ties are resolved in favor of the smallest value.
    #[must_use]
    pub fn mode(&self) -> Option<K> {
        let mut best: Option<(K, i64)> = None;
        for (value, count) in self.iter() {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value)
    }

    /// Returns up to `n` of the largest values with their counts, largest first.
    #[must_use]
    pub fn largest(&self, n: usize) -> Vec<(K, i64)> {
        self.iter().rev().take(n).collect()
    }

    /// Returns up to `n` of the smallest values with their counts, smallest first.
    #[must_use]
    pub fn smallest(&self, n: usize) -> Vec<(K, i64)> {
        self.iter().take(n).collect()
    }

    /// Returns parallel sequences of values and counts, suitable for a bar plot.
    #[must_use]
    pub fn render(&self) -> (Vec<K>, Vec<i64>) {
        self.iter().unzip()
    }
}

impl<K> FromIterator<K> for Histogram<K>
where
    K: Ord + Copy,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut hist = Self::new();
        hist.extend(iter);
        hist
    }
}

impl<K> Extend<K> for Histogram<K>
where
    K: Ord + Copy,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for value in iter {
            self.increment(value);
        }
    }
}

impl<'a, K> IntoIterator for &'a Histogram<K> {
    type Item = (&'a K, &'a i64);
    type IntoIter = btree_map::Iter<'a, K, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_observations() {
        let hist = Histogram::from_values([1, 2, 2, 3, 5]);
        assert_eq!(hist.frequency(&1), 1);
        assert_eq!(hist.frequency(&2), 2);
        assert_eq!(hist.frequency(&3), 1);
        assert_eq!(hist.frequency(&5), 1);
        assert_eq!(hist.total(), 5);
        assert_eq!(hist.len(), 4);
    }

    #[test]
    fn test_absent_value_has_zero_count() {
        let hist = Histogram::from_values([1, 1]);
        assert_eq!(hist.frequency(&9), 0);
        assert_eq!(hist.frequencies(&[1, 9]), vec![2, 0]);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let a = Histogram::from_values([3, 1, 2, 1]);
        let b = Histogram::from_values([1, 1, 2, 3]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_subset_and_subtract() {
        let mut big = Histogram::from_values([1, 1, 2, 3]);
        let small = Histogram::from_values([1, 3]);
        assert!(small.is_subset_of(&big));
        assert!(!big.is_subset_of(&small));

        big.subtract(&small);
        assert_eq!(big.frequency(&1), 1);
        assert_eq!(big.frequency(&3), 0);
        assert_eq!(big.total(), 2);
    }

    #[test]
    fn test_subtract_can_go_negative() {
        let mut hist = Histogram::from_values([1]);
        hist.subtract(&Histogram::from_values([1, 1, 4]));
        assert_eq!(hist.frequency(&1), -1);
        assert_eq!(hist.frequency(&4), -1);
    }

    #[test]
    fn test_mode_prefers_smallest_on_ties() {
        let hist = Histogram::from_values([5, 5, 2, 2, 7]);
        assert_eq!(hist.mode(), Some(2));
        assert_eq!(Histogram::<i32>::new().mode(), None);
    }

    #[test]
    fn test_largest_and_smallest() {
        let hist = Histogram::from_values([4, 1, 9, 9, 3]);
        assert_eq!(hist.largest(2), vec![(9, 2), (4, 1)]);
        assert_eq!(hist.smallest(2), vec![(1, 1), (3, 1)]);
    }

    #[test]
    fn test_render_is_sorted() {
        let hist = Histogram::from_values([3, 1, 3]);
        assert_eq!(hist.render(), (vec![1, 3], vec![1, 2]));
    }
}
