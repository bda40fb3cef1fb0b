/*
MIT License

Copyright (c) 2024 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Module for [`RollingStatsWindow`].

use crate::config::ConfigError;
use crate::Float;
use ringbuffer::{AllocRingBuffer, RingBuffer};

/// Rolling statistics over the last `M` values of one scalar series.
///
/// The average always divides by the capacity `M`, even while fewer than `M`
/// values were added: unfilled slots count as zero. The "variance" is the
/// mean absolute deviation from that average, taken over the values actually
/// stored.
#[derive(Debug)]
pub struct RollingStatsWindow<T: Float> {
    samples: AllocRingBuffer<T>,
    total_samples: usize,
    sum: T,
    average: T,
    variance: T,
}

impl<T: Float> RollingStatsWindow<T> {
    /// Creates an empty window holding up to `capacity` values.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroHistoryLength);
        }
        Ok(Self {
            samples: AllocRingBuffer::new(capacity),
            total_samples: 0,
            sum: T::ZERO,
            average: T::ZERO,
            variance: T::ZERO,
        })
    }

    /// Adds a value, evicting the oldest one once the window is full, and
    /// recomputes average and variance. Runs in `O(M)`.
    pub fn add_sample(&mut self, sample: T) {
        let evicted = if self.samples.is_full() {
            self.samples.front().copied().unwrap_or(T::ZERO)
        } else {
            T::ZERO
        };
        self.samples.push(sample);
        self.total_samples += 1;

        self.sum += sample - evicted;
        self.average = self.sum / T::from_usize(self.capacity());

        let mut deviation = T::ZERO;
        for &value in self.samples.iter() {
            deviation += (value - self.average).abs();
        }
        self.variance = deviation / T::from_usize(self.sample_count());
    }

    /// Running average: sum of the stored values divided by the capacity.
    #[inline]
    pub const fn average(&self) -> T {
        self.average
    }

    /// Mean absolute deviation of the stored values from [`Self::average`].
    ///
    /// Named "variance" because the detection thresholds are calibrated
    /// against exactly this quantity.
    #[inline]
    pub const fn variance(&self) -> T {
        self.variance
    }

    /// Number of stored values: `min(total_samples, capacity)`.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Maximum number of stored values.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.samples.capacity()
    }

    /// Number of values ever added.
    #[inline]
    pub const fn total_samples(&self) -> usize {
        self.total_samples
    }

    /// Whether `capacity` values were added at some point.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.samples.is_full()
    }

    /// Stored values, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn rejects_zero_capacity() {
        check!(RollingStatsWindow::<f32>::new(0).unwrap_err() == ConfigError::ZeroHistoryLength);
    }

    #[test]
    fn starts_empty() {
        let window = RollingStatsWindow::<f32>::new(3).unwrap();
        check!(window.sample_count() == 0);
        check!(window.average() == 0.0);
        check!(window.variance() == 0.0);
        check!(!window.is_full());
    }

    #[test]
    fn identical_values_have_no_deviation() {
        for capacity in [1, 2, 7, 40] {
            let mut window = RollingStatsWindow::<f64>::new(capacity).unwrap();
            for _ in 0..capacity {
                window.add_sample(0.3);
            }
            check!(approx_eq!(f64, window.average(), 0.3, ulps = 4));
            check!(approx_eq!(f64, window.variance(), 0.0, epsilon = 1e-12));
            check!(window.is_full());
        }
    }

    #[test]
    fn sample_count_saturates_at_capacity() {
        let mut window = RollingStatsWindow::<f32>::new(5).unwrap();
        for i in 1..=5 {
            window.add_sample(1.0);
            check!(window.sample_count() == i);
        }
        for _ in 0..100 {
            window.add_sample(2.0);
            check!(window.sample_count() == 5);
        }
        check!(window.total_samples() == 105);
        check!(window.capacity() == 5);
    }

    /// Before the window is full, empty slots pull the average down.
    #[test]
    fn average_divides_by_capacity() {
        let mut window = RollingStatsWindow::<f32>::new(4).unwrap();
        window.add_sample(8.0);
        check!(window.average() == 2.0);
        // Only the one stored value is considered: |8 - 2| / 1.
        check!(window.variance() == 6.0);

        window.add_sample(4.0);
        check!(window.average() == 3.0);
        // (|8 - 3| + |4 - 3|) / 2
        check!(window.variance() == 3.0);
    }

    #[test]
    fn evicts_oldest_value() {
        let mut window = RollingStatsWindow::<f32>::new(2).unwrap();
        window.add_sample(10.0);
        window.add_sample(20.0);
        window.add_sample(30.0);
        check!(window.iter().copied().collect::<std::vec::Vec<_>>() == [20.0, 30.0]);
        check!(window.average() == 25.0);
        check!(window.variance() == 5.0);
    }

    /// Compares the running values against a naive recomputation from the
    /// stored buffer.
    #[test]
    fn matches_naive_recomputation() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed);
        let capacity = 13;
        let mut window = RollingStatsWindow::<f64>::new(capacity).unwrap();

        for _ in 0..200 {
            window.add_sample(rng.random_range(0.0..50.0));

            let stored = window.iter().copied().collect::<std::vec::Vec<_>>();
            let naive_average = stored.iter().sum::<f64>() / capacity as f64;
            let naive_variance = stored
                .iter()
                .map(|value| (value - naive_average).abs())
                .sum::<f64>()
                / stored.len() as f64;

            check!(approx_eq!(f64, window.average(), naive_average, epsilon = 1e-9));
            check!(approx_eq!(f64, window.variance(), naive_variance, epsilon = 1e-9));
        }
    }
}
