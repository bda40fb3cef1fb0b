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
//! Module for [`BeatSink`], the receiver of detected beats.

use crate::beat_class::PerClass;
use crate::{BeatClass, Float};

/// Receives the beats a [`BeatDetector`](crate::BeatDetector) detects in a
/// frame.
///
/// Called synchronously from within
/// [`BeatDetector::process`](crate::BeatDetector::process), at most once per
/// class and frame, in the order low, mid, high. Implementations should
/// return quickly.
///
/// Every `FnMut(BeatClass, T)` closure is a sink.
pub trait BeatSink<T: Float> {
    /// A beat of the given class was detected. `energy` is the summed energy
    /// of all bands in the frame.
    fn on_beat(&mut self, class: BeatClass, energy: T);
}

impl<T: Float, F: FnMut(BeatClass, T)> BeatSink<T> for F {
    #[inline]
    fn on_beat(&mut self, class: BeatClass, energy: T) {
        self(class, energy)
    }
}

/// Sink that remembers which classes fired and with which energy.
///
/// The flags accumulate over calls until [`Self::clear`], so one recorder
/// can be reused across frames or reset for each one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BeatRecorder<T: Float> {
    fired: PerClass<bool>,
    energies: PerClass<T>,
}

impl<T: Float> BeatRecorder<T> {
    /// Creates a recorder with nothing recorded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fired: PerClass::splat(false),
            energies: PerClass::splat(T::ZERO),
        }
    }

    /// Whether a beat of this class was recorded.
    #[must_use]
    pub fn fired(&self, class: BeatClass) -> bool {
        self.fired[class]
    }

    /// Energy of the latest recorded beat of this class, zero if there was
    /// none.
    #[must_use]
    pub fn energy(&self, class: BeatClass) -> T {
        self.energies[class]
    }

    /// Whether any beat was recorded.
    #[must_use]
    pub fn any(&self) -> bool {
        self.fired.iter().any(|(_, &fired)| fired)
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl<T: Float> BeatSink<T> for BeatRecorder<T> {
    fn on_beat(&mut self, class: BeatClass, energy: T) {
        self.fired[class] = true;
        self.energies[class] = energy;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    fn emit<T: Float>(sink: &mut impl BeatSink<T>, class: BeatClass, energy: T) {
        sink.on_beat(class, energy);
    }

    #[test]
    fn closure_is_a_sink() {
        let mut seen = Vec::new();
        let mut sink = |class: BeatClass, energy: f32| seen.push((class, energy));
        emit(&mut sink, BeatClass::Mid, 2.0);
        emit(&mut sink, BeatClass::High, 3.0);
        check!(seen == [(BeatClass::Mid, 2.0), (BeatClass::High, 3.0)]);
    }

    #[test]
    fn recorder_tracks_classes() {
        let mut recorder = BeatRecorder::<f64>::new();
        check!(!recorder.any());

        emit(&mut recorder, BeatClass::Low, 1.5);
        check!(recorder.any());
        check!(recorder.fired(BeatClass::Low));
        check!(!recorder.fired(BeatClass::Mid));
        check!(recorder.energy(BeatClass::Low) == 1.5);
        check!(recorder.energy(BeatClass::High) == 0.0);

        recorder.clear();
        check!(recorder == BeatRecorder::new());
    }

    #[test]
    fn recorder_can_be_built_in_const_context() {
        const EMPTY: BeatRecorder<f32> = BeatRecorder::new();
        check!(!EMPTY.any());
        check!(EMPTY == BeatRecorder::default());
    }
}
