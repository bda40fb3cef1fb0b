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
//! Module for [`BeatDetector`].
//!
//! The detector consumes one frame per call to [`BeatDetector::process`]:
//!
//! 1. Classes that fired recently cool down by one frame.
//! 2. The [`SpectrumTransform`] turns the frame into a magnitude spectrum.
//! 3. The spectrum is binned into bands and each band's energy is added to
//!    its rolling history.
//! 4. Every band votes for every [`BeatClass`] whose threshold its energy
//!    exceeds. The threshold of a band is
//!    `variance / average + average * threshold_percent / 100`.
//! 5. A class that is not cooling down fires if more than `cutoff / 2` bands
//!    voted for it. The reported energy is the sum of all band energies.

use crate::band_history::BandEnergyHistory;
use crate::beat_class::PerClass;
use crate::config::{ConfigError, DetectorConfig};
use crate::{BeatClass, BeatSink, Float, RollingStatsWindow, SpectrumTransform};
use alloc::vec::Vec;
use thiserror::Error;

/// Possible errors of [`BeatDetector::process`].
#[derive(Debug, Error)]
pub enum ProcessError<E> {
    /// The frame doesn't have the configured frame size. Nothing was
    /// processed.
    #[error("expected a frame of {expected} samples, got {got}")]
    InvalidFrameLength {
        /// The configured frame size.
        expected: usize,
        /// The length of the provided frame.
        got: usize,
    },
    /// The spectrum transform reported an error.
    #[error("the spectrum transform failed")]
    Transform(#[source] E),
}

/// The classes that fired in one frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameBeats(PerClass<bool>);

impl FrameBeats {
    /// Whether the class fired.
    #[must_use]
    pub fn fired(&self, class: BeatClass) -> bool {
        self.0[class]
    }

    /// Whether any class fired.
    #[must_use]
    pub fn any(&self) -> bool {
        self.classes().next().is_some()
    }

    /// The classes that fired, in dispatch order.
    pub fn classes(&self) -> impl Iterator<Item = BeatClass> + '_ {
        self.0
            .iter()
            .filter(|(_, &fired)| fired)
            .map(|(class, _)| class)
    }
}

/// Beat detector that consumes one magnitude spectrum per frame and reports
/// low, mid and high beats to a [`BeatSink`].
///
/// ## Example
/// ```rust
/// use spectral_beat_detector::{BeatClass, BeatDetector, DetectorConfig, IdentityTransform};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = DetectorConfig::builder()
///     .frame_size(256)
///     .band_count(16)
///     .build()?;
/// let mut detector = BeatDetector::new(config, IdentityTransform)?;
///
/// // Regularly call this with the magnitude spectrum of the latest frame.
/// let spectrum = [0.0_f32; 256];
/// let beats = detector.process(&spectrum, &mut |class: BeatClass, energy: f32| {
///     println!("{class} beat, energy={energy}");
/// })?;
/// assert!(!beats.any());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BeatDetector<T: Float, F: SpectrumTransform<T>> {
    config: DetectorConfig,
    transform: F,
    /// Output buffer of the transform.
    spectrum: Vec<T>,
    history: BandEnergyHistory<T>,
    /// Remaining frames each class can't fire.
    cooldowns: PerClass<usize>,
    last_fired_energies: PerClass<T>,
    frames_processed: u64,
}

impl<T: Float, F: SpectrumTransform<T>> BeatDetector<T, F> {
    /// Creates a new detector. The transform is called once per processed
    /// frame.
    pub fn new(config: DetectorConfig, transform: F) -> Result<Self, ConfigError> {
        let history = BandEnergyHistory::new(
            config.band_count(),
            config.samples_per_band(),
            config.history_length(),
        )?;
        log::debug!(
            "beat detector: {} bins in {} bands, history of {} frames, cutoffs={:?}, thresholds={:?}",
            config.frame_size(),
            config.band_count(),
            config.history_length(),
            config.cutoffs(),
            config.thresholds(),
        );
        Ok(Self {
            spectrum: alloc::vec![T::ZERO; config.frame_size()],
            history,
            cooldowns: PerClass::splat(0),
            last_fired_energies: PerClass::splat(T::ZERO),
            frames_processed: 0,
            transform,
            config,
        })
    }

    /// Processes the next frame and reports every detected beat to `sink`,
    /// in the order low, mid, high. Must be called once per frame, with
    /// frames in temporal order.
    ///
    /// The frame must have the configured frame size. Errors of the
    /// transform are passed through; in that case the cooldowns already
    /// advanced but the band history is untouched.
    pub fn process<S: BeatSink<T> + ?Sized>(
        &mut self,
        frame: &[T],
        sink: &mut S,
    ) -> Result<FrameBeats, ProcessError<F::Error>> {
        if frame.len() != self.config.frame_size() {
            return Err(ProcessError::InvalidFrameLength {
                expected: self.config.frame_size(),
                got: frame.len(),
            });
        }

        let ready = self.advance_cooldowns();

        self.transform
            .transform(frame, &mut self.spectrum)
            .map_err(ProcessError::Transform)?;
        self.history.update(&self.spectrum);
        self.frames_processed += 1;

        let votes = self.count_votes();
        let energy = self
            .history
            .energies()
            .iter()
            .fold(T::ZERO, |sum, &energy| sum + energy);

        let mut beats = FrameBeats::default();
        for class in BeatClass::ALL {
            if !ready[class] || votes[class] <= self.config.cutoffs()[class] / 2 {
                continue;
            }
            self.cooldowns[class] = self.config.refractory_frames();
            self.last_fired_energies[class] = energy;
            beats.0[class] = true;
            log::trace!(
                "frame {}: {} beat ({} votes, energy={:?})",
                self.frames_processed,
                class,
                votes[class],
                energy
            );
            sink.on_beat(class, energy);
        }
        Ok(beats)
    }

    /// Returns which classes may fire in the current frame and lets every
    /// class that is cooling down advance by one frame.
    fn advance_cooldowns(&mut self) -> PerClass<bool> {
        let mut ready = PerClass::splat(false);
        for (class, cooldown) in self.cooldowns.iter_mut() {
            ready[class] = *cooldown == 0;
            *cooldown = cooldown.saturating_sub(1);
        }
        ready
    }

    /// Number of bands whose energy exceeds the threshold of each class.
    fn count_votes(&self) -> PerClass<usize> {
        let mut votes = PerClass::splat(0);
        for (energy, window) in self.history.bands() {
            for (class, count) in votes.iter_mut() {
                if exceeds_threshold(energy, window, self.config.thresholds()[class]) {
                    *count += 1;
                }
            }
        }
        votes
    }

    /// The configuration the detector was created with.
    #[must_use]
    pub const fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// The spectrum transform.
    #[must_use]
    pub const fn transform(&self) -> &F {
        &self.transform
    }

    /// Band energies of the latest frame and their rolling statistics.
    #[must_use]
    pub const fn band_history(&self) -> &BandEnergyHistory<T> {
        &self.history
    }

    /// Number of frames the class is still cooling down.
    #[must_use]
    pub fn cooldown(&self, class: BeatClass) -> usize {
        self.cooldowns[class]
    }

    /// Whether the class may fire in the next frame.
    #[must_use]
    pub fn is_ready(&self, class: BeatClass) -> bool {
        self.cooldowns[class] == 0
    }

    /// Energy reported by the latest beat of the class, zero if it never
    /// fired.
    #[must_use]
    pub fn last_fired_energy(&self, class: BeatClass) -> T {
        self.last_fired_energies[class]
    }

    /// Number of frames that made it through the transform.
    #[must_use]
    pub const fn frames_processed(&self) -> u64 {
        self.frames_processed
    }
}

/// Whether `energy` is above the adaptive threshold of a band.
///
/// A band without energy in its history (average of zero) never votes, and
/// neither does one whose threshold isn't finite.
fn exceeds_threshold<T: Float>(energy: T, window: &RollingStatsWindow<T>, percent: u32) -> bool {
    let average = window.average();
    if average == T::ZERO {
        return false;
    }
    let factor = T::from_usize(percent as usize) / T::from_usize(100);
    let threshold = window.variance() / average + average * factor;
    threshold.is_finite() && energy > threshold
}
