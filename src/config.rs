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
//! Module for [`DetectorConfig`] and its builder.
//!
//! All values are validated once in [`DetectorConfigBuilder::build`]. A
//! [`DetectorConfig`] that exists is always consistent, so the per-frame
//! code never has to check it again.

use crate::beat_class::PerClass;
use thiserror::Error;

/// Default length of a spectrum, i.e., of one frame.
pub const DEFAULT_FRAME_SIZE: usize = 1024;
/// Default number of frequency bands.
pub const DEFAULT_BAND_COUNT: usize = 64;
/// Default number of frames in each band's history.
pub const DEFAULT_HISTORY_LENGTH: usize = 40;
/// Default of the reserved decibel cutoff.
pub const DEFAULT_DECIBEL_CUTOFF: f32 = 125.0;
/// Default vote cutoffs for low, mid and high beats.
pub const DEFAULT_CUTOFFS: PerClass<usize> = PerClass::new(4, 16, 32);
/// Default threshold percentages for low, mid and high beats.
pub const DEFAULT_THRESHOLDS: PerClass<u32> = PerClass::new(150, 130, 80);
/// Default number of frames a class stays silent after it fired.
pub const DEFAULT_REFRACTORY_FRAMES: usize = 1;

/// Possible errors when building a [`DetectorConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The frame size must be at least one bin.
    #[error("the frame size must not be zero")]
    ZeroFrameSize,
    /// At least one band is required.
    #[error("the band count must not be zero")]
    ZeroBandCount,
    /// Every band must cover the same number of bins.
    #[error("the band count ({band_count}) does not evenly divide the frame size ({frame_size})")]
    BandCountMismatch {
        /// Configured frame size.
        frame_size: usize,
        /// Configured band count.
        band_count: usize,
    },
    /// The rolling history needs at least one slot.
    #[error("the history length must not be zero")]
    ZeroHistoryLength,
}

/// Validated, immutable configuration of a
/// [`BeatDetector`](crate::BeatDetector).
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    frame_size: usize,
    band_count: usize,
    history_length: usize,
    decibel_cutoff: f32,
    cutoffs: PerClass<usize>,
    thresholds: PerClass<u32>,
    refractory_frames: usize,
}

impl DetectorConfig {
    /// Returns a builder initialized with the defaults.
    #[must_use]
    pub fn builder() -> DetectorConfigBuilder {
        DetectorConfigBuilder::new()
    }

    /// Number of bins in one frame and in its spectrum.
    #[must_use]
    pub const fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Number of frequency bands the spectrum is split into.
    #[must_use]
    pub const fn band_count(&self) -> usize {
        self.band_count
    }

    /// Number of bins that make up one band.
    #[must_use]
    pub const fn samples_per_band(&self) -> usize {
        self.frame_size / self.band_count
    }

    /// Number of frames each band's rolling statistics cover.
    #[must_use]
    pub const fn history_length(&self) -> usize {
        self.history_length
    }

    /// Reserved loudness cutoff in decibels. Stored for compatibility with
    /// existing configurations; the detection does not read it.
    #[must_use]
    pub const fn decibel_cutoff(&self) -> f32 {
        self.decibel_cutoff
    }

    /// Vote cutoffs. A class fires when more than `cutoff / 2` bands vote
    /// for it.
    #[must_use]
    pub const fn cutoffs(&self) -> &PerClass<usize> {
        &self.cutoffs
    }

    /// Threshold percentages applied to each band's rolling average.
    #[must_use]
    pub const fn thresholds(&self) -> &PerClass<u32> {
        &self.thresholds
    }

    /// Number of frames a class can't fire after it fired.
    #[must_use]
    pub const fn refractory_frames(&self) -> usize {
        self.refractory_frames
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
            band_count: DEFAULT_BAND_COUNT,
            history_length: DEFAULT_HISTORY_LENGTH,
            decibel_cutoff: DEFAULT_DECIBEL_CUTOFF,
            cutoffs: DEFAULT_CUTOFFS,
            thresholds: DEFAULT_THRESHOLDS,
            refractory_frames: DEFAULT_REFRACTORY_FRAMES,
        }
    }
}

/// Builder for [`DetectorConfig`].
///
/// Starts with the defaults: frame_size = 1024, band_count = 64, history_length = 40,
/// decibel_cutoff = 125, cutoffs = 4/16/32, thresholds = 150/130/80,
/// refractory_frames = 1.
#[derive(Debug, Clone)]
pub struct DetectorConfigBuilder {
    config: DetectorConfig,
}

impl DetectorConfigBuilder {
    /// Creates a builder with the default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: DetectorConfig::default(),
        }
    }

    /// Sets the number of bins per frame.
    #[must_use]
    pub const fn frame_size(mut self, frame_size: usize) -> Self {
        self.config.frame_size = frame_size;
        self
    }

    /// Sets the number of frequency bands. Must evenly divide the frame size.
    #[must_use]
    pub const fn band_count(mut self, band_count: usize) -> Self {
        self.config.band_count = band_count;
        self
    }

    /// Sets the number of frames the rolling statistics cover.
    #[must_use]
    pub const fn history_length(mut self, history_length: usize) -> Self {
        self.config.history_length = history_length;
        self
    }

    /// Sets the reserved decibel cutoff.
    #[must_use]
    pub const fn decibel_cutoff(mut self, decibel_cutoff: f32) -> Self {
        self.config.decibel_cutoff = decibel_cutoff;
        self
    }

    /// Sets the vote cutoffs of all classes.
    #[must_use]
    pub const fn cutoffs(mut self, cutoffs: PerClass<usize>) -> Self {
        self.config.cutoffs = cutoffs;
        self
    }

    /// Sets the threshold percentages of all classes.
    #[must_use]
    pub const fn thresholds(mut self, thresholds: PerClass<u32>) -> Self {
        self.config.thresholds = thresholds;
        self
    }

    /// Sets how many frames a class stays silent after it fired. `0` lets a
    /// class fire on every frame that satisfies the vote.
    #[must_use]
    pub const fn refractory_frames(mut self, frames: usize) -> Self {
        self.config.refractory_frames = frames;
        self
    }

    /// Validates the values and returns the configuration.
    pub const fn build(self) -> Result<DetectorConfig, ConfigError> {
        let config = self.config;
        if config.frame_size == 0 {
            return Err(ConfigError::ZeroFrameSize);
        }
        if config.band_count == 0 {
            return Err(ConfigError::ZeroBandCount);
        }
        if config.frame_size % config.band_count != 0 {
            return Err(ConfigError::BandCountMismatch {
                frame_size: config.frame_size,
                band_count: config.band_count,
            });
        }
        if config.history_length == 0 {
            return Err(ConfigError::ZeroHistoryLength);
        }
        Ok(config)
    }
}

impl Default for DetectorConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
