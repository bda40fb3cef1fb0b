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
//! # spectral-beat-detector
//!
//! Detects beats in spectral audio frames and classifies them as low, mid, or
//! high beats. It is a `no_std` library (it needs `alloc`) that is meant to be
//! called once per analysis frame, e.g., from the audio callback of a game
//! engine or a light show.
//!
//! ## How it works
//!
//! The magnitude spectrum of each frame is split into equally wide frequency
//! bands. Every band keeps rolling statistics of its energy over the last
//! frames. A band votes for a beat class if its current energy is well above
//! its rolling average; the [`DetectorConfig`] decides how far above
//! (threshold percentage) and how many votes make a beat (cutoff). After a
//! class fired, it stays silent for a short refractory period.
//!
//! The FFT isn't part of this crate: plug in your own via
//! [`SpectrumTransform`], or use [`IdentityTransform`] if you already have the
//! magnitudes.
//!
//! ## Example
//! ```rust
//! use spectral_beat_detector::{BeatClass, BeatDetector, BeatRecorder, DetectorConfig, IdentityTransform};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut detector = BeatDetector::new(DetectorConfig::default(), IdentityTransform)?;
//! let mut recorder = BeatRecorder::new();
//!
//! // Regularly call this with the spectrum of the latest audio frame.
//! let spectrum = [0.0_f32; 1024];
//! detector.process(&spectrum, &mut recorder)?;
//!
//! if recorder.fired(BeatClass::Low) {
//!     println!("kick! energy={}", recorder.energy(BeatClass::Low));
//! }
//! # Ok(())
//! # }
//! ```

#![no_std]
#![deny(
    clippy::all,
    clippy::cargo,
    clippy::nursery,
    clippy::must_use_candidate,
    // clippy::restriction,
    // clippy::pedantic
)]
// now allow a few rules which are denied by the above statement
// --> they are ridiculous and not necessary
#![allow(
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::fallible_impl_from
)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![deny(rustdoc::all)]

extern crate alloc;

#[cfg_attr(test, macro_use)]
#[cfg(test)]
extern crate std;

#[cfg_attr(test, macro_use)]
#[cfg(test)]
extern crate assert2;

#[cfg_attr(test, macro_use)]
#[cfg(test)]
extern crate float_cmp;

mod band_history;
mod beat_class;
mod beat_detector;
mod config;
mod float;
mod rolling_stats;
mod sink;
mod transform;

pub use band_history::BandEnergyHistory;
pub use beat_class::{BeatClass, PerClass};
pub use beat_detector::{BeatDetector, FrameBeats, ProcessError};
pub use config::{
    ConfigError, DetectorConfig, DetectorConfigBuilder, DEFAULT_BAND_COUNT, DEFAULT_CUTOFFS,
    DEFAULT_DECIBEL_CUTOFF, DEFAULT_FRAME_SIZE, DEFAULT_HISTORY_LENGTH,
    DEFAULT_REFRACTORY_FRAMES, DEFAULT_THRESHOLDS,
};
pub use float::Float;
pub use rolling_stats::RollingStatsWindow;
pub use sink::{BeatRecorder, BeatSink};
pub use transform::{IdentityTransform, SpectrumTransform};
