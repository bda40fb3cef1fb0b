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
//! Module for [`BandEnergyHistory`]: splitting a spectrum into bands and
//! keeping the rolling statistics of each band.

use crate::config::ConfigError;
use crate::{Float, RollingStatsWindow};
use alloc::vec::Vec;

/// Factor every magnitude is scaled by before it is summed into its band.
const MAGNITUDE_SCALE: usize = 10;

/// Per-band energies of the latest frame together with one
/// [`RollingStatsWindow`] per band, the baseline the latest frame is
/// compared against.
#[derive(Debug)]
pub struct BandEnergyHistory<T: Float> {
    samples_per_band: usize,
    energies: Vec<T>,
    windows: Vec<RollingStatsWindow<T>>,
}

impl<T: Float> BandEnergyHistory<T> {
    /// Creates the history for `band_count` bands of `samples_per_band` bins
    /// each. Each band remembers `history_length` frames.
    pub fn new(
        band_count: usize,
        samples_per_band: usize,
        history_length: usize,
    ) -> Result<Self, ConfigError> {
        if band_count == 0 || samples_per_band == 0 {
            return Err(ConfigError::ZeroBandCount);
        }
        let windows = (0..band_count)
            .map(|_| RollingStatsWindow::new(history_length))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            samples_per_band,
            energies: alloc::vec![T::ZERO; band_count],
            windows,
        })
    }

    /// Bins the magnitude spectrum into bands, normalizes each band by its
    /// width and adds the result to the band's history.
    ///
    /// # Panics
    /// If `spectrum.len()` is not `band_count * samples_per_band`.
    pub fn update(&mut self, spectrum: &[T]) {
        self.accumulate(spectrum);
        let width = T::from_usize(self.samples_per_band);
        for (energy, window) in self.energies.iter_mut().zip(self.windows.iter_mut()) {
            *energy /= width;
            window.add_sample(*energy);
        }
    }

    /// Sums the scaled magnitudes of each band into [`Self::energies`]
    /// without normalizing them.
    pub(crate) fn accumulate(&mut self, spectrum: &[T]) {
        assert_eq!(
            spectrum.len(),
            self.band_count() * self.samples_per_band,
            "spectrum length must be band_count * samples_per_band"
        );

        let scale = T::from_usize(MAGNITUDE_SCALE);
        self.energies.fill(T::ZERO);
        for (bin, &magnitude) in spectrum.iter().enumerate() {
            let band = bin / self.samples_per_band;
            self.energies[band] += magnitude * scale;
        }
    }

    /// Number of bands.
    #[must_use]
    #[inline]
    pub fn band_count(&self) -> usize {
        self.windows.len()
    }

    /// Number of bins per band.
    #[must_use]
    #[inline]
    pub const fn samples_per_band(&self) -> usize {
        self.samples_per_band
    }

    /// Energies of the latest frame, one per band.
    #[must_use]
    #[inline]
    pub fn energies(&self) -> &[T] {
        &self.energies
    }

    /// Energy of one band in the latest frame.
    ///
    /// # Panics
    /// If `band >= band_count`.
    #[must_use]
    #[inline]
    pub fn energy(&self, band: usize) -> T {
        self.energies[band]
    }

    /// Rolling statistics of one band.
    ///
    /// # Panics
    /// If `band >= band_count`.
    #[must_use]
    #[inline]
    pub fn window(&self, band: usize) -> &RollingStatsWindow<T> {
        &self.windows[band]
    }

    /// Iterates `(energy, rolling statistics)` of all bands.
    #[must_use]
    pub fn bands(&self) -> impl Iterator<Item = (T, &RollingStatsWindow<T>)> {
        self.energies.iter().copied().zip(self.windows.iter())
    }
}
