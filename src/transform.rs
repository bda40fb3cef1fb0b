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
//! Module for [`SpectrumTransform`], the seam to the caller's FFT.

use crate::Float;
use core::convert::Infallible;

/// Turns one frame of input into a magnitude spectrum of the same length.
///
/// The crate doesn't ship an FFT: plug in whatever your pipeline already
/// uses. Implementations are called exactly once per processed frame and
/// should be deterministic and cheap enough for the real-time path.
pub trait SpectrumTransform<T: Float> {
    /// Error of the underlying transform. Use [`Infallible`] if there is
    /// none.
    type Error: core::error::Error + 'static;

    /// Writes the magnitude spectrum of `input` into `output`. Both slices
    /// have the configured frame size.
    fn transform(&mut self, input: &[T], output: &mut [T]) -> Result<(), Self::Error>;
}

/// Transform that passes the frame through unchanged.
///
/// Use this if the frames you feed into the detector already are magnitude
/// spectra, e.g., because the FFT runs elsewhere.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct IdentityTransform;

impl<T: Float> SpectrumTransform<T> for IdentityTransform {
    type Error = Infallible;

    #[inline]
    fn transform(&mut self, input: &[T], output: &mut [T]) -> Result<(), Self::Error> {
        output.copy_from_slice(input);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_copies_input() {
        let input = [1.0_f32, 2.0, 3.0];
        let mut output = [0.0; 3];
        SpectrumTransform::<f32>::transform(&mut IdentityTransform, &input, &mut output).unwrap();
        check!(output == input);
    }
}
