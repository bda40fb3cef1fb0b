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
//! Feeds a synthetic drum pattern through a plain DFT into the beat detector
//! and prints every detected beat.

use log::LevelFilter;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simple_logger::SimpleLogger;
use spectral_beat_detector::{BeatClass, BeatDetector, DetectorConfig, SpectrumTransform};
use std::convert::Infallible;
use std::f32::consts::PI;

const SAMPLE_RATE_HZ: f32 = 22050.0;
const FRAME_SIZE: usize = 512;
const FRAME_COUNT: usize = 400;
/// A kick every 20 frames, roughly 129 BPM.
const KICK_EVERY: usize = 20;
/// A hi-hat on the off-beat.
const HAT_EVERY: usize = 10;

/// Magnitude spectrum via a plain DFT. Quadratic, but good enough here.
#[derive(Debug)]
struct NaiveDft {
    cos: Vec<f32>,
    sin: Vec<f32>,
}

impl NaiveDft {
    fn new(frame_size: usize) -> Self {
        let angle = |k: usize| 2.0 * PI * k as f32 / frame_size as f32;
        Self {
            cos: (0..frame_size).map(|k| angle(k).cos()).collect(),
            sin: (0..frame_size).map(|k| angle(k).sin()).collect(),
        }
    }
}

impl SpectrumTransform<f32> for NaiveDft {
    type Error = Infallible;

    fn transform(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), Self::Error> {
        let n = input.len();
        for (k, magnitude) in output.iter_mut().enumerate() {
            let (mut re, mut im) = (0.0, 0.0);
            for (t, &x) in input.iter().enumerate() {
                let idx = (k * t) % n;
                re += x * self.cos[idx];
                im -= x * self.sin[idx];
            }
            *magnitude = (re * re + im * im).sqrt() / n as f32;
        }
        Ok(())
    }
}

fn synthesize_frame(index: usize, rng: &mut StdRng, frame: &mut [f32]) {
    let kick = index % KICK_EVERY == 0;
    let hat = index % HAT_EVERY == HAT_EVERY / 2;
    for (i, sample) in frame.iter_mut().enumerate() {
        let t = (index * FRAME_SIZE + i) as f32 / SAMPLE_RATE_HZ;
        let mut value = rng.random_range(-0.02..0.02);
        if kick {
            let decay = 1.0 - i as f32 / FRAME_SIZE as f32;
            value += 0.8 * decay * (2.0 * PI * 80.0 * t).sin();
        }
        if hat {
            value += rng.random_range(-0.3..0.3);
        }
        *sample = value;
    }
    // click of the kick's beater
    if kick {
        frame[0] += 1.0;
    }
}

fn main() {
    SimpleLogger::new()
        .with_level(LevelFilter::Debug)
        .init()
        .unwrap();

    let config = DetectorConfig::builder()
        .frame_size(FRAME_SIZE)
        .band_count(64)
        .build()
        .unwrap();
    let mut detector = BeatDetector::new(config, NaiveDft::new(FRAME_SIZE)).unwrap();

    let mut rng = StdRng::seed_from_u64(1);
    let mut frame = vec![0.0; FRAME_SIZE];
    let seconds_per_frame = FRAME_SIZE as f32 / SAMPLE_RATE_HZ;
    for index in 0..FRAME_COUNT {
        synthesize_frame(index, &mut rng, &mut frame);
        let timestamp = index as f32 * seconds_per_frame;
        detector
            .process(&frame, &mut |class: BeatClass, energy: f32| {
                println!("{timestamp:6.3}s: {class:>4} beat, energy={energy:.2}");
            })
            .unwrap();
    }
}
