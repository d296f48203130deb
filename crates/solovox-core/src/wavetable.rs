//! Precomputed cyclic waveform tables.
//!
//! The oscillator does no per-sample math beyond a table lookup: each table
//! holds one period of its waveform, sampled at [`WAVETABLE_LEN`] points and
//! generated once at startup. Tables are immutable after construction and
//! read-only from the render context.

use core::f64::consts::TAU;

/// Number of samples in one wavetable period. Power of two so phase
/// wrapping is a mask.
pub const WAVETABLE_LEN: usize = 4096;

/// Waveform shapes available in the bank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Waveform {
    /// Pure fundamental tone.
    Sine,
    /// Descending ramp, all harmonics.
    Sawtooth,
    /// Folded ramp, odd harmonics only.
    #[default]
    Triangle,
}

/// One period of a waveform, sampled at [`WAVETABLE_LEN`] points.
pub struct Wavetable {
    samples: [f32; WAVETABLE_LEN],
}

impl Wavetable {
    fn from_fn(f: impl Fn(usize) -> f32) -> Self {
        let mut samples = [0.0; WAVETABLE_LEN];
        for (i, sample) in samples.iter_mut().enumerate() {
            *sample = f(i);
        }
        Self { samples }
    }

    /// Read the table at an integer phase index, wrapping modulo the
    /// table length.
    #[inline]
    pub fn at(&self, phase: usize) -> f32 {
        self.samples[phase & (WAVETABLE_LEN - 1)]
    }
}

/// The full set of precomputed tables, built once at initialization.
pub struct WavetableBank {
    sine: Wavetable,
    sawtooth: Wavetable,
    triangle: Wavetable,
}

impl WavetableBank {
    /// Generate all tables from their waveform formulas.
    pub fn new() -> Self {
        let n = WAVETABLE_LEN as f64;
        Self {
            sine: Wavetable::from_fn(|i| libm::sin(i as f64 / n * TAU) as f32),
            sawtooth: Wavetable::from_fn(|i| 1.0 - 2.0 * (i as f32 / WAVETABLE_LEN as f32)),
            // Folded ramp in [-1, 0]: starts at -1, peaks at 0 mid-period.
            triangle: Wavetable::from_fn(|i| {
                -(-1.0 + 2.0 * i as f32 / WAVETABLE_LEN as f32).abs()
            }),
        }
    }

    /// Borrow the table for a waveform.
    #[inline]
    pub fn table(&self, waveform: Waveform) -> &Wavetable {
        match waveform {
            Waveform::Sine => &self.sine,
            Waveform::Sawtooth => &self.sawtooth,
            Waveform::Triangle => &self.triangle,
        }
    }
}

impl Default for WavetableBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sine_landmarks() {
        let bank = WavetableBank::new();
        let sine = bank.table(Waveform::Sine);
        assert!(sine.at(0).abs() < 1e-6);
        assert!((sine.at(WAVETABLE_LEN / 4) - 1.0).abs() < 1e-5);
        assert!(sine.at(WAVETABLE_LEN / 2).abs() < 1e-5);
        assert!((sine.at(3 * WAVETABLE_LEN / 4) + 1.0).abs() < 1e-5);
    }

    #[test]
    fn sawtooth_descends_from_one() {
        let bank = WavetableBank::new();
        let saw = bank.table(Waveform::Sawtooth);
        assert_eq!(saw.at(0), 1.0);
        assert_eq!(saw.at(WAVETABLE_LEN / 2), 0.0);
        assert!(saw.at(WAVETABLE_LEN - 1) < -0.99);
    }

    #[test]
    fn triangle_spans_negative_unit_range() {
        let bank = WavetableBank::new();
        let tri = bank.table(Waveform::Triangle);
        assert_eq!(tri.at(0), -1.0);
        assert_eq!(tri.at(WAVETABLE_LEN / 2), 0.0);
        for i in 0..WAVETABLE_LEN {
            let s = tri.at(i);
            assert!((-1.0..=0.0).contains(&s), "triangle[{i}] = {s}");
        }
    }

    #[test]
    fn lookup_wraps_past_table_end() {
        let bank = WavetableBank::new();
        let sine = bank.table(Waveform::Sine);
        assert_eq!(sine.at(WAVETABLE_LEN + 7), sine.at(7));
        assert_eq!(sine.at(5 * WAVETABLE_LEN), sine.at(0));
    }
}
