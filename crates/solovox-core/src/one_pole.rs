//! One-pole lowpass filter used as the voltage-controlled filter.
//!
//! A single-pole IIR lowpass with the RC-derived difference equation:
//!
//! ```text
//! rc   = 1 / (2π * fc)
//! a    = dt / (rc + dt)
//! y[n] = a * x[n] + (1 - a) * y[n-1]
//! ```
//!
//! where `dt` is the sample period. This is the simplest possible lowpass —
//! 6 dB/octave rolloff, one multiply-add per sample, unconditionally stable
//! for any positive cutoff since `a` stays in `(0, 1)`.
//!
//! # Usage
//!
//! ```rust
//! use solovox_core::OnePole;
//!
//! let mut lp = OnePole::new(44100.0, 500.0);
//! let filtered = lp.process(1.0);
//! assert!(filtered < 1.0); // attenuated above cutoff
//! ```

use crate::math::flush_denormal;
use core::f32::consts::TAU;

/// Lowest cutoff the filter will accept, in Hz.
///
/// The coefficient formula is well-behaved for any `fc > 0`, but a patch
/// file can ask for zero or negative cutoff; clamping to the bottom of the
/// audible range keeps the filter meaningful instead of silencing the
/// signal chain.
pub const MIN_CUTOFF_HZ: f32 = 20.0;

/// One-pole (6 dB/oct) lowpass filter.
///
/// # Invariants
///
/// - `coeff` is always in `(0, 1)` for stable operation
/// - `state` is flushed to zero when below the denormal threshold
#[derive(Debug, Clone)]
pub struct OnePole {
    state: f32,
    coeff: f32,
    sample_rate: f32,
    cutoff: f32,
}

impl OnePole {
    /// Create a new one-pole lowpass filter.
    ///
    /// # Arguments
    ///
    /// * `sample_rate` - Sample rate in Hz
    /// * `cutoff_hz` - Cutoff frequency in Hz, clamped to
    ///   `[MIN_CUTOFF_HZ, sample_rate / 2]`
    pub fn new(sample_rate: f32, cutoff_hz: f32) -> Self {
        let mut filter = Self {
            state: 0.0,
            coeff: 0.0,
            sample_rate,
            cutoff: cutoff_hz,
        };
        filter.set_cutoff(cutoff_hz);
        filter
    }

    /// Set the cutoff frequency and recalculate the coefficient.
    ///
    /// The value is clamped to `[MIN_CUTOFF_HZ, sample_rate / 2]`.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.cutoff = cutoff_hz.clamp(MIN_CUTOFF_HZ, self.sample_rate / 2.0);
        self.recalculate_coeff();
    }

    /// Current cutoff frequency in Hz.
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Process one sample through the lowpass filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        // y[n] = y[n-1] + a * (x[n] - y[n-1])
        self.state = flush_denormal(self.state + self.coeff * (input - self.state));
        self.state
    }

    /// Reset filter state to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    /// `a = dt / (rc + dt)` with `rc = 1 / (2π * fc)`.
    fn recalculate_coeff(&mut self) {
        let rc = 1.0 / (TAU * self.cutoff);
        let dt = 1.0 / self.sample_rate;
        self.coeff = dt / (rc + dt);
    }
}
