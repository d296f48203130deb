//! Two-phase gate-driven envelope generator.
//!
//! Unlike a five-state ADSR machine, this generator has exactly two
//! branches selected per sample by the gate flag: the *gated* branch walks
//! attack → decay → sustain against an explicit elapsed-time accumulator,
//! and the *released* branch ramps the level down to zero. Which branch a
//! given sample takes is decided by the gate alone, so note-on/off never
//! needs to know which phase the envelope was in.
//!
//! Time is kept as a seconds accumulator advanced by a fixed per-sample
//! delta; there is no sample counting anywhere, which keeps "seconds" the
//! only time unit in the API.

/// Attack/decay/sustain/release parameters, fixed at construction.
///
/// `attack`, `decay` and `release` are durations in seconds; `sustain` is a
/// level in `[0, 1]`. A zero-length phase is simply skipped: the branch
/// conditions fall through without dividing by the zero duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeParams {
    /// Seconds to ramp 0 → 1 after gate-on.
    pub attack: f32,
    /// Seconds to ramp 1 → sustain.
    pub decay: f32,
    /// Level held while the gate stays high, in `[0, 1]`.
    pub sustain: f32,
    /// Seconds to ramp down after gate-off.
    pub release: f32,
}

impl Default for EnvelopeParams {
    fn default() -> Self {
        Self {
            attack: 0.1,
            decay: 0.0,
            sustain: 1.0,
            release: 0.1,
        }
    }
}

/// Gate-driven two-phase envelope generator.
///
/// # Example
///
/// ```rust
/// use solovox_core::{EnvelopeGenerator, EnvelopeParams};
///
/// let mut env = EnvelopeGenerator::new(44100.0, EnvelopeParams::default());
/// env.gate_on();
/// for _ in 0..4410 {
///     env.advance();
/// }
/// assert!(env.level() > 0.99); // attack of 0.1s has completed
/// env.gate_off();
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeGenerator {
    params: EnvelopeParams,
    /// Fixed per-sample time delta (1 / sample rate).
    dt: f32,
    gate: bool,
    /// Seconds elapsed in the current phase. Reset on every gate edge.
    t: f32,
    level: f32,
}

impl EnvelopeGenerator {
    /// Create a generator for the given sample rate. Sustain is clamped to
    /// `[0, 1]`; durations are clamped to be non-negative.
    pub fn new(sample_rate: f32, params: EnvelopeParams) -> Self {
        Self {
            params: EnvelopeParams {
                attack: params.attack.max(0.0),
                decay: params.decay.max(0.0),
                sustain: params.sustain.clamp(0.0, 1.0),
                release: params.release.max(0.0),
            },
            dt: 1.0 / sample_rate,
            gate: false,
            t: 0.0,
            level: 0.0,
        }
    }

    /// Raise the gate. Elapsed time resets only when the gate was low, so
    /// re-gating a sounding note (legato) does not restart the attack.
    pub fn gate_on(&mut self) {
        if !self.gate {
            self.t = 0.0;
        }
        self.gate = true;
    }

    /// Drop the gate, starting the release ramp from the current level.
    pub fn gate_off(&mut self) {
        if self.gate {
            self.t = 0.0;
        }
        self.gate = false;
    }

    /// Whether a note is currently held.
    pub fn is_gated(&self) -> bool {
        self.gate
    }

    /// Current output level in `[0, 1]`, without advancing.
    pub fn level(&self) -> f32 {
        self.level
    }

    /// The configured parameters.
    pub fn params(&self) -> EnvelopeParams {
        self.params
    }

    /// Advance by one sample and return the new level.
    ///
    /// The release ramp always falls at `sustain / release` per second: the
    /// slope is derived from the sustain level, not from the level actually
    /// reached when the gate dropped. Releasing mid-attack therefore decays
    /// from the attack level at that fixed slope rather than stretching the
    /// ramp to fill the full release time.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        let p = self.params;
        if self.gate {
            if self.t < p.attack {
                self.level += self.dt / p.attack;
            } else if self.t < p.attack + p.decay {
                self.level -= (1.0 - p.sustain) * self.dt / p.decay;
            } else {
                self.level = p.sustain;
            }
        } else if self.t < p.release {
            self.level -= p.sustain * self.dt / p.release;
        } else {
            self.level = 0.0;
        }

        self.t += self.dt;
        self.level = self.level.clamp(0.0, 1.0);
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44100.0;

    fn spec_params() -> EnvelopeParams {
        EnvelopeParams {
            attack: 0.1,
            decay: 0.0,
            sustain: 1.0,
            release: 0.1,
        }
    }

    fn run(env: &mut EnvelopeGenerator, samples: usize) {
        for _ in 0..samples {
            env.advance();
        }
    }

    #[test]
    fn attack_reaches_full_level_in_attack_time() {
        let mut env = EnvelopeGenerator::new(SAMPLE_RATE, spec_params());
        env.gate_on();
        run(&mut env, (0.1 * SAMPLE_RATE) as usize);
        assert!(env.level() >= 0.99, "got {}", env.level());
    }

    #[test]
    fn sustain_holds_indefinitely_while_gated() {
        let mut env = EnvelopeGenerator::new(SAMPLE_RATE, spec_params());
        env.gate_on();
        run(&mut env, SAMPLE_RATE as usize); // well past attack + decay
        assert_eq!(env.level(), 1.0);
        run(&mut env, SAMPLE_RATE as usize);
        assert_eq!(env.level(), 1.0);
    }

    #[test]
    fn decay_falls_to_sustain() {
        let params = EnvelopeParams {
            attack: 0.01,
            decay: 0.05,
            sustain: 0.6,
            release: 0.1,
        };
        let mut env = EnvelopeGenerator::new(SAMPLE_RATE, params);
        env.gate_on();
        run(&mut env, (0.2 * SAMPLE_RATE) as usize);
        assert!((env.level() - 0.6).abs() < 0.01, "got {}", env.level());
    }

    #[test]
    fn release_decays_linearly_to_zero() {
        let mut env = EnvelopeGenerator::new(SAMPLE_RATE, spec_params());
        env.gate_on();
        run(&mut env, SAMPLE_RATE as usize);
        let held = env.level();
        assert_eq!(held, 1.0);

        env.gate_off();
        // Halfway through the release the level is about half of sustain.
        run(&mut env, (0.05 * SAMPLE_RATE) as usize);
        assert!((env.level() - 0.5).abs() < 0.01, "got {}", env.level());

        run(&mut env, (0.05 * SAMPLE_RATE) as usize + 2);
        assert_eq!(env.level(), 0.0);

        // And it stays there.
        run(&mut env, SAMPLE_RATE as usize);
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn legato_regate_does_not_restart_attack() {
        let mut env = EnvelopeGenerator::new(SAMPLE_RATE, spec_params());
        env.gate_on();
        run(&mut env, SAMPLE_RATE as usize);
        assert_eq!(env.level(), 1.0);

        // Re-gating while held must not reset elapsed time back into attack.
        env.gate_on();
        env.advance();
        assert_eq!(env.level(), 1.0);
    }

    #[test]
    fn regate_after_release_restarts_from_zero_time() {
        let mut env = EnvelopeGenerator::new(SAMPLE_RATE, spec_params());
        env.gate_on();
        run(&mut env, SAMPLE_RATE as usize);
        env.gate_off();
        run(&mut env, SAMPLE_RATE as usize);
        assert_eq!(env.level(), 0.0);

        env.gate_on();
        run(&mut env, (0.05 * SAMPLE_RATE) as usize);
        // Half the attack elapsed: level is climbing again.
        assert!((env.level() - 0.5).abs() < 0.01, "got {}", env.level());
    }

    #[test]
    fn release_mid_attack_decays_at_sustain_slope() {
        let mut env = EnvelopeGenerator::new(SAMPLE_RATE, spec_params());
        env.gate_on();
        run(&mut env, (0.05 * SAMPLE_RATE) as usize); // half the attack
        let at_release = env.level();
        assert!((at_release - 0.5).abs() < 0.01);

        env.gate_off();
        // Slope is sustain/release = 10 per second, so ~0.05s empties the
        // remaining half-level even though release is 0.1s.
        run(&mut env, (0.06 * SAMPLE_RATE) as usize);
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn zero_length_phases_fall_through() {
        let params = EnvelopeParams {
            attack: 0.0,
            decay: 0.0,
            sustain: 0.8,
            release: 0.0,
        };
        let mut env = EnvelopeGenerator::new(SAMPLE_RATE, params);
        env.gate_on();
        env.advance();
        assert_eq!(env.level(), 0.8);

        env.gate_off();
        env.advance();
        assert_eq!(env.level(), 0.0);
    }

    #[test]
    fn level_stays_in_unit_range() {
        let mut env = EnvelopeGenerator::new(
            SAMPLE_RATE,
            EnvelopeParams {
                attack: 0.001,
                decay: 0.002,
                sustain: 0.3,
                release: 0.004,
            },
        );
        env.gate_on();
        for _ in 0..1000 {
            let level = env.advance();
            assert!((0.0..=1.0).contains(&level), "level {level}");
        }
        env.gate_off();
        for _ in 0..1000 {
            let level = env.advance();
            assert!((0.0..=1.0).contains(&level), "level {level}");
        }
    }
}
