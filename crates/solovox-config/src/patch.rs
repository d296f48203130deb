//! Patch file format and operations.

use serde::{Deserialize, Serialize};
use solovox_core::{EnvelopeParams, Waveform};
use solovox_synth::SynthParams;
use std::path::Path;

use crate::error::ConfigError;

/// A synthesizer patch: every constant fixed at initialization.
///
/// # TOML Format
///
/// ```toml
/// name = "warm lead"
/// sample_rate = 44100
/// block_size = 64
///
/// [oscillator]
/// waveform = "triangle"
///
/// [envelope]
/// attack = 0.1
/// decay = 0.0
/// sustain = 1.0
/// release = 0.1
///
/// [filter]
/// cutoff = 500.0
/// control_min = 100.0
/// control_max = 5100.0
///
/// [output]
/// pull_buffer_frames = 2048
/// ```
///
/// Every section is optional; omitted fields take the defaults above.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patch {
    /// Name of the patch.
    pub name: String,

    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Frames rendered per block.
    #[serde(default = "default_block_size")]
    pub block_size: u32,

    /// Oscillator settings.
    #[serde(default)]
    pub oscillator: OscillatorConfig,

    /// Envelope timings and sustain level.
    #[serde(default)]
    pub envelope: EnvelopeConfig,

    /// Filter cutoff and controller mapping.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Delivery settings.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_sample_rate() -> u32 {
    44100
}

fn default_block_size() -> u32 {
    64
}

/// Oscillator section of a patch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OscillatorConfig {
    /// Waveform to read from the table bank.
    #[serde(default)]
    pub waveform: WaveformName,
}

/// Waveform names accepted in patch files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WaveformName {
    /// Pure fundamental tone.
    Sine,
    /// Descending ramp, all harmonics.
    Sawtooth,
    /// Folded ramp, odd harmonics only.
    #[default]
    Triangle,
}

impl From<WaveformName> for Waveform {
    fn from(name: WaveformName) -> Self {
        match name {
            WaveformName::Sine => Waveform::Sine,
            WaveformName::Sawtooth => Waveform::Sawtooth,
            WaveformName::Triangle => Waveform::Triangle,
        }
    }
}

/// Envelope section of a patch. Durations in seconds, sustain in `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EnvelopeConfig {
    /// Seconds to ramp 0 → 1 after note-on.
    pub attack: f32,
    /// Seconds to ramp 1 → sustain.
    pub decay: f32,
    /// Level held while the note is gated.
    pub sustain: f32,
    /// Seconds to ramp down after note-off.
    pub release: f32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            attack: 0.1,
            decay: 0.0,
            sustain: 1.0,
            release: 0.1,
        }
    }
}

/// Filter section of a patch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FilterConfig {
    /// Cutoff before any controller movement, in Hz.
    pub cutoff: f32,
    /// Cutoff mapped to controller value 0, in Hz.
    pub control_min: f32,
    /// Cutoff mapped to controller value 127, in Hz.
    pub control_max: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            cutoff: 500.0,
            control_min: 100.0,
            control_max: 5100.0,
        }
    }
}

/// Delivery section of a patch.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Frames per queued buffer in pull mode.
    pub pull_buffer_frames: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pull_buffer_frames: 2048,
        }
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            sample_rate: default_sample_rate(),
            block_size: default_block_size(),
            oscillator: OscillatorConfig::default(),
            envelope: EnvelopeConfig::default(),
            filter: FilterConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Patch {
    /// Load and validate a patch from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let patch: Patch = toml::from_str(&content)?;
        patch.validate()?;
        Ok(patch)
    }

    /// Save the patch to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
    }

    /// Check every field against its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_rate == 0 {
            return Err(ConfigError::invalid("sample_rate", "must be positive"));
        }
        if self.block_size == 0 {
            return Err(ConfigError::invalid("block_size", "must be positive"));
        }
        if self.output.pull_buffer_frames == 0 {
            return Err(ConfigError::invalid(
                "output.pull_buffer_frames",
                "must be positive",
            ));
        }

        let env = &self.envelope;
        for (field, value) in [
            ("envelope.attack", env.attack),
            ("envelope.decay", env.decay),
            ("envelope.release", env.release),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(field, format!("{value} is not a non-negative duration")));
            }
        }
        if !(0.0..=1.0).contains(&env.sustain) {
            return Err(ConfigError::invalid(
                "envelope.sustain",
                format!("{} must be within [0, 1]", env.sustain),
            ));
        }

        let nyquist = self.sample_rate as f32 / 2.0;
        let filter = &self.filter;
        for (field, value) in [
            ("filter.cutoff", filter.cutoff),
            ("filter.control_min", filter.control_min),
            ("filter.control_max", filter.control_max),
        ] {
            if !value.is_finite() || value <= 0.0 || value > nyquist {
                return Err(ConfigError::invalid(
                    field,
                    format!("{value} must be within (0, {nyquist}] Hz"),
                ));
            }
        }
        if filter.control_min >= filter.control_max {
            return Err(ConfigError::invalid(
                "filter.control_min",
                "controller range must be increasing",
            ));
        }

        Ok(())
    }

    /// Convert into engine parameters.
    pub fn synth_params(&self) -> SynthParams {
        SynthParams {
            sample_rate: self.sample_rate as f32,
            waveform: self.oscillator.waveform.into(),
            envelope: EnvelopeParams {
                attack: self.envelope.attack,
                decay: self.envelope.decay,
                sustain: self.envelope.sustain,
                release: self.envelope.release,
            },
            initial_cutoff: self.filter.cutoff,
            cutoff_min: self.filter.control_min,
            cutoff_max: self.filter.control_max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_patch_matches_engine_defaults() {
        let patch = Patch::default();
        assert!(patch.validate().is_ok());

        let params = patch.synth_params();
        assert_eq!(params, SynthParams::default());
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patch.toml");

        let mut patch = Patch::default();
        patch.name = "bright saw".to_string();
        patch.oscillator.waveform = WaveformName::Sawtooth;
        patch.envelope.sustain = 0.6;
        patch.filter.cutoff = 2000.0;

        patch.save(&path).unwrap();
        let loaded = Patch::load(&path).unwrap();
        assert_eq!(loaded, patch);
    }

    #[test]
    fn sparse_files_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sparse.toml");
        std::fs::write(&path, "name = \"just a name\"\n").unwrap();

        let patch = Patch::load(&path).unwrap();
        assert_eq!(patch.sample_rate, 44100);
        assert_eq!(patch.block_size, 64);
        assert_eq!(patch.oscillator.waveform, WaveformName::Triangle);
        assert_eq!(patch.envelope, EnvelopeConfig::default());
    }

    #[test]
    fn waveform_names_parse_lowercase() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wave.toml");
        std::fs::write(&path, "name = \"s\"\n[oscillator]\nwaveform = \"sine\"\n").unwrap();

        let patch = Patch::load(&path).unwrap();
        assert_eq!(patch.oscillator.waveform, WaveformName::Sine);
        assert_eq!(Waveform::from(patch.oscillator.waveform), Waveform::Sine);
    }

    #[test]
    fn rejects_out_of_range_sustain() {
        let mut patch = Patch::default();
        patch.envelope.sustain = 1.5;
        let err = patch.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "envelope.sustain", .. }
        ));
    }

    #[test]
    fn rejects_non_positive_cutoff() {
        let mut patch = Patch::default();
        patch.filter.cutoff = 0.0;
        assert!(patch.validate().is_err());

        patch.filter.cutoff = -100.0;
        assert!(patch.validate().is_err());
    }

    #[test]
    fn rejects_inverted_controller_range() {
        let mut patch = Patch::default();
        patch.filter.control_min = 6000.0;
        patch.filter.control_max = 100.0;
        assert!(patch.validate().is_err());
    }

    #[test]
    fn rejects_cutoff_past_nyquist() {
        let mut patch = Patch::default();
        patch.sample_rate = 8000;
        patch.filter.control_max = 5100.0; // above 4000 Hz nyquist
        assert!(patch.validate().is_err());
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = Patch::load("/nonexistent/patch.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/patch.toml"));
    }
}
