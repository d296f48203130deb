//! Patch (preset) management for solovox.
//!
//! A patch is the full set of constants the synthesizer fixes at
//! initialization: sample rate, block size, envelope timings, filter
//! cutoff and controller mapping, oscillator waveform, and the pull-mode
//! buffer length. Patches are stored as TOML files, validated on load, and
//! converted into [`solovox_synth::SynthParams`] for the engine.
//!
//! # Example
//!
//! ```rust,no_run
//! use solovox_config::Patch;
//!
//! let patch = Patch::load("warm_lead.toml").unwrap();
//! let params = patch.synth_params();
//! ```

mod error;
mod patch;

pub use error::ConfigError;
pub use patch::{EnvelopeConfig, FilterConfig, OscillatorConfig, OutputConfig, Patch, WaveformName};
