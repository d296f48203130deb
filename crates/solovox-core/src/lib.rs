//! Solovox Core - DSP primitives for a monophonic wavetable synthesizer
//!
//! This crate provides the signal-path building blocks that run inside the
//! audio render context. Everything here is designed for real-time use:
//! no allocation, no locking, and no unbounded work per sample.
//!
//! # Components
//!
//! - [`WavetableBank`] - Precomputed cyclic tables (sine, sawtooth, triangle)
//! - [`EnvelopeGenerator`] - Two-phase gate-driven amplitude envelope
//! - [`OnePole`] - One-pole lowpass used as the voltage-controlled filter
//! - [`BlockRenderer`] - The render seam between the signal chain and
//!   whatever delivers blocks to an audio backend
//!
//! # Example
//!
//! ```rust
//! use solovox_core::{EnvelopeGenerator, EnvelopeParams, OnePole, WavetableBank, Waveform};
//!
//! let sample_rate = 44100.0;
//! let bank = WavetableBank::new();
//! let mut envelope = EnvelopeGenerator::new(sample_rate, EnvelopeParams::default());
//! let mut filter = OnePole::new(sample_rate, 500.0);
//!
//! envelope.gate_on();
//! let raw = bank.table(Waveform::Triangle).at(0);
//! let sample = filter.process(raw * envelope.advance());
//! assert!(sample.is_finite());
//! ```
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! solovox-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: no allocations or syscalls in audio processing paths
//! - **No dependencies on std**: pure `no_std` with `libm` for math
//! - **Single owner**: every type here is owned by the render context;
//!   cross-thread coordination lives outside this crate

#![cfg_attr(not(feature = "std"), no_std)]

pub mod envelope;
pub mod math;
pub mod one_pole;
pub mod render;
pub mod wavetable;

pub use envelope::{EnvelopeGenerator, EnvelopeParams};
pub use math::{flush_denormal, midi_to_freq};
pub use one_pole::{MIN_CUTOFF_HZ, OnePole};
pub use render::BlockRenderer;
pub use wavetable::{WAVETABLE_LEN, Wavetable, WavetableBank, Waveform};
