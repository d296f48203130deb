//! Solovox Synth - the monophonic synthesis engine
//!
//! This crate connects a control context (MIDI translation, a scripted
//! phrase, a UI) to a render context (an audio callback or a buffer
//! scheduler) without sharing any lock:
//!
//! - [`Command`] / [`command_channel`] - a fixed-capacity lock-free SPSC
//!   queue carrying discrete control messages into the render context
//! - [`Voice`] - the signal path: wavetable oscillator → envelope →
//!   one-pole filter, one sample per tick
//! - [`MonoSynth`] - drains at most one command per block, renders the
//!   voice, and publishes the envelope level for visualization
//! - [`LevelReadout`] - the weakly-consistent envelope-level readout shared
//!   with UI code
//!
//! # Example
//!
//! ```rust
//! use solovox_core::BlockRenderer;
//! use solovox_synth::{Command, MonoSynth, SynthParams, command_channel};
//!
//! let (mut sender, receiver) = command_channel(1024);
//! let mut synth = MonoSynth::new(SynthParams::default(), receiver);
//!
//! // Control context: start a note.
//! assert!(sender.send(Command::NoteOn(69)));
//!
//! // Render context: produce one block.
//! let mut block = vec![0.0f32; 64];
//! synth.render_block(&mut block);
//! ```
//!
//! The only shared mutable state between the two contexts is the command
//! channel; everything the voice touches is owned by the render side, so no
//! further synchronization exists anywhere in the signal path.

pub mod command;
pub mod level;
pub mod synth;
pub mod voice;

pub use command::{Command, CommandReceiver, CommandSender, DEFAULT_COMMAND_CAPACITY, command_channel};
pub use level::LevelReadout;
pub use synth::{MonoSynth, SynthParams};
pub use voice::Voice;
