//! The complete monophonic synthesizer.

use crate::command::{Command, CommandReceiver};
use crate::level::LevelReadout;
use crate::voice::Voice;
use solovox_core::{BlockRenderer, EnvelopeParams, Waveform};

/// Configuration fixed at synth construction.
///
/// Everything here is decided once at startup; commands only move the
/// note gate, the pitch, and the filter cutoff at runtime.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthParams {
    /// Output sample rate in Hz.
    pub sample_rate: f32,
    /// Oscillator waveform.
    pub waveform: Waveform,
    /// Envelope timings and sustain level.
    pub envelope: EnvelopeParams,
    /// Filter cutoff before any controller movement, in Hz.
    pub initial_cutoff: f32,
    /// Cutoff mapped to controller value 0, in Hz.
    pub cutoff_min: f32,
    /// Cutoff mapped to controller value 127, in Hz.
    pub cutoff_max: f32,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            waveform: Waveform::Triangle,
            envelope: EnvelopeParams::default(),
            initial_cutoff: 500.0,
            cutoff_min: 100.0,
            cutoff_max: 5100.0,
        }
    }
}

/// The monophonic synthesizer: one [`Voice`] plus the render end of the
/// command channel.
///
/// `MonoSynth` is the render-context owner of all signal state. Each block
/// it drains **at most one** command, which bounds per-block control work
/// to O(1) and spreads event bursts over consecutive blocks, at the cost
/// of one block period of latency per queued event. It then runs the
/// per-sample voice loop and publishes the envelope level for meters.
///
/// A new note while one is sounding simply re-pitches the voice (the
/// design is strictly monophonic), and re-gating a held note is legato:
/// the envelope does not restart.
pub struct MonoSynth {
    voice: Voice,
    commands: CommandReceiver,
    level: LevelReadout,
    cutoff_min: f32,
    cutoff_max: f32,
}

impl MonoSynth {
    /// Build the synth around the render half of a command channel.
    pub fn new(params: SynthParams, commands: CommandReceiver) -> Self {
        Self {
            voice: Voice::new(
                params.sample_rate,
                params.waveform,
                params.envelope,
                params.initial_cutoff,
            ),
            commands,
            level: LevelReadout::new(),
            cutoff_min: params.cutoff_min,
            cutoff_max: params.cutoff_max,
        }
    }

    /// A cloneable handle for reading the envelope level from other threads.
    pub fn level_readout(&self) -> LevelReadout {
        self.level.clone()
    }

    /// Direct access to the voice, for offline use and tests.
    pub fn voice_mut(&mut self) -> &mut Voice {
        &mut self.voice
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::NoteOn(pitch) => self.voice.note_on(pitch),
            Command::NoteOff => self.voice.note_off(),
            Command::ControlChange(value) => {
                let span = self.cutoff_max - self.cutoff_min;
                let cutoff = self.cutoff_min + (value.min(127) as f32 / 127.0) * span;
                self.voice.set_cutoff(cutoff);
            }
        }
    }
}

impl BlockRenderer for MonoSynth {
    fn render_block(&mut self, out: &mut [f32]) {
        if let Some(command) = self.commands.recv() {
            self.apply(command);
        }
        self.voice.render(out);
        self.level.store(self.voice.envelope_level());
    }
}
