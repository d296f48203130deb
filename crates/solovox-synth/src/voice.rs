//! The single monophonic signal path.

use solovox_core::{
    EnvelopeGenerator, EnvelopeParams, OnePole, WAVETABLE_LEN, WavetableBank, Waveform,
    midi_to_freq,
};

/// Oscillator → envelope → filter, producing one sample per tick.
///
/// The voice owns every piece of its state (wavetable bank, phase
/// accumulator, envelope, filter history) and is only ever touched from
/// the render context. Parameter changes arrive through the setters, which
/// [`crate::MonoSynth`] calls while applying commands between blocks.
pub struct Voice {
    bank: WavetableBank,
    waveform: Waveform,
    envelope: EnvelopeGenerator,
    filter: OnePole,
    sample_rate: f32,
    pitch: u8,
    phase: usize,
}

impl Voice {
    /// Create a voice. The wavetable bank is generated here, once; nothing
    /// allocates after construction.
    pub fn new(
        sample_rate: f32,
        waveform: Waveform,
        envelope: EnvelopeParams,
        cutoff_hz: f32,
    ) -> Self {
        Self {
            bank: WavetableBank::new(),
            waveform,
            envelope: EnvelopeGenerator::new(sample_rate, envelope),
            filter: OnePole::new(sample_rate, cutoff_hz),
            sample_rate,
            pitch: 69,
            phase: 0,
        }
    }

    /// Start a note. Re-pitching while already gated is legato: the
    /// envelope keeps its place instead of restarting the attack.
    pub fn note_on(&mut self, pitch: u8) {
        self.pitch = pitch.min(127);
        self.envelope.gate_on();
    }

    /// Release the sounding note.
    pub fn note_off(&mut self) {
        self.envelope.gate_off();
    }

    /// Move the filter cutoff.
    pub fn set_cutoff(&mut self, cutoff_hz: f32) {
        self.filter.set_cutoff(cutoff_hz);
    }

    /// Select the oscillator waveform.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
    }

    /// Current envelope output in `[0, 1]`.
    pub fn envelope_level(&self) -> f32 {
        self.envelope.level()
    }

    /// Current pitch as a MIDI note number.
    pub fn pitch(&self) -> u8 {
        self.pitch
    }

    /// Current filter cutoff in Hz.
    pub fn cutoff(&self) -> f32 {
        self.filter.cutoff()
    }

    /// Current phase index into the wavetable.
    pub fn phase(&self) -> usize {
        self.phase
    }

    /// Produce the next sample and advance all per-sample state.
    #[inline]
    pub fn tick(&mut self) -> f32 {
        let freq = midi_to_freq(self.pitch);

        let raw = self.bank.table(self.waveform).at(self.phase);
        let shaped = raw * self.envelope.advance();
        let out = self.filter.process(shaped);

        let increment =
            libm::roundf(freq * WAVETABLE_LEN as f32 / self.sample_rate) as usize;
        self.phase = (self.phase + increment) % WAVETABLE_LEN;

        out
    }

    /// Fill a block by ticking once per sample.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.tick();
        }
    }
}
