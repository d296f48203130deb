//! Math helpers shared across the signal path.

/// Convert a MIDI note number to frequency in Hz.
///
/// Equal-tempered tuning with A4 = 440 Hz = MIDI note 69.
#[inline]
pub fn midi_to_freq(note: u8) -> f32 {
    440.0 * libm::powf(2.0, (note as f32 - 69.0) / 12.0)
}

/// Flush denormal-range values to zero.
///
/// Subnormal floats cause 10-100x slowdowns on some CPUs. Filter state
/// decaying toward zero passes through the subnormal range, so recursive
/// stages flush their state on every update.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}
