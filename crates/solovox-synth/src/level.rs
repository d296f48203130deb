//! Envelope-level readout shared with visualization code.
//!
//! The level is published as f32 bits in an `AtomicU32` with relaxed
//! ordering. A UI thread reading it may observe a value one block stale;
//! that is fine, since the readout exists for meters rather than for
//! audio, and nothing in the render path ever waits on it.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Cloneable handle to the synth's current envelope level.
#[derive(Debug, Clone)]
pub struct LevelReadout {
    bits: Arc<AtomicU32>,
}

impl LevelReadout {
    pub(crate) fn new() -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(0.0f32.to_bits())),
        }
    }

    pub(crate) fn store(&self, level: f32) {
        self.bits.store(level.to_bits(), Ordering::Relaxed);
    }

    /// Read the most recently published level, in `[0, 1]`.
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readout_tracks_stores() {
        let readout = LevelReadout::new();
        assert_eq!(readout.get(), 0.0);

        readout.store(0.75);
        assert_eq!(readout.get(), 0.75);

        let clone = readout.clone();
        readout.store(0.25);
        assert_eq!(clone.get(), 0.25);
    }

    #[test]
    fn readout_is_visible_across_threads() {
        let readout = LevelReadout::new();
        let remote = readout.clone();
        readout.store(0.5);

        std::thread::spawn(move || remote.get())
            .join()
            .map(|level| assert_eq!(level, 0.5))
            .unwrap();
    }
}
