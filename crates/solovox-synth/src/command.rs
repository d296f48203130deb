//! The lock-free command channel between control and render contexts.
//!
//! Control events are translated into [`Command`] values and pushed into a
//! fixed-capacity single-producer/single-consumer ring. The render context
//! drains the ring at the start of each block. Neither side ever blocks:
//! a full ring drops the new command (observable through
//! [`CommandSender::dropped`]) rather than stalling the control path, and an
//! empty ring simply yields nothing. After construction no channel
//! operation allocates.
//!
//! The ring itself is [`rtrb`], which guarantees the acquire/release cursor
//! discipline the reader relies on; this module only fixes the policy on
//! top of it (bool-returning send, drop counting, capacity rounding).

use rtrb::{Consumer, Producer, PushError, RingBuffer};

/// Default channel capacity — far above any plausible per-block event burst.
pub const DEFAULT_COMMAND_CAPACITY: usize = 1024;

/// A discrete control message, consumed exactly once by the render context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start (or re-pitch) the note with this MIDI pitch, 0-127.
    NoteOn(u8),
    /// Release the sounding note.
    NoteOff,
    /// Continuous-controller value, 0-127, mapped to filter cutoff.
    ControlChange(u8),
}

/// Create a command channel with the given capacity (rounded up to a power
/// of two). Returns the control-side sender and render-side receiver.
pub fn command_channel(capacity: usize) -> (CommandSender, CommandReceiver) {
    let (producer, consumer) = RingBuffer::new(capacity.next_power_of_two());
    (
        CommandSender {
            producer,
            dropped: 0,
        },
        CommandReceiver { consumer },
    )
}

/// Control-context half of the channel. Exactly one thread may own this.
pub struct CommandSender {
    producer: Producer<Command>,
    dropped: u64,
}

impl CommandSender {
    /// Attempt to enqueue a command without blocking.
    ///
    /// Returns `false` and discards the command when the channel is full.
    /// That is backpressure policy, not a fault: the render context keeps
    /// producing stale-but-consistent audio and the next send proceeds
    /// normally once it has drained.
    pub fn send(&mut self, command: Command) -> bool {
        match self.producer.push(command) {
            Ok(()) => true,
            Err(PushError::Full(discarded)) => {
                self.dropped += 1;
                #[cfg(feature = "tracing")]
                tracing::debug!(?discarded, total = self.dropped, "command channel full, dropping");
                #[cfg(not(feature = "tracing"))]
                let _ = discarded;
                false
            }
        }
    }

    /// Number of commands discarded because the channel was full.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

/// Render-context half of the channel. Exactly one thread may own this.
pub struct CommandReceiver {
    consumer: Consumer<Command>,
}

impl CommandReceiver {
    /// Take the oldest pending command, if any. Never blocks.
    #[inline]
    pub fn recv(&mut self) -> Option<Command> {
        self.consumer.pop().ok()
    }
}
