//! Lock-free byte-ring bridge between the pull scheduler and a callback
//! backend.
//!
//! cpal has no buffer-queue API, so the pull discipline is bridged over an
//! SPSC ring of quantized bytes: [`RingSink`] (the scheduler side)
//! implements [`PlaybackSink`] by writing whole blocks into the ring, and
//! [`RingSource`] (the audio-callback side) drains one byte per frame,
//! dequantizing on the way out. Ring capacity is exactly
//! [`QUEUE_BUFFER_COUNT`] blocks, so "free space in blocks" is the same
//! thing as "buffers consumed" on a real queueing backend.
//!
//! When the callback finds the ring empty it emits silence and marks the
//! sink stopped, exactly as a starved streaming source stops — the next
//! scheduler tick re-primes both blocks and resumes.

use crate::pull::{PlaybackSink, QUEUE_BUFFER_COUNT, dequantize};
use rtrb::{Consumer, Producer, RingBuffer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Create a connected sink/source pair for blocks of `block_size` frames.
pub fn ring_sink(block_size: usize) -> (RingSink, RingSource) {
    let (producer, consumer) = RingBuffer::new(block_size * QUEUE_BUFFER_COUNT);
    let playing = Arc::new(AtomicBool::new(false));
    (
        RingSink {
            producer,
            playing: Arc::clone(&playing),
            block_size,
        },
        RingSource { consumer, playing },
    )
}

/// Scheduler-side half: a [`PlaybackSink`] over the byte ring.
pub struct RingSink {
    producer: Producer<u8>,
    playing: Arc<AtomicBool>,
    block_size: usize,
}

impl PlaybackSink for RingSink {
    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    fn completed(&mut self) -> usize {
        // Free ring space, measured in whole blocks, is exactly how many
        // queued buffers the consumer has finished with.
        self.producer.slots() / self.block_size
    }

    fn reclaim(&mut self, _count: usize) {
        // Ring space is reclaimed implicitly as the consumer reads.
    }

    fn queue(&mut self, block: &[u8]) {
        for &byte in block {
            if self.producer.push(byte).is_err() {
                // Can only happen if the discipline queued more than the
                // ring holds; drop the rest of the block.
                tracing::warn!("playback ring full, dropping partial block");
                break;
            }
        }
    }

    fn play(&mut self) {
        self.playing.store(true, Ordering::Release);
    }
}

/// Callback-side half: drains the ring into an interleaved f32 buffer.
pub struct RingSource {
    consumer: Consumer<u8>,
    playing: Arc<AtomicBool>,
}

impl RingSource {
    /// Fill an interleaved output buffer, one queued byte per frame,
    /// duplicated across `channels`. Runs on the audio thread: no
    /// allocation, no locks.
    ///
    /// On an empty ring the remaining frames are silenced and the sink is
    /// marked stopped so the scheduler re-primes it.
    pub fn fill(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        for frame in data.chunks_mut(channels) {
            match self.consumer.pop() {
                Ok(byte) => frame.fill(dequantize(byte)),
                Err(_) => {
                    frame.fill(0.0);
                    self.playing.store(false, Ordering::Release);
                }
            }
        }
    }
}
