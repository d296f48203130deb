//! Pull discipline: the caller keeps a small buffer queue ahead of playback.
//!
//! Where the push model hands the renderer to the backend's thread, the
//! pull model inverts control: the application ticks a [`PullScheduler`]
//! from its own loop, and the scheduler decides per tick whether the sink
//! needs another rendered block. Two buffers of look-ahead (one playing,
//! one queued) are enough as long as ticks arrive at least once per block
//! period.
//!
//! Blocks handed to a [`PlaybackSink`] are quantized to the 8-bit unsigned
//! encoding the original hardware path expects: samples are clamped to
//! `[0, 1]` and mapped as `byte = round(sample * 255)`.

use solovox_core::BlockRenderer;

/// Number of buffers kept in flight on the sink.
pub const QUEUE_BUFFER_COUNT: usize = 2;

/// Quantize a sample in `[0, 1]` to the sink's 8-bit unsigned encoding.
/// Out-of-range input is clamped first.
#[inline]
pub fn quantize(sample: f32) -> u8 {
    (sample.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Map an 8-bit unsigned sample back to `[0, 1]`.
#[inline]
pub fn dequantize(byte: u8) -> f32 {
    byte as f32 / 255.0
}

/// A queue of fixed-size playback buffers owned by an audio backend.
///
/// Models an OpenAL-style streaming source: buffers are queued, consumed in
/// order while the sink is playing, and reported back as completed so the
/// scheduler can replace them.
pub trait PlaybackSink {
    /// Whether the sink is currently consuming queued buffers.
    fn is_playing(&self) -> bool;

    /// Number of queued buffers fully consumed since the last reclaim.
    fn completed(&mut self) -> usize;

    /// Release `count` consumed buffers back to the scheduler.
    fn reclaim(&mut self, count: usize);

    /// Append one quantized block to the playback queue.
    fn queue(&mut self, block: &[u8]);

    /// Begin (or resume) consuming queued buffers.
    fn play(&mut self);
}

/// The pull-model buffer scheduler.
///
/// Call [`tick`](Self::tick) at least once per `block_size / sample_rate`
/// seconds. Each tick does bounded work: at most one block is rendered,
/// except when priming a stopped sink (both buffers are filled so playback
/// starts with full look-ahead).
///
/// When a tick finds more than one buffer consumed, the tick ran too slowly
/// relative to playback. That is an underrun: it is logged, the finished
/// buffers are reclaimed, and **no** replacement blocks are rendered this
/// tick; the skipped audio is dropped rather than rendered late. The next
/// tick finds the sink stopped and re-primes it.
pub struct PullScheduler<R, S> {
    renderer: R,
    sink: S,
    scratch: Vec<f32>,
    block: Vec<u8>,
    blocks_rendered: u64,
    underruns: u64,
}

impl<R: BlockRenderer, S: PlaybackSink> PullScheduler<R, S> {
    /// Create a scheduler producing blocks of `block_size` frames.
    pub fn new(renderer: R, sink: S, block_size: usize) -> Self {
        Self {
            renderer,
            sink,
            scratch: vec![0.0; block_size],
            block: vec![0; block_size],
            blocks_rendered: 0,
            underruns: 0,
        }
    }

    /// Advance real time: decide whether to render, and do so.
    pub fn tick(&mut self) {
        if !self.sink.is_playing() {
            tracing::debug!("priming playback queue");
            for _ in 0..QUEUE_BUFFER_COUNT {
                self.render_and_queue();
            }
            self.sink.play();
            return;
        }

        let completed = self.sink.completed();
        match completed {
            0 => {}
            1 => {
                self.sink.reclaim(1);
                self.render_and_queue();
            }
            n => {
                self.underruns += 1;
                tracing::warn!(
                    buffers = n,
                    "underrun: all queued buffers consumed before tick"
                );
                self.sink.reclaim(n);
            }
        }
    }

    /// Total blocks rendered so far.
    pub fn blocks_rendered(&self) -> u64 {
        self.blocks_rendered
    }

    /// Number of underrun conditions seen so far.
    pub fn underruns(&self) -> u64 {
        self.underruns
    }

    /// Borrow the sink, for inspection in tests and shutdown paths.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    fn render_and_queue(&mut self) {
        self.renderer.render_block(&mut self.scratch);
        for (byte, &sample) in self.block.iter_mut().zip(self.scratch.iter()) {
            *byte = quantize(sample);
        }
        self.sink.queue(&self.block);
        self.blocks_rendered += 1;
    }
}

/// Deterministic in-memory sink for tests and CI.
///
/// Captures every queued block and lets the test script how many buffers
/// appear consumed on the next [`completed`](PlaybackSink::completed) call.
#[derive(Debug, Default)]
pub struct MockSink {
    playing: bool,
    queued: Vec<Vec<u8>>,
    pending_completed: usize,
    reclaimed: usize,
}

impl MockSink {
    /// A stopped sink with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretend `count` queued buffers have finished playing.
    pub fn complete_buffers(&mut self, count: usize) {
        self.pending_completed = count;
    }

    /// Mark the sink stopped, as a starved backend source would.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Every block queued so far, oldest first.
    pub fn queued_blocks(&self) -> &[Vec<u8>] {
        &self.queued
    }

    /// Total buffers reclaimed by the scheduler.
    pub fn reclaimed(&self) -> usize {
        self.reclaimed
    }
}

impl PlaybackSink for MockSink {
    fn is_playing(&self) -> bool {
        self.playing
    }

    fn completed(&mut self) -> usize {
        self.pending_completed
    }

    fn reclaim(&mut self, count: usize) {
        self.pending_completed = self.pending_completed.saturating_sub(count);
        self.reclaimed += count;
    }

    fn queue(&mut self, block: &[u8]) {
        self.queued.push(block.to_vec());
    }

    fn play(&mut self) {
        self.playing = true;
    }
}
