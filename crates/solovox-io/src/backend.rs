//! Pluggable audio backend abstraction.
//!
//! This module defines the [`AudioBackend`] trait, which decouples solovox's
//! delivery disciplines from any specific platform audio API. The default
//! implementation wraps [cpal](https://crates.io/crates/cpal), but the trait
//! is designed so alternative backends can be swapped in: host-provided
//! buffers in a plugin, a WebAudio worklet, or a deterministic mock for CI.
//!
//! The trait uses boxed closures for callbacks rather than generic
//! parameters, making it object-safe and enabling runtime backend
//! selection. Stream handles are returned as [`StreamHandle`], a type-erased
//! wrapper that stops playback on drop, which keeps platform-specific types
//! out of application code.

use crate::Result;

/// Configuration for building an audio output stream.
#[derive(Debug, Clone)]
pub struct BackendStreamConfig {
    /// Requested sample rate in Hz.
    pub sample_rate: u32,
    /// Preferred buffer size in frames.
    pub buffer_size: u32,
    /// Number of audio channels; mono renders are duplicated across them.
    pub channels: u16,
    /// Optional device name (uses system default if `None`).
    pub device_name: Option<String>,
}

impl Default for BackendStreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            buffer_size: 64,
            channels: 2,
            device_name: None,
        }
    }
}

/// Audio device information.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
}

/// Type-erased audio stream handle.
///
/// Wraps a backend-specific stream object. The stream is active while this
/// handle exists; dropping it stops playback.
pub struct StreamHandle {
    _inner: Box<dyn Send>,
}

impl StreamHandle {
    /// Create a new stream handle wrapping a backend-specific stream object.
    ///
    /// The wrapped value is kept alive until this handle is dropped.
    pub fn new<T: Send + 'static>(stream: T) -> Self {
        Self {
            _inner: Box::new(stream),
        }
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}

/// Audio output callback signature.
///
/// Called by the audio backend on the real-time audio thread. The callback
/// receives a mutable buffer of interleaved f32 samples that it must fill
/// with output audio (`[L0, R0, L1, R1, ...]` for stereo; length is
/// `frames * channels`).
///
/// ## Real-Time Safety
///
/// This callback runs on the audio thread. Implementations must not
/// allocate, lock mutexes, or perform I/O. Use lock-free structures
/// (atomics, ring buffers) to communicate with other threads.
pub type OutputCallback = Box<dyn FnMut(&mut [f32]) + Send>;

/// Error callback signature.
///
/// Called when the audio backend encounters an error during streaming.
/// The callback receives a human-readable error message.
pub type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// Pluggable audio backend trait.
///
/// Abstracts over platform audio APIs to provide a uniform interface for
/// device enumeration and output stream construction. Object-safe, so
/// backends can be selected at runtime via `Box<dyn AudioBackend>`.
pub trait AudioBackend: Send {
    /// Human-readable name of this backend (e.g., "cpal", "mock").
    fn name(&self) -> &str;

    /// List all available audio output devices.
    fn list_devices(&self) -> Result<Vec<AudioDevice>>;

    /// Get the default output device, if any.
    fn default_output_device(&self) -> Result<Option<AudioDevice>>;

    /// Build an output-only audio stream.
    ///
    /// The `callback` is invoked on the audio thread with a mutable buffer
    /// of interleaved f32 samples that must be filled with output audio.
    /// The returned [`StreamHandle`] keeps the stream alive; dropping it
    /// stops playback.
    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        callback: OutputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;
}
