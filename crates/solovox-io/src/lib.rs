//! Audio delivery layer for solovox.
//!
//! This crate moves rendered blocks out of the process. Two disciplines are
//! supported over the same [`solovox_core::BlockRenderer`]:
//!
//! - **Push** ([`start_push_stream`]): the audio backend invokes a callback
//!   on its real-time thread whenever it needs a buffer; the callback runs
//!   the renderer directly into it.
//! - **Pull** ([`PullScheduler`]): the caller ticks periodically, keeping a
//!   small look-ahead queue of quantized buffers filled on a
//!   [`PlaybackSink`].
//!
//! Both disciplines produce bit-identical sample sequences for a given
//! command history and block size — only the delivery mechanism differs.
//!
//! Backend access goes through the [`AudioBackend`] trait; [`CpalBackend`]
//! is the default implementation. [`write_wav`] covers offline export.

mod backend;
mod cpal_backend;
mod pull;
mod push;
mod ring_sink;
mod wav;

pub use backend::{
    AudioBackend, AudioDevice, BackendStreamConfig, ErrorCallback, OutputCallback, StreamHandle,
};
pub use cpal_backend::CpalBackend;
pub use pull::{MockSink, PlaybackSink, PullScheduler, QUEUE_BUFFER_COUNT, dequantize, quantize};
pub use push::start_push_stream;
pub use ring_sink::{RingSink, RingSource, ring_sink};
pub use wav::write_wav;

/// Error types for audio delivery.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Audio stream setup or runtime error.
    #[error("audio stream error: {0}")]
    Stream(String),

    /// No audio output device available on the system.
    #[error("no audio output device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("device not found: {0}")]
    DeviceNotFound(String),

    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio delivery operations.
pub type Result<T> = std::result::Result<T, Error>;
