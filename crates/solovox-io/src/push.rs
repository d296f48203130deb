//! Push discipline: the backend's real-time thread drives rendering.

use crate::backend::{AudioBackend, BackendStreamConfig, StreamHandle};
use crate::Result;
use solovox_core::BlockRenderer;

/// Upper bound on frames rendered per callback invocation; the scratch
/// block is sized to this once, so the callback never allocates.
const MAX_CHUNK_FRAMES: usize = 2048;

/// Start an output stream that renders `renderer` on the backend's audio
/// thread.
///
/// Each callback renders mono blocks into a pre-allocated scratch buffer
/// and duplicates every sample across the device's channels. The callback
/// never blocks, allocates, or performs I/O; control flows into the
/// renderer only through its own lock-free channel.
///
/// The stream plays until the returned [`StreamHandle`] is dropped.
pub fn start_push_stream<R>(
    backend: &dyn AudioBackend,
    config: &BackendStreamConfig,
    mut renderer: R,
) -> Result<StreamHandle>
where
    R: BlockRenderer + 'static,
{
    let channels = (config.channels.max(1)) as usize;
    let mut scratch = vec![0.0f32; MAX_CHUNK_FRAMES];

    let callback = Box::new(move |data: &mut [f32]| {
        let mut offset = 0;
        while offset < data.len() {
            let frames = ((data.len() - offset) / channels).min(MAX_CHUNK_FRAMES);
            if frames == 0 {
                // Ragged tail shorter than one frame: silence it.
                data[offset..].fill(0.0);
                break;
            }

            let block = &mut scratch[..frames];
            renderer.render_block(block);

            let chunk = &mut data[offset..offset + frames * channels];
            for (frame, &sample) in chunk.chunks_exact_mut(channels).zip(block.iter()) {
                frame.fill(sample);
            }
            offset += frames * channels;
        }
    });

    let error_callback = Box::new(|message: &str| {
        tracing::error!(error = message, "audio stream error");
    });

    backend.build_output_stream(config, callback, error_callback)
}
