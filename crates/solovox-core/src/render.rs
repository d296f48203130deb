//! The render seam between the signal chain and audio delivery.

/// A source of fixed-rate audio rendered one block at a time.
///
/// This is the single contract every delivery mechanism programs against:
/// the push backend calls it from the audio thread's output callback, the
/// pull scheduler calls it from its tick, and offline rendering calls it in
/// a plain loop. One command history plus one block size therefore yields
/// the same sample sequence no matter how the blocks leave the process.
///
/// # Real-Time Safety
///
/// `render_block` runs on the audio thread in the push model.
/// Implementations must not allocate, lock, block, or perform I/O, and must
/// always fill the entire buffer; there is no way to fail a block.
pub trait BlockRenderer: Send {
    /// Fill `out` with the next `out.len()` mono samples.
    fn render_block(&mut self, out: &mut [f32]);
}

impl<T: BlockRenderer + ?Sized> BlockRenderer for &mut T {
    fn render_block(&mut self, out: &mut [f32]) {
        (**self).render_block(out);
    }
}

#[cfg(feature = "std")]
impl<T: BlockRenderer + ?Sized> BlockRenderer for Box<T> {
    fn render_block(&mut self, out: &mut [f32]) {
        (**self).render_block(out);
    }
}
