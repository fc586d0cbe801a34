//! Hardware abstraction for the video core and the copy engine.
//!
//! The driver never touches registers directly; it drives these traits. A
//! target provides implementations over its video and DMA peripherals, and
//! the host tests provide an instrumented mock.

use core::ptr::NonNull;

use crate::types::DisplayId;

/// A bitmap background surface created by the video backend.
///
/// The VRAM pointer is borrowed hardware memory: the driver copies into it
/// but never allocates or frees it.
#[derive(Clone, Copy, Debug)]
pub struct Surface {
    /// Opaque id of the background layer backing this surface.
    pub id: i32,
    /// Start of the surface's pixel data in video memory.
    pub vram: NonNull<u16>,
}

/// Asynchronous memory-to-VRAM copy engine.
///
/// All methods take `&self`: the vblank interrupt handler issues transfers
/// through a shared driver reference.
pub trait CopyEngine {
    /// Whether a transfer is still running on `channel`.
    fn dma_busy(&self, channel: u8) -> bool;

    /// Queue an asynchronous halfword copy of `bytes` bytes on `channel`.
    /// Returns as soon as the transfer is started, not when it completes.
    ///
    /// # Safety
    ///
    /// `src` and `dst` must be valid for `bytes` bytes and must stay valid
    /// until [`CopyEngine::dma_busy`] reports the channel idle. The caller
    /// must not start a transfer on a busy channel.
    unsafe fn dma_copy_half_words(&self, channel: u8, src: *const u16, dst: *mut u16, bytes: usize);
}

/// Video mode and surface configuration, used only during init.
pub trait VideoBackend {
    /// Select the 16-bit bitmap video mode for `display`'s engine.
    fn set_bitmap_mode(&mut self, display: DisplayId);

    /// Map a VRAM bank as the background store for `display`.
    fn map_vram_bank(&mut self, display: DisplayId);

    /// Create the bitmap background surface scanned out on `display`.
    fn create_surface(&mut self, display: DisplayId) -> Surface;
}

/// Everything the driver needs from the target.
pub trait Platform: CopyEngine + VideoBackend {}

impl<T: CopyEngine + VideoBackend> Platform for T {}
