//! Driver core: initialization, the flush path, and the vblank copy.
//!
//! Three actors share each display's mid buffer:
//!
//! - The foreground flush path ([`DisplayDriver::flush`]), called by the GUI
//!   library after it paints a dirty rectangle. May block.
//! - The vblank interrupt handler ([`DisplayDriver::vblank_isr`]), which
//!   copies completed mid buffers to video memory. Never blocks.
//! - The 1 kHz tick handler ([`DisplayDriver::tick_isr`]), which touches no
//!   buffer state at all.
//!
//! The per-display lock totally orders flush writes against vblank copies,
//! so the front buffer always receives a previous complete frame or the
//! current complete frame, never a half-converted one.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::buffers::BufferPool;
use crate::color::rgb565_to_bgr555;
use crate::config::{DMA_CH_MAIN, DMA_CH_SUB};
use crate::framebuffer::FrameBuffer;
use crate::gui::GuiHooks;
use crate::platform::Platform;
use crate::region::DirtyRegion;
use crate::stats::{DriverStats, StatsSnapshot};
use crate::types::{BufferSlot, DisplayId, DriverMode, InitError, RenderMode};

/// Display driver state: the mode, the per-display buffer sets, and the
/// interrupt enable flags.
///
/// Constructed once by [`DisplayDriver::init`] and then shared: store it in a
/// `static` (e.g. a `static_cell::StaticCell`) and pass the reference to the
/// platform's tick and vblank interrupt dispatch. Every entry point takes
/// `&self`.
pub struct DisplayDriver<P: Platform> {
    platform: P,
    mode: DriverMode,
    /// Buffer sets indexed by display slot (0 = main, 1 = sub). Inactive
    /// displays stay `None` for the process lifetime.
    displays: [Option<FrameBuffer>; 2],
    /// Write-once enable flags, set by init and never reset.
    tick_enabled: bool,
    vblank_enabled: bool,
    uptime_ms: AtomicU32,
    stats: DriverStats,
}

impl<P: Platform> core::fmt::Debug for DisplayDriver<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DisplayDriver")
            .field("mode", &self.mode)
            .field("tick_enabled", &self.tick_enabled)
            .field("vblank_enabled", &self.vblank_enabled)
            .finish_non_exhaustive()
    }
}

impl<P: Platform> DisplayDriver<P> {
    /// Set up the video hardware and buffers for `mode`.
    ///
    /// On success the tick and vblank handlers are live (their enable flags
    /// are set) and the GUI library can fetch its draw buffers.
    ///
    /// Fails with [`InitError::NotImplemented`] for [`DriverMode::Tiled`]
    /// (before any hardware or buffer setup), [`InitError::OutOfMemory`] if
    /// a buffer claim fails (displays set up before the failing one are not
    /// rolled back), and [`InitError::AlreadyInitialized`] if this pool
    /// already backed an init.
    pub fn init(
        mode: DriverMode,
        pool: &'static BufferPool,
        mut platform: P,
    ) -> Result<Self, InitError> {
        pool.begin_init()?;

        if mode == DriverMode::Tiled {
            pool.cancel_init();
            return Err(InitError::NotImplemented);
        }

        let needs = mode.displays();
        let mut displays = [None, None];
        for (display, wanted) in [(DisplayId::Main, needs.main), (DisplayId::Sub, needs.sub)] {
            if !wanted {
                continue;
            }
            let Some(idx) = display.index() else { continue };
            match Self::init_display(display, pool, &mut platform) {
                Some(fb) => displays[idx] = Some(fb),
                None => {
                    pool.cancel_init();
                    return Err(InitError::OutOfMemory);
                }
            }
        }

        let driver = Self {
            platform,
            mode,
            displays,
            tick_enabled: true,
            vblank_enabled: true,
            uptime_ms: AtomicU32::new(0),
            stats: DriverStats::new(),
        };
        pool.finish_init();
        #[cfg(feature = "defmt")]
        defmt::info!("display driver ready, mode {}", mode);
        Ok(driver)
    }

    /// Configure one display's video engine and claim its buffers.
    fn init_display(
        display: DisplayId,
        pool: &'static BufferPool,
        platform: &mut P,
    ) -> Option<FrameBuffer> {
        platform.set_bitmap_mode(display);
        platform.map_vram_bank(display);
        let surface = platform.create_surface(display);
        let (mid, draw) = pool.claim(display)?;
        let channel = if display == DisplayId::Main { DMA_CH_MAIN } else { DMA_CH_SUB };
        Some(FrameBuffer::new(mid, draw, surface, channel))
    }

    /// The mode the driver was initialized with.
    pub fn mode(&self) -> DriverMode {
        self.mode
    }

    fn framebuffer(&self, display: DisplayId) -> Option<&FrameBuffer> {
        if !self.mode.supports(display) {
            return None;
        }
        self.displays[display.index()?].as_ref()
    }

    // =========================================================================
    // Queries exposed to the GUI library's display setup
    // =========================================================================

    /// Hand out `display`'s draw buffer for the GUI library to render into.
    ///
    /// The loan is permanent, so only the first call for an active display
    /// returns the buffer. Returns `None` for a display that is not active
    /// under the current mode, and always for [`BufferSlot::Second`] — the
    /// driver renders in partial mode with a single scratch buffer.
    pub fn take_draw_buffer(
        &self,
        display: DisplayId,
        slot: BufferSlot,
    ) -> Option<&'static mut [u16]> {
        match slot {
            BufferSlot::Second => None,
            BufferSlot::First => self
                .framebuffer(display)?
                .take_draw_buffer()
                .map(|buf| &mut buf[..]),
        }
    }

    /// Draw buffer size in bytes, or `0` if `display` is not active under
    /// the current mode or `slot` is the empty second slot.
    pub fn draw_buffer_size(&self, display: DisplayId, slot: BufferSlot) -> usize {
        match slot {
            BufferSlot::Second => 0,
            BufferSlot::First => {
                self.framebuffer(display).map(|fb| fb.draw_size()).unwrap_or(0)
            }
        }
    }

    /// Render mode to configure the GUI library's display with. Always
    /// partial: the driver never requires a full-frame redraw.
    pub fn render_mode(&self, _display: DisplayId) -> RenderMode {
        RenderMode::Partial
    }

    /// Snapshot of `display`'s activity counters.
    pub fn stats(&self, display: DisplayId) -> StatsSnapshot {
        display
            .index()
            .map(|idx| self.stats.snapshot(idx))
            .unwrap_or_default()
    }

    /// Milliseconds counted by the tick handler since init.
    pub fn uptime_ms(&self) -> u32 {
        self.uptime_ms.load(Ordering::Relaxed)
    }

    // =========================================================================
    // Flush path (foreground)
    // =========================================================================

    /// Copy one dirty rectangle from the GUI library's scratch buffer into
    /// `display`'s mid buffer, converting pixel format on the way.
    ///
    /// `src` holds the region's pixels tightly packed, row-major, exactly as
    /// the GUI library's flush callback delivers them; it must contain at
    /// least [`DirtyRegion::pixel_count`] pixels.
    ///
    /// Blocks while the display's copy channel drains and while the vblank
    /// handler holds the lock, so it must never be called from interrupt
    /// context. The lock is held for the whole region so a vblank copy can
    /// never observe a half-converted rectangle. Acknowledges the GUI
    /// library once the scratch buffer is free for reuse.
    pub fn flush<G: GuiHooks>(&self, gui: &G, display: DisplayId, region: DirtyRegion, src: &[u16]) {
        let Some(fb) = self.framebuffer(display) else {
            // A flush for a display this driver never set up is an upstream
            // wiring bug; ack anyway so the GUI library does not wait
            // forever on the scratch buffer.
            gui.flush_ready(display);
            return;
        };
        debug_assert!(src.len() >= region.pixel_count() as usize);

        // The previous vblank copy may still be draining this channel. The
        // mid buffer must not change under an in-flight transfer. No
        // timeout: a wedged channel is an unrecoverable hardware fault.
        while self.platform.dma_busy(fb.channel()) {
            #[cfg(feature = "defmt")]
            defmt::trace!("dma busy");
            core::hint::spin_loop();
        }

        let mut guard = fb.lock();
        let dst: &mut [u16] = &mut **guard;
        let stride = gui.horizontal_resolution(display) as usize;
        let mut s = 0;
        for y in region.y1..=region.y2 {
            let row = y as usize * stride;
            for x in region.x1..=region.x2 {
                dst[row + x as usize] = rgb565_to_bgr555(src[s]);
                s += 1;
            }
        }
        drop(guard);

        if let Some(idx) = display.index() {
            self.stats.record_flush(idx);
        }
        gui.flush_ready(display);
    }

    // =========================================================================
    // Interrupt handlers
    // =========================================================================

    /// Advance the GUI library's time base. Call once per millisecond from
    /// the platform's timer interrupt.
    pub fn tick_isr<G: GuiHooks>(&self, gui: &G) {
        if !self.tick_enabled {
            return;
        }
        self.uptime_ms.fetch_add(1, Ordering::Relaxed);
        gui.tick_advance(1);
    }

    /// Copy every idle display's mid buffer to its front buffer. Call once
    /// per vertical blank from the platform's vblank interrupt.
    ///
    /// Uses `try_lock` exclusively — this handler must never spin on a lock
    /// a preempted flush is holding. A contended display keeps its previous
    /// front-buffer contents for one more refresh.
    pub fn vblank_isr(&self) {
        if !self.vblank_enabled {
            return;
        }
        for (idx, slot) in self.displays.iter().enumerate() {
            let Some(fb) = slot else { continue };
            match fb.try_lock() {
                Some(guard) => {
                    // A busy channel here means the last transfer was never
                    // awaited; continuing would corrupt live video memory.
                    assert!(
                        !self.platform.dma_busy(fb.channel()),
                        "copy channel busy at vblank"
                    );
                    let src = guard.as_ptr();
                    // SAFETY: the mid buffer is 'static and its next writer,
                    // the flush path, waits for channel idle before taking
                    // the lock; the front pointer is this display's VRAM
                    // surface, valid for a full frame; the channel was just
                    // checked idle.
                    unsafe {
                        self.platform.dma_copy_half_words(
                            fb.channel(),
                            src,
                            fb.front_ptr(),
                            fb.mid_size(),
                        );
                    }
                    self.stats.record_transfer(idx);
                    // The guard drops now; the transfer keeps draining on
                    // its own channel.
                }
                // A held lock means a flush is mid-write: skip this display
                // for this interval instead of showing a torn frame.
                None => self.stats.record_skip(idx),
            }
        }
        // When both transfers end up in flight together, the lower-numbered
        // channel is expected to win bus priority until it completes;
        // nothing here enforces that ordering.
    }
}

// =============================================================================
// Tests
// =============================================================================
