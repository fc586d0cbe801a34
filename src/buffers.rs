//! Static pixel-buffer storage.
//!
//! All large buffers live in statics claimed exactly once, so the driver
//! needs no allocator and a claim failure is the out-of-memory condition of
//! the init path. The pool also carries the driver's init state machine:
//! `Uninitialized -> Initializing -> Ready`, with no transition out of
//! `Ready` (there is no teardown; the driver lives for the process
//! lifetime).

use core::sync::atomic::{AtomicU8, Ordering};

use static_cell::ConstStaticCell;

use crate::config::{DRAW_PIXELS, FRAME_PIXELS};
use crate::types::{DisplayId, InitError};

/// Full-frame mid buffer: software-writable, read by the copy engine.
pub type MidBuffer = [u16; FRAME_PIXELS];
/// Scratch buffer loaned to the GUI library for partial rendering.
pub type DrawBuffer = [u16; DRAW_PIXELS];

const UNINITIALIZED: u8 = 0;
const INITIALIZING: u8 = 1;
const READY: u8 = 2;

struct DisplayCells {
    mid: ConstStaticCell<MidBuffer>,
    draw: ConstStaticCell<DrawBuffer>,
}

impl DisplayCells {
    const fn new() -> Self {
        Self {
            mid: ConstStaticCell::new([0; FRAME_PIXELS]),
            draw: ConstStaticCell::new([0; DRAW_PIXELS]),
        }
    }
}

/// Claim-once backing storage for both displays' buffers.
///
/// Declare one as a `static` and pass it to
/// [`DisplayDriver::init`](crate::DisplayDriver::init):
///
/// ```ignore
/// static POOL: BufferPool = BufferPool::new();
/// let driver = DisplayDriver::init(DriverMode::Both, &POOL, platform)?;
/// ```
pub struct BufferPool {
    state: AtomicU8,
    main: DisplayCells,
    sub: DisplayCells,
}

impl BufferPool {
    /// Create an unclaimed pool. Usable in a `static` initializer.
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(UNINITIALIZED),
            main: DisplayCells::new(),
            sub: DisplayCells::new(),
        }
    }

    /// Enter the `Initializing` state. Fails if an init already ran (or is
    /// running) against this pool.
    pub(crate) fn begin_init(&self) -> Result<(), InitError> {
        self.state
            .compare_exchange(UNINITIALIZED, INITIALIZING, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| ())
            .map_err(|_| InitError::AlreadyInitialized)
    }

    /// Leave `Initializing` after a failed init. Cells claimed by the failed
    /// attempt stay consumed; there is no rollback.
    pub(crate) fn cancel_init(&self) {
        self.state.store(UNINITIALIZED, Ordering::Release);
    }

    /// Enter `Ready` after a successful init.
    pub(crate) fn finish_init(&self) {
        self.state.store(READY, Ordering::Release);
    }

    /// Claim `display`'s mid and draw buffers. Each buffer can be claimed
    /// once per process; a second claim returns `None`.
    pub(crate) fn claim(
        &'static self,
        display: DisplayId,
    ) -> Option<(&'static mut MidBuffer, &'static mut DrawBuffer)> {
        let cells = match display {
            DisplayId::Main => &self.main,
            DisplayId::Sub => &self.sub,
            DisplayId::Tiled => return None,
        };
        let mid = cells.mid.try_take()?;
        let draw = cells.draw.try_take()?;
        Some((mid, draw))
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
