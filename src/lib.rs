//! Triple-buffered dual-screen framebuffer driver.
//!
//! Bridges a partial-redraw GUI library to the raw video memory of a
//! fixed-geometry (256×192) dual-display handheld. The GUI library paints
//! dirty rectangles in RGB565 into a scratch buffer; the driver converts
//! them to the hardware's opaque BGR555 and stages them in a per-display mid
//! buffer; the vertical-blank interrupt copies completed mid buffers into
//! video memory over dedicated DMA channels.
//!
//! # Architecture
//!
//! Three actors, one lock per display:
//! - [`DisplayDriver::flush`] — foreground, driven by the GUI library's
//!   flush callback; blocking acquire.
//! - [`DisplayDriver::vblank_isr`] — vertical-blank interrupt; `try_lock`
//!   only, skips a contended display for one refresh instead of blocking.
//! - [`DisplayDriver::tick_isr`] — 1 kHz time base for the GUI library; no
//!   shared buffer state.
//!
//! The displayed image is therefore always a previous complete frame or the
//! current complete frame, never a partially converted one.
//!
//! Hardware access goes through the [`platform`] traits; the GUI library is
//! reached through [`gui::GuiHooks`]. Both are mocked in the unit tests.
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test --lib
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the
//! standard test framework while the target build stays `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod buffers;
pub mod color;
pub mod config;
pub mod driver;
mod framebuffer;
pub mod gui;
pub mod platform;
pub mod region;
pub mod stats;
pub mod types;

pub use buffers::BufferPool;
pub use color::{rgb565_to_bgr555, to_vram_pixel};
pub use driver::DisplayDriver;
pub use gui::{GuiHooks, GuiLogLevel, log_message};
pub use platform::{CopyEngine, Platform, Surface, VideoBackend};
pub use region::DirtyRegion;
pub use stats::StatsSnapshot;
pub use types::{BufferSlot, DisplayId, DriverMode, InitError, RenderMode};
