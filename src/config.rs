//! Display geometry and copy-channel configuration.
//!
//! Both screens share a fixed 256×192 16-bit bitmap geometry; every buffer
//! size in the driver derives from it. Each display owns a dedicated DMA
//! channel so the two full-frame copies can be in flight at the same time.

/// Horizontal resolution of each screen, in pixels.
pub const SCREEN_WIDTH: usize = 256;
/// Vertical resolution of each screen, in pixels.
pub const SCREEN_HEIGHT: usize = 192;

/// Pixels per full frame (49,152).
pub const FRAME_PIXELS: usize = SCREEN_WIDTH * SCREEN_HEIGHT;
/// Bytes per full frame at 16 bits per pixel (98,304).
pub const FRAME_BYTES: usize = FRAME_PIXELS * 2;

/// Pixels in the draw buffer handed to the GUI library (one eighth of a
/// frame — sized for partial render mode, where only dirty rectangles are
/// painted into it).
pub const DRAW_PIXELS: usize = FRAME_PIXELS / 8;
/// Bytes in the draw buffer (12,288).
pub const DRAW_BYTES: usize = DRAW_PIXELS * 2;

/// Copy channel driving the main display's mid-to-front transfer.
pub const DMA_CH_MAIN: u8 = 3;
/// Copy channel driving the sub display's mid-to-front transfer.
pub const DMA_CH_SUB: u8 = 2;

// =============================================================================
// Tests
// =============================================================================
