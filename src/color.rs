//! Pixel format conversion between the GUI library and the video hardware.
//!
//! The GUI library renders RGB565 (5-6-5, red in the high bits). The bitmap
//! backgrounds scan out BGR555 (5-5-5, blue in the high bits) with bit 15 as
//! an opacity flag that must be set for the pixel to be visible.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;

/// Convert one RGB565 pixel to an opaque BGR555 pixel.
///
/// The green channel loses its least significant bit (6 bits down to 5).
#[inline]
pub const fn rgb565_to_bgr555(src: u16) -> u16 {
    ((src & 0xF800) >> 11)      // red field -> low 5 bits
        | ((src & 0x07C0) >> 1) // green field -> bits 5-9
        | ((src & 0x001F) << 10) // blue field -> bits 10-14
        | 0x8000 // opacity flag, always set
}

/// Typed variant of [`rgb565_to_bgr555`] for embedded-graphics pipelines.
#[inline]
pub fn to_vram_pixel(color: Rgb565) -> u16 {
    let raw: RawU16 = color.into();
    rgb565_to_bgr555(raw.into_inner())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_red() {
        assert_eq!(rgb565_to_bgr555(0xF800), 0x801F);
    }

    #[test]
    fn test_full_green() {
        // 6-bit green 0x07E0 drops its LSB: 5-bit green field plus opacity.
        assert_eq!(rgb565_to_bgr555(0x07E0), 0x83E0);
    }

    #[test]
    fn test_full_blue() {
        assert_eq!(rgb565_to_bgr555(0x001F), 0xFC00);
    }

    #[test]
    fn test_black_is_opaque() {
        assert_eq!(rgb565_to_bgr555(0x0000), 0x8000);
    }

    #[test]
    fn test_white() {
        assert_eq!(rgb565_to_bgr555(0xFFFF), 0xFFFF);
    }

    #[test]
    fn test_typed_matches_raw() {
        let color = Rgb565::new(31, 0, 0); // full red
        assert_eq!(to_vram_pixel(color), 0x801F);
    }
}
