//! Core driver types: display identities, driver modes, and init errors.

/// One physical output, or the tiled pseudo-display spanning both.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayId {
    /// The main (top) screen.
    Main,
    /// The sub (bottom) screen.
    Sub,
    /// Both screens composed as one tall surface. Tiled composition is not
    /// implemented; this identity only exists so queries against it can
    /// answer with the inactive sentinel.
    Tiled,
}

impl DisplayId {
    /// Slot index for the per-display tables. `None` for [`DisplayId::Tiled`],
    /// which never owns a buffer set.
    pub(crate) const fn index(self) -> Option<usize> {
        match self {
            Self::Main => Some(0),
            Self::Sub => Some(1),
            Self::Tiled => None,
        }
    }
}

/// Which displays the driver sets up. Chosen once at init, immutable for the
/// process lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverMode {
    /// Drive the main screen only.
    MainOnly,
    /// Drive the sub screen only.
    SubOnly,
    /// Drive both screens independently.
    Both,
    /// Drive both screens tiled as one surface. Rejected at init with
    /// [`InitError::NotImplemented`].
    Tiled,
}

/// Which displays a [`DriverMode`] requires.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct DisplayNeeds {
    pub main: bool,
    pub sub: bool,
}

impl DriverMode {
    /// Table mapping each mode to the displays it sets up. This table is the
    /// single source of truth for initialization and for the
    /// active-display queries.
    pub(crate) const fn displays(self) -> DisplayNeeds {
        match self {
            Self::MainOnly => DisplayNeeds { main: true, sub: false },
            Self::SubOnly => DisplayNeeds { main: false, sub: true },
            Self::Both => DisplayNeeds { main: true, sub: true },
            Self::Tiled => DisplayNeeds { main: false, sub: false },
        }
    }

    /// Whether `display` is active under this mode.
    pub(crate) const fn supports(self, display: DisplayId) -> bool {
        let needs = self.displays();
        match display {
            DisplayId::Main => needs.main,
            DisplayId::Sub => needs.sub,
            DisplayId::Tiled => matches!(self, Self::Tiled),
        }
    }
}

/// Which of the GUI library's two scratch-buffer slots is being queried.
///
/// The driver renders in partial mode with a single scratch buffer, so the
/// second slot is always empty.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferSlot {
    /// The GUI library's primary draw buffer.
    First,
    /// The optional second draw buffer, unused by this driver.
    Second,
}

/// Render mode reported to the GUI library.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderMode {
    /// Only dirty rectangles are redrawn and flushed. This driver always
    /// reports partial mode; it never requires a full-frame redraw.
    Partial,
    /// The full frame is redrawn on every update.
    Full,
}

/// Why driver initialization failed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// A buffer claim failed. Displays set up before the failing one are
    /// not rolled back.
    OutOfMemory,
    /// The requested mode is recognized but not implemented (tiled).
    NotImplemented,
    /// The driver was already initialized against this buffer pool.
    /// There is no teardown path; init happens once per process lifetime.
    AlreadyInitialized,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_table() {
        assert_eq!(DriverMode::MainOnly.displays(), DisplayNeeds { main: true, sub: false });
        assert_eq!(DriverMode::SubOnly.displays(), DisplayNeeds { main: false, sub: true });
        assert_eq!(DriverMode::Both.displays(), DisplayNeeds { main: true, sub: true });
        assert_eq!(DriverMode::Tiled.displays(), DisplayNeeds { main: false, sub: false });
    }

    #[test]
    fn test_mode_supports() {
        assert!(DriverMode::Both.supports(DisplayId::Main));
        assert!(DriverMode::Both.supports(DisplayId::Sub));
        assert!(!DriverMode::Both.supports(DisplayId::Tiled));
        assert!(!DriverMode::MainOnly.supports(DisplayId::Sub));
        assert!(!DriverMode::SubOnly.supports(DisplayId::Main));
        assert!(DriverMode::Tiled.supports(DisplayId::Tiled));
    }

    #[test]
    fn test_display_index() {
        assert_eq!(DisplayId::Main.index(), Some(0));
        assert_eq!(DisplayId::Sub.index(), Some(1));
        assert_eq!(DisplayId::Tiled.index(), None);
    }
}
