//! Seam to the GUI library.
//!
//! [`GuiHooks`] covers the three entry points the driver calls back into the
//! rendering library: advancing its millisecond time base, acknowledging a
//! finished flush so the scratch buffer can be reused, and querying the
//! horizontal resolution it renders at.

use crate::types::DisplayId;

/// Entry points the driver drives on the GUI library.
pub trait GuiHooks {
    /// Advance the GUI library's internal time base by `ms` milliseconds.
    /// Called from the 1 kHz tick interrupt.
    fn tick_advance(&self, ms: u32);

    /// Tell the GUI library the flush for `display` is complete and its
    /// scratch buffer may be reused.
    fn flush_ready(&self, display: DisplayId);

    /// Horizontal resolution the GUI library renders at for `display`.
    fn horizontal_resolution(&self, display: DisplayId) -> u32;
}

/// Severity of a GUI-library log message.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GuiLogLevel {
    /// Verbose tracing.
    Trace,
    /// Informational.
    Info,
    /// Something unexpected but recoverable.
    Warn,
    /// An operation failed.
    Error,
    /// Message emitted by application code through the GUI library.
    User,
}

/// Route a GUI-library log message to the driver's logger.
///
/// Register this as the library's print callback. With the `defmt` feature
/// disabled the message is dropped.
pub fn log_message(level: GuiLogLevel, msg: &str) {
    #[cfg(feature = "defmt")]
    match level {
        GuiLogLevel::Trace => defmt::trace!("gui: {=str}", msg),
        GuiLogLevel::Info | GuiLogLevel::User => defmt::info!("gui: {=str}", msg),
        GuiLogLevel::Warn => defmt::warn!("gui: {=str}", msg),
        GuiLogLevel::Error => defmt::error!("gui: {=str}", msg),
    }
    #[cfg(not(feature = "defmt"))]
    let _ = (level, msg);
}
