use thiserror::Error;

/// Errors that can occur when using blink(1) devices.
///
/// `LibraryUnavailable` is the one-time initialization failure of the HID
/// library. `DeviceNotFound` is returned when opening a session finds no
/// match. `Hid` and `Device` cover failures of individual device calls.
#[derive(Error, Debug)]
pub enum Error {
    /// The HID library could not be initialized for this process.
    #[error("blink(1) HID library unavailable: {0}")]
    LibraryUnavailable(String),
    /// No blink(1) device matched the requested selector.
    #[error("blink(1) device not found ({selector})")]
    DeviceNotFound {
        /// Human-readable description of the selector that was used.
        selector: String,
    },
    /// Error from the underlying HID API layer.
    #[error("HID API error: {0}")]
    Hid(#[from] hidapi::HidError),
    /// Other failure reported by a device call.
    #[error("Device error: {0}")]
    Device(String),
    /// Feature report read back with an unexpected size.
    #[error("Invalid HID report received or unexpected size ({0} bytes)")]
    InvalidReport(usize),
    /// Function argument is outside the valid range.
    #[error("Argument out of range: {0}")]
    ArgumentOutOfRange(String),
    /// Color literal is not six hex digits (optionally prefixed with '#').
    #[error("Invalid color literal '{0}'")]
    InvalidColor(String),
    /// The session has already been closed.
    #[error("blink(1) session is closed")]
    Closed,
}

/// Result type alias for blink(1) operations.
pub type Result<T> = std::result::Result<T, Error>;
