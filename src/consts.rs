//! Internal constants: USB ids, report layout and command bytes.

/// ThingM vendor ID used by all blink(1) devices.
pub const BLINK1_VID: u16 = 0x27B8;
/// Product ID shared by blink(1) mk1/mk2/mk3.
pub const BLINK1_PID: u16 = 0x01ED;

// --- Feature Reports (Control Transfer) ---
pub const REPORT_ID: u8 = 0x01;
/// Report ID + 8 payload bytes.
pub const REPORT_SIZE: usize = 9;

/// Fade times are sent in 10ms units.
pub const FADE_UNIT_MS: u16 = 10;
/// Largest fade time accepted by the command encoders.
pub const MAX_FADE_MS: u16 = u16::MAX;

pub mod cmd {
    /// Fade to RGB on one or both LEDs.
    pub const FADE_TO_RGB: u8 = b'c';
    /// Start or stop pattern playback.
    pub const PLAY: u8 = b'p';
    /// Write one pattern table entry.
    pub const WRITE_PATTERN_LINE: u8 = b'P';
    /// Read one pattern table entry.
    pub const READ_PATTERN_LINE: u8 = b'R';
}

// Byte offsets inside a 9-byte report
pub mod offset {
    pub const CMD: usize = 1;
    pub const RED: usize = 2;
    pub const GREEN: usize = 3;
    pub const BLUE: usize = 4;
    pub const FADE_HIGH: usize = 5;
    pub const FADE_LOW: usize = 6;
    /// LED selector for 'c', pattern position for 'P'/'R'.
    pub const LED_OR_POS: usize = 7;
    pub const PLAY_FLAG: usize = 2;
    pub const PLAY_POS: usize = 3;
}
