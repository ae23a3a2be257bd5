//! # blink1-hid
//!
//! A Rust crate for controlling ThingM blink(1) USB RGB notification LEDs
//! via their USB HID interface.
//!
//! This crate uses the `hidapi` crate for cross-platform USB HID communication.
//!
//! ## Features
//!
//! *   Device discovery (`find_all`), ordered by serial number.
//! *   Opening by index, serial number, HID path or first available (`DeviceSelector`).
//! *   Low-level commands in [`raw`]: fade to RGB, play/stop pattern, read/write pattern lines.
//! *   A [`Blink1`] session with timed effects:
//!     *   Solid color and fades, with optional hold durations (`set_rgb`, `fade_rgb`, `on`, `off`, `pause`).
//!     *   Two-LED alternation (`set_two_leds`).
//!     *   Rainbow sweep and random colors (`rainbow`, `random_colors`).
//!     *   Pattern playback and pattern table access (`play`, `stop`, `set_pattern_line`, `get_pattern_line`).
//! *   Hex color literals (`hex_to_rgb`) and HSV conversion (`Rgb::from_hsv`).
//!
//! ## Installation
//!
//! ```toml
//! [dependencies]
//! blink1-hid = "0.1.0"
//! log = "0.4"          # Optional, for logging
//! ```
//!
//! You also need the `hidapi` library installed on your system. See the [`hidapi` crate documentation](https://docs.rs/hidapi/) for details.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use blink1_hid::{hex_to_rgb, Blink1, DeviceSelector, Led, Result};
//! use std::time::Duration;
//!
//! fn main() -> Result<()> {
//!     let mut b = Blink1::open(DeviceSelector::First)?;
//!
//!     b.on(Some(Duration::from_secs(1)))?; // white during 1 second
//!     b.set_rgb(hex_to_rgb("#ff00f0")?, Led::Both, Some(Duration::from_secs(2)))?;
//!     b.fade_rgb(
//!         hex_to_rgb("#FA5882")?,
//!         Duration::from_millis(500),
//!         Led::Both,
//!         Some(Duration::from_secs(1)),
//!     )?;
//!     b.rainbow(Duration::from_millis(100))?;
//!
//!     b.close()
//! }
//! ```
//!
//! ## Sessions and Threads
//!
//! A [`Blink1`] owns its HID handle. It is released exactly once, by an
//! explicit [`Blink1::close`] or when the session is dropped; a failure
//! while closing from `drop` is logged and ignored. All timed effects block
//! the calling thread and cannot be cancelled.
//!
//! ## Hardware Setup Notes
//!
//! *   **Linux udev Rules:** Grant user permission to the HID device. Create `/etc/udev/rules.d/51-blink1.rules`:
//!     ```udev
//!     SUBSYSTEM=="hidraw", ATTRS{idVendor}=="27b8", ATTRS{idProduct}=="01ed", MODE="0666", GROUP="plugdev"
//!     ```
//!     Reload: `sudo udevadm control --reload-rules && sudo udevadm trigger`
//! *   **Fade resolution:** the device stores fade times in 10ms units, so
//!     fades are truncated to a multiple of 10ms on the wire.

mod blink1;
mod color;
mod consts;
pub mod device;
mod error;
pub mod raw;

pub use blink1::{Blink1, Delay, DeviceSelector, ThreadDelay, RAINBOW_STEPS};
pub use color::{hex_to_rgb, Rgb};
pub use device::{find_all, Blink1Info, DeviceDetails, HidTransport};
pub use error::{Error, Result};
pub use raw::{Led, PatternLine};
// Re-export only essential public constants
pub use consts::{BLINK1_PID, BLINK1_VID, MAX_FADE_MS};
