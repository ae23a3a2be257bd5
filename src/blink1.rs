//! Device session and timed lighting effects.

use crate::color::Rgb;
use crate::device::{self, DeviceDetails, HidTransport};
use crate::error::{Error, Result};
use crate::raw::{self, Led, PatternLine};
use hidapi::{HidApi, HidDevice};
use log::{debug, trace, warn};
use rand::Rng;
use std::ffi::CString;
use std::fmt;
use std::time::Duration;

/// Number of hue steps swept by [`Blink1::rainbow`] (0.00, 0.02, .., 1.00).
pub const RAINBOW_STEPS: u32 = 51;

/// Blocking delay used between timed commands.
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

/// [`Delay`] backed by [`std::thread::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// How to pick the device a session opens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeviceSelector {
    /// Position in the serial-sorted device list.
    Index(usize),
    Serial(String),
    /// Platform-specific HID path.
    Path(CString),
    /// First device in the serial-sorted list.
    #[default]
    First,
}

impl DeviceSelector {
    /// Picks one selector from optional candidates, by priority index > serial > path.
    /// Falls back to [`DeviceSelector::First`].
    pub fn from_options(index: Option<usize>, serial: Option<String>, path: Option<CString>) -> Self {
        match (index, serial, path) {
            (Some(index), _, _) => Self::Index(index),
            (None, Some(serial), _) => Self::Serial(serial),
            (None, None, Some(path)) => Self::Path(path),
            (None, None, None) => Self::First,
        }
    }

    fn open(&self, hid_api: &HidApi) -> Option<HidDevice> {
        match self {
            Self::Index(index) => device::open_by_index(hid_api, *index),
            Self::Serial(serial) => device::open_by_serial(hid_api, serial),
            Self::Path(path) => device::open_by_path(hid_api, path),
            Self::First => device::open_first(hid_api),
        }
    }
}

impl fmt::Display for DeviceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "index {}", index),
            Self::Serial(serial) => write!(f, "serial '{}'", serial),
            Self::Path(path) => write!(f, "path {:?}", path),
            Self::First => write!(f, "first available"),
        }
    }
}

/// An open session with one blink(1) device.
///
/// The session owns its handle exclusively. The handle is released by
/// [`Blink1::close`] or, failing that, when the session is dropped. Closing is
/// idempotent. Every other method returns [`Error::Closed`] after close.
///
/// Timed effects block the calling thread through the session's [`Delay`];
/// there is no cancellation. Methods take `&mut self`, so a session cannot be
/// driven from two threads at once without external locking.
pub struct Blink1<D: HidTransport = HidDevice, T: Delay = ThreadDelay> {
    device: Option<D>,
    delay: T,
}

impl Blink1 {
    /// Opens a device through the process-wide HID library.
    ///
    /// The library's device list is refreshed first so devices plugged in
    /// after initialization are found.
    pub fn open(selector: DeviceSelector) -> Result<Self> {
        let mut hid_api = device::library()?;
        if let Err(e) = hid_api.refresh_devices() {
            warn!("Refreshing HID device list failed: {}", e);
        }
        Self::open_with_api(&hid_api, selector)
    }

    /// Opens a device using a caller-owned [`HidApi`].
    pub fn open_with_api(hid_api: &HidApi, selector: DeviceSelector) -> Result<Self> {
        let device = selector.open(hid_api).ok_or_else(|| Error::DeviceNotFound {
            selector: selector.to_string(),
        })?;
        debug!("Opened blink(1) by {}", selector);
        Ok(Self::from_transport(device, ThreadDelay))
    }
}

impl<D: HidTransport, T: Delay> Blink1<D, T> {
    /// Wraps an already open handle.
    pub fn from_transport(device: D, delay: T) -> Self {
        Self {
            device: Some(device),
            delay,
        }
    }

    fn device(&self) -> Result<&D> {
        self.device.as_ref().ok_or(Error::Closed)
    }

    pub fn is_closed(&self) -> bool {
        self.device.is_none()
    }

    /// Releases the device handle. Later calls do nothing.
    pub fn close(&mut self) -> Result<()> {
        match self.device.take() {
            Some(device) => device::close(device),
            None => Ok(()),
        }
    }

    /// Identity of the open device.
    pub fn details(&self) -> Result<DeviceDetails> {
        self.device()?.details()
    }

    pub fn vid(&self) -> Result<u16> {
        Ok(self.details()?.vendor_id)
    }

    pub fn pid(&self) -> Result<u16> {
        Ok(self.details()?.product_id)
    }

    pub fn serial(&self) -> Result<Option<String>> {
        Ok(self.details()?.serial_number)
    }

    fn hold(&mut self, duration: Duration) {
        trace!("Holding for {:?}", duration);
        self.delay.delay(duration);
    }

    fn fade_to(&self, color: Rgb, fade_ms: u16, led: Led) -> Result<()> {
        raw::fade_to_rgb(self.device()?, fade_ms, color.r, color.g, color.b, led)
    }

    /// Sets `led` to `color` immediately.
    ///
    /// With a hold duration, blocks for it and then turns both LEDs off.
    pub fn set_rgb(&mut self, color: Rgb, led: Led, hold: Option<Duration>) -> Result<()> {
        self.fade_to(color, 0, led)?;
        if let Some(duration) = hold {
            self.hold(duration);
            self.off(None)?;
        }
        Ok(())
    }

    /// Fades `led` to `color` over `fade`.
    ///
    /// With a hold duration, blocks for `hold + fade`, fades both LEDs back to
    /// black over `fade` and blocks another `fade` for the fade-out to finish.
    pub fn fade_rgb(
        &mut self,
        color: Rgb,
        fade: Duration,
        led: Led,
        hold: Option<Duration>,
    ) -> Result<()> {
        let fade_ms = raw::fade_millis(fade)?;
        self.fade_to(color, fade_ms, led)?;
        if let Some(duration) = hold {
            self.hold(duration + fade);
            self.fade_rgb(Rgb::BLACK, fade, Led::Both, None)?;
            self.hold(fade);
        }
        Ok(())
    }

    /// White on both LEDs. With a hold duration, turns off after it.
    pub fn on(&mut self, hold: Option<Duration>) -> Result<()> {
        self.set_rgb(Rgb::WHITE, Led::Both, hold)
    }

    /// Both LEDs off. With a hold duration, stays dark (blocking) for it.
    pub fn off(&mut self, hold: Option<Duration>) -> Result<()> {
        self.fade_to(Rgb::BLACK, 0, Led::Both)?;
        if let Some(duration) = hold {
            self.hold(duration);
        }
        Ok(())
    }

    /// Dark pause, same as `off(Some(duration))`.
    pub fn pause(&mut self, duration: Duration) -> Result<()> {
        self.off(Some(duration))
    }

    /// Shows `color_top` and `color_bottom` on the two LEDs, exchanging them
    /// on every one of `swap_count` iterations.
    ///
    /// Each iteration sets both LEDs and then blocks for `hold`, if given.
    /// With a hold duration both LEDs are turned off at the end, even when
    /// `swap_count` is zero.
    pub fn set_two_leds(
        &mut self,
        color_top: Rgb,
        color_bottom: Rgb,
        hold: Option<Duration>,
        swap_count: usize,
    ) -> Result<()> {
        self.device()?;
        let (mut first, mut second) = (Led::Top, Led::Bottom);
        for _ in 0..swap_count {
            self.fade_to(color_top, 0, first)?;
            self.fade_to(color_bottom, 0, second)?;
            if let Some(duration) = hold {
                self.hold(duration);
            }
            std::mem::swap(&mut first, &mut second);
        }
        if hold.is_some() {
            self.off(None)?;
        }
        Ok(())
    }

    /// Shows `count` random fully saturated hues, each for `hold` followed by off.
    pub fn random_colors(&mut self, count: usize, hold: Duration) -> Result<()> {
        self.random_colors_with(&mut rand::thread_rng(), count, hold)
    }

    /// [`Blink1::random_colors`] drawing hues from `rng`.
    pub fn random_colors_with<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
        hold: Duration,
    ) -> Result<()> {
        for _ in 0..count {
            let hue: f64 = rng.gen();
            let color = Rgb::from_hsv(hue, 1.0, 1.0);
            trace!("Random hue {:.3} -> {}", hue, color);
            self.set_rgb(color, Led::Both, Some(hold))?;
        }
        Ok(())
    }

    /// Sweeps the hue circle in steps of 0.02, fading to each step over
    /// `step` and blocking `step` after each fade. Ends with off.
    pub fn rainbow(&mut self, step: Duration) -> Result<()> {
        for i in 0..RAINBOW_STEPS {
            let hue = f64::from(i * 2) / 100.0;
            self.fade_rgb(Rgb::from_hsv(hue, 1.0, 1.0), step, Led::Both, None)?;
            self.hold(step);
        }
        self.off(None)
    }

    /// Starts on-device pattern playback at `pos`.
    pub fn play(&mut self, pos: u8) -> Result<()> {
        raw::play(self.device()?, true, pos)
    }

    /// Stops on-device pattern playback.
    pub fn stop(&mut self, pos: u8) -> Result<()> {
        raw::play(self.device()?, false, pos)
    }

    /// Writes one pattern table entry.
    pub fn set_pattern_line(&mut self, pos: u8, color: Rgb, fade: Duration) -> Result<()> {
        let fade_ms = raw::fade_millis(fade)?;
        raw::write_pattern_line(self.device()?, fade_ms, color.r, color.g, color.b, pos)
    }

    /// Reads one pattern table entry.
    pub fn get_pattern_line(&mut self, pos: u8) -> Result<PatternLine> {
        raw::read_pattern_line(self.device()?, pos)
    }
}

impl<D: HidTransport, T: Delay> Drop for Blink1<D, T> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Ignoring error while closing dropped blink(1) session: {}", e);
        }
    }
}

impl<D: HidTransport, T: Delay> fmt::Debug for Blink1<D, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blink1")
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}
