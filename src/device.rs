//! Device discovery, the process-wide HID library and the per-handle I/O seam.

use crate::consts;
use crate::error::{Error, Result};
use hidapi::{HidApi, HidDevice};
use log::{debug, trace};
use std::ffi::{CStr, CString};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

/// Per-handle I/O used by the command layer.
///
/// Implemented for [`hidapi::HidDevice`]. Any other implementation (a test
/// double, a proxy) can drive a [`crate::Blink1`] session through
/// [`crate::Blink1::from_transport`].
pub trait HidTransport {
    /// Sends one feature report. `data[0]` is the report ID.
    fn send_feature_report(&self, data: &[u8]) -> Result<()>;

    /// Reads one feature report into `buf`. `buf[0]` holds the requested report ID.
    /// Returns the number of bytes read.
    fn get_feature_report(&self, buf: &mut [u8]) -> Result<usize>;

    /// Identity of the device behind this handle.
    fn details(&self) -> Result<DeviceDetails>;

    /// Releases the handle.
    fn close(self) -> Result<()>
    where
        Self: Sized,
    {
        Ok(())
    }
}

impl HidTransport for HidDevice {
    fn send_feature_report(&self, data: &[u8]) -> Result<()> {
        HidDevice::send_feature_report(self, data)?;
        Ok(())
    }

    fn get_feature_report(&self, buf: &mut [u8]) -> Result<usize> {
        Ok(HidDevice::get_feature_report(self, buf)?)
    }

    fn details(&self) -> Result<DeviceDetails> {
        let info = self.get_device_info()?;
        Ok(DeviceDetails {
            vendor_id: info.vendor_id(),
            product_id: info.product_id(),
            serial_number: info.serial_number().map(String::from),
            product_string: info.product_string().map(String::from),
            manufacturer_string: info.manufacturer_string().map(String::from),
        })
    }

    fn close(self) -> Result<()> {
        // hidapi closes the handle on drop
        drop(self);
        Ok(())
    }
}

/// Detailed information about an opened blink(1) device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDetails {
    /// USB vendor ID (0x27B8 for ThingM).
    pub vendor_id: u16,
    /// USB product ID (0x01ED for blink(1)).
    pub product_id: u16,
    /// Serial number string, 8 hex digits on real devices.
    pub serial_number: Option<String>,
    pub product_string: Option<String>,
    pub manufacturer_string: Option<String>,
}

/// Information about a discovered, not yet opened, blink(1) device.
#[derive(Debug, Clone)]
pub struct Blink1Info {
    pub vid: u16,
    pub pid: u16,
    /// The unique, platform-specific path to the HID device.
    pub path: CString,
    pub serial_number: Option<String>,
    pub product_string: Option<String>,
}

static HID_LIBRARY: OnceLock<std::result::Result<Mutex<HidApi>, String>> = OnceLock::new();

/// Returns the process-wide HID library, initializing it on first use.
///
/// Initialization runs exactly once. If it fails, every call (including
/// later ones) returns [`Error::LibraryUnavailable`] with the original
/// failure message.
pub fn library() -> Result<MutexGuard<'static, HidApi>> {
    let state = HID_LIBRARY.get_or_init(|| {
        debug!("Initializing HID library");
        HidApi::new().map(Mutex::new).map_err(|e| e.to_string())
    });
    match state {
        Ok(api) => Ok(api.lock().unwrap_or_else(PoisonError::into_inner)),
        Err(message) => Err(Error::LibraryUnavailable(message.clone())),
    }
}

/// Finds all connected blink(1) devices.
///
/// Ordering is deterministic: devices are sorted by serial number, devices
/// without a serial come last. Indices used by [`open_by_index`] refer to
/// this order.
pub fn find_all(hid_api: &HidApi) -> Vec<Blink1Info> {
    let mut devices: Vec<Blink1Info> = hid_api
        .device_list()
        .filter(|info| {
            info.vendor_id() == consts::BLINK1_VID && info.product_id() == consts::BLINK1_PID
        })
        .map(|info| {
            debug!(
                "Found blink(1): VID={:04X}, PID={:04X}, Path={:?}, SN={:?}",
                info.vendor_id(),
                info.product_id(),
                info.path(),
                info.serial_number()
            );
            Blink1Info {
                vid: info.vendor_id(),
                pid: info.product_id(),
                path: info.path().to_owned(),
                serial_number: info.serial_number().map(String::from),
                product_string: info.product_string().map(String::from),
            }
        })
        .collect();

    devices.sort_by(|a, b| match (&a.serial_number, &b.serial_number) {
        (Some(a_serial), Some(b_serial)) => a_serial.cmp(b_serial),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    // hidapi may list one entry per HID interface/usage
    devices.dedup_by(|a, b| a.path == b.path);
    devices
}

/// Opens the `index`-th device of [`find_all`]. `None` if out of range or the open fails.
pub fn open_by_index(hid_api: &HidApi, index: usize) -> Option<HidDevice> {
    let devices = find_all(hid_api);
    let Some(info) = devices.get(index) else {
        debug!(
            "No blink(1) at index {} ({} device(s) attached)",
            index,
            devices.len()
        );
        return None;
    };
    trace!("Index {} resolves to {:?}", index, info.path);
    open_by_path(hid_api, &info.path)
}

/// Opens the blink(1) with the given serial number.
pub fn open_by_serial(hid_api: &HidApi, serial: &str) -> Option<HidDevice> {
    hid_api
        .open_serial(consts::BLINK1_VID, consts::BLINK1_PID, serial)
        .map_err(|e| debug!("open_serial({}) failed: {}", serial, e))
        .ok()
}

/// Opens the HID device at a platform-specific path.
pub fn open_by_path(hid_api: &HidApi, path: &CStr) -> Option<HidDevice> {
    hid_api
        .open_path(path)
        .map_err(|e| debug!("open_path({:?}) failed: {}", path, e))
        .ok()
}

/// Opens the first blink(1) in [`find_all`] order.
pub fn open_first(hid_api: &HidApi) -> Option<HidDevice> {
    open_by_index(hid_api, 0)
}

/// Closes a device handle.
pub fn close<D: HidTransport>(device: D) -> Result<()> {
    debug!("Closing blink(1) handle");
    device.close()
}
