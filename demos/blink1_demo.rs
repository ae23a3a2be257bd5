//! Runs the effect showcase on one blink(1).
//!
//! Usage: `blink1_demo [--index N | --serial SN | --path PATH]`

use blink1_hid::{hex_to_rgb, Blink1, DeviceSelector, Error, Led, Result, Rgb};
use std::ffi::CString;
use std::time::Duration;

fn parse_selector() -> Result<DeviceSelector> {
    let (mut index, mut serial, mut path) = (None, None, None);
    let mut args = std::env::args().skip(1);
    while let Some(flag) = args.next() {
        let value = args
            .next()
            .ok_or_else(|| Error::ArgumentOutOfRange(format!("{} needs a value", flag)))?;
        match flag.as_str() {
            "--index" => {
                index = Some(value.parse().map_err(|_| {
                    Error::ArgumentOutOfRange(format!("invalid index '{}'", value))
                })?)
            }
            "--serial" => serial = Some(value),
            "--path" => {
                path = Some(CString::new(value).map_err(|e| {
                    Error::ArgumentOutOfRange(format!("invalid path: {}", e))
                })?)
            }
            other => return Err(Error::ArgumentOutOfRange(format!("unknown flag '{}'", other))),
        }
    }
    Ok(DeviceSelector::from_options(index, serial, path))
}

fn secs(s: f64) -> Duration {
    Duration::from_secs_f64(s)
}

fn main() -> Result<()> {
    env_logger::init();
    let selector = parse_selector()?;
    println!("Opening blink(1) by {}...", selector);
    let mut b = match Blink1::open(selector) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("Error opening device: {}", e);
            eprintln!("Ensure device is connected and permissions are set (e.g., udev rules on Linux).");
            return Err(e);
        }
    };
    println!("Device opened: {:?}", b.details()?);

    b.on(Some(secs(1.0)))?; // white during 1 second
    b.set_rgb(hex_to_rgb("#ff00f0")?, Led::Both, Some(secs(2.0)))?;
    b.off(Some(secs(0.5)))?;
    b.fade_rgb(hex_to_rgb("#FA5882")?, secs(0.5), Led::Both, Some(secs(1.0)))?;
    b.pause(secs(0.5))?;
    b.set_two_leds(Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), Some(secs(1.0)), 1)?;
    b.pause(secs(0.5))?;
    // police car
    b.set_two_leds(Rgb::new(255, 0, 0), Rgb::new(0, 0, 255), Some(secs(0.5)), 10)?;
    b.pause(secs(1.0))?;
    b.rainbow(secs(0.1))?;
    b.pause(secs(1.0))?;
    b.random_colors(10, secs(0.3))?;

    b.close()
}
