// tests/hardware_tests.rs
use blink1_hid::{self, hex_to_rgb, Blink1, DeviceSelector, Error, Led, Result, Rgb};
use hidapi::HidApi;
use std::time::Duration;

// HID access may be unavailable in sandboxed CI; skip instead of failing
fn hid_api() -> Option<HidApi> {
    HidApi::new()
        .map_err(|e| println!("Skipping: HID API unavailable: {}", e))
        .ok()
}

// Helper to open the first device, panics on failure for test simplicity
fn open_test_device() -> Blink1 {
    let _ = env_logger::builder().is_test(true).try_init();
    Blink1::open(DeviceSelector::First)
        .expect("Failed to open any blink(1) device. Is it connected and permissions set?")
}

#[test]
fn test_find_all_no_panic() {
    // This test should never panic, even without hardware
    let Some(hid_api) = hid_api() else { return };
    let devices = blink1_hid::find_all(&hid_api);
    println!("Found {} blink(1) devices", devices.len());
    for device in &devices {
        assert_eq!(device.vid, blink1_hid::BLINK1_VID);
        assert_eq!(device.pid, blink1_hid::BLINK1_PID);
    }
}

#[test]
fn test_open_out_of_range_index_not_found() {
    let Some(hid_api) = hid_api() else { return };
    let index = blink1_hid::find_all(&hid_api).len() + 10;
    match Blink1::open_with_api(&hid_api, DeviceSelector::Index(index)) {
        Err(Error::DeviceNotFound { selector }) => assert!(selector.contains("index")),
        other => panic!("Expected DeviceNotFound, got: {:?}", other),
    }
}

#[test]
fn test_open_unknown_serial_not_found() {
    let Some(hid_api) = hid_api() else { return };
    let result = Blink1::open_with_api(&hid_api, DeviceSelector::Serial("not-a-serial".into()));
    assert!(matches!(result, Err(Error::DeviceNotFound { .. })));
}

#[test]
#[ignore] // Ignore by default, requires hardware
fn test_identity() -> Result<()> {
    let mut b = open_test_device();
    assert_eq!(b.vid()?, 0x27B8);
    assert_eq!(b.pid()?, 0x01ED);
    assert_eq!(b.serial()?.map(|s| s.len()), Some(8));
    b.close()
}

#[test]
#[ignore] // Ignore by default, requires hardware
fn test_effects_sequence() -> Result<()> {
    let mut b = open_test_device();
    b.on(Some(Duration::from_secs(1)))?; // white during 1 second
    b.set_rgb(hex_to_rgb("#ff00f0")?, Led::Both, Some(Duration::from_secs(2)))?;
    b.off(Some(Duration::from_millis(500)))?;
    b.fade_rgb(
        hex_to_rgb("#FA5882")?,
        Duration::from_millis(500),
        Led::Both,
        Some(Duration::from_secs(1)),
    )?;
    b.pause(Duration::from_millis(500))?;
    b.set_two_leds(
        Rgb::new(255, 0, 0),
        Rgb::new(0, 0, 255),
        Some(Duration::from_millis(500)),
        10,
    )?;
    b.pause(Duration::from_secs(1))?;
    b.rainbow(Duration::from_millis(100))?;
    b.random_colors(10, Duration::from_millis(300))?;
    b.close()
}

#[test]
#[ignore] // Ignore by default, requires hardware
fn test_pattern_line_readback() -> Result<()> {
    let mut b = open_test_device();
    let color = Rgb::new(0x12, 0x34, 0x56);
    b.set_pattern_line(0, color, Duration::from_millis(1230))?;
    let line = b.get_pattern_line(0)?;
    assert_eq!(line.color, color);
    assert_eq!(line.fade_ms, 1230);
    b.play(0)?;
    std::thread::sleep(Duration::from_secs(2));
    b.stop(0)?;
    b.close()
}
