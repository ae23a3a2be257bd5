use blink1_hid::{self, Result};

fn main() -> Result<()> {
    env_logger::init();
    let hid_api = blink1_hid::device::library()?;

    println!(
        "Searching for blink(1) devices (VID=0x{:04X}, PID=0x{:04X})...",
        blink1_hid::BLINK1_VID,
        blink1_hid::BLINK1_PID
    );
    let devices = blink1_hid::find_all(&hid_api);

    if devices.is_empty() {
        println!("No devices found.");
        return Ok(());
    }

    println!("Found {} device(s):", devices.len());
    for (i, info) in devices.iter().enumerate() {
        println!(
            "  {}: Path={:?}, Serial='{}', Product='{}'",
            i,
            info.path,
            info.serial_number.as_deref().unwrap_or("N/A"),
            info.product_string.as_deref().unwrap_or("N/A"),
        );
    }
    Ok(())
}
