//! Low-level blink(1) commands.
//!
//! Each function encodes exactly one command as a 9-byte feature report with
//! fixed-width fields and hands it to a [`HidTransport`]. Nothing here
//! retries, sleeps or validates beyond the field widths of the signature.

use crate::color::Rgb;
use crate::consts::{self, cmd, offset};
use crate::device::HidTransport;
use crate::error::{Error, Result};
use log::{trace, warn};
use std::time::Duration;

/// Which LED(s) of a two-LED device a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Led {
    #[default]
    Both,
    Top,
    Bottom,
}

impl Led {
    /// Wire value: 0 = both, 1 = top, 2 = bottom.
    pub const fn index(self) -> u8 {
        match self {
            Led::Both => 0,
            Led::Top => 1,
            Led::Bottom => 2,
        }
    }
}

/// One entry of the on-device pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatternLine {
    pub color: Rgb,
    /// Fade time in milliseconds. The device stores 10ms units.
    pub fade_ms: u16,
}

impl PatternLine {
    pub fn fade(&self) -> Duration {
        Duration::from_millis(u64::from(self.fade_ms))
    }
}

/// Converts a fade duration to wire milliseconds, truncating sub-millisecond parts.
///
/// Durations above 65535 ms are rejected rather than wrapped.
pub fn fade_millis(fade: Duration) -> Result<u16> {
    u16::try_from(fade.as_millis()).map_err(|_| {
        Error::ArgumentOutOfRange(format!(
            "fade time {:?} exceeds {} ms",
            fade,
            consts::MAX_FADE_MS
        ))
    })
}

/// Same as [`fade_millis`] for float seconds: `floor(seconds * 1000)`.
pub fn fade_millis_from_secs(seconds: f64) -> Result<u16> {
    let millis = (seconds * 1000.0).floor();
    if !(0.0..=f64::from(consts::MAX_FADE_MS)).contains(&millis) {
        return Err(Error::ArgumentOutOfRange(format!(
            "fade time {} s is outside 0..={} ms",
            seconds,
            consts::MAX_FADE_MS
        )));
    }
    Ok(millis as u16)
}

fn fade_units(fade_ms: u16) -> [u8; 2] {
    (fade_ms / consts::FADE_UNIT_MS).to_be_bytes()
}

fn report(command: u8) -> [u8; consts::REPORT_SIZE] {
    let mut buf = [0u8; consts::REPORT_SIZE];
    buf[0] = consts::REPORT_ID;
    buf[offset::CMD] = command;
    buf
}

fn send<D: HidTransport + ?Sized>(device: &D, buf: &[u8; consts::REPORT_SIZE]) -> Result<()> {
    trace!(
        "Writing Feature Report ('{}'): {:02X?}",
        buf[offset::CMD] as char,
        &buf[..]
    );
    device.send_feature_report(buf)
}

/// Fades `led` to (r, g, b) over `fade_ms` milliseconds. Zero sets it immediately.
pub fn fade_to_rgb<D: HidTransport + ?Sized>(
    device: &D,
    fade_ms: u16,
    r: u8,
    g: u8,
    b: u8,
    led: Led,
) -> Result<()> {
    let mut buf = report(cmd::FADE_TO_RGB);
    let [t_hi, t_lo] = fade_units(fade_ms);
    buf[offset::RED] = r;
    buf[offset::GREEN] = g;
    buf[offset::BLUE] = b;
    buf[offset::FADE_HIGH] = t_hi;
    buf[offset::FADE_LOW] = t_lo;
    buf[offset::LED_OR_POS] = led.index();
    send(device, &buf)
}

/// Starts (`play = true`) or stops pattern playback from position `pos`.
pub fn play<D: HidTransport + ?Sized>(device: &D, play: bool, pos: u8) -> Result<()> {
    let mut buf = report(cmd::PLAY);
    buf[offset::PLAY_FLAG] = u8::from(play);
    buf[offset::PLAY_POS] = pos;
    send(device, &buf)
}

/// Writes one pattern table entry at `pos`.
pub fn write_pattern_line<D: HidTransport + ?Sized>(
    device: &D,
    fade_ms: u16,
    r: u8,
    g: u8,
    b: u8,
    pos: u8,
) -> Result<()> {
    let mut buf = report(cmd::WRITE_PATTERN_LINE);
    let [t_hi, t_lo] = fade_units(fade_ms);
    buf[offset::RED] = r;
    buf[offset::GREEN] = g;
    buf[offset::BLUE] = b;
    buf[offset::FADE_HIGH] = t_hi;
    buf[offset::FADE_LOW] = t_lo;
    buf[offset::LED_OR_POS] = pos;
    send(device, &buf)
}

/// Reads the pattern table entry at `pos`.
pub fn read_pattern_line<D: HidTransport + ?Sized>(device: &D, pos: u8) -> Result<PatternLine> {
    let mut request = report(cmd::READ_PATTERN_LINE);
    request[offset::LED_OR_POS] = pos;
    send(device, &request)?;

    let mut buf = [0u8; consts::REPORT_SIZE];
    buf[0] = consts::REPORT_ID;
    let len = device.get_feature_report(&mut buf)?;
    trace!("Read Feature Report ({} bytes): {:02X?}", len, &buf[..]);
    if len <= offset::FADE_LOW {
        return Err(Error::InvalidReport(len));
    }
    if len != consts::REPORT_SIZE {
        warn!(
            "get_feature_report returned unexpected length: {} (expected {})",
            len,
            consts::REPORT_SIZE
        );
    }

    let units = u16::from_be_bytes([buf[offset::FADE_HIGH], buf[offset::FADE_LOW]]);
    Ok(PatternLine {
        color: Rgb::new(buf[offset::RED], buf[offset::GREEN], buf[offset::BLUE]),
        fade_ms: units.saturating_mul(consts::FADE_UNIT_MS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::DeviceDetails;
    use approx::assert_relative_eq;
    use std::cell::RefCell;

    #[derive(Default)]
    struct MockDevice {
        sent: RefCell<Vec<Vec<u8>>>,
        response: Vec<u8>,
    }

    impl HidTransport for MockDevice {
        fn send_feature_report(&self, data: &[u8]) -> Result<()> {
            self.sent.borrow_mut().push(data.to_vec());
            Ok(())
        }

        fn get_feature_report(&self, buf: &mut [u8]) -> Result<usize> {
            let n = self.response.len().min(buf.len());
            buf[..n].copy_from_slice(&self.response[..n]);
            Ok(n)
        }

        fn details(&self) -> Result<DeviceDetails> {
            Err(Error::Device("mock".into()))
        }
    }

    #[test]
    fn test_fade_to_rgb_encoding() {
        let dev = MockDevice::default();
        fade_to_rgb(&dev, 1500, 0xFA, 0x58, 0x82, Led::Bottom).unwrap();
        assert_eq!(
            dev.sent.borrow()[0],
            vec![0x01, b'c', 0xFA, 0x58, 0x82, 0x00, 150, 2, 0]
        );
    }

    #[test]
    fn test_fade_time_is_sent_in_10ms_units() {
        let dev = MockDevice::default();
        fade_to_rgb(&dev, u16::MAX, 0, 0, 0, Led::Both).unwrap();
        fade_to_rgb(&dev, 9, 0, 0, 0, Led::Top).unwrap();
        let sent = dev.sent.borrow();
        // 65535 / 10 = 6553 = 0x1999
        assert_eq!(&sent[0][5..8], &[0x19, 0x99, 0]);
        assert_eq!(&sent[1][5..8], &[0x00, 0x00, 1]);
    }

    #[test]
    fn test_play_and_stop_encoding() {
        let dev = MockDevice::default();
        play(&dev, true, 3).unwrap();
        play(&dev, false, 0).unwrap();
        let sent = dev.sent.borrow();
        assert_eq!(sent[0], vec![0x01, b'p', 1, 3, 0, 0, 0, 0, 0]);
        assert_eq!(sent[1], vec![0x01, b'p', 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_write_pattern_line_encoding() {
        let dev = MockDevice::default();
        write_pattern_line(&dev, 2560, 1, 2, 3, 11).unwrap();
        assert_eq!(
            dev.sent.borrow()[0],
            vec![0x01, b'P', 1, 2, 3, 0x01, 0x00, 11, 0]
        );
    }

    #[test]
    fn test_read_pattern_line_decoding() {
        let dev = MockDevice {
            response: vec![0x01, b'R', 10, 20, 30, 0x00, 50, 4, 0],
            ..Default::default()
        };
        let line = read_pattern_line(&dev, 4).unwrap();
        assert_eq!(
            dev.sent.borrow()[0],
            vec![0x01, b'R', 0, 0, 0, 0, 0, 4, 0]
        );
        assert_eq!(line.color, Rgb::new(10, 20, 30));
        assert_eq!(line.fade_ms, 500);
        assert_eq!(line.fade(), Duration::from_millis(500));
        assert_relative_eq!(line.fade().as_secs_f64(), 0.5);
    }

    #[test]
    fn test_read_pattern_line_short_report() {
        let dev = MockDevice {
            response: vec![0x01, b'R', 10],
            ..Default::default()
        };
        assert!(matches!(
            read_pattern_line(&dev, 0),
            Err(Error::InvalidReport(3))
        ));
    }

    #[test]
    fn test_fade_millis_truncates() {
        assert_eq!(fade_millis(Duration::ZERO).unwrap(), 0);
        assert_eq!(fade_millis(Duration::from_micros(1999)).unwrap(), 1);
        assert_eq!(fade_millis(Duration::from_millis(500)).unwrap(), 500);
        assert_eq!(fade_millis(Duration::from_millis(65_535)).unwrap(), u16::MAX);
        assert!(matches!(
            fade_millis(Duration::from_millis(65_536)),
            Err(Error::ArgumentOutOfRange(_))
        ));
    }

    #[test]
    fn test_fade_millis_from_secs_floors() {
        assert_eq!(fade_millis_from_secs(0.0).unwrap(), 0);
        assert_eq!(fade_millis_from_secs(0.5).unwrap(), 500);
        assert_eq!(fade_millis_from_secs(0.0019).unwrap(), 1);
        assert_eq!(fade_millis_from_secs(1.25).unwrap(), 1250);
        assert_eq!(fade_millis_from_secs(65.5355).unwrap(), u16::MAX);
        assert!(fade_millis_from_secs(65.6).is_err());
        assert!(fade_millis_from_secs(-0.5).is_err());
        assert!(fade_millis_from_secs(f64::NAN).is_err());
    }
}
