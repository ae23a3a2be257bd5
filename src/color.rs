//! 8-bit RGB colors, hex literals and HSV conversion.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// An (r, g, b) color with 8-bit channels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts an HSV color to RGB. All parameters range from `0.0..=1.0`.
    ///
    /// Value is scaled to `0..=255` and every channel is truncated, not
    /// rounded. A hue of `1.0` wraps to red, same as `0.0`.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let v = value.clamp(0.0, 1.0) * 255.0;
        let s = saturation.clamp(0.0, 1.0);
        if s == 0.0 {
            return Self::from_channels(v, v, v);
        }
        let h = hue.rem_euclid(1.0) * 6.0;
        let sector = h.trunc();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match sector as u8 % 6 {
            0 => Self::from_channels(v, t, p),
            1 => Self::from_channels(q, v, p),
            2 => Self::from_channels(p, v, t),
            3 => Self::from_channels(p, q, v),
            4 => Self::from_channels(t, p, v),
            _ => Self::from_channels(v, p, q),
        }
    }

    // `as u8` truncates toward zero and saturates at the bounds
    fn from_channels(r: f64, g: f64, b: f64) -> Self {
        Self::new(r as u8, g as u8, b as u8)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for (u8, u8, u8) {
    fn from(c: Rgb) -> Self {
        (c.r, c.g, c.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        hex_to_rgb(s)
    }
}

/// Parses a hex color literal (`"#rrggbb"` or `"rrggbb"`, any case).
///
/// Anything other than exactly six hex digits after the optional `#` is
/// rejected with [`Error::InvalidColor`].
pub fn hex_to_rgb(literal: &str) -> Result<Rgb> {
    let digits = literal.strip_prefix('#').unwrap_or(literal);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidColor(literal.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| Error::InvalidColor(literal.to_string()))
    };
    Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}
