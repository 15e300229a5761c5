//! Measurement units used by Office file formats.
//!
//! Drawing coordinates are stored in English Metric Units (EMU),
//! an integer unit fine enough to express both metric and imperial
//! lengths exactly. Font sizes travel separately as hundredths of a
//! point in the `sz` attribute of run properties.

use std::fmt;

/// Number of EMUs per inch.
pub const EMUS_PER_INCH: i64 = 914_400;

/// A length in English Metric Units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Length(i64);

impl Length {
    pub const fn from_emu(emu: i64) -> Self {
        Self(emu)
    }

    pub const fn emu(self) -> i64 {
        self.0
    }

    pub fn inches(self) -> f64 {
        self.0 as f64 / EMUS_PER_INCH as f64
    }
}

/// A font size in hundredths of a point, as carried by the `sz`
/// attribute (`sz="1800"` is 18pt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontSize(u32);

impl FontSize {
    pub const fn from_centipoints(centipoints: u32) -> Self {
        Self(centipoints)
    }

    pub const fn centipoints(self) -> u32 {
        self.0
    }

    pub fn points(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

/// Formats as the point value with the shortest exact decimal form
/// and a `pt` suffix: `18.0pt`, `13.5pt`, `10.75pt`.
impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        if frac == 0 {
            write!(f, "{whole}.0pt")
        } else if frac % 10 == 0 {
            write!(f, "{}.{}pt", whole, frac / 10)
        } else {
            write!(f, "{whole}.{frac:02}pt")
        }
    }
}
