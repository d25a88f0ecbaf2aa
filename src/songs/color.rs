//! `#RRGGBB` colors.

use super::CombineError;
use std::fmt;
use std::str::FromStr;

/// An RGB color as typed by the user (`#RRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const WHITE: HexColor = HexColor::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: HexColor = HexColor::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case `RRGGBB` without the leading `#`, as DrawingML `a:srgbClr` wants it.
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = CombineError;

    /// Parse exactly `#` followed by six hex digits, in either case.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use songdeck::songs::HexColor;
    ///
    /// let color: HexColor = "#ff8000".parse().unwrap();
    /// assert_eq!(color, HexColor::new(255, 128, 0));
    /// assert!("ff8000".parse::<HexColor>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CombineError::InvalidColor(s.to_string());

        let digits = s.strip_prefix('#').ok_or_else(invalid)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}
