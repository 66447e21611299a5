//! 8-bit sRGB colors and their hexadecimal encoding.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::FormatError;

/// An sRGB color with 8-bit channels.
///
/// The channel type makes every value legal; operations that move a
/// channel saturate into `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#RRGGBB` or `RRGGBB`, case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_palette::color::Color;
    ///
    /// let c = Color::from_hex("#9966ff").unwrap();
    /// assert_eq!(c, Color::new(0x99, 0x66, 0xFF));
    /// assert_eq!(c.to_hex(), "#9966FF");
    /// ```
    pub fn from_hex(input: &str) -> Result<Self, FormatError> {
        let digits = input.strip_prefix('#').unwrap_or(input);

        if !digits.is_ascii() {
            return Err(FormatError::InvalidDigit {
                input: input.to_string(),
            });
        }
        if digits.len() != 6 {
            return Err(FormatError::InvalidLength {
                input: input.to_string(),
                len: digits.len(),
            });
        }

        let channel = |range: std::ops::Range<usize>| {
            let pair = &digits[range];
            // from_str_radix tolerates a leading '+', which is not a hex digit.
            if !pair.bytes().all(|b| b.is_ascii_hexdigit()) {
                return Err(FormatError::InvalidDigit {
                    input: input.to_string(),
                });
            }
            u8::from_str_radix(pair, 16).map_err(|_| FormatError::InvalidDigit {
                input: input.to_string(),
            })
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Canonical uppercase `#RRGGBB` encoding.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Draws a color uniformly from the full 24-bit cube.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::new(rng.random(), rng.random(), rng.random())
    }

    #[inline]
    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns a copy with channel `index` (0 = r, 1 = g, 2 = b) replaced.
    ///
    /// # Panics
    ///
    /// Panics if `index > 2`.
    pub fn with_channel(mut self, index: usize, value: u8) -> Self {
        match index {
            0 => self.r = value,
            1 => self.g = value,
            2 => self.b = value,
            _ => panic!("channel index out of range: {index}"),
        }
        self
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl FromStr for Color {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = FormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
