//! The color module
//! Parse user-entered color strings and render colors back to `#rrggbb`

use serde::{Deserialize, Serialize};
use std::{fmt, num::IntErrorKind, str::FromStr};
use thiserror::Error;

/// Errors raised while turning text into a [`Color`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Input is not `#rrggbb` or three decimal integers
    #[error("Unrecognized color format: {0}")]
    Format(String),

    /// Input is well formed but a channel is outside [0, 255]
    #[error("Color code must be a number between 0 and 255 inclusive: {value}")]
    Range { value: String },
}

/// An sRGB color with 8 bit channels.
///
/// Ordering is lexicographic over (red, green, blue).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Builds a color from wider integers, rejecting any channel outside [0, 255].
    ///
    /// # Examples
    ///
    /// ```
    /// use colorfinder::{Color, ColorError};
    ///
    /// assert_eq!(Color::try_from_channels(0, 128, 255), Ok(Color::new(0, 128, 255)));
    /// assert!(matches!(Color::try_from_channels(256, 0, 0), Err(ColorError::Range { .. })));
    /// ```
    pub fn try_from_channels(red: i64, green: i64, blue: i64) -> Result<Self, ColorError> {
        Ok(Self {
            red: channel(red)?,
            green: channel(green)?,
            blue: channel(blue)?,
        })
    }

    /// Parses either `#rrggbb` or `r g b` (three whitespace-separated decimals).
    ///
    /// # Returns
    ///
    /// * `Ok(Color)` - The decoded color
    /// * `Err(ColorError::Format)` - Wrong length, wrong token count, non-hex or non-numeric content
    /// * `Err(ColorError::Range)` - A decimal channel outside [0, 255]
    ///
    /// # Examples
    ///
    /// ```
    /// use colorfinder::Color;
    ///
    /// assert_eq!(Color::parse("#ff0000").unwrap(), Color::new(255, 0, 0));
    /// assert_eq!(Color::parse("0 128 255").unwrap(), Color::new(0, 128, 255));
    /// assert!(Color::parse("300 0 0").unwrap_err().to_string().contains("300"));
    /// ```
    pub fn parse(text: &str) -> Result<Self, ColorError> {
        if text.starts_with('#') {
            return parse_hex(text);
        }

        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() != 3 {
            return Err(ColorError::Format(format!(
                "expected #rrggbb or three numbers, got '{}'",
                text
            )));
        }

        Self::try_from_channels(
            parse_decimal(tokens[0])?,
            parse_decimal(tokens[1])?,
            parse_decimal(tokens[2])?,
        )
    }

    /// Canonical `#rrggbb` form, lowercase and zero-padded.
    pub fn format(&self) -> String {
        self.to_string()
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

fn channel(value: i64) -> Result<u8, ColorError> {
    u8::try_from(value).map_err(|_| ColorError::Range {
        value: value.to_string(),
    })
}

fn parse_hex(text: &str) -> Result<Color, ColorError> {
    let digits = &text[1..];
    // from_str_radix alone would accept a leading '+'
    if text.len() != 7 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::Format(format!(
            "unparsable color code '{}'",
            text
        )));
    }

    let pair = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|e| ColorError::Format(format!("unparsable color code '{}': {}", text, e)))
    };

    Ok(Color::new(pair(0)?, pair(2)?, pair(4)?))
}

fn parse_decimal(token: &str) -> Result<i64, ColorError> {
    token.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => ColorError::Range {
            value: token.to_string(),
        },
        _ => ColorError::Format(format!("not a number: '{}'", token)),
    })
}
