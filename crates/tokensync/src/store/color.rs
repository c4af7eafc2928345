//! Color values for color variables.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    /// Formats as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )?;
        if self.a < 1.0 {
            write!(f, "{:02x}", channel(self.a))?;
        }
        Ok(())
    }
}

/// Parses a CSS-style color.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)` and
/// `rgba(r, g, b, a)` with 0-255 channels and an alpha given as a fraction
/// or a percentage.
///
/// ```rust
/// use tokensync::store::{parse_color, Rgba};
///
/// assert_eq!(parse_color("#fff"), Some(Rgba::new(1.0, 1.0, 1.0, 1.0)));
/// assert_eq!(parse_color("rgba(0, 0, 0, 50%)"), Some(Rgba::new(0.0, 0.0, 0.0, 0.5)));
/// assert_eq!(parse_color("tomato"), None);
/// ```
pub fn parse_color(input: &str) -> Option<Rgba> {
    let input = input.trim();
    if let Some(hex) = input.strip_prefix('#') {
        return parse_hex(hex);
    }
    let lower = input.to_ascii_lowercase();
    let args = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))?
        .strip_suffix(')')?;
    parse_rgb_args(args)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let digits: Vec<u8> = match hex.len() {
        3 | 4 => hex
            .chars()
            .map(|c| u8::from_str_radix(&format!("{c}{c}"), 16).ok())
            .collect::<Option<_>>()?,
        6 | 8 => (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
            .collect::<Option<_>>()?,
        _ => return None,
    };
    let unit = |v: u8| f64::from(v) / 255.0;
    Some(Rgba {
        r: unit(digits[0]),
        g: unit(digits[1]),
        b: unit(digits[2]),
        a: digits.get(3).copied().map(unit).unwrap_or(1.0),
    })
}

fn parse_rgb_args(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }
    let channel = |p: &str| -> Option<f64> {
        let v: f64 = p.parse().ok()?;
        Some((v / 255.0).clamp(0.0, 1.0))
    };
    let alpha = match parts.get(3) {
        Some(p) => match p.strip_suffix('%') {
            Some(percent) => percent.parse::<f64>().ok()? / 100.0,
            None => p.parse::<f64>().ok()?,
        },
        None => 1.0,
    };
    Some(Rgba {
        r: channel(parts[0])?,
        g: channel(parts[1])?,
        b: channel(parts[2])?,
        a: alpha.clamp(0.0, 1.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_lengths() {
        assert_eq!(parse_color("#000"), Some(Rgba::new(0.0, 0.0, 0.0, 1.0)));
        assert_eq!(parse_color("#ffffff"), Some(Rgba::new(1.0, 1.0, 1.0, 1.0)));
        assert_eq!(parse_color("#ff000000").map(|c| c.a), Some(0.0));
        assert_eq!(parse_color("#f00f").map(|c| (c.r, c.a)), Some((1.0, 1.0)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert_eq!(parse_color("#ggg"), None);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#"), None);
    }

    #[test]
    fn test_parse_rgb_functions() {
        assert_eq!(
            parse_color("rgb(255, 0, 0)"),
            Some(Rgba::new(1.0, 0.0, 0.0, 1.0))
        );
        assert_eq!(
            parse_color("RGBA(0 0 255 / 0.25)"),
            Some(Rgba::new(0.0, 0.0, 1.0, 0.25))
        );
        assert_eq!(parse_color("rgb(1, 2)"), None);
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Rgba::new(1.0, 0.0, 0.0, 1.0).to_string(), "#ff0000");
        assert_eq!(Rgba::new(0.0, 0.0, 0.0, 0.5).to_string(), "#00000080");
    }
}
