use std::str::FromStr;

use palette::Srgb;

use crate::error::{Error, Result};

/// An sRGB color with straight alpha, as written into style variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }

    fn from_srgb(color: Srgb<u8>, a: f32) -> Self {
        let (r, g, b) = color.into_components();
        Self::new(r, g, b, a)
    }
}

impl FromStr for Rgba {
    type Err = Error;

    /// Accepts `rgb(...)`, `rgba(...)`, `#rgb`, `#rrggbb`, `#rrggbbaa`, CSS
    /// color names and `transparent`.
    fn from_str(s: &str) -> Result<Self> {
        let input = s.trim();
        let invalid = || Error::InvalidColor(s.to_string());
        let lower = input.to_ascii_lowercase();

        if lower == "transparent" {
            return Ok(Self::TRANSPARENT);
        }

        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(args).ok_or_else(invalid);
        }

        if let Some(hex) = input.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        palette::named::from_str(&lower)
            .map(|color| Self::from_srgb(color, 1.0))
            .ok_or_else(invalid)
    }
}

fn parse_functional(args: &str) -> Option<Rgba> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();

    match *parts.as_slice() {
        [r, g, b] => Some(Rgba::rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let alpha: f32 = a.parse().ok()?;
            if !alpha.is_finite() {
                return None;
            }
            Some(Rgba::new(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                alpha.clamp(0.0, 1.0),
            ))
        }
        _ => None,
    }
}

fn channel(part: &str) -> Option<u8> {
    let value: f32 = part.parse().ok()?;
    value
        .is_finite()
        .then(|| value.round().clamp(0.0, 255.0) as u8)
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    match hex.len() {
        3 | 6 => Srgb::<u8>::from_str(hex)
            .ok()
            .map(|color| Rgba::from_srgb(color, 1.0)),
        8 => {
            let color = Srgb::<u8>::from_str(hex.get(..6)?).ok()?;
            let alpha = u8::from_str_radix(hex.get(6..)?, 16).ok()?;
            Some(Rgba::from_srgb(color, alpha as f32 / 255.0))
        }
        _ => None,
    }
}

/// Parse `value`, or fall back to `default` with a warning.
pub fn parse_or(value: Option<&str>, default: Rgba) -> Rgba {
    let Some(value) = value else {
        return default;
    };
    match value.parse() {
        Ok(color) => color,
        Err(err) => {
            log::warn!("[style] {}, using {}", err, default.to_css());
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgba() {
        let color: Rgba = "rgba(0, 0, 0, 0.25)".parse().unwrap();
        assert_eq!(color, Rgba::new(0, 0, 0, 0.25));
        assert_eq!(color.to_css(), "rgba(0, 0, 0, 0.25)");
    }

    #[test]
    fn test_parse_rgb_and_hex() {
        assert_eq!("rgb(10, 20, 30)".parse::<Rgba>().unwrap(), Rgba::rgb(10, 20, 30));
        assert_eq!("#ff8000".parse::<Rgba>().unwrap(), Rgba::rgb(255, 128, 0));
        assert_eq!("#fff".parse::<Rgba>().unwrap(), Rgba::rgb(255, 255, 255));
        let translucent: Rgba = "#00000080".parse().unwrap();
        assert_eq!((translucent.r, translucent.g, translucent.b), (0, 0, 0));
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_named() {
        assert_eq!("Red".parse::<Rgba>().unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!("transparent".parse::<Rgba>().unwrap(), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!("rgba(1, 2)".parse::<Rgba>(), Err(Error::InvalidColor(_))));
        assert!("#12345".parse::<Rgba>().is_err());
        assert!("not-a-color".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_parse_or_falls_back() {
        let default = Rgba::new(0, 0, 0, 0.1);
        assert_eq!(parse_or(Some("bogus"), default), default);
        assert_eq!(parse_or(None, default), default);
        assert_eq!(parse_or(Some("black"), default), Rgba::rgb(0, 0, 0));
    }
}
