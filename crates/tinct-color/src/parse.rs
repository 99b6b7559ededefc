#![forbid(unsafe_code)]

//! CSS color string parsing.
//!
//! Accepted syntax:
//!
//! | form               | examples                                              |
//! |--------------------|-------------------------------------------------------|
//! | hex                | `#fff`, `#ffff`, `#336699`, `#33669980`               |
//! | `rgb()` / `rgba()` | `rgb(51, 102, 153)`, `rgb(20% 40% 60% / 0.5)`         |
//! | `hsl()` / `hsla()` | `hsl(210 50% 40%)`, `hsla(210deg, 50%, 40%, 0.5)`     |
//! | `oklch()`          | `oklch(0.628 0.258 29.23)`, `oklch(62.8% 0.25 29 / 50%)` |
//! | named              | `white`, `rebeccapurple`, `transparent`               |
//!
//! Both the legacy comma syntax and the modern space syntax are accepted,
//! with alpha either as a fourth comma component or after a `/`.

use crate::error::ColorParseError;
use crate::space::{Hsl, Oklch, Rgba};

/// CSS percentage reference for OKLCH chroma (`100%` = `0.4`).
const OKLCH_CHROMA_PERCENT_REFERENCE: f64 = 0.4;

/// Parse a CSS color string.
pub fn parse_color(input: &str) -> Result<Rgba, ColorParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ColorParseError::Empty);
    }

    if let Some(hex) = trimmed.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex {
            value: trimmed.to_string(),
        });
    }

    let lower = trimmed.to_ascii_lowercase();
    if let Some(open) = lower.find('(') {
        let Some(inner) = lower[open + 1..].strip_suffix(')') else {
            return Err(ColorParseError::Unknown {
                value: trimmed.to_string(),
            });
        };
        let name = lower[..open].trim();
        return match name {
            "rgb" | "rgba" => parse_rgb(inner),
            "hsl" | "hsla" => parse_hsl(inner),
            "oklch" => parse_oklch(inner),
            other => Err(ColorParseError::UnsupportedFunction {
                name: other.to_string(),
            }),
        };
    }

    named_color(&lower).ok_or_else(|| ColorParseError::Unknown {
        value: trimmed.to_string(),
    })
}

fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(Rgba::from_u8(r, g, b).with_alpha(f64::from(a) / 255.0))
}

/// Split a functional-notation body into three channels and an optional alpha.
fn split_components<'a>(
    function: &'static str,
    inner: &'a str,
) -> Result<([&'a str; 3], Option<&'a str>), ColorParseError> {
    let (main, slash_alpha) = match inner.split_once('/') {
        Some((main, alpha)) => (main, Some(alpha.trim())),
        None => (inner, None),
    };

    let parts: Vec<&str> = main
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect();

    match (parts.as_slice(), slash_alpha) {
        ([a, b, c], alpha) => Ok(([*a, *b, *c], alpha)),
        ([a, b, c, alpha], None) => Ok(([*a, *b, *c], Some(*alpha))),
        (parts, _) => Err(ColorParseError::Arity {
            function,
            count: parts.len(),
        }),
    }
}

fn parse_number(function: &'static str, text: &str) -> Result<f64, ColorParseError> {
    text.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ColorParseError::component(function, text))
}

/// A number or percentage; percentages map onto `percent_scale`.
fn parse_scaled(
    function: &'static str,
    text: &str,
    percent_scale: f64,
) -> Result<f64, ColorParseError> {
    match text.strip_suffix('%') {
        Some(percent) => Ok(parse_number(function, percent)? / 100.0 * percent_scale),
        None => parse_number(function, text),
    }
}

fn parse_alpha(function: &'static str, text: Option<&str>) -> Result<f64, ColorParseError> {
    match text {
        None | Some("none") => Ok(1.0),
        Some(text) => Ok(parse_scaled(function, text, 1.0)?.clamp(0.0, 1.0)),
    }
}

fn parse_hue(function: &'static str, text: &str) -> Result<Option<f64>, ColorParseError> {
    if text == "none" {
        return Ok(None);
    }
    let degrees = if let Some(value) = text.strip_suffix("deg") {
        parse_number(function, value)?
    } else if let Some(value) = text.strip_suffix("grad") {
        parse_number(function, value)? * 0.9
    } else if let Some(value) = text.strip_suffix("rad") {
        parse_number(function, value)?.to_degrees()
    } else if let Some(value) = text.strip_suffix("turn") {
        parse_number(function, value)? * 360.0
    } else {
        parse_number(function, text)?
    };
    Ok(Some(degrees))
}

fn parse_rgb(inner: &str) -> Result<Rgba, ColorParseError> {
    let ([r, g, b], alpha) = split_components("rgb", inner)?;
    let channel = |text: &str| parse_scaled("rgb", text, 255.0).map(|value| value / 255.0);
    Ok(Rgba::new(
        channel(r)?,
        channel(g)?,
        channel(b)?,
        parse_alpha("rgb", alpha)?,
    ))
}

fn parse_hsl(inner: &str) -> Result<Rgba, ColorParseError> {
    let ([h, s, l], alpha) = split_components("hsl", inner)?;
    // Bare numbers in the saturation/lightness slots are percentages.
    let fraction = |text: &str| {
        let text = text.strip_suffix('%').unwrap_or(text);
        parse_number("hsl", text).map(|value| (value / 100.0).clamp(0.0, 1.0))
    };
    let hsl = Hsl {
        h: parse_hue("hsl", h)?,
        s: fraction(s)?,
        l: fraction(l)?,
        alpha: parse_alpha("hsl", alpha)?,
    };
    Ok(hsl.to_rgba())
}

fn parse_oklch(inner: &str) -> Result<Rgba, ColorParseError> {
    let ([l, c, h], alpha) = split_components("oklch", inner)?;
    let oklch = Oklch {
        l: parse_scaled("oklch", l, 1.0)?.clamp(0.0, 1.0),
        c: parse_scaled("oklch", c, OKLCH_CHROMA_PERCENT_REFERENCE)?.max(0.0),
        h: parse_hue("oklch", h)?,
        alpha: parse_alpha("oklch", alpha)?,
    };
    Ok(oklch.to_rgba())
}

fn named_color(name: &str) -> Option<Rgba> {
    if name == "transparent" {
        return Some(Rgba::TRANSPARENT);
    }
    let (r, g, b) = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "lime" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "teal" => (0, 128, 128),
        "navy" => (0, 0, 128),
        "purple" => (128, 0, 128),
        "orange" => (255, 165, 0),
        "pink" => (255, 192, 203),
        "brown" => (165, 42, 42),
        "gold" => (255, 215, 0),
        "indigo" => (75, 0, 130),
        "violet" => (238, 130, 238),
        "coral" => (255, 127, 80),
        "salmon" => (250, 128, 114),
        "crimson" => (220, 20, 60),
        "tomato" => (255, 99, 71),
        "tan" => (210, 180, 140),
        "beige" => (245, 245, 220),
        "ivory" => (255, 255, 240),
        "khaki" => (240, 230, 140),
        "lavender" => (230, 230, 250),
        "plum" => (221, 160, 221),
        "orchid" => (218, 112, 214),
        "turquoise" => (64, 224, 208),
        "skyblue" => (135, 206, 235),
        "steelblue" => (70, 130, 180),
        "royalblue" => (65, 105, 225),
        "slategray" | "slategrey" => (112, 128, 144),
        "lightgray" | "lightgrey" => (211, 211, 211),
        "darkgray" | "darkgrey" => (169, 169, 169),
        "dimgray" | "dimgrey" => (105, 105, 105),
        "gainsboro" => (220, 220, 220),
        "whitesmoke" => (245, 245, 245),
        "snow" => (255, 250, 250),
        "rebeccapurple" => (102, 51, 153),
        _ => return None,
    };
    Some(Rgba::from_u8(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(input: &str) -> (u8, u8, u8) {
        parse_color(input).unwrap().to_u8()
    }

    #[test]
    fn hex_forms() {
        assert_eq!(bytes("#336699"), (51, 102, 153));
        assert_eq!(bytes("#369"), (51, 102, 153));
        assert_eq!(bytes("#ABCDEF"), (171, 205, 239));
        let with_alpha = parse_color("#33669980").unwrap();
        assert!((with_alpha.alpha - 128.0 / 255.0).abs() < 1e-9);
        assert!((parse_color("#0008").unwrap().alpha - 136.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(matches!(
            parse_color("#12"),
            Err(ColorParseError::InvalidHex { .. })
        ));
        assert!(matches!(
            parse_color("#gggggg"),
            Err(ColorParseError::InvalidHex { .. })
        ));
    }

    #[test]
    fn rgb_comma_and_space_syntax() {
        assert_eq!(bytes("rgb(51, 102, 153)"), (51, 102, 153));
        assert_eq!(bytes("rgb(51 102 153)"), (51, 102, 153));
        assert_eq!(bytes("RGB(100%, 0%, 50%)"), (255, 0, 128));
        let rgba = parse_color("rgba(0, 0, 0, 0.25)").unwrap();
        assert_eq!(rgba.alpha, 0.25);
        let slash = parse_color("rgb(0 0 0 / 40%)").unwrap();
        assert!((slash.alpha - 0.4).abs() < 1e-12);
    }

    #[test]
    fn hsl_syntax_variants() {
        assert_eq!(bytes("hsl(0 100% 50%)"), (255, 0, 0));
        assert_eq!(bytes("hsl(120deg, 100%, 25%)"), (0, 128, 0));
        assert_eq!(bytes("hsla(240, 100%, 50%, 0.5)"), (0, 0, 255));
        assert_eq!(bytes("hsl(0.5turn 100% 50%)"), (0, 255, 255));
        // shadcn-style triplet wrapped in hsl()
        assert_eq!(bytes("hsl(0 0% 100%)"), (255, 255, 255));
        assert_eq!(bytes("hsl(0 0 0)"), (0, 0, 0));
    }

    #[test]
    fn oklch_syntax_variants() {
        assert_eq!(bytes("oklch(1 0 0)"), (255, 255, 255));
        assert_eq!(bytes("oklch(0 0 0)"), (0, 0, 0));
        assert_eq!(bytes("oklch(0.627955 0.257683 29.2339)"), (255, 0, 0));
        assert_eq!(bytes("oklch(62.7955% 0.257683 29.2339)"), (255, 0, 0));
        let translucent = parse_color("oklch(1 0 0 / 10%)").unwrap();
        assert!((translucent.alpha - 0.1).abs() < 1e-12);
    }

    #[test]
    fn named_colors() {
        assert_eq!(bytes("white"), (255, 255, 255));
        assert_eq!(bytes("  RebeccaPurple "), (102, 51, 153));
        assert_eq!(parse_color("transparent").unwrap().alpha, 0.0);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_color(""), Err(ColorParseError::Empty));
        assert!(matches!(
            parse_color("notacolor"),
            Err(ColorParseError::Unknown { .. })
        ));
        assert!(matches!(
            parse_color("lab(50 20 30)"),
            Err(ColorParseError::UnsupportedFunction { .. })
        ));
        assert!(matches!(
            parse_color("rgb(1, 2)"),
            Err(ColorParseError::Arity { count: 2, .. })
        ));
        assert!(matches!(
            parse_color("rgb(1, x, 2)"),
            Err(ColorParseError::InvalidComponent { .. })
        ));
        assert!(matches!(
            parse_color("rgb(1, 2, 3"),
            Err(ColorParseError::Unknown { .. })
        ));
    }
}
