//! Accent color normalization
//!
//! Waveform bars blend opacity into their accent color, so every accepted
//! notation is first resolved to concrete channels. Theme-variable HSL
//! (`hsl(var(--primary))`) in particular has no alpha slot of its own and is
//! looked up in the [`Palette`] before any blending happens.
//!
//! Accepted forms: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()`,
//! `hsl()`/`hsla()` (comma or space separated, optional `/ alpha`),
//! `hsl(var(--name))`, `hsl(var(--name) / a)`, bare `var(--name)` and a few
//! color keywords. Anything else is kept as a literal.

use iced::Color;

use crate::theme::Palette;

/// A parsed accent color
#[derive(Debug, Clone, PartialEq)]
pub enum AccentColor {
    /// Concrete channels; opacity can be blended in
    Resolved(Color),
    /// Unrecognized input, kept verbatim
    Literal(String),
}

impl AccentColor {
    /// Normalize a color string, resolving theme variables through `palette`
    pub fn parse(input: &str, palette: &Palette) -> Self {
        match parse_color(input, palette) {
            Some(color) => AccentColor::Resolved(color),
            None => {
                log::debug!("color: unrecognized accent '{}', drawing as literal", input);
                AccentColor::Literal(input.to_string())
            }
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, AccentColor::Resolved(_))
    }

    /// Color with its alpha scaled by `alpha`
    ///
    /// A literal cannot be blended and is drawn as `fallback`, unchanged.
    pub fn with_alpha(&self, alpha: f32, fallback: Color) -> Color {
        match self {
            AccentColor::Resolved(color) => Color {
                a: (color.a * alpha).clamp(0.0, 1.0),
                ..*color
            },
            AccentColor::Literal(_) => fallback,
        }
    }

    /// Color at full opacity
    pub fn solid(&self, fallback: Color) -> Color {
        self.with_alpha(1.0, fallback)
    }
}

fn parse_color(input: &str, palette: &Palette) -> Option<Color> {
    let s = input.trim().to_ascii_lowercase();

    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(name) = var_name(&s) {
        return palette.variable(name);
    }

    let Some(open) = s.find('(') else {
        return named_color(&s);
    };
    let args = s[open + 1..].strip_suffix(')')?.trim();
    match s[..open].trim() {
        "rgb" | "rgba" => parse_rgb_args(args),
        "hsl" | "hsla" => parse_hsl_args(args, palette),
        _ => None,
    }
}

/// `var(--name)` -> `name`
fn var_name(s: &str) -> Option<&str> {
    let inner = s.strip_prefix("var(")?.strip_suffix(')')?.trim();
    inner.strip_prefix("--")
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };
    Some(Color::from_rgba8(r, g, b, a as f32 / 255.0))
}

/// Split `a b c / d` or `a, b, c, d` into channel strings and optional alpha
fn split_args(args: &str) -> Option<(Vec<&str>, Option<&str>)> {
    let (channels, slash_alpha) = match args.split_once('/') {
        Some((channels, alpha)) => (channels, Some(alpha.trim())),
        None => (args, None),
    };

    let mut parts: Vec<&str> = channels
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();

    let alpha = match (slash_alpha, parts.len()) {
        (Some(alpha), 3) => Some(alpha),
        (None, 4) => parts.pop(),
        (None, 3) => None,
        _ => return None,
    };
    Some((parts, alpha))
}

fn parse_alpha(s: &str) -> Option<f32> {
    let value = match s.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f32>().ok()? / 100.0,
        None => s.trim().parse::<f32>().ok()?,
    };
    Some(value.clamp(0.0, 1.0))
}

fn parse_percent(s: &str) -> Option<f32> {
    let value = s.strip_suffix('%').unwrap_or(s).trim().parse::<f32>().ok()?;
    Some((value / 100.0).clamp(0.0, 1.0))
}

fn parse_rgb_args(args: &str) -> Option<Color> {
    let (parts, alpha) = split_args(args)?;
    let channel = |s: &str| -> Option<f32> {
        match s.strip_suffix('%') {
            Some(pct) => Some((pct.parse::<f32>().ok()? / 100.0).clamp(0.0, 1.0)),
            None => Some((s.parse::<f32>().ok()? / 255.0).clamp(0.0, 1.0)),
        }
    };
    let a = match alpha {
        Some(a) => parse_alpha(a)?,
        None => 1.0,
    };
    Some(Color::from_rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, a))
}

fn parse_hsl_args(args: &str, palette: &Palette) -> Option<Color> {
    // hsl(var(--name)) / hsl(var(--name) / 0.5)
    if args.starts_with("var(") {
        let (var, alpha) = match args.split_once('/') {
            Some((var, alpha)) => (var.trim(), Some(alpha.trim())),
            None => (args, None),
        };
        let base = palette.variable(var_name(var)?)?;
        let a = match alpha {
            Some(a) => parse_alpha(a)?,
            None => 1.0,
        };
        return Some(Color { a: base.a * a, ..base });
    }

    let (parts, alpha) = split_args(args)?;
    let hue = parse_hue(parts[0])?;
    let sat = parse_percent(parts[1])?;
    let light = parse_percent(parts[2])?;
    let a = match alpha {
        Some(a) => parse_alpha(a)?,
        None => 1.0,
    };
    let [r, g, b] = hsl_to_rgb(hue, sat, light);
    Some(Color::from_rgba(r, g, b, a))
}

fn parse_hue(s: &str) -> Option<f32> {
    let s = s.strip_suffix("deg").unwrap_or(s);
    s.parse::<f32>().ok()
}

/// Parse a bare theme-variable triplet such as `"180 100% 50%"`
pub fn parse_hsl_triplet(value: &str) -> Option<Color> {
    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 3 {
        return None;
    }
    let [r, g, b] = hsl_to_rgb(parse_hue(parts[0])?, parse_percent(parts[1])?, parse_percent(parts[2])?);
    Some(Color::from_rgb(r, g, b))
}

/// Convert HSL to RGB
///
/// `hue` in degrees (any value, wrapped), `saturation` and `lightness` in
/// `[0, 1]`. Returns `[r, g, b]` clamped to `[0, 1]`; the interpolation can
/// land a rounding step outside it (`180 100% 50%` gives green just above 1).
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [f32; 3] {
    let h = hue.rem_euclid(360.0) / 360.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    let channel = |t: f32| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };

    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)].map(|c| c.clamp(0.0, 1.0))
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "transparent" => Color::TRANSPARENT,
        "red" => Color::from_rgb8(255, 0, 0),
        "lime" => Color::from_rgb8(0, 255, 0),
        "green" => Color::from_rgb8(0, 128, 0),
        "blue" => Color::from_rgb8(0, 0, 255),
        "cyan" | "aqua" => Color::from_rgb8(0, 255, 255),
        "magenta" | "fuchsia" => Color::from_rgb8(255, 0, 255),
        "yellow" => Color::from_rgb8(255, 255, 0),
        "orange" => Color::from_rgb8(255, 165, 0),
        "purple" => Color::from_rgb8(128, 0, 128),
        "pink" => Color::from_rgb8(255, 192, 203),
        "gray" | "grey" => Color::from_rgb8(128, 128, 128),
        _ => return None,
    };
    Some(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{StemColors, ThemeVariables};
    use sonic_core::StemKind;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 0.01 && (a.g - b.g).abs() < 0.01 && (a.b - b.b).abs() < 0.01 && (a.a - b.a).abs() < 0.01
    }

    fn parse(s: &str) -> AccentColor {
        AccentColor::parse(s, &Palette::default())
    }

    fn resolved(s: &str) -> Color {
        match parse(s) {
            AccentColor::Resolved(c) => c,
            AccentColor::Literal(l) => panic!("'{l}' did not resolve"),
        }
    }

    #[test]
    fn test_hex_forms() {
        assert!(close(resolved("#f00"), Color::from_rgb(1.0, 0.0, 0.0)));
        assert!(close(resolved("#FF000080"), Color::from_rgba(1.0, 0.0, 0.0, 0.5)));
        assert!(close(resolved("#00ff00"), Color::from_rgb(0.0, 1.0, 0.0)));
        assert!(close(resolved("#0f08"), Color::from_rgba(0.0, 1.0, 0.0, 0.533)));
        assert!(!parse("#12").is_resolved());
        assert!(!parse("#gggggg").is_resolved());
    }

    #[test]
    fn test_rgb_forms() {
        assert!(close(resolved("rgb(255, 0, 0)"), Color::from_rgb(1.0, 0.0, 0.0)));
        assert!(close(resolved("rgba(0, 0, 255, 0.25)"), Color::from_rgba(0.0, 0.0, 1.0, 0.25)));
        assert!(close(resolved("rgb(0 255 0 / 50%)"), Color::from_rgba(0.0, 1.0, 0.0, 0.5)));
        assert!(close(resolved("rgb(100%, 0%, 0%)"), Color::from_rgb(1.0, 0.0, 0.0)));
        assert!(!parse("rgb(1, 2)").is_resolved());
    }

    #[test]
    fn test_hsl_forms() {
        assert!(close(resolved("hsl(320, 100%, 60%)"), Color::from_rgb(1.0, 0.2, 0.733)));
        assert!(close(resolved("hsl(180deg 100% 50%)"), Color::from_rgb(0.0, 1.0, 1.0)));
        assert!(close(resolved("hsla(0, 0%, 50%, 0.5)"), Color::from_rgba(0.5, 0.5, 0.5, 0.5)));
        assert!(close(resolved("hsl(25 100% 55% / 0.2)"), Color::from_rgba(1.0, 0.475, 0.1, 0.2)));
    }

    #[test]
    fn test_theme_variables() {
        let palette = Palette::default();
        let primary = palette.primary();
        assert!(close(resolved("hsl(var(--primary))"), primary));
        assert!(close(resolved("var(--primary)"), primary));
        assert!(close(resolved("hsl(var(--primary) / 0.3)"), Color { a: 0.3, ..primary }));
        assert!(!parse("hsl(var(--nonexistent))").is_resolved());
    }

    #[test]
    fn test_named_and_literal_fallback() {
        assert!(close(resolved("White"), Color::WHITE));
        let literal = parse("chartreuse-ish");
        assert_eq!(literal, AccentColor::Literal("chartreuse-ish".to_string()));

        let fallback = Color::from_rgb(0.9, 0.9, 0.9);
        assert_eq!(literal.with_alpha(0.13, fallback), fallback);
    }

    #[test]
    fn test_with_alpha_scales_existing_alpha() {
        let c = AccentColor::Resolved(Color::from_rgba(1.0, 0.0, 0.0, 0.5));
        assert!((c.with_alpha(0.5, Color::BLACK).a - 0.25).abs() < 1e-6);
        assert_eq!(c.solid(Color::BLACK).a, 0.5);
    }

    #[test]
    fn test_hsl_to_rgb_primaries() {
        let near = |a: [f32; 3], b: [f32; 3]| a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5);
        assert!(near(hsl_to_rgb(0.0, 1.0, 0.5), [1.0, 0.0, 0.0]));
        assert!(near(hsl_to_rgb(120.0, 1.0, 0.5), [0.0, 1.0, 0.0]));
        assert!(near(hsl_to_rgb(240.0, 1.0, 0.5), [0.0, 0.0, 1.0]));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 0.25), [0.25, 0.25, 0.25]);
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), hsl_to_rgb(0.0, 1.0, 0.5));
    }

    #[test]
    fn test_hsl_to_rgb_stays_in_unit_range() {
        let in_range = |rgb: [f32; 3]| rgb.iter().all(|c| (0.0..=1.0).contains(c));
        for hue in (0..=720).step_by(5) {
            for light in [0.0, 0.06, 0.1, 0.5, 0.55, 0.6, 0.65, 0.95, 1.0] {
                assert!(in_range(hsl_to_rgb(hue as f32, 1.0, light)), "hsl({hue}, 100%, {light})");
            }
        }
        assert_eq!(hsl_to_rgb(180.0, 1.0, 0.5)[1], 1.0);
    }

    #[test]
    fn test_default_theme_and_stem_accents_resolve() {
        let defaults = ThemeVariables::default();
        for triplet in [
            &defaults.primary,
            &defaults.secondary,
            &defaults.accent,
            &defaults.foreground,
            &defaults.background,
            &defaults.muted,
            &defaults.card,
        ] {
            assert!(parse_hsl_triplet(triplet).is_some(), "{triplet}");
        }

        let palette = Palette::default();
        let stems = StemColors::default();
        for kind in [StemKind::Vocals, StemKind::Drums, StemKind::Bass, StemKind::Melody, StemKind::Other] {
            let accent = AccentColor::parse(stems.for_kind(kind), &palette);
            assert!(accent.is_resolved(), "{:?}", kind);
        }
        assert!(close(resolved("hsl(var(--primary))"), Color::from_rgb(0.0, 1.0, 1.0)));
    }

    #[test]
    fn test_triplet() {
        assert!(close(parse_hsl_triplet("180 100% 50%").unwrap(), Color::from_rgb(0.0, 1.0, 1.0)));
        assert!(parse_hsl_triplet("180 100%").is_none());
    }
}
