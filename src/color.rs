//! Neon palette helpers
//!
//! Particles and enemies carry HSL colors (random hues read best against the
//! dark background); the canvas wants CSS color strings. This module converts
//! between the two. Malformed color strings fall back to white rather than
//! erroring - a bad color is a cosmetic problem, not a fatal one.

use serde::{Deserialize, Serialize};

/// An HSL color. `h` in [0, 360), `s` and `l` in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};

impl Hsl {
    /// Fully saturated neon color at the given hue
    pub fn neon(h: f32) -> Self {
        Self {
            h,
            s: 100.0,
            l: 50.0,
        }
    }

    /// Convert to RGB
    pub fn to_rgb(self) -> Rgb {
        let h = (self.h.rem_euclid(360.0)) / 360.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        if s == 0.0 {
            // Achromatic
            let v = (l * 255.0).round() as u8;
            return Rgb { r: v, g: v, b: v };
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        let r = hue_to_channel(p, q, h + 1.0 / 3.0);
        let g = hue_to_channel(p, q, h);
        let b = hue_to_channel(p, q, h - 1.0 / 3.0);

        Rgb {
            r: (r * 255.0).round() as u8,
            g: (g * 255.0).round() as u8,
            b: (b * 255.0).round() as u8,
        }
    }
}

fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl Rgb {
    /// Parse a CSS color string: `#rrggbb` or `hsl(h, s%, l%)`.
    ///
    /// Anything unparseable falls back to white.
    pub fn parse_css(s: &str) -> Rgb {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return Rgb { r, g, b };
                }
            }
            return WHITE;
        }
        if let Some(hsl) = parse_hsl(s) {
            return hsl.to_rgb();
        }
        WHITE
    }

    /// CSS `rgb(...)` string
    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// CSS `rgba(...)` string with the given alpha in [0, 1]
    pub fn css_with_alpha(&self, alpha: f32) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }
}

/// Parse `hsl(h, s%, l%)`
fn parse_hsl(s: &str) -> Option<Hsl> {
    let inner = s.strip_prefix("hsl(")?.strip_suffix(')')?;
    let mut parts = inner.split(',').map(str::trim);

    let h: f32 = parts.next()?.parse().ok()?;
    let s_pct: f32 = parts.next()?.strip_suffix('%')?.parse().ok()?;
    let l_pct: f32 = parts.next()?.strip_suffix('%')?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }

    Some(Hsl {
        h,
        s: s_pct,
        l: l_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(Hsl::neon(0.0).to_rgb(), Rgb { r: 255, g: 0, b: 0 });
        assert_eq!(Hsl::neon(120.0).to_rgb(), Rgb { r: 0, g: 255, b: 0 });
        assert_eq!(Hsl::neon(240.0).to_rgb(), Rgb { r: 0, g: 0, b: 255 });
    }

    #[test]
    fn test_achromatic() {
        let grey = Hsl {
            h: 50.0,
            s: 0.0,
            l: 50.0,
        };
        let rgb = grey.to_rgb();
        assert_eq!(rgb.r, rgb.g);
        assert_eq!(rgb.g, rgb.b);
    }

    #[test]
    fn test_hue_wraps() {
        assert_eq!(Hsl::neon(360.0).to_rgb(), Hsl::neon(0.0).to_rgb());
        assert_eq!(Hsl::neon(-120.0).to_rgb(), Hsl::neon(240.0).to_rgb());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(
            Rgb::parse_css("#00ffff"),
            Rgb {
                r: 0,
                g: 255,
                b: 255
            }
        );
    }

    #[test]
    fn test_parse_hsl_string() {
        assert_eq!(
            Rgb::parse_css("hsl(0, 100%, 50%)"),
            Rgb { r: 255, g: 0, b: 0 }
        );
    }

    #[test]
    fn test_malformed_falls_back_to_white() {
        assert_eq!(Rgb::parse_css("hsl(oops)"), WHITE);
        assert_eq!(Rgb::parse_css("#xyz"), WHITE);
        assert_eq!(Rgb::parse_css(""), WHITE);
        assert_eq!(Rgb::parse_css("hsl(120, 100, 50)"), WHITE);
    }

    #[test]
    fn test_css_with_alpha_clamps() {
        let red = Rgb { r: 255, g: 0, b: 0 };
        assert_eq!(red.css_with_alpha(2.0), "rgba(255,0,0,1.000)");
        assert_eq!(red.css_with_alpha(-1.0), "rgba(255,0,0,0.000)");
    }
}
