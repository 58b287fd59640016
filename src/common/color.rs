use serde::{Deserialize, Serialize};

/// A 24-bit RGB color, parsed from a `#RRGGBB` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb24 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb24 {
    /// Parses a `#RRGGBB` value (hex digits case-insensitive). Anything
    /// else, including a missing `#` or extra characters, is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        let digits = value.strip_prefix('#')?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
        let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
        let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Euclidean distance to a real-valued RGB point.
    pub fn distance_to(&self, point: &Centroid) -> f64 {
        let dr = self.r as f64 - point.r;
        let dg = self.g as f64 - point.g;
        let db = self.b as f64 - point.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// The arithmetic mean RGB point of a set of colors. Kept as real
/// numbers, never rounded; only used as an intermediate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Centroid {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Centroid {
    pub fn of(colors: &[Rgb24]) -> Self {
        let n = colors.len() as f64;
        let mut sum_r = 0u32;
        let mut sum_g = 0u32;
        let mut sum_b = 0u32;
        for color in colors {
            sum_r += color.r as u32;
            sum_g += color.g as u32;
            sum_b += color.b as u32;
        }
        Self {
            r: sum_r as f64 / n,
            g: sum_g as f64 / n,
            b: sum_b as f64 / n,
        }
    }
}
