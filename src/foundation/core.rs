use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::Rect;

/// Host timestamp in whole milliseconds. Must be monotonically non-decreasing across
/// [`crate::Stage::tick`] calls.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// Saturating addition.
    pub fn after(self, delay: Millis) -> Self {
        Self(self.0.saturating_add(delay.0))
    }

    /// Elapsed time since `earlier` (zero if `earlier` is in the future).
    pub fn since(self, earlier: Millis) -> Millis {
        Self(self.0.saturating_sub(earlier.0))
    }

    /// Elapsed seconds since `earlier` (zero if `earlier` is in the future).
    pub fn secs_since(self, earlier: Millis) -> f64 {
        self.0.saturating_sub(earlier.0) as f64 / 1000.0
    }
}

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color from channels including alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with alpha replaced by `alpha * 255`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`, or the keyword `transparent`.
    pub fn parse_hex(s: &str) -> ReelResult<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::TRANSPARENT);
        }
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ReelError::parse(format!("color '{s}' must start with '#'")))?;
        let nibble = |c: u8| -> ReelResult<u8> {
            (c as char)
                .to_digit(16)
                .map(|d| d as u8)
                .ok_or_else(|| ReelError::parse(format!("color '{s}' has a non-hex digit")))
        };
        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => {
                let r = nibble(bytes[0])?;
                let g = nibble(bytes[1])?;
                let b = nibble(bytes[2])?;
                Ok(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 | 8 => {
                let mut ch = [255u8; 4];
                for (i, pair) in bytes.chunks(2).enumerate() {
                    ch[i] = (nibble(pair[0])? << 4) | nibble(pair[1])?;
                }
                Ok(Self::rgba(ch[0], ch[1], ch[2], ch[3]))
            }
            _ => Err(ReelError::parse(format!(
                "color '{s}' must have 3, 6 or 8 hex digits"
            ))),
        }
    }

    pub(crate) fn lerp(a: Self, b: Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a * (1.0 - t) + b * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Viewport metrics supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Visible height in px.
    pub height: f64,
    /// Height of the laid-out document in px, excluding pin spacers.
    pub document_height: f64,
}

impl Viewport {
    /// Create validated viewport metrics.
    pub fn new(height: f64, document_height: f64) -> ReelResult<Self> {
        if !(height.is_finite() && height > 0.0) {
            return Err(ReelError::config("viewport height must be > 0"));
        }
        if !(document_height.is_finite() && document_height >= 0.0) {
            return Err(ReelError::config("document height must be >= 0"));
        }
        Ok(Self {
            height,
            document_height,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
