use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{ReelError, ReelResult};
use crate::machines::pointer::PointerPalette;

/// Which token set a page is mounted with.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    /// Obsidian background, champagne accent.
    #[default]
    Dark,
    /// Warm white background, coral accent.
    Light,
}

impl ThemeName {
    /// Every theme, dark first.
    pub const ALL: [ThemeName; 2] = [ThemeName::Dark, ThemeName::Light];
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dark => "dark",
            Self::Light => "light",
        })
    }
}

impl FromStr for ThemeName {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(ReelError::parse(format!("unknown theme '{other}'"))),
        }
    }
}

/// Color tokens.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub background: Rgba8,
    pub surface: Rgba8,
    pub text: Rgba8,
    pub muted: Rgba8,
    pub accent: Rgba8,
    /// Fill of elements the pointer demo clicks.
    pub highlight: Rgba8,
    pub highlight_text: Rgba8,
    /// Navbar fill once the page is scrolled.
    pub nav_fill: Rgba8,
}

/// Font family tokens.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fonts {
    pub sans: String,
    pub serif: String,
    pub mono: String,
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            sans: "DM Sans".to_owned(),
            serif: "Cormorant Garamond".to_owned(),
            mono: "IBM Plex Mono".to_owned(),
        }
    }
}

/// A complete token set. Both themes share one choreography; only these values differ.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    pub name: ThemeName,
    pub palette: Palette,
    pub fonts: Fonts,
}

impl Theme {
    /// Tokens for `name`.
    pub fn by_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Obsidian / champagne / ivory.
    pub fn dark() -> Self {
        Self {
            name: ThemeName::Dark,
            palette: Palette {
                background: OBSIDIAN,
                surface: SLATE,
                text: IVORY,
                muted: IVORY.with_alpha(0.6),
                accent: CHAMPAGNE,
                highlight: CORAL,
                highlight_text: Rgba8::WHITE,
                nav_fill: OBSIDIAN.with_alpha(0.8),
            },
            fonts: Fonts::default(),
        }
    }

    /// Warm white / ink / coral.
    pub fn light() -> Self {
        Self {
            name: ThemeName::Light,
            palette: Palette {
                background: WARM_WHITE,
                surface: PAPER,
                text: INK,
                muted: GRAPHITE,
                accent: CORAL,
                highlight: CORAL,
                highlight_text: Rgba8::WHITE,
                nav_fill: Rgba8::WHITE.with_alpha(0.8),
            },
            fonts: Fonts::default(),
        }
    }

    /// Colors for the scripted pointer demo.
    pub fn pointer_palette(&self) -> PointerPalette {
        PointerPalette {
            highlight: self.palette.highlight,
            highlight_text: self.palette.highlight_text,
            day_text: self.palette.text,
            confirm_text: self.palette.accent,
        }
    }

    /// Check that no color token is fully transparent.
    pub fn validate(&self) -> ReelResult<()> {
        let p = &self.palette;
        for (name, c) in [
            ("background", p.background),
            ("surface", p.surface),
            ("text", p.text),
            ("muted", p.muted),
            ("accent", p.accent),
            ("highlight", p.highlight),
            ("highlight_text", p.highlight_text),
            ("nav_fill", p.nav_fill),
        ] {
            if c.a == 0 {
                return Err(ReelError::validation(format!(
                    "theme '{}' color '{name}' is fully transparent",
                    self.name
                )));
            }
        }
        if self.fonts.sans.trim().is_empty() {
            return Err(ReelError::validation("theme sans font is empty"));
        }
        Ok(())
    }
}

const OBSIDIAN: Rgba8 = Rgba8::rgb(0x0D, 0x0D, 0x12);
const SLATE: Rgba8 = Rgba8::rgb(0x2A, 0x2A, 0x35);
const IVORY: Rgba8 = Rgba8::rgb(0xFA, 0xF8, 0xF5);
const CHAMPAGNE: Rgba8 = Rgba8::rgb(0xC9, 0xA8, 0x4C);
const CORAL: Rgba8 = Rgba8::rgb(0xE8, 0x55, 0x3D);
const WARM_WHITE: Rgba8 = Rgba8::rgb(0xFA, 0xFA, 0xF8);
const PAPER: Rgba8 = Rgba8::rgb(0xF0, 0xEF, 0xED);
const INK: Rgba8 = Rgba8::rgb(0x11, 0x11, 0x11);
const GRAPHITE: Rgba8 = Rgba8::rgb(0x6B, 0x6B, 0x6B);

#[cfg(test)]
#[path = "../../tests/unit/page/theme.rs"]
mod tests;
