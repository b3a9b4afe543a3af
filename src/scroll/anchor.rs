use std::str::FromStr;

use crate::foundation::error::{ReelError, ReelResult};

/// A distance along one axis, either absolute or relative to a reference height.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Length {
    /// Absolute pixels.
    Px(f64),
    /// Fraction of the reference height (element height or viewport height).
    Fraction(f64),
}

impl Length {
    /// Resolve against a reference height in px.
    pub fn resolve(self, reference: f64) -> f64 {
        match self {
            Self::Px(px) => px,
            Self::Fraction(f) => f * reference,
        }
    }

    fn parse_token(token: &str, allow_vh: bool) -> ReelResult<Self> {
        let bad = || ReelError::parse(format!("bad scroll length '{token}'"));
        let num = |s: &str| -> ReelResult<f64> {
            s.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(bad)
        };
        let t = token.trim();
        match t {
            "top" => return Ok(Self::Fraction(0.0)),
            "center" => return Ok(Self::Fraction(0.5)),
            "bottom" => return Ok(Self::Fraction(1.0)),
            _ => {}
        }
        if let Some(v) = t.strip_suffix('%') {
            return Ok(Self::Fraction(num(v)? / 100.0));
        }
        if let Some(v) = t.strip_suffix("vh") {
            if !allow_vh {
                return Err(bad());
            }
            return Ok(Self::Fraction(num(v)? / 100.0));
        }
        if let Some(v) = t.strip_suffix("px") {
            return Ok(Self::Px(num(v)?));
        }
        Ok(Self::Px(num(t)?))
    }
}

/// Where a scroll position is reached: when the point `element` down the trigger box meets the
/// point `viewport` down the viewport.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Point on the trigger element, relative to its height.
    pub element: Length,
    /// Point on the viewport, relative to its height.
    pub viewport: Length,
}

impl Anchor {
    /// `"top top"`.
    pub const TOP_TOP: Self = Self {
        element: Length::Fraction(0.0),
        viewport: Length::Fraction(0.0),
    };
    /// `"top bottom"`: the trigger's top enters the viewport from below.
    pub const TOP_BOTTOM: Self = Self {
        element: Length::Fraction(0.0),
        viewport: Length::Fraction(1.0),
    };
    /// `"bottom top"`: the trigger's bottom leaves the viewport at the top.
    pub const BOTTOM_TOP: Self = Self {
        element: Length::Fraction(1.0),
        viewport: Length::Fraction(0.0),
    };

    /// Anchor from explicit lengths.
    pub fn new(element: Length, viewport: Length) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this anchor is met for a trigger box spanning
    /// `[element_top, element_top + element_height]`.
    pub fn resolve(self, element_top: f64, element_height: f64, viewport_height: f64) -> f64 {
        element_top + self.element.resolve(element_height) - self.viewport.resolve(viewport_height)
    }
}

impl FromStr for Anchor {
    type Err = ReelError;

    /// Two whitespace-separated tokens: element point then viewport point, e.g. `"top 75%"`,
    /// `"bottom top"`, `"top -900px"`. The viewport token also accepts `vh`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(el), Some(vp), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(ReelError::parse(format!(
                "scroll anchor '{s}' must be '<element> <viewport>'"
            )));
        };
        Ok(Self {
            element: Length::parse_token(el, false)?,
            viewport: Length::parse_token(vp, true)?,
        })
    }
}

/// The end of a scroll range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum EndAnchor {
    /// An anchor resolved like the start.
    Anchor(Anchor),
    /// A distance after the resolved start; fractions refer to the viewport height.
    Relative(Length),
}

impl Default for EndAnchor {
    fn default() -> Self {
        Self::Anchor(Anchor::BOTTOM_TOP)
    }
}

impl From<Anchor> for EndAnchor {
    fn from(anchor: Anchor) -> Self {
        Self::Anchor(anchor)
    }
}

impl FromStr for EndAnchor {
    type Err = ReelError;

    /// Either an [`Anchor`] or `"+=<length>"` (`"+=300vh"`, `"+=1200"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().strip_prefix("+=") {
            Some(rest) => Ok(Self::Relative(Length::parse_token(rest, true)?)),
            None => s.parse().map(Self::Anchor),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/anchor.rs"]
mod tests;
