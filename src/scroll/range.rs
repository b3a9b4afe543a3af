use crate::foundation::core::Rect;
use crate::foundation::error::ReelResult;
use crate::scroll::anchor::{Anchor, EndAnchor};
use crate::target::TargetId;

/// Scroll interval declared against a trigger element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollRange {
    /// Element whose box anchors the range.
    pub trigger: TargetId,
    /// Where progress leaves 0.
    pub start: Anchor,
    /// Where progress reaches 1.
    pub end: EndAnchor,
}

impl ScrollRange {
    /// Range with explicit anchors.
    pub fn new(trigger: TargetId, start: Anchor, end: impl Into<EndAnchor>) -> Self {
        Self {
            trigger,
            start,
            end: end.into(),
        }
    }

    /// Range from textual anchors such as `("top 75%", "bottom top")` or `("top top", "+=300vh")`.
    pub fn parse(trigger: TargetId, start: &str, end: &str) -> ReelResult<Self> {
        Ok(Self {
            trigger,
            start: start.parse()?,
            end: end.parse()?,
        })
    }

    /// `"top bottom"` to `"bottom top"`: the whole time the trigger is visible.
    pub fn visible(trigger: TargetId) -> Self {
        Self::new(trigger, Anchor::TOP_BOTTOM, Anchor::BOTTOM_TOP)
    }

    /// Resolve against the trigger's document box and the viewport height.
    pub fn resolve(&self, trigger_box: Rect, viewport_height: f64) -> ResolvedRange {
        let top = trigger_box.y0;
        let height = trigger_box.height();
        let start_px = self.start.resolve(top, height, viewport_height);
        let end_px = match self.end {
            EndAnchor::Anchor(a) => a.resolve(top, height, viewport_height),
            EndAnchor::Relative(len) => start_px + len.resolve(viewport_height),
        };
        ResolvedRange { start_px, end_px }
    }
}

/// Absolute scroll interval `[start_px, end_px]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedRange {
    /// Scroll offset where progress is 0.
    pub start_px: f64,
    /// Scroll offset where progress is 1.
    pub end_px: f64,
}

impl ResolvedRange {
    /// `true` when `start_px < end_px`.
    pub fn is_valid(&self) -> bool {
        self.start_px < self.end_px
    }

    /// Scroll distance covered by the range (0 when degenerate).
    pub fn span(&self) -> f64 {
        (self.end_px - self.start_px).max(0.0)
    }

    /// `clamp((scroll - start) / (end - start), 0, 1)`.
    ///
    /// Degenerate ranges act as a step at `start_px`.
    pub fn progress(&self, scroll: f64) -> f64 {
        if !self.is_valid() {
            return if scroll >= self.start_px { 1.0 } else { 0.0 };
        }
        ((scroll - self.start_px) / (self.end_px - self.start_px)).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/range.rs"]
mod tests;
