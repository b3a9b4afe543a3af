use crate::animation::props::PropertySet;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::ids::ContextId;
use crate::target::{TargetId, TargetStore};

/// A two-state style switch on the raw scroll offset: `raised` once the page is scrolled past
/// `threshold` px, `lowered` at or above it.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollFlag {
    pub target: TargetId,
    pub threshold: f64,
    pub raised: PropertySet,
    pub lowered: PropertySet,
}

impl ScrollFlag {
    /// Reject thresholds that are not finite and style pairs that do not cover the same keys.
    pub fn validate(&self) -> ReelResult<()> {
        if !self.threshold.is_finite() {
            return Err(ReelError::config(format!(
                "flag threshold must be finite, got {}",
                self.threshold
            )));
        }
        if self.raised.is_empty() || !self.raised.same_keys(&self.lowered) {
            return Err(ReelError::config(
                "flag styles must be non-empty and set the same properties",
            ));
        }
        self.raised.validate()?;
        self.lowered.validate()
    }
}

#[derive(Debug)]
pub(crate) struct FlagSlot {
    pub(crate) context: ContextId,
    flag: ScrollFlag,
    // `None` until the first update writes one of the two styles.
    raised: Option<bool>,
}

impl FlagSlot {
    pub(crate) fn new(context: ContextId, flag: ScrollFlag) -> Self {
        Self {
            context,
            flag,
            raised: None,
        }
    }

    pub(crate) fn is_raised(&self) -> bool {
        self.raised == Some(true)
    }

    /// Write the matching style when the flag flips; otherwise leave the target alone.
    pub(crate) fn update(&mut self, scroll: f64, targets: &mut TargetStore) {
        let raised = scroll > self.flag.threshold;
        if self.raised == Some(raised) {
            return;
        }
        self.raised = Some(raised);
        let style = if raised {
            &self.flag.raised
        } else {
            &self.flag.lowered
        };
        for (key, value) in style.iter() {
            targets.apply(self.flag.target, key, *value);
        }
        tracing::trace!(target_id = ?self.flag.target, raised, "scroll flag flipped");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/flag.rs"]
mod tests;
