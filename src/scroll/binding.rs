use crate::animation::timeline::Timeline;
use crate::foundation::ids::{ContextId, TimelineId};
use crate::scroll::range::{ResolvedRange, ScrollRange};
use crate::target::{Positioning, TargetStore};

/// How a binding maps scroll progress onto its timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingMode {
    /// Play the timeline once, on the clock, the first time progress leaves 0.
    Enter,
    /// Seek the timeline to `progress * total_duration` on every scroll.
    Scrub,
    /// Hold the trigger fixed in the viewport while progress is inside `(0, 1)`.
    Pin,
}

/// Observable state of a binding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BindingState {
    /// The trigger has no layout yet (or its range is unusable); nothing is driven.
    Pending,
    /// Resolved and driven by scroll.
    Active {
        /// Current pixel interval.
        range: ResolvedRange,
        /// Progress at the last scroll update.
        progress: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EnterPhase {
    Armed,
    Fired,
}

/// Side effects a scroll update asks the stage to carry out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScrollEffect {
    Nothing,
    StartPlayback(TimelineId),
}

#[derive(Debug)]
pub(crate) struct BindingSlot {
    pub(crate) context: ContextId,
    pub(crate) timeline: Option<TimelineId>,
    pub(crate) range: ScrollRange,
    pub(crate) mode: BindingMode,
    pub(crate) resolved: Option<ResolvedRange>,
    // Document-space top of the trigger at the last refresh.
    pub(crate) trigger_top: f64,
    pub(crate) progress: f64,
    pub(crate) enter: EnterPhase,
}

impl BindingSlot {
    pub(crate) fn new(
        context: ContextId,
        timeline: Option<TimelineId>,
        range: ScrollRange,
        mode: BindingMode,
    ) -> Self {
        Self {
            context,
            timeline,
            range,
            mode,
            resolved: None,
            trigger_top: 0.0,
            progress: 0.0,
            enter: EnterPhase::Armed,
        }
    }

    pub(crate) fn state(&self) -> BindingState {
        match self.resolved {
            Some(range) => BindingState::Active {
                range,
                progress: self.progress,
            },
            None => BindingState::Pending,
        }
    }

    /// Scroll height this binding reserves below its trigger.
    pub(crate) fn spacer(&self) -> f64 {
        match (self.mode, self.resolved) {
            (BindingMode::Pin, Some(r)) => r.span(),
            _ => 0.0,
        }
    }

    pub(crate) fn pin_positioning(&self, range: ResolvedRange, progress: f64) -> Positioning {
        if progress > 0.0 && progress < 1.0 {
            Positioning::Fixed {
                top: self.trigger_top - range.start_px,
            }
        } else if progress >= 1.0 {
            Positioning::Flow {
                shift: range.span(),
            }
        } else {
            Positioning::Flow { shift: 0.0 }
        }
    }

    /// Drive the binding from a scroll offset. Constant work per call, no allocation.
    pub(crate) fn update(
        &mut self,
        scroll: f64,
        timeline: Option<&mut Timeline>,
        targets: &mut TargetStore,
    ) -> ScrollEffect {
        let Some(range) = self.resolved else {
            return ScrollEffect::Nothing;
        };
        let p = range.progress(scroll);
        self.progress = p;
        match self.mode {
            BindingMode::Scrub => {
                if let Some(tl) = timeline {
                    let at = p * tl.total_duration();
                    tl.seek(at, targets);
                }
                ScrollEffect::Nothing
            }
            BindingMode::Enter => match (self.enter, self.timeline) {
                (EnterPhase::Armed, Some(id)) if p > 0.0 => {
                    self.enter = EnterPhase::Fired;
                    ScrollEffect::StartPlayback(id)
                }
                _ => ScrollEffect::Nothing,
            },
            BindingMode::Pin => {
                targets.set_positioning(self.range.trigger, self.pin_positioning(range, p));
                if let Some(tl) = timeline {
                    let at = p * tl.total_duration();
                    tl.seek(at, targets);
                }
                ScrollEffect::Nothing
            }
        }
    }

    /// Return a pinned trigger to normal flow.
    pub(crate) fn release(&self, targets: &mut TargetStore) {
        if self.mode == BindingMode::Pin {
            targets.set_positioning(self.range.trigger, Positioning::default());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/binding.rs"]
mod tests;
