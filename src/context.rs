use crate::animation::props::{PropKey, PropValue};
use crate::animation::timeline::Timeline;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::ids::{BindingId, ContextId, FlagId, MachineId, PlaybackId, TimelineId};
use crate::machines::TimedMachine;
use crate::scroll::binding::{BindingMode, BindingSlot};
use crate::scroll::flag::{FlagSlot, ScrollFlag};
use crate::scroll::range::ScrollRange;
use crate::stage::{Stage, TimelineSlot};
use crate::target::TargetId;

/// Everything a context created, in creation order.
#[derive(Debug, Default)]
pub(crate) struct ContextRecord {
    label: String,
    timelines: Vec<TimelineId>,
    bindings: Vec<BindingId>,
    // Values at creation time of every (target, key) a timeline writes.
    reverts: Vec<(TargetId, PropKey, PropValue)>,
}

/// Proof that a context is open. Consumed by [`Stage::dispose`].
#[must_use = "an undisposed context keeps animating; pass it to Stage::dispose"]
#[derive(Debug)]
pub struct ContextHandle {
    id: ContextId,
    released: bool,
}

impl ContextHandle {
    /// Id of the context this handle owns.
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Shorthand for [`Stage::dispose`].
    pub fn dispose(self, stage: &mut Stage) {
        stage.dispose(self);
    }
}

impl Drop for ContextHandle {
    fn drop(&mut self) {
        if !self.released {
            tracing::warn!(context = ?self.id, "context handle dropped without dispose; resources leak");
        }
    }
}

/// Factory for the resources of one open context.
///
/// Every timeline, binding, flag, playback and machine created through a scope belongs to its context
/// and is released when the context is disposed.
pub struct ContextScope<'a> {
    stage: &'a mut Stage,
    id: ContextId,
}

impl ContextScope<'_> {
    /// Id of the context being set up.
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Read access to the stage, e.g. to look up targets or viewport metrics.
    pub fn stage(&self) -> &Stage {
        self.stage
    }

    /// Register a timeline with this context.
    ///
    /// Omitted `to` states are captured from the targets' current values, and those values are
    /// recorded so disposal can restore them.
    pub fn create(&mut self, mut timeline: Timeline) -> ReelResult<TimelineId> {
        let touched = timeline.touched();
        let targets = self.stage.targets();
        if let Some((missing, _)) = touched.iter().find(|(t, _)| !targets.contains(*t)) {
            return Err(ReelError::config(format!(
                "timeline animates unknown target {missing:?}"
            )));
        }
        let reverts: Vec<_> = touched
            .iter()
            .map(|&(t, k)| (t, k, targets.value(t, k)))
            .collect();
        timeline.capture(targets);

        let id = TimelineId(self.stage.timelines.insert(TimelineSlot {
            timeline,
            context: self.id,
        }));
        let record = self.record()?;
        record.timelines.push(id);
        record.reverts.extend(reverts);
        Ok(id)
    }

    /// Play `timeline` on the clock from 0, starting with the next [`Stage::tick`].
    ///
    /// The time-0 state is rendered immediately. Playing a timeline that is already playing
    /// restarts it.
    pub fn play(&mut self, timeline: TimelineId) -> ReelResult<PlaybackId> {
        self.owned(timeline)?;
        let (targets, tl) = self
            .stage
            .targets_and_timeline(timeline)
            .ok_or_else(|| disposed(timeline))?;
        tl.seek(0.0, targets);
        Ok(self.stage.start_playback(timeline, self.id))
    }

    /// Drive `timeline` from scroll over `range`.
    ///
    /// Enter and scrub need a timeline; a pin may carry one, which it then scrubs while pinned.
    /// A trigger without layout leaves the binding pending until the next refresh.
    pub fn bind(
        &mut self,
        timeline: Option<TimelineId>,
        range: ScrollRange,
        mode: BindingMode,
    ) -> ReelResult<BindingId> {
        if let Some(tl) = timeline {
            self.owned(tl)?;
        }
        match (mode, timeline) {
            (BindingMode::Enter | BindingMode::Scrub, None) => {
                return Err(ReelError::config(format!(
                    "{mode:?} binding needs a timeline"
                )));
            }
            (BindingMode::Scrub | BindingMode::Pin, Some(tl))
                if self.stage.timeline(tl).is_some_and(Timeline::is_infinite) =>
            {
                return Err(ReelError::config(
                    "cannot scrub a timeline that repeats forever",
                ));
            }
            _ => {}
        }
        if !self.stage.targets().contains(range.trigger) {
            return Err(ReelError::config(format!(
                "binding trigger {:?} is not registered",
                range.trigger
            )));
        }
        if mode == BindingMode::Pin
            && let Some(doc) = self.stage.document_box(range.trigger)
        {
            let resolved = range.resolve(doc, self.stage.viewport().height);
            if !resolved.is_valid() {
                return Err(ReelError::config(format!(
                    "pin range is empty: start {} >= end {}",
                    resolved.start_px, resolved.end_px
                )));
            }
        }

        if mode == BindingMode::Enter
            && let Some(tl) = timeline
            && let Some((targets, t)) = self.stage.targets_and_timeline(tl)
        {
            t.seek(0.0, targets);
        }

        let id = BindingId(
            self.stage
                .bindings
                .insert(BindingSlot::new(self.id, timeline, range, mode)),
        );
        self.record()?.bindings.push(id);
        self.stage.refresh();
        tracing::debug!(context = ?self.id, ?mode, "binding attached");
        Ok(id)
    }

    /// Pin `range.trigger` for the length of `range` without driving a timeline.
    pub fn pin(&mut self, range: ScrollRange) -> ReelResult<BindingId> {
        self.bind(None, range, BindingMode::Pin)
    }

    /// Switch `flag.target` between two styles on the scroll offset.
    ///
    /// The style matching the current offset is written immediately. Disposal restores the
    /// values the flagged properties had before.
    pub fn flag(&mut self, flag: ScrollFlag) -> ReelResult<FlagId> {
        flag.validate()?;
        let targets = self.stage.targets();
        if !targets.contains(flag.target) {
            return Err(ReelError::config(format!(
                "flag target {:?} is not registered",
                flag.target
            )));
        }
        let reverts: Vec<_> = flag
            .raised
            .keys()
            .map(|k| (flag.target, k, targets.value(flag.target, k)))
            .collect();
        self.record()?.reverts.extend(reverts);
        let id = FlagId(self.stage.flags.insert(FlagSlot::new(self.id, flag)));
        self.stage.scroll_flag(id);
        Ok(id)
    }

    /// Start a timed machine. Its initial state is written now; the first tick follows the
    /// delay it returns, counted from the next [`Stage::tick`].
    pub fn spawn(&mut self, machine: impl TimedMachine + 'static) -> ReelResult<MachineId> {
        self.record()?;
        Ok(self.stage.start_machine(self.id, Box::new(machine)))
    }

    fn owned(&self, timeline: TimelineId) -> ReelResult<()> {
        match self.stage.timelines.get(timeline.0) {
            Some(slot) if slot.context == self.id => Ok(()),
            Some(_) => Err(ReelError::config(format!(
                "timeline {timeline:?} belongs to another context"
            ))),
            None => Err(disposed(timeline)),
        }
    }

    fn record(&mut self) -> ReelResult<&mut ContextRecord> {
        self.stage
            .contexts
            .get_mut(self.id.0)
            .ok_or_else(|| ReelError::config(format!("context {:?} is closed", self.id)))
    }
}

fn disposed(timeline: TimelineId) -> ReelError {
    ReelError::config(format!("timeline {timeline:?} was disposed"))
}

impl Stage {
    /// Open an animation context and run `setup` inside it.
    ///
    /// If `setup` fails, everything it created is released before the error is returned.
    #[tracing::instrument(skip(self, setup))]
    pub fn open<F>(&mut self, label: &str, setup: F) -> ReelResult<ContextHandle>
    where
        F: FnOnce(&mut ContextScope<'_>) -> ReelResult<()>,
    {
        let id = ContextId(self.contexts.insert(ContextRecord {
            label: label.to_owned(),
            ..ContextRecord::default()
        }));
        let mut scope = ContextScope { stage: self, id };
        match setup(&mut scope) {
            Ok(()) => {
                tracing::debug!(context = ?id, "context opened");
                Ok(ContextHandle {
                    id,
                    released: false,
                })
            }
            Err(err) => {
                tracing::debug!(context = ?id, error = %err, "context setup failed; releasing");
                self.release(id);
                Err(err)
            }
        }
    }

    /// Release everything the context owns and restore what its timelines changed.
    #[tracing::instrument(skip(self, handle), fields(context = ?handle.id))]
    pub fn dispose(&mut self, mut handle: ContextHandle) {
        handle.released = true;
        self.release(handle.id);
    }

    /// Label given to an open context.
    pub fn context_label(&self, id: ContextId) -> Option<&str> {
        self.contexts.get(id.0).map(|r| r.label.as_str())
    }

    fn release(&mut self, id: ContextId) {
        let Some(record) = self.contexts.remove(id.0) else {
            return;
        };

        let playbacks: Vec<_> = self
            .playbacks
            .iter()
            .filter(|(_, p)| p.context == id)
            .map(|(key, _)| key)
            .collect();
        for key in playbacks {
            self.playbacks.remove(key);
        }

        let flags: Vec<_> = self
            .flags
            .iter()
            .filter(|(_, f)| f.context == id)
            .map(|(key, _)| key)
            .collect();
        for &key in &flags {
            self.flags.remove(key);
        }

        let mut had_pin = false;
        for binding in &record.bindings {
            if let Some(slot) = self.bindings.remove(binding.0) {
                had_pin |= slot.mode == BindingMode::Pin;
                slot.release(self.targets_mut());
            }
        }

        let machines = self.stop_machines(id);

        for timeline in &record.timelines {
            self.timelines.remove(timeline.0);
        }

        let targets = self.targets_mut();
        for &(target, key, value) in record.reverts.iter().rev() {
            targets.apply(target, key, value);
        }

        if had_pin {
            self.refresh();
        }
        tracing::debug!(
            context = ?id,
            label = %record.label,
            timelines = record.timelines.len(),
            bindings = record.bindings.len(),
            flags = flags.len(),
            machines,
            "context released"
        );
    }
}

#[cfg(test)]
#[path = "../tests/unit/context.rs"]
mod tests;
