use crate::animation::timeline::Timeline;
use crate::clock::{Clock, TimerQueue};
use crate::context::ContextRecord;
use crate::foundation::core::{Millis, Rect, Viewport};
use crate::foundation::error::ReelResult;
use crate::foundation::ids::{
    Arena, BindingId, ContextId, FlagId, MachineId, PlaybackId, SlotKey, TimelineId,
};
use crate::machines::TimedMachine;
use crate::scroll::binding::{BindingMode, BindingSlot, BindingState, ScrollEffect};
use crate::scroll::flag::FlagSlot;
use crate::target::{Positioning, TargetId, TargetStore};

pub(crate) struct TimelineSlot {
    pub(crate) timeline: Timeline,
    pub(crate) context: ContextId,
}

pub(crate) struct PlaybackSlot {
    pub(crate) timeline: TimelineId,
    pub(crate) context: ContextId,
    // Set by the first tick after the playback was requested.
    pub(crate) started: Option<Millis>,
}

pub(crate) struct MachineSlot {
    pub(crate) machine: Box<dyn TimedMachine>,
    pub(crate) context: ContextId,
    // Delay returned by `start`; scheduled from the first tick after the spawn.
    first_delay: Option<Millis>,
    // Deadline of the last tick that fired.
    last_tick: Option<Millis>,
    // Sequence number of the machine's live timer; older timers are stale.
    pub(crate) seq: u64,
}

// A reserved pin spacer: flow bottom of the pinned trigger and the reserved height.
#[derive(Clone, Copy, Debug)]
struct Spacer {
    below: f64,
    height: f64,
}

/// Runtime owning the targets, viewport metrics, clock and every animation context.
///
/// The host drives it from four entry points: [`Stage::scroll_to`], [`Stage::resize`],
/// [`Stage::set_layout`] and [`Stage::tick`]. Nothing else mutates target state.
pub struct Stage {
    targets: TargetStore,
    viewport: Viewport,
    scroll: f64,
    clock: Clock,
    timers: TimerQueue<MachineId>,
    spacers: Vec<Spacer>,
    finished: Vec<SlotKey>,
    pub(crate) timelines: Arena<TimelineSlot>,
    pub(crate) bindings: Arena<BindingSlot>,
    pub(crate) flags: Arena<FlagSlot>,
    pub(crate) playbacks: Arena<PlaybackSlot>,
    pub(crate) machines: Arena<MachineSlot>,
    pub(crate) contexts: Arena<ContextRecord>,
}

impl Stage {
    /// Empty stage at scroll offset 0 and time 0.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            targets: TargetStore::default(),
            viewport,
            scroll: 0.0,
            clock: Clock::default(),
            timers: TimerQueue::default(),
            spacers: Vec::new(),
            finished: Vec::new(),
            timelines: Arena::default(),
            bindings: Arena::default(),
            flags: Arena::default(),
            playbacks: Arena::default(),
            machines: Arena::default(),
            contexts: Arena::default(),
        }
    }

    /// Target state.
    pub fn targets(&self) -> &TargetStore {
        &self.targets
    }

    /// Mutable target state, for host-side registration and initial styling.
    ///
    /// Layout changes made through the store are only picked up by the next refresh; prefer
    /// [`Stage::set_layout`].
    pub fn targets_mut(&mut self) -> &mut TargetStore {
        &mut self.targets
    }

    /// Register an element and, if it is already rendered, its flow box.
    pub fn register(&mut self, name: impl Into<String>, layout: Option<Rect>) -> TargetId {
        let id = self.targets.insert(name);
        if layout.is_some() {
            self.set_layout(id, layout);
        }
        id
    }

    /// Report a new flow box for `id` (or `None` when it is no longer rendered).
    pub fn set_layout(&mut self, id: TargetId, layout: Option<Rect>) {
        self.targets.set_layout(id, layout);
        self.refresh();
    }

    /// Current viewport metrics.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Apply new viewport metrics, recompute every scroll range and re-apply the current scroll.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, height: f64, document_height: f64) -> ReelResult<()> {
        self.viewport = Viewport::new(height, document_height)?;
        self.refresh();
        Ok(())
    }

    /// Current scroll offset in px.
    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height() - self.viewport.height).max(0.0)
    }

    /// Document height plus every reserved pin spacer.
    pub fn scroll_height(&self) -> f64 {
        self.viewport.document_height + self.spacers.iter().map(|s| s.height).sum::<f64>()
    }

    /// Scroll to `offset` (clamped to the scrollable range) and drive every binding.
    pub fn scroll_to(&mut self, offset: f64) {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        self.scroll = offset.clamp(0.0, self.max_scroll());
        self.apply_scroll();
    }

    /// Last timestamp passed to [`Stage::tick`].
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    /// Advance the clock: fire due machine timers, render machine frames, then advance
    /// wall-clock playbacks.
    ///
    /// Machines spawned since the previous tick count their first delay from `now`.
    pub fn tick(&mut self, now: Millis) {
        let now = self.clock.advance(now);

        for (key, slot) in self.machines.iter_mut() {
            if let Some(delay) = slot.first_delay.take() {
                slot.seq = self
                    .timers
                    .schedule(now.after(Millis(delay.0.max(1))), MachineId(key));
            }
        }

        while let Some((due, seq, id)) = self.timers.pop_due(now) {
            let Some(slot) = self.machines.get_mut(id.0) else {
                continue;
            };
            if slot.seq != seq {
                continue;
            }
            let delay = slot.machine.tick(&mut self.targets);
            slot.last_tick = Some(due);
            slot.seq = self.timers.schedule(due.after(Millis(delay.0.max(1))), id);
        }

        for (_, slot) in self.machines.iter_mut() {
            if let Some(last) = slot.last_tick {
                slot.machine.frame(now.since(last), &mut self.targets);
            }
        }

        self.finished.clear();
        for (key, playback) in self.playbacks.iter_mut() {
            let Some(slot) = self.timelines.get_mut(playback.timeline.0) else {
                self.finished.push(key);
                continue;
            };
            let started = *playback.started.get_or_insert(now);
            let t = now.secs_since(started);
            slot.timeline.seek(t, &mut self.targets);
            if !slot.timeline.is_infinite() && t >= slot.timeline.total_duration() {
                self.finished.push(key);
            }
        }
        for &key in &self.finished {
            self.playbacks.remove(key);
        }
    }

    /// Recompute every binding's pixel range from the current layout, then re-apply the scroll.
    ///
    /// Pins resolve first, top to bottom, so that the spacer each one reserves displaces the
    /// triggers below it before those are resolved.
    pub fn refresh(&mut self) {
        let vh = self.viewport.height;
        self.spacers.clear();

        let mut pins: Vec<(f64, SlotKey)> = Vec::new();
        for (key, binding) in self.bindings.iter_mut() {
            if binding.mode != BindingMode::Pin {
                continue;
            }
            match self.targets.layout(binding.range.trigger) {
                Some(flow) => pins.push((flow.y0, key)),
                None => {
                    if binding.resolved.take().is_some() {
                        binding.release(&mut self.targets);
                    }
                }
            }
        }
        pins.sort_by(|a, b| a.0.total_cmp(&b.0));

        for (_, key) in pins {
            let Some(binding) = self.bindings.get_mut(key) else {
                continue;
            };
            let Some(flow) = self.targets.layout(binding.range.trigger) else {
                continue;
            };
            let doc = shifted(flow, &self.spacers);
            let range = binding.range.resolve(doc, vh);
            if !range.is_valid() {
                tracing::warn!(
                    start = range.start_px,
                    end = range.end_px,
                    "pin range collapsed after refresh; pin is pending"
                );
                if binding.resolved.take().is_some() {
                    binding.release(&mut self.targets);
                }
                continue;
            }
            binding.resolved = Some(range);
            binding.trigger_top = doc.y0;
            self.spacers.push(Spacer {
                below: flow.y1,
                height: binding.spacer(),
            });
        }

        for (_, binding) in self.bindings.iter_mut() {
            if binding.mode == BindingMode::Pin {
                continue;
            }
            let Some(flow) = self.targets.layout(binding.range.trigger) else {
                binding.resolved = None;
                continue;
            };
            let doc = shifted(flow, &self.spacers);
            let range = binding.range.resolve(doc, vh);
            if !range.is_valid() {
                tracing::warn!(
                    start = range.start_px,
                    end = range.end_px,
                    "degenerate scroll range; progress becomes a step"
                );
            }
            binding.resolved = Some(range);
            binding.trigger_top = doc.y0;
        }

        self.scroll = self.scroll.clamp(0.0, self.max_scroll());
        self.apply_scroll();
    }

    /// Flow box of `id` displaced by the pin spacers above it.
    pub fn document_box(&self, id: TargetId) -> Option<Rect> {
        self.targets.layout(id).map(|flow| shifted(flow, &self.spacers))
    }

    /// Distance of `id`'s top edge from the viewport top, taking pinning into account.
    pub fn viewport_position(&self, id: TargetId) -> Option<f64> {
        let doc = self.document_box(id)?;
        Some(match self.targets.positioning(id) {
            Positioning::Fixed { top } => top,
            Positioning::Flow { shift } => doc.y0 + shift - self.scroll,
        })
    }

    /// Current state of a binding, or `None` once its context was disposed.
    pub fn binding_state(&self, id: BindingId) -> Option<BindingState> {
        self.bindings.get(id.0).map(BindingSlot::state)
    }

    /// `true` while a scroll flag is raised, or `None` once its context was disposed.
    pub fn flag_raised(&self, id: FlagId) -> Option<bool> {
        self.flags.get(id.0).map(FlagSlot::is_raised)
    }

    /// A live timeline.
    pub fn timeline(&self, id: TimelineId) -> Option<&Timeline> {
        self.timelines.get(id.0).map(|s| &s.timeline)
    }

    /// `true` while `id` has a running playback.
    pub fn is_playing(&self, id: TimelineId) -> bool {
        self.playbacks.iter().any(|(_, p)| p.timeline == id)
    }

    /// Number of open contexts.
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    /// Number of live timelines.
    pub fn timeline_count(&self) -> usize {
        self.timelines.len()
    }

    /// Number of live bindings.
    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    /// Number of live scroll flags.
    pub fn flag_count(&self) -> usize {
        self.flags.len()
    }

    /// Number of running playbacks.
    pub fn playback_count(&self) -> usize {
        self.playbacks.len()
    }

    /// Number of running timed machines.
    pub fn machine_count(&self) -> usize {
        self.machines.len()
    }

    /// Number of queued machine timers. Machines spawned since the last tick have none yet.
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Earliest queued machine deadline.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.timers.next_due()
    }

    pub(crate) fn targets_and_timeline(
        &mut self,
        id: TimelineId,
    ) -> Option<(&mut TargetStore, &mut Timeline)> {
        let slot = self.timelines.get_mut(id.0)?;
        Some((&mut self.targets, &mut slot.timeline))
    }

    pub(crate) fn start_machine(
        &mut self,
        context: ContextId,
        mut machine: Box<dyn TimedMachine>,
    ) -> MachineId {
        let delay = machine.start(&mut self.targets);
        tracing::debug!(machine = %machine.name(), first_tick_in_ms = delay.0, "machine started");
        MachineId(self.machines.insert(MachineSlot {
            machine,
            context,
            first_delay: Some(delay),
            last_tick: None,
            seq: 0,
        }))
    }

    pub(crate) fn stop_machines(&mut self, context: ContextId) -> usize {
        let owned: Vec<_> = self
            .machines
            .iter()
            .filter(|(_, m)| m.context == context)
            .map(|(key, _)| key)
            .collect();
        for &key in &owned {
            self.machines.remove(key);
        }
        self.cancel_timers();
        owned.len()
    }

    pub(crate) fn start_playback(&mut self, timeline: TimelineId, context: ContextId) -> PlaybackId {
        start_playback(&mut self.playbacks, timeline, context)
    }

    fn cancel_timers(&mut self) {
        let machines = &self.machines;
        self.timers
            .retain(|seq, id| machines.get(id.0).is_some_and(|m| m.seq == seq));
    }

    pub(crate) fn scroll_flag(&mut self, id: FlagId) {
        let scroll = self.scroll;
        if let Some(flag) = self.flags.get_mut(id.0) {
            flag.update(scroll, &mut self.targets);
        }
    }

    fn apply_scroll(&mut self) {
        let scroll = self.scroll;
        for (_, binding) in self.bindings.iter_mut() {
            let timeline = binding
                .timeline
                .and_then(|id| self.timelines.get_mut(id.0))
                .map(|slot| &mut slot.timeline);
            match binding.update(scroll, timeline, &mut self.targets) {
                ScrollEffect::Nothing => {}
                ScrollEffect::StartPlayback(id) => {
                    start_playback(&mut self.playbacks, id, binding.context);
                }
            }
        }
        for (_, flag) in self.flags.iter_mut() {
            flag.update(scroll, &mut self.targets);
        }
    }
}

fn start_playback(
    playbacks: &mut Arena<PlaybackSlot>,
    timeline: TimelineId,
    context: ContextId,
) -> PlaybackId {
    let running = playbacks
        .iter()
        .find(|(_, p)| p.timeline == timeline)
        .map(|(key, _)| key);
    if let Some(key) = running {
        playbacks.remove(key);
    }
    PlaybackId(playbacks.insert(PlaybackSlot {
        timeline,
        context,
        started: None,
    }))
}

fn shifted(flow: Rect, spacers: &[Spacer]) -> Rect {
    let dy: f64 = spacers
        .iter()
        .filter(|s| flow.y0 >= s.below)
        .map(|s| s.height)
        .sum();
    Rect::new(flow.x0, flow.y0 + dy, flow.x1, flow.y1 + dy)
}

#[cfg(test)]
#[path = "../tests/unit/stage.rs"]
mod tests;
