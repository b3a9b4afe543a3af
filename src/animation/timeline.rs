use std::str::FromStr;

use crate::animation::ease::Ease;
use crate::animation::props::{PropKey, PropValue, PropertySet};
use crate::foundation::error::{ReelError, ReelResult};
use crate::target::{TargetId, TargetStore};

/// Ease and duration applied to children that do not set their own.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Defaults {
    /// Default ease.
    pub ease: Ease,
    /// Default duration in seconds.
    pub duration: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            ease: Ease::OutQuad,
            duration: 0.5,
        }
    }
}

/// How many extra times a timeline plays after the first iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Repeat {
    /// `n` additional iterations (`Count(0)` plays once).
    Count(u32),
    /// Loop until the owning context is disposed.
    Infinite,
}

impl Default for Repeat {
    fn default() -> Self {
        Self::Count(0)
    }
}

/// Placement of a child relative to what the timeline already holds. Times are seconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Position {
    /// Relative to the current end of the timeline (`"+=0.3"`, `"-=0.8"`).
    End(f64),
    /// Relative to the start of the previously added child (`"<"`).
    PrevStart(f64),
    /// Relative to the end of the previously added child (`">"`).
    PrevEnd(f64),
    /// Absolute time.
    At(f64),
}

impl Default for Position {
    fn default() -> Self {
        Self::End(0.0)
    }
}

impl From<f64> for Position {
    fn from(at: f64) -> Self {
        Self::At(at)
    }
}

impl FromStr for Position {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        fn num(s: &str, whole: &str) -> ReelResult<f64> {
            if s.is_empty() {
                return Ok(0.0);
            }
            s.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ReelError::parse(format!("bad timeline position '{whole}'")))
        }

        let t = s.trim();
        if let Some(rest) = t.strip_prefix("+=") {
            return Ok(Self::End(num(rest, s)?));
        }
        if let Some(rest) = t.strip_prefix("-=") {
            return Ok(Self::End(-num(rest, s)?));
        }
        if let Some(rest) = t.strip_prefix('<') {
            return Ok(Self::PrevStart(num(rest, s)?));
        }
        if let Some(rest) = t.strip_prefix('>') {
            return Ok(Self::PrevEnd(num(rest, s)?));
        }
        if t.is_empty() {
            return Ok(Self::End(0.0));
        }
        Ok(Self::At(num(t, s)?))
    }
}

/// Declarative description of a single step, before it is placed on a timeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tween {
    from: Option<PropertySet>,
    to: Option<PropertySet>,
    duration: Option<f64>,
    ease: Option<Ease>,
    delay: f64,
}

impl Tween {
    /// Animate from the target's state at activation to `to`.
    pub fn to(to: PropertySet) -> Self {
        Self {
            to: Some(to),
            ..Self::default()
        }
    }

    /// Animate from `from` to the target's state when the timeline was created.
    pub fn from_state(from: PropertySet) -> Self {
        Self {
            from: Some(from),
            ..Self::default()
        }
    }

    /// Animate between two explicit states.
    pub fn from_to(from: PropertySet, to: PropertySet) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            ..Self::default()
        }
    }

    /// Zero-duration step: jump to `to` at its start.
    pub fn set(to: PropertySet) -> Self {
        Self {
            to: Some(to),
            duration: Some(0.0),
            ..Self::default()
        }
    }

    /// Override the inherited duration (seconds).
    pub fn duration(mut self, secs: f64) -> Self {
        self.duration = Some(secs);
        self
    }

    /// Override the inherited ease.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = Some(ease);
        self
    }

    /// Extra delay added to the resolved start.
    pub fn delay(mut self, secs: f64) -> Self {
        self.delay = secs;
        self
    }

    fn into_step(self, target: TargetId, defaults: Defaults) -> ReelResult<Step> {
        let duration = self.duration.unwrap_or(defaults.duration);
        if !(duration.is_finite() && duration >= 0.0) {
            return Err(ReelError::config(format!(
                "step duration must be finite and >= 0, got {duration}"
            )));
        }
        if !(self.delay.is_finite() && self.delay >= 0.0) {
            return Err(ReelError::config(format!(
                "step delay must be finite and >= 0, got {}",
                self.delay
            )));
        }
        match (&self.from, &self.to) {
            (None, None) => {
                return Err(ReelError::config("step needs a from state, a to state, or both"));
            }
            (Some(from), Some(to)) => {
                from.validate()?;
                to.validate()?;
                if !from.same_keys(to) {
                    return Err(ReelError::config(format!(
                        "step from/to key sets differ: {:?} vs {:?}",
                        from.keys().collect::<Vec<_>>(),
                        to.keys().collect::<Vec<_>>()
                    )));
                }
            }
            (Some(one), None) | (None, Some(one)) => one.validate()?,
        }
        if self.from.as_ref().or(self.to.as_ref()).is_some_and(PropertySet::is_empty) {
            return Err(ReelError::config("step must touch at least one property"));
        }
        Ok(Step {
            target,
            from: self.from,
            to: self.to,
            duration,
            ease: self.ease.unwrap_or(defaults.ease),
        })
    }
}

#[derive(Clone, Debug)]
struct Step {
    target: TargetId,
    // Captured on first activation when omitted.
    from: Option<PropertySet>,
    // Captured when the timeline is created in a context when omitted.
    to: Option<PropertySet>,
    duration: f64,
    ease: Ease,
}

impl Step {
    fn capture_to(&mut self, store: &TargetStore) {
        if self.to.is_none()
            && let Some(from) = &self.from
        {
            let target = self.target;
            self.to = Some(from.project(|k| store.value(target, k)));
        }
    }

    fn render(
        &mut self,
        local: f64,
        store: &mut TargetStore,
        touched: &mut Vec<(TargetId, PropKey)>,
    ) {
        let target = self.target;
        if local < 0.0 {
            let Some(from) = &self.from else {
                return;
            };
            for (key, value) in from.iter() {
                if !touched.contains(&(target, key)) {
                    store.apply(target, key, *value);
                    touched.push((target, key));
                }
            }
            return;
        }

        self.capture_to(store);
        if self.from.is_none()
            && let Some(to) = &self.to
        {
            self.from = Some(to.project(|k| store.value(target, k)));
        }
        let (Some(from), Some(to)) = (&self.from, &self.to) else {
            return;
        };

        let p = if self.duration <= 0.0 {
            1.0
        } else {
            (local / self.duration).clamp(0.0, 1.0)
        };
        let e = self.ease.apply(p);
        for ((key, a), (_, b)) in from.iter().zip(to.iter()) {
            let value = if p >= 1.0 {
                *b
            } else if p <= 0.0 {
                *a
            } else {
                PropValue::lerp(a, b, e)
            };
            store.apply(target, key, value);
            if !touched.contains(&(target, key)) {
                touched.push((target, key));
            }
        }
    }
}

#[derive(Clone, Debug)]
enum EntryKind {
    Step(Step),
    Nested(Box<Timeline>),
}

#[derive(Clone, Debug)]
struct Entry {
    start: f64,
    kind: EntryKind,
}

impl Entry {
    fn len(&self) -> f64 {
        match &self.kind {
            EntryKind::Step(s) => s.duration,
            EntryKind::Nested(t) => t.total_duration(),
        }
    }
}

/// Ordered, seekable sequence of steps and nested timelines.
///
/// Seeking is a pure function of the requested time once lazy captures have happened, so it
/// can be driven backwards and forwards by scroll as well as by the clock.
#[derive(Clone, Debug)]
pub struct Timeline {
    entries: Vec<Entry>,
    iteration: f64,
    repeat: Repeat,
    repeat_delay: f64,
    scratch: Vec<(TargetId, PropKey)>,
}

impl Timeline {
    /// Start building a timeline with [`Defaults::default`].
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::new(Defaults::default())
    }

    /// Length of one iteration in seconds.
    pub fn duration(&self) -> f64 {
        self.iteration
    }

    /// Length including repeats and repeat delays; infinite for [`Repeat::Infinite`].
    pub fn total_duration(&self) -> f64 {
        match self.repeat {
            Repeat::Count(n) => {
                self.iteration * f64::from(n + 1) + self.repeat_delay * f64::from(n)
            }
            Repeat::Infinite => f64::INFINITY,
        }
    }

    /// Repeat policy.
    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    /// `true` when the timeline loops forever.
    pub fn is_infinite(&self) -> bool {
        matches!(self.repeat, Repeat::Infinite)
    }

    /// Map a time on the timeline's own clock into a time within one iteration.
    ///
    /// Repeat delays are dead time holding the end state. Negative times pass through so nested
    /// children that have not started yet still render their pending state.
    pub fn iteration_time(&self, time: f64) -> f64 {
        if time <= 0.0 {
            return time;
        }
        let d = self.iteration;
        if !self.is_infinite() && time >= self.total_duration() {
            return d;
        }
        let cycle = d + self.repeat_delay;
        if cycle <= 0.0 {
            return d;
        }
        let k = (time / cycle).floor();
        let r = time - k * cycle;
        r.min(d)
    }

    /// Apply the state at `time` to every target this timeline animates.
    ///
    /// Entries apply in start order and later ones overwrite earlier ones. A nested timeline is
    /// a single entry at its own start, so a sibling placed after it wins over all of its steps.
    pub fn seek(&mut self, time: f64, store: &mut TargetStore) {
        let t = self.iteration_time(time);
        let mut touched = std::mem::take(&mut self.scratch);
        touched.clear();
        self.render(t, store, &mut touched);
        self.scratch = touched;
    }

    /// Resolve every omitted `to` state from the targets' current values.
    pub fn capture(&mut self, store: &TargetStore) {
        for entry in &mut self.entries {
            match &mut entry.kind {
                EntryKind::Step(s) => s.capture_to(store),
                EntryKind::Nested(t) => t.capture(store),
            }
        }
    }

    /// Every `(target, property)` pair this timeline writes, without duplicates.
    pub fn touched(&self) -> Vec<(TargetId, PropKey)> {
        let mut out = Vec::new();
        self.collect_touched(&mut out);
        out
    }

    /// Every distinct target this timeline writes.
    pub fn targets(&self) -> Vec<TargetId> {
        let mut out: Vec<TargetId> = Vec::new();
        for (t, _) in self.touched() {
            if !out.contains(&t) {
                out.push(t);
            }
        }
        out
    }

    fn collect_touched(&self, out: &mut Vec<(TargetId, PropKey)>) {
        for entry in &self.entries {
            match &entry.kind {
                EntryKind::Step(s) => {
                    let keys = s.from.as_ref().or(s.to.as_ref());
                    for key in keys.into_iter().flat_map(|set| set.keys()) {
                        if !out.contains(&(s.target, key)) {
                            out.push((s.target, key));
                        }
                    }
                }
                EntryKind::Nested(t) => t.collect_touched(out),
            }
        }
    }

    fn render(
        &mut self,
        t: f64,
        store: &mut TargetStore,
        touched: &mut Vec<(TargetId, PropKey)>,
    ) {
        for entry in &mut self.entries {
            let local = t - entry.start;
            match &mut entry.kind {
                EntryKind::Step(s) => s.render(local, store, touched),
                EntryKind::Nested(child) => {
                    let ct = child.iteration_time(local);
                    child.render(ct, store, touched);
                }
            }
        }
    }
}

/// Builder placing steps at resolved start times.
#[derive(Clone, Debug)]
pub struct TimelineBuilder {
    defaults: Defaults,
    entries: Vec<Entry>,
    end: f64,
    prev_start: f64,
    prev_end: f64,
    repeat: Repeat,
    repeat_delay: f64,
}

impl TimelineBuilder {
    /// Empty builder with the given defaults.
    pub fn new(defaults: Defaults) -> Self {
        Self {
            defaults,
            entries: Vec::new(),
            end: 0.0,
            prev_start: 0.0,
            prev_end: 0.0,
            repeat: Repeat::default(),
            repeat_delay: 0.0,
        }
    }

    /// Replace the defaults used by steps added from now on.
    pub fn defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Default ease for steps added from now on.
    pub fn ease(mut self, ease: Ease) -> Self {
        self.defaults.ease = ease;
        self
    }

    /// Default duration for steps added from now on.
    pub fn duration(mut self, secs: f64) -> Self {
        self.defaults.duration = secs;
        self
    }

    /// Repeat policy.
    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Dead time between iterations, in seconds.
    pub fn repeat_delay(mut self, secs: f64) -> Self {
        self.repeat_delay = secs;
        self
    }

    /// A builder for a nested timeline inheriting these defaults.
    pub fn child(&self) -> TimelineBuilder {
        TimelineBuilder::new(self.defaults)
    }

    /// Current end of the timeline in seconds.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Place `tween` on `target`.
    pub fn tween(self, target: TargetId, tween: Tween, at: Position) -> ReelResult<Self> {
        self.stagger(&[target], tween, 0.0, at)
    }

    /// Shortcut for [`Tween::to`] placed at the end.
    pub fn to(self, target: TargetId, to: PropertySet) -> ReelResult<Self> {
        self.tween(target, Tween::to(to), Position::default())
    }

    /// Shortcut for [`Tween::set`].
    pub fn set(self, target: TargetId, to: PropertySet, at: Position) -> ReelResult<Self> {
        self.tween(target, Tween::set(to), at)
    }

    /// Place one copy of `tween` per target, each starting `each` seconds after the previous.
    ///
    /// The group behaves as a single child for the purposes of `"<"` and `">"`.
    pub fn stagger(
        mut self,
        targets: &[TargetId],
        tween: Tween,
        each: f64,
        at: Position,
    ) -> ReelResult<Self> {
        if targets.is_empty() {
            return Err(ReelError::config("stagger needs at least one target"));
        }
        if !(each.is_finite() && each >= 0.0) {
            return Err(ReelError::config(format!(
                "stagger interval must be finite and >= 0, got {each}"
            )));
        }
        let base = (self.resolve(at) + tween.delay).max(0.0);
        let mut group_end = base;
        for (i, &target) in targets.iter().enumerate() {
            let step = tween.clone().into_step(target, self.defaults)?;
            let start = base + each * i as f64;
            group_end = group_end.max(start + step.duration);
            self.insert(Entry {
                start,
                kind: EntryKind::Step(step),
            });
        }
        self.mark_placed(base, group_end);
        Ok(self)
    }

    /// Place a nested timeline. Its local time is this timeline's time minus its start.
    pub fn nest(mut self, child: TimelineBuilder, at: Position) -> ReelResult<Self> {
        let child = child.build()?;
        if child.is_infinite() {
            return Err(ReelError::config(
                "nested timelines must have a finite duration",
            ));
        }
        let start = self.resolve(at).max(0.0);
        let end = start + child.total_duration();
        self.insert(Entry {
            start,
            kind: EntryKind::Nested(Box::new(child)),
        });
        self.mark_placed(start, end);
        Ok(self)
    }

    /// Finish and validate.
    pub fn build(self) -> ReelResult<Timeline> {
        if !(self.repeat_delay.is_finite() && self.repeat_delay >= 0.0) {
            return Err(ReelError::config(format!(
                "repeat delay must be finite and >= 0, got {}",
                self.repeat_delay
            )));
        }
        let iteration = self
            .entries
            .iter()
            .map(|e| e.start + e.len())
            .fold(0.0, f64::max);
        Ok(Timeline {
            entries: self.entries,
            iteration,
            repeat: self.repeat,
            repeat_delay: self.repeat_delay,
            scratch: Vec::new(),
        })
    }

    fn resolve(&self, at: Position) -> f64 {
        match at {
            Position::End(off) => self.end + off,
            Position::PrevStart(off) => self.prev_start + off,
            Position::PrevEnd(off) => self.prev_end + off,
            Position::At(t) => t,
        }
    }

    fn insert(&mut self, entry: Entry) {
        let idx = self.entries.partition_point(|e| e.start <= entry.start);
        self.entries.insert(idx, entry);
    }

    fn mark_placed(&mut self, start: f64, end: f64) {
        self.prev_start = start;
        self.prev_end = end;
        self.end = self.end.max(end);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
