//! Wall-clock state machines that cycle on their own cadence, independent of scroll.

use crate::foundation::core::Millis;
use crate::target::TargetStore;

pub(crate) mod cards;
pub(crate) mod pointer;
pub(crate) mod typist;

/// A finite state machine advanced only by its own timer.
///
/// The stage calls [`TimedMachine::start`] when the machine is spawned and then
/// [`TimedMachine::tick`] at every deadline; each call returns the delay until the next tick.
/// The first deadline is counted from the first stage tick after the spawn. Machines that
/// animate between ticks also get [`TimedMachine::frame`] on every stage tick.
/// State lives in the implementing type, so transitions can be exercised without a stage.
pub trait TimedMachine {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Write the initial presentational state; returns the delay before the first tick.
    fn start(&mut self, targets: &mut TargetStore) -> Millis;

    /// Advance one transition; returns the delay before the next tick.
    fn tick(&mut self, targets: &mut TargetStore) -> Millis;

    /// Render in-between state, `since_tick` after the last tick fired.
    fn frame(&mut self, _since_tick: Millis, _targets: &mut TargetStore) {}
}
