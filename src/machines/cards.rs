use crate::animation::ease::Ease;
use crate::animation::props::PropKey;
use crate::foundation::core::Millis;
use crate::foundation::error::{ReelError, ReelResult};
use crate::machines::TimedMachine;
use crate::target::{TargetId, TargetStore};

/// Reorder transition used unless [`CardCycler::with_transition`] says otherwise.
pub const CARD_TRANSITION: Millis = Millis(700);

// Interpolated during a reorder; the stacking index switches at once.
const MOVING: [PropKey; 3] = [PropKey::Y, PropKey::Scale, PropKey::Opacity];

/// Rotating card stack: on every tick the back card comes to the front.
///
/// Each reorder eases every card from where it is to its new slot with [`Ease::OutBack`], so
/// cards settle with a slight overshoot.
#[derive(Clone, Debug)]
pub struct CardCycler {
    cards: Vec<TargetId>,
    // order[slot] = index into `cards`; slot 0 is the front of the stack.
    order: Vec<usize>,
    cadence: Millis,
    transition: Millis,
    // Values each card had when the running reorder began, indexed like `cards`.
    moving: Option<Vec<[f64; 3]>>,
}

impl CardCycler {
    /// Cards in their initial front-to-back order.
    pub fn new(cards: Vec<TargetId>, cadence: Millis) -> ReelResult<Self> {
        if cards.is_empty() {
            return Err(ReelError::config("card cycler needs at least one card"));
        }
        if cadence.0 == 0 {
            return Err(ReelError::config("card cycler cadence must be > 0 ms"));
        }
        let order = (0..cards.len()).collect();
        Ok(Self {
            cards,
            order,
            cadence,
            transition: CARD_TRANSITION,
            moving: None,
        })
    }

    /// Length of the eased reorder; zero snaps cards into place.
    pub fn with_transition(mut self, transition: Millis) -> Self {
        self.transition = transition;
        self
    }

    /// Current visual order, front first, as indices into the initial card list.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// `true` while a reorder is still easing.
    pub fn is_moving(&self) -> bool {
        self.moving.is_some()
    }

    /// Move the back card to the front.
    pub fn rotate(&mut self) {
        self.order.rotate_right(1);
    }

    fn settle(&mut self, targets: &mut TargetStore) {
        self.moving = None;
        for (slot, &card) in self.order.iter().enumerate() {
            let id = self.cards[card];
            for (key, value) in MOVING.into_iter().zip(resting(slot)) {
                targets.apply(id, key, value.into());
            }
            targets.apply(id, PropKey::ZIndex, (10.0 - slot as f64).into());
        }
    }
}

fn resting(slot: usize) -> [f64; 3] {
    let depth = slot as f64;
    [depth * 10.0, 1.0 - depth * 0.04, (1.0 - depth * 0.25).max(0.0)]
}

impl TimedMachine for CardCycler {
    fn name(&self) -> &str {
        "card-cycler"
    }

    fn start(&mut self, targets: &mut TargetStore) -> Millis {
        self.settle(targets);
        self.cadence
    }

    fn tick(&mut self, targets: &mut TargetStore) -> Millis {
        self.rotate();
        if self.transition.0 == 0 {
            self.settle(targets);
            return self.cadence;
        }
        let from = self
            .cards
            .iter()
            .map(|&id| MOVING.map(|key| targets.num(id, key)))
            .collect();
        self.moving = Some(from);
        for (slot, &card) in self.order.iter().enumerate() {
            targets.apply(self.cards[card], PropKey::ZIndex, (10.0 - slot as f64).into());
        }
        self.cadence
    }

    fn frame(&mut self, since_tick: Millis, targets: &mut TargetStore) {
        if since_tick >= self.transition {
            if self.moving.is_some() {
                self.settle(targets);
            }
            return;
        }
        let Some(from) = &self.moving else {
            return;
        };
        let e = Ease::OutBack.apply(since_tick.0 as f64 / self.transition.0 as f64);
        for (slot, &card) in self.order.iter().enumerate() {
            let id = self.cards[card];
            for (i, (key, to)) in MOVING.into_iter().zip(resting(slot)).enumerate() {
                let mut v = from[card][i] + (to - from[card][i]) * e;
                if key == PropKey::Opacity {
                    v = v.clamp(0.0, 1.0);
                }
                targets.apply(id, key, v.into());
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/machines/cards.rs"]
mod tests;
