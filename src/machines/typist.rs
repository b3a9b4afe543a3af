use crate::foundation::core::Millis;
use crate::foundation::error::{ReelError, ReelResult};
use crate::machines::TimedMachine;
use crate::target::{TargetId, TargetStore};

/// Which clock the typist is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TypistPhase {
    /// Revealing one character per character tick.
    Typing,
    /// Holding the finished message until the pause elapses.
    Holding,
}

/// Typewriter emitter cycling through a fixed list of messages.
///
/// Two timescales: a fast per-character clock while typing and a slow pause between messages.
#[derive(Clone, Debug)]
pub struct Typist {
    target: TargetId,
    messages: Vec<String>,
    message_index: usize,
    revealed: usize,
    phase: TypistPhase,
    char_delay: Millis,
    pause: Millis,
}

impl Typist {
    /// Typist writing into `target`'s text slot.
    pub fn new(
        target: TargetId,
        messages: Vec<String>,
        char_delay: Millis,
        pause: Millis,
    ) -> ReelResult<Self> {
        if messages.is_empty() {
            return Err(ReelError::config("typist needs at least one message"));
        }
        if let Some(i) = messages.iter().position(|m| m.is_empty()) {
            return Err(ReelError::config(format!("typist message {i} is empty")));
        }
        if char_delay.0 == 0 || pause.0 == 0 {
            return Err(ReelError::config("typist delays must be > 0 ms"));
        }
        Ok(Self {
            target,
            messages,
            message_index: 0,
            revealed: 0,
            phase: TypistPhase::Typing,
            char_delay,
            pause,
        })
    }

    /// Index of the message being typed or held.
    pub fn message_index(&self) -> usize {
        self.message_index
    }

    /// Characters revealed so far.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Current phase.
    pub fn phase(&self) -> TypistPhase {
        self.phase
    }

    /// Revealed prefix of the current message.
    pub fn text(&self) -> &str {
        let msg = &self.messages[self.message_index];
        match msg.char_indices().nth(self.revealed) {
            Some((byte, _)) => &msg[..byte],
            None => msg,
        }
    }

    /// Advance one transition and return the delay before the next one.
    pub fn advance(&mut self) -> Millis {
        match self.phase {
            TypistPhase::Typing => {
                self.revealed += 1;
                if self.revealed >= self.messages[self.message_index].chars().count() {
                    self.phase = TypistPhase::Holding;
                    self.pause
                } else {
                    self.char_delay
                }
            }
            TypistPhase::Holding => {
                self.revealed = 0;
                self.message_index = (self.message_index + 1) % self.messages.len();
                self.phase = TypistPhase::Typing;
                self.char_delay
            }
        }
    }
}

impl TimedMachine for Typist {
    fn name(&self) -> &str {
        "typist"
    }

    fn start(&mut self, targets: &mut TargetStore) -> Millis {
        targets.set_text(self.target, self.text());
        self.char_delay
    }

    fn tick(&mut self, targets: &mut TargetStore) -> Millis {
        let delay = self.advance();
        targets.set_text(self.target, self.text());
        delay
    }
}

#[cfg(test)]
#[path = "../../tests/unit/machines/typist.rs"]
mod tests;
