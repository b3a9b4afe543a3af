use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Millis, Viewport};
use crate::foundation::error::{ReelError, ReelResult};
use crate::page::theme::ThemeName;

/// Page-level settings: cadences, copy, theme and viewport metrics.
///
/// Every field has a default matching the shipped page, so a config file only needs the values
/// it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
    pub theme: ThemeName,
    /// Visible height in px.
    pub viewport_height: f64,
    /// Delay between card stack rotations.
    pub card_cycle_ms: u64,
    /// Length of the eased card reorder; 0 snaps.
    pub card_transition_ms: u64,
    /// Scroll offset in px past which the navbar switches to its filled style.
    pub navbar_threshold: f64,
    /// Delay between typed characters.
    pub type_char_ms: u64,
    /// How long a finished message stays before it is cleared.
    pub type_pause_ms: u64,
    pub messages: Vec<String>,
    pub card_titles: Vec<String>,
    pub hero_lines: usize,
    pub manifesto_lines: usize,
    pub protocol_steps: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            theme: ThemeName::Dark,
            viewport_height: 900.0,
            card_cycle_ms: 3000,
            card_transition_ms: 700,
            navbar_threshold: 50.0,
            type_char_ms: 50,
            type_pause_ms: 2000,
            messages: [
                "Selects delivered to inbox...",
                "Retouching pipeline activated...",
                "Color grading complete...",
                "Finals ready. Same day.",
            ]
            .map(String::from)
            .to_vec(),
            card_titles: ["Candid Moments", "Natural Light", "Real Emotion"]
                .map(String::from)
                .to_vec(),
            hero_lines: 3,
            manifesto_lines: 3,
            protocol_steps: 3,
        }
    }
}

impl StageConfig {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ReelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ReelError::validation(format!("parse stage config JSON: {e}")))
    }

    /// Parse from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ReelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open stage config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject values the page cannot run with.
    pub fn validate(&self) -> ReelResult<()> {
        if !(self.viewport_height.is_finite() && self.viewport_height > 0.0) {
            return Err(ReelError::validation(format!(
                "viewport_height must be > 0, got {}",
                self.viewport_height
            )));
        }
        if !(self.navbar_threshold.is_finite() && self.navbar_threshold >= 0.0) {
            return Err(ReelError::validation(format!(
                "navbar_threshold must be >= 0, got {}",
                self.navbar_threshold
            )));
        }
        if self.card_transition_ms > self.card_cycle_ms {
            return Err(ReelError::validation(format!(
                "card_transition_ms ({}) must not exceed card_cycle_ms ({})",
                self.card_transition_ms, self.card_cycle_ms
            )));
        }
        for (name, ms) in [
            ("card_cycle_ms", self.card_cycle_ms),
            ("type_char_ms", self.type_char_ms),
            ("type_pause_ms", self.type_pause_ms),
        ] {
            if ms == 0 {
                return Err(ReelError::validation(format!("{name} must be > 0")));
            }
        }
        if self.messages.is_empty() || self.messages.iter().any(|m| m.is_empty()) {
            return Err(ReelError::validation(
                "messages must be a non-empty list of non-empty strings",
            ));
        }
        if self.card_titles.is_empty() {
            return Err(ReelError::validation("card_titles must not be empty"));
        }
        if self.hero_lines == 0 || self.manifesto_lines == 0 {
            return Err(ReelError::validation(
                "hero_lines and manifesto_lines must be > 0",
            ));
        }
        if self.protocol_steps < 2 {
            return Err(ReelError::validation(format!(
                "protocol_steps must be >= 2, got {}",
                self.protocol_steps
            )));
        }
        Ok(())
    }

    /// Card stack cadence.
    pub fn card_cadence(&self) -> Millis {
        Millis(self.card_cycle_ms)
    }

    /// Card reorder transition.
    pub fn card_transition(&self) -> Millis {
        Millis(self.card_transition_ms)
    }

    /// Typist character delay.
    pub fn char_delay(&self) -> Millis {
        Millis(self.type_char_ms)
    }

    /// Typist pause between messages.
    pub fn pause(&self) -> Millis {
        Millis(self.type_pause_ms)
    }

    /// Viewport metrics for a document of `document_height` px.
    pub fn viewport(&self, document_height: f64) -> ReelResult<Viewport> {
        Viewport::new(self.viewport_height, document_height)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
