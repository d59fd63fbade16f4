//! HUD text and the status banner
//!
//! Pure view-model: the browser layer copies these strings into the DOM.

use crate::consts::{BANNER_ADVANCE_DURATION, BANNER_DURATION, BANNER_PULSE_DURATION};
use crate::sim::{GameEvent, GameState, LossCause};

/// Formatted HUD values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hud {
    /// Rounded percentage, e.g. "42%"
    pub coverage: String,
    /// Zero-padded, e.g. "03"
    pub lives: String,
    /// 1-based, zero-padded, e.g. "01"
    pub level: String,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            coverage: format!("{}%", (state.coverage * 100.0).round() as u32),
            lives: format!("{:02}", state.lives),
            level: format!("{:02}", state.level_index + 1),
        }
    }
}

/// Banner wording for a lost life
pub fn loss_message(cause: LossCause) -> &'static str {
    match cause {
        LossCause::Contact => "Probe intercepted you",
        LossCause::TrailBreach => "Trail compromised",
    }
}

/// A message shown for a limited time
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub message: String,
    /// Seconds left on screen
    pub remaining: f32,
}

/// Single banner slot; a new message replaces the current one and its timer
#[derive(Debug, Clone, Default)]
pub struct BannerBoard {
    current: Option<Banner>,
    /// Victory overlay visibility
    pub victory_visible: bool,
}

impl BannerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, message: impl Into<String>, duration: f32) {
        self.current = Some(Banner {
            message: message.into(),
            remaining: duration,
        });
    }

    /// Short-lived banner
    pub fn pulse(&mut self, message: impl Into<String>) {
        self.show(message, BANNER_PULSE_DURATION);
    }

    /// Count down; the banner disappears when its time runs out
    pub fn advance(&mut self, dt: f32) {
        if let Some(banner) = &mut self.current {
            banner.remaining -= dt;
            if banner.remaining <= 0.0 {
                self.current = None;
            }
        }
    }

    /// The banner on screen, if any
    pub fn current(&self) -> Option<&Banner> {
        self.current.as_ref()
    }

    /// Feed a simulation event
    pub fn handle_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::TerritorySecured { .. } => self.pulse("Territory secured"),
            GameEvent::LifeLost { cause, lives_left } => self.show(
                format!("{}. {} lives remaining.", loss_message(*cause), lives_left),
                BANNER_DURATION,
            ),
            GameEvent::RunLost { cause } => self.show(
                format!("{}. Mission failed – press R to reset.", loss_message(*cause)),
                BANNER_DURATION,
            ),
            GameEvent::LevelCleared { .. } => {
                self.show("Sector cleared. Advancing…", BANNER_ADVANCE_DURATION)
            }
            GameEvent::LevelStarted { level_index } => {
                self.pulse(format!("Entering Sector {:02}", level_index + 1))
            }
            GameEvent::RunWon => {
                self.victory_visible = true;
                self.show("All intel recovered! Press R to replay.", BANNER_DURATION);
            }
            GameEvent::RunRestarted => {
                self.victory_visible = false;
                self.show("Systems reset. Secure the sector.", BANNER_DURATION);
            }
        }
    }
}
