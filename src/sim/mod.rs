//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time only enters through `update(state, dt)`
//! - No rendering or platform dependencies

pub mod adversary;
pub mod claim;
pub mod grid;
pub mod player;
pub mod state;
pub mod tick;

pub use adversary::{Adversary, speed_boost};
pub use claim::{reachable_from, resolve_claim};
pub use grid::{Cell, Grid};
pub use player::{Direction, Player, PlayerMode, Steering, StepOutcome};
pub use state::{GameEvent, GameState, LossCause, RunPhase};
pub use tick::{Command, close_trail, dispatch, lose_life, restart, update};
