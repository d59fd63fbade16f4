//! Run state and core simulation types
//!
//! `GameState` owns everything: grid, player, probe, steering and progression.
//! Other modules receive the parts they need as explicit parameters.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::adversary::Adversary;
use super::grid::Grid;
use super::player::{Player, Steering};
use crate::settings::{ConfigError, LevelConfig, Settings};

/// Phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunPhase {
    #[default]
    Playing,
    /// Out of lives
    Defeat,
    /// Final level cleared
    Victory,
}

impl RunPhase {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != RunPhase::Playing
    }
}

/// Why a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Probe touched the player
    Contact,
    /// Probe crossed the active trail
    TrailBreach,
}

/// Things that happened during a frame, for banners and logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A trail closed and enclosed `cells` empty cells
    TerritorySecured { cells: usize },
    LifeLost { cause: LossCause, lives_left: u8 },
    RunLost { cause: LossCause },
    /// Target reached with more levels to go
    LevelCleared { level_index: usize },
    LevelStarted { level_index: usize },
    RunWon,
    RunRestarted,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    pub seed: u64,
    pub rng: Pcg32,

    /// Current level (0-based)
    pub level_index: usize,
    pub lives: u8,
    /// Claimed interior cells / interior cells
    pub coverage: f32,
    pub phase: RunPhase,

    pub grid: Grid,
    pub player: Player,
    pub adversary: Adversary,
    pub steering: Steering,
    /// Unspent time toward the next player step (seconds)
    pub step_timer: f32,

    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run at level 1. Settings are validated first.
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;

        let grid = Grid::new(settings.cols(), settings.rows());
        let radius = settings.cell_size as f32 * settings.adversary_radius_factor;
        let mut state = Self {
            player: Player::new(IVec2::ZERO),
            adversary: Adversary::new(radius),
            grid,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            level_index: 0,
            lives: settings.start_lives,
            coverage: 0.0,
            phase: RunPhase::Playing,
            steering: Steering::default(),
            step_timer: 0.0,
            events: Vec::new(),
            settings,
        };
        state.start_level();
        Ok(state)
    }

    /// Where the player enters each level: middle of the bottom wall
    pub fn player_start(&self) -> IVec2 {
        IVec2::new((self.grid.cols() / 2) as i32, self.grid.rows() as i32 - 1)
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.settings.cell_size as f32
    }

    pub fn level(&self) -> &LevelConfig {
        &self.settings.levels[self.level_index]
    }

    #[inline]
    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 >= self.settings.levels.len()
    }

    /// Fresh board for the current level. Lives and level index are kept.
    pub fn start_level(&mut self) {
        self.grid = Grid::new(self.settings.cols(), self.settings.rows());
        let start = self.player_start();
        self.player.reset(&mut self.grid, start);
        self.respawn_adversary();
        self.coverage = 0.0;
        self.steering = Steering::default();
        self.step_timer = 0.0;
        self.phase = RunPhase::Playing;
        log::info!(
            "Sector {} started (target {:.0}%)",
            self.level_index + 1,
            self.level().target * 100.0
        );
    }

    /// Probe back to the centre at the level's base speed
    pub fn respawn_adversary(&mut self) {
        let speed = self.level().adversary_speed;
        let cell_size = self.cell_size();
        self.adversary
            .respawn(&self.grid, cell_size, speed, &mut self.rng);
    }

    /// Recompute coverage from the grid
    pub fn update_coverage(&mut self) {
        let interior = self.grid.interior_cells().max(1);
        self.coverage = self.grid.count_claimed_interior() as f32 / interior as f32;
    }

    /// Take the events raised so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
