//! Per-frame simulation step
//!
//! Sequences the rules each frame: steering, player steps on a fixed
//! interval, probe physics, then collisions. Input arrives as `Command`s.

use super::adversary::speed_boost;
use super::claim::resolve_claim;
use super::player::{Direction, StepOutcome};
use super::state::{GameEvent, GameState, LossCause, RunPhase};
use crate::cell_center;

/// Input commands, applied synchronously on dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Stage a heading change (applied at the start of the next frame)
    Steer(Direction),
    /// Stop moving and drop any staged heading
    Halt,
    /// Start over (only from Defeat or Victory)
    Restart,
}

/// Handle one input command
pub fn dispatch(state: &mut GameState, command: Command) {
    match command {
        Command::Steer(dir) => {
            if !state.phase.is_terminal() {
                state.steering.queue(dir);
            }
        }
        Command::Halt => state.steering.halt(),
        Command::Restart => {
            if state.phase.is_terminal() {
                restart(state);
            }
        }
    }
}

/// Reset to the first level with full lives
pub fn restart(state: &mut GameState) {
    state.lives = state.settings.start_lives;
    state.level_index = 0;
    state.start_level();
    state.events.push(GameEvent::RunRestarted);
    log::info!("Run restarted");
}

/// Advance the game by one rendered frame of `dt` seconds
pub fn update(state: &mut GameState, dt: f32) {
    if state.phase.is_terminal() {
        return;
    }
    let dt = dt.clamp(0.0, state.settings.max_frame_dt);

    let guard_reversal = state.player.has_live_trail();
    state.steering.apply_pending(guard_reversal);

    drain_steps(state, dt);
    if state.phase.is_terminal() {
        return;
    }

    update_adversary(state, dt);
    if !state.phase.is_terminal() {
        check_contact(state);
    }
}

/// Spend accumulated time on whole player steps
fn drain_steps(state: &mut GameState, dt: f32) {
    let interval = state.settings.step_interval;
    state.step_timer += dt;

    while state.step_timer >= interval {
        state.step_timer -= interval;
        match state.player.step(&mut state.grid, &mut state.steering) {
            StepOutcome::Moved => {}
            StepOutcome::Closed => {
                close_trail(state);
                if state.phase.is_terminal() {
                    break;
                }
            }
            StepOutcome::Idle | StepOutcome::Blocked => {
                // Standing still must not bank a burst of steps
                state.step_timer = state.step_timer.min(interval);
                break;
            }
        }
    }
}

/// Resolve the active trail against the probe's position.
///
/// An empty trail is a no-op claim: nothing is credited.
pub fn close_trail(state: &mut GameState) {
    let had_trail = !state.player.trail.is_empty();
    let probe_cell = state.adversary.cell(state.cell_size());
    let claimed = resolve_claim(&mut state.grid, &state.player.trail, probe_cell);
    state
        .player
        .finish_trail(&mut state.grid, &mut state.steering);
    state.update_coverage();

    if !had_trail {
        return;
    }

    log::debug!(
        "Claimed {} cells, coverage {:.1}%",
        claimed,
        state.coverage * 100.0
    );
    if claimed > 0 {
        state
            .events
            .push(GameEvent::TerritorySecured { cells: claimed });
    }
    check_level_completion(state);
}

/// Advance or finish the run once the level's target is met
fn check_level_completion(state: &mut GameState) {
    if state.coverage < state.level().target {
        return;
    }

    if state.is_last_level() {
        state.phase = RunPhase::Victory;
        state.events.push(GameEvent::RunWon);
        log::info!("All sectors cleared");
        return;
    }

    let cleared = state.level_index;
    state.events.push(GameEvent::LevelCleared {
        level_index: cleared,
    });
    state.level_index += 1;
    state.start_level();
    state.events.push(GameEvent::LevelStarted {
        level_index: state.level_index,
    });
}

/// Move the probe; a probe entering the live trail costs a life
fn update_adversary(state: &mut GameState, dt: f32) {
    let boost = speed_boost(state.coverage, state.settings.max_speed_boost);
    let cell_size = state.cell_size();
    let cell = state
        .adversary
        .advance(&state.grid, cell_size, dt, boost);

    if state.player.is_drawing() && state.player.trail_contains(&state.grid, cell) {
        lose_life(state, LossCause::TrailBreach);
    }
}

/// Probe touching the player costs a life
fn check_contact(state: &mut GameState) {
    let player_center = cell_center(state.player.pos, state.cell_size());
    let distance = state.adversary.pos.distance(player_center);
    if distance < state.adversary.radius * state.settings.contact_factor {
        lose_life(state, LossCause::Contact);
    }
}

/// Drop a life, discard the trail, respawn both actors
pub fn lose_life(state: &mut GameState, cause: LossCause) {
    if state.phase.is_terminal() {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    let start = state.player_start();
    state.player.reset(&mut state.grid, start);
    state.respawn_adversary();

    if state.lives == 0 {
        state.phase = RunPhase::Defeat;
        state.events.push(GameEvent::RunLost { cause });
        log::info!("Run lost ({:?})", cause);
    } else {
        state.events.push(GameEvent::LifeLost {
            cause,
            lives_left: state.lives,
        });
        log::debug!("Life lost ({:?}), {} left", cause, state.lives);
    }
}
