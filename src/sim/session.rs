//! Session controller
//!
//! Idle → Countdown → Running ⇄ Paused → GameOver → (restart) Countdown.
//! Every operation returns whether it changed the phase; requests that do not
//! apply to the current phase are ignored.

use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::SIM_HZ;

/// Start a session from `Idle`
pub fn start(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Idle {
        return false;
    }
    state.reset_session();
    state.push_event(GameEvent::Started);
    log::info!("Session started (seed {})", state.seed);
    enter_countdown(state);
    true
}

/// Restart from `GameOver` or from the pause menu
pub fn restart(state: &mut GameState) -> bool {
    if !matches!(state.phase, GamePhase::GameOver | GamePhase::Paused) {
        return false;
    }
    state.reset_session();
    state.push_event(GameEvent::Restarted);
    log::info!("Session restarted");
    enter_countdown(state);
    true
}

/// Toggle between `Paused` and the phase it interrupted
pub fn toggle_pause(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Running | GamePhase::Countdown => {
            state.resume_phase = state.phase;
            state.phase = GamePhase::Paused;
            state.push_event(GameEvent::Paused);
            log::debug!("Paused");
            true
        }
        GamePhase::Paused => {
            state.phase = state.resume_phase;
            state.push_event(GameEvent::Resumed);
            log::debug!("Resumed into {:?}", state.phase);
            true
        }
        GamePhase::Idle | GamePhase::GameOver => false,
    }
}

/// Pause if the session is active; unlike `toggle_pause` this never resumes
pub fn suspend(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Running | GamePhase::Countdown => toggle_pause(state),
        GamePhase::Idle | GamePhase::Paused | GamePhase::GameOver => false,
    }
}

/// Advance the countdown by one tick, entering `Running` when it elapses
pub fn advance_countdown(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Countdown {
        return false;
    }
    state.countdown_ticks = state.countdown_ticks.saturating_sub(1);
    if state.countdown_ticks == 0 {
        enter_running(state);
        return true;
    }
    if state.countdown_ticks % SIM_HZ == 0 {
        state.push_event(GameEvent::CountdownTick {
            remaining: state.countdown_ticks / SIM_HZ,
        });
    }
    false
}

/// End the session. Idempotent: only the first call has any effect.
pub fn game_over(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }
    state.phase = GamePhase::GameOver;
    state.push_event(GameEvent::GameOver { score: state.score });
    log::info!(
        "Game over: score {} after {} ticks",
        state.score,
        state.time_ticks
    );
    true
}

/// Whole seconds left on the countdown (rounded up), for display
pub fn countdown_seconds(state: &GameState) -> u32 {
    state.countdown_ticks.div_ceil(SIM_HZ)
}

fn enter_countdown(state: &mut GameState) {
    let ticks = state.tuning.countdown_ticks();
    if ticks == 0 {
        enter_running(state);
        return;
    }
    state.countdown_ticks = ticks;
    state.phase = GamePhase::Countdown;
    state.push_event(GameEvent::CountdownTick {
        remaining: ticks / SIM_HZ,
    });
}

fn enter_running(state: &mut GameState) {
    state.countdown_ticks = 0;
    state.phase = GamePhase::Running;
    state.push_event(GameEvent::Running);
}
