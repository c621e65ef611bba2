//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. Order within
//! a running tick: player, fire, bullets, enemies (breach check), collisions.

use super::collision::resolve_hits;
use super::session;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::AUTOPILOT_FIRE_INTERVAL;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held (level-triggered)
    pub move_left: bool,
    /// Move right held (level-triggered)
    pub move_right: bool,
    /// A movement key went from released to held since the last tick
    pub move_engaged: bool,
    /// Fire one bullet this tick (edge-triggered upstream)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Pause if playing; never resumes (focus lost)
    pub suspend: bool,
    /// Start from Idle, or play again after game over
    pub start: bool,
    /// Restart from game over or the pause menu
    pub restart: bool,
    /// Demo mode - the sim steers and fires by itself
    pub autopilot: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.start {
        if state.phase == GamePhase::GameOver {
            session::restart(state);
        } else {
            session::start(state);
        }
    }
    if input.restart {
        session::restart(state);
    }
    if input.pause {
        session::toggle_pause(state);
    }
    if input.suspend {
        session::suspend(state);
    }

    match state.phase {
        GamePhase::Countdown => {
            session::advance_countdown(state);
            return;
        }
        GamePhase::Running => {}
        // Frozen: no entity mutation outside of Running
        GamePhase::Idle | GamePhase::Paused | GamePhase::GameOver => return,
    }

    let input = if input.autopilot {
        autopilot_input(state)
    } else {
        input.clone()
    };

    state.time_ticks += 1;

    update_player(state, &input);

    if input.fire {
        state.spawn_bullet();
        state.push_event(GameEvent::Shot);
    }

    advance_bullets(state);

    if advance_enemies(state) {
        session::game_over(state);
        return;
    }

    resolve_hits(state);
}

/// Apply held movement, clamped to the play area
fn update_player(state: &mut GameState, input: &TickInput) {
    let mut dx = 0.0;
    if input.move_left {
        dx -= state.player.speed;
    }
    if input.move_right {
        dx += state.player.speed;
    }
    let max_x = state.tuning.player_max_x();
    let before = state.player.pos.x;
    state.player.shift(dx, max_x);

    // Pressing into a wall is silent
    if input.move_engaged && state.player.pos.x != before {
        state.push_event(GameEvent::Moved);
    }
}

/// Move bullets up and drop the ones that left through the top
fn advance_bullets(state: &mut GameState) {
    for bullet in &mut state.bullets {
        bullet.pos.y -= bullet.speed;
    }
    state.bullets.retain(|b| b.pos.y >= 0.0);
}

/// Move enemies down. Returns true if any enemy breached the bottom line.
fn advance_enemies(state: &mut GameState) -> bool {
    let speed = state.tuning.enemy_speed;
    let breach_line = state.tuning.breach_line();
    let mut breached = false;
    for enemy in &mut state.enemies {
        enemy.pos.y += speed;
        if enemy.pos.y > breach_line {
            log::debug!("enemy {} breached at y={}", enemy.id, enemy.pos.y);
            breached = true;
        }
    }
    breached
}

/// Steer toward the lowest visible enemy and fire on a fixed cadence
fn autopilot_input(state: &GameState) -> TickInput {
    let player_center = state.player.bounds().center().x;
    let target = state
        .enemies
        .iter()
        .filter(|e| e.bounds().bottom() > 0.0)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let (target_x, half_width) = match target {
        Some(enemy) => (enemy.bounds().center().x, enemy.size.x / 2.0),
        // Nothing visible: idle in the middle
        None => (state.tuning.play_width / 2.0, 0.0),
    };

    let dx = target_x - player_center;
    let speed = state.player.speed;
    let aligned = dx.abs() < half_width;

    TickInput {
        move_left: dx < -speed,
        move_right: dx > speed,
        fire: target.is_some()
            && aligned
            && state.time_ticks % AUTOPILOT_FIRE_INTERVAL == 0,
        autopilot: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Bullet, Enemy};
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn running_state(seed: u64) -> GameState {
        let tuning = Tuning {
            countdown_secs: 0,
            ..Tuning::default()
        };
        let mut state = GameState::with_tuning(seed, tuning);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Running);
        state.take_events();
        state
    }

    fn held_left() -> TickInput {
        TickInput {
            move_left: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_tick_idle_to_countdown_to_running() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Idle);

        // Tick without start - should stay Idle
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Idle);

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Countdown);

        let enemies_before = state.enemies.clone();
        let mut ticks = 1;
        while state.phase == GamePhase::Countdown {
            tick(&mut state, &TickInput::default());
            ticks += 1;
        }
        assert_eq!(ticks, state.tuning.countdown_ticks());
        assert_eq!(state.phase, GamePhase::Running);
        // Nothing moves during the countdown
        assert_eq!(state.enemies, enemies_before);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_player_clamped_at_left_boundary() {
        let mut state = running_state(1);
        state.player.pos.x = 0.0;
        for _ in 0..10 {
            tick(&mut state, &held_left());
            assert_eq!(state.player.pos.x, 0.0);
        }
    }

    #[test]
    fn test_player_clamped_at_right_boundary() {
        let mut state = running_state(1);
        state.player.pos.x = 438.0;
        let input = TickInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.pos.x, 440.0);
        tick(&mut state, &input);
        assert_eq!(state.player.pos.x, 440.0);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let mut state = running_state(1);
        let x = state.player.pos.x;
        tick(
            &mut state,
            &TickInput {
                move_left: true,
                move_right: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.pos.x, x);
    }

    #[test]
    fn test_moved_event_only_on_engage() {
        let mut state = running_state(1);
        tick(
            &mut state,
            &TickInput {
                move_left: true,
                move_engaged: true,
                ..Default::default()
            },
        );
        tick(&mut state, &held_left());
        let moves = state
            .take_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Moved)
            .count();
        assert_eq!(moves, 1);
    }

    #[test]
    fn test_moved_event_silent_against_wall() {
        let mut state = running_state(1);
        state.player.pos.x = 0.0;
        tick(
            &mut state,
            &TickInput {
                move_left: true,
                move_engaged: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.pos.x, 0.0);
        assert!(!state.take_events().contains(&GameEvent::Moved));

        // Cancelling directions do not move either
        tick(
            &mut state,
            &TickInput {
                move_left: true,
                move_right: true,
                move_engaged: true,
                ..Default::default()
            },
        );
        assert!(!state.take_events().contains(&GameEvent::Moved));
    }

    #[test]
    fn test_suspend_and_pause_in_same_tick_stays_paused() {
        let mut state = running_state(4);
        tick(
            &mut state,
            &TickInput {
                pause: true,
                suspend: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Paused);

        // Already paused: the toggle resumes, the suspend pauses again
        tick(
            &mut state,
            &TickInput {
                pause: true,
                suspend: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Paused);

        tick(
            &mut state,
            &TickInput {
                suspend: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Paused);
    }

    #[test]
    fn test_fire_spawns_bullet_and_event() {
        let mut state = running_state(1);
        tick(
            &mut state,
            &TickInput {
                fire: true,
                ..Default::default()
            },
        );
        assert_eq!(state.bullets.len(), 1);
        // Spawned at the player's top edge, then advanced once
        assert_eq!(state.bullets[0].pos.y, 540.0 - 5.0);
        assert!(state.take_events().contains(&GameEvent::Shot));
    }

    #[test]
    fn test_bullet_leaves_through_top() {
        let mut state = running_state(1);
        let id = state.next_entity_id();
        state.bullets.push(Bullet {
            id,
            pos: Vec2::new(10.0, 4.0),
            size: Vec2::new(6.0, 15.0),
            speed: 5.0,
        });
        tick(&mut state, &TickInput::default());
        assert!(state.bullets.iter().all(|b| b.id != id));
    }

    #[test]
    fn test_hit_scenario_through_tick() {
        let mut state = running_state(1);
        state.enemies.clear();
        let bullet_id = state.next_entity_id();
        // After one tick: bullet at (100, 50), enemy at (98, 55)
        state.bullets.push(Bullet {
            id: bullet_id,
            pos: Vec2::new(100.0, 55.0),
            size: Vec2::new(6.0, 15.0),
            speed: 5.0,
        });
        let enemy_id = state.next_entity_id();
        state.enemies.push(Enemy {
            id: enemy_id,
            pos: Vec2::new(98.0, 54.0),
            size: Vec2::new(50.0, 50.0),
        });

        tick(&mut state, &TickInput::default());

        assert!(state.bullets.is_empty());
        assert_eq!(state.enemies.len(), 1);
        assert_ne!(state.enemies[0].id, enemy_id);
        assert!(state.enemies[0].pos.y < 0.0);
        assert_eq!(state.score, 10);
        assert!(state.take_events().contains(&GameEvent::EnemyDestroyed {
            enemy_id,
            bullet_id
        }));
    }

    #[test]
    fn test_breach_triggers_game_over_once() {
        let mut state = running_state(1);
        state.enemies[0].pos.y = state.tuning.breach_line();

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        // Frozen afterwards: no more movement or events
        let snapshot = state.enemies.clone();
        tick(&mut state, &held_left());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemies, snapshot);

        let over = state
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(over, 1);
    }

    #[test]
    fn test_enemy_exactly_on_line_is_not_a_breach() {
        let mut state = running_state(1);
        state.enemies[0].pos.y = state.tuning.breach_line() - state.tuning.enemy_speed;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut state = GameState::new(8);
        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        while state.phase == GamePhase::Countdown {
            tick(&mut state, &TickInput::default());
        }
        state.score = 50;
        state.spawn_bullet();
        state.enemies[0].pos.y = 1000.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Countdown);
        assert_eq!(state.score, 0);
        assert!(state.bullets.is_empty());
        assert!(state.enemies.iter().all(|e| e.pos.y < 0.0));

        while state.phase == GamePhase::Countdown {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_start_after_game_over_plays_again() {
        let mut state = running_state(2);
        state.enemies[0].pos.y = 1000.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        tick(
            &mut state,
            &TickInput {
                start: true,
                ..Default::default()
            },
        );
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_tick_pause_freezes_entities() {
        let mut state = running_state(3);
        state.spawn_bullet();

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);

        let bullets = state.bullets.clone();
        let enemies = state.enemies.clone();
        let player = state.player.clone();
        for _ in 0..30 {
            tick(
                &mut state,
                &TickInput {
                    move_left: true,
                    fire: true,
                    ..Default::default()
                },
            );
        }
        assert_eq!(state.bullets, bullets);
        assert_eq!(state.enemies, enemies);
        assert_eq!(state.player, player);

        // Unpause
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut state = running_state(2024);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..3000 {
            tick(&mut state, &input);
            if state.phase != GamePhase::Running {
                break;
            }
        }
        assert!(state.score > 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = running_state(99999);
        let mut state2 = running_state(99999);

        let inputs = [
            TickInput {
                move_left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                move_right: true,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..200 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.bullets, state2.bullets);
        assert_eq!(state1.enemies, state2.enemies);
    }

    fn arb_input() -> impl Strategy<Value = TickInput> {
        (any::<bool>(), any::<bool>(), prop::bool::weighted(0.2)).prop_map(
            |(move_left, move_right, fire)| TickInput {
                move_left,
                move_right,
                fire,
                ..Default::default()
            },
        )
    }

    proptest! {
        #[test]
        fn prop_running_invariants(
            seed in any::<u64>(),
            inputs in prop::collection::vec(arb_input(), 1..600),
        ) {
            let mut state = running_state(seed);
            let max_x = state.tuning.player_max_x();
            let enemy_count = state.enemies.len();
            let mut last_score = state.score;
            let mut seen: HashMap<u32, f32> = HashMap::new();
            let mut removed: Vec<u32> = Vec::new();

            for input in &inputs {
                tick(&mut state, input);

                prop_assert!(state.player.pos.x >= 0.0 && state.player.pos.x <= max_x);
                prop_assert_eq!(state.enemies.len(), enemy_count);
                prop_assert!(state.score >= last_score);

                let hits = state
                    .take_events()
                    .iter()
                    .filter(|e| matches!(e, GameEvent::EnemyDestroyed { .. }))
                    .count() as u32;
                prop_assert_eq!(state.score - last_score, hits * state.tuning.score_per_hit);
                last_score = state.score;

                for bullet in &state.bullets {
                    prop_assert!(!removed.contains(&bullet.id));
                    if let Some(prev_y) = seen.get(&bullet.id) {
                        prop_assert!(bullet.pos.y < *prev_y);
                    }
                }
                let live: Vec<u32> = state.bullets.iter().map(|b| b.id).collect();
                for id in seen.keys() {
                    if !live.contains(id) && !removed.contains(id) {
                        removed.push(*id);
                    }
                }
                seen = state.bullets.iter().map(|b| (b.id, b.pos.y)).collect();

                if state.phase == GamePhase::GameOver {
                    break;
                }
            }
        }
    }
}
