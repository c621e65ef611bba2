//! Bullet/enemy collision resolution
//!
//! Pairwise AABB tests, O(bullets × enemies). Each bullet consumes at most one
//! enemy per tick (the first overlapping one in enemy order) and each enemy is
//! consumed by at most one bullet.

use super::state::{GameEvent, GameState};

/// A confirmed bullet/enemy hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub bullet_id: u32,
    pub enemy_id: u32,
    /// ID of the enemy spawned to replace the destroyed one
    pub replacement_id: u32,
}

/// Find hits without mutating anything: `(bullet index, enemy index)` pairs
pub fn find_hits(state: &GameState) -> Vec<(usize, usize)> {
    let mut consumed = vec![false; state.enemies.len()];
    let mut pairs = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let bullet_box = bullet.bounds();
        let hit = state
            .enemies
            .iter()
            .enumerate()
            .find(|(ei, enemy)| !consumed[*ei] && bullet_box.overlaps(&enemy.bounds()));
        if let Some((ei, _)) = hit {
            consumed[ei] = true;
            pairs.push((bi, ei));
        }
    }

    pairs
}

/// Resolve all bullet/enemy hits for this tick
///
/// Hit bullets and enemies are removed, each destroyed enemy is replaced
/// above the play area, and the score grows by one unit per hit.
pub fn resolve_hits(state: &mut GameState) -> Vec<Hit> {
    let pairs = find_hits(state);
    if pairs.is_empty() {
        return Vec::new();
    }

    let mut hits = Vec::with_capacity(pairs.len());
    let mut dead_bullets = Vec::with_capacity(pairs.len());
    let mut dead_enemies = Vec::with_capacity(pairs.len());
    for &(bi, ei) in &pairs {
        dead_bullets.push(state.bullets[bi].id);
        dead_enemies.push(state.enemies[ei].id);
    }

    state.bullets.retain(|b| !dead_bullets.contains(&b.id));
    state.enemies.retain(|e| !dead_enemies.contains(&e.id));

    for (&bullet_id, &enemy_id) in dead_bullets.iter().zip(&dead_enemies) {
        let replacement = state.spawn_enemy_above();
        let replacement_id = replacement.id;
        state.enemies.push(replacement);

        state.score = state.score.saturating_add(state.tuning.score_per_hit);
        state.push_event(GameEvent::EnemyDestroyed { enemy_id, bullet_id });
        log::trace!("bullet {bullet_id} destroyed enemy {enemy_id} (score {})", state.score);

        hits.push(Hit {
            bullet_id,
            enemy_id,
            replacement_id,
        });
    }

    hits
}
