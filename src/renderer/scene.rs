//! Scene assembly
//!
//! Turns a `GameState` snapshot into one triangle list in play-area
//! coordinates. Draw order is back to front.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::GameState;

const STAR_COUNT: usize = 48;
const STAR_SEED: u64 = 0x5eed_57a2;
const LOSS_LINE_THICKNESS: f32 = 2.0;

/// Build the vertex list for one frame
pub fn build(state: &GameState) -> Vec<Vertex> {
    let t = &state.tuning;
    let play = Vec2::new(t.play_width, t.play_height);

    let mut vertices = Vec::with_capacity(
        6 + STAR_COUNT * 6 + 6 + state.enemies.len() * 150 + state.bullets.len() * 6 + 12,
    );

    vertices.extend(shapes::rect(Vec2::ZERO, play, colors::PLAY_AREA));
    starfield(play, &mut vertices);

    vertices.extend(shapes::rect(
        Vec2::new(0.0, t.breach_line()),
        Vec2::new(play.x, LOSS_LINE_THICKNESS),
        colors::LOSS_LINE,
    ));

    for enemy in &state.enemies {
        let bounds = enemy.bounds();
        // Still queued above the play area
        if bounds.bottom() <= 0.0 {
            continue;
        }
        vertices.extend(shapes::alien(&bounds));
    }

    for bullet in &state.bullets {
        vertices.extend(shapes::rect(bullet.pos, bullet.size, colors::BULLET));
    }

    vertices.extend(shapes::ship(&state.player.bounds()));

    vertices
}

/// Fixed star layout, identical every frame
fn starfield(play: Vec2, out: &mut Vec<Vertex>) {
    let mut rng = Pcg32::seed_from_u64(STAR_SEED);
    for _ in 0..STAR_COUNT {
        let x = rng.random_range(0.0..play.x);
        let y = rng.random_range(0.0..play.y);
        let size = rng.random_range(1.0..2.5);
        out.extend(shapes::rect(Vec2::new(x, y), Vec2::splat(size), colors::STAR));
    }
}
