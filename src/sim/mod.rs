//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order, unique entity IDs)
//! - No rendering, audio or platform dependencies

pub mod aabb;
pub mod collision;
pub mod session;
pub mod state;
pub mod tick;

pub use aabb::Aabb;
pub use collision::{Hit, find_hits, resolve_hits};
pub use state::{Bullet, Enemy, GameEvent, GamePhase, GameState, Player};
pub use tick::{TickInput, tick};
