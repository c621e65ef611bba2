//! Space Shooter - a browser arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, session state)
//! - `input`: Keyboard/pointer sampling into per-tick commands
//! - `renderer`: WebGPU rendering pipeline
//! - `hud`: Score and panel projection for the DOM overlay
//! - `cue`: Audio cue capability consumed by the platform audio layer
//! - `tuning` / `settings`: Data-driven balance and player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod cue;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{ConfigError, GameConfig, Tuning};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate. Speeds in `Tuning` are expressed per tick.
    pub const SIM_HZ: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / SIM_HZ as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ticks between autopilot shots
    pub const AUTOPILOT_FIRE_INTERVAL: u64 = 12;
}
