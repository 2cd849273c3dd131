//! Abyss Strike - a side-scrolling shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `input`: Held-key tracking and one-shot action latching
//! - `tuning`: Data-driven game balance
//!
//! Rendering, asset loading and audio playback are external collaborators:
//! the simulation consumes a [`sim::TickInput`] plus elapsed time each tick
//! and exposes a read-only [`sim::DrawFrame`] and a queue of
//! [`sim::GameEvent`] audio triggers. Nothing in this crate touches a
//! screen or a speaker.

pub mod input;
pub mod sim;
pub mod tuning;

pub use input::{InputState, Key};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const SIM_DT_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Driver-level delta clamp in milliseconds. A process that was
    /// suspended must not feed the sim a multi-second jump and trip every
    /// timer at once; the clamp lives in the driver, never inside `tick`.
    pub const MAX_FRAME_MS: f32 = 100.0;

    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 1500.0;
    pub const GAME_HEIGHT: f32 = 500.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 120.0;
    pub const PLAYER_HEIGHT: f32 = 190.0;
    /// Maximum vertical speed (pixels/sec)
    pub const PLAYER_MAX_SPEED: f32 = 180.0;
    /// Muzzle offset from the player origin for the top firing point
    pub const MUZZLE_TOP: (f32, f32) = (80.0, 30.0);
    /// Tail firing point, used while powered up
    pub const MUZZLE_BOTTOM: (f32, f32) = (80.0, 175.0);

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 10.0;
    pub const PROJECTILE_HEIGHT: f32 = 3.0;
    /// Base rightward speed (pixels/sec); each shot adds a small jitter
    pub const PROJECTILE_SPEED: f32 = 180.0;
    pub const PROJECTILE_SPEED_JITTER: f32 = 30.0;
    /// Projectiles despawn past this fraction of the playfield width
    pub const PROJECTILE_RANGE: f32 = 0.8;

    /// Particle physics
    pub const PARTICLE_GRAVITY: f32 = 1800.0;
    pub const PARTICLE_MAX_BOUNCES: u32 = 2;

    /// Explosion sprite animation
    pub const EXPLOSION_SIZE: f32 = 200.0;
    pub const EXPLOSION_MAX_FRAME: u32 = 8;
    /// Milliseconds per explosion animation frame (30 fps)
    pub const EXPLOSION_FRAME_MS: f32 = 1000.0 / 30.0;
}
