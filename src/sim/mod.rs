//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Delta-time driven, run-to-completion ticks
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use enemy::{Enemy, EnemyKind, EnemyStats, EnemyTag, roll_enemy_kind};
pub use state::{
    DrawFrame, DrawKind, Drawable, Explosion, ExplosionKind, GameEvent, GamePhase, GameState,
    Layer, Outcome, Particle, Player, Projectile,
};
pub use tick::{TickInput, tick};
