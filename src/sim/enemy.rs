//! Enemy variants and spawn policy
//!
//! Enemies are a closed set of kinds dispatched through a stats lookup
//! table rather than a type hierarchy. Each kind fixes its hitbox, hit
//! points, score value, speed range and an optional behaviour tag; the
//! spawner rolls one uniform number against fixed cutoffs to pick a kind.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Closed set of enemy variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Angler1,
    Angler2,
    LuckyFish,
    HiveWhale,
    BulbWhale,
    MoonFish,
    /// Spawned only by a dying HiveWhale, never rolled by the spawner
    Drone,
}

/// Behaviour tag attached to some kinds; drives combat side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyTag {
    /// Grants a power-up when the player collides with it
    Lucky,
    /// Grants a power-up when destroyed by a projectile
    Moon,
    /// Splits into 5 drones when destroyed
    Hive,
    /// Hive spawn
    Drone,
}

/// Per-kind constants. `score` of `None` means "score equals initial lives".
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub width: f32,
    pub height: f32,
    pub lives: u32,
    pub score: Option<u32>,
    /// Leftward speed range in pixels/sec (before the global scroll speed)
    pub speed: (f32, f32),
    pub tag: Option<EnemyTag>,
    /// Number of sprite rows to pick a random skin from
    pub frame_rows: u32,
}

impl EnemyKind {
    /// Stats lookup table for every variant
    pub fn stats(self) -> EnemyStats {
        match self {
            EnemyKind::Angler1 => EnemyStats {
                width: 228.0,
                height: 169.0,
                lives: 5,
                score: None,
                speed: (30.0, 90.0),
                tag: None,
                frame_rows: 3,
            },
            EnemyKind::Angler2 => EnemyStats {
                width: 213.0,
                height: 165.0,
                lives: 6,
                score: None,
                speed: (30.0, 90.0),
                tag: None,
                frame_rows: 2,
            },
            EnemyKind::LuckyFish => EnemyStats {
                width: 99.0,
                height: 95.0,
                lives: 5,
                score: Some(15),
                speed: (30.0, 90.0),
                tag: Some(EnemyTag::Lucky),
                frame_rows: 2,
            },
            EnemyKind::HiveWhale => EnemyStats {
                width: 400.0,
                height: 227.0,
                lives: 20,
                score: None,
                speed: (12.0, 72.0),
                tag: Some(EnemyTag::Hive),
                frame_rows: 1,
            },
            EnemyKind::BulbWhale => EnemyStats {
                width: 270.0,
                height: 219.0,
                lives: 20,
                score: None,
                speed: (12.0, 72.0),
                tag: None,
                frame_rows: 2,
            },
            EnemyKind::MoonFish => EnemyStats {
                width: 227.0,
                height: 240.0,
                lives: 10,
                score: None,
                speed: (72.0, 120.0),
                tag: Some(EnemyTag::Moon),
                frame_rows: 1,
            },
            EnemyKind::Drone => EnemyStats {
                width: 115.0,
                height: 95.0,
                lives: 3,
                score: None,
                speed: (30.0, 252.0),
                tag: Some(EnemyTag::Drone),
                frame_rows: 2,
            },
        }
    }
}

/// Weighted variant selection from one uniform roll in `[0, 1)`.
///
/// Cutoffs: Angler1 50%, Angler2 10%, HiveWhale 10%, BulbWhale 10%,
/// MoonFish 10%, LuckyFish 10%.
pub fn roll_enemy_kind(roll: f32) -> EnemyKind {
    if roll < 0.5 {
        EnemyKind::Angler1
    } else if roll < 0.6 {
        EnemyKind::Angler2
    } else if roll < 0.7 {
        EnemyKind::HiveWhale
    } else if roll < 0.8 {
        EnemyKind::BulbWhale
    } else if roll < 0.9 {
        EnemyKind::MoonFish
    } else {
        EnemyKind::LuckyFish
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub body: Rect,
    /// Leftward speed in pixels/sec, excluding the global scroll speed
    pub speed_x: f32,
    pub lives: u32,
    pub score: u32,
    /// Sprite animation column, cycles 0..=max_frame
    pub frame_x: u32,
    /// Sprite row (skin), fixed at spawn
    pub frame_y: u32,
    pub max_frame: u32,
    pub deleted: bool,
}

/// Sprite sheets have 38 columns for every enemy kind
const ENEMY_MAX_FRAME: u32 = 37;

impl Enemy {
    /// Spawn at the right edge of the playfield with randomized y and speed
    pub fn spawn(kind: EnemyKind, rng: &mut impl Rng) -> Self {
        let stats = kind.stats();
        let y = rng.random_range(0.0..(GAME_HEIGHT - stats.height).max(1.0));
        Self::at(kind, Vec2::new(GAME_WIDTH, y), rng)
    }

    /// Spawn at an explicit position; used for hive-split drones
    pub fn at(kind: EnemyKind, pos: Vec2, rng: &mut impl Rng) -> Self {
        let stats = kind.stats();
        Self {
            kind,
            body: Rect {
                pos,
                size: Vec2::new(stats.width, stats.height),
            },
            speed_x: rng.random_range(stats.speed.0..stats.speed.1),
            lives: stats.lives,
            score: stats.score.unwrap_or(stats.lives),
            frame_x: 0,
            frame_y: rng.random_range(0..stats.frame_rows),
            max_frame: ENEMY_MAX_FRAME,
            deleted: false,
        }
    }

    pub fn tag(&self) -> Option<EnemyTag> {
        self.kind.stats().tag
    }

    /// Advance physics by `dt` milliseconds at the given scroll speed.
    /// Marks for deletion once fully off-screen left.
    pub fn update(&mut self, dt: f32, scroll_speed: f32) {
        self.body.pos.x -= (self.speed_x + scroll_speed) * dt / 1000.0;
        if self.body.right() < 0.0 {
            self.deleted = true;
        }
        self.frame_x = if self.frame_x < self.max_frame {
            self.frame_x + 1
        } else {
            0
        };
    }
}
