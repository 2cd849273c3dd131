//! Per-frame simulation tick
//!
//! Core game loop that advances the simulation deterministically. One call
//! to [`tick`] is one frame: clock, parallax, player, ammo, debris, combat
//! resolution, compaction, spawner — in that order, run to completion.
//!
//! Deletion is deferred throughout: combat only sets liveness flags, and a
//! single compaction pass at the end of the tick removes everything that
//! was marked. No collision pairing can be skipped by a mid-loop removal.

use glam::Vec2;
use rand::Rng;

use super::collision::overlaps;
use super::enemy::{Enemy, EnemyKind, EnemyTag, roll_enemy_kind};
use super::state::{
    Explosion, GameEvent, GamePhase, GameState, MAX_PARTICLES, Particle,
};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move up is held
    pub up: bool,
    /// Move down is held
    pub down: bool,
    /// Fire one shot (edge-triggered, not held state)
    pub fire: bool,
    /// Toggle the diagnostic overlay (edge-triggered)
    pub toggle_debug: bool,
}

/// Advance the game state by `dt` milliseconds.
///
/// `dt` is taken at face value: timers accumulate exactly what they are
/// handed, so chunking never changes when they expire. Clamping runaway
/// frame deltas is the driver's job (see `consts::MAX_FRAME_MS`).
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.toggle_debug {
        state.debug = !state.debug;
        log::debug!("debug overlay: {}", state.debug);
    }

    // Countdown. The clock freezes the moment the game ends.
    if state.phase == GamePhase::Running {
        state.game_time += dt;
        if state.tuning.end_on_time_limit && state.game_time >= state.tuning.time_limit {
            state.phase = GamePhase::GameOver;
            log::info!(
                "time limit reached at {:.0} ms: score {} ({:?})",
                state.game_time,
                state.score,
                state.outcome()
            );
        }
    }

    // Parallax keeps scrolling even after game over
    for layer in &mut state.layers {
        layer.update(dt, state.speed);
    }

    // Player movement, bounds clamp, projectile advance
    state.player.update(dt, input.up, input.down);

    if input.fire {
        state.shoot_top();
    }

    // Power-up: accumulate, regenerate ammo on the powered interval, and
    // expire at exactly the configured duration of accumulated time.
    if state.player.power_up {
        state.player.power_up_timer += dt;
        state.player.power_up_ammo_timer += dt;
        if state.player.power_up_ammo_timer > state.tuning.power_up_ammo_interval {
            state.player.power_up_ammo_timer = 0.0;
            if state.ammo < state.tuning.max_power_up_ammo {
                state.ammo += 1;
            }
        }
        if state.player.power_up_timer >= state.tuning.power_up_limit {
            state.player.power_up = false;
            state.player.power_up_timer = 0.0;
            state.player.frame_y = 0;
            // Surplus powered ammo does not carry past the buff
            state.ammo = state.ammo.min(state.tuning.max_ammo);
            state.events.push(GameEvent::PowerUpEnd);
        }
    }

    // Passive ammo regeneration
    if state.ammo_timer > state.tuning.ammo_interval {
        if state.ammo < state.tuning.max_ammo {
            state.ammo += 1;
        }
        state.ammo_timer = 0.0;
    } else {
        state.ammo_timer += dt;
    }

    // Debris and explosion animations run in every phase
    for particle in &mut state.particles {
        particle.update(dt, state.speed);
    }
    for explosion in &mut state.explosions {
        explosion.update(dt, state.speed);
    }

    // Combat resolution. Effects that would grow the enemy list or reach
    // back into the aggregate are deferred past the loop.
    let game_over = state.phase == GamePhase::GameOver;
    let scroll_speed = state.speed;
    let mut grant_power_up = false;
    let mut hive_splits: Vec<super::collision::Rect> = Vec::new();

    for enemy in &mut state.enemies {
        enemy.update(dt, scroll_speed);

        // Enemy body vs player
        if !enemy.deleted && overlaps(&enemy.body, &state.player.body) {
            enemy.deleted = true;
            let center = enemy.body.center();
            state
                .explosions
                .push(Explosion::spawn(center, &mut state.rng));
            state.events.push(GameEvent::ShieldReset);
            for _ in 0..enemy.score {
                if state.particles.len() >= MAX_PARTICLES {
                    state.particles.remove(0);
                }
                state.particles.push(Particle::spawn(center, &mut state.rng));
            }
            if enemy.tag() == Some(EnemyTag::Lucky) {
                grant_power_up = true;
            } else if !game_over {
                state.score = state.score.saturating_sub(1);
            }
        }

        // Projectiles vs this enemy. A spent projectile hits nothing else.
        for projectile in &mut state.player.projectiles {
            if projectile.deleted || enemy.deleted {
                continue;
            }
            if overlaps(&projectile.body, &enemy.body) {
                enemy.lives -= 1;
                projectile.deleted = true;
                if state.particles.len() >= MAX_PARTICLES {
                    state.particles.remove(0);
                }
                state
                    .particles
                    .push(Particle::spawn(enemy.body.center(), &mut state.rng));

                if enemy.lives == 0 {
                    enemy.deleted = true;
                    let center = enemy.body.center();
                    for _ in 0..enemy.score {
                        if state.particles.len() >= MAX_PARTICLES {
                            state.particles.remove(0);
                        }
                        state.particles.push(Particle::spawn(center, &mut state.rng));
                    }
                    state
                        .explosions
                        .push(Explosion::spawn(center, &mut state.rng));
                    state.events.push(GameEvent::Explosion);
                    match enemy.tag() {
                        Some(EnemyTag::Moon) => grant_power_up = true,
                        Some(EnemyTag::Hive) => hive_splits.push(enemy.body),
                        _ => {}
                    }
                    if !game_over {
                        state.score += enemy.score;
                    }
                }
            }
        }
    }

    if grant_power_up {
        state.enter_power_up();
    }

    // Hive split: 5 drones scattered inside the parent's last bounds
    for bounds in hive_splits {
        for _ in 0..5 {
            let x = bounds.pos.x + state.rng.random_range(0.0..bounds.size.x);
            let y = bounds.pos.y + state.rng.random_range(0.0..bounds.size.y * 0.5);
            state
                .enemies
                .push(Enemy::at(EnemyKind::Drone, Vec2::new(x, y), &mut state.rng));
        }
        log::debug!("hive split at ({:.0}, {:.0})", bounds.pos.x, bounds.pos.y);
    }

    // Optional sudden-death rule: reaching the winning score ends the run
    if state.phase == GamePhase::Running
        && state.tuning.end_on_winning_score
        && state.score >= state.tuning.winning_score
    {
        state.phase = GamePhase::GameOver;
        log::info!(
            "winning score reached at {:.0} ms: score {}",
            state.game_time,
            state.score
        );
    }

    // End-of-tick compaction: the single place entities are removed
    state.player.projectiles.retain(|p| !p.deleted);
    state.enemies.retain(|e| !e.deleted);
    state.particles.retain(|p| !p.deleted);
    state.explosions.retain(|e| !e.deleted);

    // Spawn cadence: accumulates every tick, fires only while running
    if state.enemy_timer > state.tuning.enemy_interval && state.phase == GamePhase::Running {
        let kind = roll_enemy_kind(state.rng.random::<f32>());
        state.enemies.push(Enemy::spawn(kind, &mut state.rng));
        state.enemy_timer = 0.0;
        log::debug!("spawned {:?} ({} enemies alive)", kind, state.enemies.len());
    } else {
        state.enemy_timer += dt;
    }

    // Logical-state violations are defects, not runtime errors
    let ammo_cap = if state.player.power_up {
        state.tuning.max_power_up_ammo
    } else {
        state.tuning.max_ammo
    };
    debug_assert!(
        state.ammo <= ammo_cap,
        "ammo {} above cap {}",
        state.ammo,
        ammo_cap
    );
    debug_assert!(
        state.enemies.iter().all(|e| !e.deleted && e.lives > 0),
        "corpse survived compaction"
    );
    debug_assert!(state.player.projectiles.iter().all(|p| !p.deleted));
    debug_assert!(
        state.player.body.pos.y >= -state.player.body.size.y * 0.5
            && state.player.body.pos.y <= GAME_HEIGHT - state.player.body.size.y * 0.5,
        "player out of bounds"
    );
    debug_assert!(state.particles.len() <= MAX_PARTICLES);
}
