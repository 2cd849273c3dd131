//! Game state and core simulation types
//!
//! All state that must survive a snapshot for determinism lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::enemy::{Enemy, EnemyKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Terminal. The clock, spawner and score freeze; debris keeps
    /// animating so the last frame doesn't snap.
    GameOver,
}

/// Win/lose verdict, read by the presentation layer once the game is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Lose,
}

/// Fire-and-forget audio triggers emitted by the simulation.
///
/// Drained by the embedder after each tick; the core never waits on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PowerUpStart,
    PowerUpEnd,
    Explosion,
    Shot,
    ShieldReset,
}

/// A player projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Rect,
    /// Rightward speed in pixels/sec, jittered slightly per shot
    pub speed_x: f32,
    pub deleted: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, speed_x: f32) -> Self {
        Self {
            body: Rect {
                pos,
                size: Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
            },
            speed_x,
            deleted: false,
        }
    }

    /// Advance by `dt` milliseconds; despawns past 80% of the playfield
    pub fn update(&mut self, dt: f32) {
        self.body.pos.x += self.speed_x * dt / 1000.0;
        if self.body.pos.x > GAME_WIDTH * PROJECTILE_RANGE {
            self.deleted = true;
        }
    }
}

/// Maximum debris particles kept alive at once; oldest are dropped first
pub const MAX_PARTICLES: usize = 256;

/// Decorative debris spawned at hit and death locations. Never collides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub size: f32,
    /// Horizontal drift in pixels/sec, applied leftward on top of the
    /// world scroll (negative values drift right)
    pub speed_x: f32,
    /// Vertical speed in pixels/sec (negative = upward)
    pub speed_y: f32,
    /// Rotation in radians
    pub angle: f32,
    /// Angular velocity in radians/sec
    pub spin: f32,
    pub bounced: u32,
    /// Distance above the playfield floor where this particle bounces
    pub bounce_boundary: f32,
    pub deleted: bool,
}

impl Particle {
    pub fn spawn(pos: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            size: rng.random_range(25.0..50.0),
            speed_x: rng.random_range(-180.0..180.0),
            speed_y: rng.random_range(-900.0..0.0),
            angle: 0.0,
            spin: rng.random_range(-6.0..6.0),
            bounced: 0,
            bounce_boundary: rng.random_range(60.0..140.0),
            deleted: false,
        }
    }

    /// Gravity, drift, rotation and up to two floor bounces
    pub fn update(&mut self, dt: f32, scroll_speed: f32) {
        let dt_s = dt / 1000.0;
        self.speed_y += PARTICLE_GRAVITY * dt_s;
        self.pos.x -= (self.speed_x + scroll_speed) * dt_s;
        self.pos.y += self.speed_y * dt_s;
        self.angle += self.spin * dt_s;

        if self.pos.y > GAME_HEIGHT - self.bounce_boundary
            && self.bounced < PARTICLE_MAX_BOUNCES
            && self.speed_y > 0.0
        {
            self.bounced += 1;
            self.speed_y *= -0.7;
        }

        if self.pos.y > GAME_HEIGHT + self.size || self.pos.x < -self.size {
            self.deleted = true;
        }
    }
}

/// Explosion sprite variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExplosionKind {
    Smoke,
    Fire,
}

/// A short-lived explosion animation at an enemy's death or hit location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub kind: ExplosionKind,
    pub body: Rect,
    pub frame_x: u32,
    pub max_frame: u32,
    /// Milliseconds accumulated toward the next animation frame
    pub frame_timer: f32,
    pub deleted: bool,
}

impl Explosion {
    /// Spawn centered on `center`; the variant is a coin flip
    pub fn spawn(center: Vec2, rng: &mut impl Rng) -> Self {
        let kind = if rng.random::<f32>() < 0.5 {
            ExplosionKind::Smoke
        } else {
            ExplosionKind::Fire
        };
        Self {
            kind,
            body: Rect::new(
                center.x - EXPLOSION_SIZE / 2.0,
                center.y - EXPLOSION_SIZE / 2.0,
                EXPLOSION_SIZE,
                EXPLOSION_SIZE,
            ),
            frame_x: 0,
            max_frame: EXPLOSION_MAX_FRAME,
            frame_timer: 0.0,
            deleted: false,
        }
    }

    /// Drift left with the world and advance the animation on a fixed timer
    pub fn update(&mut self, dt: f32, scroll_speed: f32) {
        self.body.pos.x -= scroll_speed * dt / 1000.0;
        self.frame_timer += dt;
        if self.frame_timer > EXPLOSION_FRAME_MS {
            self.frame_timer = 0.0;
            self.frame_x += 1;
            if self.frame_x > self.max_frame {
                self.deleted = true;
            }
        }
    }
}

/// Width of one background strip in pixels
pub const LAYER_WIDTH: f32 = 1768.0;

/// A parallax background strip. Stateless except for its scroll offset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub x: f32,
    pub width: f32,
    /// Scroll-speed multiplier relative to the global speed
    pub modifier: f32,
}

impl Layer {
    pub fn new(modifier: f32) -> Self {
        Self {
            x: 0.0,
            width: LAYER_WIDTH,
            modifier,
        }
    }

    /// Scroll left; wraps to 0 after a full strip width
    pub fn update(&mut self, dt: f32, scroll_speed: f32) {
        if self.x <= -self.width {
            self.x = 0.0;
        }
        self.x -= scroll_speed * self.modifier * dt / 1000.0;
    }
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Rect,
    /// Vertical speed in pixels/sec, set from held keys each tick
    pub speed_y: f32,
    pub max_speed: f32,
    /// Projectiles are owned by the player, not the root aggregate
    pub projectiles: Vec<Projectile>,
    pub power_up: bool,
    /// Milliseconds accumulated since the power-up activated
    pub power_up_timer: f32,
    /// Milliseconds accumulated toward the next powered ammo refill
    pub power_up_ammo_timer: f32,
    /// Sprite animation column
    pub frame_x: u32,
    /// Sprite row: 0 normal, 1 powered up
    pub frame_y: u32,
    pub max_frame: u32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            body: Rect::new(20.0, 100.0, PLAYER_WIDTH, PLAYER_HEIGHT),
            speed_y: 0.0,
            max_speed: PLAYER_MAX_SPEED,
            projectiles: Vec::new(),
            power_up: false,
            power_up_timer: 0.0,
            power_up_ammo_timer: 0.0,
            frame_x: 0,
            frame_y: 0,
            max_frame: 37,
        }
    }
}

impl Player {
    /// Movement from held keys, bounds clamp, projectile advance, animation
    pub fn update(&mut self, dt: f32, up_held: bool, down_held: bool) {
        self.speed_y = if up_held {
            -self.max_speed
        } else if down_held {
            self.max_speed
        } else {
            0.0
        };
        self.body.pos.y += self.speed_y * dt / 1000.0;

        // Vertical bounds: half the sprite may poke past either edge
        let min_y = -self.body.size.y * 0.5;
        let max_y = GAME_HEIGHT - self.body.size.y * 0.5;
        self.body.pos.y = self.body.pos.y.clamp(min_y, max_y);

        for projectile in &mut self.projectiles {
            projectile.update(dt);
        }

        self.frame_x = if self.frame_x < self.max_frame {
            self.frame_x + 1
        } else {
            0
        };
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; every random decision in the sim draws from this
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u32,
    /// Elapsed game time in milliseconds; frozen once the game is over
    pub game_time: f32,
    pub ammo: u32,
    /// Milliseconds accumulated toward the next ammo refill
    pub ammo_timer: f32,
    /// Milliseconds accumulated toward the next enemy spawn
    pub enemy_timer: f32,
    /// Global horizontal scroll rate in pixels/sec
    pub speed: f32,
    /// Diagnostic overlay flag, toggled by input
    pub debug: bool,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub layers: Vec<Layer>,
    /// Visual debris (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    #[serde(skip)]
    pub explosions: Vec<Explosion>,
    /// Audio triggers emitted this tick; cleared at the start of the next
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given seed and balance numbers
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            score: 0,
            game_time: 0.0,
            ammo: tuning.start_ammo,
            ammo_timer: 0.0,
            enemy_timer: 0.0,
            speed: tuning.scroll_speed,
            debug: false,
            player: Player::default(),
            enemies: Vec::new(),
            layers: vec![
                Layer::new(0.2),
                Layer::new(0.4),
                Layer::new(1.0),
                Layer::new(1.5),
            ],
            particles: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
            tuning,
        }
    }

    /// Fire from the mouth if there is ammo; a powered-up player gets a
    /// free second shot from the tail.
    pub fn shoot_top(&mut self) {
        if self.ammo == 0 {
            return;
        }
        let origin = self.player.body.pos;
        let jitter = self.rng.random_range(0.0..PROJECTILE_SPEED_JITTER);
        self.player.projectiles.push(Projectile::new(
            Vec2::new(origin.x + MUZZLE_TOP.0, origin.y + MUZZLE_TOP.1),
            PROJECTILE_SPEED + jitter,
        ));
        self.ammo -= 1;
        self.events.push(GameEvent::Shot);

        if self.player.power_up {
            let jitter = self.rng.random_range(0.0..PROJECTILE_SPEED_JITTER);
            self.player.projectiles.push(Projectile::new(
                Vec2::new(origin.x + MUZZLE_BOTTOM.0, origin.y + MUZZLE_BOTTOM.1),
                PROJECTILE_SPEED + jitter,
            ));
        }
    }

    /// Activate the power-up: timer restarts, sprite row switches, ammo is
    /// topped up to at least the normal cap.
    pub fn enter_power_up(&mut self) {
        self.player.power_up_timer = 0.0;
        self.player.power_up_ammo_timer = 0.0;
        self.player.power_up = true;
        self.player.frame_y = 1;
        if self.ammo < self.tuning.max_ammo {
            self.ammo = self.tuning.max_ammo;
        }
        self.events.push(GameEvent::PowerUpStart);
    }

    /// Win/lose verdict; meaningful once `phase` is `GameOver`
    pub fn outcome(&self) -> Outcome {
        if self.score >= self.tuning.winning_score {
            Outcome::Win
        } else {
            Outcome::Lose
        }
    }

    /// Drain this tick's audio triggers
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only presentation snapshot. Pure: no mutation, call any time.
    pub fn draw_frame(&self) -> DrawFrame {
        let mut drawables = Vec::with_capacity(
            self.layers.len()
                + 1
                + self.player.projectiles.len()
                + self.enemies.len()
                + self.particles.len()
                + self.explosions.len(),
        );

        // Back-to-front: the slowest three strips behind the action, the
        // fastest strip in front of it.
        for (i, layer) in self.layers.iter().take(3).enumerate() {
            drawables.push(Drawable {
                kind: DrawKind::Background(i as u8),
                rect: Rect::new(layer.x, 0.0, layer.width, GAME_HEIGHT),
                frame: (0, 0),
            });
        }
        drawables.push(Drawable {
            kind: DrawKind::Player,
            rect: self.player.body,
            frame: (self.player.frame_x, self.player.frame_y),
        });
        for projectile in &self.player.projectiles {
            drawables.push(Drawable {
                kind: DrawKind::Projectile,
                rect: projectile.body,
                frame: (0, 0),
            });
        }
        for enemy in &self.enemies {
            drawables.push(Drawable {
                kind: DrawKind::Enemy(enemy.kind),
                rect: enemy.body,
                frame: (enemy.frame_x, enemy.frame_y),
            });
        }
        for particle in &self.particles {
            drawables.push(Drawable {
                kind: DrawKind::Particle,
                rect: Rect::new(particle.pos.x, particle.pos.y, particle.size, particle.size),
                frame: (0, 0),
            });
        }
        for explosion in &self.explosions {
            drawables.push(Drawable {
                kind: DrawKind::Explosion(explosion.kind),
                rect: explosion.body,
                frame: (explosion.frame_x, 0),
            });
        }
        if let Some(foreground) = self.layers.get(3) {
            drawables.push(Drawable {
                kind: DrawKind::Foreground,
                rect: Rect::new(foreground.x, 0.0, foreground.width, GAME_HEIGHT),
                frame: (0, 0),
            });
        }

        DrawFrame {
            drawables,
            score: self.score,
            ammo: self.ammo,
            game_time: self.game_time,
            game_over: self.phase == GamePhase::GameOver,
            outcome: self.outcome(),
            debug: self.debug,
        }
    }
}

/// What a drawable is, for sprite lookup on the presentation side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    /// Background strip, index 0..=2, slowest first
    Background(u8),
    Player,
    Projectile,
    Enemy(EnemyKind),
    Particle,
    Explosion(ExplosionKind),
    /// The fastest parallax strip, drawn over the action
    Foreground,
}

/// One entity to draw: bounding rect plus sprite frame indices
#[derive(Debug, Clone)]
pub struct Drawable {
    pub kind: DrawKind,
    pub rect: Rect,
    /// (column, row) into the sprite sheet
    pub frame: (u32, u32),
}

/// Per-frame read-only snapshot for the presentation layer
#[derive(Debug, Clone)]
pub struct DrawFrame {
    /// Draw in order: background, entities, foreground
    pub drawables: Vec<Drawable>,
    pub score: u32,
    pub ammo: u32,
    /// Elapsed game time in milliseconds
    pub game_time: f32,
    pub game_over: bool,
    pub outcome: Outcome,
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_clamps_to_playfield() {
        let mut player = Player::default();
        // Hold up for far longer than it takes to reach the top
        for _ in 0..1000 {
            player.update(16.0, true, false);
        }
        assert_eq!(player.body.pos.y, -player.body.size.y * 0.5);

        for _ in 0..1000 {
            player.update(16.0, false, true);
        }
        assert_eq!(player.body.pos.y, GAME_HEIGHT - player.body.size.y * 0.5);
    }

    #[test]
    fn test_shoot_consumes_ammo() {
        let mut state = GameState::new(3, Tuning::default());
        let ammo = state.ammo;
        state.shoot_top();
        assert_eq!(state.ammo, ammo - 1);
        assert_eq!(state.player.projectiles.len(), 1);
        assert_eq!(state.take_events(), vec![GameEvent::Shot]);

        // Powered up: two projectiles for one round
        state.enter_power_up();
        state.take_events();
        let ammo = state.ammo;
        state.shoot_top();
        assert_eq!(state.ammo, ammo - 1);
        assert_eq!(state.player.projectiles.len(), 3);
    }

    #[test]
    fn test_shoot_with_empty_clip_is_a_no_op() {
        let mut state = GameState::new(3, Tuning::default());
        state.ammo = 0;
        state.shoot_top();
        assert_eq!(state.ammo, 0);
        assert!(state.player.projectiles.is_empty());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_enter_power_up_tops_up_ammo() {
        let mut state = GameState::new(3, Tuning::default());
        state.ammo = 5;
        state.enter_power_up();
        assert!(state.player.power_up);
        assert_eq!(state.ammo, state.tuning.max_ammo);
        assert_eq!(state.player.frame_y, 1);
        assert_eq!(state.take_events(), vec![GameEvent::PowerUpStart]);

        // Ammo above the cap is kept, not clipped down
        state.ammo = state.tuning.max_ammo + 10;
        state.enter_power_up();
        assert_eq!(state.ammo, state.tuning.max_ammo + 10);
    }

    #[test]
    fn test_projectile_despawns_past_range() {
        let mut p = Projectile::new(Vec2::new(GAME_WIDTH * 0.79, 100.0), 180.0);
        p.update(1000.0);
        assert!(p.deleted);
    }

    #[test]
    fn test_layer_wraps_after_full_width() {
        let mut layer = Layer::new(1.0);
        // Scroll just past one full strip width
        layer.update(LAYER_WIDTH / 60.0 * 1000.0 + 100.0, 60.0);
        assert!(layer.x <= -layer.width);
        // The next update wraps the offset back to 0 before scrolling
        layer.update(16.0, 60.0);
        assert!(layer.x > -2.0 && layer.x <= 0.0);
    }

    #[test]
    fn test_explosion_finishes_after_max_frame() {
        let mut rng = rand_pcg::Pcg32::seed_from_u64(0);
        let mut explosion = Explosion::spawn(Vec2::new(100.0, 100.0), &mut rng);
        let mut ticks = 0;
        while !explosion.deleted && ticks < 1000 {
            explosion.update(EXPLOSION_FRAME_MS + 1.0, 60.0);
            ticks += 1;
        }
        assert!(explosion.deleted);
        // One animation step per interval, plus the step past the end
        assert_eq!(ticks as u32, EXPLOSION_MAX_FRAME + 1);
    }

    #[test]
    fn test_particle_bounces_at_most_twice() {
        let mut rng = rand_pcg::Pcg32::seed_from_u64(9);
        let mut particle = Particle::spawn(Vec2::new(700.0, 100.0), &mut rng);
        for _ in 0..2000 {
            particle.update(16.0, 60.0);
            if particle.deleted {
                break;
            }
        }
        assert!(particle.bounced <= PARTICLE_MAX_BOUNCES);
        assert!(particle.deleted);
    }

    #[test]
    fn test_draw_frame_layering() {
        let state = GameState::new(3, Tuning::default());
        let frame = state.draw_frame();
        assert!(matches!(
            frame.drawables.first().map(|d| d.kind),
            Some(DrawKind::Background(0))
        ));
        assert!(matches!(
            frame.drawables.last().map(|d| d.kind),
            Some(DrawKind::Foreground)
        ));
        assert!(!frame.game_over);
        assert_eq!(frame.outcome, Outcome::Lose);
        assert_eq!(frame.ammo, state.tuning.start_ammo);
    }

    #[test]
    fn test_state_roundtrips_through_serde() {
        let state = GameState::new(1234, Tuning::default());
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed, state.seed);
        assert_eq!(restored.score, state.score);
        assert_eq!(restored.phase, state.phase);
        assert_eq!(restored.player.body, state.player.body);
    }
}
