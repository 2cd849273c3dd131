//! Property tests for the simulation core's load-bearing invariants

use proptest::prelude::*;

use abyss_strike::consts::GAME_HEIGHT;
use abyss_strike::sim::{GameState, Rect, TickInput, overlaps, tick};
use abyss_strike::tuning::Tuning;

/// Tuning with the spawner effectively disabled
fn quiet_tuning() -> Tuning {
    Tuning {
        enemy_interval: f32::MAX,
        ..Tuning::default()
    }
}

proptest! {
    /// The rectangle predicate agrees with 1-D interval overlap on both
    /// axes: intervals overlap iff max(start) < min(end).
    #[test]
    fn overlap_matches_interval_math(
        ax in -500.0f32..1500.0, ay in -500.0f32..1500.0,
        aw in 1.0f32..300.0, ah in 1.0f32..300.0,
        bx in -500.0f32..1500.0, by in -500.0f32..1500.0,
        bw in 1.0f32..300.0, bh in 1.0f32..300.0,
    ) {
        let a = Rect::new(ax, ay, aw, ah);
        let b = Rect::new(bx, by, bw, bh);
        let x_overlap = ax.max(bx) < (ax + aw).min(bx + bw);
        let y_overlap = ay.max(by) < (ay + ah).min(by + bh);
        prop_assert_eq!(overlaps(&a, &b), x_overlap && y_overlap);
    }

    /// Rectangles that share an edge do not collide
    #[test]
    fn edge_touching_never_overlaps(
        x in -500.0f32..1500.0, y in -500.0f32..1500.0,
        aw in 1.0f32..300.0, ah in 1.0f32..300.0,
        bw in 1.0f32..300.0, bh in 1.0f32..300.0,
    ) {
        let a = Rect::new(x, y, aw, ah);
        let right_neighbor = Rect::new(x + aw, y, bw, bh);
        let below_neighbor = Rect::new(x, y + ah, bw, bh);
        prop_assert!(!overlaps(&a, &right_neighbor));
        prop_assert!(!overlaps(&a, &below_neighbor));
    }

    /// Ammo never leaves its cap after any tick, whatever the input
    #[test]
    fn ammo_stays_in_bounds(
        seed in any::<u64>(),
        steps in proptest::collection::vec((any::<bool>(), 0.0f32..200.0), 1..150),
    ) {
        let mut state = GameState::new(seed, Tuning::default());
        for (fire, dt) in steps {
            let input = TickInput { fire, ..Default::default() };
            tick(&mut state, &input, dt);
            let cap = if state.player.power_up {
                state.tuning.max_power_up_ammo
            } else {
                state.tuning.max_ammo
            };
            prop_assert!(state.ammo <= cap, "ammo {} above cap {}", state.ammo, cap);
        }
    }

    /// The power-up buff lasts exactly its configured duration of
    /// accumulated delta-time, however the time is sliced.
    #[test]
    fn power_up_expiry_is_chunking_invariant(
        seed in any::<u64>(),
        chunks in proptest::collection::vec(1.0f32..500.0, 1..100),
    ) {
        let mut state = GameState::new(seed, quiet_tuning());
        state.enter_power_up();
        let limit = state.tuning.power_up_limit;

        let mut accumulated = 0.0f32;
        for dt in chunks {
            tick(&mut state, &TickInput::default(), dt);
            accumulated += dt;
            prop_assert_eq!(state.player.power_up, accumulated < limit);
        }
    }

    /// The player never escapes the playfield's vertical bounds
    #[test]
    fn player_stays_in_bounds(
        seed in any::<u64>(),
        moves in proptest::collection::vec((any::<bool>(), any::<bool>(), 0.0f32..200.0), 1..150),
    ) {
        let mut state = GameState::new(seed, quiet_tuning());
        for (up, down, dt) in moves {
            let input = TickInput { up, down, ..Default::default() };
            tick(&mut state, &input, dt);
            let half = state.player.body.size.y * 0.5;
            prop_assert!(state.player.body.pos.y >= -half);
            prop_assert!(state.player.body.pos.y <= GAME_HEIGHT - half);
        }
    }
}
