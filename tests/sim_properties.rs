//! Property tests for the simulation core
//!
//! Pins down the gameplay invariants: drag clamping, launch capping, score
//! arithmetic, heart accounting, reload gating, and the spawn-interval floor.

use glam::Vec2;
use proptest::prelude::*;

use neon_sling::consts::*;
use neon_sling::sim::{
    Enemy, EnemyShape, GamePhase, GameState, OrbState, TickInput, tick,
};

const BOUNDS: Vec2 = Vec2::new(800.0, 600.0);

fn playing_state(seed: u64) -> GameState {
    let mut state = GameState::new(seed, BOUNDS);
    state.start_run();
    state
}

fn press_on_orb(state: &mut GameState) {
    let input = TickInput {
        press: Some(state.orb.pos),
        ..Default::default()
    };
    tick(state, &input, SIM_DT);
}

fn enemy(state: &mut GameState, pos: Vec2, size: f32) -> Enemy {
    Enemy {
        id: state.next_entity_id(),
        pos,
        size,
        fall_speed: 90.0,
        shape: EnemyShape::Circle,
        hue: 180.0,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Dragging to any point leaves the displayed orb within the tether
    #[test]
    fn drag_stays_within_max_distance(x in -2000.0f32..2000.0, y in -2000.0f32..2000.0) {
        let mut state = playing_state(1);
        press_on_orb(&mut state);

        let input = TickInput {
            drag: Some(Vec2::new(x, y)),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);

        prop_assert!(state.orb.pos.distance(state.anchor) <= MAX_DRAG_DISTANCE + 0.001);
    }

    /// Releasing anywhere either launches below the speed cap or resets the orb
    #[test]
    fn launch_speed_is_capped(dx in -500.0f32..500.0, dy in -500.0f32..500.0) {
        let mut state = playing_state(2);
        let anchor = state.anchor;
        press_on_orb(&mut state);

        let to = anchor + Vec2::new(dx, dy);
        let input = TickInput {
            drag: Some(to),
            release: Some(to),
            ..Default::default()
        };
        tick(&mut state, &input, SIM_DT);

        match state.orb.state {
            OrbState::InFlight { .. } => {
                // The launch tick already applied one step of gravity
                let budget = MAX_LAUNCH_SPEED + GRAVITY * SIM_DT + 0.001;
                prop_assert!(state.orb.vel.length() <= budget);
            }
            OrbState::Resting => {
                prop_assert!(Vec2::new(dx, dy).length() < MIN_DRAG_DISTANCE);
                prop_assert_eq!(state.orb.pos, anchor);
            }
            OrbState::Dragging => prop_assert!(false, "release must end the drag"),
        }
    }

    /// While the reload cooldown runs, a press can never start a drag.
    /// The cooldown decrements before input is handled, so a press landing
    /// on the final cooldown tick is already legal.
    #[test]
    fn no_drag_while_reloading(reload in 1u32..RELOAD_TICKS) {
        let mut state = playing_state(3);
        state.reload_ticks = reload;
        press_on_orb(&mut state);

        let expected = if reload <= 1 {
            OrbState::Dragging
        } else {
            OrbState::Resting
        };
        prop_assert_eq!(state.orb.state, expected);
    }

    /// Hands-off play: score stays zero, hearts only fall, and the spawn
    /// interval respects its floor at every tick
    #[test]
    fn idle_run_invariants(seed in 0u64..10_000, ticks in 1usize..1200) {
        let mut state = playing_state(seed);
        let mut prev_hearts = state.hearts;

        for _ in 0..ticks {
            tick(&mut state, &TickInput::default(), SIM_DT);
            prop_assert_eq!(state.score, 0, "idle play cannot score");
            prop_assert!(state.hearts <= prev_hearts, "hearts never regenerate");
            prop_assert!(state.spawn_interval >= MIN_SPAWN_INTERVAL);
            prev_hearts = state.hearts;
        }

        if state.hearts == 0 {
            prop_assert_eq!(state.phase, GamePhase::GameOver);
        }
    }

    /// Each escaped enemy costs exactly one heart; the run ends at zero
    #[test]
    fn escapes_cost_one_heart_each(escapes in 1u8..6) {
        let mut state = playing_state(5);
        for i in 0..escapes {
            let e = enemy(&mut state, Vec2::new(100.0 + f32::from(i) * 60.0, 599.9), 22.0);
            state.enemies.push(e);
        }

        tick(&mut state, &TickInput::default(), SIM_DT);

        let expected = STARTING_HEARTS.saturating_sub(escapes);
        prop_assert_eq!(state.hearts, expected);
        if escapes >= STARTING_HEARTS {
            prop_assert_eq!(state.phase, GamePhase::GameOver);
        } else {
            prop_assert_eq!(state.phase, GamePhase::Playing);
        }
    }

    /// Destroying one enemy is worth exactly ten points, and a single shot
    /// never destroys more than one
    #[test]
    fn kill_scores_exactly_ten(extra_enemies in 0usize..4) {
        let mut state = playing_state(6);
        for i in 0..=extra_enemies {
            let e = enemy(&mut state, Vec2::new(400.0 + i as f32 * 5.0, 200.0), 25.0);
            state.enemies.push(e);
        }
        state.orb.state = OrbState::InFlight { has_hit: false };
        state.orb.pos = Vec2::new(400.0, 205.0);
        state.orb.vel = Vec2::ZERO;

        tick(&mut state, &TickInput::default(), SIM_DT);

        prop_assert_eq!(state.score, SCORE_PER_KILL);
        prop_assert_eq!(state.enemies.len(), extra_enemies);
    }
}

/// A scripted full run: shoot until the board is hostile enough to end it,
/// then confirm the terminal bookkeeping
#[test]
fn full_run_reaches_game_over() {
    let mut state = playing_state(99);

    // Let enemies rain unopposed until the run ends
    let mut guard = 0;
    while state.phase != GamePhase::GameOver {
        tick(&mut state, &TickInput::default(), SIM_DT);
        guard += 1;
        assert!(guard < 1_000_000, "run never terminated");
    }

    assert_eq!(state.hearts, 0);
    assert_eq!(state.score % SCORE_PER_KILL, 0);
    assert!(state.spawn_count >= STARTING_HEARTS as u32);
}

/// Ticking past game over must not revive the session
#[test]
fn game_over_is_terminal() {
    let mut state = playing_state(100);
    state.hearts = 1;
    let e = enemy(&mut state, Vec2::new(400.0, 599.9), 22.0);
    state.enemies.push(e);
    tick(&mut state, &TickInput::default(), SIM_DT);
    assert_eq!(state.phase, GamePhase::GameOver);

    let ticks = state.time_ticks;
    let press = TickInput {
        press: Some(state.orb.pos),
        ..Default::default()
    };
    for _ in 0..100 {
        tick(&mut state, &press, SIM_DT);
    }
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.time_ticks, ticks, "game-over sim is frozen");
    assert_eq!(state.orb.state, OrbState::Resting);
}
