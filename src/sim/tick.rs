//! Fixed timestep simulation tick
//!
//! Advances the game deterministically: starfield drift, the drag/launch
//! protocol, orb flight, enemy spawning, collisions, scoring, and particle
//! aging all happen here. No rendering or platform dependencies.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::{enemy_escaped, orb_hits_enemy, orb_out_of_play, reflect_at_bounds};
use super::state::{
    ENEMY_HUES, Enemy, EnemyShape, GameEvent, GamePhase, GameState, OrbState, Particle,
    ParticleKind,
};
use crate::clamp_to_radius;
use crate::consts::*;

/// Input commands for a single tick
///
/// `press`/`release` are one-shot (the caller clears them after the tick);
/// `drag` carries the latest pointer position while a button or touch is held.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer went down at this position
    pub press: Option<Vec2>,
    /// Pointer moved to this position while held
    pub drag: Option<Vec2>,
    /// Pointer went up at this position
    pub release: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        // Keep the backdrop alive behind the menu and the game-over screen
        GamePhase::Menu | GamePhase::GameOver => {
            advance_stars(state, dt);
            advance_particles(state, dt);
            return;
        }
        GamePhase::Paused => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;

    advance_stars(state, dt);

    if state.reload_ticks > 0 {
        state.reload_ticks -= 1;
    }

    handle_pointer(state, input);
    update_orb_flight(state, dt);
    run_spawner(state, dt);
    update_enemies(state, dt);
    advance_particles(state, dt);
}

/// Drift stars downward by their layer speed, wrapping to the top with a
/// fresh horizontal position
fn advance_stars(state: &mut GameState, dt: f32) {
    let bounds = state.bounds;
    let seed = state.seed;
    let ticks = state.time_ticks;
    for star in &mut state.stars {
        star.pos.y += star.speed * dt;
        if star.pos.y > bounds.y {
            star.pos.y = 0.0;
            // Salted with the star's own position so wraps stay varied even
            // while the tick counter is frozen (menu, game over)
            let salt = u64::from(star.pos.x.to_bits()).wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ ticks;
            let mut rng = Pcg32::seed_from_u64(seed ^ salt);
            star.pos.x = rng.random_range(0.0..bounds.x.max(1.0));
        }
    }
}

/// Three-phase drag protocol: grab, clamp, launch (or reset on a short drag)
fn handle_pointer(state: &mut GameState, input: &TickInput) {
    if let Some(pos) = input.press {
        if state.can_shoot() && pos.distance(state.orb.pos) <= state.orb.radius {
            state.orb.state = OrbState::Dragging;
        }
    }

    if matches!(state.orb.state, OrbState::Dragging) {
        if let Some(pos) = input.drag {
            state.orb.pos = clamp_to_radius(state.anchor, pos, MAX_DRAG_DISTANCE);
        }

        if let Some(pos) = input.release {
            let pull = state.anchor - pos;
            let distance = pull.length();
            if distance >= MIN_DRAG_DISTANCE {
                let speed = (distance * POWER_SCALE).min(MAX_LAUNCH_SPEED);
                state.orb.vel = pull / distance * speed;
                state.orb.state = OrbState::InFlight { has_hit: false };
                state.reload_ticks = RELOAD_TICKS;
                state.events.push(GameEvent::Launched);
            } else {
                state.orb.reset(state.anchor);
            }
        }
    }
}

/// Integrate the in-flight orb: gravity, wall reflection, trail sparkles,
/// and the off-screen reset
fn update_orb_flight(state: &mut GameState, dt: f32) {
    if !state.orb.is_in_flight() {
        return;
    }

    state.orb.vel.y += GRAVITY * dt;
    state.orb.pos += state.orb.vel * dt;

    let bounds = state.bounds;
    let radius = state.orb.radius;
    let bounce = reflect_at_bounds(&mut state.orb.pos, &mut state.orb.vel, radius, bounds);
    if bounce.any() {
        state.events.push(GameEvent::WallBounce);
    }

    if orb_out_of_play(state.orb.pos, radius, bounds) {
        state.orb.reset(state.anchor);
        return;
    }

    emit_sparkles(state, dt);
}

/// Rainbow trail behind the flying orb
fn emit_sparkles(state: &mut GameState, dt: f32) {
    state.sparkle_accum += SPARKLES_PER_SEC * dt;
    if state.sparkle_accum < 1.0 {
        return;
    }

    let origin = state.orb.pos;
    let mut rng = state.rng_for(state.time_ticks.wrapping_mul(31));
    while state.sparkle_accum >= 1.0 {
        state.sparkle_accum -= 1.0;
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(60.0..180.0);
        state.push_sparkle(Particle {
            kind: ParticleKind::Sparkle,
            pos: origin,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            size: rng.random_range(2.0..4.0),
            hue: rng.random_range(0.0..360.0),
            alpha: 1.0,
        });
    }
}

/// Fire the spawner when the timer crosses the current interval, then shrink
/// the interval toward its floor
fn run_spawner(state: &mut GameState, dt: f32) {
    state.spawn_timer += dt;
    if state.spawn_timer < state.spawn_interval {
        return;
    }
    state.spawn_timer = 0.0;

    spawn_enemy(state);

    if state.spawn_interval > MIN_SPAWN_INTERVAL {
        state.spawn_interval =
            (state.spawn_interval - SPAWN_INTERVAL_STEP).max(MIN_SPAWN_INTERVAL);
    }
}

/// Create one enemy with randomized shape, hue, size, and column; fall speed
/// ramps with elapsed game time
fn spawn_enemy(state: &mut GameState) {
    let mut rng = state.rng_for(u64::from(state.spawn_count).wrapping_add(0x4E45_4D59));
    state.spawn_count += 1;

    let size = rng.random_range(ENEMY_MIN_SIZE..ENEMY_MAX_SIZE);
    let max_x = (state.bounds.x - size).max(size + 1.0);
    let x = rng.random_range(size..max_x);
    let shape = EnemyShape::ALL[rng.random_range(0..EnemyShape::ALL.len())];
    let hue = ENEMY_HUES[rng.random_range(0..ENEMY_HUES.len())];
    let fall_speed = ENEMY_BASE_SPEED + ENEMY_SPEED_RAMP * state.elapsed_secs();

    let id = state.next_entity_id();
    state.enemies.push(Enemy {
        id,
        pos: Vec2::new(x, -size),
        size,
        fall_speed,
        shape,
        hue,
    });
}

/// Advance enemies, resolve the first orb hit of this shot, and charge a
/// heart for every enemy that reaches the bottom
fn update_enemies(state: &mut GameState, dt: f32) {
    for enemy in &mut state.enemies {
        enemy.pos.y += enemy.fall_speed * dt;
    }

    // First match wins; the has_hit latch stops any further checks this shot
    if let OrbState::InFlight { has_hit: false } = state.orb.state {
        let hit = state
            .enemies
            .iter()
            .position(|e| orb_hits_enemy(state.orb.pos, state.orb.radius, e));
        if let Some(idx) = hit {
            state.enemies.remove(idx);
            state.orb.state = OrbState::InFlight { has_hit: true };
            state.score += SCORE_PER_KILL;
            state.events.push(GameEvent::EnemyDestroyed);
            spawn_explosion(state, state.orb.pos);
            state.orb.reset(state.anchor);
        }
    }

    let bounds = state.bounds;
    let mut escaped = 0u32;
    state.enemies.retain(|enemy| {
        if enemy_escaped(enemy, bounds) {
            escaped += 1;
            false
        } else {
            true
        }
    });

    for _ in 0..escaped {
        if state.hearts == 0 {
            break;
        }
        state.hearts -= 1;
        state.events.push(GameEvent::HeartLost);
        if state.hearts == 0 {
            state.phase = GamePhase::GameOver;
            state.events.push(GameEvent::GameOver);
        }
    }
}

/// Burst of rainbow fragments at the impact point
fn spawn_explosion(state: &mut GameState, pos: Vec2) {
    let mut rng = state.rng_for(state.time_ticks.wrapping_mul(7919));
    for _ in 0..EXPLOSION_PARTICLES {
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(EXPLOSION_MIN_SPEED..EXPLOSION_MAX_SPEED);
        state.push_fragment(Particle {
            kind: ParticleKind::Fragment,
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            size: rng.random_range(2.0..5.0),
            hue: rng.random_range(0.0..360.0),
            alpha: 1.0,
        });
    }
}

/// Integrate particle motion, fade alpha, cull the dead and the departed
fn advance_particles(state: &mut GameState, dt: f32) {
    for particle in &mut state.particles {
        particle.pos += particle.vel * dt;
        match particle.kind {
            ParticleKind::Fragment => {
                particle.vel.y += PARTICLE_GRAVITY * dt;
                particle.alpha -= EXPLOSION_FADE_RATE * dt;
            }
            ParticleKind::Sparkle => {
                particle.alpha -= SPARKLE_FADE_RATE * dt;
            }
        }
    }

    let bounds = state.bounds;
    state
        .particles
        .retain(|p| p.alpha > 0.0 && p.pos.y <= bounds.y && p.pos.x >= 0.0 && p.pos.x <= bounds.x);
}
