//! Game state and core simulation types
//!
//! All state that must be persisted for determinism lives here. Cosmetic
//! state (stars, particles, pending events) is rebuilt at runtime and skipped
//! during serialization.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, stars drifting behind it
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused (tab hidden, window blur, or manual)
    Paused,
    /// Hearts exhausted
    GameOver,
}

/// Orb lifecycle - resting at the anchor, held by a drag, or in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OrbState {
    /// Sitting at the anchor, shootable once the reload cooldown expires
    Resting,
    /// Pointer is holding the orb; position follows the clamped drag
    Dragging,
    /// Launched. `has_hit` latches after the first enemy collision so a
    /// single shot can never destroy two enemies.
    InFlight { has_hit: bool },
}

/// The player's projectile. Exactly one exists per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Orb {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: OrbState,
}

impl Orb {
    pub fn at_anchor(anchor: Vec2) -> Self {
        Self {
            pos: anchor,
            vel: Vec2::ZERO,
            radius: ORB_RADIUS,
            state: OrbState::Resting,
        }
    }

    /// Snap back to the anchor and clear motion
    pub fn reset(&mut self, anchor: Vec2) {
        self.pos = anchor;
        self.vel = Vec2::ZERO;
        self.state = OrbState::Resting;
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self.state, OrbState::InFlight { .. })
    }
}

/// Enemy shape variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyShape {
    Circle,
    Triangle,
    Square,
    Star,
}

impl EnemyShape {
    pub const ALL: [EnemyShape; 4] = [
        EnemyShape::Circle,
        EnemyShape::Triangle,
        EnemyShape::Square,
        EnemyShape::Star,
    ];
}

/// Neon hues enemies are painted with (red, green, blue, magenta, cyan, yellow)
pub const ENEMY_HUES: [f32; 6] = [0.0, 120.0, 240.0, 300.0, 180.0, 60.0];

/// A falling obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Collision and draw radius
    pub size: f32,
    /// Downward speed (pixels/s), fixed at spawn time
    pub fall_speed: f32,
    pub shape: EnemyShape,
    pub hue: f32,
}

/// What a particle is, which decides how it ages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Orb-trail sparkle: drifts, fades over ~1 s
    Sparkle,
    /// Explosion fragment: falls under gravity, fades over ~0.5 s
    Fragment,
}

/// A decorative, physics-free effect entity
#[derive(Debug, Clone)]
pub struct Particle {
    pub kind: ParticleKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub hue: f32,
    pub alpha: f32,
}

/// A single background star
#[derive(Debug, Clone)]
pub struct Star {
    pub pos: Vec2,
    pub size: f32,
    /// Downward drift speed of this star's parallax layer (pixels/s)
    pub speed: f32,
    pub color: Rgb,
}

/// A parallax starfield layer
pub struct StarLayer {
    pub speed: f32,
    pub count: usize,
    pub color: &'static str,
    pub size_range: (f32, f32),
}

/// Three layers, slowest/dimmest first
pub const STAR_LAYERS: [StarLayer; 3] = [
    StarLayer {
        speed: 12.0,
        count: 150,
        color: "#ffffff",
        size_range: (3.0, 6.0),
    },
    StarLayer {
        speed: 30.0,
        count: 200,
        color: "#ff00ff",
        size_range: (4.0, 8.0),
    },
    StarLayer {
        speed: 48.0,
        count: 250,
        color: "#00ffff",
        size_range: (5.0, 10.0),
    },
];

/// Things the platform layer reacts to (sound, HUD flashes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Launched,
    EnemyDestroyed,
    HeartLost,
    WallBounce,
    GameOver,
}

/// Complete game state (deterministic where it matters, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Score, +10 per destroyed enemy, never decremented
    pub score: u64,
    /// Remaining lives
    pub hearts: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Logical canvas size (CSS pixels)
    pub bounds: Vec2,
    /// Slingshot anchor the orb rests at and launches from
    pub anchor: Vec2,
    /// Accumulated time toward the next spawn (seconds)
    pub spawn_timer: f32,
    /// Current spawn interval (seconds), shrinks toward the floor
    pub spawn_interval: f32,
    /// Total enemies spawned this run (also salts the spawn RNG)
    pub spawn_count: u32,
    /// Ticks until the next shot is allowed
    pub reload_ticks: u32,
    /// The player's orb
    pub orb: Orb,
    /// Falling enemies, oldest first
    pub enemies: Vec<Enemy>,
    /// Parallax starfield (cosmetic)
    #[serde(skip)]
    pub stars: Vec<Star>,
    /// Sparkles and explosion fragments (cosmetic)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    /// Events emitted this tick, drained by the platform layer
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Fractional sparkle emission carry-over
    #[serde(skip)]
    pub sparkle_accum: f32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session sitting at the menu
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        let anchor = Self::anchor_for(bounds);
        let mut state = Self {
            seed,
            score: 0,
            hearts: STARTING_HEARTS,
            time_ticks: 0,
            phase: GamePhase::Menu,
            bounds,
            anchor,
            spawn_timer: 0.0,
            spawn_interval: INITIAL_SPAWN_INTERVAL,
            spawn_count: 0,
            reload_ticks: 0,
            orb: Orb::at_anchor(anchor),
            enemies: Vec::new(),
            stars: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            sparkle_accum: 0.0,
            next_id: 1,
        };
        state.seed_stars();
        state
    }

    /// The slingshot anchor: horizontally centered, two thirds down
    pub fn anchor_for(bounds: Vec2) -> Vec2 {
        Vec2::new(bounds.x / 2.0, bounds.y * 2.0 / 3.0)
    }

    /// Reset run state and enter active play
    pub fn start_run(&mut self) {
        self.score = 0;
        self.hearts = STARTING_HEARTS;
        self.time_ticks = 0;
        self.spawn_timer = 0.0;
        self.spawn_interval = INITIAL_SPAWN_INTERVAL;
        self.spawn_count = 0;
        self.reload_ticks = 0;
        self.enemies.clear();
        self.particles.clear();
        self.events.clear();
        self.sparkle_accum = 0.0;
        self.orb.reset(self.anchor);
        self.seed_stars();
        self.phase = GamePhase::Playing;
    }

    /// Apply a new canvas size: re-anchor, reseed the starfield, and put the
    /// orb back at rest (a mid-flight orb would be in meaningless coordinates)
    pub fn resize(&mut self, bounds: Vec2) {
        self.bounds = bounds;
        self.anchor = Self::anchor_for(bounds);
        self.orb.reset(self.anchor);
        self.seed_stars();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Derive a deterministic RNG stream from the run seed and a salt.
    ///
    /// The state stores no RNG object; every random decision re-derives its
    /// stream from (seed, salt), which keeps the state trivially serializable.
    pub fn rng_for(&self, salt: u64) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }

    /// Whether a new drag may begin
    pub fn can_shoot(&self) -> bool {
        matches!(self.orb.state, OrbState::Resting) && self.reload_ticks == 0
    }

    /// Elapsed game time in seconds
    pub fn elapsed_secs(&self) -> f32 {
        self.time_ticks as f32 * SIM_DT
    }

    /// Populate the starfield from the layer table
    pub fn seed_stars(&mut self) {
        let mut rng = self.rng_for(self.time_ticks.wrapping_add(0x5741_5253));
        self.stars.clear();
        for layer in &STAR_LAYERS {
            let color = Rgb::parse_css(layer.color);
            for _ in 0..layer.count {
                self.stars.push(Star {
                    pos: Vec2::new(
                        rng.random_range(0.0..self.bounds.x.max(1.0)),
                        rng.random_range(0.0..self.bounds.y.max(1.0)),
                    ),
                    size: rng.random_range(layer.size_range.0..layer.size_range.1),
                    speed: layer.speed,
                    color,
                });
            }
        }
    }

    /// Add a sparkle, evicting the oldest sparkle once at the cap
    pub fn push_sparkle(&mut self, particle: Particle) {
        let sparkles = self
            .particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Sparkle)
            .count();
        if sparkles >= MAX_SPARKLES {
            if let Some(idx) = self
                .particles
                .iter()
                .position(|p| p.kind == ParticleKind::Sparkle)
            {
                self.particles.remove(idx);
            }
        }
        self.particles.push(particle);
    }

    /// Add an explosion fragment, evicting the oldest fragment once at the cap
    pub fn push_fragment(&mut self, particle: Particle) {
        let fragments = self
            .particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Fragment)
            .count();
        if fragments >= MAX_PARTICLES {
            if let Some(idx) = self
                .particles
                .iter()
                .position(|p| p.kind == ParticleKind::Fragment)
            {
                self.particles.remove(idx);
            }
        }
        self.particles.push(particle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_state() -> GameState {
        GameState::new(7, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_new_state_defaults() {
        let state = test_state();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.hearts, STARTING_HEARTS);
        assert_eq!(state.score, 0);
        assert_eq!(state.orb.pos, Vec2::new(400.0, 400.0));
        assert_eq!(
            state.stars.len(),
            STAR_LAYERS.iter().map(|l| l.count).sum::<usize>()
        );
    }

    #[test]
    fn test_start_run_resets_session() {
        let mut state = test_state();
        state.score = 250;
        state.hearts = 1;
        state.spawn_interval = MIN_SPAWN_INTERVAL;
        state.start_run();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.hearts, STARTING_HEARTS);
        assert_eq!(state.spawn_interval, INITIAL_SPAWN_INTERVAL);
        assert!(state.can_shoot());
    }

    #[test]
    fn test_can_shoot_blocked_by_reload() {
        let mut state = test_state();
        assert!(state.can_shoot());
        state.reload_ticks = 1;
        assert!(!state.can_shoot());
        state.reload_ticks = 0;
        state.orb.state = OrbState::InFlight { has_hit: false };
        assert!(!state.can_shoot());
    }

    #[test]
    fn test_rng_for_is_deterministic() {
        let state = test_state();
        let mut a = state.rng_for(42);
        let mut b = state.rng_for(42);
        let x: f32 = a.random_range(0.0..1.0);
        let y: f32 = b.random_range(0.0..1.0);
        assert_eq!(x, y);
    }

    #[test]
    fn test_sparkle_cap_evicts_oldest() {
        let mut state = test_state();
        for i in 0..(MAX_SPARKLES + 5) {
            state.push_sparkle(Particle {
                kind: ParticleKind::Sparkle,
                pos: Vec2::new(i as f32, 0.0),
                vel: Vec2::ZERO,
                size: 2.0,
                hue: 0.0,
                alpha: 1.0,
            });
        }
        let sparkles: Vec<_> = state
            .particles
            .iter()
            .filter(|p| p.kind == ParticleKind::Sparkle)
            .collect();
        assert_eq!(sparkles.len(), MAX_SPARKLES);
        // The first five were evicted
        assert_eq!(sparkles[0].pos.x, 5.0);
    }
}
