//! Neon Sling - a slingshot arcade game for the browser
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `renderer`: Canvas-2D rendering
//! - `color`: HSL/RGB conversion for the neon palette
//! - `audio`: Web Audio SFX synthesis and looping music tracks
//! - `settings`, `highscores`: LocalStorage-backed preferences and leaderboard

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod color;
pub mod highscores;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Orb defaults
    pub const ORB_RADIUS: f32 = 12.0;
    /// Downward acceleration on the orb in flight (pixels/s²)
    pub const GRAVITY: f32 = 1800.0;
    /// Fraction of velocity kept after a wall bounce (sign flips)
    pub const WALL_DAMPING: f32 = 0.5;

    /// Drag-to-launch model
    pub const MAX_DRAG_DISTANCE: f32 = 150.0;
    /// Drags shorter than this reset the orb instead of firing
    pub const MIN_DRAG_DISTANCE: f32 = 20.0;
    /// Launch speed per pixel of drag distance (pixels/s)
    pub const POWER_SCALE: f32 = 6.0;
    /// Launch speed cap (pixels/s)
    pub const MAX_LAUNCH_SPEED: f32 = 1500.0;

    /// Reload cooldown between shots (ticks, 0.9 s at 120 Hz)
    pub const RELOAD_TICKS: u32 = 108;

    /// Enemy spawning
    pub const INITIAL_SPAWN_INTERVAL: f32 = 2.0;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.8;
    /// Interval shrink per spawn (seconds)
    pub const SPAWN_INTERVAL_STEP: f32 = 0.01;
    /// Base fall speed (pixels/s)
    pub const ENEMY_BASE_SPEED: f32 = 90.0;
    /// Extra fall speed per second of elapsed game time
    pub const ENEMY_SPEED_RAMP: f32 = 6.0;
    pub const ENEMY_MIN_SIZE: f32 = 20.0;
    pub const ENEMY_MAX_SIZE: f32 = 30.0;

    /// Scoring and lives
    pub const SCORE_PER_KILL: u64 = 10;
    pub const STARTING_HEARTS: u8 = 3;

    /// Particle budgets
    pub const EXPLOSION_PARTICLES: usize = 40;
    pub const EXPLOSION_MIN_SPEED: f32 = 180.0;
    pub const EXPLOSION_MAX_SPEED: f32 = 480.0;
    /// Downward pull on explosion fragments (pixels/s²)
    pub const PARTICLE_GRAVITY: f32 = 360.0;
    /// Explosion fragments fade out over 0.5 s
    pub const EXPLOSION_FADE_RATE: f32 = 2.0;
    /// Sparkles fade out over 1 s
    pub const SPARKLE_FADE_RATE: f32 = 1.0;
    /// Sparkles emitted per second while the orb is in flight
    pub const SPARKLES_PER_SEC: f32 = 120.0;
    pub const MAX_SPARKLES: usize = 100;
    pub const MAX_PARTICLES: usize = 256;
}

/// Clamp a point to at most `max_dist` from `anchor`
#[inline]
pub fn clamp_to_radius(anchor: glam::Vec2, point: glam::Vec2, max_dist: f32) -> glam::Vec2 {
    let offset = point - anchor;
    let dist = offset.length();
    if dist > max_dist {
        anchor + offset / dist * max_dist
    } else {
        point
    }
}
