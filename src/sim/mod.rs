//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{WallBounce, enemy_escaped, orb_hits_enemy, orb_out_of_play, reflect_at_bounds};
pub use state::{
    ENEMY_HUES, Enemy, EnemyShape, GameEvent, GamePhase, GameState, Orb, OrbState, Particle,
    ParticleKind, STAR_LAYERS, Star, StarLayer,
};
pub use tick::{TickInput, tick};
