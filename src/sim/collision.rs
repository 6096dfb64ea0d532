//! Collision detection and boundary response
//!
//! Everything here is circle-vs-circle or circle-vs-axis-aligned-edge; the
//! orb reflects off the side and top walls with damping and leaves play off
//! the bottom.

use glam::Vec2;

use super::state::Enemy;
use crate::consts::WALL_DAMPING;

/// True when the orb overlaps an enemy (circle distance test)
#[inline]
pub fn orb_hits_enemy(orb_pos: Vec2, orb_radius: f32, enemy: &Enemy) -> bool {
    orb_pos.distance(enemy.pos) < orb_radius + enemy.size
}

/// Which boundaries a flight step bounced off
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallBounce {
    pub side: bool,
    pub top: bool,
}

impl WallBounce {
    pub fn any(&self) -> bool {
        self.side || self.top
    }
}

/// Reflect the orb off the left/right/top boundaries with damping.
///
/// The position is clamped back inside the play area and the velocity
/// component normal to the wall flips sign, scaled by [`WALL_DAMPING`].
/// The bottom edge is open - the orb falls out of play there.
pub fn reflect_at_bounds(pos: &mut Vec2, vel: &mut Vec2, radius: f32, bounds: Vec2) -> WallBounce {
    let mut bounce = WallBounce::default();

    if pos.x < radius || pos.x > bounds.x - radius {
        vel.x *= -WALL_DAMPING;
        pos.x = pos.x.clamp(radius, bounds.x - radius);
        bounce.side = true;
    }
    if pos.y < radius {
        vel.y *= -WALL_DAMPING;
        pos.y = radius;
        bounce.top = true;
    }

    bounce
}

/// True once the orb has fully left the playfield (bottom exit, or pushed
/// past a side by a bounce that could not contain it)
#[inline]
pub fn orb_out_of_play(pos: Vec2, radius: f32, bounds: Vec2) -> bool {
    pos.y > bounds.y + radius || pos.x < -radius || pos.x > bounds.x + radius
}

/// True when a falling enemy has crossed the bottom boundary
#[inline]
pub fn enemy_escaped(enemy: &Enemy, bounds: Vec2) -> bool {
    enemy.pos.y > bounds.y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::EnemyShape;

    fn enemy_at(x: f32, y: f32, size: f32) -> Enemy {
        Enemy {
            id: 1,
            pos: Vec2::new(x, y),
            size,
            fall_speed: 90.0,
            shape: EnemyShape::Circle,
            hue: 0.0,
        }
    }

    #[test]
    fn test_orb_hits_overlapping_enemy() {
        let enemy = enemy_at(100.0, 100.0, 25.0);
        assert!(orb_hits_enemy(Vec2::new(120.0, 100.0), 12.0, &enemy));
    }

    #[test]
    fn test_orb_misses_distant_enemy() {
        let enemy = enemy_at(100.0, 100.0, 25.0);
        assert!(!orb_hits_enemy(Vec2::new(200.0, 100.0), 12.0, &enemy));
    }

    #[test]
    fn test_touching_circles_do_not_collide() {
        // Distance exactly equal to the radii sum is a miss (strict inequality)
        let enemy = enemy_at(100.0, 100.0, 25.0);
        assert!(!orb_hits_enemy(Vec2::new(137.0, 100.0), 12.0, &enemy));
    }

    #[test]
    fn test_side_wall_reflects_and_damps() {
        let bounds = Vec2::new(800.0, 600.0);
        let mut pos = Vec2::new(5.0, 300.0);
        let mut vel = Vec2::new(-200.0, 50.0);

        let bounce = reflect_at_bounds(&mut pos, &mut vel, 12.0, bounds);
        assert!(bounce.side);
        assert!(!bounce.top);
        assert_eq!(pos.x, 12.0);
        assert_eq!(vel.x, 100.0); // flipped and halved
        assert_eq!(vel.y, 50.0);
    }

    #[test]
    fn test_top_wall_reflects() {
        let bounds = Vec2::new(800.0, 600.0);
        let mut pos = Vec2::new(400.0, 2.0);
        let mut vel = Vec2::new(10.0, -300.0);

        let bounce = reflect_at_bounds(&mut pos, &mut vel, 12.0, bounds);
        assert!(bounce.top);
        assert_eq!(pos.y, 12.0);
        assert_eq!(vel.y, 150.0);
    }

    #[test]
    fn test_no_bounce_inside_bounds() {
        let bounds = Vec2::new(800.0, 600.0);
        let mut pos = Vec2::new(400.0, 300.0);
        let mut vel = Vec2::new(100.0, 100.0);
        assert!(!reflect_at_bounds(&mut pos, &mut vel, 12.0, bounds).any());
    }

    #[test]
    fn test_orb_out_of_play_bottom_only() {
        let bounds = Vec2::new(800.0, 600.0);
        assert!(orb_out_of_play(Vec2::new(400.0, 620.0), 12.0, bounds));
        assert!(!orb_out_of_play(Vec2::new(400.0, 10.0), 12.0, bounds));
        assert!(!orb_out_of_play(Vec2::new(400.0, 300.0), 12.0, bounds));
    }

    #[test]
    fn test_enemy_escape() {
        let bounds = Vec2::new(800.0, 600.0);
        assert!(enemy_escaped(&enemy_at(100.0, 601.0, 25.0), bounds));
        assert!(!enemy_escaped(&enemy_at(100.0, 599.0, 25.0), bounds));
    }
}
