//! Collision detection for the run loop
//!
//! Everything is axis-aligned boxes: the character model and the obstacle
//! cylinders are both wrapped in AABBs, and any overlap is a hit.

use glam::Vec3;

use super::state::Obstacle;
use crate::consts::*;

/// Axis-aligned bounding box, stored as center + half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// True when the boxes overlap on all three axes
    pub fn intersects(&self, other: &Aabb) -> bool {
        let delta = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        delta.x < reach.x && delta.y < reach.y && delta.z < reach.z
    }
}

/// Bounding volume of the character at the given lane and forward position
pub fn character_aabb(lane: f32, z: f32) -> Aabb {
    Aabb::new(
        Vec3::new(lane, CHARACTER_CENTER_Y, z),
        CHARACTER_HALF_EXTENTS,
    )
}

/// Bounding volume of an obstacle
pub fn obstacle_aabb(obstacle: &Obstacle) -> Aabb {
    Aabb::new(
        Vec3::new(obstacle.lane, OBSTACLE_CENTER_Y, obstacle.z),
        OBSTACLE_HALF_EXTENTS,
    )
}

/// Id of the first obstacle overlapping the character, if any.
///
/// The first overlap ends the check; ordering among obstacles is
/// incidental, not meaningful.
pub fn first_hit(lane: f32, z: f32, obstacles: &[Obstacle]) -> Option<u32> {
    let character = character_aabb(lane, z);
    obstacles
        .iter()
        .find(|o| character.intersects(&obstacle_aabb(o)))
        .map(|o| o.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::new(Vec3::new(1.5, 0.0, 0.0), Vec3::splat(1.0));
        assert!(a.intersects(&b));

        let c = Aabb::new(Vec3::new(2.5, 0.0, 0.0), Vec3::splat(1.0));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_boxes_do_not_intersect() {
        // Strict inequality: exactly adjacent boxes are a miss
        let a = Aabb::new(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::new(Vec3::new(2.0, 0.0, 0.0), Vec3::splat(1.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_hit_same_lane_same_z() {
        let obstacles = vec![Obstacle {
            id: 7,
            lane: 1.0,
            z: 120.0,
        }];
        assert_eq!(first_hit(1.0, 120.0, &obstacles), Some(7));
    }

    #[test]
    fn test_miss_adjacent_lane() {
        let obstacles = vec![Obstacle {
            id: 7,
            lane: 2.0,
            z: 120.0,
        }];
        // One full lane step apart: |dx| = 1.0 >= 0.4 + 0.5
        assert_eq!(first_hit(1.0, 120.0, &obstacles), None);
    }

    #[test]
    fn test_miss_ahead_of_character() {
        let obstacles = vec![Obstacle {
            id: 3,
            lane: 0.0,
            z: 121.0,
        }];
        assert_eq!(first_hit(0.0, 120.0, &obstacles), None);
    }

    #[test]
    fn test_first_overlap_wins() {
        let obstacles = vec![
            Obstacle {
                id: 1,
                lane: -3.0,
                z: 0.0,
            },
            Obstacle {
                id: 2,
                lane: 0.0,
                z: 50.0,
            },
            Obstacle {
                id: 3,
                lane: 0.0,
                z: 50.0,
            },
        ];
        assert_eq!(first_hit(0.0, 50.0, &obstacles), Some(2));
    }
}
