//! Collision queries for light cycles
//!
//! Pure reads over a snapshot of the arena. Every cycle in a tick is tested
//! against the same snapshot, so results do not depend on update order.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::trail::{SegmentId, TrailManager, TrailSegment};
use crate::PlayerId;

/// Why a cycle was eliminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Left the arena
    Boundary,
    /// Hit a static obstacle (index into config obstacles)
    Obstacle(usize),
    /// Hit a light wall
    Trail { segment: SegmentId, owner: PlayerId },
    /// Ran into another cycle
    Player(PlayerId),
}

/// Frozen copy of one trail segment and its bounds
#[derive(Debug, Clone, Copy)]
pub struct SegmentCollider {
    pub segment: TrailSegment,
    pub rect: Rect,
}

/// Everything a cycle can crash into during one tick
#[derive(Debug, Clone)]
pub struct CollisionWorld<'a> {
    pub bounds: Rect,
    pub obstacles: &'a [Rect],
    /// Trail colliders as of the start of the tick
    pub segments: Vec<SegmentCollider>,
    /// Post-move head boxes of cycles that were alive this tick
    pub heads: Vec<(PlayerId, Rect)>,
}

impl<'a> CollisionWorld<'a> {
    /// Snapshot the trail colliders; heads are filled in after movement
    pub fn snapshot(bounds: Rect, obstacles: &'a [Rect], trails: &TrailManager) -> Self {
        let segments = trails
            .iter()
            .map(|s| SegmentCollider {
                segment: *s,
                rect: s.rect(),
            })
            .collect();
        Self {
            bounds,
            obstacles,
            segments,
            heads: Vec::new(),
        }
    }

    /// First fatal contact for `player`, checked in a fixed order:
    /// boundary, obstacles, trails (oldest first), then other cycles.
    ///
    /// `swept` is the hit box swept over this tick's movement and is used for
    /// static geometry; `head` is the post-move box used against other cycles.
    pub fn check(&self, player: PlayerId, swept: &Rect, head: &Rect) -> Option<DeathCause> {
        if !self.bounds.contains_rect(swept) {
            return Some(DeathCause::Boundary);
        }

        if let Some(index) = self.obstacles.iter().position(|o| o.intersects(swept)) {
            return Some(DeathCause::Obstacle(index));
        }

        if let Some(hit) = self
            .segments
            .iter()
            .find(|c| c.segment.is_solid_to(player) && c.rect.intersects(swept))
        {
            return Some(DeathCause::Trail {
                segment: hit.segment.id,
                owner: hit.segment.owner,
            });
        }

        self.heads
            .iter()
            .find(|(other, rect)| *other != player && rect.intersects(head))
            .map(|(other, _)| DeathCause::Player(*other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::heading::Heading;
    use glam::Vec2;

    fn world(trails: &TrailManager) -> CollisionWorld<'static> {
        CollisionWorld::snapshot(Rect::new(Vec2::ZERO, Vec2::splat(20.0)), &[], trails)
    }

    fn head(at: Vec2) -> Rect {
        Rect::new(at, Vec2::splat(0.5))
    }

    #[test]
    fn test_boundary() {
        let trails = TrailManager::new();
        let w = world(&trails);
        let inside = head(Vec2::new(19.0, 0.0));
        let outside = head(Vec2::new(19.8, 0.0));
        assert_eq!(w.check(1, &inside, &inside), None);
        assert_eq!(w.check(1, &outside, &outside), Some(DeathCause::Boundary));
    }

    #[test]
    fn test_obstacle() {
        let trails = TrailManager::new();
        let obstacles = [Rect::new(Vec2::new(5.0, 5.0), Vec2::ONE)];
        let w = CollisionWorld::snapshot(
            Rect::new(Vec2::ZERO, Vec2::splat(20.0)),
            &obstacles,
            &trails,
        );
        let hit = head(Vec2::new(5.0, 6.2));
        assert_eq!(w.check(1, &hit, &hit), Some(DeathCause::Obstacle(0)));
    }

    #[test]
    fn test_own_trail_respects_grace() {
        let mut trails = TrailManager::new();
        let (first, _) = trails.create_segment(1, Vec2::ZERO, Heading::Up, 0.5);
        trails.grow_segment(first, Vec2::new(0.0, 5.0));
        trails.create_segment(1, Vec2::new(0.0, 5.0), Heading::Right, 0.5);

        let on_wall = head(Vec2::new(0.0, 2.0));
        assert_eq!(world(&trails).check(1, &on_wall, &on_wall), None);
        assert_eq!(
            world(&trails).check(2, &on_wall, &on_wall),
            Some(DeathCause::Trail {
                segment: first,
                owner: 1
            })
        );

        trails.retag_after_grace(first);
        assert!(world(&trails).check(1, &on_wall, &on_wall).is_some());
    }

    #[test]
    fn test_swept_box_catches_tunnelling() {
        let mut trails = TrailManager::new();
        let (wall, _) = trails.create_segment(2, Vec2::new(0.0, -5.0), Heading::Up, 0.5);
        trails.grow_segment(wall, Vec2::new(0.0, 10.0));

        // Jumped clean over the wall in one tick
        let before = head(Vec2::new(-3.0, 0.0));
        let after = head(Vec2::new(3.0, 0.0));
        let swept = before.union(&after);
        let w = world(&trails);
        assert_eq!(w.check(1, &after, &after), None);
        assert!(matches!(w.check(1, &swept, &after), Some(DeathCause::Trail { owner: 2, .. })));
    }

    #[test]
    fn test_head_on_players() {
        let trails = TrailManager::new();
        let mut w = world(&trails);
        let a = head(Vec2::new(0.0, 0.0));
        let b = head(Vec2::new(0.6, 0.0));
        w.heads = vec![(1, a), (2, b)];
        assert_eq!(w.check(1, &a, &a), Some(DeathCause::Player(2)));
        assert_eq!(w.check(2, &b, &b), Some(DeathCause::Player(1)));
    }
}
