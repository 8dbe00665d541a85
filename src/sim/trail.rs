//! Light-wall trail segments
//!
//! Each cycle owns a chain of straight segments. Only the newest one (the
//! *active* segment) grows; it stretches from the point where the cycle last
//! turned to the cycle's current position. When the cycle turns again the
//! active segment freezes and a fresh one starts at the turn point.
//!
//! A segment is harmless to its own owner while active and for a grace
//! period after it freezes, since the owner's hit box still overlaps its end.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::heading::{Axis, Heading};
use super::rect::Rect;
use crate::PlayerId;

/// Segment identifier, never reused within a `TrailManager`
pub type SegmentId = u32;

/// One straight piece of light wall
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrailSegment {
    pub id: SegmentId,
    pub owner: PlayerId,
    /// Creation point (fixed end)
    pub anchor: Vec2,
    /// Direction the growing end travels
    pub heading: Heading,
    /// Distance from anchor to the growing end
    pub length: f32,
    /// Wall thickness across the axis
    pub thickness: f32,
    /// Still tracking its owner
    pub active: bool,
    /// Solid to its owner as well as everyone else
    pub self_solid: bool,
}

impl TrailSegment {
    /// Bounding rectangle from the anchor to the growing end
    pub fn rect(&self) -> Rect {
        let along = self.heading.unit() * self.length;
        let across = self.axis().other().unit() * (self.thickness / 2.0);
        Rect::new(
            self.anchor + along * 0.5,
            (along * 0.5).abs() + across,
        )
    }

    /// The moving end
    pub fn tip(&self) -> Vec2 {
        self.anchor + self.heading.unit() * self.length
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.heading.axis()
    }

    /// Whether this segment can kill `player`
    #[inline]
    pub fn is_solid_to(&self, player: PlayerId) -> bool {
        self.owner != player || self.self_solid
    }
}

/// Owns every segment of the current round
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailManager {
    /// All segments in creation order
    segments: Vec<TrailSegment>,
    next_id: SegmentId,
}

impl TrailManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new segment for `owner` at `position` travelling in `heading`.
    ///
    /// Freezes the owner's previous active segment, if any, and returns its id
    /// so the caller can schedule the grace-period retag.
    pub fn create_segment(
        &mut self,
        owner: PlayerId,
        position: Vec2,
        heading: Heading,
        thickness: f32,
    ) -> (SegmentId, Option<SegmentId>) {
        let frozen = self.active_for_mut(owner).map(|segment| {
            segment.active = false;
            segment.id
        });

        self.next_id += 1;
        let id = self.next_id;
        self.segments.push(TrailSegment {
            id,
            owner,
            anchor: position,
            heading,
            length: 0.0,
            thickness,
            active: true,
            self_solid: false,
        });

        log::debug!(
            "Player {} segment {} at ({:.2}, {:.2}) heading {:?}",
            owner,
            id,
            position.x,
            position.y,
            heading
        );
        (id, frozen)
    }

    /// Stretch an active segment by the owner's displacement this tick.
    ///
    /// Only the displacement component along the travel direction counts.
    /// Returns the new bounds, or `None` if the segment is frozen or gone.
    pub fn grow_segment(&mut self, id: SegmentId, delta: Vec2) -> Option<Rect> {
        let segment = self.get_mut(id).filter(|s| s.active)?;
        let step = segment.axis().component(delta) * segment.heading.sign();
        if step > 0.0 {
            segment.length += step;
        }
        Some(segment.rect())
    }

    /// Make a retired segment solid to its owner. Returns false if the segment
    /// no longer exists or is still active.
    pub fn retag_after_grace(&mut self, id: SegmentId) -> bool {
        match self.get_mut(id) {
            Some(segment) if !segment.active => {
                segment.self_solid = true;
                true
            }
            _ => false,
        }
    }

    /// Destroy every segment (round reset). Ids keep counting up.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailSegment> {
        self.segments.iter()
    }

    pub fn get(&self, id: SegmentId) -> Option<&TrailSegment> {
        // Ids are handed out in push order, so binary search works
        self.segments
            .binary_search_by_key(&id, |s| s.id)
            .ok()
            .map(|i| &self.segments[i])
    }

    fn get_mut(&mut self, id: SegmentId) -> Option<&mut TrailSegment> {
        self.segments
            .binary_search_by_key(&id, |s| s.id)
            .ok()
            .map(|i| &mut self.segments[i])
    }

    pub fn active_for(&self, owner: PlayerId) -> Option<&TrailSegment> {
        self.segments
            .iter()
            .rev()
            .find(|s| s.owner == owner && s.active)
    }

    fn active_for_mut(&mut self, owner: PlayerId) -> Option<&mut TrailSegment> {
        self.segments
            .iter_mut()
            .rev()
            .find(|s| s.owner == owner && s.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_freezes_previous() {
        let mut trails = TrailManager::new();
        let (first, frozen) = trails.create_segment(1, Vec2::ZERO, Heading::Up, 0.5);
        assert_eq!(frozen, None);

        let (second, frozen) = trails.create_segment(1, Vec2::new(0.0, 3.0), Heading::Right, 0.5);
        assert_eq!(frozen, Some(first));
        assert!(!trails.get(first).unwrap().active);
        assert_eq!(trails.active_for(1).unwrap().id, second);

        // Other owners are untouched
        let (other, frozen) = trails.create_segment(2, Vec2::new(5.0, 0.0), Heading::Down, 0.5);
        assert_eq!(frozen, None);
        assert_eq!(trails.active_for(2).unwrap().id, other);
        assert_eq!(trails.active_for(1).unwrap().id, second);
    }

    #[test]
    fn test_grow_spans_anchor_to_tip() {
        let mut trails = TrailManager::new();
        let (id, _) = trails.create_segment(1, Vec2::new(2.0, 0.0), Heading::Left, 0.5);
        trails.grow_segment(id, Vec2::new(-1.5, 0.0));
        let rect = trails.grow_segment(id, Vec2::new(-0.5, 0.0)).unwrap();

        let segment = trails.get(id).unwrap();
        assert_eq!(segment.tip(), Vec2::ZERO);
        assert_eq!(rect.min(), Vec2::new(0.0, -0.25));
        assert_eq!(rect.max(), Vec2::new(2.0, 0.25));
    }

    #[test]
    fn test_grow_never_shrinks() {
        let mut trails = TrailManager::new();
        let (id, _) = trails.create_segment(1, Vec2::ZERO, Heading::Up, 0.5);
        trails.grow_segment(id, Vec2::new(0.0, 2.0));
        trails.grow_segment(id, Vec2::new(0.0, -1.0));
        trails.grow_segment(id, Vec2::new(3.0, 0.0));
        assert_eq!(trails.get(id).unwrap().length, 2.0);
    }

    #[test]
    fn test_frozen_segment_does_not_grow() {
        let mut trails = TrailManager::new();
        let (id, _) = trails.create_segment(1, Vec2::ZERO, Heading::Up, 0.5);
        trails.grow_segment(id, Vec2::new(0.0, 1.0));
        trails.create_segment(1, Vec2::new(0.0, 1.0), Heading::Right, 0.5);
        assert!(trails.grow_segment(id, Vec2::new(0.0, 1.0)).is_none());
        assert_eq!(trails.get(id).unwrap().length, 1.0);
    }

    #[test]
    fn test_self_solid_only_after_retag() {
        let mut trails = TrailManager::new();
        let (first, _) = trails.create_segment(1, Vec2::ZERO, Heading::Up, 0.5);
        assert!(!trails.retag_after_grace(first), "active segments stay harmless");
        let segment = trails.get(first).unwrap();
        assert!(!segment.is_solid_to(1));
        assert!(segment.is_solid_to(2));

        let (second, _) = trails.create_segment(1, Vec2::new(0.0, 2.0), Heading::Left, 0.5);
        assert!(!trails.get(first).unwrap().is_solid_to(1));
        assert!(trails.retag_after_grace(first));
        let solid: Vec<SegmentId> = trails
            .iter()
            .filter(|s| s.is_solid_to(1))
            .map(|s| s.id)
            .collect();
        assert_eq!(solid, vec![first]);
        assert!(trails.get(second).unwrap().is_solid_to(2));
    }

    #[test]
    fn test_retag_after_clear_is_harmless() {
        let mut trails = TrailManager::new();
        let (first, _) = trails.create_segment(1, Vec2::ZERO, Heading::Up, 0.5);
        trails.create_segment(1, Vec2::ZERO, Heading::Left, 0.5);
        trails.clear();
        assert!(trails.is_empty());
        assert!(!trails.retag_after_grace(first));
    }
}
