//! Discrete headings and the axis they travel on

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::axis_sign;

/// Movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Unit vector along the positive direction of this axis
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::X,
            Axis::Vertical => Vec2::Y,
        }
    }

    /// Component of `v` along this axis
    #[inline]
    pub fn component(self, v: Vec2) -> f32 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
        }
    }

    pub fn other(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// One of the four travel directions. Up is +y, Right is +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    /// Unit offset for this heading
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Heading::Up => Vec2::Y,
            Heading::Right => Vec2::X,
            Heading::Down => Vec2::NEG_Y,
            Heading::Left => Vec2::NEG_X,
        }
    }

    /// Integer grid offset for this heading
    #[inline]
    pub fn step(self) -> IVec2 {
        match self {
            Heading::Up => IVec2::Y,
            Heading::Right => IVec2::X,
            Heading::Down => IVec2::NEG_Y,
            Heading::Left => IVec2::NEG_X,
        }
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            Heading::Up | Heading::Down => Axis::Vertical,
            Heading::Right | Heading::Left => Axis::Horizontal,
        }
    }

    /// +1 if travelling toward the positive end of the axis
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Heading::Up | Heading::Right => 1.0,
            Heading::Down | Heading::Left => -1.0,
        }
    }

    pub fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Right => Heading::Left,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
        }
    }

    /// Heading after a 90° counter-clockwise turn
    pub fn turned_left(self) -> Heading {
        match self {
            Heading::Up => Heading::Left,
            Heading::Right => Heading::Up,
            Heading::Down => Heading::Right,
            Heading::Left => Heading::Down,
        }
    }

    /// Heading after a 90° clockwise turn
    pub fn turned_right(self) -> Heading {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }

    /// Clockwise rotation from Up, in degrees
    pub fn rotation_degrees(self) -> f32 {
        match self {
            Heading::Up => 0.0,
            Heading::Right => 90.0,
            Heading::Down => 180.0,
            Heading::Left => 270.0,
        }
    }

    #[inline]
    pub fn is_orthogonal(self, other: Heading) -> bool {
        self.axis() != other.axis()
    }

    /// Turn requested by a logical axis input, if any.
    ///
    /// Only the component orthogonal to the current travel axis counts, so a
    /// push along (or against) the current heading never yields a heading.
    pub fn from_axis_input(current: Heading, input: Vec2, dead_zone: f32) -> Option<Heading> {
        let across = current.axis().other();
        let heading = match (across, axis_sign(across.component(input), dead_zone)) {
            (Axis::Horizontal, 1) => Heading::Right,
            (Axis::Horizontal, -1) => Heading::Left,
            (Axis::Vertical, 1) => Heading::Up,
            (Axis::Vertical, -1) => Heading::Down,
            _ => return None,
        };
        Some(heading)
    }

    /// Axis input that would request this heading
    pub fn as_input(self) -> Vec2 {
        self.unit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_are_orthogonal() {
        for heading in Heading::ALL {
            assert!(heading.is_orthogonal(heading.turned_left()));
            assert!(heading.is_orthogonal(heading.turned_right()));
            assert!(!heading.is_orthogonal(heading.opposite()));
            assert_eq!(heading.turned_left().turned_right(), heading);
            assert_eq!(heading.unit(), -heading.opposite().unit());
        }
    }

    #[test]
    fn test_rotation_steps_by_quarter_turns() {
        for heading in Heading::ALL {
            let next = heading.turned_right().rotation_degrees();
            assert_eq!((heading.rotation_degrees() + 90.0) % 360.0, next);
        }
    }

    #[test]
    fn test_axis_input_ignores_parallel_push() {
        // Reversal and "keep going" both map to nothing
        assert_eq!(Heading::from_axis_input(Heading::Up, Vec2::NEG_Y, 0.1), None);
        assert_eq!(Heading::from_axis_input(Heading::Up, Vec2::Y, 0.1), None);
        assert_eq!(Heading::from_axis_input(Heading::Left, Vec2::X, 0.1), None);

        assert_eq!(
            Heading::from_axis_input(Heading::Up, Vec2::new(-1.0, -1.0), 0.1),
            Some(Heading::Left)
        );
        assert_eq!(
            Heading::from_axis_input(Heading::Right, Vec2::new(0.0, 0.5), 0.1),
            Some(Heading::Up)
        );
    }

    #[test]
    fn test_axis_component() {
        let v = Vec2::new(3.0, -2.0);
        assert_eq!(Axis::Horizontal.component(v), 3.0);
        assert_eq!(Axis::Vertical.component(v), -2.0);
        for heading in Heading::ALL {
            let axis = heading.axis();
            assert_eq!(axis.component(heading.unit()) * heading.sign(), 1.0);
            assert_eq!(axis.other().component(heading.unit()), 0.0);
        }
    }

    #[test]
    fn test_axis_input_dead_zone() {
        assert_eq!(
            Heading::from_axis_input(Heading::Up, Vec2::new(0.05, 0.0), 0.1),
            None
        );
    }
}
