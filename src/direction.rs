//! Axis direction classification and cull-face inference.

use objson_format::error::{FormatError, Result};
use objson_format::wire::CullFace;
use objson_math::prelude::*;

/// One of the six axis-aligned cube face directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::Up,
        Direction::Down,
    ];

    /// The unit axis vector this direction is bound to.
    pub fn vector(self) -> Vec3 {
        match self {
            Direction::North => Vec3::new(0.0, 0.0, -1.0),
            Direction::South => Vec3::new(0.0, 0.0, 1.0),
            Direction::West => Vec3::new(-1.0, 0.0, 0.0),
            Direction::East => Vec3::new(1.0, 0.0, 0.0),
            Direction::Up => Vec3::new(0.0, 1.0, 0.0),
            Direction::Down => Vec3::new(0.0, -1.0, 0.0),
        }
    }

    /// Classifies a normal by component sign, priority Y, then Z, then X.
    /// A fully zero normal has no direction and is a hard error.
    pub fn from_normal(normal: Vec3) -> Result<Self> {
        let (x, y, z) = (sign(normal.x), sign(normal.y), sign(normal.z));
        if y > 0 {
            Ok(Direction::Up)
        } else if y < 0 {
            Ok(Direction::Down)
        } else if z > 0 {
            Ok(Direction::South)
        } else if z < 0 {
            Ok(Direction::North)
        } else if x > 0 {
            Ok(Direction::East)
        } else if x < 0 {
            Ok(Direction::West)
        } else {
            Err(FormatError::InvalidGeometry(
                "zero normal has no direction".into(),
            ))
        }
    }

    pub fn cull_face(self) -> CullFace {
        match self {
            Direction::North => CullFace::North,
            Direction::South => CullFace::South,
            Direction::West => CullFace::West,
            Direction::East => CullFace::East,
            Direction::Up => CullFace::Up,
            Direction::Down => CullFace::Down,
        }
    }
}

fn sign(value: f64) -> i32 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

/// Determines whether a triangle/quad lies flush on the unit-cube plane
/// perpendicular to `direction`.
///
/// All positions must share an identical coordinate on the axis orthogonal to
/// the direction, and that coordinate must exactly match the flush value
/// (-0.5 for north/west/down, +0.5 for south/east/up). Anything else is
/// [`CullFace::None`].
pub fn calculate_cull_face(positions: &[Vec3], direction: Direction) -> CullFace {
    let axis = |pos: &Vec3| match direction {
        Direction::Up | Direction::Down => pos.y,
        Direction::North | Direction::South => pos.z,
        Direction::East | Direction::West => pos.x,
    };

    let mut coords = positions.iter().map(axis);
    let first = match coords.next() {
        Some(coord) => coord,
        None => return CullFace::None,
    };
    if !coords.all(|coord| coord == first) {
        return CullFace::None;
    }

    let flush = match direction {
        Direction::North | Direction::West | Direction::Down => -0.5,
        Direction::South | Direction::East | Direction::Up => 0.5,
    };
    if first == flush {
        direction.cull_face()
    } else {
        CullFace::None
    }
}
