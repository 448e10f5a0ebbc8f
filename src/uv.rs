//! Auto-UV projection.
//!
//! Maps a 3D point on an axis-aligned cube face to a 2D texture coordinate
//! for that face's direction, with boundary wraparound for geometry spanning
//! multiple block cells, quantization to the export grid, and an edge
//! correction for faces that cross a cube boundary.

use crate::direction::Direction;
use objson_format::error::Result;
use objson_math::prelude::*;

/// Whether any vertex of the containing face fell outside the nominal
/// `[-0.5, 0.5]` range on an axis before wrapping. The first excursion seen
/// on an axis wins; a later opposite excursion does not overwrite it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Oob {
    Positive,
    Negative,
    None,
}

/// Absolute tolerance for the edge checks in the OOB correction.
pub const UV_EDGE_EPSILON: f64 = 1e-9;

/// Computes the texture coordinate for one vertex of a face pointing in
/// `direction`. Pure; the caller supplies the per-axis OOB flags scanned from
/// the whole face (see [`scan_oob`]).
pub fn project_uv(direction: Direction, vertex: Vec3, x_oob: Oob, y_oob: Oob, z_oob: Oob) -> UV {
    // Offset so a unit cube occupies [0,1]^3 instead of [-0.5,0.5]^3.
    let x = edge_correct(snap(wrap(vertex.x + 0.5)), x_oob);
    let y = edge_correct(snap(wrap(vertex.y + 0.5)), y_oob);
    let z = edge_correct(snap(wrap(vertex.z + 0.5)), z_oob);

    match direction {
        Direction::Down => UV::new(x, 1.0 - z),
        Direction::Up => UV::new(x, z),
        Direction::North => UV::new(1.0 - x, 1.0 - y),
        Direction::South => UV::new(x, 1.0 - y),
        Direction::West => UV::new(z, 1.0 - y),
        Direction::East => UV::new(1.0 - z, 1.0 - y),
    }
}

/// Wraps an offset coordinate into `[0, 1)`; a value of exactly 1 stays 1.
fn wrap(value: f64) -> f64 {
    if value > 1.0 {
        value % 1.0
    } else if value < 0.0 {
        1.0 + (value % 1.0)
    } else {
        value
    }
}

/// Forces a coordinate that snapped onto the wrong cube edge back to the edge
/// the face actually spans. Avoids a degenerate seam on boundary-crossing
/// faces.
fn edge_correct(value: f64, oob: Oob) -> f64 {
    match oob {
        Oob::Positive if (value - 1.0).abs() <= UV_EDGE_EPSILON => 0.0,
        Oob::Negative if value.abs() <= UV_EDGE_EPSILON => 1.0,
        _ => value,
    }
}

/// Scans a face's vertex positions for out-of-bounds excursions on each axis.
/// Returns the (x, y, z) flags to feed [`project_uv`].
pub fn scan_oob(positions: &[Vec3]) -> (Oob, Oob, Oob) {
    let mut x_oob = Oob::None;
    let mut y_oob = Oob::None;
    let mut z_oob = Oob::None;
    for pos in positions {
        x_oob = update_oob(x_oob, pos.x);
        y_oob = update_oob(y_oob, pos.y);
        z_oob = update_oob(z_oob, pos.z);
    }
    (x_oob, y_oob, z_oob)
}

fn update_oob(current: Oob, coord: f64) -> Oob {
    if current != Oob::None {
        return current;
    }
    if coord > 0.5 {
        Oob::Positive
    } else if coord < -0.5 {
        Oob::Negative
    } else {
        Oob::None
    }
}

/// Resolves the projection direction for a face: a caller-fixed direction, or
/// auto-detection from the face normal.
pub fn resolve_direction(fixed: Option<Direction>, normal: Vec3) -> Result<Direction> {
    match fixed {
        Some(direction) => Ok(direction),
        None => Direction::from_normal(normal),
    }
}
