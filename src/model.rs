//! The canonical in-memory model.
//!
//! This is the only shape the format reader produces and the canonicalizer
//! consumes, regardless of which schema version the bytes came from. It keeps
//! the v1/v2 layout (each face owns its vertices and triangulation) because
//! that is what the mesh-editor side works with; the deduplicated v3 layout
//! exists only on the wire.

use objson_math::prelude::*;

/// Equality is structural over all three fields, which is what vertex
/// deduplication keys on during export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Vertex {
    pub pos: Vec3,
    pub normal: Vec3,
    pub uv: UV,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Triangle {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
    /// Material slot, 0 or 1.
    pub texture: u8,
}

impl Triangle {
    pub fn new(v0: usize, v1: usize, v2: usize, texture: u8) -> Self {
        Self { v0, v1, v2, texture }
    }

    pub fn indices(&self) -> [usize; 3] {
        [self.v0, self.v1, self.v2]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quad {
    pub v0: usize,
    pub v1: usize,
    pub v2: usize,
    pub v3: usize,
    pub texture: u8,
}

impl Quad {
    pub fn new(v0: usize, v1: usize, v2: usize, v3: usize, texture: u8) -> Self {
        Self {
            v0,
            v1,
            v2,
            v3,
            texture,
        }
    }

    pub fn indices(&self) -> [usize; 4] {
        [self.v0, self.v1, self.v2, self.v3]
    }
}

/// A planar group of vertices and their triangulation.
///
/// Invariant: every triangle/quad index is a valid offset into `vertices`.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<Triangle>,
    pub quads: Vec<Quad>,
    pub normal: Vec3,
}

/// A named, independently bounded sub-mesh. `bounds` must enclose every
/// vertex position in every face.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    pub name: String,
    pub bounds: Bounds,
    pub faces: Vec<Face>,
}

/// Root canonical entity. `bounds` must enclose the union of all part bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelData {
    pub name: String,
    pub bounds: Bounds,
    pub parts: Vec<Part>,
}
