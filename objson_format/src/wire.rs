//! The current (version 3) on-disk schema.
//!
//! Geometry is deduplicated: the root `faces` list holds shared vertex data
//! once per distinct normal, and each part's triangles/quads reference a
//! shared face by index plus local vertex indices into its vertex list.

use std::fmt;
use std::path::Path;

use serde::{
    de::{Error as DeError, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};

use objson_math::prelude::*;

use crate::codec;
use crate::error::Result;

/// Marks a triangle/quad that lies flush on one face of its part's bounding
/// box, so it can be skipped when adjacent geometry occludes it.
///
/// Stored on the wire as the integer code used by the consuming game engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullFace {
    None,
    Down,
    Up,
    North,
    South,
    West,
    East,
}

impl CullFace {
    pub fn code(self) -> i8 {
        match self {
            CullFace::None => -1,
            CullFace::Down => 0,
            CullFace::Up => 1,
            CullFace::North => 2,
            CullFace::South => 3,
            CullFace::West => 4,
            CullFace::East => 5,
        }
    }

    pub fn from_code(code: i8) -> Option<Self> {
        match code {
            -1 => Some(CullFace::None),
            0 => Some(CullFace::Down),
            1 => Some(CullFace::Up),
            2 => Some(CullFace::North),
            3 => Some(CullFace::South),
            4 => Some(CullFace::West),
            5 => Some(CullFace::East),
            _ => None,
        }
    }
}

impl Default for CullFace {
    fn default() -> Self {
        CullFace::None
    }
}

impl Serialize for CullFace {
    fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i8(self.code())
    }
}

impl<'de> Deserialize<'de> for CullFace {
    fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_i8(CullFaceVisitor)
    }
}

struct CullFaceVisitor;

impl<'de> Visitor<'de> for CullFaceVisitor {
    type Value = CullFace;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a cull face code between -1 and 5")
    }

    fn visit_i64<E>(self, value: i64) -> ::std::result::Result<Self::Value, E>
    where
        E: DeError,
    {
        if value < i8::MIN as i64 || value > i8::MAX as i64 {
            return Err(E::custom(format!("cull face code out of range: {}", value)));
        }
        CullFace::from_code(value as i8)
            .ok_or_else(|| E::custom(format!("unknown cull face code: {}", value)))
    }

    fn visit_u64<E>(self, value: u64) -> ::std::result::Result<Self::Value, E>
    where
        E: DeError,
    {
        self.visit_i64(value as i64)
    }
}

/// One vertex record of a shared face. Keys serialize as `pos`, `normal`, `uv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireVertex {
    pub pos: Vec3,
    pub normal: Vec3,
    pub uv: UV,
}

/// A deduplicated group of vertices with one normal, referenced by index from
/// the parts' triangles and quads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireFace {
    pub normal: Vec3,
    pub vertices: Vec<WireVertex>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireTriangle {
    /// Index into the root `faces` list.
    pub face: usize,
    pub cull_face: CullFace,
    /// Material slot, 0 or 1.
    pub texture: u8,
    /// Indices into the referenced shared face's vertex list.
    pub vertices: [usize; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireQuad {
    pub face: usize,
    pub cull_face: CullFace,
    pub texture: u8,
    pub vertices: [usize; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WirePart {
    pub name: String,
    pub bounds: Bounds,
    pub triangles: Vec<WireTriangle>,
    #[serde(default)]
    pub quads: Vec<WireQuad>,
}

/// Root of the current schema. Keys serialize in declaration order:
/// `name`, `bounds`, `faces`, `parts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireModel {
    pub name: String,
    pub bounds: Bounds,
    pub faces: Vec<WireFace>,
    pub parts: Vec<WirePart>,
}

impl WireModel {
    pub fn from_json(text: &str) -> Result<Self> {
        codec::decode_model(text)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String> {
        codec::encode(self)
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        let text = self.to_json()?;
        std::fs::write(path, text)?;
        Ok(())
    }
}
