//! Format reader: detects the schema version from the structure of the
//! document root and parses each of the three historical schemas into the
//! canonical [`ModelData`].
//!
//! There is no version number field on disk; the combination of top-level
//! keys is the version:
//!
//! - `faces` and `parts` present -> v3 (current, deduplicated layout)
//! - `parts` only -> v2 (per-part embedded faces, normals as arrays)
//! - `faces` only -> v1 (single implicit part, normals as `{x,y,z}` objects)
//! - neither -> not an OBJSON document

use std::path::Path;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use objson_format::codec;
use objson_format::error::{FormatError, Result};
use objson_format::wire::{WireModel, WirePart};
use objson_math::prelude::*;

use crate::model::{Face, ModelData, Part, Quad, Triangle, Vertex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersion {
    V1,
    V2,
    V3,
}

/// Pure predicate over the present top-level keys.
pub fn detect_version(root: &Value) -> Result<SchemaVersion> {
    let object = root.as_object().ok_or_else(|| {
        FormatError::MalformedFormat("document root is not an object".into())
    })?;
    match (object.contains_key("faces"), object.contains_key("parts")) {
        (true, true) => Ok(SchemaVersion::V3),
        (false, true) => Ok(SchemaVersion::V2),
        (true, false) => Ok(SchemaVersion::V1),
        (false, false) => Err(FormatError::MalformedFormat(
            "neither `faces` nor `parts` present at the document root".into(),
        )),
    }
}

pub fn parse_str(text: &str) -> Result<ModelData> {
    let root = codec::decode(text)?;
    let version = detect_version(&root)?;
    debug!("Detected OBJSON schema {:?}", version);
    match version {
        SchemaVersion::V1 => parse_v1(root),
        SchemaVersion::V2 => parse_v2(root),
        SchemaVersion::V3 => parse_v3(root),
    }
}

pub fn parse_file(path: &Path) -> Result<ModelData> {
    let text = std::fs::read_to_string(path)?;
    parse_str(&text)
}

fn from_value<T>(value: Value) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(value).map_err(|err| FormatError::SchemaViolation(err.to_string()))
}

/// Exactly two material slots exist in this format.
fn texture_slot(value: i64) -> Result<u8> {
    match value {
        0 => Ok(0),
        1 => Ok(1),
        other => Err(FormatError::SchemaViolation(format!(
            "invalid texture slot: {} (only 0 and 1 exist)",
            other
        ))),
    }
}

fn check_indices(indices: &[usize], vertex_count: usize) -> Result<()> {
    for &index in indices {
        if index >= vertex_count {
            return Err(FormatError::SchemaViolation(format!(
                "triangle references vertex {} of a {}-vertex face",
                index, vertex_count
            )));
        }
    }
    Ok(())
}

// Vertex records look the same in every version.
#[derive(Debug, Deserialize)]
struct RawVertex {
    pos: Vec3,
    normal: Vec3,
    uv: UV,
}

impl RawVertex {
    fn into_vertex(self) -> Vertex {
        Vertex {
            pos: self.pos,
            normal: self.normal,
            uv: self.uv,
        }
    }
}

#[derive(Debug, Deserialize)]
struct V1Root {
    // Files produced by the legacy migration helper carry no name.
    #[serde(default)]
    name: String,
    bounds: Bounds,
    faces: Vec<V1Face>,
}

#[derive(Debug, Deserialize)]
struct V1Face {
    texture: i64,
    vertices: Vec<RawVertex>,
    triangles: Vec<V1Triangle>,
    normal: V1Normal,
}

// v1 is the only schema that stores normals as objects.
#[derive(Debug, Deserialize)]
struct V1Normal {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Deserialize)]
struct V1Triangle {
    vertices: [usize; 3],
}

/// v1 has no parts; the reader synthesizes one named `"root"` that holds all
/// faces and reuses the root bounds.
fn parse_v1(root: Value) -> Result<ModelData> {
    let document: V1Root = from_value(root)?;

    let mut faces = Vec::with_capacity(document.faces.len());
    for face in document.faces {
        let texture = texture_slot(face.texture)?;
        let vertices: Vec<Vertex> = face.vertices.into_iter().map(RawVertex::into_vertex).collect();
        let mut triangles = Vec::with_capacity(face.triangles.len());
        for triangle in face.triangles {
            check_indices(&triangle.vertices, vertices.len())?;
            let [v0, v1, v2] = triangle.vertices;
            triangles.push(Triangle::new(v0, v1, v2, texture));
        }
        faces.push(Face {
            vertices,
            triangles,
            quads: Vec::new(),
            normal: Vec3::new(face.normal.x, face.normal.y, face.normal.z),
        });
    }

    let part = Part {
        name: "root".into(),
        bounds: document.bounds,
        faces,
    };
    Ok(ModelData {
        name: document.name,
        bounds: document.bounds,
        parts: vec![part],
    })
}

#[derive(Debug, Deserialize)]
struct V2Root {
    name: String,
    bounds: Bounds,
    parts: Vec<V2Part>,
}

#[derive(Debug, Deserialize)]
struct V2Part {
    name: String,
    bounds: Bounds,
    faces: Vec<V2Face>,
}

#[derive(Debug, Deserialize)]
struct V2Face {
    texture: i64,
    vertices: Vec<RawVertex>,
    triangles: Vec<V2Triangle>,
    normal: Vec3,
}

#[derive(Debug, Deserialize)]
struct V2Triangle {
    vertices: [usize; 3],
    // Present in some v2 files; recomputed on export, so ignored on import.
    #[serde(default)]
    #[allow(dead_code)]
    cull_face: Option<i64>,
}

fn parse_v2(root: Value) -> Result<ModelData> {
    let document: V2Root = from_value(root)?;

    let mut parts = Vec::with_capacity(document.parts.len());
    for part in document.parts {
        let mut faces = Vec::with_capacity(part.faces.len());
        for face in part.faces {
            let texture = texture_slot(face.texture)?;
            let vertices: Vec<Vertex> =
                face.vertices.into_iter().map(RawVertex::into_vertex).collect();
            let mut triangles = Vec::with_capacity(face.triangles.len());
            for triangle in face.triangles {
                check_indices(&triangle.vertices, vertices.len())?;
                let [v0, v1, v2] = triangle.vertices;
                triangles.push(Triangle::new(v0, v1, v2, texture));
            }
            faces.push(Face {
                vertices,
                triangles,
                quads: Vec::new(),
                normal: face.normal,
            });
        }
        parts.push(Part {
            name: part.name,
            bounds: part.bounds,
            faces,
        });
    }

    Ok(ModelData {
        name: document.name,
        bounds: document.bounds,
        parts,
    })
}

/// v3 stores shared geometry at the root; each part's flat triangle/quad
/// lists are regrouped by their `face` index, and every group becomes one
/// canonical [`Face`] whose vertices are taken unmodified from the referenced
/// shared face. The on-disk `cull_face` is ignored; export recomputes it.
fn parse_v3(root: Value) -> Result<ModelData> {
    let document: WireModel = from_value(root)?;

    let mut shared = Vec::with_capacity(document.faces.len());
    for face in &document.faces {
        let vertices: Vec<Vertex> = face
            .vertices
            .iter()
            .map(|vertex| Vertex {
                pos: vertex.pos,
                normal: vertex.normal,
                uv: vertex.uv,
            })
            .collect();
        shared.push((face.normal, vertices));
    }

    let mut parts = Vec::with_capacity(document.parts.len());
    for part in document.parts {
        parts.push(regroup_part(part, &shared)?);
    }

    Ok(ModelData {
        name: document.name,
        bounds: document.bounds,
        parts,
    })
}

fn regroup_part(part: WirePart, shared: &[(Vec3, Vec<Vertex>)]) -> Result<Part> {
    // Groups keep the order their face index was first referenced in.
    let mut groups: Vec<(usize, Vec<Triangle>, Vec<Quad>)> = Vec::new();

    for triangle in &part.triangles {
        let at = group_for(&mut groups, triangle.face, shared.len(), &part.name)?;
        check_indices(&triangle.vertices, shared[triangle.face].1.len())?;
        let texture = texture_slot(triangle.texture as i64)?;
        let [v0, v1, v2] = triangle.vertices;
        groups[at].1.push(Triangle::new(v0, v1, v2, texture));
    }
    for quad in &part.quads {
        let at = group_for(&mut groups, quad.face, shared.len(), &part.name)?;
        check_indices(&quad.vertices, shared[quad.face].1.len())?;
        let texture = texture_slot(quad.texture as i64)?;
        let [v0, v1, v2, v3] = quad.vertices;
        groups[at].2.push(Quad::new(v0, v1, v2, v3, texture));
    }

    let faces = groups
        .into_iter()
        .map(|(face_index, triangles, quads)| {
            let (normal, vertices) = &shared[face_index];
            Face {
                vertices: vertices.clone(),
                triangles,
                quads,
                normal: *normal,
            }
        })
        .collect();

    Ok(Part {
        name: part.name,
        bounds: part.bounds,
        faces,
    })
}

fn group_for(
    groups: &mut Vec<(usize, Vec<Triangle>, Vec<Quad>)>,
    face_index: usize,
    shared_count: usize,
    part_name: &str,
) -> Result<usize> {
    if face_index >= shared_count {
        return Err(FormatError::SchemaViolation(format!(
            "part `{}` references shared face {} of {}",
            part_name, face_index, shared_count
        )));
    }
    Ok(
        match groups.iter().position(|(index, _, _)| *index == face_index) {
            Some(at) => at,
            None => {
                groups.push((face_index, Vec::new(), Vec::new()));
                groups.len() - 1
            }
        },
    )
}
