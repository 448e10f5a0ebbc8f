//! Mesh-editor source interface.
//!
//! The editor integration hands over a plain snapshot of live mesh geometry:
//! per part, an ordered list of faces, each with its loop records (position,
//! normal, per-loop uv) in winding order, a material slot and an outward
//! normal. This module turns that snapshot into a canonical [`ModelData`],
//! quantizing positions and UVs to the export grid and recomputing part and
//! model bounds, so the canonicalizer downstream can trust them.

use objson_format::error::{FormatError, Result};
use objson_math::prelude::*;

use crate::model::{Face, ModelData, Part, Quad, Triangle, Vertex};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: UV,
}

#[derive(Debug, Clone)]
pub struct FaceSnapshot {
    /// Vertex records in winding order; 3 for a triangle, 4 for a quad.
    pub loops: Vec<LoopVertex>,
    pub normal: Vec3,
    /// Editor material index; slot 0 stays 0, everything else maps to 1.
    pub material_index: usize,
}

#[derive(Debug, Clone)]
pub struct PartSnapshot {
    pub name: String,
    pub faces: Vec<FaceSnapshot>,
}

pub fn build_model_data(name: &str, parts: &[PartSnapshot]) -> Result<ModelData> {
    let mut model_parts = Vec::with_capacity(parts.len());
    let mut model_bounds: Option<Bounds> = None;

    for part in parts {
        let built = build_part(part)?;
        model_bounds = Some(match model_bounds {
            Some(bounds) => union(bounds, built.bounds),
            None => built.bounds,
        });
        model_parts.push(built);
    }

    let bounds = model_bounds.ok_or_else(|| {
        FormatError::InvalidGeometry(format!("model `{}` has no parts", name))
    })?;
    Ok(ModelData {
        name: name.into(),
        bounds,
        parts: model_parts,
    })
}

fn build_part(part: &PartSnapshot) -> Result<Part> {
    let mut faces = Vec::with_capacity(part.faces.len());
    for face in &part.faces {
        faces.push(build_face(face, &part.name)?);
    }

    let bounds = enclose(
        faces
            .iter()
            .flat_map(|face| face.vertices.iter().map(|vertex| vertex.pos)),
    )
    .ok_or_else(|| {
        FormatError::InvalidGeometry(format!("part `{}` has no vertices", part.name))
    })?;

    Ok(Part {
        name: part.name.clone(),
        bounds,
        faces,
    })
}

fn build_face(face: &FaceSnapshot, part_name: &str) -> Result<Face> {
    let vertices: Vec<Vertex> = face
        .loops
        .iter()
        .map(|record| Vertex {
            pos: record.position.snapped(),
            normal: record.normal,
            uv: UV::new(snap(record.uv.u), snap(record.uv.v)),
        })
        .collect();

    let texture = if face.material_index == 0 { 0 } else { 1 };

    let mut triangles = Vec::new();
    let mut quads = Vec::new();
    match vertices.len() {
        3 => triangles.push(Triangle::new(0, 1, 2, texture)),
        4 => quads.push(Quad::new(0, 1, 2, 3, texture)),
        count => {
            return Err(FormatError::InvalidGeometry(format!(
                "face in part `{}` has {} vertices (must be 3 or 4)",
                part_name, count
            )))
        }
    }

    Ok(Face {
        vertices,
        triangles,
        quads,
        normal: face.normal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loop_vertex(x: f64, y: f64, z: f64) -> LoopVertex {
        LoopVertex {
            position: Vec3::new(x, y, z),
            normal: Vec3::new(0.0, 1.0, 0.0),
            uv: UV::new(0.0, 0.0),
        }
    }

    fn triangle_face() -> FaceSnapshot {
        FaceSnapshot {
            loops: vec![
                loop_vertex(-0.5, 0.5, -0.5),
                loop_vertex(0.5, 0.5, -0.5),
                loop_vertex(0.5, 0.5, 0.5),
            ],
            normal: Vec3::new(0.0, 1.0, 0.0),
            material_index: 0,
        }
    }

    #[test]
    fn builds_triangles_and_quads_by_loop_count() {
        let mut quad = triangle_face();
        quad.loops.push(loop_vertex(-0.5, 0.5, 0.5));
        quad.material_index = 3; // any nonzero slot maps to 1

        let model = build_model_data(
            "fixture",
            &[PartSnapshot {
                name: "top".into(),
                faces: vec![triangle_face(), quad],
            }],
        )
        .unwrap();

        let part = &model.parts[0];
        assert_eq!(part.faces[0].triangles, vec![Triangle::new(0, 1, 2, 0)]);
        assert!(part.faces[0].quads.is_empty());
        assert_eq!(part.faces[1].quads, vec![Quad::new(0, 1, 2, 3, 1)]);
        assert!(part.faces[1].triangles.is_empty());
    }

    #[test]
    fn positions_and_uvs_are_quantized() {
        let mut face = triangle_face();
        face.loops[0].position.x = -0.5000001;
        face.loops[0].uv = UV::new(0.1000001, 0.9999999);

        let model = build_model_data(
            "fixture",
            &[PartSnapshot {
                name: "top".into(),
                faces: vec![face],
            }],
        )
        .unwrap();

        let vertex = model.parts[0].faces[0].vertices[0];
        assert_eq!(vertex.pos.x, -0.5);
        assert_eq!(vertex.uv, UV::new(snap(0.1000001), 1.0));
    }

    #[test]
    fn bounds_enclose_parts_and_model() {
        let mut second = triangle_face();
        for record in &mut second.loops {
            record.position.y = 1.5;
        }

        let model = build_model_data(
            "fixture",
            &[
                PartSnapshot {
                    name: "base".into(),
                    faces: vec![triangle_face()],
                },
                PartSnapshot {
                    name: "lid".into(),
                    faces: vec![second],
                },
            ],
        )
        .unwrap();

        assert_eq!(model.parts[0].bounds, [-0.5, 0.5, -0.5, 0.5, 0.5, 0.5]);
        assert_eq!(model.parts[1].bounds, [-0.5, 1.5, -0.5, 0.5, 1.5, 0.5]);
        assert_eq!(model.bounds, [-0.5, 0.5, -0.5, 0.5, 1.5, 0.5]);
    }

    #[test]
    fn wrong_loop_count_is_invalid_geometry() {
        let mut face = triangle_face();
        face.loops.truncate(2);
        let result = build_model_data(
            "fixture",
            &[PartSnapshot {
                name: "top".into(),
                faces: vec![face],
            }],
        );
        assert!(matches!(result, Err(FormatError::InvalidGeometry(_))));
    }

    #[test]
    fn empty_model_is_invalid_geometry() {
        assert!(matches!(
            build_model_data("fixture", &[]),
            Err(FormatError::InvalidGeometry(_))
        ));
    }
}
