//! Export canonicalizer.
//!
//! Rebuilds a canonical model into the deduplicated wire layout: faces are
//! grouped by bit-identical normal, groups are ordered component-wise to fix
//! the shared-face indices, vertices are deduplicated structurally and sorted
//! by position, and every triangle/quad is re-resolved against the new vertex
//! lists. Identical input always yields byte-identical output.
//!
//! Bounds are copied through untouched; recomputing them from live geometry
//! is the mesh-editor side's job before this stage (see [`crate::snapshot`]).

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;

use objson_format::codec;
use objson_format::error::{FormatError, Result};
use objson_format::wire::{WireFace, WireModel, WirePart, WireQuad, WireTriangle, WireVertex};
use objson_math::prelude::*;

use crate::direction::{calculate_cull_face, Direction};
use crate::model::{Face, ModelData, Vertex};

pub fn canonicalize(model: &ModelData) -> Result<WireModel> {
    // Group every face across every part by its exact normal; BTreeMap order
    // is the component-wise normal order, which fixes the face indices.
    let mut groups: BTreeMap<Vec3, Vec<&Face>> = BTreeMap::new();
    for part in &model.parts {
        for face in &part.faces {
            groups.entry(face.normal).or_default().push(face);
        }
    }

    let mut face_index: BTreeMap<Vec3, usize> = BTreeMap::new();
    let mut shared_vertices: Vec<Vec<Vertex>> = Vec::with_capacity(groups.len());
    let mut wire_faces: Vec<WireFace> = Vec::with_capacity(groups.len());
    for (index, (normal, faces)) in groups.iter().enumerate() {
        // Deduplicate structurally in first-seen order, then sort by position.
        let mut vertices: Vec<Vertex> = Vec::new();
        for face in faces {
            for vertex in &face.vertices {
                if !vertices.contains(vertex) {
                    vertices.push(*vertex);
                }
            }
        }
        vertices.sort_by(|a, b| a.pos.cmp(&b.pos));

        wire_faces.push(WireFace {
            normal: *normal,
            vertices: vertices
                .iter()
                .map(|vertex| WireVertex {
                    pos: vertex.pos,
                    normal: vertex.normal,
                    uv: vertex.uv,
                })
                .collect(),
        });
        shared_vertices.push(vertices);
        face_index.insert(*normal, index);
    }
    debug!(
        "Canonicalized {} faces into {} shared groups",
        model.parts.iter().map(|part| part.faces.len()).sum::<usize>(),
        wire_faces.len()
    );

    let mut wire_parts = Vec::with_capacity(model.parts.len());
    for part in &model.parts {
        let mut triangles = Vec::new();
        let mut quads = Vec::new();
        for face in &part.faces {
            let index = face_index[&face.normal];
            let pool = &shared_vertices[index];
            let direction = Direction::from_normal(face.normal)?;

            for triangle in &face.triangles {
                let (vertices, positions) = resolve::<3>(face, triangle.indices(), pool)?;
                triangles.push(WireTriangle {
                    face: index,
                    cull_face: calculate_cull_face(&positions, direction),
                    texture: triangle.texture,
                    vertices,
                });
            }
            for quad in &face.quads {
                let (vertices, positions) = resolve::<4>(face, quad.indices(), pool)?;
                quads.push(WireQuad {
                    face: index,
                    cull_face: calculate_cull_face(&positions, direction),
                    texture: quad.texture,
                    vertices,
                });
            }
        }
        wire_parts.push(WirePart {
            name: part.name.clone(),
            bounds: part.bounds,
            triangles,
            quads,
        });
    }

    Ok(WireModel {
        name: model.name.clone(),
        bounds: model.bounds,
        faces: wire_faces,
        parts: wire_parts,
    })
}

/// Re-resolves a primitive's vertex references against the deduplicated pool
/// by structural lookup; the original indices are stale after sorting.
fn resolve<const N: usize>(
    face: &Face,
    indices: [usize; N],
    pool: &[Vertex],
) -> Result<([usize; N], [Vec3; N])> {
    let mut resolved = [0usize; N];
    let mut positions = [Vec3::default(); N];
    for (slot, &index) in indices.iter().enumerate() {
        let vertex = face.vertices.get(index).ok_or_else(|| {
            FormatError::IndexOutOfRange(format!(
                "primitive references vertex {} of a {}-vertex face",
                index,
                face.vertices.len()
            ))
        })?;
        let at = pool.iter().position(|candidate| candidate == vertex).ok_or_else(|| {
            FormatError::IndexOutOfRange(
                "vertex missing from its deduplicated shared face".into(),
            )
        })?;
        resolved[slot] = at;
        positions[slot] = vertex.pos;
    }
    Ok((resolved, positions))
}

/// Canonicalizes and encodes in one step. All-or-nothing: any per-primitive
/// failure aborts the whole export with no partial output.
pub fn export(model: &ModelData) -> Result<String> {
    codec::encode(&canonicalize(model)?)
}

pub fn export_file(model: &ModelData, path: &Path) -> Result<()> {
    let text = export(model)?;
    std::fs::write(path, text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Part, Quad, Triangle};
    use objson_format::wire::CullFace;

    fn vertex(pos: Vec3, normal: Vec3) -> Vertex {
        Vertex {
            pos,
            normal,
            uv: UV::new(0.0, 0.0),
        }
    }

    fn up_face(offset: f64) -> Face {
        let normal = Vec3::new(0.0, 1.0, 0.0);
        Face {
            vertices: vec![
                vertex(Vec3::new(0.5, 0.5, offset), normal),
                vertex(Vec3::new(-0.5, 0.5, offset), normal),
                vertex(Vec3::new(0.5, 0.5, offset + 0.5), normal),
            ],
            triangles: vec![Triangle::new(0, 1, 2, 0)],
            quads: Vec::new(),
            normal,
        }
    }

    fn north_face() -> Face {
        let normal = Vec3::new(0.0, 0.0, -1.0);
        Face {
            vertices: vec![
                vertex(Vec3::new(-0.5, -0.5, -0.5), normal),
                vertex(Vec3::new(0.5, -0.5, -0.5), normal),
                vertex(Vec3::new(0.5, 0.5, -0.5), normal),
                vertex(Vec3::new(-0.5, 0.5, -0.5), normal),
            ],
            triangles: Vec::new(),
            quads: vec![Quad::new(0, 1, 2, 3, 1)],
            normal,
        }
    }

    fn model(faces: Vec<Face>) -> ModelData {
        ModelData {
            name: "fixture".into(),
            bounds: [-0.5, -0.5, -0.5, 0.5, 0.5, 0.5],
            parts: vec![Part {
                name: "root".into(),
                bounds: [-0.5, -0.5, -0.5, 0.5, 0.5, 0.5],
                faces,
            }],
        }
    }

    #[test]
    fn groups_are_ordered_by_normal() {
        let wire = canonicalize(&model(vec![up_face(-0.5), north_face()])).unwrap();
        assert_eq!(wire.faces.len(), 2);
        // (0,0,-1) sorts before (0,1,0) component-wise
        assert_eq!(wire.faces[0].normal, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(wire.faces[1].normal, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn duplicate_vertices_collapse_across_faces() {
        // The same up face twice: 6 source vertices collapse to 3 shared.
        let wire = canonicalize(&model(vec![up_face(-0.5), up_face(-0.5)])).unwrap();
        assert_eq!(wire.faces.len(), 1);
        assert_eq!(wire.faces[0].vertices.len(), 3);
        let part = &wire.parts[0];
        assert_eq!(part.triangles.len(), 2);
        assert_eq!(part.triangles[0].vertices, part.triangles[1].vertices);
    }

    #[test]
    fn shared_vertices_are_sorted_by_position() {
        let wire = canonicalize(&model(vec![up_face(-0.5)])).unwrap();
        let positions: Vec<Vec3> = wire.faces[0]
            .vertices
            .iter()
            .map(|vertex| vertex.pos)
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn cull_faces_are_recomputed() {
        let wire = canonicalize(&model(vec![up_face(-0.5), north_face()])).unwrap();
        let part = &wire.parts[0];
        // Triangle at y=0.5 facing up is flush; quad at z=-0.5 facing north is flush.
        assert_eq!(part.triangles[0].cull_face, CullFace::Up);
        assert_eq!(part.quads[0].cull_face, CullFace::North);
    }

    #[test]
    fn non_flush_face_gets_no_cull_face() {
        let normal = Vec3::new(0.0, 1.0, 0.0);
        let face = Face {
            vertices: vec![
                vertex(Vec3::new(0.5, 0.25, 0.0), normal),
                vertex(Vec3::new(-0.5, 0.25, 0.0), normal),
                vertex(Vec3::new(0.5, 0.25, 0.5), normal),
            ],
            triangles: vec![Triangle::new(0, 1, 2, 0)],
            quads: Vec::new(),
            normal,
        };
        let wire = canonicalize(&model(vec![face])).unwrap();
        assert_eq!(wire.parts[0].triangles[0].cull_face, CullFace::None);
    }

    #[test]
    fn canonicalization_is_deterministic() {
        let fixture = model(vec![up_face(-0.5), north_face(), up_face(0.0)]);
        let first = canonicalize(&fixture).unwrap();
        let second = canonicalize(&fixture).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            export(&fixture).unwrap(),
            export(&fixture).unwrap()
        );
    }

    #[test]
    fn zero_normal_aborts_export() {
        let face = Face {
            vertices: vec![vertex(Vec3::new(0.0, 0.0, 0.0), Vec3::default())],
            triangles: vec![Triangle::new(0, 0, 0, 0)],
            quads: Vec::new(),
            normal: Vec3::new(0.0, 0.0, 0.0),
        };
        assert!(matches!(
            canonicalize(&model(vec![face])),
            Err(FormatError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn stale_vertex_index_aborts_export() {
        let normal = Vec3::new(0.0, 1.0, 0.0);
        let face = Face {
            vertices: vec![vertex(Vec3::new(0.0, 0.5, 0.0), normal)],
            triangles: vec![Triangle::new(0, 1, 2, 0)],
            quads: Vec::new(),
            normal,
        };
        assert!(matches!(
            canonicalize(&model(vec![face])),
            Err(FormatError::IndexOutOfRange(_))
        ));
    }
}
