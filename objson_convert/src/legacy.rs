//! Restructuring of the oldest on-disk layout.
//!
//! The earliest exporters wrote vertices as flat 8-float rows
//! (`[px, py, pz, nx, ny, nz, u, v]`) and triangles as bare 3-index rows.
//! This module rewrites such a document into the object-keyed v1 shape the
//! format reader understands, carrying `bounds` and `boxes` through when
//! present. The whole document is rebuilt in memory before anything is
//! written, so a failure never leaves a half-written output file.

use std::path::Path;

use serde_json::{Map, Value};

use objson_format::codec;
use objson_format::error::{FormatError, Result};

pub fn convert_file(path: &Path, output_dir: &Path) -> Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        FormatError::MalformedFormat(format!("path has no file name: {}", path.display()))
    })?;

    let text = std::fs::read_to_string(path)?;
    let document = codec::decode(&text)?;
    let converted = convert_document(&document)?;
    let rendered = codec::encode_pretty(&converted)?;

    std::fs::write(output_dir.join(file_name), rendered)?;
    Ok(())
}

pub fn convert_document(document: &Value) -> Result<Value> {
    let root = document.as_object().ok_or_else(|| {
        FormatError::MalformedFormat("document root is not an object".into())
    })?;

    let mut out = Map::new();
    if let Some(bounds) = root.get("bounds") {
        out.insert("bounds".into(), bounds.clone());
    }
    if let Some(boxes) = root.get("boxes") {
        out.insert("boxes".into(), boxes.clone());
    }

    let faces = root
        .get("faces")
        .and_then(Value::as_array)
        .ok_or_else(|| FormatError::SchemaViolation("missing `faces` list".into()))?;

    let mut converted_faces = Vec::with_capacity(faces.len());
    for face in faces {
        converted_faces.push(convert_face(face)?);
    }
    out.insert("faces".into(), Value::Array(converted_faces));

    Ok(Value::Object(out))
}

fn convert_face(face: &Value) -> Result<Value> {
    let face = face.as_object().ok_or_else(|| {
        FormatError::SchemaViolation("face entry is not an object".into())
    })?;
    let texture = face
        .get("texture")
        .and_then(Value::as_i64)
        .ok_or_else(|| FormatError::SchemaViolation("face has no integer `texture`".into()))?;

    let mut vertices = Vec::new();
    for row in list_field(face, "vertices")? {
        vertices.push(convert_vertex(row)?);
    }

    let mut triangles = Vec::new();
    for row in list_field(face, "triangles")? {
        triangles.push(convert_triangle(row)?);
    }

    let mut out = Map::new();
    out.insert("texture".into(), Value::from(texture));
    out.insert("vertices".into(), Value::Array(vertices));
    out.insert("triangles".into(), Value::Array(triangles));
    Ok(Value::Object(out))
}

fn list_field<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a Vec<Value>> {
    object
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| FormatError::SchemaViolation(format!("face has no `{}` list", key)))
}

/// `[px, py, pz, nx, ny, nz, u, v]` -> `{"pos", "normal", "uv"}`
fn convert_vertex(row: &Value) -> Result<Value> {
    let numbers = numeric_row(row, 8, "vertex")?;

    let mut out = Map::new();
    out.insert("pos".into(), slice_to_value(&numbers[0..3]));
    out.insert("normal".into(), slice_to_value(&numbers[3..6]));
    out.insert("uv".into(), slice_to_value(&numbers[6..8]));
    Ok(Value::Object(out))
}

/// `[a, b, c]` -> `{"vertices": [a, b, c]}`
fn convert_triangle(row: &Value) -> Result<Value> {
    let indices = row.as_array().ok_or_else(|| {
        FormatError::SchemaViolation("triangle row is not an array".into())
    })?;
    if indices.len() != 3 || !indices.iter().all(|index| index.is_u64()) {
        return Err(FormatError::SchemaViolation(format!(
            "triangle row must hold 3 indices, got {}",
            Value::Array(indices.clone())
        )));
    }

    let mut out = Map::new();
    out.insert("vertices".into(), Value::Array(indices.clone()));
    Ok(Value::Object(out))
}

fn numeric_row(row: &Value, arity: usize, what: &str) -> Result<Vec<f64>> {
    let values = row.as_array().ok_or_else(|| {
        FormatError::SchemaViolation(format!("{} row is not an array", what))
    })?;
    if values.len() != arity {
        return Err(FormatError::SchemaViolation(format!(
            "{} row must hold {} numbers, got {}",
            what,
            arity,
            values.len()
        )));
    }
    values
        .iter()
        .map(|value| {
            value.as_f64().ok_or_else(|| {
                FormatError::SchemaViolation(format!("{} row holds a non-number", what))
            })
        })
        .collect()
}

fn slice_to_value(numbers: &[f64]) -> Value {
    Value::Array(numbers.iter().map(|&number| Value::from(number)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn restructures_flat_rows() {
        let document = json!({
            "bounds": [-0.5, -0.5, -0.5, 0.5, 0.5, 0.5],
            "boxes": [[-0.5, -0.5, -0.5, 0.5, 0.5, 0.5]],
            "faces": [{
                "texture": 0,
                "vertices": [
                    [-0.5, 0.5, -0.5, 0.0, 1.0, 0.0, 0.0, 0.0],
                    [0.5, 0.5, -0.5, 0.0, 1.0, 0.0, 1.0, 0.0],
                    [0.5, 0.5, 0.5, 0.0, 1.0, 0.0, 1.0, 1.0]
                ],
                "triangles": [[0, 1, 2]]
            }]
        });

        let converted = convert_document(&document).unwrap();
        assert_eq!(converted["bounds"], document["bounds"]);
        assert_eq!(converted["boxes"], document["boxes"]);

        let face = &converted["faces"][0];
        assert_eq!(face["texture"], json!(0));
        assert_eq!(
            face["vertices"][0],
            json!({
                "pos": [-0.5, 0.5, -0.5],
                "normal": [0.0, 1.0, 0.0],
                "uv": [0.0, 0.0]
            })
        );
        assert_eq!(face["triangles"][0], json!({ "vertices": [0, 1, 2] }));
    }

    #[test]
    fn missing_keys_are_not_invented() {
        let document = json!({ "faces": [] });
        let converted = convert_document(&document).unwrap();
        assert!(converted.get("bounds").is_none());
        assert!(converted.get("boxes").is_none());
        assert_eq!(converted["faces"], json!([]));
    }

    #[test]
    fn short_vertex_row_is_a_schema_violation() {
        let document = json!({
            "faces": [{
                "texture": 0,
                "vertices": [[0.0, 0.0, 0.0]],
                "triangles": []
            }]
        });
        assert!(matches!(
            convert_document(&document),
            Err(FormatError::SchemaViolation(_))
        ));
    }

    #[test]
    fn missing_faces_is_a_schema_violation() {
        assert!(matches!(
            convert_document(&json!({ "bounds": [] })),
            Err(FormatError::SchemaViolation(_))
        ));
    }
}
