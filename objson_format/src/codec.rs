//! JSON text codec.
//!
//! Output is human-diffable: 4-space indentation, object keys in struct
//! declaration order. Decoding rejects text that is not well-formed JSON with
//! [`FormatError::MalformedFormat`] carrying the original parse error detail.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

use crate::error::{FormatError, Result};
use crate::wire::WireModel;

/// Decodes text into a schema-version-agnostic tree.
pub fn decode(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|err| FormatError::MalformedFormat(err.to_string()))
}

/// Decodes text directly into the current wire schema.
pub fn decode_model(text: &str) -> Result<WireModel> {
    let tree = decode(text)?;
    serde_json::from_value(tree).map_err(|err| FormatError::SchemaViolation(err.to_string()))
}

/// Encodes the current wire schema as stable-ordered JSON text.
pub fn encode(model: &WireModel) -> Result<String> {
    encode_pretty(model)
}

/// Encodes any serializable document with the format's 4-space indentation.
pub fn encode_pretty<T: Serialize>(value: &T) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|err| FormatError::SerializationError(err.to_string()))?;
    String::from_utf8(buf).map_err(|err| FormatError::SerializationError(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{WireFace, WirePart, WireTriangle, WireVertex};
    use objson_math::prelude::*;

    fn sample_model() -> WireModel {
        WireModel {
            name: "cube".into(),
            bounds: [-0.5, -0.5, -0.5, 0.5, 0.5, 0.5],
            faces: vec![WireFace {
                normal: Vec3::new(0.0, 1.0, 0.0),
                vertices: vec![WireVertex {
                    pos: Vec3::new(-0.5, 0.5, -0.5),
                    normal: Vec3::new(0.0, 1.0, 0.0),
                    uv: UV::new(0.0, 0.0),
                }],
            }],
            parts: vec![WirePart {
                name: "root".into(),
                bounds: [-0.5, -0.5, -0.5, 0.5, 0.5, 0.5],
                triangles: vec![WireTriangle {
                    face: 0,
                    cull_face: crate::wire::CullFace::Up,
                    texture: 0,
                    vertices: [0, 0, 0],
                }],
                quads: Vec::new(),
            }],
        }
    }

    #[test]
    fn encode_uses_four_space_indent_and_key_order() {
        let text = encode(&sample_model()).unwrap();
        assert!(text.starts_with("{\n    \"name\": \"cube\""));
        let name_at = text.find("\"name\"").unwrap();
        let bounds_at = text.find("\"bounds\"").unwrap();
        let faces_at = text.find("\"faces\"").unwrap();
        let parts_at = text.find("\"parts\"").unwrap();
        assert!(name_at < bounds_at && bounds_at < faces_at && faces_at < parts_at);
    }

    #[test]
    fn encode_decode_round_trips() {
        let model = sample_model();
        let text = encode(&model).unwrap();
        assert_eq!(decode_model(&text).unwrap(), model);
    }

    #[test]
    fn decode_rejects_malformed_text() {
        match decode("{not json") {
            Err(FormatError::MalformedFormat(detail)) => {
                assert!(!detail.is_empty());
            }
            other => panic!("expected MalformedFormat, got {:?}", other),
        }
    }
}
