use thiserror::Error;

pub type Result<T> = ::std::result::Result<T, FormatError>;

#[derive(Error, Debug)]
pub enum FormatError {
    /// The input is not parseable structured data, or matches none of the
    /// recognized top-level key shapes.
    #[error("Malformed OBJSON document: {0}")]
    MalformedFormat(String),
    /// Parseable, but a required field is absent or mistyped.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),
    /// A face with neither 3 nor 4 vertices, or a zero normal reaching
    /// direction classification.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A vertex reference not resolvable after deduplication. Fatal internal
    /// invariant violation, never user-recoverable.
    #[error("Vertex index out of range: {0}")]
    IndexOutOfRange(String),
    #[error("Serialization Error: {0}")]
    SerializationError(String),
    #[error("IO Error: {0}")]
    IoError(#[from] std::io::Error),
}
