//! Core import/export pipeline for the OBJSON block-model interchange format.
//!
//! Three historical on-disk schemas are read into one canonical in-memory
//! model ([`model::ModelData`]); export always emits the current,
//! size-optimized schema ([`objson_format::wire::WireModel`]).

pub mod direction;
pub mod model;
pub mod reader;
pub mod snapshot;
pub mod uv;
pub mod writer;

pub use objson_format::error::{FormatError, Result};
