mod bounds;
mod grid;
mod uv;
mod vec3;

#[cfg(feature = "serde-serialize")]
mod serde;

pub mod prelude {
    pub use crate::bounds::{enclose, union, Bounds};
    pub use crate::grid::{snap, GRID_DIVISIONS};
    pub use crate::uv::UV;
    pub use crate::vec3::Vec3;
}
