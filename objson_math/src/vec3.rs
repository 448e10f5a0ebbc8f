use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use crate::grid;

/// A position or normal vector.
///
/// Equality is bit-exact per component and ordering is component-wise
/// (x, then y, then z). The format quantizes coordinates to a 1/2048 grid
/// before they are ever compared, which is what makes exact comparison a
/// meaningful grouping key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Snaps every component to the nearest multiple of 1/2048.
    pub fn snapped(self) -> Self {
        Self::new(grid::snap(self.x), grid::snap(self.y), grid::snap(self.z))
    }
}

impl PartialEq for Vec3 {
    fn eq(&self, other: &Self) -> bool {
        self.x.to_bits() == other.x.to_bits()
            && self.y.to_bits() == other.y.to_bits()
            && self.z.to_bits() == other.z.to_bits()
    }
}

impl Eq for Vec3 {}

impl Hash for Vec3 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.to_bits().hash(state);
        self.y.to_bits().hash(state);
        self.z.to_bits().hash(state);
    }
}

impl PartialOrd for Vec3 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Vec3 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
            .then_with(|| self.z.total_cmp(&other.z))
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(components: [f64; 3]) -> Self {
        Self::new(components[0], components[1], components[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(vec: Vec3) -> Self {
        [vec.x, vec.y, vec.z]
    }
}
