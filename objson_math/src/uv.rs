use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// A texture coordinate. Nominally in `[0, 1]`, though producers may emit
/// values that require wraparound before use.
///
/// Same comparison semantics as [`crate::prelude::Vec3`]: bit-exact equality,
/// component-wise ordering (u, then v).
#[derive(Debug, Clone, Copy, Default)]
pub struct UV {
    pub u: f64,
    pub v: f64,
}

impl UV {
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }
}

impl PartialEq for UV {
    fn eq(&self, other: &Self) -> bool {
        self.u.to_bits() == other.u.to_bits() && self.v.to_bits() == other.v.to_bits()
    }
}

impl Eq for UV {}

impl Hash for UV {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.u.to_bits().hash(state);
        self.v.to_bits().hash(state);
    }
}

impl PartialOrd for UV {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UV {
    fn cmp(&self, other: &Self) -> Ordering {
        self.u
            .total_cmp(&other.u)
            .then_with(|| self.v.total_cmp(&other.v))
    }
}

impl From<[f64; 2]> for UV {
    fn from(components: [f64; 2]) -> Self {
        Self::new(components[0], components[1])
    }
}

impl From<UV> for [f64; 2] {
    fn from(uv: UV) -> Self {
        [uv.u, uv.v]
    }
}
