use crate::vec3::Vec3;

/// An axis-aligned bounding box as `[xmin, ymin, zmin, xmax, ymax, zmax]`,
/// the shape the OBJSON format stores bounds in.
pub type Bounds = [f64; 6];

/// Computes the bounds enclosing every given point. Returns `None` for an
/// empty point set.
pub fn enclose<I>(points: I) -> Option<Bounds>
where
    I: IntoIterator<Item = Vec3>,
{
    let mut points = points.into_iter();
    let first = points.next()?;
    let mut bounds = [first.x, first.y, first.z, first.x, first.y, first.z];
    for point in points {
        bounds[0] = bounds[0].min(point.x);
        bounds[1] = bounds[1].min(point.y);
        bounds[2] = bounds[2].min(point.z);
        bounds[3] = bounds[3].max(point.x);
        bounds[4] = bounds[4].max(point.y);
        bounds[5] = bounds[5].max(point.z);
    }
    Some(bounds)
}

/// The smallest bounds enclosing both inputs.
pub fn union(a: Bounds, b: Bounds) -> Bounds {
    [
        a[0].min(b[0]),
        a[1].min(b[1]),
        a[2].min(b[2]),
        a[3].max(b[3]),
        a[4].max(b[4]),
        a[5].max(b[5]),
    ]
}
