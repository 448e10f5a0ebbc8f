/// Number of grid steps per block unit. Positions and UVs are quantized to
/// multiples of `1/2048` so that exact float comparison downstream is meaningful.
pub const GRID_DIVISIONS: f64 = 2048.0;

/// Snaps a coordinate to the nearest multiple of `1/2048`.
pub fn snap(value: f64) -> f64 {
    (value * GRID_DIVISIONS).round() / GRID_DIVISIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snap_rounds_to_grid() {
        assert_eq!(snap(0.5), 0.5);
        assert_eq!(snap(3.0 / 2048.0 + 0.0001), 3.0 / 2048.0);
        assert_eq!(snap(3.0 / 2048.0 + 0.0003), 4.0 / 2048.0);
        assert_eq!(snap(-0.25), -0.25);
    }

    #[test]
    fn snap_is_idempotent() {
        let snapped = snap(0.123456789);
        assert_eq!(snap(snapped), snapped);
    }
}
