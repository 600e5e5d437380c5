use std::f64::consts::PI;

use crate::constants::{ANCHOR_MAGNITUDE, BASE_AREA, SCALE_FACTOR};

/// Converts a magnitude into a circle marker radius in pixels.
///
/// Marker *area* grows tenfold for every `SCALE_FACTOR` increase in magnitude,
/// with magnitude 1.0 mapped to an area of `BASE_AREA`. The result is never
/// clamped: very small magnitudes approach zero radius without reaching it.
pub fn marker_radius(magnitude: f64) -> f64 {
    let area = BASE_AREA * 10f64.powf((magnitude - ANCHOR_MAGNITUDE) / SCALE_FACTOR);
    (area / PI).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_magnitude_has_base_area() {
        let expected = (10.0 / PI).sqrt();
        assert!((marker_radius(1.0) - expected).abs() < 1e-12);
    }

    #[test]
    fn radius_is_strictly_increasing() {
        let mags: Vec<f64> = (-30..=100).map(|m| m as f64 / 10.0).collect();
        for pair in mags.windows(2) {
            assert!(
                marker_radius(pair[0]) < marker_radius(pair[1]),
                "radius({}) should be smaller than radius({})",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn area_grows_tenfold_per_scale_factor() {
        let r1 = marker_radius(2.0);
        let r2 = marker_radius(2.0 + SCALE_FACTOR);
        let ratio = (r2 * r2) / (r1 * r1);
        assert!((ratio - 10.0).abs() < 1e-9);
    }

    #[test]
    fn negative_magnitudes_stay_positive() {
        for m in [-1.0, -5.0, -20.0] {
            let r = marker_radius(m);
            assert!(r.is_finite());
            assert!(r > 0.0);
        }
    }
}
