//! Coordinate conversion module
//!
//! Provides conversions between geographic coordinates (latitude/longitude)
//! and pixel positions within a cached satellite image of known center and
//! scale.
//!
//! The conversion uses a flat-earth approximation: one degree of latitude is
//! treated as a constant 111 000 meters and one degree of longitude as
//! 111 000 × cos(latitude) meters. This is accurate to well under a meter
//! over the few kilometers a golf course spans, and degenerates only near
//! the poles (cos(lat) → 0), which is outside the domain.

use serde::{Deserialize, Serialize};

/// Meters per degree of latitude in the flat-earth approximation.
pub const METERS_PER_DEGREE_LAT: f64 = 111_000.0;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Meters per degree of longitude at the given latitude.
#[inline]
pub fn meters_per_degree_lon(latitude: f64) -> f64 {
    METERS_PER_DEGREE_LAT * latitude.to_radians().cos()
}

/// Converts a pixel position within an image to a geographic coordinate.
///
/// Pixel (0, 0) is the top-left corner; X grows east and Y grows *south*,
/// so the northward offset carries a sign flip.
///
/// # Arguments
///
/// * `pixel_x` / `pixel_y` - Pixel position within the image
/// * `image_center` - Geographic coordinate of the image center
/// * `image_width` / `image_height` - Image dimensions in pixels
/// * `meters_per_pixel` - Ground resolution of the image
#[inline]
pub fn pixel_to_coordinate(
    pixel_x: f64,
    pixel_y: f64,
    image_center: Coordinate,
    image_width: u32,
    image_height: u32,
    meters_per_pixel: f64,
) -> Coordinate {
    let east_meters = (pixel_x - image_width as f64 / 2.0) * meters_per_pixel;
    let north_meters = -(pixel_y - image_height as f64 / 2.0) * meters_per_pixel;

    Coordinate {
        latitude: image_center.latitude + north_meters / METERS_PER_DEGREE_LAT,
        longitude: image_center.longitude
            + east_meters / meters_per_degree_lon(image_center.latitude),
    }
}

/// Converts a geographic coordinate to a pixel offset from the image center.
///
/// This is the exact inverse of [`pixel_to_coordinate`]: a point east of the
/// center yields a positive X offset, a point north of the center yields a
/// negative Y offset. Add `width / 2` and `height / 2` to obtain the
/// absolute pixel position.
#[inline]
pub fn coordinate_to_pixel_offset(
    point: Coordinate,
    image_center: Coordinate,
    meters_per_pixel: f64,
) -> (f64, f64) {
    let east_meters =
        (point.longitude - image_center.longitude) * meters_per_degree_lon(image_center.latitude);
    let north_meters = (point.latitude - image_center.latitude) * METERS_PER_DEGREE_LAT;

    (east_meters / meters_per_pixel, -north_meters / meters_per_pixel)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE_DEGREES: f64 = 1e-9;

    #[test]
    fn test_center_pixel_maps_to_image_center() {
        let center = Coordinate::new(40.0, -75.0);
        let coord = pixel_to_coordinate(1000.0, 1000.0, center, 2000, 2000, 1.0);

        assert!((coord.latitude - center.latitude).abs() < TOLERANCE_DEGREES);
        assert!((coord.longitude - center.longitude).abs() < TOLERANCE_DEGREES);
    }

    #[test]
    fn test_pixel_above_center_is_north() {
        // Y grows downward, so a smaller Y is further north
        let center = Coordinate::new(40.0, -75.0);
        let coord = pixel_to_coordinate(1000.0, 0.0, center, 2000, 2000, 1.0);

        assert!(coord.latitude > center.latitude);
        assert!((coord.longitude - center.longitude).abs() < TOLERANCE_DEGREES);
    }

    #[test]
    fn test_pixel_right_of_center_is_east() {
        let center = Coordinate::new(40.0, -75.0);
        let coord = pixel_to_coordinate(2000.0, 1000.0, center, 2000, 2000, 1.0);

        assert!(coord.longitude > center.longitude);
        assert!((coord.latitude - center.latitude).abs() < TOLERANCE_DEGREES);
    }

    #[test]
    fn test_known_offset_at_one_meter_per_pixel() {
        // 1000 px north of center at 1 m/px is 1000 m, i.e. 1000/111000 deg
        let center = Coordinate::new(40.0, -75.0);
        let coord = pixel_to_coordinate(1000.0, 0.0, center, 2000, 2000, 1.0);

        let expected_lat = 40.0 + 1000.0 / METERS_PER_DEGREE_LAT;
        assert!((coord.latitude - expected_lat).abs() < TOLERANCE_DEGREES);
    }

    #[test]
    fn test_offset_of_image_center_is_zero() {
        let center = Coordinate::new(40.0, -75.0);
        let (dx, dy) = coordinate_to_pixel_offset(center, center, 1.0);

        assert!(dx.abs() < 1e-9);
        assert!(dy.abs() < 1e-9);
    }

    #[test]
    fn test_northern_point_has_negative_y_offset() {
        let center = Coordinate::new(40.0, -75.0);
        let north = Coordinate::new(40.001, -75.0);
        let (dx, dy) = coordinate_to_pixel_offset(north, center, 1.0);

        assert!(dy < 0.0, "north should map to negative Y offset");
        assert!(dx.abs() < 1e-9);
    }

    #[test]
    fn test_longitude_scale_shrinks_with_latitude() {
        // The same longitude delta covers fewer meters at higher latitude,
        // so it must produce a smaller pixel offset
        let at_equator = Coordinate::new(0.0, 10.0);
        let at_60 = Coordinate::new(60.0, 10.0);

        let (dx_eq, _) = coordinate_to_pixel_offset(
            Coordinate::new(0.0, 10.001),
            at_equator,
            1.0,
        );
        let (dx_60, _) = coordinate_to_pixel_offset(Coordinate::new(60.0, 10.001), at_60, 1.0);

        assert!(dx_60 < dx_eq);
        assert!((dx_60 / dx_eq - 60.0_f64.to_radians().cos()).abs() < 1e-6);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let center = Coordinate::new(40.0, -75.0);
        let point = Coordinate::new(40.003, -74.996);

        let (dx, dy) = coordinate_to_pixel_offset(point, center, 1.0);
        let recovered =
            pixel_to_coordinate(1000.0 + dx, 1000.0 + dy, center, 2000, 2000, 1.0);

        assert!((recovered.latitude - point.latitude).abs() < TOLERANCE_DEGREES);
        assert!((recovered.longitude - point.longitude).abs() < TOLERANCE_DEGREES);
    }

    // Property-based tests using proptest
    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_roundtrip_property(
                center_lat in -70.0..70.0_f64,
                center_lon in -179.0..179.0_f64,
                // Offsets within the 2 km square a cached image covers
                north_m in -1000.0..1000.0_f64,
                east_m in -1000.0..1000.0_f64,
                meters_per_pixel in 0.5..4.0_f64
            ) {
                let center = Coordinate::new(center_lat, center_lon);
                let point = Coordinate::new(
                    center_lat + north_m / METERS_PER_DEGREE_LAT,
                    center_lon + east_m / meters_per_degree_lon(center_lat),
                );

                let (dx, dy) = coordinate_to_pixel_offset(point, center, meters_per_pixel);
                let recovered = pixel_to_coordinate(
                    1000.0 + dx,
                    1000.0 + dy,
                    center,
                    2000,
                    2000,
                    meters_per_pixel,
                );

                prop_assert!(
                    (recovered.latitude - point.latitude).abs() < 1e-9,
                    "latitude roundtrip failed: {} -> {}",
                    point.latitude, recovered.latitude
                );
                prop_assert!(
                    (recovered.longitude - point.longitude).abs() < 1e-9,
                    "longitude roundtrip failed: {} -> {}",
                    point.longitude, recovered.longitude
                );
            }

            #[test]
            fn test_offset_is_antisymmetric(
                center_lat in -70.0..70.0_f64,
                center_lon in -179.0..179.0_f64,
                north_m in -1000.0..1000.0_f64,
                east_m in -1000.0..1000.0_f64
            ) {
                let center = Coordinate::new(center_lat, center_lon);
                let point = Coordinate::new(
                    center_lat + north_m / METERS_PER_DEGREE_LAT,
                    center_lon + east_m / meters_per_degree_lon(center_lat),
                );

                let (dx, dy) = coordinate_to_pixel_offset(point, center, 1.0);

                // Moving the same ground distance in the opposite direction
                // must mirror the offset
                let mirrored = Coordinate::new(
                    center_lat - north_m / METERS_PER_DEGREE_LAT,
                    center_lon - east_m / meters_per_degree_lon(center_lat),
                );
                let (mdx, mdy) = coordinate_to_pixel_offset(mirrored, center, 1.0);

                prop_assert!((dx + mdx).abs() < 1e-6);
                prop_assert!((dy + mdy).abs() < 1e-6);
            }
        }
    }
}
