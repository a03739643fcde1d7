//! Per-hole crop derivation from the cached large image.
//!
//! Given a course's cached wide-area image and a hole location, computes a
//! clamped crop window, extracts and re-encodes the sub-image, and records
//! metadata whose center is recomputed from the *clamped* rectangle, so the
//! stored coordinate always matches the pixels actually written.
//!
//! The shipped crop size equals the large-image size, which makes the clamp
//! collapse every rectangle to the origin; see [`clamped_origin`]. The
//! clamping algorithm is kept general so a smaller crop size clamps
//! genuinely.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::coord::{coordinate_to_pixel_offset, pixel_to_coordinate, Coordinate};
use crate::imaging::encode_jpeg;
use crate::store::{hole_file_name, CacheStore, HoleImageMeta, StoreError};

/// Edge length of a per-hole crop, in pixels. Crops are square.
pub const CROP_PIXEL_SIZE: u32 = 2000;

/// Interpolation weight toward the hole on the latitude axis.
///
/// Not 0.5: the two axes interpolate asymmetrically, leaving the crop
/// center slightly closer to the player on the north-south axis.
const BLEND_TOWARD_HOLE_LAT: f64 = 0.45;

/// Interpolation weight toward the hole on the longitude axis.
const BLEND_TOWARD_HOLE_LON: f64 = 0.50;

/// A hole's number and location, as provided by the course data collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolePoint {
    pub number: u8,
    pub latitude: f64,
    pub longitude: f64,
}

impl HolePoint {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Errors surfaced by [`CropEngine::crop_for_hole`].
#[derive(Debug, Error)]
pub enum CropError {
    /// The course has no cached large image to crop from.
    #[error("no cached large image for course {0}")]
    NotFound(String),

    /// The stored large image could not be decoded.
    #[error("cached large image unreadable: {0}")]
    Decode(String),

    /// The crop rectangle cannot fit inside the source image.
    #[error("crop {crop_size}px does not fit source {image_width}x{image_height}")]
    Bounds {
        crop_size: u32,
        image_width: u32,
        image_height: u32,
    },

    /// Re-encoding the crop failed.
    #[error("crop encode failed: {0}")]
    Encode(String),

    /// Writing the crop file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Reading or updating the cache index failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Derives and caches per-hole crops from a course's large image.
pub struct CropEngine {
    store: Arc<CacheStore>,
}

impl CropEngine {
    pub fn new(store: Arc<CacheStore>) -> Self {
        Self { store }
    }

    /// Extract, persist and index the crop for one hole.
    ///
    /// With a user location the crop centers on an asymmetric interpolation
    /// toward the hole (0.45 on latitude, 0.50 on longitude); without one it
    /// centers on the hole itself. The rectangle is clamped into the source
    /// image and the stored center coordinate is recomputed from the clamped
    /// rectangle. Nothing is retried; every failure is returned distinct.
    pub fn crop_for_hole(
        &self,
        course_id: &str,
        hole: &HolePoint,
        user_location: Option<Coordinate>,
    ) -> Result<HoleImageMeta, CropError> {
        let large = self
            .store
            .get(course_id)?
            .and_then(|record| record.large_image)
            .ok_or_else(|| CropError::NotFound(course_id.to_string()))?;
        let bytes = self
            .store
            .read_large_image(course_id)?
            .ok_or_else(|| CropError::NotFound(course_id.to_string()))?;
        let source =
            image::load_from_memory(&bytes).map_err(|e| CropError::Decode(e.to_string()))?;

        let target = crop_center(hole, user_location);
        let meters_per_pixel = large.meters_per_pixel();
        let (dx, dy) = coordinate_to_pixel_offset(target, large.center(), meters_per_pixel);

        // Desired top-left corner before clamping, in source pixels
        let half_crop = CROP_PIXEL_SIZE as f64 / 2.0;
        let desired_x = large.pixel_width as f64 / 2.0 + dx - half_crop;
        let desired_y = large.pixel_height as f64 / 2.0 + dy - half_crop;

        let bounds_err = || CropError::Bounds {
            crop_size: CROP_PIXEL_SIZE,
            image_width: source.width(),
            image_height: source.height(),
        };
        let origin_x =
            clamped_origin(desired_x, large.pixel_width, CROP_PIXEL_SIZE).ok_or_else(bounds_err)?;
        let origin_y = clamped_origin(desired_y, large.pixel_height, CROP_PIXEL_SIZE)
            .ok_or_else(bounds_err)?;

        // The decoded pixels must actually cover the rectangle, whatever the
        // index metadata claims
        if origin_x + CROP_PIXEL_SIZE > source.width()
            || origin_y + CROP_PIXEL_SIZE > source.height()
        {
            return Err(bounds_err());
        }

        let actual_center = pixel_to_coordinate(
            (origin_x + CROP_PIXEL_SIZE / 2) as f64,
            (origin_y + CROP_PIXEL_SIZE / 2) as f64,
            large.center(),
            large.pixel_width,
            large.pixel_height,
            meters_per_pixel,
        );

        let crop = source.crop_imm(origin_x, origin_y, CROP_PIXEL_SIZE, CROP_PIXEL_SIZE);
        let jpeg = encode_jpeg(&crop).map_err(|e| CropError::Encode(e.to_string()))?;

        let meta = HoleImageMeta {
            course_id: course_id.to_string(),
            hole_number: hole.number,
            center_lat: actual_center.latitude,
            center_lon: actual_center.longitude,
            file_name: hole_file_name(course_id, hole.number),
        };
        self.store.write_hole_image(&meta, &jpeg)?;
        self.store.upsert(course_id, None, vec![meta.clone()])?;

        info!(
            course_id,
            hole = hole.number,
            origin_x,
            origin_y,
            "hole crop cached"
        );
        Ok(meta)
    }
}

/// Crop center: asymmetric interpolation from the user toward the hole, or
/// the hole itself when no user location is available.
fn crop_center(hole: &HolePoint, user_location: Option<Coordinate>) -> Coordinate {
    match user_location {
        Some(user) => Coordinate {
            latitude: user.latitude + BLEND_TOWARD_HOLE_LAT * (hole.latitude - user.latitude),
            longitude: user.longitude + BLEND_TOWARD_HOLE_LON * (hole.longitude - user.longitude),
        },
        None => hole.coordinate(),
    }
}

/// Clamp a desired crop origin into `[0, image_dim - crop_dim]`.
///
/// `None` when the crop cannot fit at all. When `crop_dim == image_dim` the
/// valid range is empty and every desired origin collapses to 0, which
/// disables re-centering entirely at the shipped crop size.
fn clamped_origin(desired: f64, image_dim: u32, crop_dim: u32) -> Option<u32> {
    if crop_dim > image_dim {
        return None;
    }
    let max = (image_dim - crop_dim) as f64;
    Some(desired.round().clamp(0.0, max) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::tests::test_jpeg;
    use crate::store::{LargeImageMeta, LARGE_IMAGE_PIXEL_SIZE};

    const TOLERANCE_DEGREES: f64 = 1e-9;

    fn course_center() -> Coordinate {
        Coordinate::new(40.0, -75.0)
    }

    /// Store primed with a full-size large image for course "c1".
    fn primed_engine() -> (tempfile::TempDir, Arc<CacheStore>, CropEngine) {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Arc::new(CacheStore::open(dir.path()).unwrap());
        store
            .upsert("c1", Some(LargeImageMeta::for_center(course_center())), Vec::new())
            .unwrap();
        store
            .write_large_image("c1", &test_jpeg(LARGE_IMAGE_PIXEL_SIZE))
            .unwrap();
        let engine = CropEngine::new(Arc::clone(&store));
        (dir, store, engine)
    }

    fn hole_at(number: u8, latitude: f64, longitude: f64) -> HolePoint {
        HolePoint {
            number,
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_clamped_origin_stays_in_valid_range() {
        for (image, crop) in [(2000u32, 500u32), (2000, 2000), (100, 60)] {
            for desired in [-5000.0, -0.4, 0.0, 33.4, 1999.0, 5000.0] {
                let origin = clamped_origin(desired, image, crop).unwrap();
                assert!(origin <= image - crop, "origin {} out of range", origin);
            }
        }
    }

    #[test]
    fn test_clamped_origin_collapses_when_crop_equals_image() {
        for desired in [-1000.0, 0.0, 500.0, 10_000.0] {
            assert_eq!(clamped_origin(desired, 2000, 2000), Some(0));
        }
    }

    #[test]
    fn test_clamped_origin_rejects_oversized_crop() {
        assert_eq!(clamped_origin(0.0, 100, 101), None);
    }

    #[test]
    fn test_crop_center_without_user_is_the_hole() {
        let hole = hole_at(1, 40.002, -74.998);
        let center = crop_center(&hole, None);
        assert_eq!(center, hole.coordinate());
    }

    #[test]
    fn test_crop_center_blend_is_asymmetric() {
        let user = Coordinate::new(40.0, -75.0);
        let hole = hole_at(1, 40.01, -74.99);

        let center = crop_center(&hole, Some(user));

        // 45% of the way on latitude, 50% on longitude
        assert!((center.latitude - 40.0045).abs() < TOLERANCE_DEGREES);
        assert!((center.longitude - (-74.995)).abs() < TOLERANCE_DEGREES);
    }

    #[test]
    fn test_crop_for_missing_course_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Arc::new(CacheStore::open(dir.path()).unwrap());
        let engine = CropEngine::new(store);

        let result = engine.crop_for_hole("ghost", &hole_at(1, 40.0, -75.0), None);
        assert!(matches!(result, Err(CropError::NotFound(_))));
    }

    #[test]
    fn test_crop_with_metadata_but_no_file_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Arc::new(CacheStore::open(dir.path()).unwrap());
        store
            .upsert("c1", Some(LargeImageMeta::for_center(course_center())), Vec::new())
            .unwrap();
        let engine = CropEngine::new(store);

        let result = engine.crop_for_hole("c1", &hole_at(1, 40.0, -75.0), None);
        assert!(matches!(result, Err(CropError::NotFound(_))));
    }

    #[test]
    fn test_corrupt_large_image_is_decode_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Arc::new(CacheStore::open(dir.path()).unwrap());
        store
            .upsert("c1", Some(LargeImageMeta::for_center(course_center())), Vec::new())
            .unwrap();
        store.write_large_image("c1", b"garbage bytes").unwrap();
        let engine = CropEngine::new(store);

        let result = engine.crop_for_hole("c1", &hole_at(1, 40.0, -75.0), None);
        assert!(matches!(result, Err(CropError::Decode(_))));
    }

    #[test]
    fn test_source_smaller_than_crop_is_bounds_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = Arc::new(CacheStore::open(dir.path()).unwrap());
        // Index claims a 100 px image; the crop cannot fit
        let meta = LargeImageMeta {
            center_lat: 40.0,
            center_lon: -75.0,
            radius_meters: 50.0,
            pixel_width: 100,
            pixel_height: 100,
        };
        store.upsert("c1", Some(meta), Vec::new()).unwrap();
        store.write_large_image("c1", &test_jpeg(100)).unwrap();
        let engine = CropEngine::new(store);

        let result = engine.crop_for_hole("c1", &hole_at(1, 40.0, -75.0), None);
        assert!(matches!(result, Err(CropError::Bounds { .. })));
    }

    #[test]
    fn test_hole_at_image_center_crops_at_origin() {
        // Scenario: center (40, -75), 1000 m radius at 2000x2000 px, so
        // 1 m/px; crop size equals image size, so the rectangle sits at
        // (0,0) and its center is the image center
        let (_dir, _store, engine) = primed_engine();

        let meta = engine
            .crop_for_hole("c1", &hole_at(1, 40.0, -75.0), None)
            .unwrap();

        assert!((meta.center_lat - 40.0).abs() < TOLERANCE_DEGREES);
        assert!((meta.center_lon - (-75.0)).abs() < TOLERANCE_DEGREES);
    }

    #[test]
    fn test_offset_hole_still_collapses_to_image_center() {
        // Crop size == source size, so clamping collapses any requested
        // center back to the image center; the stored metadata must reflect
        // the clamped rectangle, not the request
        let (_dir, _store, engine) = primed_engine();

        let meta = engine
            .crop_for_hole("c1", &hole_at(2, 40.005, -74.994), None)
            .unwrap();

        assert!((meta.center_lat - 40.0).abs() < TOLERANCE_DEGREES);
        assert!((meta.center_lon - (-75.0)).abs() < TOLERANCE_DEGREES);
    }

    #[test]
    fn test_stored_metadata_matches_stored_pixels() {
        let (_dir, store, engine) = primed_engine();

        let meta = engine
            .crop_for_hole("c1", &hole_at(3, 40.003, -74.998), Some(course_center()))
            .unwrap();

        // Re-projecting the stored rectangle's center must reproduce the
        // stored coordinate
        let large = store.get("c1").unwrap().unwrap().large_image.unwrap();
        let recomputed = pixel_to_coordinate(
            (CROP_PIXEL_SIZE / 2) as f64,
            (CROP_PIXEL_SIZE / 2) as f64,
            large.center(),
            large.pixel_width,
            large.pixel_height,
            large.meters_per_pixel(),
        );
        assert!((meta.center_lat - recomputed.latitude).abs() < TOLERANCE_DEGREES);
        assert!((meta.center_lon - recomputed.longitude).abs() < TOLERANCE_DEGREES);

        // And the written file is a decodable crop of the configured size
        let bytes = store.read_hole_image(&meta).unwrap().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), CROP_PIXEL_SIZE);
        assert_eq!(decoded.height(), CROP_PIXEL_SIZE);
    }

    #[test]
    fn test_recropping_a_hole_replaces_its_entry() {
        let (_dir, store, engine) = primed_engine();

        engine
            .crop_for_hole("c1", &hole_at(4, 40.001, -75.001), None)
            .unwrap();
        engine
            .crop_for_hole("c1", &hole_at(4, 40.002, -75.002), None)
            .unwrap();

        let record = store.get("c1").unwrap().unwrap();
        assert_eq!(record.images.len(), 1);
        assert_eq!(record.images[0].hole_number, 4);
        assert_eq!(record.images[0].file_name, hole_file_name("c1", 4));
    }

    #[test]
    fn test_crops_for_different_holes_accumulate() {
        let (_dir, store, engine) = primed_engine();

        engine.crop_for_hole("c1", &hole_at(1, 40.0, -75.0), None).unwrap();
        engine.crop_for_hole("c1", &hole_at(2, 40.001, -75.0), None).unwrap();

        let record = store.get("c1").unwrap().unwrap();
        assert_eq!(record.images.len(), 2);
    }
}
