//! Record types persisted in the cache index.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coord::Coordinate;

/// Radius of the ground region covered by a large course image, in meters.
pub const LARGE_IMAGE_RADIUS_METERS: f64 = 1000.0;

/// Edge length of a large course image, in pixels. Images are square.
pub const LARGE_IMAGE_PIXEL_SIZE: u32 = 2000;

/// File name of the large image inside a course directory.
pub const LARGE_IMAGE_FILE_NAME: &str = "large_satellite.jpg";

/// JPEG quality used for every image file written into the cache.
pub const JPEG_QUALITY: u8 = 85;

/// Errors raised by cache index operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error while reading or writing the index or image files.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The index file could not be parsed or serialized.
    #[error("index format error: {0}")]
    Index(#[from] serde_json::Error),
}

/// Metadata for the single wide-area satellite image cached per course.
///
/// The image is square and the same ground scale applies to both axes;
/// this is the flat-earth approximation, not a true projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LargeImageMeta {
    pub center_lat: f64,
    pub center_lon: f64,
    pub radius_meters: f64,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl LargeImageMeta {
    /// Metadata for a freshly acquired image centered at `center`, using the
    /// fixed acquisition geometry.
    pub fn for_center(center: Coordinate) -> Self {
        Self {
            center_lat: center.latitude,
            center_lon: center.longitude,
            radius_meters: LARGE_IMAGE_RADIUS_METERS,
            pixel_width: LARGE_IMAGE_PIXEL_SIZE,
            pixel_height: LARGE_IMAGE_PIXEL_SIZE,
        }
    }

    /// Geographic coordinate of the image center.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.center_lat, self.center_lon)
    }

    /// Ground resolution derived from the covered radius and pixel width.
    pub fn meters_per_pixel(&self) -> f64 {
        (self.radius_meters * 2.0) / self.pixel_width as f64
    }
}

/// Metadata for one per-hole crop stored in the cache.
///
/// `center_lat`/`center_lon` record the *actual* center of the stored crop,
/// which may differ from the requested point when clamping occurred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoleImageMeta {
    pub course_id: String,
    pub hole_number: u8,
    pub center_lat: f64,
    pub center_lon: f64,
    pub file_name: String,
}

impl HoleImageMeta {
    /// Geographic coordinate of the stored crop's center.
    pub fn center(&self) -> Coordinate {
        Coordinate::new(self.center_lat, self.center_lon)
    }
}

/// Deterministic crop file name for a course/hole pair.
///
/// Stable across regenerations of the same hole so a re-crop overwrites the
/// previous file instead of leaking a new one.
pub fn hole_file_name(course_id: &str, hole_number: u8) -> String {
    format!("{}_hole_{:02}.jpg", course_id, hole_number)
}

/// One cache record per course: the large image plus its per-hole crops.
///
/// `images` holds at most one entry per hole number; order is whatever the
/// upsert history produced and carries no meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub course_id: String,
    pub course_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large_image: Option<LargeImageMeta>,
    #[serde(default)]
    pub images: Vec<HoleImageMeta>,
    /// Unix seconds of the last upsert touching this record.
    pub last_updated: i64,
}

impl CourseRecord {
    /// Look up the crop metadata for a hole number, if cached.
    pub fn image_for_hole(&self, hole_number: u8) -> Option<&HoleImageMeta> {
        self.images.iter().find(|m| m.hole_number == hole_number)
    }
}
