//! Per-hole crop command.

use std::sync::Arc;

use fairsat::config::ConfigFile;
use fairsat::coord::Coordinate;
use fairsat::crop::{CropEngine, HolePoint};
use fairsat::store::CacheStore;

use crate::error::CliError;

/// Derive and cache the crop for one hole.
pub fn run(
    course_id: &str,
    hole: u8,
    lat: f64,
    lon: f64,
    user_lat: Option<f64>,
    user_lon: Option<f64>,
) -> Result<(), CliError> {
    let user_location = match (user_lat, user_lon) {
        (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)),
        (None, None) => None,
        _ => {
            return Err(CliError::Config(
                "--user-lat and --user-lon must be given together".to_string(),
            ))
        }
    };

    let config = ConfigFile::load().unwrap_or_default();
    let store = Arc::new(CacheStore::open(&config.cache.directory)?);
    let engine = CropEngine::new(Arc::clone(&store));

    let meta = engine.crop_for_hole(
        course_id,
        &HolePoint {
            number: hole,
            latitude: lat,
            longitude: lon,
        },
        user_location,
    )?;

    println!("Cached crop for {} hole {}", course_id, hole);
    println!(
        "  Actual center: ({:.6}, {:.6})",
        meta.center_lat, meta.center_lon
    );
    println!("  File: {}", store.hole_image_path(&meta).display());
    Ok(())
}
