//! Large-image download command.

use fairsat::app::{App, AppConfig};
use fairsat::config::ConfigFile;
use fairsat::coord::Coordinate;

use crate::error::CliError;

/// Download and cache the large satellite image for a course.
pub async fn run(course_id: &str, lat: f64, lon: f64) -> Result<(), CliError> {
    let config = ConfigFile::load().unwrap_or_default();
    let app = App::start(AppConfig::from_config_file(&config))?;

    let meta = app
        .acquisition()
        .download_large_image(course_id, Coordinate::new(lat, lon))
        .await?;

    println!(
        "Cached large image for {} centered at ({:.6}, {:.6})",
        course_id, meta.center_lat, meta.center_lon
    );
    println!(
        "  {}x{} px, {:.0} m radius",
        meta.pixel_width, meta.pixel_height, meta.radius_meters
    );
    println!("  File: {}", app.store().large_image_path(course_id).display());
    Ok(())
}
