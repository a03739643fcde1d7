//! Per-course satellite image cache store.
//!
//! Owns the on-disk layout: a root directory holding one global index file
//! (see [`IndexFile`]) and one subdirectory per course, named by the course
//! id, containing the large image and zero-or-more per-hole crop files.
//!
//! The index is a single shared resource that is read, modified and written
//! back as a unit. Every index operation runs under one mutex so concurrent
//! downloads and crops for different courses cannot lose each other's
//! updates to the whole-file index.

mod index;
mod stats;
mod types;

pub use index::{IndexFile, INDEX_FILE_NAME};
pub use stats::{cache_stats, clear_cache, PurgeResult};
pub use types::{
    hole_file_name, CourseRecord, HoleImageMeta, LargeImageMeta, StoreError, JPEG_QUALITY,
    LARGE_IMAGE_FILE_NAME, LARGE_IMAGE_PIXEL_SIZE, LARGE_IMAGE_RADIUS_METERS,
};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

/// Disk-backed store of per-course cache records and image files.
pub struct CacheStore {
    root: PathBuf,
    index: IndexFile,
    /// Serializes index read-modify-write cycles.
    lock: Mutex<()>,
}

impl CacheStore {
    /// Open (creating if necessary) a cache store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        let index = IndexFile::new(&root);
        Ok(Self {
            root,
            index,
            lock: Mutex::new(()),
        })
    }

    /// The cache root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fetch the cache record for a course, if one exists.
    pub fn get(&self, course_id: &str) -> Result<Option<CourseRecord>, StoreError> {
        let _guard = self.lock.lock().unwrap();
        let records = self.index.load()?;
        Ok(records.into_iter().find(|r| r.course_id == course_id))
    }

    /// All cache records currently in the index.
    pub fn list(&self) -> Result<Vec<CourseRecord>, StoreError> {
        let _guard = self.lock.lock().unwrap();
        self.index.load()
    }

    /// Merge new metadata into a course's record, creating it if absent.
    ///
    /// A provided large image replaces the existing one. Each entry in
    /// `images` replaces the record's entry with the same hole number, or is
    /// appended if the hole has no entry yet. `last_updated` is refreshed on
    /// every call. New records start with an empty course name; the caller
    /// fills it in later.
    pub fn upsert(
        &self,
        course_id: &str,
        large_image: Option<LargeImageMeta>,
        images: Vec<HoleImageMeta>,
    ) -> Result<CourseRecord, StoreError> {
        let _guard = self.lock.lock().unwrap();
        let mut records = self.index.load()?;
        let now = chrono::Utc::now().timestamp();

        let position = match records.iter().position(|r| r.course_id == course_id) {
            Some(position) => position,
            None => {
                records.push(CourseRecord {
                    course_id: course_id.to_string(),
                    course_name: String::new(),
                    large_image: None,
                    images: Vec::new(),
                    last_updated: now,
                });
                records.len() - 1
            }
        };
        let record = &mut records[position];

        if let Some(meta) = large_image {
            record.large_image = Some(meta);
        }
        for image in images {
            match record
                .images
                .iter_mut()
                .find(|m| m.hole_number == image.hole_number)
            {
                Some(existing) => *existing = image,
                None => record.images.push(image),
            }
        }
        record.last_updated = now;

        let updated = record.clone();
        self.index.save(&records)?;
        debug!(course_id, images = updated.images.len(), "cache record upserted");
        Ok(updated)
    }

    /// Delete a course's cached images and its index record.
    ///
    /// Removing the course directory is best-effort; a failure there is
    /// ignored and the index record is removed regardless. Deleting a course
    /// that has no cache entry is a no-op, not an error.
    pub fn delete(&self, course_id: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().unwrap();

        let dir = self.root.join(course_id);
        if dir.exists() {
            let _ = fs::remove_dir_all(&dir);
        }

        let mut records = self.index.load()?;
        let before = records.len();
        records.retain(|r| r.course_id != course_id);
        if records.len() != before {
            self.index.save(&records)?;
            debug!(course_id, "cache record deleted");
        }
        Ok(())
    }

    /// Directory holding a course's image files.
    pub fn course_dir(&self, course_id: &str) -> PathBuf {
        self.root.join(course_id)
    }

    /// Path of a course's large image file.
    pub fn large_image_path(&self, course_id: &str) -> PathBuf {
        self.course_dir(course_id).join(LARGE_IMAGE_FILE_NAME)
    }

    /// Path of a per-hole crop file.
    pub fn hole_image_path(&self, meta: &HoleImageMeta) -> PathBuf {
        self.course_dir(&meta.course_id).join(&meta.file_name)
    }

    /// Write a course's large image bytes, creating the course directory.
    pub fn write_large_image(&self, course_id: &str, bytes: &[u8]) -> io::Result<()> {
        let path = self.large_image_path(course_id);
        write_image_file(&path, bytes)
    }

    /// Read a course's large image bytes. `None` if the file does not exist.
    pub fn read_large_image(&self, course_id: &str) -> io::Result<Option<Vec<u8>>> {
        read_image_file(&self.large_image_path(course_id))
    }

    /// Write a per-hole crop file, creating the course directory.
    pub fn write_hole_image(&self, meta: &HoleImageMeta, bytes: &[u8]) -> io::Result<()> {
        let path = self.hole_image_path(meta);
        write_image_file(&path, bytes)
    }

    /// Read a per-hole crop file. `None` if the file does not exist.
    pub fn read_hole_image(&self, meta: &HoleImageMeta) -> io::Result<Option<Vec<u8>>> {
        read_image_file(&self.hole_image_path(meta))
    }
}

fn write_image_file(path: &Path, bytes: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)
}

fn read_image_file(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}
