//! Thumbnail loading and resizing for image rings

use crate::io::error::{ChartError, Result};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Decoded thumbnails normalized to RGBA
#[derive(Debug, Clone)]
pub struct ImagePool {
    images: Vec<RgbaImage>,
    sources: Vec<PathBuf>,
}

impl ImagePool {
    /// Pool from already decoded images
    ///
    /// # Errors
    ///
    /// Returns `EmptyImagePool` if `images` is empty
    pub fn from_images(images: Vec<RgbaImage>) -> Result<Self> {
        if images.is_empty() {
            return Err(ChartError::EmptyImagePool { attempted: 0 });
        }
        Ok(Self {
            images,
            sources: Vec::new(),
        })
    }

    /// Number of images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the pool is empty (never true for a constructed pool)
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Files the images were decoded from, in pool order
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Image at `index` resized to `size` x `size` with Lanczos resampling
    pub fn thumbnail(&self, index: usize, size: u32) -> Option<RgbaImage> {
        self.images
            .get(index)
            .map(|img| imageops::resize(img, size, size, FilterType::Lanczos3))
    }
}

/// Decode every existing path into an [`ImagePool`]
///
/// Missing files are logged and skipped.
///
/// # Errors
///
/// Returns an error if:
/// - An existing file cannot be decoded as an image
/// - No path resolved to an image
pub fn load_images<P: AsRef<Path>>(paths: &[P]) -> Result<ImagePool> {
    let mut images = Vec::with_capacity(paths.len());
    let mut sources = Vec::with_capacity(paths.len());

    for path in paths {
        let path = path.as_ref();
        if !path.is_file() {
            warn!("Image not found: {}", path.display());
            continue;
        }

        let img = image::open(path).map_err(|e| ChartError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(
            "Loaded {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        images.push(img.to_rgba8());
        sources.push(path.to_path_buf());
    }

    if images.is_empty() {
        return Err(ChartError::EmptyImagePool {
            attempted: paths.len(),
        });
    }

    Ok(ImagePool { images, sources })
}
