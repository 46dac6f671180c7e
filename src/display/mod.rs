//! Destinations for rendered frames
//!
//! The physical panel driver lives outside this crate and plugs in through
//! [`RasterSink`]. [`PngPreviewSink`] renders the two layers into one PNG so a
//! frame can be checked on a desktop.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use thiserror::Error;
use tracing::{debug, info};

use crate::render::MonoLayer;

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK_INK: Rgb<u8> = Rgb([0, 0, 0]);
const RED_INK: Rgb<u8> = Rgb([200, 0, 0]);

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("layer size {actual:?} does not match the panel size {expected:?}")]
    SizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("display device error: {0}")]
    Device(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),
}

/// Accepts the black and red layers of one frame
pub trait RasterSink: Send {
    /// Push a full frame; both layers have the panel's dimensions
    fn display(&mut self, black: &MonoLayer, red: &MonoLayer) -> Result<(), SinkError>;

    /// Blank the panel
    fn clear(&mut self) -> Result<(), SinkError>;

    /// Put the panel into its low-power state
    fn sleep(&mut self) -> Result<(), SinkError>;
}

/// Writes each frame as a composited PNG
#[derive(Debug, Clone)]
pub struct PngPreviewSink {
    path: PathBuf,
    width: u32,
    height: u32,
}

impl PngPreviewSink {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            width,
            height,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_size(&self, layer: &MonoLayer) -> Result<(), SinkError> {
        let actual = (layer.width(), layer.height());
        if actual != (self.width, self.height) {
            return Err(SinkError::SizeMismatch {
                expected: (self.width, self.height),
                actual,
            });
        }
        Ok(())
    }

    fn write(&self, image: &RgbImage) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        image.save(&self.path)?;
        Ok(())
    }
}

/// Red ink wins where both layers are set
fn composite(black: &MonoLayer, red: &MonoLayer) -> RgbImage {
    RgbImage::from_fn(black.width(), black.height(), |x, y| {
        let (x, y) = (x as i32, y as i32);
        if red.is_set(x, y) {
            RED_INK
        } else if black.is_set(x, y) {
            BLACK_INK
        } else {
            PAPER
        }
    })
}

impl RasterSink for PngPreviewSink {
    fn display(&mut self, black: &MonoLayer, red: &MonoLayer) -> Result<(), SinkError> {
        self.check_size(black)?;
        self.check_size(red)?;
        self.write(&composite(black, red))?;
        info!("Wrote preview frame to {}", self.path.display());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SinkError> {
        self.write(&RgbImage::from_pixel(self.width, self.height, PAPER))?;
        debug!("Cleared preview at {}", self.path.display());
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), SinkError> {
        debug!("Preview sink has no low-power state");
        Ok(())
    }
}
