//! Icon assets resolved by identifier and thresholded to one bit

use std::path::PathBuf;

use image::{DynamicImage, GenericImageView, imageops::FilterType};
use thiserror::Error;
use tracing::debug;

use crate::conditions::IconId;
use crate::render::MonoLayer;

/// File extensions tried for each icon, in order
const EXTENSIONS: [&str; 2] = ["png", "bmp"];
/// Luma below this counts as ink
const INK_THRESHOLD: u8 = 128;

#[derive(Debug, Error)]
pub enum IconError {
    #[error("no asset for icon '{icon}' in {}", dir.display())]
    Missing { icon: IconId, dir: PathBuf },

    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Provides square monochrome bitmaps for icon identifiers
pub trait IconSource: Send + Sync {
    fn icon(&self, icon: IconId, size: u32) -> Result<MonoLayer, IconError>;
}

/// Icons stored as `{dir}/{icon-name}.png` or `.bmp`
#[derive(Debug, Clone)]
pub struct IconDirectory {
    dir: PathBuf,
}

impl IconDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn locate(&self, icon: IconId) -> Option<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}.{ext}", icon.name())))
            .find(|path| path.is_file())
    }
}

impl IconSource for IconDirectory {
    fn icon(&self, icon: IconId, size: u32) -> Result<MonoLayer, IconError> {
        let path = self.locate(icon).ok_or_else(|| IconError::Missing {
            icon,
            dir: self.dir.clone(),
        })?;
        let image = image::open(&path).map_err(|source| IconError::Decode {
            path: path.clone(),
            source,
        })?;
        debug!("Loaded icon {} from {}", icon, path.display());
        Ok(threshold(image, size))
    }
}

/// Scale to `size` x `size` and keep dark opaque pixels as ink
fn threshold(image: DynamicImage, size: u32) -> MonoLayer {
    let image = if image.dimensions() == (size, size) {
        image
    } else {
        image.resize_exact(size, size, FilterType::Triangle)
    };
    let pixels = image.to_luma_alpha8();

    let mut layer = MonoLayer::new(size, size);
    for (x, y, pixel) in pixels.enumerate_pixels() {
        let [luma, alpha] = pixel.0;
        layer.set(x as i32, y as i32, alpha >= INK_THRESHOLD && luma < INK_THRESHOLD);
    }
    layer
}
