//! Decoded tile bitmaps and their unpacked archive form.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::RgbaImage;
use newton_adventure_schema::nanim::PixelFormat;
use tracing::debug;

use crate::document::TileImage;
use crate::error::ExportError;

/// RGBA pixels of one tile, top-to-bottom, left-to-right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// Whether the alpha channel carries information
    pub has_alpha: bool,
    rgba: Vec<u8>,
}

impl Bitmap {
    /// Wrap RGBA bytes. Returns `None` unless `rgba` holds exactly
    /// `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, has_alpha: bool, rgba: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (rgba.len() == expected).then_some(Self {
            width,
            height,
            has_alpha,
            rgba,
        })
    }

    /// A 0×0 opaque bitmap.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn pixel_format(&self) -> PixelFormat {
        if self.has_alpha {
            PixelFormat::Rgba8888
        } else {
            PixelFormat::Rgb888
        }
    }

    /// Interleaved pixel bytes in archive layout: R,G,B per pixel, plus A when
    /// the bitmap has alpha.
    pub fn flatten(&self) -> Vec<u8> {
        if self.has_alpha {
            return self.rgba.clone();
        }
        let pixels = self.rgba.len() / 4;
        let mut flat = Vec::with_capacity(pixels * self.pixel_format().bytes_per_pixel());
        for pixel in self.rgba.chunks_exact(4) {
            flat.extend_from_slice(&pixel[..3]);
        }
        flat
    }

    fn from_image(image: RgbaImage, has_alpha: bool) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            has_alpha,
            rgba: image.into_raw(),
        }
    }
}

#[derive(Debug)]
struct DecodedSheet {
    image: RgbaImage,
    has_alpha: bool,
}

/// Decodes tile images, keeping every decoded file for the rest of the run.
///
/// Tiles cut from the same tileset sheet decode the sheet once.
#[derive(Debug, Default)]
pub struct BitmapDecoder {
    sheets: HashMap<(PathBuf, Option<[u8; 3]>), Arc<DecodedSheet>>,
}

impl BitmapDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pixels of a tile image.
    pub fn decode(&mut self, image: &TileImage) -> Result<Bitmap, ExportError> {
        match image {
            TileImage::Bitmap(bitmap) => Ok(bitmap.clone()),
            TileImage::File {
                source,
                transparent,
            } => {
                let sheet = self.sheet(source, *transparent)?;
                Ok(Bitmap::from_image(sheet.image.clone(), sheet.has_alpha))
            }
            TileImage::SheetRegion {
                source,
                transparent,
                x,
                y,
                width,
                height,
            } => {
                let sheet = self.sheet(source, *transparent)?;
                let fits = x.checked_add(*width).is_some_and(|r| r <= sheet.image.width())
                    && y.checked_add(*height).is_some_and(|b| b <= sheet.image.height());
                if !fits {
                    return Err(ExportError::RegionOutOfBounds {
                        path: source.clone(),
                        x: *x,
                        y: *y,
                        width: *width,
                        height: *height,
                    });
                }
                let region = image::imageops::crop_imm(&sheet.image, *x, *y, *width, *height);
                Ok(Bitmap::from_image(region.to_image(), sheet.has_alpha))
            }
        }
    }

    fn sheet(
        &mut self,
        source: &Path,
        transparent: Option<[u8; 3]>,
    ) -> Result<Arc<DecodedSheet>, ExportError> {
        let key = (source.to_path_buf(), transparent);
        if let Some(sheet) = self.sheets.get(&key) {
            return Ok(Arc::clone(sheet));
        }

        let decoded = image::open(source).map_err(|source_err| ExportError::Image {
            path: source.to_path_buf(),
            source: source_err,
        })?;
        let mut has_alpha = decoded.color().has_alpha();
        let mut image = decoded.to_rgba8();
        if let Some([r, g, b]) = transparent {
            for pixel in image.pixels_mut() {
                if pixel.0[..3] == [r, g, b] {
                    pixel.0[3] = 0;
                }
            }
            has_alpha = true;
        }
        debug!(
            "Decoded {:?} ({}x{}, alpha: {})",
            source,
            image.width(),
            image.height(),
            has_alpha
        );

        let sheet = Arc::new(DecodedSheet { image, has_alpha });
        self.sheets.insert(key, Arc::clone(&sheet));
        Ok(sheet)
    }
}
