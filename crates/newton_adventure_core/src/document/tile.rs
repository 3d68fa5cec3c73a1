//! Tiles referenced by tile objects.

use std::path::PathBuf;

use crate::bitmap::Bitmap;
use crate::properties::Properties;

/// A tile drawn by a tile object.
#[derive(Debug, Clone)]
pub struct TileRef {
    /// Local tile id inside its tileset
    pub id: u32,
    pub properties: Properties,
    /// Where the tile's pixels come from; `None` when the tileset has no image
    pub image: Option<TileImage>,
}

impl TileRef {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            properties: Properties::new(),
            image: None,
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key, value);
        self
    }

    pub fn with_image(mut self, image: TileImage) -> Self {
        self.image = Some(image);
        self
    }
}

/// Source of a tile's bitmap.
#[derive(Debug, Clone, PartialEq)]
pub enum TileImage {
    /// The tile has its own image file (image collection tilesets).
    File {
        source: PathBuf,
        /// Colour treated as fully transparent
        transparent: Option<[u8; 3]>,
    },

    /// The tile is a region of a tileset sheet.
    SheetRegion {
        source: PathBuf,
        transparent: Option<[u8; 3]>,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Pixels already decoded by the host.
    Bitmap(Bitmap),
}
