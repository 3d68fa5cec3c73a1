//! # `newton_adventure_core`
//!
//! Conversion backbone for `newton_adventure_tiled`. Turns a Tiled map into a
//! Newton Adventure level (`.nal`) and its companion animation archive
//! (`.nanim`).
//!
//! ## Architecture
//!
//! This crate sits between:
//! - **Input**: a [`MapDocument`], built by hand or loaded from a `.tmx` file
//!   with [`load_tmx`]
//! - **Output** (`newton_adventure_schema`): the protobuf `Level` and `Nanim` messages
//!
//! ## What It Does
//!
//! 1. **Entity types**: one per tile (`tile_<id>`) or per object name, built once
//! 2. **Variants**: typed payloads read from `newton_adventure.*` properties
//! 3. **Animations**: external references, or tile bitmaps embedded as one-frame animations
//! 4. **Output**: both messages encoded and written side by side
//!
//! ## Example Usage
//!
//! ```rust
//! use newton_adventure_core::prelude::*;
//!
//! let map = MapDocument::new().with_layer(Layer::objects(
//!     "front",
//!     vec![
//!         MapObject::new("hero")
//!             .with_kind("hero")
//!             .at(32.0, 64.0)
//!             .with_property("newton_adventure.animation.file", "hero.nanim"),
//!     ],
//! ));
//!
//! let converted = LevelWriter::new(&map, "level.nal").convert().unwrap();
//! assert_eq!(converted.level.entities[0].r#type, "hero");
//! ```

pub mod bitmap;
pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod properties;
pub mod writer;

pub mod prelude {
    //! Common imports for `newton_adventure_core` users.

    pub use crate::bitmap::Bitmap;
    pub use crate::config::ExportConfig;
    pub use crate::convert::{ConvertedLevel, EntityKind, LevelConversion, convert_map};
    pub use crate::document::tmx::load_tmx;
    pub use crate::document::{
        Layer, LayerKind, MapDocument, MapObject, ObjectShape, TileImage, TileRef,
    };
    pub use crate::error::ExportError;
    pub use crate::properties::Properties;
    pub use crate::writer::LevelWriter;
}

pub use config::ExportConfig;
pub use document::MapDocument;
pub use document::tmx::load_tmx;
pub use error::ExportError;
pub use writer::LevelWriter;
