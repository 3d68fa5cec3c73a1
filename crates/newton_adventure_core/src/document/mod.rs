//! Read-only snapshot of a Tiled map, as seen by the exporter.
//!
//! The conversion only ever reads a [`MapDocument`]. Build one by hand when
//! embedding the exporter in a host application, or load a `.tmx` file with
//! [`tmx::load_tmx`].

pub mod map;
pub mod object;
pub mod tile;
pub mod tmx;

pub use map::{Layer, LayerKind, MapDocument, ObjectGroup};
pub use object::{MapObject, ObjectShape};
pub use tile::{TileImage, TileRef};
