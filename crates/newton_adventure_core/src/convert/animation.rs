//! Animation references and the embedded animation archive.
//!
//! An object's animation either comes from an external nanim file named in its
//! properties, or is synthesized from the object's tile: a one-frame animation
//! over the whole tile bitmap, stored in the level's companion archive.

use std::collections::HashSet;

use newton_adventure_schema::level::AnimationReference;
use newton_adventure_schema::nanim::{Animation, Frame, Image, Nanim};
use tracing::{debug, warn};

use crate::bitmap::{Bitmap, BitmapDecoder};
use crate::convert::entity_types::type_key;
use crate::document::MapObject;
use crate::error::ExportError;
use crate::properties::Properties;

/// Animations and images embedded in the companion archive.
///
/// Names are unique; insertion order is kept.
#[derive(Debug, Default)]
pub struct AnimationArchive {
    nanim: Nanim,
    names: HashSet<String>,
}

impl AnimationArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Add a one-frame animation named `name` showing `bitmap`, along with the
    /// image it points at. Does nothing and returns `false` if the name is taken.
    pub fn embed(&mut self, name: &str, bitmap: &Bitmap, frame_duration: i32) -> bool {
        if !self.names.insert(name.to_string()) {
            return false;
        }

        self.nanim.animations.push(Animation {
            name: name.to_string(),
            frames: vec![Frame {
                image_name: name.to_string(),
                duration: frame_duration,
                u1: 0.0,
                v1: 0.0,
                u2: 1.0,
                v2: 1.0,
            }],
        });
        self.nanim.images.push(Image {
            name: name.to_string(),
            width: bitmap.width as i32,
            height: bitmap.height as i32,
            format: bitmap.pixel_format() as i32,
            pixels: bitmap.flatten(),
        });
        true
    }

    pub fn len(&self) -> usize {
        self.nanim.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nanim.animations.is_empty()
    }

    pub fn nanim(&self) -> &Nanim {
        &self.nanim
    }

    pub fn into_nanim(self) -> Nanim {
        self.nanim
    }
}

/// Fills [`AnimationReference`]s for one conversion run.
#[derive(Debug)]
pub struct AnimationResolver {
    /// File name written into references to embedded animations
    companion_file: String,
    /// Property prefix of the default animation role (`<ns>.animation`)
    animation_key: String,
    frame_duration: i32,
    archive: AnimationArchive,
    decoder: BitmapDecoder,
}

impl AnimationResolver {
    pub fn new(
        companion_file: impl Into<String>,
        animation_key: impl Into<String>,
        frame_duration: i32,
    ) -> Self {
        Self {
            companion_file: companion_file.into(),
            animation_key: animation_key.into(),
            frame_duration,
            archive: AnimationArchive::new(),
            decoder: BitmapDecoder::new(),
        }
    }

    /// Point `reference` at `<base_key>.file` / `<base_key>.name`.
    ///
    /// Returns `true` when the file property is set. The name is only copied
    /// alongside a file, and may stay unset.
    pub fn resolve_external(
        &self,
        reference: &mut AnimationReference,
        properties: &Properties,
        base_key: &str,
    ) -> bool {
        let Some(file) = properties.get_non_empty(&format!("{base_key}.file")) else {
            return false;
        };
        reference.file = Some(file.to_string());
        if let Some(name) = properties.get_non_empty(&format!("{base_key}.name")) {
            reference.name = Some(name.to_string());
        }
        true
    }

    /// Resolve the default animation of `object`.
    ///
    /// External properties win. Otherwise a tile object gets an animation
    /// named after its type key in the companion archive, embedded the first
    /// time the key is seen. Objects with neither leave `reference` untouched.
    pub fn resolve(
        &mut self,
        reference: &mut AnimationReference,
        object: &MapObject,
        properties: &Properties,
    ) -> Result<(), ExportError> {
        if self.resolve_external(reference, properties, &self.animation_key) {
            return Ok(());
        }
        let Some(tile) = &object.tile else {
            return Ok(());
        };

        let key = type_key(object);
        reference.file = Some(self.companion_file.clone());
        reference.name = Some(key.clone());
        if self.archive.contains(&key) {
            return Ok(());
        }

        let bitmap = match &tile.image {
            Some(image) => self.decoder.decode(image)?,
            None => {
                warn!("Tile {} has no image, embedding an empty one", tile.id);
                Bitmap::empty()
            }
        };
        debug!(
            "Embedding animation {:?} ({}x{}, {:?})",
            key,
            bitmap.width,
            bitmap.height,
            bitmap.pixel_format()
        );
        self.archive.embed(&key, &bitmap, self.frame_duration);
        Ok(())
    }

    pub fn archive(&self) -> &AnimationArchive {
        &self.archive
    }

    pub fn into_archive(self) -> AnimationArchive {
        self.archive
    }
}
