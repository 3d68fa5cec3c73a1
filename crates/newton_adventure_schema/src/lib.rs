//! # `newton_adventure_schema`
//!
//! Protobuf messages of the two files a Newton Adventure level is made of:
//!
//! - **Level** ([`level`]): placed entities, the entity types they instantiate and
//!   level-wide flags.
//! - **Nanim** ([`nanim`]): animations and the raw images their frames point at.
//!
//! The messages are declared with `prost` derives and mirror the `.proto` files
//! shipped in this crate's `proto/` directory, so other consumers of the format can
//! generate their own bindings.
//!
//! ## Example
//!
//! ```rust
//! use newton_adventure_schema::prelude::*;
//!
//! let level = Level {
//!     entities: vec![Entity {
//!         position: Position::new(64.0, 32.0),
//!         zorder: 0,
//!         r#type: "hero".to_string(),
//!     }],
//!     entity_types: vec![EntityType::new("hero")],
//!     rotate_gravity_possible: Some(false),
//! };
//!
//! let bytes = encode_level(&level);
//! assert_eq!(decode_level(&bytes).unwrap(), level);
//! ```

pub mod codec;
pub mod level;
pub mod nanim;

pub mod prelude {
    //! Common imports for `newton_adventure_schema` users.

    pub use crate::codec::{SchemaError, decode_level, decode_nanim, encode_level, encode_nanim};
    pub use crate::level::{AnimationReference, Entity, EntityType, Level, Position, Shape};
    pub use crate::nanim::{Animation, Frame, Image, Nanim, PixelFormat};
}

pub use codec::SchemaError;
