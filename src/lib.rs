//! # `newton_adventure_tiled`
//!
//! Export Tiled maps to Newton Adventure levels.
//!
//! This is a meta-crate that combines the `newton_adventure_*` sub-crates and
//! ships the `tmx2nal` export command.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use newton_adventure_tiled::prelude::*;
//!
//! let summary = export_tmx("levels/world1.tmx", "levels/world1.nal", ExportConfig::default())?;
//! assert_eq!(summary.level_path.extension().unwrap(), "nal");
//! # Ok::<(), ExportError>(())
//! ```
//!
//! ## Features
//!
//! - **default**: Includes `cli`
//! - **cli**: The `tmx2nal` binary (`clap`, `tracing-subscriber`, `anyhow`)
//!
//! ## Architecture
//!
//! - [`schema`]: protobuf messages of the `.nal` level and `.nanim` archive formats
//! - [`core`]: map document, TMX loading, conversion and writing

pub mod export;

// Re-export sub-crates for advanced usage
pub use newton_adventure_core as core;
pub use newton_adventure_schema as schema;

pub use export::{ExportSummary, default_output_path, export_tmx};

/// Unified prelude for `newton_adventure_tiled`.
pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::schema::prelude::*;

    pub use crate::export::{ExportSummary, default_output_path, export_tmx};
}
