//! Writing a level and its companion animation archive to disk.

use std::fs;
use std::path::{Path, PathBuf};

use newton_adventure_schema::codec::{encode_level, encode_nanim};
use tracing::info;

use crate::config::ExportConfig;
use crate::convert::{ConvertedLevel, LevelConversion};
use crate::document::MapDocument;
use crate::error::ExportError;

/// Exports one map to a level file plus a `.nanim` archive next to it.
///
/// # Example
///
/// ```no_run
/// use newton_adventure_core::prelude::*;
///
/// let map = load_tmx("levels/world1.tmx")?;
/// LevelWriter::new(&map, "levels/world1.nal").write()?;
/// // levels/world1.nal and levels/world1.nanim now exist
/// # Ok::<(), ExportError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LevelWriter<'a> {
    document: &'a MapDocument,
    target: PathBuf,
    config: ExportConfig,
}

impl<'a> LevelWriter<'a> {
    pub fn new(document: &'a MapDocument, target: impl Into<PathBuf>) -> Self {
        Self {
            document,
            target: target.into(),
            config: ExportConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ExportConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Path of the companion archive: the target with its extension replaced.
    pub fn animation_path(&self) -> PathBuf {
        self.target.with_extension(&self.config.animation_extension)
    }

    /// File name level files use to refer to the companion archive.
    pub fn animation_file_name(&self) -> Result<String, ExportError> {
        let path = self.animation_path();
        path.file_name()
            .and_then(|name| name.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ExportError::InvalidPath(format!("No usable file name in {}", path.display()))
            })
    }

    /// Run the conversion without touching the filesystem (tile images aside).
    pub fn convert(&self) -> Result<ConvertedLevel, ExportError> {
        let companion = self.animation_file_name()?;
        LevelConversion::new(self.document, &self.config, companion).run()
    }

    /// Convert the map and write both files.
    ///
    /// The level is written first; if that fails the archive is not written.
    /// Files already written are left in place on a later failure.
    pub fn write(&self) -> Result<(), ExportError> {
        let converted = self.convert()?;
        self.write_converted(&converted)
    }

    /// Write the output of an earlier [`convert`](Self::convert) call.
    pub fn write_converted(&self, converted: &ConvertedLevel) -> Result<(), ExportError> {
        let animation_path = self.animation_path();

        write_file(&self.target, &encode_level(&converted.level))?;
        info!(
            "Wrote {} ({} entities, {} entity types)",
            self.target.display(),
            converted.level.entities.len(),
            converted.level.entity_types.len()
        );

        write_file(&animation_path, &encode_nanim(&converted.animations))?;
        info!(
            "Wrote {} ({} animations)",
            animation_path.display(),
            converted.animations.animations.len()
        );
        Ok(())
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    fs::write(path, bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animation_path_replaces_extension() {
        let map = MapDocument::new();
        let writer = LevelWriter::new(&map, "out/world1.nal");

        assert_eq!(writer.animation_path(), PathBuf::from("out/world1.nanim"));
        assert_eq!(writer.animation_file_name().unwrap(), "world1.nanim");
    }

    #[test]
    fn test_animation_extension_is_configurable() {
        let map = MapDocument::new();
        let config = ExportConfig {
            animation_extension: "anim".to_string(),
            ..Default::default()
        };
        let writer = LevelWriter::new(&map, "world1").with_config(config);

        assert_eq!(writer.animation_path(), PathBuf::from("world1.anim"));
    }

    #[test]
    fn test_target_without_file_name_is_invalid() {
        let map = MapDocument::new();
        let writer = LevelWriter::new(&map, "/");

        assert!(matches!(
            writer.convert().unwrap_err(),
            ExportError::InvalidPath(_)
        ));
    }

    #[test]
    fn test_failed_level_write_skips_archive() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing_dir").join("level.nal");
        let map = MapDocument::new();
        let writer = LevelWriter::new(&map, &target);

        let err = writer.write().unwrap_err();

        assert!(matches!(err, ExportError::Write { .. }));
        assert!(!writer.animation_path().exists());
    }
}
