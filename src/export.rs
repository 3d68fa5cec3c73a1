//! One-call export of a `.tmx` file.

use std::path::{Path, PathBuf};

use newton_adventure_core::{ExportConfig, ExportError, LevelWriter, load_tmx};
use tracing::info;

/// Extension of level files.
pub const LEVEL_EXTENSION: &str = "nal";

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub level_path: PathBuf,
    pub animation_path: PathBuf,
    pub entities: usize,
    pub entity_types: usize,
    pub animations: usize,
}

/// Level path used when none is given: the input with a `.nal` extension.
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    input.as_ref().with_extension(LEVEL_EXTENSION)
}

/// Load `input`, convert it and write the level to `output` plus its
/// companion archive next to it.
pub fn export_tmx(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: ExportConfig,
) -> Result<ExportSummary, ExportError> {
    let input = input.as_ref();
    let output = output.as_ref();
    info!("Exporting {} to {}", input.display(), output.display());

    let map = load_tmx(input)?;
    let writer = LevelWriter::new(&map, output).with_config(config);
    let converted = writer.convert()?;
    writer.write_converted(&converted)?;

    Ok(ExportSummary {
        level_path: output.to_path_buf(),
        animation_path: writer.animation_path(),
        entities: converted.level.entities.len(),
        entity_types: converted.level.entity_types.len(),
        animations: converted.animations.animations.len(),
    })
}
