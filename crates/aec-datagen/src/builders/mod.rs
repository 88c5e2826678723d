//! Fluent builders that drive a whole generation run.
//!
//! [`ModelBuilder`] produces one model, in memory or streamed to a directory.
//! [`TenantShardWriter`] runs one independent model per tenant of a manifest.

mod model;
mod tenant;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::GenerationError;
use crate::output::OutputError;

pub use model::{
    GeneratedModel, GenerationMetrics, ModelBuilder, SUMMARY_FILE, WrittenModel, default_model_id,
};
pub use tenant::{MANIFEST_FILE, RunManifest, TenantRecord, TenantShardWriter};

fn create_dir(dir: &Path) -> Result<(), GenerationError> {
    std::fs::create_dir_all(dir).map_err(|e| GenerationError::io(dir, e))
}

fn create_file(path: &Path) -> Result<BufWriter<File>, GenerationError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| GenerationError::io(path, e))
}

/// Writes a single pretty-printed JSON document.
fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), GenerationError> {
    let mut writer = create_file(path)?;
    serde_json::to_writer_pretty(&mut writer, value).map_err(OutputError::from)?;
    writer
        .write_all(b"\n")
        .and_then(|()| writer.flush())
        .map_err(|e| GenerationError::io(path, e))
}
