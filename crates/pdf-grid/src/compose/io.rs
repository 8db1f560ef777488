//! Document I/O operations for grid composition

use crate::types::*;
use lopdf::Document;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

/// Distinguishes concurrent saves from the same process
static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| GridError::SourceRead(e.into()))?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    log::debug!("Loaded {} ({} pages)", path.display(), doc.get_pages().len());
    Ok(doc)
}

/// Save a document atomically.
///
/// The bytes go to a sibling temporary file that is renamed over `path`
/// once complete, so a failed save never leaves a partial file behind.
pub async fn save_pdf(
    mut doc: Document,
    path: impl AsRef<Path>,
    compression: Compression,
) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || {
        apply_compression(&mut doc, compression);
        let mut writer = Vec::new();
        doc.save_to(&mut writer)
            .map_err(|e| GridError::SourceWrite(std::io::Error::other(e)))?;
        Ok::<_, GridError>(writer)
    })
    .await??;

    let temp_path = temp_path_for(&path);
    if let Err(e) = tokio::fs::write(&temp_path, &bytes).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(GridError::SourceWrite(e));
    }
    if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(GridError::SourceWrite(e));
    }

    log::debug!("Saved {} ({} bytes)", path.display(), bytes.len());
    Ok(())
}

/// Shrink the document before writing
pub(crate) fn apply_compression(doc: &mut Document, compression: Compression) {
    match compression {
        Compression::None => {}
        Compression::Standard => {
            let pruned = doc.prune_objects();
            doc.delete_zero_length_streams();
            doc.renumber_objects();
            doc.compress();
            log::debug!("Pruned {} unreferenced objects", pruned.len());
        }
    }
}

/// `dir/name.pdf` → `dir/.name.pdf.<pid>.<n>.tmp`, unique per call
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or(OsStr::new("output")));
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    name.push(format!(".{}.{}.tmp", std::process::id(), n));
    path.with_file_name(name)
}
