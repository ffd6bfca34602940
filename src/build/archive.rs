use crate::result::{GoBuilderError, Result};
use std::ffi::OsString;
use std::fs::File;
use std::path::{Path, PathBuf};
use tokio::fs;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

const DEFAULT_ENTRY_MODE: u32 = 0o755;

/// `<output>.zip`
pub fn archive_path(output: &Path) -> PathBuf {
    with_suffix(output, ".zip")
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/** Packs a built artifact into `<output>.zip` under the name `entry_name`
 *
 * # Process Flow
 * 1. Stream the artifact into `<output>.zip.partial` as a single deflated entry
 * 2. Rename the partial archive to `<output>.zip`
 * 3. Remove the raw artifact
 *
 * # Notes
 * - No renamed copy of the binary is ever written next to the output
 * - A failed write or rename removes the partial archive and leaves the
 *   artifact in place
 * - A failure in step 3 leaves both the archive and the artifact behind
 */
pub async fn package_artifact(output: &Path, entry_name: &str) -> Result<PathBuf> {
    if entry_name.is_empty() {
        return Err(GoBuilderError::archive(
            "project name is empty, cannot name the archive entry",
        ));
    }

    let zip_path = archive_path(output);
    let partial_path = with_suffix(&zip_path, ".partial");

    if let Err(e) = write_archive(output, &partial_path, entry_name) {
        if partial_path.exists() {
            fs::remove_file(&partial_path).await.ok();
        }
        return Err(e);
    }

    if let Err(e) = fs::rename(&partial_path, &zip_path).await {
        fs::remove_file(&partial_path).await.ok();
        return Err(GoBuilderError::archive(format!(
            "Failed to move archive into place at {}: {}",
            zip_path.display(),
            e
        )));
    }

    fs::remove_file(output).await.map_err(|e| {
        GoBuilderError::archive(format!(
            "Failed to remove {} after archiving: {}",
            output.display(),
            e
        ))
    })?;

    log::info!("Archived {} as {}", output.display(), zip_path.display());
    Ok(zip_path)
}

fn write_archive(source: &Path, destination: &Path, entry_name: &str) -> Result<()> {
    let mut input = File::open(source).map_err(|e| {
        GoBuilderError::archive(format!("Failed to open {}: {}", source.display(), e))
    })?;

    let file = File::create(destination).map_err(|e| {
        GoBuilderError::archive(format!("Failed to create {}: {}", destination.display(), e))
    })?;

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(entry_mode(&input));

    let mut writer = ZipWriter::new(file);
    writer
        .start_file(entry_name, options)
        .map_err(|e| GoBuilderError::archive(format!("Failed to start zip entry: {}", e)))?;

    std::io::copy(&mut input, &mut writer).map_err(|e| {
        GoBuilderError::archive(format!("Failed to write zip entry: {}", e))
    })?;

    writer
        .finish()
        .map_err(|e| GoBuilderError::archive(format!("Failed to finish zip archive: {}", e)))?;

    Ok(())
}

#[cfg(unix)]
fn entry_mode(file: &File) -> u32 {
    file.metadata()
        .map(|m| m.permissions().mode() & 0o777)
        .unwrap_or(DEFAULT_ENTRY_MODE)
}

#[cfg(not(unix))]
fn entry_mode(_file: &File) -> u32 {
    DEFAULT_ENTRY_MODE
}
