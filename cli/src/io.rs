use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use walkdir::WalkDir;

use bg_eraser_core::format::{output_name, ImageFormat};

/// Collect all supported image files from the input path.
/// If `recursive` is true, walk subdirectories.
pub fn collect_files(input: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    if !input.is_dir() {
        bail!("{} is not a file or directory", input.display());
    }

    let max_depth = if recursive { usize::MAX } else { 1 };

    let mut files = Vec::new();
    for entry in WalkDir::new(input).max_depth(max_depth) {
        let entry = entry.context("Failed to walk input directory")?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if let Some(format) = ImageFormat::from_path(&path) {
            log::debug!("Queued {} ({})", path.display(), format.as_str());
            files.push(path);
        }
    }

    Ok(files)
}

/// Resolve where the processed PNG for `input_file` goes.
/// Without an output base the PNG lands next to the input; with one, the
/// relative directory structure is mirrored underneath it.
pub fn resolve_output(
    input_file: &Path,
    input_base: &Path,
    output_base: Option<&Path>,
) -> PathBuf {
    let file_name = input_file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let out_name = output_name(&file_name);

    match output_base {
        None => input_file.with_file_name(out_name),
        Some(out) => {
            if input_base.is_file() {
                out.join(out_name)
            } else {
                let relative = input_file.strip_prefix(input_base).unwrap_or(input_file);
                let mut target = out.join(relative);
                target.set_file_name(out_name);
                target
            }
        }
    }
}

/// Read file contents.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Write file contents, creating parent directories as needed.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, data).with_context(|| format!("Failed to write {}", path.display()))
}
