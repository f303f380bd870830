use std::io::{Cursor, Write};

use zip::write::FileOptions;
use zip::ZipWriter;

use crate::batch::ProcessedImage;
use crate::error::ProcessingError;

/// Filename advertised in the Content-Disposition header for batch responses.
pub const ARCHIVE_FILENAME: &str = "processed_images.zip";

/// Pack processed images into a ZIP archive, one entry per image.
///
/// An empty slice yields a valid empty archive.
pub fn build_archive(results: &[ProcessedImage]) -> Result<Vec<u8>, ProcessingError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    for result in results {
        zip.start_file(result.filename.as_str(), FileOptions::default())
            .map_err(|e| ProcessingError::Archive(e.to_string()))?;
        zip.write_all(&result.data)
            .map_err(|e| ProcessingError::Archive(e.to_string()))?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| ProcessingError::Archive(e.to_string()))?;
    Ok(cursor.into_inner())
}
