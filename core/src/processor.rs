use std::io::Cursor;
use std::sync::Arc;

use image::codecs::png::PngEncoder;
use image::imageops::FilterType;
use image::{GenericImageView, ImageEncoder};

use crate::config::ProcessingConfig;
use crate::error::ProcessingError;
use crate::remover::BackgroundRemover;

/// Single-image pipeline: decode → upscale → background removal → PNG encode.
pub struct Processor {
    remover: Arc<dyn BackgroundRemover>,
    config: ProcessingConfig,
}

impl Processor {
    pub fn new(remover: Arc<dyn BackgroundRemover>, config: ProcessingConfig) -> Self {
        Self { remover, config }
    }

    /// Produce PNG bytes with the background removed, at `upscale`× the original
    /// linear dimensions (Lanczos3 resampling, applied before removal).
    pub async fn process(&self, input: &[u8]) -> Result<Vec<u8>, ProcessingError> {
        let img = image::load_from_memory(input)
            .map_err(|e| ProcessingError::Decode(e.to_string()))?;

        let (width, height) = img.dimensions();
        let upscaled = img.resize_exact(
            width * self.config.upscale,
            height * self.config.upscale,
            FilterType::Lanczos3,
        );

        let cut = self.remover.remove(upscaled).await?;

        let rgba = cut.to_rgba8();
        let mut output = Vec::new();
        let encoder = PngEncoder::new(Cursor::new(&mut output));
        encoder
            .write_image(
                rgba.as_raw(),
                rgba.width(),
                rgba.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e| ProcessingError::Encode(e.to_string()))?;

        Ok(output)
    }
}
