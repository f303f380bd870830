use async_trait::async_trait;
use image::DynamicImage;
use imgly_bgremove::{
    backends::TractBackend, BackendFactory, BackendType, BackgroundRemovalProcessor,
    BgRemovalError, InferenceBackend, ModelDownloader, ModelManager, ModelSource, ModelSpec,
    OutputFormat, ProcessorConfig,
};
use tokio::sync::Mutex;

use crate::error::ProcessingError;

/// Segmentation model used when nothing else is configured. Fetched into the
/// imgly-bgremove cache on first start and reused afterwards.
pub const DEFAULT_MODEL_URL: &str = "https://huggingface.co/imgly/isnet-general-onnx";

/// Seam over the external segmentation model.
#[async_trait]
pub trait BackgroundRemover: Send + Sync {
    /// Return the image with background pixels made transparent.
    async fn remove(&self, image: DynamicImage) -> Result<DynamicImage, ProcessingError>;
}

/// Factory that wires the pure-Rust Tract backend into the processor.
///
/// The library's default factory creates no backends at all; concrete
/// backends have to be injected by the embedding application.
#[derive(Debug)]
struct TractBackendFactory;

impl BackendFactory for TractBackendFactory {
    fn create_backend(
        &self,
        backend_type: BackendType,
        model_manager: ModelManager,
    ) -> imgly_bgremove::Result<Box<dyn InferenceBackend>> {
        match backend_type {
            BackendType::Tract => Ok(Box::new(TractBackend::with_model_manager(model_manager))),
            other => Err(BgRemovalError::invalid_config(format!(
                "backend {:?} is not compiled into this build",
                other
            ))),
        }
    }

    fn available_backends(&self) -> Vec<BackendType> {
        vec![BackendType::Tract]
    }
}

/// Remover backed by the `imgly-bgremove` Tract backend.
///
/// Construction downloads the model if it is not cached yet. The processor is
/// built once and kept for the process lifetime, so the weights stay loaded;
/// inference is CPU-bound and not re-entrant, so calls are serialized.
pub struct ImglyRemover {
    processor: Mutex<BackgroundRemovalProcessor>,
}

impl ImglyRemover {
    pub async fn from_url(model_url: &str) -> Result<Self, ProcessingError> {
        let downloader =
            ModelDownloader::new().map_err(|e| ProcessingError::Model(e.to_string()))?;
        let model_id = downloader
            .download_model(model_url, false)
            .await
            .map_err(|e| ProcessingError::Model(e.to_string()))?;

        let config = ProcessorConfig::builder()
            .model_spec(ModelSpec {
                source: ModelSource::Downloaded(model_id),
                variant: None,
            })
            .backend_type(BackendType::Tract)
            .output_format(OutputFormat::Png)
            .build()
            .map_err(|e| ProcessingError::Model(e.to_string()))?;

        let processor =
            BackgroundRemovalProcessor::with_factory(config, Box::new(TractBackendFactory))
                .map_err(|e| ProcessingError::Model(e.to_string()))?;

        Ok(Self {
            processor: Mutex::new(processor),
        })
    }
}

#[async_trait]
impl BackgroundRemover for ImglyRemover {
    async fn remove(&self, image: DynamicImage) -> Result<DynamicImage, ProcessingError> {
        let mut processor = self.processor.lock().await;
        let result = processor
            .process_image(&image)
            .map_err(|e| ProcessingError::Removal(e.to_string()))?;
        Ok(result.image)
    }
}
