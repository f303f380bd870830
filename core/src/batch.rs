use crate::format::output_name;
use crate::processor::Processor;

/// One uploaded file part. Lives only for the duration of a request.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub filename: String,
    pub data: Vec<u8>,
}

/// A successfully processed image, already carrying its output filename.
#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Run the pipeline over every image in the batch, sequentially.
///
/// Each image is processed independently: a failure is logged with the
/// offending filename and that image is dropped from the results while the
/// rest of the batch carries on. Callers only ever see successes.
pub async fn process_batch(
    processor: &Processor,
    images: Vec<UploadedImage>,
) -> Vec<ProcessedImage> {
    let mut results = Vec::with_capacity(images.len());

    for image in images {
        match processor.process(&image.data).await {
            Ok(data) => results.push(ProcessedImage {
                filename: output_name(&image.filename),
                data,
            }),
            Err(e) => {
                log::error!("Error processing {}: {}", image.filename, e);
            }
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessingConfig;
    use crate::error::ProcessingError;
    use crate::remover::BackgroundRemover;
    use async_trait::async_trait;
    use image::{DynamicImage, RgbImage};
    use std::io::Cursor;
    use std::sync::Arc;

    struct PassthroughStub;

    #[async_trait]
    impl BackgroundRemover for PassthroughStub {
        async fn remove(&self, image: DynamicImage) -> Result<DynamicImage, ProcessingError> {
            Ok(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
    }

    fn png_fixture() -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, image::Rgb([1, 2, 3])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    fn test_processor() -> Processor {
        Processor::new(Arc::new(PassthroughStub), ProcessingConfig::default())
    }

    #[tokio::test]
    async fn test_names_outputs_after_inputs() {
        let uploads = vec![
            UploadedImage {
                filename: "a.png".into(),
                data: png_fixture(),
            },
            UploadedImage {
                filename: "b.jpg".into(),
                data: png_fixture(),
            },
        ];

        let results = process_batch(&test_processor(), uploads).await;
        let names: Vec<_> = results.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, ["a-no-bg.png", "b-no-bg.png"]);
    }

    #[tokio::test]
    async fn test_one_bad_image_does_not_abort_the_batch() {
        let uploads = vec![
            UploadedImage {
                filename: "broken.png".into(),
                data: b"not a png".to_vec(),
            },
            UploadedImage {
                filename: "ok.png".into(),
                data: png_fixture(),
            },
        ];

        let results = process_batch(&test_processor(), uploads).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].filename, "ok-no-bg.png");
    }

    #[tokio::test]
    async fn test_all_failures_yield_empty_results() {
        let uploads = vec![UploadedImage {
            filename: "broken.png".into(),
            data: vec![0, 1, 2],
        }];

        let results = process_batch(&test_processor(), uploads).await;
        assert!(results.is_empty());
    }
}
