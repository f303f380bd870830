use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("background removal failed: {0}")]
    Removal(String),

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("archive construction failed: {0}")]
    Archive(String),

    #[error("model setup failed: {0}")]
    Model(String),
}
