#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    /// Linear upscale factor applied before background removal
    pub upscale: u32,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self { upscale: 2 }
    }
}
