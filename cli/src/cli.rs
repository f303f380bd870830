use std::path::PathBuf;

use clap::Parser;

use bg_eraser_core::remover::DEFAULT_MODEL_URL;

/// Remove image backgrounds in bulk, upscaled for HD output
#[derive(Debug, Parser)]
#[command(name = "bg-eraser", version, about)]
pub struct Cli {
    /// Input file or directory
    pub input: PathBuf,

    /// Output directory (default: write next to each input)
    pub output: Option<PathBuf>,

    /// Process directories recursively
    #[arg(short, long)]
    pub recursive: bool,

    /// Linear upscale factor applied before removal
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=4))]
    pub upscale: u32,

    /// Segmentation model URL (HuggingFace repository)
    #[arg(long, default_value = DEFAULT_MODEL_URL)]
    pub model: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
