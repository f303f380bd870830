use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use bg_eraser_core::config::ProcessingConfig;
use bg_eraser_core::processor::Processor;
use bg_eraser_core::remover::ImglyRemover;

mod cli;
mod io;
mod report;

use cli::Cli;
use io::{collect_files, read_file, resolve_output, write_file};
use report::{FileResult, Report};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Collect files
    let files = collect_files(&cli.input, cli.recursive).context("Failed to collect input files")?;

    if files.is_empty() {
        println!("No supported image files found.");
        return Ok(());
    }

    println!("Found {} file(s) to process.", files.len());

    let remover = ImglyRemover::from_url(&cli.model)
        .await
        .context("Failed to set up the background-removal model")?;
    let config = ProcessingConfig {
        upscale: cli.upscale,
    };
    let processor = Processor::new(Arc::new(remover), config);

    // Progress bar
    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    let mut report = Report::new();

    // The model call dominates; files run one at a time
    for input_path in &files {
        let result: Result<()> = async {
            let data = read_file(input_path)?;
            let output = processor.process(&data).await?;
            let output_path = resolve_output(input_path, &cli.input, cli.output.as_deref());
            write_file(&output_path, &output)?;
            Ok(())
        }
        .await;

        match result {
            Ok(()) => {
                pb.set_message(
                    input_path
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .into_owned(),
                );
                report.add(FileResult {
                    path: input_path.clone(),
                    error: None,
                });
            }
            Err(e) => {
                log::error!("Error processing {}: {}", input_path.display(), e);
                report.add(FileResult {
                    path: input_path.clone(),
                    error: Some(e.to_string()),
                });
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done!");
    report.print_summary();

    Ok(())
}
