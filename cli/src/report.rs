use std::path::PathBuf;

/// Result of processing a single file.
pub struct FileResult {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Aggregate report for all processed files.
pub struct Report {
    pub results: Vec<FileResult>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    pub fn add(&mut self, result: FileResult) {
        self.results.push(result);
    }

    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_none()).count()
    }

    pub fn error_count(&self) -> usize {
        self.results.iter().filter(|r| r.error.is_some()).count()
    }

    pub fn print_summary(&self) {
        println!("\n--- Summary ---");
        println!(
            "Files processed: {} | Errors: {}",
            self.success_count(),
            self.error_count()
        );

        for r in &self.results {
            if let Some(ref err) = r.error {
                println!("  ERROR {}: {}", r.path.display(), err);
            }
        }
    }
}
