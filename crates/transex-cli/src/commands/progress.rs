//! Progress reporting on stderr.

use transex_extractor::ProgressObserver;

/// Prints one line per finished document to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrProgress {
    enabled: bool,
}

impl StderrProgress {
    /// Create a reporter; a disabled one stays silent.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl ProgressObserver for StderrProgress {
    fn on_document_finished(&self, index: usize, total: usize, name: &str) {
        if self.enabled {
            eprintln!("[{}/{}] {}", index, total, name);
        }
    }
}
