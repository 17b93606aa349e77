//! Display sink for operator-facing text.

use std::io::Write;

/// One-way sink for formatted command output.
pub trait Display: Send + Sync {
    /// Show one block of text.
    fn display_text(&self, text: &str);

    /// End the input loop of the UI.
    fn quit(&self);
}

/// Writes every block to stdout.
#[derive(Debug, Default)]
pub struct ConsoleDisplay;

impl Display for ConsoleDisplay {
    fn display_text(&self, text: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = writeln!(out, "{}", text).and_then(|_| out.flush()) {
            tracing::warn!("Failed to write to display: {}", e);
        }
    }

    fn quit(&self) {
        let _ = std::io::stdout().flush();
        tracing::info!("Display closed");
    }
}
