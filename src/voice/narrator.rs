//! Speech output

use std::io::Write;

use tracing::debug;

/// Renders a reply to the guest. Fire-and-forget.
pub trait Narrator: Send {
    fn speak(&self, text: &str);
}

/// Writes each reply as a line on stdout
#[derive(Debug, Default)]
pub struct ConsoleNarrator;

impl Narrator for ConsoleNarrator {
    fn speak(&self, text: &str) {
        debug!(text, "speaking");
        let mut out = std::io::stdout().lock();
        // Output failures are not observable to the conversation
        let _ = writeln!(out, "{}", text);
        let _ = out.flush();
    }
}
