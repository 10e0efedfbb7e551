//! Best-effort clipboard access.

use std::io::{self, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, warn};

/// Something that can take text for the system clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> io::Result<()>;
}

/// Many terminals drop OSC 52 payloads beyond roughly this size.
const OSC52_MAX_ENCODED: usize = 100_000;

/// Clipboard that asks the terminal to store the text via an OSC 52 escape
/// sequence. Works over SSH and inside most multiplexers.
pub struct Osc52Clipboard<W> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl Osc52Clipboard<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let encoded = STANDARD.encode(text);
        if encoded.len() > OSC52_MAX_ENCODED {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} bytes is too large for OSC 52", text.len()),
            ));
        }
        write!(self.out, "\x1b]52;c;{encoded}\x07")?;
        self.out.flush()
    }
}

/// Copy `text`, logging instead of failing. Returns whether the copy worked.
pub fn copy_text(clipboard: &mut dyn Clipboard, text: &str) -> bool {
    match clipboard.write_text(text) {
        Ok(()) => {
            debug!(chars = text.chars().count(), "Copied to clipboard");
            true
        }
        Err(e) => {
            warn!(error = %e, "Copy to clipboard failed");
            false
        }
    }
}
