//! Terminal preview of rendered frames
//!
//! Shows a composited frame in the terminal, either through the Kitty
//! graphics protocol or as Unicode shade characters where images are not
//! supported.

mod blocks;
mod kitty;

use anyhow::Result;
use image::RgbaImage;
use std::io::Write;

/// Default capacity for line buffer in block rendering
const LINE_BUFFER_CAPACITY: usize = 512;

/// Default capacity for escape sequence building
const ESCAPE_BUFFER_CAPACITY: usize = 256;

/// Terminal image output method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphicsBackend {
    /// Kitty graphics protocol
    Kitty,
    /// Unicode block characters (universal fallback)
    Blocks,
}

impl GraphicsBackend {
    /// Detect the best available backend from the environment
    pub fn detect() -> Self {
        if Self::has_kitty() {
            GraphicsBackend::Kitty
        } else {
            GraphicsBackend::Blocks
        }
    }

    fn has_kitty() -> bool {
        std::env::var("KITTY_WINDOW_ID").is_ok()
            || std::env::var("TERM").unwrap_or_default().contains("kitty")
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            GraphicsBackend::Kitty => "Kitty Graphics",
            GraphicsBackend::Blocks => "Unicode Blocks",
        }
    }
}

/// Cell area a preview is placed in, 0-indexed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellArea {
    pub col: u16,
    pub row: u16,
    pub cols: u16,
    pub rows: u16,
}

impl CellArea {
    pub fn new(col: u16, row: u16, cols: u16, rows: u16) -> Self {
        CellArea {
            col,
            row,
            cols,
            rows,
        }
    }
}

/// Writes frames to a terminal using the selected backend
///
/// Reuses its buffers between frames.
pub struct TerminalPreview {
    backend: GraphicsBackend,
    line_buffer: String,
    escape_buffer: String,
}

impl TerminalPreview {
    pub fn new(backend: GraphicsBackend) -> Self {
        TerminalPreview {
            backend,
            line_buffer: String::with_capacity(LINE_BUFFER_CAPACITY),
            escape_buffer: String::with_capacity(ESCAPE_BUFFER_CAPACITY),
        }
    }

    /// Preview using the detected backend
    pub fn detect() -> Self {
        TerminalPreview::new(GraphicsBackend::detect())
    }

    pub fn backend(&self) -> GraphicsBackend {
        self.backend
    }

    /// Write `frame` scaled into `area`
    pub fn show<W: Write>(
        &mut self,
        writer: &mut W,
        frame: &RgbaImage,
        area: CellArea,
    ) -> Result<()> {
        if area.cols == 0 || area.rows == 0 {
            return Ok(());
        }

        match self.backend {
            GraphicsBackend::Kitty => self.render_kitty(writer, frame, area),
            GraphicsBackend::Blocks => self.render_blocks(writer, frame, area),
        }
    }

    /// Remove previously shown Kitty images; no-op for other backends
    pub fn clear<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        if self.backend == GraphicsBackend::Kitty {
            write!(writer, "\x1b_Ga=d,d=I,i={},q=2\x1b\\", kitty::IMAGE_ID)?;
        }
        Ok(())
    }
}
