//! Kitty graphics protocol preview backend

use super::{CellArea, TerminalPreview};
use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};

/// Fixed image id, so each frame replaces the previous one
pub(super) const IMAGE_ID: u32 = 1;

/// Maximum payload per escape sequence
const CHUNK_SIZE: usize = 4096;

impl TerminalPreview {
    /// Transmit the frame as PNG and place it at the area's top-left cell
    pub(super) fn render_kitty<W: Write>(
        &mut self,
        writer: &mut W,
        frame: &RgbaImage,
        area: CellArea,
    ) -> Result<()> {
        let mut png_data = Vec::new();
        frame
            .write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)
            .context("Failed to encode preview frame")?;
        let encoded = encode_base64(&png_data);

        self.escape_buffer.clear();
        write!(
            self.escape_buffer,
            "a=T,f=100,t=d,i={},c={},r={},C=1,q=2",
            IMAGE_ID, area.cols, area.rows
        )
        .ok();

        write!(writer, "\x1b[{};{}H", area.row + 1, area.col + 1)?;

        let total_chunks = encoded.len().div_ceil(CHUNK_SIZE);
        for (i, chunk) in encoded.as_bytes().chunks(CHUNK_SIZE).enumerate() {
            let m = if i + 1 == total_chunks { 0 } else { 1 };

            self.line_buffer.clear();
            if i == 0 {
                write!(self.line_buffer, "\x1b_G{},m={};", self.escape_buffer, m).ok();
            } else {
                write!(self.line_buffer, "\x1b_Gm={};", m).ok();
            }

            // base64 output is ASCII
            self.line_buffer.push_str(std::str::from_utf8(chunk)?);
            self.line_buffer.push_str("\x1b\\");

            writer.write_all(self.line_buffer.as_bytes())?;
        }

        Ok(())
    }
}

/// Encode raw bytes to base64 with pre-sized buffer
fn encode_base64(data: &[u8]) -> String {
    let mut encoded = String::with_capacity(data.len() * 4 / 3 + 4);
    base64::Engine::encode_string(
        &base64::engine::general_purpose::STANDARD,
        data,
        &mut encoded,
    );
    encoded
}
