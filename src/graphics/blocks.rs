//! Unicode block character preview backend (universal fallback)

use super::{CellArea, TerminalPreview};
use crate::theme::Color;
use anyhow::Result;
use image::RgbaImage;
use std::io::Write;

const BLOCKS: [char; 8] = [' ', '░', '░', '▒', '▒', '▓', '▓', '█'];

impl TerminalPreview {
    /// Approximate the frame with shade characters, one sample per cell
    ///
    /// Lines are built in a reused buffer and written once each.
    pub(super) fn render_blocks<W: Write>(
        &mut self,
        writer: &mut W,
        frame: &RgbaImage,
        area: CellArea,
    ) -> Result<()> {
        let (width, height) = frame.dimensions();
        if width == 0 || height == 0 {
            return Ok(());
        }

        for cy in 0..area.rows as u32 {
            self.line_buffer.clear();

            for cx in 0..area.cols as u32 {
                let px = cx * width / area.cols as u32;
                let py = cy * height / area.rows as u32;
                let color = Color::from(*frame.get_pixel(px, py));
                self.line_buffer.push(shade(color));
            }

            write!(
                writer,
                "\x1b[{};{}H{}",
                area.row as u32 + cy + 1,
                area.col + 1,
                self.line_buffer
            )?;
        }

        Ok(())
    }
}

fn shade(color: Color) -> char {
    BLOCKS[(color.luminance() / 32).min(7) as usize]
}
