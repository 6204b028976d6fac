//! Canvas that records paint operations instead of rasterizing them

use super::{Canvas, Paint, StateStack};
use crate::layout::{Offset, Rect};
use anyhow::Result;
use image::RgbaImage;

/// A recorded paint operation, in device coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    FillRect {
        /// Requested rectangle, before clipping
        rect: Rect,
        /// Clip in effect when the fill was issued
        clip: Rect,
        /// Local-to-device translation in effect
        translation: Offset,
        paint: Paint,
    },
    DrawImage {
        /// Destination rectangle, before clipping
        rect: Rect,
        clip: Rect,
        translation: Offset,
    },
}

impl DrawOp {
    pub fn rect(&self) -> Rect {
        match self {
            DrawOp::FillRect { rect, .. } | DrawOp::DrawImage { rect, .. } => *rect,
        }
    }

    pub fn clip(&self) -> Rect {
        match self {
            DrawOp::FillRect { clip, .. } | DrawOp::DrawImage { clip, .. } => *clip,
        }
    }

    /// Part of the operation that can actually touch the surface
    pub fn visible_rect(&self) -> Rect {
        self.rect().intersect(&self.clip())
    }
}

/// Canvas that keeps a display list of everything painted into it
///
/// Useful for inspecting what a paint pass would do without a pixel buffer.
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    state: StateStack,
    ops: Vec<DrawOp>,
}

impl RecordingCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        RecordingCanvas {
            state: StateStack::new(width, height),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Take the recorded operations, leaving the list empty
    pub fn take_ops(&mut self) -> Vec<DrawOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Device-space clip currently in effect
    pub fn device_clip(&self) -> Rect {
        self.state.device_clip()
    }

    pub fn surface(&self) -> Rect {
        self.state.surface()
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) -> usize {
        self.state.save()
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn save_count(&self) -> usize {
        self.state.depth()
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.state.clip_rect(rect);
    }

    fn clip_bounds(&self) -> Rect {
        self.state.clip_bounds()
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.state.translate(dx, dy);
    }

    fn translation(&self) -> Offset {
        self.state.translation()
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<()> {
        self.ops.push(DrawOp::FillRect {
            rect: self.state.to_device(rect),
            clip: self.state.device_clip(),
            translation: self.state.translation(),
            paint: paint.clone(),
        });
        Ok(())
    }

    fn draw_image(&mut self, x: i32, y: i32, image: &RgbaImage) -> Result<()> {
        let (w, h) = image.dimensions();
        let rect = Rect::from_xywh(x, y, w as i32, h as i32);
        self.ops.push(DrawOp::DrawImage {
            rect: self.state.to_device(rect),
            clip: self.state.device_clip(),
            translation: self.state.translation(),
        });
        Ok(())
    }
}
