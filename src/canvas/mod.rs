//! Drawing surface abstraction
//!
//! The compositor only needs a small set of operations from whatever it is
//! painting into: a save/restore stack of transform and clip, rectangular
//! clipping, integer translation, rectangle fills, and image blits. Two
//! implementations ship with the crate:
//! - [`RecordingCanvas`] keeps a list of paint operations in device space
//! - [`RasterCanvas`] rasterizes into a pixel buffer (feature `raster`)

#[cfg(feature = "raster")]
mod raster;
mod recording;
mod state;

#[cfg(feature = "raster")]
pub use raster::RasterCanvas;
pub use recording::{DrawOp, RecordingCanvas};
pub use state::{CanvasState, StateStack};

use crate::gradient::LinearGradient;
use crate::layout::{Offset, Rect};
use crate::theme::Color;
use anyhow::Result;
use image::RgbaImage;
use std::ops::{Deref, DerefMut};

/// What a fill paints with
#[derive(Debug, Clone, PartialEq)]
pub enum Shader {
    Solid(Color),
    LinearGradient(LinearGradient),
}

/// Fill parameters for [`Canvas::fill_rect`]
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    pub shader: Shader,
    pub anti_alias: bool,
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Paint {
            shader: Shader::Solid(color),
            anti_alias: true,
        }
    }

    pub fn gradient(gradient: LinearGradient) -> Self {
        Paint {
            shader: Shader::LinearGradient(gradient),
            anti_alias: true,
        }
    }

    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }
}

/// Drawing surface with a save/restore stack of translation and clip
///
/// Coordinates passed to drawing and clipping calls are local: they are
/// shifted by the accumulated translation before reaching the surface.
pub trait Canvas {
    /// Push the current transform and clip; returns the depth before the push
    fn save(&mut self) -> usize;

    /// Pop the most recently saved state; no-op when nothing is saved
    fn restore(&mut self);

    /// Number of saved states on the stack
    fn save_count(&self) -> usize;

    /// Pop states until only `count` remain
    fn restore_to_count(&mut self, count: usize) {
        while self.save_count() > count {
            self.restore();
        }
    }

    /// Intersect the current clip with `rect`
    fn clip_rect(&mut self, rect: Rect);

    /// Current clip in local coordinates
    fn clip_bounds(&self) -> Rect;

    fn translate(&mut self, dx: i32, dy: i32);

    /// Accumulated translation from local to device coordinates
    fn translation(&self) -> Offset;

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) -> Result<()>;

    /// Draw an image with its top-left corner at `(x, y)`
    fn draw_image(&mut self, x: i32, y: i32, image: &RgbaImage) -> Result<()>;
}

/// Scoped save: saves on creation and restores to the same depth on drop
///
/// Dereferences to the wrapped canvas, so painting goes through the guard.
/// Restoration also happens when the scope is left through `?` or a panic.
pub struct SaveGuard<'a> {
    canvas: &'a mut dyn Canvas,
    count: usize,
}

impl<'a> SaveGuard<'a> {
    pub fn new(canvas: &'a mut dyn Canvas) -> Self {
        let count = canvas.save();
        SaveGuard { canvas, count }
    }

    /// Depth the canvas will be restored to
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<'a> Deref for SaveGuard<'a> {
    type Target = dyn Canvas + 'a;

    fn deref(&self) -> &Self::Target {
        &*self.canvas
    }
}

impl<'a> DerefMut for SaveGuard<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.canvas
    }
}

impl Drop for SaveGuard<'_> {
    fn drop(&mut self) {
        self.canvas.restore_to_count(self.count);
    }
}
