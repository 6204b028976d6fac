//! Scroll container geometry as seen by the header compositor

use crate::layout::{Insets, Rect};

/// Axis along which the list scrolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    pub fn is_vertical(&self) -> bool {
        matches!(self, Orientation::Vertical)
    }
}

/// Size, padding, and clipping behavior of the scroll container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
    pub padding: Insets,
    /// Whether children are clipped to the padded content area
    pub clip_to_padding: bool,
    pub orientation: Orientation,
}

impl Viewport {
    /// Vertical viewport with no padding that clips to padding
    pub fn new(width: i32, height: i32) -> Self {
        Viewport {
            width,
            height,
            padding: Insets::ZERO,
            clip_to_padding: true,
            orientation: Orientation::Vertical,
        }
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_clip_to_padding(mut self, clip: bool) -> Self {
        self.clip_to_padding = clip;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Full bounds of the container
    pub fn bounds(&self) -> Rect {
        Rect::fullscreen(self.width, self.height)
    }

    /// Bounds minus padding
    pub fn content_bounds(&self) -> Rect {
        self.bounds().inset(self.padding)
    }
}
