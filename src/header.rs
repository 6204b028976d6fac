//! Header views - the content painted by the compositor

use crate::canvas::{Canvas, Paint};
use crate::layout::{Insets, Rect};
use crate::theme::Color;
use anyhow::Result;
use image::RgbaImage;

/// An already measured and positioned header
///
/// Bounds are in the header's own coordinate space, the space the canvas is
/// in once the compositor has applied the scroll offset.
pub trait HeaderView {
    /// Drawable bounds
    fn bounds(&self) -> Rect;

    /// Margins around the header
    fn margins(&self) -> Insets {
        Insets::ZERO
    }

    /// Paint the header content
    fn draw(&self, canvas: &mut dyn Canvas) -> Result<()>;
}

/// Header filled with a single color, with an optional accent strip along its bottom
#[derive(Debug, Clone, PartialEq)]
pub struct SolidHeader {
    bounds: Rect,
    margins: Insets,
    color: Color,
    accent: Option<(Color, i32)>,
}

impl SolidHeader {
    pub fn new(bounds: Rect, color: Color) -> Self {
        SolidHeader {
            bounds,
            margins: Insets::ZERO,
            color,
            accent: None,
        }
    }

    pub fn with_margins(mut self, margins: Insets) -> Self {
        self.margins = margins;
        self
    }

    /// Strip of `thickness` pixels painted along the bottom edge
    pub fn with_accent(mut self, color: Color, thickness: i32) -> Self {
        self.accent = Some((color, thickness));
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }
}

impl HeaderView for SolidHeader {
    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn margins(&self) -> Insets {
        self.margins
    }

    fn draw(&self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.fill_rect(self.bounds, &Paint::solid(self.color))?;

        if let Some((accent, thickness)) = self.accent {
            let b = self.bounds;
            let strip = Rect::new(b.left, b.bottom - thickness, b.right, b.bottom);
            canvas.fill_rect(strip, &Paint::solid(accent))?;
        }
        Ok(())
    }
}

/// Header showing a pre-rendered image
#[derive(Debug, Clone)]
pub struct ImageHeader {
    image: RgbaImage,
    left: i32,
    top: i32,
    margins: Insets,
}

impl ImageHeader {
    /// Header at the origin, sized to the image
    pub fn new(image: RgbaImage) -> Self {
        ImageHeader {
            image,
            left: 0,
            top: 0,
            margins: Insets::ZERO,
        }
    }

    /// Decode a header from encoded image bytes (PNG, JPEG, ...)
    pub fn from_encoded(data: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(data)?;
        Ok(ImageHeader::new(img.to_rgba8()))
    }

    pub fn at(mut self, left: i32, top: i32) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn with_margins(mut self, margins: Insets) -> Self {
        self.margins = margins;
        self
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

impl HeaderView for ImageHeader {
    fn bounds(&self) -> Rect {
        let (w, h) = self.image.dimensions();
        Rect::from_xywh(self.left, self.top, w as i32, h as i32)
    }

    fn margins(&self) -> Insets {
        self.margins
    }

    fn draw(&self, canvas: &mut dyn Canvas) -> Result<()> {
        canvas.draw_image(self.left, self.top, &self.image)
    }
}
