//! Pixel canvas backed by tiny-skia

use super::{Canvas, Paint, Shader, StateStack};
use crate::gradient::{LinearGradient, TileMode};
use crate::layout::{Offset, Rect};
use crate::theme::Color;
use anyhow::{anyhow, Context, Result};
use image::{ImageBuffer, ImageFormat, RgbaImage};
use std::io::Cursor;
use tiny_skia::{
    ColorU8, FillRule, GradientStop, IntSize, Mask, PathBuilder, Pixmap, PixmapPaint, Point,
    SpreadMode, Transform,
};
use tracing::debug;

/// Canvas that rasterizes into an RGBA pixel buffer
///
/// Pixels start fully transparent. Fills and image draws are limited to the
/// current clip; the translation is applied as a device transform so
/// gradients stay anchored to the local coordinates they were built in.
pub struct RasterCanvas {
    pixmap: Pixmap,
    state: StateStack,
}

impl RasterCanvas {
    /// Allocate a transparent surface
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| anyhow!("Invalid canvas dimensions {}x{}", width, height))?;

        Ok(RasterCanvas {
            pixmap,
            state: StateStack::new(width as i32, height as i32),
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Fill the whole surface, ignoring clip and translation
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(to_skia_color(color));
    }

    /// Read back a pixel with straight alpha
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let px = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(px.red(), px.green(), px.blue(), px.alpha()))
    }

    /// Copy the surface into an `image` buffer with straight alpha
    pub fn to_rgba_image(&self) -> RgbaImage {
        let width = self.pixmap.width();
        let pixels = self.pixmap.pixels();

        ImageBuffer::from_fn(width, self.pixmap.height(), |x, y| {
            let px = pixels[(y * width + x) as usize].demultiply();
            image::Rgba([px.red(), px.green(), px.blue(), px.alpha()])
        })
    }

    /// Encode the surface as PNG
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let img = self.to_rgba_image();
        let mut png_data = Vec::new();
        img.write_to(&mut Cursor::new(&mut png_data), ImageFormat::Png)
            .context("Failed to encode canvas as PNG")?;
        Ok(png_data)
    }

    fn device_transform(&self) -> Transform {
        let t = self.state.translation();
        Transform::from_translate(t.x as f32, t.y as f32)
    }

    /// Mask for the current clip, or `None` when the clip covers the surface
    fn clip_mask(&self) -> Option<Mask> {
        let clip = self.state.device_clip();
        if clip.contains_rect(&self.state.surface()) {
            return None;
        }

        let mut mask = Mask::new(self.pixmap.width(), self.pixmap.height())?;
        if let Some(rect) = to_skia_rect(clip) {
            let path = PathBuilder::from_rect(rect);
            mask.fill_path(&path, FillRule::Winding, false, Transform::identity());
        }
        Some(mask)
    }
}

impl Canvas for RasterCanvas {
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
        // Clip and translation are both integral, so clipping the rect itself
        // is exact and avoids building a mask
        let visible = rect.intersect(&self.state.clip_bounds());
        let Some(sk_rect) = to_skia_rect(visible) else {
            return Ok(());
        };

        let mut sk_paint = tiny_skia::Paint {
            anti_alias: paint.anti_alias,
            ..tiny_skia::Paint::default()
        };

        match &paint.shader {
            Shader::Solid(color) => sk_paint.set_color(to_skia_color(*color)),
            Shader::LinearGradient(gradient) => match to_skia_shader(gradient) {
                Some(shader) => sk_paint.shader = shader,
                None => {
                    debug!(?rect, "skipping fill with unrepresentable gradient");
                    return Ok(());
                }
            },
        }

        self.pixmap
            .fill_rect(sk_rect, &sk_paint, self.device_transform(), None);
        Ok(())
    }

    fn draw_image(&mut self, x: i32, y: i32, image: &RgbaImage) -> Result<()> {
        if self.state.device_clip().is_empty() {
            return Ok(());
        }

        let (w, h) = image.dimensions();
        let Some(size) = IntSize::from_wh(w, h) else {
            return Ok(());
        };

        let mut src = Pixmap::new(size.width(), size.height())
            .ok_or_else(|| anyhow!("Invalid image dimensions {}x{}", w, h))?;
        for (dst, px) in src.pixels_mut().iter_mut().zip(image.pixels()) {
            *dst = ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply();
        }

        let origin = self.state.translation().add(x, y);
        let mask = self.clip_mask();
        self.pixmap.draw_pixmap(
            origin.x,
            origin.y,
            src.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            mask.as_ref(),
        );
        Ok(())
    }
}

fn to_skia_color(c: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn to_skia_rect(r: Rect) -> Option<tiny_skia::Rect> {
    if r.is_empty() {
        return None;
    }
    tiny_skia::Rect::from_ltrb(r.left as f32, r.top as f32, r.right as f32, r.bottom as f32)
}

fn to_skia_shader(gradient: &LinearGradient) -> Option<tiny_skia::Shader<'static>> {
    let stops: Vec<GradientStop> = gradient
        .stops()
        .iter()
        .map(|s| GradientStop::new(s.position, to_skia_color(s.color)))
        .collect();

    match stops.len() {
        0 => return None,
        1 => return Some(tiny_skia::Shader::SolidColor(to_skia_color(gradient.stops()[0].color))),
        _ => {}
    }

    if gradient.is_degenerate() {
        let last = gradient.stops().last()?;
        return Some(tiny_skia::Shader::SolidColor(to_skia_color(last.color)));
    }

    let spread = match gradient.tile_mode() {
        TileMode::Clamp => SpreadMode::Pad,
        TileMode::Repeat => SpreadMode::Repeat,
        TileMode::Mirror => SpreadMode::Reflect,
    };

    let (x0, y0) = gradient.start();
    let (x1, y1) = gradient.end();
    tiny_skia::LinearGradient::new(
        Point::from_xy(x0, y0),
        Point::from_xy(x1, y1),
        stops,
        spread,
        Transform::identity(),
    )
}
