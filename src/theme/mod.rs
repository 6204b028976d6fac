//! Theming - shadow resources and surface colors for sticky headers

mod color;

pub use color::Color;

use crate::gradient::{GradientStop, LinearGradient, TileMode};

/// Shadow cast by the topmost sticky header onto the content below it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowStyle {
    /// Color at the top of the shadow, just inside the header's bottom edge
    pub start_color: Color,
    /// Color where the shadow fades out
    pub end_color: Color,
    /// How far the shadow starts above the header's bottom edge, in pixels
    pub inset: i32,
    /// Optional position (0..1) up to which the start color is held before
    /// fading; `None` fades across the whole span
    pub midpoint: Option<f32>,
}

impl ShadowStyle {
    pub const fn new(start_color: Color, end_color: Color, inset: i32) -> Self {
        ShadowStyle {
            start_color,
            end_color,
            inset,
            midpoint: None,
        }
    }

    /// Hold the start color until `midpoint`, then fade
    pub fn with_midpoint(mut self, midpoint: f32) -> Self {
        self.midpoint = Some(midpoint.clamp(0.0, 1.0));
        self
    }

    /// Vertical, clamped gradient spanning `y0..y1`
    pub fn gradient(&self, y0: f32, y1: f32) -> LinearGradient {
        let stops = match self.midpoint {
            Some(mid) => vec![
                GradientStop::new(0.0, self.start_color),
                GradientStop::new(mid, self.start_color),
                GradientStop::new(1.0, self.end_color),
            ],
            None => vec![
                GradientStop::new(0.0, self.start_color),
                GradientStop::new(1.0, self.end_color),
            ],
        };

        LinearGradient::vertical(y0, y1, stops, TileMode::Clamp)
    }
}

impl Default for ShadowStyle {
    fn default() -> Self {
        ShadowStyle::new(Color::from_argb(0x2900_0000), Color::transparent(), 1)
    }
}

/// Theme defining the colors and shadow used when compositing headers
#[derive(Debug, Clone)]
pub struct Theme {
    pub shadow: ShadowStyle,

    pub header_bg: Color,
    pub header_accent: Color,

    pub background: Color,
    pub surface: Color,
    pub surface_alt: Color,
    pub divider: Color,
}

impl Theme {
    /// Create a theme with default colors
    pub fn new() -> Self {
        Theme {
            shadow: ShadowStyle::default(),

            header_bg: Color::dark_purple(),
            header_accent: Color::rgb(100, 150, 255),

            background: Color::rgb(20, 20, 25),
            surface: Color::rgb(245, 245, 248),
            surface_alt: Color::rgb(232, 232, 238),
            divider: Color::light_gray(),
        }
    }

    /// Override the shadow colors
    pub fn with_shadow_colors(mut self, start: Color, end: Color) -> Self {
        self.shadow.start_color = start;
        self.shadow.end_color = end;
        self
    }

    /// Override the shadow inset
    pub fn with_shadow_inset(mut self, inset: i32) -> Self {
        self.shadow.inset = inset;
        self
    }

    /// Replace the whole shadow style
    pub fn with_shadow(mut self, shadow: ShadowStyle) -> Self {
        self.shadow = shadow;
        self
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}
