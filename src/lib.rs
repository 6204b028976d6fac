//! sticky-headers - compositing for sticky list headers
//!
//! Paints a header that stays pinned over a scrolling list:
//! - Clips the header to the list's padded content area
//! - Offsets it by the scroll-derived amount the caller supplies
//! - Casts a gradient shadow when it is the topmost header
//! - Restores the drawing surface exactly, even when painting fails
//!
//! The drawing surface is the [`Canvas`] trait; [`RecordingCanvas`] records
//! operations and [`RasterCanvas`] (feature `raster`) produces pixels.

pub mod canvas;
pub mod compositor;
pub mod gradient;
#[cfg(feature = "preview")]
pub mod graphics;
pub mod header;
pub mod layout;
pub mod theme;
pub mod viewport;

// Re-export commonly used types
#[cfg(feature = "raster")]
pub use canvas::RasterCanvas;
pub use canvas::{Canvas, DrawOp, Paint, RecordingCanvas, SaveGuard, Shader};
pub use compositor::{compute_clip_rect, shadow_applies, shadow_geometry, HeaderCompositor};
pub use gradient::{GradientStop, LinearGradient, TileMode};
#[cfg(feature = "preview")]
pub use graphics::{CellArea, GraphicsBackend, TerminalPreview};
pub use header::{HeaderView, ImageHeader, SolidHeader};
pub use layout::{Insets, Offset, Rect};
pub use theme::{Color, ShadowStyle, Theme};
pub use viewport::{Orientation, Viewport};
