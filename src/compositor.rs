//! Header compositor - clips, offsets, shadows, and paints a sticky header
//!
//! Each draw call runs one save → clip → translate → (shadow) → paint →
//! restore sequence against the canvas. The clip rectangle and shadow
//! geometry are computed into locals on every call, so a compositor can be
//! shared freely between lists and threads.

use crate::canvas::{Canvas, Paint, SaveGuard};
use crate::gradient::LinearGradient;
use crate::header::HeaderView;
use crate::layout::{Insets, Offset, Rect};
use crate::theme::{ShadowStyle, Theme};
use crate::viewport::{Orientation, Viewport};
use anyhow::Result;
use tracing::trace;

/// Clip that keeps a header inside the viewport's padded content area
///
/// The header's trailing margin (right when scrolling vertically, bottom when
/// scrolling horizontally) is taken off the far edge so the header looks
/// flush against it. The header itself is not resized to match, so a header
/// wider (or taller) than the clip is cut off rather than laid out smaller.
pub fn compute_clip_rect(viewport: &Viewport, margins: Insets) -> Rect {
    let pad = viewport.padding;

    match viewport.orientation {
        Orientation::Vertical => Rect::new(
            pad.left,
            pad.top,
            viewport
                .width
                .saturating_sub(pad.right)
                .saturating_sub(margins.right),
            viewport.height.saturating_sub(pad.bottom),
        ),
        Orientation::Horizontal => Rect::new(
            pad.left,
            pad.top,
            viewport.width.saturating_sub(pad.right),
            viewport
                .height
                .saturating_sub(pad.bottom)
                .saturating_sub(margins.bottom),
        ),
    }
}

/// Whether a header with these clip bounds is the topmost one
///
/// `clip_bounds` must be the canvas clip after the header offset has been
/// applied. Only a header whose clip starts exactly at the local origin sits
/// flush with the top of the visible content with nothing stacked above it.
pub fn shadow_applies(clip_bounds: Rect) -> bool {
    clip_bounds.top == 0 && clip_bounds.left == 0
}

/// Rectangle and gradient of the shadow below a header
///
/// Spans the header's full width, from `inset` pixels above its bottom edge
/// to `thickness` pixels below it.
pub fn shadow_geometry(
    header: Rect,
    shadow: &ShadowStyle,
    thickness: i32,
) -> (Rect, LinearGradient) {
    let top = header.bottom.saturating_sub(shadow.inset);
    let bottom = header.bottom.saturating_add(thickness);

    let rect = Rect::new(header.left, top, header.right, bottom);
    let gradient = shadow.gradient(top as f32, bottom as f32);
    (rect, gradient)
}

/// Paints sticky headers over a scrolling list
#[derive(Debug, Clone, Default)]
pub struct HeaderCompositor {
    shadow: ShadowStyle,
}

impl HeaderCompositor {
    /// Compositor using the theme's shadow resources
    pub fn new(theme: &Theme) -> Self {
        HeaderCompositor {
            shadow: theme.shadow,
        }
    }

    pub fn with_shadow(shadow: ShadowStyle) -> Self {
        HeaderCompositor { shadow }
    }

    pub fn shadow_style(&self) -> &ShadowStyle {
        &self.shadow
    }

    /// Paint `header` translated by `offset`
    ///
    /// When the viewport clips to its padding, painting is confined to the
    /// content area. The canvas state is restored before returning, including
    /// when painting the header fails.
    pub fn render_header(
        &self,
        viewport: &Viewport,
        canvas: &mut dyn Canvas,
        header: &dyn HeaderView,
        offset: Offset,
    ) -> Result<()> {
        let mut canvas = SaveGuard::new(canvas);
        apply_clip_and_offset(viewport, &mut *canvas, header, offset);

        header.draw(&mut *canvas)
    }

    /// Paint `header` translated by `offset`, with a shadow below it when it
    /// is the topmost header
    pub fn render_header_with_shadow(
        &self,
        viewport: &Viewport,
        canvas: &mut dyn Canvas,
        header: &dyn HeaderView,
        offset: Offset,
        shadow_thickness: i32,
    ) -> Result<()> {
        let mut canvas = SaveGuard::new(canvas);
        apply_clip_and_offset(viewport, &mut *canvas, header, offset);

        let clip = canvas.clip_bounds();
        if shadow_applies(clip) {
            let (rect, gradient) = shadow_geometry(header.bounds(), &self.shadow, shadow_thickness);
            trace!(?rect, shadow_thickness, "painting header shadow");

            let paint = Paint::gradient(gradient).with_anti_alias(false);
            canvas.fill_rect(rect, &paint)?;
        } else {
            trace!(?clip, "header not at top, skipping shadow");
        }

        header.draw(&mut *canvas)
    }
}

fn apply_clip_and_offset(
    viewport: &Viewport,
    canvas: &mut dyn Canvas,
    header: &dyn HeaderView,
    offset: Offset,
) {
    if viewport.clip_to_padding {
        let clip = compute_clip_rect(viewport, header.margins());
        trace!(?clip, "clipping header to padding");
        canvas.clip_rect(clip);
    }

    canvas.translate(offset.x, offset.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::{DrawOp, RecordingCanvas, Shader};
    use crate::header::SolidHeader;
    use crate::theme::Color;
    use proptest::prelude::*;

    fn header() -> SolidHeader {
        SolidHeader::new(Rect::new(0, 0, 300, 50), Color::dark_purple())
    }

    fn shadow() -> ShadowStyle {
        ShadowStyle::new(Color::rgba(0, 0, 0, 0x29), Color::transparent(), 1)
    }

    /// Header whose paint step always fails
    struct BrokenHeader;

    impl HeaderView for BrokenHeader {
        fn bounds(&self) -> Rect {
            Rect::new(0, 0, 100, 20)
        }

        fn draw(&self, canvas: &mut dyn Canvas) -> Result<()> {
            canvas.fill_rect(self.bounds(), &Paint::solid(Color::black()))?;
            anyhow::bail!("header content unavailable")
        }
    }

    fn is_gradient(op: &DrawOp) -> bool {
        matches!(
            op,
            DrawOp::FillRect {
                paint: Paint {
                    shader: Shader::LinearGradient(_),
                    ..
                },
                ..
            }
        )
    }

    #[test]
    fn test_clip_rect_vertical() {
        let vp = Viewport::new(300, 500).with_padding(Insets::new(10, 20, 30, 40));
        let clip = compute_clip_rect(&vp, Insets::new(1, 2, 5, 7));
        assert_eq!(clip, Rect::new(10, 20, 265, 460));
    }

    #[test]
    fn test_clip_rect_horizontal() {
        let vp = Viewport::new(300, 500)
            .with_padding(Insets::new(10, 20, 30, 40))
            .with_orientation(Orientation::Horizontal);
        let clip = compute_clip_rect(&vp, Insets::new(1, 2, 5, 7));
        assert_eq!(clip, Rect::new(10, 20, 270, 453));
    }

    #[test]
    fn test_clip_does_not_resize_header() {
        // The trailing margin narrows the clip; the header keeps its full width.
        let vp = Viewport::new(300, 500);
        let header = header().with_margins(Insets::new(0, 0, 12, 0));

        let mut canvas = RecordingCanvas::new(300, 500);
        HeaderCompositor::with_shadow(shadow())
            .render_header(&vp, &mut canvas, &header, Offset::ZERO)
            .unwrap();

        let op = &canvas.ops()[0];
        assert_eq!(op.rect(), Rect::new(0, 0, 300, 50));
        assert_eq!(op.visible_rect(), Rect::new(0, 0, 288, 50));
    }

    #[test]
    fn test_render_header_translates_and_restores() {
        let vp = Viewport::new(300, 500).with_padding(Insets::new(0, 8, 0, 0));
        let mut canvas = RecordingCanvas::new(300, 500);

        HeaderCompositor::default()
            .render_header(&vp, &mut canvas, &header(), Offset::new(0, 30))
            .unwrap();

        let op = &canvas.ops()[0];
        assert_eq!(op.rect(), Rect::new(0, 30, 300, 80));
        assert_eq!(op.clip(), Rect::new(0, 8, 300, 500));

        assert_eq!(canvas.save_count(), 0);
        assert_eq!(canvas.translation(), Offset::ZERO);
        assert_eq!(canvas.clip_bounds(), Rect::new(0, 0, 300, 500));
    }

    #[test]
    fn test_shadow_painted_when_flush_top_left() {
        // 300x500, no padding, clip to padding, header (0,0,300,50), offset (0,0)
        let vp = Viewport::new(300, 500);
        let mut canvas = RecordingCanvas::new(300, 500);

        HeaderCompositor::with_shadow(shadow())
            .render_header_with_shadow(&vp, &mut canvas, &header(), Offset::ZERO, 8)
            .unwrap();

        let ops = canvas.ops();
        assert_eq!(ops.len(), 2);
        assert!(is_gradient(&ops[0]));
        assert_eq!(ops[0].rect(), Rect::new(0, 49, 300, 58));
        assert_eq!(ops[0].clip(), Rect::new(0, 0, 300, 500));
        match &ops[0] {
            DrawOp::FillRect { paint, .. } => assert!(!paint.anti_alias),
            other => panic!("unexpected op {other:?}"),
        }

        // header painted afterwards, untranslated
        assert_eq!(ops[1].rect(), Rect::new(0, 0, 300, 50));
        assert_eq!(canvas.save_count(), 0);
    }

    #[test]
    fn test_shadow_uses_translated_clip_bounds() {
        // Same scene scrolled by 40: the clip now starts at -40 locally.
        let vp = Viewport::new(300, 500);
        let mut canvas = RecordingCanvas::new(300, 500);

        HeaderCompositor::with_shadow(shadow())
            .render_header_with_shadow(&vp, &mut canvas, &header(), Offset::new(0, 40), 8)
            .unwrap();

        let ops = canvas.ops();
        assert_eq!(ops.len(), 1);
        assert!(!is_gradient(&ops[0]));
        assert_eq!(ops[0].rect(), Rect::new(0, 40, 300, 90));
    }

    #[test]
    fn test_padding_suppresses_shadow() {
        let vp = Viewport::new(300, 500).with_padding(Insets::new(0, 4, 0, 0));
        let mut canvas = RecordingCanvas::new(300, 500);

        HeaderCompositor::with_shadow(shadow())
            .render_header_with_shadow(&vp, &mut canvas, &header(), Offset::ZERO, 8)
            .unwrap();

        assert!(!canvas.ops().iter().any(is_gradient));
    }

    #[test]
    fn test_shadow_without_clip_to_padding() {
        // Without clipping the whole surface is the clip, so the origin test passes
        let vp = Viewport::new(300, 500)
            .with_padding(Insets::new(0, 4, 0, 0))
            .with_clip_to_padding(false);
        let mut canvas = RecordingCanvas::new(300, 500);

        HeaderCompositor::with_shadow(shadow())
            .render_header_with_shadow(&vp, &mut canvas, &header(), Offset::ZERO, 8)
            .unwrap();

        assert!(is_gradient(&canvas.ops()[0]));
    }

    #[test]
    fn test_shadow_geometry_gradient_clamps() {
        let header = Rect::new(0, 0, 200, 100);
        let style = ShadowStyle {
            inset: 10,
            ..shadow()
        };
        let (rect, gradient) = shadow_geometry(header, &style, 20);

        // from `inset` above the bottom edge to `thickness` below it
        assert_eq!(rect, Rect::new(0, 90, 200, 120));
        assert_eq!(gradient.start(), (0.0, 90.0));
        assert_eq!(gradient.end(), (0.0, 120.0));
        assert_eq!(gradient.color_at(0.0, 80.0), style.start_color);
        assert_eq!(gradient.color_at(0.0, 140.0), style.end_color);
    }

    #[test]
    fn test_collapsed_clip_shadow_ignores_offset() {
        // padding wider than the viewport leaves no clip area at all
        let vp = Viewport::new(300, 500).with_padding(Insets::new(400, 0, 0, 0));
        let compositor = HeaderCompositor::with_shadow(shadow());

        for offset in [Offset::ZERO, Offset::new(5, 0), Offset::new(0, -30)] {
            let mut canvas = RecordingCanvas::new(300, 500);
            compositor
                .render_header_with_shadow(&vp, &mut canvas, &header(), offset, 8)
                .unwrap();

            let ops = canvas.ops();
            assert_eq!(ops.len(), 2, "offset {offset:?}");
            assert!(is_gradient(&ops[0]));
            assert!(ops.iter().all(|op| op.visible_rect().is_empty()));
        }
    }

    #[test]
    fn test_extreme_inputs_saturate() {
        let vp = Viewport::new(i32::MIN + 1, i32::MIN + 1)
            .with_padding(Insets::new(0, 0, i32::MAX, i32::MAX));
        let clip = compute_clip_rect(&vp, Insets::new(0, 0, i32::MAX, i32::MAX));
        assert_eq!(clip.right, i32::MIN);
        assert_eq!(clip.bottom, i32::MIN);

        let style = ShadowStyle {
            inset: i32::MAX,
            ..shadow()
        };
        let (rect, _) = shadow_geometry(Rect::new(0, 0, 10, i32::MAX - 1), &style, i32::MAX);
        assert_eq!(rect.top, -1);
        assert_eq!(rect.bottom, i32::MAX);
    }

    #[test]
    fn test_compositor_uses_theme_shadow() {
        let theme = Theme::new().with_shadow_inset(6);
        let compositor = HeaderCompositor::new(&theme);
        assert_eq!(compositor.shadow_style().inset, 6);
    }

    #[test]
    fn test_restores_state_when_header_fails() {
        let vp = Viewport::new(300, 500).with_padding(Insets::uniform(5));
        let mut canvas = RecordingCanvas::new(300, 500);
        canvas.translate(3, 3);

        let compositor = HeaderCompositor::with_shadow(shadow());
        let err = compositor
            .render_header(&vp, &mut canvas, &BrokenHeader, Offset::new(0, 12))
            .unwrap_err();
        assert!(err.to_string().contains("unavailable"));

        let err = compositor
            .render_header_with_shadow(&vp, &mut canvas, &BrokenHeader, Offset::ZERO, 4)
            .unwrap_err();
        assert!(err.to_string().contains("unavailable"));

        assert_eq!(canvas.save_count(), 0);
        assert_eq!(canvas.translation(), Offset::new(3, 3));
        assert_eq!(canvas.device_clip(), Rect::new(0, 0, 300, 500));
    }

    #[cfg(feature = "raster")]
    #[test]
    fn test_raster_shadow_pixels() {
        use crate::canvas::RasterCanvas;

        let vp = Viewport::new(100, 120);
        let mut canvas = RasterCanvas::new(100, 120).unwrap();
        let header = SolidHeader::new(Rect::new(0, 0, 100, 20), Color::rgb(200, 30, 30));

        HeaderCompositor::with_shadow(ShadowStyle::new(
            Color::rgba(0, 0, 0, 200),
            Color::transparent(),
            1,
        ))
        .render_header_with_shadow(&vp, &mut canvas, &header, Offset::ZERO, 10)
        .unwrap();

        // header covers the inset row of the shadow
        assert_eq!(canvas.pixel(50, 19), Some(Color::rgb(200, 30, 30)));
        let shade = canvas.pixel(50, 22).unwrap();
        assert!(shade.a > 0 && shade.a < 200, "alpha {}", shade.a);
        // nothing past the shadow
        assert_eq!(canvas.pixel(50, 40).map(|c| c.a), Some(0));
    }

    fn arb_viewport() -> impl Strategy<Value = Viewport> {
        (
            1i32..2000,
            1i32..2000,
            (0i32..200, 0i32..200, 0i32..200, 0i32..200),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(w, h, (l, t, r, b), clip, vertical)| {
                Viewport::new(w, h)
                    .with_padding(Insets::new(l, t, r, b))
                    .with_clip_to_padding(clip)
                    .with_orientation(if vertical {
                        Orientation::Vertical
                    } else {
                        Orientation::Horizontal
                    })
            })
    }

    fn arb_margins() -> impl Strategy<Value = Insets> {
        (0i32..100, 0i32..100, 0i32..100, 0i32..100)
            .prop_map(|(l, t, r, b)| Insets::new(l, t, r, b))
    }

    proptest! {
        #[test]
        fn prop_no_clip_without_clip_to_padding(
            vp in arb_viewport(),
            margins in arb_margins(),
            dx in -300i32..300,
            dy in -300i32..300,
        ) {
            let vp = vp.with_clip_to_padding(false);
            let header = header().with_margins(margins);
            let mut canvas = RecordingCanvas::new(vp.width, vp.height);

            HeaderCompositor::default()
                .render_header(&vp, &mut canvas, &header, Offset::new(dx, dy))
                .unwrap();

            prop_assert_eq!(canvas.ops()[0].clip(), vp.bounds());
        }

        #[test]
        fn prop_vertical_clip_uses_right_margin_only(
            vp in arb_viewport(),
            margins in arb_margins(),
            other_bottom in 0i32..100,
        ) {
            let vp = vp.with_orientation(Orientation::Vertical);
            let clip = compute_clip_rect(&vp, margins);
            let varied = compute_clip_rect(&vp, Insets { bottom: other_bottom, ..margins });

            prop_assert_eq!(clip.right, vp.width - vp.padding.right - margins.right);
            prop_assert_eq!(clip.bottom, vp.height - vp.padding.bottom);
            prop_assert_eq!(clip, varied);
        }

        #[test]
        fn prop_horizontal_clip_uses_bottom_margin_only(
            vp in arb_viewport(),
            margins in arb_margins(),
            other_right in 0i32..100,
        ) {
            let vp = vp.with_orientation(Orientation::Horizontal);
            let clip = compute_clip_rect(&vp, margins);
            let varied = compute_clip_rect(&vp, Insets { right: other_right, ..margins });

            prop_assert_eq!(clip.bottom, vp.height - vp.padding.bottom - margins.bottom);
            prop_assert_eq!(clip.right, vp.width - vp.padding.right);
            prop_assert_eq!(clip, varied);
        }

        #[test]
        fn prop_render_is_idempotent_on_canvas_state(
            vp in arb_viewport(),
            margins in arb_margins(),
            dx in -300i32..300,
            dy in -300i32..300,
            thickness in 0i32..32,
        ) {
            let header = header().with_margins(margins);
            let compositor = HeaderCompositor::with_shadow(shadow());
            let mut canvas = RecordingCanvas::new(vp.width, vp.height);
            let before = (canvas.save_count(), canvas.translation(), canvas.clip_bounds());

            for _ in 0..2 {
                compositor
                    .render_header(&vp, &mut canvas, &header, Offset::new(dx, dy))
                    .unwrap();
                compositor
                    .render_header_with_shadow(
                        &vp,
                        &mut canvas,
                        &header,
                        Offset::new(dx, dy),
                        thickness,
                    )
                    .unwrap();

                let after = (canvas.save_count(), canvas.translation(), canvas.clip_bounds());
                prop_assert_eq!(after, before);
            }
        }

        #[test]
        fn prop_shadow_iff_clip_origin_is_zero(
            vp in arb_viewport(),
            dx in -50i32..50,
            dy in -50i32..50,
        ) {
            let mut canvas = RecordingCanvas::new(vp.width, vp.height);

            HeaderCompositor::with_shadow(shadow())
                .render_header_with_shadow(&vp, &mut canvas, &header(), Offset::new(dx, dy), 8)
                .unwrap();

            // recompute the local clip the compositor saw
            let mut device_clip = vp.bounds();
            if vp.clip_to_padding {
                device_clip = device_clip.intersect(&compute_clip_rect(&vp, Insets::ZERO));
            }
            let local_clip = if device_clip.is_empty() {
                Rect::default()
            } else {
                device_clip.translate(-dx, -dy)
            };

            let painted = canvas.ops().iter().any(is_gradient);
            prop_assert_eq!(painted, shadow_applies(local_clip));
            prop_assert_eq!(painted, local_clip.left == 0 && local_clip.top == 0);
        }
    }
}
