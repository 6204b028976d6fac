//! sticky-headers demo - scroll a sectioned list and write each frame as PNG
//!
//! Usage: cargo run --example sticky_list [output-dir]
//! With `--features preview` each frame is also shown in the terminal.

use anyhow::{Context, Result};
use std::path::PathBuf;
use sticky_headers::{
    Canvas, Color, HeaderCompositor, Insets, Offset, Paint, RasterCanvas, Rect, SolidHeader,
    Theme, Viewport,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const WIDTH: i32 = 240;
const HEIGHT: i32 = 320;
const HEADER_HEIGHT: i32 = 32;
const ROW_HEIGHT: i32 = 24;
const SHADOW_THICKNESS: i32 = 8;
const FRAMES: i32 = 24;
const SCROLL_STEP: i32 = 18;

struct Section {
    color: Color,
    rows: i32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("sticky-frames"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let theme = Theme::new()
        .with_shadow_colors(Color::rgba(0, 0, 0, 0x50), Color::transparent())
        .with_shadow_inset(2);
    let compositor = HeaderCompositor::new(&theme);
    let viewport = Viewport::new(WIDTH, HEIGHT);

    let sections = vec![
        Section {
            color: theme.header_bg,
            rows: 6,
        },
        Section {
            color: Color::rgb(40, 90, 140),
            rows: 3,
        },
        Section {
            color: Color::rgb(140, 60, 40),
            rows: 7,
        },
        Section {
            color: Color::rgb(30, 110, 70),
            rows: 5,
        },
        Section {
            color: Color::rgb(90, 90, 90),
            rows: 8,
        },
    ];
    let starts = section_starts(&sections);

    #[cfg(feature = "preview")]
    let mut preview = sticky_headers::TerminalPreview::detect();

    for frame in 0..FRAMES {
        let scroll = frame * SCROLL_STEP;

        let mut canvas = RasterCanvas::new(WIDTH as u32, HEIGHT as u32)?;
        canvas.clear(theme.background);
        draw_rows(&mut canvas, &sections, &starts, &theme, scroll)?;

        let (current, offset) = sticky_position(&starts, scroll);

        // Headers still scrolling with their section
        for (i, section) in sections.iter().enumerate() {
            let y = starts[i] - scroll;
            if i == current || y + HEADER_HEIGHT <= 0 || y >= HEIGHT {
                continue;
            }
            compositor.render_header(
                &viewport,
                &mut canvas,
                &section_header(section, &theme),
                Offset::new(0, y),
            )?;
        }

        compositor.render_header_with_shadow(
            &viewport,
            &mut canvas,
            &section_header(&sections[current], &theme),
            offset,
            SHADOW_THICKNESS,
        )?;

        let path = out_dir.join(format!("frame_{frame:03}.png"));
        std::fs::write(&path, canvas.to_png()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(frame, scroll, section = current, offset_y = offset.y, "wrote {}", path.display());

        #[cfg(feature = "preview")]
        {
            use std::io::Write;

            let mut stdout = std::io::stdout();
            preview.show(
                &mut stdout,
                &canvas.to_rgba_image(),
                sticky_headers::CellArea::new(0, 0, 24, 16),
            )?;
            stdout.flush()?;
            std::thread::sleep(std::time::Duration::from_millis(80));
        }
    }

    println!("wrote {} frames to {}", FRAMES, out_dir.display());
    Ok(())
}

fn section_header(section: &Section, theme: &Theme) -> SolidHeader {
    SolidHeader::new(Rect::new(0, 0, WIDTH, HEADER_HEIGHT), section.color)
        .with_margins(Insets::new(0, 0, 8, 0))
        .with_accent(theme.header_accent, 2)
}

/// Content y of each section's header
fn section_starts(sections: &[Section]) -> Vec<i32> {
    let mut y = 0;
    sections
        .iter()
        .map(|s| {
            let start = y;
            y += HEADER_HEIGHT + s.rows * ROW_HEIGHT;
            start
        })
        .collect()
}

/// Section pinned at the top, and how far the next header pushes it up
fn sticky_position(starts: &[i32], scroll: i32) -> (usize, Offset) {
    let current = starts
        .iter()
        .rposition(|&start| start <= scroll)
        .unwrap_or(0);

    let y = match starts.get(current + 1) {
        Some(&next) if next - scroll < HEADER_HEIGHT => next - scroll - HEADER_HEIGHT,
        _ => 0,
    };

    (current, Offset::new(0, y))
}

fn draw_rows(
    canvas: &mut dyn Canvas,
    sections: &[Section],
    starts: &[i32],
    theme: &Theme,
    scroll: i32,
) -> Result<()> {
    for (section, &start) in sections.iter().zip(starts) {
        for row in 0..section.rows {
            let top = start + HEADER_HEIGHT + row * ROW_HEIGHT - scroll;
            if top + ROW_HEIGHT <= 0 || top >= HEIGHT {
                continue;
            }

            let fill = if row % 2 == 0 {
                theme.surface
            } else {
                theme.surface_alt
            };
            canvas.fill_rect(Rect::from_xywh(0, top, WIDTH, ROW_HEIGHT), &Paint::solid(fill))?;
            canvas.fill_rect(
                Rect::from_xywh(0, top + ROW_HEIGHT - 1, WIDTH, 1),
                &Paint::solid(theme.divider),
            )?;
        }
    }
    Ok(())
}
