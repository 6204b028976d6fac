//! Linear gradients with configurable tiling
//!
//! A gradient is described independently of any drawing backend: canvases
//! translate it into their native shader, and [`LinearGradient::color_at`]
//! evaluates it directly for inspection.

use crate::theme::Color;

/// How a gradient behaves past its end points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TileMode {
    /// Hold the nearest end color
    #[default]
    Clamp,
    /// Restart from the first stop
    Repeat,
    /// Reflect back and forth
    Mirror,
}

/// A color at a position along the gradient axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position in `0.0..=1.0`
    pub position: f32,
    pub color: Color,
}

impl GradientStop {
    pub fn new(position: f32, color: Color) -> Self {
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        GradientStop { position, color }
    }
}

/// Linear gradient between two points
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    start: (f32, f32),
    end: (f32, f32),
    stops: Vec<GradientStop>,
    tile_mode: TileMode,
}

impl LinearGradient {
    /// Create a gradient along `start -> end`; stops are sorted by position
    pub fn new(
        start: (f32, f32),
        end: (f32, f32),
        mut stops: Vec<GradientStop>,
        tile_mode: TileMode,
    ) -> Self {
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        LinearGradient {
            start,
            end,
            stops,
            tile_mode,
        }
    }

    /// Two-color gradient along `start -> end`
    pub fn two_stop(
        start: (f32, f32),
        end: (f32, f32),
        from: Color,
        to: Color,
        tile_mode: TileMode,
    ) -> Self {
        LinearGradient::new(
            start,
            end,
            vec![GradientStop::new(0.0, from), GradientStop::new(1.0, to)],
            tile_mode,
        )
    }

    /// Gradient running down the y axis from `y0` to `y1`
    pub fn vertical(y0: f32, y1: f32, stops: Vec<GradientStop>, tile_mode: TileMode) -> Self {
        LinearGradient::new((0.0, y0), (0.0, y1), stops, tile_mode)
    }

    pub fn start(&self) -> (f32, f32) {
        self.start
    }

    pub fn end(&self) -> (f32, f32) {
        self.end
    }

    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    pub fn tile_mode(&self) -> TileMode {
        self.tile_mode
    }

    /// Whether start and end coincide, leaving no axis to interpolate along
    pub fn is_degenerate(&self) -> bool {
        self.axis_length_sq() <= f32::EPSILON
    }

    /// Evaluate the gradient at a point
    ///
    /// The point is projected onto the axis. A degenerate axis evaluates to
    /// the last stop; a gradient with no stops is transparent.
    pub fn color_at(&self, x: f32, y: f32) -> Color {
        let (Some(first), Some(last)) = (self.stops.first(), self.stops.last()) else {
            return Color::transparent();
        };

        if self.is_degenerate() {
            return last.color;
        }

        let t = self.tile(self.project(x, y));

        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }

        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t >= a.position && t <= b.position {
                let span = b.position - a.position;
                if span <= f32::EPSILON {
                    return b.color;
                }
                return a.color.lerp(b.color, (t - a.position) / span);
            }
        }

        last.color
    }

    fn axis_length_sq(&self) -> f32 {
        let dx = self.end.0 - self.start.0;
        let dy = self.end.1 - self.start.1;
        dx * dx + dy * dy
    }

    /// Unbounded position of a point along the axis, 0 at start and 1 at end
    fn project(&self, x: f32, y: f32) -> f32 {
        let dx = self.end.0 - self.start.0;
        let dy = self.end.1 - self.start.1;
        ((x - self.start.0) * dx + (y - self.start.1) * dy) / self.axis_length_sq()
    }

    fn tile(&self, t: f32) -> f32 {
        match self.tile_mode {
            TileMode::Clamp => t.clamp(0.0, 1.0),
            TileMode::Repeat => t - t.floor(),
            TileMode::Mirror => {
                let m = t.rem_euclid(2.0);
                if m > 1.0 {
                    2.0 - m
                } else {
                    m
                }
            }
        }
    }
}
