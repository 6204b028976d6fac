//! Layout primitives - pixel rectangles, offsets, and insets

/// Rectangle bounds in pixels, stored as edges
///
/// Edges are half-open: a point is inside when `left <= x < right` and
/// `top <= y < bottom`. A rectangle whose right edge is not past its left
/// edge (or bottom not past top) is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a new rectangle from its edges
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Rect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from origin and size
    pub const fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Create rectangle covering a surface of the given size
    pub const fn fullscreen(width: i32, height: i32) -> Self {
        Rect::new(0, 0, width, height)
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    /// Top-left corner
    pub fn origin(&self) -> Offset {
        Offset::new(self.left, self.top)
    }

    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Check if point is inside rectangle
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Check whether `other` lies entirely within this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    /// Overlapping area of two rectangles
    ///
    /// Disjoint rectangles produce the zero rectangle rather than an inverted one.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let r = Rect {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        };

        if r.is_empty() {
            Rect::default()
        } else {
            r
        }
    }

    /// Move the rectangle by the given amount
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        Rect {
            left: self.left.saturating_add(dx),
            top: self.top.saturating_add(dy),
            right: self.right.saturating_add(dx),
            bottom: self.bottom.saturating_add(dy),
        }
    }

    /// Shrink the rectangle by the given insets
    pub fn inset(&self, insets: Insets) -> Rect {
        Rect {
            left: self.left.saturating_add(insets.left),
            top: self.top.saturating_add(insets.top),
            right: self.right.saturating_sub(insets.right),
            bottom: self.bottom.saturating_sub(insets.bottom),
        }
    }
}

/// 2D integer vector, used for translation offsets and points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Offset { x, y }
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    pub fn add(&self, dx: i32, dy: i32) -> Offset {
        Offset::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Per-side spacing, used for both container padding and view margins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Insets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Insets {
    pub const ZERO: Insets = Insets::new(0, 0, 0, 0);

    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Insets {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same spacing on every side
    pub const fn uniform(value: i32) -> Self {
        Insets::new(value, value, value, value)
    }

    /// Horizontal and vertical spacing
    pub const fn symmetric(horizontal: i32, vertical: i32) -> Self {
        Insets::new(horizontal, vertical, horizontal, vertical)
    }
}
