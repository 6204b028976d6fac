//! Save/restore stack shared by the bundled canvases

use crate::layout::{Offset, Rect};
use tracing::warn;

/// Transform and clip in effect at one point of a paint pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasState {
    /// Accumulated translation from local to device coordinates
    pub translation: Offset,
    /// Clip in device coordinates
    pub clip: Rect,
}

/// Current canvas state plus the stack of saved states
#[derive(Debug, Clone)]
pub struct StateStack {
    surface: Rect,
    current: CanvasState,
    saved: Vec<CanvasState>,
}

impl StateStack {
    /// Fresh state for a surface of the given size: no translation, clip covers everything
    pub fn new(width: i32, height: i32) -> Self {
        let surface = Rect::fullscreen(width, height);
        StateStack {
            surface,
            current: CanvasState {
                translation: Offset::ZERO,
                clip: surface,
            },
            saved: Vec::with_capacity(4),
        }
    }

    /// Push the current state; returns the depth before pushing
    pub fn save(&mut self) -> usize {
        let count = self.saved.len();
        self.saved.push(self.current);
        count
    }

    pub fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.current = state,
            None => warn!("canvas restore without matching save"),
        }
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn current(&self) -> CanvasState {
        self.current
    }

    pub fn surface(&self) -> Rect {
        self.surface
    }

    pub fn translation(&self) -> Offset {
        self.current.translation
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.current.translation = self.current.translation.add(dx, dy);
    }

    /// Intersect the clip with a rectangle given in local coordinates
    pub fn clip_rect(&mut self, rect: Rect) {
        let device = self.to_device(rect);
        self.current.clip = self.current.clip.intersect(&device);
    }

    pub fn device_clip(&self) -> Rect {
        self.current.clip
    }

    /// Clip in local coordinates; an empty clip is the zero rectangle at any translation
    pub fn clip_bounds(&self) -> Rect {
        if self.current.clip.is_empty() {
            return Rect::default();
        }
        let t = self.current.translation;
        self.current.clip.translate(-t.x, -t.y)
    }

    pub fn to_device(&self, rect: Rect) -> Rect {
        let t = self.current.translation;
        rect.translate(t.x, t.y)
    }
}
