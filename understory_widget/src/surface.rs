// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drawing surface contract: the primitive calls widgets issue while painting.
//!
//! A [`Surface`] receives two kinds of operations:
//!
//! - [`StateOp`]: mutate surface state (save/restore, transform, styles, font).
//! - [`DrawOp`]: produce pixels with the current state.
//!
//! State changes made by a widget must not leak to its caller. Bracket them
//! with [`SurfaceExt::with_saved`], which pushes [`StateOp::Save`] before and
//! [`StateOp::Restore`] after the closure.
//!
//! [`RecordingSurface`] records the operation stream instead of rasterizing it.
//! It is useful for tests and for replaying a frame onto a real backend.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};
use peniko::Color;

/// Vertical anchoring of text relative to its origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Origin is the top of the em box.
    Top,
    /// Origin is the middle of the em box.
    Middle,
    /// Origin is the alphabetic baseline.
    #[default]
    Alphabetic,
    /// Origin is the bottom of the em box.
    Bottom,
}

/// Horizontal anchoring of text relative to its origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// Text starts at the origin.
    #[default]
    Left,
    /// Text is centered on the origin.
    Center,
    /// Text ends at the origin.
    Right,
}

/// Generic font family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// Proportional sans-serif face.
    #[default]
    SansSerif,
    /// Proportional serif face.
    Serif,
    /// Fixed-width face.
    Monospace,
}

/// Font selection for text primitives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    /// Family to draw with.
    pub family: FontFamily,
    /// Size in points.
    pub size_pt: f32,
}

impl Font {
    /// A sans-serif font of the given point size.
    pub const fn sans_serif(size_pt: f32) -> Self {
        Self {
            family: FontFamily::SansSerif,
            size_pt,
        }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::sans_serif(10.0)
    }
}

/// Operations that mutate surface state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Push the current state.
    Save,
    /// Pop the most recently saved state. Must be balanced with [`StateOp::Save`].
    Restore,
    /// Translate the current transform.
    Translate(Vec2),
    /// Set the color used by stroke primitives.
    SetStrokeColor(Color),
    /// Set the color used by fill primitives.
    SetFillColor(Color),
    /// Set the stroke width.
    SetLineWidth(f64),
    /// Set text vertical anchoring.
    SetTextBaseline(TextBaseline),
    /// Set text horizontal anchoring.
    SetTextAlign(TextAlign),
    /// Set the font for text primitives.
    SetFont(Font),
}

/// Operations that produce pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Stroke the outline of a rectangle.
    StrokeRect(Rect),
    /// Fill a rectangle.
    FillRect(Rect),
    /// Stroke the outline of `text` anchored at `origin`.
    StrokeText {
        /// Text to draw.
        text: String,
        /// Anchor point, interpreted with the current baseline/alignment.
        origin: Point,
    },
    /// Fill `text` anchored at `origin`.
    FillText {
        /// Text to draw.
        text: String,
        /// Anchor point, interpreted with the current baseline/alignment.
        origin: Point,
    },
}

/// A raster drawing surface widgets paint onto.
///
/// This trait is object safe; widgets draw through `&mut dyn Surface`.
pub trait Surface {
    /// Apply a state operation.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);
}

/// Convenience helpers for any [`Surface`].
pub trait SurfaceExt: Surface {
    /// Run `f` between a save and a restore, so state changes do not leak.
    ///
    /// Note: if `f` panics, the state will not be restored.
    #[inline]
    fn with_saved<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        self.state(StateOp::Save);
        let out = f(self);
        self.state(StateOp::Restore);
        out
    }
}

impl<S: Surface + ?Sized> SurfaceExt for S {}

/// One recorded surface operation.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceOp {
    /// A state operation.
    State(StateOp),
    /// A draw operation.
    Draw(DrawOp),
}

/// A [`Surface`] that records operations in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<SurfaceOp>,
    depth: usize,
    unbalanced: bool,
}

impl RecordingSurface {
    /// Create an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operations, in issue order.
    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    /// Take the recorded operations, leaving the recording empty.
    pub fn take(&mut self) -> Vec<SurfaceOp> {
        self.depth = 0;
        self.unbalanced = false;
        core::mem::take(&mut self.ops)
    }

    /// Returns `true` if every save has been restored and no restore ran without a save.
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && !self.unbalanced
    }

    /// Iterate only the recorded draw operations.
    pub fn draws(&self) -> impl Iterator<Item = &DrawOp> + '_ {
        self.ops.iter().filter_map(|op| match op {
            SurfaceOp::Draw(d) => Some(d),
            SurfaceOp::State(_) => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn state(&mut self, op: StateOp) {
        match op {
            StateOp::Save => self.depth += 1,
            StateOp::Restore => match self.depth.checked_sub(1) {
                Some(depth) => self.depth = depth,
                None => {
                    log::warn!("restore without matching save");
                    self.unbalanced = true;
                }
            },
            _ => {}
        }
        self.ops.push(SurfaceOp::State(op));
    }

    fn draw(&mut self, op: DrawOp) {
        self.ops.push(SurfaceOp::Draw(op));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_saved_brackets_the_closure() {
        let mut s = RecordingSurface::new();
        let out = s.with_saved(|s| {
            s.state(StateOp::Translate(Vec2::new(1.0, 2.0)));
            s.draw(DrawOp::FillRect(Rect::new(0.0, 0.0, 1.0, 1.0)));
            7
        });
        assert_eq!(out, 7);
        assert!(s.is_balanced());
        assert_eq!(s.ops().first(), Some(&SurfaceOp::State(StateOp::Save)));
        assert_eq!(s.ops().last(), Some(&SurfaceOp::State(StateOp::Restore)));
        assert_eq!(s.draws().count(), 1);
    }

    #[test]
    fn with_saved_works_through_dyn_surface() {
        let mut rec = RecordingSurface::new();
        let s: &mut dyn Surface = &mut rec;
        s.with_saved(|s| s.state(StateOp::SetLineWidth(3.0)));
        assert_eq!(rec.ops().len(), 3);
        assert!(rec.is_balanced());
    }

    #[test]
    fn stray_restore_is_reported_as_unbalanced() {
        let mut s = RecordingSurface::new();
        s.state(StateOp::Restore);
        assert!(!s.is_balanced());
        s.take();
        assert!(s.is_balanced());
        assert!(s.ops().is_empty());
    }

    #[test]
    fn open_save_is_unbalanced() {
        let mut s = RecordingSurface::new();
        s.state(StateOp::Save);
        assert!(!s.is_balanced());
    }
}
