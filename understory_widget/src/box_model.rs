// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Box model: content size wrapped by padding, border, and margin.
//!
//! All rectangles are in the owning widget's local space, with the padding box
//! anchored at the origin. Content sits inside the padding; border and margin
//! grow outward from the padding box.
//!
//! ```text
//!  margin_rect
//!  ┌──────────────────────────┐
//!  │ border_rect              │
//!  │ ┌──────────────────────┐ │
//!  │ │ (0,0) padding_rect   │ │
//!  │ │   ┌──────────────┐   │ │
//!  │ │   │ content_rect │   │ │
//!  │ │   └──────────────┘   │ │
//!  │ └──────────────────────┘ │
//!  └──────────────────────────┘
//! ```

use kurbo::{Insets, Point, Rect, Size};
use peniko::Color;

use crate::surface::{DrawOp, StateOp, Surface, SurfaceExt};

const MARGIN_COLOR: Color = Color::from_rgba8(246, 178, 107, 128);
const BORDER_COLOR: Color = Color::from_rgba8(255, 229, 153, 128);
const PADDING_COLOR: Color = Color::from_rgba8(147, 196, 125, 128);
const CONTENT_COLOR: Color = Color::from_rgba8(111, 168, 220, 128);
const OUTLINE_COLOR: Color = Color::from_rgba8(64, 64, 64, 255);

/// Content dimensions plus the insets around them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxModel {
    /// Content width.
    pub width: f64,
    /// Content height.
    pub height: f64,
    /// Space between content and border.
    pub padding: Insets,
    /// Uniform border width.
    pub border: f64,
    /// Space outside the border.
    pub margin: Insets,
}

impl Default for BoxModel {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            padding: Insets::ZERO,
            border: 0.0,
            margin: Insets::ZERO,
        }
    }
}

impl BoxModel {
    /// Content size.
    pub fn content_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Content plus padding. This is the area a widget is hit-tested against.
    pub fn padding_box(&self) -> Size {
        Size::new(
            self.width + self.padding.x_value(),
            self.height + self.padding.y_value(),
        )
    }

    /// Padding box plus border.
    pub fn border_box(&self) -> Size {
        self.border_rect().size()
    }

    /// Border box plus margin.
    pub fn margin_box(&self) -> Size {
        self.margin_rect().size()
    }

    /// The padding box, anchored at the origin.
    pub fn padding_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.padding_box())
    }

    /// The content rectangle, offset by the leading padding.
    pub fn content_rect(&self) -> Rect {
        Rect::from_origin_size(
            Point::new(self.padding.x0, self.padding.y0),
            self.content_size(),
        )
    }

    /// The border rectangle, surrounding the padding box.
    pub fn border_rect(&self) -> Rect {
        self.padding_rect() + Insets::uniform(self.border)
    }

    /// The margin rectangle, surrounding the border.
    pub fn margin_rect(&self) -> Rect {
        self.border_rect() + self.margin
    }

    /// Paint a visualization of each box layer.
    ///
    /// Layers are filled outermost first with translucent colors; a layer with
    /// no extent of its own is skipped. The padding box is outlined last so that
    /// boxes without padding, border, or margin remain visible.
    pub fn draw(&self, surface: &mut dyn Surface) {
        let layers = [
            (self.margin_rect(), MARGIN_COLOR),
            (self.border_rect(), BORDER_COLOR),
            (self.padding_rect(), PADDING_COLOR),
            (self.content_rect(), CONTENT_COLOR),
        ];
        surface.with_saved(|s| {
            for (i, (rect, color)) in layers.iter().enumerate() {
                let inner = layers.get(i + 1).map(|(r, _)| *r);
                if rect.is_zero_area() || inner == Some(*rect) {
                    continue;
                }
                s.state(StateOp::SetFillColor(*color));
                s.draw(DrawOp::FillRect(*rect));
            }
            s.state(StateOp::SetStrokeColor(OUTLINE_COLOR));
            s.state(StateOp::SetLineWidth(1.0));
            s.draw(DrawOp::StrokeRect(self.padding_rect()));
        });
    }
}
