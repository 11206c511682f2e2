// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toolkit-wide constants and render-time settings.

/// Default width and height of a widget constructed without explicit size.
pub const MIN_ELEMENT_SIZE: f64 = 32.0;

/// Settings passed down through a paint traversal.
///
/// The host builds one per frame and hands it to every [`Widget::draw`](crate::Widget::draw)
/// call, instead of widgets consulting global state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawCx {
    /// Draw the diagnostic overlay (box model and id) for every widget.
    ///
    /// Widgets also draw it when their own debug flag is set.
    pub debug: bool,
}

impl DrawCx {
    /// A context with the overlay forced on for every widget.
    pub const fn debug() -> Self {
        Self { debug: true }
    }
}
