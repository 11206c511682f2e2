// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_widget --heading-base-level=0

//! Understory Widget: the base of a retained-mode widget: geometry, hit testing, and event bindings.
//!
//! ## Overview
//!
//! Every widget is a positioned, sized rectangle that takes part in layout,
//! receives keyboard and mouse input, and paints onto a raster surface. This
//! crate provides the state and behavior all widgets share:
//!
//! - [`WidgetBase`]: position, requested size, an owned [`BoxModel`], fill
//!   proportions for flexible layouts, style strings, a diagnostic id, and a
//!   [`BindingTable`] of event listeners.
//! - [`Widget`]: the capability trait concrete widgets implement. Input
//!   handlers, layout, hit testing, and drawing all have defaults.
//! - [`BindingTable`]: ordered `(event type, handler, phase)` registrations with
//!   OR-aggregated dispatch.
//! - [`Surface`]: the primitive drawing calls widgets issue, with
//!   [`RecordingSurface`] for tests and replay.
//!
//! It does not route events between widgets, lay out containers, or resolve
//! styles. A host loop hit-tests widgets, calls
//! [`Widget::handle_mouse_event_capture`] then [`Widget::handle_mouse_event`],
//! and drives [`Widget::do_layout`] and [`Widget::draw`].
//!
//! ## Phases
//!
//! Listeners register for [`Phase::Capture`] or [`Phase::Bubble`] and only see
//! dispatches for that phase. Dispatch runs every matching listener in
//! registration order and returns whether any of them handled the event; a
//! `true` result is advisory and never stops later listeners.
//!
//! ## Sizing
//!
//! [`WidgetBase::set_width`] / [`WidgetBase::set_height`] take `Option<f64>`.
//! `None` means "let layout decide". Values are clamped to zero or more, and the
//! box model's content size is updated immediately (zero when unset).
//! [`WidgetBase::hit_test`] uses the box model's padding box anchored at the
//! widget's position, with half-open edges.
//!
//! ## Example
//!
//! ```
//! use kurbo::Point;
//! use understory_widget::{
//!     DrawCx, Event, Handler, MouseEvent, MouseEventKind, Phase, RecordingSurface, Widget,
//!     WidgetBase, WidgetProps,
//! };
//!
//! let mut button = WidgetBase::new(WidgetProps {
//!     x: 10.0,
//!     y: 10.0,
//!     width: Some(80.0),
//!     height: Some(24.0),
//!     ..WidgetProps::default()
//! });
//! button.set_id("ok");
//! button.add_event_listener("click", Handler::new(|_: &Event| true), Phase::Bubble);
//!
//! let p = Point::new(12.0, 12.0);
//! assert!(button.hit_test(p));
//! let click: Event = MouseEvent::new(MouseEventKind::Click, 0, p).into();
//! assert!(button.dispatch_event(&click, Phase::Bubble));
//!
//! let mut surface = RecordingSurface::new();
//! button.draw(&mut surface, &DrawCx::debug());
//! assert!(surface.is_balanced());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod binding;
mod box_model;
mod event;
mod settings;
mod surface;
mod widget;

pub use binding::{Binding, BindingTable, Handler, IntoHandled, Listeners, Phase};
pub use box_model::BoxModel;
pub use event::{
    ActionEvent, Event, KeyboardEvent, KeyboardEventKind, Modifiers, MouseEvent, MouseEventKind,
};
pub use settings::{DrawCx, MIN_ELEMENT_SIZE};
pub use surface::{
    DrawOp, Font, FontFamily, RecordingSurface, StateOp, Surface, SurfaceExt, SurfaceOp,
    TextAlign, TextBaseline,
};
pub use widget::{Widget, WidgetBase, WidgetProps};
