// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget base state and the [`Widget`] capability trait.

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt;

use kurbo::{Point, Rect};
use peniko::Color;

use crate::binding::{BindingTable, Handler, Phase};
use crate::box_model::BoxModel;
use crate::event::{Event, KeyboardEvent, MouseEvent};
use crate::settings::{DrawCx, MIN_ELEMENT_SIZE};
use crate::surface::{DrawOp, Font, StateOp, Surface, SurfaceExt, TextAlign, TextBaseline};

/// Where the diagnostic id label is drawn, in widget-local coordinates.
const ID_LABEL_ORIGIN: Point = Point::new(2.0, 2.0);
const ID_LABEL_FONT: Font = Font::sans_serif(7.0);

/// Construction options for [`WidgetBase`].
///
/// Every field defaults independently; override what you need with struct
/// update syntax:
///
/// ```
/// use understory_widget::{WidgetBase, WidgetProps};
///
/// let w = WidgetBase::new(WidgetProps {
///     x: 10.0,
///     width: None,
///     ..WidgetProps::default()
/// });
/// assert_eq!(w.width(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetProps {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Requested width; `None` leaves it to layout.
    pub width: Option<f64>,
    /// Requested height; `None` leaves it to layout.
    pub height: Option<f64>,
    /// Background color.
    pub fill: String,
    /// Border color.
    pub border: String,
}

impl Default for WidgetProps {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: Some(MIN_ELEMENT_SIZE),
            height: Some(MIN_ELEMENT_SIZE),
            fill: String::new(),
            border: String::new(),
        }
    }
}

/// State shared by every widget: geometry, style, diagnostics, and listeners.
///
/// Concrete widgets embed a `WidgetBase` and expose it through
/// [`Widget::base`] / [`Widget::base_mut`]. `WidgetBase` also implements
/// [`Widget`] itself, with all default behavior, for plain leaf widgets.
///
/// ## Requested size versus box size
///
/// [`width`](Self::width) / [`height`](Self::height) return what was last
/// requested, which may be `None` ("let layout decide"). The owned
/// [`BoxModel`] always holds a concrete content size: the last requested
/// value, or zero when unset. Layout passes may write the box directly; read
/// [`box_model`](Self::box_model) for the resolved size.
#[derive(Clone, Debug)]
pub struct WidgetBase {
    position: Point,
    width: Option<f64>,
    height: Option<f64>,
    box_model: BoxModel,
    fill_width: f64,
    fill_height: f64,
    fill: String,
    border: String,
    id: String,
    debug: bool,
    bindings: BindingTable,
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new(WidgetProps::default())
    }
}

impl WidgetBase {
    /// Create a widget from construction options.
    pub fn new(props: WidgetProps) -> Self {
        let mut w = Self {
            position: Point::new(props.x, props.y),
            width: None,
            height: None,
            box_model: BoxModel::default(),
            fill_width: 0.0,
            fill_height: 0.0,
            fill: props.fill,
            border: props.border,
            id: String::new(),
            debug: false,
            bindings: BindingTable::new(),
        };
        w.set_width(props.width);
        w.set_height(props.height);
        w
    }

    /// Top-left corner in the parent's coordinate space.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Move the widget. Negative and off-canvas positions are allowed.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Requested width, if any.
    pub fn width(&self) -> Option<f64> {
        self.width
    }

    /// Request a width and update the box model's content width.
    ///
    /// Negative (and NaN) values are clamped to zero. `None` stores "unspecified"
    /// and sets the content width to zero.
    pub fn set_width(&mut self, width: Option<f64>) {
        self.width = width.map(|w| non_negative(w, "width"));
        self.box_model.width = self.width.unwrap_or(0.0);
    }

    /// Requested height, if any.
    pub fn height(&self) -> Option<f64> {
        self.height
    }

    /// Request a height and update the box model's content height.
    ///
    /// See [`set_width`](Self::set_width).
    pub fn set_height(&mut self, height: Option<f64>) {
        self.height = height.map(|h| non_negative(h, "height"));
        self.box_model.height = self.height.unwrap_or(0.0);
    }

    /// The owned box model.
    pub fn box_model(&self) -> &BoxModel {
        &self.box_model
    }

    /// Mutable access to the box model, for padding/margin changes and layout.
    pub fn box_model_mut(&mut self) -> &mut BoxModel {
        &mut self.box_model
    }

    /// Horizontal grow/shrink proportion for flexible layouts; 0 means fixed.
    pub fn fill_width(&self) -> f64 {
        self.fill_width
    }

    /// Set the horizontal grow/shrink proportion, clamped to zero or more.
    pub fn set_fill_width(&mut self, proportion: f64) {
        self.fill_width = non_negative(proportion, "fill_width");
    }

    /// Vertical grow/shrink proportion for flexible layouts; 0 means fixed.
    pub fn fill_height(&self) -> f64 {
        self.fill_height
    }

    /// Set the vertical grow/shrink proportion, clamped to zero or more.
    pub fn set_fill_height(&mut self, proportion: f64) {
        self.fill_height = non_negative(proportion, "fill_height");
    }

    /// Background color string.
    pub fn fill(&self) -> &str {
        &self.fill
    }

    /// Set the background color string. Not validated.
    pub fn set_fill(&mut self, fill: impl Into<String>) {
        self.fill = fill.into();
    }

    /// Border color string.
    pub fn border(&self) -> &str {
        &self.border
    }

    /// Set the border color string. Not validated.
    pub fn set_border(&mut self, border: impl Into<String>) {
        self.border = border.into();
    }

    /// Diagnostic label. Not required to be unique.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Set the diagnostic label.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Whether this widget draws its diagnostic overlay regardless of [`DrawCx::debug`].
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Force the diagnostic overlay on or off for this widget.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// The widget's listener registrations.
    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }

    /// Register a listener. See [`BindingTable::add_event_listener`].
    pub fn add_event_listener(
        &mut self,
        event_type: impl Into<Cow<'static, str>>,
        handler: Handler,
        phase: Phase,
    ) {
        self.bindings.add_event_listener(event_type, handler, phase);
    }

    /// Unregister a listener. See [`BindingTable::remove_event_listener`].
    pub fn remove_event_listener(
        &mut self,
        event_type: &str,
        handler: &Handler,
        phase: Phase,
    ) -> usize {
        self.bindings
            .remove_event_listener(event_type, handler, phase)
    }

    /// Deliver `event` to this widget's listeners for `phase`.
    ///
    /// Concrete widgets call this from their event handlers, e.g. to announce an
    /// `"action"` after recognizing a click. Returns whether any listener
    /// handled it.
    pub fn dispatch_event(&self, event: &Event, phase: Phase) -> bool {
        self.bindings.dispatch(event, phase)
    }

    /// The hit-test rectangle: the padding box anchored at [`position`](Self::position).
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.box_model.padding_box())
    }

    /// Returns `true` if `point` lies over this widget.
    ///
    /// The rectangle is half-open: the top and left edges are inside, the right
    /// and bottom edges are not. A widget with an empty padding box is never hit.
    pub fn hit_test(&self, point: Point) -> bool {
        self.bounds().contains(point)
    }

    /// Draw the box model visualization and the id label, if debugging is on.
    ///
    /// Debugging is on when either `cx.debug` or this widget's own flag is set.
    /// All surface state changes are scoped to this call.
    pub fn draw_debug_overlay(&self, surface: &mut dyn Surface, cx: &DrawCx) {
        if !(cx.debug || self.debug) {
            return;
        }
        surface.with_saved(|s| {
            s.state(StateOp::Translate(self.position.to_vec2()));
            self.box_model.draw(s);

            // Stroke then fill, so the label reads on any background.
            s.state(StateOp::SetStrokeColor(Color::WHITE));
            s.state(StateOp::SetLineWidth(2.0));
            s.state(StateOp::SetTextBaseline(TextBaseline::Top));
            s.state(StateOp::SetTextAlign(TextAlign::Left));
            s.state(StateOp::SetFont(ID_LABEL_FONT));
            s.draw(DrawOp::StrokeText {
                text: self.id.clone(),
                origin: ID_LABEL_ORIGIN,
            });
            s.state(StateOp::SetFillColor(Color::BLACK));
            s.draw(DrawOp::FillText {
                text: self.id.clone(),
                origin: ID_LABEL_ORIGIN,
            });
        });
    }
}

impl fmt::Display for WidgetBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Widget id:{}", self.id)
    }
}

fn non_negative(value: f64, what: &str) -> f64 {
    if value >= 0.0 {
        value
    } else {
        log::debug!("clamping {what} {value} to 0");
        0.0
    }
}

/// The capability set every widget provides.
///
/// Only [`base`](Self::base) and [`base_mut`](Self::base_mut) are required.
/// Every other method has a default: input handlers report "not handled",
/// layout does nothing, hit testing uses the base rectangle, and drawing paints
/// only the diagnostic overlay.
///
/// ```
/// use understory_widget::{Widget, WidgetBase, MouseEvent, MouseEventKind};
///
/// #[derive(Debug, Default)]
/// struct Spacer {
///     base: WidgetBase,
/// }
///
/// impl Widget for Spacer {
///     fn base(&self) -> &WidgetBase {
///         &self.base
///     }
///     fn base_mut(&mut self) -> &mut WidgetBase {
///         &mut self.base
///     }
/// }
///
/// let mut spacer = Spacer::default();
/// let e = MouseEvent::new(MouseEventKind::Click, 0, kurbo::Point::ZERO);
/// assert!(!spacer.handle_mouse_event(&e));
/// ```
pub trait Widget {
    /// Shared widget state.
    fn base(&self) -> &WidgetBase;

    /// Shared widget state, mutably.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Compute this widget's size (and its children's), given the space offered.
    ///
    /// `None` means the parent imposes no size along that axis. Containers
    /// distribute slack among children according to their
    /// [`fill_width`](WidgetBase::fill_width) / [`fill_height`](WidgetBase::fill_height).
    fn do_layout(&mut self, width: Option<f64>, height: Option<f64>) {
        let _ = (width, height);
    }

    /// Handle a keyboard event. Returns `true` if handled.
    fn handle_keyboard_event(&mut self, event: &KeyboardEvent) -> bool {
        let _ = event;
        false
    }

    /// Handle a mouse event in the normal phase. Returns `true` if handled.
    fn handle_mouse_event(&mut self, event: &MouseEvent) -> bool {
        let _ = event;
        false
    }

    /// Handle a mouse event in the capture phase, before nested children see it.
    /// Returns `true` if handled.
    fn handle_mouse_event_capture(&mut self, event: &MouseEvent) -> bool {
        let _ = event;
        false
    }

    /// Returns `true` if `point` lies over this widget.
    fn hit_test(&self, point: Point) -> bool {
        self.base().hit_test(point)
    }

    /// Paint the widget.
    ///
    /// Implementations should scope their state changes with
    /// [`SurfaceExt::with_saved`] and finish by calling
    /// [`WidgetBase::draw_debug_overlay`] so diagnostics appear on top.
    fn draw(&self, surface: &mut dyn Surface, cx: &DrawCx) {
        self.base().draw_debug_overlay(surface, cx);
    }
}

impl Widget for WidgetBase {
    fn base(&self) -> &WidgetBase {
        self
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        self
    }
}
