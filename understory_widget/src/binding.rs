// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-widget listener registry: register, remove, and dispatch by event type and phase.
//!
//! ## Semantics
//!
//! - Listeners are keyed by `(event type, phase)`. Several listeners may share a key,
//!   and registering the same [`Handler`] twice yields two invocations per dispatch.
//! - Registration order is dispatch order.
//! - Dispatch invokes *every* matching listener and ORs their results. A `true`
//!   result is informational; it does not stop later listeners from running.
//! - Removal drops every entry whose type, handler identity, and phase all match.
//!   Removing a listener that was never registered is a no-op.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_widget::{BindingTable, Event, Handler, MouseEvent, MouseEventKind, Phase};
//!
//! let mut table = BindingTable::new();
//! let on_click = Handler::new(|_: &Event| true);
//! table.add_event_listener("click", on_click.clone(), Phase::Bubble);
//!
//! let click: Event = MouseEvent::new(MouseEventKind::Click, 0, Point::ZERO).into();
//! assert!(table.dispatch(&click, Phase::Bubble));
//! // Capture-phase dispatch does not see bubble-phase listeners.
//! assert!(!table.dispatch(&click, Phase::Capture));
//!
//! table.remove_event_listener("click", &on_click, Phase::Bubble);
//! assert!(table.is_empty());
//! ```

use alloc::borrow::Cow;
use alloc::rc::Rc;
use core::fmt;

use smallvec::SmallVec;

use crate::event::Event;

/// Delivery pass a listener is registered for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Runs before the normal pass, typically to intercept events (e.g. drags)
    /// before nested children see them.
    Capture,
    /// The normal pass.
    #[default]
    Bubble,
}

/// Conversion from a listener's return value to a "handled" flag.
///
/// Listeners may return `bool`, or nothing at all; `()` counts as not handled.
pub trait IntoHandled {
    /// Whether the listener reported the event as handled.
    fn into_handled(self) -> bool;
}

impl IntoHandled for bool {
    #[inline]
    fn into_handled(self) -> bool {
        self
    }
}

impl IntoHandled for () {
    #[inline]
    fn into_handled(self) -> bool {
        false
    }
}

/// A shared, reference-counted event listener.
///
/// Identity is the allocation: clones of a `Handler` compare equal under
/// [`Handler::ptr_eq`], while two handlers built from identical closures do not.
/// Keep a clone around to remove the listener later.
#[derive(Clone)]
pub struct Handler(Rc<dyn Fn(&Event) -> bool>);

impl Handler {
    /// Wrap a closure as a listener.
    pub fn new<F, R>(f: F) -> Self
    where
        F: Fn(&Event) -> R + 'static,
        R: IntoHandled,
    {
        Self(Rc::new(move |e: &Event| f(e).into_handled()))
    }

    /// Invoke the listener.
    #[inline]
    pub fn call(&self, event: &Event) -> bool {
        (self.0)(event)
    }

    /// Returns `true` if both handles refer to the same listener.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Handler")
            .field(&Rc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// One registration in a [`BindingTable`].
#[derive(Clone, Debug)]
pub struct Binding {
    /// Event type this listener responds to.
    pub event_type: Cow<'static, str>,
    /// The listener.
    pub handler: Handler,
    /// Phase this listener runs in.
    pub phase: Phase,
}

impl Binding {
    fn matches(&self, event_type: &str, phase: Phase) -> bool {
        self.phase == phase && self.event_type == event_type
    }
}

/// Handlers selected for one dispatch, in registration order.
///
/// Returned by [`BindingTable::matching`]. Because it owns its handlers, the
/// table may be mutated (for example by one of these very handlers, when the
/// table lives behind a `RefCell`) while the snapshot is being invoked; such
/// changes take effect on the next dispatch.
#[derive(Clone, Debug, Default)]
pub struct Listeners(SmallVec<[Handler; 4]>);

impl Listeners {
    /// Invoke every handler with `event` and OR the results.
    ///
    /// No short-circuit: all handlers run even after one returns `true`.
    pub fn invoke(&self, event: &Event) -> bool {
        let mut handled = false;
        for handler in &self.0 {
            handled |= handler.call(event);
        }
        handled
    }

    /// Number of selected handlers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no handler matched.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Ordered list of `(event type, handler, phase)` registrations owned by one widget.
#[derive(Clone, Debug, Default)]
pub struct BindingTable {
    bindings: SmallVec<[Binding; 4]>,
}

impl BindingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener for `event_type` in `phase`.
    ///
    /// No de-duplication is performed.
    pub fn add_event_listener(
        &mut self,
        event_type: impl Into<Cow<'static, str>>,
        handler: Handler,
        phase: Phase,
    ) {
        let event_type = event_type.into();
        log::trace!("add listener type={event_type} phase={phase:?}");
        self.bindings.push(Binding {
            event_type,
            handler,
            phase,
        });
    }

    /// Remove every registration equal to `(event_type, handler, phase)`.
    ///
    /// Returns the number of entries removed; zero when nothing matched.
    pub fn remove_event_listener(
        &mut self,
        event_type: &str,
        handler: &Handler,
        phase: Phase,
    ) -> usize {
        let before = self.bindings.len();
        self.bindings
            .retain(|b| !(b.matches(event_type, phase) && b.handler.ptr_eq(handler)));
        let removed = before - self.bindings.len();
        log::trace!("remove listener type={event_type} phase={phase:?} removed={removed}");
        removed
    }

    /// Snapshot the handlers registered for `(event_type, phase)`.
    pub fn matching(&self, event_type: &str, phase: Phase) -> Listeners {
        Listeners(
            self.bindings
                .iter()
                .filter(|b| b.matches(event_type, phase))
                .map(|b| b.handler.clone())
                .collect(),
        )
    }

    /// Deliver `event` to every listener registered for its type in `phase`.
    ///
    /// Returns `true` if at least one listener reported the event as handled,
    /// and `false` when no listener matched.
    pub fn dispatch(&self, event: &Event, phase: Phase) -> bool {
        let listeners = self.matching(event.event_type(), phase);
        let handled = listeners.invoke(event);
        log::trace!(
            "dispatch type={} phase={phase:?} listeners={} handled={handled}",
            event.event_type(),
            listeners.len()
        );
        handled
    }

    /// Number of registrations.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Remove all registrations.
    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    /// Iterate registrations in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Binding> + '_ {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{ActionEvent, MouseEvent, MouseEventKind};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::{Cell, RefCell};
    use kurbo::Point;

    fn click() -> Event {
        MouseEvent::new(MouseEventKind::Click, 1, Point::new(3.0, 4.0)).into()
    }

    fn counter(count: &Rc<Cell<u32>>, result: bool) -> Handler {
        let count = count.clone();
        Handler::new(move |_: &Event| {
            count.set(count.get() + 1);
            result
        })
    }

    #[test]
    fn empty_table_reports_unhandled() {
        let table = BindingTable::new();
        assert!(table.is_empty());
        assert!(!table.dispatch(&click(), Phase::Bubble));
        assert!(!table.dispatch(&click(), Phase::Capture));
    }

    #[test]
    fn handler_receives_the_dispatched_event_once() {
        let seen = Rc::new(Cell::new(0_usize));
        let calls = Rc::new(Cell::new(0_u32));
        let handler = {
            let seen = seen.clone();
            let calls = calls.clone();
            Handler::new(move |e: &Event| {
                seen.set(core::ptr::from_ref(e) as usize);
                calls.set(calls.get() + 1);
            })
        };
        let mut table = BindingTable::new();
        table.add_event_listener("click", handler, Phase::Bubble);

        let event = click();
        // A handler returning `()` counts as not handled.
        assert!(!table.dispatch(&event, Phase::Bubble));
        assert_eq!(calls.get(), 1);
        assert_eq!(seen.get(), core::ptr::from_ref(&event) as usize);
    }

    #[test]
    fn dispatch_ors_results_without_short_circuit() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut table = BindingTable::new();
        table.add_event_listener("click", counter(&first, true), Phase::Bubble);
        table.add_event_listener("click", counter(&second, false), Phase::Bubble);

        assert!(table.dispatch(&click(), Phase::Bubble));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn phases_are_isolated() {
        let capture = Rc::new(Cell::new(0));
        let bubble = Rc::new(Cell::new(0));
        let mut table = BindingTable::new();
        table.add_event_listener("click", counter(&capture, true), Phase::Capture);
        table.add_event_listener("click", counter(&bubble, true), Phase::Bubble);

        assert!(table.dispatch(&click(), Phase::Bubble));
        assert_eq!((capture.get(), bubble.get()), (0, 1));
        assert!(table.dispatch(&click(), Phase::Capture));
        assert_eq!((capture.get(), bubble.get()), (1, 1));
    }

    #[test]
    fn other_event_types_are_ignored() {
        let count = Rc::new(Cell::new(0));
        let mut table = BindingTable::new();
        table.add_event_listener("mousedown", counter(&count, true), Phase::Bubble);
        assert!(!table.dispatch(&click(), Phase::Bubble));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn duplicate_registration_runs_twice() {
        let count = Rc::new(Cell::new(0));
        let handler = counter(&count, false);
        let mut table = BindingTable::new();
        table.add_event_listener("click", handler.clone(), Phase::Bubble);
        table.add_event_listener("click", handler, Phase::Bubble);
        table.dispatch(&click(), Phase::Bubble);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut table = BindingTable::new();
        for tag in [1, 2, 3] {
            let order = order.clone();
            table.add_event_listener(
                "action",
                Handler::new(move |_: &Event| order.borrow_mut().push(tag)),
                Phase::Bubble,
            );
        }
        table.dispatch(&ActionEvent::new("action", 0).into(), Phase::Bubble);
        assert_eq!(*order.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn remove_requires_all_three_fields_to_match() {
        let count = Rc::new(Cell::new(0));
        let h = counter(&count, false);
        let other = counter(&count, false);
        let mut table = BindingTable::new();
        table.add_event_listener("click", h.clone(), Phase::Bubble);
        table.add_event_listener("click", h.clone(), Phase::Capture);
        table.add_event_listener("mousedown", h.clone(), Phase::Bubble);
        table.add_event_listener("click", other.clone(), Phase::Bubble);

        assert_eq!(table.remove_event_listener("click", &h, Phase::Bubble), 1);
        assert_eq!(table.len(), 3);

        let remaining: Vec<_> = table
            .iter()
            .map(|b| (&*b.event_type, b.phase, b.handler.ptr_eq(&h)))
            .collect();
        assert_eq!(
            remaining,
            vec![
                ("click", Phase::Capture, true),
                ("mousedown", Phase::Bubble, true),
                ("click", Phase::Bubble, false),
            ]
        );
    }

    #[test]
    fn remove_drops_every_duplicate() {
        let count = Rc::new(Cell::new(0));
        let h = counter(&count, false);
        let mut table = BindingTable::new();
        table.add_event_listener("click", h.clone(), Phase::Bubble);
        table.add_event_listener("click", h.clone(), Phase::Bubble);
        assert_eq!(table.remove_event_listener("click", &h, Phase::Bubble), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn remove_unknown_listener_is_a_no_op() {
        let count = Rc::new(Cell::new(0));
        let mut table = BindingTable::new();
        table.add_event_listener("click", counter(&count, true), Phase::Bubble);
        let stranger = counter(&count, true);
        assert_eq!(table.remove_event_listener("click", &stranger, Phase::Bubble), 0);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn handlers_from_identical_closures_are_distinct() {
        let a = Handler::new(|_: &Event| true);
        let b = Handler::new(|_: &Event| true);
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn matching_snapshot_is_detached_from_the_table() {
        let count = Rc::new(Cell::new(0));
        let mut table = BindingTable::new();
        table.add_event_listener("click", counter(&count, true), Phase::Bubble);
        let snapshot = table.matching("click", Phase::Bubble);
        table.clear();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.invoke(&click()));
        assert_eq!(count.get(), 1);
    }
}
