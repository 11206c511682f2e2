// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event payloads delivered to widgets.
//!
//! Every payload exposes a string discriminant via [`Event::event_type`]; this
//! is the key that [`BindingTable`](crate::BindingTable) listeners are
//! registered under. Keyboard and mouse payloads carry their own kind enums
//! so widgets can `match` on them instead of comparing strings.

use alloc::borrow::Cow;
use alloc::string::String;
use kurbo::Point;

bitflags::bitflags! {
    /// Keyboard modifiers held while an event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT = 0b0000_0001;
        /// Either control key.
        const CTRL  = 0b0000_0010;
        /// Either alt/option key.
        const ALT   = 0b0000_0100;
        /// The platform "logo" key (command, windows, super).
        const META  = 0b0000_1000;
    }
}

/// Kind of a [`MouseEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// A button was pressed.
    MouseDown,
    /// A button was released.
    MouseUp,
    /// The pointer moved with no button held.
    MouseMove,
    /// A press and release landed on the same widget.
    Click,
    /// Two clicks in quick succession.
    DblClick,
    /// The pointer moved while a button was held.
    Drag,
    /// The pointer entered a widget.
    MouseEnter,
    /// The pointer left a widget.
    MouseExit,
}

impl MouseEventKind {
    /// The event type string listeners are keyed by.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MouseDown => "mousedown",
            Self::MouseUp => "mouseup",
            Self::MouseMove => "mousemove",
            Self::Click => "click",
            Self::DblClick => "dblclick",
            Self::Drag => "drag",
            Self::MouseEnter => "mouseenter",
            Self::MouseExit => "mouseexit",
        }
    }
}

/// Kind of a [`KeyboardEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyboardEventKind {
    /// A key was pressed.
    KeyDown,
    /// A key was released.
    KeyUp,
    /// A key produced a character.
    KeyPress,
}

impl KeyboardEventKind {
    /// The event type string listeners are keyed by.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeyDown => "keydown",
            Self::KeyUp => "keyup",
            Self::KeyPress => "keypress",
        }
    }
}

/// A pointer event, positioned in the host's (window) coordinate space.
#[derive(Clone, Debug, PartialEq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
    /// Pointer position.
    pub position: Point,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
}

impl MouseEvent {
    /// Create a mouse event with no modifiers.
    pub fn new(kind: MouseEventKind, timestamp: u64, position: Point) -> Self {
        Self {
            kind,
            timestamp,
            position,
            modifiers: Modifiers::empty(),
        }
    }
}

/// A keyboard event.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// What happened.
    pub kind: KeyboardEventKind,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
    /// Logical key value, e.g. `"a"`, `"Enter"`, `"ArrowLeft"`.
    pub key: String,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// Create a keyboard event with no modifiers.
    pub fn new(kind: KeyboardEventKind, timestamp: u64, key: impl Into<String>) -> Self {
        Self {
            kind,
            timestamp,
            key: key.into(),
            modifiers: Modifiers::empty(),
        }
    }
}

/// A widget-defined event, e.g. a button's `"action"` or a slider's `"change"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionEvent {
    /// Free-form event type string.
    pub event_type: Cow<'static, str>,
    /// Host timestamp in milliseconds.
    pub timestamp: u64,
}

impl ActionEvent {
    /// Create an action event.
    pub fn new(event_type: impl Into<Cow<'static, str>>, timestamp: u64) -> Self {
        Self {
            event_type: event_type.into(),
            timestamp,
        }
    }
}

/// Any event a widget can dispatch to its listeners.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Pointer input.
    Mouse(MouseEvent),
    /// Keyboard input.
    Keyboard(KeyboardEvent),
    /// Widget-defined event.
    Action(ActionEvent),
}

impl Event {
    /// The type discriminant listeners are matched against.
    pub fn event_type(&self) -> &str {
        match self {
            Self::Mouse(e) => e.kind.as_str(),
            Self::Keyboard(e) => e.kind.as_str(),
            Self::Action(e) => &e.event_type,
        }
    }

    /// Host timestamp in milliseconds.
    pub fn timestamp(&self) -> u64 {
        match self {
            Self::Mouse(e) => e.timestamp,
            Self::Keyboard(e) => e.timestamp,
            Self::Action(e) => e.timestamp,
        }
    }
}

impl From<MouseEvent> for Event {
    fn from(e: MouseEvent) -> Self {
        Self::Mouse(e)
    }
}

impl From<KeyboardEvent> for Event {
    fn from(e: KeyboardEvent) -> Self {
        Self::Keyboard(e)
    }
}

impl From<ActionEvent> for Event {
    fn from(e: ActionEvent) -> Self {
        Self::Action(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_follows_payload_kind() {
        let click: Event = MouseEvent::new(MouseEventKind::Click, 5, Point::ZERO).into();
        assert_eq!(click.event_type(), "click");
        assert_eq!(click.timestamp(), 5);

        let key: Event = KeyboardEvent::new(KeyboardEventKind::KeyDown, 7, "Enter").into();
        assert_eq!(key.event_type(), "keydown");
        assert_eq!(key.timestamp(), 7);

        let action: Event = ActionEvent::new("action", 9).into();
        assert_eq!(action.event_type(), "action");
        assert_eq!(action.timestamp(), 9);
    }

    #[test]
    fn mouse_kinds_have_distinct_type_strings() {
        let kinds = [
            MouseEventKind::MouseDown,
            MouseEventKind::MouseUp,
            MouseEventKind::MouseMove,
            MouseEventKind::Click,
            MouseEventKind::DblClick,
            MouseEventKind::Drag,
            MouseEventKind::MouseEnter,
            MouseEventKind::MouseExit,
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a.as_str(), b.as_str(), "{a:?} and {b:?} collide");
            }
        }
    }

    #[test]
    fn constructors_default_to_no_modifiers() {
        let e = MouseEvent::new(MouseEventKind::MouseMove, 0, Point::new(1.0, 2.0));
        assert!(e.modifiers.is_empty());
        let k = KeyboardEvent::new(KeyboardEventKind::KeyUp, 0, "a");
        assert!(k.modifiers.is_empty());
    }
}
