// Copyright 2025 the Agenda Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer events, user callbacks and the tooltip seam.

extern crate alloc;

use alloc::boxed::Box;
use alloc::string::String;

use kurbo::Point;

/// What kind of pointer input happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// The pointer moved to `pos`.
    Move,
    /// The pointer left the surface.
    Leave,
    /// A click at `pos`.
    Click,
    /// A touch started at `pos`.
    TouchStart,
}

/// A pointer event in surface coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerKind,
    /// Position in surface coordinates.
    pub pos: Point,
}

impl PointerEvent {
    /// A pointer move to `pos`.
    pub fn moved(pos: impl Into<Point>) -> Self {
        Self {
            kind: PointerKind::Move,
            pos: pos.into(),
        }
    }

    /// The pointer leaving the surface.
    pub fn leave() -> Self {
        Self {
            kind: PointerKind::Leave,
            pos: Point::new(f64::NAN, f64::NAN),
        }
    }

    /// A click at `pos`.
    pub fn click(pos: impl Into<Point>) -> Self {
        Self {
            kind: PointerKind::Click,
            pos: pos.into(),
        }
    }

    /// A touch starting at `pos`.
    pub fn touch_start(pos: impl Into<Point>) -> Self {
        Self {
            kind: PointerKind::TouchStart,
            pos: pos.into(),
        }
    }
}

/// The detail display the charts delegate hover content to.
pub trait Tooltip {
    /// Shows `content` near the pointer position of `event`.
    fn show_tooltip(&mut self, content: &str, event: &PointerEvent);

    /// Hides the tooltip.
    fn hide_tooltip(&mut self);
}

impl<T: Tooltip + ?Sized> Tooltip for Box<T> {
    fn show_tooltip(&mut self, content: &str, event: &PointerEvent) {
        (**self).show_tooltip(content, event);
    }

    fn hide_tooltip(&mut self) {
        (**self).hide_tooltip();
    }
}

/// A tooltip that only records what it was asked to show.
///
/// Hosts read it back after dispatching events and draw it however they like.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipState {
    id: String,
    width: f64,
    content: String,
    anchor: Option<Point>,
    visible: bool,
}

impl TooltipState {
    /// Creates a hidden tooltip with an element id and a width.
    pub fn new(id: impl Into<String>, width: f64) -> Self {
        Self {
            id: id.into(),
            width,
            content: String::new(),
            anchor: None,
            visible: false,
        }
    }

    /// Element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Last shown content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Pointer position of the last show.
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    /// Whether the tooltip is showing.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Tooltip for TooltipState {
    fn show_tooltip(&mut self, content: &str, event: &PointerEvent) {
        self.content.clear();
        self.content.push_str(content);
        self.anchor = Some(event.pos);
        self.visible = true;
    }

    fn hide_tooltip(&mut self) {
        self.visible = false;
    }
}

/// A user callback: the hovered row, its dataset index, and the triggering event.
pub type Handler<R> = Box<dyn FnMut(&R, usize, &PointerEvent)>;

/// User callbacks for pointer interaction with data marks. Unset callbacks do nothing.
pub struct EventHandlers<R> {
    mouseover: Option<Handler<R>>,
    mouseout: Option<Handler<R>>,
    click: Option<Handler<R>>,
    touchstart: Option<Handler<R>>,
}

impl<R> Default for EventHandlers<R> {
    fn default() -> Self {
        Self {
            mouseover: None,
            mouseout: None,
            click: None,
            touchstart: None,
        }
    }
}

impl<R> core::fmt::Debug for EventHandlers<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventHandlers")
            .field("mouseover", &self.mouseover.is_some())
            .field("mouseout", &self.mouseout.is_some())
            .field("click", &self.click.is_some())
            .field("touchstart", &self.touchstart.is_some())
            .finish()
    }
}

impl<R> EventHandlers<R> {
    /// Runs after the pointer moves onto a mark.
    pub fn on_mouseover(mut self, f: impl FnMut(&R, usize, &PointerEvent) + 'static) -> Self {
        self.mouseover = Some(Box::new(f));
        self
    }

    /// Runs after the pointer moves off a mark.
    pub fn on_mouseout(mut self, f: impl FnMut(&R, usize, &PointerEvent) + 'static) -> Self {
        self.mouseout = Some(Box::new(f));
        self
    }

    /// Runs on a click on a mark.
    pub fn on_click(mut self, f: impl FnMut(&R, usize, &PointerEvent) + 'static) -> Self {
        self.click = Some(Box::new(f));
        self
    }

    /// Runs on a touch start on a mark.
    pub fn on_touchstart(mut self, f: impl FnMut(&R, usize, &PointerEvent) + 'static) -> Self {
        self.touchstart = Some(Box::new(f));
        self
    }

    pub(crate) fn mouseover(&mut self, row: &R, index: usize, event: &PointerEvent) {
        if let Some(f) = &mut self.mouseover {
            f(row, index, event);
        }
    }

    pub(crate) fn mouseout(&mut self, row: &R, index: usize, event: &PointerEvent) {
        if let Some(f) = &mut self.mouseout {
            f(row, index, event);
        }
    }

    pub(crate) fn pressed(&mut self, row: &R, index: usize, event: &PointerEvent) {
        let f = match event.kind {
            PointerKind::Click => &mut self.click,
            PointerKind::TouchStart => &mut self.touchstart,
            PointerKind::Move | PointerKind::Leave => return,
        };
        if let Some(f) = f {
            f(row, index, event);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::*;

    #[test]
    fn tooltip_state_records_content_and_anchor() {
        let mut tip = TooltipState::new("parties_tooltip", 200.0);
        assert!(!tip.is_visible());
        tip.show_tooltip("Greens", &PointerEvent::moved((40.0, 60.0)));
        assert!(tip.is_visible());
        assert_eq!(tip.content(), "Greens");
        assert_eq!(tip.anchor(), Some(Point::new(40.0, 60.0)));
        tip.hide_tooltip();
        assert!(!tip.is_visible());
        assert_eq!(tip.content(), "Greens", "content survives hiding");
    }

    #[test]
    fn pressed_routes_by_event_kind() {
        let clicks = Rc::new(Cell::new(0));
        let touches = Rc::new(Cell::new(0));
        let (c, t) = (clicks.clone(), touches.clone());
        let mut handlers = EventHandlers::<u8>::default()
            .on_click(move |_, _, _| c.set(c.get() + 1))
            .on_touchstart(move |_, _, _| t.set(t.get() + 1));

        handlers.pressed(&0, 0, &PointerEvent::click((1.0, 1.0)));
        handlers.pressed(&0, 0, &PointerEvent::touch_start((1.0, 1.0)));
        handlers.pressed(&0, 0, &PointerEvent::moved((1.0, 1.0)));
        assert_eq!((clicks.get(), touches.get()), (1, 1));
    }
}
