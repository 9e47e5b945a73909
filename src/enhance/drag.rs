// src/enhance/drag.rs
//
// Press-and-drag over checkboxes. A press records the pressed box's state;
// once the pointer moves after the threshold has elapsed, every box crossed is
// forced to the opposite of that recorded state until release.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DragTracker {
    pressed_at: Option<u64>,
    dragging: bool,
    initial: bool,
}

impl DragTracker {
    pub fn new() -> Self { Self::default() }

    /// Pointer went down on a checkbox whose state was `checked`.
    pub fn press(&mut self, checked: bool, now_ms: u64) {
        self.pressed_at = Some(now_ms);
        self.dragging = false;
        self.initial = checked;
    }

    /// Pointer moved. Returns the state to force onto the box under the
    /// pointer, or `None` when not dragging.
    pub fn motion(&mut self, now_ms: u64, threshold_ms: u64) -> Option<bool> {
        let pressed = self.pressed_at?;
        if !self.dragging && now_ms.saturating_sub(pressed) > threshold_ms {
            self.dragging = true;
        }
        self.dragging.then_some(!self.initial)
    }

    /// Pointer released or left the widget.
    pub fn release(&mut self) {
        self.pressed_at = None;
        self.dragging = false;
    }

    pub fn is_pressed(&self) -> bool { self.pressed_at.is_some() }
    pub fn is_dragging(&self) -> bool { self.dragging }
}
