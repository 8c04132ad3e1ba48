//! The generic report shared by source and target namespaces.

use core::fmt;
use core::marker::PhantomData;

use crate::axis::{AXIS_MAX, Axis, clamp_axis};
use crate::buttons::{Button, ButtonId, TargetButton};

/// Button mask plus four stick axes, tagged with its button namespace.
pub struct Report<B: ButtonId> {
    buttons: u32,
    axes: [i16; 4],
    _namespace: PhantomData<fn() -> B>,
}

/// Report produced by vendor parsers.
pub type CanonicalReport = Report<Button>;

/// Report produced by the remapper and consumed by the target encoder.
pub type TargetReport = Report<TargetButton>;

impl<B: ButtonId> Report<B> {
    /// All buttons released, sticks centred.
    pub const fn new() -> Self {
        Self {
            buttons: 0,
            axes: [0; 4],
            _namespace: PhantomData,
        }
    }

    /// Raw button mask.
    #[inline]
    pub const fn buttons(&self) -> u32 {
        self.buttons
    }

    /// Replace the whole button mask. Bits outside the namespace are dropped.
    pub fn set_buttons(&mut self, mask: u32) {
        let valid = B::ALL.iter().fold(0u32, |acc, b| acc | b.mask());
        self.buttons = mask & valid;
    }

    /// OR `mask` into the button mask.
    pub fn press_mask(&mut self, mask: u32) {
        let valid = B::ALL.iter().fold(0u32, |acc, b| acc | b.mask());
        self.buttons |= mask & valid;
    }

    pub fn press(&mut self, button: B) {
        self.buttons |= button.mask();
    }

    pub fn set(&mut self, button: B, pressed: bool) {
        if pressed {
            self.buttons |= button.mask();
        } else {
            self.buttons &= !button.mask();
        }
    }

    #[inline]
    pub fn is_pressed(&self, button: B) -> bool {
        self.buttons & button.mask() != 0
    }

    /// Iterate over pressed buttons in bit order.
    pub fn pressed(&self) -> impl Iterator<Item = B> + '_ {
        B::ALL.iter().copied().filter(|b| self.is_pressed(*b))
    }

    #[inline]
    pub const fn axis(&self, axis: Axis) -> i16 {
        self.axes[axis.index()]
    }

    /// Set an axis, clamping into the canonical range.
    pub fn set_axis(&mut self, axis: Axis, value: i32) {
        self.axes[axis.index()] = clamp_axis(value);
    }

    /// Add `delta` to an axis with clamping.
    pub fn accumulate_axis(&mut self, axis: Axis, delta: i32) {
        let current = i32::from(self.axes[axis.index()]);
        self.axes[axis.index()] = clamp_axis(current.saturating_add(delta));
    }

    /// All four axes in [`Axis::ALL`] order.
    #[inline]
    pub const fn axes(&self) -> [i16; 4] {
        self.axes
    }

    /// Magnitude of `axis` in the given direction, `0..=AXIS_MAX`.
    pub fn directional_magnitude(&self, axis: Axis, positive: bool) -> i16 {
        let v = self.axes[axis.index()];
        let m = if positive { v } else { v.saturating_neg() };
        m.clamp(0, AXIS_MAX)
    }

    /// Release every button and centre every axis.
    pub fn clear(&mut self) {
        self.buttons = 0;
        self.axes = [0; 4];
    }

    /// `true` when nothing is pressed and every axis is centred.
    pub fn is_neutral(&self) -> bool {
        self.buttons == 0 && self.axes == [0; 4]
    }
}

impl<B: ButtonId> Default for Report<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ButtonId> Clone for Report<B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: ButtonId> Copy for Report<B> {}

impl<B: ButtonId> PartialEq for Report<B> {
    fn eq(&self, other: &Self) -> bool {
        self.buttons == other.buttons && self.axes == other.axes
    }
}

impl<B: ButtonId> Eq for Report<B> {}

impl<B: ButtonId> fmt::Debug for Report<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Report")
            .field("pressed", &self.pressed().collect::<Vec<_>>())
            .field("axes", &self.axes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut r = CanonicalReport::new();
        r.press(Button::South);
        r.set(Button::L1, true);
        assert!(r.is_pressed(Button::South));
        assert!(r.is_pressed(Button::L1));
        r.set(Button::South, false);
        assert!(!r.is_pressed(Button::South));
        assert_eq!(r.pressed().collect::<Vec<_>>(), vec![Button::L1]);
    }

    #[test]
    fn test_foreign_bits_are_masked() {
        let mut r = CanonicalReport::new();
        r.set_buttons(u32::MAX);
        assert_eq!(r.pressed().count(), Button::ALL.len());
        assert_eq!(r.buttons() >> Button::ALL.len(), 0);
    }

    #[test]
    fn test_axis_accumulates_with_clamp() {
        let mut r = TargetReport::new();
        r.accumulate_axis(Axis::LeftX, 900);
        r.accumulate_axis(Axis::LeftX, 900);
        assert_eq!(r.axis(Axis::LeftX), AXIS_MAX);
        r.accumulate_axis(Axis::LeftX, -5000);
        assert_eq!(r.axis(Axis::LeftX), -AXIS_MAX);
    }

    #[test]
    fn test_directional_magnitude() {
        let mut r = CanonicalReport::new();
        r.set_axis(Axis::LeftY, -600);
        assert_eq!(r.directional_magnitude(Axis::LeftY, false), 600);
        assert_eq!(r.directional_magnitude(Axis::LeftY, true), 0);
    }

    #[test]
    fn test_clear_is_neutral() {
        let mut r = CanonicalReport::new();
        r.press(Button::Home);
        r.set_axis(Axis::RightX, 10);
        assert!(!r.is_neutral());
        r.clear();
        assert!(r.is_neutral());
        assert_eq!(r, CanonicalReport::default());
    }
}
