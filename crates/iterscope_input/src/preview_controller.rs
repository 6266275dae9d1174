//! Preview controller for driving an external iterative system
//!
//! The controller owns no simulation state. It tracks pressed buttons, the
//! last cursor position, and the preview viewport, and turns raw window
//! events into the two entry points the simulation handle exposes: pointer
//! impulses and per-frame ticks.

use std::cell::RefCell;
use std::rc::Rc;

use bitflags::bitflags;
use winit::event::{ElementState, MouseButton};

/// An externally-owned iterative simulation, driven through input and tick
/// calls
///
/// The controller holds a shared handle for its own lifetime and releases it
/// exactly once on teardown. It never inspects the system's internal state;
/// any fault raised by the system propagates to the caller.
pub trait IterativeSystem {
    /// Inject a pointer impulse
    ///
    /// `x`/`y` are normalized to the preview viewport, `dx`/`dy` are the raw
    /// pixel swipe since the previous tracked position, and `button` is the
    /// code produced by [`PressedButtons::button_code`].
    fn pointer_input(&mut self, x: f32, y: f32, dx: f32, dy: f32, button: u32);

    /// Advance the system by one frame
    fn tick(&mut self);
}

bitflags! {
    /// Currently pressed mouse buttons
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PressedButtons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
        const OTHER = 1 << 3;
    }
}

impl PressedButtons {
    fn flag(button: MouseButton) -> PressedButtons {
        match button {
            MouseButton::Left => PressedButtons::LEFT,
            MouseButton::Right => PressedButtons::RIGHT,
            MouseButton::Middle => PressedButtons::MIDDLE,
            _ => PressedButtons::OTHER,
        }
    }

    /// Button code forwarded to the system: left alone is 0, middle alone is
    /// 2, every other non-empty combination is 1
    ///
    /// The exact-set comparisons keep chords (e.g. left+right) on the
    /// fallback code, matching the flags-equality behavior of the original
    /// event source.
    pub fn button_code(self) -> u32 {
        if self == PressedButtons::LEFT {
            0
        } else if self == PressedButtons::MIDDLE {
            2
        } else {
            1
        }
    }
}

/// Forwards pointer drags and frame ticks to a bound iterative system
///
/// Cursor positions are normalized against the viewport; swipe deltas stay
/// in raw pixels. The first movement after the cursor (re-)enters the
/// preview forwards a zero delta, since there is no previous position to
/// difference against.
pub struct PreviewController {
    system: Option<Rc<RefCell<dyn IterativeSystem>>>,
    viewport: (u32, u32),
    last_cursor: (f32, f32),
    has_last_cursor: bool,
    buttons: PressedButtons,
}

impl PreviewController {
    /// Create a controller bound to a system handle and an initial viewport
    pub fn new(system: Rc<RefCell<dyn IterativeSystem>>, width: u32, height: u32) -> Self {
        Self {
            system: Some(system),
            viewport: (width.max(1), height.max(1)),
            last_cursor: (0.0, 0.0),
            has_last_cursor: false,
            buttons: PressedButtons::empty(),
        }
    }

    /// Process a mouse button press or release
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        let flag = PressedButtons::flag(button);
        match state {
            ElementState::Pressed => self.buttons.insert(flag),
            ElementState::Released => self.buttons.remove(flag),
        }
    }

    /// Process the cursor entering the preview area
    ///
    /// Resets delta tracking: the next movement forwards a zero swipe.
    pub fn process_cursor_entered(&mut self) {
        self.has_last_cursor = false;
    }

    /// Process a cursor movement in window coordinates
    ///
    /// While any button is held, forwards one impulse to the system:
    /// normalized position, pixel swipe, button code. Position tracking is
    /// updated on every movement, pressed or not.
    pub fn process_cursor_moved(&mut self, x: f32, y: f32) {
        if !self.buttons.is_empty() {
            let (mut swipe_x, mut swipe_y) = (0.0, 0.0);
            if self.has_last_cursor {
                swipe_x = x - self.last_cursor.0;
                swipe_y = y - self.last_cursor.1;
            }
            let (width, height) = self.viewport;
            let code = self.buttons.button_code();
            if let Some(system) = &self.system {
                system.borrow_mut().pointer_input(
                    x / width as f32,
                    y / height as f32,
                    swipe_x,
                    swipe_y,
                    code,
                );
            }
        }
        self.last_cursor = (x, y);
        self.has_last_cursor = true;
    }

    /// Process a preview resize
    ///
    /// A degenerate zero-size viewport is clamped to 1 px so normalization
    /// stays defined during minimize.
    pub fn process_resize(&mut self, width: u32, height: u32) {
        self.viewport = (width.max(1), height.max(1));
    }

    /// Advance the bound system by one frame
    ///
    /// A no-op once the handle has been released.
    pub fn tick(&mut self) {
        if let Some(system) = &self.system {
            system.borrow_mut().tick();
        }
    }

    /// Release the system handle
    ///
    /// Idempotent: only the first call drops the controller's reference.
    pub fn release(&mut self) {
        if self.system.take().is_some() {
            log::debug!("Released iterative system handle");
        }
    }

    /// True while the controller still holds its system handle
    pub fn is_bound(&self) -> bool {
        self.system.is_some()
    }

    /// Currently pressed buttons
    pub fn pressed_buttons(&self) -> PressedButtons {
        self.buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every forwarded call for inspection
    #[derive(Default)]
    struct Recorder {
        impulses: Vec<(f32, f32, f32, f32, u32)>,
        ticks: usize,
    }

    impl IterativeSystem for Recorder {
        fn pointer_input(&mut self, x: f32, y: f32, dx: f32, dy: f32, button: u32) {
            self.impulses.push((x, y, dx, dy, button));
        }

        fn tick(&mut self) {
            self.ticks += 1;
        }
    }

    fn controller_with_recorder(
        width: u32,
        height: u32,
    ) -> (Rc<RefCell<Recorder>>, PreviewController) {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let controller = PreviewController::new(recorder.clone(), width, height);
        (recorder, controller)
    }

    #[test]
    fn test_no_forwarding_without_buttons() {
        let (recorder, mut controller) = controller_with_recorder(100, 100);
        controller.process_cursor_entered();
        controller.process_cursor_moved(10.0, 20.0);
        controller.process_cursor_moved(30.0, 40.0);
        assert!(recorder.borrow().impulses.is_empty());
    }

    #[test]
    fn test_first_move_has_zero_delta() {
        let (recorder, mut controller) = controller_with_recorder(200, 100);
        controller.process_cursor_entered();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(50.0, 25.0);

        let recorder = recorder.borrow();
        let impulses = &recorder.impulses;
        assert_eq!(impulses.len(), 1);
        let (x, y, dx, dy, button) = impulses[0];
        assert_eq!((x, y), (0.25, 0.25));
        assert_eq!((dx, dy), (0.0, 0.0));
        assert_eq!(button, 0);
    }

    #[test]
    fn test_subsequent_moves_carry_pixel_deltas() {
        let (recorder, mut controller) = controller_with_recorder(100, 100);
        controller.process_cursor_entered();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(10.0, 10.0);
        controller.process_cursor_moved(17.0, 6.0);

        let recorder = recorder.borrow();
        let impulses = &recorder.impulses;
        assert_eq!(impulses.len(), 2);
        let (_, _, dx, dy, _) = impulses[1];
        assert_eq!((dx, dy), (7.0, -4.0));
    }

    #[test]
    fn test_tracking_survives_unpressed_moves() {
        // Position tracking updates even without buttons, so the first
        // pressed move after hovering differences against the hover position.
        let (recorder, mut controller) = controller_with_recorder(100, 100);
        controller.process_cursor_entered();
        controller.process_cursor_moved(10.0, 10.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(13.0, 14.0);

        let recorder = recorder.borrow();
        let impulses = &recorder.impulses;
        assert_eq!(impulses.len(), 1);
        let (_, _, dx, dy, _) = impulses[0];
        assert_eq!((dx, dy), (3.0, 4.0));
    }

    #[test]
    fn test_reentry_resets_delta_tracking() {
        let (recorder, mut controller) = controller_with_recorder(100, 100);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(10.0, 10.0);
        controller.process_cursor_moved(20.0, 20.0);

        controller.process_cursor_entered();
        controller.process_cursor_moved(90.0, 90.0);

        let recorder = recorder.borrow();
        let impulses = &recorder.impulses;
        assert_eq!(impulses.len(), 3);
        let (_, _, dx, dy, _) = impulses[2];
        assert_eq!((dx, dy), (0.0, 0.0));
    }

    #[test]
    fn test_button_codes() {
        let (recorder, mut controller) = controller_with_recorder(100, 100);

        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(10.0, 10.0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Released);

        controller.process_mouse_button(MouseButton::Middle, ElementState::Pressed);
        controller.process_cursor_moved(20.0, 20.0);
        controller.process_mouse_button(MouseButton::Middle, ElementState::Released);

        controller.process_mouse_button(MouseButton::Right, ElementState::Pressed);
        controller.process_cursor_moved(30.0, 30.0);

        // Left+right chord falls back to the "other" code
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(40.0, 40.0);

        let codes: Vec<u32> = recorder
            .borrow()
            .impulses
            .iter()
            .map(|&(_, _, _, _, code)| code)
            .collect();
        assert_eq!(codes, vec![0, 2, 1, 1]);
    }

    #[test]
    fn test_positions_normalized_to_viewport() {
        let (recorder, mut controller) = controller_with_recorder(640, 480);
        controller.process_mouse_button(MouseButton::Middle, ElementState::Pressed);
        controller.process_cursor_moved(320.0, 120.0);

        let (x, y, _, _, _) = recorder.borrow().impulses[0];
        assert_eq!((x, y), (0.5, 0.25));
    }

    #[test]
    fn test_resize_changes_normalization() {
        let (recorder, mut controller) = controller_with_recorder(100, 100);
        controller.process_resize(400, 200);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(100.0, 100.0);

        let (x, y, _, _, _) = recorder.borrow().impulses[0];
        assert_eq!((x, y), (0.25, 0.5));
    }

    #[test]
    fn test_zero_viewport_clamped() {
        let (recorder, mut controller) = controller_with_recorder(100, 100);
        controller.process_resize(0, 0);
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(5.0, 5.0);

        let (x, y, _, _, _) = recorder.borrow().impulses[0];
        assert!(x.is_finite() && y.is_finite());
        assert_eq!((x, y), (5.0, 5.0));
    }

    #[test]
    fn test_release_is_idempotent() {
        let (recorder, mut controller) = controller_with_recorder(100, 100);
        assert_eq!(Rc::strong_count(&recorder), 2);
        assert!(controller.is_bound());

        controller.release();
        assert_eq!(Rc::strong_count(&recorder), 1);
        assert!(!controller.is_bound());

        controller.release();
        assert_eq!(Rc::strong_count(&recorder), 1);
    }

    #[test]
    fn test_tick_forwards_once_per_call() {
        let (recorder, mut controller) = controller_with_recorder(100, 100);
        controller.tick();
        controller.tick();
        assert_eq!(recorder.borrow().ticks, 2);
    }

    #[test]
    fn test_released_controller_is_inert() {
        let (recorder, mut controller) = controller_with_recorder(100, 100);
        controller.release();

        controller.tick();
        controller.process_mouse_button(MouseButton::Left, ElementState::Pressed);
        controller.process_cursor_moved(10.0, 10.0);

        assert_eq!(recorder.borrow().ticks, 0);
        assert!(recorder.borrow().impulses.is_empty());
    }

    #[test]
    fn test_button_code_table() {
        assert_eq!(PressedButtons::LEFT.button_code(), 0);
        assert_eq!(PressedButtons::MIDDLE.button_code(), 2);
        assert_eq!(PressedButtons::RIGHT.button_code(), 1);
        assert_eq!(PressedButtons::OTHER.button_code(), 1);
        assert_eq!((PressedButtons::LEFT | PressedButtons::RIGHT).button_code(), 1);
        assert_eq!((PressedButtons::LEFT | PressedButtons::MIDDLE).button_code(), 1);
    }
}
