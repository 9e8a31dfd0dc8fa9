//! Pointer and keyboard input.
//!
//! [`InputAdapter`] turns raw pointer events into the Shadertoy-style
//! interaction vector the fragment shader reads as `iMouse`:
//!
//! - `xy`: current drag position,
//! - `z`: click x, positive while a button is held and negative after release,
//! - `w`: click y, positive only on the first frame after a press.
//!
//! Events are latched as they arrive; [`InputAdapter::frame`] reads them once
//! per rendered frame.

use glam::{Vec2, Vec4};
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, ModifiersState, PhysicalKey};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Left, // Default for other buttons
        }
    }
}

/// Keys the toy binds. Everything else arrives as `Other` with the
/// backend's raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Capture, or copy the label with ctrl.
    C,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Other(u32),
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyC => KeyCode::C,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::ArrowUp => KeyCode::Up,
            WinitKeyCode::ArrowDown => KeyCode::Down,
            WinitKeyCode::ArrowLeft => KeyCode::Left,
            WinitKeyCode::ArrowRight => KeyCode::Right,
            _ => KeyCode::Other(key as u32),
        }
    }
}

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        Self {
            ctrl: state.control_key(),
            shift: state.shift_key(),
            alt: state.alt_key(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Pressed,
    Released,
}

/// A keyboard event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub key: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn pressed(key: KeyCode) -> Self {
        Self {
            kind: KeyEventKind::Pressed,
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn released(key: KeyCode) -> Self {
        Self {
            kind: KeyEventKind::Released,
            key,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }
}

/// A pointer event with its position in host pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    ButtonDown { button: MouseButton, position: Vec2 },
    ButtonUp { button: MouseButton, position: Vec2 },
    Move { position: Vec2 },
}

/// Whether a drag is in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerPhase {
    #[default]
    Idle,
    Dragging,
}

/// Pointer interaction state feeding the `iMouse` uniform.
#[derive(Debug, Clone)]
pub struct InputAdapter {
    phase: PointerPhase,
    click: Vec2,
    drag: Vec2,
    /// +1 while a button is held, -1 otherwise.
    sign: f32,
    /// Whether a button was held when the previous frame was read.
    was_down: bool,
    // winit button events carry no position
    cursor: Vec2,
    modifiers: Modifiers,
}

impl Default for InputAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl InputAdapter {
    pub fn new() -> Self {
        Self {
            phase: PointerPhase::Idle,
            click: Vec2::ZERO,
            drag: Vec2::ZERO,
            sign: -1.0,
            was_down: false,
            cursor: Vec2::ZERO,
            modifiers: Modifiers::default(),
        }
    }

    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    /// Latched click origin.
    pub fn click_position(&self) -> Vec2 {
        self.click
    }

    /// Current drag position.
    pub fn drag_position(&self) -> Vec2 {
        self.drag
    }

    pub fn is_button_down(&self) -> bool {
        self.sign > 0.0
    }

    /// Feed one pointer event.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        match *event {
            PointerEvent::ButtonDown { button, position } if drives_interaction(button) => {
                self.click = position;
                self.drag = position;
                self.sign = 1.0;
                self.phase = PointerPhase::Dragging;
            }
            PointerEvent::ButtonUp { button, position } if drives_interaction(button) => {
                self.drag = position;
                self.sign = -1.0;
                self.phase = PointerPhase::Idle;
            }
            PointerEvent::Move { position } => {
                if self.phase == PointerPhase::Dragging {
                    self.drag = position;
                }
            }
            _ => {}
        }
    }

    /// Interaction vector for this frame. Call exactly once per rendered frame.
    pub fn frame(&mut self) -> Vec4 {
        let down = self.is_button_down();
        let just_pressed = down && !self.was_down;
        self.was_down = down;

        let w = self.click.y.abs() * if just_pressed { 1.0 } else { -1.0 };
        Vec4::new(self.drag.x, self.drag.y, self.click.x * self.sign, w)
    }

    /// Translate a winit window event, returning the pointer or key event it
    /// produced, if any.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                let pointer = PointerEvent::Move { position: self.cursor };
                self.handle_pointer(&pointer);
                Some(InputEvent::Pointer(pointer))
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = MouseButton::from(*button);
                let position = self.cursor;
                let pointer = match state {
                    ElementState::Pressed => PointerEvent::ButtonDown { button, position },
                    ElementState::Released => PointerEvent::ButtonUp { button, position },
                };
                self.handle_pointer(&pointer);
                Some(InputEvent::Pointer(pointer))
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = Modifiers::from(modifiers.state());
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return None;
                };
                let kind = match event.state {
                    ElementState::Pressed => KeyEventKind::Pressed,
                    ElementState::Released => KeyEventKind::Released,
                };
                Some(InputEvent::Key(KeyEvent {
                    kind,
                    key: KeyCode::from(code),
                    modifiers: self.modifiers,
                }))
            }
            _ => None,
        }
    }
}

/// Event produced by [`InputAdapter::handle_window_event`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Key(KeyEvent),
}

fn drives_interaction(button: MouseButton) -> bool {
    matches!(button, MouseButton::Left | MouseButton::Right)
}
