// Input state tracking for keyboard and mouse
// Abstracts winit events into a queryable per-frame snapshot, then resolves
// named actions ("Move", "Click") against it through an ActionMap

use std::collections::{HashMap, HashSet};

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::detector::InputSource;

pub struct InputState {
    // Keyboard
    keys_held: HashSet<KeyCode>,

    // Mouse
    buttons_held: HashSet<MouseButton>,

    // Scroll: accumulated vertical scroll this frame, reset in end_frame()
    pub scroll_delta: f32,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

impl InputState {
    pub fn new() -> Self {
        Self {
            keys_held: HashSet::new(),
            buttons_held: HashSet::new(),
            scroll_delta: 0.0,
        }
    }

    /// Feed a winit WindowEvent into the input state.
    /// Call this once per event before the game's own event handling.
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.set_key(key, event.state == ElementState::Pressed);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.set_button(*button, *state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                self.scroll_delta += y;
            }
            // Keys released while unfocused never send a release event.
            WindowEvent::Focused(false) => {
                self.keys_held.clear();
                self.buttons_held.clear();
            }
            _ => {}
        }
    }

    /// Call once per frame after update() and render() have consumed input.
    /// Resets per-frame accumulators.
    pub fn end_frame(&mut self) {
        self.scroll_delta = 0.0;
    }

    pub fn set_key(&mut self, key: KeyCode, held: bool) {
        if held {
            self.keys_held.insert(key);
        } else {
            self.keys_held.remove(&key);
        }
    }

    pub fn set_button(&mut self, button: MouseButton, held: bool) {
        if held {
            self.buttons_held.insert(button);
        } else {
            self.buttons_held.remove(&button);
        }
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    pub fn is_button_held(&self, button: MouseButton) -> bool {
        self.buttons_held.contains(&button)
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// One physical control an action listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Key(KeyCode),
    Mouse(MouseButton),
    /// Four keys read as a 2D vector: up/down drive Y, left/right drive X.
    Composite2d {
        up: KeyCode,
        down: KeyCode,
        left: KeyCode,
        right: KeyCode,
    },
}

impl Binding {
    fn is_held(&self, state: &InputState) -> bool {
        match *self {
            Binding::Key(key) => state.is_key_held(key),
            Binding::Mouse(button) => state.is_button_held(button),
            Binding::Composite2d { .. } => self.value(state) != Vec2::ZERO,
        }
    }

    fn value(&self, state: &InputState) -> Vec2 {
        match *self {
            Binding::Composite2d { up, down, left, right } => {
                let axis = |pos: KeyCode, neg: KeyCode| {
                    state.is_key_held(pos) as i32 as f32 - state.is_key_held(neg) as i32 as f32
                };
                Vec2::new(axis(right, left), axis(up, down))
            }
            _ => Vec2::ZERO,
        }
    }
}

/// Named actions and the controls bound to them.
#[derive(Debug, Clone, Default)]
pub struct ActionMap {
    actions: HashMap<String, Vec<Binding>>,
}

impl ActionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// "Move" on WASD and the arrow keys, "Click" on the left mouse button.
    pub fn with_default_bindings() -> Self {
        let mut map = Self::new();
        map.bind(
            "Move",
            Binding::Composite2d {
                up: KeyCode::KeyW,
                down: KeyCode::KeyS,
                left: KeyCode::KeyA,
                right: KeyCode::KeyD,
            },
        );
        map.bind(
            "Move",
            Binding::Composite2d {
                up: KeyCode::ArrowUp,
                down: KeyCode::ArrowDown,
                left: KeyCode::ArrowLeft,
                right: KeyCode::ArrowRight,
            },
        );
        map.bind("Click", Binding::Mouse(MouseButton::Left));
        map
    }

    pub fn bind(&mut self, action: &str, binding: Binding) {
        self.actions
            .entry(action.to_string())
            .or_default()
            .push(binding);
    }

    /// Resolve every action against the current input state.
    ///
    /// Vector actions sum their composites and are clamped to unit length, so
    /// diagonal input is not faster than straight input.
    pub fn snapshot(&self, state: &InputState) -> InputSnapshot {
        let mut snapshot = InputSnapshot::default();
        for (action, bindings) in &self.actions {
            snapshot.bound.insert(action.clone());
            if bindings.iter().any(|b| b.is_held(state)) {
                snapshot.pressed.insert(action.clone());
            }
            let value: Vec2 = bindings.iter().map(|b| b.value(state)).sum();
            if value != Vec2::ZERO {
                snapshot.axes.insert(action.clone(), value.clamp_length_max(1.0));
            }
        }
        snapshot
    }
}

/// Resolved action values for one frame. Plain data, detached from winit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    bound: HashSet<String>,
    pressed: HashSet<String>,
    axes: HashMap<String, Vec2>,
}

impl InputSnapshot {
    /// Mark `action` as bound and held this frame.
    pub fn with_pressed(mut self, action: &str) -> Self {
        self.bound.insert(action.to_string());
        self.pressed.insert(action.to_string());
        self
    }

    /// Mark `action` as bound with the given 2D value; held iff the value is non-zero.
    pub fn with_axis(mut self, action: &str, value: Vec2) -> Self {
        self.bound.insert(action.to_string());
        if value != Vec2::ZERO {
            self.pressed.insert(action.to_string());
            self.axes.insert(action.to_string(), value);
        }
        self
    }

    /// Mark `action` as bound but idle.
    pub fn with_bound(mut self, action: &str) -> Self {
        self.bound.insert(action.to_string());
        self
    }
}

impl InputSource for InputSnapshot {
    fn has_action(&self, action: &str) -> bool {
        self.bound.contains(action)
    }

    fn is_pressed(&self, action: &str) -> bool {
        self.pressed.contains(action)
    }

    fn read_vec2(&self, action: &str) -> Vec2 {
        self.axes.get(action).copied().unwrap_or(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_input_binds_but_does_not_press() {
        let map = ActionMap::with_default_bindings();
        let snap = map.snapshot(&InputState::new());
        assert!(snap.has_action("Move"));
        assert!(snap.has_action("Click"));
        assert!(!snap.has_action("Jump"));
        assert!(!snap.is_pressed("Move"));
        assert!(!snap.is_pressed("Click"));
        assert_eq!(snap.read_vec2("Move"), Vec2::ZERO);
    }

    #[test]
    fn composite_reads_direction() {
        let map = ActionMap::with_default_bindings();
        let mut state = InputState::new();
        state.set_key(KeyCode::KeyW, true);
        let snap = map.snapshot(&state);
        assert!(snap.is_pressed("Move"));
        assert_eq!(snap.read_vec2("Move"), Vec2::Y);

        state.set_key(KeyCode::KeyW, false);
        state.set_key(KeyCode::ArrowLeft, true);
        assert_eq!(map.snapshot(&state).read_vec2("Move"), Vec2::NEG_X);
    }

    #[test]
    fn diagonal_is_normalized() {
        let map = ActionMap::with_default_bindings();
        let mut state = InputState::new();
        state.set_key(KeyCode::KeyD, true);
        state.set_key(KeyCode::KeyS, true);
        let value = map.snapshot(&state).read_vec2("Move");
        assert!((value.length() - 1.0).abs() < 1e-5);
        assert!(value.x > 0.0 && value.y < 0.0);
    }

    #[test]
    fn opposing_keys_cancel() {
        let map = ActionMap::with_default_bindings();
        let mut state = InputState::new();
        state.set_key(KeyCode::KeyA, true);
        state.set_key(KeyCode::KeyD, true);
        let snap = map.snapshot(&state);
        assert!(!snap.is_pressed("Move"));
        assert_eq!(snap.read_vec2("Move"), Vec2::ZERO);
    }

    #[test]
    fn mouse_button_presses_click() {
        let map = ActionMap::with_default_bindings();
        let mut state = InputState::new();
        state.set_button(MouseButton::Left, true);
        assert!(map.snapshot(&state).is_pressed("Click"));
        state.set_button(MouseButton::Left, false);
        assert!(!map.snapshot(&state).is_pressed("Click"));
    }

    #[test]
    fn scroll_resets_each_frame() {
        let mut state = InputState::new();
        state.scroll_delta = 2.0;
        state.end_frame();
        assert_eq!(state.scroll_delta, 0.0);
    }

    #[test]
    fn snapshot_builder() {
        let snap = InputSnapshot::default()
            .with_axis("Move", Vec2::ZERO)
            .with_pressed("Click");
        assert!(snap.has_action("Move"));
        assert!(!snap.is_pressed("Move"));
        assert!(snap.is_pressed("Click"));
    }
}
