// Input handling with configurable key behaviors
//
// - State-change keys trigger once per press (add to cart must not fire
//   three times because the key was held)
// - Repeatable keys trigger on press, then repeat while held (grid scrolling)
//
// Typing into the search box bypasses this entirely; text input is never
// debounced.

use crossterm::event::KeyCode;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Minimum gap between two triggers of a held state-change key
/// Covers terminals that never send Release events
const STATE_CHANGE_DEBOUNCE: Duration = Duration::from_millis(150);

/// Defines how a key should behave when pressed/held
#[derive(Debug, Clone, Copy)]
pub enum KeyBehavior {
    /// Trigger only on state change (press → release)
    StateChange,

    /// Trigger on press, then repeat after initial delay
    Repeatable {
        /// Delay before starting to repeat
        initial_delay: Duration,
        /// Time between repeats
        repeat_interval: Duration,
    },
}

impl KeyBehavior {
    /// Arrow keys
    pub fn navigation() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(400),
            repeat_interval: Duration::from_millis(50),
        }
    }

    /// PageUp/PageDown
    pub fn fast_navigation() -> Self {
        Self::Repeatable {
            initial_delay: Duration::from_millis(300),
            repeat_interval: Duration::from_millis(30),
        }
    }
}

#[derive(Debug, Default)]
struct KeyState {
    is_pressed: bool,
    press_started: Option<Instant>,
    last_triggered: Option<Instant>,
}

impl KeyState {
    fn release(&mut self) {
        *self = Self::default();
    }
}

/// Input handler that manages key behaviors
pub struct InputHandler {
    key_states: HashMap<KeyCode, KeyState>,
    key_behaviors: HashMap<KeyCode, KeyBehavior>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            key_states: HashMap::new(),
            key_behaviors: HashMap::new(),
        }
    }

    pub fn configure_key(&mut self, key: KeyCode, behavior: KeyBehavior) {
        self.key_behaviors.insert(key, behavior);
    }

    pub fn configure_keys(&mut self, keys: &[KeyCode], behavior: KeyBehavior) {
        for key in keys {
            self.configure_key(*key, behavior);
        }
    }

    /// Handle a key press event
    /// Returns true if the action should be triggered
    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        let now = Instant::now();
        let behavior = self
            .key_behaviors
            .get(&key)
            .copied()
            .unwrap_or(KeyBehavior::StateChange);

        let state = self.key_states.entry(key).or_default();

        if !state.is_pressed {
            // New key press - always trigger
            state.is_pressed = true;
            state.press_started = Some(now);
            state.last_triggered = Some(now);
            return true;
        }

        match behavior {
            KeyBehavior::StateChange => match state.last_triggered {
                Some(last) if now.duration_since(last) >= STATE_CHANGE_DEBOUNCE => {
                    state.last_triggered = Some(now);
                    true
                }
                _ => false,
            },
            KeyBehavior::Repeatable {
                initial_delay,
                repeat_interval,
            } => {
                let (Some(press_start), Some(last_trigger)) =
                    (state.press_started, state.last_triggered)
                else {
                    return false;
                };
                if now.duration_since(press_start) >= initial_delay
                    && now.duration_since(last_trigger) >= repeat_interval
                {
                    state.last_triggered = Some(now);
                    return true;
                }
                false
            }
        }
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        if let Some(state) = self.key_states.get_mut(&key) {
            state.release();
        }
    }

    /// Storefront key configuration
    pub fn with_default_config() -> Self {
        let mut handler = Self::new();

        handler.configure_keys(
            &[
                KeyCode::Up,
                KeyCode::Down,
                KeyCode::Left,
                KeyCode::Right,
                KeyCode::Char('j'),
                KeyCode::Char('k'),
            ],
            KeyBehavior::navigation(),
        );

        handler.configure_keys(
            &[
                KeyCode::PageUp,
                KeyCode::PageDown,
                KeyCode::Home,
                KeyCode::End,
            ],
            KeyBehavior::fast_navigation(),
        );

        handler.configure_keys(
            &[
                KeyCode::Enter,
                KeyCode::Esc,
                KeyCode::Tab,
                KeyCode::BackTab,
                KeyCode::Char(' '),
                KeyCode::Char('q'),
                KeyCode::Char('?'),
                KeyCode::Char('/'),
                // Storefront actions
                KeyCode::Char('a'),
                KeyCode::Char('b'),
                KeyCode::Char('c'),
                KeyCode::Char('i'),
                KeyCode::Char('r'),
                KeyCode::Char('R'),
            ],
            KeyBehavior::StateChange,
        );

        handler
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::with_default_config()
    }
}
