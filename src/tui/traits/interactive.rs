//! Interactive trait for components that handle keyboard input
//!
//! The App routes input to the focused component. A component either
//! consumes the key locally, asks the App to apply a storefront intent,
//! or lets the key bubble up.

use crate::storefront::Intent;
use crossterm::event::KeyEvent;

/// Result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was consumed and the storefront should apply this intent
    Emit(Intent),
    /// Event was not handled, should bubble up
    No,
}

/// Trait for components that handle keyboard input
///
/// # Event Flow
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// App (modal, then global keys: ?, q, Tab)
///    │
///    │ if not handled
///    ▼
/// Focused Component (via Interactive trait)
///    │
///    │ returns Handled::Yes, Handled::Emit(intent) or Handled::No
///    ▼
/// App (dispatches emitted intents to the storefront)
/// ```
pub trait Interactive {
    /// Handle a key event
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hints shown in the status bar while focused
    fn focus_hint(&self) -> &'static str;
}
