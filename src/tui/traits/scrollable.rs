//! Scrollable trait for components with scrollable content
//!
//! Components own their `ScrollState` and expose it through this trait to
//! get uniform scroll behavior.

use crate::tui::scroll::ScrollState;

/// Trait for components with scrollable content
///
/// Components only need to implement `scroll_state_mut()`; navigation
/// delegates to `ScrollState`.
pub trait Scrollable {
    fn scroll_state_mut(&mut self) -> &mut ScrollState;

    fn scroll_up(&mut self) {
        self.scroll_state_mut().scroll_up();
    }

    fn scroll_down(&mut self) {
        self.scroll_state_mut().scroll_down();
    }

    fn scroll_to_top(&mut self) {
        self.scroll_state_mut().scroll_to_top();
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_state_mut().scroll_to_bottom();
    }

    fn page_up(&mut self) {
        self.scroll_state_mut().page_up();
    }

    fn page_down(&mut self) {
        self.scroll_state_mut().page_down();
    }
}
