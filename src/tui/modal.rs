// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crate::catalog::ProductId;
use crate::storefront::Intent;
use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    /// Close the modal
    Close,
    /// Close the modal and apply the intent
    Emit(Intent),
}

/// Available modal types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    /// Help overlay - shows keyboard shortcuts
    Help,
    /// Product card enlarged, with cart actions
    Product(ProductId),
}

impl Modal {
    pub fn help() -> Self {
        Modal::Help
    }

    pub fn product(id: ProductId) -> Self {
        Modal::Product(id)
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&mut self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Product(id) => match key {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => ModalAction::Close,
                KeyCode::Char('a') => ModalAction::Emit(Intent::AddToCart(*id)),
                KeyCode::Char('b') => ModalAction::Emit(Intent::BuyNow(*id)),
                _ => ModalAction::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_closes_on_toggle_key() {
        let mut modal = Modal::help();
        assert_eq!(modal.handle_input(KeyCode::Char('x')), ModalAction::None);
        assert_eq!(modal.handle_input(KeyCode::Char('?')), ModalAction::Close);
    }

    #[test]
    fn test_product_modal_emits_cart_intents() {
        let mut modal = Modal::product(ProductId(7));
        assert_eq!(
            modal.handle_input(KeyCode::Char('a')),
            ModalAction::Emit(Intent::AddToCart(ProductId(7)))
        );
        assert_eq!(
            modal.handle_input(KeyCode::Char('b')),
            ModalAction::Emit(Intent::BuyNow(ProductId(7)))
        );
        assert_eq!(modal.handle_input(KeyCode::Esc), ModalAction::Close);
    }
}
