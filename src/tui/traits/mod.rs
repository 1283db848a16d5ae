//! Component traits for the storefront TUI
//!
//! Panels own their own state (cursor, scroll position, search text) and
//! declare their capabilities through traits instead of App knowing how to
//! drive each one.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                           App                               │
//! │   (orchestrator: routes keys, applies intents, owns fetch)  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┼───────────────┐
//!              ▼               ▼               ▼
//!        ┌──────────┐   ┌────────────┐   ┌──────────┐
//!        │  Search  │   │ Categories │   │   Item   │
//!        │   Box    │   │    Menu    │   │   Grid   │
//!        └──────────┘   └────────────┘   └──────────┘
//!                              │
//!                     Implements traits:
//!                   Interactive, Scrollable
//! ```
//!
//! - [`Interactive`] - Components that handle keyboard input and may emit
//!   storefront intents
//! - [`Scrollable`] - Components with scrollable content

mod interactive;
mod scrollable;

pub use interactive::{Handled, Interactive};
pub use scrollable::Scrollable;
