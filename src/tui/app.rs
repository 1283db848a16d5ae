// TUI application state
//
// App owns the storefront controller, the fetch worker and the UI components.
// Components emit intents; App applies them to the storefront and starts
// whatever fetch the storefront hands back. Fetch outcomes arrive over a
// channel and are applied between frames.
//
// The scroll sentinel's handler cannot borrow App, so it sends
// `Intent::LoadNext` over the intent channel; the event loop drains that
// channel right after each visibility check.

use super::components::{CategoryMenu, ItemGrid, LogsPanel, SearchBox, Toast};
use super::input::InputHandler;
use super::modal::Modal;
use super::scroll::FocusablePanel;
use super::traits::{Handled, Interactive, Scrollable};
use crate::catalog::CatalogSource;
use crate::config::Config;
use crate::fetch::Fetcher;
use crate::loader::{Applied, Epoch, FetchOutcome, FetchTicket};
use crate::logging::LogBuffer;
use crate::sentinel::{MarkerId, ScrollSentinel, SentinelStatus};
use crate::storefront::{Intent, Storefront};
use crate::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Receivers the event loop listens on
pub struct Channels {
    pub outcomes: mpsc::Receiver<FetchOutcome>,
    pub intents: mpsc::UnboundedReceiver<Intent>,
}

/// Main application state for the TUI
pub struct App {
    pub storefront: Storefront,
    fetcher: Fetcher,
    intent_tx: mpsc::UnboundedSender<Intent>,
    sentinel: ScrollSentinel,

    /// Panel receiving keyboard input
    pub focused: FocusablePanel,
    pub search: SearchBox,
    pub menu: CategoryMenu,
    pub grid: ItemGrid,
    pub logs_panel: LogsPanel,

    /// Shared with the tracing layer
    pub log_buffer: LogBuffer,
    pub theme: Theme,
    pub modal: Option<Modal>,
    pub toast: Option<Toast>,

    input_handler: InputHandler,
    pub should_quit: bool,
    animation_frame: usize,
}

impl App {
    pub fn new(
        config: &Config,
        log_buffer: LogBuffer,
        catalog: Arc<dyn CatalogSource>,
    ) -> (Self, Channels) {
        let (fetcher, outcomes) = Fetcher::new(catalog, config.fetch_delay);
        let (intent_tx, intents) = mpsc::unbounded_channel();

        let app = Self {
            storefront: Storefront::new(config.page_size),
            fetcher,
            intent_tx,
            sentinel: ScrollSentinel::new(),
            focused: FocusablePanel::default(),
            search: SearchBox::new(),
            menu: CategoryMenu::new(),
            grid: ItemGrid::new(MarkerId::for_epoch(Epoch::default())),
            logs_panel: LogsPanel::new(),
            log_buffer,
            theme: Theme::by_name_with_config(&config.theme, config.use_theme_background),
            modal: None,
            toast: None,
            input_handler: InputHandler::default(),
            should_quit: false,
            animation_frame: 0,
        };

        (app, Channels { outcomes, intents })
    }

    /// Load the first page of the default filter
    pub fn mount(&mut self) {
        let ticket = self.storefront.mount();
        self.start_fetch(ticket);
    }

    /// Stop reacting to marker visibility (called on shutdown)
    pub fn unmount(&mut self) {
        self.sentinel.detach();
    }

    fn start_fetch(&mut self, ticket: FetchTicket) {
        let marker = MarkerId::for_epoch(ticket.epoch);
        if marker != self.grid.marker() {
            // New epoch: fresh grid, and the sentinel watches the new marker only
            self.grid.reset(marker);
            let tx = self.intent_tx.clone();
            self.sentinel.attach(marker, move || {
                let _ = tx.send(Intent::LoadNext);
            });
        }
        self.fetcher.spawn(ticket);
    }

    /// Apply an intent to the storefront and start any fetch it asks for
    pub fn dispatch(&mut self, intent: Intent) {
        if intent == Intent::ResetAll {
            self.search.clear();
        }

        if let Some(ticket) = self.storefront.dispatch(intent.clone()) {
            self.start_fetch(ticket);
        }

        match intent {
            Intent::AddToCart(id) => {
                let message = match self.storefront.product(id) {
                    Some(product) => format!(
                        "Added {} to cart ({})",
                        product.name,
                        self.storefront.cart_count()
                    ),
                    None => format!("Added to cart ({})", self.storefront.cart_count()),
                };
                self.show_toast(message);
            }
            Intent::BuyNow(_) => self.toast = Some(Toast::notice("Checkout is not available yet")),
            Intent::SignIn => self.toast = Some(Toast::notice("Sign in is not available yet")),
            _ => {}
        }
    }

    /// Feed a fetch outcome to the storefront
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match self.storefront.apply(outcome) {
            Applied::Appended { count, exhausted } => {
                self.grid.sync_items(self.storefront.loader().items());
                if exhausted {
                    tracing::info!(
                        total = self.storefront.loader().items().len(),
                        last_page = count,
                        "all products loaded"
                    );
                }
            }
            Applied::Failed => {}
            Applied::Stale => {}
        }
    }

    /// Report marker visibility from the last frame; true if a load was requested
    pub fn poll_sentinel(&mut self) -> bool {
        let status = SentinelStatus::from(&self.storefront.view());
        self.sentinel
            .observe(self.grid.marker(), self.grid.marker_visible(), status)
    }

    // --- input ---

    pub fn handle_key_press(&mut self, key: KeyCode) -> bool {
        self.input_handler.handle_key_press(key)
    }

    pub fn handle_key_release(&mut self, key: KeyCode) {
        self.input_handler.handle_key_release(key);
    }

    /// Route a key to the focused panel, applying any intent it emits
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        let handled = match self.focused {
            FocusablePanel::Search => self.search.handle_key(key),
            FocusablePanel::Categories => self.menu.handle_key(key),
            FocusablePanel::Grid => self.grid.handle_key(key),
        };
        match handled {
            Handled::Emit(intent) => {
                self.dispatch(intent);
                Handled::Yes
            }
            other => other,
        }
    }

    /// Mouse wheel always scrolls the product grid
    pub fn scroll_grid(&mut self, down: bool) {
        if down {
            self.grid.scroll_down();
        } else {
            self.grid.scroll_up();
        }
    }

    /// Open the detail modal for the selected card
    pub fn open_selected_product(&mut self) {
        if let Some(id) = self.grid.selected_id() {
            self.modal = Some(Modal::product(id));
        }
    }

    // --- focus ---

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_prev(&mut self) {
        self.focused = self.focused.prev();
    }

    pub fn focus(&mut self, panel: FocusablePanel) {
        self.focused = panel;
    }

    pub fn is_focused(&self, panel: FocusablePanel) -> bool {
        self.focused == panel
    }

    pub fn focus_hint(&self) -> &'static str {
        match self.focused {
            FocusablePanel::Search => self.search.focus_hint(),
            FocusablePanel::Categories => self.menu.focus_hint(),
            FocusablePanel::Grid => self.grid.focus_hint(),
        }
    }

    // --- animation & toasts ---

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }
    }
}
