// Storefront controller - the page-level reducer
//
// Owns the filter state, the list loader and the cart stub. Every user
// action arrives as an `Intent`; filter mutations reset the loader and hand
// back the first-page ticket for the caller to resolve. The controller knows
// nothing about terminals or tasks, which keeps it testable on its own.

use crate::catalog::{Product, ProductId};
use crate::filter::FilterState;
use crate::loader::{Applied, FetchOutcome, FetchTicket, ListLoader, LoaderView};

/// User intents forwarded by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    ToggleCategory(String),
    ClearCategories,
    SetSearch(String),
    /// Clear categories and search text (the "no results" escape hatch)
    ResetAll,
    LoadNext,
    Retry,
    AddToCart(ProductId),
    BuyNow(ProductId),
    SignIn,
}

pub struct Storefront {
    filter: FilterState,
    loader: ListLoader,
    cart: Vec<ProductId>,
}

impl Storefront {
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: FilterState::default(),
            loader: ListLoader::new(page_size),
            cart: Vec::new(),
        }
    }

    /// Start the first epoch with the current filter
    pub fn mount(&mut self) -> FetchTicket {
        self.loader.reset(self.filter.clone())
    }

    /// Apply an intent; returns a ticket when a fetch must be started
    pub fn dispatch(&mut self, intent: Intent) -> Option<FetchTicket> {
        match intent {
            Intent::ToggleCategory(label) => {
                let selected = self.filter.toggle_category(&label);
                tracing::info!(category = %label, selected, "category toggled");
                Some(self.refilter())
            }
            Intent::ClearCategories => {
                if self.filter.selected_categories().is_empty() {
                    return None;
                }
                self.filter.clear_all();
                tracing::info!("categories cleared");
                Some(self.refilter())
            }
            Intent::SetSearch(text) => {
                if text == self.filter.search_text() {
                    return None;
                }
                tracing::debug!(search = %text, "search changed");
                self.filter.set_search(text);
                Some(self.refilter())
            }
            Intent::ResetAll => {
                if self.filter.is_default() {
                    return None;
                }
                self.filter = FilterState::default();
                tracing::info!("filters reset");
                Some(self.refilter())
            }
            Intent::LoadNext => self.loader.load_next(),
            Intent::Retry => {
                let ticket = self.loader.retry();
                if ticket.is_some() {
                    tracing::info!(page = self.loader.page(), "retrying fetch");
                }
                ticket
            }
            Intent::AddToCart(id) => {
                self.cart.push(id);
                tracing::info!(
                    product = %id,
                    name = self.product_name(id),
                    cart = self.cart.len(),
                    "added to cart"
                );
                None
            }
            Intent::BuyNow(id) => {
                tracing::info!(product = %id, name = self.product_name(id), "buy now clicked");
                None
            }
            Intent::SignIn => {
                tracing::info!("sign in requested");
                None
            }
        }
    }

    /// Feed a fetch outcome to the loader
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        self.loader.apply(outcome)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn loader(&self) -> &ListLoader {
        &self.loader
    }

    pub fn view(&self) -> LoaderView<'_> {
        self.loader.view()
    }

    pub fn cart_count(&self) -> usize {
        self.cart.len()
    }

    /// Look up a product among the loaded items
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.loader.items().iter().find(|p| p.id == id)
    }

    fn product_name(&self, id: ProductId) -> &str {
        self.product(id).map(|p| p.name.as_str()).unwrap_or("?")
    }

    fn refilter(&mut self) -> FetchTicket {
        self.loader.reset(self.filter.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockCatalog;

    fn mounted() -> (Storefront, MockCatalog) {
        let catalog = MockCatalog::new();
        let mut store = Storefront::new(8);
        let ticket = store.mount();
        store.apply(ticket.resolve(&catalog));
        (store, catalog)
    }

    #[test]
    fn test_mount_loads_first_page() {
        let (store, _) = mounted();
        assert_eq!(store.view().items.len(), 8);
        assert!(store.view().has_more);
    }

    #[test]
    fn test_toggle_resets_loader_before_fetch() {
        let (mut store, catalog) = mounted();
        let epoch = store.loader().epoch();

        let ticket = store
            .dispatch(Intent::ToggleCategory("Accessories".to_string()))
            .expect("reset ticket");
        assert_ne!(ticket.epoch, epoch);
        assert_eq!(ticket.page, 1);
        assert!(store.view().items.is_empty());
        assert!(store.view().is_loading);

        store.apply(ticket.resolve(&catalog));
        assert_eq!(store.view().items.len(), 6);
        assert!(!store.view().has_more);
    }

    #[test]
    fn test_same_search_text_does_not_reset() {
        let (mut store, _) = mounted();
        store.dispatch(Intent::SetSearch("coat".to_string()));
        let epoch = store.loader().epoch();

        assert!(store.dispatch(Intent::SetSearch("coat".to_string())).is_none());
        assert_eq!(store.loader().epoch(), epoch);
    }

    #[test]
    fn test_clear_categories_without_selection_is_noop() {
        let (mut store, _) = mounted();
        assert!(store.dispatch(Intent::ClearCategories).is_none());
    }

    #[test]
    fn test_reset_all_returns_to_default_filter() {
        let (mut store, catalog) = mounted();
        let ticket = store
            .dispatch(Intent::ToggleCategory("Formal Wear".to_string()))
            .unwrap();
        store.apply(ticket.resolve(&catalog));
        assert!(store.view().is_empty_result());

        let ticket = store.dispatch(Intent::ResetAll).unwrap();
        assert!(store.filter().is_default());
        store.apply(ticket.resolve(&catalog));
        assert_eq!(store.view().items.len(), 8);
    }

    #[test]
    fn test_reset_all_on_default_filter_keeps_items() {
        let (mut store, catalog) = mounted();
        let epoch = store.loader().epoch();

        assert!(store.dispatch(Intent::ResetAll).is_none());
        assert_eq!(store.loader().epoch(), epoch);

        let next = store.dispatch(Intent::LoadNext).expect("page two");
        store.apply(next.resolve(&catalog));
        assert_eq!(store.view().items.len(), 16);
    }

    #[test]
    fn test_category_change_during_fetch_discards_old_page() {
        let (mut store, catalog) = mounted();
        let next = store.dispatch(Intent::LoadNext).expect("page two");

        let fresh = store
            .dispatch(Intent::ToggleCategory("Dresses".to_string()))
            .unwrap();
        assert_eq!(store.apply(next.resolve(&catalog)), Applied::Stale);
        store.apply(fresh.resolve(&catalog));

        let names: Vec<&str> = store.view().items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Evening Gown", "Summer Dress"]);
    }

    #[test]
    fn test_cart_stub_counts_items() {
        let (mut store, _) = mounted();
        assert!(store.dispatch(Intent::AddToCart(ProductId(3))).is_none());
        assert!(store.dispatch(Intent::AddToCart(ProductId(3))).is_none());
        assert!(store.dispatch(Intent::BuyNow(ProductId(1))).is_none());
        assert_eq!(store.cart_count(), 2);
    }

    #[test]
    fn test_product_lookup_uses_loaded_items() {
        let (store, _) = mounted();
        assert_eq!(
            store.product(ProductId(2)).map(|p| p.name.as_str()),
            Some("Evening Gown")
        );
        assert!(store.product(ProductId(16)).is_none());
    }
}
