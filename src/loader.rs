// List loader - incremental pagination over the filtered catalog
//
// The loader owns the load state for exactly one filter epoch at a time.
// It never performs IO itself: it hands out `FetchTicket`s, and the caller
// resolves them (immediately, or on a tokio task after the simulated delay)
// and feeds the resulting `FetchOutcome` back through `apply`.
//
// State diagram (per epoch):
//
//   reset(F) ──▶ [Loading p=1] ──complete──▶ [Idle p=2] ──load_next──▶ [Loading p=2] ...
//                     │                          ▲                          │
//                     │ fail                     │ retry                    │ complete (last page)
//                     ▼                          │                          ▼
//                 [Failed p=1] ──────────────────┘                     [Exhausted]
//
// Every outcome carries the epoch of the ticket that produced it. Outcomes
// from an older epoch are discarded when they arrive; nothing relies on the
// order in which fetch tasks happen to finish.

use crate::catalog::{CatalogError, CatalogSource, Product};
use crate::filter::FilterState;
use std::fmt;
use std::ops::Range;

/// Filter epoch - one per call to `reset`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(u64);

impl Epoch {
    pub fn next(self) -> Self {
        Epoch(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// Retryable fetch failure surfaced to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    FetchFailed(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::FetchFailed(reason) => write!(f, "fetch failed: {}", reason),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<CatalogError> for FetchError {
    fn from(err: CatalogError) -> Self {
        FetchError::FetchFailed(err.to_string())
    }
}

/// A request for one page, stamped with the epoch it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub epoch: Epoch,
    /// 1-based page number
    pub page: usize,
    pub page_size: usize,
    pub filter: FilterState,
}

impl FetchTicket {
    /// Catalog index range covered by this page
    pub fn range(&self) -> Range<usize> {
        let start = self.page_size * (self.page - 1);
        start..start + self.page_size
    }

    /// Query the catalog and cut this ticket's page out of the result
    pub fn resolve(&self, catalog: &dyn CatalogSource) -> FetchOutcome {
        match catalog.query(&self.filter) {
            Ok(matches) => {
                let total_matches = matches.len();
                let range = self.range();
                let items = matches
                    .into_iter()
                    .skip(range.start)
                    .take(self.page_size)
                    .collect();
                FetchOutcome::Ready(Page {
                    epoch: self.epoch,
                    number: self.page,
                    items,
                    total_matches,
                })
            }
            Err(e) => FetchOutcome::Failed {
                epoch: self.epoch,
                page: self.page,
                error: e.into(),
            },
        }
    }
}

/// A resolved page of products
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub epoch: Epoch,
    pub number: usize,
    pub items: Vec<Product>,
    /// Size of the whole filtered result this page was cut from
    pub total_matches: usize,
}

impl Page {
    /// No page can follow this one: it came back short or reached the end
    pub fn is_last(&self, page_size: usize) -> bool {
        self.items.len() < page_size || page_size * self.number >= self.total_matches
    }
}

/// Result of resolving a ticket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Ready(Page),
    Failed {
        epoch: Epoch,
        page: usize,
        error: FetchError,
    },
}

impl FetchOutcome {
    pub fn epoch(&self) -> Epoch {
        match self {
            FetchOutcome::Ready(page) => page.epoch,
            FetchOutcome::Failed { epoch, .. } => *epoch,
        }
    }
}

/// What `apply` did with an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Page appended to the item list
    Appended { count: usize, exhausted: bool },
    /// Failure recorded; page and exhaustion unchanged
    Failed,
    /// Outcome belongs to another epoch or page and was dropped
    Stale,
}

/// Load state for the current epoch
#[derive(Debug, Clone)]
struct LoadState {
    /// Next page to fetch (1-based)
    page: usize,
    items: Vec<Product>,
    exhausted: bool,
    in_flight: bool,
    last_error: Option<FetchError>,
}

impl LoadState {
    fn fresh() -> Self {
        Self {
            page: 1,
            items: Vec::new(),
            exhausted: false,
            in_flight: false,
            last_error: None,
        }
    }
}

/// Snapshot handed to the presentation layer
#[derive(Debug, Clone, Copy)]
pub struct LoaderView<'a> {
    pub items: &'a [Product],
    pub is_loading: bool,
    pub has_more: bool,
    pub last_error: Option<&'a FetchError>,
}

impl LoaderView<'_> {
    /// Terminal "nothing matches" state, distinct from loading and failure
    pub fn is_empty_result(&self) -> bool {
        self.items.is_empty() && !self.has_more && !self.is_loading && self.last_error.is_none()
    }
}

/// Incremental page loader for one filter epoch at a time
pub struct ListLoader {
    page_size: usize,
    epoch: Epoch,
    filter: FilterState,
    state: LoadState,
}

impl ListLoader {
    /// Create an idle loader; call `reset` to start the first epoch
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            epoch: Epoch::default(),
            filter: FilterState::default(),
            state: LoadState::fresh(),
        }
    }

    /// Start a new epoch for `filter` and issue its first fetch
    ///
    /// Any fetch still in flight belongs to the previous epoch now; its
    /// outcome will be discarded by `apply`.
    pub fn reset(&mut self, filter: FilterState) -> FetchTicket {
        self.epoch = self.epoch.next();
        self.filter = filter;
        self.state = LoadState::fresh();
        tracing::debug!(epoch = %self.epoch, filter = %self.filter, "loader reset");
        self.begin()
    }

    /// Request the next page
    ///
    /// Returns `None` while a fetch is in flight, once the list is exhausted,
    /// or while a failure is waiting for `retry`. Dropped requests are not
    /// queued.
    pub fn load_next(&mut self) -> Option<FetchTicket> {
        if self.state.in_flight || self.state.exhausted || self.state.last_error.is_some() {
            return None;
        }
        Some(self.begin())
    }

    /// Re-issue the page whose fetch failed
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.state.in_flight || self.state.last_error.take().is_none() {
            return None;
        }
        Some(self.begin())
    }

    /// Feed a resolved ticket back into the loader
    pub fn apply(&mut self, outcome: FetchOutcome) -> Applied {
        match outcome {
            FetchOutcome::Ready(page) => self.complete(page),
            FetchOutcome::Failed { epoch, page, error } => self.fail(epoch, page, error),
        }
    }

    /// Append a fetched page if it belongs to the current epoch
    pub fn complete(&mut self, page: Page) -> Applied {
        if !self.is_current(page.epoch, page.number) {
            tracing::debug!(
                epoch = %page.epoch,
                current = %self.epoch,
                page = page.number,
                "discarding stale page"
            );
            return Applied::Stale;
        }

        let count = page.items.len();
        let exhausted = page.is_last(self.page_size);
        self.state.items.extend(page.items);
        self.state.exhausted = exhausted;
        self.state.page += 1;
        self.state.in_flight = false;

        tracing::debug!(
            epoch = %self.epoch,
            page = page.number,
            count,
            exhausted,
            total = self.state.items.len(),
            "page appended"
        );
        Applied::Appended { count, exhausted }
    }

    /// Record a failed fetch without advancing the page
    pub fn fail(&mut self, epoch: Epoch, page: usize, error: FetchError) -> Applied {
        if !self.is_current(epoch, page) {
            tracing::debug!(epoch = %epoch, current = %self.epoch, "discarding stale failure");
            return Applied::Stale;
        }

        tracing::warn!(epoch = %epoch, page, "{}", error);
        self.state.in_flight = false;
        self.state.last_error = Some(error);
        Applied::Failed
    }

    pub fn view(&self) -> LoaderView<'_> {
        LoaderView {
            items: &self.state.items,
            is_loading: self.state.in_flight,
            has_more: !self.state.exhausted,
            last_error: self.state.last_error.as_ref(),
        }
    }

    pub fn items(&self) -> &[Product] {
        &self.state.items
    }

    pub fn is_loading(&self) -> bool {
        self.state.in_flight
    }

    pub fn has_more(&self) -> bool {
        !self.state.exhausted
    }

    /// Next page number to be fetched
    pub fn page(&self) -> usize {
        self.state.page
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.state.last_error.as_ref()
    }

    fn begin(&mut self) -> FetchTicket {
        self.state.in_flight = true;
        FetchTicket {
            epoch: self.epoch,
            page: self.state.page,
            page_size: self.page_size,
            filter: self.filter.clone(),
        }
    }

    fn is_current(&self, epoch: Epoch, page: usize) -> bool {
        epoch == self.epoch && self.state.in_flight && page == self.state.page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MockCatalog, ProductId};

    fn ids(products: &[Product]) -> Vec<u32> {
        products.iter().map(|p| p.id.0).collect()
    }

    /// Resolve tickets synchronously until the loader stops handing them out
    fn drain(loader: &mut ListLoader, catalog: &MockCatalog, first: FetchTicket) -> usize {
        let mut fetches = 0;
        let mut ticket = Some(first);
        while let Some(t) = ticket {
            loader.apply(t.resolve(catalog));
            fetches += 1;
            ticket = loader.load_next();
        }
        fetches
    }

    #[test]
    fn test_unfiltered_catalog_loads_in_two_pages() {
        let catalog = MockCatalog::new();
        let mut loader = ListLoader::new(8);

        let ticket = loader.reset(FilterState::default());
        assert!(loader.is_loading());
        assert_eq!(
            loader.apply(ticket.resolve(&catalog)),
            Applied::Appended {
                count: 8,
                exhausted: false
            }
        );
        assert_eq!(ids(loader.items()), (1..=8).collect::<Vec<_>>());
        assert!(loader.has_more());
        assert!(!loader.is_loading());

        let ticket = loader.load_next().expect("second page");
        assert_eq!(ticket.page, 2);
        assert_eq!(
            loader.apply(ticket.resolve(&catalog)),
            Applied::Appended {
                count: 8,
                exhausted: true
            }
        );
        assert_eq!(ids(loader.items()), (1..=16).collect::<Vec<_>>());
        assert!(!loader.has_more());
        assert!(loader.load_next().is_none());
    }

    #[test]
    fn test_single_category_short_page_exhausts() {
        let catalog = MockCatalog::new();
        let mut loader = ListLoader::new(8);
        let mut filter = FilterState::default();
        filter.toggle_category("Accessories");

        let ticket = loader.reset(filter);
        loader.apply(ticket.resolve(&catalog));

        assert_eq!(ids(loader.items()), vec![4, 6, 9, 12, 13, 16]);
        assert!(!loader.has_more());
    }

    #[test]
    fn test_search_coat_matches_winter_coat() {
        let catalog = MockCatalog::new();
        let mut loader = ListLoader::new(8);
        let mut filter = FilterState::default();
        filter.set_search("coat");

        let ticket = loader.reset(filter);
        loader.apply(ticket.resolve(&catalog));

        assert_eq!(loader.items().len(), 1);
        assert_eq!(loader.items()[0].name, "Winter Coat");
        assert!(!loader.has_more());
    }

    #[test]
    fn test_empty_result_is_immediately_exhausted() {
        let catalog = MockCatalog::new();
        let mut loader = ListLoader::new(8);
        let mut filter = FilterState::default();
        filter.toggle_category("Formal Wear");

        let ticket = loader.reset(filter);
        loader.apply(ticket.resolve(&catalog));

        let view = loader.view();
        assert!(view.items.is_empty());
        assert!(!view.has_more);
        assert!(view.is_empty_result());
    }

    #[test]
    fn test_drain_yields_filtered_catalog_in_pages() {
        let catalog = MockCatalog::new();
        for page_size in [1, 3, 5, 8, 16, 40] {
            let mut filter = FilterState::default();
            filter.toggle_category("Accessories");
            filter.toggle_category("Suits");
            let expected = ids(&catalog.query(&filter).unwrap());

            let mut loader = ListLoader::new(page_size);
            let first = loader.reset(filter);
            let fetches = drain(&mut loader, &catalog, first);

            assert_eq!(ids(loader.items()), expected, "page_size={}", page_size);
            let pages = ((expected.len() + page_size - 1) / page_size).max(1);
            assert_eq!(fetches, pages, "page_size={}", page_size);
            assert!(!loader.has_more());
        }
    }

    #[test]
    fn test_drain_with_search_and_categories() {
        let catalog = MockCatalog::new();
        for page_size in [1, 2, 8] {
            let mut filter = FilterState::default();
            filter.toggle_category("Dresses");
            filter.toggle_category("Accessories");
            filter.set_search("  EVENING ");

            let mut loader = ListLoader::new(page_size);
            let first = loader.reset(filter);
            let fetches = drain(&mut loader, &catalog, first);

            // Evening Gown (Dresses) and Evening Purse (Accessories), in catalog order
            assert_eq!(ids(loader.items()), vec![2, 12], "page_size={}", page_size);
            assert_eq!(fetches, 2_usize.div_ceil(page_size), "page_size={}", page_size);
            assert!(!loader.has_more());
        }
    }

    #[test]
    fn test_search_without_matches_exhausts_on_first_fetch() {
        let catalog = MockCatalog::new();
        let mut loader = ListLoader::new(8);
        let mut filter = FilterState::default();
        filter.set_search("zzz");

        let ticket = loader.reset(filter);
        assert_eq!(
            loader.apply(ticket.resolve(&catalog)),
            Applied::Appended {
                count: 0,
                exhausted: true
            }
        );
        assert!(loader.items().is_empty());
        assert!(!loader.has_more());
        assert!(loader.load_next().is_none());
    }

    #[test]
    fn test_load_next_after_exhaustion_is_noop() {
        let catalog = MockCatalog::new();
        let mut loader = ListLoader::new(8);
        let mut filter = FilterState::default();
        filter.toggle_category("Accessories");
        let ticket = loader.reset(filter);
        loader.apply(ticket.resolve(&catalog));

        let page = loader.page();
        assert!(loader.load_next().is_none());
        assert!(loader.load_next().is_none());
        assert_eq!(loader.page(), page);
        assert_eq!(loader.items().len(), 6);
    }

    #[test]
    fn test_load_next_while_in_flight_is_dropped() {
        let catalog = MockCatalog::new();
        let mut loader = ListLoader::new(4);
        let first = loader.reset(FilterState::default());
        loader.apply(first.resolve(&catalog));

        let second = loader.load_next().expect("page two");
        assert!(loader.load_next().is_none());
        assert!(loader.load_next().is_none());

        loader.apply(second.resolve(&catalog));
        assert_eq!(loader.items().len(), 8);
        assert_eq!(loader.page(), 3);
    }

    #[test]
    fn test_duplicate_outcome_is_not_appended_twice() {
        let catalog = MockCatalog::new();
        let mut loader = ListLoader::new(4);
        let ticket = loader.reset(FilterState::default());
        let outcome = ticket.resolve(&catalog);

        assert!(matches!(
            loader.apply(outcome.clone()),
            Applied::Appended { count: 4, .. }
        ));
        assert_eq!(loader.apply(outcome), Applied::Stale);
        assert_eq!(loader.items().len(), 4);
    }

    #[test]
    fn test_stale_page_after_reset_is_discarded() {
        let catalog = MockCatalog::new();
        let mut loader = ListLoader::new(8);

        let stale = loader.reset(FilterState::default());
        let mut accessories = FilterState::default();
        accessories.toggle_category("Accessories");
        let fresh = loader.reset(accessories);
        assert_ne!(stale.epoch, fresh.epoch);

        // Old epoch resolves last-but-arrives-first
        assert_eq!(loader.apply(stale.resolve(&catalog)), Applied::Stale);
        assert!(loader.items().is_empty());
        assert!(loader.is_loading());

        loader.apply(fresh.resolve(&catalog));
        assert!(loader
            .items()
            .iter()
            .all(|p| p.category == "Accessories"));
        assert_eq!(loader.items().len(), 6);
    }

    #[test]
    fn test_reset_clears_accumulated_state() {
        let catalog = MockCatalog::new();
        let mut loader = ListLoader::new(8);
        let first = loader.reset(FilterState::default());
        loader.apply(first.resolve(&catalog));
        assert_eq!(loader.page(), 2);

        let ticket = loader.reset(FilterState::default());
        assert_eq!(ticket.page, 1);
        assert_eq!(loader.page(), 1);
        assert!(loader.items().is_empty());
        assert!(loader.has_more());
    }

    #[test]
    fn test_failure_keeps_page_and_allows_retry() {
        let catalog = MockCatalog::new();
        let mut loader = ListLoader::new(8);
        let ticket = loader.reset(FilterState::default());

        let applied = loader.apply(FetchOutcome::Failed {
            epoch: ticket.epoch,
            page: ticket.page,
            error: FetchError::FetchFailed("catalog offline".to_string()),
        });
        assert_eq!(applied, Applied::Failed);
        assert_eq!(loader.page(), 1);
        assert!(loader.has_more());
        assert!(!loader.is_loading());
        assert!(loader.last_error().is_some());

        // Scrolling does not hammer a failing source
        assert!(loader.load_next().is_none());

        let retry = loader.retry().expect("retry ticket");
        assert_eq!(retry.page, 1);
        assert!(loader.last_error().is_none());
        loader.apply(retry.resolve(&catalog));
        assert_eq!(loader.items().len(), 8);
    }

    #[test]
    fn test_retry_without_failure_is_noop() {
        let mut loader = ListLoader::new(8);
        loader.reset(FilterState::default());
        assert!(loader.retry().is_none());
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut loader = ListLoader::new(8);
        let old = loader.reset(FilterState::default());
        loader.reset(FilterState::default());

        let applied = loader.fail(
            old.epoch,
            old.page,
            FetchError::FetchFailed("late".to_string()),
        );
        assert_eq!(applied, Applied::Stale);
        assert!(loader.last_error().is_none());
        assert!(loader.is_loading());
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let loader = ListLoader::new(0);
        assert_eq!(loader.page_size(), 1);
    }

    #[test]
    fn test_ticket_range() {
        let ticket = FetchTicket {
            epoch: Epoch::default(),
            page: 3,
            page_size: 8,
            filter: FilterState::default(),
        };
        assert_eq!(ticket.range(), 16..24);
    }

    #[test]
    fn test_items_have_unique_ids() {
        let catalog = MockCatalog::new();
        let mut loader = ListLoader::new(3);
        let first = loader.reset(FilterState::default());
        drain(&mut loader, &catalog, first);

        let mut seen: Vec<ProductId> = loader.items().iter().map(|p| p.id).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), loader.items().len());
    }
}
