//! Scroll sentinel - visibility-triggered next-page requests
//!
//! A marker sits right after the last rendered item. Each frame the item
//! grid reports whether that marker is inside the viewport; when it is, and
//! the loader has more pages and nothing in flight, the sentinel fires its
//! single registered handler.
//!
//! The sentinel is level-triggered: it fires on every observation while the
//! conditions hold. The loader's in-flight guard is what keeps that from
//! turning into duplicate fetches.
//!
//! Each filter epoch gets a new marker. Observations reported for any marker
//! other than the attached one are ignored, so a frame rendered for an old
//! epoch can never trigger a load for the new one.

use crate::loader::{Epoch, LoaderView};

/// Identity of the marker row the sentinel watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(u64);

impl MarkerId {
    /// Marker for the item list of `epoch`
    pub fn for_epoch(epoch: Epoch) -> Self {
        MarkerId(epoch.value())
    }
}

/// Loader flags the sentinel checks before firing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentinelStatus {
    pub is_loading: bool,
    pub has_more: bool,
}

impl From<&LoaderView<'_>> for SentinelStatus {
    /// A failed page waits for an explicit retry, so it counts as nothing more to load
    fn from(view: &LoaderView<'_>) -> Self {
        Self {
            is_loading: view.is_loading,
            has_more: view.has_more && view.last_error.is_none(),
        }
    }
}

struct Subscription {
    marker: MarkerId,
    handler: Box<dyn FnMut() + Send>,
}

/// Single-subscriber visibility observer
#[derive(Default)]
pub struct ScrollSentinel {
    subscription: Option<Subscription>,
}

impl ScrollSentinel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Watch `marker`, replacing any previous subscription
    pub fn attach<F>(&mut self, marker: MarkerId, handler: F)
    where
        F: FnMut() + Send + 'static,
    {
        tracing::trace!(?marker, "sentinel attached");
        self.subscription = Some(Subscription {
            marker,
            handler: Box::new(handler),
        });
    }

    /// Tear down the subscription; later observations do nothing
    pub fn detach(&mut self) {
        if self.subscription.take().is_some() {
            tracing::trace!("sentinel detached");
        }
    }

    #[cfg(test)]
    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    #[cfg(test)]
    pub fn marker(&self) -> Option<MarkerId> {
        self.subscription.as_ref().map(|s| s.marker)
    }

    /// Report marker visibility; returns whether the handler fired
    pub fn observe(&mut self, marker: MarkerId, visible: bool, status: SentinelStatus) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        if subscription.marker != marker {
            return false;
        }
        if !visible || !status.has_more || status.is_loading {
            return false;
        }
        (subscription.handler)();
        true
    }
}
