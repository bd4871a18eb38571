use std::sync::Arc;

use naiades_fetch::{FailureKind, FetchError};
use naiades_listing::Listing;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<&FetchError> for Failure {
    fn from(err: &FetchError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<FetchError> for Failure {
    fn from(err: FetchError) -> Self {
        Self::from(&err)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Loaded,
    Failed(Failure),
}

/// Holds the listing currently on screen.
///
/// The listing is only ever swapped for a new one; a failure changes the
/// status but leaves whatever listing was shown untouched.
#[derive(Debug, Clone)]
pub struct ListingStore {
    status: ViewStatus,
    listing: Arc<Listing>,
}

impl Default for ListingStore {
    fn default() -> Self {
        Self {
            status: ViewStatus::Loading,
            listing: Arc::new(Listing::empty()),
        }
    }
}

impl ListingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, listing: impl Into<Arc<Listing>>) {
        self.listing = listing.into();
        self.status = ViewStatus::Loaded;
        tracing::debug!(groups = self.listing.len(), "listing replaced");
    }

    pub fn fail(&mut self, failure: Failure) {
        tracing::warn!(kind = ?failure.kind, "listing fetch failed: {}", failure.message);
        self.status = ViewStatus::Failed(failure);
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn shared_listing(&self) -> Arc<Listing> {
        Arc::clone(&self.listing)
    }
}

#[cfg(test)]
mod tests {
    use naiades_listing::Entry;

    use super::*;

    fn listing_with(name: &str) -> Listing {
        Listing::from_groups([("g", vec![Entry::new(name, "file", "time")])])
    }

    #[test]
    fn starts_loading_with_empty_listing() {
        let store = ListingStore::new();
        assert_eq!(store.status(), &ViewStatus::Loading);
        assert!(store.listing().is_empty());
    }

    #[test]
    fn replace_swaps_the_whole_listing() {
        let mut store = ListingStore::new();
        store.replace(listing_with("first"));
        let first = store.shared_listing();

        store.replace(Listing::from_groups([("other", vec![])]));

        assert_eq!(store.status(), &ViewStatus::Loaded);
        assert!(store.listing().group("g").is_none());
        assert_eq!(store.listing().groups()[0].name, "other");
        // Earlier snapshot is not mutated by the swap.
        assert_eq!(first.groups()[0].entries[0].name, "first");
    }

    #[test]
    fn failure_keeps_displayed_listing() {
        let mut store = ListingStore::new();
        store.fail(Failure {
            kind: FailureKind::Transport,
            message: "connection refused".to_string(),
        });

        assert!(matches!(
            store.status(),
            ViewStatus::Failed(Failure { kind: FailureKind::Transport, .. })
        ));
        assert!(store.listing().is_empty());
    }

    #[test]
    fn failure_from_fetch_error_carries_kind() {
        let failure = Failure::from(FetchError::Status(naiades_fetch::StatusCode::BAD_GATEWAY));
        assert_eq!(failure.kind, FailureKind::Status);
        assert!(failure.message.contains("502"));
    }
}
