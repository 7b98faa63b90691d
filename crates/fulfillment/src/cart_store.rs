use std::time::{Duration, Instant};

use dashmap::DashMap;

use savory_core::domain::cart::{Cart, RemovalOutcome, SessionId};

/// Process-wide mapping from conversation session to its in-flight cart.
///
/// Backed by a sharded concurrent map: every read-modify-write sequence on a
/// single session (the overwrite-merge, the per-item removal loop, the
/// take-on-complete) runs under that session's shard lock and appears atomic
/// to concurrent callers, while operations on distinct sessions proceed
/// independently. No I/O ever happens under a shard lock.
///
/// Entries persist until Complete takes them or, when idle eviction is
/// enabled, until [`CartStore::evict_idle`] sweeps them.
#[derive(Default)]
pub struct CartStore {
    carts: DashMap<SessionId, CartEntry>,
}

struct CartEntry {
    cart: Cart,
    last_activity: Instant,
}

impl CartEntry {
    fn new(cart: Cart) -> Self {
        Self { cart, last_activity: Instant::now() }
    }

    fn touch(&mut self) {
        self.last_activity = Instant::now();
    }
}

/// A single item of a removal request: `quantity: None` means "remove the
/// item entirely", a quantity removes up to that many units.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemovalRequest {
    pub item: String,
    pub quantity: Option<u32>,
}

/// What a removal pass did, per category, plus the cart left behind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RemovalReport {
    pub removed: Vec<String>,
    pub updated: Vec<String>,
    pub missing: Vec<String>,
    pub remaining: Cart,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the session to an empty cart, creating it if needed.
    /// Returns whether a cart already existed (and was therefore cleared).
    pub fn start(&self, session: &SessionId) -> bool {
        match self.carts.entry(session.clone()) {
            dashmap::mapref::entry::Entry::Occupied(mut occupied) => {
                occupied.insert(CartEntry::new(Cart::new()));
                true
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                vacant.insert(CartEntry::new(Cart::new()));
                false
            }
        }
    }

    /// Overwrite-merges `delta` into the session's cart, creating the cart
    /// from the delta when the session has none. Returns a snapshot of the
    /// cart after the merge.
    pub fn merge(&self, session: &SessionId, delta: Cart) -> Cart {
        match self.carts.entry(session.clone()) {
            dashmap::mapref::entry::Entry::Occupied(mut occupied) => {
                let entry = occupied.get_mut();
                entry.cart.merge_overwrite(&delta);
                entry.touch();
                entry.cart.clone()
            }
            dashmap::mapref::entry::Entry::Vacant(vacant) => {
                vacant.insert(CartEntry::new(delta.clone()));
                delta
            }
        }
    }

    /// Applies a removal pass atomically. `None` when the session has no
    /// cart. An emptied cart stays in the store; only Complete deletes it.
    pub fn remove_items(
        &self,
        session: &SessionId,
        requests: &[RemovalRequest],
    ) -> Option<RemovalReport> {
        let mut entry = self.carts.get_mut(session)?;
        let mut report = RemovalReport::default();

        for request in requests {
            let outcome = match request.quantity {
                Some(quantity) => entry.cart.remove(&request.item, quantity),
                None => match entry.cart.quantity(&request.item) {
                    Some(current) => entry.cart.remove(&request.item, current),
                    None => RemovalOutcome::NotPresent,
                },
            };

            match outcome {
                RemovalOutcome::Removed => report.removed.push(request.item.clone()),
                RemovalOutcome::Decremented(_) => report.updated.push(request.item.clone()),
                RemovalOutcome::NotPresent => report.missing.push(request.item.clone()),
            }
        }

        entry.touch();
        report.remaining = entry.cart.clone();
        Some(report)
    }

    /// Removes the session's cart and hands it to the caller (Complete).
    pub fn take(&self, session: &SessionId) -> Option<Cart> {
        self.carts.remove(session).map(|(_, entry)| entry.cart)
    }

    pub fn contains(&self, session: &SessionId) -> bool {
        self.carts.contains_key(session)
    }

    pub fn len(&self) -> usize {
        self.carts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    /// Deletes every session idle for at least `max_idle` and returns the
    /// evicted session ids.
    pub fn evict_idle(&self, max_idle: Duration) -> Vec<SessionId> {
        let now = Instant::now();
        let mut evicted = Vec::new();
        self.carts.retain(|session, entry| {
            if now.duration_since(entry.last_activity) >= max_idle {
                evicted.push(session.clone());
                false
            } else {
                true
            }
        });
        evicted
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use savory_core::domain::cart::{Cart, SessionId};

    use super::{CartStore, RemovalRequest};

    fn delta(pairs: &[(&str, u32)]) -> Cart {
        Cart::from_pairs(pairs.iter().map(|(item, quantity)| ((*item).to_owned(), *quantity)))
    }

    fn removal(item: &str, quantity: Option<u32>) -> RemovalRequest {
        RemovalRequest { item: item.to_owned(), quantity }
    }

    #[test]
    fn start_reports_whether_a_cart_was_cleared() {
        let store = CartStore::new();
        let session = SessionId::from("s-1");

        assert!(!store.start(&session), "first start is fresh");
        store.merge(&session, delta(&[("burger", 2)]));
        assert!(store.start(&session), "second start clears the existing cart");
        assert_eq!(store.merge(&session, Cart::new()).len(), 0);
    }

    #[test]
    fn merge_creates_then_overwrites() {
        let store = CartStore::new();
        let session = SessionId::from("s-2");

        let first = store.merge(&session, delta(&[("apple", 2)]));
        assert_eq!(first.quantity("apple"), Some(2));

        let second = store.merge(&session, delta(&[("apple", 5)]));
        assert_eq!(second.quantity("apple"), Some(5), "overwrite-merge, not additive");
    }

    #[test]
    fn removal_pass_categorizes_and_keeps_the_empty_cart() {
        let store = CartStore::new();
        let session = SessionId::from("s-3");
        store.merge(&session, delta(&[("soda", 1), ("fries", 5)]));

        let report = store
            .remove_items(
                &session,
                &[
                    removal("soda", Some(3)),
                    removal("fries", Some(2)),
                    removal("pizza", Some(1)),
                ],
            )
            .expect("session exists");

        assert_eq!(report.removed, vec!["soda".to_owned()]);
        assert_eq!(report.updated, vec!["fries".to_owned()]);
        assert_eq!(report.missing, vec!["pizza".to_owned()]);
        assert_eq!(report.remaining.quantity("fries"), Some(3));

        let emptied = store
            .remove_items(&session, &[removal("fries", None)])
            .expect("session still exists");
        assert!(emptied.remaining.is_empty());
        assert!(store.contains(&session), "an emptied cart stays in the store");
    }

    #[test]
    fn removal_on_an_absent_session_is_none() {
        let store = CartStore::new();
        assert!(store.remove_items(&SessionId::from("ghost"), &[removal("soda", Some(1))]).is_none());
    }

    #[test]
    fn take_removes_the_session() {
        let store = CartStore::new();
        let session = SessionId::from("s-4");
        store.merge(&session, delta(&[("taco", 3)]));

        let cart = store.take(&session).expect("cart present");
        assert_eq!(cart.quantity("taco"), Some(3));
        assert!(!store.contains(&session));
        assert!(store.take(&session).is_none());
    }

    #[test]
    fn evict_idle_only_sweeps_stale_sessions() {
        let store = CartStore::new();
        store.merge(&SessionId::from("fresh"), delta(&[("soda", 1)]));

        assert!(store.evict_idle(Duration::from_secs(3600)).is_empty());
        assert_eq!(store.len(), 1);

        let evicted = store.evict_idle(Duration::ZERO);
        assert_eq!(evicted, vec![SessionId::from("fresh")]);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn concurrent_sessions_do_not_interfere() {
        let store = Arc::new(CartStore::new());
        let mut handles = Vec::new();

        for session_index in 0..8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let session = SessionId(format!("session-{session_index}"));
                for item_index in 0..50u32 {
                    let delta = Cart::from_pairs([(format!("item-{item_index}"), item_index + 1)]);
                    store.merge(&session, delta);
                }
            }));
        }

        for handle in handles {
            handle.await.expect("task");
        }

        assert_eq!(store.len(), 8);
        for session_index in 0..8 {
            let session = SessionId(format!("session-{session_index}"));
            let cart = store.take(&session).expect("cart per session");
            assert_eq!(cart.len(), 50);
        }
    }
}
