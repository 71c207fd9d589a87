//! Live per-owner view of the shop.
//!
//! A [`Workspace`] subscribes to all five collections of one owner and keeps
//! the latest snapshot of each, along with the views derived from them. Every
//! delivery replaces a whole collection and recomputes the derived views, so
//! readers always see a consistent picture.

use crate::{
    config::BusinessRules,
    core::{
        commission::{PainterRow, painters_with_commissions},
        dashboard::{DashboardStats, compute_dashboard_stats},
        records::{ColorMixing, Customer, Document, Order, OwnerId, Painter, Stock, Stored},
        stock::{StockRow, stock_with_status},
    },
    errors::{Error, Result},
    store::{RecordStore, Subscription},
};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info};

/// The latest contents of every collection plus the derived views.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub orders: Vec<Stored<Order>>,
    pub customers: Vec<Stored<Customer>>,
    pub painters: Vec<Stored<Painter>>,
    pub stock: Vec<Stored<Stock>>,
    pub mixing: Vec<Stored<ColorMixing>>,
    /// Dashboard counters
    pub stats: DashboardStats,
    /// Painters with their commission totals
    pub painter_rows: Vec<PainterRow>,
    /// Stock items with their derived status
    pub stock_rows: Vec<StockRow>,
}

impl Snapshot {
    /// Builds a snapshot from raw collections.
    #[must_use]
    pub fn from_collections(
        orders: Vec<Stored<Order>>,
        customers: Vec<Stored<Customer>>,
        painters: Vec<Stored<Painter>>,
        stock: Vec<Stored<Stock>>,
        mixing: Vec<Stored<ColorMixing>>,
        rules: BusinessRules,
    ) -> Self {
        let mut snapshot = Self {
            orders,
            customers,
            painters,
            stock,
            mixing,
            ..Self::default()
        };
        snapshot.refresh(rules);
        snapshot
    }

    /// Recomputes every derived view from the raw collections.
    pub fn refresh(&mut self, rules: BusinessRules) {
        self.stats = compute_dashboard_stats(
            &self.orders,
            &self.customers,
            &self.painters,
            &self.stock,
            rules.low_stock_threshold,
        );
        self.painter_rows =
            painters_with_commissions(&self.painters, &self.orders, rules.commission_rate);
        self.stock_rows = stock_with_status(&self.stock, rules.low_stock_threshold);
    }
}

type Apply<R> = fn(&mut Snapshot, Vec<Stored<R>>);

/// One owner's live session over a record store.
pub struct Workspace<S: RecordStore> {
    store: Arc<S>,
    owner: Option<OwnerId>,
    rules: BusinessRules,
    state: Arc<RwLock<Snapshot>>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl<S: RecordStore> Workspace<S> {
    /// Opens a workspace, subscribing to every collection of `owner`.
    ///
    /// Without an owner nothing is subscribed and the snapshot stays empty.
    pub async fn open(store: Arc<S>, owner: Option<OwnerId>, rules: BusinessRules) -> Result<Self> {
        let state = Arc::new(RwLock::new(Snapshot::default()));
        let mut subscriptions = Vec::new();

        if let Some(owner) = &owner {
            let store = store.as_ref();
            subscriptions = vec![
                watch::<S, Order>(store, owner, &state, rules, |s, rows| s.orders = rows).await?,
                watch::<S, Customer>(store, owner, &state, rules, |s, rows| {
                    s.customers = rows;
                })
                .await?,
                watch::<S, Painter>(store, owner, &state, rules, |s, rows| s.painters = rows)
                    .await?,
                watch::<S, Stock>(store, owner, &state, rules, |s, rows| s.stock = rows).await?,
                watch::<S, ColorMixing>(store, owner, &state, rules, |s, rows| s.mixing = rows)
                    .await?,
            ];
            info!(%owner, "Workspace opened");
        } else {
            debug!("Workspace opened without an owner; nothing subscribed");
        }

        Ok(Self {
            store,
            owner,
            rules,
            state,
            subscriptions: Mutex::new(subscriptions),
        })
    }

    #[must_use]
    pub const fn owner(&self) -> Option<&OwnerId> {
        self.owner.as_ref()
    }

    #[must_use]
    pub const fn rules(&self) -> BusinessRules {
        self.rules
    }

    /// A copy of the latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Reads the latest snapshot without copying it.
    pub fn with_snapshot<T>(&self, read: impl FnOnce(&Snapshot) -> T) -> T {
        let snapshot = self.state.read().unwrap_or_else(PoisonError::into_inner);
        read(&snapshot)
    }

    /// Adds a record to the owner's collection of `R`.
    ///
    /// # Errors
    /// `Error::Unauthenticated` without an owner; otherwise whatever the store
    /// fails with.
    pub async fn add<R: Document>(&self, record: R) -> Result<Stored<R>> {
        let Some(owner) = &self.owner else {
            return Err(Error::Unauthenticated);
        };
        self.store.create(owner, &record).await
    }

    /// Cancels every subscription. Safe to call more than once.
    pub fn close(&self) {
        let mut subscriptions = self
            .subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for subscription in subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }

    /// Whether the workspace still receives updates.
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(Subscription::is_active)
    }
}

async fn watch<S: RecordStore, R: Document>(
    store: &S,
    owner: &OwnerId,
    state: &Arc<RwLock<Snapshot>>,
    rules: BusinessRules,
    apply: Apply<R>,
) -> Result<Subscription> {
    let state = Arc::clone(state);
    store
        .subscribe::<R, _>(owner, move |rows| {
            let mut snapshot = state.write().unwrap_or_else(PoisonError::into_inner);
            apply(&mut snapshot, rows);
            snapshot.refresh(rules);
        })
        .await
}
