//! Owned-app bookkeeping backed by the persistent store.

use katphone_store::KeyValueStore;
use katphone_types::{AppId, Availability, CATALOG};

use crate::notifications::{Alert, AlertQueue};

/// Store key holding the JSON array of purchased app identifiers.
pub const OWNED_APPS_KEY: &str = "kat_apps";

const STORE_TITLE: &str = "KatStore";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// Built-in or bought earlier; nothing changed.
    AlreadyOwned,
    /// Added to the owned set. `persisted` is false when the store write failed;
    /// the purchase still holds for this session.
    Installed { persisted: bool },
}

/// Tracks which purchasable apps the user owns. Built-ins are implicitly owned
/// and never stored.
pub struct OwnershipController {
    store: Box<dyn KeyValueStore>,
    purchased: Vec<AppId>,
}

impl OwnershipController {
    /// Load the owned set. Any failure falls back to the built-in defaults.
    #[must_use]
    pub fn initialize(store: Box<dyn KeyValueStore>) -> Self {
        let purchased = match store.get(OWNED_APPS_KEY) {
            Ok(Some(raw)) => parse_owned(&raw).unwrap_or_else(|err| {
                tracing::warn!("Owned apps unreadable, using defaults: {err}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                tracing::warn!("Failed to load owned apps, using defaults: {err}");
                Vec::new()
            }
        };
        tracing::info!(count = purchased.len(), "Owned apps loaded");
        Self { store, purchased }
    }

    #[must_use]
    pub fn is_owned(&self, id: AppId) -> bool {
        id.is_built_in() || self.purchased.contains(&id)
    }

    /// Purchased apps in purchase order.
    #[must_use]
    pub fn purchased(&self) -> &[AppId] {
        &self.purchased
    }

    /// Owned apps in home-screen order.
    #[must_use]
    pub fn owned_apps(&self) -> Vec<AppId> {
        CATALOG
            .iter()
            .map(|entry| entry.id)
            .filter(|id| self.is_owned(*id))
            .collect()
    }

    /// Store listing: purchasable apps not yet owned.
    #[must_use]
    pub fn available_for_purchase(&self) -> Vec<AppId> {
        CATALOG
            .iter()
            .filter(|entry| entry.availability == Availability::Purchasable)
            .map(|entry| entry.id)
            .filter(|id| !self.purchased.contains(id))
            .collect()
    }

    pub fn purchase(&mut self, id: AppId, alerts: &mut AlertQueue) -> PurchaseOutcome {
        if self.is_owned(id) {
            return PurchaseOutcome::AlreadyOwned;
        }
        self.purchased.push(id);

        let persisted = match self.persist() {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(app = %id, "Failed to persist purchase: {err}");
                false
            }
        };
        tracing::info!(app = %id, persisted, "App installed");
        alerts.push(Alert::new(STORE_TITLE, format!("{id} installed!")));
        PurchaseOutcome::Installed { persisted }
    }

    fn persist(&mut self) -> Result<(), katphone_store::StoreError> {
        let names: Vec<&str> = self.purchased.iter().map(|id| id.as_str()).collect();
        let raw = serde_json::to_string(&names)?;
        self.store.set(OWNED_APPS_KEY, &raw)
    }
}

impl std::fmt::Debug for OwnershipController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnershipController")
            .field("purchased", &self.purchased)
            .finish_non_exhaustive()
    }
}

/// Parse the stored sequence. Unknown names are dropped, built-ins saved by
/// older versions are skipped, and duplicates collapse.
fn parse_owned(raw: &str) -> Result<Vec<AppId>, serde_json::Error> {
    let names: Vec<String> = serde_json::from_str(raw)?;
    let mut purchased = Vec::new();
    for name in names {
        match AppId::parse(&name) {
            Some(id) if id.is_built_in() => {}
            Some(id) if !purchased.contains(&id) => purchased.push(id),
            Some(_) => {}
            None => tracing::debug!(name = %name, "Ignoring unknown owned app"),
        }
    }
    Ok(purchased)
}
