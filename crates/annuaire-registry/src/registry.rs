use std::collections::HashSet;

use annuaire_core::text::fold;
use annuaire_core::{Business, BusinessId, BusinessStatus, BusinessSubmission, Category, GeoPoint};
use annuaire_geo::{nearest, GeoResolver, Ranked};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::RegistryError;
use crate::repository::Repository;

pub const PENDING_KEY: &str = "pending";
pub const APPROVED_KEY: &str = "approved";

/// Owner of the pending and approved pools.
///
/// Every record lives in exactly one pool. Operations that target an
/// unknown id are no-ops and return `Ok(None)`; the only errors are
/// storage failures. Each mutation persists the changed pool(s) before the
/// in-memory copy is updated, so a failed write leaves the registry as it was.
pub struct BusinessRegistry<S, R = StdRng> {
    store: S,
    resolver: GeoResolver<R>,
    pending: Vec<Business>,
    approved: Vec<Business>,
    last_id: Option<i64>,
}

impl<S: Repository> BusinessRegistry<S, StdRng> {
    /// Load both pools from `store`, resolving new addresses with an
    /// OS-seeded generator.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if a pool cannot be read or decoded.
    pub fn open(store: S) -> Result<Self, RegistryError> {
        Self::open_with(store, GeoResolver::new())
    }
}

impl<S: Repository, R: Rng> BusinessRegistry<S, R> {
    /// Load both pools from `store` with an explicit resolver.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if a pool cannot be read or decoded.
    pub fn open_with(store: S, resolver: GeoResolver<R>) -> Result<Self, RegistryError> {
        let pending = load_pool(&store, PENDING_KEY)?;
        let approved = load_pool(&store, APPROVED_KEY)?;
        let last_id = pending
            .iter()
            .chain(&approved)
            .filter_map(|b| b.id.as_integer())
            .max();

        tracing::debug!(
            pending = pending.len(),
            approved = approved.len(),
            "business registry loaded"
        );

        Ok(Self {
            store,
            resolver,
            pending,
            approved,
            last_id,
        })
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    #[must_use]
    pub fn pending(&self) -> &[Business] {
        &self.pending
    }

    #[must_use]
    pub fn approved(&self) -> &[Business] {
        &self.approved
    }

    /// Approved businesses currently switched on.
    pub fn active(&self) -> impl Iterator<Item = &Business> {
        self.approved.iter().filter(|b| b.is_listed())
    }

    /// Create a pending record from `submission`. Coordinates are resolved
    /// from the address immediately. No field validation happens here.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the pending pool cannot be persisted or
    /// no unused id remains.
    pub fn submit(&mut self, submission: BusinessSubmission) -> Result<Business, RegistryError> {
        let now = Utc::now();
        let id = self.next_id(now.timestamp_millis())?;
        let coordinates = self.resolver.resolve(&submission.address);
        let business = Business::from_submission(id, submission, coordinates, now);

        let mut pending = self.pending.clone();
        pending.push(business.clone());
        self.save(PENDING_KEY, &pending)?;

        self.pending = pending;
        self.last_id = business.id.as_integer().max(self.last_id);

        tracing::info!(
            id = %business.id,
            category = %business.category,
            precision = ?business.coordinates.map(|c| c.precision),
            "business submitted"
        );
        Ok(business)
    }

    /// Move a pending record to the approved pool, active.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if either pool cannot be persisted.
    pub fn approve(&mut self, id: &str) -> Result<Option<Business>, RegistryError> {
        let Some(pos) = position(&self.pending, id) else {
            tracing::debug!(id, "approve ignored: not pending");
            return Ok(None);
        };

        let mut pending = self.pending.clone();
        let mut business = pending.remove(pos);
        business.status = BusinessStatus::Approved;
        business.is_active = true;
        business.approved_at = Some(Utc::now());

        let mut approved = self.approved.clone();
        approved.push(business.clone());

        // Approved first: a failure between the two writes duplicates the
        // record rather than losing it.
        self.save(APPROVED_KEY, &approved)?;
        self.save(PENDING_KEY, &pending)?;
        self.approved = approved;
        self.pending = pending;

        tracing::info!(id = %business.id, "business approved");
        Ok(Some(business))
    }

    /// Drop a pending record. Returns the rejected record; nothing is kept.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the pending pool cannot be persisted.
    pub fn reject(&mut self, id: &str) -> Result<Option<Business>, RegistryError> {
        let Some(pos) = position(&self.pending, id) else {
            tracing::debug!(id, "reject ignored: not pending");
            return Ok(None);
        };

        let mut pending = self.pending.clone();
        let mut business = pending.remove(pos);
        self.save(PENDING_KEY, &pending)?;
        self.pending = pending;

        business.status = BusinessStatus::Rejected;
        business.status_updated_at = Some(Utc::now());
        tracing::info!(id = %business.id, "business rejected");
        Ok(Some(business))
    }

    /// Flip `is_active` on an approved record.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the approved pool cannot be persisted.
    pub fn toggle_active(&mut self, id: &str) -> Result<Option<Business>, RegistryError> {
        let Some(pos) = position(&self.approved, id) else {
            tracing::debug!(id, "toggle ignored: not approved");
            return Ok(None);
        };

        let mut approved = self.approved.clone();
        let business = &mut approved[pos];
        business.is_active = !business.is_active;
        business.status_updated_at = Some(Utc::now());
        let updated = business.clone();

        self.save(APPROVED_KEY, &approved)?;
        self.approved = approved;

        tracing::info!(id = %updated.id, is_active = updated.is_active, "business toggled");
        Ok(Some(updated))
    }

    /// Administrative hard delete from the approved pool.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the approved pool cannot be persisted.
    pub fn remove(&mut self, id: &str) -> Result<Option<Business>, RegistryError> {
        let Some(pos) = position(&self.approved, id) else {
            tracing::debug!(id, "remove ignored: not approved");
            return Ok(None);
        };

        let mut approved = self.approved.clone();
        let business = approved.remove(pos);
        self.save(APPROVED_KEY, &approved)?;
        self.approved = approved;

        tracing::info!(id = %business.id, "business removed");
        Ok(Some(business))
    }

    /// Look up `id` in both pools. Ids match as given or after integer
    /// coercion.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&Business> {
        self.find_pending(id).or_else(|| self.find_approved(id))
    }

    #[must_use]
    pub fn find_pending(&self, id: &str) -> Option<&Business> {
        self.pending.iter().find(|b| b.id.matches(id))
    }

    #[must_use]
    pub fn find_approved(&self, id: &str) -> Option<&Business> {
        self.approved.iter().find(|b| b.id.matches(id))
    }

    /// Approved records in `category`, active or not.
    #[must_use]
    pub fn by_category(&self, category: Category) -> Vec<&Business> {
        self.approved
            .iter()
            .filter(|b| b.category == category)
            .collect()
    }

    /// Case- and accent-insensitive substring search over the name,
    /// description, address and category label of listed businesses.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Business> {
        let needle = fold(query);
        if needle.is_empty() {
            return Vec::new();
        }
        self.active()
            .filter(|b| {
                [
                    Some(b.name.as_str()),
                    b.description.as_deref(),
                    Some(b.address.as_str()),
                    Some(b.category.label()),
                ]
                .into_iter()
                .flatten()
                .any(|field| fold(field).contains(&needle))
            })
            .collect()
    }

    /// Listed businesses within `max_distance_km` of `origin`, closest first.
    #[must_use]
    pub fn nearest(&self, origin: GeoPoint, max_distance_km: f64) -> Vec<Ranked<'_, Business>> {
        nearest(origin, self.active(), max_distance_km)
    }

    // Past `i64::MAX` ids wrap to the first integer no record holds.
    fn next_id(&self, now_millis: i64) -> Result<BusinessId, RegistryError> {
        if let Some(id) = BusinessId::next_after(self.last_id, now_millis) {
            return Ok(id);
        }
        let taken: HashSet<i64> = self
            .pending
            .iter()
            .chain(&self.approved)
            .filter_map(|b| b.id.as_integer())
            .collect();
        let start = now_millis.max(1);
        (start..=i64::MAX)
            .chain(1..start)
            .find(|n| !taken.contains(n))
            .map(|n| BusinessId::new(n.to_string()))
            .ok_or(RegistryError::IdsExhausted)
    }

    fn save(&mut self, key: &str, records: &[Business]) -> Result<(), RegistryError> {
        let value = serde_json::to_value(records).map_err(|source| RegistryError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.put(key, value).map_err(|e| {
            tracing::warn!(key, error = %e, "failed to persist pool");
            RegistryError::from(e)
        })
    }
}

impl<S, R> std::fmt::Debug for BusinessRegistry<S, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BusinessRegistry")
            .field("pending", &self.pending.len())
            .field("approved", &self.approved.len())
            .field("last_id", &self.last_id)
            .finish_non_exhaustive()
    }
}

fn position(pool: &[Business], id: &str) -> Option<usize> {
    pool.iter().position(|b| b.id.matches(id))
}

fn load_pool<S: Repository>(store: &S, key: &str) -> Result<Vec<Business>, RegistryError> {
    match store.get(key)? {
        None => Ok(Vec::new()),
        Some(value) => serde_json::from_value(value).map_err(|source| RegistryError::Decode {
            key: key.to_string(),
            source,
        }),
    }
}

/// Timestamp of the most recent lifecycle change on `business`.
#[must_use]
pub fn last_changed(business: &Business) -> DateTime<Utc> {
    [business.status_updated_at, business.approved_at]
        .into_iter()
        .flatten()
        .max()
        .unwrap_or(business.created_at)
}
