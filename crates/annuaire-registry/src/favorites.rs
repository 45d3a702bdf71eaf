use annuaire_core::{Business, BusinessId};
use rand::Rng;

use crate::error::RegistryError;
use crate::registry::BusinessRegistry;
use crate::repository::Repository;

pub const FAVORITES_KEY: &str = "favorites";

/// The visitor's bookmarked business ids, in the order they were added.
///
/// Ids are kept even when the business later disappears from both pools;
/// [`Favorites::resolve`] silently skips them.
#[derive(Debug)]
pub struct Favorites<S> {
    store: S,
    ids: Vec<BusinessId>,
}

impl<S: Repository> Favorites<S> {
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the stored list cannot be read or decoded.
    pub fn open(store: S) -> Result<Self, RegistryError> {
        let ids = match store.get(FAVORITES_KEY)? {
            None => Vec::new(),
            Some(value) => {
                serde_json::from_value(value).map_err(|source| RegistryError::Decode {
                    key: FAVORITES_KEY.to_string(),
                    source,
                })?
            }
        };
        Ok(Self { store, ids })
    }

    #[must_use]
    pub fn ids(&self) -> &[BusinessId] {
        &self.ids
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|fav| fav.matches(id))
    }

    /// Returns `false` if `id` was already bookmarked.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the list cannot be persisted.
    pub fn add(&mut self, id: &str) -> Result<bool, RegistryError> {
        if self.contains(id) {
            return Ok(false);
        }
        let mut ids = self.ids.clone();
        ids.push(BusinessId::new(id.trim()));
        self.save(ids)?;
        Ok(true)
    }

    /// Returns `false` if `id` was not bookmarked.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the list cannot be persisted.
    pub fn remove(&mut self, id: &str) -> Result<bool, RegistryError> {
        if !self.contains(id) {
            return Ok(false);
        }
        let ids = self
            .ids
            .iter()
            .filter(|fav| !fav.matches(id))
            .cloned()
            .collect();
        self.save(ids)?;
        Ok(true)
    }

    /// Adds or removes `id`; returns whether it is bookmarked afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the list cannot be persisted.
    pub fn toggle(&mut self, id: &str) -> Result<bool, RegistryError> {
        if self.contains(id) {
            self.remove(id).map(|_| false)
        } else {
            self.add(id).map(|_| true)
        }
    }

    /// Bookmarked businesses still present in either pool, in bookmark order.
    #[must_use]
    pub fn resolve<'r, T: Repository, R: Rng>(
        &self,
        registry: &'r BusinessRegistry<T, R>,
    ) -> Vec<&'r Business> {
        self.ids
            .iter()
            .filter_map(|id| registry.find_by_id(id.as_str()))
            .collect()
    }

    fn save(&mut self, ids: Vec<BusinessId>) -> Result<(), RegistryError> {
        let value = serde_json::to_value(&ids).map_err(|source| RegistryError::Encode {
            key: FAVORITES_KEY.to_string(),
            source,
        })?;
        self.store.put(FAVORITES_KEY, value).map_err(|e| {
            tracing::warn!(error = %e, "failed to persist favorites");
            RegistryError::from(e)
        })?;
        self.ids = ids;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use annuaire_core::{BusinessSubmission, Category};
    use annuaire_geo::GeoResolver;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    use super::*;
    use crate::repository::MemoryRepository;

    #[test]
    fn add_is_idempotent_and_coerces_ids() {
        let mut favs = Favorites::open(MemoryRepository::new()).unwrap();
        assert!(favs.add("42").unwrap());
        assert!(!favs.add("42").unwrap());
        assert!(!favs.add(" 42").unwrap());
        assert_eq!(favs.ids().len(), 1);
    }

    #[test]
    fn toggle_round_trips() {
        let mut favs = Favorites::open(MemoryRepository::new()).unwrap();
        assert!(favs.toggle("7").unwrap());
        assert!(favs.contains("7"));
        assert!(!favs.toggle("7").unwrap());
        assert!(favs.ids().is_empty());
        assert!(!favs.remove("7").unwrap());
    }

    #[test]
    fn loads_numeric_ids_from_store() {
        let mut store = MemoryRepository::new();
        store.put(FAVORITES_KEY, json!([1, "2"])).unwrap();
        let favs = Favorites::open(store).unwrap();
        assert!(favs.contains("1"));
        assert!(favs.contains("2"));
    }

    #[test]
    fn resolve_skips_stale_ids() {
        let mut registry = BusinessRegistry::open_with(
            MemoryRepository::new(),
            GeoResolver::with_rng(StdRng::seed_from_u64(3)),
        )
        .unwrap();
        let listed = registry
            .submit(BusinessSubmission::new("A", Category::Banque, "Kaloum"))
            .unwrap()
            .id;
        let hidden = registry
            .submit(BusinessSubmission::new("B", Category::Banque, "Kaloum"))
            .unwrap()
            .id;
        let pending = registry
            .submit(BusinessSubmission::new("C", Category::Banque, "Kaloum"))
            .unwrap()
            .id;
        registry.approve(listed.as_str()).unwrap();
        registry.approve(hidden.as_str()).unwrap();
        registry.toggle_active(hidden.as_str()).unwrap();

        let mut favs = Favorites::open(MemoryRepository::new()).unwrap();
        for id in [&hidden, &pending, &listed] {
            favs.add(id.as_str()).unwrap();
        }
        favs.add("999").unwrap();

        registry.reject(pending.as_str()).unwrap();

        let resolved: Vec<&BusinessId> = favs
            .resolve(&registry)
            .into_iter()
            .map(|b| &b.id)
            .collect();
        assert_eq!(resolved, [&hidden, &listed]);
    }
}
