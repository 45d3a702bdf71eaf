//! Business record lifecycle over the pending and approved pools.
//!
//! [`BusinessRegistry`] is the single owner of both pools. It keeps them in
//! memory and writes each changed pool back through a [`Repository`], which
//! decides where the documents actually live.

pub mod error;
pub mod favorites;
pub mod registry;
pub mod repository;

pub use error::{RegistryError, StoreError};
pub use favorites::{Favorites, FAVORITES_KEY};
pub use registry::{last_changed, BusinessRegistry, APPROVED_KEY, PENDING_KEY};
pub use repository::{JsonDirRepository, MemoryRepository, Mirrored, Repository};
