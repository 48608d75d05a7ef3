pub mod memory;
pub mod pick;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewPick, Pick, PickChange, PickFilter, PickPage};

pub use memory::InMemoryPickStore;
pub use pick::PickRepository;

/// Access to the `picks` table.
///
/// Implementations report a missing row as [`StorageError::NotFound`] and a
/// (user, league, race) uniqueness violation as [`StorageError::Conflict`];
/// anything else surfaces as the remaining variants. Each call is a single
/// round-trip to the backing store.
///
/// [`StorageError::NotFound`]: crate::error::StorageError::NotFound
/// [`StorageError::Conflict`]: crate::error::StorageError::Conflict
#[async_trait]
pub trait PickStore: Send + Sync {
    /// Matching rows in `[offset, offset + limit)` and the exact match count.
    async fn list(&self, filter: &PickFilter) -> Result<PickPage>;

    async fn insert(&self, pick: &NewPick) -> Result<Pick>;

    async fn find(&self, pick_id: &str) -> Result<Pick>;

    /// Overwrites every mutable field of the row.
    async fn replace(&self, pick_id: &str, pick: &NewPick) -> Result<Pick>;

    /// Writes only the given fields.
    async fn update(&self, pick_id: &str, changes: &[PickChange]) -> Result<Pick>;

    /// Number of rows removed, 0 when the id does not exist.
    async fn delete(&self, pick_id: &str) -> Result<u64>;
}
