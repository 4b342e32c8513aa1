//! Repository Traits

use kernel::id::{CollectionId, UserId};

use crate::domain::entity::Collection;
use crate::error::CollectionResult;

/// Collection repository trait
#[trait_variant::make(CollectionRepository: Send)]
pub trait LocalCollectionRepository {
    /// Create a new collection; duplicate `(owner_id, title)` is an error
    async fn create(&self, collection: &Collection) -> CollectionResult<()>;

    /// Find collection by ID
    async fn find_by_id(&self, id: &CollectionId) -> CollectionResult<Option<Collection>>;

    /// Find all collections for an owner, optionally filtered by a
    /// case-insensitive title substring
    async fn find_by_owner(
        &self,
        owner_id: &UserId,
        title_filter: Option<&str>,
    ) -> CollectionResult<Vec<Collection>>;

    /// Persist title/description/card changes
    async fn update(&self, collection: &Collection) -> CollectionResult<()>;

    /// Delete a collection
    async fn delete(&self, id: &CollectionId) -> CollectionResult<()>;
}
