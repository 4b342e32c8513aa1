//! Collection Service
//!
//! CRUD orchestration over the repository. Ownership is checked here,
//! on every operation that takes a collection id: an absent collection
//! is 404, someone else's collection is 403.

use std::sync::Arc;

use kernel::id::{CardId, CollectionId, UserId};

use crate::domain::entity::{validate_title, Card, Collection};
use crate::domain::repository::CollectionRepository;
use crate::error::{CollectionError, CollectionResult};

/// Collection CRUD service
pub struct CollectionService<R>
where
    R: CollectionRepository,
{
    repo: Arc<R>,
}

impl<R> CollectionService<R>
where
    R: CollectionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Fetch a collection and verify the caller owns it
    async fn owned(
        &self,
        owner_id: &UserId,
        id: &CollectionId,
    ) -> CollectionResult<Collection> {
        let collection = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(CollectionError::NotFound)?;

        if collection.owner_id != *owner_id {
            tracing::warn!(
                collection_id = %id,
                owner_id = %collection.owner_id,
                caller_id = %owner_id,
                "Ownership check failed"
            );
            return Err(CollectionError::NotOwner);
        }

        Ok(collection)
    }

    pub async fn create(
        &self,
        owner_id: &UserId,
        title: String,
        description: String,
    ) -> CollectionResult<Collection> {
        validate_title(&title).map_err(CollectionError::Validation)?;

        let collection = Collection::new(*owner_id, title.trim().to_string(), description);
        self.repo.create(&collection).await?;

        tracing::info!(
            collection_id = %collection.collection_id,
            owner_id = %owner_id,
            "Collection created"
        );

        Ok(collection)
    }

    pub async fn list(
        &self,
        owner_id: &UserId,
        title_filter: Option<&str>,
    ) -> CollectionResult<Vec<Collection>> {
        self.repo.find_by_owner(owner_id, title_filter).await
    }

    pub async fn get(
        &self,
        owner_id: &UserId,
        id: &CollectionId,
    ) -> CollectionResult<Collection> {
        self.owned(owner_id, id).await
    }

    pub async fn update(
        &self,
        owner_id: &UserId,
        id: &CollectionId,
        title: Option<String>,
        description: Option<String>,
    ) -> CollectionResult<Collection> {
        if let Some(title) = &title {
            validate_title(title).map_err(CollectionError::Validation)?;
        }

        let mut collection = self.owned(owner_id, id).await?;
        collection.apply_update(title.map(|t| t.trim().to_string()), description);
        self.repo.update(&collection).await?;

        Ok(collection)
    }

    pub async fn delete(&self, owner_id: &UserId, id: &CollectionId) -> CollectionResult<()> {
        // Ownership first; delete itself is unconditional afterwards
        self.owned(owner_id, id).await?;
        self.repo.delete(id).await?;

        tracing::info!(collection_id = %id, owner_id = %owner_id, "Collection deleted");

        Ok(())
    }

    pub async fn add_card(
        &self,
        owner_id: &UserId,
        id: &CollectionId,
        lexi: String,
        description: String,
    ) -> CollectionResult<Collection> {
        if lexi.trim().is_empty() {
            return Err(CollectionError::Validation(
                "Card lexi cannot be empty".to_string(),
            ));
        }

        let mut collection = self.owned(owner_id, id).await?;
        collection.add_card(Card::new(lexi.trim().to_string(), description));
        self.repo.update(&collection).await?;

        Ok(collection)
    }

    pub async fn update_card(
        &self,
        owner_id: &UserId,
        id: &CollectionId,
        card_id: &CardId,
        lexi: String,
        description: String,
    ) -> CollectionResult<Collection> {
        if lexi.trim().is_empty() {
            return Err(CollectionError::Validation(
                "Card lexi cannot be empty".to_string(),
            ));
        }

        let mut collection = self.owned(owner_id, id).await?;
        if !collection.update_card(card_id, lexi.trim().to_string(), description) {
            return Err(CollectionError::CardNotFound);
        }
        self.repo.update(&collection).await?;

        Ok(collection)
    }

    pub async fn remove_card(
        &self,
        owner_id: &UserId,
        id: &CollectionId,
        card_id: &CardId,
    ) -> CollectionResult<Collection> {
        let mut collection = self.owned(owner_id, id).await?;
        if !collection.remove_card(card_id) {
            return Err(CollectionError::CardNotFound);
        }
        self.repo.update(&collection).await?;

        Ok(collection)
    }
}
