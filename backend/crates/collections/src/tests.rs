//! Collection service tests over an in-memory repository

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use kernel::id::{CardId, CollectionId, UserId};

use crate::application::service::CollectionService;
use crate::domain::entity::Collection;
use crate::domain::repository::CollectionRepository;
use crate::error::{CollectionError, CollectionResult};

#[derive(Default)]
struct InMemoryCollectionRepository {
    collections: Mutex<HashMap<CollectionId, Collection>>,
}

impl CollectionRepository for InMemoryCollectionRepository {
    async fn create(&self, collection: &Collection) -> CollectionResult<()> {
        let mut collections = self.collections.lock().unwrap();
        if collections
            .values()
            .any(|c| c.owner_id == collection.owner_id && c.title == collection.title)
        {
            return Err(CollectionError::Duplicate);
        }
        collections.insert(collection.collection_id, collection.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CollectionId) -> CollectionResult<Option<Collection>> {
        Ok(self.collections.lock().unwrap().get(id).cloned())
    }

    async fn find_by_owner(
        &self,
        owner_id: &UserId,
        title_filter: Option<&str>,
    ) -> CollectionResult<Vec<Collection>> {
        let needle = title_filter.map(str::to_lowercase);
        Ok(self
            .collections
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.owner_id == *owner_id)
            .filter(|c| match &needle {
                Some(needle) => c.title.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn update(&self, collection: &Collection) -> CollectionResult<()> {
        let mut collections = self.collections.lock().unwrap();
        if !collections.contains_key(&collection.collection_id) {
            return Err(CollectionError::NotFound);
        }
        collections.insert(collection.collection_id, collection.clone());
        Ok(())
    }

    async fn delete(&self, id: &CollectionId) -> CollectionResult<()> {
        self.collections.lock().unwrap().remove(id);
        Ok(())
    }
}

fn service() -> CollectionService<InMemoryCollectionRepository> {
    CollectionService::new(Arc::new(InMemoryCollectionRepository::default()))
}

#[tokio::test]
async fn test_create_and_get() {
    let service = service();
    let owner = UserId::new();

    let created = service
        .create(&owner, "Spanish".to_string(), "A1 vocab".to_string())
        .await
        .unwrap();

    let fetched = service.get(&owner, &created.collection_id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_duplicate_title_per_owner() {
    let service = service();
    let owner = UserId::new();
    let other = UserId::new();

    service
        .create(&owner, "Spanish".to_string(), String::new())
        .await
        .unwrap();

    let err = service
        .create(&owner, "Spanish".to_string(), String::new())
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::Duplicate));

    // A different owner may reuse the title
    assert!(service
        .create(&other, "Spanish".to_string(), String::new())
        .await
        .is_ok());
}

#[tokio::test]
async fn test_ownership_is_enforced() {
    let service = service();
    let owner = UserId::new();
    let intruder = UserId::new();

    let created = service
        .create(&owner, "Spanish".to_string(), String::new())
        .await
        .unwrap();

    let err = service
        .get(&intruder, &created.collection_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::NotOwner));

    let err = service
        .delete(&intruder, &created.collection_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::NotOwner));

    // A missing collection is NotFound, not NotOwner
    let err = service.get(&owner, &CollectionId::new()).await.unwrap_err();
    assert!(matches!(err, CollectionError::NotFound));
}

#[tokio::test]
async fn test_list_with_title_filter() {
    let service = service();
    let owner = UserId::new();

    for title in ["Spanish A1", "Spanish B2", "French"] {
        service
            .create(&owner, title.to_string(), String::new())
            .await
            .unwrap();
    }

    let all = service.list(&owner, None).await.unwrap();
    assert_eq!(all.len(), 3);

    let spanish = service.list(&owner, Some("spanish")).await.unwrap();
    assert_eq!(spanish.len(), 2);

    let none = service.list(&owner, Some("german")).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_add_card_and_update() {
    let service = service();
    let owner = UserId::new();

    let created = service
        .create(&owner, "Spanish".to_string(), String::new())
        .await
        .unwrap();

    let with_card = service
        .add_card(
            &owner,
            &created.collection_id,
            "hola".to_string(),
            "hello".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(with_card.cards.len(), 1);
    assert_eq!(with_card.cards[0].lexi, "hola");

    let err = service
        .add_card(
            &owner,
            &created.collection_id,
            "   ".to_string(),
            String::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::Validation(_)));

    let renamed = service
        .update(
            &owner,
            &created.collection_id,
            Some("Spanish A1".to_string()),
            None,
        )
        .await
        .unwrap();
    assert_eq!(renamed.title, "Spanish A1");
    // Cards survive a rename
    assert_eq!(renamed.cards.len(), 1);
}

#[tokio::test]
async fn test_update_card_replaces_content() {
    let service = service();
    let owner = UserId::new();

    let created = service
        .create(&owner, "Spanish".to_string(), String::new())
        .await
        .unwrap();
    let with_card = service
        .add_card(
            &owner,
            &created.collection_id,
            "hola".to_string(),
            "hello".to_string(),
        )
        .await
        .unwrap();
    let card_id = with_card.cards[0].card_id;

    let updated = service
        .update_card(
            &owner,
            &created.collection_id,
            &card_id,
            "adiós".to_string(),
            "goodbye".to_string(),
        )
        .await
        .unwrap();
    assert_eq!(updated.cards.len(), 1);
    assert_eq!(updated.cards[0].card_id, card_id);
    assert_eq!(updated.cards[0].lexi, "adiós");
    assert_eq!(updated.cards[0].description, "goodbye");

    // Blank lexi is rejected before the collection is touched
    let err = service
        .update_card(
            &owner,
            &created.collection_id,
            &card_id,
            "  ".to_string(),
            String::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::Validation(_)));

    // A card id the collection doesn't hold is a 404
    let err = service
        .update_card(
            &owner,
            &created.collection_id,
            &CardId::new(),
            "uno".to_string(),
            String::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::CardNotFound));
}

#[tokio::test]
async fn test_remove_card_returns_trimmed_collection() {
    let service = service();
    let owner = UserId::new();
    let intruder = UserId::new();

    let created = service
        .create(&owner, "Spanish".to_string(), String::new())
        .await
        .unwrap();
    service
        .add_card(
            &owner,
            &created.collection_id,
            "hola".to_string(),
            "hello".to_string(),
        )
        .await
        .unwrap();
    let with_cards = service
        .add_card(
            &owner,
            &created.collection_id,
            "adiós".to_string(),
            "goodbye".to_string(),
        )
        .await
        .unwrap();
    let card_id = with_cards.cards[0].card_id;

    // Ownership gates card mutations the same way as collection ones
    let err = service
        .remove_card(&intruder, &created.collection_id, &card_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::NotOwner));

    let trimmed = service
        .remove_card(&owner, &created.collection_id, &card_id)
        .await
        .unwrap();
    assert_eq!(trimmed.cards.len(), 1);
    assert_eq!(trimmed.cards[0].lexi, "adiós");

    // Removing the same card again reports it as gone
    let err = service
        .remove_card(&owner, &created.collection_id, &card_id)
        .await
        .unwrap_err();
    assert!(matches!(err, CollectionError::CardNotFound));
}
