//! Collection and Card Entities

use chrono::{DateTime, Utc};
use kernel::id::{CardId, CollectionId, UserId};
use serde::{Deserialize, Serialize};

/// Maximum title length
const TITLE_MAX_LENGTH: usize = 128;

/// A single flashcard
///
/// Cards have no table of their own; they live inside their
/// collection's JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub card_id: CardId,
    /// The word or phrase on the front of the card
    pub lexi: String,
    /// The back of the card
    pub description: String,
}

impl Card {
    pub fn new(lexi: String, description: String) -> Self {
        Self {
            card_id: CardId::new(),
            lexi,
            description,
        }
    }
}

/// A user-owned flashcard collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub collection_id: CollectionId,
    pub owner_id: UserId,
    pub title: String,
    pub description: String,
    pub cards: Vec<Card>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Collection {
    /// Create an empty collection
    pub fn new(owner_id: UserId, title: String, description: String) -> Self {
        let now = Utc::now();

        Self {
            collection_id: CollectionId::new(),
            owner_id,
            title,
            description,
            cards: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a card
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
        self.updated_at = Utc::now();
    }

    /// Replace the front and back of an existing card, keeping its id.
    /// Returns false when no card with that id exists.
    pub fn update_card(&mut self, card_id: &CardId, lexi: String, description: String) -> bool {
        let Some(card) = self.cards.iter_mut().find(|c| c.card_id == *card_id) else {
            return false;
        };

        card.lexi = lexi;
        card.description = description;
        self.updated_at = Utc::now();
        true
    }

    /// Remove a card by id. Returns false when no card with that id
    /// exists.
    pub fn remove_card(&mut self, card_id: &CardId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|c| c.card_id != *card_id);

        if self.cards.len() == before {
            return false;
        }

        self.updated_at = Utc::now();
        true
    }

    /// Apply a partial update
    pub fn apply_update(&mut self, title: Option<String>, description: Option<String>) {
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }
}

/// Validate a collection title
pub fn validate_title(title: &str) -> Result<(), String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if trimmed.chars().count() > TITLE_MAX_LENGTH {
        return Err(format!(
            "Title must be at most {} characters",
            TITLE_MAX_LENGTH
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_card_bumps_updated_at() {
        let mut collection =
            Collection::new(UserId::new(), "Spanish".to_string(), "A1 vocab".to_string());
        let before = collection.updated_at;

        collection.add_card(Card::new("hola".to_string(), "hello".to_string()));

        assert_eq!(collection.cards.len(), 1);
        assert!(collection.updated_at >= before);
    }

    #[test]
    fn test_update_card_in_place() {
        let mut collection =
            Collection::new(UserId::new(), "Spanish".to_string(), "A1 vocab".to_string());
        collection.add_card(Card::new("hola".to_string(), "hello".to_string()));
        let card_id = collection.cards[0].card_id;

        assert!(collection.update_card(&card_id, "adiós".to_string(), "goodbye".to_string()));
        assert_eq!(collection.cards.len(), 1);
        assert_eq!(collection.cards[0].card_id, card_id);
        assert_eq!(collection.cards[0].lexi, "adiós");

        // Unknown card id leaves the collection untouched
        assert!(!collection.update_card(&CardId::new(), "x".to_string(), "y".to_string()));
        assert_eq!(collection.cards[0].lexi, "adiós");
    }

    #[test]
    fn test_remove_card_by_id() {
        let mut collection =
            Collection::new(UserId::new(), "Spanish".to_string(), "A1 vocab".to_string());
        collection.add_card(Card::new("hola".to_string(), "hello".to_string()));
        collection.add_card(Card::new("adiós".to_string(), "goodbye".to_string()));
        let card_id = collection.cards[0].card_id;

        assert!(collection.remove_card(&card_id));
        assert_eq!(collection.cards.len(), 1);
        assert_eq!(collection.cards[0].lexi, "adiós");

        // Removing it again reports absence
        assert!(!collection.remove_card(&card_id));
        assert_eq!(collection.cards.len(), 1);
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Spanish").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"x".repeat(129)).is_err());
    }

    #[test]
    fn test_cards_json_roundtrip() {
        let card = Card::new("hola".to_string(), "hello".to_string());
        let json = serde_json::to_string(&vec![card.clone()]).unwrap();
        let back: Vec<Card> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![card]);
    }
}
