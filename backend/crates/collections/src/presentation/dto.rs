//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::domain::entity::Collection;

/// Create collection request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Partial collection update request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCollectionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Add card request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCardRequest {
    pub lexi: String,
    #[serde(default)]
    pub description: String,
}

/// Card replacement request (PUT semantics: both sides supplied)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub lexi: String,
    #[serde(default)]
    pub description: String,
}

/// Title filter query string (?title=)
#[derive(Debug, Clone, Deserialize)]
pub struct ListCollectionsQuery {
    pub title: Option<String>,
}

/// Single collection response
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResponse {
    pub status: &'static str,
    pub data: Collection,
}

impl CollectionResponse {
    pub fn new(collection: Collection) -> Self {
        Self {
            status: "success",
            data: collection,
        }
    }
}

/// Collection list response
#[derive(Debug, Clone, Serialize)]
pub struct CollectionListResponse {
    pub status: &'static str,
    pub results: usize,
    pub data: Vec<Collection>,
}

impl CollectionListResponse {
    pub fn new(collections: Vec<Collection>) -> Self {
        Self {
            status: "success",
            results: collections.len(),
            data: collections,
        }
    }
}
